//! Domain services for WebSitio.
//!
//! The configuration engine: schema table, normalization of stored records,
//! path-based edits and serialization back to the store layout.

pub mod approval;
pub mod defaults;
pub mod mutator;
pub mod normalizer;
pub mod schema;
pub mod serializer;

pub use approval::reset_client_approvals;
pub use defaults::defaults_for;
pub use mutator::{
    blank_element, get, insert_array_element, remove_array_element, set, set_array_element,
    FieldPath, MutationError, Segment,
};
pub use normalizer::normalize;
pub use schema::{is_known_key, WireField, LegacyEncoding, Shape, WireKey};
pub use serializer::{serialize, serialize_structured};
