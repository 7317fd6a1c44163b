//! Built-in starting content for each vertical.
//!
//! An editor opened for a client with no stored record starts from these
//! values, and the normalizer falls back to them field by field.

use crate::models::{
    About, Approval, Banner, Bilingual, Branding, Chatbot, ChatbotQuestion, Hero, Identity,
    OfficeHours, Offering, Photo, Review, SiteConfig, Stat, TemplateType,
};

const MAPS_EMBED_CHETUMAL: &str = "https://www.google.com/maps/embed?pb=!1m18!1m12!1m3!1d118512.58023648334!2d-88.39913461528183!3d18.51958518800781!2m3!1f0!2f0!3f0!3m2!1i1024!2i768!4f13.1!3m3!1m2!1s0x8f5ba377a0246b03%3A0xb429c9d207b111d9!2sChetumal%2C%20Quintana%20Roo%2C%20Mexico!5e0!3m2!1sen!2sus!4v1620151766401!5m2!1sen!2sus";

fn t(es: &str, en: &str) -> Bilingual {
    Bilingual::new(es, en)
}

/// Default configuration for a new client of `template`.
pub fn defaults_for(template: TemplateType) -> SiteConfig {
    match template {
        TemplateType::Professionals => professionals(),
        TemplateType::Restaurants => restaurants(),
        TemplateType::Retail => retail(),
        TemplateType::Services => services(),
        TemplateType::Tourism => tourism(),
    }
}

fn hero(
    title: Bilingual,
    subtitle: Bilingual,
    description: Bilingual,
    image: &str,
) -> Hero {
    Hero {
        title,
        subtitle,
        description,
        image: image.to_string(),
        opacity: 0.9,
        text_alignment: "center".to_string(),
        vertical_alignment: "center".to_string(),
        text_spacing: "normal".to_string(),
        title_position: "center".to_string(),
        text_color: "#ffffff".to_string(),
        subtext_color: "#ffffff".to_string(),
        title_size: "3.5rem".to_string(),
        subtitle_size: "1.25rem".to_string(),
    }
}

fn branding(primary: &str, secondary: &str, accent: &str) -> Branding {
    Branding {
        primary_color: primary.to_string(),
        secondary_color: secondary.to_string(),
        accent_color: accent.to_string(),
    }
}

struct Contact<'a> {
    business_name: &'a str,
    logo: &'a str,
    email: &'a str,
    address: Bilingual,
    whatsapp_message: Bilingual,
    office_hours: OfficeHours,
    maps: &'a str,
}

fn identity(contact: Contact<'_>) -> Identity {
    Identity {
        business_name: contact.business_name.to_string(),
        logo: contact.logo.to_string(),
        phone: "+52 983 123 4567".to_string(),
        email: contact.email.to_string(),
        whatsapp_number: "529831234567".to_string(),
        whatsapp_message: contact.whatsapp_message,
        show_whatsapp_button: true,
        address: contact.address,
        office_hours: contact.office_hours,
        google_maps_embed: contact.maps.to_string(),
        facebook_url: String::new(),
        instagram_url: String::new(),
    }
}

fn stat(icon: &str, value: &str, es: &str, en: &str) -> Stat {
    Stat {
        icon: icon.to_string(),
        value: Bilingual::same(value),
        label: t(es, en),
    }
}

fn photo(url: &str, es: &str, en: &str) -> Photo {
    Photo {
        url: url.to_string(),
        caption: t(es, en),
    }
}

fn review(name: &str, es: &str, en: &str) -> Review {
    Review {
        name: name.to_string(),
        rating: 5,
        text: t(es, en),
    }
}

fn service(title: Bilingual, description: Bilingual, icon: &str) -> Offering {
    Offering {
        title,
        description,
        icon: Some(icon.to_string()),
        price: None,
        image: None,
    }
}

fn banner() -> Banner {
    Banner {
        enabled: false,
        title: t("Anuncio Especial", "Special Announcement"),
        text: t(
            "Anuncio especial o información importante",
            "Special announcement or important information",
        ),
        background_color: "#FFC107".to_string(),
        text_color: "#000000".to_string(),
        text_size: "16px".to_string(),
    }
}

fn chatbot(color: &str, questions: Vec<ChatbotQuestion>) -> Chatbot {
    Chatbot {
        enabled: true,
        icon: "📞".to_string(),
        color: color.to_string(),
        title: t("Chat con nosotros", "Chat with us"),
        welcome: t(
            "¡Hola! ¿En qué podemos ayudarte?",
            "Hello! How can we help you?",
        ),
        questions,
    }
}

fn question(key: &str, question: Bilingual, answer: Bilingual) -> ChatbotQuestion {
    ChatbotQuestion {
        key: key.to_string(),
        question,
        answer,
    }
}

fn professionals() -> SiteConfig {
    SiteConfig {
        template_type: TemplateType::Professionals,
        identity: identity(Contact {
            business_name: "Consultorio Médico Dr. González",
            logo: "https://via.placeholder.com/150x50/C8102E/FFFFFF?text=Logo",
            email: "info@drgonzalez.com",
            address: Bilingual::same("Av. Insurgentes 123, Chetumal, QR"),
            whatsapp_message: t(
                "Hola, me gustaría agendar una cita",
                "Hello, I would like to schedule an appointment",
            ),
            office_hours: OfficeHours {
                monday_friday: t(
                    "Lunes a viernes: 9:00 AM - 6:00 PM",
                    "Monday to Friday: 9:00 AM - 6:00 PM",
                ),
                saturday: t("Sábado: 9:00 AM - 2:00 PM", "Saturday: 9:00 AM - 2:00 PM"),
            },
            maps: "",
        }),
        branding: branding("#C8102E", "#00A859", "#007ACC"),
        hero: hero(
            Bilingual::same("Dr. María González"),
            t(
                "Especialista en Medicina Interna",
                "Internal Medicine Specialist",
            ),
            t(
                "Más de 15 años de experiencia brindando atención médica de calidad",
                "Over 15 years of experience providing quality medical care",
            ),
            "https://via.placeholder.com/800x400/C8102E/FFFFFF?text=Hero+Image",
        ),
        about: About {
            title: t("Acerca de Mí", "About Me"),
            text: t(
                "Soy una médica dedicada con más de 15 años de experiencia...",
                "I am a dedicated physician with over 15 years of experience...",
            ),
            stats: Some(vec![
                stat("Award", "15+", "Años de experiencia", "Years of experience"),
                stat("Star", "9.5", "Calificación promedio", "Average rating"),
                stat("Shield", "1000+", "Pacientes atendidos", "Patients treated"),
            ]),
        },
        catalog_title: t("Servicios Médicos", "Medical Services"),
        catalog: vec![service(
            t("Consulta General", "General Consultation"),
            t("Evaluación médica completa", "Complete medical evaluation"),
            "stethoscope",
        )],
        gallery: Vec::new(),
        reviews: Vec::new(),
        banner: Some(banner()),
        chatbot: chatbot(
            "#C8102E",
            vec![
                question(
                    "citas",
                    t("citas", "appointments"),
                    t(
                        "Puedes agendar tu cita por WhatsApp o llamando al consultorio.",
                        "You can book an appointment via WhatsApp or by calling the office.",
                    ),
                ),
                question(
                    "horario",
                    t("horario", "hours"),
                    t(
                        "Atendemos de lunes a viernes de 9:00 AM a 6:00 PM.",
                        "We are open Monday to Friday from 9:00 AM to 6:00 PM.",
                    ),
                ),
            ],
        ),
        approval: None,
    }
}

fn restaurants() -> SiteConfig {
    let menu_page = |n: u8| Offering {
        title: t(&format!("Página de Menú {}", n), &format!("Menu Page {}", n)),
        description: Bilingual::default(),
        icon: None,
        price: None,
        image: Some(format!(
            "https://via.placeholder.com/400x600/FF6B35/FFFFFF?text=Menu+Page+{}",
            n
        )),
    };

    SiteConfig {
        template_type: TemplateType::Restaurants,
        identity: identity(Contact {
            business_name: "Restaurante La Bella",
            logo: "https://via.placeholder.com/150x50/FF6B35/FFFFFF?text=Logo",
            email: "info@restaurantelabella.com",
            address: Bilingual::same("Av. Juárez 123, Centro, Chetumal, QR"),
            whatsapp_message: t(
                "Hola, me gustaría hacer una reservación",
                "Hello, I would like to make a reservation",
            ),
            office_hours: OfficeHours {
                monday_friday: t(
                    "Lunes a viernes: 11:00 AM - 10:00 PM",
                    "Monday to Friday: 11:00 AM - 10:00 PM",
                ),
                saturday: t("Sábado: 11:00 AM - 11:00 PM", "Saturday: 11:00 AM - 11:00 PM"),
            },
            maps: "",
        }),
        branding: branding("#FF6B35", "#00A859", "#FFC107"),
        hero: hero(
            t("Restaurante La Bella", "La Bella Restaurant"),
            t("Cocina Auténtica Mexicana", "Authentic Mexican Cuisine"),
            t(
                "Disfruta de los mejores sabores mexicanos en un ambiente acogedor",
                "Enjoy the best Mexican flavors in a cozy atmosphere",
            ),
            "https://via.placeholder.com/800x400/FF6B35/FFFFFF?text=Restaurant",
        ),
        about: About {
            title: t("Nuestra Historia", "Our Story"),
            text: t(
                "Desde 1985, ofrecemos la mejor comida mexicana...",
                "Since 1985, we have been offering the best Mexican food...",
            ),
            stats: Some(vec![
                stat("Award", "35+", "Años de experiencia", "Years of experience"),
                stat("Users", "5,000+", "Clientes satisfechos", "Satisfied customers"),
                stat("Star", "4.9", "Calificación promedio", "Average rating"),
            ]),
        },
        catalog_title: t("Nuestro Menú", "Our Menu"),
        catalog: (1..=3).map(menu_page).collect(),
        gallery: Vec::new(),
        reviews: Vec::new(),
        banner: None,
        chatbot: chatbot("#FF6B35", Vec::new()),
        approval: Some(Approval::pending_for(TemplateType::Restaurants, false)),
    }
}

fn retail() -> SiteConfig {
    let product = |title: Bilingual, description: Bilingual, price: &str, image: &str| Offering {
        title,
        description,
        icon: None,
        price: Some(price.to_string()),
        image: Some(image.to_string()),
    };

    SiteConfig {
        template_type: TemplateType::Retail,
        identity: identity(Contact {
            business_name: "Boutique Bella",
            logo: "https://via.placeholder.com/150x50/007ACC/FFFFFF?text=Logo",
            email: "info@boutiquebella.com",
            address: t("Av. Héroes 123, Chetumal, QR", "Av. Heroes 123, Chetumal, QR"),
            whatsapp_message: t(
                "Hola, me interesa un producto",
                "Hello, I am interested in a product",
            ),
            office_hours: OfficeHours {
                monday_friday: t(
                    "Lunes a Viernes: 10:00 AM - 8:00 PM",
                    "Monday to Friday: 10:00 AM - 8:00 PM",
                ),
                saturday: t("Sábado: 10:00 AM - 6:00 PM", "Saturday: 10:00 AM - 6:00 PM"),
            },
            maps: MAPS_EMBED_CHETUMAL,
        }),
        branding: branding("#007ACC", "#00A859", "#FFC107"),
        hero: hero(
            Bilingual::same("Boutique Bella"),
            t("Moda y Estilo", "Fashion & Style"),
            t("Encuentra las últimas tendencias", "Find the latest trends"),
            "https://via.placeholder.com/800x400/007ACC/FFFFFF?text=Retail",
        ),
        about: About {
            title: t("Acerca de Nosotros", "About Us"),
            text: t("Ofrecemos moda de calidad...", "We offer quality fashion..."),
            stats: Some(vec![
                stat("ShoppingBag", "500+", "Productos únicos", "Unique products"),
                stat("Users", "1,000+", "Clientes satisfechos", "Satisfied customers"),
                stat("Star", "4.9", "Calificación promedio", "Average rating"),
            ]),
        },
        catalog_title: t("Nuestros Productos", "Our Products"),
        catalog: vec![
            product(
                t("Textiles Mayas", "Maya Textiles"),
                t(
                    "Huipiles y rebozos tradicionales",
                    "Traditional huipiles and rebozos",
                ),
                "$450 - $1,200 MXN",
                "https://via.placeholder.com/400x300/007ACC/FFFFFF?text=Textiles+Mayas",
            ),
            product(
                t("Joyería Artesanal", "Artisan Jewelry"),
                t("Collares y aretes de plata", "Silver necklaces and earrings"),
                "$200 - $800 MXN",
                "https://via.placeholder.com/400x300/007ACC/FFFFFF?text=Joyeria+Artesanal",
            ),
        ],
        gallery: vec![
            photo(
                "https://via.placeholder.com/300x200/00A859/FFFFFF?text=Textiles+Display",
                "Exhibición de Textiles",
                "Textiles Display",
            ),
            photo(
                "https://via.placeholder.com/300x200/C8102E/FFFFFF?text=Jewelry+Collection",
                "Colección de Joyería",
                "Jewelry Collection",
            ),
        ],
        reviews: vec![
            review(
                "Patricia González",
                "Productos hermosos y auténticos. Excelente atención al cliente y precios justos.",
                "Beautiful and authentic products. Excellent customer service and fair prices.",
            ),
            review(
                "Michael Davis",
                "Encontré regalos únicos que no conseguiría en otro lugar. Muy recomendado.",
                "Found unique gifts I couldn't get anywhere else. Highly recommended.",
            ),
        ],
        banner: Some(banner()),
        chatbot: chatbot("#007ACC", Vec::new()),
        approval: Some(Approval::pending_for(TemplateType::Retail, false)),
    }
}

fn services() -> SiteConfig {
    SiteConfig {
        template_type: TemplateType::Services,
        identity: identity(Contact {
            business_name: "Servicios Técnicos Pro",
            logo: "https://via.placeholder.com/150x50/6C5CE7/FFFFFF?text=Logo",
            email: "info@serviciostecnicos.com",
            address: Bilingual::same("Av. Insurgentes 123, Chetumal, QR"),
            whatsapp_message: t(
                "Hola, necesito un servicio técnico",
                "Hello, I need technical service",
            ),
            office_hours: OfficeHours {
                monday_friday: t(
                    "Lunes a Viernes: 8:00 AM - 6:00 PM",
                    "Monday to Friday: 8:00 AM - 6:00 PM",
                ),
                saturday: t("Sábado: 9:00 AM - 3:00 PM", "Saturday: 9:00 AM - 3:00 PM"),
            },
            maps: MAPS_EMBED_CHETUMAL,
        }),
        branding: branding("#6C5CE7", "#00A859", "#FFC107"),
        hero: hero(
            t("Servicios Técnicos Pro", "Pro Technical Services"),
            t("Reparaciones y Mantenimiento", "Repairs & Maintenance"),
            t(
                "Servicios técnicos profesionales",
                "Professional technical services",
            ),
            "https://via.placeholder.com/800x400/6C5CE7/FFFFFF?text=Services",
        ),
        about: About {
            title: t("Acerca de Nosotros", "About Us"),
            text: t(
                "Ofrecemos servicios técnicos...",
                "We offer technical services...",
            ),
            stats: Some(vec![
                stat("Wrench", "24/7", "Servicio de emergencia", "Emergency service"),
                stat("Users", "500+", "Clientes atendidos", "Clients served"),
                stat(
                    "CheckCircle",
                    "98%",
                    "Satisfacción garantizada",
                    "Satisfaction guaranteed",
                ),
            ]),
        },
        catalog_title: t("Nuestros Servicios", "Our Services"),
        catalog: vec![
            service(
                t("Reparaciones de Emergencia", "Emergency Repairs"),
                t(
                    "Fugas, tuberías rotas, desagües tapados",
                    "Leaks, broken pipes, clogged drains",
                ),
                "wrench",
            ),
            service(
                t("Instalaciones Nuevas", "New Installations"),
                t(
                    "Baños completos, cocinas, calentadores",
                    "Complete bathrooms, kitchens, heaters",
                ),
                "hammer",
            ),
        ],
        gallery: vec![
            photo(
                "https://via.placeholder.com/300x200/00A859/FFFFFF?text=Plumbing+Work+1",
                "Trabajo de Plomería",
                "Plumbing Work",
            ),
            photo(
                "https://via.placeholder.com/300x200/C8102E/FFFFFF?text=Tools+Equipment",
                "Herramientas y Equipos",
                "Tools and Equipment",
            ),
        ],
        reviews: vec![
            review(
                "Luis Hernández",
                "Excelente servicio, llegaron rápido en una emergencia. Trabajo limpio y profesional.",
                "Excellent service, arrived quickly in an emergency. Clean and professional work.",
            ),
            review(
                "Sandra López",
                "Instalaron mi baño completo. Muy puntuales y precio justo. Altamente recomendados.",
                "Installed my complete bathroom. Very punctual and fair price. Highly recommended.",
            ),
        ],
        banner: Some(banner()),
        chatbot: chatbot("#6C5CE7", Vec::new()),
        approval: Some(Approval::pending_for(TemplateType::Services, false)),
    }
}

fn tourism() -> SiteConfig {
    SiteConfig {
        template_type: TemplateType::Tourism,
        identity: identity(Contact {
            business_name: "Tours Riviera Maya",
            logo: "https://via.placeholder.com/150x50/00A859/FFFFFF?text=Logo",
            email: "info@toursrivieramaya.com",
            address: Bilingual::same("Av. Tulum 123, Playa del Carmen, QR"),
            whatsapp_message: t("Hola, me interesa un tour", "Hello, I am interested in a tour"),
            office_hours: OfficeHours {
                monday_friday: t(
                    "Lunes a Viernes: 9:00 AM - 6:00 PM",
                    "Monday to Friday: 9:00 AM - 6:00 PM",
                ),
                saturday: t("Sábado: 10:00 AM - 4:00 PM", "Saturday: 10:00 AM - 4:00 PM"),
            },
            maps: MAPS_EMBED_CHETUMAL,
        }),
        branding: branding("#00A859", "#007ACC", "#FFC107"),
        hero: hero(
            t("Tours Riviera Maya", "Riviera Maya Tours"),
            t("Descubre la belleza de México", "Discover the beauty of Mexico"),
            t(
                "Explora cenotes, ruinas mayas y playas paradisíacas",
                "Explore cenotes, Mayan ruins and paradisiacal beaches",
            ),
            "https://via.placeholder.com/800x400/00A859/FFFFFF?text=Tourism",
        ),
        about: About {
            title: t("Acerca de Nosotros", "About Us"),
            text: t("Ofrecemos tours únicos...", "We offer unique tours..."),
            stats: None,
        },
        catalog_title: t("Nuestros Tours", "Our Tours"),
        catalog: vec![
            service(
                t("Tour Laguna de Bacalar", "Bacalar Lagoon Tour"),
                t(
                    "Descubre la laguna de los siete colores",
                    "Discover the seven-color lagoon",
                ),
                "map-pin",
            ),
            service(
                t("Excursión Ruinas de Kohunlich", "Kohunlich Ruins Excursion"),
                t(
                    "Explora las ruinas mayas milenarias",
                    "Explore the ancient Mayan ruins",
                ),
                "landmark",
            ),
        ],
        gallery: vec![
            photo(
                "https://via.placeholder.com/300x200/00A859/FFFFFF?text=Bacalar+Lagoon",
                "Laguna de Bacalar",
                "Bacalar Lagoon",
            ),
            photo(
                "https://via.placeholder.com/300x200/C8102E/FFFFFF?text=Mayan+Ruins",
                "Ruinas Mayas",
                "Mayan Ruins",
            ),
        ],
        reviews: vec![
            review(
                "Jennifer Smith",
                "¡Increíble experiencia en Bacalar! Guías muy profesionales y conocedores.",
                "Amazing experience in Bacalar! Very professional and knowledgeable guides.",
            ),
            review(
                "Roberto Martínez",
                "Tours bien organizados, precios justos. Recomendamos la excursión a Kohunlich.",
                "Well-organized tours, fair prices. We recommend the Kohunlich excursion.",
            ),
        ],
        banner: None,
        chatbot: chatbot("#00A859", Vec::new()),
        approval: None,
    }
}
