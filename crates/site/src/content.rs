//! Static page content: the services and project cards.

use serde::Serialize;

/// Icon drawn on a service card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Icon {
    Code,
    Database,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Service {
    pub icon: Icon,
    pub title: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Project {
    pub title: &'static str,
    pub category: &'static str,
    pub image: &'static str,
}

/// Everything the services and work sections render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Catalog {
    pub services: &'static [Service],
    pub projects: &'static [Project],
}

const SERVICES: &[Service] = &[
    Service {
        icon: Icon::Code,
        title: "Web Development",
        description: "Crafting high-performance, scalable web applications with modern frameworks and clean code.",
    },
    Service {
        icon: Icon::Database,
        title: "Data & Dashboard Solutions",
        description: "Transforming raw data into actionable insights with custom dashboards and visualizations.",
    },
];

const PROJECTS: &[Project] = &[
    Project {
        title: "Project Alpha",
        category: "Data Analytics",
        image: "https://placehold.co/600x400/111111/00FFC6?text=Alpha",
    },
    Project {
        title: "Project Beta",
        category: "Web Application",
        image: "https://placehold.co/600x400/111111/007FFF?text=Beta",
    },
];

pub fn catalog() -> Catalog {
    Catalog {
        services: SERVICES,
        projects: PROJECTS,
    }
}
