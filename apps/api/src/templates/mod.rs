//! The visual templates a saved CV can reference. Rendering happens
//! client-side; the backend only knows the catalog.

use axum::Json;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Template {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

pub const TEMPLATES: &[Template] = &[
    Template {
        id: "classic",
        name: "Classic",
        description: "Traditional single-column layout with serif headings",
    },
    Template {
        id: "modern",
        name: "Modern",
        description: "Two-column layout with a coloured sidebar for contact details and skills",
    },
    Template {
        id: "minimal",
        name: "Minimal",
        description: "Whitespace-heavy layout with understated typography",
    },
];

impl Template {
    pub fn find(id: &str) -> Option<&'static Template> {
        TEMPLATES.iter().find(|t| t.id == id)
    }
}

/// GET /api/v1/templates
pub async fn handle_list_templates() -> Json<&'static [Template]> {
    Json(TEMPLATES)
}
