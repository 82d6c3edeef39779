use serde::{Deserialize, Serialize};

/// The résumé content a user fills in. Every field defaults so partially
/// completed forms can be saved.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CvData {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub summary: String,
    /// Data URL or remote URL of the profile photo.
    pub profile_image: String,
    pub experience: Vec<Experience>,
    pub education: Vec<Education>,
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Experience {
    pub title: String,
    pub company: String,
    pub period: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Education {
    pub degree: String,
    pub school: String,
    pub year: String,
}
