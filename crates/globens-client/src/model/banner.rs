use serde::{Deserialize, Serialize};

/// A promotional banner of the home page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Banner {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub image_url: String,
    #[serde(default)]
    pub url: Option<String>,
    /// Display position, ascending.
    #[serde(default)]
    pub order: i32,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}
