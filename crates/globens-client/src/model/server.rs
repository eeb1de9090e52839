//! Game servers browser.

use globens_core::{Locale, PageLinks};
use serde::{Deserialize, Serialize};

/// A community game server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameServer {
    pub id: u64,
    pub url: String,
    pub game_id: u64,
    #[serde(default)]
    pub game_name: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub name_uz: String,
    #[serde(default)]
    pub name_ru: String,
    #[serde(default)]
    pub name_en: String,
    #[serde(default)]
    pub description_uz: String,
    #[serde(default)]
    pub description_ru: String,
    #[serde(default)]
    pub description_en: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl GameServer {
    /// Name in the given locale, falling back to the untranslated name.
    pub fn localized_name(&self, locale: Locale) -> &str {
        let name = match locale {
            Locale::Uz => &self.name_uz,
            Locale::Ru => &self.name_ru,
            Locale::En => &self.name_en,
        };
        if name.is_empty() { &self.name } else { name }
    }

    /// Description in the given locale, falling back to Uzbek.
    pub fn localized_description(&self, locale: Locale) -> &str {
        let description = match locale {
            Locale::Uz => &self.description_uz,
            Locale::Ru => &self.description_ru,
            Locale::En => &self.description_en,
        };
        if description.is_empty() {
            &self.description_uz
        } else {
            description
        }
    }
}

/// A page of game servers.
///
/// `meta` is kept as raw JSON because the backend wraps some of its counters
/// in arrays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServersPage {
    #[serde(default)]
    pub data: Vec<GameServer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<PageLinks>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<serde_json::Value>,
}

impl ServersPage {
    /// Returns whether the backend links a next page.
    pub fn has_next(&self) -> bool {
        self.links.as_ref().is_some_and(|links| links.next.is_some())
    }
}
