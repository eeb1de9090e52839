//! Games catalog.

use globens_core::PageMeta;
use serde::{Deserialize, Serialize};

/// A game of the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub slug: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// A page of the games catalog.
///
/// The backend reports position either at the top level or in a `meta`
/// object; both are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GamesPage {
    #[serde(default)]
    pub data: Vec<Game>,
    #[serde(default = "first_page")]
    pub current_page: u32,
    #[serde(default)]
    pub per_page: u32,
    #[serde(default)]
    pub total: u64,
}

fn first_page() -> u32 {
    1
}

#[derive(Deserialize)]
struct GamesPageWire {
    #[serde(default)]
    data: Vec<Game>,
    current_page: Option<u32>,
    per_page: Option<u32>,
    total: Option<u64>,
    #[serde(default)]
    meta: Option<PageMeta>,
}

impl GamesPage {
    /// Empty page returned while the catalog backend is unreachable.
    pub fn empty(per_page: u32) -> Self {
        Self {
            data: Vec::new(),
            current_page: 1,
            per_page,
            total: 0,
        }
    }

    /// Decodes a page in either wire shape.
    pub(crate) fn from_slice(body: &[u8]) -> serde_json::Result<Self> {
        let wire: GamesPageWire = serde_json::from_slice(body)?;
        let meta = wire.meta.as_ref();

        Ok(Self {
            current_page: wire
                .current_page
                .or_else(|| meta.map(|meta| meta.current_page))
                .unwrap_or(1),
            per_page: wire
                .per_page
                .or_else(|| meta.map(|meta| meta.per_page))
                .unwrap_or(0),
            total: wire
                .total
                .or_else(|| meta.map(|meta| meta.total))
                .unwrap_or(0),
            data: wire.data,
        })
    }
}
