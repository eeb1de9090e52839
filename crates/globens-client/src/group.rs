//! Logical backend areas.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoStaticStr};

/// A backend area sharing a path prefix and timeout policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(AsRefStr, Display, EnumIter, EnumString, IntoStaticStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ResourceGroup {
    Auth,
    Profile,
    Teams,
    Games,
    News,
    Banners,
    Servers,
    Tournaments,
}

impl ResourceGroup {
    /// First path segment under the base URL.
    #[must_use]
    pub const fn path_segment(self) -> &'static str {
        match self {
            Self::Auth => "auth",
            Self::Profile => "profile",
            Self::Teams => "teams",
            Self::Games => "games",
            Self::News => "news",
            Self::Banners => "banners",
            Self::Servers => "servers",
            Self::Tournaments => "tournaments",
        }
    }
}
