//! Teams.

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{Upload, id};
use crate::MultipartForm;

/// A member of a team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMember {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub is_captain: bool,
    #[serde(default)]
    pub is_invited: bool,
    #[serde(default)]
    pub is_accepted: bool,
}

/// A team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: u64,
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(deserialize_with = "id::deserialize")]
    pub game_id: String,
    #[serde(default)]
    pub game_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub members_count: u32,
    #[serde(default)]
    pub members: Vec<TeamMember>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Team {
    /// The captain, if listed among the members.
    pub fn captain(&self) -> Option<&TeamMember> {
        self.members.iter().find(|member| member.is_captain)
    }
}

/// A team to create.
#[must_use]
#[derive(Debug, Clone, Validate)]
pub struct NewTeam {
    #[validate(length(min = 1, message = "team name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "game is required"))]
    pub game_id: String,
    pub description: Option<String>,
    pub avatar: Option<Upload>,
}

impl NewTeam {
    /// Creates a team without description or avatar.
    pub fn new(name: impl Into<String>, game_id: impl ToString) -> Self {
        Self {
            name: name.into(),
            game_id: game_id.to_string(),
            description: None,
            avatar: None,
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the avatar.
    pub fn with_avatar(mut self, avatar: Upload) -> Self {
        self.avatar = Some(avatar);
        self
    }

    /// Encodes the team as the multipart form `POST /teams` expects.
    pub fn into_form(self) -> MultipartForm {
        let mut form = MultipartForm::new()
            .text("name", self.name)
            .text("game_id", self.game_id);

        if let Some(avatar) = self.avatar {
            form = form.file(avatar.into_part("avatar"));
        }
        if let Some(description) = self.description.filter(|d| !d.is_empty()) {
            form = form.text("description", description);
        }

        form
    }
}

/// Response of `POST /teams`. The backend may omit the created team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTeamResponse {
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Team>,
}

/// Response of `POST /teams/{id}/join`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinTeamResponse {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub team: Option<Team>,
}
