//! Request and response records of the backend resources.

mod auth;
mod banner;
mod game;
mod news;
mod profile;
mod server;
mod team;
mod tournament;
mod upload;

pub use auth::{AuthData, ConfirmPhone, Login, RefreshRequest, Register, ResendOtp, User};
pub use banner::Banner;
pub use game::{Game, GamesPage};
pub use news::NewsItem;
pub use profile::{Profile, ProfileUpdate};
pub use server::{GameServer, ServersPage};
pub use team::{CreateTeamResponse, JoinTeamResponse, NewTeam, Team, TeamMember};
pub use tournament::{
    Brackets, MatchStage, MatchStatus, MatchTeam, ParticipantStatus, PrizePlace, Tournament,
    TournamentDetail, TournamentFormat, TournamentLocation, TournamentMatch,
    TournamentParticipant, TournamentRegistration, TournamentRegistrationResponse,
    TournamentStatus,
};
pub use upload::Upload;

mod id {
    //! Identifiers the backend sends either as strings or as numbers.

    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrNumber {
        String(String),
        Number(serde_json::Number),
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match StringOrNumber::deserialize(deserializer)? {
            StringOrNumber::String(value) => value,
            StringOrNumber::Number(value) => value.to_string(),
        })
    }
}

mod validate {
    //! Field validators shared by request payloads.

    use std::borrow::Cow;
    use std::sync::LazyLock;

    use regex::Regex;
    use validator::ValidationError;

    static PHONE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"^\+998[0-9]{9}$").expect("valid regex"));

    static USERNAME: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_]+$").expect("valid regex"));

    /// Uzbek phone number in the `+998XXXXXXXXX` form.
    pub fn phone(phone: &str) -> Result<(), ValidationError> {
        if PHONE.is_match(phone) {
            return Ok(());
        }
        Err(ValidationError::new("phone_format")
            .with_message(Cow::Borrowed("phone must look like +998XXXXXXXXX")))
    }

    /// Letters, digits and underscores only.
    pub fn username(username: &str) -> Result<(), ValidationError> {
        if USERNAME.is_match(username) {
            return Ok(());
        }
        Err(ValidationError::new("username_format").with_message(Cow::Borrowed(
            "username can only contain letters, numbers and underscores",
        )))
    }

}
