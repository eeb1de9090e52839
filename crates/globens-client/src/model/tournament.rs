//! Tournaments. Unlike the other resources these records use camelCase keys.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display};
use validator::Validate;

/// Lifecycle of a tournament.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(AsRefStr, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TournamentStatus {
    Upcoming,
    Ongoing,
    Completed,
}

/// Bracket format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(AsRefStr, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TournamentFormat {
    SingleElimination,
    DoubleElimination,
    RoundRobin,
}

/// Where matches are played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(AsRefStr, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TournamentLocation {
    Online,
    Offline,
    Hybrid,
}

/// A tournament as listed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tournament {
    pub id: u64,
    pub name: String,
    pub game: String,
    pub game_slug: String,
    #[serde(default)]
    pub prize: String,
    /// Number of registered teams.
    #[serde(default)]
    pub teams: u32,
    pub start_date: String,
    pub end_date: String,
    pub status: TournamentStatus,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub rules: Vec<String>,
    #[serde(default)]
    pub max_teams: u32,
    #[serde(default)]
    pub registration_deadline: Option<String>,
    pub format: TournamentFormat,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry_fee: Option<String>,
    pub location: TournamentLocation,
}

impl Tournament {
    /// Returns whether all team slots are taken.
    pub fn is_full(&self) -> bool {
        self.max_teams > 0 && self.teams >= self.max_teams
    }
}

/// Stage of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(AsRefStr, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum MatchStage {
    GroupStage,
    QuarterFinals,
    SemiFinals,
    Final,
}

/// State of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(AsRefStr, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum MatchStatus {
    Scheduled,
    Live,
    Completed,
}

/// One side of a match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchTeam {
    pub id: u64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(default)]
    pub score: u32,
}

/// A match between two teams.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TournamentMatch {
    pub id: u64,
    pub team1: MatchTeam,
    pub team2: MatchTeam,
    /// Id of the winning team once decided.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winner: Option<u64>,
    pub stage: MatchStage,
    pub match_date: String,
    pub status: MatchStatus,
}

/// Standing of a registered team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(AsRefStr, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ParticipantStatus {
    Registered,
    Confirmed,
    Eliminated,
}

/// A team registered for a tournament.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TournamentParticipant {
    pub id: u64,
    pub team_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_logo: Option<String>,
    #[serde(default)]
    pub players: Vec<String>,
    pub registration_date: String,
    pub status: ParticipantStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wins: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub losses: Option<u32>,
}

/// Playoff brackets by round.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Brackets {
    #[serde(default)]
    pub quarter_finals: Vec<TournamentMatch>,
    #[serde(default)]
    pub semi_finals: Vec<TournamentMatch>,
    #[serde(default, rename = "final")]
    pub finals: Vec<TournamentMatch>,
}

/// Prize for one final place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrizePlace {
    pub place: u32,
    pub amount: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
}

/// A tournament with its matches, participants and prizes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TournamentDetail {
    #[serde(flatten)]
    pub tournament: Tournament,
    #[serde(default)]
    pub matches: Vec<TournamentMatch>,
    #[serde(default)]
    pub participants: Vec<TournamentParticipant>,
    #[serde(default)]
    pub brackets: Brackets,
    #[serde(default)]
    pub prize_distribution: Vec<PrizePlace>,
}

/// A team registration for a tournament.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TournamentRegistration {
    #[validate(length(min = 1, message = "team name is required"))]
    pub team_name: String,
    #[validate(length(min = 1, message = "at least one player is required"))]
    pub players: Vec<String>,
    #[validate(email(message = "captain email must be a valid address"))]
    pub captain_email: String,
}

/// Response of a tournament registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TournamentRegistrationResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_id: Option<u64>,
}

#[cfg(test)]
mod tests {
    use globens_core::{DataEnvelope, Paginated};

    use super::*;

    const DETAIL: &str = r#"{"data": {
        "id": 1, "name": "Globens CS2 Championship", "game": "Counter-Strike 2", "gameSlug": "cs2",
        "prize": "$50,000", "teams": 32, "startDate": "2025-11-15", "endDate": "2025-12-15",
        "status": "ongoing", "description": "Annual championship", "rules": ["5 players per team"],
        "maxTeams": 32, "registrationDeadline": "2025-11-10", "format": "single_elimination",
        "location": "online",
        "matches": [{
            "id": 1,
            "team1": {"id": 1, "name": "Team Alpha", "score": 16},
            "team2": {"id": 2, "name": "Team Beta", "score": 14},
            "winner": 1, "stage": "quarter_finals", "matchDate": "2025-11-20", "status": "completed"
        }],
        "participants": [{
            "id": 1, "teamName": "Team Alpha", "players": ["p1", "p2"], "registrationDate": "2025-10-15",
            "status": "confirmed", "group": "A", "points": 9, "wins": 3, "losses": 0
        }],
        "brackets": {"quarterFinals": [], "semiFinals": [], "final": []},
        "prizeDistribution": [{"place": 1, "amount": "$25,000"}]
    }}"#;

    #[test]
    fn test_tournament_detail() {
        let detail: DataEnvelope<TournamentDetail> = serde_json::from_str(DETAIL).unwrap();
        let detail = detail.data;

        assert_eq!(detail.tournament.game_slug, "cs2");
        assert_eq!(detail.tournament.status, TournamentStatus::Ongoing);
        assert!(detail.tournament.is_full());
        assert_eq!(detail.matches[0].stage, MatchStage::QuarterFinals);
        assert_eq!(detail.participants[0].status, ParticipantStatus::Confirmed);
        assert_eq!(detail.prize_distribution[0].place, 1);
        assert!(detail.brackets.finals.is_empty());
    }

    #[test]
    fn test_tournament_listing_meta() {
        let body = r#"{"data": [], "meta": {"total": 0, "per_page": 10, "current_page": 1, "last_page": 1}}"#;
        let page: Paginated<Tournament> = serde_json::from_str(body).unwrap();
        assert_eq!(page.meta.unwrap().per_page, 10);
    }

    #[test]
    fn test_registration_wire_shape_and_validation() {
        let registration = TournamentRegistration {
            team_name: "Team Alpha".into(),
            players: vec!["p1".into()],
            captain_email: "captain@globens.uz".into(),
        };
        assert!(registration.validate().is_ok());

        let value = serde_json::to_value(&registration).unwrap();
        assert_eq!(value["teamName"], "Team Alpha");
        assert_eq!(value["captainEmail"], "captain@globens.uz");

        let invalid = TournamentRegistration {
            team_name: String::new(),
            players: Vec::new(),
            captain_email: "nope".into(),
        };
        let errors = invalid.validate().unwrap_err();
        assert_eq!(errors.field_errors().len(), 3);
    }
}
