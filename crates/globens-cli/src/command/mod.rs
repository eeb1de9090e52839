//! Subcommands and their dispatch to the resource services.

mod upload;

use std::path::PathBuf;

use anyhow::Context;
use clap::Subcommand;
use globens_client::model::{
    AuthData, ConfirmPhone, Login, NewTeam, ProfileUpdate, Register, ResendOtp,
    TournamentRegistration,
};
use globens_client::{DEFAULT_PER_PAGE, Services};
use globens_core::ApiResponse;
use serde::Serialize;
use serde_json::{Value, json};
use strum::IntoStaticStr;

use crate::TRACING_TARGET_COMMAND;

/// What to do.
#[derive(Debug, Subcommand, IntoStaticStr)]
#[strum(serialize_all = "kebab-case")]
pub enum Command {
    /// Create an account; confirm it afterwards with `confirm-phone`
    Register {
        /// Phone number as +998XXXXXXXXX
        #[arg(long)]
        phone: String,
        #[arg(long)]
        full_name: String,
        #[arg(long)]
        username: String,
        #[arg(long, env = "GLOBENS_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(long, env = "GLOBENS_PASSWORD_CONFIRMATION", hide_env_values = true)]
        password_confirmation: String,
    },
    /// Log in and store the session
    Login {
        username: String,
        #[arg(long, env = "GLOBENS_PASSWORD", hide_env_values = true)]
        password: String,
        /// Ask the backend for a long-lived session
        #[arg(long)]
        persistent: bool,
    },
    /// Confirm a phone number with the code sent by SMS and store the session
    ConfirmPhone {
        #[arg(long)]
        phone: String,
        #[arg(long)]
        otp: String,
    },
    /// Send a new confirmation code
    ResendOtp {
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        phone: Option<String>,
    },
    /// Exchange the stored refresh token for a new session
    Refresh,
    /// End the session
    Logout {
        /// Only forget the local session
        #[arg(long)]
        local: bool,
    },
    /// Show whether a usable session is stored
    Status,
    /// Show the profile
    Profile,
    /// Change profile fields
    UpdateProfile {
        #[arg(long)]
        full_name: Option<String>,
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
    },
    /// Upload a new avatar image
    UploadAvatar { path: PathBuf },
    /// Remove the avatar image
    DeleteAvatar,
    /// List teams
    Teams,
    /// Create a team
    CreateTeam {
        name: String,
        #[arg(long)]
        game_id: u64,
        #[arg(long)]
        description: Option<String>,
        /// Avatar image file
        #[arg(long)]
        avatar: Option<PathBuf>,
    },
    /// Join a team
    JoinTeam { team_id: u64 },
    /// List games
    Games {
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = DEFAULT_PER_PAGE)]
        per_page: u32,
    },
    /// Show one game
    Game { slug: String },
    /// List news
    News {
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = DEFAULT_PER_PAGE)]
        per_page: u32,
    },
    /// Show one article
    NewsItem { slug: String },
    /// List home page banners
    Banners,
    /// List game servers
    Servers {
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// List tournaments
    Tournaments,
    /// Show one tournament with matches and participants
    Tournament { tournament_id: u64 },
    /// Register a team for a tournament
    RegisterTournament {
        tournament_id: u64,
        #[arg(long)]
        team_name: String,
        /// Player nickname; repeat for every player
        #[arg(long = "player", required = true)]
        players: Vec<String>,
        #[arg(long)]
        captain_email: String,
    },
}

impl Command {
    /// Subcommand name as typed on the command line.
    pub fn name(&self) -> &'static str {
        self.into()
    }

    /// Runs the command and returns what to print.
    ///
    /// Service failures are returned as
    /// [`NormalizedError`](globens_core::NormalizedError) inside the
    /// `anyhow` error.
    pub async fn run(self, services: &Services) -> anyhow::Result<Value> {
        match self {
            Self::Register {
                phone,
                full_name,
                username,
                password,
                password_confirmation,
            } => {
                let payload = Register {
                    phone,
                    full_name,
                    username,
                    password,
                    password_confirmation,
                };
                let response = services.auth().register(&payload).await?;
                Ok(auth_summary(services, response))
            }
            Self::Login {
                username,
                password,
                persistent,
            } => {
                let mut payload = Login::new(username, password);
                payload.persistent = persistent.then_some(true);
                let response = services.auth().login(&payload).await?;
                Ok(auth_summary(services, response))
            }
            Self::ConfirmPhone { phone, otp } => {
                let response = services
                    .auth()
                    .confirm_phone(&ConfirmPhone { phone, otp })
                    .await?;
                Ok(auth_summary(services, response))
            }
            Self::ResendOtp { username, phone } => {
                let response = services
                    .auth()
                    .resend_otp(&ResendOtp { username, phone })
                    .await?;
                Ok(auth_summary(services, response))
            }
            Self::Refresh => {
                let response = services.auth().refresh().await?;
                Ok(auth_summary(services, response))
            }
            Self::Logout { local: true } => {
                services.auth().logout_local();
                Ok(status(services))
            }
            Self::Logout { local: false } => {
                let outcome = services.auth().logout().await;
                // The local session is gone either way.
                if let Err(error) = &outcome {
                    tracing::warn!(
                        target: TRACING_TARGET_COMMAND,
                        kind = %error.kind(),
                        error = %error,
                        "Server logout failed"
                    );
                }
                Ok(status(services))
            }
            Self::Status => Ok(status(services)),
            Self::Profile => to_json(services.profile().get_profile().await?),
            Self::UpdateProfile {
                full_name,
                username,
                email,
                phone,
            } => {
                let update = ProfileUpdate {
                    full_name,
                    username,
                    email,
                    phone,
                };
                anyhow::ensure!(!update.is_empty(), "nothing to update");
                to_json(services.profile().update_profile(&update).await?)
            }
            Self::UploadAvatar { path } => {
                let avatar = upload::read(&path).await?;
                to_json(services.profile().upload_avatar(avatar).await?)
            }
            Self::DeleteAvatar => to_json(services.profile().delete_avatar().await?),
            Self::Teams => to_json(services.teams().list_teams().await?),
            Self::CreateTeam {
                name,
                game_id,
                description,
                avatar,
            } => {
                let mut team = NewTeam::new(name, game_id);
                if let Some(description) = description {
                    team = team.with_description(description);
                }
                if let Some(path) = avatar {
                    team = team.with_avatar(upload::read(&path).await?);
                }
                to_json(services.teams().create_team(team).await?)
            }
            Self::JoinTeam { team_id } => to_json(services.teams().join_team(team_id).await?),
            Self::Games { page, per_page } => {
                to_json(services.games().list_games(page, per_page).await?)
            }
            Self::Game { slug } => to_json(services.games().game(&slug).await?),
            Self::News { page, per_page } => {
                to_json(services.news().list_news(page, per_page).await?)
            }
            Self::NewsItem { slug } => to_json(services.news().news(&slug).await?),
            Self::Banners => to_json(services.banners().list_banners().await?),
            Self::Servers { page } => to_json(services.servers().list_servers(page).await?),
            Self::Tournaments => to_json(services.tournaments().list_tournaments().await?),
            Self::Tournament { tournament_id } => {
                to_json(services.tournaments().tournament(tournament_id).await?)
            }
            Self::RegisterTournament {
                tournament_id,
                team_name,
                players,
                captain_email,
            } => {
                let registration = TournamentRegistration {
                    team_name,
                    players,
                    captain_email,
                };
                to_json(
                    services
                        .tournaments()
                        .register(tournament_id, &registration)
                        .await?,
                )
            }
        }
    }
}

fn to_json<T: Serialize>(value: T) -> anyhow::Result<Value> {
    serde_json::to_value(value).context("failed to encode the response")
}

/// Authentication response without the token itself.
fn auth_summary(services: &Services, response: ApiResponse<AuthData>) -> Value {
    let user = response.data.and_then(|data| data.user);
    json!({
        "success": response.success,
        "message": response.message,
        "message_type": response.message_type,
        "user": user,
        "session": status(services),
    })
}

fn status(services: &Services) -> Value {
    match services.client().store().session() {
        Some(session) => json!({
            "authenticated": true,
            "expires_at": session.expires_at.to_string(),
            "has_refresh_token": session.refresh_token.is_some(),
        }),
        None => json!({ "authenticated": false }),
    }
}
