#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

/// Tracing target for request preparation and dispatch.
pub const TRACING_TARGET_CLIENT: &str = "globens_client::client";

/// Tracing target for resource service operations.
pub const TRACING_TARGET_SERVICE: &str = "globens_client::service";

/// Tracing target for the HTTP transport.
pub const TRACING_TARGET_TRANSPORT: &str = "globens_client::transport";

mod client;
mod config;
mod error;
mod group;
mod request;
mod service;

pub mod model;
pub mod transport;

pub use client::{ApiClient, decode};
pub use config::{
    ClientConfig, DEFAULT_API_URL, DEFAULT_PROFILE_TIMEOUT_SECS, DEFAULT_TIMEOUT_SECS,
    DEFAULT_UPLOAD_TIMEOUT_SECS,
};
pub use error::{Error, Result};
pub use group::ResourceGroup;
pub use request::{ApiRequest, AuthRequirement, BodyKind, FilePart, MultipartForm, RequestBody};
pub use service::{
    AuthService, BannersService, DEFAULT_PER_PAGE, GamesService, NewsService, ORIGIN_UNREACHABLE,
    ProfileService, ServersService, Services, TeamsService, TournamentsService,
};
