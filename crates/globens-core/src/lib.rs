#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

/// Tracing target for error normalization.
pub const TRACING_TARGET_NORMALIZE: &str = "globens_core::normalize";

mod envelope;
mod error;
mod locale;
mod normalize;
mod session;

pub mod prelude;

pub use envelope::{
    ApiResponse, DataEnvelope, ErrorEnvelope, FieldError, MessageType, PageLinks, PageMeta,
    Paginated,
};
pub use error::{ErrorKind, NormalizedError, Result};
pub use locale::{Locale, Message};
pub use normalize::{Failure, Normalizer, Precondition, TransportError, combine_field_errors};
pub use session::{DEFAULT_REFRESH_TTL_SECS, Session, TokenPayload};
