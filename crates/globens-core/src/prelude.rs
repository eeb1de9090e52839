//! Convenient re-exports for common use.

pub use crate::envelope::{ApiResponse, DataEnvelope, MessageType, Paginated};
pub use crate::error::{ErrorKind, NormalizedError, Result};
pub use crate::locale::Locale;
pub use crate::session::Session;
