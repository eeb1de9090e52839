#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

/// Tracing target for token store operations.
pub const TRACING_TARGET_STORE: &str = "globens_session::store";

mod file;
mod memory;
mod store;

pub use file::FileTokenStore;
pub use memory::MemoryTokenStore;
pub use store::TokenStore;
