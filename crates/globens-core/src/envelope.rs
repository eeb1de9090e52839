//! Response envelopes shared by all backend endpoints.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, IntoStaticStr};

/// Presentation hint attached to every envelope.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(AsRefStr, Display, EnumString, IntoStaticStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum MessageType {
    #[default]
    Success,
    Info,
    Error,
}

/// Success envelope: `{ success, message, message_type, data? }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub message_type: MessageType,
    #[serde(default = "Option::default", skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Returns the payload, if the backend sent one.
    pub fn into_data(self) -> Option<T> {
        self.data
    }
}

/// Bare `{ data }` wrapper used by catalog detail endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataEnvelope<T> {
    pub data: T,
}

/// One entry of the backend's `errors[]` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Failure envelope: `{ success: false, message, message_type, errors? }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    #[serde(default)]
    pub success: bool,
    pub message: String,
    #[serde(default = "error_message_type")]
    pub message_type: MessageType,
    #[serde(default)]
    pub errors: Vec<FieldError>,
}

fn error_message_type() -> MessageType {
    MessageType::Error
}

/// Navigation links of a paginated listing.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLinks {
    #[serde(default)]
    pub first: Option<String>,
    #[serde(default)]
    pub last: Option<String>,
    #[serde(default)]
    pub prev: Option<String>,
    #[serde(default)]
    pub next: Option<String>,
}

/// Position metadata of a paginated listing.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    #[serde(default = "first_page")]
    pub current_page: u32,
    #[serde(default)]
    pub from: Option<u32>,
    #[serde(default = "first_page")]
    pub last_page: u32,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub per_page: u32,
    #[serde(default)]
    pub to: Option<u32>,
    #[serde(default)]
    pub total: u64,
}

fn first_page() -> u32 {
    1
}

impl PageMeta {
    /// Returns whether a page after the current one exists.
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.current_page < self.last_page
    }
}

/// Paginated listing: `{ data[], links?, meta? }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paginated<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<PageLinks>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<PageMeta>,
}

impl<T> Default for Paginated<T> {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            links: None,
            meta: None,
        }
    }
}

impl<T> Paginated<T> {
    /// Returns whether the backend reports more pages.
    #[must_use]
    pub fn has_next(&self) -> bool {
        match (&self.meta, &self.links) {
            (Some(meta), _) => meta.has_next(),
            (None, Some(links)) => links.next.is_some(),
            (None, None) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_envelope_without_data() {
        let body = r#"{"success":true,"message":"OTP sent","message_type":"info"}"#;
        let response: ApiResponse<serde_json::Value> = serde_json::from_str(body).unwrap();

        assert!(response.success);
        assert_eq!(response.message_type, MessageType::Info);
        assert!(response.into_data().is_none());
    }

    #[test]
    fn test_error_envelope_defaults() {
        let body = r#"{"message":"Validation failed"}"#;
        let envelope: ErrorEnvelope = serde_json::from_str(body).unwrap();

        assert!(!envelope.success);
        assert_eq!(envelope.message_type, MessageType::Error);
        assert!(envelope.errors.is_empty());
    }

    #[test]
    fn test_error_envelope_requires_message() {
        let body = r#"{"success":false,"errors":[]}"#;
        assert!(serde_json::from_str::<ErrorEnvelope>(body).is_err());
    }

    #[test]
    fn test_paginated_listing() {
        let body = r#"{
            "data": [1, 2, 3],
            "links": {"first": "/news?page=1", "last": "/news?page=4", "prev": null, "next": "/news?page=2"},
            "meta": {"current_page": 1, "from": 1, "last_page": 4, "path": "/news", "per_page": 3, "to": 3, "total": 12, "links": []}
        }"#;
        let page: Paginated<u32> = serde_json::from_str(body).unwrap();

        assert_eq!(page.data, vec![1, 2, 3]);
        assert!(page.has_next());
        assert_eq!(page.meta.unwrap().total, 12);
    }

    #[test]
    fn test_paginated_last_page() {
        let body = r#"{"data": [], "links": {"first": null, "last": null, "prev": "/x", "next": null}}"#;
        let page: Paginated<u32> = serde_json::from_str(body).unwrap();
        assert!(!page.has_next());
    }
}
