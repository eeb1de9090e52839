//! Requests described independently of the HTTP transport.

use std::fmt;

use bytes::Bytes;
use globens_core::Failure;
use reqwest::Method;
use serde::Serialize;
use strum::{AsRefStr, Display};

use crate::ResourceGroup;

/// Whether a call needs a stored session.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthRequirement {
    /// The bearer token is attached when present.
    #[default]
    Optional,
    /// The call fails locally when no session is stored.
    Required,
}

/// Shape of the request body, used for headers and timeouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Display)]
#[strum(serialize_all = "snake_case")]
pub enum BodyKind {
    Empty,
    Json,
    Multipart,
}

/// A file attached to a multipart form.
#[derive(Clone, PartialEq, Eq)]
pub struct FilePart {
    pub field: String,
    pub file_name: String,
    pub content_type: String,
    pub bytes: Bytes,
}

impl FilePart {
    /// Creates a file part.
    pub fn new(
        field: impl Into<String>,
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: impl Into<Bytes>,
    ) -> Self {
        Self {
            field: field.into(),
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes: bytes.into(),
        }
    }
}

impl fmt::Debug for FilePart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilePart")
            .field("field", &self.field)
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Text fields and files of a multipart body.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MultipartForm {
    pub fields: Vec<(String, String)>,
    pub files: Vec<FilePart>,
}

impl MultipartForm {
    /// Creates an empty form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a text field.
    #[must_use]
    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    /// Appends a file.
    #[must_use]
    pub fn file(mut self, file: FilePart) -> Self {
        self.files.push(file);
        self
    }

    /// Returns the value of the first text field with the given name.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Request body.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub enum RequestBody {
    #[default]
    Empty,
    /// Serialized JSON document.
    Json(Bytes),
    Multipart(MultipartForm),
}

impl RequestBody {
    /// Serializes a JSON body.
    pub fn json<B: Serialize + ?Sized>(body: &B) -> Result<Self, Failure> {
        serde_json::to_vec(body)
            .map(|bytes| Self::Json(bytes.into()))
            .map_err(|error| Failure::Encode {
                reason: error.to_string(),
            })
    }

    /// Returns the body shape.
    pub fn kind(&self) -> BodyKind {
        match self {
            Self::Empty => BodyKind::Empty,
            Self::Json(_) => BodyKind::Json,
            Self::Multipart(_) => BodyKind::Multipart,
        }
    }
}

/// One logical call against a resource group.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub(crate) group: ResourceGroup,
    pub(crate) method: Method,
    pub(crate) segments: Vec<String>,
    pub(crate) query: Vec<(String, String)>,
    pub(crate) body: Result<RequestBody, Failure>,
    pub(crate) auth: AuthRequirement,
}

impl ApiRequest {
    /// Creates a request with the given method against a group root.
    pub fn new(method: Method, group: ResourceGroup) -> Self {
        Self {
            group,
            method,
            segments: Vec::new(),
            query: Vec::new(),
            body: Ok(RequestBody::Empty),
            auth: AuthRequirement::Optional,
        }
    }

    /// Creates a `GET` request.
    pub fn get(group: ResourceGroup) -> Self {
        Self::new(Method::GET, group)
    }

    /// Creates a `POST` request.
    pub fn post(group: ResourceGroup) -> Self {
        Self::new(Method::POST, group)
    }

    /// Creates a `PUT` request.
    pub fn put(group: ResourceGroup) -> Self {
        Self::new(Method::PUT, group)
    }

    /// Creates a `DELETE` request.
    pub fn delete(group: ResourceGroup) -> Self {
        Self::new(Method::DELETE, group)
    }

    /// Appends a path segment; it is percent-encoded when the URL is built.
    #[must_use]
    pub fn segment(mut self, segment: impl ToString) -> Self {
        self.segments.push(segment.to_string());
        self
    }

    /// Appends a query parameter.
    #[must_use]
    pub fn query(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((name.into(), value.to_string()));
        self
    }

    /// Sets a JSON body.
    ///
    /// Encoding failures surface when the request is sent.
    #[must_use]
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Self {
        self.body = RequestBody::json(body);
        self
    }

    /// Sets a multipart body.
    #[must_use]
    pub fn multipart(mut self, form: MultipartForm) -> Self {
        self.body = Ok(RequestBody::Multipart(form));
        self
    }

    /// Requires a stored session.
    #[must_use]
    pub fn authenticated(mut self) -> Self {
        self.auth = AuthRequirement::Required;
        self
    }

    /// Resource group of the call.
    pub fn group(&self) -> ResourceGroup {
        self.group
    }

    /// Session requirement of the call.
    pub fn auth(&self) -> AuthRequirement {
        self.auth
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let request = ApiRequest::get(ResourceGroup::Games)
            .segment("cs2")
            .query("page", 2)
            .authenticated();

        assert_eq!(request.method, Method::GET);
        assert_eq!(request.segments, vec!["cs2".to_owned()]);
        assert_eq!(request.query, vec![("page".to_owned(), "2".to_owned())]);
        assert_eq!(request.auth(), AuthRequirement::Required);
        assert_eq!(request.body.unwrap().kind(), BodyKind::Empty);
    }

    #[test]
    fn test_json_body() {
        let request =
            ApiRequest::post(ResourceGroup::Auth).json(&serde_json::json!({"otp": "1234"}));
        let RequestBody::Json(bytes) = request.body.unwrap() else {
            panic!("expected a JSON body");
        };
        assert_eq!(&bytes[..], br#"{"otp":"1234"}"#);
    }

    #[test]
    fn test_multipart_form() {
        let form = MultipartForm::new()
            .text("name", "Alpha")
            .file(FilePart::new("avatar", "a.png", "image/png", vec![1, 2, 3]));

        assert_eq!(form.field("name"), Some("Alpha"));
        assert!(form.field("description").is_none());
        assert_eq!(RequestBody::Multipart(form).kind(), BodyKind::Multipart);
    }

    #[test]
    fn test_file_part_debug_omits_bytes() {
        let part = FilePart::new("avatar", "a.png", "image/png", vec![0; 1024]);
        assert!(format!("{part:?}").contains("len: 1024"));
    }
}
