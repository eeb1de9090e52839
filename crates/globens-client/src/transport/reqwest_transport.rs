//! Reqwest-based transport.

use reqwest::Client;
use reqwest::multipart::{Form, Part};

use super::{RawRequest, RawResponse, Transport, TransportError};
use crate::{ClientConfig, Error, MultipartForm, RequestBody, Result, TRACING_TARGET_TRANSPORT};

/// Transport backed by a shared [`reqwest::Client`].
///
/// Timeouts are applied per request, so one client serves every resource
/// group.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http: Client,
}

impl ReqwestTransport {
    /// Creates a transport with the user agent from the configuration.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let user_agent = config.effective_user_agent();

        tracing::debug!(
            target: TRACING_TARGET_TRANSPORT,
            user_agent = %user_agent,
            "Creating reqwest transport"
        );

        let http = Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(Error::Http)?;

        Ok(Self { http })
    }

    /// Wraps an existing client.
    pub fn from_client(http: Client) -> Self {
        Self { http }
    }
}

fn multipart_form(form: MultipartForm) -> Form {
    let mut multipart = Form::new();

    for (name, value) in form.fields {
        multipart = multipart.text(name, value);
    }

    for file in form.files {
        let part = Part::bytes(file.bytes.to_vec()).file_name(file.file_name.clone());
        let part = match part.mime_str(&file.content_type) {
            Ok(part) => part,
            Err(error) => {
                tracing::warn!(
                    target: TRACING_TARGET_TRANSPORT,
                    field = %file.field,
                    content_type = %file.content_type,
                    error = %error,
                    "Invalid content type, sending file without one"
                );
                Part::bytes(file.bytes.to_vec()).file_name(file.file_name)
            }
        };
        multipart = multipart.part(file.field, part);
    }

    multipart
}

fn transport_error(error: reqwest::Error) -> TransportError {
    if error.is_timeout() {
        TransportError::Timeout
    } else {
        TransportError::network(error.to_string())
    }
}

#[async_trait::async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: RawRequest) -> Result<RawResponse, TransportError> {
        let RawRequest {
            method,
            url,
            headers,
            body,
            timeout,
        } = request;

        let builder = self
            .http
            .request(method, url)
            .headers(headers)
            .timeout(timeout);

        let builder = match body {
            RequestBody::Empty => builder,
            RequestBody::Json(bytes) => builder.body(bytes),
            RequestBody::Multipart(form) => builder.multipart(multipart_form(form)),
        };

        let response = builder.send().await.map_err(transport_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(transport_error)?;

        tracing::debug!(
            target: TRACING_TARGET_TRANSPORT,
            status = status.as_u16(),
            len = body.len(),
            "Received response"
        );

        if status.is_success() {
            Ok(RawResponse::new(status.as_u16(), body))
        } else {
            Err(TransportError::status(status.as_u16(), body))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use axum::Router;
    use axum::extract::Multipart;
    use axum::http::{HeaderMap as AxumHeaders, StatusCode};
    use axum::routing::{get, post};
    use reqwest::Method;
    use reqwest::header::HeaderMap;
    use url::Url;

    use super::*;
    use crate::{FilePart, MultipartForm};

    async fn serve(router: Router) -> Url {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, router).await });
        Url::parse(&format!("http://{address}/")).unwrap()
    }

    fn request(method: Method, url: Url, body: RequestBody) -> RawRequest {
        RawRequest {
            method,
            url,
            headers: HeaderMap::new(),
            body,
            timeout: Duration::from_secs(5),
        }
    }

    fn transport() -> ReqwestTransport {
        ReqwestTransport::new(&ClientConfig::default().with_user_agent("globens-test")).unwrap()
    }

    #[tokio::test]
    async fn test_success_response() {
        let router = Router::new().route(
            "/echo",
            post(|headers: AxumHeaders, body: String| async move {
                let agent = headers
                    .get("user-agent")
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or_default()
                    .to_owned();
                format!("{agent}:{body}")
            }),
        );
        let base = serve(router).await;

        let response = transport()
            .send(request(
                Method::POST,
                base.join("echo").unwrap(),
                RequestBody::Json(r#"{"a":1}"#.into()),
            ))
            .await
            .unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(&response.body[..], br#"globens-test:{"a":1}"#);
    }

    #[tokio::test]
    async fn test_error_status_keeps_body() {
        let router = Router::new().route(
            "/missing",
            get(|| async { (StatusCode::NOT_FOUND, r#"{"message":"Missing"}"#) }),
        );
        let base = serve(router).await;

        let error = transport()
            .send(request(
                Method::GET,
                base.join("missing").unwrap(),
                RequestBody::Empty,
            ))
            .await
            .unwrap_err();

        let TransportError::Status { status, body } = error else {
            panic!("expected a status error");
        };
        assert_eq!(status, 404);
        assert_eq!(&body[..], br#"{"message":"Missing"}"#);
    }

    #[tokio::test]
    async fn test_timeout() {
        let router = Router::new().route(
            "/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                "late"
            }),
        );
        let base = serve(router).await;

        let mut slow = request(Method::GET, base.join("slow").unwrap(), RequestBody::Empty);
        slow.timeout = Duration::from_millis(100);

        let error = transport().send(slow).await.unwrap_err();
        assert!(matches!(error, TransportError::Timeout));
    }

    #[tokio::test]
    async fn test_connection_refused() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        drop(listener);

        let url = Url::parse(&format!("http://{address}/")).unwrap();
        let error = transport()
            .send(request(Method::GET, url, RequestBody::Empty))
            .await
            .unwrap_err();
        assert!(matches!(error, TransportError::Network { .. }));
    }

    #[tokio::test]
    async fn test_multipart_upload() {
        let router = Router::new().route(
            "/upload",
            post(|mut multipart: Multipart| async move {
                let mut seen = Vec::new();
                while let Some(field) = multipart.next_field().await.unwrap() {
                    let name = field.name().unwrap_or_default().to_owned();
                    let file_name = field.file_name().map(str::to_owned);
                    let len = field.bytes().await.unwrap().len();
                    seen.push(format!("{name}:{}:{len}", file_name.unwrap_or_default()));
                }
                seen.join(",")
            }),
        );
        let base = serve(router).await;

        let form = MultipartForm::new()
            .text("name", "Alpha")
            .file(FilePart::new("avatar", "a.png", "image/png", vec![7; 16]));

        let response = transport()
            .send(request(
                Method::POST,
                base.join("upload").unwrap(),
                RequestBody::Multipart(form),
            ))
            .await
            .unwrap();

        assert_eq!(&response.body[..], b"name::5,avatar:a.png:16");
    }
}
