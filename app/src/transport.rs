//! Executes `HttpRequest`s built by the core client.
//!
//! Non-2xx responses come back as data; only a round trip that produced no
//! response at all, or that failed inside the HTTP library, is a
//! `TransportFailure`.

use async_trait::async_trait;
use customer_core::{HttpMethod, HttpRequest, HttpResponse, TransportFailure};
use reqwest::{Client, Method};

#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportFailure>;
}

/// `HttpTransport` backed by a shared `reqwest::Client`.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportFailure> {
        let mut builder = self.client.request(method(request.method), &request.path);
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(classify)?;

        let status = response.status();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.to_string(), value.to_string()))
            })
            .collect();
        let body = response.text().await.map_err(classify)?;

        Ok(HttpResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            headers,
            body,
        })
    }
}

fn method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Delete => Method::DELETE,
    }
}

/// Builder errors (bad URL, bad header) never left the process; connect,
/// timeout, send and body errors mean the exchange itself broke.
fn classify(err: reqwest::Error) -> TransportFailure {
    if err.is_builder() {
        return TransportFailure::Unexpected(err.to_string());
    }
    if err.is_connect() || err.is_timeout() || err.is_request() || err.is_body() {
        tracing::debug!(error = %err, "no response from server");
        return TransportFailure::NoResponse;
    }
    TransportFailure::Unexpected(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get(path: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: path.to_string(),
            headers: Vec::new(),
            body: None,
        }
    }

    #[test]
    fn maps_every_method() {
        assert_eq!(method(HttpMethod::Get), Method::GET);
        assert_eq!(method(HttpMethod::Post), Method::POST);
        assert_eq!(method(HttpMethod::Put), Method::PUT);
        assert_eq!(method(HttpMethod::Delete), Method::DELETE);
    }

    #[tokio::test]
    async fn invalid_url_is_unexpected() {
        let failure = ReqwestTransport::new()
            .execute(get("not a url"))
            .await
            .unwrap_err();
        assert!(matches!(failure, TransportFailure::Unexpected(_)));
    }

    #[tokio::test]
    async fn refused_connection_is_no_response() {
        // Bind then drop to get a port nothing listens on.
        let addr = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap();
        let failure = ReqwestTransport::new()
            .execute(get(&format!("http://{addr}/customers")))
            .await
            .unwrap_err();
        assert_eq!(failure, TransportFailure::NoResponse);
    }
}
