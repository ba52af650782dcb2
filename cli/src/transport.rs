//! Native HTTP transport and terminal navigator.

#[cfg(test)]
#[path = "transport_test.rs"]
mod transport_test;

use bookshelf::{ApiRequest, ApiResponse, Method, Navigator, Transport, TransportError};

/// `reqwest`-backed [`Transport`] using transport-default timeouts.
#[derive(Clone, Debug, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Transport for ReqwestTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self.client.request(method, &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|error| TransportError(error.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|error| TransportError(error.to_string()))?;
        Ok(ApiResponse::new(status, body))
    }
}

/// A terminal cannot switch screens; it tells the user where to go instead.
#[derive(Clone, Copy, Debug, Default)]
pub struct TerminalNavigator;

impl Navigator for TerminalNavigator {
    fn redirect(&self, route: &str) {
        tracing::info!(route, "session cleared");
        eprintln!("Your session is no longer valid. Run `bookshelf login` to sign in again.");
    }
}
