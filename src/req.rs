use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Deserialize;
use tracing::debug;

use crate::{prelude::*, Error};

/// Error body returned by the private API on rejected requests.
#[derive(Deserialize, Debug)]
struct ErrorData {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    status: Option<String>,
}

/// A single GET round trip returning the response body.
///
/// The paginator and the graph client only talk to the network through this
/// seam, so tests can script responses without a live endpoint.
#[async_trait]
pub trait HttpGet: Send + Sync {
    async fn get(&self, url: &str, query: &[(&str, String)]) -> Result<String>;
}

#[derive(Debug, Clone)]
pub struct HttpClient {
    pub client: Client,
}

async fn parse_response(url: &str, response: Response) -> Result<String> {
    let status_code = response.status().as_u16();
    let text = response
        .text()
        .await
        .map_err(|e| Error::GenericRequest(e.to_string()))?;

    if (200..300).contains(&status_code) {
        return Ok(text);
    }
    let error_data = serde_json::from_str::<ErrorData>(&text).ok();
    if (400..500).contains(&status_code) {
        return Err(match error_data {
            Some(ErrorData {
                message: Some(message),
                status,
            }) => Error::client_error(status_code, url, status, message),
            Some(ErrorData { status, .. }) => Error::client_error(status_code, url, status, text),
            None => Error::client_error(status_code, url, None, text),
        });
    }
    if status_code >= 500 {
        return Err(Error::server_error(status_code, url, text));
    }

    Err(Error::Http {
        status: status_code,
        url: url.to_string(),
        kind: crate::HttpErrorKind::Unexpected { message: text },
    })
}

impl HttpClient {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpGet for HttpClient {
    /// Send a GET request. Non-2xx statuses are returned as `Error::Http`; nothing is retried.
    async fn get(&self, url: &str, query: &[(&str, String)]) -> Result<String> {
        let request = self
            .client
            .get(url)
            .query(query)
            .build()
            .map_err(|e| Error::GenericRequest(e.to_string()))?;

        debug!(url = %request.url(), "GET");

        let result = self
            .client
            .execute(request)
            .await
            .map_err(|e| Error::GenericRequest(e.to_string()))?;

        parse_response(url, result).await
    }
}
