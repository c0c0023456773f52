//! Transport seam between the completion client and the network.
//!
//! The client only needs "send this request, give me the body bytes as they
//! arrive". Tests swap in a scripted transport; production uses reqwest.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::{BoxStream, StreamExt};
use reqwest::Client as HttpClient;

use super::wire::ChatCompletionRequest;
use crate::error::CoachError;

/// Response body as a stream of raw chunks
pub type ByteStream = BoxStream<'static, Result<Bytes, CoachError>>;

#[async_trait]
pub trait Transport: Send + Sync {
    /// Send the request and return the body stream.
    ///
    /// Non-2xx responses must be reported here as [`CoachError::Status`],
    /// before any body bytes are handed out.
    async fn open(
        &self,
        api_key: &str,
        request: &ChatCompletionRequest,
    ) -> Result<ByteStream, CoachError>;

    /// Transport name for logging
    fn name(&self) -> &'static str;
}

/// HTTPS transport for an OpenAI-compatible chat-completions endpoint
pub struct HttpTransport {
    client: HttpClient,
    endpoint: String,
}

impl HttpTransport {
    pub fn new(endpoint: impl Into<String>, connect_timeout: Duration) -> Result<Self, CoachError> {
        let client = HttpClient::builder()
            .connect_timeout(connect_timeout)
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn open(
        &self,
        api_key: &str,
        request: &ChatCompletionRequest,
    ) -> Result<ByteStream, CoachError> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .unwrap_or_else(|e| format!("(failed to read body: {})", e));
            return Err(CoachError::Status { status, body });
        }

        Ok(response
            .bytes_stream()
            .map(|chunk| chunk.map_err(CoachError::from))
            .boxed())
    }

    fn name(&self) -> &'static str {
        "http"
    }
}
