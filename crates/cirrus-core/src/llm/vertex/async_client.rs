//! Asynchronous Vertex transport client

use super::request::{build_request, header_map};
use crate::config::{CONSTRUCTOR_PARAMS, VertexClientConfig};
use crate::error::{CirrusError, CirrusResult};
use crate::llm::api::AsyncMessagesApi;
use crate::llm::generation::Generation;
use crate::llm::messages::Message;
use crate::llm::request::MessageCreateParams;
use crate::llm::stream::AsyncMessageStream;
use crate::params::{FromOptions, Options, Signature};
use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, instrument};

/// Asynchronous Claude-on-Vertex client
pub struct AsyncVertexClient {
    config: VertexClientConfig,
    http_client: Client,
}

impl AsyncVertexClient {
    /// Create a client from a resolved configuration
    pub fn new(config: VertexClientConfig) -> CirrusResult<Self> {
        config.validate()?;

        let mut client_builder = Client::builder()
            .connect_timeout(config.timeouts.connection_timeout())
            .timeout(config.timeouts.request_timeout());

        let headers = header_map(&config.default_headers);
        if !headers.is_empty() {
            client_builder = client_builder.default_headers(headers);
        }

        let http_client = client_builder
            .build()
            .map_err(|e| CirrusError::http(format!("Failed to create HTTP client: {}", e)))?;

        debug!(
            "Created async Vertex client for region '{}' with timeouts: connection={}s, request={}s",
            config.region,
            config.timeouts.connection_timeout_secs,
            config.timeouts.request_timeout_secs
        );

        Ok(Self {
            config,
            http_client,
        })
    }

    /// Resolved configuration
    pub fn config(&self) -> &VertexClientConfig {
        &self.config
    }
}

impl FromOptions for AsyncVertexClient {
    fn signature() -> Signature {
        Signature::new("AsyncVertexClient::new", CONSTRUCTOR_PARAMS)
    }

    fn from_options(options: Options) -> CirrusResult<Self> {
        Self::new(VertexClientConfig::from_options(options)?)
    }
}

#[async_trait]
impl AsyncMessagesApi for AsyncVertexClient {
    type Stream = AsyncMessageStream;

    #[instrument(skip_all, fields(model = %params.model), level = "debug")]
    async fn create(
        &self,
        params: MessageCreateParams,
    ) -> CirrusResult<Generation<AsyncMessageStream>> {
        let request = build_request(&self.config, &params)?;

        let mut builder = self
            .http_client
            .post(&request.url)
            .bearer_auth(&request.access_token)
            .json(&request.body);
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CirrusError::from_response_body(status.as_u16(), &body));
        }

        if request.stream {
            return Ok(Generation::Stream(AsyncMessageStream::from_byte_stream(
                response.bytes_stream(),
            )));
        }

        let message: Message = response
            .json()
            .await
            .map_err(|e| CirrusError::json(format!("Invalid message response: {}", e)))?;
        debug!("Received message '{}' ({:?})", message.id, message.stop_reason);
        Ok(Generation::Message(message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::messages::MessageParam;

    #[tokio::test]
    async fn test_create_without_project_fails_before_sending() {
        let config = VertexClientConfig::new("europe-west1").with_access_token("t");
        let client = AsyncVertexClient::new(config).unwrap();

        let params = MessageCreateParams::new("claude", 16, vec![MessageParam::user("Hi")])
            .with_stream(true);
        let err = client.create(params).await.unwrap_err();
        assert!(err.to_string().contains("No project_id was given"));
    }

    #[test]
    fn test_signature_target() {
        assert_eq!(
            AsyncVertexClient::signature().target,
            "AsyncVertexClient::new"
        );
    }
}
