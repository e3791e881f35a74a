//! Blocking Vertex transport client

use super::request::{build_request, header_map};
use crate::config::{CONSTRUCTOR_PARAMS, VertexClientConfig};
use crate::error::{CirrusError, CirrusResult};
use crate::llm::api::MessagesApi;
use crate::llm::generation::Generation;
use crate::llm::messages::Message;
use crate::llm::request::MessageCreateParams;
use crate::llm::stream::MessageStream;
use crate::params::{FromOptions, Options, Signature};
use reqwest::blocking::Client;
use std::thread;
use tracing::{debug, instrument, warn};

/// Blocking Claude-on-Vertex client
///
/// Backed by `reqwest::blocking`. The inner HTTP client owns its own runtime,
/// so it is built and torn down on a separate thread; creating or dropping a
/// `VertexClient` inside an async runtime is fine. `create` still blocks the
/// calling thread.
pub struct VertexClient {
    config: VertexClientConfig,
    // Only `None` after `drop` has handed the client to its release thread
    http_client: Option<Client>,
}

impl VertexClient {
    /// Create a client from a resolved configuration
    pub fn new(config: VertexClientConfig) -> CirrusResult<Self> {
        config.validate()?;

        let http_client = thread::scope(|scope| {
            scope
                .spawn(|| {
                    let mut client_builder = Client::builder()
                        .connect_timeout(config.timeouts.connection_timeout())
                        .timeout(config.timeouts.request_timeout());

                    let headers = header_map(&config.default_headers);
                    if !headers.is_empty() {
                        client_builder = client_builder.default_headers(headers);
                    }
                    client_builder.build()
                })
                .join()
        })
        .map_err(|_| CirrusError::http("HTTP client builder thread panicked"))?
        .map_err(|e| CirrusError::http(format!("Failed to create HTTP client: {}", e)))?;

        debug!(
            "Created blocking Vertex client for region '{}' with timeouts: connection={}s, request={}s",
            config.region,
            config.timeouts.connection_timeout_secs,
            config.timeouts.request_timeout_secs
        );

        Ok(Self {
            config,
            http_client: Some(http_client),
        })
    }

    /// Resolved configuration
    pub fn config(&self) -> &VertexClientConfig {
        &self.config
    }

    fn http_client(&self) -> CirrusResult<&Client> {
        self.http_client
            .as_ref()
            .ok_or_else(|| CirrusError::http("HTTP client has already been released"))
    }
}

impl Drop for VertexClient {
    fn drop(&mut self) {
        let Some(client) = self.http_client.take() else {
            return;
        };
        // Shutting down the inner runtime blocks, which panics on an async worker
        let released = thread::Builder::new()
            .name("cirrus-vertex-release".to_string())
            .spawn(move || drop(client));
        if let Err(e) = released {
            warn!("Failed to spawn HTTP client release thread: {}", e);
        }
    }
}

impl FromOptions for VertexClient {
    fn signature() -> Signature {
        Signature::new("VertexClient::new", CONSTRUCTOR_PARAMS)
    }

    fn from_options(options: Options) -> CirrusResult<Self> {
        Self::new(VertexClientConfig::from_options(options)?)
    }
}

impl MessagesApi for VertexClient {
    type Stream = MessageStream;

    #[instrument(skip_all, fields(model = %params.model), level = "debug")]
    fn create(&self, params: MessageCreateParams) -> CirrusResult<Generation<MessageStream>> {
        let request = build_request(&self.config, &params)?;

        let mut builder = self
            .http_client()?
            .post(&request.url)
            .bearer_auth(&request.access_token)
            .json(&request.body);
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder.send()?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(CirrusError::from_response_body(status.as_u16(), &body));
        }

        if request.stream {
            return Ok(Generation::Stream(MessageStream::from_reader(response)));
        }

        let message: Message = response
            .json()
            .map_err(|e| CirrusError::json(format!("Invalid message response: {}", e)))?;
        debug!("Received message '{}' ({:?})", message.id, message.stop_reason);
        Ok(Generation::Message(message))
    }
}
