//! Claude-on-Vertex client adapter
//!
//! Holds one blocking and one async provider client. Construction hands each
//! client only the options its constructor accepts; every generation call
//! hands the create-message operation only the options it accepts. Nothing
//! else happens here: provider errors, timeouts and retries are the clients'
//! business.

use super::api::{AsyncMessagesApi, MessagesApi};
use super::generation::Generation;
use super::request::MessageCreateParams;
use super::vertex::{AsyncVertexClient, VertexClient};
use crate::error::CirrusResult;
use crate::params::{FromOptions, Options, filter_params};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Provider-agnostic message generation
#[async_trait]
pub trait MessageClient: Send + Sync {
    /// Stream type of the blocking path
    type Stream;
    /// Stream type of the async path
    type AsyncStream;

    /// Generate a message on the caller's thread
    fn generate_message(&self, options: &Options) -> CirrusResult<Generation<Self::Stream>>;

    /// Generate a message asynchronously
    async fn generate_message_async(
        &self,
        options: &Options,
    ) -> CirrusResult<Generation<Self::AsyncStream>>;
}

/// Adapter over a blocking and an async Claude-on-Vertex client
pub struct ClaudeVertexClient<S = VertexClient, A = AsyncVertexClient> {
    client: S,
    async_client: A,
}

impl<S, A> ClaudeVertexClient<S, A>
where
    S: MessagesApi + FromOptions,
    A: AsyncMessagesApi + FromOptions,
{
    /// Build both clients from one option map.
    ///
    /// Each constructor receives the subset of `options` it declares; keys
    /// neither accepts are dropped.
    pub fn new(options: &Options) -> CirrusResult<Self> {
        let sync_options = filter_params(&S::signature(), options)?;
        let async_options = filter_params(&A::signature(), options)?;

        debug!(
            "Building clients: blocking={:?}, async={:?}, dropped={:?}",
            sync_options.keys().collect::<Vec<_>>(),
            async_options.keys().collect::<Vec<_>>(),
            options
                .keys()
                .filter(|k| !sync_options.contains_key(*k) && !async_options.contains_key(*k))
                .collect::<Vec<_>>()
        );

        Ok(Self {
            client: S::from_options(sync_options)?,
            async_client: A::from_options(async_options)?,
        })
    }
}

impl<S, A> ClaudeVertexClient<S, A>
where
    S: MessagesApi,
    A: AsyncMessagesApi,
{
    /// Wrap already constructed clients
    pub fn from_clients(client: S, async_client: A) -> Self {
        Self {
            client,
            async_client,
        }
    }

    /// The blocking client
    pub fn client(&self) -> &S {
        &self.client
    }

    /// The async client
    pub fn async_client(&self) -> &A {
        &self.async_client
    }

    /// Create a message with the blocking client.
    ///
    /// Returns the provider's stream type when `stream` is true.
    #[instrument(skip_all, fields(model = model_name(options)))]
    pub fn generate_message(&self, options: &Options) -> CirrusResult<Generation<S::Stream>> {
        let filtered = filter_params(&self.client.create_signature(), options)?;
        let params = MessageCreateParams::from_options(filtered)?;
        self.client.create(params)
    }

    /// Create a message with the async client
    #[instrument(skip_all, fields(model = model_name(options)))]
    pub async fn generate_message_async(
        &self,
        options: &Options,
    ) -> CirrusResult<Generation<A::Stream>> {
        let filtered = filter_params(&self.async_client.create_signature(), options)?;
        let params = MessageCreateParams::from_options(filtered)?;
        self.async_client.create(params).await
    }
}

#[async_trait]
impl<S, A> MessageClient for ClaudeVertexClient<S, A>
where
    S: MessagesApi,
    A: AsyncMessagesApi,
{
    type Stream = S::Stream;
    type AsyncStream = A::Stream;

    fn generate_message(&self, options: &Options) -> CirrusResult<Generation<S::Stream>> {
        ClaudeVertexClient::generate_message(self, options)
    }

    async fn generate_message_async(
        &self,
        options: &Options,
    ) -> CirrusResult<Generation<A::Stream>> {
        ClaudeVertexClient::generate_message_async(self, options).await
    }
}

fn model_name(options: &Options) -> &str {
    options
        .get("model")
        .and_then(|v| v.as_str())
        .unwrap_or_default()
}
