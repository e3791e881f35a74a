//! Cirrus
//!
//! Claude on Google Vertex AI behind a small adapter, plus batching and
//! image transport helpers.
//!
//! ```no_run
//! use cirrus::{ClaudeVertexClient, to_options};
//! use serde_json::json;
//!
//! # fn example() -> cirrus::CirrusResult<()> {
//! let client: ClaudeVertexClient = ClaudeVertexClient::new(&to_options(json!({
//!     "region": "us-east5",
//!     "project_id": "my-project",
//!     "access_token": "ya29...",
//! }))?)?;
//!
//! let reply = client
//!     .generate_message(&to_options(json!({
//!         "model": "claude-sonnet-4@20250514",
//!         "max_tokens": 512,
//!         "messages": [{"role": "user", "content": "Hello"}],
//!     }))?)?
//!     .resolve()?;
//! println!("{}", reply.text());
//! # Ok(())
//! # }
//! ```

pub use cirrus_core::{
    AsyncMessageStream, AsyncMessagesApi, AsyncVertexClient, CirrusError, CirrusResult,
    ClaudeVertexClient, FromOptions, Generation, Message, MessageClient, MessageCreateParams,
    MessageParam, MessageStream, MessagesApi, Options, RawMessageStreamEvent, Signature,
    TimeoutConfig, VertexClient, VertexClientConfig, config, filter_params, llm, load_options,
    options_from_env, params, to_options,
};
pub use cirrus_utils::{
    Batches, Bitmap, EncodedImage, ImageInput, UtilError, UtilResult, batch, decode_image,
    decode_image_bytes, encode_image, image, image_to_bytes, make_batch,
};
