//! Claude on Google Vertex AI
//!
//! Thin transport clients for the `rawPredict` / `streamRawPredict`
//! endpoints. Authentication is a caller-supplied OAuth access token.

mod async_client;
mod client;
mod request;

pub use async_client::AsyncVertexClient;
pub use client::VertexClient;
pub use request::{VERTEX_ANTHROPIC_VERSION, VertexRequest, build_request, endpoint_url};
