//! Client configuration
//!
//! - [`VertexClientConfig`]: resolved settings for the Vertex transport clients
//! - [`TimeoutConfig`]: connection/request timeouts
//! - [`load_options`] / [`options_from_env`]: sources for raw option maps

mod loader;
mod timeouts;
mod vertex;

pub use loader::{load_options, options_from_env};
pub use timeouts::TimeoutConfig;
pub use vertex::{
    BASE_URL_ENV, CONSTRUCTOR_PARAMS, PROJECT_ID_ENV, REGION_ENV, VertexClientConfig,
    default_base_url,
};
