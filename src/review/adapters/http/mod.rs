//! HTTP adapters for the model service and submission links.

mod fetcher;
mod model;

pub use fetcher::HttpContentFetcher;
pub use model::{ModelSettings, OpenAiCompatibleModel};
