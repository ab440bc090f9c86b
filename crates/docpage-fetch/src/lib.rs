//! Remote README fetching for documentation pages.
//!
//! [`ReadmeClient`] downloads a raw markdown document over HTTP and renders
//! it with [`docpage_renderer::SubsetRenderer`]. Pages never see a fetch
//! error: [`ReadmeClient::documentation`] substitutes a static fallback
//! fragment when the request fails or the server does not answer `200 OK`.
//!
//! # Example
//!
//! ```no_run
//! use docpage_fetch::ReadmeClient;
//!
//! let client = ReadmeClient::default();
//! let url = "https://raw.githubusercontent.com/example/app/main/README.md";
//! let html = client.documentation(url);
//! assert!(!html.is_empty());
//! ```

mod client;
mod error;

pub use client::{DEFAULT_TIMEOUT, ReadmeClient};
pub use error::{FetchError, UNAVAILABLE_FRAGMENT};
