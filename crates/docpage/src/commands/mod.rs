//! CLI command implementations.

pub(crate) mod fetch;
pub(crate) mod render;

pub(crate) use fetch::FetchArgs;
pub(crate) use render::RenderArgs;

use docpage_config::Config;
use docpage_renderer::{HeadingPolicy, SubsetRenderer};

/// Build the renderer described by `[render]`.
fn renderer_from_config(config: &Config) -> SubsetRenderer {
    let policy = if config.render.demote_h1 {
        HeadingPolicy::DemoteTitle
    } else {
        HeadingPolicy::KeepTitle
    };
    SubsetRenderer::new().with_heading_policy(policy)
}
