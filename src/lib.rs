#![deny(unreachable_pub)]

//! Followers/followings audit over the Instagram private graph API.
//!
//! The pieces, leaf-first:
//! - [`graph::paginate_edges`] walks one cursor-paginated edge
//! - [`graph::normalize_node`] maps raw nodes to [`PersonRecord`]
//! - [`reconcile`] derives the six [`AuditSets`]
//! - [`report`] writes CSV, JSON, Markdown and plain-text outputs
//!
//! [`GraphClient`] ties the session, id lookup and both edges together.

// Core modules
mod consts;
mod errors;
mod prelude;
mod req;

pub mod config;
pub mod credentials;
pub mod graph;
pub mod reconcile;
pub mod report;
pub mod types;

// Re-exports
pub use config::{ApiConfig, AuditConfig, LogFormat, LoggingConfig, PaginationConfig};
pub use consts::{
    DEFAULT_PAGE_DELAY, DEFAULT_PAGE_SIZE, DEFAULT_REFERER, DEFAULT_USER_AGENT,
    FOLLOWERS_EDGE_PATH, FOLLOWERS_QUERY_HASH, FOLLOWINGS_EDGE_PATH, FOLLOWINGS_QUERY_HASH,
    GRAPHQL_URL, OUTPUT_ROOT, REQUIRED_COOKIES, SEARCH_URL,
};
pub use credentials::SessionCredentials;
pub use errors::{Error, HttpErrorKind};
pub use graph::{normalize_node, normalize_nodes, paginate_edges, EdgeQuery, GraphClient};
pub use reconcile::reconcile;
pub use req::{HttpClient, HttpGet};
pub use types::*;
