//! Graph-query access: paging, normalization and the session client.
//!
//! - `paginate`: cursor loop over one edge of the graph endpoint
//! - `normalize`: raw node → [`PersonRecord`](crate::PersonRecord)
//! - `graph_client`: id lookup plus follower/following fetches
//! - `mock`: scripted transport for tests (`test-util` feature)

pub mod graph_client;
#[cfg(any(test, feature = "test-util"))]
pub mod mock;
mod normalize;
mod paginate;

pub use graph_client::GraphClient;
pub use normalize::{is_truthy, normalize_node, normalize_nodes};
pub use paginate::{paginate_edges, EdgeQuery};
