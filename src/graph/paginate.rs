//! Cursor-driven walk over a paged graph-query endpoint.

use std::time::Duration;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::{
    consts::{DEFAULT_PAGE_DELAY, DEFAULT_PAGE_SIZE},
    graph::is_truthy,
    prelude::*,
    req::HttpGet,
    types::PageInfo,
    Error,
};

/// What to page through and how fast.
#[derive(Debug, Clone)]
pub struct EdgeQuery {
    /// Persisted query selector sent as `query_hash`
    pub query_hash: String,
    /// Keys leading from the response root to the edge container
    pub edge_path: Vec<String>,
    /// Nodes requested per page; must be > 0
    pub page_size: u32,
    /// Pause between successive page requests
    pub page_delay: Duration,
}

impl EdgeQuery {
    pub fn new(query_hash: impl Into<String>, edge_path: &[&str]) -> Self {
        Self {
            query_hash: query_hash.into(),
            edge_path: edge_path.iter().map(|k| k.to_string()).collect(),
            page_size: DEFAULT_PAGE_SIZE,
            page_delay: DEFAULT_PAGE_DELAY,
        }
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_page_delay(mut self, page_delay: Duration) -> Self {
        self.page_delay = page_delay;
        self
    }
}

/// `variables` payload, serialized compactly in `id, first, after` order.
#[derive(Serialize)]
struct QueryVariables<'a> {
    id: &'a str,
    first: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    after: Option<&'a str>,
}

/// Walk `edge_path` from the response root down to the edge container.
fn descend<'a>(
    payload: &'a Value,
    edge_path: &[String],
) -> Result<&'a serde_json::Map<String, Value>> {
    let mut cur = payload;
    for key in edge_path {
        cur = cur
            .as_object()
            .and_then(|map| map.get(key))
            .ok_or_else(|| {
                Error::malformed(format!(
                    "unexpected response structure: missing '{key}' along {}",
                    edge_path.join(".")
                ))
            })?;
    }
    cur.as_object().ok_or_else(|| {
        Error::malformed(format!(
            "edge container is not an object at {}",
            edge_path.join(".")
        ))
    })
}

/// Fetch every node reachable from `user_id` along `query.edge_path`.
///
/// Nodes are returned in page order, then within-page order. The first
/// failing page aborts the walk and the nodes gathered so far are dropped.
/// The loop only ends when the API stops reporting a next page; nothing
/// bounds the number of iterations.
pub async fn paginate_edges<C: HttpGet + ?Sized>(
    http: &C,
    graphql_url: &str,
    user_id: &str,
    query: &EdgeQuery,
) -> Result<Vec<Value>> {
    if query.page_size == 0 {
        return Err(Error::InvalidConfig("page size must be greater than zero".into()));
    }

    let mut nodes: Vec<Value> = Vec::new();
    let mut after: Option<String> = None;
    let mut page = 0usize;

    loop {
        page += 1;
        let variables = serde_json::to_string(&QueryVariables {
            id: user_id,
            first: query.page_size,
            after: after.as_deref(),
        })
        .map_err(|e| Error::json_parse(e.to_string()))?;

        let params = [
            ("query_hash", query.query_hash.clone()),
            ("variables", variables),
        ];

        let body = http.get(graphql_url, &params).await?;
        let payload: Value =
            serde_json::from_str(&body).map_err(|e| Error::json_parse(e.to_string()))?;

        let container = descend(&payload, &query.edge_path)?;

        let edges = match container.get("edges") {
            None | Some(Value::Null) => &[][..],
            Some(Value::Array(edges)) => edges.as_slice(),
            Some(_) => {
                return Err(Error::malformed(format!(
                    "edges is not an array at {}",
                    query.edge_path.join(".")
                )))
            }
        };
        let page_info = PageInfo::from_value(container.get("page_info"));

        let before = nodes.len();
        nodes.extend(
            edges
                .iter()
                .filter_map(|edge| edge.as_object()?.get("node"))
                .filter(|node| is_truthy(node))
                .cloned(),
        );

        debug!(
            page,
            page_nodes = nodes.len() - before,
            total_nodes = nodes.len(),
            has_next_page = page_info.has_next_page,
            "Fetched page"
        );

        match page_info.next_cursor() {
            Some(cursor) => {
                after = Some(cursor.to_string());
                tokio::time::sleep(query.page_delay).await;
            }
            None => break,
        }
    }

    info!(
        edge = %query.edge_path.last().map(String::as_str).unwrap_or(""),
        pages = page,
        nodes = nodes.len(),
        "Pagination complete"
    );

    Ok(nodes)
}
