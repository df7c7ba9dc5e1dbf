use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT, COOKIE, REFERER, USER_AGENT},
    Client,
};
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use crate::{
    config::{ApiConfig, PaginationConfig},
    consts::{FOLLOWERS_EDGE_PATH, FOLLOWINGS_EDGE_PATH},
    credentials::SessionCredentials,
    graph::{normalize_nodes, paginate_edges, EdgeQuery},
    prelude::*,
    req::{HttpClient, HttpGet},
    types::PersonRecord,
    Error,
};

#[derive(Deserialize, Debug, Default)]
struct SearchResponse {
    #[serde(default)]
    users: Option<Vec<SearchHit>>,
}

#[derive(Deserialize, Debug, Default)]
struct SearchHit {
    #[serde(default)]
    user: Option<SearchUser>,
}

#[derive(Deserialize, Debug, Default)]
struct SearchUser {
    #[serde(default)]
    pk: Option<Value>,
}

/// Client for the search and graph-query endpoints of one authenticated session.
///
/// Requests are issued one at a time; the session is not meant to be shared
/// across concurrent tasks.
#[derive(Debug)]
pub struct GraphClient<C = HttpClient> {
    pub http_client: C,
    api: ApiConfig,
    followers_query: EdgeQuery,
    followings_query: EdgeQuery,
}

fn header_value(name: &str, value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|e| Error::InvalidConfig(format!("invalid {name} header value: {e}")))
}

impl GraphClient<HttpClient> {
    /// Build a reqwest session carrying the default headers and the session cookies.
    pub fn new(
        credentials: &SessionCredentials,
        api: &ApiConfig,
        pagination: &PaginationConfig,
    ) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, header_value("User-Agent", &api.user_agent)?);
        headers.insert(ACCEPT, HeaderValue::from_static("*/*"));
        headers.insert(REFERER, header_value("Referer", &api.referer)?);
        let mut cookie = header_value("Cookie", &credentials.cookie_header())?;
        cookie.set_sensitive(true);
        headers.insert(COOKIE, cookie);

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| Error::GenericRequest(e.to_string()))?;

        Ok(Self::with_transport(HttpClient::new(client), api, pagination))
    }
}

impl<C: HttpGet> GraphClient<C> {
    pub fn with_transport(http_client: C, api: &ApiConfig, pagination: &PaginationConfig) -> Self {
        let edge_query = |hash: &str, path: &[&str]| {
            EdgeQuery::new(hash, path)
                .with_page_size(pagination.page_size)
                .with_page_delay(pagination.page_delay())
        };
        Self {
            followers_query: edge_query(&api.followers_query_hash, FOLLOWERS_EDGE_PATH),
            followings_query: edge_query(&api.followings_query_hash, FOLLOWINGS_EDGE_PATH),
            api: api.clone(),
            http_client,
        }
    }

    /// Resolve a username to its numeric id through the search endpoint.
    ///
    /// When the search returns several users the first one is taken, matching
    /// the endpoint's own relevance order. No check is made that its username
    /// equals the query.
    pub async fn user_id(&self, username: &str) -> Result<String> {
        let params = [("context", "blended".to_string()), ("query", username.to_string())];
        let body = self.http_client.get(&self.api.search_url, &params).await?;
        let response: SearchResponse =
            serde_json::from_str(&body).map_err(|e| Error::json_parse(e.to_string()))?;

        let first = response
            .users
            .unwrap_or_default()
            .into_iter()
            .next()
            .ok_or_else(|| Error::UserNotFound(username.to_string()))?;

        let uid = match first.user.and_then(|u| u.pk) {
            Some(Value::String(s)) if !s.is_empty() => s,
            Some(Value::Number(n)) => n.to_string(),
            _ => return Err(Error::MissingIdentifier(username.to_string())),
        };

        info!(username, user_id = %uid, "Resolved user id");
        Ok(uid)
    }

    /// Raw, un-normalized nodes along one edge.
    pub async fn edge_nodes(&self, user_id: &str, query: &EdgeQuery) -> Result<Vec<Value>> {
        paginate_edges(&self.http_client, &self.api.graphql_url, user_id, query).await
    }

    /// Accounts following `user_id`, in API order.
    pub async fn follower_nodes(&self, user_id: &str) -> Result<Vec<PersonRecord>> {
        let nodes = self.edge_nodes(user_id, &self.followers_query).await?;
        Ok(normalize_nodes(&nodes))
    }

    /// Accounts `user_id` follows, in API order.
    pub async fn following_nodes(&self, user_id: &str) -> Result<Vec<PersonRecord>> {
        let nodes = self.edge_nodes(user_id, &self.followings_query).await?;
        Ok(normalize_nodes(&nodes))
    }

    pub async fn follower_usernames(&self, user_id: &str) -> Result<Vec<String>> {
        Ok(self
            .follower_nodes(user_id)
            .await?
            .into_iter()
            .map(|p| p.username)
            .collect())
    }

    /// `(verified, all)` usernames among the accounts `user_id` follows.
    pub async fn following_usernames(&self, user_id: &str) -> Result<(Vec<String>, Vec<String>)> {
        let nodes = self.following_nodes(user_id).await?;
        let verified = nodes
            .iter()
            .filter(|p| p.is_verified)
            .map(|p| p.username.clone())
            .collect();
        let all = nodes.into_iter().map(|p| p.username).collect();
        Ok((verified, all))
    }
}
