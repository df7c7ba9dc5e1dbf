//! Scripted transport for testing.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::{prelude::*, req::HttpGet, Error};

/// One request observed by [`ScriptedHttp`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub url: String,
    pub query: Vec<(String, String)>,
}

impl RecordedRequest {
    pub fn param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Replays queued responses in order and records every request it sees.
///
/// Running out of responses is reported as a transport error so a runaway
/// loop fails the test instead of hanging it.
#[derive(Debug, Default)]
pub struct ScriptedHttp {
    responses: Mutex<VecDeque<Result<String>>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl ScriptedHttp {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_body(&self, body: impl Into<String>) -> &Self {
        self.push(Ok(body.into()))
    }

    pub fn push_json(&self, body: &serde_json::Value) -> &Self {
        self.push_body(body.to_string())
    }

    pub fn push(&self, response: Result<String>) -> &Self {
        self.responses
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(response);
        self
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn remaining(&self) -> usize {
        self.responses
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .len()
    }
}

#[async_trait]
impl HttpGet for ScriptedHttp {
    async fn get(&self, url: &str, query: &[(&str, String)]) -> Result<String> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(RecordedRequest {
                url: url.to_string(),
                query: query
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.clone()))
                    .collect(),
            });

        self.responses
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front()
            .unwrap_or_else(|| Err(Error::GenericRequest("no scripted response left".into())))
    }
}
