//! Session cookies loaded from a JSON file.

use std::collections::BTreeMap;
use std::path::Path;

use serde_json::Value;
use tracing::warn;

use crate::{consts::REQUIRED_COOKIES, prelude::*, Error};

/// Authenticated session cookies.
///
/// Holds at least `csrftoken`, `ds_user_id` and `sessionid`. Any other
/// string-valued key in the file is sent along as an extra cookie.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionCredentials {
    cookies: BTreeMap<String, String>,
}

// Security: never print cookie values
impl std::fmt::Debug for SessionCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionCredentials")
            .field("cookies", &self.cookies.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl SessionCredentials {
    /// Read and validate a credential file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| Error::io(path.display(), e))?;
        Self::from_json_str(&text)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text).map_err(|e| Error::json_parse(e.to_string()))?;
        let Value::Object(map) = value else {
            return Err(Error::json_parse("credential file must hold a JSON object"));
        };

        let mut cookies = BTreeMap::new();
        for (key, value) in map {
            match value {
                Value::String(s) if !s.is_empty() => {
                    cookies.insert(key, s);
                }
                _ => warn!(cookie = %key, "Ignoring non-string or empty cookie value"),
            }
        }

        Self::from_cookies(cookies)
    }

    /// Build from an already-parsed cookie map. Fails naming every absent required cookie.
    pub fn from_cookies(cookies: BTreeMap<String, String>) -> Result<Self> {
        let missing: Vec<String> = REQUIRED_COOKIES
            .iter()
            .filter(|name| !cookies.contains_key(**name))
            .map(|name| name.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(Error::MissingCredentials { fields: missing });
        }
        Ok(Self { cookies })
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.cookies.get(name).map(String::as_str)
    }

    /// Value for a `Cookie` request header.
    pub fn cookie_header(&self) -> String {
        self.cookies
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const FULL: &str = r#"{"csrftoken": "tok", "ds_user_id": "99", "sessionid": "s3cr3t"}"#;

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(FULL.as_bytes()).unwrap();

        let creds = SessionCredentials::load(file.path()).unwrap();
        assert_eq!(creds.get("sessionid"), Some("s3cr3t"));
        assert_eq!(
            creds.cookie_header(),
            "csrftoken=tok; ds_user_id=99; sessionid=s3cr3t"
        );
    }

    #[test]
    fn test_missing_fields_are_named_in_order() {
        let err = SessionCredentials::from_json_str(r#"{"ds_user_id": "99"}"#).unwrap_err();
        match err {
            Error::MissingCredentials { fields } => {
                assert_eq!(fields, vec!["csrftoken", "sessionid"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_empty_or_non_string_required_cookie_is_missing() {
        let err = SessionCredentials::from_json_str(
            r#"{"csrftoken": "", "ds_user_id": "1", "sessionid": "s"}"#,
        )
        .unwrap_err();
        match err {
            Error::MissingCredentials { fields } => assert_eq!(fields, vec!["csrftoken"]),
            other => panic!("unexpected error: {other:?}"),
        }

        let err = SessionCredentials::from_json_str(
            r#"{"csrftoken": "t", "ds_user_id": 1, "sessionid": null}"#,
        )
        .unwrap_err();
        match err {
            Error::MissingCredentials { fields } => {
                assert_eq!(fields, vec!["ds_user_id", "sessionid"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_extra_cookies_carried() {
        let creds = SessionCredentials::from_json_str(
            r#"{"csrftoken": "t", "ds_user_id": "1", "sessionid": "s", "mid": "m", "rur": 5}"#,
        )
        .unwrap();
        assert_eq!(creds.get("mid"), Some("m"));
        assert_eq!(creds.get("rur"), None);
    }

    #[test]
    fn test_debug_redacts_values() {
        let creds = SessionCredentials::from_json_str(FULL).unwrap();
        let rendered = format!("{creds:?}");
        assert!(rendered.contains("sessionid"));
        assert!(!rendered.contains("s3cr3t"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = SessionCredentials::load(dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_non_object_rejected() {
        let err = SessionCredentials::from_json_str("[1, 2]").unwrap_err();
        assert!(matches!(err, Error::JsonParse(_)));
    }
}
