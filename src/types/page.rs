//! Cursor bookkeeping for paged graph responses.

use serde_json::Value;

use crate::graph::is_truthy;

/// Pagination state attached to one page of edges.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PageInfo {
    pub has_next_page: bool,
    pub end_cursor: Option<String>,
}

impl PageInfo {
    /// Read `page_info` from an edge container. Missing or null yields an empty page info.
    pub fn from_value(value: Option<&Value>) -> Self {
        let Some(Value::Object(map)) = value else {
            return Self::default();
        };
        let end_cursor = match map.get("end_cursor") {
            Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
            _ => None,
        };
        Self {
            has_next_page: map.get("has_next_page").is_some_and(is_truthy),
            end_cursor,
        }
    }

    /// Cursor for the following request, if there is one to make.
    ///
    /// A page that claims a successor but omits the cursor ends the walk.
    pub fn next_cursor(&self) -> Option<&str> {
        if self.has_next_page {
            self.end_cursor.as_deref()
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_page_info_is_last_page() {
        assert_eq!(PageInfo::from_value(None).next_cursor(), None);
        assert_eq!(PageInfo::from_value(Some(&Value::Null)).next_cursor(), None);
    }

    #[test]
    fn test_next_cursor_requires_flag_and_cursor() {
        let info = PageInfo::from_value(Some(&json!({"has_next_page": true, "end_cursor": "abc"})));
        assert_eq!(info.next_cursor(), Some("abc"));

        let info = PageInfo::from_value(Some(&json!({"has_next_page": true, "end_cursor": ""})));
        assert_eq!(info.next_cursor(), None);

        let info = PageInfo::from_value(Some(&json!({"has_next_page": true, "end_cursor": null})));
        assert_eq!(info.next_cursor(), None);

        let info = PageInfo::from_value(Some(&json!({"has_next_page": false, "end_cursor": "abc"})));
        assert_eq!(info.next_cursor(), None);
    }
}
