//! Raw edge node → [`PersonRecord`].

use serde_json::{Map, Value};

use crate::types::PersonRecord;

/// JSON truthiness: null, false, zero, and empty strings/arrays/objects are false.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

fn string_field(map: &Map<String, Value>, key: &str) -> String {
    match map.get(key) {
        Some(Value::String(s)) => s.clone(),
        _ => String::new(),
    }
}

fn flag_field(map: &Map<String, Value>, key: &str) -> bool {
    map.get(key).is_some_and(is_truthy)
}

/// Numeric ids arrive as strings on newer API versions and as numbers on older ones.
fn id_field(map: &Map<String, Value>, key: &str) -> Option<String> {
    match map.get(key)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64().is_some_and(|f| f != 0.0) => Some(n.to_string()),
        _ => None,
    }
}

/// Map one raw node to a canonical record.
///
/// Returns `None` for non-object nodes and for nodes without a non-empty
/// string username; callers drop those silently.
pub fn normalize_node(node: &Value) -> Option<PersonRecord> {
    let map = node.as_object()?;
    let username = match map.get("username") {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        _ => return None,
    };

    Some(PersonRecord {
        username,
        full_name: string_field(map, "full_name"),
        id: id_field(map, "id").or_else(|| id_field(map, "pk")),
        is_verified: flag_field(map, "is_verified"),
        is_private: flag_field(map, "is_private"),
        profile_pic_url: string_field(map, "profile_pic_url"),
    })
}

/// Normalize a page-ordered node list, dropping unusable nodes.
pub fn normalize_nodes(nodes: &[Value]) -> Vec<PersonRecord> {
    nodes.iter().filter_map(normalize_node).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_pk_used_when_id_absent() {
        let record = normalize_node(&json!({"username": "a", "pk": 5})).unwrap();
        assert_eq!(record.id.as_deref(), Some("5"));
    }

    #[test]
    fn test_node_without_username_is_dropped() {
        assert!(normalize_node(&json!({})).is_none());
        assert!(normalize_node(&json!({"username": ""})).is_none());
        assert!(normalize_node(&json!({"username": null, "pk": 1})).is_none());
    }

    #[test]
    fn test_non_object_node_is_dropped() {
        assert!(normalize_node(&json!("alice")).is_none());
        assert!(normalize_node(&json!([1, 2])).is_none());
        assert!(normalize_node(&Value::Null).is_none());
    }

    #[test]
    fn test_id_takes_precedence_over_pk() {
        let record = normalize_node(&json!({"username": "a", "id": "17", "pk": 5})).unwrap();
        assert_eq!(record.id.as_deref(), Some("17"));

        // Falsy id falls through to pk
        let record = normalize_node(&json!({"username": "a", "id": "", "pk": "9"})).unwrap();
        assert_eq!(record.id.as_deref(), Some("9"));

        let record = normalize_node(&json!({"username": "a"})).unwrap();
        assert_eq!(record.id, None);
    }

    #[test]
    fn test_defaults_and_flags() {
        let record = normalize_node(&json!({
            "username": "carol",
            "full_name": null,
            "is_verified": 1,
            "is_private": "",
        }))
        .unwrap();

        assert_eq!(record.username, "carol");
        assert_eq!(record.full_name, "");
        assert_eq!(record.profile_pic_url, "");
        assert!(record.is_verified);
        assert!(!record.is_private);
    }

    #[test]
    fn test_full_node() {
        let record = normalize_node(&json!({
            "id": "42",
            "username": "Bob",
            "full_name": "Bob B.",
            "is_verified": false,
            "is_private": true,
            "profile_pic_url": "https://cdn.example/bob.jpg",
            "followed_by_viewer": true,
        }))
        .unwrap();

        assert_eq!(
            record,
            PersonRecord {
                username: "Bob".to_string(),
                full_name: "Bob B.".to_string(),
                id: Some("42".to_string()),
                is_verified: false,
                is_private: true,
                profile_pic_url: "https://cdn.example/bob.jpg".to_string(),
            }
        );
    }

    #[test]
    fn test_normalize_nodes_keeps_order_and_filters() {
        let nodes = vec![
            json!({"username": "z"}),
            json!({}),
            json!(7),
            json!({"username": "a"}),
        ];
        let names: Vec<_> = normalize_nodes(&nodes)
            .into_iter()
            .map(|r| r.username)
            .collect();
        assert_eq!(names, vec!["z", "a"]);
    }
}
