use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// A file or folder from the Drive v2 files resource.
///
/// Only `id` and `title` are interpreted; every other key is kept in
/// `fields` so any of them can be requested as an additional column.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RemoteObject {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(flatten)]
    pub fields: BTreeMap<String, Value>,
}

impl RemoteObject {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            fields: BTreeMap::new(),
        }
    }

    pub fn with_field(mut self, name: impl Into<String>, value: Value) -> Self {
        self.fields.insert(name.into(), value);
        self
    }

    /// Look up a named field, including `id` and `title`.
    pub fn field(&self, name: &str) -> Option<Value> {
        match name {
            "id" => Some(Value::String(self.id.clone())),
            "title" => Some(Value::String(self.title.clone())),
            _ => self.fields.get(name).cloned(),
        }
    }
}

/// One page of a files listing.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Page {
    #[serde(default)]
    pub items: Vec<RemoteObject>,
    #[serde(rename = "nextPageToken", default, skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
}

// ParentReference is documented at https://developers.google.com/drive/api/v2/reference/parents
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ParentReference {
    pub id: String,
    #[serde(default)]
    pub is_root: bool,
}

// ParentList is documented at https://developers.google.com/drive/api/v2/reference/parents/list
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct ParentList {
    #[serde(default)]
    pub items: Vec<ParentReference>,
}

/// Render a field value for a record column.
///
/// Lists are joined by `;`, null renders empty.
pub fn render_field(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) => items
            .iter()
            .map(render_field)
            .collect::<Vec<_>>()
            .join(";"),
        Value::Object(_) => value.to_string(),
    }
}

/// Additional field names a files resource carries.
pub const KNOWN_FIELDS: &[&str] = &[
    "headRevisionId",
    "iconLink",
    "id",
    "kind",
    "lastModifyingUserName",
    "lastViewedByMeDate",
    "markedViewedByMeDate",
    "md5Checksum",
    "mimeType",
    "modifiedByMeDate",
    "modifiedDate",
    "openWithLinks",
    "originalFilename",
    "ownerNames",
    "quotaBytesUsed",
    "selfLink",
    "shared",
    "sharedWithMeDate",
    "thumbnailLink",
    "title",
    "version",
    "webContentLink",
    "webViewLink",
    "writersCanShare",
];

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_field() {
        assert_eq!(render_field(&json!("text/plain")), "text/plain");
        assert_eq!(render_field(&json!(["alice", "bob"])), "alice;bob");
        assert_eq!(render_field(&json!([])), "");
        assert_eq!(render_field(&json!(true)), "true");
        assert_eq!(render_field(&json!(1024)), "1024");
        assert_eq!(render_field(&Value::Null), "");
        assert_eq!(render_field(&json!({"a": 1})), r#"{"a":1}"#);
    }

    #[test]
    fn test_page_from_wire() {
        let page: Page = serde_json::from_value(json!({
            "kind": "drive#fileList",
            "nextPageToken": "tok-2",
            "items": [
                {"id": "a", "title": "Report, final.pdf", "mimeType": "application/pdf",
                 "ownerNames": ["alice"]},
                {"id": "b", "title": "notes"}
            ]
        }))
        .expect("valid page");

        assert_eq!(page.next_cursor.as_deref(), Some("tok-2"));
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[0].title, "Report, final.pdf");
        assert_eq!(page.items[0].field("mimeType"), Some(json!("application/pdf")));
        assert_eq!(page.items[0].field("ownerNames"), Some(json!(["alice"])));
        assert_eq!(page.items[1].field("id"), Some(json!("b")));
        assert_eq!(page.items[1].field("mimeType"), None);
    }

    #[test]
    fn test_last_page_has_no_cursor() {
        let page: Page = serde_json::from_value(json!({"items": []})).expect("valid page");
        assert!(page.items.is_empty());
        assert!(page.next_cursor.is_none());
    }

    #[test]
    fn test_parent_list_from_wire() {
        let parents: ParentList = serde_json::from_value(json!({
            "kind": "drive#parentList",
            "items": [{"id": "root-id", "isRoot": true, "kind": "drive#parentReference"}]
        }))
        .expect("valid parent list");
        assert_eq!(parents.items.len(), 1);
        assert_eq!(parents.items[0].id, "root-id");
        assert!(parents.items[0].is_root);
    }
}
