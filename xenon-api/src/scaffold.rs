//! Read-only typed views over parsed JSON objects
//!
//! A domain view owns one JSON object and exposes named accessors over its
//! keys. Accessors are pure projections: nothing is cached and nested views
//! are rebuilt from the owned sub-object on every call.
//!
//! Two kinds of accessor exist. Required accessors return `Result` and fail
//! with [`ApiError::MissingKey`] when the key is absent, since that means the
//! service broke its response contract or the caller ignored a failed status.
//! Probing accessors return `Option` and treat an absent key as `None`.

use serde_json::{Map, Value};

use crate::error::{ApiError, Result};

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn walk<'a>(data: &'a Map<String, Value>, path: &str) -> Option<&'a Value> {
    let mut segments = path.split('.');
    let first = segments.next()?;
    segments.try_fold(data.get(first)?, |value, segment| value.get(segment))
}

/// A typed view over one JSON object
pub trait ObjectScaffold: Sized {
    /// Name used in error messages
    const KIND: &'static str;

    fn from_map(data: Map<String, Value>) -> Self;

    /// The owned JSON object
    fn data(&self) -> &Map<String, Value>;

    /// Build the view, rejecting anything that is not a JSON object
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self::from_map(map)),
            other => Err(ApiError::parse(format!(
                "{} expects a JSON object, got {}",
                Self::KIND,
                type_name(&other)
            ))),
        }
    }

    fn from_ref(value: &Value) -> Result<Self> {
        Self::from_value(value.clone())
    }

    fn into_value(self) -> Value {
        Value::Object(self.data().clone())
    }

    /// Required lookup of a dotted path such as `followers.total`
    fn lookup(&self, path: &str) -> Result<&Value> {
        walk(self.data(), path).ok_or_else(|| ApiError::missing_key(Self::KIND, path))
    }

    /// Probing lookup: absent keys and JSON null both yield `None`
    fn probe(&self, path: &str) -> Option<&Value> {
        walk(self.data(), path).filter(|value| !value.is_null())
    }

    fn has_key(&self, path: &str) -> bool {
        walk(self.data(), path).is_some()
    }

    fn mismatch(&self, path: &str, expected: &str, found: &Value) -> ApiError {
        ApiError::parse(format!(
            "{}.{}: expected {}, got {}",
            Self::KIND,
            path,
            expected,
            type_name(found)
        ))
    }

    fn get_str(&self, path: &str) -> Result<&str> {
        let value = self.lookup(path)?;
        value.as_str().ok_or_else(|| self.mismatch(path, "string", value))
    }

    fn get_int(&self, path: &str) -> Result<i64> {
        let value = self.lookup(path)?;
        value.as_i64().ok_or_else(|| self.mismatch(path, "integer", value))
    }

    fn get_float(&self, path: &str) -> Result<f64> {
        let value = self.lookup(path)?;
        value.as_f64().ok_or_else(|| self.mismatch(path, "number", value))
    }

    fn get_bool(&self, path: &str) -> Result<bool> {
        let value = self.lookup(path)?;
        value.as_bool().ok_or_else(|| self.mismatch(path, "bool", value))
    }

    fn get_list(&self, path: &str) -> Result<&[Value]> {
        let value = self.lookup(path)?;
        value
            .as_array()
            .map(Vec::as_slice)
            .ok_or_else(|| self.mismatch(path, "array", value))
    }

    fn get_map(&self, path: &str) -> Result<&Map<String, Value>> {
        let value = self.lookup(path)?;
        value.as_object().ok_or_else(|| self.mismatch(path, "object", value))
    }

    /// A list of strings, such as genres or market codes
    fn get_strings(&self, path: &str) -> Result<Vec<&str>> {
        self.get_list(path)?
            .iter()
            .map(|item| item.as_str().ok_or_else(|| self.mismatch(path, "array of strings", item)))
            .collect()
    }

    /// Key must exist but its value may be null
    fn get_nullable_str(&self, path: &str) -> Result<Option<&str>> {
        match self.lookup(path)? {
            Value::Null => Ok(None),
            Value::String(s) => Ok(Some(s.as_str())),
            other => Err(self.mismatch(path, "string or null", other)),
        }
    }

    fn get_nullable_int(&self, path: &str) -> Result<Option<i64>> {
        match self.lookup(path)? {
            Value::Null => Ok(None),
            other => other
                .as_i64()
                .map(Some)
                .ok_or_else(|| self.mismatch(path, "integer or null", other)),
        }
    }

    fn get_nullable_bool(&self, path: &str) -> Result<Option<bool>> {
        match self.lookup(path)? {
            Value::Null => Ok(None),
            other => other
                .as_bool()
                .map(Some)
                .ok_or_else(|| self.mismatch(path, "bool or null", other)),
        }
    }

    /// Build a nested view from the sub-object at `path`
    fn view<V: ObjectScaffold>(&self, path: &str) -> Result<V> {
        V::from_ref(self.lookup(path)?)
    }

    /// Build one nested view per element of the array at `path`
    fn views<V: ObjectScaffold>(&self, path: &str) -> Result<Vec<V>> {
        self.get_list(path)?.iter().map(V::from_ref).collect()
    }

    /// Nested view for a key that may be absent or null
    fn probe_view<V: ObjectScaffold>(&self, path: &str) -> Result<Option<V>> {
        self.probe(path).map(V::from_ref).transpose()
    }
}

/// Generate the accessor for one declared key
#[doc(hidden)]
#[macro_export]
macro_rules! scaffold_accessor {
    ($(#[$meta:meta])* $field:ident, str, $key:literal) => {
        $(#[$meta])*
        pub fn $field(&self) -> $crate::error::Result<&str> {
            $crate::scaffold::ObjectScaffold::get_str(self, $key)
        }
    };
    ($(#[$meta:meta])* $field:ident, nullable_str, $key:literal) => {
        $(#[$meta])*
        pub fn $field(&self) -> $crate::error::Result<Option<&str>> {
            $crate::scaffold::ObjectScaffold::get_nullable_str(self, $key)
        }
    };
    ($(#[$meta:meta])* $field:ident, int, $key:literal) => {
        $(#[$meta])*
        pub fn $field(&self) -> $crate::error::Result<i64> {
            $crate::scaffold::ObjectScaffold::get_int(self, $key)
        }
    };
    ($(#[$meta:meta])* $field:ident, nullable_int, $key:literal) => {
        $(#[$meta])*
        pub fn $field(&self) -> $crate::error::Result<Option<i64>> {
            $crate::scaffold::ObjectScaffold::get_nullable_int(self, $key)
        }
    };
    ($(#[$meta:meta])* $field:ident, float, $key:literal) => {
        $(#[$meta])*
        pub fn $field(&self) -> $crate::error::Result<f64> {
            $crate::scaffold::ObjectScaffold::get_float(self, $key)
        }
    };
    ($(#[$meta:meta])* $field:ident, bool, $key:literal) => {
        $(#[$meta])*
        pub fn $field(&self) -> $crate::error::Result<bool> {
            $crate::scaffold::ObjectScaffold::get_bool(self, $key)
        }
    };
    ($(#[$meta:meta])* $field:ident, nullable_bool, $key:literal) => {
        $(#[$meta])*
        pub fn $field(&self) -> $crate::error::Result<Option<bool>> {
            $crate::scaffold::ObjectScaffold::get_nullable_bool(self, $key)
        }
    };
    ($(#[$meta:meta])* $field:ident, list, $key:literal) => {
        $(#[$meta])*
        pub fn $field(&self) -> $crate::error::Result<&[serde_json::Value]> {
            $crate::scaffold::ObjectScaffold::get_list(self, $key)
        }
    };
    ($(#[$meta:meta])* $field:ident, strings, $key:literal) => {
        $(#[$meta])*
        pub fn $field(&self) -> $crate::error::Result<Vec<&str>> {
            $crate::scaffold::ObjectScaffold::get_strings(self, $key)
        }
    };
    ($(#[$meta:meta])* $field:ident, map, $key:literal) => {
        $(#[$meta])*
        pub fn $field(&self) -> $crate::error::Result<&serde_json::Map<String, serde_json::Value>> {
            $crate::scaffold::ObjectScaffold::get_map(self, $key)
        }
    };
    ($(#[$meta:meta])* $field:ident, probe_map, $key:literal) => {
        $(#[$meta])*
        pub fn $field(&self) -> Option<&serde_json::Map<String, serde_json::Value>> {
            $crate::scaffold::ObjectScaffold::probe(self, $key).and_then(serde_json::Value::as_object)
        }
    };
    ($(#[$meta:meta])* $field:ident, probe_str, $key:literal) => {
        $(#[$meta])*
        pub fn $field(&self) -> Option<&str> {
            $crate::scaffold::ObjectScaffold::probe(self, $key).and_then(serde_json::Value::as_str)
        }
    };
    ($(#[$meta:meta])* $field:ident, probe_int, $key:literal) => {
        $(#[$meta])*
        pub fn $field(&self) -> Option<i64> {
            $crate::scaffold::ObjectScaffold::probe(self, $key).and_then(serde_json::Value::as_i64)
        }
    };
    ($(#[$meta:meta])* $field:ident, probe_bool, $key:literal) => {
        $(#[$meta])*
        pub fn $field(&self) -> Option<bool> {
            $crate::scaffold::ObjectScaffold::probe(self, $key).and_then(serde_json::Value::as_bool)
        }
    };
}

/// Declare a domain view and its key accessors
///
/// # Example
/// ```rust,ignore
/// define_scaffold! {
///     /// A device as returned by the player endpoints
///     pub struct Device {
///         id: nullable_str => "id",
///         volume_percent: nullable_int => "volume_percent",
///     }
/// }
/// ```
#[macro_export]
macro_rules! define_scaffold {
    (
        $(#[$meta:meta])*
        pub struct $name:ident {
            $(
                $(#[$fmeta:meta])*
                $field:ident : $kind:ident => $key:literal
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        pub struct $name {
            data: serde_json::Map<String, serde_json::Value>,
        }

        impl $crate::scaffold::ObjectScaffold for $name {
            const KIND: &'static str = stringify!($name);

            fn from_map(data: serde_json::Map<String, serde_json::Value>) -> Self {
                Self { data }
            }

            fn data(&self) -> &serde_json::Map<String, serde_json::Value> {
                &self.data
            }
        }

        impl $name {
            $(
                $crate::scaffold_accessor!($(#[$fmeta])* $field, $kind, $key);
            )*
        }
    };
}

define_scaffold! {
    /// A paging object
    ///
    /// Offset pages carry `offset` and `total`; cursor pages (recently played,
    /// followed artists) carry `cursors` instead, so those keys are probed.
    pub struct Page {
        href: str => "href",
        limit: int => "limit",
        items: list => "items",
        next: probe_str => "next",
        previous: probe_str => "previous",
        offset: probe_int => "offset",
        total: probe_int => "total",
        /// Cursor for the next page of a cursor-based listing
        after: probe_str => "cursors.after",
        before: probe_str => "cursors.before",
    }
}

impl Page {
    /// Items as typed views
    pub fn items_as<V: ObjectScaffold>(&self) -> Result<Vec<V>> {
        self.views("items")
    }

    /// Offset of the page following this one
    pub fn next_offset(&self) -> Result<i64> {
        Ok(self.offset().unwrap_or(0) + self.limit()?)
    }

    pub fn has_next(&self) -> bool {
        self.next().is_some()
    }
}

/// Reshape helper: take the array under `key` and view every element as `V`
pub fn list_of<V: ObjectScaffold>(body: &Value, key: &str) -> Result<Vec<V>> {
    let items = body
        .get(key)
        .ok_or_else(|| ApiError::missing_key("response", key))?;
    let items = items
        .as_array()
        .ok_or_else(|| ApiError::parse(format!("'{}' is not an array", key)))?;
    items.iter().map(V::from_ref).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    define_scaffold! {
        pub struct Sample {
            name: str => "name",
            count: int => "count",
            ratio: float => "ratio",
            enabled: bool => "enabled",
            description: nullable_str => "description",
            tags: strings => "tags",
            total_followers: int => "followers.total",
            restrictions: probe_map => "restrictions",
        }
    }

    fn sample() -> Sample {
        Sample::from_value(json!({
            "name": "Test",
            "count": 10,
            "ratio": 0.5,
            "enabled": true,
            "description": null,
            "tags": ["a", "b"],
            "followers": {"href": null, "total": 42},
            "children": [{"name": "first"}, {"name": "second"}]
        }))
        .unwrap()
    }

    #[test]
    fn test_accessors_read_documented_keys() {
        let sample = sample();
        assert_eq!(sample.name().unwrap(), "Test");
        assert_eq!(sample.count().unwrap(), 10);
        assert_eq!(sample.ratio().unwrap(), 0.5);
        assert!(sample.enabled().unwrap());
        assert_eq!(sample.description().unwrap(), None);
        assert_eq!(sample.tags().unwrap(), vec!["a", "b"]);
        assert_eq!(sample.total_followers().unwrap(), 42);
    }

    #[test]
    fn test_absent_optional_key_is_none() {
        assert!(sample().restrictions().is_none());
    }

    #[test]
    fn test_missing_required_key_fails() {
        let sample = Sample::from_value(json!({"count": 1})).unwrap();
        match sample.name() {
            Err(ApiError::MissingKey { kind, key }) => {
                assert_eq!(kind, "Sample");
                assert_eq!(key, "name");
            }
            other => panic!("Expected MissingKey, got {:?}", other),
        }
    }

    #[test]
    fn test_type_mismatch_is_parse_error() {
        let sample = Sample::from_value(json!({"count": "ten"})).unwrap();
        if let Err(ApiError::ParseError(msg)) = sample.count() {
            assert!(msg.contains("Sample.count"));
        } else {
            panic!("Expected ParseError");
        }
    }

    #[test]
    fn test_non_object_rejected() {
        assert!(matches!(
            Sample::from_value(json!([1, 2])),
            Err(ApiError::ParseError(_))
        ));
    }

    #[test]
    fn test_nested_views_rebuilt_each_call() {
        let sample = sample();
        let children: Vec<Sample> = sample.views("children").unwrap();
        assert_eq!(children.len(), 2);
        assert_eq!(children[1].name().unwrap(), "second");
        assert_eq!(sample.views::<Sample>("children").unwrap(), children);
    }

    #[test]
    fn test_offset_page() {
        let page = Page::from_value(json!({
            "href": "https://api.spotify.com/v1/me/albums",
            "limit": 20,
            "offset": 40,
            "total": 100,
            "next": null,
            "previous": "https://api.spotify.com/v1/me/albums?offset=20",
            "items": [{"name": "x"}]
        }))
        .unwrap();

        assert_eq!(page.next_offset().unwrap(), 60);
        assert!(!page.has_next());
        assert_eq!(page.total(), Some(100));
        assert!(page.after().is_none());
        assert_eq!(page.items_as::<Sample>().unwrap()[0].name().unwrap(), "x");
    }

    #[test]
    fn test_cursor_page() {
        let page = Page::from_value(json!({
            "href": "https://api.spotify.com/v1/me/following",
            "limit": 10,
            "next": "https://api.spotify.com/v1/me/following?after=abc",
            "cursors": {"after": "abc"},
            "items": []
        }))
        .unwrap();

        assert_eq!(page.after(), Some("abc"));
        assert_eq!(page.next_offset().unwrap(), 10);
        assert!(page.offset().is_none());
    }

    #[test]
    fn test_list_of_reshape() {
        let body = json!({"albums": [{"name": "a"}, {"name": "b"}]});
        let views: Vec<Sample> = list_of(&body, "albums").unwrap();
        assert_eq!(views.len(), 2);
        assert!(matches!(
            list_of::<Sample>(&json!({"error": "x"}), "albums"),
            Err(ApiError::MissingKey { .. })
        ));
    }
}
