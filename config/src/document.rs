//! Dotted-path access to a loaded configuration document.
//!
//! A [`ConfigDocument`] holds a YAML or JSON tree and answers typed lookups
//! such as `doc.get_u64("convert.flags.quality")`. Mapping keys are walked
//! segment by segment; a numeric segment indexes into a sequence.
//!
//! # Example
//!
//! ```
//! use flag_merge_config::ConfigDocument;
//!
//! let doc = ConfigDocument::from_yaml_str(r#"
//! convert:
//!   program: magick
//!   timeout: 90s
//!   args: ["-D", "--strip"]
//! "#).unwrap();
//!
//! assert_eq!(doc.get_string("convert.program").unwrap().as_deref(), Some("magick"));
//! assert_eq!(doc.get_string("convert.args.1").unwrap().as_deref(), Some("--strip"));
//! assert_eq!(doc.get_duration("convert.timeout").unwrap().map(|d| d.as_secs()), Some(90));
//! assert_eq!(doc.get_string("convert.missing").unwrap(), None);
//! ```

use std::path::Path;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::error::{ConfigError, Result};

/// A read-only configuration tree addressed by dotted paths.
///
/// Typed getters return `Ok(None)` when nothing is stored at the path and
/// [`ConfigError::TypeMismatch`] when the stored value has the wrong shape.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigDocument {
    root: Value,
}

impl ConfigDocument {
    /// Wraps an already-parsed tree.
    pub fn from_value(root: Value) -> Self {
        Self { root }
    }

    /// Parses a YAML document.
    ///
    /// # Errors
    ///
    /// Returns [`Yaml`](ConfigError::Yaml) if parsing fails.
    pub fn from_yaml_str(raw: &str) -> Result<Self> {
        let root: Value = serde_yaml::from_str(raw)?;
        Ok(Self::from_value(root))
    }

    /// Parses a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`Json`](ConfigError::Json) if parsing fails.
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let root: Value = serde_json::from_str(raw)?;
        Ok(Self::from_value(root))
    }

    /// Loads a document from disk.
    ///
    /// Files ending in `.yml` or `.yaml` are read as YAML, everything else
    /// as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`Io`](ConfigError::Io) if the file cannot be read, or the
    /// matching parse error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let is_yaml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("yml") || ext.eq_ignore_ascii_case("yaml"));
        tracing::debug!(path = %path.display(), is_yaml, "loading configuration document");
        if is_yaml {
            Self::from_yaml_str(&raw)
        } else {
            Self::from_json_str(&raw)
        }
    }

    /// Returns the whole tree.
    pub fn root(&self) -> &Value {
        &self.root
    }

    /// Returns the raw value at `path`. The empty path is the root.
    pub fn get(&self, path: &str) -> Option<&Value> {
        if path.is_empty() {
            return Some(&self.root);
        }
        path.split('.')
            .try_fold(&self.root, |node, segment| match node {
                Value::Object(map) => map.get(segment),
                Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
                _ => None,
            })
    }

    /// Returns `true` if a value (including `null`) is stored at `path`.
    pub fn contains(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    /// Reads a string.
    pub fn get_string(&self, path: &str) -> Result<Option<String>> {
        self.typed(path, "a string", |v| v.as_str().map(str::to_string))
    }

    /// Reads a boolean.
    pub fn get_bool(&self, path: &str) -> Result<Option<bool>> {
        self.typed(path, "a boolean", Value::as_bool)
    }

    /// Reads a signed integer.
    pub fn get_i64(&self, path: &str) -> Result<Option<i64>> {
        self.typed(path, "an integer", Value::as_i64)
    }

    /// Reads an unsigned integer.
    pub fn get_u64(&self, path: &str) -> Result<Option<u64>> {
        self.typed(path, "a non-negative integer", Value::as_u64)
    }

    /// Reads a number; integers are widened.
    pub fn get_f64(&self, path: &str) -> Result<Option<f64>> {
        self.typed(path, "a number", Value::as_f64)
    }

    /// Reads a duration.
    ///
    /// Strings use human-readable units (`"1h 30m"`, `"250ms"`); bare
    /// non-negative integers are seconds.
    pub fn get_duration(&self, path: &str) -> Result<Option<Duration>> {
        self.typed(path, "a duration", |v| match v {
            Value::Number(n) => n.as_u64().map(Duration::from_secs),
            Value::String(_) => {
                serde_json::from_value::<humantime_serde::Serde<Duration>>(v.clone())
                    .ok()
                    .map(humantime_serde::Serde::into_inner)
            }
            _ => None,
        })
    }

    /// Reads an RFC 3339 timestamp, normalised to UTC.
    pub fn get_time(&self, path: &str) -> Result<Option<DateTime<Utc>>> {
        self.typed(path, "an RFC 3339 timestamp", |v| {
            v.as_str()
                .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
                .map(|t| t.with_timezone(&Utc))
        })
    }

    /// Reads a mapping of scalars, rendering each value as a string.
    ///
    /// Entries keep document order. `null` renders as the empty string;
    /// nested mappings or sequences are a type mismatch.
    pub fn get_string_map(&self, path: &str) -> Result<Option<Vec<(String, String)>>> {
        self.typed(path, "a mapping of scalars", |v| {
            v.as_object()?
                .iter()
                .map(|(key, value)| scalar_to_string(value).map(|s| (key.clone(), s)))
                .collect()
        })
    }

    /// Reads a sequence of scalars, rendering each item as a string.
    pub fn get_string_list(&self, path: &str) -> Result<Option<Vec<String>>> {
        self.typed(path, "a sequence of scalars", |v| {
            v.as_array()?.iter().map(scalar_to_string).collect()
        })
    }

    /// Returns the sub-document rooted at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`TypeMismatch`](ConfigError::TypeMismatch) if the value at
    /// `path` is not a mapping.
    pub fn section(&self, path: &str) -> Result<Option<ConfigDocument>> {
        self.typed(path, "a mapping", |v| {
            v.is_object().then(|| ConfigDocument::from_value(v.clone()))
        })
    }

    fn typed<T>(
        &self,
        path: &str,
        expected: &'static str,
        convert: impl FnOnce(&Value) -> Option<T>,
    ) -> Result<Option<T>> {
        let Some(value) = self.get(path) else {
            return Ok(None);
        };
        convert(value)
            .map(Some)
            .ok_or_else(|| ConfigError::TypeMismatch {
                path: path.to_string(),
                expected,
            })
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => Some(String::new()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.clone()),
        Value::Array(_) | Value::Object(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_yaml() -> &'static str {
        r#"
service:
  name: thumbnailer
  enabled: true
  retries: 3
  offset: -2
  ratio: 0.75
  timeout: 1h 30m
  poll: 45
  started: "2024-01-15T10:30:00+02:00"
  env:
    quality: 85
    strip: true
    label: ~
  hosts: [alpha, beta, 7]
  nested:
    deep:
      value: ok
"#
    }

    fn doc() -> ConfigDocument {
        ConfigDocument::from_yaml_str(sample_yaml()).unwrap()
    }

    #[test]
    fn test_scalar_getters() {
        let doc = doc();
        assert_eq!(doc.get_string("service.name").unwrap().as_deref(), Some("thumbnailer"));
        assert_eq!(doc.get_bool("service.enabled").unwrap(), Some(true));
        assert_eq!(doc.get_u64("service.retries").unwrap(), Some(3));
        assert_eq!(doc.get_i64("service.offset").unwrap(), Some(-2));
        assert_eq!(doc.get_f64("service.ratio").unwrap(), Some(0.75));
        assert_eq!(doc.get_f64("service.retries").unwrap(), Some(3.0));
    }

    #[test]
    fn test_absent_paths_are_none() {
        let doc = doc();
        assert_eq!(doc.get_string("service.nope").unwrap(), None);
        assert_eq!(doc.get_bool("nope.at.all").unwrap(), None);
        assert!(doc.section("service.nope").unwrap().is_none());
        assert!(!doc.contains("service.name.deeper"));
    }

    #[test]
    fn test_type_mismatch_names_path() {
        let err = doc().get_u64("service.offset").unwrap_err();
        match err {
            ConfigError::TypeMismatch { path, expected } => {
                assert_eq!(path, "service.offset");
                assert_eq!(expected, "a non-negative integer");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(doc().get_string("service.retries").is_err());
    }

    #[test]
    fn test_duration_from_text_and_seconds() {
        let doc = doc();
        assert_eq!(
            doc.get_duration("service.timeout").unwrap(),
            Some(Duration::from_secs(90 * 60))
        );
        assert_eq!(
            doc.get_duration("service.poll").unwrap(),
            Some(Duration::from_secs(45))
        );
        assert!(doc.get_duration("service.name").is_err());
    }

    #[test]
    fn test_time_is_normalised_to_utc() {
        let started = doc().get_time("service.started").unwrap().unwrap();
        assert_eq!(started.to_rfc3339(), "2024-01-15T08:30:00+00:00");
    }

    #[test]
    fn test_string_map_keeps_order_and_renders_scalars() {
        let env = doc().get_string_map("service.env").unwrap().unwrap();
        assert_eq!(
            env,
            vec![
                ("quality".to_string(), "85".to_string()),
                ("strip".to_string(), "true".to_string()),
                ("label".to_string(), String::new()),
            ]
        );
        assert!(doc().get_string_map("service.nested").is_err());
    }

    #[test]
    fn test_string_list_and_index_segments() {
        let doc = doc();
        assert_eq!(
            doc.get_string_list("service.hosts").unwrap().unwrap(),
            vec!["alpha", "beta", "7"]
        );
        assert_eq!(doc.get_string("service.hosts.1").unwrap().as_deref(), Some("beta"));
        assert_eq!(doc.get_string("service.hosts.9").unwrap(), None);
    }

    #[test]
    fn test_section_is_rooted_subdocument() {
        let nested = doc().section("service.nested").unwrap().unwrap();
        assert_eq!(nested.get_string("deep.value").unwrap().as_deref(), Some("ok"));
        assert!(doc().section("service.name").is_err());
    }

    #[test]
    fn test_empty_path_is_root() {
        let doc = ConfigDocument::from_json_str(r#"{"a": 1}"#).unwrap();
        assert_eq!(doc.get(""), Some(doc.root()));
    }
}
