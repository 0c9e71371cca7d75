//! Flag type definitions for command-line reconciliation.
//!
//! This module defines the data model shared by the merge and expand
//! operations: the ordered set of user-specified flags, the long/short alias
//! mapping, and the lead-marker split applied to raw command-line tokens.

use std::collections::HashMap;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Value marking a switch that is turned on.
pub const SWITCH_ON: &str = "true";

/// Value marking a switch that is turned off.
pub const SWITCH_OFF: &str = "false";

/// Returns `true` if `value` is one of the two boolean switch sentinels.
///
/// Any other string is an option value and is emitted after its flag.
///
/// # Examples
///
/// ```
/// use flag_merge_core::is_switch_value;
///
/// assert!(is_switch_value("true"));
/// assert!(is_switch_value("false"));
/// assert!(!is_switch_value("TRUE"));
/// assert!(!is_switch_value("0.05"));
/// ```
pub fn is_switch_value(value: &str) -> bool {
    value == SWITCH_ON || value == SWITCH_OFF
}

/// Renders a bare flag name as a command-line flag token.
///
/// Names longer than one character get a `--` prefix, single-character names
/// a `-` prefix.
///
/// # Examples
///
/// ```
/// use flag_merge_core::flag_token;
///
/// assert_eq!(flag_token("strip"), "--strip");
/// assert_eq!(flag_token("i"), "-i");
/// ```
pub fn flag_token(name: &str) -> String {
    if name.chars().count() > 1 {
        format!("--{name}")
    } else {
        format!("-{name}")
    }
}

/// A raw command-line token split into its lead marker and bare name.
///
/// The lead is `"--"`, `"-"`, or empty. An empty lead means the token is a
/// bare positional value rather than a flag.
///
/// # Examples
///
/// ```
/// use flag_merge_core::Token;
///
/// let token = Token::split("--sampling-factor");
/// assert_eq!(token.lead, "--");
/// assert_eq!(token.name, "sampling-factor");
/// assert!(token.is_flag());
///
/// let value = Token::split("4:2:0");
/// assert_eq!(value.lead, "");
/// assert!(!value.is_flag());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    /// Dash prefix that was stripped.
    pub lead: &'a str,
    /// Remainder after the dash prefix.
    pub name: &'a str,
}

impl<'a> Token<'a> {
    /// Splits `raw` into lead and name. `--` is checked before `-`, so
    /// `---x` yields lead `--` and name `-x`.
    pub fn split(raw: &'a str) -> Self {
        if let Some(name) = raw.strip_prefix("--") {
            Self { lead: "--", name }
        } else if let Some(name) = raw.strip_prefix('-') {
            Self { lead: "-", name }
        } else {
            Self {
                lead: "",
                name: raw,
            }
        }
    }

    /// Returns `true` if the token carried a dash prefix.
    pub fn is_flag(&self) -> bool {
        !self.lead.is_empty()
    }
}

/// Returns `true` if `raw` starts with a dash.
pub(crate) fn looks_like_flag(raw: &str) -> bool {
    raw.starts_with('-')
}

/// Flags explicitly specified for the current invocation.
///
/// An ordered mapping from bare flag name (no leading dash) to its value.
/// Iteration follows insertion order; inserting an existing name replaces
/// its value without moving it.
///
/// # Examples
///
/// ```
/// use flag_merge_core::SpecifiedFlags;
///
/// let mut flags = SpecifiedFlags::new();
/// flags.insert("gaussian-blur", "0.05");
/// flags.insert("i", "plane");
/// flags.switch("strip");
///
/// assert_eq!(
///     flags.to_tokens(),
///     vec!["--gaussian-blur", "0.05", "-i", "plane", "--strip"]
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpecifiedFlags {
    entries: IndexMap<String, String>,
}

impl SpecifiedFlags {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the value for `name`.
    ///
    /// Returns the previous value, if any.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.entries.insert(name.into(), value.into())
    }

    /// Inserts `name` as a switch turned on.
    pub fn switch(&mut self, name: impl Into<String>) -> Option<String> {
        self.insert(name, SWITCH_ON)
    }

    /// Adds a flag and returns the set, for chained construction.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// Returns the value for `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    /// Returns `true` if `name` was specified.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Iterates over `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Iterates over flag names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Returns the number of flags.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no flags were specified.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Adds every flag from `other` that is not already present.
    ///
    /// Existing values win; new names are appended in `other`'s order.
    pub fn fill_from(&mut self, other: &SpecifiedFlags) {
        for (name, value) in other.iter() {
            if !self.contains(name) {
                self.insert(name, value);
            }
        }
    }

    /// Flattens the set into command-line tokens.
    ///
    /// Each entry becomes its flag token, followed by its value unless the
    /// value is a switch sentinel.
    pub fn to_tokens(&self) -> Vec<String> {
        let mut tokens = Vec::with_capacity(self.entries.len() * 2);
        for (name, value) in &self.entries {
            tokens.push(flag_token(name));
            if !is_switch_value(value) {
                tokens.push(value.clone());
            }
        }
        tokens
    }
}

impl<K, V> FromIterator<(K, V)> for SpecifiedFlags
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut flags = Self::new();
        for (name, value) in iter {
            flags.insert(name, value);
        }
        flags
    }
}

/// Long-name to short-name aliases.
///
/// Each entry maps a flag's long name to its short name, or to the empty
/// string when the flag has no short spelling. Lookups through
/// [`counterpart`](AliasMap::counterpart) work in both directions.
///
/// # Examples
///
/// ```
/// use flag_merge_core::AliasMap;
///
/// let aliases: AliasMap = [("dry-run", "D"), ("strip", "")].into_iter().collect();
///
/// assert_eq!(aliases.counterpart("dry-run"), Some("D"));
/// assert_eq!(aliases.counterpart("D"), Some("dry-run"));
/// assert_eq!(aliases.counterpart("strip"), None);
/// assert_eq!(aliases.counterpart("quality"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AliasMap {
    entries: IndexMap<String, String>,
}

impl AliasMap {
    /// Creates an empty alias map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `short` as the short spelling of `long`.
    ///
    /// Accepts a short spelling already used by another long name; lookups
    /// then resolve it to the first. Use
    /// [`insert_checked`](AliasMap::insert_checked) to reject that.
    pub fn insert(&mut self, long: impl Into<String>, short: impl Into<String>) -> Option<String> {
        self.entries.insert(long.into(), short.into())
    }

    /// Returns the short spelling registered for `long`.
    pub fn short_for(&self, long: &str) -> Option<&str> {
        self.entries
            .get(long)
            .map(String::as_str)
            .filter(|short| !short.is_empty())
    }

    /// Returns the other spelling of `name`, looking in both directions.
    pub fn counterpart(&self, name: &str) -> Option<&str> {
        if let Some(short) = self.short_for(name) {
            return Some(short);
        }
        self.entries
            .iter()
            .find(|(_, short)| !short.is_empty() && short.as_str() == name)
            .map(|(long, _)| long.as_str())
    }

    /// Iterates over `(long, short)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns the number of long names registered.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no aliases are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Builds the undirected lookup used during a merge.
    ///
    /// Contains `long → short` and `short → long` for every entry with a
    /// non-empty short name. Agrees with [`counterpart`](AliasMap::counterpart):
    /// a long name resolves to its own short spelling first, and a short
    /// spelling shared by several long names resolves to the first of them.
    pub fn bilateral(&self) -> HashMap<&str, &str> {
        let mut lookup = HashMap::with_capacity(self.entries.len() * 2);
        let pairs = || self.iter().filter(|(_, short)| !short.is_empty());
        for (long, short) in pairs() {
            lookup.insert(long, short);
        }
        for (long, short) in pairs() {
            lookup.entry(short).or_insert(long);
        }
        lookup
    }

    /// Returns every `(long, short)` pair where both spellings are keys of
    /// `specified`.
    ///
    /// # Examples
    ///
    /// ```
    /// use flag_merge_core::{AliasMap, SpecifiedFlags};
    ///
    /// let aliases: AliasMap = [("interlace", "i")].into_iter().collect();
    /// let specified: SpecifiedFlags =
    ///     [("interlace", "line"), ("i", "plane")].into_iter().collect();
    ///
    /// assert_eq!(
    ///     aliases.conflicts(&specified),
    ///     vec![("interlace".to_string(), "i".to_string())]
    /// );
    /// ```
    pub fn conflicts(&self, specified: &SpecifiedFlags) -> Vec<(String, String)> {
        self.iter()
            .filter(|(long, short)| {
                !short.is_empty() && specified.contains(long) && specified.contains(short)
            })
            .map(|(long, short)| (long.to_string(), short.to_string()))
            .collect()
    }
}

impl<K, V> FromIterator<(K, V)> for AliasMap
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut aliases = Self::new();
        for (long, short) in iter {
            aliases.insert(long, short);
        }
        aliases
    }
}
