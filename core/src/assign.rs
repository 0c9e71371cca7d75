//! `name=value` assignment parsing for building flag and alias sets from
//! user input.

use thiserror::Error;

use crate::{AliasMap, SWITCH_ON, SpecifiedFlags};

/// Malformed `name=value` assignment or flag name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssignmentError {
    /// Nothing before the `=`.
    #[error("flag name is empty in {0:?}")]
    EmptyName(String),
    /// Name carries a dash prefix; names are given bare.
    #[error("flag names are given without dashes: {0:?}")]
    DashedName(String),
    /// Short spelling already registered for another long name.
    #[error("short name {short:?} is already the alias of {long:?}")]
    DuplicateShort { short: String, long: String },
}

/// Checks that `name` is usable as a bare flag name: non-empty and without
/// a leading dash.
///
/// # Examples
///
/// ```
/// use flag_merge_core::validate_name;
///
/// assert_eq!(validate_name("a=b").unwrap(), "a=b");
/// assert!(validate_name("").is_err());
/// assert!(validate_name("-f").is_err());
/// ```
pub fn validate_name(name: &str) -> Result<&str, AssignmentError> {
    if name.is_empty() {
        return Err(AssignmentError::EmptyName(name.to_string()));
    }
    if name.starts_with('-') {
        return Err(AssignmentError::DashedName(name.to_string()));
    }
    Ok(name)
}

/// Splits `raw` at the first `=`.
///
/// A bare `name` yields `(name, None)`. Names must be non-empty and must not
/// start with a dash.
///
/// # Examples
///
/// ```
/// use flag_merge_core::parse_assignment;
///
/// assert_eq!(parse_assignment("quality=85").unwrap(), ("quality", Some("85")));
/// assert_eq!(parse_assignment("define=a=b").unwrap(), ("define", Some("a=b")));
/// assert_eq!(parse_assignment("strip").unwrap(), ("strip", None));
/// assert!(parse_assignment("--strip").is_err());
/// ```
pub fn parse_assignment(raw: &str) -> Result<(&str, Option<&str>), AssignmentError> {
    let (name, value) = match raw.split_once('=') {
        Some((name, value)) => (name, Some(value)),
        None => (raw, None),
    };
    if name.is_empty() {
        return Err(AssignmentError::EmptyName(raw.to_string()));
    }
    if name.starts_with('-') {
        return Err(AssignmentError::DashedName(raw.to_string()));
    }
    Ok((name, value))
}

impl SpecifiedFlags {
    /// Builds a flag set from `name=value` assignments.
    ///
    /// A bare `name` is a switch turned on. Later assignments to the same
    /// name replace earlier ones.
    ///
    /// # Examples
    ///
    /// ```
    /// use flag_merge_core::SpecifiedFlags;
    ///
    /// let flags = SpecifiedFlags::from_assignments(["quality=85", "strip"]).unwrap();
    /// assert_eq!(flags.to_tokens(), vec!["--quality", "85", "--strip"]);
    /// ```
    pub fn from_assignments<I, S>(assignments: I) -> Result<Self, AssignmentError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut flags = Self::new();
        for raw in assignments {
            let (name, value) = parse_assignment(raw.as_ref())?;
            flags.insert(name, value.unwrap_or(SWITCH_ON));
        }
        Ok(flags)
    }
}

impl AliasMap {
    /// Registers `short` as the short spelling of `long`, rejecting names
    /// the merge could not look up unambiguously.
    ///
    /// `long` must be a valid flag name, `short` must not start with a dash,
    /// and a non-empty `short` must not already belong to another long name.
    ///
    /// # Examples
    ///
    /// ```
    /// use flag_merge_core::{AliasMap, AssignmentError};
    ///
    /// let mut aliases = AliasMap::new();
    /// aliases.insert_checked("interlace", "i").unwrap();
    /// assert_eq!(
    ///     aliases.insert_checked("input", "i"),
    ///     Err(AssignmentError::DuplicateShort {
    ///         short: "i".to_string(),
    ///         long: "interlace".to_string(),
    ///     })
    /// );
    /// ```
    pub fn insert_checked(&mut self, long: &str, short: &str) -> Result<(), AssignmentError> {
        validate_name(long)?;
        if short.starts_with('-') {
            return Err(AssignmentError::DashedName(short.to_string()));
        }
        if !short.is_empty() {
            let taken = self
                .iter()
                .find(|(other, spelling)| *spelling == short && *other != long);
            if let Some((other, _)) = taken {
                return Err(AssignmentError::DuplicateShort {
                    short: short.to_string(),
                    long: other.to_string(),
                });
            }
        }
        self.insert(long, short);
        Ok(())
    }

    /// Builds an alias map from `long=short` assignments.
    ///
    /// A bare `long` registers a flag without a short spelling.
    pub fn from_assignments<I, S>(assignments: I) -> Result<Self, AssignmentError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut aliases = Self::new();
        for raw in assignments {
            let (long, short) = parse_assignment(raw.as_ref())?;
            let short = short.unwrap_or_default();
            if short.starts_with('-') {
                return Err(AssignmentError::DashedName(raw.as_ref().to_string()));
            }
            aliases.insert_checked(long, short)?;
        }
        Ok(aliases)
    }
}
