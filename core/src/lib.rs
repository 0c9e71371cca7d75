//! Core flag types and precedence-aware command-line merging.
//!
//! This crate reconciles the flags a user specified for an invocation with a
//! pre-existing token stream for the same external program:
//!
//! - [`SpecifiedFlags`]: ordered `name → value` flags that always win.
//! - [`AliasMap`]: long/short spellings, looked up in both directions.
//! - [`merge`]: flattens the specified flags and appends every secondary
//!   flag (with its value) that was not overridden under either spelling.
//! - [`expand`]: wraps merged flags with leading and trailing positionals.
//!
//! Callers that validate flag values report violations with
//! [`FlagValidationError`], raised by checkers such as [`in_range`] and
//! [`one_of`].
//!
//! # Example
//!
//! ```
//! use flag_merge_core::*;
//!
//! let specified = SpecifiedFlags::new()
//!     .with("gaussian-blur", "0.05")
//!     .with("i", "plane");
//! let aliases: AliasMap = [("dry-run", "D"), ("sampling-factor", "f"), ("interlace", "i")]
//!     .into_iter()
//!     .collect();
//! let secondary = ["-D", "-f", "2x1", "--gaussian-blur", "0.15", "--interlace", "line"];
//!
//! let merged = merge(&specified, &aliases, &secondary);
//! assert_eq!(
//!     merged,
//!     vec!["--gaussian-blur", "0.05", "-i", "plane", "-D", "-f", "2x1"]
//! );
//! ```

mod assign;
mod merge;
mod types;
pub mod validate;

pub use assign::{AssignmentError, parse_assignment, validate_name};
pub use merge::{expand, merge};
pub use types::*;
pub use validate::{
    FlagValidationError, at_least, at_most, greater_than, in_range, less_than, matches_pattern,
    none_of, not_in_range, not_matches_pattern, one_of,
};
