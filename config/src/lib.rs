//! Configuration access and merge profiles.
//!
//! This crate supplies the configured half of a flag merge:
//!
//! - [`ConfigDocument`] reads YAML or JSON and answers typed lookups keyed by
//!   dotted path (strings, booleans, numbers, durations, timestamps, scalar
//!   mappings and lists, sub-sections).
//! - [`Profile`] reads one named section describing an external program,
//!   its positional arguments, flag aliases and default tokens, and merges
//!   user-specified flags over it, checking them against the profile's
//!   [`ConstraintSet`] first.
//!
//! # Quick start
//!
//! ```no_run
//! use flag_merge_config::{ConfigDocument, Profile};
//! use flag_merge_core::SpecifiedFlags;
//!
//! let doc = ConfigDocument::load("flag-merge.yml").unwrap();
//! let profile = Profile::load(&doc, "convert").unwrap();
//!
//! let specified = SpecifiedFlags::from_assignments(["quality=92"]).unwrap();
//! println!("{}", profile.invocation(&specified).join(" "));
//! ```

mod constraint;
mod document;
mod error;
mod profile;

pub use constraint::{Constraint, ConstraintSet, NUMBER_PATTERN};
pub use document::ConfigDocument;
pub use error::{ConfigError, Result};
pub use profile::Profile;
