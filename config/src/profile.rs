//! Merge profiles: the configured side of a flag merge.
//!
//! A profile names an external program and the tokens that should be passed
//! to it unless the user overrides them.
//!
//! # Example YAML
//!
//! ```yaml
//! convert:
//!   program: magick
//!   before: ["input.jpg"]
//!   after: ["output.jpg"]
//!   aliases:
//!     sampling-factor: f
//!     dry-run: D
//!     strip: ""
//!   args: ["-D", "-f", "2x1", "--strip"]
//!   flags:
//!     quality: 85
//!   constraints:
//!     quality: { min: 1, max: 100 }
//! ```

use flag_merge_core::{
    AliasMap, FlagValidationError, SpecifiedFlags, expand, merge, validate_name,
};
use tracing::debug;

use crate::constraint::ConstraintSet;
use crate::document::ConfigDocument;
use crate::error::{ConfigError, Result};

/// Configured defaults for invoking one external program.
///
/// # Examples
///
/// ```
/// use flag_merge_config::{ConfigDocument, Profile};
/// use flag_merge_core::SpecifiedFlags;
///
/// let doc = ConfigDocument::from_yaml_str(r#"
/// convert:
///   program: magick
///   before: [in.jpg]
///   after: [out.jpg]
///   aliases: { dry-run: D }
///   args: ["-D", "--strip"]
/// "#).unwrap();
///
/// let profile = Profile::load(&doc, "convert").unwrap();
/// let specified = SpecifiedFlags::new().with("dry-run", "true");
///
/// assert_eq!(
///     profile.invocation(&specified),
///     vec!["magick", "in.jpg", "--dry-run", "--strip", "out.jpg"]
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Profile {
    /// Section name the profile was loaded from.
    pub name: String,
    /// Program to invoke.
    pub program: String,
    /// Positional arguments placed before the flags.
    pub before: Vec<String>,
    /// Positional arguments placed after the flags.
    pub after: Vec<String>,
    /// Long/short spellings of the program's flags.
    pub aliases: AliasMap,
    /// Raw secondary tokens.
    pub args: Vec<String>,
    /// Secondary flags given as a mapping, appended after `args`.
    pub flags: SpecifiedFlags,
    /// Rules checked against user-specified values.
    pub constraints: ConstraintSet,
}

impl Profile {
    /// Loads the profile stored under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`Missing`](ConfigError::Missing) if there is no such
    /// section, or any error from [`from_section`](Profile::from_section).
    pub fn load(doc: &ConfigDocument, name: &str) -> Result<Self> {
        let section = doc
            .section(name)?
            .ok_or_else(|| ConfigError::Missing(name.to_string()))?;
        Self::from_section(name, &section)
    }

    /// Reads a profile from an already-selected section.
    ///
    /// `program` is required; every other key defaults to empty.
    pub fn from_section(name: &str, section: &ConfigDocument) -> Result<Self> {
        let program = section
            .get_string("program")?
            .ok_or_else(|| ConfigError::Missing(format!("{name}.program")))?;

        let mut aliases = AliasMap::new();
        for (long, short) in section.get_string_map("aliases")?.unwrap_or_default() {
            aliases.insert_checked(&long, &short)?;
        }
        let mut flags = SpecifiedFlags::new();
        for (flag, value) in section.get_string_map("flags")?.unwrap_or_default() {
            validate_name(&flag)?;
            flags.insert(flag, value);
        }

        let profile = Self {
            name: name.to_string(),
            program,
            before: section.get_string_list("before")?.unwrap_or_default(),
            after: section.get_string_list("after")?.unwrap_or_default(),
            aliases,
            args: section.get_string_list("args")?.unwrap_or_default(),
            flags,
            constraints: ConstraintSet::from_section(section)?,
        };
        debug!(
            profile = name,
            program = %profile.program,
            aliases = profile.aliases.len(),
            args = profile.args.len(),
            flags = profile.flags.len(),
            "loaded merge profile"
        );
        Ok(profile)
    }

    /// The secondary token stream: `args` followed by the flattened `flags`.
    pub fn secondary_tokens(&self) -> Vec<String> {
        let mut tokens = self.args.clone();
        tokens.extend(self.flags.to_tokens());
        tokens
    }

    /// Merges `specified` over this profile and wraps the result with the
    /// profile's positional arguments. The program name is not included.
    pub fn command_line(&self, specified: &SpecifiedFlags) -> Vec<String> {
        let merged = merge(specified, &self.aliases, &self.secondary_tokens());
        expand(&self.before, &merged, &self.after)
    }

    /// Like [`command_line`](Profile::command_line), with the program first.
    pub fn invocation(&self, specified: &SpecifiedFlags) -> Vec<String> {
        let command_line = self.command_line(specified);
        let mut argv = Vec::with_capacity(command_line.len() + 1);
        argv.push(self.program.clone());
        argv.extend(command_line);
        argv
    }

    /// Checks `specified` against the profile's constraints.
    pub fn validate(&self, specified: &SpecifiedFlags) -> Vec<FlagValidationError> {
        self.constraints.check(specified, &self.aliases)
    }

    /// Pairs of `(long, short)` that `specified` sets under both spellings.
    pub fn alias_conflicts(&self, specified: &SpecifiedFlags) -> Vec<(String, String)> {
        self.aliases.conflicts(specified)
    }
}
