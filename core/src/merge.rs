//! Flag merging with specified-over-secondary precedence.
//!
//! [`merge`] reconciles the flags a user specified for this invocation with
//! a pre-existing token stream (a profile, a prior invocation). Specified
//! flags always win; secondary flags survive only when neither of their
//! spellings was specified. [`expand`] then wraps the merged flags with the
//! positional arguments of the final command line.
//!
//! # Example
//!
//! ```
//! use flag_merge_core::*;
//!
//! let specified = SpecifiedFlags::new().with("dry-run", "true");
//! let aliases: AliasMap = [("dry-run", "D")].into_iter().collect();
//! let secondary = vec!["-D".to_string(), "--strip".to_string()];
//!
//! let merged = merge(&specified, &aliases, &secondary);
//! assert_eq!(merged, vec!["--dry-run", "--strip"]);
//!
//! let argv = expand(&["in.jpg".to_string()], &merged, &["out.jpg".to_string()]);
//! assert_eq!(argv, vec!["in.jpg", "--dry-run", "--strip", "out.jpg"]);
//! ```

use tracing::{debug, warn};

use crate::types::looks_like_flag;
use crate::{AliasMap, SpecifiedFlags, Token};

/// Merges `specified` over the `secondary` token stream.
///
/// The output starts with `specified` flattened in insertion order. Each
/// secondary flag is then appended, together with the value token that
/// immediately follows it, unless its name or its alias counterpart was
/// specified. Bare tokens that are not consumed as a value are always
/// appended.
///
/// A flag takes the next token as its value only if that token does not
/// start with a dash, so a negative number following a flag is read as a
/// separate flag.
///
/// Duplicates inside `secondary` are not collapsed against each other.
///
/// # Examples
///
/// ```
/// use flag_merge_core::*;
///
/// let specified = SpecifiedFlags::new().with("sampling-factor", "4:2:0");
/// let aliases: AliasMap = [("sampling-factor", "f")].into_iter().collect();
/// let secondary = vec!["-f".to_string(), "2x1".to_string()];
///
/// assert_eq!(
///     merge(&specified, &aliases, &secondary),
///     vec!["--sampling-factor", "4:2:0"]
/// );
/// ```
pub fn merge<S: AsRef<str>>(
    specified: &SpecifiedFlags,
    aliases: &AliasMap,
    secondary: &[S],
) -> Vec<String> {
    let mut merged = specified.to_tokens();
    if secondary.is_empty() {
        return merged;
    }

    for (long, short) in aliases.conflicts(specified) {
        warn!(%long, %short, "both spellings of a flag were specified");
    }

    let lookup = aliases.bilateral();
    let is_specified = |name: &str| {
        specified.contains(name)
            || lookup
                .get(name)
                .is_some_and(|other| specified.contains(other))
    };

    let mut cursor = 0;
    while cursor < secondary.len() {
        let raw = secondary[cursor].as_ref();
        let token = Token::split(raw);

        if !token.is_flag() {
            merged.push(raw.to_string());
            cursor += 1;
            continue;
        }

        let value: Option<&str> = secondary
            .get(cursor + 1)
            .map(|next| next.as_ref())
            .filter(|next| !looks_like_flag(next));
        cursor += if value.is_some() { 2 } else { 1 };

        if is_specified(token.name) {
            debug!(flag = raw, value, "secondary flag overridden by specified flag");
            continue;
        }

        merged.push(raw.to_string());
        if let Some(value) = value {
            merged.push(value.to_string());
        }
    }

    merged
}

/// Assembles a full command line from leading positionals, flags, and
/// trailing positionals.
///
/// Plain concatenation: nothing is reordered, deduplicated, or checked.
///
/// # Examples
///
/// ```
/// use flag_merge_core::expand;
///
/// let empty: Vec<String> = Vec::new();
/// assert!(expand(&empty, &empty, &empty).is_empty());
///
/// let argv = expand(&["a"], &["--b", "c"], &["d"]);
/// assert_eq!(argv, vec!["a", "--b", "c", "d"]);
/// ```
pub fn expand<B, F, A>(before: &[B], flags: &[F], after: &[A]) -> Vec<String>
where
    B: AsRef<str>,
    F: AsRef<str>,
    A: AsRef<str>,
{
    let mut argv = Vec::with_capacity(before.len() + flags.len() + after.len());
    argv.extend(before.iter().map(|t| t.as_ref().to_string()));
    argv.extend(flags.iter().map(|t| t.as_ref().to_string()));
    argv.extend(after.iter().map(|t| t.as_ref().to_string()));
    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|t| t.to_string()).collect()
    }

    fn fixture_aliases() -> AliasMap {
        [
            ("dry-run", "D"),
            ("sampling-factor", "f"),
            ("strip", ""),
            ("gaussian-blur", ""),
            ("interlace", "i"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_merge_short_secondary_suppressed_by_long_specified() {
        let specified = SpecifiedFlags::new().with("dry-run", "true");
        let merged = merge(&specified, &fixture_aliases(), &tokens(&["-D"]));
        assert_eq!(merged, vec!["--dry-run"]);
    }

    #[test]
    fn test_merge_long_secondary_suppressed_by_short_specified() {
        let specified = SpecifiedFlags::new().with("D", "true");
        let merged = merge(&specified, &fixture_aliases(), &tokens(&["--dry-run"]));
        assert_eq!(merged, vec!["-D"]);
    }

    #[test]
    fn test_merge_paired_value_suppressed_with_flag() {
        let specified = SpecifiedFlags::new().with("sampling-factor", "4:2:0");
        let merged = merge(&specified, &fixture_aliases(), &tokens(&["-f", "2x1"]));
        assert_eq!(merged, vec!["--sampling-factor", "4:2:0"]);
    }

    #[test]
    fn test_merge_mixed_precedence_alias_and_pairing() {
        let specified = SpecifiedFlags::new()
            .with("gaussian-blur", "0.05")
            .with("i", "plane");
        let secondary = tokens(&[
            "-D",
            "-f",
            "2x1",
            "--strip",
            "--gaussian-blur",
            "0.15",
            "--interlace",
            "line",
        ]);

        let merged = merge(&specified, &fixture_aliases(), &secondary);
        assert_eq!(
            merged,
            vec![
                "--gaussian-blur",
                "0.05",
                "-i",
                "plane",
                "-D",
                "-f",
                "2x1",
                "--strip"
            ]
        );
    }

    #[test]
    fn test_merge_empty_secondary_is_flattened_specified() {
        let specified = SpecifiedFlags::new()
            .with("quality", "85")
            .with("strip", "true");
        let empty: Vec<String> = Vec::new();
        assert_eq!(
            merge(&specified, &fixture_aliases(), &empty),
            specified.to_tokens()
        );
    }

    #[test]
    fn test_merge_single_trailing_flag_is_unpaired() {
        let merged = merge(
            &SpecifiedFlags::new(),
            &AliasMap::new(),
            &tokens(&["--verbose"]),
        );
        assert_eq!(merged, vec!["--verbose"]);
    }

    #[test]
    fn test_merge_bare_tokens_always_pass_through() {
        let specified = SpecifiedFlags::new().with("input.jpg", "true");
        let merged = merge(&specified, &AliasMap::new(), &tokens(&["input.jpg", "out.jpg"]));
        assert_eq!(merged, vec!["--input.jpg", "input.jpg", "out.jpg"]);
    }

    #[test]
    fn test_merge_duplicate_secondary_flags_pass_through() {
        let secondary = tokens(&["--define", "a=1", "--define", "b=2"]);
        let merged = merge(&SpecifiedFlags::new(), &AliasMap::new(), &secondary);
        assert_eq!(merged, secondary);
    }

    #[test]
    fn test_merge_negative_value_is_not_paired() {
        let specified = SpecifiedFlags::new().with("offset", "3");
        let secondary = tokens(&["--offset", "-5"]);
        let merged = merge(&specified, &AliasMap::new(), &secondary);
        assert_eq!(merged, vec!["--offset", "3", "-5"]);
    }

    #[test]
    fn test_merge_triple_dash_keeps_inner_dash_in_name() {
        let specified = SpecifiedFlags::new().with("x", "true");
        let merged = merge(&specified, &AliasMap::new(), &tokens(&["---x"]));
        assert_eq!(merged, vec!["-x", "---x"]);
    }

    #[test]
    fn test_merge_contradictory_spellings_emit_both() {
        let aliases: AliasMap = [("interlace", "i")].into_iter().collect();
        let specified = SpecifiedFlags::new()
            .with("interlace", "line")
            .with("i", "plane");
        let merged = merge(&specified, &aliases, &tokens(&["-i", "none"]));
        assert_eq!(merged, vec!["--interlace", "line", "-i", "plane"]);
    }

    #[test]
    fn test_merge_shared_short_follows_first_long() {
        let aliases: AliasMap = [("interlace", "i"), ("input", "i")].into_iter().collect();
        let specified = SpecifiedFlags::new().with("interlace", "line");
        let merged = merge(&specified, &aliases, &tokens(&["-i", "plane"]));
        assert_eq!(merged, vec!["--interlace", "line"]);
    }

    #[test]
    fn test_merge_empty_name_is_suppressed_when_specified() {
        let specified = SpecifiedFlags::new().with("", "x");
        let merged = merge(&specified, &AliasMap::new(), &tokens(&["--", "-", "a"]));
        assert_eq!(merged, vec!["-", "x"]);
    }

    #[test]
    fn test_merge_empty_name_passes_when_not_specified() {
        let merged = merge(&SpecifiedFlags::new(), &AliasMap::new(), &tokens(&["--", "a"]));
        assert_eq!(merged, vec!["--", "a"]);
    }

    #[test]
    fn test_expand_preserves_order_and_length() {
        let argv = expand(
            &tokens(&["convert", "in.jpg"]),
            &tokens(&["--strip"]),
            &tokens(&["out.jpg"]),
        );
        assert_eq!(argv, vec!["convert", "in.jpg", "--strip", "out.jpg"]);
    }
}
