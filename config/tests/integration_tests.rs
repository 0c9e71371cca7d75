use std::fs;
use std::path::{Path, PathBuf};

use flag_merge_config::{ConfigDocument, ConfigError, Profile};
use flag_merge_core::{SpecifiedFlags, expand, merge};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn profiles_yaml() -> &'static str {
    r#"
convert:
  program: magick
  before: [input.jpg]
  after: [output.jpg]
  aliases:
    dry-run: D
    sampling-factor: f
    interlace: i
  args: ["-D", "-f", "2x1", "--interlace", "line"]
  timeout: 2m
"#
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

#[test]
fn test_load_yaml_by_extension() {
    let dir = tempfile::tempdir().unwrap();
    for name in ["profiles.yml", "profiles.YAML"] {
        let path = write(dir.path(), name, profiles_yaml());
        let doc = ConfigDocument::load(&path).unwrap();
        assert_eq!(
            doc.get_string("convert.program").unwrap().as_deref(),
            Some("magick")
        );
    }
}

#[test]
fn test_load_json_for_other_extensions() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(
        dir.path(),
        "profiles.json",
        r#"{"convert": {"program": "magick", "args": ["--strip"]}}"#,
    );
    let doc = ConfigDocument::load(&path).unwrap();
    let profile = Profile::load(&doc, "convert").unwrap();
    assert_eq!(profile.args, vec!["--strip"]);
}

#[test]
fn test_load_errors_are_classified() {
    let dir = tempfile::tempdir().unwrap();

    let missing = dir.path().join("absent.yml");
    assert!(matches!(
        ConfigDocument::load(&missing),
        Err(ConfigError::Io(_))
    ));

    let bad_yaml = write(dir.path(), "bad.yml", "convert: [unterminated");
    assert!(matches!(
        ConfigDocument::load(&bad_yaml),
        Err(ConfigError::Yaml(_))
    ));

    let bad_json = write(dir.path(), "bad.json", "{ not json");
    assert!(matches!(
        ConfigDocument::load(&bad_json),
        Err(ConfigError::Json(_))
    ));
}

// ---------------------------------------------------------------------------
// Profiles
// ---------------------------------------------------------------------------

#[test]
fn test_profile_command_line_matches_manual_pipeline() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "profiles.yml", profiles_yaml());
    let doc = ConfigDocument::load(&path).unwrap();
    let profile = Profile::load(&doc, "convert").unwrap();

    let specified = SpecifiedFlags::from_assignments(["sampling-factor=4:2:0", "dry-run"]).unwrap();
    let manual = expand(
        &profile.before,
        &merge(&specified, &profile.aliases, &profile.secondary_tokens()),
        &profile.after,
    );

    assert_eq!(profile.command_line(&specified), manual);
    assert_eq!(
        manual,
        vec![
            "input.jpg",
            "--sampling-factor",
            "4:2:0",
            "--dry-run",
            "--interlace",
            "line",
            "output.jpg",
        ]
    );
}

#[test]
fn test_profile_extra_keys_remain_readable() {
    let doc = ConfigDocument::from_yaml_str(profiles_yaml()).unwrap();
    let section = doc.section("convert").unwrap().unwrap();
    assert_eq!(
        section.get_duration("timeout").unwrap().map(|d| d.as_secs()),
        Some(120)
    );
    assert!(Profile::from_section("convert", &section).is_ok());
}

#[test]
fn test_profile_alias_conflicts() {
    let doc = ConfigDocument::from_yaml_str(profiles_yaml()).unwrap();
    let profile = Profile::load(&doc, "convert").unwrap();
    let specified = SpecifiedFlags::from_assignments(["interlace=plane", "i=none"]).unwrap();

    assert_eq!(
        profile.alias_conflicts(&specified),
        vec![("interlace".to_string(), "i".to_string())]
    );
}
