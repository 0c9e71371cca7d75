use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use flag_merge_config::{ConfigDocument, Profile};
use flag_merge_core::{AliasMap, FlagValidationError, SpecifiedFlags, expand, flag_token, merge};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Environment variable overriding the log filter.
const LOG_ENV: &str = "FLAG_MERGE_LOG";

#[derive(Debug, Parser)]
#[command(name = "flag-merge")]
#[command(about = "Merge user-specified flags over a configured command line")]
struct Cli {
    /// Log merge decisions to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Merge --set flags over the tokens given after `--`.
    Merge(MergeArgs),
    /// Print the full invocation for a configured profile.
    RunProfile(ProfileArgs),
    /// Check --set flags against a profile without printing a command line.
    Check(CheckArgs),
}

#[derive(Debug, Args)]
struct SpecifiedArgs {
    /// Specified flag as name=value, or a bare name for a switch.
    #[arg(long = "set", value_name = "NAME[=VALUE]")]
    set: Vec<String>,
}

impl SpecifiedArgs {
    fn specified(&self) -> Result<SpecifiedFlags, String> {
        SpecifiedFlags::from_assignments(&self.set).map_err(|e| e.to_string())
    }
}

#[derive(Debug, Args)]
struct MergeArgs {
    #[command(flatten)]
    specified: SpecifiedArgs,
    /// Alias as long=short, or a bare long name without a short spelling.
    #[arg(long = "alias", value_name = "LONG[=SHORT]")]
    aliases: Vec<String>,
    /// Positional argument placed before the merged flags.
    #[arg(long)]
    before: Vec<String>,
    /// Positional argument placed after the merged flags.
    #[arg(long)]
    after: Vec<String>,
    /// Print a JSON array instead of a shell line.
    #[arg(long)]
    json: bool,
    /// Secondary tokens.
    #[arg(last = true)]
    tokens: Vec<String>,
}

#[derive(Debug, Args)]
struct ProfileArgs {
    /// YAML or JSON file holding profiles.
    #[arg(long)]
    config: PathBuf,
    /// Profile section name.
    #[arg(long)]
    profile: String,
    #[command(flatten)]
    specified: SpecifiedArgs,
    /// Print a JSON array instead of a shell line.
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Args)]
struct CheckArgs {
    /// YAML or JSON file holding profiles.
    #[arg(long)]
    config: PathBuf,
    /// Profile section name.
    #[arg(long)]
    profile: String,
    #[command(flatten)]
    specified: SpecifiedArgs,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Command::Merge(args) => run_merge(args),
        Command::RunProfile(args) => run_profile(args),
        Command::Check(args) => run_check(args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run_merge(args: MergeArgs) -> Result<(), String> {
    let specified = args.specified.specified()?;
    let aliases = AliasMap::from_assignments(&args.aliases).map_err(|e| e.to_string())?;
    reject_conflicts(&aliases.conflicts(&specified))?;

    let merged = merge(&specified, &aliases, &args.tokens);
    debug!(
        specified = specified.len(),
        secondary = args.tokens.len(),
        merged = merged.len(),
        "merged flags"
    );
    print_tokens(&expand(&args.before, &merged, &args.after), args.json)
}

fn run_profile(args: ProfileArgs) -> Result<(), String> {
    let profile = load_profile(&args.config, &args.profile)?;
    let specified = args.specified.specified()?;
    reject_conflicts(&profile.alias_conflicts(&specified))?;
    reject_failures(&profile.validate(&specified))?;

    let argv = profile.invocation(&specified);
    debug!(profile = %profile.name, tokens = argv.len(), "assembled invocation");
    print_tokens(&argv, args.json)
}

fn run_check(args: CheckArgs) -> Result<(), String> {
    let profile = load_profile(&args.config, &args.profile)?;
    let specified = args.specified.specified()?;
    reject_conflicts(&profile.alias_conflicts(&specified))?;
    reject_failures(&profile.validate(&specified))?;

    println!(
        "{} flag(s) valid for profile '{}'.",
        specified.len(),
        profile.name
    );
    Ok(())
}

fn load_profile(config: &Path, name: &str) -> Result<Profile, String> {
    let doc = ConfigDocument::load(config)
        .map_err(|e| format!("Failed to load config '{}': {e}", config.display()))?;
    Profile::load(&doc, name).map_err(|e| format!("Failed to load profile '{name}': {e}"))
}

fn reject_conflicts(conflicts: &[(String, String)]) -> Result<(), String> {
    if conflicts.is_empty() {
        return Ok(());
    }
    let pairs: Vec<String> = conflicts
        .iter()
        .map(|(long, short)| format!("{}/{}", flag_token(long), flag_token(short)))
        .collect();
    Err(format!(
        "flag specified under both spellings: {}",
        pairs.join(", ")
    ))
}

fn reject_failures(failures: &[FlagValidationError]) -> Result<(), String> {
    if failures.is_empty() {
        return Ok(());
    }
    for failure in failures {
        eprintln!("invalid value: {failure}");
    }
    Err(format!("{} flag value(s) failed validation", failures.len()))
}

fn print_tokens(tokens: &[String], json: bool) -> Result<(), String> {
    if json {
        let raw = serde_json::to_string(tokens)
            .map_err(|e| format!("Failed to serialize tokens: {e}"))?;
        println!("{raw}");
    } else {
        let line: Vec<String> = tokens.iter().map(|t| shell_quote(t)).collect();
        println!("{}", line.join(" "));
    }
    Ok(())
}

/// Quotes `token` for a POSIX shell when it is empty or contains characters
/// the shell would interpret.
fn shell_quote(token: &str) -> String {
    let plain = !token.is_empty()
        && token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_=:.,/+@%".contains(c));
    if plain {
        token.to_string()
    } else {
        format!("'{}'", token.replace('\'', r"'\''"))
    }
}
