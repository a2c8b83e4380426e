//! sharelatex-git: mirror a ShareLaTeX project into a local git repository.
//!
//! # Usage
//!
//! ```text
//! sharelatex-git [ID] [--dir <PATH>] [--on-conflict prompt|saved|supplied|error]
//!                [--flatten] [--message <MSG>] [--url-template <URL>]
//!                [--no-color] [--no-timestamps]
//! ```
//!
//! `ID` may be omitted once a previous run saved it in `.sharelatex-git`.

mod commands;

use std::fmt;
use std::str::FromStr;

use clap::Parser;

use commands::sync::SyncArgs;
use sharelatex_core::ConflictPolicy;
use sharelatex_sync::Logger;

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "sharelatex-git",
    version,
    about = "Download a ShareLaTeX project and commit it to a local git repository",
    long_about = None,
)]
struct Cli {
    #[command(flatten)]
    sync: SyncArgs,
}

// ---------------------------------------------------------------------------
// ConflictPolicy argument, parsed from CLI strings, converts to core type
// ---------------------------------------------------------------------------

/// Thin wrapper so clap can parse `ConflictPolicy` from CLI args.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConflictPolicyArg(pub ConflictPolicy);

impl FromStr for ConflictPolicyArg {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "prompt" => Ok(Self(ConflictPolicy::Prompt)),
            "saved" => Ok(Self(ConflictPolicy::PreferSaved)),
            "supplied" => Ok(Self(ConflictPolicy::PreferSupplied)),
            "error" => Ok(Self(ConflictPolicy::Error)),
            other => Err(format!(
                "unknown conflict policy '{other}'; expected: prompt, saved, supplied, error"
            )),
        }
    }
}

impl fmt::Display for ConflictPolicyArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<ConflictPolicyArg> for ConflictPolicy {
    fn from(p: ConflictPolicyArg) -> Self {
        p.0
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let logger = Logger::new(cli.sync.log_style());
    if let Err(err) = cli.sync.run(&logger) {
        log::debug!("{err:?}");
        logger.fatal(&format!("{err:#}"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn conflict_policy_parses_case_insensitively() {
        let p: ConflictPolicyArg = "SAVED".parse().unwrap();
        assert_eq!(ConflictPolicy::from(p), ConflictPolicy::PreferSaved);
        assert!("sometimes".parse::<ConflictPolicyArg>().is_err());
    }

    #[test]
    fn id_is_optional() {
        let cli = Cli::try_parse_from(["sharelatex-git"]).unwrap();
        assert!(cli.sync.id.is_none());
        let cli = Cli::try_parse_from(["sharelatex-git", "abc123", "--on-conflict", "error"])
            .unwrap();
        assert_eq!(cli.sync.id.as_deref(), Some("abc123"));
        assert_eq!(ConflictPolicy::from(cli.sync.on_conflict), ConflictPolicy::Error);
    }
}
