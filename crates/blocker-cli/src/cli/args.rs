//! Command-line argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Check whether IP addresses, hostnames, or domains appear on reputation
/// blocklists
#[derive(Parser, Debug)]
#[command(name = "blocker")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the config file listing zones and sources
    #[arg(short, long, env = "BLOCKER_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Increase verbosity
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check one or more values against the selected blocklist channels
    Lookup(LookupArgs),

    /// Synchronize the text blocklist snapshot
    Sync(SyncArgs),
}

#[derive(Args, Debug)]
pub struct LookupArgs {
    /// IP addresses, hostnames, or domains to check
    #[arg(required = true)]
    pub values: Vec<String>,

    /// Check the synchronized text-based lists
    #[arg(short, long)]
    pub text_list: bool,

    /// Probe the DNS-based blocklist zones live
    #[arg(short, long)]
    pub dns_list: bool,
}

#[derive(Args, Debug)]
pub struct SyncArgs {
    /// Re-download even if the snapshot is still fresh
    #[arg(short, long)]
    pub force: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_args_parse() {
        let cli = Cli::try_parse_from([
            "blocker",
            "lookup",
            "10.0.0.1",
            "bad.example.com",
            "--dns-list",
            "--text-list",
        ])
        .unwrap();
        match cli.command {
            Commands::Lookup(args) => {
                assert_eq!(args.values, vec!["10.0.0.1", "bad.example.com"]);
                assert!(args.dns_list);
                assert!(args.text_list);
            }
            Commands::Sync(_) => panic!("expected lookup"),
        }
    }

    #[test]
    fn test_lookup_requires_a_value() {
        assert!(Cli::try_parse_from(["blocker", "lookup"]).is_err());
    }

    #[test]
    fn test_sync_force_flag() {
        let cli = Cli::try_parse_from(["blocker", "sync", "--force"]).unwrap();
        match cli.command {
            Commands::Sync(args) => assert!(args.force),
            Commands::Lookup(_) => panic!("expected sync"),
        }
    }
}
