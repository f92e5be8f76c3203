// crates/rr_cli/src/args.rs
//
// Offline CLI argument surface.
// - One subcommand per rule family; globals: --rules, --verbose, --quiet
// - No networked paths (reject any scheme:// like http/https/file)
// - Timestamps are RFC 3339; the wall clock is read only when --now is omitted

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};

use rr_core::ids::{SlotId, SubjectId};
use rr_core::Money;

/// Parsed CLI arguments.
#[derive(Debug, Parser, Clone)]
#[command(
    name = "rr",
    version,
    disable_help_subcommand = true,
    about = "Offline, deterministic evaluator for the music-career game rules"
)]
pub struct Args {
    /// Balance configuration JSON (defaults to the built-in reference balance).
    #[arg(long, global = true)]
    pub rules: Option<PathBuf>,

    /// Debug-level diagnostics on stderr.
    #[arg(long, short = 'v', global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Warnings only on stderr.
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Skill-scaled quality of a cover recording.
    Quality {
        /// Base quality of the source song.
        #[arg(long)]
        base: u32,
        /// Contributor skill levels (comma-separated or repeated).
        #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
        skills: Vec<f64>,
    },

    /// Rehearsal stage for accumulated minutes, or a stage looked up by name.
    Stage {
        #[arg(long, allow_negative_numbers = true, required_unless_present = "name")]
        minutes: Option<f64>,
        #[arg(long, conflicts_with = "minutes")]
        name: Option<String>,
    },

    /// Minimum next bid and, with --amount, whether a bid is acceptable.
    Bid {
        #[arg(long)]
        starting: Money,
        #[arg(long)]
        current: Option<Money>,
        #[arg(long)]
        amount: Option<Money>,
    },

    /// Marketplace fee and seller payout for a completed sale.
    Settle {
        #[arg(long)]
        price: Money,
    },

    /// Auction countdown, ending-soon flag and anti-snipe extension.
    Auction {
        #[arg(long, value_parser = parse_rfc3339)]
        end: DateTime<Utc>,
        #[arg(long, value_parser = parse_rfc3339)]
        now: Option<DateTime<Utc>>,
        /// Time of an incoming bid; reports the extended end if it triggers anti-snipe.
        #[arg(long, value_parser = parse_rfc3339)]
        bid_at: Option<DateTime<Utc>>,
    },

    /// Slot gates for a band at a venue, plus payout/attendance/lockout when asked.
    Slot {
        #[arg(long)]
        fame: u64,
        #[arg(long)]
        prestige: u32,
        /// Evaluate a single slot (default: every slot in the table).
        #[arg(long)]
        slot: Option<SlotId>,
        #[arg(long)]
        base_payment: Option<Money>,
        #[arg(long)]
        base_attendance: Option<u64>,
        #[arg(long, requires = "base_attendance")]
        capacity: Option<u64>,
        #[arg(long, value_parser = parse_rfc3339)]
        gig_start: Option<DateTime<Utc>>,
        #[arg(long, value_parser = parse_rfc3339, requires = "gig_start")]
        now: Option<DateTime<Utc>>,
    },

    /// Ticket sales status against capacity and forecast.
    Tickets {
        #[arg(long)]
        sold: u64,
        #[arg(long, default_value_t = 0)]
        predicted: u64,
        #[arg(long)]
        capacity: u64,
    },

    /// Weighted tallies for a local vote batch.
    Votes {
        #[arg(long)]
        input: PathBuf,
        /// Report one subject (zeros when it has no votes).
        #[arg(long)]
        subject: Option<SubjectId>,
    },

    /// Print the effective balance configuration and its fingerprint.
    Balance,
}

/// Errors surfaced by argument validation (after clap parsing).
#[derive(Debug)]
pub enum CliError {
    NonLocalPath(String),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::NonLocalPath(p) => write!(f, "path must be local file (no scheme): {p}"),
        }
    }
}
impl std::error::Error for CliError {}

/// RFC 3339 timestamp, normalized to UTC.
pub fn parse_rfc3339(s: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(s.trim())
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| format!("expected RFC 3339 timestamp like 2024-06-01T18:00:00Z ({e})"))
}

/// Reject any explicit URI scheme (e.g., http://, https://, file://).
#[inline]
fn has_scheme(s: &str) -> bool {
    let lower = s.trim().to_ascii_lowercase();
    lower.contains("://") || lower.starts_with("http:") || lower.starts_with("https:") || lower.starts_with("file:")
}

#[inline]
fn ensure_local_path(p: &Path) -> Result<(), CliError> {
    if let Some(s) = p.to_str() {
        if has_scheme(s) {
            return Err(CliError::NonLocalPath(s.to_string()));
        }
    }
    Ok(())
}

fn iter_all_paths(args: &Args) -> impl Iterator<Item = &Path> {
    let input = match &args.command {
        Command::Votes { input, .. } => Some(input.as_path()),
        _ => None,
    };
    [args.rules.as_deref(), input].into_iter().flatten()
}

/// Scheme checks on every path-like flag of already-parsed args.
pub fn validate(args: &Args) -> Result<(), CliError> {
    for p in iter_all_paths(args) {
        ensure_local_path(p)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn clap_definition_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn rfc3339_is_normalized_to_utc() {
        let t = parse_rfc3339("2024-06-01T20:00:00+02:00").unwrap();
        assert_eq!(t, parse_rfc3339("2024-06-01T18:00:00Z").unwrap());
        assert!(parse_rfc3339("yesterday").is_err());
    }

    #[test]
    fn url_paths_are_rejected() {
        let args = Args::try_parse_from(["rr", "--rules", "https://example.com/b.json", "balance"]).unwrap();
        assert!(matches!(validate(&args), Err(CliError::NonLocalPath(_))));

        let args = Args::try_parse_from(["rr", "votes", "--input", "file:///tmp/v.json"]).unwrap();
        assert!(validate(&args).is_err());

        let args = Args::try_parse_from(["rr", "votes", "--input", "votes.json"]).unwrap();
        assert!(validate(&args).is_ok());
    }

    #[test]
    fn skills_accept_lists_and_negatives() {
        let args = Args::try_parse_from(["rr", "quality", "--base", "80", "--skills", "60,-10", "--skills", "90"]).unwrap();
        match args.command {
            Command::Quality { base, skills } => {
                assert_eq!(base, 80);
                assert_eq!(skills, vec![60.0, -10.0, 90.0]);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn stage_needs_minutes_or_name() {
        assert!(Args::try_parse_from(["rr", "stage"]).is_err());
        assert!(Args::try_parse_from(["rr", "stage", "--name", "Familiar"]).is_ok());
        assert!(Args::try_parse_from(["rr", "stage", "--minutes", "-5"]).is_ok());
    }

    #[test]
    fn globals_work_after_the_subcommand() {
        let args = Args::try_parse_from(["rr", "settle", "--price", "480", "--quiet"]).unwrap();
        assert!(args.quiet);
        assert!(Args::try_parse_from(["rr", "-v", "-q", "balance"]).is_err());
    }
}
