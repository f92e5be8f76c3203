// crates/rr_cli/src/main.rs
//
// Wires up exit codes, typed error mapping, logging, balance loading and the
// per-subcommand evaluation. Every result is a JSON object on stdout carrying
// the `balance_id` of the constants that produced it.

mod args;

mod exitcodes {
    pub const OK: i32 = 0;
    pub const VALIDATION: i32 = 2;
    pub const IO: i32 = 4;
}

use std::process::ExitCode;

use chrono::{DateTime, SecondsFormat, Utc};
use clap::Parser;
use serde_json::{json, Value};
use tracing::{debug, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use args::{Args, Command};

use rr_core::config::RulesConfig;
use rr_core::ids::BalanceId;
use rr_io::loader::{self, LoadedRules};
use rr_rules::eligibility::{
    booking_closes_at, classify_ticket_status, eligible_slots, evaluate_slot_eligibility,
    expected_attendance, is_booking_locked, slot_payout,
};
use rr_rules::market::{anti_snipe_extension, auction_timing, bid_quote, is_acceptable_bid, settle_sale};
use rr_rules::{
    aggregate_votes, classify_stage, compute_adjusted_quality, format_minutes, next_stage_gap,
    quality_tier, rank_subjects, stage_by_name, tally_for,
};

/// Central error type for CLI → exit-code mapping.
#[derive(Debug)]
enum MainError {
    /// Bad arguments, rejected balance config, malformed input documents.
    Validation(String),
    /// Read/path/limit failures.
    Io(String),
}

impl std::fmt::Display for MainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MainError::Validation(m) => write!(f, "validation: {m}"),
            MainError::Io(m) => write!(f, "io: {m}"),
        }
    }
}

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(a) => a,
        Err(e) => {
            // --help / --version also come through here, on stdout.
            let rc = if e.use_stderr() { exitcodes::VALIDATION } else { exitcodes::OK };
            let _ = e.print();
            return ExitCode::from(rc as u8);
        }
    };

    init_logging(args.verbose, args.quiet);

    if let Err(e) = args::validate(&args) {
        eprintln!("rr: error: {e}");
        return ExitCode::from(exitcodes::VALIDATION as u8);
    }

    let rc = match run(&args) {
        Ok(()) => exitcodes::OK,
        Err(e) => {
            eprintln!("rr: error: {e}");
            map_error(&e)
        }
    };
    ExitCode::from(rc as u8)
}

/// stderr-only subscriber. Flags win over RUST_LOG; RUST_LOG wins over the default.
fn init_logging(verbose: bool, quiet: bool) {
    let filter = if verbose {
        EnvFilter::new("rr_cli=debug,rr_io=debug")
    } else if quiet {
        EnvFilter::new("warn")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("rr_cli=info,rr_io=info"))
    };
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init();
}

fn map_error(e: &MainError) -> i32 {
    match e {
        MainError::Validation(_) => exitcodes::VALIDATION,
        MainError::Io(_) => exitcodes::IO,
    }
}

/// Translate rr_io::IoError into MainError buckets for exit-code mapping.
fn map_rrio_err(e: rr_io::IoError) -> MainError {
    use rr_io::IoError::*;
    match e {
        Json { pointer, msg } => MainError::Validation(format!("json {pointer}: {msg}")),
        Invalid(m) => MainError::Validation(format!("invalid: {m}")),
        Hash(m) => MainError::Validation(format!("hash: {m}")),

        Read(e) => MainError::Io(format!("read: {e}")),
        Path(m) => MainError::Io(format!("path: {m}")),
        Limit(m) => MainError::Io(format!("limit: {m}")),
    }
}

fn load_balance(args: &Args) -> Result<LoadedRules, MainError> {
    match &args.rules {
        Some(path) => {
            let loaded = loader::load_rules_from_path(path).map_err(map_rrio_err)?;
            info!(
                path = %path.display(),
                balance_id = loaded.balance_id.as_ref().map(BalanceId::as_str).unwrap_or("-"),
                "using balance file"
            );
            Ok(loaded)
        }
        None => {
            let config = RulesConfig::default();
            let balance_id = loader::fingerprint(&config).ok();
            Ok(LoadedRules { config, balance_id })
        }
    }
}

fn run(args: &Args) -> Result<(), MainError> {
    let LoadedRules { config: cfg, balance_id } = load_balance(args)?;
    let body = evaluate(&args.command, args, &cfg)?;
    emit(balance_id.as_ref(), body)
}

fn evaluate(command: &Command, args: &Args, cfg: &RulesConfig) -> Result<Value, MainError> {
    let body = match command {
        Command::Quality { base, skills } => {
            debug!(base, contributors = skills.len(), "quality");
            let result = compute_adjusted_quality(*base, skills, &cfg.quality);
            let tier = quality_tier(result.multiplier);
            json!({ "base_quality": base, "result": result, "tier": tier.label() })
        }

        Command::Stage { minutes: Some(minutes), .. } => {
            let stage = classify_stage(*minutes, &cfg.progression);
            let gap = next_stage_gap(*minutes, &cfg.progression);
            // Saturating cast: negative and NaN render as 0m.
            let practiced = format_minutes(*minutes as u64);
            json!({ "total_minutes": minutes, "practiced": practiced, "stage": stage, "next": gap })
        }
        Command::Stage { minutes: None, name } => {
            let name = name.as_deref().unwrap_or_default();
            let stage = stage_by_name(name, &cfg.progression)
                .ok_or_else(|| MainError::Validation(format!("unknown stage: {name}")))?;
            json!({ "stage": stage })
        }

        Command::Bid { starting, current, amount } => {
            let quote = bid_quote(*current, *starting, &cfg.market);
            let acceptable = amount.map(|a| is_acceptable_bid(a, *current, *starting, &cfg.market));
            json!({ "quote": quote, "amount": amount, "acceptable": acceptable })
        }

        Command::Settle { price } => {
            json!({ "sale_price": price, "settlement": settle_sale(*price, &cfg.market) })
        }

        Command::Auction { end, now, bid_at } => {
            let now = now.unwrap_or_else(Utc::now);
            let timing = auction_timing(*end, now, &cfg.market);
            let extended = bid_at.and_then(|at| anti_snipe_extension(*end, at, &cfg.market));
            json!({
                "end": rfc3339(*end),
                "now": rfc3339(now),
                "timing": timing,
                "extended_end": extended.map(rfc3339),
            })
        }

        Command::Slot { fame, prestige, slot, base_payment, base_attendance, capacity, gig_start, now } => {
            let selected: Vec<_> = match slot {
                Some(id) => {
                    let s = cfg
                        .slots
                        .get(id)
                        .ok_or_else(|| MainError::Validation(format!("unknown slot: {id}")))?;
                    vec![s]
                }
                None => cfg.slots.iter().collect(),
            };
            let now = now.unwrap_or_else(Utc::now);
            let evaluated: Vec<Value> = selected
                .into_iter()
                .map(|s| {
                    let gate = evaluate_slot_eligibility(*fame, *prestige, s);
                    json!({
                        "reasons": gate.unmet_reasons(),
                        "eligibility": gate,
                        "payout": base_payment.map(|p| slot_payout(p, s)),
                        "expected_attendance": base_attendance
                            .map(|a| expected_attendance(a, capacity.unwrap_or(u64::MAX), s)),
                        "booking_closes_at": gig_start.map(|g| rfc3339(booking_closes_at(g, s))),
                        "booking_locked": gig_start.map(|g| is_booking_locked(g, now, s)),
                    })
                })
                .collect();
            let bookable: Vec<&str> = eligible_slots(*fame, *prestige, &cfg.slots)
                .into_iter()
                .map(|s| s.slot_id.as_str())
                .collect();
            json!({ "fame": fame, "prestige": prestige, "eligible_slots": bookable, "slots": evaluated })
        }

        Command::Tickets { sold, predicted, capacity } => {
            json!({ "status": classify_ticket_status(*sold, *predicted, *capacity, &cfg.tickets) })
        }

        Command::Votes { input, subject } => {
            let batch = loader::load_votes_from_path(input).map_err(map_rrio_err)?;
            let tallies = aggregate_votes(&batch.votes, &batch.privileged_voters, &cfg.voting);
            debug!(subjects = tallies.len(), "votes aggregated");
            match subject {
                Some(id) => json!({ "subject_id": id.as_str(), "tally": tally_for(&tallies, id) }),
                None => {
                    let ranked: Vec<Value> = rank_subjects(&tallies)
                        .into_iter()
                        .map(|(id, t)| json!({ "subject_id": id.as_str(), "tally": t }))
                        .collect();
                    json!({ "votes": batch.votes.len(), "ranking": ranked })
                }
            }
        }

        Command::Balance => {
            let source = args
                .rules
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "builtin".to_string());
            json!({ "source": source, "config": cfg })
        }
    };
    Ok(body)
}

fn rfc3339(t: DateTime<Utc>) -> String {
    t.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Pretty JSON on stdout with the balance fingerprint attached.
fn emit(balance_id: Option<&BalanceId>, mut body: Value) -> Result<(), MainError> {
    if let Value::Object(map) = &mut body {
        map.insert(
            "balance_id".to_string(),
            balance_id.map_or(Value::Null, |id| Value::String(id.as_str().to_string())),
        );
    }
    let text = serde_json::to_string_pretty(&body).map_err(|e| MainError::Io(format!("encode: {e}")))?;
    println!("{text}");
    Ok(())
}
