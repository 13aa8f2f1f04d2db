//! Midpoint CLI
//!
//! Usage:
//!   midpoint                                  # Interactive session
//!   midpoint --round 1000,, --vs 3000,,       # Evaluate a single round
//!   midpoint --score 50                       # Recovery score for a percentage
//!   midpoint --round 1000,, --vs ,150,24 --json

use anyhow::Context;
use clap::Parser;
use serde::Serialize;
use std::io::{self, BufRead, Write};
use tracing_subscriber::EnvFilter;

use midpoint::core::{
    apply_assignments, compute_recovery_score, parse_offer_triplet, render,
    NegotiationForm, NegotiationSession,
};
use midpoint::types::{NegotiationError, OfferDraft};
use midpoint::VERSION;

#[derive(Parser, Debug)]
#[command(
    name = "midpoint",
    version = VERSION,
    about = "Midpoint - track debt negotiation rounds and score the settlement",
    long_about = "Midpoint tracks offer/counter-offer rounds between a debtor and us.\n\n\
                  Each round records both total offers, the midpoint between them and\n\
                  who gained ground (a rising midpoint counts for us). The latest\n\
                  midpoint drives three suggested counter-offers. Once terms are\n\
                  agreed, the settlement summary reports recovery against principal\n\
                  and a 0-100 recovery score.\n\n\
                  Offers on the command line are written lump,monthly,months with\n\
                  empty slots left blank, e.g. 1000,, or ,150,24"
)]
struct Args {
    /// Debtor offer for a single round evaluation (lump,monthly,months)
    #[arg(long, requires = "vs", allow_hyphen_values = true)]
    round: Option<String>,

    /// Our offer for a single round evaluation (lump,monthly,months)
    #[arg(long, requires = "round", allow_hyphen_values = true)]
    vs: Option<String>,

    /// Print the recovery score for a recovery percentage
    #[arg(long, allow_hyphen_values = true)]
    score: Option<f64>,

    /// Interactive session (default when no other mode is given)
    #[arg(short, long)]
    interactive: bool,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Disable colors in output
    #[arg(long)]
    no_color: bool,

    /// Debug logging on stderr (RUST_LOG overrides)
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    if args.no_color {
        colored::control::set_override(false);
    }

    if let Some(pct) = args.score {
        run_score(pct, &args);
        Ok(())
    } else if let (Some(debtor), Some(ours)) = (&args.round, &args.vs) {
        run_single_round(debtor, ours, &args)
    } else {
        run_interactive(&args);
        Ok(())
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "midpoint=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("JSON encoding failed: {}", e),
    }
}

/// Recovery score for one percentage
fn run_score(pct: f64, args: &Args) {
    let score = compute_recovery_score(pct);
    if args.json {
        #[derive(Serialize)]
        struct ScoreOutput {
            recovery_percentage: f64,
            recovery_score: u8,
        }
        print_json(&ScoreOutput { recovery_percentage: pct, recovery_score: score });
    } else {
        println!("{} Overall Score: {}/100", render::score_bar(score), score);
    }
}

/// Evaluate one round as the first round of a fresh session
fn run_single_round(debtor: &str, ours: &str, args: &Args) -> anyhow::Result<()> {
    let debtor = parse_offer_triplet(debtor).context("debtor offer")?;
    let ours = parse_offer_triplet(ours).context("our offer")?;

    let mut session = NegotiationSession::new();
    let record = session.record_round(&debtor, &ours)?.clone();
    let midpoint = record.midpoint;

    if args.json {
        #[derive(Serialize)]
        struct RoundOutput<'a> {
            round: &'a midpoint::types::RoundRecord,
            suggestions: Option<&'a midpoint::types::SuggestedOfferSet>,
        }
        print_json(&RoundOutput { round: &record, suggestions: session.suggestions() });
    } else {
        println!("{}", render::render_round(&record));
        println!();
        if let Some(set) = session.suggestions() {
            print!("{}", render::render_suggestions(midpoint, set));
        }
    }
    Ok(())
}

// =============================================================================
// Interactive session
// =============================================================================

const HELP: &str = "\
Account:
  total <amount>             Total balance (locked after the first round)
  principal <amount>         Principal balance (locked after the first round)
Round:
  debtor key=value...        Debtor offer, keys: lump monthly months ('-' clears)
  ours key=value...          Our offer, same keys
  calc                       Calculate & record the round
  offers                     Show the current suggested counter-offers
  history                    Show all rounds
  chart                      Show negotiation progress
Settlement:
  loan <text>                Loan number
  date <text>                Settlement date
  settle key=value...        Final agreed offer, same keys as above
  finalize                   Finalize the settlement
  summary                    Show the settlement summary
Other:
  status                     Where things stand
  reset                      Clear everything and start over
  help                       This text
  quit | exit                Leave";

enum Flow {
    Continue,
    Quit,
}

fn run_interactive(args: &Args) {
    let mut session = NegotiationSession::new();
    let mut form = NegotiationForm::new();

    print_header();
    println!("Type 'help' for commands, 'quit' to exit.");
    println!();

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("{}", prompt(&session));
        if stdout.flush().is_err() {
            break;
        }

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(_) => break,
        }

        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match handle_command(line, &mut session, &mut form, args) {
            Flow::Continue => {}
            Flow::Quit => {
                println!("\nSession ended. Rounds: {}", session.history().len());
                break;
            }
        }
    }
}

fn print_header() {
    println!("========================================");
    println!("  Midpoint v{} - Negotiation Session", VERSION);
    println!("========================================");
    println!();
}

fn prompt(session: &NegotiationSession) -> String {
    if session.is_settled() {
        "[SETTLED] > ".to_string()
    } else {
        format!("[Round {}] > ", session.round_number())
    }
}

fn report<E: std::fmt::Display>(err: E) {
    use colored::Colorize;
    println!("{}", format!("Warning: {}", err).yellow());
}

fn handle_command(
    line: &str,
    session: &mut NegotiationSession,
    form: &mut NegotiationForm,
    args: &Args,
) -> Flow {
    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((c, r)) => (c, r.trim()),
        None => (line, ""),
    };

    match command.to_ascii_lowercase().as_str() {
        "quit" | "exit" => return Flow::Quit,
        "help" | "?" => println!("{}", HELP),

        "total" => match form.enter_total_balance(session, rest) {
            Ok(()) => println!("Total balance set."),
            Err(e) => report(e),
        },
        "principal" => match form.enter_principal_balance(session, rest) {
            Ok(()) => println!("Principal balance set."),
            Err(e) => report(e),
        },

        "debtor" | "ours" if session.is_settled() => report(NegotiationError::SessionAlreadySettled),
        "debtor" => edit_draft(&mut form.debtor, rest),
        "ours" => {
            edit_draft(&mut form.ours, rest);
            println!(
                "Calculated Total Offer: {}",
                render::format_currency(form.our_total_preview(), 2)
            );
        }
        "calc" => match form.calculate(session) {
            Ok(record) => {
                if args.json {
                    print_json(&record);
                } else {
                    println!("{}", render::render_round(&record));
                    println!();
                    if let Some(set) = session.suggestions() {
                        print!("{}", render::render_suggestions(record.midpoint, set));
                    }
                }
            }
            Err(e) => report(e),
        },
        "offers" => match (session.current_midpoint(), session.suggestions()) {
            (Some(midpoint), Some(set)) if !session.is_settled() => {
                if args.json {
                    print_json(set);
                } else {
                    print!("{}", render::render_suggestions(midpoint, set));
                }
            }
            _ => println!("No suggestions yet."),
        },
        "history" => {
            if args.json {
                print_json(&session.history());
            } else {
                print!("{}", render::render_history(session.history()));
                if session.history().is_empty() {
                    println!();
                }
            }
        }
        "chart" => {
            let series = session.chart_series();
            if args.json {
                print_json(&series);
            } else {
                print!("{}", render::render_chart(&series));
                if series.is_empty() {
                    println!();
                }
            }
        }

        "loan" => form.loan_number = rest.to_string(),
        "date" => form.settlement_date = rest.to_string(),
        "settle" => edit_draft(&mut form.settled, rest),
        "finalize" => match form.finalize(session) {
            Ok(summary) => {
                if args.json {
                    print_json(&summary);
                } else {
                    print!("{}", render::render_summary(&summary));
                }
            }
            Err(e) => report(e),
        },
        "summary" => match session.summary() {
            Some(summary) if args.json => print_json(summary),
            Some(summary) => print!("{}", render::render_summary(summary)),
            None => println!("Not settled yet."),
        },

        "status" => print!("{}", render::render_status(session, form)),
        "reset" => {
            form.reset(session);
            println!("Negotiation reset.");
        }

        other => report(format!("Unknown command '{}', type 'help'", other)),
    }
    Flow::Continue
}

fn edit_draft(draft: &mut OfferDraft, assignments: &str) {
    if let Err(e) = apply_assignments(draft, assignments) {
        report(e);
    }
}
