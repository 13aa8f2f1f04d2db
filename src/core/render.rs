//! Terminal rendering of rounds, counter-offers, the settlement and the chart
//!
//! Formatting only. Colors go through `colored`, callers switch them off
//! globally with `colored::control::set_override(false)`.

use colored::Colorize;
use crate::core::form::NegotiationForm;
use crate::core::session::NegotiationSession;
use crate::types::{ChartPoint, OfferDraft, RoundRecord, SettlementSummary, SuggestedOfferSet, Winner};

/// Width of the recovery score bar
pub const SCORE_BAR_WIDTH: usize = 20;

/// Width of the longest chart bar
pub const CHART_BAR_WIDTH: usize = 40;

// =============================================================================
// Number formatting
// =============================================================================

/// Group the integer digits with commas: "1234567" → "1,234,567"
fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Format a number with thousands separators and fixed decimals
pub fn format_number(value: f64, decimals: usize) -> String {
    let fixed = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };
    // "-0.00" reads oddly, only keep the sign when something non-zero shows
    let negative = value < 0.0 && fixed.chars().any(|c| c.is_ascii_digit() && c != '0');
    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// "$1,234.50" / "-$200.00"
pub fn format_currency(value: f64, decimals: usize) -> String {
    let number = format_number(value, decimals);
    match number.strip_prefix('-') {
        Some(rest) => format!("-${}", rest),
        None => format!("${}", number),
    }
}

/// "+$200.00", "-$50.00", "-" for the first round
pub fn format_change(change: Option<f64>) -> String {
    match change {
        None => "-".to_string(),
        Some(delta) if delta > 0.0 => format!("+{}", format_currency(delta, 2)),
        Some(delta) => format_currency(delta, 2),
    }
}

/// Empty free-text fields show as N/A
pub fn or_na(text: &str) -> &str {
    if text.trim().is_empty() {
        "N/A"
    } else {
        text
    }
}

fn colored_winner(winner: Winner) -> String {
    let name = winner.to_string();
    match winner {
        Winner::Us => name.green().bold().to_string(),
        Winner::Debtor => name.red().bold().to_string(),
        Winner::Tie => name.bright_black().to_string(),
    }
}

// =============================================================================
// Blocks
// =============================================================================

/// One history line
pub fn render_round(record: &RoundRecord) -> String {
    format!(
        "Round {:<3} debtor {:>14} | ours {:>14} | midpoint {:>14} | change {:>13} | {}",
        record.round,
        format_currency(record.debtor_total, 2),
        format_currency(record.our_total, 2),
        format_currency(record.midpoint, 2),
        format_change(record.midpoint_change),
        colored_winner(record.winner),
    )
}

/// The whole history, latest round on top
pub fn render_history(history: &[RoundRecord]) -> String {
    if history.is_empty() {
        return "No rounds recorded yet.".bright_black().to_string();
    }
    let mut out = format!("{}\n", "Negotiation History".bold());
    for record in history.iter().rev() {
        out.push_str(&render_round(record));
        out.push('\n');
    }
    out
}

/// Midpoint and the three counter-offers
pub fn render_suggestions(midpoint: f64, set: &SuggestedOfferSet) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", "Suggested Counter-Offers".bold()));
    out.push_str(&format!(
        "  Negotiation Midpoint: {}\n",
        format_currency(midpoint, 2).cyan().bold()
    ));

    out.push_str(&format!("  {}\n", "1. Aggressive Lump Sum".bright_green()));
    out.push_str(&format!("     {}\n", format_currency(set.lump_sum.total, 0).bold()));
    out.push_str("     Single payment for quick settlement.\n");

    let combo = &set.combo;
    out.push_str(&format!("  {}\n", "2. Balanced Combo Offer".bright_green()));
    out.push_str(&format!("     {}\n", format_currency(combo.total, 0).bold()));
    out.push_str(&format!(
        "     {} down + {}/mo for {} months.\n",
        format_currency(combo.lump_sum.unwrap_or(0.0), 0),
        format_currency(combo.monthly.unwrap_or(0.0), 0),
        combo.months.unwrap_or(0),
    ));

    let monthly = &set.monthly;
    out.push_str(&format!("  {}\n", "3. Strategic Monthly Offer".bright_green()));
    out.push_str(&format!("     {}\n", format_currency(monthly.total, 0).bold()));
    out.push_str(&format!(
        "     {}/mo for {} months.\n",
        format_currency(monthly.monthly.unwrap_or(0.0), 0),
        monthly.months.unwrap_or(0),
    ));
    out
}

/// "[#########-----------]"
pub fn score_bar(score: u8) -> String {
    let filled = (score.min(100) as usize * SCORE_BAR_WIDTH + 50) / 100;
    format!(
        "[{}{}]",
        "#".repeat(filled).bright_green(),
        "-".repeat(SCORE_BAR_WIDTH - filled).bright_black()
    )
}

/// Settlement summary block
pub fn render_summary(summary: &SettlementSummary) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", "Settlement Summary: Mission Complete".bright_green().bold()));
    out.push_str(&format!("  Loan Number:      {}\n", or_na(&summary.loan_number)));
    out.push_str(&format!("  Settlement Date:  {}\n", or_na(&summary.settlement_date)));
    out.push_str(&format!(
        "  Principal Recovery: {}%\n",
        format!("{:.2}", summary.recovery_percentage).bold()
    ));
    out.push_str(&format!(
        "  {} Overall Score: {}/100\n",
        score_bar(summary.recovery_score),
        summary.recovery_score
    ));
    out.push_str(&format!(
        "  Total Recovered:  {}\n",
        format_currency(summary.total_recovered, 2)
    ));
    out.push_str(&format!(
        "  Total Discount:   {}\n",
        format_currency(summary.discount_from_total, 2)
    ));
    out.push_str(&format!(
        "  Final Terms:      {} + {}/mo for {} months\n",
        format_currency(summary.final_lump_sum, 2),
        format_currency(summary.final_monthly, 2),
        summary.final_months
    ));
    out.push_str(&format!(
        "  Round Record (W-L-T): {}-{}-{}\n",
        summary.tally.wins.to_string().bright_green(),
        summary.tally.losses.to_string().red(),
        summary.tally.ties.to_string().bright_black()
    ));
    out
}

fn bar(value: f64, max: f64) -> String {
    if max <= 0.0 || value <= 0.0 {
        return String::new();
    }
    let len = ((value / max) * CHART_BAR_WIDTH as f64).round() as usize;
    "█".repeat(len.min(CHART_BAR_WIDTH))
}

/// Text chart: one bar per series per round, scaled to the largest value
pub fn render_chart(series: &[ChartPoint]) -> String {
    if series.is_empty() {
        return "No rounds to chart yet.".bright_black().to_string();
    }
    let max = series
        .iter()
        .flat_map(|p| [p.debtor_total, p.our_total, p.midpoint])
        .fold(0.0_f64, f64::max);

    let mut out = format!("{}\n", "Negotiation Progress".bold());
    for point in series {
        out.push_str(&format!("{}\n", point.label));
        out.push_str(&format!(
            "  Debtor Offer {:<40} {}\n",
            bar(point.debtor_total, max).magenta(),
            format_currency(point.debtor_total, 2)
        ));
        out.push_str(&format!(
            "  Our Offer    {:<40} {}\n",
            bar(point.our_total, max).cyan(),
            format_currency(point.our_total, 2)
        ));
        out.push_str(&format!(
            "  Midpoint     {:<40} {}\n",
            bar(point.midpoint, max).bright_green(),
            format_currency(point.midpoint, 2)
        ));
    }
    out
}

/// Where the negotiation stands and what can be done next
pub fn render_status(session: &NegotiationSession, form: &NegotiationForm) -> String {
    let balance = |v: Option<f64>| v.map(|b| format_currency(b, 2)).unwrap_or_else(|| "-".to_string());
    let lock = if session.balances_editable() { "" } else { " (locked)" };

    let mut out = String::new();
    out.push_str(&format!("Total Balance:     {}{}\n", balance(session.total_balance()), lock));
    out.push_str(&format!("Principal Balance: {}{}\n", balance(session.principal_balance()), lock));

    if session.is_settled() {
        out.push_str(&format!("{}\n", "Settled.".bright_green()));
        return out;
    }

    out.push_str(&format!("Negotiation Round {}\n", session.round_number()));
    out.push_str(&format!("  Debtor: {}\n", describe_draft(&form.debtor)));
    out.push_str(&format!("  Ours:   {}\n", describe_draft(&form.ours)));
    out.push_str(&format!(
        "  Calculated Total Offer: {}\n",
        format_currency(form.our_total_preview(), 2)
    ));
    out.push_str(&format!(
        "  Ready to calculate: {}\n",
        if form.can_calculate() { "yes" } else { "no" }
    ));

    if form.settlement_open(session) {
        out.push_str("Settled Negotiation Terms\n");
        out.push_str(&format!("  Loan Number:     {}\n", or_na(&form.loan_number)));
        out.push_str(&format!("  Settlement Date: {}\n", or_na(&form.settlement_date)));
        out.push_str(&format!("  Final Offer:     {}\n", describe_draft(&form.settled)));
        out.push_str(&format!(
            "  Ready to settle: {}\n",
            if form.can_settle(session) { "yes" } else { "no" }
        ));
    }
    out
}

fn describe_draft(draft: &OfferDraft) -> String {
    let field = |v: Option<String>| v.unwrap_or_else(|| "-".to_string());
    format!(
        "lump={} monthly={} months={}",
        field(draft.lump_sum.map(|v| format_number(v, 2))),
        field(draft.monthly.map(|v| format_number(v, 2))),
        field(draft.months.map(|m| m.to_string())),
    )
}
