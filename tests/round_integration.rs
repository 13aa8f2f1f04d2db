//! Integration tests for round recording
//!
//! Tests the full path: typed text → form → session → engine → history

use midpoint::core::{apply_assignments, NegotiationForm, NegotiationSession};
use midpoint::types::{NegotiationError, OfferDraft, Side, Winner};
use pretty_assertions::assert_eq;

fn enter_round(form: &mut NegotiationForm, debtor: &str, ours: &str) {
    apply_assignments(&mut form.debtor, debtor).unwrap();
    apply_assignments(&mut form.ours, ours).unwrap();
}

/// 1000 vs 3000: midpoint 2000 and the reference counter-offers
#[test]
fn test_reference_round() {
    let mut session = NegotiationSession::new();
    let mut form = NegotiationForm::new();

    enter_round(&mut form, "lump=1000", "lump=3000");
    let record = form.calculate(&mut session).unwrap();

    assert_eq!(record.round, 1);
    assert_eq!(record.debtor_total, 1000.0);
    assert_eq!(record.our_total, 3000.0);
    assert_eq!(record.midpoint, 2000.0);
    assert_eq!(record.midpoint_change, None);
    assert_eq!(record.winner, Winner::Tie);

    let set = session.suggestions().unwrap();
    assert!((set.lump_sum.total - 1800.0).abs() < 1e-9);
    assert!((set.combo.total - 2040.0).abs() < 1e-9);
    assert!((set.combo.lump_sum.unwrap() - 510.0).abs() < 1e-9);
    assert!((set.combo.monthly.unwrap() - 85.0).abs() < 1e-9);
    assert!((set.monthly.total - 2200.0).abs() < 1e-9);
    assert!((set.monthly.monthly.unwrap() - 91.666_666_666).abs() < 1e-6);
}

/// Mixed plans, several rounds, winners follow the midpoint
#[test]
fn test_multi_round_negotiation() {
    let mut session = NegotiationSession::new();
    let mut form = NegotiationForm::new();

    // 1: debtor 1700, ours 3400 → 2550
    enter_round(&mut form, "lump=500 monthly=100 months=12", "lump=1000 monthly=200 months=12");
    form.calculate(&mut session).unwrap();

    // 2: debtor 2000, ours 3400 → 2700 (up)
    enter_round(&mut form, "monthly=100 months=20", "lump=3400");
    form.calculate(&mut session).unwrap();

    // 3: debtor 2000, ours 3000 → 2500 (down)
    enter_round(&mut form, "lump=2000", "lump=3000");
    form.calculate(&mut session).unwrap();

    // 4: debtor 2200, ours 2800 → 2500 (flat)
    enter_round(&mut form, "lump=2200", "monthly=140 months=20");
    form.calculate(&mut session).unwrap();

    let history = session.history();
    let midpoints: Vec<f64> = history.iter().map(|r| r.midpoint).collect();
    assert_eq!(midpoints, vec![2550.0, 2700.0, 2500.0, 2500.0]);

    let winners: Vec<Winner> = history.iter().map(|r| r.winner).collect();
    assert_eq!(winners, vec![Winner::Tie, Winner::Us, Winner::Debtor, Winner::Tie]);

    let changes: Vec<Option<f64>> = history.iter().map(|r| r.midpoint_change).collect();
    assert_eq!(changes, vec![None, Some(150.0), Some(-200.0), Some(0.0)]);

    assert_eq!(session.round_number(), 5);
    assert_eq!(session.current_midpoint(), Some(2500.0));
}

/// Each side is validated on its own
#[test]
fn test_validity_gate_per_side() {
    let mut session = NegotiationSession::new();

    let monthly_only = OfferDraft::new(None, Some(100.0), None);
    let lump = OfferDraft::new(Some(1000.0), None, None);

    assert_eq!(
        session.record_round(&monthly_only, &lump).unwrap_err(),
        NegotiationError::InvalidRoundInput { side: Side::Debtor }
    );
    assert_eq!(
        session.record_round(&lump, &monthly_only).unwrap_err(),
        NegotiationError::InvalidRoundInput { side: Side::Ours }
    );
    assert!(session.history().is_empty());
    assert_eq!(session.round_number(), 1);
}

/// Zero is a present value, not an absent one
#[test]
fn test_zero_lump_sum_counts_as_entered() {
    let mut session = NegotiationSession::new();
    let zero = OfferDraft::new(Some(0.0), None, None);
    let record = session.record_round(&zero, &zero).unwrap();
    assert_eq!(record.midpoint, 0.0);
    assert_eq!(record.winner, Winner::Tie);
}

/// Chart series mirrors the history
#[test]
fn test_chart_series() {
    let mut session = NegotiationSession::new();
    let mut form = NegotiationForm::new();
    enter_round(&mut form, "lump=1000", "lump=3000");
    form.calculate(&mut session).unwrap();
    enter_round(&mut form, "lump=1500", "lump=2900");
    form.calculate(&mut session).unwrap();

    let series = session.chart_series();
    let labels: Vec<&str> = series.iter().map(|p| p.label.as_str()).collect();
    assert_eq!(labels, vec!["Round 1", "Round 2"]);
    assert_eq!(series[1].midpoint, 2200.0);
}

/// Records serialize for the JSON output
#[test]
fn test_round_json_shape() {
    let mut session = NegotiationSession::new();
    let lump = OfferDraft::new(Some(1000.0), None, None);
    session.record_round(&lump, &lump).unwrap();

    let json = serde_json::to_value(&session.history()[0]).unwrap();
    assert_eq!(json["round"], 1);
    assert_eq!(json["winner"], "Tie");
    assert!(json["midpoint_change"].is_null());

    let offers = serde_json::to_value(session.suggestions().unwrap()).unwrap();
    assert!(offers["lump_sum"].get("monthly").is_none());
    assert_eq!(offers["combo"]["months"], 18);
    assert_eq!(offers["monthly"]["months"], 24);
}
