//! Integration tests for settlement and reset
//!
//! Tests: balances → rounds → settlement summary → reset

use midpoint::core::{apply_assignments, render, NegotiationForm, NegotiationSession};
use midpoint::types::{NegotiationError, RoundTally};
use pretty_assertions::assert_eq;

fn negotiate(session: &mut NegotiationSession, form: &mut NegotiationForm, rounds: &[(&str, &str)]) {
    for (debtor, ours) in rounds {
        apply_assignments(&mut form.debtor, debtor).unwrap();
        apply_assignments(&mut form.ours, ours).unwrap();
        form.calculate(session).unwrap();
    }
}

/// 4000 of 8000 principal: 50 %, score 71
#[test]
fn test_half_recovery_settlement() {
    let mut session = NegotiationSession::new();
    let mut form = NegotiationForm::new();

    form.enter_total_balance(&mut session, "10000").unwrap();
    form.enter_principal_balance(&mut session, "8000").unwrap();
    negotiate(&mut session, &mut form, &[
        ("lump=1000", "lump=3000"),
        ("lump=2000", "lump=3000"),
        ("lump=2000", "lump=2600"),
    ]);

    form.loan_number = "12345-ABC".to_string();
    form.settlement_date = "2024-05-01".to_string();
    apply_assignments(&mut form.settled, "lump=4000").unwrap();
    assert!(form.can_settle(&session));

    let summary = form.finalize(&mut session).unwrap();
    assert_eq!(summary.total_recovered, 4000.0);
    assert_eq!(summary.recovery_percentage, 50.0);
    assert_eq!(summary.discount_from_total, 6000.0);
    assert_eq!(summary.recovery_score, 71);
    assert_eq!(summary.tally, RoundTally { wins: 1, losses: 1, ties: 1 });
    assert_eq!(summary.loan_number, "12345-ABC");
    assert_eq!(summary.settlement_date, "2024-05-01");
    assert!(session.is_settled());
}

/// Monthly settlement terms count toward recovery
#[test]
fn test_payment_plan_settlement() {
    let mut session = NegotiationSession::new();
    let mut form = NegotiationForm::new();
    form.enter_principal_balance(&mut session, "6000").unwrap();
    negotiate(&mut session, &mut form, &[("lump=1000", "lump=5000")]);

    apply_assignments(&mut form.settled, "lump=600 monthly=200 months=18").unwrap();
    let summary = form.finalize(&mut session).unwrap();

    assert_eq!(summary.total_recovered, 4200.0);
    assert!((summary.recovery_percentage - 70.0).abs() < 1e-9);
    // no total balance entered
    assert_eq!(summary.discount_from_total, 0.0);
    assert_eq!(summary.final_months, 18);
    // 90 + 4/34 × 10 = 91.18
    assert_eq!(summary.recovery_score, 91);
}

/// Settled is terminal until reset
#[test]
fn test_settled_session_refuses_more_work() {
    let mut session = NegotiationSession::new();
    let mut form = NegotiationForm::new();
    form.enter_principal_balance(&mut session, "8000").unwrap();
    negotiate(&mut session, &mut form, &[("lump=1000", "lump=3000")]);
    apply_assignments(&mut form.settled, "lump=4000").unwrap();
    form.finalize(&mut session).unwrap();

    apply_assignments(&mut form.debtor, "lump=1").unwrap();
    apply_assignments(&mut form.ours, "lump=2").unwrap();
    assert_eq!(form.calculate(&mut session).unwrap_err(), NegotiationError::SessionAlreadySettled);
    assert_eq!(form.finalize(&mut session).unwrap_err(), NegotiationError::SessionAlreadySettled);
    assert!(form.enter_principal_balance(&mut session, "1").is_err());
    assert_eq!(session.history().len(), 1);
}

/// Reset brings back a session identical to a new one
#[test]
fn test_reset_after_settlement() {
    let mut session = NegotiationSession::new();
    let mut form = NegotiationForm::new();
    form.enter_total_balance(&mut session, "10000").unwrap();
    form.enter_principal_balance(&mut session, "8000").unwrap();
    negotiate(&mut session, &mut form, &[("lump=1000", "lump=3000")]);
    apply_assignments(&mut form.settled, "lump=4000").unwrap();
    form.finalize(&mut session).unwrap();

    form.reset(&mut session);

    assert_eq!(session, NegotiationSession::new());
    assert_eq!(form, NegotiationForm::new());
    assert!(session.summary().is_none());
    assert!(session.suggestions().is_none());
    assert_eq!(session.round_number(), 1);
    assert!(!form.show_reset(&session));
}

/// Summary renders with the values a negotiator looks for
#[test]
fn test_summary_rendering() {
    colored::control::set_override(false);

    let mut session = NegotiationSession::new();
    let mut form = NegotiationForm::new();
    form.enter_total_balance(&mut session, "10000").unwrap();
    form.enter_principal_balance(&mut session, "8000").unwrap();
    negotiate(&mut session, &mut form, &[("lump=1000", "lump=3000")]);
    apply_assignments(&mut form.settled, "lump=4000").unwrap();
    let summary = form.finalize(&mut session).unwrap();

    let text = render::render_summary(&summary);
    assert!(text.contains("Loan Number:      N/A"));
    assert!(text.contains("50.00%"));
    assert!(text.contains("Overall Score: 71/100"));
    assert!(text.contains("$4,000.00"));
    assert!(text.contains("$6,000.00"));
    assert!(text.contains("(W-L-T): 0-0-1"));
}
