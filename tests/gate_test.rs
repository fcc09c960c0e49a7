use chrono::NaiveDate;
use sporsync::sync::should_reconcile;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

#[test]
fn test_gate_closed_skips_reconciliation() {
    let today = date(2026, 8, 30);
    assert!(!should_reconcile(Some(today), today, false, false));
}

#[test]
fn test_gate_open_when_never_synced() {
    let today = date(2026, 8, 30);
    assert!(should_reconcile(None, today, false, false));
}

#[test]
fn test_gate_open_when_last_sync_was_yesterday() {
    let today = date(2026, 8, 30);
    let yesterday = date(2026, 8, 29);
    assert!(should_reconcile(Some(yesterday), today, false, false));
}

#[test]
fn test_force_reopens_closed_gate() {
    let today = date(2026, 8, 30);
    assert!(should_reconcile(Some(today), today, true, false));
}

#[test]
fn test_metadata_only_never_reconciles() {
    let today = date(2026, 8, 30);
    // Even a forced run stays metadata-only
    assert!(!should_reconcile(None, today, false, true));
    assert!(!should_reconcile(Some(today), today, true, true));
    assert!(!should_reconcile(None, today, true, true));
}
