// src/reporting/changelog_test.rs
use super::*;
use crate::history::{AffectedType, Grouping, Ledger};

const FINAL: Category = Category {
    name: "FinalStaticMethod",
    description: "final on static is redundant",
};
const ASSERT: Category = Category {
    name: "AssertFalseEquals",
    description: "use assertNotEquals",
};

fn finding() -> AnalyzerFinding {
    AnalyzerFinding::new(
        "FinalStaticMethod",
        "src/main/java/pkg/Util.java",
        "Method is final and static",
        "static final void helper()",
    )
    .at_line(12)
}

fn ledger() -> Ledger {
    let util = AffectedType::new("pkg.Util", "src/main/java/pkg/Util.java");
    let test = AffectedType::new("pkg.UtilTest", "src/test/java/pkg/UtilTest.java");
    let mut ledger = Ledger::new();
    ledger.record(
        Change::new("Removed final modifier from static method helper", FINAL, util.clone())
            .with_finding(finding()),
    );
    ledger.record(Change::new("Replaced assertFalse checking equals", ASSERT, test));
    ledger.record(Change::new("Removed final modifier from static method other", FINAL, util));
    ledger
}

#[test]
fn change_log_lists_every_change() {
    let ledger = ledger();
    let log = print_change_log(&ledger).unwrap();

    assert!(log.starts_with("## Changes:\n"));
    assert_eq!(log.matches("\n* ").count(), 3);
    assert!(log.contains("rule_id: FinalStaticMethod"));
    assert!(log.contains(&format!("<!-- fingerprint:{} -->", finding().fingerprint())));
}

#[test]
fn change_without_finding_has_no_comments() {
    let change = Change::new(
        "x",
        ASSERT,
        AffectedType::new("pkg.A", "A.java"),
    );
    let log = print_change_log([&change]).unwrap();
    assert_eq!(log, "## Changes:\n* x\n");
}

#[test]
fn fingerprints_round_trip_through_rendered_text() {
    let log = print_change_log(&ledger()).unwrap();

    let fingerprints = extract_fingerprints(&log);

    assert_eq!(fingerprints.len(), 1);
    assert!(fingerprints.contains(&finding().fingerprint()));
}

#[test]
fn extraction_ignores_unrelated_comments() {
    let text = "<!-- note -->\n<!-- fingerprint:ABC123 -->\n<!--fingerprint:def-->";
    let found = extract_fingerprints(text);
    assert_eq!(found.len(), 2);
    assert!(found.contains("abc123"));
    assert!(found.contains("def"));
}

#[test]
fn repaired_issues_lists_categories_once() {
    let ledger = ledger();
    let header = print_repaired_issues(&ledger).unwrap();

    assert!(header.starts_with("# Repairing Code Style Issues\n"));
    assert_eq!(header.matches("## FinalStaticMethod").count(), 1);
    assert_eq!(header.matches("## AssertFalseEquals").count(), 1);
    assert!(header.find("FinalStaticMethod") < header.find("AssertFalseEquals"));
}

#[test]
fn change_set_body_covers_only_its_changes() {
    let ledger = ledger();
    let sets = ledger.partition(Grouping::PerType);

    let body = print_change_set(&sets[1]).unwrap();

    assert!(body.contains("## AssertFalseEquals"));
    assert!(!body.contains("FinalStaticMethod"));
}
