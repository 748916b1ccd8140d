// src/transform/target_test.rs
use super::*;
use crate::history::AffectedType;
use crate::smells::NodeRef;
use crate::tree::NodeId;

#[test]
fn relative_finding_matches_absolute_unit() {
    let target = Target::new("R", "src/main/java/pkg/A.java", Some(4));
    assert!(target.matches("R", Path::new("/work/p/src/main/java/pkg/A.java"), Some(4)));
    assert!(target.matches("R", Path::new("/work/p/src/main/java/pkg/A.java"), None));
    assert!(!target.matches("R", Path::new("/work/p/src/main/java/pkg/A.java"), Some(5)));
    assert!(!target.matches("Other", Path::new("/work/p/src/main/java/pkg/A.java"), Some(4)));
}

#[test]
fn suffix_match_is_component_wise() {
    let target = Target::new("R", "A.java", None);
    assert!(target.matches("R", Path::new("pkg/A.java"), None));
    assert!(!target.matches("R", Path::new("pkg/BA.java"), None));
}

#[test]
fn from_finding_keeps_the_snapshot() {
    let finding = AnalyzerFinding::new("R", "A.java", "msg", "code").at_line(3);
    let target = Target::from_finding(&finding);
    assert_eq!(target.line, Some(3));
    assert_eq!(target.finding, Some(finding));
}

#[test]
fn collector_maps_smells_to_analyzer_rules() {
    let node = NodeRef {
        file: "pkg/A.java".into(),
        node: NodeId(3),
        line: Some(7),
    };
    let affected = AffectedType::new("pkg.A", "pkg/A.java");
    let smells = vec![
        BadSmell::FinalStaticMethod(FinalStaticMethod::new(affected.clone(), node.clone())),
        BadSmell::AssertTrueEquals(AssertTrueEquals::new(affected, node)),
    ];

    let targets = TargetCollector::collect(&smells);

    let rule_ids: Vec<&str> = targets.iter().map(|t| t.rule_id.as_str()).collect();
    assert_eq!(rule_ids, vec![rules::FINAL_STATIC_METHOD, rules::SIMPLIFIABLE_ASSERTION]);
    assert!(targets.iter().all(|t| t.line == Some(7) && t.finding.is_none()));
}
