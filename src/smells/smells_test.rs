// src/smells/smells_test.rs
use super::*;
use crate::transform::rules::junit::ASSERTIONS;
use crate::tree::{Executable, Model, Modifier, UnitBuilder};

/// Counts visits per variant.
#[derive(Default)]
struct Tally {
    final_static: usize,
    assert_false: usize,
    assert_true: usize,
}

impl BadSmellVisitor for Tally {
    type Output = &'static str;

    fn visit_final_static_method(&mut self, _smell: &FinalStaticMethod) -> &'static str {
        self.final_static += 1;
        "final"
    }

    fn visit_assert_false_equals(&mut self, _smell: &AssertFalseEquals) -> &'static str {
        self.assert_false += 1;
        "false"
    }

    fn visit_assert_true_equals(&mut self, _smell: &AssertTrueEquals) -> &'static str {
        self.assert_true += 1;
        "true"
    }
}

fn model() -> Model {
    let mut unit = UnitBuilder::new("pkg/FooTest.java", "pkg.FooTest").unwrap();
    let helper = unit
        .method("helper", &[Modifier::Static, Modifier::Final], &[])
        .unwrap();
    unit.at_line(helper, 5).unwrap();
    unit.method("plain", &[Modifier::Final], &[]).unwrap();
    let test = unit.method("compares", &[], &[]).unwrap();
    let differ = unit.equals("a", "b").unwrap();
    unit.call(test, Executable::new(ASSERTIONS, "assertFalse"), &[differ])
        .unwrap();
    let same = unit.equals("c", "d").unwrap();
    let message = unit.literal("\"same\"");
    unit.call(test, Executable::new(ASSERTIONS, "assertTrue"), &[same, message])
        .unwrap();
    let flag = unit.variable("flag");
    unit.call(test, Executable::new(ASSERTIONS, "assertTrue"), &[flag])
        .unwrap();
    Model::from(vec![unit.build()])
}

#[test]
fn detection_finds_each_variant_in_tree_order() {
    let smells = SmellDetector.detect(&model());

    let names: Vec<&str> = smells.iter().map(BadSmell::name).collect();
    assert_eq!(names, vec!["FinalStaticMethod", "AssertFalseEquals", "AssertTrueEquals"]);
    assert_eq!(smells[0].node().line, Some(5));
    assert!(smells
        .iter()
        .all(|s| s.affected_type().qualified_name == "pkg.FooTest"));
}

#[test]
fn accept_dispatches_to_matching_method() {
    let smells = SmellDetector.detect(&model());
    let mut tally = Tally::default();

    let outputs: Vec<&str> = smells.iter().map(|s| s.accept(&mut tally)).collect();

    assert_eq!(outputs, vec!["final", "false", "true"]);
    assert_eq!((tally.final_static, tally.assert_false, tally.assert_true), (1, 1, 1));
}

#[test]
fn descriptions_come_from_categories() {
    let smells = SmellDetector.detect(&model());
    assert!(smells[0].description().contains("Static"));
    assert!(smells[1].description().contains("assertNotEquals"));
}

#[test]
fn clean_tree_has_no_smells() {
    let mut unit = UnitBuilder::new("A.java", "pkg.A").unwrap();
    unit.method("ok", &[Modifier::Static], &[]).unwrap();
    assert!(SmellDetector.detect_in_tree(unit.tree()).is_empty());
}
