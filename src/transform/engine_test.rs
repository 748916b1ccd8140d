// src/transform/engine_test.rs
use super::*;
use std::sync::Mutex;
use crate::analyzer::rules as analyzer_rules;
use crate::error::Result;
use crate::history::Category;
use crate::transform::registry::all_processors;
use crate::transform::rules::junit::{ASSERTIONS, JUNIT4_BEFORE_CLASS};
use crate::tree::{Executable, JsonTreeStore, Modifier, NodeData, NodeKind, Role, SourceUnit, UnitBuilder};

const TEST_CATEGORY: Category = Category {
    name: "Test",
    description: "test category",
};

/// Renames every invocation, but fails halfway through on `explode`.
struct Exploding;

impl Processor for Exploding {
    fn id(&self) -> &'static str {
        "exploding"
    }

    fn node_kind(&self) -> NodeKind {
        NodeKind::Invocation
    }

    fn category(&self) -> Category {
        TEST_CATEGORY
    }

    fn process(&self, ctx: &mut ProcessContext<'_>, node: NodeId) -> Result<()> {
        let explode = matches!(
            ctx.tree().data(node),
            Some(NodeData::Invocation { executable }) if executable.name == "explode"
        );
        let renamed = matches!(
            ctx.tree().data(node),
            Some(NodeData::Invocation { executable }) if executable.name.ends_with("_seen")
        );
        if renamed {
            return Ok(());
        }
        ctx.tree_mut().update(node, |data| {
            if let NodeData::Invocation { executable } = data {
                executable.name.push_str("_seen");
            }
        })?;
        let note = ctx.create_annotation("pkg.Scratch");
        ctx.tree_mut().set_comments(note, vec!["// scratch".into()])?;
        ctx.record(node, "renamed", TEST_CATEGORY);
        if explode {
            return Err(SmellfixError::rewrite(self.id(), node, "boom"));
        }
        Ok(())
    }
}

/// Adds a copy of every method it sees to the enclosing type.
struct Duplicating;

impl Processor for Duplicating {
    fn id(&self) -> &'static str {
        "duplicating"
    }

    fn node_kind(&self) -> NodeKind {
        NodeKind::Method
    }

    fn category(&self) -> Category {
        TEST_CATEGORY
    }

    fn process(&self, ctx: &mut ProcessContext<'_>, node: NodeId) -> Result<()> {
        let Some(ty) = ctx.tree().parent(node) else {
            return Ok(());
        };
        let copy = ctx.clone_node(node)?;
        ctx.tree_mut().attach(ty, Role::Member, copy)?;
        ctx.record(node, "duplicated", TEST_CATEGORY);
        Ok(())
    }
}

fn sample_unit() -> (SyntaxTree, NodeId, NodeId, NodeId) {
    let mut unit = UnitBuilder::new("src/test/java/pkg/FooTest.java", "pkg.FooTest").unwrap();
    unit.import(JUNIT4_BEFORE_CLASS, false).unwrap();
    let setup = unit
        .method("setUpAll", &[Modifier::Static], &[JUNIT4_BEFORE_CLASS])
        .unwrap();
    unit.at_line(setup, 10).unwrap();
    let helper = unit
        .method("helper", &[Modifier::Static, Modifier::Final], &[])
        .unwrap();
    unit.at_line(helper, 20).unwrap();
    let test = unit.method("compares", &[], &[]).unwrap();
    let equals = unit.equals("a", "b").unwrap();
    let call = unit
        .call(test, Executable::new(ASSERTIONS, "assertFalse"), &[equals])
        .unwrap();
    unit.at_line(call, 30).unwrap();
    (unit.build(), setup, helper, call)
}

#[test]
fn full_pass_applies_every_rule_once() {
    let (mut tree, ..) = sample_unit();
    let engine = TransformationEngine::new(all_processors());

    let mut ledger = Ledger::new();
    engine.apply_to_tree(&mut tree, &mut ledger);

    let categories: Vec<&str> = ledger.changes().iter().map(|c| c.category().name).collect();
    assert_eq!(
        categories,
        vec!["Junit4Annotations", "FinalStaticMethod", "AssertFalseEquals"]
    );
}

#[test]
fn second_pass_is_a_no_op() {
    let (mut tree, ..) = sample_unit();
    let engine = TransformationEngine::new(all_processors());
    let mut first = Ledger::new();
    engine.apply_to_tree(&mut tree, &mut first);
    let after_first = tree.clone();

    let mut second = Ledger::new();
    engine.apply_to_tree(&mut tree, &mut second);

    assert!(second.is_empty());
    assert_eq!(tree, after_first);
}

#[test]
fn failed_rewrite_is_rolled_back_and_others_proceed() {
    let mut unit = UnitBuilder::new("A.java", "pkg.A").unwrap();
    let method = unit.method("m", &[], &[]).unwrap();
    let before = unit.call(method, Executable::unresolved("first"), &[]).unwrap();
    let bad = unit.call(method, Executable::unresolved("explode"), &[]).unwrap();
    let after = unit.call(method, Executable::unresolved("last"), &[]).unwrap();
    let mut tree = unit.build();
    let arena_before = tree.len();
    let bad_before = tree.get(bad).cloned();

    let engine = TransformationEngine::new(vec![Box::new(Exploding)]);
    let mut ledger = Ledger::new();
    engine.apply_to_tree(&mut tree, &mut ledger);

    assert_eq!(ledger.len(), 2);
    assert_eq!(tree.get(bad).cloned(), bad_before);
    assert!(!tree.in_transaction());
    for id in [before, after] {
        assert!(matches!(
            tree.data(id),
            Some(NodeData::Invocation { executable }) if executable.name.ends_with("_seen")
        ));
    }
    // the two successful calls each left one scratch node, the failed one none
    assert_eq!(tree.len(), arena_before + 2);
}

#[test]
fn nodes_created_during_the_pass_are_not_visited() {
    let mut unit = UnitBuilder::new("A.java", "pkg.A").unwrap();
    unit.method("one", &[], &[]).unwrap();
    unit.method("two", &[], &[]).unwrap();
    let ty = unit.type_node();
    let mut tree = unit.build();

    let engine = TransformationEngine::new(vec![Box::new(Duplicating)]);
    let mut ledger = Ledger::new();
    engine.apply_to_tree(&mut tree, &mut ledger);

    assert_eq!(ledger.len(), 2);
    assert_eq!(tree.children_with_role(ty, Role::Member).len(), 4);
}

#[test]
fn targets_restrict_processors_and_carry_findings() {
    let (mut tree, _, helper, _) = sample_unit();
    let finding = AnalyzerFinding::new(
        analyzer_rules::FINAL_STATIC_METHOD,
        "pkg/FooTest.java",
        "final is redundant",
        "static final void helper()",
    )
    .at_line(20);
    let engine =
        TransformationEngine::new(all_processors()).with_targets(vec![Target::from_finding(&finding)]);

    let mut ledger = Ledger::new();
    engine.apply_to_tree(&mut tree, &mut ledger);

    assert_eq!(ledger.len(), 1);
    assert_eq!(ledger.changes()[0].finding(), Some(&finding));
    assert!(matches!(
        tree.data(helper),
        Some(NodeData::Method { modifiers, .. }) if !modifiers.contains(&Modifier::Final)
    ));
}

#[test]
fn target_on_another_line_does_not_fire() {
    let (mut tree, ..) = sample_unit();
    let target = Target::new(analyzer_rules::FINAL_STATIC_METHOD, "pkg/FooTest.java", Some(21));
    let engine = TransformationEngine::new(all_processors()).with_targets(vec![target]);

    let mut ledger = Ledger::new();
    engine.apply_to_tree(&mut tree, &mut ledger);

    assert!(ledger.is_empty());
}

#[test]
fn processors_without_analyzer_rule_are_skipped_in_targeted_mode() {
    let mut unit = UnitBuilder::new("A.java", "pkg.A").unwrap();
    unit.method("one", &[], &[]).unwrap();
    let mut tree = unit.build();
    let target = Target::new(analyzer_rules::FINAL_STATIC_METHOD, "A.java", None);
    let engine = TransformationEngine::new(vec![Box::new(Duplicating)]).with_targets(vec![target]);

    let mut ledger = Ledger::new();
    engine.apply_to_tree(&mut tree, &mut ledger);

    assert!(ledger.is_empty());
}

struct FailingSave;

impl TreeStore for FailingSave {
    fn load(&self, _roots: &[PathBuf]) -> Result<Model> {
        let (tree, ..) = sample_unit();
        Ok(Model::from(vec![tree]))
    }

    fn save(&self, unit: &SourceUnit) -> Result<()> {
        Err(SmellfixError::Other(format!("read-only: {}", unit.origin.display())))
    }
}

#[test]
fn save_failure_reports_no_applied_changes() {
    let engine = TransformationEngine::new(all_processors());

    let outcome = engine.run(&FailingSave, &[]);

    assert!(!outcome.is_success());
    assert_eq!(outcome.applied(), 0);
    assert!(outcome.ledger().is_empty());
    assert!(outcome.partial().is_some_and(|p| !p.is_empty()));
    assert_eq!(outcome.unsaved(), 3);
}

/// Saves the first unit, refuses every later one.
#[derive(Default)]
struct SecondSaveFails {
    saved: Mutex<Vec<PathBuf>>,
}

impl TreeStore for SecondSaveFails {
    fn load(&self, _roots: &[PathBuf]) -> Result<Model> {
        let (first, ..) = sample_unit();
        let mut second = UnitBuilder::new("src/main/java/pkg/Util.java", "pkg.Util").unwrap();
        second
            .method("helper", &[Modifier::Static, Modifier::Final], &[])
            .unwrap();
        Ok(Model::from(vec![first, second.build()]))
    }

    fn save(&self, unit: &SourceUnit) -> Result<()> {
        let mut saved = self.saved.lock().unwrap();
        if !saved.is_empty() {
            return Err(SmellfixError::Other("disk full".into()));
        }
        saved.push(unit.origin.clone());
        Ok(())
    }
}

#[test]
fn changes_saved_before_a_save_failure_count_as_applied() {
    let store = SecondSaveFails::default();
    let engine = TransformationEngine::new(all_processors());

    let outcome = engine.run(&store, &[]);

    assert!(!outcome.is_success());
    assert_eq!(
        *store.saved.lock().unwrap(),
        vec![PathBuf::from("src/test/java/pkg/FooTest.java")]
    );
    assert_eq!(outcome.applied(), 3);
    assert!(outcome
        .changes()
        .iter()
        .all(|c| c.affected_type().qualified_name == "pkg.FooTest"));
    assert_eq!(outcome.partial().map(Ledger::len), Some(4));
    assert_eq!(outcome.unsaved(), 1);
}

#[test]
fn load_failure_yields_empty_ledger() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing");
    let engine = TransformationEngine::new(all_processors());

    let outcome = engine.run(&JsonTreeStore, &[missing]);

    assert!(matches!(outcome.error(), Some(SmellfixError::Load { .. })));
    assert!(outcome.partial().is_some_and(Ledger::is_empty));
}

#[test]
fn run_saves_changed_units_only() {
    let dir = tempfile::tempdir().unwrap();
    let (changed, ..) = sample_unit();
    let untouched = UnitBuilder::new("B.java", "pkg.B").unwrap().build();
    let changed_path = dir.path().join("FooTest.tree.json");
    let untouched_path = dir.path().join("B.tree.json");
    std::fs::write(&changed_path, serde_json::to_string(&changed).unwrap()).unwrap();
    let untouched_json = serde_json::to_string(&untouched).unwrap();
    std::fs::write(&untouched_path, &untouched_json).unwrap();

    let engine = TransformationEngine::new(all_processors());
    let outcome = engine.run(&JsonTreeStore, &[dir.path().to_path_buf()]);

    assert!(outcome.is_success());
    assert_eq!(outcome.applied(), 3);
    assert_eq!(std::fs::read_to_string(&untouched_path).unwrap(), untouched_json);
    let reloaded = JsonTreeStore::read(&changed_path).unwrap();
    let mut again = Ledger::new();
    engine.apply_to_tree(&mut reloaded.clone(), &mut again);
    assert!(again.is_empty());
}
