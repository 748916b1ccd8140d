// src/transform/rules/final_static_method_test.rs
use super::*;
use crate::tree::UnitBuilder;

#[test]
fn final_is_removed_from_static_method() {
    let mut unit = UnitBuilder::new("Util.java", "pkg.Util").unwrap();
    let method = unit
        .method("helper", &[Modifier::Public, Modifier::Static, Modifier::Final], &[])
        .unwrap();
    let mut tree = unit.build();

    let mut ctx = ProcessContext::new(&mut tree, None);
    FinalStaticMethod.process(&mut ctx, method).unwrap();
    let changes = ctx.into_changes();

    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].summary(), "Removed final modifier from static method helper");
    assert!(matches!(
        tree.data(method),
        Some(NodeData::Method { modifiers, .. })
            if modifiers.contains(&Modifier::Static) && !modifiers.contains(&Modifier::Final)
    ));
}

#[test]
fn final_instance_method_is_left_alone() {
    let mut unit = UnitBuilder::new("Util.java", "pkg.Util").unwrap();
    let method = unit.method("helper", &[Modifier::Final], &[]).unwrap();
    let mut tree = unit.build();

    let mut ctx = ProcessContext::new(&mut tree, None);
    FinalStaticMethod.process(&mut ctx, method).unwrap();
    assert!(ctx.into_changes().is_empty());
}
