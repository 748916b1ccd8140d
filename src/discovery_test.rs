// src/discovery_test.rs
use super::*;
use proptest::prelude::*;
use std::fs;

const SUFFIXES: &[&str] = &["src/main/java", "src/test/java"];

fn paths(raw: &[&str]) -> Vec<PathBuf> {
    raw.iter().map(PathBuf::from).collect()
}

#[test]
fn nested_and_foreign_paths_are_dropped() {
    let candidates = paths(&[
        "/p/src/main/java",
        "/p/src/main/java/pkg",
        "/p/build/classes",
        "/p/src/test/java",
    ]);

    let roots = resolve(candidates, SUFFIXES);

    assert_eq!(roots, paths(&["/p/src/main/java", "/p/src/test/java"]));
}

#[test]
fn nested_root_inside_root_is_dropped() {
    let candidates = paths(&["/p/mod/src/main/java/gen/src/main/java", "/p/mod/src/main/java"]);
    assert_eq!(resolve(candidates, SUFFIXES), paths(&["/p/mod/src/main/java"]));
}

#[test]
fn suffix_must_match_whole_components() {
    let candidates = paths(&["/p/xsrc/main/java", "/p/src/main/javax"]);
    assert!(resolve(candidates, SUFFIXES).is_empty());
}

#[test]
fn duplicates_collapse() {
    let candidates = paths(&["/p/src/main/java", "/p/src/main/java"]);
    assert_eq!(resolve(candidates, SUFFIXES).len(), 1);
}

#[test]
fn sibling_prefix_is_not_containment() {
    let kept = remove_redundant_paths(paths(&["/p/a", "/p/ab"]));
    assert_eq!(kept.len(), 2);
}

#[test]
fn discovery_walks_project_and_prunes() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    for sub in [
        "core/src/main/java/pkg",
        "core/src/test/java/pkg",
        "app/src/main/java",
        "build/src/main/java",
        "docs",
    ] {
        fs::create_dir_all(root.join(sub)).unwrap();
    }

    let roots = discover_source_roots(root, &Config::default());

    let mut relative: Vec<PathBuf> = roots
        .iter()
        .map(|r| r.strip_prefix(root).unwrap().to_path_buf())
        .collect();
    relative.sort();
    assert_eq!(
        relative,
        paths(&["app/src/main/java", "core/src/main/java", "core/src/test/java"])
    );
}

fn segment() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["p", "src", "main", "test", "java", "pkg", "build"])
        .prop_map(ToString::to_string)
}

fn path_strategy() -> impl Strategy<Value = PathBuf> {
    prop::collection::vec(segment(), 1..7).prop_map(|segments| {
        let mut path = PathBuf::from("/");
        path.extend(segments);
        path
    })
}

proptest! {
    #[test]
    fn retained_roots_form_an_antichain(input in prop::collection::vec(path_strategy(), 0..20)) {
        let kept = remove_redundant_paths(input.clone());
        for (i, a) in kept.iter().enumerate() {
            for (j, b) in kept.iter().enumerate() {
                if i != j {
                    prop_assert!(!a.starts_with(b));
                }
            }
        }
        for path in &input {
            let covering = kept.iter().filter(|k| path.starts_with(k)).count();
            prop_assert_eq!(covering, 1);
        }
    }
}
