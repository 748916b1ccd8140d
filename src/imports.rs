// src/imports.rs
//! Import-list maintenance after rewrites.
//!
//! Adding is unconditional and idempotent. Removing is conservative: the whole
//! compilation unit is scanned after the edit and the import only goes away
//! when nothing refers to the symbol through that binding any more.
//!
//! References are matched by resolved binding, not by simple name. A call to
//! a local `assertFalse` declared in the file does not keep an import of
//! `Assertions.assertFalse` alive, and a call resolved to the imported member
//! keeps it even if some other declaration shares its simple name. Calls the
//! front end could not resolve count as references when their simple name
//! matches.

use tracing::{debug, trace};

use crate::error::Result;
use crate::tree::{factory, last_segment, owner_of, NodeData, NodeId, NodeKind, Role, SyntaxTree};

/// What [`remove_import_if_unused`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovalOutcome {
    /// The import existed, had no remaining reference and was removed.
    Removed,
    /// At least one reference remains; the import was kept.
    StillUsed,
    /// No explicit import of the symbol exists.
    NotImported,
}

/// Adds an import of `symbol` unless the unit already imports it, explicitly
/// or through a wildcard on its owner.
///
/// Returns true if an import was added.
///
/// # Errors
/// Returns error if the tree rejects the insertion.
pub fn add_import_if_absent(tree: &mut SyntaxTree, symbol: &str, is_static: bool) -> Result<bool> {
    if is_imported(tree, symbol, is_static) {
        trace!(symbol, "import already present");
        return Ok(false);
    }
    let unit = tree.root();
    let index = tree
        .children(unit)
        .iter()
        .rposition(|c| tree.kind(*c) == Some(NodeKind::Import))
        .map_or(0, |last| last + 1);
    let import = factory::create_import(tree, symbol, is_static);
    tree.insert(unit, index, Role::Import, import)?;
    debug!(symbol, is_static, file = %tree.path().display(), "added import");
    Ok(true)
}

/// Removes the explicit import of `symbol` if no reference through it remains.
///
/// Must be called after the triggering edit has been applied.
///
/// # Errors
/// Returns error if the tree rejects the removal.
pub fn remove_import_if_unused(
    tree: &mut SyntaxTree,
    symbol: &str,
    is_static: bool,
) -> Result<RemovalOutcome> {
    let imports = explicit_imports(tree, symbol, is_static);
    if imports.is_empty() {
        return Ok(RemovalOutcome::NotImported);
    }
    if has_reference(tree, symbol, is_static) {
        trace!(symbol, "import still referenced");
        return Ok(RemovalOutcome::StillUsed);
    }
    for import in imports {
        tree.detach(import)?;
    }
    debug!(symbol, is_static, file = %tree.path().display(), "removed unused import");
    Ok(RemovalOutcome::Removed)
}

/// True if `symbol` is imported explicitly or via a wildcard on its owner.
#[must_use]
pub fn is_imported(tree: &SyntaxTree, symbol: &str, is_static: bool) -> bool {
    let wildcard = owner_of(symbol).map(|owner| format!("{owner}.*"));
    tree.children_with_role(tree.root(), Role::Import)
        .into_iter()
        .any(|id| match tree.data(id) {
            Some(NodeData::Import {
                symbol: s,
                is_static: st,
            }) => *st == is_static && (s == symbol || wildcard.as_deref() == Some(s.as_str())),
            _ => false,
        })
}

fn explicit_imports(tree: &SyntaxTree, symbol: &str, is_static: bool) -> Vec<NodeId> {
    tree.children_with_role(tree.root(), Role::Import)
        .into_iter()
        .filter(|id| {
            matches!(
                tree.data(*id),
                Some(NodeData::Import { symbol: s, is_static: st }) if s == symbol && *st == is_static
            )
        })
        .collect()
}

/// Scans every attached node of the unit for a reference bound to `symbol`.
fn has_reference(tree: &SyntaxTree, symbol: &str, is_static: bool) -> bool {
    tree.descendants(tree.root())
        .into_iter()
        .filter_map(|id| tree.data(id))
        .any(|data| refers_to(data, symbol, is_static))
}

fn refers_to(data: &NodeData, symbol: &str, is_static: bool) -> bool {
    match data {
        // An unresolved call may well go through the import; keep it.
        NodeData::Invocation { executable } if is_static && executable.declaring_type.is_none() => {
            executable.name == last_segment(symbol)
        }
        NodeData::Invocation { executable } if is_static => executable.qualified_name() == symbol,
        NodeData::Invocation { executable } => {
            executable.declaring_type.as_deref() == Some(symbol)
        }
        NodeData::Annotation { type_name } => !is_static && type_name == symbol,
        _ => false,
    }
}

#[cfg(test)]
#[path = "imports_test.rs"]
mod tests;
