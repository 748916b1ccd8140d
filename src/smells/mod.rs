// src/smells/mod.rs
//! The closed set of bad smells this crate detects.
//!
//! Smells are produced only by [`detect::SmellDetector`] and never mutated.
//! Consumers handle them through [`BadSmellVisitor`], which has no default
//! methods: a new variant does not compile until every visitor handles it.

pub mod detect;

pub use self::detect::SmellDetector;

use serde::Serialize;
use std::path::PathBuf;

use crate::history::{AffectedType, Category};
use crate::transform::rules::{assert_equals, final_static_method};
use crate::tree::NodeId;

/// Where a smell sits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeRef {
    pub file: PathBuf,
    pub node: NodeId,
    pub line: Option<u32>,
}

macro_rules! smell {
    ($(#[$meta:meta])* $name:ident, $category:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Serialize)]
        pub struct $name {
            pub affected_type: AffectedType,
            pub node: NodeRef,
        }

        impl $name {
            const CATEGORY: Category = $category;

            #[must_use]
            pub fn new(affected_type: AffectedType, node: NodeRef) -> Self {
                Self { affected_type, node }
            }

            #[must_use]
            pub fn name(&self) -> &'static str {
                Self::CATEGORY.name
            }

            #[must_use]
            pub fn description(&self) -> &'static str {
                Self::CATEGORY.description
            }
        }
    };
}

smell!(
    /// A `static` method declared `final`.
    FinalStaticMethod,
    final_static_method::CATEGORY
);
smell!(
    /// `assertFalse(a.equals(b))`.
    AssertFalseEquals,
    assert_equals::ASSERT_FALSE_CATEGORY
);
smell!(
    /// `assertTrue(a.equals(b))`.
    AssertTrueEquals,
    assert_equals::ASSERT_TRUE_CATEGORY
);

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "smell")]
pub enum BadSmell {
    FinalStaticMethod(FinalStaticMethod),
    AssertFalseEquals(AssertFalseEquals),
    AssertTrueEquals(AssertTrueEquals),
}

impl BadSmell {
    pub fn accept<V: BadSmellVisitor>(&self, visitor: &mut V) -> V::Output {
        match self {
            Self::FinalStaticMethod(s) => visitor.visit_final_static_method(s),
            Self::AssertFalseEquals(s) => visitor.visit_assert_false_equals(s),
            Self::AssertTrueEquals(s) => visitor.visit_assert_true_equals(s),
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::FinalStaticMethod(s) => s.name(),
            Self::AssertFalseEquals(s) => s.name(),
            Self::AssertTrueEquals(s) => s.name(),
        }
    }

    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::FinalStaticMethod(s) => s.description(),
            Self::AssertFalseEquals(s) => s.description(),
            Self::AssertTrueEquals(s) => s.description(),
        }
    }

    #[must_use]
    pub fn affected_type(&self) -> &AffectedType {
        match self {
            Self::FinalStaticMethod(s) => &s.affected_type,
            Self::AssertFalseEquals(s) => &s.affected_type,
            Self::AssertTrueEquals(s) => &s.affected_type,
        }
    }

    #[must_use]
    pub fn node(&self) -> &NodeRef {
        match self {
            Self::FinalStaticMethod(s) => &s.node,
            Self::AssertFalseEquals(s) => &s.node,
            Self::AssertTrueEquals(s) => &s.node,
        }
    }
}

/// One method per smell variant.
pub trait BadSmellVisitor {
    type Output;

    fn visit_final_static_method(&mut self, smell: &FinalStaticMethod) -> Self::Output;
    fn visit_assert_false_equals(&mut self, smell: &AssertFalseEquals) -> Self::Output;
    fn visit_assert_true_equals(&mut self, smell: &AssertTrueEquals) -> Self::Output;
}

#[cfg(test)]
#[path = "smells_test.rs"]
mod tests;
