// src/transform/rules/mod.rs
//! The shipped rewrite rules.

pub mod assert_equals;
pub mod final_static_method;
pub mod junit;
pub mod junit4_annotations;

pub use self::assert_equals::EqualsAssertion;
pub use self::final_static_method::FinalStaticMethod;
pub use self::junit4_annotations::Junit4Annotations;
