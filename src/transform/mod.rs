// src/transform/mod.rs
//! Rule-based rewriting of syntax trees.
//!
//! A [`TransformationEngine`] walks every compilation unit of a [`Model`],
//! hands each node to every registered [`Processor`] declared for its kind
//! and collects what they changed into a [`Ledger`].
//!
//! [`Model`]: crate::tree::Model
//! [`Ledger`]: crate::history::Ledger

pub mod context;
pub mod engine;
pub mod processor;
pub mod registry;
pub mod rules;
pub mod target;

pub use self::context::ProcessContext;
pub use self::engine::{JobOutcome, TransformationEngine};
pub use self::processor::Processor;
pub use self::target::{Target, TargetCollector};
