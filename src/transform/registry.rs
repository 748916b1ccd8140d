// src/transform/registry.rs
use tracing::debug;

use super::processor::Processor;
use super::rules::{EqualsAssertion, FinalStaticMethod, Junit4Annotations};

/// Every shipped processor, in registration order.
#[must_use]
pub fn all_processors() -> Vec<Box<dyn Processor>> {
    vec![
        Box::new(Junit4Annotations),
        Box::new(FinalStaticMethod),
        Box::new(EqualsAssertion::assert_false()),
        Box::new(EqualsAssertion::assert_true()),
    ]
}

/// Processors repairing one of the analyzer rules in `active`.
#[must_use]
pub fn processors_for(active: &[String]) -> Vec<Box<dyn Processor>> {
    let selected: Vec<Box<dyn Processor>> = all_processors()
        .into_iter()
        .filter(|p| {
            p.analyzer_rule()
                .is_some_and(|rule| active.iter().any(|a| a == rule))
        })
        .collect();
    debug!(count = selected.len(), "selected processors");
    selected
}

#[must_use]
pub fn processor_ids(processors: &[Box<dyn Processor>]) -> Vec<&'static str> {
    processors.iter().map(|p| p.id()).collect()
}
