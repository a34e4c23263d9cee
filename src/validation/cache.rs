//! Rule Set Cache
//!
//! Memoizes the parsed `RuleSet` by identity of the caller's rule map, so
//! re-evaluating on data changes never re-parses unchanged rules.

use std::sync::Arc;

use crate::parser::{self, RuleExpressions, RuleSet};

/// Last parsed rule map and its rule set
#[derive(Debug, Default)]
pub struct RuleSetCache {
    source: Option<Arc<RuleExpressions>>,
    parsed: Arc<RuleSet>,
    parses: usize,
}

impl RuleSetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rule set for `rules`, parsing only when handed a different map
    ///
    /// Identity is the `Arc` allocation: a new `Arc` re-parses even when its
    /// contents are equal, the same `Arc` never does.
    pub fn get(&mut self, rules: &Arc<RuleExpressions>) -> Arc<RuleSet> {
        let cached = self
            .source
            .as_ref()
            .is_some_and(|source| Arc::ptr_eq(source, rules));

        if !cached {
            log::debug!("Parsing rule set for {} fields", rules.len());
            self.parsed = Arc::new(parser::parse_rules(rules));
            self.source = Some(Arc::clone(rules));
            self.parses += 1;
        }

        Arc::clone(&self.parsed)
    }

    /// How many times a rule map has been parsed
    pub fn parse_count(&self) -> usize {
        self.parses
    }
}
