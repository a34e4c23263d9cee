//! Rule Grammar Parser
//!
//! Turns rule expression strings into validator chains. Parsing is
//! permissive: unknown names and malformed segments are left for the
//! evaluation engine to deal with.

pub mod ast;
pub mod lexer;

pub use ast::{ParsedValidator, RuleExpressions, RuleSet};
pub use lexer::{tokenize_expression, Token, TokenKind};

/// Parse a single rule expression into its validator chain
pub fn parse(expression: &str) -> Vec<ParsedValidator> {
    let tokens = lexer::tokenize_expression(expression);
    ast::tokens_to_validators(tokens)
}

/// Parse every field's rule expression, keeping field order
pub fn parse_rules(rules: &RuleExpressions) -> RuleSet {
    let mut rule_set = RuleSet::new();
    for (field, expression) in rules {
        rule_set.insert(field.clone(), parse(expression));
    }
    rule_set
}
