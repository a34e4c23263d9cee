//! Rule Expression Lexer
//!
//! Splits a rule expression like `required|between:18,30` into name and
//! argument tokens. No escaping, no whitespace stripping.

/// Separates validator segments
pub const SEGMENT_SEPARATOR: char = '|';
/// Separates a validator name from its argument list
pub const ARGUMENT_MARKER: char = ':';
/// Separates arguments
pub const ARGUMENT_SEPARATOR: char = ',';

/// Token types in a rule expression
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Validator name, starts a new segment
    Name,
    /// Argument of the most recent name
    Argument,
}

/// A token with its text content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
}

impl Token {
    fn name(text: &str) -> Self {
        Self {
            kind: TokenKind::Name,
            text: text.to_string(),
        }
    }

    fn argument(text: &str) -> Self {
        Self {
            kind: TokenKind::Argument,
            text: text.to_string(),
        }
    }
}

/// Tokenize a rule expression
///
/// Every segment produces exactly one `Name` token, followed by one
/// `Argument` token per comma-separated argument. Only the first `:` of a
/// segment is significant. An empty expression produces no tokens.
pub fn tokenize_expression(expression: &str) -> Vec<Token> {
    let mut tokens = Vec::new();

    if expression.is_empty() {
        return tokens;
    }

    for segment in expression.split(SEGMENT_SEPARATOR) {
        match segment.split_once(ARGUMENT_MARKER) {
            Some((name, args)) => {
                tokens.push(Token::name(name));
                tokens.extend(args.split(ARGUMENT_SEPARATOR).map(Token::argument));
            }
            None => tokens.push(Token::name(segment)),
        }
    }

    tokens
}
