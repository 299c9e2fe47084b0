// Expression parsing and evaluation

pub mod eval;
pub mod format;
pub mod parser;

pub use parser::{parse, BinOp, Expr, Func};

/// The fixed string standing in for any evaluation failure.
/// No further detail is exposed to the caller.
pub const ERROR_SENTINEL: &str = "Error";

/// Outcome of evaluating a completed expression string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Evaluation {
    /// Nothing left to evaluate after sanitization (not an error).
    Empty,
    /// A finite result, rounded and formatted for display.
    Value(String),
    /// Any parse failure or non-finite/NaN result.
    Error,
}

impl Evaluation {
    pub fn display(&self) -> &str {
        match self {
            Evaluation::Empty => "",
            Evaluation::Value(s) => s,
            Evaluation::Error => ERROR_SENTINEL,
        }
    }

    pub fn into_display(self) -> String {
        match self {
            Evaluation::Empty => String::new(),
            Evaluation::Value(s) => s,
            Evaluation::Error => ERROR_SENTINEL.to_string(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Evaluation::Error)
    }
}

/// Characters the evaluator accepts. Everything else is stripped before
/// parsing, so stray input (currency signs, unicode) degrades to whatever
/// remains rather than failing outright. Letters stay in the set because
/// function names are parsed first-class; an unknown identifier is a parse
/// error, not silent corruption.
fn sanitize(raw: &str) -> String {
    raw.chars()
        .filter(|c| {
            c.is_ascii_digit()
                || c.is_ascii_alphabetic()
                || c.is_whitespace()
                || matches!(c, '+' | '-' | '*' | '/' | '.' | '(' | ')' | '%' | '^')
        })
        .collect()
}

/// Evaluate a completed expression string to a display value.
///
/// Pipeline: sanitize, parse, evaluate the tree, reject non-finite results,
/// round to 8 decimal places to suppress binary floating-point artifacts.
/// Every failure collapses to `Evaluation::Error`; the empty expression
/// yields `Evaluation::Empty`.
pub fn evaluate(raw: &str) -> Evaluation {
    let sanitized = sanitize(raw);
    if sanitized.trim().is_empty() {
        return Evaluation::Empty;
    }

    let ast = match parser::parse(&sanitized) {
        Ok(ast) => ast,
        Err(_) => return Evaluation::Error,
    };

    let value = eval::evaluate(&ast);
    if !value.is_finite() {
        return Evaluation::Error;
    }

    Evaluation::Value(format::format_number(format::round_display(value)))
}
