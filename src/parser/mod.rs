mod error;
mod lexer;
mod expr;
mod postfix;
mod eval;
mod parse;

#[cfg(test)]
mod str_test_strategies;

pub use error::{ErrorKind, LexError};
pub(crate) use lexer::Lexer;
pub use expr::{Expression, Operation, Token};
pub use eval::{Evaluation, RollEvaluation};
pub use parse::{parse, evaluate, evaluate_with};
