//! Dice notation expressions such as `3d8 + 2d4` or `(1d4 + 2) * 2`.
//!
//! An input string goes through a fixed pipeline:
//! [`parse()`] lexes it into an infix [`Expression`], [`Expression::is_balanced()`]
//! checks its parenthesis, [`Expression::to_postfix()`] reorders it and
//! [`Expression::evaluate()`] reduces it to a single value, rolling dice on the way.
//! [`evaluate()`] runs all of it at once.
//!
//! ```
//! use postfix_dice::parse;
//!
//! let input = "(1d4 + 2) * 2";
//! let infix = parse(input);
//! assert!(!infix.has_errors());
//! assert!(infix.is_balanced());
//!
//! let postfix = infix.to_postfix();
//! assert_eq!(postfix.to_string(), "1d4 2 + 2 *");
//!
//! let evaluation = postfix.evaluate().unwrap();
//! assert!((6.0..=12.0).contains(&evaluation.value));
//! ```
#![warn(missing_docs)]
#![warn(clippy::missing_errors_doc)]


#[cfg(test)]
mod roll_test_strategies;

mod error;
mod roll;
mod parser;

pub use error::Error;
pub use roll::{Dice, MAX_RECORDED_DICE};
pub use parser::{
    ErrorKind, LexError,
    Expression, Operation, Token,
    Evaluation, RollEvaluation,
    parse, evaluate, evaluate_with
};
