use crate::Dice;
use crate::parser::{ErrorKind, LexError, Operation};


/// Everything that can go wrong from text to value.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// Lexing stopped before the end of the input.
    #[error("{kind} at position {position}, stopped at: \"{remaining}\"")]
    Lex {
        /// Why lexing stopped.
        kind: ErrorKind,
        /// Byte offset of the first unconsumed character.
        position: usize,
        /// The unconsumed input.
        remaining: String
    },

    /// Some parenthesis is never closed or never opened.
    #[error("Parenthesis are not balanced")]
    UnbalancedParenthesis,

    /// A dice with zero faces was rolled.
    #[error("Invalid dice {0}: a die needs at least one face")]
    InvalidDice(Dice),

    /// Too many dice to keep every individual value.
    #[error("Too many dice in {0} to record each roll, at most {max} are allowed", max = crate::MAX_RECORDED_DICE)]
    TooManyDice(Dice),

    /// An operation found fewer than two operands.
    #[error("Not enough operands for {0}")]
    StackUnderflow(Operation),

    /// A parenthesis reached the evaluator.
    #[error("Unexpected token in postfix expression: {0}")]
    UnexpectedToken(String),

    /// Nothing to evaluate.
    #[error("Expression is empty")]
    Empty,

    /// Operands left on the stack once the expression ran out.
    #[error("Expression left {0} operands without an operator")]
    TrailingOperands(usize)
}

impl From<LexError<'_>> for Error {
    fn from(value: LexError<'_>) -> Self {
        Error::Lex {
            kind: value.kind,
            position: value.position,
            remaining: value.stopped_at.into()
        }
    }
}
