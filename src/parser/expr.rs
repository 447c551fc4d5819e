use std::fmt::Display;
use std::ops::Deref;
use crate::Dice;
use crate::parser::LexError;

const DEFAULT_CAPACITY: usize = 2;


/// The four binary operations of the dice language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Operation {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
}

impl Operation {
    /// Maps an operator character to its operation.
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '+' => Some(Operation::Add),
            '-' => Some(Operation::Sub),
            '*' => Some(Operation::Mul),
            '/' => Some(Operation::Div),
            _ => None
        }
    }

    /// The character this operation is written with.
    pub fn symbol(&self) -> char {
        match self {
            Operation::Add => '+',
            Operation::Sub => '-',
            Operation::Mul => '*',
            Operation::Div => '/'
        }
    }

    /// Binding strength used by the postfix conversion, `*` and `/` bind tighter than `+` and `-`.
    pub const fn precedence(&self) -> u8 {
        match self {
            Operation::Add | Operation::Sub => 1,
            Operation::Mul | Operation::Div => 2
        }
    }

    /// Applies the operation. Division follows IEEE semantics, dividing by zero
    /// yields an infinity or NaN.
    pub fn apply(&self, left: f32, right: f32) -> f32 {
        use Operation as Op;
        match self {
            Op::Add => left + right,
            Op::Sub => left - right,
            Op::Mul => left * right,
            Op::Div => left / right
        }
    }
}

impl Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}


/// A single lexed item.
///
/// Only the last token of a lexed stream can be a [`Token::Error`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Token<'a> {
    /// A dice term, rolled only at evaluation.
    Dice(Dice),
    /// A binary operation.
    Operation(Operation),
    /// A constant, signs included (`-120`).
    Number(f32),
    /// `(`
    OpenParen,
    /// `)`
    CloseParen,
    /// Lexing stopped here.
    Error(LexError<'a>),
}

impl Token<'_> {
    /// `true` for tokens that produce a value: numbers, dice and a closing parenthesis.
    pub(crate) fn ends_operand(&self) -> bool {
        matches!(self, Token::Number(_) | Token::Dice(_) | Token::CloseParen)
    }
}

impl Display for Token<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Dice(dice) => write!(f, "{dice}"),
            Token::Operation(op) => write!(f, "{op}"),
            Token::Number(value) => write!(f, "{value}"),
            Token::OpenParen => write!(f, "("),
            Token::CloseParen => write!(f, ")"),
            Token::Error(_) => write!(f, "ERROR")
        }
    }
}

impl From<Dice> for Token<'_> {
    fn from(value: Dice) -> Self {
        Self::Dice(value)
    }
}

impl From<Operation> for Token<'_> {
    fn from(value: Operation) -> Self {
        Self::Operation(value)
    }
}

impl From<f32> for Token<'_> {
    fn from(value: f32) -> Self {
        Self::Number(value)
    }
}


/// An ordered stream of tokens, either in infix order (as lexed) or in postfix order
/// (after [`Expression::to_postfix()`]).
///
/// It dereferences to `[Token]` for inspection.
#[derive(Debug, Clone, PartialEq)]
pub struct Expression<'a> {
    tokens: Vec<Token<'a>>
}

impl<'a> Expression<'a> {
    /// Creates an empty expression with a small initial capacity.
    pub fn new() -> Self {
        Self { tokens: Vec::with_capacity(DEFAULT_CAPACITY) }
    }

    /// Appends a token at the end of the stream.
    pub fn append<T: Into<Token<'a>>>(&mut self, token: T) {
        self.tokens.push(token.into());
    }

    /// The number of tokens the expression can hold without reallocating.
    pub fn capacity(&self) -> usize {
        self.tokens.capacity()
    }

    /// Frees the backing storage, leaving an empty expression with zero capacity.
    ///
    /// # Examples
    /// ```
    /// use postfix_dice::parse;
    ///
    /// let mut expr = parse("1d4 + 2");
    /// expr.release();
    ///
    /// assert!(expr.is_empty());
    /// assert_eq!(expr.capacity(), 0);
    /// ```
    pub fn release(&mut self) {
        self.tokens = Vec::new();
    }

    /// Iterates over the error tokens of the stream.
    pub fn errors(&self) -> impl Iterator<Item = &LexError<'a>> {
        self.tokens.iter().filter_map(|token| match token {
            Token::Error(error) => Some(error),
            _ => None
        })
    }

    /// `true` if lexing stopped on an error.
    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }
}

impl Default for Expression<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> Deref for Expression<'a> {
    type Target = [Token<'a>];

    fn deref(&self) -> &Self::Target {
        &self.tokens
    }
}

impl<'a> FromIterator<Token<'a>> for Expression<'a> {
    fn from_iter<T: IntoIterator<Item = Token<'a>>>(iter: T) -> Self {
        Self { tokens: iter.into_iter().collect() }
    }
}

impl<'a> IntoIterator for Expression<'a> {
    type Item = Token<'a>;
    type IntoIter = std::vec::IntoIter<Token<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.into_iter()
    }
}

impl Display for Expression<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut tokens = self.tokens.iter();

        if let Some(first) = tokens.next() {
            write!(f, "{first}")?;
        }

        tokens.try_for_each(|token| write!(f, " {token}"))
    }
}
