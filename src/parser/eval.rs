use rand::Rng;
use crate::{Dice, Error};
use crate::parser::{Expression, Token};
use crate::roll::with_global_rng;


/// The outcome of evaluating a postfix expression.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Evaluation {
    /// The final value.
    pub value: f32,
    /// Every dice term that was rolled, in evaluation order.
    pub rolls: Vec<RollEvaluation>
}


/// A single rolled dice term and the individual results of each die.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RollEvaluation {
    /// The rolled term.
    pub dice: Dice,
    /// Each die result, in draw order.
    pub values: Vec<u32>,
    /// The sum of `values`.
    pub value: f32
}

impl RollEvaluation {
    fn roll<R: Rng + ?Sized>(dice: Dice, rng: &mut R) -> Result<Self, Error> {
        let (values, value) = dice.record_values(rng)?;

        Ok(Self { dice, values, value })
    }
}


impl Expression<'_> {
    /// Evaluates a postfix expression, rolling every dice term with the process-wide generator.
    ///
    /// Dice are rolled the moment the evaluation reaches them, never before.
    ///
    /// # Errors
    /// - [`Error::Lex`] if the expression holds an error token.
    /// - [`Error::UnexpectedToken`] if the expression holds a parenthesis (it is not in postfix order).
    /// - [`Error::StackUnderflow`] if an operation lacks operands.
    /// - [`Error::TrailingOperands`] if operands are left without an operation.
    /// - [`Error::Empty`] if there is nothing to evaluate.
    /// - [`Error::InvalidDice`] if a dice term has zero faces.
    /// - [`Error::TooManyDice`] if a dice term has more than [`crate::MAX_RECORDED_DICE`] dice.
    ///
    /// # Examples
    /// ```
    /// use postfix_dice::parse;
    ///
    /// let postfix = parse("20 10 * 2 2 + /");
    /// assert_eq!(postfix.evaluate().unwrap().value, 50.0);
    ///
    /// let postfix = parse("(1d4 + 2) * 2").to_postfix();
    /// let evaluation = postfix.evaluate().unwrap();
    /// assert!((6.0..=12.0).contains(&evaluation.value));
    /// assert_eq!(evaluation.rolls.len(), 1);
    /// ```
    pub fn evaluate(&self) -> Result<Evaluation, Error> {
        with_global_rng(|rng| self.evaluate_with(rng))
    }

    /// Evaluates a postfix expression, rolling every dice term with `rng`.
    /// See [`Expression::evaluate()`].
    ///
    /// # Errors
    /// Same as [`Expression::evaluate()`].
    pub fn evaluate_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Evaluation, Error> {
        let mut stack: Vec<f32> = Vec::new();
        let mut rolls = Vec::new();

        for &token in self.iter() {
            match token {
                Token::Number(value) => stack.push(value),

                Token::Dice(dice) => {
                    let roll = RollEvaluation::roll(dice, rng)?;
                    stack.push(roll.value);
                    rolls.push(roll);
                },

                Token::Operation(op) => {
                    let right = stack.pop().ok_or(Error::StackUnderflow(op))?;
                    let left = stack.pop().ok_or(Error::StackUnderflow(op))?;

                    stack.push(op.apply(left, right));
                },

                Token::Error(error) => return Err(error.into()),

                Token::OpenParen | Token::CloseParen => return Err(Error::UnexpectedToken(token.to_string()))
            }
        }

        let value = stack.pop().ok_or(Error::Empty)?;

        if !stack.is_empty() {
            return Err(Error::TrailingOperands(stack.len()));
        }

        log::debug!("evaluated `{self}` to {value} with {} dice rolls", rolls.len());
        Ok(Evaluation { value, rolls })
    }
}
