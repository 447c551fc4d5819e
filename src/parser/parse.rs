use rand::Rng;
use crate::Error;
use crate::parser::{Evaluation, Expression, Lexer, Token};
use crate::roll::with_global_rng;


/// Lexes a dice notation string into an infix [`Expression`].
///
/// Lexing never fails as a whole: if the input cannot be tokenized, the returned
/// expression holds every token read so far followed by one [`Token::Error`] describing
/// where and why lexing stopped. Empty (or all blank) input gives an empty expression.
///
/// Only `' '` counts as whitespace.
///
/// # Examples
/// ```
/// use postfix_dice::{parse, Dice, Operation, Token};
///
/// let expr = parse("  3d8   +   2d4  ");
/// assert_eq!(&expr[..], &[
///     Token::Dice(Dice::new(3, 8)),
///     Token::Operation(Operation::Add),
///     Token::Dice(Dice::new(2, 4)),
/// ]);
///
/// let expr = parse("Xd2");
/// assert!(expr.has_errors());
/// assert_eq!(expr.errors().next().unwrap().stopped_at, "Xd2");
/// ```
pub fn parse(input: &str) -> Expression<'_> {
    let mut lexer = Lexer::new(input);
    let mut expr = Expression::new();

    lexer.skip_whitespace();

    while !lexer.is_exhausted() {
        match lexer.next_token() {
            Ok(token) => expr.append(token),
            Err(error) => {
                log::debug!("lexing of {input:?} stopped at position {}: {}", error.position, error.kind);
                expr.append(Token::Error(error));
                break;
            }
        }
    }

    expr
}


/// Parses and evaluates an infix dice notation string, rolling dice with the
/// process-wide generator.
///
/// This runs the whole pipeline: lexing, error and balance checks, conversion to
/// postfix and evaluation.
///
/// # Errors
/// - [`Error::Lex`] if the input cannot be tokenized.
/// - [`Error::UnbalancedParenthesis`] if parenthesis do not match.
/// - Any error of [`Expression::evaluate()`].
///
/// # Examples
/// ```
/// use postfix_dice::{evaluate, Error};
///
/// let evaluation = evaluate("3d8 + 2d4").unwrap();
/// assert!((5.0..=32.0).contains(&evaluation.value));
/// assert_eq!(evaluation.rolls.len(), 2);
///
/// assert_eq!(evaluate("(1 + 2"), Err(Error::UnbalancedParenthesis));
/// ```
pub fn evaluate(input: &str) -> Result<Evaluation, Error> {
    with_global_rng(|rng| evaluate_with(input, rng))
}

/// Same as [`evaluate()`] but dice are rolled with `rng`.
///
/// # Errors
/// Same as [`evaluate()`].
pub fn evaluate_with<R: Rng + ?Sized>(input: &str, rng: &mut R) -> Result<Evaluation, Error> {
    let infix = parse(input);

    if let Some(error) = infix.errors().next() {
        return Err((*error).into());
    }

    if !infix.is_balanced() {
        return Err(Error::UnbalancedParenthesis);
    }

    infix.to_postfix().evaluate_with(rng)
}


#[cfg(test)]
mod test {
    use proptest::prelude::*;
    use super::*;
    use crate::Dice;
    use crate::parser::{ErrorKind, Operation};
    use crate::parser::str_test_strategies::*;
    use crate::roll_test_strategies::seeded_rng;


    proptest! {
        #[test]
        fn test_evaluate_function(expr in dice_expression_strategy()) {
            prop_assert!(evaluate(&expr).is_ok());
        }

        #[test]
        fn test_parse_dice(amount in 1u32..=1000, faces in 1u32..=1000) {
            let input = format!("{amount}d{faces}");
            let expr = parse(&input);

            prop_assert_eq!(&expr[..], &[Token::Dice(Dice::new(amount, faces))]);
        }

        #[test]
        fn test_evaluate_matches_pipeline(expr in dice_expression_strategy(), seed: u64) {
            let direct = evaluate_with(&expr, &mut seeded_rng(seed)).unwrap();
            let staged = parse(&expr).to_postfix().evaluate_with(&mut seeded_rng(seed)).unwrap();

            prop_assert_eq!(direct.value.to_bits(), staged.value.to_bits());
            prop_assert_eq!(direct.rolls, staged.rolls);
        }

        #[test]
        fn test_edge_case_white_space(input in " *") {
            prop_assert!(parse(&input).is_empty());
            prop_assert_eq!(evaluate(&input), Err(Error::Empty));
        }
    }

    #[test]
    fn test_leading_sign_dice() {
        assert_eq!(&parse("+3d6")[..], &[
            Token::Operation(Operation::Add),
            Token::Dice(Dice::new(3, 6)),
        ]);

        assert_eq!(&parse("-3d6")[..], &[
            Token::Operation(Operation::Sub),
            Token::Dice(Dice::new(3, 6)),
        ]);
    }

    #[test]
    fn test_negative_number() {
        assert_eq!(&parse("-120")[..], &[Token::Number(-120.0)]);
    }

    #[test]
    fn test_no_matches() {
        let expr = parse("Xd2");

        assert_eq!(expr.len(), 1);
        let error = expr.errors().next().unwrap();
        assert_eq!(error.kind, ErrorKind::NoMatches);
        assert_eq!(error.stopped_at, "Xd2");
    }

    #[test]
    fn test_error_report() {
        let input = "2 + 1d4 + ?";
        let expr = parse(input);
        let error = expr.errors().next().unwrap();

        assert_eq!(error.position, 10);
        assert_eq!(
            error.report(input),
            "ERROR (No types have matched, please check your input): \"2 + 1d4 + ?\"\nStopped at: \"?\""
        );
    }

    #[test]
    fn test_evaluate_errors() {
        assert_eq!(evaluate("1d-"), Err(Error::Lex {
            kind: ErrorKind::ExpectedInt,
            position: 2,
            remaining: "-".into()
        }));

        assert_eq!(evaluate("((3d8+2))-2)*2d4)"), Err(Error::UnbalancedParenthesis));
        assert_eq!(evaluate("1 + * 2"), Err(Error::StackUnderflow(Operation::Add)));
    }

    #[test]
    fn test_evaluate_dice_free() {
        assert_eq!(evaluate("(20 * 10) / (2 + 2)").unwrap().value, 50.0);
        assert_eq!(evaluate("-120 + 20").unwrap().value, -100.0);
    }

    #[test]
    fn test_error_display() {
        let error = Error::from(*parse("1d").errors().next().unwrap());
        assert_eq!(error.to_string(), "Expected Int at position 2, stopped at: \"\"");
    }
}
