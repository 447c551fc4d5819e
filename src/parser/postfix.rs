use crate::parser::{Expression, Token};


impl<'a> Expression<'a> {
    /// Checks that every `(` has a matching `)` and no `)` comes before its `(`.
    /// Only parenthesis nesting is checked, operator arity is not.
    ///
    /// # Examples
    /// ```
    /// use postfix_dice::parse;
    ///
    /// assert!(parse("((3d8 + 2) - 2) * 2d4").is_balanced());
    /// assert!(!parse("((3d8 + 2)) - 2) * 2d4)").is_balanced());
    /// ```
    pub fn is_balanced(&self) -> bool {
        let mut depth = 0usize;

        for token in self.iter() {
            match token {
                Token::OpenParen => depth += 1,
                Token::CloseParen => match depth.checked_sub(1) {
                    Some(remaining) => depth = remaining,
                    None => return false
                },
                _ => {}
            }
        }

        depth == 0
    }

    /// Reorders an infix expression into postfix (reverse polish) order using the
    /// shunting-yard algorithm. Operators of equal precedence associate to the left and
    /// parenthesis are consumed.
    ///
    /// Balance is not checked here, call [`Expression::is_balanced()`] first:
    /// the operator order produced for unbalanced input is meaningless.
    ///
    /// # Examples
    /// ```
    /// use postfix_dice::parse;
    ///
    /// let postfix = parse("(3d6 - 2) * 10").to_postfix();
    /// assert_eq!(postfix.to_string(), "3d6 2 - 10 *");
    /// ```
    pub fn to_postfix(&self) -> Expression<'a> {
        let mut operators: Vec<Token<'a>> = Vec::new();
        let mut output = Expression::new();

        for &token in self.iter() {
            match token {
                Token::Dice(_) | Token::Number(_) | Token::Error(_) => output.append(token),

                Token::Operation(op) => {
                    while let Some(&Token::Operation(top)) = operators.last() {
                        if top.precedence() < op.precedence() {
                            break;
                        }

                        operators.pop();
                        output.append(top);
                    }

                    operators.push(token);
                },

                Token::OpenParen => operators.push(token),

                Token::CloseParen => {
                    while let Some(top) = operators.pop() {
                        if top == Token::OpenParen {
                            break;
                        }

                        output.append(top);
                    }
                }
            }
        }

        while let Some(top) = operators.pop() {
            if top != Token::OpenParen {
                output.append(top);
            }
        }

        output
    }
}


#[cfg(test)]
mod test {
    use proptest::prelude::*;
    use crate::{parse, Dice};
    use crate::parser::{Operation, Token};
    use crate::parser::str_test_strategies::*;


    fn operands(tokens: &[Token<'_>]) -> Vec<String> {
        tokens.iter()
            .filter(|token| matches!(token, Token::Dice(_) | Token::Number(_)))
            .map(|token| token.to_string())
            .collect()
    }

    proptest! {
        #[test]
        fn test_generated_expressions_are_balanced(expr in dice_expression_strategy()) {
            prop_assert!(parse(&expr).is_balanced());
        }

        #[test]
        fn test_extra_paren_is_unbalanced(expr in dice_expression_strategy(), open: bool) {
            let input = if open { format!("({expr}") } else { format!("{expr})") };
            prop_assert!(!parse(&input).is_balanced());
        }

        #[test]
        fn test_postfix_shape(expr in dice_expression_strategy()) {
            let infix = parse(&expr);
            let postfix = infix.to_postfix();

            let operands = postfix.iter()
                .filter(|token| matches!(token, Token::Dice(_) | Token::Number(_)))
                .count();
            let operators = postfix.iter()
                .filter(|token| matches!(token, Token::Operation(_)))
                .count();

            prop_assert!(postfix.iter().all(|token| !matches!(token, Token::OpenParen | Token::CloseParen)));
            prop_assert_eq!(operands, operators + 1);
            prop_assert_eq!(postfix.len(), operands + operators);
            prop_assert!(matches!(postfix.first(), Some(Token::Dice(_) | Token::Number(_))));
            prop_assert!(infix.len() >= postfix.len());
        }

        #[test]
        fn test_postfix_keeps_operand_order(expr in dice_expression_strategy()) {
            let infix = parse(&expr);
            let postfix = infix.to_postfix();

            prop_assert_eq!(operands(&infix[..]), operands(&postfix[..]));
        }
    }

    #[test]
    fn test_balanced() {
        assert!(parse("((3d8 + 2) - 2) * 2d4").is_balanced());
        assert!(parse("").is_balanced());
        assert!(parse("1d4 + 2").is_balanced());
    }

    #[test]
    fn test_unbalanced() {
        assert!(!parse("((3d8+2))-2)*2d4)").is_balanced());
        assert!(!parse("((((3d8+2)-)2)*2d4").is_balanced());
        assert!(!parse(")(").is_balanced());
    }

    #[test]
    fn test_precedence() {
        let postfix = parse("3d6 - 2 * 10").to_postfix();

        assert_eq!(&postfix[..], &[
            Token::Dice(Dice::new(3, 6)),
            Token::Number(2.0),
            Token::Number(10.0),
            Token::Operation(Operation::Mul),
            Token::Operation(Operation::Sub),
        ]);
    }

    #[test]
    fn test_parenthesis() {
        let postfix = parse("(3d6 - 2) * 10").to_postfix();

        assert_eq!(&postfix[..], &[
            Token::Dice(Dice::new(3, 6)),
            Token::Number(2.0),
            Token::Operation(Operation::Sub),
            Token::Number(10.0),
            Token::Operation(Operation::Mul),
        ]);
    }

    #[test]
    fn test_left_associativity() {
        assert_eq!(parse("8 - 4 - 2").to_postfix().to_string(), "8 4 - 2 -");
        assert_eq!(parse("8 / 4 * 2").to_postfix().to_string(), "8 4 / 2 *");
        assert_eq!(parse("1 + 2 * 3 - 4").to_postfix().to_string(), "1 2 3 * + 4 -");
    }

    #[test]
    fn test_nested_parenthesis() {
        let postfix = parse("((3d8 + 2) - 2) * 2d4").to_postfix();
        assert_eq!(postfix.to_string(), "3d8 2 + 2 - 2d4 *");
    }

    #[test]
    fn test_postfix_input_is_left_unchanged() {
        for input in ["3d6 2 10 * -", "8 4 -", "1 2 3 * +"] {
            let postfix = parse(input);
            assert_eq!(postfix.to_postfix(), postfix, "{input}");
        }
    }

    #[test]
    fn test_does_not_mutate_input() {
        let infix = parse("(1d4 + 2) * 2");
        let copy = infix.clone();

        let _ = infix.to_postfix();
        assert_eq!(infix, copy);
    }

    #[test]
    fn test_unbalanced_does_not_panic() {
        assert_eq!(parse("1 + 2)").to_postfix().to_string(), "1 2 +");
        assert_eq!(parse("(1 + 2").to_postfix().to_string(), "1 2 +");
    }

    #[test]
    fn test_error_token_is_kept() {
        let postfix = parse("1 + 2d").to_postfix();
        assert!(postfix.has_errors());
    }
}
