use crate::Dice;
use crate::parser::{ErrorKind, LexError, Operation, Token};


type Recognizer<'a> = fn(&mut Lexer<'a>) -> Result<Token<'a>, ErrorKind>;


/// Splits a dice expression into tokens, one recognizer at a time.
///
/// Recognizers are tried in a fixed order at every position. A recognizer that does not
/// match returns [`ErrorKind::DidNotMatchPattern`] without moving the cursor, so the next one
/// can try the same input. Any other error is final.
#[derive(Debug)]
pub(crate) struct Lexer<'a> {
    input: &'a str,
    position: usize,
    expects_operand: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            position: 0,
            expects_operand: true,
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.position >= self.input.len()
    }

    pub fn next_token(&mut self) -> Result<Token<'a>, LexError<'a>> {
        let recognizers: [Recognizer<'a>; 4] = [
            Self::parenthesis,
            Self::operation,
            Self::dice,
            Self::number,
        ];

        for recognize in recognizers {
            self.skip_whitespace();

            match recognize(self) {
                Ok(token) => {
                    log::trace!("lexed {token} at position {}", self.position);
                    self.skip_whitespace();
                    self.expects_operand = !token.ends_operand();
                    return Ok(token);
                },
                Err(ErrorKind::DidNotMatchPattern) => continue,
                Err(kind) => return Err(self.error(kind))
            }
        }

        Err(self.error(ErrorKind::NoMatches))
    }

    pub fn skip_whitespace(&mut self) {
        while self.peek() == Some(b' ') {
            self.position += 1;
        }
    }

    fn error(&self, kind: ErrorKind) -> LexError<'a> {
        LexError::new(kind, self.input, self.position)
    }

    fn bytes(&self) -> &'a [u8] {
        self.input.as_bytes()
    }

    fn peek(&self) -> Option<u8> {
        self.bytes().get(self.position).copied()
    }

    fn eat(&mut self, byte: u8) -> bool {
        if self.peek() == Some(byte) {
            self.position += 1;
            true
        } else {
            false
        }
    }

    fn parenthesis(&mut self) -> Result<Token<'a>, ErrorKind> {
        if self.eat(b'(') {
            return Ok(Token::OpenParen);
        }

        if self.eat(b')') {
            return Ok(Token::CloseParen);
        }

        Err(ErrorKind::DidNotMatchPattern)
    }

    fn operation(&mut self) -> Result<Token<'a>, ErrorKind> {
        let op = self.peek()
            .map(char::from)
            .and_then(Operation::from_symbol)
            .ok_or(ErrorKind::DidNotMatchPattern)?;

        // Where an operand is expected, a sign directly followed by a number is part of
        // that number (`-120`). A sign is never part of a dice term (`-3d6`).
        if self.expects_operand
            && matches!(op, Operation::Add | Operation::Sub)
            && self.signed_number_follows()
        {
            return Err(ErrorKind::DidNotMatchPattern);
        }

        self.position += 1;
        Ok(Token::Operation(op))
    }

    fn signed_number_follows(&self) -> bool {
        scan_float(self.bytes(), self.position)
            .is_some_and(|end| self.bytes().get(end) != Some(&b'd'))
    }

    fn dice(&mut self) -> Result<Token<'a>, ErrorKind> {
        let start = self.position;

        let Some(amount) = self.read_uint() else {
            return Err(ErrorKind::DidNotMatchPattern);
        };

        if !self.eat(b'd') {
            self.position = start;
            return Err(ErrorKind::DidNotMatchPattern);
        }

        let faces = self.read_uint().ok_or(ErrorKind::ExpectedInt)?;

        Ok(Token::Dice(Dice::new(amount, faces)))
    }

    fn number(&mut self) -> Result<Token<'a>, ErrorKind> {
        let end = scan_float(self.bytes(), self.position).ok_or(ErrorKind::DidNotMatchPattern)?;

        let value: f32 = self.input[self.position..end]
            .parse()
            .map_err(|_| ErrorKind::DidNotMatchPattern)?;

        self.position = end;
        Ok(Token::Number(value))
    }

    /// Reads an unsigned integer made of ascii digits only.
    /// Leaves the cursor untouched if there is none or it does not fit.
    fn read_uint(&mut self) -> Option<u32> {
        let digits = count_digits(self.bytes(), self.position);
        let value = self.input[self.position..self.position + digits].parse().ok()?;

        self.position += digits;
        Some(value)
    }
}


fn count_digits(bytes: &[u8], from: usize) -> usize {
    bytes[from..].iter()
        .take_while(|byte| byte.is_ascii_digit())
        .count()
}

/// Finds the end of the float literal starting at `start`:
/// `[+-] digits [. digits] [(e|E) [+-] digits]` with at least one mantissa digit.
fn scan_float(bytes: &[u8], start: usize) -> Option<usize> {
    let mut end = start;

    if matches!(bytes.get(end), Some(b'+' | b'-')) {
        end += 1;
    }

    let integer = count_digits(bytes, end);
    end += integer;

    let mut fraction = 0;
    if bytes.get(end) == Some(&b'.') {
        fraction = count_digits(bytes, end + 1);

        if integer + fraction > 0 {
            end += 1 + fraction;
        }
    }

    if integer + fraction == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exponent = end + 1;

        if matches!(bytes.get(exponent), Some(b'+' | b'-')) {
            exponent += 1;
        }

        let digits = count_digits(bytes, exponent);
        if digits > 0 {
            end = exponent + digits;
        }
    }

    Some(end)
}
