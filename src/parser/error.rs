/// The reasons lexing can stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum ErrorKind {
    /// A recognizer did not match at all and left the input untouched.
    /// Only used to fall through to the next recognizer, it never ends up in a token stream.
    #[error("This error should never be logged, internal error")]
    DidNotMatchPattern,

    /// No recognizer accepted the input at the current position.
    #[error("No types have matched, please check your input")]
    NoMatches,

    /// A dice term was started (`<int>d`) but its face count is missing.
    #[error("Expected Int")]
    ExpectedInt,
}


/// Where and why lexing stopped.
///
/// `stopped_at` borrows the unconsumed rest of the input, so the error
/// (and any [`crate::Expression`] holding it) cannot outlive the parsed string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("{kind}, stopped at: \"{stopped_at}\"")]
pub struct LexError<'a> {
    /// What went wrong.
    pub kind: ErrorKind,
    /// Byte offset of `stopped_at` inside the original input.
    pub position: usize,
    /// The remaining input from the point where lexing gave up.
    pub stopped_at: &'a str,
}

impl<'a> LexError<'a> {
    pub(crate) fn new(kind: ErrorKind, input: &'a str, position: usize) -> Self {
        Self { kind, position, stopped_at: &input[position..] }
    }

    /// Renders a human readable report pointing at the offending part of `original`.
    ///
    /// # Examples
    /// ```
    /// use postfix_dice::parse;
    ///
    /// let input = "1d-";
    /// let expr = parse(input);
    /// let error = expr.errors().next().unwrap();
    ///
    /// assert_eq!(
    ///     error.report(input),
    ///     "ERROR (Expected Int): \"1d-\"\nStopped at: \"-\""
    /// );
    /// ```
    pub fn report(&self, original: &str) -> String {
        format!("ERROR ({}): \"{original}\"\nStopped at: \"{}\"", self.kind, self.stopped_at)
    }
}
