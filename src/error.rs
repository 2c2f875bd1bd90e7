use thiserror::Error;

/// The ways an expression can fail to match the grammar.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Malformed {
    #[error("invalid number: {0}")]
    InvalidNumber(String),
    #[error("unrecognized token: {0}")]
    UnrecognizedToken(String),
    #[error("expected {1} token, got {0} instead")]
    UnexpectedToken(String, &'static str),
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,
    #[error("unmatched parenthesis")]
    UnmatchedParenthesis,
    #[error("unconsumed input after expression: {0}")]
    TrailingInput(String),
    #[error("expression nested deeper than {0} levels")]
    TooDeep(usize),
}

/// Failure of the arithmetic evaluator. Arithmetic itself never fails
/// (division by zero yields an infinity), so every failure is a
/// malformed expression.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    #[error("malformed expression: {0}")]
    Malformed(#[from] Malformed),
}

/// Failure of a scientific function applied to the current operand.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    /// The operand could not be read as a number. Callers leave the
    /// operand untouched.
    #[error("not a number: {0}")]
    NotANumber(String),
    /// Factorial is only defined for non-negative integers.
    #[error("factorial is undefined for {0}")]
    Factorial(f64),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum KeyError {
    #[error("unknown key: {0}")]
    Unknown(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        let cases = vec![
            (
                EvalError::from(Malformed::UnmatchedParenthesis).to_string(),
                "malformed expression: unmatched parenthesis",
            ),
            (
                Malformed::UnexpectedToken("CloseParen".into(), "number")
                    .to_string(),
                "expected number token, got CloseParen instead",
            ),
            (
                DomainError::Factorial(2.5).to_string(),
                "factorial is undefined for 2.5",
            ),
        ];
        for (output, expected) in cases {
            assert_eq!(output, expected);
        }
    }
}
