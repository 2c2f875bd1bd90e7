use tracing::trace;

use crate::error::Malformed;
use crate::token::*;

#[derive(Clone, Debug)]
pub struct IntermediateResult {
    value: f64,
    tokens_read: usize,
}

impl IntermediateResult {
    pub fn new(value: f64, tokens_read: usize) -> Self {
        IntermediateResult { value, tokens_read }
    }
}

/// Error for a token found where an operator (or the end of the
/// enclosing expression) was expected.
fn expect_operator(token: &Token) -> Result<(), Malformed> {
    match *token {
        Token::Number(_) | Token::OpenParen => {
            Err(Malformed::UnexpectedToken(token.to_string(), "operator"))
        }
        _ => Ok(()),
    }
}

/// Nesting allowed for parentheses and exponent chains before the
/// expression is rejected.
pub const MAX_DEPTH: usize = 256;

fn descend(depth: usize) -> Result<usize, Malformed> {
    if depth >= MAX_DEPTH {
        Err(Malformed::TooDeep(MAX_DEPTH))
    } else {
        Ok(depth + 1)
    }
}

// Addition and subtraction
fn e_expr(
    token_list: &[Token],
    depth: usize,
) -> Result<IntermediateResult, Malformed> {
    let mut t1 = t_expr(token_list, depth)?;
    let mut index = t1.tokens_read;

    while index < token_list.len() {
        match token_list[index] {
            Token::Plus => {
                let t2 = t_expr(&token_list[index + 1..], depth)?;
                t1.value += t2.value;
                t1.tokens_read += t2.tokens_read + 1;
            }
            Token::Minus => {
                let t2 = t_expr(&token_list[index + 1..], depth)?;
                t1.value -= t2.value;
                t1.tokens_read += t2.tokens_read + 1;
            }
            ref other => {
                expect_operator(other)?;
                break;
            }
        };
        index = t1.tokens_read;
    }
    Ok(t1)
}

// Multiplication and division
fn t_expr(
    token_list: &[Token],
    depth: usize,
) -> Result<IntermediateResult, Malformed> {
    let mut f1 = f_expr(token_list, depth)?;
    let mut index = f1.tokens_read;

    while index < token_list.len() {
        match token_list[index] {
            Token::Multiply => {
                let f2 = f_expr(&token_list[index + 1..], depth)?;
                f1.value *= f2.value;
                f1.tokens_read += f2.tokens_read + 1;
            }
            // IEEE division: a zero divisor yields a signed infinity or NaN.
            Token::Divide => {
                let f2 = f_expr(&token_list[index + 1..], depth)?;
                f1.value /= f2.value;
                f1.tokens_read += f2.tokens_read + 1;
            }
            ref other => {
                expect_operator(other)?;
                break;
            }
        }
        index = f1.tokens_read;
    }
    Ok(f1)
}

// Exponentiation, right associative
fn f_expr(
    token_list: &[Token],
    depth: usize,
) -> Result<IntermediateResult, Malformed> {
    let mut u1 = u_expr(token_list, depth)?;
    let index = u1.tokens_read;
    if let Some(Token::Exponent) = token_list.get(index) {
        let f = f_expr(&token_list[index + 1..], descend(depth)?)?;
        u1.value = u1.value.powf(f.value);
        u1.tokens_read += f.tokens_read + 1;
    }
    Ok(u1)
}

// Optional unary minus
fn u_expr(
    token_list: &[Token],
    depth: usize,
) -> Result<IntermediateResult, Malformed> {
    match token_list.first() {
        Some(Token::Minus) => {
            let mut ir = g_expr(&token_list[1..], depth)?;
            ir.value = -ir.value;
            ir.tokens_read += 1;
            Ok(ir)
        }
        _ => g_expr(token_list, depth),
    }
}

// Numbers and parenthesized expressions
fn g_expr(
    token_list: &[Token],
    depth: usize,
) -> Result<IntermediateResult, Malformed> {
    if !token_list.is_empty() {
        match token_list[0] {
            Token::Number(n) => Ok(IntermediateResult::new(n, 1)),
            Token::OpenParen => {
                let ir = e_expr(&token_list[1..], descend(depth)?)?;
                let close_paren = ir.tokens_read + 1;
                if close_paren < token_list.len() {
                    match token_list[close_paren] {
                        Token::CloseParen => Ok(IntermediateResult::new(
                            ir.value,
                            close_paren + 1,
                        )),
                        _ => Err(Malformed::UnexpectedToken(
                            token_list[close_paren].to_string(),
                            ")",
                        )),
                    }
                } else {
                    Err(Malformed::UnmatchedParenthesis)
                }
            }
            _ => Err(Malformed::UnexpectedToken(
                token_list[0].to_string(),
                "number",
            )),
        }
    } else {
        Err(Malformed::UnexpectedEndOfInput)
    }
}

/// Evaluate a token list, requiring that every token is consumed.
pub fn parse(tokens: &[Token]) -> Result<f64, Malformed> {
    trace!(?tokens, "parsing");
    let answer = e_expr(tokens, 0)?;
    match tokens.get(answer.tokens_read) {
        None => Ok(answer.value),
        Some(Token::CloseParen) => Err(Malformed::UnmatchedParenthesis),
        Some(token) => Err(Malformed::TrailingInput(token.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(input: &str) -> Result<f64, Malformed> {
        tokenize(input).and_then(|tokens| parse(&tokens))
    }

    #[test]
    fn precedence() {
        let cases = vec![
            ("2+3*4", 14.0),
            ("(2+3)*4", 20.0),
            ("2^3^2", 512.0),
            ("10-4-3", 3.0),
            ("64/4/2", 8.0),
            ("2*3^2", 18.0),
            ("-2^2", 4.0),
            ("5--3", 8.0),
            ("-(1+2)*3", -9.0),
            ("((4))", 4.0),
            ("0", 0.0),
        ];
        for (input, expected) in cases {
            assert_eq!(run(input), Ok(expected), "{}", input);
        }
    }

    #[test]
    fn division_by_zero() {
        assert_eq!(run("1/0"), Ok(f64::INFINITY));
        assert_eq!(run("-1/0"), Ok(f64::NEG_INFINITY));
        assert!(run("0/0").map(f64::is_nan).unwrap_or(false));
    }

    #[test]
    fn malformed() {
        let cases = vec![
            ("(1+2", Malformed::UnmatchedParenthesis),
            ("1+2)", Malformed::UnmatchedParenthesis),
            ("", Malformed::UnexpectedEndOfInput),
            ("2+", Malformed::UnexpectedEndOfInput),
            ("()", Malformed::UnexpectedToken("CloseParen".into(), "number")),
            ("*3", Malformed::UnexpectedToken("Multiply".into(), "number")),
            ("(5)0", Malformed::UnexpectedToken("'0'".into(), "operator")),
            ("--3", Malformed::UnexpectedToken("Minus".into(), "number")),
            ("(1 2)", Malformed::UnexpectedToken("'2'".into(), "operator")),
        ];
        for (input, expected) in cases {
            assert_eq!(run(input), Err(expected), "{}", input);
        }
    }

    #[test]
    fn nesting_limit() {
        let nested = |n: usize| format!("{}1{}", "(".repeat(n), ")".repeat(n));
        assert_eq!(run(&nested(MAX_DEPTH)), Ok(1.0));
        assert_eq!(
            run(&nested(MAX_DEPTH + 1)),
            Err(Malformed::TooDeep(MAX_DEPTH))
        );
        assert_eq!(
            run(&nested(10_000)),
            Err(Malformed::TooDeep(MAX_DEPTH))
        );
        let tower = vec!["1"; 10_000].join("^");
        assert_eq!(run(&tower), Err(Malformed::TooDeep(MAX_DEPTH)));
    }
}
