use std::fmt;
use std::iter::Peekable;

use crate::error::Malformed;

/// Tokens used for parsing an arithmetic expression
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Plus,
    Minus,
    Divide,
    Multiply,
    Exponent,
    OpenParen,
    CloseParen,
    Number(f64),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Token::Plus => write!(f, "Plus"),
            Token::Minus => write!(f, "Minus"),
            Token::Divide => write!(f, "Divide"),
            Token::Multiply => write!(f, "Multiply"),
            Token::Exponent => write!(f, "Exponent"),
            Token::OpenParen => write!(f, "OpenParen"),
            Token::CloseParen => write!(f, "CloseParen"),
            Token::Number(n) => write!(f, "'{}'", n),
        }
    }
}

/// Display glyphs and their grammar spelling.
const GLYPHS: &[(&str, &str)] = &[("×", "*"), ("÷", "/"), ("xʸ", "^")];

/// Rewrite display-only operator glyphs into grammar operators.
pub fn normalize(input: &str) -> String {
    GLYPHS
        .iter()
        .fold(input.to_owned(), |acc, &(glyph, op)| acc.replace(glyph, op))
}

enum OperatorState {
    PotentiallyIncomplete,
    Complete,
    NotAnOperator,
}

trait IsOperator {
    fn is_operator(self) -> bool;
}

impl IsOperator for char {
    fn is_operator(self) -> bool {
        match self {
            '+' | '-' | '*' | '/' | '^' | '(' | ')' => true,
            _ => false,
        }
    }
}

trait CheckOperator {
    fn check_operator(self) -> OperatorState;
}

impl CheckOperator for char {
    fn check_operator(self) -> OperatorState {
        match self {
            '+' | '-' | '/' | '^' | '(' | ')' => OperatorState::Complete,
            '*' => OperatorState::PotentiallyIncomplete,
            _ => OperatorState::NotAnOperator,
        }
    }
}

trait OperatorMatch {
    fn operator_type(self) -> Option<Token>;
}

impl OperatorMatch for [char; 2] {
    fn operator_type(self) -> Option<Token> {
        if self == ['*', '*'] {
            Some(Token::Exponent)
        } else {
            None
        }
    }
}

impl OperatorMatch for char {
    fn operator_type(self) -> Option<Token> {
        match self {
            '+' => Some(Token::Plus),
            '-' => Some(Token::Minus),
            '/' => Some(Token::Divide),
            '*' => Some(Token::Multiply),
            '^' => Some(Token::Exponent),
            '(' => Some(Token::OpenParen),
            ')' => Some(Token::CloseParen),
            _ => None,
        }
    }
}

pub fn tokenize(input: &str) -> Result<Vec<Token>, Malformed> {
    let input = normalize(input);
    let mut tokens = Vec::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(&c) = chars.peek() {
        if c.is_alphabetic() {
            tokens.push(resolve_atom(consume_atom(&mut chars))?);
        } else if c.is_ascii_digit() || c == '.' {
            tokens.push(consume_number(&mut chars)?);
        } else {
            match c.check_operator() {
                OperatorState::Complete => {
                    chars.next();
                    tokens.push(operator(c)?);
                }
                OperatorState::PotentiallyIncomplete => {
                    chars.next();
                    match chars.peek() {
                        Some(&next_char) if next_char.is_operator() => {
                            match [c, next_char].operator_type() {
                                Some(token) => {
                                    tokens.push(token);
                                    chars.next();
                                }
                                None => tokens.push(operator(c)?),
                            }
                        }
                        _ => tokens.push(operator(c)?),
                    }
                }
                OperatorState::NotAnOperator => {
                    if c.is_whitespace() {
                        chars.next();
                    } else {
                        let token_string = consume_until_new_token(&mut chars);
                        return Err(Malformed::UnrecognizedToken(token_string));
                    }
                }
            }
        }
    }
    Ok(tokens)
}

fn operator(c: char) -> Result<Token, Malformed> {
    c.operator_type()
        .ok_or_else(|| Malformed::UnrecognizedToken(c.to_string()))
}

fn digits<I>(input: &mut Peekable<I>) -> String
    where I: Iterator<Item = char>
{
    let mut number = String::new();
    while let Some(&c) = input.peek() {
        if c.is_ascii_digit() {
            number.push(c);
        } else {
            break;
        }
        input.next();
    }
    number
}

/// Consume an unsigned decimal literal: digits on either side of an
/// optional single point, with at least one digit overall.
fn consume_number<I>(input: &mut Peekable<I>) -> Result<Token, Malformed>
    where I: Iterator<Item = char>
{
    let whole = digits(input);
    let literal = if let Some(&'.') = input.peek() {
        input.next();
        let frac = digits(input);
        if whole.is_empty() && frac.is_empty() {
            return Err(Malformed::InvalidNumber(".".into()));
        }
        [whole, ".".into(), frac].concat()
    } else {
        whole
    };
    literal
        .parse()
        .map(Token::Number)
        .map_err(|_| Malformed::InvalidNumber(literal))
}

/// Consume a run of alphabetic characters.
fn consume_atom<I: Iterator<Item = char>>(input: &mut Peekable<I>) -> String {
    let mut atom = String::new();
    while let Some(&c) = input.peek() {
        if c.is_alphabetic() {
            atom.push(c);
            input.next();
        } else {
            break;
        }
    }
    atom
}

/// The only words in the grammar are the non-finite values a previous
/// result can display as.
fn resolve_atom(atom: String) -> Result<Token, Malformed> {
    match atom.as_str() {
        "Infinity" => Ok(Token::Number(f64::INFINITY)),
        "NaN" => Ok(Token::Number(f64::NAN)),
        _ => Err(Malformed::UnrecognizedToken(atom)),
    }
}

fn consume_until_new_token<I: Iterator<Item = char>>(input: &mut I) -> String {
    input
        .take_while(
            |c| !(c.is_whitespace() || c.is_operator() || c.is_ascii_digit()),
        )
        .collect()
}
