//! Scientific calculator core.
//!
//! [`Calculator`] accumulates key presses into an expression and [`eval`]
//! turns a finished expression into a number.

mod calculator;
mod error;
mod function;
mod key;
mod parse;
mod token;
mod value;


pub use calculator::{Calculator, ERROR};
pub use error::{DomainError, EvalError, KeyError, Malformed};
pub use function::{factorial, AngleMode, Function, Trig};
pub use key::{parse_keys, Constant, Key};
pub use value::{format_value, DisplayValue};

/// Evaluate an arithmetic expression over `+ - * / ^`, parentheses and
/// unary minus. The display glyphs `×`, `÷` and `xʸ` are accepted as
/// operators.
pub fn eval(input: &str) -> Result<f64, EvalError> {
    let tokens = token::tokenize(input)?;
    Ok(parse::parse(&tokens)?)
}
