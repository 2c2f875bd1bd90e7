use std::f64::consts;
use std::str::FromStr;

use crate::error::KeyError;
use crate::function::Function;

/// Operator characters the calculator accepts, display glyphs included.
pub const OPERATORS: &[char] = &['+', '-', '*', '/', '^', '×', '÷'];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Constant {
    Pi,
    E,
}

impl Constant {
    pub fn value(self) -> f64 {
        match self {
            Constant::Pi => consts::PI,
            Constant::E => consts::E,
        }
    }
}

/// A single button press.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    /// `0`-`9` or `.`
    Digit(char),
    Operator(char),
    Parenthesis(char),
    Constant(Constant),
    Function(Function),
    Delete,
    Clear,
    Evaluate,
    ToggleAngleMode,
    ToggleInverse,
}

impl FromStr for Key {
    type Err = KeyError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let key = match name {
            "(" => Key::Parenthesis('('),
            ")" => Key::Parenthesis(')'),
            "xʸ" => Key::Operator('^'),
            "π" | "pi" => Key::Constant(Constant::Pi),
            "e" => Key::Constant(Constant::E),
            "del" | "⌫" => Key::Delete,
            "ac" | "AC" | "clear" => Key::Clear,
            "=" => Key::Evaluate,
            "deg" | "rad" | "Deg" | "Rad" => Key::ToggleAngleMode,
            "inv" | "Inv" => Key::ToggleInverse,
            _ => {
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if c.is_ascii_digit() || c == '.' => {
                        Key::Digit(c)
                    }
                    (Some(c), None) if OPERATORS.contains(&c) => {
                        Key::Operator(c)
                    }
                    _ => Key::Function(name.parse()?),
                }
            }
        };
        Ok(key)
    }
}

/// Parse a whitespace separated key sequence.
///
/// A word that is not a key name on its own is split into characters, so
/// `23` and `2+3=` both work.
pub fn parse_keys(line: &str) -> Result<Vec<Key>, KeyError> {
    let mut keys = Vec::new();
    for word in line.split_whitespace() {
        match word.parse() {
            Ok(key) => keys.push(key),
            Err(_) => {
                let split = word
                    .chars()
                    .map(|c| c.to_string().parse())
                    .collect::<Result<Vec<Key>, _>>()
                    .map_err(|_| KeyError::Unknown(word.to_owned()))?;
                keys.extend(split);
            }
        }
    }
    Ok(keys)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::function::Trig;

    #[test]
    fn names() {
        let cases = vec![
            ("7", Key::Digit('7')),
            (".", Key::Digit('.')),
            ("×", Key::Operator('×')),
            ("xʸ", Key::Operator('^')),
            ("(", Key::Parenthesis('(')),
            ("π", Key::Constant(Constant::Pi)),
            ("sin", Key::Function(Function::Trig(Trig::Sin))),
            ("!", Key::Function(Function::Factorial)),
            ("=", Key::Evaluate),
            ("inv", Key::ToggleInverse),
        ];
        for (name, expected) in cases {
            assert_eq!(name.parse::<Key>(), Ok(expected));
        }
    }

    #[test]
    fn sequences() {
        let expected = vec![
            Key::Digit('2'),
            Key::Digit('3'),
            Key::Operator('+'),
            Key::Digit('1'),
            Key::Evaluate,
        ];
        assert_eq!(parse_keys("23 + 1 ="), Ok(expected.clone()));
        assert_eq!(parse_keys("23+1="), Ok(expected));
        assert_eq!(
            parse_keys("2 sinh"),
            Err(KeyError::Unknown("sinh".into()))
        );
        assert_eq!(parse_keys("   "), Ok(vec![]));
    }
}
