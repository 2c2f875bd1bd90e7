use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use crate::error::{DomainError, KeyError};

/// How trigonometric input and inverse output are interpreted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AngleMode {
    Radians,
    Degrees,
}

impl AngleMode {
    pub fn toggled(self) -> Self {
        match self {
            AngleMode::Radians => AngleMode::Degrees,
            AngleMode::Degrees => AngleMode::Radians,
        }
    }

    fn to_radians(self, angle: f64) -> f64 {
        match self {
            AngleMode::Radians => angle,
            AngleMode::Degrees => angle * (PI / 180.0),
        }
    }

    fn from_radians(self, angle: f64) -> f64 {
        match self {
            AngleMode::Radians => angle,
            AngleMode::Degrees => angle * (180.0 / PI),
        }
    }
}

impl Default for AngleMode {
    fn default() -> Self {
        AngleMode::Radians
    }
}

impl fmt::Display for AngleMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            AngleMode::Radians => write!(f, "Rad"),
            AngleMode::Degrees => write!(f, "Deg"),
        }
    }
}

/// Trigonometric functions, each carrying its forward and inverse form.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Trig {
    Sin,
    Cos,
    Tan,
}

impl Trig {
    pub fn forward(self, radians: f64) -> f64 {
        match self {
            Trig::Sin => radians.sin(),
            Trig::Cos => radians.cos(),
            Trig::Tan => radians.tan(),
        }
    }

    pub fn inverse(self, value: f64) -> f64 {
        match self {
            Trig::Sin => value.asin(),
            Trig::Cos => value.acos(),
            Trig::Tan => value.atan(),
        }
    }
}

/// A scientific function applied in place to the current operand.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Function {
    Trig(Trig),
    Ln,
    Log,
    Factorial,
    Percent,
    Sqrt,
}

impl Function {
    /// Apply the function to `value`. Only trigonometric functions look at
    /// the angle mode and the inverse toggle.
    pub fn apply(
        self,
        value: f64,
        mode: AngleMode,
        inverse: bool,
    ) -> Result<f64, DomainError> {
        let result = match self {
            Function::Trig(trig) if inverse => {
                mode.from_radians(trig.inverse(value))
            }
            Function::Trig(trig) => trig.forward(mode.to_radians(value)),
            Function::Ln => value.ln(),
            Function::Log => value.log10(),
            Function::Factorial => factorial(value)?,
            Function::Percent => value / 100.0,
            Function::Sqrt => value.sqrt(),
        };
        Ok(result)
    }

    pub fn label(self, inverse: bool) -> &'static str {
        match self {
            Function::Trig(Trig::Sin) if inverse => "sin⁻¹",
            Function::Trig(Trig::Cos) if inverse => "cos⁻¹",
            Function::Trig(Trig::Tan) if inverse => "tan⁻¹",
            Function::Trig(Trig::Sin) => "sin",
            Function::Trig(Trig::Cos) => "cos",
            Function::Trig(Trig::Tan) => "tan",
            Function::Ln => "ln",
            Function::Log => "log",
            Function::Factorial => "!",
            Function::Percent => "%",
            Function::Sqrt => "√",
        }
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.label(false))
    }
}

impl FromStr for Function {
    type Err = KeyError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "sin" => Ok(Function::Trig(Trig::Sin)),
            "cos" => Ok(Function::Trig(Trig::Cos)),
            "tan" => Ok(Function::Trig(Trig::Tan)),
            "ln" => Ok(Function::Ln),
            "log" => Ok(Function::Log),
            "!" => Ok(Function::Factorial),
            "%" => Ok(Function::Percent),
            "√" | "sqrt" => Ok(Function::Sqrt),
            _ => Err(KeyError::Unknown(name.to_owned())),
        }
    }
}

/// Iterative factorial over non-negative integers.
///
/// Large arguments overflow to infinity rather than failing; the product
/// stops as soon as it becomes infinite.
pub fn factorial(n: f64) -> Result<f64, DomainError> {
    if n < 0.0 || n.fract() != 0.0 {
        return Err(DomainError::Factorial(n));
    }
    let mut result: f64 = 1.0;
    let mut i = n;
    while i > 1.0 && result.is_finite() {
        result *= i;
        i -= 1.0;
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn factorials() {
        let cases =
            vec![(0.0, 1.0), (1.0, 1.0), (5.0, 120.0), (10.0, 3628800.0)];
        for (n, expected) in cases {
            assert_eq!(factorial(n), Ok(expected));
        }
        assert_eq!(factorial(171.0), Ok(f64::INFINITY));
        assert_eq!(factorial(1e300), Ok(f64::INFINITY));
    }

    #[test]
    fn factorial_domain() {
        assert_eq!(factorial(-1.0), Err(DomainError::Factorial(-1.0)));
        assert_eq!(factorial(2.5), Err(DomainError::Factorial(2.5)));
        assert!(factorial(f64::NAN).is_err());
    }

    #[test]
    fn degrees() {
        let sin = Function::Trig(Trig::Sin);
        let forward = sin.apply(90.0, AngleMode::Degrees, false).unwrap();
        assert!(close(forward, 1.0));
        let inverse = sin.apply(1.0, AngleMode::Degrees, true).unwrap();
        assert!(close(inverse, 90.0));
        let cos = Function::Trig(Trig::Cos);
        let half = cos.apply(60.0, AngleMode::Degrees, false).unwrap();
        assert!(close(half, 0.5));
        let tan = Function::Trig(Trig::Tan);
        assert!(close(tan.apply(1.0, AngleMode::Degrees, true).unwrap(), 45.0));
    }

    #[test]
    fn radians() {
        let cos = Function::Trig(Trig::Cos);
        assert!(close(cos.apply(PI, AngleMode::Radians, false).unwrap(), -1.0));
        let inverse = cos.apply(-1.0, AngleMode::Radians, true).unwrap();
        assert!(close(inverse, PI));
    }

    #[test]
    fn inverse_ignored_outside_trig() {
        let cases = vec![
            (Function::Ln, std::f64::consts::E, 1.0),
            (Function::Log, 1000.0, 3.0),
            (Function::Percent, 50.0, 0.5),
            (Function::Sqrt, 81.0, 9.0),
            (Function::Factorial, 4.0, 24.0),
        ];
        for (function, input, expected) in cases {
            for &inverse in &[false, true] {
                let output = function.apply(input, AngleMode::Degrees, inverse);
                assert!(close(output.unwrap(), expected), "{}", function);
            }
        }
    }

    #[test]
    fn names() {
        assert_eq!("sqrt".parse::<Function>(), Ok(Function::Sqrt));
        assert_eq!("√".parse::<Function>(), Ok(Function::Sqrt));
        assert_eq!("tan".parse::<Function>(), Ok(Function::Trig(Trig::Tan)));
        assert_eq!(
            "sinh".parse::<Function>(),
            Err(KeyError::Unknown("sinh".into()))
        );
        assert_eq!(Function::Trig(Trig::Sin).label(true), "sin⁻¹");
    }
}
