use tracing::debug;

use crate::function::{AngleMode, Function};
use crate::key::{Constant, Key, OPERATORS};
use crate::value::{format_value, parse_operand};

const ZERO: &str = "0";

/// Sentinel shown in the operand display after a failed evaluation or an
/// undefined factorial.
pub const ERROR: &str = "Error";

/// The expression being typed, split into the committed prefix and the
/// operand under edit, plus the trigonometry toggles.
///
/// `pending` only ever ends in an operator, an opening parenthesis, a
/// closing parenthesis or nothing, so `pending + current` is always ready
/// for the evaluator apart from parenthesis balance.
#[derive(Clone, Debug, PartialEq)]
pub struct Calculator {
    pending: String,
    current: String,
    angle_mode: AngleMode,
    inverse: bool,
}

impl Default for Calculator {
    fn default() -> Self {
        Calculator::new()
    }
}

impl Calculator {
    pub fn new() -> Self {
        Calculator::with_modes(AngleMode::default(), false)
    }

    pub fn with_modes(angle_mode: AngleMode, inverse: bool) -> Self {
        Calculator {
            pending: String::new(),
            current: ZERO.to_owned(),
            angle_mode,
            inverse,
        }
    }

    pub fn pending(&self) -> &str {
        &self.pending
    }

    pub fn current(&self) -> &str {
        &self.current
    }

    pub fn angle_mode(&self) -> AngleMode {
        self.angle_mode
    }

    pub fn inverse(&self) -> bool {
        self.inverse
    }

    /// The `(pending, current)` pair to render.
    pub fn display(&self) -> (&str, &str) {
        (&self.pending, &self.current)
    }

    /// Route a key press to its operation and return the new display.
    pub fn press(&mut self, key: Key) -> (&str, &str) {
        match key {
            Key::Digit(d) => self.append_digit(d),
            Key::Operator(op) => self.choose_operator(op),
            Key::Parenthesis(p) => self.append_parenthesis(p),
            Key::Constant(c) => self.append_constant(c),
            Key::Function(f) => self.apply_function(f),
            Key::Delete => self.delete(),
            Key::Clear => self.clear(),
            Key::Evaluate => self.evaluate(),
            Key::ToggleAngleMode => self.toggle_angle_mode(),
            Key::ToggleInverse => self.toggle_inverse(),
        }
        debug!(
            ?key,
            pending = %self.pending,
            current = %self.current,
            "key pressed"
        );
        self.display()
    }

    pub fn append_digit(&mut self, d: char) {
        if !(d.is_ascii_digit() || d == '.') {
            return;
        }
        self.recover();
        if d == '.' && self.current.contains('.') {
            return;
        }
        if self.current == ZERO && d != '.' {
            self.current.clear();
        }
        self.current.push(d);
    }

    pub fn delete(&mut self) {
        if self.current == ERROR {
            self.current = ZERO.to_owned();
            return;
        }
        self.current.pop();
        if self.current.is_empty() || self.current == "-" {
            self.current = ZERO.to_owned();
        }
    }

    pub fn append_parenthesis(&mut self, p: char) {
        if p != '(' && p != ')' {
            return;
        }
        self.recover();
        if self.current == ZERO && self.pending.is_empty() {
            self.pending.push(p);
            self.current.clear();
        } else if self.current == ZERO {
            self.pending.push(p);
        } else {
            self.commit();
            self.pending.push(p);
        }
    }

    /// Commit the operand followed by `op`. With no operand typed since the
    /// last operator, the trailing operator is replaced instead.
    pub fn choose_operator(&mut self, op: char) {
        if !OPERATORS.contains(&op) {
            return;
        }
        self.recover();
        if self.current.is_empty() && self.pending.is_empty() {
            return;
        }
        if self.current != ZERO || self.pending.ends_with(')') {
            self.commit();
        } else if self.pending.ends_with(|c: char| OPERATORS.contains(&c)) {
            self.pending.pop();
        }
        self.pending.push(op);
    }

    /// Constants only replace an untouched operand.
    pub fn append_constant(&mut self, c: Constant) {
        self.recover();
        if self.current != ZERO {
            return;
        }
        self.current = format_value(c.value());
    }

    pub fn apply_function(&mut self, f: Function) {
        let value = match parse_operand(&self.current) {
            Ok(value) => value,
            Err(err) => {
                debug!(function = %f, %err, "operand left unchanged");
                return;
            }
        };
        match f.apply(value, self.angle_mode, self.inverse) {
            Ok(result) => self.current = format_value(result),
            Err(err) => {
                debug!(function = %f, %err, "domain error");
                self.current = ERROR.to_owned();
            }
        }
    }

    pub fn clear(&mut self) {
        self.pending.clear();
        self.current = ZERO.to_owned();
    }

    /// Evaluate `pending + current` and leave the result (or the error
    /// sentinel) as the operand.
    pub fn evaluate(&mut self) {
        let expr = [self.pending.as_str(), self.operand()].concat();
        self.current = match crate::eval(&expr) {
            Ok(value) => format_value(value),
            Err(err) => {
                debug!(%expr, %err, "evaluation failed");
                ERROR.to_owned()
            }
        };
        self.pending.clear();
    }

    pub fn toggle_angle_mode(&mut self) {
        self.angle_mode = self.angle_mode.toggled();
    }

    pub fn toggle_inverse(&mut self) {
        self.inverse = !self.inverse;
    }

    /// The operand text to splice into the expression. A `0` right after a
    /// closing parenthesis is a placeholder, not a typed operand.
    fn operand(&self) -> &str {
        if self.current == ZERO && self.pending.ends_with(')') {
            ""
        } else {
            &self.current
        }
    }

    /// Move the operand into `pending` and start a fresh one.
    fn commit(&mut self) {
        let operand = self.operand().to_owned();
        self.pending.push_str(&operand);
        self.current = ZERO.to_owned();
    }

    /// Editing after an error starts from a fresh operand.
    fn recover(&mut self) {
        if self.current == ERROR {
            self.current = ZERO.to_owned();
        }
    }
}
