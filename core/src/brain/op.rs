// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The entries that live on the operator stack.
//!
//! Operators don't carry closures. They are field-less enums, so that an [`Op`] is
//! trivially comparable and can be turned into a token string (and back). The
//! identifier-to-function mapping lives in [`UnaryOp::apply`] and [`BinaryOp::apply`].

use std::fmt::{Display, Formatter, Result};

use strum_macros::{Display as StrumDisplay, EnumIter, EnumString, IntoStaticStr};

/// Only used to decide where parentheses go in the infix rendering. It plays no part in
/// evaluation, which is purely postfix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Precedence(pub u32);

impl Precedence {
    pub const ADDITIVE: Self = Self(200);
    pub const MULTIPLICATIVE: Self = Self(300);
    pub const UNARY: Self = Self(400);
    pub const EXPONENT: Self = Self(500);
    /// Never needs parentheses.
    pub const ATOMIC: Self = Self(u32::MAX);
}

/// Whether the trig operators work in degrees or radians.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AngleMode {
    #[default]
    Degrees,
    Radians,
}

impl AngleMode {
    #[must_use]
    pub fn from_deg_mode(deg_mode: bool) -> Self {
        if deg_mode { Self::Degrees } else { Self::Radians }
    }

    #[must_use]
    pub fn is_degrees(self) -> bool { matches!(self, Self::Degrees) }

    fn to_radians(self, value: f64) -> f64 {
        match self {
            Self::Degrees => value.to_radians(),
            Self::Radians => value,
        }
    }

    fn from_radians(self, value: f64) -> f64 {
        match self {
            Self::Degrees => value.to_degrees(),
            Self::Radians => value,
        }
    }
}

/// How a unary operator is written in the infix rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rendering {
    /// `name(x)`.
    Function(&'static str),
    /// `sym x`, with `x` in parentheses unless it is atomic.
    Prefix(&'static str),
    /// `x sym`, with `x` in parentheses unless it is atomic.
    Postfix(&'static str),
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    StrumDisplay,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
pub enum UnaryOp {
    #[strum(to_string = "√")]
    SquareRoot,
    #[strum(to_string = "±")]
    ChangeSign,
    #[strum(to_string = "sin")]
    Sin,
    #[strum(to_string = "cos")]
    Cos,
    #[strum(to_string = "tan")]
    Tan,
    #[strum(to_string = "asin")]
    ArcSin,
    #[strum(to_string = "acos")]
    ArcCos,
    #[strum(to_string = "atan")]
    ArcTan,
    #[strum(to_string = "ℯˣ")]
    Exp,
    #[strum(to_string = "10ˣ")]
    TenToThe,
    #[strum(to_string = "ln")]
    NaturalLog,
    #[strum(to_string = "log")]
    Log10,
    #[strum(to_string = "x²")]
    Square,
    #[strum(to_string = "x³")]
    Cube,
    #[strum(to_string = "1/x")]
    Reciprocal,
}

impl UnaryOp {
    /// Domain errors are not trapped, eg: `√(-1)` is `NaN`.
    #[must_use]
    pub fn apply(self, operand: f64, angle_mode: AngleMode) -> f64 {
        match self {
            Self::SquareRoot => operand.sqrt(),
            Self::ChangeSign => -operand,
            Self::Sin => angle_mode.to_radians(operand).sin(),
            Self::Cos => angle_mode.to_radians(operand).cos(),
            Self::Tan => angle_mode.to_radians(operand).tan(),
            Self::ArcSin => angle_mode.from_radians(operand.asin()),
            Self::ArcCos => angle_mode.from_radians(operand.acos()),
            Self::ArcTan => angle_mode.from_radians(operand.atan()),
            Self::Exp => operand.exp(),
            Self::TenToThe => 10_f64.powf(operand),
            Self::NaturalLog => operand.ln(),
            Self::Log10 => operand.log10(),
            Self::Square => operand * operand,
            Self::Cube => operand * operand * operand,
            Self::Reciprocal => 1.0 / operand,
        }
    }

    #[must_use]
    pub fn rendering(self) -> Rendering {
        match self {
            Self::SquareRoot => Rendering::Function("√"),
            Self::ChangeSign => Rendering::Prefix("-"),
            Self::Sin => Rendering::Function("sin"),
            Self::Cos => Rendering::Function("cos"),
            Self::Tan => Rendering::Function("tan"),
            Self::ArcSin => Rendering::Function("asin"),
            Self::ArcCos => Rendering::Function("acos"),
            Self::ArcTan => Rendering::Function("atan"),
            Self::Exp => Rendering::Function("exp"),
            Self::TenToThe => Rendering::Function("10^"),
            Self::NaturalLog => Rendering::Function("ln"),
            Self::Log10 => Rendering::Function("log"),
            Self::Square => Rendering::Postfix("²"),
            Self::Cube => Rendering::Postfix("³"),
            Self::Reciprocal => Rendering::Prefix("1/"),
        }
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    StrumDisplay,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
pub enum BinaryOp {
    #[strum(to_string = "+")]
    Add,
    #[strum(to_string = "−")]
    Subtract,
    #[strum(to_string = "×")]
    Multiply,
    #[strum(to_string = "÷")]
    Divide,
    #[strum(to_string = "yˣ")]
    Power,
}

impl BinaryOp {
    /// `lhs` is the operand that was pushed first. Division by zero is not trapped.
    #[must_use]
    pub fn apply(self, lhs: f64, rhs: f64) -> f64 {
        match self {
            Self::Add => lhs + rhs,
            Self::Subtract => lhs - rhs,
            Self::Multiply => lhs * rhs,
            Self::Divide => lhs / rhs,
            Self::Power => lhs.powf(rhs),
        }
    }

    #[must_use]
    pub fn precedence(self) -> Precedence {
        match self {
            Self::Add | Self::Subtract => Precedence::ADDITIVE,
            Self::Multiply | Self::Divide => Precedence::MULTIPLICATIVE,
            Self::Power => Precedence::EXPONENT,
        }
    }

    /// The symbol placed between the operands in the infix rendering.
    #[must_use]
    pub fn infix_symbol(self) -> &'static str {
        match self {
            Self::Power => "^",
            _ => self.into(),
        }
    }

    /// An operand of the same precedence on the left needs parentheses: `(2^3)^2`.
    #[must_use]
    pub fn groups_equal_on_left(self) -> bool { matches!(self, Self::Power) }

    /// An operand of the same precedence on the right needs parentheses: `5−(3−2)`.
    #[must_use]
    pub fn groups_equal_on_right(self) -> bool {
        matches!(self, Self::Subtract | Self::Divide)
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    StrumDisplay,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
pub enum Constant {
    #[strum(to_string = "π")]
    Pi,
    #[strum(to_string = "ℯ")]
    E,
}

impl Constant {
    #[must_use]
    pub fn value(self) -> f64 {
        match self {
            Self::Pi => std::f64::consts::PI,
            Self::E => std::f64::consts::E,
        }
    }
}

/// One entry on the operator stack.
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    Number(f64),
    Constant(Constant),
    /// Resolved against the variable table each time the stack is evaluated.
    Variable(String),
    Unary(UnaryOp),
    Binary(BinaryOp),
}

impl Op {
    /// How many complete sub-expressions below this entry it consumes.
    #[must_use]
    pub fn arity(&self) -> usize {
        match self {
            Op::Number(_) | Op::Constant(_) | Op::Variable(_) => 0,
            Op::Unary(_) => 1,
            Op::Binary(_) => 2,
        }
    }

    #[must_use]
    pub fn precedence(&self) -> Precedence {
        match self {
            Op::Number(value) if value.is_sign_negative() => Precedence::UNARY,
            Op::Number(_) | Op::Constant(_) | Op::Variable(_) => Precedence::ATOMIC,
            Op::Unary(_) => Precedence::UNARY,
            Op::Binary(binary_op) => binary_op.precedence(),
        }
    }
}

/// This is the token used for program import / export. Numbers use the shortest form
/// that parses back to the same value.
impl Display for Op {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Op::Number(value) => write!(f, "{value}"),
            Op::Constant(constant) => write!(f, "{constant}"),
            Op::Variable(name) => write!(f, "{name}"),
            Op::Unary(unary_op) => write!(f, "{unary_op}"),
            Op::Binary(binary_op) => write!(f, "{binary_op}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use test_case::test_case;

    use super::*;
    use crate::assert_eq2;

    #[test_case(UnaryOp::Sin, 90.0, 1.0 ; "sin of 90 degrees")]
    #[test_case(UnaryOp::Cos, 180.0, -1.0 ; "cos of 180 degrees")]
    #[test_case(UnaryOp::ArcSin, 1.0, 90.0 ; "asin in degrees")]
    #[test_case(UnaryOp::ArcTan, 1.0, 45.0 ; "atan in degrees")]
    fn test_trig_in_degrees(op: UnaryOp, input: f64, expected: f64) {
        let actual = op.apply(input, AngleMode::Degrees);
        assert!((actual - expected).abs() < 1e-9, "{op}: {actual} != {expected}");
    }

    #[test]
    fn test_trig_in_radians() {
        let actual = UnaryOp::Sin.apply(std::f64::consts::FRAC_PI_2, AngleMode::Radians);
        assert!((actual - 1.0).abs() < 1e-12);
        let actual = UnaryOp::ArcCos.apply(-1.0, AngleMode::Radians);
        assert!((actual - std::f64::consts::PI).abs() < 1e-12);
    }

    #[test]
    fn test_binary_operand_order() {
        assert_eq2!(BinaryOp::Subtract.apply(5.0, 3.0), 2.0);
        assert_eq2!(BinaryOp::Divide.apply(6.0, 3.0), 2.0);
        assert_eq2!(BinaryOp::Power.apply(2.0, 10.0), 1024.0);
    }

    #[test]
    fn test_domain_errors_are_not_trapped() {
        assert!(BinaryOp::Divide.apply(1.0, 0.0).is_infinite());
        assert!(UnaryOp::SquareRoot.apply(-1.0, AngleMode::Degrees).is_nan());
        assert!(UnaryOp::NaturalLog.apply(0.0, AngleMode::Degrees).is_infinite());
    }

    #[test]
    fn test_symbols_parse_back() {
        assert_eq2!(UnaryOp::from_str("x²"), Ok(UnaryOp::Square));
        assert_eq2!(BinaryOp::from_str("−"), Ok(BinaryOp::Subtract));
        assert_eq2!(Constant::from_str("π"), Ok(Constant::Pi));
        assert!(BinaryOp::from_str("-").is_err());
    }

    #[test]
    fn test_op_tokens() {
        assert_eq2!(Op::Number(3.0).to_string(), "3");
        assert_eq2!(Op::Number(-2.5).to_string(), "-2.5");
        assert_eq2!(Op::Unary(UnaryOp::Exp).to_string(), "ℯˣ");
        assert_eq2!(Op::Binary(BinaryOp::Multiply).to_string(), "×");
        assert_eq2!(Op::Variable("M".into()).to_string(), "M");
    }

    #[test]
    fn test_precedence_table() {
        assert_eq2!(Op::Binary(BinaryOp::Add).precedence(), Precedence(200));
        assert_eq2!(Op::Binary(BinaryOp::Divide).precedence(), Precedence(300));
        assert_eq2!(Op::Unary(UnaryOp::Square).precedence(), Precedence(400));
        assert_eq2!(Op::Constant(Constant::Pi).precedence(), Precedence::ATOMIC);
        assert_eq2!(Op::Number(4.0).precedence(), Precedence::ATOMIC);
    }
}
