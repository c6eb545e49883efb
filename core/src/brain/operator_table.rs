// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::collections::HashMap;

use strum::IntoEnumIterator;

use super::{BinaryOp, Constant, Op, UnaryOp};

/// Maps operator display names to the [`Op`] that is pushed when the user picks that
/// operator. It is filled in once from every [`UnaryOp`], [`BinaryOp`], and [`Constant`]
/// variant, and never changes after that.
#[derive(Debug, Clone, PartialEq)]
pub struct OperatorTable {
    known_ops: HashMap<String, Op>,
}

impl Default for OperatorTable {
    fn default() -> Self { Self::new() }
}

impl OperatorTable {
    #[must_use]
    pub fn new() -> Self {
        let unary = UnaryOp::iter().map(Op::Unary);
        let binary = BinaryOp::iter().map(Op::Binary);
        let constants = Constant::iter().map(Op::Constant);

        let known_ops = unary
            .chain(binary)
            .chain(constants)
            .map(|op| (op.to_string(), op))
            .collect();

        Self { known_ops }
    }

    #[must_use]
    pub fn get(&self, symbol: &str) -> Option<&Op> { self.known_ops.get(symbol) }

    #[must_use]
    pub fn len(&self) -> usize { self.known_ops.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.known_ops.is_empty() }

    /// All the operator symbols, sorted.
    #[must_use]
    pub fn symbols(&self) -> Vec<&str> {
        let mut acc: Vec<&str> = self.known_ops.keys().map(String::as_str).collect();
        acc.sort_unstable();
        acc
    }

    /// Turn a token (from a saved program, or typed by the user) into an [`Op`]. The
    /// order of the checks matters:
    /// 1. A known operator symbol.
    /// 2. Something that parses as a number.
    /// 3. Anything else is the name of a variable.
    #[must_use]
    pub fn resolve_token(&self, token: &str) -> Op {
        match (self.get(token), token.parse::<f64>()) {
            (Some(op), _) => op.clone(),
            (None, Ok(value)) => Op::Number(value),
            (None, Err(_)) => Op::Variable(token.to_owned()),
        }
    }
}
