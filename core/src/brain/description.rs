// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Render the operator stack in infix notation, eg: `2 3 + 4 ×` becomes `(2+3)×4`.
//!
//! Each complete sub-expression on the stack is rendered on its own, and they are joined
//! with `,` from the bottom of the stack to the top. A missing operand shows up as `?`.
//! Parentheses are only added where the precedence of an operand is lower than that of
//! the operator it feeds into.

use smallvec::SmallVec;

use super::{BinaryOp, Op, Precedence, Rendering, UnaryOp};

const MISSING_OPERAND: &str = "?";

type InlineVec<T> = SmallVec<[T; 4]>;

#[derive(Debug, Clone, PartialEq)]
struct Rendered {
    text: String,
    precedence: Precedence,
}

impl Rendered {
    fn missing() -> Self {
        Self {
            text: MISSING_OPERAND.to_owned(),
            precedence: Precedence::ATOMIC,
        }
    }

    fn is_atomic(&self) -> bool { self.precedence == Precedence::ATOMIC }

    fn wrapped_if(self, needs_parens: bool) -> String {
        if needs_parens {
            format!("({})", self.text)
        } else {
            self.text
        }
    }
}

/// Render the whole stack. Returns an empty string for an empty stack.
///
/// The stack is walked once from the bottom, keeping the rendered operands on a work
/// stack, so a long chain of operators can't overflow the call stack.
#[must_use]
pub fn describe_stack(ops: &[Op]) -> String {
    let mut operands: InlineVec<Rendered> = InlineVec::new();

    for op in ops {
        let rendered = match op {
            Op::Number(_) | Op::Constant(_) | Op::Variable(_) => Rendered {
                text: op.to_string(),
                precedence: op.precedence(),
            },
            Op::Unary(unary_op) => {
                let operand = operands.pop().unwrap_or_else(Rendered::missing);
                Rendered {
                    text: describe_unary(*unary_op, operand),
                    precedence: op.precedence(),
                }
            }
            Op::Binary(binary_op) => {
                // The second operand is on top, since it was pushed last.
                let rhs = operands.pop().unwrap_or_else(Rendered::missing);
                let lhs = operands.pop().unwrap_or_else(Rendered::missing);
                Rendered {
                    text: describe_binary(*binary_op, lhs, rhs),
                    precedence: binary_op.precedence(),
                }
            }
        };
        operands.push(rendered);
    }

    let expressions: Vec<String> = operands.into_iter().map(|it| it.text).collect();
    expressions.join(",")
}

fn describe_unary(unary_op: UnaryOp, operand: Rendered) -> String {
    match unary_op.rendering() {
        Rendering::Function(name) => format!("{name}({})", operand.text),
        Rendering::Prefix(symbol) => {
            let needs_parens = !operand.is_atomic();
            format!("{symbol}{}", operand.wrapped_if(needs_parens))
        }
        Rendering::Postfix(symbol) => {
            let needs_parens = !operand.is_atomic();
            format!("{}{symbol}", operand.wrapped_if(needs_parens))
        }
    }
}

fn describe_binary(binary_op: BinaryOp, lhs: Rendered, rhs: Rendered) -> String {
    let precedence = binary_op.precedence();
    let lhs_needs_parens = lhs.precedence < precedence
        || (lhs.precedence == precedence && binary_op.groups_equal_on_left());
    let rhs_needs_parens = rhs.precedence < precedence
        || (rhs.precedence == precedence && binary_op.groups_equal_on_right());

    format!(
        "{}{}{}",
        lhs.wrapped_if(lhs_needs_parens),
        binary_op.infix_symbol(),
        rhs.wrapped_if(rhs_needs_parens)
    )
}
