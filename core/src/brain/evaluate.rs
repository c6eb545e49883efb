// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Postfix evaluation of the operator stack. Each operator consumes as many complete
//! sub-expressions below it as its arity says, and the value of the stack is the value
//! of the topmost one.

use super::{AngleMode, Op, Variables};

/// Everything the evaluator needs besides the stack itself.
#[derive(Debug, Clone, Copy)]
pub struct EvalContext<'a> {
    pub variables: &'a Variables,
    pub angle_mode: AngleMode,
}

/// Evaluate the topmost complete expression in `ops`. Returns its value (or `None` if
/// it is undefined) along with the part of the stack that it did not consume.
///
/// An expression is undefined when an operand is missing (the stack ran out) or when a
/// variable has no value. Either one makes every enclosing expression undefined too.
///
/// The stack is walked once from the bottom with a work stack of operand values, so a
/// long chain of operators can't overflow the call stack.
#[must_use]
pub fn evaluate_ops<'a>(ops: &'a [Op], ctx: &EvalContext<'_>) -> (Option<f64>, &'a [Op]) {
    let mut operands: Vec<Option<f64>> = Vec::with_capacity(ops.len());

    for op in ops {
        let value = match op {
            Op::Number(value) => Some(*value),
            Op::Constant(constant) => Some(constant.value()),
            Op::Variable(name) => ctx.variables.get(name).copied(),
            Op::Unary(unary_op) => operands
                .pop()
                .flatten()
                .map(|it| unary_op.apply(it, ctx.angle_mode)),
            Op::Binary(binary_op) => {
                // The second operand is on top, since it was pushed last.
                let rhs = operands.pop().flatten();
                let lhs = operands.pop().flatten();
                lhs.zip(rhs).map(|(lhs, rhs)| binary_op.apply(lhs, rhs))
            }
        };
        operands.push(value);
    }

    // An incomplete expression consumes everything below it.
    let remaining = match expression_start(ops, ops.len()) {
        Some(start) => &ops[..start],
        None => &ops[..0],
    };
    (operands.pop().flatten(), remaining)
}

/// Find where the complete sub-expression that ends just before `end` starts. Returns
/// `None` if the stack runs out before the expression is complete.
#[must_use]
pub fn expression_start(ops: &[Op], end: usize) -> Option<usize> {
    let mut needed = 1_usize;
    let mut index = end.min(ops.len());
    while needed > 0 {
        index = index.checked_sub(1)?;
        needed = needed - 1 + ops[index].arity();
    }
    Some(index)
}
