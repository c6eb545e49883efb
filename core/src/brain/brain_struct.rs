// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::{AngleMode, DEBUG_BRAIN, EvalContext, Op, OperatorTable, Program, SessionState,
            UnaryOp, Variables, describe_stack, evaluate_ops, expression_start};
use crate::{DEFAULT_UNDO_CAPACITY, DisplayFormat, UndoBuffer, call_if_true};

/// Whether a change to the operator stack is recorded in the undo history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Snapshot {
    Record,
    /// Used by undo and redo, which restore a snapshot that is already in the history.
    Skip,
}

/// The expression engine. It owns the operator stack (a postfix program), the variable
/// table, the angle mode, and the undo history of the stack.
///
/// Every mutator re-evaluates the stack and returns the value of the topmost complete
/// expression, or `None` when that is undefined.
///
/// The undo history always has an entry for the live stack under its cursor. A fresh
/// (or cleared) brain starts with the empty stack recorded, so the first mutation can be
/// undone.
#[derive(Debug, Clone, PartialEq)]
pub struct Brain {
    op_stack: Vec<Op>,
    known_ops: OperatorTable,
    variables: Variables,
    angle_mode: AngleMode,
    history: UndoBuffer<Vec<Op>>,
}

impl Default for Brain {
    fn default() -> Self { Self::new() }
}

mod constructor {
    use super::*;

    impl Brain {
        #[must_use]
        pub fn new() -> Self { Self::with_undo_capacity(DEFAULT_UNDO_CAPACITY) }

        #[must_use]
        pub fn with_undo_capacity(capacity: usize) -> Self {
            let mut it = Self {
                op_stack: Vec::new(),
                known_ops: OperatorTable::new(),
                variables: Variables::new(),
                angle_mode: AngleMode::default(),
                history: UndoBuffer::new(capacity),
            };
            it.history.add(Vec::new());
            it
        }
    }
}

mod mutator {
    use super::*;

    impl Brain {
        pub fn push_number(&mut self, value: f64) -> Option<f64> {
            self.push_op(Op::Number(value))
        }

        /// The variable is looked up every time the stack is evaluated, so a later
        /// [`Brain::set_variable`] changes the result.
        pub fn push_variable(&mut self, name: &str) -> Option<f64> {
            self.push_op(Op::Variable(name.to_owned()))
        }

        /// `None` removes the binding. The stack itself does not change, so this is not
        /// recorded in the undo history.
        pub fn set_variable(&mut self, name: &str, maybe_value: Option<f64>) -> Option<f64> {
            match maybe_value {
                Some(value) => {
                    self.variables.insert(name.to_owned(), value);
                }
                None => {
                    self.variables.remove(name);
                }
            }
            self.evaluate()
        }

        /// Push the operator (or constant) named by `symbol`. An unknown symbol leaves
        /// the stack alone.
        pub fn perform_operation(&mut self, symbol: &str) -> Option<f64> {
            match self.known_ops.get(symbol) {
                Some(op) => {
                    let op = op.clone();
                    self.push_op(op)
                }
                None => {
                    call_if_true!(DEBUG_BRAIN, {
                        tracing::debug!(
                            message = "🧮 Unknown operator symbol ignored",
                            symbol = %symbol
                        );
                    });
                    self.evaluate()
                }
            }
        }

        /// Push whatever the token resolves to: an operator, a number, or a variable.
        pub fn push_token(&mut self, token: &str) -> Option<f64> {
            let op = self.known_ops.resolve_token(token);
            self.push_op(op)
        }

        /// Pushes `±`, unless the last thing that happened was pushing `±`, in which case
        /// that is undone. Two sign changes in a row leave the stack as it was.
        pub fn change_sign(&mut self) -> Option<f64> {
            let change_sign_op = Op::Unary(UnaryOp::ChangeSign);
            let last_was_change_sign = self.op_stack.last() == Some(&change_sign_op)
                && self.history.cur() == Some(&self.op_stack)
                && self.history.undo_depth() > 0;

            if last_was_change_sign {
                self.undo()
            } else {
                self.push_op(change_sign_op)
            }
        }

        /// Swap the two topmost complete sub-expressions. Nothing happens if there
        /// aren't two of them.
        pub fn swap_xy(&mut self) {
            let ops = &self.op_stack;
            let Some(y_start) = expression_start(ops, ops.len()) else {
                return;
            };
            let Some(x_start) = expression_start(ops, y_start) else {
                return;
            };

            let mut new_stack = Vec::with_capacity(ops.len());
            new_stack.extend_from_slice(&ops[..x_start]);
            new_stack.extend_from_slice(&ops[y_start..]);
            new_stack.extend_from_slice(&ops[x_start..y_start]);

            self.replace_stack(new_stack, Snapshot::Record);
        }

        /// Empties the stack, the variables, and the undo history.
        pub fn clear(&mut self) {
            self.op_stack.clear();
            self.variables.clear();
            self.history.clear();
            self.history.add(Vec::new());
        }

        pub fn undo(&mut self) -> Option<f64> {
            match self.history.prev() {
                Some(snapshot) => {
                    self.replace_stack(snapshot, Snapshot::Skip);
                    self.evaluate()
                }
                None => {
                    call_if_true!(DEBUG_BRAIN, {
                        tracing::debug!(message = "🧮 Nothing to undo");
                    });
                    None
                }
            }
        }

        pub fn redo(&mut self) -> Option<f64> {
            match self.history.next() {
                Some(snapshot) => {
                    self.replace_stack(snapshot, Snapshot::Skip);
                    self.evaluate()
                }
                None => {
                    call_if_true!(DEBUG_BRAIN, {
                        tracing::debug!(message = "🧮 Nothing to redo");
                    });
                    None
                }
            }
        }

        pub fn set_deg_mode(&mut self, deg_mode: bool) {
            self.angle_mode = AngleMode::from_deg_mode(deg_mode);
        }

        pub(super) fn push_op(&mut self, op: Op) -> Option<f64> {
            let mut new_stack = self.op_stack.clone();
            new_stack.push(op);
            self.replace_stack(new_stack, Snapshot::Record);
            self.evaluate()
        }

        /// The only place where the stack is replaced.
        pub(super) fn replace_stack(&mut self, new_stack: Vec<Op>, snapshot: Snapshot) {
            if snapshot == Snapshot::Record {
                self.history.add(new_stack.clone());
            }
            self.op_stack = new_stack;

            call_if_true!(DEBUG_BRAIN, {
                tracing::trace!(
                    message = "🧮 Operator stack replaced",
                    snapshot = ?snapshot,
                    description = %describe_stack(&self.op_stack),
                    undo_depth = self.history.undo_depth()
                );
            });
        }
    }
}

mod accessor {
    use super::*;

    impl Brain {
        /// The value of the topmost complete expression on the stack.
        #[must_use]
        pub fn evaluate(&self) -> Option<f64> {
            let ctx = EvalContext {
                variables: &self.variables,
                angle_mode: self.angle_mode,
            };
            let (result, _) = evaluate_ops(&self.op_stack, &ctx);
            result
        }

        /// The stack in infix notation, eg: `(2+3)×4`.
        #[must_use]
        pub fn description(&self) -> String { describe_stack(&self.op_stack) }

        #[must_use]
        pub fn stack(&self) -> &[Op] { &self.op_stack }

        #[must_use]
        pub fn variables(&self) -> &Variables { &self.variables }

        #[must_use]
        pub fn deg_mode(&self) -> bool { self.angle_mode.is_degrees() }

        #[must_use]
        pub fn known_ops(&self) -> &OperatorTable { &self.known_ops }

        /// How many times [`Brain::undo`] can succeed from here.
        #[must_use]
        pub fn undo_depth(&self) -> usize { self.history.undo_depth() }
    }
}

/// Converting the stack to and from tokens, for saving sessions and for handing the
/// program to a graph.
mod program_io {
    use super::*;

    impl Brain {
        #[must_use]
        pub fn program(&self) -> Program {
            ops_to_program(&self.op_stack)
        }

        /// Replaces the stack with the resolved tokens. Empty tokens are skipped. This
        /// is recorded in the undo history.
        pub fn set_program<S: AsRef<str>>(&mut self, tokens: &[S]) -> Option<f64> {
            let new_stack = self.program_to_ops(tokens);
            self.replace_stack(new_stack, Snapshot::Record);
            self.evaluate()
        }

        /// Snapshots from the live one back to the oldest, most recent first.
        #[must_use]
        pub fn undo_history(&self) -> Vec<Program> {
            self.history
                .history_newest_first()
                .iter()
                .map(|snapshot| ops_to_program(snapshot))
                .collect()
        }

        #[must_use]
        pub fn session_state(&self, display_format: DisplayFormat) -> SessionState {
            SessionState {
                program: self.program(),
                variables: self.variables.clone(),
                deg_mode: self.deg_mode(),
                undo_history: self.undo_history(),
                display_format,
            }
        }

        #[must_use]
        pub fn from_session_state(state: &SessionState, undo_capacity: usize) -> Self {
            let mut it = Self::with_undo_capacity(undo_capacity);
            it.restore_session_state(state);
            it
        }

        /// Replaces everything with the saved state. The saved history is added oldest
        /// first, and the program is only recorded on top of it when it isn't already
        /// the newest snapshot.
        pub fn restore_session_state(&mut self, state: &SessionState) {
            self.op_stack.clear();
            self.variables = state.variables.clone();
            self.set_deg_mode(state.deg_mode);

            self.history.clear();
            for snapshot in state.undo_history.iter().rev() {
                let ops = self.program_to_ops(snapshot);
                self.history.add(ops);
            }
            if self.history.is_empty() {
                self.history.add(Vec::new());
            }

            let new_stack = self.program_to_ops(&state.program);
            let snapshot = if self.history.cur() == Some(&new_stack) {
                Snapshot::Skip
            } else {
                Snapshot::Record
            };
            self.replace_stack(new_stack, snapshot);

            call_if_true!(DEBUG_BRAIN, {
                tracing::debug!(
                    message = "🧮 Session state restored",
                    program = ?state.program,
                    undo_depth = self.history.undo_depth()
                );
            });
        }

        fn program_to_ops<S: AsRef<str>>(&self, tokens: &[S]) -> Vec<Op> {
            tokens
                .iter()
                .map(AsRef::as_ref)
                .filter(|token| !token.is_empty())
                .map(|token| self.known_ops.resolve_token(token))
                .collect()
        }
    }

    fn ops_to_program(ops: &[Op]) -> Program { ops.iter().map(ToString::to_string).collect() }
}

/// Used when plotting the stack as a function of one variable.
mod function_value {
    use super::*;

    impl Brain {
        /// Bind `variable_name` to `x` and evaluate. Only finite results that are normal
        /// (or zero) make it through, everything else is `None`.
        #[allow(clippy::float_cmp)]
        pub fn function_value_at(&mut self, variable_name: &str, x: f64) -> Option<f64> {
            self.set_variable(variable_name, Some(x))
                .filter(|y| y.is_normal() || *y == 0.0)
        }
    }
}
