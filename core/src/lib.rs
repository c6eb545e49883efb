// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! # rpncalc_core
//!
//! The expression engine behind an RPN (reverse Polish notation) calculator.
//!
//! 1. [`Brain`] owns an operator stack, which is a postfix program. Numbers, constants,
//!    variables, and operators are pushed onto it, and after every change the topmost
//!    complete expression is evaluated. An undefined result (a missing operand, or an
//!    unbound variable) is `None`, never an error.
//! 2. Every change to the stack is recorded in a bounded [`UndoBuffer`], which is built
//!    on a [`RingBuffer`].
//! 3. [`Brain::description`] renders the stack in infix notation with as few
//!    parentheses as possible, eg: `2 3 + 4 ×` is `(2+3)×4`.
//! 4. [`Brain::program`] and [`Brain::set_program`] turn the stack into tokens and back,
//!    and [`SessionState`] bundles everything that is saved between sessions.
//! 5. [`DisplayFormat`] turns a result into display text, and [`PlotData`] caches the
//!    samples of the program as a function of the variable `M`.
//!
//! ```
//! use rpncalc_core::Brain;
//!
//! let mut brain = Brain::new();
//! brain.push_number(2.0);
//! brain.push_number(3.0);
//! brain.perform_operation("+");
//! brain.push_number(4.0);
//! assert_eq!(brain.perform_operation("×"), Some(20.0));
//! assert_eq!(brain.description(), "(2+3)×4");
//!
//! assert_eq!(brain.undo(), Some(4.0));
//! assert_eq!(brain.redo(), Some(20.0));
//! ```
//!
//! Logging is off unless [`try_initialize_logging_global`] is called with a level filter
//! other than `OFF`.

// Enforce strict error handling in production library code only. Tests are allowed to
// use .unwrap() (workspace `Cargo.toml` config allows it).
#![cfg_attr(not(test), deny(clippy::unwrap_in_result))]

// Attach sources.
pub mod brain;
pub mod common;
pub mod decl_macros;
pub mod display;
pub mod log;
pub mod plot;

// Re-export.
pub use brain::*;
pub use common::*;
pub use display::*;
pub use log::*;
pub use plot::*;
