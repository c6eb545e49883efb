// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! # rpncalc
//!
//! A command line RPN calculator built on [`rpncalc_core`]. Tokens typed at the prompt
//! are pushed onto the operator stack, and after each line the calculator prints the
//! infix description of the stack followed by its value.
//!
//! ```text
//! > 2 3 + 4 ×
//! (2+3)×4=
//! 20.00
//! ```
//!
//! Run it with tokens as arguments to evaluate them once and exit:
//!
//! ```text
//! rpncalc 2 3 + 4 ×
//! ```
//!
//! The program, variables, angle mode, display format, and undo history are saved to a
//! session file between runs. Pass `--no-session` to skip that, and `-l` to write a
//! debug log to `log.txt`.

// https://github.com/rust-lang/rust-clippy
// https://rust-lang.github.io/rust-clippy/master/index.html
#![warn(clippy::all)]
#![warn(clippy::unwrap_in_result)]
#![warn(rust_2018_idioms)]
#![warn(clippy::doc_markdown)]
#![warn(clippy::redundant_closure)]
#![warn(clippy::redundant_closure_for_method_calls)]
#![warn(clippy::cast_sign_loss)]
#![warn(clippy::cast_lossless)]
#![warn(clippy::cast_possible_truncation)]
#![warn(clippy::semicolon_if_nothing_returned)]
#![warn(clippy::must_use_candidate)]
#![warn(clippy::items_after_statements)]
#![warn(clippy::needless_return)]
#![warn(clippy::redundant_else)]
#![warn(clippy::explicit_iter_loop)]
#![warn(clippy::ignored_unit_patterns)]
#![warn(clippy::match_wildcard_for_single_variants)]
#![warn(clippy::default_trait_access)]
#![warn(clippy::map_unwrap_or)]
#![warn(clippy::missing_panics_doc)]
#![warn(clippy::unused_self)]
#![warn(clippy::manual_let_else)]

pub const DEBUG_RPNCALC_SHELL: bool = true;
pub const DEBUG_SESSION_STORAGE: bool = true;

// Attach sources.
pub mod rpncalc;

// Re-export.
pub use rpncalc::*;
