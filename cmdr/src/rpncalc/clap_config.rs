// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::path::PathBuf;

use clap::{Args, Parser};
use rpncalc_core::DEFAULT_UNDO_CAPACITY;

use super::session_storage;

/// More info: <https://docs.rs/clap/latest/clap/_derive/_tutorial/chapter_2/index.html>
#[derive(Debug, Parser)]
#[command(bin_name = "rpncalc")]
#[command(about = "🧮 RPN calculator with infix history, undo / redo, and plotting")]
#[command(version)]
#[command(next_line_help = true)]
#[command(arg_required_else_help(false))]
/// More info: <https://docs.rs/clap/latest/clap/struct.Command.html#method.help_template>
#[command(
    help_template = "{about}\nVersion: {bin} {version} 💻\n\nProvide tokens, separated by spaces, to evaluate them and exit. Or no arguments to start the interactive shell.\nUSAGE 📓:\n  rpncalc [\x1b[32mtokens\x1b[0m] [\x1b[34moptions\x1b[0m]\n\n[options]\n{options}"
)]
pub struct CLIArg {
    /// Eg: `3 4 + 2 ×`. Use `--` before tokens that start with `-`.
    #[arg(name = "tokens")]
    pub tokens: Vec<String>,

    #[arg(long, short = 'r', help = "Start with the trig operators in radians.")]
    pub radians: bool,

    #[arg(
        long,
        default_value_t = DEFAULT_UNDO_CAPACITY,
        help = "How many snapshots of the operator stack are kept for undo."
    )]
    pub undo_capacity: usize,

    #[arg(
        long,
        help = "Where the session is saved. Defaults to `session.json` in the rpncalc config folder."
    )]
    pub session_file: Option<PathBuf>,

    #[arg(long, help = "Don't load or save the session.")]
    pub no_session: bool,

    #[command(flatten)]
    pub global_options: GlobalOption,
}

#[derive(Debug, Args)]
pub struct GlobalOption {
    #[arg(
        global = true,
        long,
        short = 'l',
        help = "Log app output to a file named `log.txt` for debugging."
    )]
    pub enable_logging: bool,
}

impl CLIArg {
    /// `None` when sessions are disabled, or the config folder can't be found.
    #[must_use]
    pub fn session_file_path(&self) -> Option<PathBuf> {
        if self.no_session {
            return None;
        }
        match &self.session_file {
            Some(path) => Some(path.clone()),
            None => session_storage::try_get_default_session_file_path(),
        }
    }
}
