// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! For more information on how to use CLAP, here are some resources:
//! 1. [Tutorial](https://docs.rs/clap/latest/clap/_derive/_tutorial/index.html)
//! 2. [Cookbook](https://docs.rs/clap/latest/clap/_derive/_cookbook/index.html)

use std::{io::{self, Write},
          path::Path};

use clap::Parser;
use miette::IntoDiagnostic;
use rpncalc_cmdr::{CLIArg, Shell, run_repl, session_storage};
use rpncalc_core::{Brain, CommonResult, DisplayFormat, throws,
                   try_initialize_logging_global};

fn main() -> CommonResult<()> {
    throws!({
        let cli_arg = CLIArg::parse();

        let enable_logging = cli_arg.global_options.enable_logging;
        enable_logging.then(|| {
            try_initialize_logging_global(tracing_core::LevelFilter::DEBUG).ok();
            // % is Display, ? is Debug.
            tracing::debug!(message = "Start logging...", cli_arg = ?cli_arg);
        });

        let maybe_session_file_path = cli_arg.session_file_path();
        let mut shell = create_shell(&cli_arg, maybe_session_file_path.as_deref());

        if cli_arg.tokens.is_empty() {
            let stdin = io::stdin();
            let mut stdout = io::stdout();
            run_repl(&mut shell, stdin.lock(), &mut stdout)?;
        } else {
            run_batch(&mut shell, &cli_arg.tokens)?;
        }

        if let Some(session_file_path) = maybe_session_file_path {
            session_storage::try_save(&session_file_path, &shell.session_state())?;
        }

        enable_logging.then(|| {
            tracing::debug!(message = "Stop logging...");
        });
    })
}

/// A session file that can't be loaded is reported, and the calculator starts fresh.
fn create_shell(cli_arg: &CLIArg, maybe_session_file_path: Option<&Path>) -> Shell {
    let maybe_state = match maybe_session_file_path.map(session_storage::try_load) {
        Some(Ok(maybe_state)) => maybe_state,
        Some(Err(report)) => {
            // % is Display, ? is Debug.
            tracing::error!(
                message = "Could not load session, starting fresh",
                error = ?report
            );
            eprintln!("{report:?}");
            None
        }
        None => None,
    };

    let mut shell = match maybe_state {
        Some(state) => Shell::from_session_state(&state, cli_arg.undo_capacity),
        None => Shell::new(
            Brain::with_undo_capacity(cli_arg.undo_capacity),
            DisplayFormat::default(),
        ),
    };

    if cli_arg.radians {
        shell.brain_mut().set_deg_mode(false);
    }

    shell
}

/// Evaluate the tokens from the command line as a single line, then print the result.
fn run_batch(shell: &mut Shell, tokens: &[String]) -> CommonResult<()> {
    throws!({
        let response = shell.process_line(&tokens.join(" "));
        let mut stdout = io::stdout().lock();
        for line in &response.lines {
            writeln!(stdout, "{line}").into_diagnostic()?;
        }
    })
}
