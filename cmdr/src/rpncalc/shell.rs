// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::io::{BufRead, Write};

use miette::IntoDiagnostic;
use rpncalc_core::{Brain, CommonResult, DisplayFormat, GraphBrain, Interval, PlotData,
                   Program, SessionState, call_if_true, history_line, throws};

use crate::{DEBUG_RPNCALC_SHELL, ShellCommand, ShellError};

pub const PROMPT: &str = "> ";

pub const HELP_TEXT: &str = "\
Type numbers, operators, and variable names in RPN order, eg: `3 4 + 2 ×`.
ASCII spellings work too: - * / ^ sqrt pi
  undo | redo        step through the history
  clear              empty the stack, the variables, and the history
  swap               swap the last two operands
  chs                change the sign of the last operand
  deg | rad          angle mode for trig functions
  fix N | sci N      display format, N digits
  sto NAME           set NAME to the displayed value
  unset NAME         remove NAME
  plot X0 X1 [N]     sample the program as a function of M
  program            print the program tokens
  quit | exit        leave";

/// What the shell prints after a line, and whether it should stop reading.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ShellResponse {
    pub lines: Vec<String>,
    pub should_exit: bool,
}

/// Drives a [`Brain`] from lines of text. The display format and the plot cache live
/// here since the brain knows nothing about how its values are shown.
#[derive(Debug)]
pub struct Shell {
    brain: Brain,
    display_format: DisplayFormat,
    plot_data: PlotData,
    /// The program and angle mode that `plot_data` was sampled from.
    plotted: Option<(Program, bool)>,
}

mod constructor {
    use super::*;

    impl Shell {
        #[must_use]
        pub fn new(brain: Brain, display_format: DisplayFormat) -> Self {
            Self {
                brain,
                display_format,
                plot_data: PlotData::new(),
                plotted: None,
            }
        }

        #[must_use]
        pub fn from_session_state(state: &SessionState, undo_capacity: usize) -> Self {
            Self::new(
                Brain::from_session_state(state, undo_capacity),
                state.display_format,
            )
        }
    }
}

mod accessor {
    use super::*;

    impl Shell {
        #[must_use]
        pub fn brain(&self) -> &Brain { &self.brain }

        pub fn brain_mut(&mut self) -> &mut Brain { &mut self.brain }

        #[must_use]
        pub fn display_format(&self) -> DisplayFormat { self.display_format }

        #[must_use]
        pub fn session_state(&self) -> SessionState {
            self.brain.session_state(self.display_format)
        }

        /// The description followed by `=`, then the formatted value.
        #[must_use]
        pub fn status_lines(&self) -> Vec<String> {
            vec![
                history_line(&self.brain.description()),
                self.display_format.format_value(self.brain.evaluate()),
            ]
        }
    }
}

mod processor {
    use super::*;

    impl Shell {
        /// Run every command on the line. A malformed command stops the rest of the line
        /// from running, and its error is printed before the status.
        pub fn process_line(&mut self, line: &str) -> ShellResponse {
            let mut response = ShellResponse::default();

            let (commands, maybe_error) = match ShellCommand::parse_line(line) {
                Ok(commands) => (commands, None),
                Err((commands, error)) => (commands, Some(error)),
            };

            call_if_true!(DEBUG_RPNCALC_SHELL, {
                // % is Display, ? is Debug.
                tracing::debug!(
                    message = "🐚 Processing line",
                    line = %line,
                    commands = ?commands,
                    error = ?maybe_error
                );
            });

            for command in commands {
                if command == ShellCommand::Quit {
                    response.should_exit = true;
                    return response;
                }
                if let Err(error) = self.run_command(command, &mut response.lines) {
                    response.lines.push(format!("⚠️ {error}"));
                    response.lines.extend(self.status_lines());
                    return response;
                }
            }

            if let Some(error) = maybe_error {
                response.lines.push(format!("⚠️ {error}"));
            }
            response.lines.extend(self.status_lines());
            response
        }

        fn run_command(
            &mut self,
            command: ShellCommand,
            lines: &mut Vec<String>,
        ) -> Result<(), ShellError> {
            match command {
                ShellCommand::Undo => {
                    self.brain.undo();
                }
                ShellCommand::Redo => {
                    self.brain.redo();
                }
                ShellCommand::Clear => self.brain.clear(),
                ShellCommand::Swap => self.brain.swap_xy(),
                ShellCommand::ChangeSign => {
                    self.brain.change_sign();
                }
                ShellCommand::Degrees => self.brain.set_deg_mode(true),
                ShellCommand::Radians => self.brain.set_deg_mode(false),
                ShellCommand::Format(display_format) => self.display_format = display_format,
                ShellCommand::Store(name) => {
                    let value = self.brain.evaluate();
                    self.brain.set_variable(&name, value);
                }
                ShellCommand::Unset(name) => {
                    self.brain.set_variable(&name, None);
                }
                ShellCommand::Plot { x0, xf, points } => {
                    self.plot(x0, xf, points, lines)?;
                }
                ShellCommand::ShowProgram => lines.push(self.brain.program().join(" ")),
                ShellCommand::Help => lines.push(HELP_TEXT.to_owned()),
                ShellCommand::Token(token) => {
                    self.brain.push_token(&token);
                }
                ShellCommand::Quit => {}
            }
            Ok(())
        }

        /// Samples are cached between calls, so plotting an overlapping range with the
        /// same step only computes the new samples.
        fn plot(
            &mut self,
            x0: f64,
            xf: f64,
            points: u32,
            lines: &mut Vec<String>,
        ) -> Result<(), ShellError> {
            let key = (self.brain.program(), self.brain.deg_mode());
            if self.plotted.as_ref() != Some(&key) {
                self.plot_data.mark_stale();
            }
            let mut graph_brain = GraphBrain::new(&key.0, key.1);
            self.plotted = Some(key);

            let dx = (xf - x0) / f64::from(points - 1);
            let update = self.plot_data.update(
                &mut graph_brain,
                points as usize,
                Interval::new(x0, xf),
                dx,
            )?;

            call_if_true!(DEBUG_RPNCALC_SHELL, {
                tracing::debug!(message = "🐚 Plotted", update = ?update);
            });

            lines.push(graph_brain.title());
            let start = self.plot_data.interval().x0;
            let mut index = 0_u32;
            while let Some(maybe_y) = self.plot_data.next_sample() {
                let x = start + dx * f64::from(index);
                lines.push(format!(
                    "M = {}\ty = {}",
                    self.display_format.format_f64(x),
                    self.display_format.format_value(maybe_y)
                ));
                index += 1;
            }
            Ok(())
        }
    }
}

/// Read lines until the input ends or the user quits, writing each response.
///
/// # Errors
///
/// Returns an error if reading the input or writing the output fails.
pub fn run_repl(
    shell: &mut Shell,
    input: impl BufRead,
    output: &mut impl Write,
) -> CommonResult<()> {
    throws!({
        write!(output, "{PROMPT}").into_diagnostic()?;
        output.flush().into_diagnostic()?;

        for line in input.lines() {
            let line = line.into_diagnostic()?;
            let response = shell.process_line(&line);
            for it in &response.lines {
                writeln!(output, "{it}").into_diagnostic()?;
            }
            if response.should_exit {
                break;
            }
            write!(output, "{PROMPT}").into_diagnostic()?;
            output.flush().into_diagnostic()?;
        }
    })
}
