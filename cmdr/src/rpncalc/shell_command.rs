// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::iter::Peekable;

use rpncalc_core::{CalcError, DisplayFormat};

pub const DEFAULT_PLOT_POINTS: u32 = 11;

/// Every point is kept in memory by the plot cache.
pub const MAX_PLOT_POINTS: u32 = 10_000;

/// One command typed into the shell. A line holds any number of them, separated by
/// whitespace, and some of them take the words that follow as arguments.
#[derive(Debug, Clone, PartialEq)]
pub enum ShellCommand {
    Undo,
    Redo,
    Clear,
    Swap,
    ChangeSign,
    Degrees,
    Radians,
    /// `fix N` or `sci N`.
    Format(DisplayFormat),
    /// `sto NAME` sets the variable to the displayed value.
    Store(String),
    Unset(String),
    /// `plot X0 X1 [N]`.
    Plot { x0: f64, xf: f64, points: u32 },
    ShowProgram,
    Help,
    Quit,
    /// Anything else is pushed onto the operator stack.
    Token(String),
}

#[derive(thiserror::Error, Debug, miette::Diagnostic, Clone, PartialEq)]
pub enum ShellError {
    #[error("✋ `{command}` needs {expected}")]
    MissingArgument {
        command: &'static str,
        expected: &'static str,
    },

    #[error("🔢 `{command}` expected a number, got '{value}'")]
    InvalidNumber { command: &'static str, value: String },

    #[error("📐 `plot` needs at least 2 points, got {points}")]
    TooFewPlotPoints { points: u32 },

    #[error("📐 `plot` takes at most {max} points, got {points}")]
    TooManyPlotPoints { points: u32, max: u32 },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Calc(#[from] CalcError),
}

impl ShellCommand {
    /// Parse every command on the line, stopping at the first one that is malformed.
    ///
    /// # Errors
    ///
    /// Returns the commands that were parsed before the malformed one, along with the
    /// error.
    pub fn parse_line(line: &str) -> Result<Vec<ShellCommand>, (Vec<ShellCommand>, ShellError)> {
        let mut words = line.split_whitespace().peekable();
        let mut acc = vec![];
        while let Some(word) = words.next() {
            match Self::parse_word(word, &mut words) {
                Ok(command) => acc.push(command),
                Err(error) => return Err((acc, error)),
            }
        }
        Ok(acc)
    }

    fn parse_word<'a>(
        word: &'a str,
        rest: &mut Peekable<impl Iterator<Item = &'a str>>,
    ) -> Result<ShellCommand, ShellError> {
        let command = match word {
            "undo" => Self::Undo,
            "redo" => Self::Redo,
            "clear" => Self::Clear,
            "swap" => Self::Swap,
            "chs" => Self::ChangeSign,
            "deg" => Self::Degrees,
            "rad" => Self::Radians,
            "program" => Self::ShowProgram,
            "help" => Self::Help,
            "quit" | "exit" => Self::Quit,
            "fix" | "sci" => {
                let digits = rest.next().ok_or(ShellError::MissingArgument {
                    command: if word == "fix" { "fix" } else { "sci" },
                    expected: "a digit count",
                })?;
                Self::Format(format!("{word} {digits}").parse()?)
            }
            "sto" => Self::Store(expect_name("sto", rest)?),
            "unset" => Self::Unset(expect_name("unset", rest)?),
            "plot" => {
                let x0 = expect_number("plot", rest)?;
                let xf = expect_number("plot", rest)?;
                // The point count is optional, so only take the next word if it is one.
                let points = match rest.peek().and_then(|it| it.parse::<u32>().ok()) {
                    Some(points) => {
                        rest.next();
                        points
                    }
                    None => DEFAULT_PLOT_POINTS,
                };
                if points < 2 {
                    return Err(ShellError::TooFewPlotPoints { points });
                }
                if points > MAX_PLOT_POINTS {
                    return Err(ShellError::TooManyPlotPoints {
                        points,
                        max: MAX_PLOT_POINTS,
                    });
                }
                Self::Plot { x0, xf, points }
            }
            token => Self::Token(ascii_alias(token).unwrap_or(token).to_owned()),
        };
        Ok(command)
    }
}

/// Operator symbols that are hard to type, spelled with ASCII.
fn ascii_alias(token: &str) -> Option<&'static str> {
    let symbol = match token {
        "-" => "−",
        "*" => "×",
        "/" => "÷",
        "^" => "yˣ",
        "sqrt" => "√",
        "pi" => "π",
        _ => return None,
    };
    Some(symbol)
}

fn expect_name<'a>(
    command: &'static str,
    rest: &mut impl Iterator<Item = &'a str>,
) -> Result<String, ShellError> {
    rest.next()
        .map(ToOwned::to_owned)
        .ok_or(ShellError::MissingArgument {
            command,
            expected: "a variable name",
        })
}

fn expect_number<'a>(
    command: &'static str,
    rest: &mut impl Iterator<Item = &'a str>,
) -> Result<f64, ShellError> {
    let word = rest.next().ok_or(ShellError::MissingArgument {
        command,
        expected: "2 numbers",
    })?;
    word.parse::<f64>().map_err(|_| ShellError::InvalidNumber {
        command,
        value: word.to_owned(),
    })
}
