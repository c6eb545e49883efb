// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! For more information on error types, see:
//!
//! 1. [Article](https://developerlife.com/2024/06/10/rust-miette-error-handling/)
//! 2. [Video](https://youtu.be/TmLF7vI8lKk)
//!
//! Note that the calculator operations themselves never fail. An undefined result is
//! `None`, and floating point domain errors are surfaced as `inf` / `NaN`. The errors
//! here are for the edges: parsing user supplied settings, logging, and persistence.

/// Type alias to make it easy to work with [miette::Result] and [miette::Report], which
/// are [`std::error::Error`] wrappers.
pub type CommonResult<T> = miette::Result<T>;

/// Errors for user supplied settings that can't be understood.
#[derive(thiserror::Error, Debug, miette::Diagnostic, Clone, PartialEq)]
pub enum CalcError {
    #[error("🔢 Invalid digit count '{digits}', expected a number from 0 to {max}")]
    #[diagnostic(help("Try something like `fix 2` or `sci 4`"))]
    InvalidFormatDigits { digits: String, max: u8 },

    #[error("🧮 Unknown display format '{style}', expected `fix` or `sci`")]
    UnknownFormatStyle { style: String },

    #[error("📐 Invalid sample range [{x0}, {xf}] with {points} points")]
    InvalidPlotRange { x0: f64, xf: f64, points: usize },

    #[error("📐 Sampling [{x0}, {xf}] every {dx} needs {needed} points, but only {points} fit")]
    #[diagnostic(help("Use a larger step, or a narrower range"))]
    PlotRangeTooWide {
        x0: f64,
        xf: f64,
        dx: f64,
        needed: usize,
        points: usize,
    },
}
