// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::FunctionSource;
use crate::{Brain, Program};

/// The variable that a plotted program is a function of.
pub const PLOT_VARIABLE: &str = "M";

/// A separate [`Brain`] that evaluates a copy of the calculator's program as a function
/// of [`PLOT_VARIABLE`]. It never shares state with the brain that the program came from.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphBrain {
    brain: Brain,
}

impl GraphBrain {
    #[must_use]
    pub fn new(program: &Program, deg_mode: bool) -> Self {
        let mut brain = Brain::new();
        brain.set_deg_mode(deg_mode);
        brain.set_program(program);
        Self { brain }
    }

    /// The plot title, eg: `y = M²+1`.
    #[must_use]
    pub fn title(&self) -> String { format!("y = {}", self.brain.description()) }

    #[must_use]
    pub fn program(&self) -> Program { self.brain.program() }
}

impl FunctionSource for GraphBrain {
    fn function_value(&mut self, x: f64) -> Option<f64> {
        self.brain.function_value_at(PLOT_VARIABLE, x)
    }
}
