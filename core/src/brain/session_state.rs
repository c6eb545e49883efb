// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use serde::{Deserialize, Serialize};

use super::{Program, Variables};
use crate::DisplayFormat;

/// Everything that needs to survive between calculator sessions. Missing fields fall
/// back to their defaults when deserializing, so an older (or partial) file still loads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionState {
    pub program: Program,
    pub variables: Variables,
    pub deg_mode: bool,
    /// Most recent snapshot first.
    pub undo_history: Vec<Program>,
    pub display_format: DisplayFormat,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            program: Program::new(),
            variables: Variables::new(),
            deg_mode: true,
            undo_history: Vec::new(),
            display_format: DisplayFormat::default(),
        }
    }
}
