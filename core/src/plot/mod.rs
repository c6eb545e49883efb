// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod graph_brain;
pub mod plot_data;

// Re-export.
pub use graph_brain::*;
pub use plot_data::*;

/// Enable or disable tracing events for plot sampling.
pub const DEBUG_PLOT: bool = true;
