// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::collections::BTreeMap;

// Include.
pub mod brain_struct;
pub mod description;
pub mod evaluate;
pub mod op;
pub mod operator_table;
pub mod session_state;

// Re-export.
pub use brain_struct::*;
pub use description::*;
pub use evaluate::*;
pub use op::*;
pub use operator_table::*;
pub use session_state::*;

/// Enable or disable tracing events for the [`Brain`] mutators.
pub const DEBUG_BRAIN: bool = true;

/// Variable name to value. A name that is not in the map is unbound.
pub type Variables = BTreeMap<String, f64>;

/// The operator stack written out as tokens, bottom of the stack first.
pub type Program = Vec<String>;
