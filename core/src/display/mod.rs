// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod display_format;

// Re-export.
pub use display_format::*;
