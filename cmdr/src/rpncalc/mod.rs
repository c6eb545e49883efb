// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod clap_config;
pub mod session_storage;
pub mod shell;
pub mod shell_command;

// Re-export.
pub use clap_config::*;
pub use session_storage::*;
pub use shell::*;
pub use shell_command::*;
