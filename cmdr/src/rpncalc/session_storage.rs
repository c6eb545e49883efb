// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Saves and loads the [`SessionState`] as a JSON file, by default in the `rpncalc`
//! folder inside the user's config folder.

use std::{fmt::{Display, Formatter, Result},
          fs,
          path::{Path, PathBuf}};

use dirs::config_dir;
use miette::{IntoDiagnostic, WrapErr};
use rpncalc_core::{CommonResult, SessionState, call_if_true, ok};

use crate::DEBUG_SESSION_STORAGE;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigPaths {
    TopLevelFolderName,
    SessionFile,
}

impl Display for ConfigPaths {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let path = match self {
            ConfigPaths::TopLevelFolderName => "rpncalc",
            ConfigPaths::SessionFile => "session.json",
        };
        write!(f, "{path}")
    }
}

/// This is where the session file is, if there is a config folder on this platform.
#[must_use]
pub fn try_get_default_session_file_path() -> Option<PathBuf> {
    let home_config_folder_path = config_dir()?;
    Some(
        home_config_folder_path
            .join(ConfigPaths::TopLevelFolderName.to_string())
            .join(ConfigPaths::SessionFile.to_string()),
    )
}

/// Returns `None` if there is no session file yet.
///
/// # Errors
///
/// Returns an error if the file exists but can't be read, or doesn't hold a session.
pub fn try_load(session_file_path: &Path) -> CommonResult<Option<SessionState>> {
    if !session_file_path.exists() {
        call_if_true!(DEBUG_SESSION_STORAGE, {
            // % is Display, ? is Debug.
            tracing::debug!(
                message = "💾 No session file, starting fresh",
                session_file_path = ?session_file_path
            );
        });
        return ok!(None);
    }

    let json = fs::read_to_string(session_file_path)
        .into_diagnostic()
        .wrap_err(SessionErrorCouldNot::ReadFile {
            path: session_file_path.display().to_string(),
        })?;

    let session_state: SessionState = serde_json::from_str(&json)
        .into_diagnostic()
        .wrap_err(SessionErrorCouldNot::ParseFile {
            path: session_file_path.display().to_string(),
        })?;

    call_if_true!(DEBUG_SESSION_STORAGE, {
        // % is Display, ? is Debug.
        tracing::debug!(
            message = "💾 Session loaded",
            session_file_path = ?session_file_path,
            program = ?session_state.program
        );
    });

    ok!(Some(session_state))
}

/// Creates the parent folder if needed, and overwrites the file.
///
/// # Errors
///
/// Returns an error if the folder or the file can't be written.
pub fn try_save(session_file_path: &Path, session_state: &SessionState) -> CommonResult<()> {
    if let Some(folder_path) = session_file_path.parent() {
        fs::create_dir_all(folder_path)
            .into_diagnostic()
            .wrap_err(SessionErrorCouldNot::CreateFolder {
                path: folder_path.display().to_string(),
            })?;
    }

    let json = serde_json::to_string_pretty(session_state)
        .into_diagnostic()
        .wrap_err(SessionErrorCouldNot::SerializeState)?;

    fs::write(session_file_path, json)
        .into_diagnostic()
        .wrap_err(SessionErrorCouldNot::WriteFile {
            path: session_file_path.display().to_string(),
        })?;

    call_if_true!(DEBUG_SESSION_STORAGE, {
        // % is Display, ? is Debug.
        tracing::debug!(
            message = "💾 Session saved",
            session_file_path = ?session_file_path
        );
    });

    ok!()
}

pub mod session_error {
    #[derive(thiserror::Error, Debug, miette::Diagnostic)]
    pub enum SessionErrorCouldNot {
        #[error("📁 Could not create session folder: '{path}'")]
        CreateFolder { path: String },

        #[error("🔼 Could not read session file: '{path}'")]
        ReadFile { path: String },

        #[error("🧩 Could not parse session file: '{path}'")]
        #[diagnostic(help("Delete the file, or start with `--no-session`"))]
        ParseFile { path: String },

        #[error("📦 Could not serialize session state")]
        SerializeState,

        #[error("🔽 Could not write session file: '{path}'")]
        WriteFile { path: String },
    }
}
pub use session_error::SessionErrorCouldNot;

#[cfg(test)]
mod tests {
    use rpncalc_core::{Brain, DisplayFormat, assert_eq2};

    use super::*;

    #[test]
    fn test_default_path_ends_with_session_file() {
        if let Some(path) = try_get_default_session_file_path() {
            assert!(path.ends_with("rpncalc/session.json"));
        }
    }

    #[test]
    fn test_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let result = try_load(&dir.path().join("nope.json")).unwrap();
        assert_eq2!(result, None);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");

        let mut brain = Brain::new();
        brain.set_program(&["M", "2", "×"]);
        brain.set_variable("M", Some(1.5));
        let state = brain.session_state(DisplayFormat::Sci(3));

        try_save(&path, &state).unwrap();
        let loaded = try_load(&path).unwrap();
        assert_eq2!(loaded, Some(state));
    }

    #[test]
    fn test_garbage_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "not json").unwrap();

        let report = try_load(&path).unwrap_err();
        assert!(report.to_string().contains("Could not parse session file"));
    }
}
