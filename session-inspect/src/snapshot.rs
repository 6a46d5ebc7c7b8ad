//! Loading state snapshots from disk or stdin

use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

use anyhow::{Context, Result};
use session_view::AppState;
use tracing::info;

/// Load a snapshot from `path`, or from stdin when `path` is `-`
pub fn load_state(path: &Path) -> Result<AppState> {
    let state = if path == Path::new("-") {
        AppState::from_reader(io::stdin().lock()).context("Failed to parse state from stdin")?
    } else {
        let file = File::open(path)
            .with_context(|| format!("Failed to open state file {}", path.display()))?;
        AppState::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to parse state file {}", path.display()))?
    };

    info!(
        entities = state.entities.len(),
        has_token = !state.session.is_empty(),
        "Loaded state snapshot"
    );
    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_state_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"entities": [{{"entity": "a", "color": "red"}}], "token": "t.u.v"}}"#
        )
        .unwrap();

        let state = load_state(file.path()).unwrap();
        assert_eq!(state.entities.len(), 1);
        assert_eq!(state.session.token, "t.u.v");
    }

    #[test]
    fn test_load_state_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_state(&dir.path().join("nope.json")).unwrap_err();
        assert!(format!("{}", err).contains("Failed to open state file"));
    }

    #[test]
    fn test_load_state_invalid_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"entities": "not a list"}}"#).unwrap();

        let err = load_state(file.path()).unwrap_err();
        assert!(format!("{}", err).contains("Failed to parse state file"));
    }
}
