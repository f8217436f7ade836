//! Cassette configuration for composable per-port replay.

use std::path::{Path, PathBuf};

use super::format::Cassette;
use super::replayer::CassetteReplayer;

/// Per-port cassette file paths. Ports without a path panic if called
/// during replay.
#[derive(Debug, Clone, Default)]
pub struct CassetteConfig {
    /// Path to the filesystem port cassette file.
    pub fs: Option<PathBuf>,
    /// Path to the shell port cassette file.
    pub shell: Option<PathBuf>,
}

/// Per-port replayers, each with its own interaction stream.
pub struct PortReplayers {
    /// Replayer for the filesystem port.
    pub fs: Option<CassetteReplayer>,
    /// Replayer for the shell port.
    pub shell: Option<CassetteReplayer>,
}

impl CassetteConfig {
    /// Uses the conventional file names of a recording session directory
    /// (`fs.cassette.yaml`, `shell.cassette.yaml`).
    #[must_use]
    pub fn from_session_dir(dir: &Path) -> Self {
        Self {
            fs: Some(dir.join("fs.cassette.yaml")),
            shell: Some(dir.join("shell.cassette.yaml")),
        }
    }

    /// Load a cassette file and create a replayer for it.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<CassetteReplayer, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read cassette file {}: {e}", path.display()))?;
        let cassette = Cassette::from_yaml(&content)
            .map_err(|e| format!("Failed to parse cassette file {}: {e}", path.display()))?;
        Ok(CassetteReplayer::new(&cassette))
    }

    /// Load all configured cassette files and create replayers.
    ///
    /// # Errors
    ///
    /// Returns an error if any configured cassette file cannot be read or parsed.
    pub fn load_all(&self) -> Result<PortReplayers, String> {
        Ok(PortReplayers {
            fs: self.fs.as_deref().map(Self::load).transpose()?,
            shell: self.shell.as_deref().map(Self::load).transpose()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::Interaction;
    use chrono::Utc;
    use serde_json::json;

    fn write_cassette(path: &Path, interactions: Vec<Interaction>) {
        let cassette = Cassette {
            name: "test".into(),
            recorded_at: Utc::now(),
            workspace: "/srv/wiki".into(),
            interactions,
        };
        std::fs::write(path, serde_yaml::to_string(&cassette).unwrap()).unwrap();
    }

    #[test]
    fn session_dir_uses_conventional_names() {
        let config = CassetteConfig::from_session_dir(Path::new("/rec/2024"));
        assert_eq!(config.fs.unwrap(), Path::new("/rec/2024/fs.cassette.yaml"));
        assert_eq!(config.shell.unwrap(), Path::new("/rec/2024/shell.cassette.yaml"));
    }

    #[test]
    fn load_only_configured_ports() {
        let dir = tempfile::tempdir().unwrap();
        let shell_path = dir.path().join("shell.cassette.yaml");
        write_cassette(
            &shell_path,
            vec![Interaction {
                seq: 0,
                port: "shell".into(),
                method: "run".into(),
                input: json!({"args": ["status", "FrontPage"]}),
                output: json!({"ok": {"exit_code": 0, "stdout": "", "stderr": ""}}),
            }],
        );

        let config = CassetteConfig { shell: Some(shell_path), ..CassetteConfig::default() };
        let mut replayers = config.load_all().unwrap();

        assert!(replayers.fs.is_none());
        let shell = replayers.shell.as_mut().unwrap();
        assert_eq!(shell.next_interaction("shell", "run").input["args"][0], "status");
    }

    #[test]
    fn missing_cassette_file_is_an_error() {
        let config = CassetteConfig {
            fs: Some(PathBuf::from("/nonexistent/fs.cassette.yaml")),
            ..CassetteConfig::default()
        };
        let err = config.load_all().err().unwrap();
        assert!(err.contains("Failed to read cassette file"));
    }
}
