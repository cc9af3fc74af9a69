//! TOML-based configuration system for Campus.

use crate::error::{CampusError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable honored by the Auth emulator tooling.
pub const EMULATOR_HOST_ENV: &str = "FIREBASE_AUTH_EMULATOR_HOST";

/// Top-level Campus configuration, deserialized from a TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampusConfig {
    pub roster: RosterConfig,
    #[serde(default)]
    pub identity: IdentityConfig,
}

/// Location of the roster CSV exports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterConfig {
    pub data_dir: String,
    #[serde(default = "default_courses_file")]
    pub courses_file: String,
    #[serde(default = "default_sections_file")]
    pub sections_file: String,
    #[serde(default = "default_zoom_links_file")]
    pub zoom_links_file: String,
}

impl RosterConfig {
    /// Config rooted at `data_dir` with the default file names.
    pub fn with_data_dir(data_dir: impl Into<String>) -> Self {
        Self {
            data_dir: data_dir.into(),
            courses_file: default_courses_file(),
            sections_file: default_sections_file(),
            zoom_links_file: default_zoom_links_file(),
        }
    }

    pub fn courses_path(&self) -> PathBuf {
        Path::new(&self.data_dir).join(&self.courses_file)
    }

    pub fn sections_path(&self) -> PathBuf {
        Path::new(&self.data_dir).join(&self.sections_file)
    }

    pub fn zoom_links_path(&self) -> PathBuf {
        Path::new(&self.data_dir).join(&self.zoom_links_file)
    }
}

fn default_courses_file() -> String {
    "courses.csv".into()
}

fn default_sections_file() -> String {
    "section.csv".into()
}

fn default_zoom_links_file() -> String {
    "zoom_links.csv".into()
}

/// Identity service (Identity Toolkit) settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub project_id: String,
    /// Name of the environment variable holding the OAuth2 bearer token.
    #[serde(default = "default_access_token_env")]
    pub access_token_env: String,
    #[serde(default)]
    pub base_url: Option<String>,
    /// `host:port` of a local Auth emulator. Overrides `base_url`.
    #[serde(default)]
    pub emulator_host: Option<String>,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            project_id: String::new(),
            access_token_env: default_access_token_env(),
            base_url: None,
            emulator_host: None,
        }
    }
}

fn default_access_token_env() -> String {
    "CAMPUS_IDENTITY_TOKEN".into()
}

impl IdentityConfig {
    /// The configured emulator host, falling back to [`EMULATOR_HOST_ENV`].
    pub fn resolved_emulator_host(&self) -> Option<String> {
        self.emulator_host
            .clone()
            .or_else(|| std::env::var(EMULATOR_HOST_ENV).ok())
            .filter(|h| !h.trim().is_empty())
    }
}

impl CampusConfig {
    /// Load configuration from a TOML file at the given path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| CampusError::Config(format!("failed to parse config: {e}")))?;
        Ok(config)
    }

    /// Validate the configuration, returning an error for invalid combinations.
    pub fn validate(&self) -> Result<()> {
        if self.roster.data_dir.is_empty() {
            return Err(CampusError::Config(
                "roster.data_dir must not be empty".into(),
            ));
        }

        for (key, value) in [
            ("roster.courses_file", &self.roster.courses_file),
            ("roster.sections_file", &self.roster.sections_file),
            ("roster.zoom_links_file", &self.roster.zoom_links_file),
        ] {
            if value.is_empty() {
                return Err(CampusError::Config(format!("{key} must not be empty")));
            }
        }

        if self.identity.enabled {
            if self.identity.project_id.is_empty() {
                return Err(CampusError::Config(
                    "identity.project_id is required when identity is enabled".into(),
                ));
            }
            if self.identity.access_token_env.is_empty() {
                return Err(CampusError::Config(
                    "identity.access_token_env must not be empty".into(),
                ));
            }
        }

        Ok(())
    }

    /// Generate a sensible default configuration.
    pub fn generate_default() -> Self {
        Self {
            roster: RosterConfig::with_data_dir("/var/lib/campus/data"),
            identity: IdentityConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_TOML: &str = r#"
[roster]
data_dir = "/srv/campus"
sections_file = "sections_export.csv"

[identity]
enabled = true
project_id = "springfield-upper"
emulator_host = "localhost:9099"
"#;

    fn parse_sample() -> CampusConfig {
        toml::from_str(SAMPLE_TOML).expect("sample TOML should parse")
    }

    #[test]
    fn parse_full_config() {
        let cfg = parse_sample();
        assert_eq!(cfg.roster.data_dir, "/srv/campus");
        assert_eq!(cfg.roster.courses_file, "courses.csv");
        assert_eq!(cfg.roster.sections_file, "sections_export.csv");
        assert_eq!(cfg.roster.zoom_links_file, "zoom_links.csv");
        assert!(cfg.identity.enabled);
        assert_eq!(cfg.identity.project_id, "springfield-upper");
        assert_eq!(cfg.identity.access_token_env, "CAMPUS_IDENTITY_TOKEN");
        assert_eq!(cfg.identity.emulator_host.as_deref(), Some("localhost:9099"));
        assert!(cfg.identity.base_url.is_none());
        cfg.validate().unwrap();
    }

    #[test]
    fn identity_section_is_optional() {
        let cfg: CampusConfig = toml::from_str("[roster]\ndata_dir = \"/data\"\n").unwrap();
        assert!(!cfg.identity.enabled);
        cfg.validate().unwrap();
    }

    #[test]
    fn roster_paths_join_data_dir() {
        let cfg = parse_sample();
        assert_eq!(
            cfg.roster.courses_path(),
            Path::new("/srv/campus/courses.csv")
        );
        assert_eq!(
            cfg.roster.sections_path(),
            Path::new("/srv/campus/sections_export.csv")
        );
        assert_eq!(
            cfg.roster.zoom_links_path(),
            Path::new("/srv/campus/zoom_links.csv")
        );
    }

    #[test]
    fn roundtrip_serialization() {
        let cfg = parse_sample();
        let serialized = toml::to_string(&cfg).expect("should serialize");
        let deserialized: CampusConfig =
            toml::from_str(&serialized).expect("should deserialize roundtrip");
        assert_eq!(deserialized.roster.data_dir, cfg.roster.data_dir);
        assert_eq!(deserialized.identity.project_id, cfg.identity.project_id);
    }

    #[test]
    fn generate_default_is_valid() {
        CampusConfig::generate_default().validate().unwrap();
    }

    #[test]
    fn validate_requires_data_dir() {
        let mut cfg = parse_sample();
        cfg.roster.data_dir = String::new();
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("roster.data_dir"));
    }

    #[test]
    fn validate_requires_file_names() {
        let mut cfg = parse_sample();
        cfg.roster.zoom_links_file = String::new();
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("roster.zoom_links_file"));
    }

    #[test]
    fn validate_requires_project_id_when_enabled() {
        let mut cfg = parse_sample();
        cfg.identity.project_id = String::new();
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("identity.project_id"));
    }

    #[test]
    fn validate_identity_disabled_no_project_ok() {
        let mut cfg = parse_sample();
        cfg.identity.enabled = false;
        cfg.identity.project_id = String::new();
        cfg.validate().unwrap();
    }

    #[test]
    fn configured_emulator_host_wins() {
        let cfg = parse_sample();
        assert_eq!(
            cfg.identity.resolved_emulator_host().as_deref(),
            Some("localhost:9099")
        );
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("campus.toml");
        std::fs::write(&path, SAMPLE_TOML).unwrap();

        let cfg = CampusConfig::load(&path).expect("should load from file");
        assert_eq!(cfg.identity.project_id, "springfield-upper");
    }

    #[test]
    fn load_nonexistent_file_returns_io_error() {
        let result = CampusConfig::load(Path::new("/nonexistent/campus.toml"));
        assert!(matches!(result, Err(CampusError::Io(_))));
    }

    #[test]
    fn load_invalid_toml_returns_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "this is [[[not valid toml").unwrap();

        let result = CampusConfig::load(&path);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("config"));
    }
}
