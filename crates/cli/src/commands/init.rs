use std::path::Path;

use campus_core::config::{CampusConfig, RosterConfig};
use tracing::info;

/// Run the `init` command: write a default configuration file.
pub fn run(config_path: &str, data_dir: &str, project_id: Option<&str>) -> anyhow::Result<()> {
    let path = Path::new(config_path);
    if path.exists() {
        anyhow::bail!("{} already exists, refusing to overwrite", path.display());
    }

    let config = build_config(data_dir, project_id);
    config.validate()?;

    let content = toml::to_string_pretty(&config)?;
    std::fs::write(path, content)?;
    info!(config = %path.display(), "wrote default configuration");

    println!("Configuration written to {}", path.display());
    println!("  Roster data dir: {}", config.roster.data_dir);
    if config.identity.enabled {
        println!("  Identity project: {}", config.identity.project_id);
        println!(
            "  Set {} to an OAuth2 access token before running `users` commands.",
            config.identity.access_token_env
        );
    }

    Ok(())
}

fn build_config(data_dir: &str, project_id: Option<&str>) -> CampusConfig {
    let mut config = CampusConfig::generate_default();
    config.roster = RosterConfig::with_data_dir(data_dir);
    if let Some(project_id) = project_id {
        config.identity.enabled = true;
        config.identity.project_id = project_id.to_string();
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_loadable_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("campus.toml");
        let path_str = path.to_string_lossy().to_string();

        run(&path_str, "/srv/campus", Some("springfield")).unwrap();

        let cfg = CampusConfig::load(&path).unwrap();
        cfg.validate().unwrap();
        assert_eq!(cfg.roster.data_dir, "/srv/campus");
        assert!(cfg.identity.enabled);
        assert_eq!(cfg.identity.project_id, "springfield");
    }

    #[test]
    fn refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("campus.toml");
        std::fs::write(&path, "keep me").unwrap();

        let result = run(&path.to_string_lossy(), "/srv/campus", None);
        assert!(result.is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "keep me");
    }

    #[test]
    fn identity_disabled_without_project() {
        let cfg = build_config("/data", None);
        assert!(!cfg.identity.enabled);
    }
}
