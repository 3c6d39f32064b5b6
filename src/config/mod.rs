mod settings;
mod store;

pub use settings::{Agence, Config, Gestion};
pub use store::{Compteur, Store};

use crate::error::{Result, WoningError};
use directories::ProjectDirs;
use std::fs;
use std::path::PathBuf;

/// Get the config directory path (~/.woning/)
pub fn config_dir() -> Result<PathBuf> {
    // First try XDG-style directories
    if let Some(proj_dirs) = ProjectDirs::from("", "", "woning") {
        return Ok(proj_dirs.config_dir().to_path_buf());
    }

    // Fallback to ~/.woning/
    let home = dirs_home().ok_or_else(|| {
        WoningError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Could not determine home directory",
        ))
    })?;

    Ok(home.join(".woning"))
}

fn dirs_home() -> Option<PathBuf> {
    std::env::var_os("HOME").map(PathBuf::from)
}

/// Load the main config.toml
pub fn load_config(config_dir: &PathBuf) -> Result<Config> {
    let path = config_dir.join("config.toml");
    if !path.exists() {
        return Err(WoningError::ConfigFileNotFound(path));
    }
    let content = fs::read_to_string(&path)?;
    toml::from_str(&content).map_err(|e| WoningError::ConfigParse { path, source: e })
}

/// Load data.json (creates default if missing)
pub fn load_store(config_dir: &PathBuf) -> Result<Store> {
    let path = config_dir.join("data.json");
    if !path.exists() {
        return Ok(Store::default());
    }
    let content = fs::read_to_string(&path)?;
    serde_json::from_str(&content).map_err(|e| WoningError::StoreParse { path, source: e })
}

/// Save data.json
pub fn save_store(config_dir: &PathBuf, store: &Store) -> Result<()> {
    let path = config_dir.join("data.json");
    let content = serde_json::to_string_pretty(store).map_err(|e| {
        WoningError::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            e.to_string(),
        ))
    })?;
    fs::write(path, content)?;
    Ok(())
}

/// Template content for config.toml
pub const CONFIG_TEMPLATE: &str = r#"[agence]
nom = "Mon Agence"
# telephone = "+225 07 00 00 00 00"   # optional
# email = "contact@agence.ci"         # optional

[gestion]
commission_pct = 10.0   # commission withheld on owner remittances
devise = "FCFA"
"#;
