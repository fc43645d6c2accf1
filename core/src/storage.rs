use std::path::Path;

use log::info;

use crate::config::Settings;
use crate::error::ConfigError;

/// Leser innstillinger fra disk (JSON).
/// Hvis filen ikke finnes, returneres default-innstillinger.
pub fn load_settings(path: impl AsRef<Path>) -> Result<Settings, ConfigError> {
    let path = path.as_ref();
    if !path.exists() {
        info!("⚠️ Fant ikke innstillinger på {}, bruker default", path.display());
        return Ok(Settings::default());
    }
    let contents = std::fs::read_to_string(path)
        .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
    let settings = parse_settings(&contents)?;
    info!("📂 Innstillinger lastet fra {}", path.display());
    Ok(settings)
}

/// Feil peker på JSON-stien til feltet som ikke lot seg lese.
pub fn parse_settings(contents: &str) -> Result<Settings, ConfigError> {
    let mut de = serde_json::Deserializer::from_str(contents);
    let settings: Settings = serde_path_to_error::deserialize(&mut de).map_err(|e| ConfigError::Parse {
        path: e.path().to_string(),
        message: e.inner().to_string(),
    })?;
    de.end()?;
    Ok(settings)
}

/// Lagrer innstillinger til disk som JSON (pretty-print).
pub fn save_settings(settings: &Settings, path: impl AsRef<Path>) -> Result<(), ConfigError> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(settings)?;
    std::fs::write(path, json).map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
    info!("✅ Innstillinger lagret til {}", path.display());
    Ok(())
}
