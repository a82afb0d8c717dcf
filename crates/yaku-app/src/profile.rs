use std::fs;
use std::path::Path;

use yaku_config::Config;

/// Load a JSON profile, or defaults when no path is given.
/// Environment overrides are applied on top either way.
pub fn load_profile(path: Option<&Path>) -> anyhow::Result<Config> {
    let mut config = match path {
        Some(path) => {
            tracing::info!("Loading profile from {}", path.display());
            let data = fs::read_to_string(path)?;
            serde_json::from_str(&data)?
        }
        None => {
            tracing::debug!("No profile given, using defaults");
            Config::default()
        }
    };

    config.apply_env();
    Ok(config)
}

/// Write the default profile, refusing to clobber an existing file
pub fn write_default_profile(path: &Path) -> anyhow::Result<()> {
    if path.exists() {
        anyhow::bail!("{} already exists", path.display());
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    fs::write(path, serde_json::to_string_pretty(&Config::default())?)?;
    tracing::info!("Created profile: {}", path.display());
    Ok(())
}
