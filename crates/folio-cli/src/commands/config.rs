use anyhow::{bail, Result};

use folio_core::AppConfig;

/// Print the effective configuration
pub fn show(config: &AppConfig) -> Result<()> {
    let path = AppConfig::config_path();
    if path.exists() {
        println!("# {}", path.display());
    } else {
        println!("# {} (not found, showing defaults)", path.display());
    }
    print!("{}", config.to_toml()?);
    Ok(())
}

/// Write the default configuration file
pub fn init(force: bool) -> Result<()> {
    let path = AppConfig::config_path();
    if path.exists() && !force {
        bail!(
            "Config file already exists: {}\nUse --force to overwrite it.",
            path.display()
        );
    }

    AppConfig::default().save()?;
    println!("Wrote default configuration to {}", path.display());
    Ok(())
}

/// Print the configuration file path
pub fn path() -> Result<()> {
    println!("{}", AppConfig::config_path().display());
    Ok(())
}
