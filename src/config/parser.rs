//! Configuration file parsing.
//!
//! The format is picked from the file extension: `.yaml`/`.yml` files are read
//! with `serde_yaml`, everything else as TOML. Errors carry the file path.
//!
//! ```text
//! Failed to parse config file: /site/layout-chain.toml
//! Caused by:
//!     invalid type: integer `3`, expected a map
//! ```

use anyhow::{Context, Result};
use std::path::Path;

/// Parse a TOML or YAML configuration file into the specified type.
///
/// # Examples
///
/// ```rust,no_run
/// use layout_chain::config::{ConfigFile, parse_config};
/// use std::path::Path;
///
/// # fn example() -> anyhow::Result<()> {
/// let config: ConfigFile = parse_config(Path::new("layout-chain.toml"))?;
/// println!("metadata keys: {}", config.metadata.len());
/// # Ok(())
/// # }
/// ```
pub fn parse_config<T>(path: &Path) -> Result<T>
where
    T: serde::de::DeserializeOwned,
{
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let is_yaml = matches!(path.extension().and_then(|ext| ext.to_str()), Some("yaml" | "yml"));

    let config: T = if is_yaml {
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?
    } else {
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?
    };

    Ok(config)
}
