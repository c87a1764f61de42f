//! User configuration.

use std::env;
use std::fs;
use std::io;
use std::path::PathBuf;

use log::*;
use serde::de::{self, Deserializer};
use serde::Deserialize;

use crate::turtle::DEFAULT_POINTER_SCALE;

/// Configuration supplied by the user.
#[derive(Debug, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    /// Name under which the drawing surface is registered and resolved.
    #[serde(default = "default_canvas")]
    pub canvas: String,

    /// Scale applied to raw pointer offsets before coordinate conversion,
    /// compensating for the display's backing-store pixel ratio.
    #[serde(
        default = "default_pointer_scale",
        deserialize_with = "validate_pointer_scale"
    )]
    pub pointer_scale: f64,

    #[serde(default)]
    pub surface: SurfaceConfig,
}

/// Pixel dimensions of the surface the host registers.
#[derive(Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SurfaceConfig {
    #[serde(
        default = "default_dimension",
        deserialize_with = "validate_dimension"
    )]
    pub width: u32,

    #[serde(
        default = "default_dimension",
        deserialize_with = "validate_dimension"
    )]
    pub height: u32,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            canvas: default_canvas(),
            pointer_scale: default_pointer_scale(),
            surface: SurfaceConfig::default(),
        }
    }
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        SurfaceConfig {
            width: default_dimension(),
            height: default_dimension(),
        }
    }
}

fn default_canvas() -> String {
    String::from("canvas")
}

fn default_pointer_scale() -> f64 {
    DEFAULT_POINTER_SCALE
}

fn default_dimension() -> u32 {
    500
}

fn validate_pointer_scale<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let scale = f64::deserialize(deserializer)?;
    if scale <= 0.0 {
        return Err(de::Error::custom("pointer-scale must be positive"));
    }

    Ok(scale)
}

fn validate_dimension<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let dimension = u32::deserialize(deserializer)?;
    if dimension == 0 {
        return Err(de::Error::custom("surface dimensions must be nonzero"));
    }

    Ok(dimension)
}

impl Config {
    /// Read the configuration from a file path. If no path is supplied, the
    /// default configuration is returned.
    pub fn read(path: Option<PathBuf>) -> anyhow::Result<Config> {
        // If the file doesn't exist, return the default config.
        let path = match path {
            Some(path) => path,
            None => {
                info!("could not determine config directory");
                return Ok(Config::default());
            }
        };

        info!("reading config from {}", path.display());

        let config = match fs::read(path) {
            Ok(bytes) => toml::from_slice(&bytes)?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!("config file not found");
                return Ok(Config::default());
            }
            Err(e) => return Err(e.into()),
        };

        Ok(config)
    }

    /// Returns the path of the config file.
    ///
    /// Respects `XDG_CONFIG_HOME`.
    pub fn config_path() -> Option<PathBuf> {
        let config_dir = env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))?;

        Some(config_dir.join("turtle/config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;
    use std::io::Write;
    use std::ops::Deref;

    use indoc::indoc;
    use tempfile::NamedTempFile;

    use super::{Config, SurfaceConfig};

    #[test]
    fn deserialize_empty_config() -> Result<(), Box<dyn Error>> {
        let config = toml::from_str::<Config>("")?;
        assert_eq!(config, Config::default());
        Ok(())
    }

    #[test]
    fn deserialize_full_config() -> Result<(), Box<dyn Error>> {
        let config = toml::from_str::<Config>(indoc!(
            "
            canvas = 'scratch'
            pointer-scale = 1.0

            [surface]
            width = 640
            height = 480
            "
        ))?;
        assert_eq!(
            config,
            Config {
                canvas: String::from("scratch"),
                pointer_scale: 1.0,
                surface: SurfaceConfig {
                    width: 640,
                    height: 480,
                },
            }
        );
        Ok(())
    }

    #[test]
    fn deserialize_pointer_scale_not_positive() {
        let err = toml::from_str::<Config>("pointer-scale = 0.0").unwrap_err();
        assert!(err.to_string().contains("pointer-scale must be positive"));
    }

    #[test]
    fn deserialize_zero_surface_dimension() {
        let err = toml::from_str::<Config>(indoc!(
            "
            [surface]
            width = 0
            "
        ))
        .unwrap_err();

        assert!(err.to_string().contains("surface dimensions must be nonzero"));
    }

    #[test]
    fn read_no_config_dir() {
        assert_eq!(Config::read(None).unwrap(), Config::default());
    }

    #[test]
    fn read_nonexistent_file() {
        let config = Config::read(Some("i-dont-exist.toml".into())).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn read_non_toml_file() {
        let (mut file, path) = NamedTempFile::new().unwrap().into_parts();
        file.write_all(b"I am not TOML").unwrap();
        assert!(Config::read(Some(path.deref().into())).is_err());
        drop(path);
    }
}
