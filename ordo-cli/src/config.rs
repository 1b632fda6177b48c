use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use ordo_core::{Delimiter, SortKey};
use serde::Deserialize;

/// A sort profile loaded from TOML.
///
/// ```toml
/// delimiter = ","
/// keys = ["2:int:desc", "1"]
/// unique = true
/// ```
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Profile {
    pub delimiter: Option<String>,
    pub keys: Vec<String>,
    pub reverse: bool,
    pub unique: bool,
}

impl Profile {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read profile {}", path.display()))?;
        Self::parse_from_str(&contents, &path.display().to_string())
    }

    pub fn parse_from_str(contents: &str, origin: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|err| anyhow!("invalid profile {origin}: {err}"))
    }
}

/// Settings after merging the profile with command line flags.
#[derive(Debug)]
pub struct Settings {
    pub delimiter: Delimiter,
    pub keys: Vec<SortKey>,
    pub reverse: bool,
    pub unique: bool,
}

impl Settings {
    /// Command line keys replace profile keys; boolean flags are OR-ed.
    pub fn resolve(
        profile: Profile,
        delimiter: Option<&str>,
        keys: &[String],
        reverse: bool,
        unique: bool,
    ) -> Result<Self> {
        let delimiter = delimiter
            .or(profile.delimiter.as_deref())
            .map(str::parse::<Delimiter>)
            .transpose()?
            .unwrap_or_default();

        let raw_keys: &[String] = if keys.is_empty() { &profile.keys } else { keys };
        let keys = raw_keys
            .iter()
            .map(|key| key.parse::<SortKey>())
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Settings {
            delimiter,
            keys,
            reverse: reverse || profile.reverse,
            unique: unique || profile.unique,
        })
    }
}
