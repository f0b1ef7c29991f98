// Copyright 2025 Rekey Contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

//! Rename configuration.
//!
//! This module provides the settings a rename run needs:
//! - Source and destination location (bucket) names
//! - Source and destination filename templates
//! - Field delimiter
//! - Optional staging directory for transient downloads
//!
//! Every setting is optional and falls back to a built-in default. The
//! configuration is loaded once (usually with [`RenameConfig::from_env`]) and
//! passed by reference to everything that needs it.
//!
//! # Environment
//!
//! | Variable | Legacy alias | Default |
//! |---|---|---|
//! | `SOURCE_LOCATION_NAME` | `SOURCE_BUCKET_NAME` | `bucket-01` |
//! | `DEST_LOCATION_NAME` | `DEST_BUCKET_NAME` | `bucket-02` |
//! | `SOURCE_PATTERN` | `REPLACE_SOURCE_PATTERN` | `0_1_2_3_4.csv` |
//! | `DEST_PATTERN` | `REPLACE_DEST_PATTERN` | `0_1_4_2_3.csv` |
//! | `FIELD_DELIMITER` | `FILENAME_DELI` | `_` |
//! | `STAGING_DIR` | | system temp directory |

use std::path::PathBuf;
use thiserror::Error;

/// Default source location.
pub const DEFAULT_SOURCE_LOCATION: &str = "bucket-01";

/// Default destination location.
pub const DEFAULT_DEST_LOCATION: &str = "bucket-02";

/// Default source template, e.g. `ABC_test_123_20190912_0010.csv`.
pub const DEFAULT_SOURCE_PATTERN: &str = "0_1_2_3_4.csv";

/// Default destination template, e.g. `ABC_test_0010_123_20190912.csv`.
pub const DEFAULT_DEST_PATTERN: &str = "0_1_4_2_3.csv";

/// Default field delimiter.
pub const DEFAULT_FIELD_DELIMITER: &str = "_";

/// Environment variable names, primary name first.
pub mod env {
    /// Source location name.
    pub const SOURCE_LOCATION: [&str; 2] = ["SOURCE_LOCATION_NAME", "SOURCE_BUCKET_NAME"];
    /// Destination location name.
    pub const DEST_LOCATION: [&str; 2] = ["DEST_LOCATION_NAME", "DEST_BUCKET_NAME"];
    /// Source template.
    pub const SOURCE_PATTERN: [&str; 2] = ["SOURCE_PATTERN", "REPLACE_SOURCE_PATTERN"];
    /// Destination template.
    pub const DEST_PATTERN: [&str; 2] = ["DEST_PATTERN", "REPLACE_DEST_PATTERN"];
    /// Field delimiter.
    pub const FIELD_DELIMITER: [&str; 2] = ["FIELD_DELIMITER", "FILENAME_DELI"];
    /// Staging directory root.
    pub const STAGING_DIR: [&str; 1] = ["STAGING_DIR"];
}

/// Errors raised when building a [`RenameConfig`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A required setting was set to an empty string.
    #[error("{field} cannot be empty")]
    Empty {
        /// Name of the offending setting
        field: &'static str,
    },
}

/// Configuration for a rename run.
///
/// # Examples
///
/// ```rust
/// use rekey_core::config::RenameConfig;
///
/// let config = RenameConfig::builder()
///     .source_location("landing")
///     .dest_location("curated")
///     .dest_pattern("4_3_2_1_0.csv")
///     .build()
///     .unwrap();
///
/// assert_eq!(config.source_pattern, "0_1_2_3_4.csv");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameConfig {
    /// Location (bucket) input keys are read from.
    pub source_location: String,

    /// Location (bucket) renamed objects are written to.
    pub dest_location: String,

    /// Template describing the field count and extension of inputs.
    pub source_pattern: String,

    /// Template whose field labels are source field indices, plus the
    /// output extension.
    pub dest_pattern: String,

    /// Delimiter separating filename fields.
    pub delimiter: String,

    /// Directory under which per-request staging directories are created.
    ///
    /// `None` uses the system temp directory.
    pub staging_dir: Option<PathBuf>,
}

impl Default for RenameConfig {
    fn default() -> Self {
        Self {
            source_location: DEFAULT_SOURCE_LOCATION.to_string(),
            dest_location: DEFAULT_DEST_LOCATION.to_string(),
            source_pattern: DEFAULT_SOURCE_PATTERN.to_string(),
            dest_pattern: DEFAULT_DEST_PATTERN.to_string(),
            delimiter: DEFAULT_FIELD_DELIMITER.to_string(),
            staging_dir: None,
        }
    }
}

impl RenameConfig {
    /// Creates a new builder for `RenameConfig`.
    #[must_use]
    pub fn builder() -> RenameConfigBuilder {
        RenameConfigBuilder::default()
    }

    /// Loads the configuration from process environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads the configuration through `lookup`, which maps a variable name
    /// to its value.
    ///
    /// For each setting the primary name is consulted before its legacy
    /// alias. Unset and empty values fall back to the default, so the
    /// result always holds non-empty locations and delimiter.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |names: &[&str]| {
            names
                .iter()
                .filter_map(|name| lookup(name))
                .find(|value| !value.is_empty())
        };
        let read_or = |names: &[&str], default: &str| {
            read(names).unwrap_or_else(|| default.to_string())
        };

        Self {
            source_location: read_or(&env::SOURCE_LOCATION, DEFAULT_SOURCE_LOCATION),
            dest_location: read_or(&env::DEST_LOCATION, DEFAULT_DEST_LOCATION),
            source_pattern: read_or(&env::SOURCE_PATTERN, DEFAULT_SOURCE_PATTERN),
            dest_pattern: read_or(&env::DEST_PATTERN, DEFAULT_DEST_PATTERN),
            delimiter: read_or(&env::FIELD_DELIMITER, DEFAULT_FIELD_DELIMITER),
            staging_dir: read(&env::STAGING_DIR).map(PathBuf::from),
        }
    }
}

/// Builder for `RenameConfig`.
///
/// Unset fields take their defaults.
#[derive(Debug, Default)]
pub struct RenameConfigBuilder {
    source_location: Option<String>,
    dest_location: Option<String>,
    source_pattern: Option<String>,
    dest_pattern: Option<String>,
    delimiter: Option<String>,
    staging_dir: Option<PathBuf>,
}

impl RenameConfigBuilder {
    /// Sets the source location name.
    #[must_use]
    pub fn source_location(mut self, location: impl Into<String>) -> Self {
        self.source_location = Some(location.into());
        self
    }

    /// Sets the destination location name.
    #[must_use]
    pub fn dest_location(mut self, location: impl Into<String>) -> Self {
        self.dest_location = Some(location.into());
        self
    }

    /// Sets the source template (default: `0_1_2_3_4.csv`).
    #[must_use]
    pub fn source_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.source_pattern = Some(pattern.into());
        self
    }

    /// Sets the destination template (default: `0_1_4_2_3.csv`).
    #[must_use]
    pub fn dest_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.dest_pattern = Some(pattern.into());
        self
    }

    /// Sets the field delimiter (default: `_`).
    #[must_use]
    pub fn delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = Some(delimiter.into());
        self
    }

    /// Sets the directory staging directories are created in.
    #[must_use]
    pub fn staging_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.staging_dir = Some(dir.into());
        self
    }

    /// Builds the `RenameConfig`.
    ///
    /// Templates are not compiled here; a malformed template surfaces as a
    /// pattern error when the rename runs.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Empty`] if a location name or the delimiter is
    /// set to an empty string.
    pub fn build(self) -> Result<RenameConfig, ConfigError> {
        let source_location = non_empty(
            "source_location",
            self.source_location,
            DEFAULT_SOURCE_LOCATION,
        )?;
        let dest_location = non_empty("dest_location", self.dest_location, DEFAULT_DEST_LOCATION)?;
        let delimiter = non_empty("delimiter", self.delimiter, DEFAULT_FIELD_DELIMITER)?;

        Ok(RenameConfig {
            source_location,
            dest_location,
            source_pattern: self
                .source_pattern
                .unwrap_or_else(|| DEFAULT_SOURCE_PATTERN.to_string()),
            dest_pattern: self
                .dest_pattern
                .unwrap_or_else(|| DEFAULT_DEST_PATTERN.to_string()),
            delimiter,
            staging_dir: self.staging_dir,
        })
    }
}

fn non_empty(
    field: &'static str,
    value: Option<String>,
    default: &str,
) -> Result<String, ConfigError> {
    match value {
        Some(value) if value.is_empty() => Err(ConfigError::Empty { field }),
        Some(value) => Ok(value),
        None => Ok(default.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = RenameConfig::builder().build().unwrap();

        assert_eq!(config, RenameConfig::default());
        assert_eq!(config.source_location, "bucket-01");
        assert_eq!(config.dest_location, "bucket-02");
        assert_eq!(config.source_pattern, "0_1_2_3_4.csv");
        assert_eq!(config.dest_pattern, "0_1_4_2_3.csv");
        assert_eq!(config.delimiter, "_");
        assert!(config.staging_dir.is_none());
    }

    #[test]
    fn test_builder_overrides() {
        let config = RenameConfig::builder()
            .source_location("in")
            .dest_location("out")
            .source_pattern("0-1.txt")
            .dest_pattern("1-0.txt")
            .delimiter("-")
            .staging_dir("/var/tmp/rekey")
            .build()
            .unwrap();

        assert_eq!(config.source_location, "in");
        assert_eq!(config.dest_location, "out");
        assert_eq!(config.source_pattern, "0-1.txt");
        assert_eq!(config.dest_pattern, "1-0.txt");
        assert_eq!(config.delimiter, "-");
        assert_eq!(config.staging_dir, Some(PathBuf::from("/var/tmp/rekey")));
    }

    #[test]
    fn test_builder_rejects_empty_values() {
        let err = RenameConfig::builder().source_location("").build().unwrap_err();
        assert_eq!(err, ConfigError::Empty { field: "source_location" });

        let err = RenameConfig::builder().dest_location("").build().unwrap_err();
        assert_eq!(err, ConfigError::Empty { field: "dest_location" });

        let err = RenameConfig::builder().delimiter("").build().unwrap_err();
        assert_eq!(err, ConfigError::Empty { field: "delimiter" });
    }

    #[test]
    fn test_from_lookup_empty_environment() {
        let config = RenameConfig::from_lookup(|_| None);
        assert_eq!(config, RenameConfig::default());
    }

    #[test]
    fn test_from_lookup_primary_names() {
        let config = RenameConfig::from_lookup(lookup_from(&[
            ("SOURCE_LOCATION_NAME", "landing"),
            ("DEST_LOCATION_NAME", "curated"),
            ("SOURCE_PATTERN", "0.1.2.dat"),
            ("DEST_PATTERN", "2.1.0.dat"),
            ("FIELD_DELIMITER", "."),
            ("STAGING_DIR", "/scratch"),
        ]));

        assert_eq!(config.source_location, "landing");
        assert_eq!(config.dest_location, "curated");
        assert_eq!(config.source_pattern, "0.1.2.dat");
        assert_eq!(config.dest_pattern, "2.1.0.dat");
        assert_eq!(config.delimiter, ".");
        assert_eq!(config.staging_dir, Some(PathBuf::from("/scratch")));
    }

    #[test]
    fn test_from_lookup_legacy_aliases() {
        let config = RenameConfig::from_lookup(lookup_from(&[
            ("SOURCE_BUCKET_NAME", "old-in"),
            ("DEST_BUCKET_NAME", "old-out"),
            ("REPLACE_SOURCE_PATTERN", "0_1.csv"),
            ("REPLACE_DEST_PATTERN", "1_0.csv"),
            ("FILENAME_DELI", "_"),
        ]));

        assert_eq!(config.source_location, "old-in");
        assert_eq!(config.dest_location, "old-out");
        assert_eq!(config.source_pattern, "0_1.csv");
        assert_eq!(config.dest_pattern, "1_0.csv");
    }

    #[test]
    fn test_from_lookup_primary_wins_over_alias() {
        let config = RenameConfig::from_lookup(lookup_from(&[
            ("SOURCE_LOCATION_NAME", "new"),
            ("SOURCE_BUCKET_NAME", "old"),
        ]));

        assert_eq!(config.source_location, "new");
    }

    #[test]
    fn test_from_lookup_empty_value_falls_back() {
        let config = RenameConfig::from_lookup(lookup_from(&[
            ("SOURCE_LOCATION_NAME", ""),
            ("SOURCE_BUCKET_NAME", "legacy"),
            ("FIELD_DELIMITER", ""),
        ]));

        assert_eq!(config.source_location, "legacy");
        assert_eq!(config.delimiter, "_");
    }

    #[test]
    fn test_from_lookup_all_empty_yields_defaults() {
        let config = RenameConfig::from_lookup(|_| Some(String::new()));

        assert_eq!(config, RenameConfig::default());
        assert_eq!(
            RenameConfig::builder()
                .source_location(config.source_location.clone())
                .dest_location(config.dest_location.clone())
                .delimiter(config.delimiter.clone())
                .build(),
            Ok(config)
        );
    }
}
