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

//! Filename pattern compilation and field remapping.
//!
//! A *template* is a filename-like string such as `0_1_2_3_4.csv`. Its base
//! name (everything before the last `.`) is split on a delimiter into field
//! labels and its extension (everything after the last `.`) names the output
//! file type.
//!
//! Two templates are compiled into a [`FieldMap`]: the map has one slot per
//! *source* field, and slot `i` holds the *destination* template's label at
//! position `i` read as a field index. Destination templates are therefore
//! self-describing permutations of source positions.
//!
//! # Examples
//!
//! ```rust
//! use rekey_core::pattern::PatternMapper;
//!
//! let mapper = PatternMapper::new("0_1_2_3_4.csv", "0_1_4_2_3.csv", "_").unwrap();
//! let renamed = mapper.transform("ABC_test_123_20190912_0010.csv").unwrap();
//! assert_eq!(renamed, "ABC_test_0010_123_20190912.csv");
//! ```

use crate::config::RenameConfig;
use thiserror::Error;

/// Separator between a file's base name and its extension.
pub const EXTENSION_SEPARATOR: char = '.';

/// Separator between an object key's prefix and its file name.
pub const KEY_PREFIX_SEPARATOR: char = '/';

/// Errors raised while compiling templates or transforming filenames.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    /// The template is empty, lacks an extension, or the delimiter is empty.
    #[error("Invalid pattern '{template}': {reason}")]
    InvalidPattern {
        /// Template as configured
        template: String,
        /// What is wrong with it
        reason: String,
    },

    /// The destination template cannot supply an index for every source field.
    #[error("Field count mismatch: {message}")]
    FieldCountMismatch {
        /// Human-readable error message
        message: String,
    },

    /// A filename has fewer fields than the field map refers to.
    #[error("Field index out of range for '{filename}': {message}")]
    FieldIndexOutOfRange {
        /// Filename being transformed
        filename: String,
        /// Human-readable error message
        message: String,
    },
}

impl PatternError {
    fn invalid(template: &str, reason: impl Into<String>) -> Self {
        Self::InvalidPattern {
            template: template.to_string(),
            reason: reason.into(),
        }
    }

    fn out_of_range(filename: &str, message: impl Into<String>) -> Self {
        Self::FieldIndexOutOfRange {
            filename: filename.to_string(),
            message: message.into(),
        }
    }
}

/// A compiled template: ordered field labels plus an extension.
///
/// A pattern always has at least one field and a non-empty extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    fields: Vec<String>,
    extension: String,
}

impl Pattern {
    /// Compiles `template` by splitting on its last `.` and then splitting
    /// the base name on `delimiter`.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError::InvalidPattern`] if the template is empty, has
    /// no `.`, has nothing after its last `.`, or if `delimiter` is empty.
    pub fn compile(template: &str, delimiter: &str) -> Result<Self, PatternError> {
        if template.is_empty() {
            return Err(PatternError::invalid(template, "template is empty"));
        }

        if delimiter.is_empty() {
            return Err(PatternError::invalid(template, "field delimiter is empty"));
        }

        let (base, extension) = template
            .rsplit_once(EXTENSION_SEPARATOR)
            .ok_or_else(|| PatternError::invalid(template, "missing '.' extension separator"))?;

        if extension.is_empty() {
            return Err(PatternError::invalid(template, "extension is empty"));
        }

        Ok(Self {
            fields: base.split(delimiter).map(str::to_owned).collect(),
            extension: extension.to_string(),
        })
    }

    /// Field labels in template order.
    #[must_use]
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Number of fields.
    #[must_use]
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Extension without the leading dot.
    #[must_use]
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Rebuilds the template text this pattern was compiled from.
    #[must_use]
    pub fn to_template(&self, delimiter: &str) -> String {
        format!(
            "{}{}{}",
            self.fields.join(delimiter),
            EXTENSION_SEPARATOR,
            self.extension
        )
    }
}

/// Compiles a template. See [`Pattern::compile`].
///
/// # Errors
///
/// Returns [`PatternError::InvalidPattern`] for malformed templates.
pub fn compile_pattern(template: &str, delimiter: &str) -> Result<Pattern, PatternError> {
    Pattern::compile(template, delimiter)
}

/// Positional map from output slot to input field index.
///
/// Sized by the source pattern; values come from the destination pattern's
/// labels at the same positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMap(Vec<usize>);

impl FieldMap {
    /// Builds the map for a source/destination pattern pair.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError::FieldCountMismatch`] if `dest` has fewer fields
    /// than `source`, or if any of its first `source.field_count()` labels is
    /// not a non-negative integer.
    pub fn build(source: &Pattern, dest: &Pattern) -> Result<Self, PatternError> {
        if dest.field_count() < source.field_count() {
            return Err(PatternError::FieldCountMismatch {
                message: format!(
                    "destination pattern has {} fields but source pattern has {}",
                    dest.field_count(),
                    source.field_count()
                ),
            });
        }

        let indices = dest.fields[..source.field_count()]
            .iter()
            .enumerate()
            .map(|(position, label)| {
                label
                    .parse::<usize>()
                    .map_err(|e| PatternError::FieldCountMismatch {
                        message: format!(
                            "destination field {position} ('{label}') is not a field index: {e}"
                        ),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self(indices))
    }

    /// Number of output slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false` for maps built from compiled patterns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Input field index feeding output slot `position`.
    #[must_use]
    pub fn get(&self, position: usize) -> Option<usize> {
        self.0.get(position).copied()
    }

    /// Input field indices in output order.
    #[must_use]
    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }
}

/// Builds a field map. See [`FieldMap::build`].
///
/// # Errors
///
/// Returns [`PatternError::FieldCountMismatch`] when the destination pattern
/// cannot supply an index for every source field.
pub fn build_field_map(source: &Pattern, dest: &Pattern) -> Result<FieldMap, PatternError> {
    FieldMap::build(source, dest)
}

/// Renames `filename` by reordering its fields through `field_map`.
///
/// The text after the last `.` of `filename` is discarded and replaced by the
/// destination extension. The transform is all-or-nothing.
///
/// # Errors
///
/// Returns [`PatternError::FieldIndexOutOfRange`] if `filename` has fewer
/// fields than `source`, or fewer than some index in `field_map` requires.
pub fn transform(
    filename: &str,
    source: &Pattern,
    dest: &Pattern,
    field_map: &FieldMap,
    delimiter: &str,
) -> Result<String, PatternError> {
    let base = filename
        .rsplit_once(EXTENSION_SEPARATOR)
        .map_or(filename, |(base, _)| base);
    let name_fields: Vec<&str> = base.split(delimiter).collect();

    if name_fields.len() < source.field_count() {
        return Err(PatternError::out_of_range(
            filename,
            format!(
                "expected {} fields, found {}",
                source.field_count(),
                name_fields.len()
            ),
        ));
    }

    let mut output = Vec::with_capacity(field_map.len());
    for (position, &index) in field_map.as_slice().iter().enumerate() {
        let field = name_fields.get(index).ok_or_else(|| {
            PatternError::out_of_range(
                filename,
                format!(
                    "slot {position} needs field {index} but only {} fields are present",
                    name_fields.len()
                ),
            )
        })?;
        output.push(*field);
    }

    Ok(format!(
        "{}{}{}",
        output.join(delimiter),
        EXTENSION_SEPARATOR,
        dest.extension()
    ))
}

/// Compiled source/destination patterns and the field map between them.
///
/// Built once from configuration and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternMapper {
    source: Pattern,
    dest: Pattern,
    field_map: FieldMap,
    delimiter: String,
}

impl PatternMapper {
    /// Compiles both templates and builds the field map.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError::InvalidPattern`] for a malformed template and
    /// [`PatternError::FieldCountMismatch`] when the templates are incompatible.
    pub fn new(
        source_template: &str,
        dest_template: &str,
        delimiter: &str,
    ) -> Result<Self, PatternError> {
        let source = compile_pattern(source_template, delimiter)?;
        let dest = compile_pattern(dest_template, delimiter)?;
        let field_map = build_field_map(&source, &dest)?;

        Ok(Self {
            source,
            dest,
            field_map,
            delimiter: delimiter.to_string(),
        })
    }

    /// Builds a mapper from the templates and delimiter in `config`.
    ///
    /// # Errors
    ///
    /// See [`PatternMapper::new`].
    pub fn from_config(config: &RenameConfig) -> Result<Self, PatternError> {
        Self::new(&config.source_pattern, &config.dest_pattern, &config.delimiter)
    }

    /// Transforms a bare filename.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError::FieldIndexOutOfRange`] when `filename` does not
    /// have enough fields.
    pub fn transform(&self, filename: &str) -> Result<String, PatternError> {
        transform(
            filename,
            &self.source,
            &self.dest,
            &self.field_map,
            &self.delimiter,
        )
    }

    /// Transforms the file name part of an object key, keeping any
    /// `prefix/` in front of it unchanged.
    ///
    /// # Errors
    ///
    /// See [`PatternMapper::transform`].
    pub fn transform_key(&self, key: &str) -> Result<String, PatternError> {
        match key.rsplit_once(KEY_PREFIX_SEPARATOR) {
            Some((prefix, name)) => Ok(format!(
                "{prefix}{KEY_PREFIX_SEPARATOR}{}",
                self.transform(name)?
            )),
            None => self.transform(key),
        }
    }

    /// Compiled source pattern.
    #[must_use]
    pub fn source(&self) -> &Pattern {
        &self.source
    }

    /// Compiled destination pattern.
    #[must_use]
    pub fn dest(&self) -> &Pattern {
        &self.dest
    }

    /// Field map between the two patterns.
    #[must_use]
    pub fn field_map(&self) -> &FieldMap {
        &self.field_map
    }

    /// Field delimiter.
    #[must_use]
    pub fn delimiter(&self) -> &str {
        &self.delimiter
    }
}
