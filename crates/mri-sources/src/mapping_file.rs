//! Explicit mapping files.
//!
//! A mapping file is a JSON object keyed by canonical field name. Values are a
//! header name or a zero-based column index; an empty string leaves the field
//! unmapped. An optional `date_format` (strftime) is tried before the built-in
//! date strategies.
//!
//! ```json
//! {
//!   "meter_id": "Compteur",
//!   "customer_id": "Client",
//!   "reading_value": 2,
//!   "reading_date": "Date",
//!   "unit": "",
//!   "date_format": "%d/%m/%Y"
//! }
//! ```

use crate::error::{Result, SourceError};
use mri_core::{CanonicalField, MappingSpec, NormalizeOptions, SourceColumn};
use serde_json::Value;
use std::path::Path;

const DATE_FORMAT_KEY: &str = "date_format";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingFile {
    pub mapping: MappingSpec,
    pub date_format: Option<String>,
}

impl MappingFile {
    pub fn load(path: &Path) -> Result<Self> {
        Self::parse(&std::fs::read(path)?)
    }

    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let Value::Object(object) = serde_json::from_slice::<Value>(bytes)? else {
            return Err(SourceError::Mapping("expected a JSON object".into()));
        };

        let mut file = MappingFile::default();
        for (key, value) in object {
            if key == DATE_FORMAT_KEY {
                file.date_format = match value {
                    Value::String(s) if !s.trim().is_empty() => Some(s),
                    Value::String(_) | Value::Null => None,
                    other => {
                        return Err(SourceError::Mapping(format!(
                            "`{DATE_FORMAT_KEY}` must be a string, got {other}"
                        )))
                    }
                };
                continue;
            }

            let field: CanonicalField = key.parse().map_err(SourceError::Mapping)?;
            match value {
                Value::String(s) if s.is_empty() => {}
                Value::String(s) => file.mapping.insert(field, SourceColumn::Name(s)),
                Value::Number(n) => {
                    let index = n
                        .as_u64()
                        .and_then(|i| usize::try_from(i).ok())
                        .ok_or_else(|| {
                            SourceError::Mapping(format!(
                                "`{field}` column index must be a non-negative integer, got {n}"
                            ))
                        })?;
                    file.mapping.insert(field, SourceColumn::Index(index));
                }
                Value::Null => {}
                other => {
                    return Err(SourceError::Mapping(format!(
                        "`{field}` must be a header name or column index, got {other}"
                    )))
                }
            }
        }
        Ok(file)
    }

    /// Normaliser options carried by this file layered over `base`.
    pub fn normalize_options(&self, base: NormalizeOptions) -> NormalizeOptions {
        NormalizeOptions {
            date_format: self.date_format.clone().or(base.date_format),
            ..base
        }
    }
}
