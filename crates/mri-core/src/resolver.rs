//! Mapping resolver: canonical field → source column for one import.
//!
//! With an explicit mapping the resolver only checks that every referenced
//! column exists and hands the mapping back unchanged. Without one it
//! auto-detects from the [synonym catalog](crate::catalog). Auto-detection
//! never fails: unresolved fields stay unmapped and surface later as issues.

use crate::catalog;
use crate::error::MappingError;
use crate::types::{CanonicalField, MappingSpec, SourceColumn};
use std::collections::BTreeMap;

/// Resolve the mapping for an input with the given header list.
pub fn resolve<S: AsRef<str>>(
    headers: &[S],
    explicit: Option<&MappingSpec>,
) -> Result<MappingSpec, MappingError> {
    match explicit {
        Some(spec) => {
            check_explicit(headers, spec)?;
            tracing::debug!(fields = spec.len(), "using explicit mapping");
            Ok(spec.clone())
        }
        None => Ok(auto_detect(headers)),
    }
}

fn check_explicit<S: AsRef<str>>(headers: &[S], spec: &MappingSpec) -> Result<(), MappingError> {
    for (field, column) in spec.iter() {
        match column {
            SourceColumn::Name(name) => {
                if !headers.iter().any(|header| header.as_ref() == name) {
                    return Err(MappingError::UnknownSourceField {
                        field,
                        column: name.clone(),
                    });
                }
            }
            SourceColumn::Index(index) => {
                if *index >= headers.len() {
                    return Err(MappingError::ColumnOutOfRange {
                        field,
                        index: *index,
                        width: headers.len(),
                    });
                }
            }
        }
    }
    Ok(())
}

/// Rewrite index columns as the header name at that position, so every record
/// is read by name.
///
/// Records from keyed sources (JSON objects) may order or omit cells freely;
/// only the header list gives an index its meaning. Indexes onto a duplicated
/// header name stay positional, since a name lookup would hit the first copy.
pub fn by_name<S: AsRef<str>>(headers: &[S], mapping: &MappingSpec) -> MappingSpec {
    mapping
        .iter()
        .map(|(field, column)| {
            let column = match column {
                SourceColumn::Index(index) => match headers.get(*index).map(AsRef::as_ref) {
                    Some(name) if headers.iter().filter(|h| h.as_ref() == name).count() == 1 => {
                        SourceColumn::Name(name.to_string())
                    }
                    _ => column.clone(),
                },
                SourceColumn::Name(_) => column.clone(),
            };
            (field, column)
        })
        .collect()
}

/// Detect a mapping from header names alone.
///
/// For each canonical field the header matching the highest-priority synonym
/// wins; when two headers match the very same synonym the earlier header wins.
pub fn auto_detect<S: AsRef<str>>(headers: &[S]) -> MappingSpec {
    let mut best: BTreeMap<CanonicalField, (usize, &str)> = BTreeMap::new();

    for header in headers {
        let header = header.as_ref();
        let Some(hit) = catalog::lookup(header) else {
            continue;
        };
        match best.get(&hit.field) {
            Some((priority, _)) if *priority <= hit.priority => {}
            _ => {
                best.insert(hit.field, (hit.priority, header));
            }
        }
    }

    for (field, (_, header)) in &best {
        tracing::debug!(%field, header, "auto-detected column");
    }
    for field in CanonicalField::ALL {
        if field.is_required() && !best.contains_key(&field) {
            tracing::warn!(%field, "no column looked like a {field}");
        }
    }

    best.into_iter()
        .map(|(field, (_, header))| (field, SourceColumn::Name(header.to_string())))
        .collect()
}
