//! mri-core — Meter Reading Import core library.
//!
//! This crate exposes the pipeline stages as public modules, plus the shared
//! types used across all of them.
//!
//! # Architecture
//!
//! ```text
//! RawRecord[] ──► Resolver ──► Normalizer ──► Validator ──► ImportResult
//!                   │                                           │
//!                Catalog                                     Export
//! ```
//!
//! Every stage is a synchronous, pure function of its inputs. The only
//! process-wide state is the read-only synonym [`catalog`], so concurrent
//! imports need no locking.

pub mod catalog;
pub mod config;
pub mod error;
pub mod export;
pub mod import;
pub mod normalizer;
pub mod resolver;
pub mod types;
pub mod validator;

pub use error::{Error, MappingError, Result};
pub use export::{export, export_as, Export, ExportFormat, ExportOptions};
pub use import::{import_records, Importer};
pub use normalizer::{normalize, NormalizeOptions};
pub use resolver::resolve;
pub use types::{
    CanonicalField, FieldIssue, ImportResult, ImportSummary, IssueReason, MappingSpec,
    NormalizedReading, RawRecord, RawValue, SourceColumn, ValidationIssue,
};
pub use validator::validate;
