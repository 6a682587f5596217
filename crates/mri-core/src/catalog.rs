//! Synonym catalog: recognised source-header spellings per canonical field.
//!
//! The table is a compile-time perfect hash map whose declaration order is the
//! match priority: within a field, earlier synonyms are more specific and win
//! over later ones. Keys are lowercase; headers are compared via
//! [`header_key`].

use crate::types::CanonicalField;
use phf::phf_ordered_map;

static SYNONYMS: phf::OrderedMap<&'static str, CanonicalField> = phf_ordered_map! {
    // meter_id
    "meter_id" => CanonicalField::MeterId,
    "meterid" => CanonicalField::MeterId,
    "meter id" => CanonicalField::MeterId,
    "meter_number" => CanonicalField::MeterId,
    "meter number" => CanonicalField::MeterId,
    "meter_no" => CanonicalField::MeterId,
    "id_compteur" => CanonicalField::MeterId,
    "numero_compteur" => CanonicalField::MeterId,
    "numéro_compteur" => CanonicalField::MeterId,
    "num_compteur" => CanonicalField::MeterId,
    "compteur" => CanonicalField::MeterId,
    "meter" => CanonicalField::MeterId,
    "pdl" => CanonicalField::MeterId,

    // customer_id
    "customer_id" => CanonicalField::CustomerId,
    "customerid" => CanonicalField::CustomerId,
    "customer id" => CanonicalField::CustomerId,
    "customer_number" => CanonicalField::CustomerId,
    "client_id" => CanonicalField::CustomerId,
    "id_client" => CanonicalField::CustomerId,
    "numero_client" => CanonicalField::CustomerId,
    "numéro_client" => CanonicalField::CustomerId,
    "num_client" => CanonicalField::CustomerId,
    "account_id" => CanonicalField::CustomerId,
    "client" => CanonicalField::CustomerId,
    "customer" => CanonicalField::CustomerId,
    "account" => CanonicalField::CustomerId,

    // reading_value
    "reading_value" => CanonicalField::ReadingValue,
    "readingvalue" => CanonicalField::ReadingValue,
    "reading value" => CanonicalField::ReadingValue,
    "valeur_releve" => CanonicalField::ReadingValue,
    "valeur_relevé" => CanonicalField::ReadingValue,
    "meter_reading" => CanonicalField::ReadingValue,
    "reading" => CanonicalField::ReadingValue,
    "index" => CanonicalField::ReadingValue,
    "consumption" => CanonicalField::ReadingValue,
    "consommation" => CanonicalField::ReadingValue,
    "valeur" => CanonicalField::ReadingValue,
    "value" => CanonicalField::ReadingValue,

    // reading_date
    "reading_date" => CanonicalField::ReadingDate,
    "readingdate" => CanonicalField::ReadingDate,
    "reading date" => CanonicalField::ReadingDate,
    "read_date" => CanonicalField::ReadingDate,
    "date_releve" => CanonicalField::ReadingDate,
    "date_relevé" => CanonicalField::ReadingDate,
    "date_de_releve" => CanonicalField::ReadingDate,
    "reading_time" => CanonicalField::ReadingDate,
    "date" => CanonicalField::ReadingDate,
    "timestamp" => CanonicalField::ReadingDate,

    // unit
    "unit" => CanonicalField::Unit,
    "units" => CanonicalField::Unit,
    "unite" => CanonicalField::Unit,
    "unité" => CanonicalField::Unit,
    "uom" => CanonicalField::Unit,

    // source_system
    "source_system" => CanonicalField::SourceSystem,
    "sourcesystem" => CanonicalField::SourceSystem,
    "source system" => CanonicalField::SourceSystem,
    "systeme_source" => CanonicalField::SourceSystem,
    "système_source" => CanonicalField::SourceSystem,
    "systeme" => CanonicalField::SourceSystem,
    "système" => CanonicalField::SourceSystem,
    "system" => CanonicalField::SourceSystem,
    "source" => CanonicalField::SourceSystem,
};

/// A header recognised by the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SynonymMatch {
    pub field: CanonicalField,
    /// Position of the matched synonym in the catalog. Lower wins.
    pub priority: usize,
}

/// Comparison key for a source header: BOM and surrounding whitespace
/// stripped, lowercased.
pub fn header_key(header: &str) -> String {
    header.trim_start_matches('\u{feff}').trim().to_lowercase()
}

/// Look a source header up in the catalog.
pub fn lookup(header: &str) -> Option<SynonymMatch> {
    let key = header_key(header);
    let field = *SYNONYMS.get(key.as_str())?;
    let priority = SYNONYMS.get_index(key.as_str())?;
    Some(SynonymMatch { field, priority })
}

/// Synonyms of `field`, most specific first.
pub fn synonyms(field: CanonicalField) -> impl Iterator<Item = &'static str> {
    SYNONYMS
        .entries()
        .filter(move |(_, candidate)| **candidate == field)
        .map(|(synonym, _)| *synonym)
}
