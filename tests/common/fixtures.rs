//! Static source corpora used across harnesses.
//!
//! Each corpus mimics a real export from a metering system, with its own
//! header spelling, delimiter, decimal separator and date convention.

/// French-language export: semicolon delimiter, decimal commas, day-first dates.
pub const CSV_FRENCH: &str = "\
id_compteur;id_client;valeur_releve;date_releve;unite;systeme_source
M1;C1;12,5;01/02/2024;kWh;SAP
M2;C2;7;15/03/2024;kWh;SAP
M3;C3;-4,25;2024-04-01;m3;SAP
";

/// English export with US dates and a mix of defects.
pub const CSV_ENGLISH: &str = "\
Meter Number,Customer,Reading,Read_Date,UOM
MTR-001,CUST-9,100.5,12/31/2023,kWh
,CUST-9,101,01/15/2024,kWh
MTR-003,,abc,2024/02/29,kWh
MTR-004,CUST-4,55.25,not-a-date,kWh
";

/// Legacy billing export with non-standard headers, imported via a mapping file.
pub const CSV_LEGACY: &str = "\
Compteur,Client,Valeur,Date,Unite,Systeme
M-1,C-1,100.5,01/01/2026,kWh,SYS_A
";

/// Mapping file matching [`CSV_LEGACY`].
pub const MAPPING_LEGACY: &str = r#"{
  "meter_id": "Compteur",
  "customer_id": "Client",
  "reading_value": "Valeur",
  "reading_date": "Date",
  "unit": "Unite",
  "source_system": "Systeme",
  "date_format": "%d/%m/%Y"
}"#;

/// JSON export wrapped in a `readings` object, with typed values and epochs.
pub const JSON_WRAPPED: &str = r#"{
  "exported_by": "hes",
  "readings": [
    {"meter_id": "M1", "customer_id": "C1", "reading_value": 12.5, "reading_date": 1706745600, "unit": "kWh"},
    {"meter_id": "M2", "customer_id": "C2", "reading_value": "3,75", "reading_date": "2024-02-02"},
    {"meter_id": "M3", "customer_id": "C3", "reading_value": null, "reading_date": "2024-02-03", "unit": "kWh"}
  ]
}"#;

/// Generate `n` clean French-style CSV rows (with header) for volume tests.
pub fn csv_high_volume(n: usize) -> String {
    let mut out = String::from("id_compteur;id_client;valeur_releve;date_releve;unite\n");
    for i in 0..n {
        out.push_str(&format!(
            "M{i};C{};{},{};{:02}/{:02}/2024;kWh\n",
            i % 97,
            i,
            i % 10,
            i % 28 + 1,
            i % 12 + 1,
        ));
    }
    out
}
