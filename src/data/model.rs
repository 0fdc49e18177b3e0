use std::collections::BTreeSet;

use serde::{Deserialize, Deserializer, Serialize};

// ---------------------------------------------------------------------------
// SalaryRecord – one row of the source CSV
// ---------------------------------------------------------------------------

/// A single salary observation.
///
/// Columns are matched by header name, so the CSV may carry extra columns
/// (local-currency salary, company location, ...) that are ignored here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryRecord {
    #[serde(rename = "ano", deserialize_with = "de_year")]
    pub year: i32,
    #[serde(rename = "senioridade")]
    pub seniority: String,
    #[serde(rename = "contrato")]
    pub contract_type: String,
    #[serde(rename = "tamanho_empresa")]
    pub company_size: String,
    #[serde(rename = "cargo")]
    pub role: String,
    #[serde(rename = "remoto")]
    pub remote_mode: String,
    #[serde(rename = "usd")]
    pub salary_usd: f64,
    #[serde(rename = "residencia_iso3")]
    pub residence_country_code: String,
}

/// Years sometimes come out of spreadsheet tooling as `2024.0`.
fn de_year<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    let trimmed = raw.trim();
    if let Ok(y) = trimmed.parse::<i32>() {
        return Ok(y);
    }
    match trimmed.parse::<f64>() {
        Ok(f)
            if f.fract() == 0.0
                && (f64::from(i32::MIN)..=f64::from(i32::MAX)).contains(&f) =>
        {
            Ok(f as i32)
        }
        _ => Err(serde::de::Error::custom(format!(
            "'{trimmed}' is not a valid year"
        ))),
    }
}

// ---------------------------------------------------------------------------
// SalaryDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed dataset with the observed values of every filterable
/// column, so the side panel can list options without rescanning rows.
#[derive(Debug, Clone, Default)]
pub struct SalaryDataset {
    pub records: Vec<SalaryRecord>,
    pub years: BTreeSet<i32>,
    pub seniorities: BTreeSet<String>,
    pub contract_types: BTreeSet<String>,
    pub company_sizes: BTreeSet<String>,
    pub roles: BTreeSet<String>,
}

impl SalaryDataset {
    /// Build the observed-value indices from loaded records.
    pub fn from_records(records: Vec<SalaryRecord>) -> Self {
        let mut ds = SalaryDataset::default();
        for rec in &records {
            ds.years.insert(rec.year);
            ds.seniorities.insert(rec.seniority.clone());
            ds.contract_types.insert(rec.contract_type.clone());
            ds.company_sizes.insert(rec.company_size.clone());
            ds.roles.insert(rec.role.clone());
        }
        ds.records = records;
        ds
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dataset_indexes_observed_values() {
        let ds = SalaryDataset::from_records(fixtures::sample());
        assert_eq!(ds.len(), 7);
        assert_eq!(ds.years.iter().copied().collect::<Vec<_>>(), vec![2023, 2024, 2025]);
        assert!(ds.seniorities.contains("executivo"));
        assert_eq!(ds.contract_types.len(), 3);
        assert_eq!(ds.company_sizes.len(), 3);
        assert_eq!(ds.roles.len(), 4);
    }

    #[test]
    fn empty_dataset() {
        let ds = SalaryDataset::from_records(Vec::new());
        assert!(ds.is_empty());
        assert!(ds.years.is_empty());
    }
}
