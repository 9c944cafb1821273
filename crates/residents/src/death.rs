use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use rukun_core::{DomainError, DomainResult, require_text};

/// Entry in the death registry. Append-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeathRecord {
    #[serde(rename = "nama")]
    pub name: String,
    #[serde(rename = "nik")]
    pub national_id: String,
    #[serde(rename = "tanggal")]
    pub date_of_death: NaiveDate,
    /// Cause, burial place, or anything else the operator wants to keep.
    /// Empty when not given.
    #[serde(rename = "keterangan", default)]
    pub note: String,
}

impl DeathRecord {
    pub fn new(
        name: impl Into<String>,
        national_id: impl Into<String>,
        date_of_death: NaiveDate,
        note: impl Into<String>,
    ) -> DomainResult<Self> {
        let name = name.into();
        let national_id = national_id.into();
        require_text("name", &name)?;
        require_text("national id", &national_id)?;

        Ok(Self {
            name,
            national_id,
            date_of_death,
            note: note.into(),
        })
    }

    pub fn note(&self) -> Option<&str> {
        if self.note.is_empty() {
            None
        } else {
            Some(&self.note)
        }
    }
}

/// Parse the date of death as typed into a form (`YYYY-MM-DD`).
pub fn parse_death_date(input: &str) -> DomainResult<NaiveDate> {
    let input = input.trim();
    if input.is_empty() {
        return Err(DomainError::validation("date of death is required"));
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d").map_err(|e| {
        DomainError::validation(format!("date of death must be YYYY-MM-DD ({input}: {e})"))
    })
}
