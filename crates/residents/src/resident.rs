use serde::{Deserialize, Serialize};

use rukun_core::{DomainResult, require_text};

/// Residency status of an active resident.
///
/// Wire values are the association's own terms and must not change: stored
/// registries written by earlier versions use them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResidencyStatus {
    #[default]
    #[serde(rename = "Tetap")]
    Permanent,
    #[serde(rename = "Kontrak")]
    Contract,
}

impl ResidencyStatus {
    /// Persisted value.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResidencyStatus::Permanent => "Tetap",
            ResidencyStatus::Contract => "Kontrak",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ResidencyStatus::Permanent => "Permanent resident",
            ResidencyStatus::Contract => "Contract resident",
        }
    }
}

impl core::fmt::Display for ResidencyStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An active resident of the neighborhood.
///
/// `national_id` is free text. It is meant to identify one person but nothing
/// enforces that: two residents may share an id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resident {
    #[serde(rename = "nama")]
    pub name: String,
    #[serde(rename = "nik")]
    pub national_id: String,
    #[serde(rename = "status")]
    pub status: ResidencyStatus,
}

impl Resident {
    /// Validate operator input and build a resident.
    pub fn new(
        name: impl Into<String>,
        national_id: impl Into<String>,
        status: ResidencyStatus,
    ) -> DomainResult<Self> {
        let name = name.into();
        let national_id = national_id.into();
        require_text("name", &name)?;
        require_text("national id", &national_id)?;

        Ok(Self {
            name,
            national_id,
            status,
        })
    }

    pub fn has_national_id(&self, national_id: &str) -> bool {
        self.national_id == national_id
    }

    pub fn is_permanent(&self) -> bool {
        self.status == ResidencyStatus::Permanent
    }
}

/// Head counts shown on the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResidentCounts {
    pub total: usize,
    pub permanent: usize,
    pub contract: usize,
}

impl ResidentCounts {
    pub fn from_residents(residents: &[Resident]) -> Self {
        residents.iter().fold(Self::default(), |mut counts, r| {
            counts.total += 1;
            if r.is_permanent() {
                counts.permanent += 1;
            } else {
                counts.contract += 1;
            }
            counts
        })
    }
}

/// The `limit` most recently registered residents, newest first.
pub fn recent_residents(residents: &[Resident], limit: usize) -> impl Iterator<Item = &Resident> {
    residents.iter().rev().take(limit)
}
