use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

// ==============================================================================
// PROVIDER WIRE SHAPE
// ==============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderDoctor {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub photo: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub specialities: Vec<ProviderSpeciality>,
    #[serde(default)]
    pub experience: String,
    #[serde(default)]
    pub fees: String,
    #[serde(default)]
    pub clinic: ProviderClinic,
    #[serde(default)]
    pub video_consult: bool,
    #[serde(default)]
    pub in_clinic: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderSpeciality {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderClinic {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address: ProviderAddress,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderAddress {
    #[serde(default)]
    pub address_line1: String,
    #[serde(default)]
    pub locality: String,
    #[serde(default)]
    pub city: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ==============================================================================
// CANONICAL DOCTOR
// ==============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Doctor {
    pub id: String,
    pub name: String,
    pub photo_url: String,
    pub specialties: Vec<String>,
    pub experience_label: String,
    pub fee_label: String,
    pub clinic_name: String,
    pub address: String,
    #[serde(with = "consultation_mode_label")]
    pub consultation_mode: Option<ConsultationMode>,
}

impl Doctor {
    pub fn has_specialty(&self, specialty: &str) -> bool {
        self.specialties.iter().any(|s| s == specialty)
    }
}

/// Mode of consultation (MOC).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConsultationMode {
    VideoConsult,
    InClinic,
}

impl ConsultationMode {
    pub fn label(&self) -> &'static str {
        match self {
            ConsultationMode::VideoConsult => "Video Consult",
            ConsultationMode::InClinic => "In Clinic",
        }
    }
}

impl fmt::Display for ConsultationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ConsultationMode {
    type Err = DirectoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Video Consult" => Ok(ConsultationMode::VideoConsult),
            "In Clinic" => Ok(ConsultationMode::InClinic),
            other => Err(DirectoryError::InvalidCriterion(format!(
                "unknown consultation type '{}'",
                other
            ))),
        }
    }
}

impl Serialize for ConsultationMode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for ConsultationMode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// `None` is written as the empty label.
mod consultation_mode_label {
    use super::ConsultationMode;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        mode: &Option<ConsultationMode>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(mode.map(|m| m.label()).unwrap_or(""))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<ConsultationMode>, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
        if raw.is_empty() {
            return Ok(None);
        }
        raw.parse().map(Some).map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortOption {
    ByFeeAscending,
    ByExperienceDescending,
}

impl SortOption {
    pub fn label(&self) -> &'static str {
        match self {
            SortOption::ByFeeAscending => "fees",
            SortOption::ByExperienceDescending => "experience",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            SortOption::ByFeeAscending => "fees (low to high)",
            SortOption::ByExperienceDescending => "experience (high to low)",
        }
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SortOption {
    type Err = DirectoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fees" => Ok(SortOption::ByFeeAscending),
            "experience" => Ok(SortOption::ByExperienceDescending),
            other => Err(DirectoryError::InvalidCriterion(format!(
                "unknown sort option '{}'",
                other
            ))),
        }
    }
}

impl Serialize for SortOption {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for SortOption {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

// ==============================================================================
// CRITERIA AND VIEW DTOS
// ==============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    pub search_text: String,
    pub selected_specialties: BTreeSet<String>,
    pub consultation_type: Option<ConsultationMode>,
    #[serde(rename = "sortBy")]
    pub sort_option: Option<SortOption>,
}

impl FilterCriteria {
    pub fn is_default(&self) -> bool {
        *self == FilterCriteria::default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectorySummary {
    pub headline: String,
    pub filter_description: Option<String>,
}

/// Everything a presentation layer needs to render one page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryView {
    pub loading: bool,
    pub doctors: Vec<Doctor>,
    pub total: usize,
    pub suggestions: Vec<Doctor>,
    pub specialties: Vec<String>,
    pub criteria: FilterCriteria,
    pub query: String,
    pub summary: DirectorySummary,
    pub loaded_at: Option<chrono::DateTime<chrono::Utc>>,
}

// ==============================================================================
// ERRORS
// ==============================================================================

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DirectoryError {
    /// Network, status or JSON decoding failure while loading the directory.
    #[error("Failed to fetch doctor directory: {0}")]
    FetchFailure(String),

    #[error("Invalid filter criterion: {0}")]
    InvalidCriterion(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_provider_doctor_tolerates_missing_fields() {
        let doctor: ProviderDoctor = serde_json::from_value(json!({
            "id": "42",
            "name": "Dr. Asha Rao",
            "specialities": null
        }))
        .unwrap();

        assert!(doctor.specialities.is_empty());
        assert!(doctor.photo.is_none());
        assert!(!doctor.video_consult);
        assert!(doctor.clinic.address.city.is_empty());
    }

    #[test]
    fn test_consultation_mode_labels() {
        assert_eq!("Video Consult".parse::<ConsultationMode>().unwrap(), ConsultationMode::VideoConsult);
        assert_eq!("In Clinic".parse::<ConsultationMode>().unwrap(), ConsultationMode::InClinic);
        assert!("video".parse::<ConsultationMode>().is_err());
        assert_eq!(ConsultationMode::InClinic.to_string(), "In Clinic");
    }

    #[test]
    fn test_sort_option_labels() {
        assert_eq!("fees".parse::<SortOption>().unwrap(), SortOption::ByFeeAscending);
        assert_eq!("experience".parse::<SortOption>().unwrap(), SortOption::ByExperienceDescending);
        assert!("rating".parse::<SortOption>().is_err());
    }

    #[test]
    fn test_doctor_serializes_empty_mode_as_empty_string() {
        let doctor = Doctor {
            id: "1".into(),
            name: "Dr. A".into(),
            photo_url: String::new(),
            specialties: vec![],
            experience_label: String::new(),
            fee_label: String::new(),
            clinic_name: String::new(),
            address: ", , ".into(),
            consultation_mode: None,
        };

        let value = serde_json::to_value(&doctor).unwrap();
        assert_eq!(value["consultationMode"], "");
        assert_eq!(value["photoUrl"], "");

        let back: Doctor = serde_json::from_value(value).unwrap();
        assert_eq!(back, doctor);
    }

    #[test]
    fn test_default_criteria() {
        let criteria = FilterCriteria::default();
        assert!(criteria.is_default());
        assert!(criteria.search_text.is_empty());
        assert!(criteria.consultation_type.is_none());
    }
}
