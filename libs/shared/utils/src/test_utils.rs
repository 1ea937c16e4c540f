use serde_json::{json, Value};

use shared_config::AppConfig;

pub const MOCK_DIRECTORY_PATH: &str = "/campus-api-mock/doctors.json";

pub struct TestConfig {
    pub source_base_url: String,
    pub fetch_timeout_secs: u64,
    pub suggestion_limit: usize,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            source_base_url: "http://localhost:54321".to_string(),
            fetch_timeout_secs: 5,
            suggestion_limit: 3,
        }
    }
}

impl TestConfig {
    /// Point the directory source at a mock server.
    pub fn for_mock_server(uri: &str) -> Self {
        Self {
            source_base_url: uri.to_string(),
            ..Self::default()
        }
    }

    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            directory_source_url: format!("{}{}", self.source_base_url, MOCK_DIRECTORY_PATH),
            fetch_timeout_secs: self.fetch_timeout_secs,
            suggestion_limit: self.suggestion_limit,
            ..AppConfig::default()
        }
    }
}

pub struct MockDirectoryResponses;

impl MockDirectoryResponses {
    /// One record in the provider's wire shape.
    pub fn provider_doctor(
        id: &str,
        name: &str,
        specialties: &[&str],
        fees: &str,
        experience: &str,
        video_consult: bool,
        in_clinic: bool,
    ) -> Value {
        json!({
            "id": id,
            "name": name,
            "name_initials": name.split_whitespace().filter_map(|w| w.chars().next()).collect::<String>(),
            "photo": format!("https://doctorlistingingestionpr.azureedge.net/{}.jpeg", id),
            "doctor_introduction": "",
            "specialities": specialties.iter().map(|s| json!({ "name": s })).collect::<Vec<_>>(),
            "fees": fees,
            "experience": experience,
            "languages": ["English", "Hindi"],
            "clinic": {
                "name": format!("{} Clinic", name),
                "address": {
                    "locality": "Koramangala",
                    "city": "Bangalore",
                    "address_line1": format!("{} Main Road", id),
                    "location": "12.93,77.62",
                    "logo_url": ""
                }
            },
            "video_consult": video_consult,
            "in_clinic": in_clinic
        })
    }

    /// Five doctors covering every consultation mode and sort edge.
    pub fn sample_directory() -> Value {
        json!([
            Self::provider_doctor("101", "Dr. John Smith", &["Dentist"], "₹ 500", "5 Years of experience", false, true),
            Self::provider_doctor("102", "Dr. Johnny Mathew", &["Cardiologist"], "₹ 100", "20 Years of experience", true, false),
            Self::provider_doctor("103", "Dr. Priya Nair", &["Dentist", "General Physician"], "₹ 250", "12 Years of experience", true, true),
            Self::provider_doctor("104", "Dr. Arjun John", &["Dermatologist"], "₹ 300", "8 Years of experience", false, true),
            Self::provider_doctor("105", "Dr. Kavya John", &[], "Free", "", false, false)
        ])
    }

    pub fn error_response(message: &str, code: &str) -> Value {
        json!({
            "error": {
                "message": message,
                "code": code
            }
        })
    }
}
