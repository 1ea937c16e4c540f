// libs/doctor-cell/src/services/query.rs
//! Query-string codec for `FilterCriteria`.
//!
//! The parameter names and values are the ones already present in shared
//! links: `search`, `specialties` (comma separated), `consultationType`
//! (`Video Consult` / `In Clinic`) and `sortBy` (`fees` / `experience`).

use tracing::{debug, warn};

use crate::models::{ConsultationMode, FilterCriteria, SortOption};

pub const SEARCH_PARAM: &str = "search";
pub const SPECIALTIES_PARAM: &str = "specialties";
pub const CONSULTATION_TYPE_PARAM: &str = "consultationType";
pub const SORT_BY_PARAM: &str = "sortBy";

/// Raw parameter values. Absent means the criterion is at its default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pub search: Option<String>,
    pub specialties: Option<String>,
    pub consultation_type: Option<String>,
    pub sort_by: Option<String>,
}

impl QueryParams {
    pub fn is_empty(&self) -> bool {
        self.pairs().is_empty()
    }

    /// Present parameters in their canonical order.
    pub fn pairs(&self) -> Vec<(&'static str, &str)> {
        [
            (SEARCH_PARAM, &self.search),
            (SPECIALTIES_PARAM, &self.specialties),
            (CONSULTATION_TYPE_PARAM, &self.consultation_type),
            (SORT_BY_PARAM, &self.sort_by),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.as_deref().map(|v| (key, v)))
        .collect()
    }

    /// Form-style encoding, spaces written as `+`.
    pub fn to_query_string(&self) -> String {
        self.pairs()
            .into_iter()
            .map(|(key, value)| format!("{}={}", key, encode_component(value)))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Parse a raw query string, with or without the leading `?`.
    /// A repeated key keeps its first value.
    pub fn parse(query: &str) -> Self {
        let mut params = QueryParams::default();

        for pair in query.trim_start_matches('?').split('&').filter(|p| !p.is_empty()) {
            let (raw_key, raw_value) = pair.split_once('=').unwrap_or((pair, ""));

            let (key, value) = match (decode_component(raw_key), decode_component(raw_value)) {
                (Some(key), Some(value)) => (key, value),
                _ => {
                    warn!("Ignoring undecodable query parameter '{}'", pair);
                    continue;
                }
            };

            let slot = match key.as_str() {
                SEARCH_PARAM => &mut params.search,
                SPECIALTIES_PARAM => &mut params.specialties,
                CONSULTATION_TYPE_PARAM => &mut params.consultation_type,
                SORT_BY_PARAM => &mut params.sort_by,
                _ => continue,
            };

            if slot.is_none() {
                *slot = Some(value);
            } else {
                debug!("Ignoring repeated query parameter '{}'", key);
            }
        }

        params
    }
}

impl From<&FilterCriteria> for QueryParams {
    fn from(criteria: &FilterCriteria) -> Self {
        let specialties = criteria
            .selected_specialties
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(",");

        Self {
            search: Some(criteria.search_text.clone()).filter(|s| !s.is_empty()),
            specialties: Some(specialties).filter(|s| !s.is_empty()),
            consultation_type: criteria.consultation_type.map(|m| m.label().to_string()),
            sort_by: criteria.sort_option.map(|o| o.label().to_string()),
        }
    }
}

impl From<QueryParams> for FilterCriteria {
    fn from(params: QueryParams) -> Self {
        let consultation_type = params
            .consultation_type
            .filter(|raw| !raw.is_empty())
            .and_then(|raw| match raw.parse::<ConsultationMode>() {
                Ok(mode) => Some(mode),
                Err(e) => {
                    warn!("Ignoring {} parameter: {}", CONSULTATION_TYPE_PARAM, e);
                    None
                }
            });

        let sort_option = params
            .sort_by
            .filter(|raw| !raw.is_empty())
            .and_then(|raw| match raw.parse::<SortOption>() {
                Ok(option) => Some(option),
                Err(e) => {
                    warn!("Ignoring {} parameter: {}", SORT_BY_PARAM, e);
                    None
                }
            });

        Self {
            search_text: params.search.unwrap_or_default(),
            selected_specialties: params
                .specialties
                .as_deref()
                .map(|raw| {
                    raw.split(',')
                        .filter(|s| !s.is_empty())
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default(),
            consultation_type,
            sort_option,
        }
    }
}

impl FilterCriteria {
    pub fn to_query_params(&self) -> QueryParams {
        QueryParams::from(self)
    }

    pub fn from_query_str(query: &str) -> Self {
        QueryParams::parse(query).into()
    }
}

fn encode_component(value: &str) -> String {
    urlencoding::encode(value).replace("%20", "+")
}

fn decode_component(value: &str) -> Option<String> {
    urlencoding::decode(&value.replace('+', " "))
        .ok()
        .map(|decoded| decoded.into_owned())
}
