// libs/doctor-cell/src/services/filtering.rs
//! Pure derivations over the doctor collection. Nothing here holds state.

use std::cmp::Reverse;
use std::collections::BTreeSet;

use crate::models::{Doctor, FilterCriteria, SortOption};

pub const DEFAULT_SUGGESTION_LIMIT: usize = 3;

/// Apply search, consultation and specialty filters, then sort.
pub fn derive_visible(doctors: &[Doctor], criteria: &FilterCriteria) -> Vec<Doctor> {
    let needle = criteria.search_text.to_lowercase();

    let mut visible: Vec<Doctor> = doctors
        .iter()
        .filter(|doctor| criteria.search_text.is_empty() || name_matches(doctor, &needle))
        .filter(|doctor| match criteria.consultation_type {
            Some(mode) => doctor.consultation_mode == Some(mode),
            None => true,
        })
        .filter(|doctor| {
            criteria.selected_specialties.is_empty()
                || criteria
                    .selected_specialties
                    .iter()
                    .any(|s| doctor.has_specialty(s))
        })
        .cloned()
        .collect();

    if let Some(option) = criteria.sort_option {
        sort_doctors(&mut visible, option);
    }

    visible
}

/// Stable sort by the amount embedded in the fee or experience label.
pub fn sort_doctors(doctors: &mut [Doctor], option: SortOption) {
    match option {
        SortOption::ByFeeAscending => {
            doctors.sort_by_key(|d| extract_amount(&d.fee_label));
        }
        SortOption::ByExperienceDescending => {
            doctors.sort_by_key(|d| Reverse(extract_amount(&d.experience_label)));
        }
    }
}

/// Name suggestions over the unfiltered collection.
pub fn derive_suggestions(doctors: &[Doctor], search_text: &str, limit: usize) -> Vec<Doctor> {
    if search_text.trim().is_empty() {
        return Vec::new();
    }

    let needle = search_text.to_lowercase();
    doctors
        .iter()
        .filter(|doctor| name_matches(doctor, &needle))
        .take(limit)
        .cloned()
        .collect()
}

/// Unique specialties across all doctors, sorted.
pub fn collect_specialties(doctors: &[Doctor]) -> Vec<String> {
    doctors
        .iter()
        .flat_map(|doctor| doctor.specialties.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Every non-digit is stripped and the rest read as one number; no digits is 0.
pub fn extract_amount(label: &str) -> u64 {
    label
        .chars()
        .filter_map(|c| c.to_digit(10))
        .fold(0u64, |acc, digit| {
            acc.saturating_mul(10).saturating_add(u64::from(digit))
        })
}

fn name_matches(doctor: &Doctor, lowercase_needle: &str) -> bool {
    doctor.name.to_lowercase().contains(lowercase_needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ConsultationMode;

    fn doctor(id: &str, name: &str, specialties: &[&str], fee: &str, experience: &str, mode: Option<ConsultationMode>) -> Doctor {
        Doctor {
            id: id.to_string(),
            name: name.to_string(),
            photo_url: String::new(),
            specialties: specialties.iter().map(|s| s.to_string()).collect(),
            experience_label: experience.to_string(),
            fee_label: fee.to_string(),
            clinic_name: "Clinic".to_string(),
            address: "Line, Area, City".to_string(),
            consultation_mode: mode,
        }
    }

    fn sample() -> Vec<Doctor> {
        vec![
            doctor("1", "Dr. John Smith", &["Dentist"], "₹ 500", "5 Years of experience", Some(ConsultationMode::InClinic)),
            doctor("2", "Dr. Johnny Depp", &["Cardiologist"], "₹ 100", "20 Years of experience", Some(ConsultationMode::VideoConsult)),
            doctor("3", "Dr. Priya Nair", &["Dentist", "General Physician"], "abc", "12 Years of experience", None),
            doctor("4", "Dr. Arjun John", &["Dermatologist"], "₹ 300", "", Some(ConsultationMode::InClinic)),
            doctor("5", "dr. JOHN lee", &["Dentist"], "₹ 300", "7 Years of experience", Some(ConsultationMode::VideoConsult)),
        ]
    }

    fn ids(doctors: &[Doctor]) -> Vec<&str> {
        doctors.iter().map(|d| d.id.as_str()).collect()
    }

    #[test]
    fn test_default_criteria_keep_fetch_order() {
        let doctors = sample();
        let visible = derive_visible(&doctors, &FilterCriteria::default());
        assert_eq!(ids(&visible), vec!["1", "2", "3", "4", "5"]);
    }

    #[test]
    fn test_search_is_case_insensitive_and_exact_partition() {
        let doctors = sample();
        let criteria = FilterCriteria {
            search_text: "JoHn".to_string(),
            ..FilterCriteria::default()
        };

        let visible = derive_visible(&doctors, &criteria);
        assert_eq!(ids(&visible), vec!["1", "2", "4", "5"]);

        for doctor in &doctors {
            let matches = doctor.name.to_lowercase().contains("john");
            assert_eq!(visible.contains(doctor), matches, "doctor {}", doctor.id);
        }
    }

    #[test]
    fn test_consultation_filter() {
        let doctors = sample();
        let criteria = FilterCriteria {
            consultation_type: Some(ConsultationMode::InClinic),
            ..FilterCriteria::default()
        };

        let visible = derive_visible(&doctors, &criteria);
        assert_eq!(ids(&visible), vec!["1", "4"]);
    }

    #[test]
    fn test_specialty_filter_is_or() {
        let doctors = sample();
        let criteria = FilterCriteria {
            selected_specialties: ["Dentist", "Cardiologist"].iter().map(|s| s.to_string()).collect(),
            ..FilterCriteria::default()
        };

        let visible = derive_visible(&doctors, &criteria);
        assert_eq!(ids(&visible), vec!["1", "2", "3", "5"]);
    }

    #[test]
    fn test_fee_sort_ascending_and_stable() {
        let doctors = sample();
        let criteria = FilterCriteria {
            sort_option: Some(SortOption::ByFeeAscending),
            ..FilterCriteria::default()
        };

        let visible = derive_visible(&doctors, &criteria);
        // "abc" -> 0; the two 300s keep fetch order
        assert_eq!(ids(&visible), vec!["3", "2", "4", "5", "1"]);

        let fees: Vec<u64> = visible.iter().map(|d| extract_amount(&d.fee_label)).collect();
        assert!(fees.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_fee_sort_example_labels() {
        let mut doctors = vec![
            doctor("a", "A", &[], "₹ 500", "", None),
            doctor("b", "B", &[], "₹ 100", "", None),
            doctor("c", "C", &[], "abc", "", None),
        ];
        sort_doctors(&mut doctors, SortOption::ByFeeAscending);

        let labels: Vec<&str> = doctors.iter().map(|d| d.fee_label.as_str()).collect();
        assert_eq!(labels, vec!["abc", "₹ 100", "₹ 500"]);
    }

    #[test]
    fn test_experience_sort_descending() {
        let doctors = sample();
        let criteria = FilterCriteria {
            sort_option: Some(SortOption::ByExperienceDescending),
            ..FilterCriteria::default()
        };

        let visible = derive_visible(&doctors, &criteria);
        assert_eq!(ids(&visible), vec!["2", "3", "5", "1", "4"]);

        let years: Vec<u64> = visible.iter().map(|d| extract_amount(&d.experience_label)).collect();
        assert!(years.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_filters_combine_before_sort() {
        let doctors = sample();
        let criteria = FilterCriteria {
            search_text: "john".to_string(),
            selected_specialties: ["Dentist".to_string()].into_iter().collect(),
            consultation_type: Some(ConsultationMode::VideoConsult),
            sort_option: Some(SortOption::ByFeeAscending),
        };

        let visible = derive_visible(&doctors, &criteria);
        assert_eq!(ids(&visible), vec!["5"]);
    }

    #[test]
    fn test_extract_amount() {
        assert_eq!(extract_amount("₹ 500"), 500);
        assert_eq!(extract_amount("13 Years of experience"), 13);
        assert_eq!(extract_amount("₹ 1,500"), 1500);
        assert_eq!(extract_amount("abc"), 0);
        assert_eq!(extract_amount(""), 0);
        assert_eq!(extract_amount("٣ years"), 0);
        assert_eq!(extract_amount("99999999999999999999999"), u64::MAX);
    }

    #[test]
    fn test_suggestions() {
        let doctors = sample();

        assert!(derive_suggestions(&doctors, "", 3).is_empty());
        assert!(derive_suggestions(&doctors, "   ", 3).is_empty());

        let suggestions = derive_suggestions(&doctors, "john", DEFAULT_SUGGESTION_LIMIT);
        assert_eq!(ids(&suggestions), vec!["1", "2", "4"]);

        let suggestions = derive_suggestions(&doctors, "priya", DEFAULT_SUGGESTION_LIMIT);
        assert_eq!(ids(&suggestions), vec!["3"]);

        assert!(derive_suggestions(&doctors, "zzz", DEFAULT_SUGGESTION_LIMIT).is_empty());
    }

    #[test]
    fn test_collect_specialties_sorted_unique() {
        let doctors = sample();
        assert_eq!(
            collect_specialties(&doctors),
            vec!["Cardiologist", "Dentist", "Dermatologist", "General Physician"]
        );
        assert!(collect_specialties(&[]).is_empty());
    }
}
