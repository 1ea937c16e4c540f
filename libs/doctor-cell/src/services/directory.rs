// libs/doctor-cell/src/services/directory.rs
use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, error, info, warn};

use crate::models::{
    ConsultationMode, DirectoryError, DirectorySummary, DirectoryView, Doctor, FilterCriteria,
    SortOption,
};
use crate::services::filtering::{
    collect_specialties, derive_suggestions, derive_visible, DEFAULT_SUGGESTION_LIMIT,
};
use crate::services::query::QueryParams;

/// A failed fetch is logged and treated as an empty directory.
pub fn resolve_load(result: Result<Vec<Doctor>, DirectoryError>) -> Vec<Doctor> {
    match result {
        Ok(doctors) => {
            info!("Loaded {} doctors", doctors.len());
            doctors
        }
        Err(e) => {
            error!("Error fetching doctor data: {}", e);
            Vec::new()
        }
    }
}

#[derive(Debug, Clone)]
pub enum DirectoryState {
    Loading,
    Ready(Arc<[Doctor]>),
}

/// Filter/sort state for one browsing session.
///
/// The doctor collection is written once by `complete_load`; every setter
/// replaces one criterion and calls `recompute`, which refreshes the visible
/// list, the suggestions and the query parameters.
#[derive(Debug, Clone)]
pub struct DoctorDirectory {
    state: DirectoryState,
    specialties: Arc<[String]>,
    criteria: FilterCriteria,
    suggestion_limit: usize,
    visible: Vec<Doctor>,
    suggestions: Vec<Doctor>,
    query_params: QueryParams,
}

impl DoctorDirectory {
    /// New session waiting for the directory fetch.
    pub fn new(criteria: FilterCriteria) -> Self {
        Self::assemble(
            DirectoryState::Loading,
            Arc::from(Vec::new()),
            criteria,
            DEFAULT_SUGGESTION_LIMIT,
        )
    }

    /// New session over an already loaded collection.
    pub fn ready(doctors: Arc<[Doctor]>, criteria: FilterCriteria) -> Self {
        let specialties = collect_specialties(&doctors).into();
        Self::assemble(
            DirectoryState::Ready(doctors),
            specialties,
            criteria,
            DEFAULT_SUGGESTION_LIMIT,
        )
    }

    /// Builds a session from precomputed parts with a single recompute.
    pub(crate) fn assemble(
        state: DirectoryState,
        specialties: Arc<[String]>,
        criteria: FilterCriteria,
        suggestion_limit: usize,
    ) -> Self {
        let mut directory = Self {
            state,
            specialties,
            criteria,
            suggestion_limit,
            visible: Vec::new(),
            suggestions: Vec::new(),
            query_params: QueryParams::default(),
        };
        directory.recompute();
        directory
    }

    /// The one `Loading -> Ready` transition. A failed fetch leaves zero doctors.
    pub fn complete_load(&mut self, result: Result<Vec<Doctor>, DirectoryError>) {
        if !self.is_loading() {
            warn!("Directory already loaded, ignoring repeated load completion");
            return;
        }

        let doctors: Arc<[Doctor]> = resolve_load(result).into();
        self.specialties = collect_specialties(&doctors).into();
        self.state = DirectoryState::Ready(doctors);
        self.recompute();
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.criteria.search_text = text.into();
        self.recompute();
    }

    pub fn set_selected_specialties(&mut self, specialties: BTreeSet<String>) {
        self.criteria.selected_specialties = specialties;
        self.recompute();
    }

    pub fn set_consultation_type(&mut self, mode: Option<ConsultationMode>) {
        self.criteria.consultation_type = mode;
        self.recompute();
    }

    pub fn set_sort_option(&mut self, option: Option<SortOption>) {
        self.criteria.sort_option = option;
        self.recompute();
    }

    /// Checkbox behaviour: select if absent, deselect if present.
    pub fn toggle_specialty(&mut self, specialty: &str) {
        let mut selected = self.criteria.selected_specialties.clone();
        if !selected.remove(specialty) {
            selected.insert(specialty.to_string());
        }
        self.set_selected_specialties(selected);
    }

    /// Picking a suggestion puts the doctor's full name in the search box.
    pub fn select_suggestion(&mut self, doctor: &Doctor) {
        self.set_search_text(doctor.name.clone());
    }

    pub fn clear_filters(&mut self) {
        self.criteria = FilterCriteria::default();
        self.recompute();
    }

    pub fn recompute(&mut self) {
        match &self.state {
            DirectoryState::Loading => {
                self.visible.clear();
                self.suggestions.clear();
            }
            DirectoryState::Ready(doctors) => {
                self.visible = derive_visible(doctors, &self.criteria);
                self.suggestions =
                    derive_suggestions(doctors, &self.criteria.search_text, self.suggestion_limit);
            }
        }

        self.query_params = QueryParams::from(&self.criteria);

        debug!(
            "Recomputed directory: {} visible, {} suggestions, query '{}'",
            self.visible.len(),
            self.suggestions.len(),
            self.query_params.to_query_string()
        );
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, DirectoryState::Loading)
    }

    pub fn all_doctors(&self) -> &[Doctor] {
        match &self.state {
            DirectoryState::Loading => &[],
            DirectoryState::Ready(doctors) => &doctors[..],
        }
    }

    pub fn visible(&self) -> &[Doctor] {
        &self.visible
    }

    pub fn suggestions(&self) -> &[Doctor] {
        &self.suggestions
    }

    pub fn all_specialties(&self) -> &[String] {
        &self.specialties
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn query_params(&self) -> &QueryParams {
        &self.query_params
    }

    pub fn query_string(&self) -> String {
        self.query_params.to_query_string()
    }

    pub fn find_doctor(&self, doctor_id: &str) -> Option<&Doctor> {
        self.all_doctors().iter().find(|d| d.id == doctor_id)
    }

    /// Result headline plus the active-filter line shown under it.
    pub fn summary(&self) -> DirectorySummary {
        let headline = if self.is_loading() {
            "Finding doctors...".to_string()
        } else {
            let count = self.visible.len();
            format!("{} Doctor{} Found", count, if count == 1 { "" } else { "s" })
        };

        let filter_description = if self.criteria.selected_specialties.is_empty() {
            None
        } else {
            let mut line = format!(
                "Filtered by: {}",
                self.criteria
                    .selected_specialties
                    .iter()
                    .map(String::as_str)
                    .collect::<Vec<_>>()
                    .join(", ")
            );
            if let Some(mode) = self.criteria.consultation_type {
                line.push_str(&format!(" • {}", mode));
            }
            if let Some(option) = self.criteria.sort_option {
                line.push_str(&format!(" • Sorted by {}", option.description()));
            }
            Some(line)
        };

        DirectorySummary {
            headline,
            filter_description,
        }
    }

    pub fn to_view(&self, loaded_at: Option<DateTime<Utc>>) -> DirectoryView {
        DirectoryView {
            loading: self.is_loading(),
            doctors: self.visible.clone(),
            total: self.visible.len(),
            suggestions: self.suggestions.clone(),
            specialties: self.specialties.to_vec(),
            criteria: self.criteria.clone(),
            query: self.query_string(),
            summary: self.summary(),
            loaded_at,
        }
    }
}
