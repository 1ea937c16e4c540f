// libs/doctor-cell/src/services/catalog.rs
use std::sync::{Arc, OnceLock};

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::models::{DirectoryError, Doctor, FilterCriteria, ProviderDoctor};
use crate::services::directory::{resolve_load, DirectoryState, DoctorDirectory};
use crate::services::filtering::{collect_specialties, DEFAULT_SUGGESTION_LIMIT};
use crate::services::normalizer::normalize_all;
use crate::services::source::DirectorySource;

#[derive(Debug, Clone)]
pub struct CatalogSnapshot {
    pub doctors: Arc<[Doctor]>,
    pub specialties: Arc<[String]>,
    pub loaded_at: DateTime<Utc>,
}

/// Process-wide doctor collection, written once and shared by every session.
#[derive(Debug, Clone)]
pub struct DirectoryCatalog {
    snapshot: Arc<OnceLock<CatalogSnapshot>>,
    suggestion_limit: usize,
}

impl Default for DirectoryCatalog {
    fn default() -> Self {
        Self::new(DEFAULT_SUGGESTION_LIMIT)
    }
}

impl DirectoryCatalog {
    pub fn new(suggestion_limit: usize) -> Self {
        Self {
            snapshot: Arc::new(OnceLock::new()),
            suggestion_limit,
        }
    }

    /// Fetch and publish the directory. Only the first completed load is kept.
    pub async fn load(&self, source: &dyn DirectorySource) -> usize {
        if self.is_loaded() {
            warn!("Doctor directory already loaded, skipping fetch");
            return self.len();
        }

        let result = source.fetch_doctors().await;
        self.complete(result)
    }

    /// Publish a fetch outcome; errors become an empty directory.
    pub fn complete(&self, result: Result<Vec<ProviderDoctor>, DirectoryError>) -> usize {
        let doctors = resolve_load(result.map(normalize_all));
        let count = doctors.len();

        let snapshot = CatalogSnapshot {
            specialties: collect_specialties(&doctors).into(),
            doctors: doctors.into(),
            loaded_at: Utc::now(),
        };

        if self.snapshot.set(snapshot).is_err() {
            warn!("Doctor directory already loaded, discarding later result");
            return self.len();
        }

        info!("Doctor directory ready with {} doctors", count);
        count
    }

    pub fn is_loaded(&self) -> bool {
        self.snapshot.get().is_some()
    }

    pub fn len(&self) -> usize {
        self.snapshot.get().map(|s| s.doctors.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn loaded_at(&self) -> Option<DateTime<Utc>> {
        self.snapshot.get().map(|s| s.loaded_at)
    }

    /// Sorted specialty list, computed once at load.
    pub fn specialties(&self) -> &[String] {
        self.snapshot.get().map(|s| &s.specialties[..]).unwrap_or(&[])
    }

    /// A fresh engine over the shared collection, or a loading one.
    pub fn session(&self, criteria: FilterCriteria) -> DoctorDirectory {
        self.session_with_limit(criteria, self.suggestion_limit)
    }

    pub fn session_with_limit(&self, criteria: FilterCriteria, suggestion_limit: usize) -> DoctorDirectory {
        match self.snapshot.get() {
            Some(snapshot) => DoctorDirectory::assemble(
                DirectoryState::Ready(snapshot.doctors.clone()),
                snapshot.specialties.clone(),
                criteria,
                suggestion_limit,
            ),
            None => DoctorDirectory::assemble(
                DirectoryState::Loading,
                Arc::from(Vec::new()),
                criteria,
                suggestion_limit,
            ),
        }
    }
}
