pub mod catalog;
pub mod directory;
pub mod filtering;
pub mod normalizer;
pub mod query;
pub mod source;

pub use catalog::{CatalogSnapshot, DirectoryCatalog};
pub use directory::{DirectoryState, DoctorDirectory};
pub use query::QueryParams;
pub use source::{DirectorySource, HttpDirectorySource, StaticDirectorySource};
