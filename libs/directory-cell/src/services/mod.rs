pub mod catalog;
pub mod code;
pub mod dashboard;
pub mod department;
pub mod directory;
pub mod doctor;

pub use catalog::ServiceCatalog;
pub use dashboard::DashboardService;
pub use department::DepartmentService;
pub use directory::{DoctorDirectory, SupabaseDoctorDirectory};
pub use doctor::DoctorService;

use anyhow::Result;
use serde::de::DeserializeOwned;
use serde_json::Value;

use shared_database::DatabaseError;

pub(crate) fn decode_rows<T: DeserializeOwned>(rows: Vec<Value>) -> Result<Vec<T>> {
    let decoded = rows
        .into_iter()
        .map(serde_json::from_value)
        .collect::<std::result::Result<Vec<T>, _>>()?;
    Ok(decoded)
}

/// An empty representation means the filter matched nothing.
pub(crate) fn first_row<T: DeserializeOwned>(rows: Vec<Value>, entity: &'static str) -> Result<T> {
    let row = rows
        .into_iter()
        .next()
        .ok_or_else(|| DatabaseError::NotFound(format!("{} not found", entity)))?;
    Ok(serde_json::from_value(row)?)
}
