pub mod dashboard_service;
pub mod manifest_service;
pub mod recon_service;
pub mod status_service;

pub use dashboard_service::{CarrierBatchReport, DashboardService};
pub use manifest_service::{ManifestService, ResetReport};
pub use recon_service::ReconService;
pub use status_service::{StationStats, StatusService};

use crate::errors::StationError;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Station(#[from] StationError),
    #[error("no scan record found for `{0}`")]
    NotFound(String),
    #[error("{0}")]
    Invalid(String),
}
