pub mod projection_service;
pub mod summary_service;

pub use projection_service::ProjectionService;
pub use summary_service::SummaryService;
