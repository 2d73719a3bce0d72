pub mod documents;
pub mod findings;
pub mod monitoring;
pub mod packages;

pub use documents::DocumentAttachmentService;
pub use findings::AuditFindingService;
pub use monitoring::MonitoringService;
pub use packages::PackageService;
