pub mod aggregate;
pub mod embed;

pub use aggregate::{ReportRecord, ReportType, WorkspaceReportIndex};
pub use embed::{EmbedConfig, EmbedRequest};
