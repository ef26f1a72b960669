pub mod executor;
pub mod poller;
pub mod progress_tracker;

pub use executor::ExportExecutor;
pub use poller::{DownloadSink, DownloadedFile, ExportError, ExportJob, ExportJobPoller, ExportTarget, PollerSettings};
pub use progress_tracker::ProgressTracker;
