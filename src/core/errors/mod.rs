pub mod crash_policy;
pub mod error_models;
pub mod error_report;
pub mod error_service;

pub use crash_policy::CrashPolicy;
pub use error_models::{Error, ErrorRecord, PlatformError};
pub use error_report::{ErrorAttachment, ErrorEmbed, ErrorPayload, ReportStyle};
pub use error_service::{ErrorReporter, ErrorSink};
