use std::any::Any;
use std::error::Error as StdError;
use std::fmt::Write as _;

/// Boxed error used at the trait seams (ports, command handlers).
pub type Error = Box<dyn StdError + Send + Sync>;

/// An error raised by the chat platform, carrying the bits of context the
/// error reporter wants to surface (JSON error code, HTTP status).
///
/// The Discord layer converts its client errors into this type so the core can
/// read them back without knowing about the client library.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}")]
pub struct PlatformError {
    pub kind: &'static str,
    pub message: String,
    pub code: Option<i64>,
    pub status: Option<u16>,
}

impl PlatformError {
    pub fn new(kind: &'static str, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            code: None,
            status: None,
        }
    }
}

/// Everything the reporter knows about a single failure.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorRecord {
    pub message: String,
    pub stack: Option<String>,
    pub name: Option<String>,
    pub code: Option<i64>,
    pub status: Option<String>,
}

impl ErrorRecord {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = Some(stack.into());
        self
    }

    /// Builds a record from any error, walking its `source()` chain into the
    /// stack text. A `PlatformError` anywhere in the chain contributes its
    /// name, code and status.
    pub fn from_error(error: &(dyn StdError + 'static)) -> Self {
        let mut stack = format!("Error: {error}");
        let mut platform = error.downcast_ref::<PlatformError>();

        let mut source = error.source();
        let mut depth = 0;
        while let Some(cause) = source {
            if depth == 0 {
                stack.push_str("\n\nCaused by:");
            }
            let _ = write!(stack, "\n    {depth}: {cause}");
            if platform.is_none() {
                platform = cause.downcast_ref::<PlatformError>();
            }
            source = cause.source();
            depth += 1;
        }

        let mut record = Self::new(error.to_string()).with_stack(stack);
        match platform {
            Some(platform) => {
                record.name = Some(platform.kind.to_string());
                record.code = platform.code;
                record.status = platform.status.map(|status| status.to_string());
            }
            None => record.name = Some("Error".to_string()),
        }
        record
    }

    /// Builds a record from a panic payload caught while running `label`.
    pub fn from_panic(label: &str, payload: &(dyn Any + Send)) -> Self {
        let detail = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic payload".to_string());

        Self::new(format!("panic in {label}: {detail}")).with_name("Panic")
    }
}

impl From<&str> for ErrorRecord {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

impl From<String> for ErrorRecord {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

impl From<&Error> for ErrorRecord {
    fn from(error: &Error) -> Self {
        Self::from_error(&**error)
    }
}

impl From<Error> for ErrorRecord {
    fn from(error: Error) -> Self {
        Self::from_error(&*error)
    }
}

impl From<anyhow::Error> for ErrorRecord {
    fn from(error: anyhow::Error) -> Self {
        let mut record = Self::new(error.to_string())
            .with_name("Error")
            // `{:?}` prints the context chain and, when captured, the backtrace.
            .with_stack(format!("{error:?}"));

        if let Some(platform) = error.downcast_ref::<PlatformError>() {
            record.name = Some(platform.kind.to_string());
            record.code = platform.code;
            record.status = platform.status.map(|status| status.to_string());
        }
        record
    }
}
