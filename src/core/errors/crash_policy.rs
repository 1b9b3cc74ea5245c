// Process-level failure policy.
//
// Built once at startup from `source.anti_crash` and handed to whatever runs
// event work. When enabled, panics are reported and swallowed; when disabled
// they keep unwinding as usual.

use super::error_models::ErrorRecord;
use super::error_service::ErrorReporter;
use std::future::Future;
use std::sync::{Arc, OnceLock};

static PANIC_HOOK: OnceLock<()> = OnceLock::new();

pub struct CrashPolicy {
    enabled: bool,
    reporter: Arc<ErrorReporter>,
}

impl CrashPolicy {
    pub fn new(enabled: bool, reporter: Arc<ErrorReporter>) -> Self {
        Self { enabled, reporter }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Installs a panic hook that forwards every panic to the error reporter.
    ///
    /// Only the first call installs anything; later calls are no-ops. Returns
    /// whether this call installed the hook.
    pub fn install_panic_hook(&self) -> bool {
        if !self.enabled {
            return false;
        }

        let mut installed = false;
        PANIC_HOOK.get_or_init(|| {
            let reporter = Arc::clone(&self.reporter);
            std::panic::set_hook(Box::new(move |info| {
                let location = info
                    .location()
                    .map(|l| format!("{}:{}:{}", l.file(), l.line(), l.column()))
                    .unwrap_or_else(|| "unknown location".to_string());
                let thread = std::thread::current();
                let label = thread.name().unwrap_or("unnamed thread");

                let record = ErrorRecord::from_panic(label, info.payload()).with_stack(format!(
                    "at {location}\n\n{}",
                    std::backtrace::Backtrace::force_capture()
                ));
                tracing::error!(location = %location, "{}", record.message);

                // The hook runs synchronously; reporting needs the runtime.
                if let Ok(handle) = tokio::runtime::Handle::try_current() {
                    let reporter = Arc::clone(&reporter);
                    handle.spawn(async move { reporter.report(record).await });
                }
            }));
            installed = true;
        });

        installed
    }

    /// Runs `work` in its own task so a panic inside it cannot take the caller
    /// down. With the policy disabled the panic is re-raised here.
    pub async fn guard<F>(&self, label: &str, work: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        match tokio::spawn(work).await {
            Ok(()) => {}
            Err(e) if e.is_panic() => {
                if !self.enabled {
                    std::panic::resume_unwind(e.into_panic());
                }
                // The panic hook already reported the details.
                tracing::warn!("Recovered from a panic in {}", label);
            }
            Err(e) => tracing::warn!("Task for {} was cancelled: {}", label, e),
        }
    }
}
