use super::error_models::{Error, ErrorRecord};
use super::error_report::{build_payload, ErrorPayload, ReportStyle};
use async_trait::async_trait;
use std::sync::Arc;

/// Where error notifications go (a webhook in production).
#[async_trait]
pub trait ErrorSink: Send + Sync {
    async fn deliver(&self, payload: ErrorPayload) -> Result<(), Error>;
}

/// Reports failures from anywhere in the bot.
///
/// `report` never fails and never panics on bad input: with no sink the
/// record goes to the log, and a sink failure is logged together with the
/// original record.
pub struct ErrorReporter {
    sink: Option<Arc<dyn ErrorSink>>,
    style: ReportStyle,
}

impl ErrorReporter {
    pub fn new(sink: Option<Arc<dyn ErrorSink>>, style: ReportStyle) -> Self {
        Self { sink, style }
    }

    /// A reporter that only writes to the log.
    pub fn log_only() -> Self {
        Self::new(None, ReportStyle::default())
    }

    pub fn has_sink(&self) -> bool {
        self.sink.is_some()
    }

    pub async fn report(&self, error: impl Into<ErrorRecord>) {
        let record = error.into();

        let Some(sink) = &self.sink else {
            tracing::error!(
                name = record.name.as_deref().unwrap_or("Error"),
                code = record.code,
                status = record.status.as_deref(),
                stack = record.stack.as_deref(),
                "{}",
                record.message
            );
            return;
        };

        let payload = build_payload(&record, chrono::Utc::now().timestamp(), &self.style);
        if let Err(e) = sink.deliver(payload).await {
            tracing::error!("Error reporter webhook failed: {}", e);
            tracing::error!(?record, "Original error");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingSink {
        delivered: Mutex<Vec<ErrorPayload>>,
    }

    #[async_trait]
    impl ErrorSink for RecordingSink {
        async fn deliver(&self, payload: ErrorPayload) -> Result<(), Error> {
            self.delivered.lock().unwrap().push(payload);
            Ok(())
        }
    }

    struct FailingSink;

    #[async_trait]
    impl ErrorSink for FailingSink {
        async fn deliver(&self, _: ErrorPayload) -> Result<(), Error> {
            Err("webhook unreachable".into())
        }
    }

    #[tokio::test]
    async fn delivers_embed_for_short_errors() {
        let sink = Arc::new(RecordingSink::default());
        let reporter = ErrorReporter::new(Some(sink.clone()), ReportStyle::default());

        reporter.report(ErrorRecord::new("boom").with_stack("at main")).await;

        let delivered = sink.delivered.lock().unwrap();
        assert_eq!(delivered.len(), 1);
        assert!(matches!(delivered[0], ErrorPayload::Embed(_)));
    }

    #[tokio::test]
    async fn delivers_attachment_for_huge_stacks() {
        let sink = Arc::new(RecordingSink::default());
        let reporter = ErrorReporter::new(Some(sink.clone()), ReportStyle::default());

        reporter
            .report(ErrorRecord::new("boom").with_stack("s".repeat(5000)))
            .await;

        let delivered = sink.delivered.lock().unwrap();
        assert!(matches!(delivered[0], ErrorPayload::Attachment(_)));
    }

    #[tokio::test]
    async fn sink_failures_are_swallowed() {
        let reporter = ErrorReporter::new(Some(Arc::new(FailingSink)), ReportStyle::default());
        reporter.report("anything").await;
    }

    #[tokio::test]
    async fn log_only_reporter_accepts_records_without_stack() {
        let reporter = ErrorReporter::log_only();
        assert!(!reporter.has_sink());
        reporter.report(ErrorRecord::default()).await;
        reporter.report(String::from("plain string")).await;
    }
}
