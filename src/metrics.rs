use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::info;

#[derive(Default)]
pub struct Metrics {
    pub submissions_total: AtomicU64,
    pub submissions_accepted: AtomicU64,
    pub submissions_rejected: AtomicU64,
    pub submissions_throttled: AtomicU64,
    pub transport_failures: AtomicU64,
    pub serialization_failures: AtomicU64,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn inc_submissions(&self) {
        self.submissions_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_accepted(&self) {
        self.submissions_accepted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_rejected(&self) {
        self.submissions_rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_throttled(&self) {
        self.submissions_throttled.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_transport_failures(&self) {
        self.transport_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_serialization_failures(&self) {
        self.serialization_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn format_prometheus(&self) -> String {
        format!(
            "# HELP ismp_submissions_total Total document submissions\n\
             # TYPE ismp_submissions_total counter\n\
             ismp_submissions_total {}\n\
             # HELP ismp_submissions_accepted Documents accepted by the API\n\
             # TYPE ismp_submissions_accepted counter\n\
             ismp_submissions_accepted {}\n\
             # HELP ismp_submissions_rejected Documents rejected by the API\n\
             # TYPE ismp_submissions_rejected counter\n\
             ismp_submissions_rejected {}\n\
             # HELP ismp_submissions_throttled Submissions refused by the rate gate\n\
             # TYPE ismp_submissions_throttled counter\n\
             ismp_submissions_throttled {}\n\
             # HELP ismp_transport_failures Submissions that failed before a response\n\
             # TYPE ismp_transport_failures counter\n\
             ismp_transport_failures {}\n\
             # HELP ismp_serialization_failures Submissions whose payload could not be encoded\n\
             # TYPE ismp_serialization_failures counter\n\
             ismp_serialization_failures {}\n",
            self.submissions_total.load(Ordering::Relaxed),
            self.submissions_accepted.load(Ordering::Relaxed),
            self.submissions_rejected.load(Ordering::Relaxed),
            self.submissions_throttled.load(Ordering::Relaxed),
            self.transport_failures.load(Ordering::Relaxed),
            self.serialization_failures.load(Ordering::Relaxed),
        )
    }

    /// Writes the exposition text for a node-exporter textfile collector.
    pub async fn write_textfile(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let path = path.as_ref();
        tokio::fs::write(path, self.format_prometheus()).await?;
        info!("Metrics written to {}", path.display());
        Ok(())
    }
}
