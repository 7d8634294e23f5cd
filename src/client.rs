use std::sync::Arc;
use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::clock::{Clock, SystemClock};
use crate::config::Config;
use crate::document::{CreateDocumentRequest, Document, ProductGroup};
use crate::error::ClientError;
use crate::metrics::Metrics;
use crate::ratelimit::RateGate;
use crate::transport::{HttpTransport, Transport};

pub const CONFIRMATION_MESSAGE: &str = "document created";
pub const REJECTION_REASON: &str = "document creation failed";
pub const THROTTLED_MESSAGE: &str = "rate limit reached, try later";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Accepted {
        status: u16,
        message: String,
        body: String,
    },
    Rejected {
        reason: String,
        status: u16,
        body: String,
    },
    Throttled {
        message: String,
    },
}

impl SubmissionOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, SubmissionOutcome::Accepted { .. })
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            SubmissionOutcome::Accepted { status, .. }
            | SubmissionOutcome::Rejected { status, .. } => Some(*status),
            SubmissionOutcome::Throttled { .. } => None,
        }
    }
}

/// Submits documents through a shared [`RateGate`].
///
/// Only 2xx responses are recorded against the gate. Rejections, transport
/// failures and serialization failures leave the quota untouched.
pub struct SubmissionClient<T: Transport = HttpTransport, C: Clock = SystemClock> {
    endpoint: String,
    token: String,
    gate: RateGate<C>,
    transport: T,
    metrics: Arc<Metrics>,
}

impl SubmissionClient {
    pub fn from_config(config: &Config, metrics: Arc<Metrics>) -> Result<Self, ClientError> {
        if config.api.token.is_empty() {
            return Err(ClientError::Config("api.token is empty".into()));
        }
        if config.api.timeout_ms == 0 {
            return Err(ClientError::Config("api.timeout_ms must be greater than 0".into()));
        }

        let transport = HttpTransport::new(config.api.timeout_ms)?;
        let gate = RateGate::new(config.limits.time_unit, config.limits.request_limit);

        Ok(Self::new(
            config.api.endpoint(),
            config.api.token.clone(),
            gate,
            transport,
            metrics,
        ))
    }
}

impl<T: Transport, C: Clock> SubmissionClient<T, C> {
    pub fn new(
        endpoint: String,
        token: String,
        gate: RateGate<C>,
        transport: T,
        metrics: Arc<Metrics>,
    ) -> Self {
        Self {
            endpoint,
            token,
            gate,
            transport,
            metrics,
        }
    }

    pub fn gate(&self) -> &RateGate<C> {
        &self.gate
    }

    pub fn metrics(&self) -> &Arc<Metrics> {
        &self.metrics
    }

    pub async fn submit(
        &self,
        document: &Document,
        product_group: ProductGroup,
    ) -> Result<SubmissionOutcome, ClientError> {
        let span = info_span!(
            "submit",
            submission_id = %Uuid::new_v4(),
            doc_id = %document.doc_id,
            product_group = %product_group,
        );
        self.submit_admitted(document, product_group)
            .instrument(span)
            .await
    }

    async fn submit_admitted(
        &self,
        document: &Document,
        product_group: ProductGroup,
    ) -> Result<SubmissionOutcome, ClientError> {
        self.metrics.inc_submissions();

        if !self.gate.try_admit() {
            self.metrics.inc_throttled();
            debug!("Submission throttled");
            return Ok(SubmissionOutcome::Throttled {
                message: THROTTLED_MESSAGE.to_string(),
            });
        }

        let body = serde_json::to_vec(&CreateDocumentRequest::new(document, product_group))
            .map_err(|e| {
                self.metrics.inc_serialization_failures();
                warn!("Failed to serialize document: {}", e);
                ClientError::from(e)
            })?;

        let response = match self.transport.post_json(&self.endpoint, &self.token, body).await {
            Ok(response) => response,
            Err(e) => {
                self.metrics.inc_transport_failures();
                warn!("Submission failed: {}", e);
                return Err(e.into());
            }
        };

        if response.is_success() {
            self.gate.record_success();
            self.metrics.inc_accepted();
            info!(status = response.status, "Document accepted");
            Ok(SubmissionOutcome::Accepted {
                status: response.status,
                message: CONFIRMATION_MESSAGE.to_string(),
                body: response.body,
            })
        } else {
            self.metrics.inc_rejected();
            warn!(status = response.status, body = %response.body, "Document rejected");
            Ok(SubmissionOutcome::Rejected {
                reason: REJECTION_REASON.to_string(),
                status: response.status,
                body: response.body,
            })
        }
    }
}
