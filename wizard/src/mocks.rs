//! In-memory quotation gateway for development and testing.
//!
//! Records every payload it receives. Used by the demo binary when no API
//! base URL is configured, and by tests that must not touch the network.

use crate::error::NetworkError;
use crate::submission::{QuotationGateway, QuotationPayload};
use futures::future::BoxFuture;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

/// Mock quotation gateway
///
/// Accepts with status 200 unless built with [`MockQuotationGateway::failing`].
#[derive(Clone, Debug)]
pub struct MockQuotationGateway {
    received: Arc<Mutex<Vec<QuotationPayload>>>,
    outcome: Result<u16, NetworkError>,
    latency: Duration,
}

impl MockQuotationGateway {
    /// Creates a gateway that accepts every quotation
    #[must_use]
    pub fn new() -> Self {
        Self {
            received: Arc::new(Mutex::new(Vec::new())),
            outcome: Ok(200),
            latency: Duration::ZERO,
        }
    }

    /// Creates a gateway that rejects every quotation with `error`
    #[must_use]
    pub fn failing(error: NetworkError) -> Self {
        Self {
            outcome: Err(error),
            ..Self::new()
        }
    }

    /// Simulate network latency
    #[must_use]
    pub const fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Creates an Arc-wrapped instance for sharing
    #[must_use]
    pub fn shared(self) -> Arc<dyn QuotationGateway> {
        Arc::new(self)
    }

    /// Payloads received so far, oldest first
    #[must_use]
    pub fn received(&self) -> Vec<QuotationPayload> {
        self.received
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Default for MockQuotationGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl QuotationGateway for MockQuotationGateway {
    fn send_quotation(&self, payload: QuotationPayload) -> BoxFuture<'static, Result<u16, NetworkError>> {
        let received = Arc::clone(&self.received);
        let outcome = self.outcome.clone();
        let latency = self.latency;

        Box::pin(async move {
            if !latency.is_zero() {
                tokio::time::sleep(latency).await;
            }

            tracing::info!(total = payload.total, name = %payload.name, "Mock gateway received quotation");
            received
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(payload);

            outcome
        })
    }
}
