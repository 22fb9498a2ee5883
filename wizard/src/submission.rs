//! Contact details, the outbound payload, and the quotation gateway.
//!
//! Validation always runs before anything is sent. A rejected or failed
//! request is reported to the visitor; nothing is retried automatically.

use crate::config::WizardConfig;
use crate::error::{NetworkError, SubmissionError};
use crate::pricing::{PriceTable, compute_total};
use crate::selection::SelectionStore;
use crate::validation::validate_contact;
use chrono::{DateTime, NaiveDate, Utc};
use futures::future::BoxFuture;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use studio_quote_core::environment::Clock;

/// What the visitor typed into the contact form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDetails {
    /// Full name
    pub name: String,
    /// Email address
    pub email: String,
    /// Dialling prefix, e.g. "+91"
    pub country_code: String,
    /// Phone number without the prefix
    pub phone: String,
    /// When the visitor prefers a call back
    pub preferred_call_time: Option<String>,
    /// First event day
    pub start_date: Option<NaiveDate>,
    /// Last event day
    pub end_date: Option<NaiveDate>,
    /// Free-form note
    pub note: String,
    /// "I have already requested this quotation" checkbox
    pub quotation_acknowledged: bool,
}

impl ContactDetails {
    /// Empty form with the given dialling prefix.
    #[must_use]
    pub fn with_country_code(country_code: impl Into<String>) -> Self {
        Self {
            country_code: country_code.into(),
            ..Self::default()
        }
    }
}

impl Default for ContactDetails {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            country_code: "+91".to_string(),
            phone: String::new(),
            preferred_call_time: None,
            start_date: None,
            end_date: None,
            note: String::new(),
            quotation_acknowledged: false,
        }
    }
}

/// JSON body posted to `/send-quotation`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuotationPayload {
    /// Visitor name
    pub name: String,
    /// Visitor email
    pub email: String,
    /// Phone with its country code
    pub phone: String,
    /// `YYYY-MM-DD`, or `"<start> to <end>"` for multi-day events
    pub event_date: String,
    /// Free-form note
    pub note: String,
    /// Preferred call-back time, when given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub call_time: Option<String>,
    /// Snapshot of every selection
    pub selections: SelectionStore,
    /// Estimated total
    pub total: u64,
}

impl QuotationPayload {
    /// Package a contact form and selections. Does not validate.
    #[must_use]
    pub fn build(contact: &ContactDetails, store: &SelectionStore, prices: &PriceTable) -> Self {
        Self {
            name: contact.name.trim().to_string(),
            email: contact.email.trim().to_string(),
            phone: full_phone(&contact.country_code, &contact.phone),
            event_date: event_date(contact.start_date, contact.end_date),
            note: contact.note.trim().to_string(),
            call_time: contact
                .preferred_call_time
                .as_deref()
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(ToString::to_string),
            selections: store.clone(),
            total: compute_total(store, prices),
        }
    }
}

fn full_phone(country_code: &str, phone: &str) -> String {
    let phone = phone.trim();
    let code = country_code.trim();
    if code.is_empty() || phone.starts_with('+') {
        phone.to_string()
    } else {
        format!("{code} {phone}")
    }
}

fn event_date(start: Option<NaiveDate>, end: Option<NaiveDate>) -> String {
    match (start, end) {
        (Some(start), Some(end)) if end != start => format!("{start} to {end}"),
        (Some(start), _) => start.to_string(),
        (None, Some(end)) => end.to_string(),
        (None, None) => String::new(),
    }
}

/// Confirmation that the endpoint accepted a quotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionAck {
    /// HTTP status returned
    pub status: u16,
    /// When the acknowledgment arrived
    pub received_at: DateTime<Utc>,
}

/// Sends quotation payloads somewhere.
///
/// Resolves to the success status code.
pub trait QuotationGateway: Send + Sync {
    /// Send one quotation
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError`] if the request fails or is rejected
    fn send_quotation(&self, payload: QuotationPayload) -> BoxFuture<'static, Result<u16, NetworkError>>;
}

/// Posts quotations as JSON over HTTP.
#[derive(Clone, Debug)]
pub struct HttpQuotationGateway {
    client: Client,
    endpoint: String,
}

impl HttpQuotationGateway {
    /// Create a gateway for `config.endpoint()` with the configured timeout.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError::Transport`] if the HTTP client cannot be built.
    pub fn new(config: &WizardConfig) -> Result<Self, NetworkError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| NetworkError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: config.endpoint(),
        })
    }

    /// Creates an Arc-wrapped instance for sharing
    ///
    /// # Errors
    ///
    /// See [`HttpQuotationGateway::new`].
    pub fn shared(config: &WizardConfig) -> Result<Arc<dyn QuotationGateway>, NetworkError> {
        Ok(Arc::new(Self::new(config)?))
    }

    /// Where quotations are posted.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl QuotationGateway for HttpQuotationGateway {
    fn send_quotation(&self, payload: QuotationPayload) -> BoxFuture<'static, Result<u16, NetworkError>> {
        let client = self.client.clone();
        let endpoint = self.endpoint.clone();

        Box::pin(async move {
            tracing::debug!(endpoint = %endpoint, total = payload.total, "Posting quotation");

            let response = client
                .post(&endpoint)
                .json(&payload)
                .send()
                .await
                .map_err(|e| {
                    if e.is_timeout() {
                        NetworkError::Timeout
                    } else {
                        NetworkError::Transport(e.to_string())
                    }
                })?;

            let status = response.status();
            if status.is_success() {
                Ok(status.as_u16())
            } else {
                let message = response.text().await.unwrap_or_default();
                Err(NetworkError::Status {
                    status: status.as_u16(),
                    message,
                })
            }
        })
    }
}

/// Send an already-validated payload and stamp the acknowledgment.
///
/// # Errors
///
/// Returns the gateway's [`NetworkError`].
pub async fn send_payload(
    payload: QuotationPayload,
    gateway: &dyn QuotationGateway,
    clock: &dyn Clock,
) -> Result<SubmissionAck, NetworkError> {
    let total = payload.total;
    match gateway.send_quotation(payload).await {
        Ok(status) => {
            metrics::counter!("quotation.submissions.total", "outcome" => "accepted").increment(1);
            tracing::info!(status, total, "Quotation accepted");
            Ok(SubmissionAck {
                status,
                received_at: clock.now(),
            })
        },
        Err(error) => {
            metrics::counter!("quotation.submissions.total", "outcome" => "failed").increment(1);
            tracing::warn!(error = %error, total, "Quotation submission failed");
            Err(error)
        },
    }
}

/// Validate the form, then send the quotation once.
///
/// # Errors
///
/// - [`SubmissionError::Validation`]: a form rule failed; nothing was sent
/// - [`SubmissionError::Network`]: the request failed or was rejected
pub async fn submit(
    contact: &ContactDetails,
    store: &SelectionStore,
    prices: &PriceTable,
    gateway: &dyn QuotationGateway,
    clock: &dyn Clock,
) -> Result<SubmissionAck, SubmissionError> {
    validate_contact(contact, store)?;
    let payload = QuotationPayload::build(contact, store, prices);
    Ok(send_payload(payload, gateway, clock).await?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::{EventId, Person, ServiceKey};
    use crate::error::ValidationError;
    use crate::mocks::MockQuotationGateway;
    use crate::selection::Slot;
    use studio_quote_testing::test_clock;

    fn store() -> SelectionStore {
        let mut store = SelectionStore::new();
        store.set_quantity(Slot::Shared(EventId::Wedding), ServiceKey::TraditionalPhotography, 2);
        store.toggle_service(Slot::Individual(EventId::Haldi, Person::Bride), ServiceKey::Drone);
        store
    }

    fn contact() -> ContactDetails {
        ContactDetails {
            name: " Asha ".to_string(),
            email: "asha@example.com".to_string(),
            phone: "98765 43210".to_string(),
            preferred_call_time: Some("Evenings".to_string()),
            start_date: NaiveDate::from_ymd_opt(2026, 2, 14),
            end_date: NaiveDate::from_ymd_opt(2026, 2, 16),
            note: "Outdoor venue".to_string(),
            quotation_acknowledged: true,
            ..ContactDetails::default()
        }
    }

    #[test]
    fn payload_carries_contact_selections_and_total() {
        let payload = QuotationPayload::build(&contact(), &store(), &PriceTable::standard());

        assert_eq!(payload.name, "Asha");
        assert_eq!(payload.phone, "+91 98765 43210");
        assert_eq!(payload.event_date, "2026-02-14 to 2026-02-16");
        assert_eq!(payload.total, 13_000);

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["total"], 13_000);
        assert_eq!(json["call_time"], "Evenings");
        assert_eq!(json["selections"]["Wedding"]["Traditional Photography"], 2);
        assert_eq!(json["selections"]["Haldi"]["Bride"]["Drone"], 1);
    }

    #[test]
    fn single_day_event_date_is_the_start_date() {
        let day = NaiveDate::from_ymd_opt(2026, 3, 1);
        assert_eq!(event_date(day, day), "2026-03-01");
        assert_eq!(event_date(day, None), "2026-03-01");
        assert_eq!(event_date(None, None), "");
    }

    #[test]
    fn phone_keeps_explicit_international_prefix() {
        assert_eq!(full_phone("+91", "+44 20 7946 0000"), "+44 20 7946 0000");
        assert_eq!(full_phone("", "12345"), "12345");
    }

    #[test]
    fn blank_call_time_is_omitted() {
        let contact = ContactDetails {
            preferred_call_time: Some("  ".to_string()),
            ..contact()
        };
        let json = serde_json::to_value(QuotationPayload::build(&contact, &store(), &PriceTable::standard())).unwrap();
        assert!(json.get("call_time").is_none());
    }

    #[tokio::test]
    async fn invalid_email_never_reaches_the_gateway() {
        let gateway = MockQuotationGateway::new();
        let contact = ContactDetails {
            email: "foo@bar".to_string(),
            ..contact()
        };

        let result = submit(&contact, &store(), &PriceTable::standard(), &gateway, &test_clock()).await;

        assert_eq!(result, Err(SubmissionError::Validation(ValidationError::InvalidEmail)));
        assert!(gateway.received().is_empty());
    }

    #[tokio::test]
    async fn accepted_submission_is_acknowledged() {
        let gateway = MockQuotationGateway::new();
        let clock = test_clock();

        let ack = submit(&contact(), &store(), &PriceTable::standard(), &gateway, &clock)
            .await
            .unwrap();

        assert_eq!(ack.status, 200);
        assert_eq!(ack.received_at, clock.now());
        assert_eq!(gateway.received().len(), 1);
        assert_eq!(gateway.received()[0].total, 13_000);
    }

    #[tokio::test]
    async fn rejected_submission_is_sent_once() {
        let gateway = MockQuotationGateway::failing(NetworkError::Status {
            status: 500,
            message: "Failed to send email".to_string(),
        });

        let result = submit(&contact(), &store(), &PriceTable::standard(), &gateway, &test_clock()).await;

        let error = result.unwrap_err();
        assert!(matches!(error, SubmissionError::Network(NetworkError::Status { status: 500, .. })));
        assert_eq!(error.user_message(), "Failed to send. Try again later.");
        assert_eq!(gateway.received().len(), 1);
    }
}
