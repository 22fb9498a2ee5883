//! Error types for the quotation wizard

use crate::catalog::EventId;
use serde::Serialize;
use thiserror::Error;

/// Contact form field a validation message refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ContactField {
    /// Visitor name
    Name,
    /// Email address
    Email,
    /// Phone number
    Phone,
    /// The events chosen in the wizard
    Events,
    /// First event day
    StartDate,
    /// Last event day
    EndDate,
    /// "Quotation already requested" checkbox
    QuotationAcknowledged,
}

/// A contact form rule that failed. Only the first failing rule is reported.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Name is blank
    #[error("Please enter your name.")]
    MissingName,

    /// Email does not look like `local@domain.tld`
    #[error("Please enter a valid email.")]
    InvalidEmail,

    /// Phone is blank
    #[error("Please enter your phone number.")]
    MissingPhone,

    /// No event has a selection
    #[error("Please choose at least one event to cover.")]
    NoEventsSelected,

    /// Start date not chosen
    #[error("Please choose an event start date.")]
    MissingStartDate,

    /// End date not chosen
    #[error("Please choose an event end date.")]
    MissingEndDate,

    /// End date falls before the start date
    #[error("The event end date cannot be before the start date.")]
    EndBeforeStart,

    /// Acknowledgment checkbox left unticked
    #[error("Please confirm you've submitted the quotation before sending this form.")]
    QuotationNotAcknowledged,
}

impl ValidationError {
    /// The field the visitor has to fix.
    #[must_use]
    pub const fn field(&self) -> ContactField {
        match self {
            Self::MissingName => ContactField::Name,
            Self::InvalidEmail => ContactField::Email,
            Self::MissingPhone => ContactField::Phone,
            Self::NoEventsSelected => ContactField::Events,
            Self::MissingStartDate => ContactField::StartDate,
            Self::MissingEndDate | Self::EndBeforeStart => ContactField::EndDate,
            Self::QuotationNotAcknowledged => ContactField::QuotationAcknowledged,
        }
    }
}

/// Why the wizard refused to leave an event step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StepViolation {
    /// A shared event was left without any service
    #[error("Please choose at least one service")]
    SharedEventEmpty {
        /// The event being left
        event: EventId,
    },

    /// A mandatory individual event was left without any service for anyone
    #[error("Please choose at least one service for the wedding event")]
    MandatoryEventEmpty {
        /// The event being left
        event: EventId,
    },
}

/// Failures talking to the quotation endpoint
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NetworkError {
    /// Request never completed (connection, DNS, TLS)
    #[error("Request failed: {0}")]
    Transport(String),

    /// No response within the configured timeout
    #[error("Request timed out")]
    Timeout,

    /// Endpoint answered with a non-success status
    #[error("Quotation endpoint returned status {status}: {message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, if any
        message: String,
    },
}

/// Why a submission attempt did not go through
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    /// Rejected locally; nothing was sent
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Sent, but not accepted
    #[error(transparent)]
    Network(#[from] NetworkError),
}

impl SubmissionError {
    /// Message shown inline on the contact form.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(error) => error.to_string(),
            Self::Network(_) => "Failed to send. Try again later.".to_string(),
        }
    }
}

/// Invalid configuration values
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A numeric environment variable did not parse
    #[error("{name} must be a non-negative integer, got {value:?}")]
    InvalidNumber {
        /// Variable name
        name: &'static str,
        /// Raw value
        value: String,
    },

    /// Base URL is empty or not http(s)
    #[error("Invalid quotation API base URL: {0:?}")]
    InvalidBaseUrl(String),
}
