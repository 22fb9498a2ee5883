//! Everything that can happen to the wizard.

use crate::catalog::{AlbumVariant, EventId, Person, ServiceKey};
use crate::error::NetworkError;
use crate::selection::Slot;
use crate::state::{BackSignal, Step};
use crate::submission::{ContactDetails, SubmissionAck};
use chrono::NaiveDate;

/// Wizard actions: visitor intents plus effect feedback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuotationAction {
    // Navigation
    /// Move forward to a step
    GoTo {
        /// Target step
        step: Step,
    },
    /// Go back one step, or to a special target
    GoBack {
        /// `Some(SharedLast)` returns to the last shared event
        signal: Option<BackSignal>,
    },
    /// The step's Next button
    Next,
    /// The step's Previous button
    Previous,
    /// Answer "will this individual event be covered?"
    AnswerCoverage {
        /// Yes opens the picker, No clears the event and moves on
        covered: bool,
    },
    /// Switch the person shown in the individual picker
    SelectPerson {
        /// Person to show
        person: Person,
    },
    /// Answer "would you like an album?"
    AnswerAlbums {
        /// Yes opens the tier pickers, No clears albums and moves to the summary
        wanted: bool,
    },

    // Selections
    /// Select once, or deselect
    ToggleService {
        /// Where
        slot: Slot,
        /// What
        service: ServiceKey,
    },
    /// Set an exact quantity
    SetQuantity {
        /// Where
        slot: Slot,
        /// What
        service: ServiceKey,
        /// How many; 0 removes
        quantity: u32,
    },
    /// Stepper +/-
    AdjustQuantity {
        /// Where
        slot: Slot,
        /// What
        service: ServiceKey,
        /// Signed change, clamped at zero
        delta: i64,
    },
    /// Drop every selection for an event
    ClearEvent {
        /// Event to clear
        event: EventId,
    },
    /// Select an album once, or deselect
    ToggleAlbum {
        /// Album
        variant: AlbumVariant,
    },
    /// Set an album quantity
    SetAlbumQuantity {
        /// Album
        variant: AlbumVariant,
        /// How many; 0 removes
        quantity: u32,
    },
    /// Album stepper +/-
    AdjustAlbumQuantity {
        /// Album
        variant: AlbumVariant,
        /// Signed change, clamped at zero
        delta: i64,
    },

    // Contact form
    /// Edit one contact field
    UpdateContact(ContactUpdate),
    /// Validate and send the quotation
    Submit,
    /// Reset the whole wizard
    ReturnHome,

    // Feedback
    /// The endpoint accepted the quotation
    SubmissionSucceeded {
        /// Acknowledgment
        ack: SubmissionAck,
    },
    /// The request failed or was rejected
    SubmissionFailed {
        /// What went wrong
        error: NetworkError,
    },
    /// A notice timer fired
    DismissNotice {
        /// Notice the timer belongs to
        id: u64,
    },
}

/// One contact form edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactUpdate {
    /// Full name
    Name(String),
    /// Email address
    Email(String),
    /// Dialling prefix
    CountryCode(String),
    /// Phone number
    Phone(String),
    /// Preferred call-back time
    PreferredCallTime(Option<String>),
    /// First event day
    StartDate(Option<NaiveDate>),
    /// Last event day
    EndDate(Option<NaiveDate>),
    /// Free-form note
    Note(String),
    /// Acknowledgment checkbox
    QuotationAcknowledged(bool),
}

impl ContactUpdate {
    /// Write this edit into `contact`.
    pub fn apply(self, contact: &mut ContactDetails) {
        match self {
            Self::Name(v) => contact.name = v,
            Self::Email(v) => contact.email = v,
            Self::CountryCode(v) => contact.country_code = v,
            Self::Phone(v) => contact.phone = v,
            Self::PreferredCallTime(v) => contact.preferred_call_time = v,
            Self::StartDate(v) => contact.start_date = v,
            Self::EndDate(v) => contact.end_date = v,
            Self::Note(v) => contact.note = v,
            Self::QuotationAcknowledged(v) => contact.quotation_acknowledged = v,
        }
    }
}
