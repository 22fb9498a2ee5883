//! Wizard state: navigation, cursors, selections, contact form.

use crate::catalog::{Catalog, EventId, Person};
use crate::error::ValidationError;
use crate::selection::{SelectionStore, Slot};
use crate::submission::{ContactDetails, SubmissionAck};
use serde::Serialize;

/// Top-level wizard steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum Step {
    /// Landing screen
    #[default]
    Start,
    /// One shared event at a time
    SharedEvents,
    /// One individual event at a time
    IndividualEvents,
    /// Album add-ons
    Albums,
    /// Read-only breakdown
    Summary,
    /// Contact form and submission
    ContactForm,
}

/// Special back targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackSignal {
    /// Return to the last shared event
    SharedLast,
}

/// Current step plus the stack of steps to go back to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Navigation {
    /// Active step
    pub current_step: Step,
    /// Return points, most recent last
    pub history: Vec<Step>,
}

impl Navigation {
    /// Move forward to `step`, remembering where we came from.
    ///
    /// The current step is not pushed twice in a row. Going to the
    /// current step is a no-op.
    pub fn go_to(&mut self, step: Step) {
        if step == self.current_step {
            return;
        }
        if self.history.last() != Some(&self.current_step) {
            self.history.push(self.current_step);
        }
        self.current_step = step;
    }

    /// Pop one return point, or fall back to [`Step::Start`].
    pub fn go_back(&mut self) -> Step {
        self.current_step = self.history.pop().unwrap_or(Step::Start);
        self.current_step
    }

    /// Jump to the shared events, dropping every return point pushed since
    /// they were last entered.
    pub fn back_to_shared(&mut self) {
        if let Some(pos) = self.history.iter().rposition(|s| *s == Step::SharedEvents) {
            self.history.truncate(pos);
        }
        self.current_step = Step::SharedEvents;
    }
}

/// Yes/No prompt or service picker inside an individual event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IndividualPhase {
    /// "Will this event be covered?"
    #[default]
    Prompt,
    /// Per-person service picker
    Picker,
}

/// Position inside the individual events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndividualCursor {
    /// Index into the catalog's individual events
    pub index: usize,
    /// Person whose services are shown
    pub person: Person,
    /// Prompt or picker
    pub phase: IndividualPhase,
}

impl Default for IndividualCursor {
    fn default() -> Self {
        Self {
            index: 0,
            person: Person::first(),
            phase: IndividualPhase::Prompt,
        }
    }
}

/// Sub-steps of the album section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlbumPhase {
    /// "Would you like an album?"
    #[default]
    Intro,
    /// Traditional tier picker
    Traditional,
    /// Candid tier picker
    Candid,
}

/// A transient message that dismisses itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Identifies the timer that may dismiss it
    pub id: u64,
    /// Text shown
    pub message: String,
}

/// Where the contact form submission stands.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmissionStatus {
    /// Not attempted
    #[default]
    Idle,
    /// Rejected locally
    Invalid(ValidationError),
    /// Request in flight
    Submitting,
    /// Accepted
    Submitted(SubmissionAck),
    /// Request failed; message invites a retry
    Failed(String),
}

/// Everything the quotation wizard knows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuotationState {
    /// Step and history
    pub navigation: Navigation,
    /// Index into the catalog's shared events
    pub shared_index: usize,
    /// Position inside the individual events
    pub individual: IndividualCursor,
    /// Album sub-step
    pub album_phase: AlbumPhase,
    /// Every selection so far
    pub selections: SelectionStore,
    /// Running total of `selections`
    pub total: u64,
    /// Visible notice, if any
    pub notice: Option<Notice>,
    /// Contact form fields
    pub contact: ContactDetails,
    /// Submission progress
    pub submission: SubmissionStatus,
    pub(crate) next_notice_id: u64,
}

impl QuotationState {
    /// Fresh wizard on the start screen
    #[must_use]
    pub fn new() -> Self {
        Self::with_contact(ContactDetails::default())
    }

    /// Fresh wizard with a pre-filled contact form
    #[must_use]
    pub fn with_contact(contact: ContactDetails) -> Self {
        Self {
            navigation: Navigation::default(),
            shared_index: 0,
            individual: IndividualCursor::default(),
            album_phase: AlbumPhase::default(),
            selections: SelectionStore::new(),
            total: 0,
            notice: None,
            contact,
            submission: SubmissionStatus::Idle,
            next_notice_id: 0,
        }
    }

    /// Active step
    #[must_use]
    pub const fn step(&self) -> Step {
        self.navigation.current_step
    }

    /// Whether the floating running-total badge is shown.
    #[must_use]
    pub const fn shows_running_total(&self) -> bool {
        !matches!(self.step(), Step::Start | Step::Summary | Step::ContactForm)
    }

    /// Whether a submission is in flight
    #[must_use]
    pub const fn is_submitting(&self) -> bool {
        matches!(self.submission, SubmissionStatus::Submitting)
    }

    /// Event shown on the current step, if it is an event step.
    #[must_use]
    pub fn current_event(&self, catalog: &Catalog) -> Option<EventId> {
        match self.step() {
            Step::SharedEvents => catalog.shared_events.get(self.shared_index).copied(),
            Step::IndividualEvents => catalog.individual_events.get(self.individual.index).copied(),
            _ => None,
        }
    }

    /// Slot the visible service picker writes to, if one is visible.
    #[must_use]
    pub fn current_slot(&self, catalog: &Catalog) -> Option<Slot> {
        let event = self.current_event(catalog)?;
        match self.step() {
            Step::SharedEvents => Some(Slot::Shared(event)),
            Step::IndividualEvents if self.individual.phase == IndividualPhase::Picker => {
                Some(Slot::Individual(event, self.individual.person))
            },
            _ => None,
        }
    }
}

impl Default for QuotationState {
    fn default() -> Self {
        Self::new()
    }
}
