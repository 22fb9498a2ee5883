//! The quotation wizard reducer.
//!
//! Step flow:
//!
//! ```text
//! Start → SharedEvents(0..n) → IndividualEvents(0..m, Prompt | Picker)
//!       → Albums(Intro → Traditional → Candid) → Summary → ContactForm
//! ```
//!
//! Leaving a mandatory event without a selection raises a notice and keeps
//! the step. Notices dismiss themselves through a delayed action. The only
//! other effect is the quotation submission.

use crate::actions::QuotationAction;
use crate::catalog::{Catalog, EventId, Person};
use crate::config::WizardConfig;
use crate::error::SubmissionError;
use crate::pricing::{PriceTable, compute_total};
use crate::state::{
    AlbumPhase, BackSignal, IndividualCursor, IndividualPhase, Notice, QuotationState, Step,
    SubmissionStatus,
};
use crate::submission::{ContactDetails, QuotationGateway, QuotationPayload, send_payload};
use crate::validation::{check_step_advance, validate_contact};
use std::sync::Arc;
use studio_quote_core::environment::{Clock, SystemClock};
use studio_quote_core::{SmallVec, async_effect, delay, effect::Effect, reducer::Reducer, smallvec};

type Effects = SmallVec<[Effect<QuotationAction>; 4]>;

/// Dependencies the wizard needs.
#[derive(Clone)]
pub struct QuotationEnvironment {
    /// Stamps submission acknowledgments
    pub clock: Arc<dyn Clock>,
    /// Where quotations are sent
    pub gateway: Arc<dyn QuotationGateway>,
    /// Unit prices
    pub prices: PriceTable,
    /// Event and person order
    pub catalog: Catalog,
    /// Timings and defaults
    pub config: WizardConfig,
}

impl QuotationEnvironment {
    /// Environment with list prices and the default catalog
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>, gateway: Arc<dyn QuotationGateway>, config: WizardConfig) -> Self {
        Self {
            clock,
            gateway,
            prices: PriceTable::standard(),
            catalog: Catalog::default(),
            config,
        }
    }

    /// Production environment on the system clock
    #[must_use]
    pub fn live(gateway: Arc<dyn QuotationGateway>, config: WizardConfig) -> Self {
        Self::new(Arc::new(SystemClock), gateway, config)
    }

    /// Replace the price table
    #[must_use]
    pub fn with_prices(mut self, prices: PriceTable) -> Self {
        self.prices = prices;
        self
    }

    /// Replace the catalog
    #[must_use]
    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// A fresh wizard state using this environment's defaults
    #[must_use]
    pub fn initial_state(&self) -> QuotationState {
        QuotationState::with_contact(ContactDetails::with_country_code(
            self.config.default_country_code.clone(),
        ))
    }
}

impl std::fmt::Debug for QuotationEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuotationEnvironment")
            .field("prices", &self.prices)
            .field("catalog", &self.catalog)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Reducer for the quotation wizard.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuotationReducer;

impl QuotationReducer {
    /// Create a new reducer
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn go_to(state: &mut QuotationState, step: Step, env: &QuotationEnvironment) {
        let from = state.step();
        state.navigation.go_to(step);
        Self::enter_step(state, env);
        tracing::debug!(?from, to = ?state.step(), "Step changed");
    }

    /// Reset the entered section to its first sub-step.
    fn enter_step(state: &mut QuotationState, env: &QuotationEnvironment) {
        match state.step() {
            Step::SharedEvents => state.shared_index = 0,
            Step::IndividualEvents => {
                if env.catalog.individual_events.is_empty() {
                    state.navigation.go_to(Step::Albums);
                    state.album_phase = AlbumPhase::Intro;
                } else {
                    Self::open_individual(state, 0, env);
                }
            },
            Step::Albums => state.album_phase = AlbumPhase::Intro,
            Step::Start | Step::Summary | Step::ContactForm => {},
        }
    }

    /// Show individual event `index`, skipping the prompt if it already has selections.
    fn open_individual(state: &mut QuotationState, index: usize, env: &QuotationEnvironment) {
        let already_chosen = env
            .catalog
            .individual_events
            .get(index)
            .is_some_and(|event| state.selections.has_any_selection_for(*event));

        state.individual = IndividualCursor {
            index,
            person: env.catalog.persons.first().copied().unwrap_or(Person::first()),
            phase: if already_chosen {
                IndividualPhase::Picker
            } else {
                IndividualPhase::Prompt
            },
        };
    }

    fn go_back(
        state: &mut QuotationState,
        signal: Option<BackSignal>,
        env: &QuotationEnvironment,
    ) {
        let from = state.step();
        match signal {
            Some(BackSignal::SharedLast) => {
                state.navigation.back_to_shared();
                state.shared_index = env.catalog.last_shared_index().unwrap_or(0);
            },
            None => {
                state.navigation.go_back();
                Self::enter_step(state, env);
            },
        }
        tracing::debug!(?from, to = ?state.step(), ?signal, "Stepped back");
    }

    fn raise_notice(
        state: &mut QuotationState,
        message: String,
        env: &QuotationEnvironment,
    ) -> Effects {
        let id = state.next_notice_id;
        state.next_notice_id = state.next_notice_id.wrapping_add(1);
        state.notice = Some(Notice { id, message });

        smallvec![delay! {
            duration: env.config.notice_duration,
            action: QuotationAction::DismissNotice { id }
        }]
    }

    /// Try to leave `event`; raise a notice if it still needs a selection.
    fn guard_leave(
        state: &mut QuotationState,
        event: EventId,
        env: &QuotationEnvironment,
    ) -> Result<(), Effects> {
        check_step_advance(event, &state.selections).map_err(|violation| {
            tracing::debug!(%event, %violation, "Advance blocked");
            Self::raise_notice(state, violation.to_string(), env)
        })
    }

    fn advance_individual(state: &mut QuotationState, env: &QuotationEnvironment) {
        let next = state.individual.index + 1;
        if next < env.catalog.individual_events.len() {
            Self::open_individual(state, next, env);
        } else {
            Self::go_to(state, Step::Albums, env);
        }
    }

    fn next(state: &mut QuotationState, env: &QuotationEnvironment) -> Effects {
        match state.step() {
            Step::Start => Self::go_to(state, Step::SharedEvents, env),
            Step::SharedEvents => {
                if let Some(event) = state.current_event(&env.catalog) {
                    if let Err(effects) = Self::guard_leave(state, event, env) {
                        return effects;
                    }
                }
                if state.shared_index + 1 < env.catalog.shared_events.len() {
                    state.shared_index += 1;
                } else {
                    Self::go_to(state, Step::IndividualEvents, env);
                }
            },
            Step::IndividualEvents => match state.individual.phase {
                IndividualPhase::Prompt => {
                    tracing::debug!("Next ignored until coverage is answered");
                },
                IndividualPhase::Picker => {
                    if let Some(event) = state.current_event(&env.catalog) {
                        if let Err(effects) = Self::guard_leave(state, event, env) {
                            return effects;
                        }
                    }
                    Self::advance_individual(state, env);
                },
            },
            Step::Albums => match state.album_phase {
                AlbumPhase::Intro => tracing::debug!("Next ignored until albums are answered"),
                AlbumPhase::Traditional => state.album_phase = AlbumPhase::Candid,
                AlbumPhase::Candid => Self::go_to(state, Step::Summary, env),
            },
            Step::Summary => Self::go_to(state, Step::ContactForm, env),
            Step::ContactForm => tracing::debug!("Next ignored on the contact form"),
        }
        SmallVec::new()
    }

    fn previous(state: &mut QuotationState, env: &QuotationEnvironment) {
        match state.step() {
            Step::Start => {},
            Step::SharedEvents => {
                if state.shared_index > 0 {
                    state.shared_index -= 1;
                } else {
                    Self::go_back(state, None, env);
                }
            },
            Step::IndividualEvents => {
                if state.individual.index > 0 {
                    Self::open_individual(state, state.individual.index - 1, env);
                } else {
                    Self::go_back(state, Some(BackSignal::SharedLast), env);
                }
            },
            Step::Albums => match state.album_phase {
                AlbumPhase::Intro => Self::go_back(state, None, env),
                AlbumPhase::Traditional => state.album_phase = AlbumPhase::Intro,
                AlbumPhase::Candid => state.album_phase = AlbumPhase::Traditional,
            },
            Step::Summary | Step::ContactForm => Self::go_back(state, None, env),
        }
    }

    fn answer_coverage(state: &mut QuotationState, covered: bool, env: &QuotationEnvironment) {
        if state.step() != Step::IndividualEvents {
            tracing::warn!(step = ?state.step(), "Coverage answer outside individual events");
            return;
        }
        let Some(event) = state.current_event(&env.catalog) else {
            return;
        };

        if covered {
            state.individual.phase = IndividualPhase::Picker;
            state.individual.person = env.catalog.persons.first().copied().unwrap_or(Person::first());
        } else {
            state.selections.clear(event);
            Self::refresh_total(state, env);
            tracing::debug!(%event, "Event declined");
            Self::advance_individual(state, env);
        }
    }

    fn answer_albums(state: &mut QuotationState, wanted: bool, env: &QuotationEnvironment) {
        if state.step() != Step::Albums || state.album_phase != AlbumPhase::Intro {
            tracing::warn!(step = ?state.step(), phase = ?state.album_phase, "Album answer outside the album intro");
            return;
        }

        if wanted {
            state.album_phase = AlbumPhase::Traditional;
        } else {
            state.selections.clear_albums();
            Self::refresh_total(state, env);
            Self::go_to(state, Step::Summary, env);
        }
    }

    fn refresh_total(state: &mut QuotationState, env: &QuotationEnvironment) {
        state.total = compute_total(&state.selections, &env.prices);
    }

    fn submit(state: &mut QuotationState, env: &QuotationEnvironment) -> Effects {
        if state.is_submitting() {
            tracing::debug!("Submit ignored while a submission is in flight");
            return SmallVec::new();
        }
        if state.step() != Step::ContactForm {
            tracing::warn!(step = ?state.step(), "Submit outside the contact form");
            return SmallVec::new();
        }

        if let Err(error) = validate_contact(&state.contact, &state.selections) {
            tracing::debug!(field = ?error.field(), %error, "Contact form rejected");
            state.submission = SubmissionStatus::Invalid(error);
            return SmallVec::new();
        }

        let payload = QuotationPayload::build(&state.contact, &state.selections, &env.prices);
        state.submission = SubmissionStatus::Submitting;

        let gateway = Arc::clone(&env.gateway);
        let clock = Arc::clone(&env.clock);
        smallvec![async_effect! {
            match send_payload(payload, gateway.as_ref(), clock.as_ref()).await {
                Ok(ack) => Some(QuotationAction::SubmissionSucceeded { ack }),
                Err(error) => Some(QuotationAction::SubmissionFailed { error }),
            }
        }]
    }
}

impl Reducer for QuotationReducer {
    type State = QuotationState;
    type Action = QuotationAction;
    type Environment = QuotationEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            QuotationAction::GoTo { step } => Self::go_to(state, step, env),
            QuotationAction::GoBack { signal } => Self::go_back(state, signal, env),
            QuotationAction::Next => return Self::next(state, env),
            QuotationAction::Previous => Self::previous(state, env),
            QuotationAction::AnswerCoverage { covered } => Self::answer_coverage(state, covered, env),
            QuotationAction::SelectPerson { person } => {
                if state.step() == Step::IndividualEvents
                    && state.individual.phase == IndividualPhase::Picker
                {
                    state.individual.person = person;
                }
            },
            QuotationAction::AnswerAlbums { wanted } => Self::answer_albums(state, wanted, env),

            QuotationAction::ToggleService { slot, service } => {
                state.selections.toggle_service(slot, service);
                Self::refresh_total(state, env);
            },
            QuotationAction::SetQuantity { slot, service, quantity } => {
                state.selections.set_quantity(slot, service, quantity);
                Self::refresh_total(state, env);
            },
            QuotationAction::AdjustQuantity { slot, service, delta } => {
                state.selections.adjust_quantity(slot, service, delta);
                Self::refresh_total(state, env);
            },
            QuotationAction::ClearEvent { event } => {
                state.selections.clear(event);
                Self::refresh_total(state, env);
            },
            QuotationAction::ToggleAlbum { variant } => {
                state.selections.toggle_album(variant);
                Self::refresh_total(state, env);
            },
            QuotationAction::SetAlbumQuantity { variant, quantity } => {
                state.selections.set_album_quantity(variant, quantity);
                Self::refresh_total(state, env);
            },
            QuotationAction::AdjustAlbumQuantity { variant, delta } => {
                state.selections.adjust_album_quantity(variant, delta);
                Self::refresh_total(state, env);
            },

            QuotationAction::UpdateContact(update) => {
                if !state.is_submitting() {
                    update.apply(&mut state.contact);
                }
            },
            QuotationAction::Submit => return Self::submit(state, env),
            QuotationAction::ReturnHome => {
                let next_notice_id = state.next_notice_id;
                *state = env.initial_state();
                state.next_notice_id = next_notice_id;
            },

            QuotationAction::SubmissionSucceeded { .. } | QuotationAction::SubmissionFailed { .. }
                if !state.is_submitting() =>
            {
                // No request pending in this session
                tracing::debug!("Ignoring stale submission result");
            },
            QuotationAction::SubmissionSucceeded { ack } => {
                state.submission = SubmissionStatus::Submitted(ack);
                state.selections.clear_all();
                state.total = 0;
                state.contact = ContactDetails::with_country_code(env.config.default_country_code.clone());
            },
            QuotationAction::SubmissionFailed { error } => {
                state.submission = SubmissionStatus::Failed(SubmissionError::from(error).user_message());
            },
            QuotationAction::DismissNotice { id } => {
                if state.notice.as_ref().is_some_and(|n| n.id == id) {
                    state.notice = None;
                }
            },
        }

        SmallVec::new()
    }
}
