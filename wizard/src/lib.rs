//! # Studio Quote Wizard
//!
//! A step-by-step quotation builder for wedding photography packages.
//!
//! The visitor walks through the shared events (Engagement, Reception,
//! Wedding), then the per-person individual events, then album add-ons,
//! reviews a priced summary and finally sends a contact form. Every
//! interaction is a [`QuotationAction`] reduced by [`QuotationReducer`] over a
//! single [`QuotationState`].
//!
//! ## Example
//!
//! ```no_run
//! use studio_quote_runtime::Store;
//! use studio_quote_wizard::mocks::MockQuotationGateway;
//! use studio_quote_wizard::{
//!     QuotationAction, QuotationEnvironment, QuotationReducer, ServiceKey, Slot, EventId,
//!     WizardConfig,
//! };
//!
//! # async fn example() {
//! let env = QuotationEnvironment::live(MockQuotationGateway::new().shared(), WizardConfig::default());
//! let store = Store::new(env.initial_state(), QuotationReducer::new(), env);
//!
//! let _ = store.send(QuotationAction::Next).await;
//! let _ = store
//!     .send(QuotationAction::SetQuantity {
//!         slot: Slot::Shared(EventId::Engagement),
//!         service: ServiceKey::TraditionalPhotography,
//!         quantity: 2,
//!     })
//!     .await;
//!
//! let total = store.state(|s| s.total).await;
//! assert_eq!(total, 10_000);
//! # }
//! ```

pub mod actions;
pub mod catalog;
pub mod config;
pub mod error;
pub mod mocks;
pub mod pricing;
pub mod reducer;
pub mod selection;
pub mod state;
pub mod submission;
pub mod summary;
pub mod validation;

pub use actions::{ContactUpdate, QuotationAction};
pub use catalog::{AlbumStyle, AlbumTier, AlbumVariant, Catalog, EventId, EventKind, Person, ServiceKey};
pub use config::WizardConfig;
pub use error::{ConfigError, ContactField, NetworkError, StepViolation, SubmissionError, ValidationError};
pub use pricing::{PriceTable, compute_total};
pub use reducer::{QuotationEnvironment, QuotationReducer};
pub use selection::{EventSelection, SelectionStore, Slot};
pub use state::{
    AlbumPhase, BackSignal, IndividualCursor, IndividualPhase, Navigation, Notice, QuotationState, Step,
    SubmissionStatus,
};
pub use submission::{
    ContactDetails, HttpQuotationGateway, QuotationGateway, QuotationPayload, SubmissionAck, send_payload,
    submit,
};
pub use summary::{QuotationSummary, SummaryLine, SummarySection, format_inr};
pub use validation::{check_step_advance, is_valid_email, validate_contact};
