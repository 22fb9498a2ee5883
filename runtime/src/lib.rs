//! # Studio Quote Runtime
//!
//! The [`Store`] that drives the quotation wizard.
//!
//! The store owns the wizard state, reduces each action under a write lock
//! and executes the effects the reducer returns. Actions those effects produce
//! (a submission result, a notice dismissal) go back through the same store.
//!
//! ```ignore
//! use studio_quote_runtime::Store;
//!
//! let store = Store::new(env.initial_state(), QuotationReducer::new(), env);
//! store.send(QuotationAction::Next).await?;
//! let step = store.state(|s| s.step()).await;
//! ```

pub mod error;
mod handle;
pub mod store;

pub use error::StoreError;
pub use handle::EffectHandle;
pub use store::Store;
