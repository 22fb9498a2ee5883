//! Rules that gate leaving an event step and sending the contact form.

use crate::catalog::{EventId, EventKind};
use crate::error::{StepViolation, ValidationError};
use crate::selection::SelectionStore;
use crate::submission::ContactDetails;
use regex::Regex;
use std::sync::LazyLock;

static EMAIL: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").ok());

/// Whether `email` has the `local@domain.tld` shape.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    EMAIL.as_ref().is_some_and(|re| re.is_match(email))
}

/// Check that the wizard may leave `event`.
///
/// Mandatory events need at least one selection (for any person).
///
/// # Errors
///
/// Returns the [`StepViolation`] describing the missing selection.
pub fn check_step_advance(event: EventId, store: &SelectionStore) -> Result<(), StepViolation> {
    if !event.is_mandatory() || store.has_any_selection_for(event) {
        return Ok(());
    }

    match event.kind() {
        EventKind::Shared => Err(StepViolation::SharedEventEmpty { event }),
        EventKind::Individual => Err(StepViolation::MandatoryEventEmpty { event }),
    }
}

/// Validate the contact form; the first failing rule wins.
///
/// # Errors
///
/// Returns the first [`ValidationError`] in form order.
pub fn validate_contact(
    contact: &ContactDetails,
    store: &SelectionStore,
) -> Result<(), ValidationError> {
    if contact.name.trim().is_empty() {
        return Err(ValidationError::MissingName);
    }
    if !is_valid_email(contact.email.trim()) {
        return Err(ValidationError::InvalidEmail);
    }
    if contact.phone.trim().is_empty() {
        return Err(ValidationError::MissingPhone);
    }
    if !store.has_any_selection() {
        return Err(ValidationError::NoEventsSelected);
    }
    let Some(start) = contact.start_date else {
        return Err(ValidationError::MissingStartDate);
    };
    let Some(end) = contact.end_date else {
        return Err(ValidationError::MissingEndDate);
    };
    if end < start {
        return Err(ValidationError::EndBeforeStart);
    }
    if !contact.quotation_acknowledged {
        return Err(ValidationError::QuotationNotAcknowledged);
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::{Person, ServiceKey};
    use crate::error::ContactField;
    use crate::selection::Slot;
    use chrono::NaiveDate;

    fn store_with_wedding() -> SelectionStore {
        let mut store = SelectionStore::new();
        store.toggle_service(Slot::Shared(EventId::Wedding), ServiceKey::Drone);
        store
    }

    fn valid_contact() -> ContactDetails {
        ContactDetails {
            name: "Asha".to_string(),
            email: "asha@example.com".to_string(),
            phone: "9876543210".to_string(),
            start_date: NaiveDate::from_ymd_opt(2026, 2, 14),
            end_date: NaiveDate::from_ymd_opt(2026, 2, 15),
            quotation_acknowledged: true,
            ..ContactDetails::default()
        }
    }

    #[test]
    fn email_pattern_compiles() {
        assert!(EMAIL.is_some());
        assert!(is_valid_email("asha@example.com"));
    }

    #[test]
    fn email_shapes() {
        assert!(is_valid_email("a@b.co"));
        assert!(!is_valid_email("foo@bar"));
        assert!(!is_valid_email("foo bar@baz.com"));
        assert!(!is_valid_email("@baz.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn valid_contact_passes() {
        assert_eq!(validate_contact(&valid_contact(), &store_with_wedding()), Ok(()));
    }

    #[test]
    fn invalid_email_names_the_email_field() {
        let contact = ContactDetails {
            email: "foo@bar".to_string(),
            ..valid_contact()
        };
        let error = validate_contact(&contact, &store_with_wedding()).unwrap_err();
        assert_eq!(error, ValidationError::InvalidEmail);
        assert_eq!(error.field(), ContactField::Email);
        assert_eq!(error.to_string(), "Please enter a valid email.");
    }

    #[test]
    fn first_failing_rule_wins() {
        let contact = ContactDetails {
            name: "   ".to_string(),
            email: "nope".to_string(),
            ..ContactDetails::default()
        };
        assert_eq!(
            validate_contact(&contact, &SelectionStore::new()),
            Err(ValidationError::MissingName)
        );
    }

    #[test]
    fn rules_apply_in_form_order() {
        let store = store_with_wedding();

        let contact = ContactDetails { phone: String::new(), ..valid_contact() };
        assert_eq!(validate_contact(&contact, &store), Err(ValidationError::MissingPhone));

        assert_eq!(
            validate_contact(&valid_contact(), &SelectionStore::new()),
            Err(ValidationError::NoEventsSelected)
        );

        let contact = ContactDetails { start_date: None, ..valid_contact() };
        assert_eq!(validate_contact(&contact, &store), Err(ValidationError::MissingStartDate));

        let contact = ContactDetails { end_date: None, ..valid_contact() };
        assert_eq!(validate_contact(&contact, &store), Err(ValidationError::MissingEndDate));

        let contact = ContactDetails {
            end_date: NaiveDate::from_ymd_opt(2026, 2, 1),
            ..valid_contact()
        };
        assert_eq!(validate_contact(&contact, &store), Err(ValidationError::EndBeforeStart));

        let contact = ContactDetails { quotation_acknowledged: false, ..valid_contact() };
        assert_eq!(
            validate_contact(&contact, &store),
            Err(ValidationError::QuotationNotAcknowledged)
        );
    }

    #[test]
    fn albums_alone_do_not_satisfy_event_rule() {
        let mut store = SelectionStore::new();
        store.toggle_album(crate::catalog::AlbumVariant::ALL[0]);
        assert_eq!(
            validate_contact(&valid_contact(), &store),
            Err(ValidationError::NoEventsSelected)
        );
    }

    #[test]
    fn mandatory_events_block_advance_when_empty() {
        let store = SelectionStore::new();
        assert_eq!(
            check_step_advance(EventId::Engagement, &store),
            Err(StepViolation::SharedEventEmpty { event: EventId::Engagement })
        );
        assert_eq!(
            check_step_advance(EventId::Rituals, &store),
            Err(StepViolation::MandatoryEventEmpty { event: EventId::Rituals })
        );
        assert_eq!(check_step_advance(EventId::Haldi, &store), Ok(()));
        assert_eq!(check_step_advance(EventId::Sangeeth, &store), Ok(()));
    }

    #[test]
    fn any_person_satisfies_mandatory_individual_event() {
        let mut store = SelectionStore::new();
        store.toggle_service(Slot::Individual(EventId::Rituals, Person::Groom), ServiceKey::CandidPhotography);
        assert_eq!(check_step_advance(EventId::Rituals, &store), Ok(()));
    }

    #[test]
    fn violation_messages() {
        assert_eq!(
            StepViolation::SharedEventEmpty { event: EventId::Wedding }.to_string(),
            "Please choose at least one service"
        );
        assert_eq!(
            StepViolation::MandatoryEventEmpty { event: EventId::Rituals }.to_string(),
            "Please choose at least one service for the wedding event"
        );
    }
}
