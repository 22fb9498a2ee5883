//! Integration tests for the quotation wizard with Store
//!
//! These drive the wizard end to end: reducer, runtime and effects together.

#![allow(clippy::unwrap_used, clippy::panic)]

use chrono::NaiveDate;
use std::sync::Arc;
use std::time::Duration;
use studio_quote_runtime::Store;
use studio_quote_testing::test_clock;
use studio_quote_wizard::mocks::MockQuotationGateway;
use studio_quote_wizard::{
    AlbumStyle, AlbumTier, AlbumVariant, ContactUpdate, EventId, NetworkError, Person, PriceTable,
    QuotationAction, QuotationEnvironment, QuotationReducer, QuotationState, ServiceKey, Slot, Step,
    SubmissionStatus, ValidationError, WizardConfig, compute_total,
};

type QuoteStore = Store<QuotationState, QuotationAction, QuotationEnvironment, QuotationReducer>;

fn store_with(gateway: &MockQuotationGateway, config: WizardConfig) -> QuoteStore {
    let env = QuotationEnvironment::new(Arc::new(test_clock()), gateway.clone().shared(), config);
    Store::new(env.initial_state(), QuotationReducer::new(), env)
}

async fn send_all(store: &QuoteStore, actions: impl IntoIterator<Item = QuotationAction>) {
    for action in actions {
        store.send(action).await.unwrap();
    }
}

fn is_outcome(action: &QuotationAction) -> bool {
    matches!(
        action,
        QuotationAction::SubmissionSucceeded { .. } | QuotationAction::SubmissionFailed { .. }
    )
}

/// Start → three shared events → individual events → albums → contact form.
fn walk_to_contact_form() -> Vec<QuotationAction> {
    vec![
        QuotationAction::Next,
        QuotationAction::SetQuantity {
            slot: Slot::Shared(EventId::Engagement),
            service: ServiceKey::TraditionalPhotography,
            quantity: 2,
        },
        QuotationAction::Next,
        QuotationAction::ToggleService {
            slot: Slot::Shared(EventId::Reception),
            service: ServiceKey::Drone,
        },
        QuotationAction::Next,
        QuotationAction::ToggleService {
            slot: Slot::Shared(EventId::Wedding),
            service: ServiceKey::CandidPhotography,
        },
        QuotationAction::Next,
        // Haldi
        QuotationAction::AnswerCoverage { covered: true },
        QuotationAction::AdjustQuantity {
            slot: Slot::Individual(EventId::Haldi, Person::Bride),
            service: ServiceKey::CandidVideography,
            delta: 1,
        },
        QuotationAction::Next,
        // Mehendi
        QuotationAction::AnswerCoverage { covered: false },
        // Groom / Bride Rituals
        QuotationAction::AnswerCoverage { covered: true },
        QuotationAction::SelectPerson { person: Person::Groom },
        QuotationAction::ToggleService {
            slot: Slot::Individual(EventId::Rituals, Person::Groom),
            service: ServiceKey::TraditionalVideography,
        },
        QuotationAction::Next,
        // Sangeeth
        QuotationAction::AnswerCoverage { covered: false },
        QuotationAction::AnswerAlbums { wanted: true },
        QuotationAction::ToggleAlbum {
            variant: AlbumVariant::new(AlbumStyle::Traditional, AlbumTier::Pressbook),
        },
        QuotationAction::Next,
        QuotationAction::Next,
        QuotationAction::Next,
    ]
}

fn fill_contact_form() -> Vec<QuotationAction> {
    [
        ContactUpdate::Name("Asha Menon".to_string()),
        ContactUpdate::Email("asha@example.com".to_string()),
        ContactUpdate::Phone("98765 43210".to_string()),
        ContactUpdate::StartDate(NaiveDate::from_ymd_opt(2026, 2, 14)),
        ContactUpdate::EndDate(NaiveDate::from_ymd_opt(2026, 2, 16)),
        ContactUpdate::QuotationAcknowledged(true),
    ]
    .into_iter()
    .map(QuotationAction::UpdateContact)
    .collect()
}

#[tokio::test]
async fn test_full_wizard_flow_sends_priced_quotation() {
    let gateway = MockQuotationGateway::new();
    let store = store_with(&gateway, WizardConfig::default());

    send_all(&store, walk_to_contact_form()).await;

    let (step, total, selections) = store
        .state(|s| (s.step(), s.total, s.selections.clone()))
        .await;
    assert_eq!(step, Step::ContactForm);
    // 2×5000 + 3000 + 7000 + 8000 + 6000 + 5000
    assert_eq!(total, 39_000);
    assert_eq!(total, compute_total(&selections, &PriceTable::standard()));

    send_all(&store, fill_contact_form()).await;
    let outcome = store
        .send_and_wait_for(QuotationAction::Submit, is_outcome, Duration::from_secs(1))
        .await
        .unwrap();
    assert!(matches!(outcome, QuotationAction::SubmissionSucceeded { .. }));

    let received = gateway.received();
    assert_eq!(received.len(), 1);
    let payload = &received[0];
    assert_eq!(payload.total, 39_000);
    assert_eq!(payload.phone, "+91 98765 43210");
    assert_eq!(payload.event_date, "2026-02-14 to 2026-02-16");
    assert_eq!(payload.selections, selections);

    let (submission, empty, total) = store
        .state(|s| (s.submission.clone(), s.selections.is_empty(), s.total))
        .await;
    match submission {
        SubmissionStatus::Submitted(ack) => {
            assert_eq!(ack.status, 200);
            assert_eq!(ack.received_at, test_clock_now());
        },
        other => panic!("expected Submitted, got {other:?}"),
    }
    assert!(empty);
    assert_eq!(total, 0);
}

fn test_clock_now() -> chrono::DateTime<chrono::Utc> {
    use studio_quote_core::environment::Clock;
    test_clock().now()
}

#[tokio::test]
async fn test_failed_submission_keeps_everything_for_retry() {
    let gateway = MockQuotationGateway::failing(NetworkError::Status {
        status: 500,
        message: "mail server down".to_string(),
    });
    let store = store_with(&gateway, WizardConfig::default());

    send_all(&store, walk_to_contact_form()).await;
    send_all(&store, fill_contact_form()).await;
    let outcome = store
        .send_and_wait_for(QuotationAction::Submit, is_outcome, Duration::from_secs(1))
        .await
        .unwrap();
    assert!(matches!(outcome, QuotationAction::SubmissionFailed { .. }));

    let (submission, total, name) = store
        .state(|s| (s.submission.clone(), s.total, s.contact.name.clone()))
        .await;
    assert_eq!(
        submission,
        SubmissionStatus::Failed("Failed to send. Try again later.".to_string())
    );
    assert_eq!(total, 39_000);
    assert_eq!(name, "Asha Menon");
}

#[tokio::test]
async fn test_invalid_form_never_reaches_gateway() {
    let gateway = MockQuotationGateway::new();
    let store = store_with(&gateway, WizardConfig::default());

    send_all(&store, walk_to_contact_form()).await;
    send_all(&store, fill_contact_form()).await;
    send_all(
        &store,
        [
            QuotationAction::UpdateContact(ContactUpdate::EndDate(NaiveDate::from_ymd_opt(2026, 2, 10))),
            QuotationAction::Submit,
        ],
    )
    .await;

    let submission = store.state(|s| s.submission.clone()).await;
    assert_eq!(submission, SubmissionStatus::Invalid(ValidationError::EndBeforeStart));
    assert!(gateway.received().is_empty());
}

#[tokio::test]
async fn test_double_submit_sends_once() {
    let gateway = MockQuotationGateway::new().with_latency(Duration::from_millis(50));
    let store = store_with(&gateway, WizardConfig::default());

    send_all(&store, walk_to_contact_form()).await;
    send_all(&store, fill_contact_form()).await;

    let mut first = store.send(QuotationAction::Submit).await.unwrap();
    let mut second = store.send(QuotationAction::Submit).await.unwrap();
    assert_eq!(second.pending(), 0);
    first.wait().await;
    second.wait().await;

    assert_eq!(gateway.received().len(), 1);
}

#[tokio::test]
async fn test_notice_dismisses_itself() {
    let gateway = MockQuotationGateway::new();
    let config = WizardConfig::default().with_notice_duration(Duration::from_millis(20));
    let store = store_with(&gateway, config);

    send_all(&store, [QuotationAction::Next]).await;
    let mut handle = store.send(QuotationAction::Next).await.unwrap();

    let (step, notice) = store.state(|s| (s.step(), s.notice.clone())).await;
    assert_eq!(step, Step::SharedEvents);
    assert_eq!(notice.unwrap().message, "Please choose at least one service");

    handle.wait().await;
    let notice = store.state(|s| s.notice.clone()).await;
    assert!(notice.is_none());
}

#[tokio::test]
async fn test_newer_notice_outlives_older_timer() {
    let gateway = MockQuotationGateway::new();
    let config = WizardConfig::default().with_notice_duration(Duration::from_millis(40));
    let store = store_with(&gateway, config);

    send_all(&store, [QuotationAction::Next]).await;
    let mut first = store.send(QuotationAction::Next).await.unwrap();
    tokio::time::sleep(Duration::from_millis(20)).await;
    let mut second = store.send(QuotationAction::Next).await.unwrap();

    first.wait().await;
    let notice = store.state(|s| s.notice.clone()).await;
    assert_eq!(notice.map(|n| n.id), Some(1));

    second.wait().await;
    assert!(store.state(|s| s.notice.is_none()).await);
}

#[tokio::test]
async fn test_return_home_after_submission() {
    let gateway = MockQuotationGateway::new();
    let store = store_with(&gateway, WizardConfig::default());

    send_all(&store, walk_to_contact_form()).await;
    send_all(&store, fill_contact_form()).await;
    store
        .send_and_wait_for(QuotationAction::Submit, is_outcome, Duration::from_secs(1))
        .await
        .unwrap();
    send_all(&store, [QuotationAction::ReturnHome]).await;

    let state = store.state(Clone::clone).await;
    assert_eq!(state.step(), Step::Start);
    assert!(state.navigation.history.is_empty());
    assert_eq!(state.submission, SubmissionStatus::Idle);
}
