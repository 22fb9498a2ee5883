//! Quotation wizard demo binary
//!
//! Walks one visitor through the whole wizard and sends the quotation.
//! Set `QUOTATION_API_BASE_URL` to post to a real endpoint; otherwise an
//! in-memory gateway records the payload.

use anyhow::Context;
use std::time::Duration;
use studio_quote_runtime::Store;
use studio_quote_wizard::config::BASE_URL_VAR;
use studio_quote_wizard::mocks::MockQuotationGateway;
use studio_quote_wizard::{
    AlbumStyle, AlbumTier, AlbumVariant, ContactUpdate, EventId, HttpQuotationGateway, Person,
    QuotationAction, QuotationEnvironment, QuotationPayload, QuotationReducer, QuotationSummary,
    ServiceKey, Slot, SubmissionStatus, WizardConfig, format_inr,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

type QuoteStore = Store<
    studio_quote_wizard::QuotationState,
    QuotationAction,
    QuotationEnvironment,
    QuotationReducer,
>;

async fn send(store: &QuoteStore, label: &str, action: QuotationAction) -> anyhow::Result<()> {
    store
        .send(action)
        .await
        .with_context(|| format!("store rejected {label}"))?;
    let (step, total) = store.state(|s| (s.step(), s.total)).await;
    println!("  {label:<40} step={step:?} total={}", format_inr(total));
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "quote_demo=debug,studio_quote_runtime=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = WizardConfig::from_env().context("invalid wizard configuration")?;
    let gateway = if std::env::var(BASE_URL_VAR).is_ok() {
        tracing::info!(endpoint = %config.endpoint(), "Posting quotations over HTTP");
        HttpQuotationGateway::shared(&config).context("failed to build HTTP client")?
    } else {
        tracing::info!("No {BASE_URL_VAR} set; using the in-memory gateway");
        MockQuotationGateway::new().shared()
    };

    let env = QuotationEnvironment::live(gateway, config);
    let store = Store::new(env.initial_state(), QuotationReducer::new(), env.clone());

    println!("=== Wedding Photography Quotation ===\n");

    println!("Shared events:");
    send(&store, "Next", QuotationAction::Next).await?;
    send(
        &store,
        "Engagement: 2x Traditional Photography",
        QuotationAction::SetQuantity {
            slot: Slot::Shared(EventId::Engagement),
            service: ServiceKey::TraditionalPhotography,
            quantity: 2,
        },
    )
    .await?;
    send(&store, "Next", QuotationAction::Next).await?;
    send(&store, "Next without a Reception service", QuotationAction::Next).await?;
    if let Some(notice) = store.state(|s| s.notice.clone()).await {
        println!("  notice: {}", notice.message);
    }
    send(
        &store,
        "Reception: Drone",
        QuotationAction::ToggleService {
            slot: Slot::Shared(EventId::Reception),
            service: ServiceKey::Drone,
        },
    )
    .await?;
    send(&store, "Next", QuotationAction::Next).await?;
    send(
        &store,
        "Wedding: Candid Photography",
        QuotationAction::ToggleService {
            slot: Slot::Shared(EventId::Wedding),
            service: ServiceKey::CandidPhotography,
        },
    )
    .await?;
    send(&store, "Next", QuotationAction::Next).await?;

    println!("\nIndividual events:");
    send(&store, "Haldi: covered", QuotationAction::AnswerCoverage { covered: true }).await?;
    send(
        &store,
        "Haldi (Bride): Candid Videography",
        QuotationAction::ToggleService {
            slot: Slot::Individual(EventId::Haldi, Person::Bride),
            service: ServiceKey::CandidVideography,
        },
    )
    .await?;
    send(&store, "Next", QuotationAction::Next).await?;
    send(&store, "Mehendi: not covered", QuotationAction::AnswerCoverage { covered: false }).await?;
    send(&store, "Rituals: covered", QuotationAction::AnswerCoverage { covered: true }).await?;
    send(&store, "Switch to Groom", QuotationAction::SelectPerson { person: Person::Groom }).await?;
    send(
        &store,
        "Rituals (Groom): Traditional Videography",
        QuotationAction::ToggleService {
            slot: Slot::Individual(EventId::Rituals, Person::Groom),
            service: ServiceKey::TraditionalVideography,
        },
    )
    .await?;
    send(&store, "Next", QuotationAction::Next).await?;
    send(&store, "Sangeeth: not covered", QuotationAction::AnswerCoverage { covered: false }).await?;

    println!("\nAlbums:");
    send(&store, "Albums wanted", QuotationAction::AnswerAlbums { wanted: true }).await?;
    send(
        &store,
        "Traditional Album - Pressbook",
        QuotationAction::ToggleAlbum {
            variant: AlbumVariant::new(AlbumStyle::Traditional, AlbumTier::Pressbook),
        },
    )
    .await?;
    send(&store, "Next", QuotationAction::Next).await?;
    send(&store, "Next", QuotationAction::Next).await?;

    let summary = store
        .state(|s| QuotationSummary::from_store(&s.selections, &env.prices))
        .await;
    println!("\nSummary:");
    for section in &summary.sections {
        println!("  {}", section.title);
        for line in &section.lines {
            let who = line.person.map(|p| format!("{p}: ")).unwrap_or_default();
            println!(
                "    {who}{} x{} @ {} = {}",
                line.item,
                line.quantity,
                format_inr(line.unit_price),
                format_inr(line.line_total)
            );
        }
    }
    println!("  Total: {}", format_inr(summary.total));

    println!("\nContact form:");
    send(&store, "Continue", QuotationAction::Next).await?;
    let updates = [
        ContactUpdate::Name("Asha Menon".to_string()),
        ContactUpdate::Email("asha@example.com".to_string()),
        ContactUpdate::Phone("98765 43210".to_string()),
        ContactUpdate::PreferredCallTime(Some("Evenings".to_string())),
        ContactUpdate::StartDate(chrono::NaiveDate::from_ymd_opt(2026, 2, 14)),
        ContactUpdate::EndDate(chrono::NaiveDate::from_ymd_opt(2026, 2, 16)),
        ContactUpdate::Note("Outdoor venue, evening reception".to_string()),
        ContactUpdate::QuotationAcknowledged(true),
    ];
    for update in updates {
        store.send(QuotationAction::UpdateContact(update)).await?;
    }

    let payload = store
        .state(|s| QuotationPayload::build(&s.contact, &s.selections, &env.prices))
        .await;
    println!(
        "  payload:\n{}",
        serde_json::to_string_pretty(&payload).context("failed to encode payload")?
    );

    let outcome = store
        .send_and_wait_for(
            QuotationAction::Submit,
            |a| {
                matches!(
                    a,
                    QuotationAction::SubmissionSucceeded { .. } | QuotationAction::SubmissionFailed { .. }
                )
            },
            env.config.request_timeout + Duration::from_secs(1),
        )
        .await;

    match outcome {
        Ok(_) => match store.state(|s| s.submission.clone()).await {
            SubmissionStatus::Submitted(ack) => {
                println!("\nQuotation sent (HTTP {}) at {}", ack.status, ack.received_at);
            },
            SubmissionStatus::Failed(message) => println!("\n{message}"),
            other => println!("\nUnexpected submission status: {other:?}"),
        },
        Err(error) => {
            if let SubmissionStatus::Invalid(invalid) = store.state(|s| s.submission.clone()).await {
                println!("\nForm rejected: {invalid}");
            } else {
                println!("\nNo response: {error}");
            }
        },
    }

    store
        .shutdown(Duration::from_secs(5))
        .await
        .context("store did not shut down cleanly")?;
    Ok(())
}
