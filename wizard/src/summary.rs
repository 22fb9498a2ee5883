//! Read-only breakdown shown on the summary step.

use crate::catalog::{AlbumVariant, EventId, Person, ServiceKey};
use crate::pricing::{PriceTable, compute_total};
use crate::selection::SelectionStore;
use serde::Serialize;

/// One priced row of the breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryLine {
    /// Person, for individual events
    pub person: Option<Person>,
    /// Service or album name
    pub item: String,
    /// Quantity chosen
    pub quantity: u32,
    /// Unit price, 0 when unpriced
    pub unit_price: u64,
    /// `quantity × unit_price`
    pub line_total: u64,
}

/// Rows grouped under an event, or under the album add-ons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummarySection {
    /// Section heading: the event name, or `"Album"`
    pub title: String,
    /// Rows in catalog order
    pub lines: Vec<SummaryLine>,
}

/// Per-event breakdown plus the estimated total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuotationSummary {
    /// Sections in catalog order; albums last
    pub sections: Vec<SummarySection>,
    /// Estimated total
    pub total: u64,
}

impl QuotationSummary {
    /// Build the breakdown for the current selections.
    #[must_use]
    pub fn from_store(store: &SelectionStore, prices: &PriceTable) -> Self {
        let mut sections: Vec<SummarySection> = store
            .events()
            .map(|(event, selection)| event_section(event, selection.line_items(), prices))
            .collect();

        let albums: Vec<SummaryLine> = store
            .albums()
            .map(|(variant, qty)| album_line(variant, qty, prices))
            .collect();
        if !albums.is_empty() {
            sections.push(SummarySection {
                title: "Album".to_string(),
                lines: albums,
            });
        }

        Self {
            sections,
            total: compute_total(store, prices),
        }
    }

    /// True when there is nothing to show.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

fn event_section(
    event: EventId,
    items: Vec<(Option<Person>, ServiceKey, u32)>,
    prices: &PriceTable,
) -> SummarySection {
    let lines = items
        .into_iter()
        .map(|(person, service, quantity)| {
            let unit_price = prices.service_price(service).unwrap_or(0);
            SummaryLine {
                person,
                item: service.to_string(),
                quantity,
                unit_price,
                line_total: unit_price.saturating_mul(u64::from(quantity)),
            }
        })
        .collect();

    SummarySection {
        title: event.to_string(),
        lines,
    }
}

fn album_line(variant: AlbumVariant, quantity: u32, prices: &PriceTable) -> SummaryLine {
    let unit_price = prices.album_price(variant).unwrap_or(0);
    SummaryLine {
        person: None,
        item: variant.to_string(),
        quantity,
        unit_price,
        line_total: unit_price.saturating_mul(u64::from(quantity)),
    }
}

/// Format whole rupees with Indian digit grouping, e.g. `₹12,34,567`.
#[must_use]
pub fn format_inr(amount: u64) -> String {
    let digits = amount.to_string();
    if digits.len() <= 3 {
        return format!("₹{digits}");
    }

    let (head, last_three) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut rest = head;
    while rest.len() > 2 {
        let (front, pair) = rest.split_at(rest.len() - 2);
        groups.push(pair);
        rest = front;
    }
    groups.push(rest);
    groups.reverse();

    format!("₹{},{last_three}", groups.join(","))
}
