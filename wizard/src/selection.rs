//! The selection store: every service quantity and album chosen so far.
//!
//! Shared events hold one `ServiceKey → quantity` map; individual events hold
//! one such map per person. Which shape an event uses comes from
//! [`EventId::kind`], never from the caller, so the two shapes cannot be mixed
//! under one event.
//!
//! A quantity of zero is never stored. Clearing the last service of a person
//! removes the person, and clearing the last person removes the event.

use crate::catalog::{AlbumVariant, EventId, EventKind, Person, ServiceKey};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

/// Quantities chosen per service.
pub type ServiceQuantities = BTreeMap<ServiceKey, u32>;

/// Addresses one quantity map in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    /// The couple's map for a shared event
    Shared(EventId),
    /// One person's map for an individual event
    Individual(EventId, Person),
}

impl Slot {
    /// The slot an event uses for `person`, chosen by the event's kind.
    ///
    /// `person` is ignored for shared events.
    #[must_use]
    pub const fn for_event(event: EventId, person: Person) -> Self {
        match event.kind() {
            EventKind::Shared => Self::Shared(event),
            EventKind::Individual => Self::Individual(event, person),
        }
    }

    /// The event this slot belongs to.
    #[must_use]
    pub const fn event(self) -> EventId {
        match self {
            Self::Shared(event) | Self::Individual(event, _) => event,
        }
    }

    /// Whether the slot's shape matches the event's kind.
    #[must_use]
    pub const fn is_well_formed(self) -> bool {
        matches!(
            (self, self.event().kind()),
            (Self::Shared(_), EventKind::Shared) | (Self::Individual(..), EventKind::Individual)
        )
    }

    const fn person(self) -> Option<Person> {
        match self {
            Self::Shared(_) => None,
            Self::Individual(_, person) => Some(person),
        }
    }
}

/// Selections for one event, shaped by the event's kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum EventSelection {
    /// One map for the couple
    Shared(ServiceQuantities),
    /// One map per person
    Individual(BTreeMap<Person, ServiceQuantities>),
}

impl EventSelection {
    fn empty_for(event: EventId) -> Self {
        match event.kind() {
            EventKind::Shared => Self::Shared(ServiceQuantities::new()),
            EventKind::Individual => Self::Individual(BTreeMap::new()),
        }
    }

    /// True when nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Shared(services) => services.is_empty(),
            Self::Individual(persons) => persons.values().all(BTreeMap::is_empty),
        }
    }

    /// Every stored `(person, service, quantity)`, persons in catalog order.
    #[must_use]
    pub fn line_items(&self) -> Vec<(Option<Person>, ServiceKey, u32)> {
        match self {
            Self::Shared(services) => services
                .iter()
                .map(|(service, qty)| (None, *service, *qty))
                .collect(),
            Self::Individual(persons) => persons
                .iter()
                .flat_map(|(person, services)| {
                    services
                        .iter()
                        .map(move |(service, qty)| (Some(*person), *service, *qty))
                })
                .collect(),
        }
    }

    fn quantities(&self, slot: Slot) -> Option<&ServiceQuantities> {
        match (self, slot) {
            (Self::Shared(services), Slot::Shared(_)) => Some(services),
            (Self::Individual(persons), Slot::Individual(_, person)) => persons.get(&person),
            _ => None,
        }
    }

    fn quantities_mut(&mut self, slot: Slot) -> Option<&mut ServiceQuantities> {
        match (self, slot) {
            (Self::Shared(services), Slot::Shared(_)) => Some(services),
            (Self::Individual(persons), Slot::Individual(_, person)) => {
                Some(persons.entry(person).or_default())
            },
            _ => None,
        }
    }

    fn prune(&mut self) {
        if let Self::Individual(persons) = self {
            persons.retain(|_, services| !services.is_empty());
        }
    }
}

/// Every selection made in the wizard.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionStore {
    events: BTreeMap<EventId, EventSelection>,
    albums: BTreeMap<AlbumVariant, u32>,
}

impl SelectionStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a service quantity; zero removes the entry.
    ///
    /// A slot whose shape disagrees with its event is ignored.
    pub fn set_quantity(&mut self, slot: Slot, service: ServiceKey, quantity: u32) {
        if !slot.is_well_formed() {
            tracing::warn!(event = %slot.event(), person = ?slot.person(), %service, "Ignoring selection for mismatched slot");
            return;
        }

        let event = slot.event();
        let selection = self
            .events
            .entry(event)
            .or_insert_with(|| EventSelection::empty_for(event));

        if let Some(services) = selection.quantities_mut(slot) {
            if quantity == 0 {
                services.remove(&service);
            } else {
                services.insert(service, quantity);
            }
        }

        selection.prune();
        if selection.is_empty() {
            self.events.remove(&event);
        }
    }

    /// Change a quantity by `delta`, clamping at zero.
    pub fn adjust_quantity(&mut self, slot: Slot, service: ServiceKey, delta: i64) {
        let quantity = apply_delta(self.quantity(slot, service), delta);
        self.set_quantity(slot, service, quantity);
    }

    /// Select a service once, or deselect it if already chosen.
    pub fn toggle_service(&mut self, slot: Slot, service: ServiceKey) {
        let quantity = if self.quantity(slot, service) == 0 { 1 } else { 0 };
        self.set_quantity(slot, service, quantity);
    }

    /// Stored quantity, 0 when unset.
    #[must_use]
    pub fn quantity(&self, slot: Slot, service: ServiceKey) -> u32 {
        self.events
            .get(&slot.event())
            .and_then(|selection| selection.quantities(slot))
            .and_then(|services| services.get(&service))
            .copied()
            .unwrap_or(0)
    }

    /// Drop every selection for an event.
    pub fn clear(&mut self, event: EventId) {
        self.events.remove(&event);
    }

    /// Drop every event and album selection.
    pub fn clear_all(&mut self) {
        self.events.clear();
        self.albums.clear();
    }

    /// Set an album quantity; zero removes the entry.
    pub fn set_album_quantity(&mut self, variant: AlbumVariant, quantity: u32) {
        if quantity == 0 {
            self.albums.remove(&variant);
        } else {
            self.albums.insert(variant, quantity);
        }
    }

    /// Change an album quantity by `delta`, clamping at zero.
    pub fn adjust_album_quantity(&mut self, variant: AlbumVariant, delta: i64) {
        let quantity = apply_delta(self.album_quantity(variant), delta);
        self.set_album_quantity(variant, quantity);
    }

    /// Select an album once, or deselect it if already chosen.
    pub fn toggle_album(&mut self, variant: AlbumVariant) {
        let quantity = if self.album_quantity(variant) == 0 { 1 } else { 0 };
        self.set_album_quantity(variant, quantity);
    }

    /// Stored album quantity, 0 when unset.
    #[must_use]
    pub fn album_quantity(&self, variant: AlbumVariant) -> u32 {
        self.albums.get(&variant).copied().unwrap_or(0)
    }

    /// Drop every album selection.
    pub fn clear_albums(&mut self) {
        self.albums.clear();
    }

    /// Whether anything is selected for `event`, across all persons.
    #[must_use]
    pub fn has_any_selection_for(&self, event: EventId) -> bool {
        self.events.get(&event).is_some_and(|s| !s.is_empty())
    }

    /// Whether any event has a selection (albums do not count).
    #[must_use]
    pub fn has_any_selection(&self) -> bool {
        !self.events.is_empty()
    }

    /// Whether any album is selected.
    #[must_use]
    pub fn has_any_album(&self) -> bool {
        !self.albums.is_empty()
    }

    /// True when neither events nor albums hold a selection.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty() && self.albums.is_empty()
    }

    /// Selections for one event.
    #[must_use]
    pub fn event(&self, event: EventId) -> Option<&EventSelection> {
        self.events.get(&event)
    }

    /// Events with selections, in catalog order.
    pub fn events(&self) -> impl Iterator<Item = (EventId, &EventSelection)> {
        self.events.iter().map(|(event, selection)| (*event, selection))
    }

    /// Albums with their quantities, in catalog order.
    pub fn albums(&self) -> impl Iterator<Item = (AlbumVariant, u32)> + '_ {
        self.albums.iter().map(|(variant, qty)| (*variant, *qty))
    }
}

impl Serialize for SelectionStore {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let extra = usize::from(!self.albums.is_empty());
        let mut map = serializer.serialize_map(Some(self.events.len() + extra))?;
        for (event, selection) in &self.events {
            map.serialize_entry(event, selection)?;
        }
        if !self.albums.is_empty() {
            map.serialize_entry("Album", &self.albums)?;
        }
        map.end()
    }
}

fn apply_delta(current: u32, delta: i64) -> u32 {
    let next = i64::from(current).saturating_add(delta).max(0);
    u32::try_from(next).unwrap_or(u32::MAX)
}
