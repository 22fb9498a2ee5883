//! Unit prices and the running-total aggregator.

use crate::catalog::{AlbumStyle, AlbumTier, AlbumVariant, ServiceKey};
use crate::selection::SelectionStore;
use std::collections::BTreeMap;

/// Unit prices, in whole rupees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceTable {
    services: BTreeMap<ServiceKey, u64>,
    albums: BTreeMap<AlbumVariant, u64>,
}

impl PriceTable {
    /// The studio's list prices.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            services: ServiceKey::ALL
                .into_iter()
                .map(|service| (service, list_price(service)))
                .collect(),
            albums: AlbumVariant::ALL
                .into_iter()
                .map(|variant| (variant, album_list_price(variant)))
                .collect(),
        }
    }

    /// Override one service price.
    #[must_use]
    pub fn with_service_price(mut self, service: ServiceKey, price: u64) -> Self {
        self.services.insert(service, price);
        self
    }

    /// Override one album price.
    #[must_use]
    pub fn with_album_price(mut self, variant: AlbumVariant, price: u64) -> Self {
        self.albums.insert(variant, price);
        self
    }

    /// Remove a service from the table; selections of it then price at 0.
    #[must_use]
    pub fn without_service(mut self, service: ServiceKey) -> Self {
        self.services.remove(&service);
        self
    }

    /// Unit price of a service, if listed.
    #[must_use]
    pub fn service_price(&self, service: ServiceKey) -> Option<u64> {
        self.services.get(&service).copied()
    }

    /// Unit price of an album, if listed.
    #[must_use]
    pub fn album_price(&self, variant: AlbumVariant) -> Option<u64> {
        self.albums.get(&variant).copied()
    }
}

impl Default for PriceTable {
    fn default() -> Self {
        Self::standard()
    }
}

const fn list_price(service: ServiceKey) -> u64 {
    match service {
        ServiceKey::TraditionalPhotography => 5000,
        ServiceKey::TraditionalVideography => 6000,
        ServiceKey::CandidPhotography => 7000,
        ServiceKey::CandidVideography | ServiceKey::CinematicVideography => 8000,
        ServiceKey::Drone => 3000,
        ServiceKey::LedScreen => 4000,
    }
}

const fn album_list_price(variant: AlbumVariant) -> u64 {
    match (variant.style, variant.tier) {
        (AlbumStyle::Traditional, AlbumTier::Pressbook) => 5000,
        (AlbumStyle::Traditional, AlbumTier::Magnum) => 7000,
        (AlbumStyle::Candid, AlbumTier::Pressbook) => 6000,
        (AlbumStyle::Candid, AlbumTier::Magnum) => 8000,
    }
}

/// Grand total of every selection, `quantity × unit price` summed exactly.
///
/// An unpriced key contributes 0.
#[must_use]
pub fn compute_total(store: &SelectionStore, prices: &PriceTable) -> u64 {
    let events: u64 = store
        .events()
        .flat_map(|(event, selection)| {
            selection
                .line_items()
                .into_iter()
                .map(move |(_, service, qty)| (event, service, qty))
        })
        .map(|(event, service, qty)| {
            prices.service_price(service).map_or_else(
                || {
                    tracing::debug!(%event, %service, "No price listed, counting as 0");
                    0
                },
                |price| price.saturating_mul(u64::from(qty)),
            )
        })
        .fold(0, u64::saturating_add);

    let albums: u64 = store
        .albums()
        .map(|(variant, qty)| {
            prices.album_price(variant).map_or_else(
                || {
                    tracing::debug!(%variant, "No album price listed, counting as 0");
                    0
                },
                |price| price.saturating_mul(u64::from(qty)),
            )
        })
        .fold(0, u64::saturating_add);

    events.saturating_add(albums)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{EventId, Person};
    use crate::selection::Slot;
    use proptest::prelude::*;

    #[test]
    fn two_traditional_and_one_drone_cost_13000() {
        let mut store = SelectionStore::new();
        let slot = Slot::Shared(EventId::Engagement);
        store.set_quantity(slot, ServiceKey::TraditionalPhotography, 2);
        store.set_quantity(slot, ServiceKey::Drone, 1);

        assert_eq!(compute_total(&store, &PriceTable::standard()), 13_000);
    }

    #[test]
    fn individual_events_sum_over_persons() {
        let mut store = SelectionStore::new();
        store.toggle_service(Slot::Individual(EventId::Mehendi, Person::Bride), ServiceKey::CandidPhotography);
        store.toggle_service(Slot::Individual(EventId::Mehendi, Person::Groom), ServiceKey::CandidPhotography);

        assert_eq!(compute_total(&store, &PriceTable::standard()), 14_000);
    }

    #[test]
    fn albums_are_priced() {
        let mut store = SelectionStore::new();
        store.toggle_album(AlbumVariant::new(AlbumStyle::Traditional, AlbumTier::Magnum));
        store.toggle_album(AlbumVariant::new(AlbumStyle::Candid, AlbumTier::Pressbook));

        assert_eq!(compute_total(&store, &PriceTable::standard()), 13_000);
    }

    #[test]
    fn unpriced_service_counts_as_zero() {
        let mut store = SelectionStore::new();
        let slot = Slot::Shared(EventId::Wedding);
        store.set_quantity(slot, ServiceKey::Drone, 4);
        store.set_quantity(slot, ServiceKey::TraditionalVideography, 1);

        let prices = PriceTable::standard().without_service(ServiceKey::Drone);
        assert_eq!(prices.service_price(ServiceKey::Drone), None);
        assert_eq!(compute_total(&store, &prices), 6_000);
    }

    #[test]
    fn overrides_replace_list_price() {
        let variant = AlbumVariant::new(AlbumStyle::Candid, AlbumTier::Magnum);
        let prices = PriceTable::standard()
            .with_service_price(ServiceKey::Drone, 3500)
            .with_album_price(variant, 9000);

        assert_eq!(prices.service_price(ServiceKey::Drone), Some(3500));
        assert_eq!(prices.album_price(variant), Some(9000));
        assert_eq!(prices.service_price(ServiceKey::LedScreen), Some(4000));
    }

    #[test]
    fn empty_store_totals_zero() {
        assert_eq!(compute_total(&SelectionStore::new(), &PriceTable::default()), 0);
    }

    fn picks() -> impl Strategy<Value = Vec<(Slot, ServiceKey, u32)>> {
        let slot = prop_oneof![
            prop::sample::select(EventId::SHARED.to_vec()).prop_map(Slot::Shared),
            (
                prop::sample::select(EventId::INDIVIDUAL.to_vec()),
                prop::sample::select(Person::ALL.to_vec()),
            )
                .prop_map(|(event, person)| Slot::Individual(event, person)),
        ];
        prop::collection::vec(
            (slot, prop::sample::select(ServiceKey::ALL.to_vec()), 1u32..4),
            0..16,
        )
    }

    proptest! {
        #[test]
        fn prop_total_ignores_selection_order(picks in picks(), seed in any::<u64>()) {
            // Distinct keys only, so order cannot change which write wins
            let mut seen = std::collections::HashSet::new();
            let picks: Vec<_> = picks.into_iter().filter(|(slot, service, _)| seen.insert((*slot, *service))).collect();

            let mut forward = SelectionStore::new();
            for (slot, service, qty) in &picks {
                forward.set_quantity(*slot, *service, *qty);
            }

            let mut shuffled = picks.clone();
            let len = shuffled.len();
            if len > 1 {
                #[allow(clippy::cast_possible_truncation)]
                let shift = (seed % len as u64) as usize;
                shuffled.rotate_left(shift);
                shuffled.reverse();
            }
            let mut backward = SelectionStore::new();
            for (slot, service, qty) in &shuffled {
                backward.set_quantity(*slot, *service, *qty);
            }

            let prices = PriceTable::standard();
            prop_assert_eq!(compute_total(&forward, &prices), compute_total(&backward, &prices));
        }
    }
}
