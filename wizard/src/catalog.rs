//! Static catalog of events, people, services and album variants.
//!
//! Every key the wizard stores or prices is one of the closed enums in this
//! module, so the option lists shown to a visitor and the price table cannot
//! drift apart: adding a service is a compile error until it has a price.
//!
//! # Event order
//!
//! Shared: Engagement → Reception → Wedding
//!
//! Individual: Haldi → Mehendi → Groom / Bride Rituals → Sangeeth

use serde::{Deserialize, Serialize};
use std::fmt;

/// A bookable service with a fixed unit price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ServiceKey {
    /// Traditional (posed) photography
    #[serde(rename = "Traditional Photography")]
    TraditionalPhotography,
    /// Traditional videography
    #[serde(rename = "Traditional Videography")]
    TraditionalVideography,
    /// Candid photography
    #[serde(rename = "Candid Photography")]
    CandidPhotography,
    /// Candid videography
    #[serde(rename = "Candid Videography")]
    CandidVideography,
    /// Cinematic videography (priced, not offered in the event pickers)
    #[serde(rename = "Cinematic Videography")]
    CinematicVideography,
    /// Drone coverage
    #[serde(rename = "Drone")]
    Drone,
    /// LED screen (priced, not offered in the event pickers)
    #[serde(rename = "LED Screen")]
    LedScreen,
}

impl ServiceKey {
    /// Every service that has a price.
    pub const ALL: [Self; 7] = [
        Self::TraditionalPhotography,
        Self::TraditionalVideography,
        Self::CandidPhotography,
        Self::CandidVideography,
        Self::CinematicVideography,
        Self::Drone,
        Self::LedScreen,
    ];

    /// Services shown in the shared and individual event pickers, in display order.
    pub const OFFERED: [Self; 5] = [
        Self::TraditionalPhotography,
        Self::TraditionalVideography,
        Self::CandidPhotography,
        Self::CandidVideography,
        Self::Drone,
    ];

    /// Canonical display spelling, identical to the serialized key.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::TraditionalPhotography => "Traditional Photography",
            Self::TraditionalVideography => "Traditional Videography",
            Self::CandidPhotography => "Candid Photography",
            Self::CandidVideography => "Candid Videography",
            Self::CinematicVideography => "Cinematic Videography",
            Self::Drone => "Drone",
            Self::LedScreen => "LED Screen",
        }
    }
}

impl fmt::Display for ServiceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Album style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AlbumStyle {
    /// Traditional album
    Traditional,
    /// Candid album
    Candid,
}

impl AlbumStyle {
    /// Styles in the order the album pickers are shown.
    pub const ALL: [Self; 2] = [Self::Traditional, Self::Candid];

    /// Display name.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Traditional => "Traditional",
            Self::Candid => "Candid",
        }
    }
}

/// Album tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AlbumTier {
    /// Pressbook binding
    Pressbook,
    /// Magnum binding
    Magnum,
}

impl AlbumTier {
    /// Tiers in display order.
    pub const ALL: [Self; 2] = [Self::Pressbook, Self::Magnum];

    /// Display name.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pressbook => "Pressbook",
            Self::Magnum => "Magnum",
        }
    }
}

/// One album add-on: a tier under a style.
///
/// Serialized as `"<Style> Album - <Tier>"`, e.g. `"Candid Album - Magnum"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AlbumVariant {
    /// Album style
    pub style: AlbumStyle,
    /// Album tier
    pub tier: AlbumTier,
}

impl AlbumVariant {
    /// Every album variant.
    pub const ALL: [Self; 4] = [
        Self::new(AlbumStyle::Traditional, AlbumTier::Pressbook),
        Self::new(AlbumStyle::Traditional, AlbumTier::Magnum),
        Self::new(AlbumStyle::Candid, AlbumTier::Pressbook),
        Self::new(AlbumStyle::Candid, AlbumTier::Magnum),
    ];

    /// Create a variant
    #[must_use]
    pub const fn new(style: AlbumStyle, tier: AlbumTier) -> Self {
        Self { style, tier }
    }

    /// Parse the serialized `"<Style> Album - <Tier>"` form.
    #[must_use]
    pub fn parse(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.to_string() == label)
    }
}

impl fmt::Display for AlbumVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} Album - {}", self.style.label(), self.tier.label())
    }
}

impl Serialize for AlbumVariant {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for AlbumVariant {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Self::parse(&label)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown album variant: {label}")))
    }
}

/// Whether an event is booked once for the couple or per person.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    /// Selected once for the couple
    Shared,
    /// Selected separately for each person
    Individual,
}

/// A wedding event that can be covered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EventId {
    /// Engagement ceremony
    Engagement,
    /// Reception
    Reception,
    /// Wedding ceremony
    Wedding,
    /// Haldi
    Haldi,
    /// Mehendi
    Mehendi,
    /// Groom / Bride rituals
    #[serde(rename = "Groom / Bride Rituals")]
    Rituals,
    /// Sangeeth
    Sangeeth,
}

impl EventId {
    /// Shared events in wizard order.
    pub const SHARED: [Self; 3] = [Self::Engagement, Self::Reception, Self::Wedding];

    /// Individual events in wizard order.
    pub const INDIVIDUAL: [Self; 4] = [Self::Haldi, Self::Mehendi, Self::Rituals, Self::Sangeeth];

    /// Display name, identical to the serialized key.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Engagement => "Engagement",
            Self::Reception => "Reception",
            Self::Wedding => "Wedding",
            Self::Haldi => "Haldi",
            Self::Mehendi => "Mehendi",
            Self::Rituals => "Groom / Bride Rituals",
            Self::Sangeeth => "Sangeeth",
        }
    }

    /// Shape of this event's selections.
    #[must_use]
    pub const fn kind(self) -> EventKind {
        match self {
            Self::Engagement | Self::Reception | Self::Wedding => EventKind::Shared,
            Self::Haldi | Self::Mehendi | Self::Rituals | Self::Sangeeth => EventKind::Individual,
        }
    }

    /// Whether at least one service must be chosen before leaving this event.
    #[must_use]
    pub const fn is_mandatory(self) -> bool {
        match self {
            Self::Engagement | Self::Reception | Self::Wedding | Self::Rituals => true,
            Self::Haldi | Self::Mehendi | Self::Sangeeth => false,
        }
    }

    /// The historical naming rule for mandatory coverage.
    ///
    /// Only used to check that [`EventId::is_mandatory`] still agrees with
    /// how the events were originally named. Shared events are always
    /// mandatory regardless of name.
    #[must_use]
    pub fn name_implies_mandatory(self) -> bool {
        let name = self.label();
        name.to_lowercase().contains("wedding") || name == "Groom / Bride Rituals"
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A person booked separately at individual events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Person {
    /// The bride
    Bride,
    /// The groom
    Groom,
}

impl Person {
    /// People in picker order; the first is selected on entry.
    pub const ALL: [Self; 2] = [Self::Bride, Self::Groom];

    /// Display name.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Bride => "Bride",
            Self::Groom => "Groom",
        }
    }

    /// First person shown when an individual event opens.
    #[must_use]
    pub const fn first() -> Self {
        Self::Bride
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The ordered option lists the wizard steps through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    /// Shared events, in order
    pub shared_events: Vec<EventId>,
    /// Individual events, in order
    pub individual_events: Vec<EventId>,
    /// People, in order
    pub persons: Vec<Person>,
    /// Services offered in the event pickers
    pub offered_services: Vec<ServiceKey>,
}

impl Catalog {
    /// Album variants offered for a style, in tier order.
    #[must_use]
    pub fn albums(&self, style: AlbumStyle) -> Vec<AlbumVariant> {
        AlbumTier::ALL
            .into_iter()
            .map(|tier| AlbumVariant::new(style, tier))
            .collect()
    }

    /// Last shared event index, if any shared events exist.
    #[must_use]
    pub fn last_shared_index(&self) -> Option<usize> {
        self.shared_events.len().checked_sub(1)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            shared_events: EventId::SHARED.to_vec(),
            individual_events: EventId::INDIVIDUAL.to_vec(),
            persons: Person::ALL.to_vec(),
            offered_services: ServiceKey::OFFERED.to_vec(),
        }
    }
}
