use std::fmt;

use serde::{Deserialize, Serialize};

/// Dining venues known to the feed. The same enumeration backs both the
/// filter picker and feed decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Location {
    Commons,
    Knollcrest,
    Johnnys,
    Peets,
    UpperCrust,
}

impl Location {
    pub const ALL: [Location; 5] = [
        Location::Commons,
        Location::Knollcrest,
        Location::Johnnys,
        Location::Peets,
        Location::UpperCrust,
    ];

    /// The exact venue string used by the feed.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Commons => "Commons",
            Self::Knollcrest => "Knollcrest",
            Self::Johnnys => "Johnnys",
            Self::Peets => "Peets",
            Self::UpperCrust => "UpperCrust",
        }
    }

    /// Human-facing label for pickers.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Commons => "Commons Dining Hall",
            Self::Knollcrest => "Knollcrest Dining Hall",
            Self::Johnnys => "Johnny's Cafe",
            Self::Peets => "Peet's Coffee",
            Self::UpperCrust => "UpperCrust",
        }
    }

    /// Exact, case-sensitive lookup against the feed vocabulary.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|venue| venue.as_str() == s)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Venue restriction. `Everywhere` is the no-restriction sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LocationFilter {
    #[default]
    Everywhere,
    At(Location),
}

impl LocationFilter {
    pub fn admits(&self, venue: Option<Location>) -> bool {
        match self {
            Self::Everywhere => true,
            Self::At(wanted) => venue == Some(*wanted),
        }
    }
}

/// Display rating in half-star steps, 0.0 through 5.0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rating(u8);

impl Rating {
    pub const MAX_HALF_STARS: u8 = 10;

    pub fn from_half_stars(half_stars: u8) -> Option<Self> {
        (half_stars <= Self::MAX_HALF_STARS).then_some(Self(half_stars))
    }

    pub fn half_stars(&self) -> u8 {
        self.0
    }

    pub fn stars(&self) -> f32 {
        f32::from(self.0) / 2.0
    }
}

impl Serialize for Rating {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f32(self.stars())
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.stars())
    }
}

/// One record of the remote feed. Only the required fields are decoded;
/// anything extra the feed sends is ignored.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDish {
    pub name: String,
    pub description: String,
    pub location: String,
    pub image_url: String,
}

/// A menu item as held for the session, frozen after synthesis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dish {
    pub name: String,
    pub description: String,
    /// None when the feed names a venue outside the known set.
    pub location: Option<Location>,
    /// URL of the dish photo.
    pub image_url: String,
    /// None only on the placeholder; every fetched dish gets one.
    pub rating: Option<Rating>,
}

impl Dish {
    /// The fixed record shown when nothing matches the current criteria.
    pub fn placeholder() -> Self {
        Self {
            name: "No Dish Found".to_string(),
            description: "Try a different search".to_string(),
            location: None,
            image_url: "https://via.placeholder.com/200".to_string(),
            rating: None,
        }
    }
}

#[test]
fn venue_parse_is_exact() {
    assert_eq!(Location::parse("Commons"), Some(Location::Commons));
    assert_eq!(Location::parse("commons"), None);
    assert_eq!(Location::parse("Peets "), None);
}

#[test]
fn everywhere_admits_unknown_venue() {
    assert!(LocationFilter::Everywhere.admits(None));
    assert!(!LocationFilter::At(Location::Peets).admits(None));
    assert!(LocationFilter::At(Location::Peets).admits(Some(Location::Peets)));
}

#[test]
fn rating_rejects_out_of_range() {
    assert!(Rating::from_half_stars(Rating::MAX_HALF_STARS).is_some());
    assert!(Rating::from_half_stars(11).is_none());
    assert_eq!(Rating::from_half_stars(7).unwrap().stars(), 3.5);
}
