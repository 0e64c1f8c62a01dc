use derive_builder::Builder;

use crate::data::{Dish, LocationFilter};

/// The user's current restriction: one venue (or everywhere) plus a
/// free-text needle matched against dish names.
#[derive(Builder, Debug, Clone, Default, PartialEq)]
#[builder(default)]
pub struct FilterCriteria {
    location: LocationFilter,
    #[builder(setter(into))]
    search_text: String,
}

impl FilterCriteria {
    pub fn location(&self) -> LocationFilter {
        self.location
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn set_location(&mut self, filter: LocationFilter) {
        self.location = filter;
    }

    /// Any string is accepted verbatim, empty included.
    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.search_text = text.into();
    }
}

/// Apply `criteria` to the session snapshot and produce the list to
/// display. Pure and order-preserving; an empty match set comes back as
/// the one-element placeholder list, never as nothing.
pub fn discover(dishes: &[Dish], criteria: &FilterCriteria) -> Vec<Dish> {
    let needle = criteria.search_text.to_lowercase();

    let matches: Vec<Dish> = dishes
        .iter()
        .filter(|dish| {
            criteria.location.admits(dish.location) && dish.name.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect();

    if matches.is_empty() {
        vec![Dish::placeholder()]
    } else {
        matches
    }
}

#[cfg(test)]
use crate::data::{Location, Rating};

#[cfg(test)]
fn dish(name: &str, location: Option<Location>) -> Dish {
    Dish {
        name: name.to_string(),
        description: String::new(),
        location,
        image_url: "https://placehold.co/400".to_string(),
        rating: Rating::from_half_stars(6),
    }
}

#[cfg(test)]
fn menu() -> Vec<Dish> {
    vec![
        dish("Burger", Some(Location::Commons)),
        dish("Burrito", Some(Location::Knollcrest)),
    ]
}

#[test]
fn unfiltered_criteria_is_identity() {
    let menu = menu();
    assert_eq!(discover(&menu, &FilterCriteria::default()), menu);
}

#[test]
fn empty_snapshot_yields_placeholder() {
    let shown = discover(&[], &FilterCriteria::default());
    assert_eq!(shown, vec![Dish::placeholder()]);
}

#[test]
fn search_matches_substring_in_original_order() {
    let criteria = FilterCriteriaBuilder::default()
        .search_text("bur")
        .build()
        .unwrap();

    let shown = discover(&menu(), &criteria);
    let names: Vec<&str> = shown.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, ["Burger", "Burrito"]);
}

#[test]
fn search_is_case_insensitive() {
    let shouting = FilterCriteriaBuilder::default()
        .search_text("BURRITO")
        .build()
        .unwrap();
    let quiet = FilterCriteriaBuilder::default()
        .search_text("burrito")
        .build()
        .unwrap();

    let menu = menu();
    assert_eq!(discover(&menu, &shouting), discover(&menu, &quiet));
    assert_eq!(discover(&menu, &shouting)[0].name, "Burrito");
}

#[test]
fn venue_filter_selects_exactly_that_venue() {
    let criteria = FilterCriteriaBuilder::default()
        .location(LocationFilter::At(Location::Commons))
        .build()
        .unwrap();

    let shown = discover(&menu(), &criteria);
    assert_eq!(shown.len(), 1);
    assert_eq!(shown[0].name, "Burger");
}

#[test]
fn unmatched_venue_yields_placeholder() {
    let criteria = FilterCriteriaBuilder::default()
        .location(LocationFilter::At(Location::Peets))
        .build()
        .unwrap();

    assert_eq!(discover(&menu(), &criteria), vec![Dish::placeholder()]);
}

#[test]
fn venue_and_search_combine() {
    let criteria = FilterCriteriaBuilder::default()
        .location(LocationFilter::At(Location::Commons))
        .search_text("bur")
        .build()
        .unwrap();

    let shown = discover(&menu(), &criteria);
    assert_eq!(shown.len(), 1);
    assert_eq!(shown[0].name, "Burger");
}

#[test]
fn result_is_a_stable_subsequence() {
    let mut menu = menu();
    menu.push(dish("Pizza", Some(Location::Commons)));
    menu.push(dish("Breadsticks", None));

    let criteria = FilterCriteriaBuilder::default()
        .search_text("r")
        .build()
        .unwrap();
    let shown = discover(&menu, &criteria);

    assert!(shown.len() <= menu.len());
    let mut rest = menu.iter();
    for kept in &shown {
        assert!(
            rest.any(|d| d == kept),
            "reordered or invented dish: {}",
            kept.name
        );
    }
}

#[test]
fn discovery_is_idempotent() {
    let menu = menu();
    let criteria = FilterCriteriaBuilder::default()
        .search_text("bur")
        .build()
        .unwrap();

    assert_eq!(discover(&menu, &criteria), discover(&menu, &criteria));
}

#[test]
fn mutators_accept_anything_verbatim() {
    let mut criteria = FilterCriteria::default();

    criteria.set_search_text("  Déjà vu!  ");
    assert_eq!(criteria.search_text(), "  Déjà vu!  ");

    criteria.set_location(LocationFilter::At(Location::Peets));
    assert_eq!(criteria.location(), LocationFilter::At(Location::Peets));

    criteria.set_search_text("");
    assert_eq!(criteria.search_text(), "");
}
