use crate::data::{Dish, LocationFilter};
use crate::discover::{discover, FilterCriteria};
use crate::fetch::FetchError;

/// One activation of the browse screen: a single fetch, an immutable
/// dish snapshot, and the criteria the user is editing. Criteria live
/// and die with the session; nothing here is persisted.
#[derive(Debug, Default)]
pub struct BrowseSession {
    snapshot: Option<Vec<Dish>>,
    criteria: FilterCriteria,
    fetch_started: bool,
    disposed: bool,
}

impl BrowseSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hands out the session's single fetch ticket. False means a fetch
    /// was already started; the caller must not issue another one.
    pub fn begin_fetch(&mut self) -> bool {
        if self.fetch_started {
            return false;
        }
        self.fetch_started = true;
        true
    }

    /// Install the fetch outcome. A failed fetch ends the loading state
    /// with an empty snapshot; a result arriving after `dispose` is
    /// dropped instead of applied.
    pub fn apply_fetch(&mut self, outcome: Result<Vec<Dish>, FetchError>) {
        if self.disposed {
            tracing::debug!("dropping fetch result for a disposed session");
            return;
        }

        match outcome {
            Ok(dishes) => self.snapshot = Some(dishes),
            Err(e) => {
                tracing::error!("dish fetch failed: {e}");
                self.snapshot = Some(Vec::new());
            }
        }
    }

    pub fn dispose(&mut self) {
        self.disposed = true;
    }

    pub fn is_loading(&self) -> bool {
        self.snapshot.is_none() && !self.disposed
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn set_location(&mut self, filter: LocationFilter) {
        self.criteria.set_location(filter);
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.criteria.set_search_text(text);
    }

    /// The list to render, or None while the fetch is outstanding. The
    /// engine is only consulted once a snapshot exists; after that this
    /// may be called freely on every criteria change.
    pub fn displayed(&self) -> Option<Vec<Dish>> {
        let snapshot = self.snapshot.as_ref()?;
        Some(discover(snapshot, &self.criteria))
    }
}

#[cfg(test)]
mod tests {
    use crate::data::{Location, Rating};

    use super::*;

    fn dish(name: &str, location: Option<Location>) -> Dish {
        Dish {
            name: name.to_string(),
            description: String::new(),
            location,
            image_url: "https://placehold.co/400".to_string(),
            rating: Rating::from_half_stars(8),
        }
    }

    fn menu() -> Vec<Dish> {
        vec![
            dish("Burger", Some(Location::Commons)),
            dish("Burrito", Some(Location::Knollcrest)),
        ]
    }

    #[test]
    fn fetch_ticket_is_single_use() {
        let mut session = BrowseSession::new();
        assert!(session.begin_fetch());
        assert!(!session.begin_fetch());
    }

    #[test]
    fn loading_until_a_result_is_applied() {
        let mut session = BrowseSession::new();
        session.begin_fetch();
        assert!(session.is_loading());
        assert!(session.displayed().is_none());

        session.apply_fetch(Ok(menu()));
        assert!(!session.is_loading());
        assert_eq!(session.displayed().unwrap().len(), 2);
    }

    #[test]
    fn failed_fetch_degrades_to_placeholder() {
        let mut session = BrowseSession::new();
        session.begin_fetch();
        session.apply_fetch(Err(FetchError::BadStatus(
            reqwest::StatusCode::INTERNAL_SERVER_ERROR,
        )));

        assert!(!session.is_loading());
        assert_eq!(session.displayed().unwrap(), vec![Dish::placeholder()]);
    }

    #[test]
    fn late_result_after_dispose_is_discarded() {
        let mut session = BrowseSession::new();
        session.begin_fetch();
        session.dispose();

        session.apply_fetch(Ok(menu()));
        assert!(session.displayed().is_none());
        assert!(!session.is_loading());
    }

    #[test]
    fn criteria_changes_refilter_the_same_snapshot() {
        let mut session = BrowseSession::new();
        session.begin_fetch();
        session.apply_fetch(Ok(menu()));

        session.set_search_text("bur");
        assert_eq!(session.displayed().unwrap().len(), 2);

        session.set_location(LocationFilter::At(Location::Knollcrest));
        let shown = session.displayed().unwrap();
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].name, "Burrito");

        session.set_search_text("sushi");
        assert_eq!(session.displayed().unwrap(), vec![Dish::placeholder()]);
    }
}
