use rand::Rng;

use crate::data::{Dish, Location, Rating, RawDish};

/// Where display ratings come from. The feed carries none, so a source
/// produces one per dish at fetch time.
pub trait RatingSource {
    fn rating_for(&mut self, raw: &RawDish) -> Rating;
}

/// Uniform over the eleven half-star levels, independent per dish.
/// Ratings are synthetic: a re-fetch rolls fresh ones.
pub struct RandomRatings<R: Rng> {
    rng: R,
}

impl RandomRatings<rand::rngs::ThreadRng> {
    pub fn new() -> Self {
        Self {
            rng: rand::thread_rng(),
        }
    }
}

impl<R: Rng> RandomRatings<R> {
    /// Caller-supplied RNG, for seeded runs.
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> RatingSource for RandomRatings<R> {
    fn rating_for(&mut self, _raw: &RawDish) -> Rating {
        let half_stars = self.rng.gen_range(0..=Rating::MAX_HALF_STARS);
        Rating::from_half_stars(half_stars).expect("gen_range stays in half-star range")
    }
}

/// Same rating for every dish. For tests.
pub struct FixedRatings(pub Rating);

impl RatingSource for FixedRatings {
    fn rating_for(&mut self, _raw: &RawDish) -> Rating {
        self.0
    }
}

/// Attach a rating and resolve the venue string against the known set;
/// every other field passes through unchanged.
pub fn synthesize(raw: RawDish, source: &mut dyn RatingSource) -> Dish {
    let rating = source.rating_for(&raw);
    let location = Location::parse(&raw.location);
    Dish {
        name: raw.name,
        description: raw.description,
        location,
        image_url: raw.image_url,
        rating: Some(rating),
    }
}

pub fn synthesize_all(raw: Vec<RawDish>, source: &mut dyn RatingSource) -> Vec<Dish> {
    raw.into_iter().map(|r| synthesize(r, source)).collect()
}

#[cfg(test)]
fn raw(name: &str, location: &str) -> RawDish {
    RawDish {
        name: name.to_string(),
        description: "tasty".to_string(),
        location: location.to_string(),
        image_url: "https://placehold.co/400".to_string(),
    }
}

#[test]
fn synthesized_ratings_are_uniform_half_stars() {
    use rand::SeedableRng;

    let mut source = RandomRatings::with_rng(rand::rngs::StdRng::seed_from_u64(7));
    let dish = raw("Burger", "Commons");

    let mut counts = [0u32; 11];
    for _ in 0..10_000 {
        counts[source.rating_for(&dish).half_stars() as usize] += 1;
    }

    // ~909 expected per level
    for count in counts {
        assert!((600..=1300).contains(&count), "skewed level count: {count}");
    }
}

#[test]
fn synthesis_passes_fields_through() {
    let mut source = FixedRatings(Rating::from_half_stars(7).unwrap());

    let dish = synthesize(raw("Burger", "Commons"), &mut source);
    assert_eq!(dish.name, "Burger");
    assert_eq!(dish.description, "tasty");
    assert_eq!(dish.location, Some(Location::Commons));
    assert_eq!(dish.rating, Rating::from_half_stars(7));
}

#[test]
fn unknown_venue_resolves_to_none() {
    let mut source = FixedRatings(Rating::from_half_stars(4).unwrap());

    let dish = synthesize(raw("Tacos", "FoodTruck"), &mut source);
    assert_eq!(dish.location, None);
}
