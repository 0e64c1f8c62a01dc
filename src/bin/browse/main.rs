use knight_bites::data::{Location, LocationFilter};
use knight_bites::fetch::{fetch_dishes, FetchPropsBuilder, DEFAULT_ENDPOINT};
use knight_bites::rating::{synthesize_all, RandomRatings};
use knight_bites::session::BrowseSession;

// Usage: browse [search-text] [venue]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_max_level(tracing::Level::INFO)
        .with_ansi(true)
        .with_file(false)
        .pretty()
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("fail to setup logging");

    let endpoint =
        std::env::var("DISHES_ENDPOINT").unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string());

    let mut args = std::env::args().skip(1);
    let search = args.next().unwrap_or_default();
    let venue = match args.next() {
        None => LocationFilter::Everywhere,
        Some(raw) => match Location::parse(&raw) {
            Some(venue) => LocationFilter::At(venue),
            None => {
                tracing::warn!("unknown venue {raw:?}, showing everywhere");
                LocationFilter::Everywhere
            }
        },
    };

    let mut session = BrowseSession::new();
    session.set_search_text(search);
    session.set_location(venue);

    if session.begin_fetch() {
        let props = FetchPropsBuilder::default()
            .endpoint(endpoint)
            .build()
            .expect("fetch props are complete");
        let outcome = fetch_dishes(&props).await;
        session.apply_fetch(outcome.map(|raw| synthesize_all(raw, &mut RandomRatings::new())));
    }

    for dish in session.displayed().unwrap_or_default() {
        let venue = dish.location.map(|l| l.label()).unwrap_or("-");
        let stars = dish
            .rating
            .map(|r| r.to_string())
            .unwrap_or_else(|| "unrated".to_string());
        println!("{} [{venue}] {stars}", dish.name);
        println!("    {}", dish.description);
    }

    Ok(())
}
