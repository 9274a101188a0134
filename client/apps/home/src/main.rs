//! Home Page Entry Point
//!
//! Interactive composition of the like engine: reads taps from stdin,
//! collapses them into double activations, drives the like flow against
//! the configured backend, and prints count updates as the realtime feed
//! folds them in. Uses `anyhow` for startup errors; engine-level failures
//! surface as structured outcomes, never as crashes.

use std::env;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use gesture::animation::AnimationTimer;
use gesture::driver::GestureDriver;
use gesture::recognizer::{TapOutcome, TapSource};
use kernel::id::{ImageId, VisitorId};
use likes::domain::repository::LikeApi;
use likes::domain::services::{ceil_remaining_seconds, format_remaining};
use likes::domain::unlock;
use likes::{
    ChannelLikeFeed, CooldownTracker, FeaturedImage, HttpLikeApi, LikeConfig, LikeCounter,
    LikeOutcome, MemoryBackend, VisitorIdentity,
};
use platform::clock::SystemClock;
use platform::storage::FileStore;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DOUBLE_TAP_WINDOW: Duration = Duration::from_millis(300);
const NEIGHBOR_PERIOD: Duration = Duration::from_secs(20);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "home=info,likes=info,gesture=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Arc::new(LikeConfig::default());
    let clock = Arc::new(SystemClock);

    // Profile-local state (visitor id, last like timestamp)
    let state_path = env::var("STATE_PATH").unwrap_or_else(|_| ".coop_state.json".to_string());
    let store = Arc::new(FileStore::open(&state_path).context("opening local state")?);

    let identity = VisitorIdentity::new(store.clone(), config.clone());
    let visitor_id = identity.get_or_create();
    let tracker = CooldownTracker::new(store.clone(), clock.clone(), config.clone());

    let feed = Arc::new(ChannelLikeFeed::new());

    // Managed backend when configured, in-memory development authority
    // otherwise
    match (env::var("BACKEND_URL"), env::var("BACKEND_ANON_KEY")) {
        (Ok(url), Ok(anon_key)) => {
            tracing::info!(backend = %url, "Using managed backend");
            let api = Arc::new(HttpLikeApi::new(url, anon_key)?);
            run(api, feed, clock, tracker, visitor_id).await
        }
        _ => {
            tracing::info!("BACKEND_URL not set, using in-memory development backend");
            let api = Arc::new(
                MemoryBackend::new(clock.clone(), &config).with_feed((*feed).clone()),
            );

            let image_id = ImageId::new();
            api.set_featured(FeaturedImage {
                id: image_id,
                url: "https://example.com/chick-of-the-day.jpg".to_string(),
                title: Some("Chick of the day".to_string()),
                is_ai_generated: false,
            });
            api.seed_likes(image_id, 5);
            spawn_neighbor(api.clone(), image_id);

            run(api, feed, clock, tracker, visitor_id).await
        }
    }
}

/// Background visitor that likes periodically, so the realtime fold is
/// observable in development mode
fn spawn_neighbor(api: Arc<MemoryBackend<SystemClock>>, image_id: ImageId) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(NEIGHBOR_PERIOD);
        ticker.tick().await;
        loop {
            ticker.tick().await;
            if let Err(e) = api.submit_like(image_id, VisitorId::new()).await {
                tracing::warn!(error = %e, "Neighbor like failed");
            }
        }
    });
}

async fn run<A>(
    api: Arc<A>,
    feed: Arc<ChannelLikeFeed>,
    clock: Arc<SystemClock>,
    tracker: CooldownTracker<FileStore, SystemClock>,
    visitor_id: VisitorId,
) -> anyhow::Result<()>
where
    A: LikeApi + Send + Sync + 'static,
{
    let featured = match api.featured_image().await {
        Ok(Some(image)) => image,
        Ok(None) => {
            println!("No image is curated yet. Come back later!");
            return Ok(());
        }
        Err(e) => {
            tracing::warn!(error = %e, "Featured image fetch failed");
            println!("The backend is unreachable right now.");
            return Ok(());
        }
    };

    println!("Now showing: {}", featured.display_title());
    println!("{}", featured.url);
    print_unlock_progress(api.as_ref()).await;

    let counter = LikeCounter::new(api, feed);
    let board = counter.attach(featured.id, visitor_id).await;
    println!("likes: {}", board.count());

    // Print every count change the feed folds in
    let mut watch_rx = board.watch();
    tokio::spawn(async move {
        while watch_rx.changed().await.is_ok() {
            let count = watch_rx.borrow().count;
            println!("likes: {}", count);
        }
    });

    let driver = GestureDriver::new(clock, DOUBLE_TAP_WINDOW);
    let animation = AnimationTimer::default();

    println!("t = touch tap, c = click tap, s = status, q = quit");
    println!("Double-tap to like!");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let source = match line.trim() {
            "t" => TapSource::Touch,
            "c" => TapSource::Click,
            "s" => {
                print_status(&board.readout(), &tracker);
                continue;
            }
            "q" => break,
            "" => continue,
            other => {
                println!("unknown command: {}", other);
                continue;
            }
        };

        if driver.tap(source) != TapOutcome::Double {
            continue;
        }

        match board.like().await {
            LikeOutcome::Accepted { count } => {
                tracker.record_success();
                println!("liked! ({})", count);
                tokio::spawn(clear_feedback(animation.play()));
            }
            LikeOutcome::CoolingDown { remaining_seconds } => {
                println!(
                    "Hold on! You can like again in {}",
                    format_remaining(remaining_seconds)
                );
            }
            LikeOutcome::Failed { reason } => {
                println!("The like did not go through: {}", reason);
            }
        }
    }

    board.release();
    Ok(())
}

/// Wait out one animation run and tell the user it cleared
async fn clear_feedback(mut handle: gesture::animation::AnimationHandle) {
    handle.finished().await;
    if handle.is_done() {
        println!("(heart faded)");
    }
}

async fn print_unlock_progress<A>(api: &A)
where
    A: LikeApi + Send + Sync,
{
    let total = match api.total_likes().await {
        Ok(total) => total,
        Err(e) => {
            tracing::warn!(error = %e, "Total likes fetch failed");
            0
        }
    };

    match unlock::next_locked(total) {
        Some(character) => println!(
            "{} more likes unlock \"{}\"",
            character.unlock_threshold - total,
            character.label
        ),
        None => println!("Every character is unlocked!"),
    }
}

fn print_status(
    readout: &likes::LikeReadout,
    tracker: &CooldownTracker<FileStore, SystemClock>,
) {
    let cooldown = tracker.status();
    if cooldown.eligible {
        println!("likes: {} | ready to like", readout.count);
    } else {
        println!(
            "likes: {} | cooldown: {}",
            readout.count,
            format_remaining(ceil_remaining_seconds(cooldown.remaining_ms))
        );
    }
}
