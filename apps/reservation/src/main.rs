//! Reservation client demo
//!
//! Runs the search page and the reservation form against the configured
//! backend and prints what each page would render.
//!
//! ```text
//! showtime-reservation [QUERY] [NAME] [EMAIL]
//! ```

use anyhow::Context;
use reservation::{
    Config, FOOTER, FieldValue, FormAction, FormReducer, FormState, HistoryNavigator, HttpMovieApi,
    Navigator, ProductionEnvironment, Route, SearchAction, SearchReducer, SearchState,
    SessionContext, Theater, render_form, render_search, schema,
};
use showtime_core::environment::SystemClock;
use showtime_runtime::Store;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::from_env().context("invalid configuration")?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut args = std::env::args().skip(1);
    let query = args.next().unwrap_or_default();
    let name = args.next().unwrap_or_else(|| "Guest".to_string());
    let email = args.next().unwrap_or_else(|| "guest@example.com".to_string());

    tracing::info!(api = %config.api.base_url, "Starting reservation client");

    let api = HttpMovieApi::from_config(&config.api).context("failed to build HTTP client")?;
    let navigator = HistoryNavigator::new();
    let env = ProductionEnvironment::new(Arc::new(api), Arc::new(navigator.clone()))
        .with_schema_options(config.schema);

    // ========== Search page ==========

    navigator.navigate(Route::Search { query: query.clone() });
    println!("=== Search: {query:?} ===\n");
    let search = Store::new(SearchState::new(), SearchReducer::new(), env.clone());
    search
        .send(SearchAction::Load { query: query.clone() })
        .await?
        .wait()
        .await;
    let page = search.state(Clone::clone).await;
    println!("{}\n", render_search(&page));

    // ========== Reservation page ==========

    navigator.navigate(Route::Reservation);
    let form = Store::new(FormState::new(&SessionContext::from_env()), FormReducer::new(), env);

    // Follow the submit control the way a renderer would
    let mut snapshots = form.subscribe_state();
    let follower = tokio::spawn(async move {
        let mut last = String::new();
        while snapshots.changed().await.is_ok() {
            let label = render_form(&snapshots.borrow_and_update()).submit.label.to_string();
            if label != last {
                tracing::debug!(%label, "Submit control changed");
                last = label;
            }
        }
    });

    form.send(FormAction::Mount).await?.wait().await;
    println!("{}\n", render_form(&form.state(Clone::clone).await));

    let first_title = form
        .state(|s| s.catalog().movies().and_then(|m| m.first()).map(|m| m.title.clone()))
        .await;
    let today = schema::today_input(&SystemClock);

    let mut edits = vec![
        FieldValue::Name(name),
        FieldValue::Email(email),
        FieldValue::Date(today),
        FieldValue::Time("19:00".to_string()),
        FieldValue::Theater(Theater::One.as_str().to_string()),
        FieldValue::TermsAndConditions(true),
    ];
    if let Some(title) = first_title {
        edits.push(FieldValue::MovieTitle(title));
    }
    for edit in edits {
        form.send(FormAction::FieldChanged(edit)).await?;
    }

    println!(">>> Submitting\n");
    form.send(FormAction::Submit)
        .await?
        .wait_with_timeout(Duration::from_secs(config.api.timeout_secs + 5))
        .await?;

    let state = form.state(Clone::clone).await;
    println!("{}\n", render_form(&state));
    match (state.route(), state.last_failure()) {
        (Some(route), _) => println!("Reservation done, now at {route}"),
        (None, Some(_)) => println!("Reservation was not accepted"),
        (None, None) => println!("Reservation blocked by validation ({} errors)", state.errors().len()),
    }
    tracing::debug!(history = ?navigator.history(), "Navigation history");

    println!("\n{FOOTER}");

    form.shutdown(Duration::from_secs(5)).await?;
    search.shutdown(Duration::from_secs(5)).await?;
    follower.abort();

    Ok(())
}
