use anyhow::Context;
use storage::Database;
use utoipa::OpenApi;

mod config;
mod error;
mod features;
mod middleware;
mod routes;

use config::Config;
use features::{admin, events, leaderboard, picks, results, users};
use middleware::auth::ApiKeys;

#[derive(OpenApi)]
#[openapi(
    paths(
        routes::health,
        users::handlers::create_user,
        users::handlers::get_user,
        users::handlers::get_user_stats,
        users::handlers::list_user_picks,
        events::handlers::list_events,
        events::handlers::get_event,
        events::handlers::create_event,
        events::handlers::add_fight,
        events::handlers::deactivate_event,
        events::handlers::restore_event,
        results::handlers::submit_results,
        results::handlers::clear_result,
        picks::handlers::submit_picks,
        picks::handlers::get_pick_sheet,
        leaderboard::handlers::get_global_leaderboard,
        leaderboard::handlers::get_event_leaderboard,
        admin::handlers::recalculate_all_stats,
        admin::handlers::recalculate_user_stats,
        admin::handlers::rescore_event,
    ),
    components(
        schemas(
            storage::dto::user::CreateUserRequest,
            storage::dto::event::CreateEventRequest,
            storage::dto::event::CreateFightRequest,
            storage::dto::event::EventDetailResponse,
            storage::dto::event::FightCard,
            storage::dto::scoring::FightResultInput,
            storage::dto::scoring::SubmitResultsRequest,
            storage::dto::scoring::EventScoringSummary,
            storage::dto::scoring::RecalculationSummary,
            storage::dto::scoring::RecalculationFailure,
            storage::dto::scoring::EventActivationResponse,
            storage::dto::pick::PickDetailInput,
            storage::dto::pick::SubmitPicksRequest,
            storage::dto::pick::PickSheetResponse,
            storage::dto::pick::UserPickSummary,
            storage::dto::leaderboard::LeaderboardEntry,
            storage::dto::leaderboard::EventLeaderboardEntry,
            storage::dto::common::PaginationMeta,
            storage::models::User,
            storage::models::UserStats,
            storage::models::Event,
            storage::models::Fight,
            storage::models::FightResult,
            storage::models::Corner,
            storage::models::FinishMethod,
            storage::models::Pick,
            storage::models::PickDetail,
        )
    ),
    tags(
        (name = "health", description = "Liveness and database reachability"),
        (name = "users", description = "User registration, statistics and pick history"),
        (name = "events", description = "Event cards; creation and activation require an API key"),
        (name = "results", description = "Admin result entry that triggers re-scoring"),
        (name = "picks", description = "Pick sheet submission and retrieval"),
        (name = "leaderboard", description = "Global and per-event rankings"),
        (name = "admin", description = "Maintenance endpoints for stats and scoring"),
    ),
    modifiers(&SecurityAddon)
)]
struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("API Key")
                        .build(),
                ),
            )
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting fight picks API");

    let config = Config::from_env().context("Failed to load API configuration")?;
    tracing::info!("Configuration loaded successfully");

    tracing::info!(
        "Connecting to database at: {}",
        config
            .database_url
            .split('@')
            .next_back()
            .unwrap_or("unknown")
    );
    let db = Database::with_max_connections(&config.database_url, config.database_max_connections)
        .await
        .context("Failed to initialize database")?;
    tracing::info!("Database connection established");

    tracing::info!("Running database migrations");
    db.run_migrations()
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Database migrations completed successfully");

    let api_keys = ApiKeys::from_comma_separated(&config.api_keys);
    if api_keys.is_empty() {
        tracing::warn!("API_KEYS is empty; every admin endpoint will reject requests");
    }

    let bind_address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;

    tracing::info!("Starting server at http://{}", bind_address);
    tracing::info!(
        "Swagger UI available at http://{}/swagger-ui/",
        bind_address
    );

    axum::serve(listener, routes::router(db, api_keys))
        .await
        .context("Server error")?;

    Ok(())
}
