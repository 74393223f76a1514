use clap::{Parser, Subcommand};
use sqlx::postgres::PgPoolOptions;
use storage::{
    repository::event::EventRepository,
    services::{event_scoring, stats_computation},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "picks-admin")]
#[command(about = "Fight picks scoring and statistics maintenance", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, env = "DATABASE_URL")]
    database_url: String,

    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Rebuild user statistics from scored picks on active events
    RecalculateStats {
        /// Only rebuild this user's statistics
        #[arg(long)]
        user_id: Option<Uuid>,
    },
    /// Re-score every submitted pick of an event against its stored results
    RescoreEvent { slug: String },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("picks_admin={},storage={}", log_level, log_level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&cli.database_url)
        .await?;

    match cli.command {
        Commands::RecalculateStats { user_id: Some(user_id) } => {
            let stats = stats_computation::recalculate_user_stats(&pool, user_id).await?;
            tracing::info!(
                "User {}: {} points over {} events, accuracy {}%, streak {} (best {})",
                user_id,
                stats.total_points,
                stats.events_participated,
                stats.average_accuracy,
                stats.current_streak,
                stats.longest_streak
            );
        }
        Commands::RecalculateStats { user_id: None } => {
            let summary = stats_computation::recalculate_all_user_stats(&pool).await?;
            for failure in &summary.failed {
                tracing::error!("User {} failed: {}", failure.user_id, failure.error);
            }
            if !summary.failed.is_empty() {
                return Err(format!(
                    "{} of {} users could not be recalculated",
                    summary.failed.len(),
                    summary.processed
                )
                .into());
            }
        }
        Commands::RescoreEvent { slug } => {
            let event = EventRepository::new(&pool).find_by_slug(&slug).await?;
            let summary = event_scoring::rescore_event(&pool, event.event_id).await?;
            tracing::info!(
                "Event {}: {} picks re-scored, {} details scored, {} pending, {} users recalculated",
                slug,
                summary.picks_rescored,
                summary.details_scored,
                summary.details_pending,
                summary.users_recalculated
            );
        }
    }

    Ok(())
}
