use serenity::http::Http;
use std::sync::Arc;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::error::AppError;
use crate::service::ticket::queue::QueueDashboardService;
use crate::state::AppState;

/// Starts the queue dashboard scheduler.
///
/// The job runs every 15 seconds, recomputes the queue estimate from the
/// live channel listing, and refreshes the dashboard message. A failed tick
/// is logged and the next tick starts from scratch; the dashboard carries no
/// state worth recovering.
///
/// # Arguments
/// - `state`: Shared application state
/// - `discord_http`: Discord HTTP client for reading channels and editing the dashboard
pub async fn start_scheduler(
    state: Arc<AppState>,
    discord_http: Arc<Http>,
) -> Result<(), AppError> {
    let scheduler = JobScheduler::new().await?;

    // Clone resources for the job
    let job_state = state.clone();
    let job_http = discord_http.clone();

    // Schedule job to run every 15 seconds
    let job = Job::new_async("*/15 * * * * *", move |_uuid, _lock| {
        let state = job_state.clone();
        let http = job_http.clone();

        Box::pin(async move {
            let dashboard = QueueDashboardService::new(state, http);
            if let Err(e) = dashboard.refresh().await {
                tracing::error!("Error refreshing queue dashboard: {}", e);
            }
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    tracing::info!("Queue dashboard scheduler started");

    Ok(())
}
