//! Background job scheduler.
//!
//! Registers the recurring stock reconciliation job at server startup. A
//! failed run is logged and the next run starts clean; reconciliation holds
//! no cross-run state beyond the shared catalog cache.

use std::sync::Arc;
use std::time::Duration;

use tokio_cron_scheduler::{Job, JobScheduler, JobSchedulerError};

use dropbridge_storefront::StorefrontClient;
use dropbridge_supplier::catalog::CatalogCache;
use dropbridge_supplier::client::SupplierClient;

/// Builds and starts the background job scheduler.
///
/// Returns the running [`JobScheduler`] handle, which must be kept alive for
/// the lifetime of the process. Dropping it shuts down all scheduled jobs.
///
/// # Errors
///
/// Returns [`JobSchedulerError`] if the scheduler cannot be initialised,
/// the job cannot be registered, or the scheduler fails to start.
pub async fn build_scheduler(
    supplier: Arc<SupplierClient>,
    storefront: Arc<StorefrontClient>,
    cache: Arc<CatalogCache>,
    interval_secs: u64,
) -> Result<JobScheduler, JobSchedulerError> {
    let scheduler = JobScheduler::new().await?;
    register_reconcile_job(&scheduler, supplier, storefront, cache, interval_secs).await?;
    scheduler.start().await?;
    Ok(scheduler)
}

/// Register the recurring stock reconciliation job.
async fn register_reconcile_job(
    scheduler: &JobScheduler,
    supplier: Arc<SupplierClient>,
    storefront: Arc<StorefrontClient>,
    cache: Arc<CatalogCache>,
    interval_secs: u64,
) -> Result<(), JobSchedulerError> {
    let job = Job::new_repeated_async(
        Duration::from_secs(interval_secs.max(1)),
        move |_uuid, _lock| {
            let supplier = Arc::clone(&supplier);
            let storefront = Arc::clone(&storefront);
            let cache = Arc::clone(&cache);

            Box::pin(async move {
                tracing::info!("scheduler: starting stock reconciliation run");
                match dropbridge_sync::reconcile(&supplier, &storefront, &cache).await {
                    Ok(updated) => {
                        tracing::info!(updated, "scheduler: stock reconciliation run complete");
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "scheduler: stock reconciliation run failed");
                    }
                }
            })
        },
    )?;

    scheduler.add(job).await?;
    tracing::info!(interval_secs, "scheduler: registered stock reconciliation job");
    Ok(())
}
