//! Background sweep of expired sessions
//!
//! Runs `SessionService::sweep_expired` on a fixed period until shut down.
//! A failed tick is logged and the next tick tries again.

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use super::context::ServiceContext;
use super::session::SessionService;

/// Handle to a running sweeper task
#[derive(Debug)]
pub struct SessionSweeper {
    shutdown: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl SessionSweeper {
    /// Spawn the sweeper using the context's sweep interval
    pub fn spawn(ctx: ServiceContext) -> Self {
        let (shutdown, mut stop) = watch::channel(false);
        let period = ctx.session_config().sweep_interval();

        let handle = tokio::spawn(async move {
            info!(interval_secs = period.as_secs(), "Session sweeper started");

            // First tick fires immediately
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        match SessionService::new(&ctx).sweep_expired().await {
                            Ok(removed) => debug!(removed, "Session sweep tick"),
                            Err(e) => warn!(error = %e, "Session sweep failed"),
                        }
                    }
                    _ = stop.changed() => break,
                }
            }

            info!("Session sweeper stopped");
        });

        Self { shutdown, handle }
    }

    /// Stop the sweeper and wait for the in-flight tick to finish
    pub async fn shutdown(self) {
        let _ = self.shutdown.send(true);
        if let Err(e) = self.handle.await {
            warn!(error = %e, "Session sweeper task ended abnormally");
        }
    }
}
