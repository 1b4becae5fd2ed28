//! Consumer loop: waits on the mailbox with a bound, hands fresh snapshots to
//! the renderer, and reports starvation as staleness.
//!
//! The renderer owns its toolkit state and whatever lock protects it; this
//! loop only decides *what* to show.
use core::convert::Infallible;

use embassy_sync::blocking_mutex::raw::RawMutex;

use crate::error::RecvError;
use crate::protocol::transport::traits::dash_timer::DashTimer;
use crate::protocol::transport::DISPLAY_RECEIVE_TIMEOUT_MS;
use crate::telemetry::mailbox::SnapshotReceiver;
use crate::telemetry::snapshot::VehicleSnapshot;

/// Rendering collaborator driven by [`DisplayRunner`].
pub trait Dashboard {
    /// Show a snapshot that differs from the previously rendered one.
    fn render(&mut self, snapshot: &VehicleSnapshot);
    /// No snapshot arrived within the display bound.
    ///
    /// Called once per starvation episode, not once per timeout.
    fn mark_stale(&mut self);
}

/// Tuning of the display loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayConfig {
    /// Upper bound of a single snapshot wait (ms).
    pub receive_timeout_ms: u32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            receive_timeout_ms: DISPLAY_RECEIVE_TIMEOUT_MS,
        }
    }
}

impl DisplayConfig {
    pub fn with_receive_timeout_ms(mut self, millis: u32) -> Self {
        self.receive_timeout_ms = millis;
        self
    }
}

/// What a single display cycle did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayOutcome {
    Rendered(VehicleSnapshot),
    /// First timeout after fresh data: the dashboard was told.
    BecameStale,
    /// Another timeout while already stale.
    StillStale,
}

/// Runner that drives the display loop.
pub struct DisplayRunner<'a, D, T, M>
where
    D: Dashboard,
    T: DashTimer,
    M: RawMutex,
{
    receiver: SnapshotReceiver<'a, M>,
    timer: T,
    dashboard: D,
    config: DisplayConfig,
    stale: bool,
}

impl<'a, D, T, M> DisplayRunner<'a, D, T, M>
where
    D: Dashboard,
    T: DashTimer,
    M: RawMutex,
{
    pub fn new(
        receiver: SnapshotReceiver<'a, M>,
        timer: T,
        dashboard: D,
        config: DisplayConfig,
    ) -> Self {
        Self {
            receiver,
            timer,
            dashboard,
            config,
            stale: false,
        }
    }

    pub fn dashboard(&self) -> &D {
        &self.dashboard
    }

    pub fn is_stale(&self) -> bool {
        self.stale
    }

    /// Run the loop for the lifetime of the process.
    pub async fn drive(mut self) -> Infallible {
        loop {
            self.step().await;
        }
    }

    /// Wait for one fresh snapshot, or one timeout.
    pub async fn step(&mut self) -> DisplayOutcome {
        match self
            .receiver
            .changed(&mut self.timer, self.config.receive_timeout_ms)
            .await
        {
            Ok(snapshot) => {
                if self.stale {
                    info!("snapshot stream resumed");
                }
                self.stale = false;
                self.dashboard.render(&snapshot);
                DisplayOutcome::Rendered(snapshot)
            }
            Err(RecvError::TimedOut) if self.stale => DisplayOutcome::StillStale,
            Err(RecvError::TimedOut) => {
                warn!(
                    "no snapshot within {} ms, display is stale",
                    self.config.receive_timeout_ms
                );
                self.stale = true;
                self.dashboard.mark_stale();
                DisplayOutcome::BecameStale
            }
        }
    }
}
