//! Producer loop: pulls frames from the bus with a bounded wait, feeds the
//! aggregator, and publishes changed snapshots into the mailbox.
//!
//! Every failure stays inside the loop. A timeout or a driver error skips the
//! cycle; nothing is retried with backoff and consecutive timeouts are treated
//! exactly like the first one. Each cycle ends with a short delay to yield
//! the execution context.
use core::convert::Infallible;

use embassy_sync::blocking_mutex::raw::RawMutex;

use crate::error::AcquisitionError;
use crate::protocol::decode::decode_frame;
use crate::protocol::transport::can_frame::RawFrame;
use crate::protocol::transport::traits::dash_timer::DashTimer;
use crate::protocol::transport::traits::frame_sink::{FrameSink, NoMirror};
use crate::protocol::transport::traits::frame_source::{receive_frame, FrameSource};
use crate::protocol::transport::{ACQUISITION_YIELD_MS, FRAME_RECEIVE_TIMEOUT_MS};
use crate::telemetry::aggregator::SnapshotAggregator;
use crate::telemetry::mailbox::SnapshotPublisher;
use crate::telemetry::snapshot::VehicleSnapshot;

//==================================================================================CONFIG
/// Tuning of the acquisition loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AcquisitionConfig {
    /// Upper bound of a single frame wait (ms).
    pub receive_timeout_ms: u32,
    /// Delay at the end of each cycle (ms).
    pub yield_ms: u32,
    /// Re-send frames carrying a dashboard metric through the mirror sink.
    pub mirror_frames: bool,
}

impl Default for AcquisitionConfig {
    fn default() -> Self {
        Self {
            receive_timeout_ms: FRAME_RECEIVE_TIMEOUT_MS,
            yield_ms: ACQUISITION_YIELD_MS,
            mirror_frames: false,
        }
    }
}

impl AcquisitionConfig {
    pub fn with_receive_timeout_ms(mut self, millis: u32) -> Self {
        self.receive_timeout_ms = millis;
        self
    }

    pub fn with_yield_ms(mut self, millis: u32) -> Self {
        self.yield_ms = millis;
        self
    }

    pub fn with_mirroring(mut self, enabled: bool) -> Self {
        self.mirror_frames = enabled;
        self
    }
}

//==================================================================================OUTCOME
/// What a single acquisition cycle did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CycleOutcome {
    /// No frame within the receive bound; decoding skipped.
    TimedOut,
    /// The frame source failed; decoding skipped.
    BusError,
    /// A frame arrived but no snapshot decoder handles its identifier.
    Ignored,
    /// The frame was decoded but the snapshot did not change.
    Unchanged,
    /// The snapshot changed and was published.
    Published(VehicleSnapshot),
}

/// Wrapping counters describing the loop activity since start-up.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AcquisitionStats {
    pub frames: u32,
    pub timeouts: u32,
    pub bus_errors: u32,
    pub ignored: u32,
    pub unchanged: u32,
    pub published: u32,
    pub mirror_failures: u32,
}

//==================================================================================RUNNER
/// Runner that drives the acquisition loop.
pub struct AcquisitionRunner<'a, S, T, M, K = NoMirror>
where
    S: FrameSource,
    T: DashTimer,
    M: RawMutex,
    K: FrameSink,
{
    source: S,
    timer: T,
    mirror: K,
    publisher: SnapshotPublisher<'a, M>,
    aggregator: SnapshotAggregator,
    config: AcquisitionConfig,
    stats: AcquisitionStats,
}

impl<'a, S, T, M> AcquisitionRunner<'a, S, T, M, NoMirror>
where
    S: FrameSource,
    T: DashTimer,
    M: RawMutex,
{
    /// Build a runner without frame mirroring.
    pub fn new(
        source: S,
        timer: T,
        publisher: SnapshotPublisher<'a, M>,
        config: AcquisitionConfig,
    ) -> Self {
        Self {
            source,
            timer,
            mirror: NoMirror,
            publisher,
            aggregator: SnapshotAggregator::new(),
            config,
            stats: AcquisitionStats::default(),
        }
    }
}

impl<'a, S, T, M, K> AcquisitionRunner<'a, S, T, M, K>
where
    S: FrameSource,
    T: DashTimer,
    M: RawMutex,
    K: FrameSink,
{
    /// Attach a sink receiving a copy of every metric frame.
    ///
    /// Mirroring also has to be enabled in the [`AcquisitionConfig`].
    pub fn with_mirror<K2: FrameSink>(self, mirror: K2) -> AcquisitionRunner<'a, S, T, M, K2> {
        AcquisitionRunner {
            source: self.source,
            timer: self.timer,
            mirror,
            publisher: self.publisher,
            aggregator: self.aggregator,
            config: self.config,
            stats: self.stats,
        }
    }

    pub fn config(&self) -> &AcquisitionConfig {
        &self.config
    }

    pub fn stats(&self) -> &AcquisitionStats {
        &self.stats
    }

    pub fn aggregator(&self) -> &SnapshotAggregator {
        &self.aggregator
    }

    /// Run the loop for the lifetime of the process.
    pub async fn drive(mut self) -> Infallible {
        info!(
            "acquisition started: timeout {} ms, yield {} ms",
            self.config.receive_timeout_ms,
            self.config.yield_ms
        );
        loop {
            self.step().await;
        }
    }

    /// Run exactly one cycle, including the trailing yield.
    pub async fn step(&mut self) -> CycleOutcome {
        let outcome = self.acquire().await;
        self.timer.delay_ms(self.config.yield_ms).await;
        outcome
    }

    async fn acquire(&mut self) -> CycleOutcome {
        let received = receive_frame(
            &mut self.source,
            &mut self.timer,
            self.config.receive_timeout_ms,
        )
        .await;

        let frame = match received {
            Ok(frame) => frame,
            Err(AcquisitionError::Timeout) => {
                self.stats.timeouts = self.stats.timeouts.wrapping_add(1);
                warn!(
                    "no frame within {} ms, skipping cycle",
                    self.config.receive_timeout_ms
                );
                return CycleOutcome::TimedOut;
            }
            Err(AcquisitionError::Bus(_)) => {
                self.stats.bus_errors = self.stats.bus_errors.wrapping_add(1);
                error!("frame source error, skipping cycle");
                return CycleOutcome::BusError;
            }
        };
        self.stats.frames = self.stats.frames.wrapping_add(1);

        if self.config.mirror_frames && frame.metric().is_some() {
            self.mirror_frame(&frame).await;
        }

        let decoded = decode_frame(&frame);
        if decoded.is_empty() {
            self.stats.ignored = self.stats.ignored.wrapping_add(1);
            trace!("ignoring frame {:#x}", frame.id.raw());
            return CycleOutcome::Ignored;
        }

        match self.aggregator.ingest_decoded(&decoded) {
            Some(snapshot) => {
                self.publisher.publish(snapshot);
                self.stats.published = self.stats.published.wrapping_add(1);
                debug!(
                    "published rpm={} speed={} fuel={} temp={}",
                    snapshot.rpm(),
                    snapshot.speed(),
                    snapshot.fuel_percent(),
                    snapshot.coolant_temp()
                );
                CycleOutcome::Published(snapshot)
            }
            None => {
                self.stats.unchanged = self.stats.unchanged.wrapping_add(1);
                CycleOutcome::Unchanged
            }
        }
    }

    async fn mirror_frame(&mut self, frame: &RawFrame) {
        if self.mirror.send(frame).await.is_err() {
            self.stats.mirror_failures = self.stats.mirror_failures.wrapping_add(1);
            warn!("mirror send failed for frame {:#x}", frame.id.raw());
        }
    }
}
