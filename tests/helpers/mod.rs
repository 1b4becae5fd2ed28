/// Test doubles to simulate the vehicle bus, the timer and the renderer
/// during integration tests.
use canbus_dash::protocol::transport::{
    can_frame::RawFrame,
    can_id::FrameId,
    traits::{dash_timer::DashTimer, frame_sink::FrameSink, frame_source::FrameSource},
};
use canbus_dash::telemetry::display::Dashboard;
use canbus_dash::telemetry::snapshot::VehicleSnapshot;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::time::{sleep, Duration};

#[allow(dead_code)]
/// Build a frame from a raw identifier and a full payload.
pub fn frame(id: u16, data: [u8; 8]) -> RawFrame {
    RawFrame::new(FrameId::new(id).expect("valid id"), &data).expect("frame must build")
}

#[allow(dead_code)]
/// Snapshot fields as a tuple: (rpm, speed, fuel, coolant).
pub fn metrics(snapshot: &VehicleSnapshot) -> (u16, u8, u8, i16) {
    (
        snapshot.rpm(),
        snapshot.speed(),
        snapshot.fuel_percent(),
        snapshot.coolant_temp(),
    )
}

//==================================================================================SOURCE
#[derive(Clone, Debug)]
#[allow(dead_code)]
/// One scripted bus event.
pub enum Step {
    /// Deliver this frame immediately.
    Frame(RawFrame),
    /// Deliver nothing: the receive wait runs into its timeout.
    Silence,
    /// Report a driver failure.
    Fault,
}

#[derive(Debug, PartialEq, Eq)]
/// Error raised by [`ScriptedSource`] on [`Step::Fault`].
pub struct BusFault;

/// Frame source replaying a fixed script, then staying silent.
pub struct ScriptedSource {
    steps: VecDeque<Step>,
}

#[allow(dead_code)]
impl ScriptedSource {
    pub fn new(steps: impl IntoIterator<Item = Step>) -> Self {
        Self {
            steps: steps.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.steps.len()
    }
}

impl FrameSource for ScriptedSource {
    type Error = BusFault;

    async fn recv(&mut self) -> Result<RawFrame, Self::Error> {
        match self.steps.pop_front() {
            Some(Step::Frame(frame)) => Ok(frame),
            Some(Step::Fault) => Err(BusFault),
            Some(Step::Silence) | None => std::future::pending().await,
        }
    }
}

//==================================================================================TIMER
#[derive(Clone, Copy, Default)]
/// Timer based on `tokio::time::sleep`; pairs with a paused test clock.
pub struct TokioTimer;

impl DashTimer for TokioTimer {
    async fn delay_ms(&mut self, millis: u32) {
        sleep(Duration::from_millis(millis as u64)).await;
    }
}

//==================================================================================SINK
#[derive(Clone, Default)]
#[allow(dead_code)]
/// Sink recording mirrored frames, optionally failing every send.
pub struct RecordingSink {
    pub frames: Arc<Mutex<Vec<RawFrame>>>,
    pub fail: bool,
}

impl FrameSink for RecordingSink {
    type Error = BusFault;

    async fn send<'a>(&'a mut self, frame: &'a RawFrame) -> Result<(), Self::Error> {
        if self.fail {
            return Err(BusFault);
        }
        self.frames.lock().expect("sink lock").push(*frame);
        Ok(())
    }
}

//==================================================================================DASHBOARD
#[derive(Default)]
#[allow(dead_code)]
/// Renderer double remembering what it was asked to show.
pub struct RecordingDashboard {
    pub rendered: Vec<VehicleSnapshot>,
    pub stale_marks: usize,
}

impl Dashboard for RecordingDashboard {
    fn render(&mut self, snapshot: &VehicleSnapshot) {
        self.rendered.push(*snapshot);
    }

    fn mark_stale(&mut self) {
        self.stale_marks += 1;
    }
}
