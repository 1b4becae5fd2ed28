//! # Dashboard Simulation
//!
//! Runs the whole pipeline on a desktop:
//! - a simulated bus ramps engine speed, vehicle speed, fuel and coolant
//! - the acquisition task decodes and publishes changed snapshots
//! - the display task prints gauge positions
//!
//! ```bash
//! cargo run --example dashboard_sim
//! ```

use canbus_dash::protocol::transport::{
    can_frame::RawFrame,
    can_id::MetricId,
    traits::{dash_timer::DashTimer, frame_source::FrameSource},
};
use canbus_dash::telemetry::{
    acquisition::{AcquisitionConfig, AcquisitionRunner},
    display::{Dashboard, DisplayConfig, DisplayRunner},
    gauge::Gauge,
    mailbox::DashMailbox,
    snapshot::VehicleSnapshot,
};
use tokio::time::{sleep, Duration};

// ============================================================================
// Simulated bus
// ============================================================================

/// Emits the three metric frames in turn, every 20 ms, with slowly rising values.
struct SimulatedBus {
    tick: u32,
}

impl FrameSource for SimulatedBus {
    type Error = core::convert::Infallible;

    async fn recv(&mut self) -> Result<RawFrame, Self::Error> {
        sleep(Duration::from_millis(20)).await;
        self.tick += 1;
        let t = self.tick;

        let (metric, data) = match t % 3 {
            0 => {
                // data[5] counter, data[4] fine part
                let hi = ((t / 3) % 220) as u8;
                (MetricId::Torque3, [0, 0, 0, 0, 0, hi, 0, 0])
            }
            1 => {
                let kmh = ((t / 3) % 120) as u8;
                (MetricId::Speed, [kmh, 0, 0, 0, 0, 0, 0, 0])
            }
            _ => {
                let coolant = (48 + (t / 6).min(90)) as u8;
                let fuel = 255u32.saturating_sub(t / 4) as u8;
                (MetricId::EngineData, [coolant, 0, 0, fuel, 0, 0, 0, 0])
            }
        };

        // Identifiers from `MetricId` are always valid and the payload is 8 bytes.
        Ok(RawFrame {
            id: metric.id(),
            data,
            len: 8,
        })
    }
}

// ============================================================================
// Timer and console dashboard
// ============================================================================

struct TokioTimer;

impl DashTimer for TokioTimer {
    async fn delay_ms(&mut self, millis: u32) {
        sleep(Duration::from_millis(millis as u64)).await;
    }
}

struct ConsoleDashboard;

impl Dashboard for ConsoleDashboard {
    fn render(&mut self, snapshot: &VehicleSnapshot) {
        print!(
            "rpm {:>4}  speed {:>3}  fuel {:>3}%  coolant {:>4}°C  |",
            snapshot.rpm(),
            snapshot.speed(),
            snapshot.fuel_percent(),
            snapshot.coolant_temp(),
        );
        for gauge in Gauge::ALL {
            print!(" {:?} {:>4}‰", gauge, gauge.permille(snapshot));
        }
        println!();
    }

    fn mark_stale(&mut self) {
        println!("-- no data, gauges stale --");
    }
}

// ============================================================================
// Main application
// ============================================================================

#[tokio::main(flavor = "current_thread")]
async fn main() {
    println!("=== canbus-dash simulation ===\n");

    let mailbox = DashMailbox::new();

    let acquisition = AcquisitionRunner::new(
        SimulatedBus { tick: 0 },
        TokioTimer,
        mailbox.publisher(),
        AcquisitionConfig::default(),
    );
    let display = DisplayRunner::new(
        mailbox.receiver(),
        TokioTimer,
        ConsoleDashboard,
        DisplayConfig::default(),
    );

    // Both loops run forever; stop the demo after a few seconds.
    let run = async {
        tokio::join!(acquisition.drive(), display.drive());
    };
    let _ = tokio::time::timeout(Duration::from_secs(3), run).await;

    println!("\nSimulation complete.");
}
