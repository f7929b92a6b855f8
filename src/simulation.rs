use crate::errors::SinkError;
use crate::models::Constellation;
use crate::output::sink::FrameSink;
use hifitime::{Duration, Epoch};
use log::{info, warn};

#[derive(Debug, Clone, Copy)]
pub struct SimulationSettings {
    pub ticks: u64,
    /// Host frame period handed to every tick
    pub dt: Duration,
    /// Timestamp of tick 0
    pub start_epoch: Epoch,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummary {
    pub ticks: u64,
    pub frames_recorded: u64,
    pub elapsed: Duration,
}

/// Host-side loop: records the initial frame, then ticks the constellation
/// `settings.ticks` times and hands each frame to the sink.
pub fn run<S: FrameSink>(
    constellation: &mut Constellation,
    sink: &mut S,
    settings: &SimulationSettings,
) -> Result<RunSummary, SinkError> {
    info!(
        "Running {} satellites for {} ticks (dt = {})",
        constellation.len(),
        settings.ticks,
        settings.dt
    );

    let mut warned = vec![false; constellation.len()];
    let initial = constellation.frame();
    check_clearance(constellation, &initial.positions, &mut warned);
    sink.record(settings.start_epoch, &initial)?;
    let mut frames_recorded = 1;

    for _ in 0..settings.ticks {
        let frame = constellation.tick(settings.dt);
        check_clearance(constellation, &frame.positions, &mut warned);
        sink.record(settings.start_epoch + frame.elapsed, &frame)?;
        frames_recorded += 1;
    }

    sink.finish()?;

    let summary = RunSummary {
        ticks: constellation.tick_count(),
        frames_recorded,
        elapsed: constellation.elapsed(),
    };
    info!(
        "Finished after {} ticks, {} simulated",
        summary.ticks, summary.elapsed
    );
    Ok(summary)
}

// Warns once per satellite that dips into the atmosphere shell.
fn check_clearance(
    constellation: &Constellation,
    positions: &[nalgebra::Vector3<f64>],
    warned: &mut [bool],
) {
    let globe = constellation.globe();
    for (index, position) in positions.iter().enumerate() {
        if !warned[index] && globe.is_inside_atmosphere(position) {
            warn!(
                "Satellite {} is inside the atmosphere shell (clearance {:.4})",
                index,
                globe.surface_clearance(position)
            );
            warned[index] = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{create_orbit, Frame};

    #[derive(Default)]
    struct Recorder {
        frames: Vec<(Epoch, Frame)>,
        finished: bool,
    }

    impl FrameSink for Recorder {
        fn record(&mut self, epoch: Epoch, frame: &Frame) -> Result<(), SinkError> {
            self.frames.push((epoch, frame.clone()));
            Ok(())
        }

        fn finish(&mut self) -> Result<(), SinkError> {
            self.finished = true;
            Ok(())
        }
    }

    #[test]
    fn records_initial_and_every_tick() {
        let mut constellation = Constellation::default();
        constellation.register(create_orbit(1.5, 0.2, 45.0, 30.0).unwrap());

        let start = Epoch::from_gregorian_utc_at_midnight(2024, 3, 15);
        let settings = SimulationSettings {
            ticks: 10,
            dt: Duration::from_seconds(0.5),
            start_epoch: start,
        };
        let mut recorder = Recorder::default();
        let summary = run(&mut constellation, &mut recorder, &settings).unwrap();

        assert_eq!(summary.ticks, 10);
        assert_eq!(summary.frames_recorded, 11);
        assert!(recorder.finished);
        assert_eq!(recorder.frames[0].0, start);
        assert_eq!(recorder.frames[0].1.tick, 0);
        assert_eq!(recorder.frames[10].0, start + Duration::from_seconds(5.0));
    }

    #[test]
    fn low_orbit_still_runs() {
        let mut constellation = Constellation::default();
        constellation.register(create_orbit(1.01, 0.0, 0.0, 0.0).unwrap());
        let settings = SimulationSettings {
            ticks: 3,
            dt: Duration::from_seconds(1.0),
            start_epoch: Epoch::from_gregorian_utc_at_midnight(2024, 1, 1),
        };
        let mut recorder = Recorder::default();
        let summary = run(&mut constellation, &mut recorder, &settings).unwrap();
        assert_eq!(summary.frames_recorded, 4);
    }
}
