use crate::errors::SinkError;
use crate::models::Frame;
use csv::Writer;
use hifitime::Epoch;
use std::io::Write;

/// Consumer of simulated frames (the renderer's side of the loop).
pub trait FrameSink {
    fn record(&mut self, epoch: Epoch, frame: &Frame) -> Result<(), SinkError>;

    fn finish(&mut self) -> Result<(), SinkError> {
        Ok(())
    }
}

const HEADER: [&str; 9] = [
    "UTC Time",
    "Tick",
    "Elapsed (s)",
    "Globe Rotation (rad)",
    "Satellite",
    "Position X",
    "Position Y",
    "Position Z",
    "Radius",
];

/// Writes one CSV row per satellite for every `sample_every`-th frame.
pub struct CsvFrameSink<W: Write> {
    writer: Writer<W>,
    sample_every: u64,
    header_written: bool,
}

impl<W: Write> CsvFrameSink<W> {
    pub fn new(inner: W, sample_every: u64) -> Self {
        CsvFrameSink {
            writer: Writer::from_writer(inner),
            sample_every: sample_every.max(1),
            header_written: false,
        }
    }

    pub fn samples(&self, frame: &Frame) -> bool {
        frame.tick % self.sample_every == 0
    }

    /// Flushes and hands back the underlying writer.
    pub fn into_inner(self) -> Result<W, SinkError> {
        self.writer
            .into_inner()
            .map_err(|e| SinkError::Io(e.into_error()))
    }
}

impl<W: Write> FrameSink for CsvFrameSink<W> {
    fn record(&mut self, epoch: Epoch, frame: &Frame) -> Result<(), SinkError> {
        if !self.samples(frame) {
            return Ok(());
        }
        if !self.header_written {
            self.writer.write_record(HEADER)?;
            self.header_written = true;
        }

        for (index, position) in frame.positions.iter().enumerate() {
            self.writer.write_record(&[
                epoch.to_string(),
                frame.tick.to_string(),
                frame.elapsed.to_seconds().to_string(),
                frame.globe_rotation.to_string(),
                index.to_string(),
                position.x.to_string(),
                position.y.to_string(),
                position.z.to_string(),
                position.magnitude().to_string(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<(), SinkError> {
        self.writer.flush()?;
        Ok(())
    }
}
