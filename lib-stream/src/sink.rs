use std::{fs::File, path::Path};

use math::{EulerAngles, Quaternion};
use transport::ImuPayload;
use crate::StreamError;

/// A new orientation estimate for one sender.
///
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrientationUpdate
{
    pub sender_id: u8,

    /// Sequence number of the payload that produced this estimate.
    pub seq: u32,

    pub payload: ImuPayload,

    pub orientation: Quaternion,

    /// Was the payload handed out by a stall flush instead of in order?
    pub flushed: bool,
}

/// Receives the orientation snapshots the consumer produces, e.g. for display or recording.
///
pub trait OrientationSink {
    fn publish(&mut self, update: &OrientationUpdate);
}

/// Collects every update, mostly useful in tests.
///
impl OrientationSink for Vec<OrientationUpdate> {
    fn publish(&mut self, update: &OrientationUpdate) {
        self.push(*update);
    }
}

/// Logs every orientation as yaw/pitch/roll in degrees.
///
#[derive(Debug, Default)]
pub struct LogSink;

impl OrientationSink for LogSink {
    fn publish(&mut self, update: &OrientationUpdate) {
        let angles = EulerAngles::from(&update.orientation).to_degrees();
        log::debug!(
            "sensor {} seq:{} yaw:{:.1} pitch:{:.1} roll:{:.1}{}",
            update.sender_id, update.seq, angles.yaw, angles.pitch, angles.roll,
            if update.flushed { " (flushed)" } else { "" }
        );
    }
}

/// Records every orientation to a CSV file with the columns
/// `sender_id,seq,timestamp,flushed,w,x,y,z`, where `timestamp` is the gyroscope timestamp of the
/// payload in milliseconds.
///
pub struct CsvSink {
    writer: csv::Writer<File>,
}

impl CsvSink {
    pub fn create(path: impl AsRef<Path>) -> Result<Self, StreamError> {
        let mut writer = csv::WriterBuilder::new().has_headers(false).from_path(path)?;
        writer.write_record(["sender_id", "seq", "timestamp", "flushed", "w", "x", "y", "z"])?;
        Ok(CsvSink { writer })
    }

    pub fn flush(&mut self) -> Result<(), StreamError> {
        self.writer.flush()?;
        Ok(())
    }
}

impl OrientationSink for CsvSink {
    fn publish(&mut self, update: &OrientationUpdate) {
        let q = update.orientation;
        let row = (
            update.sender_id, update.seq, update.payload.gyro.timestamp, update.flushed,
            q.w, q.x, q.y, q.z,
        );
        if let Err(err) = self.writer.serialize(row) {
            log::error!("failed to record orientation: {}", err);
        }
    }
}
