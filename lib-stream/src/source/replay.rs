use std::path::Path;

use math::Vector;
use transport::{ImuPayload, Reading};
use crate::{DataSource, StreamError};

/// One CSV row: accel xyz, accel timestamp, gyro xyz, gyro timestamp, mag xyz, mag timestamp.
type Row = (f32, f32, f32, u32, f32, f32, f32, u32, f32, f32, f32, u32);

/// Replays recorded payloads from a CSV file, starting over once the end is reached.
///
/// The file starts with a header row, every following row holds one payload in the column order
/// `accel_x,accel_y,accel_z,accel_ts,gyro_x,gyro_y,gyro_z,gyro_ts,mag_x,mag_y,mag_z,mag_ts`.
///
pub struct ReplaySource {
    payloads: Vec<ImuPayload>,
    next: usize,
}

impl ReplaySource {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StreamError> {
        let path = path.as_ref();
        let mut reader = csv::Reader::from_path(path)?;

        let mut payloads = Vec::new();
        for result in reader.deserialize::<Row>() {
            let (ax, ay, az, ats, gx, gy, gz, gts, mx, my, mz, mts) = result?;
            payloads.push(ImuPayload::new(
                Reading::new(Vector::new(ax, ay, az), ats),
                Reading::new(Vector::new(gx, gy, gz), gts),
                Reading::new(Vector::new(mx, my, mz), mts),
            ));
        }

        Self::from_payloads(payloads).ok_or_else(|| {
            StreamError::Config(format!("{} contains no payloads", path.display()))
        })
    }

    /// Replay the given payloads, `None` if there are none.
    ///
    pub fn from_payloads(payloads: Vec<ImuPayload>) -> Option<Self> {
        if payloads.is_empty() {
            return None;
        }
        Some(ReplaySource { payloads, next: 0 })
    }

    pub fn len(&self) -> usize {
        self.payloads.len()
    }

    /// Always `false`, a replay holds at least one payload.
    ///
    pub fn is_empty(&self) -> bool {
        self.payloads.is_empty()
    }
}

impl DataSource for ReplaySource {
    fn next_payload(&mut self) -> ImuPayload {
        let payload = self.payloads[self.next];
        self.next = (self.next + 1) % self.payloads.len();
        payload
    }
}

#[cfg(test)]
mod tests
{
    use super::*;
    use std::fs;

    const HEADER: &str = "accel_x,accel_y,accel_z,accel_ts,gyro_x,gyro_y,gyro_z,gyro_ts,mag_x,mag_y,mag_z,mag_ts\n";

    #[test]
    pub fn test_replays_rows_in_a_loop() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("recording.csv");
        fs::write(&path, format!(
            "{}{}{}",
            HEADER,
            "0.1,-9.8,0.2,10,0.01,0.02,0.03,11,0,400,-200,12\n",
            "0.0,-9.81,0.0,20,0,0,0,21,1,399,-201,22\n",
        )).unwrap();

        let mut source = ReplaySource::load(&path).unwrap();
        assert_eq!(source.len(), 2);
        assert!(!source.is_empty());

        let first = source.next_payload();
        assert_eq!(first.accel.value, Vector::new(0.1, -9.8, 0.2));
        assert_eq!(first.accel.timestamp, 10);
        assert_eq!(first.gyro.timestamp, 11);
        assert_eq!(first.mag.value, Vector::new(0.0, 400.0, -200.0));

        let second = source.next_payload();
        assert_eq!(second.mag.timestamp, 22);

        assert_eq!(source.next_payload(), first);
    }

    #[test]
    pub fn test_malformed_row_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.csv");
        fs::write(&path, format!("{}{}", HEADER, "0.1,-9.8,oops,10,0,0,0,11,0,400,-200,12\n")).unwrap();

        assert!(matches!(ReplaySource::load(&path), Err(StreamError::Csv(_))));
    }

    #[test]
    pub fn test_empty_recording_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.csv");
        fs::write(&path, HEADER).unwrap();

        assert!(matches!(ReplaySource::load(&path), Err(StreamError::Config(_))));
        assert!(ReplaySource::from_payloads(Vec::new()).is_none());
    }
}
