use std::time::{Duration, Instant};

use math::Quaternion;
use processing::{NumericError, SensorFusion};
use queue::ReorderQueue;
use transport::ImuPayload;
use crate::{OrientationSink, OrientationUpdate};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SensorStats
{
    /// Payloads accepted into the reorder queue.
    pub received: u64,

    /// Payloads handed to the fusion filter in sequence order.
    pub delivered: u64,

    /// Payloads handed to the fusion filter by a stall flush.
    pub flushed: u64,

    /// Payloads the fusion filter could not use.
    pub numeric_errors: u64,
}

/// Represents a remote sensor sending us state updates.
///
/// Messages are submitted with `put_message`, calling `update` puts them back in order and feeds
/// them to the sensor's fusion filter. When the next message in line does not show up within the
/// stall timeout it is given up on and everything that did arrive is processed anyway.
///
pub struct RemoteSensor
{
    pub id: u8,
    stall_timeout: Duration,
    queue: ReorderQueue<ImuPayload>,
    fusion: SensorFusion,
    stats: SensorStats,
}

impl RemoteSensor
{
    pub fn new(id: u8, stall_timeout: Duration, alpha: f32) -> Result<Self, NumericError> {
        Ok(RemoteSensor {
            id,
            stall_timeout,
            queue: ReorderQueue::new(),
            fusion: SensorFusion::with_alpha(alpha)?,
            stats: SensorStats::default(),
        })
    }

    pub fn put_message(&mut self, seq: u32, payload: ImuPayload, now: Instant) {
        self.queue.enqueue(seq, payload, now);
        self.stats.received += 1;
    }

    /// Process every message that can be processed in order, or flush the queue if it has been
    /// stuck on a missing message for too long.
    ///
    pub fn update<S: OrientationSink + ?Sized>(&mut self, now: Instant, sink: &mut S) {
        let ordered = self.queue.drain_ordered(now);
        let delivered_any = !ordered.is_empty();
        for (seq, payload) in ordered {
            self.stats.delivered += 1;
            self.process(seq, payload, false, sink);
        }

        if !delivered_any && !self.queue.is_empty() && self.queue.stall_elapsed(now) >= self.stall_timeout {
            log::info!(
                "sensor {} stalled waiting for seq:{}, flushing {} messages",
                self.id, self.queue.expected_seq(), self.queue.len()
            );
            for (seq, payload) in self.queue.force_flush(now) {
                self.stats.flushed += 1;
                self.process(seq, payload, true, sink);
            }
        }
    }

    pub fn orientation(&self) -> Quaternion {
        self.fusion.orientation
    }

    pub fn stats(&self) -> SensorStats {
        self.stats
    }

    /// Messages received but not processed yet.
    ///
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    fn process<S: OrientationSink + ?Sized>(&mut self, seq: u32, payload: ImuPayload, flushed: bool, sink: &mut S) {
        match self.fusion.update(&payload) {
            Ok(orientation) => sink.publish(&OrientationUpdate {
                sender_id: self.id,
                seq,
                payload,
                orientation,
                flushed,
            }),
            Err(err) => {
                self.stats.numeric_errors += 1;
                log::warn!("sensor {} skipped seq:{}: {}", self.id, seq, err);
            }
        }
    }
}
