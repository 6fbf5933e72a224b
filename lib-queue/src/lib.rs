use std::collections::BTreeMap;
use std::fmt;
use std::time::{Duration, Instant};

/// Half of the circular sequence space. A forced flush hands out the items that lie up to this far
/// behind the expected sequence number first, so stragglers and a restarted sender come before
/// the items that are still ahead.
///
const HALF_WINDOW: u32 = 1 << 31;

/// Orders items by their `u32` sequence number, which wraps around after `u32::MAX`.
///
/// Items are handed out strictly in sequence order by `pop_ordered`/`drain_ordered`. When the
/// next expected item never arrives the queue stalls; `stall_elapsed` tells how long that has
/// been going on and `force_flush` gives up on the missing items and hands out everything that
/// is pending.
///
/// All methods that touch the stall clock take the current time so callers decide where time
/// comes from.
///
pub struct ReorderQueue<T> {
    pub(crate) pending: BTreeMap<u32, T>,

    /// Sequence number of the next item to hand out.
    pub(crate) expected_seq: u32,

    /// Time of the last delivery, or of the enqueue that ended an empty period.
    pub(crate) stall_clock: Option<Instant>,
}

impl<T> ReorderQueue<T> {

    pub fn new() -> Self {
        Self::with_expected_seq(0)
    }

    /// Creates an empty queue that waits for `seq` first.
    ///
    pub fn with_expected_seq(seq: u32) -> Self {
        ReorderQueue {
            pending: BTreeMap::new(),
            expected_seq: seq,
            stall_clock: None,
        }
    }

    /// Adds an item to the pending set, whatever its sequence number. A second item with the
    /// same sequence number replaces the first.
    ///
    pub fn enqueue(&mut self, seq: u32, item: T, now: Instant) {
        // Latency is measured from the moment something starts waiting.
        if self.pending.is_empty() {
            self.stall_clock = Some(now);
        }
        if self.pending.insert(seq, item).is_some() {
            log::debug!("replaced pending item seq:{}", seq);
        }
    }

    /// Sequence number of the pending item that comes first in circular order starting at the
    /// expected sequence number, without removing it.
    ///
    pub fn next_pending_seq(&self) -> Option<u32> {
        self.pending
            .range(self.expected_seq..)
            .next()
            .or_else(|| self.pending.iter().next())
            .map(|(seq, _)| *seq)
    }

    /// Removes the item with the expected sequence number, if it has arrived.
    ///
    pub fn pop_ordered(&mut self, now: Instant) -> Option<(u32, T)> {
        let seq = self.expected_seq;
        let item = self.pending.remove(&seq)?;
        self.delivered(seq, now);
        Some((seq, item))
    }

    /// Removes every item that can be handed out without skipping a sequence number.
    ///
    pub fn drain_ordered(&mut self, now: Instant) -> Vec<(u32, T)> {
        let mut items = Vec::new();
        while let Some(item) = self.pop_ordered(now) {
            items.push(item);
        }
        items
    }

    /// Time since the last delivery, zero if the queue never had to wait for anything.
    ///
    pub fn stall_elapsed(&self, now: Instant) -> Duration {
        self.stall_clock
            .map(|since| now.saturating_duration_since(since))
            .unwrap_or(Duration::ZERO)
    }

    /// Removes all pending items in ascending circular sequence order regardless of gaps.
    /// Afterwards the queue expects the successor of the last item handed out.
    ///
    /// The order starts half the sequence space behind the expected number, so items that are
    /// late (or come from a sender that started counting again) go out before the ones that are
    /// ahead, and the queue resynchronises on the newest item.
    ///
    pub fn force_flush(&mut self, now: Instant) -> Vec<(u32, T)> {
        let origin = self.expected_seq.wrapping_sub(HALF_WINDOW);
        let upper = self.pending.split_off(&origin);
        let lower = std::mem::take(&mut self.pending);
        let items: Vec<(u32, T)> = upper.into_iter().chain(lower).collect();

        if let Some((last, _)) = items.last() {
            log::debug!(
                "flushing {} items, expected seq:{} continuing after seq:{}",
                items.len(), self.expected_seq, last
            );
            self.delivered(*last, now);
        }
        items
    }

    pub fn expected_seq(&self) -> u32 {
        self.expected_seq
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    #[inline]
    fn delivered(&mut self, seq: u32, now: Instant) {
        self.expected_seq = seq.wrapping_add(1);
        self.stall_clock = Some(now);
    }
}

impl<T> Default for ReorderQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for ReorderQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f, "ReorderQueue [expected: {}, pending: {:?}]",
            self.expected_seq, self.pending.keys().collect::<Vec<_>>()
        )
    }
}
