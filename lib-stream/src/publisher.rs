use std::os::unix::net::UnixDatagram;
use std::sync::atomic::{AtomicBool, Ordering};

use timer::IntervalTimer;
use transport::{Frame, FRAME_SIZE};
use crate::{DataSource, PublisherConfig, StreamError};

/// Sends one frame per timer tick to the consumer's socket.
///
pub struct Publisher<D: DataSource>
{
    config: PublisherConfig,
    socket: UnixDatagram,
    source: D,
    timer: IntervalTimer,

    /// Sequence number of the next frame, wraps around after `u32::MAX`.
    seq: u32,

    /// Frames handed to the socket so far, whether sending succeeded or not.
    sent: u64,
}

impl<D: DataSource> Publisher<D>
{
    pub fn new(config: PublisherConfig, source: D) -> Result<Self, StreamError> {
        config.validate()?;
        let timer = IntervalTimer::new(config.frequency_hz as f64)?;
        let socket = UnixDatagram::unbound()?;

        Ok(Publisher {
            seq: config.start_seq,
            config,
            socket,
            source,
            timer,
            sent: 0,
        })
    }

    /// Keep publishing until `running` is cleared or the configured amount of frames was sent.
    /// Returns the amount of frames sent.
    ///
    pub fn run(&mut self, running: &AtomicBool) -> u64 {
        log::info!(
            "publishing as sender {} at {} Hz to {}",
            self.config.sender_id, self.config.frequency_hz, self.config.socket_path.display()
        );

        self.timer.reset();
        while running.load(Ordering::Relaxed) && !self.done() {
            self.cycle();
        }
        log::debug!("publisher stopped after {} frames", self.sent);
        self.sent
    }

    /// Produce, wait for the next tick, send.
    ///
    pub fn cycle(&mut self) {
        let payload = self.source.next_payload();
        log::trace!("generated imu payload {:?}", payload);
        let bytes = Frame::new(self.config.sender_id, self.seq, &payload).to_bytes();

        // Wait for the interval timer to signal
        self.timer.wait();

        match self.socket.send_to(&bytes, &self.config.socket_path) {
            Ok(FRAME_SIZE) => log::debug!("sending message seq:{}", self.seq),
            Ok(len) => log::warn!("short send of seq:{}: {} of {} bytes", self.seq, len, FRAME_SIZE),
            Err(err) => log::error!("send of seq:{} failed: {}", self.seq, err),
        }

        self.seq = self.seq.wrapping_add(1);
        self.sent += 1;
    }

    /// Sequence number the next frame will carry.
    ///
    pub fn seq(&self) -> u32 {
        self.seq
    }

    pub fn sent(&self) -> u64 {
        self.sent
    }

    fn done(&self) -> bool {
        self.config.count.is_some_and(|count| self.sent >= count)
    }
}
