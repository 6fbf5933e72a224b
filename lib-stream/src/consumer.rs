use std::collections::{hash_map::Entry, HashMap};
use std::fs;
use std::io::ErrorKind;
use std::os::unix::fs::FileTypeExt;
use std::os::unix::net::UnixDatagram;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use transport::{unframe, ImuPayload, FRAME_SIZE};
use crate::{ConsumerConfig, OrientationSink, RemoteSensor, StreamError};

/// Large enough to notice datagrams that are longer than a frame instead of having them
/// silently truncated to the frame size.
///
const RECV_BUFFER_SIZE: usize = FRAME_SIZE * 2;

/// Receives frames from any number of publishers and keeps a `RemoteSensor` for every sender.
///
/// Every cycle waits at most the stall timeout for one datagram and then updates every sensor
/// once, so a stalled sensor gets flushed even when no datagrams arrive at all.
///
pub struct Consumer<S: OrientationSink>
{
    config: ConsumerConfig,
    socket: UnixDatagram,

    /// Every sensor that has sent us a message, keyed by sender id.
    sensors: HashMap<u8, RemoteSensor>,

    sink: S,
    buf: [u8; RECV_BUFFER_SIZE],
}

impl<S: OrientationSink> Consumer<S>
{
    /// Bind the socket at the configured path, replacing a socket file left behind by an
    /// earlier run.
    ///
    pub fn bind(config: ConsumerConfig, sink: S) -> Result<Self, StreamError> {
        config.validate()?;
        remove_stale_socket(&config.socket_path)?;

        let socket = UnixDatagram::bind(&config.socket_path)?;
        socket.set_read_timeout(Some(config.stall_timeout))?;
        log::info!("socket bound at {}", config.socket_path.display());

        Ok(Consumer {
            config,
            socket,
            sensors: HashMap::new(),
            sink,
            buf: [0u8; RECV_BUFFER_SIZE],
        })
    }

    /// Keep cycling until `running` is cleared.
    ///
    pub fn run(&mut self, running: &AtomicBool) {
        while running.load(Ordering::Relaxed) {
            self.cycle();
        }
        log::debug!("consumer stopped");
    }

    /// Receive at most one datagram, then update every sensor exactly once.
    ///
    pub fn cycle(&mut self) {
        match self.socket.recv(&mut self.buf) {
            Ok(len) => self.handle_datagram(len, Instant::now()),
            Err(err) if matches!(err.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut) => {
                log::trace!("recv timeout");
            }
            Err(err) if err.kind() == ErrorKind::Interrupted => {}
            Err(err) => log::error!("recv failed: {}", err),
        }

        let now = Instant::now();
        for sensor in self.sensors.values_mut() {
            log::trace!("updating remote sensor {}", sensor.id);
            sensor.update(now, &mut self.sink);
        }
    }

    pub fn sensors(&self) -> &HashMap<u8, RemoteSensor> {
        &self.sensors
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn socket_path(&self) -> &Path {
        &self.config.socket_path
    }

    fn handle_datagram(&mut self, len: usize, now: Instant) {
        let (sender_id, seq, payload) = match decode_datagram(&self.buf[..len]) {
            Ok(message) => message,
            Err(err) => {
                log::warn!("discarding datagram: {}", err);
                return;
            }
        };
        log::debug!("message received id:{} seq:{}", sender_id, seq);

        let sensor = match self.sensors.entry(sender_id) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                match RemoteSensor::new(sender_id, self.config.stall_timeout, self.config.alpha) {
                    Ok(sensor) => {
                        log::info!("new remote sensor {}", sender_id);
                        entry.insert(sensor)
                    }
                    Err(err) => {
                        log::error!("cannot track sensor {}: {}", sender_id, err);
                        return;
                    }
                }
            }
        };
        sensor.put_message(seq, payload, now);
    }
}

impl<S: OrientationSink> Drop for Consumer<S> {
    fn drop(&mut self) {
        if let Err(err) = fs::remove_file(&self.config.socket_path) {
            log::debug!("could not remove {}: {}", self.config.socket_path.display(), err);
        }
    }
}

fn decode_datagram(datagram: &[u8]) -> Result<(u8, u32, ImuPayload), StreamError> {
    let frame = unframe(datagram)?;
    Ok((frame.sender_id, frame.seq, frame.payload()?))
}

/// Remove a socket file at `path`, refusing to touch anything that is not a socket.
///
fn remove_stale_socket(path: &Path) -> Result<(), StreamError> {
    match fs::symlink_metadata(path) {
        Ok(meta) if meta.file_type().is_socket() => {
            log::debug!("removing existing socket {}", path.display());
            fs::remove_file(path)?;
            Ok(())
        }
        Ok(_) => Err(StreamError::Config(format!(
            "{} exists and is not a socket", path.display()
        ))),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
        Err(err) => Err(err.into()),
    }
}
