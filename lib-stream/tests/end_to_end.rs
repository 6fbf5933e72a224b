use std::os::unix::net::UnixDatagram;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use math::Vector;
use lib_stream::*;
use transport::{frame, unframe, ImuPayload, Reading};

/// Payloads whose timestamps encode their index, so the receiving end can tell them apart.
#[derive(Default)]
struct CountingSource {
    index: u32,
}

impl DataSource for CountingSource {
    fn next_payload(&mut self) -> ImuPayload {
        let payload = counted_payload(self.index);
        self.index += 1;
        payload
    }
}

fn counted_payload(index: u32) -> ImuPayload {
    let time = index * 20;
    ImuPayload::new(
        Reading::new(Vector::new(0.0, -9.81, 0.0), time),
        Reading::new(Vector::new(0.0, 0.1, 0.0), time),
        Reading::new(Vector::new(0.0, 400.0, -200.0), time),
    )
}

fn send(sender: &UnixDatagram, path: &Path, sender_id: u8, seq: u32) {
    let bytes = frame(sender_id, seq, &counted_payload(seq).encode());
    sender.send_to(&bytes, path).unwrap();
}

fn seqs(updates: &[OrientationUpdate]) -> Vec<u32> {
    updates.iter().map(|u| u.seq).collect()
}

#[test]
fn publisher_and_consumer_deliver_everything_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("imu.sock");

    let mut consumer_config = ConsumerConfig::new(&path);
    consumer_config.stall_timeout = Duration::from_millis(200);
    let mut consumer = Consumer::bind(consumer_config, Vec::new()).unwrap();

    let running = Arc::new(AtomicBool::new(true));
    let consumer_thread = {
        let running = Arc::clone(&running);
        thread::spawn(move || {
            consumer.run(&running);
            consumer
        })
    };

    let mut publisher_config = PublisherConfig::new(&path);
    publisher_config.sender_id = 9;
    publisher_config.frequency_hz = 50;
    publisher_config.count = Some(100);
    let mut publisher = Publisher::new(publisher_config, CountingSource::default()).unwrap();
    assert_eq!(publisher.run(&AtomicBool::new(true)), 100);

    // Give the consumer time for the last frames.
    thread::sleep(Duration::from_millis(500));
    running.store(false, Ordering::Relaxed);
    let consumer = consumer_thread.join().unwrap();

    let updates = consumer.sink();
    assert_eq!(seqs(updates), (0..100).collect::<Vec<_>>());
    assert!(updates.iter().all(|u| u.sender_id == 9 && !u.flushed));
    for update in updates {
        assert_eq!(update.payload, counted_payload(update.seq));
    }

    let stats = consumer.sensors()[&9].stats();
    assert_eq!(stats.delivered, 100);
    assert_eq!(stats.flushed, 0);
}

#[test]
fn consumer_reorders_and_flushes_lost_frames() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("imu.sock");

    let mut config = ConsumerConfig::new(&path);
    config.stall_timeout = Duration::from_millis(50);
    let mut consumer = Consumer::bind(config, Vec::new()).unwrap();

    let sender = UnixDatagram::unbound().unwrap();
    for seq in [1, 0, 3, 4] {
        send(&sender, &path, 1, seq);
    }

    for _ in 0..4 {
        consumer.cycle();
    }
    assert_eq!(seqs(consumer.sink()), vec![0, 1]);

    // Nothing arrives, seq 2 is given up on once the receive times out.
    consumer.cycle();
    assert_eq!(seqs(consumer.sink()), vec![0, 1, 3, 4]);
    assert!(consumer.sink()[2].flushed && consumer.sink()[3].flushed);

    // Seq 5 is in order again, the straggler 2 waits for the next flush.
    send(&sender, &path, 1, 2);
    send(&sender, &path, 1, 5);
    consumer.cycle();
    consumer.cycle();
    assert_eq!(seqs(consumer.sink()), vec![0, 1, 3, 4, 5]);
    assert!(!consumer.sink()[4].flushed);
    assert_eq!(consumer.sensors()[&1].pending(), 1);

    consumer.cycle();
    assert_eq!(seqs(consumer.sink()), vec![0, 1, 3, 4, 5, 2]);
    assert!(consumer.sink()[5].flushed);
    assert_eq!(consumer.sensors()[&1].stats().received, 6);
}

#[test]
fn consumer_keeps_senders_apart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("imu.sock");
    let mut consumer = Consumer::bind(ConsumerConfig::new(&path), Vec::new()).unwrap();

    let sender = UnixDatagram::unbound().unwrap();
    send(&sender, &path, 4, 0);
    send(&sender, &path, 200, 0);
    send(&sender, &path, 4, 1);
    for _ in 0..3 {
        consumer.cycle();
    }

    assert_eq!(consumer.sensors().len(), 2);
    let from_4: Vec<u32> = consumer.sink().iter().filter(|u| u.sender_id == 4).map(|u| u.seq).collect();
    let from_200: Vec<u32> = consumer.sink().iter().filter(|u| u.sender_id == 200).map(|u| u.seq).collect();
    assert_eq!(from_4, vec![0, 1]);
    assert_eq!(from_200, vec![0]);
}

#[test]
fn consumer_discards_malformed_datagrams() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("imu.sock");
    let mut consumer = Consumer::bind(ConsumerConfig::new(&path), Vec::new()).unwrap();

    let sender = UnixDatagram::unbound().unwrap();
    sender.send_to(&[1u8; 10], &path).unwrap();
    sender.send_to(&[1u8; 60], &path).unwrap();
    consumer.cycle();
    consumer.cycle();

    assert!(consumer.sensors().is_empty());
    assert!(consumer.sink().is_empty());

    send(&sender, &path, 1, 0);
    consumer.cycle();
    assert_eq!(seqs(consumer.sink()), vec![0]);
}

#[test]
fn consumer_replaces_stale_socket_but_not_other_files() {
    let dir = tempfile::tempdir().unwrap();

    let path = dir.path().join("imu.sock");
    let leftover = UnixDatagram::bind(&path).unwrap();
    drop(leftover);
    let consumer = Consumer::bind(ConsumerConfig::new(&path), Vec::new()).unwrap();
    assert_eq!(consumer.socket_path(), path.as_path());

    // The socket file is cleaned up with the consumer.
    drop(consumer);
    assert!(!path.exists());

    let file = dir.path().join("notes.txt");
    std::fs::write(&file, "keep me").unwrap();
    assert!(matches!(
        Consumer::bind(ConsumerConfig::new(&file), Vec::new()),
        Err(StreamError::Config(_))
    ));
    assert_eq!(std::fs::read_to_string(&file).unwrap(), "keep me");
}

#[test]
fn publisher_wraps_sequence_numbers() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("imu.sock");
    let receiver = UnixDatagram::bind(&path).unwrap();
    receiver.set_read_timeout(Some(Duration::from_secs(1))).unwrap();

    let mut config = PublisherConfig::new(&path);
    config.sender_id = 17;
    config.frequency_hz = 200;
    config.count = Some(3);
    config.start_seq = u32::MAX - 1;
    let mut publisher = Publisher::new(config, CountingSource::default()).unwrap();

    assert_eq!(publisher.run(&AtomicBool::new(true)), 3);
    assert_eq!(publisher.seq(), 1);

    let mut buf = [0u8; 64];
    let mut received = Vec::new();
    for _ in 0..3 {
        let len = receiver.recv(&mut buf).unwrap();
        let frame = unframe(&buf[..len]).unwrap();
        assert_eq!(frame.sender_id, 17);
        received.push(frame.seq);
    }
    assert_eq!(received, vec![u32::MAX - 1, u32::MAX, 0]);
}

#[test]
fn publisher_survives_missing_consumer() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = PublisherConfig::new(dir.path().join("nobody.sock"));
    config.frequency_hz = 500;
    config.count = Some(5);
    let mut publisher = Publisher::new(config, CountingSource::default()).unwrap();

    assert_eq!(publisher.run(&AtomicBool::new(true)), 5);
}

#[test]
fn stopped_publisher_sends_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = PublisherConfig::new(dir.path().join("imu.sock"));
    config.count = Some(5);
    let mut publisher = Publisher::new(config, CountingSource::default()).unwrap();

    assert_eq!(publisher.run(&AtomicBool::new(false)), 0);
}
