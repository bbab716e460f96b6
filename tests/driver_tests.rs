use std::time::Duration;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use voxplay::audio::recorder::encode_wav;
use voxplay::services::session::SessionId;

#[tokio::test]
async fn test_superseded_recognition_is_discarded() {
    // Mirrors the console driver: a recognition task races its token, and
    // a superseded result never reaches the channel.
    let (tx, mut rx) = mpsc::channel::<u32>(1);
    let token = CancellationToken::new();
    let task_token = token.clone();

    let handle = tokio::spawn(async move {
        tokio::select! {
            _ = task_token.cancelled() => {}
            _ = tokio::time::sleep(Duration::from_millis(50)) => {
                let _ = tx.send(42).await;
            }
        }
    });

    token.cancel();
    handle.await.unwrap();

    assert!(
        rx.try_recv().is_err(),
        "superseded recognition must be discarded before interpretation"
    );
}

#[test]
fn test_session_id_is_opaque_and_stable() {
    let session = SessionId::generate();
    assert!(!session.as_str().is_empty());
    assert_eq!(session.to_string(), session.as_str());

    // Two sessions never collide
    assert_ne!(session, SessionId::generate());
}

#[test]
fn test_recorder_session_captures_between_start_and_stop() {
    use ringbuf::HeapRb;
    use ringbuf::traits::{Producer, Split};
    use voxplay::audio::recorder::Recorder;

    let rb = HeapRb::<f32>::new(4096);
    let (mut producer, consumer) = rb.split();
    let mut recorder = Recorder::new(consumer, 16_000);

    // Audio arriving before the session starts is stale and dropped
    producer.push_slice(&[0.5; 64]);
    recorder.start();
    producer.push_slice(&[0.25; 128]);
    recorder.poll();

    let utterance = recorder.stop().unwrap();
    assert_eq!(utterance.sample_rate, 16_000);
    // 44-byte canonical header + 128 samples at 16 bits
    assert_eq!(utterance.wav.len(), 44 + 128 * 2);
}

#[test]
fn test_recorder_emits_wav_at_capture_rate() {
    let samples = vec![0.0f32; 1600];
    let wav = encode_wav(&samples, 16_000).unwrap();

    assert_eq!(&wav[0..4], b"RIFF");
    assert_eq!(&wav[8..12], b"WAVE");

    // fmt chunk sample rate field
    let rate = u32::from_le_bytes([wav[24], wav[25], wav[26], wav[27]]);
    assert_eq!(rate, 16_000);
}
