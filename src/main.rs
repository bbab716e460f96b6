use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{FmtSubscriber, EnvFilter};

use voxplay::audio::capture::AudioCapture;
use voxplay::audio::recorder::Recorder;
use voxplay::kernel::intent::IntentResult;
use voxplay::kernel::pipeline::dispatch;
use voxplay::kernel::transport::PlaybackState;
use voxplay::services::nlu::{NluConfig, NluService};
use voxplay::services::session::SessionId;
use voxplay::services::upload::UploadService;

const DEFAULT_DURATION_SECS: f64 = 300.0;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Setup Logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    tracing::info!("voxplay console driver starting...");

    // 2. Session + services. One session id per run, reused for every
    // utterance, threaded through explicitly.
    let session = SessionId::generate();
    tracing::info!("Conversation session: {}", session);

    let nlu = Arc::new(NluService::new(NluConfig::from_env()));
    let state = initial_state().await;
    tracing::info!("Playback bound: {:.0}s", state.duration_seconds);

    if std::env::args().any(|arg| arg == "--listen") {
        run_listen(nlu, session, state).await
    } else {
        run_console(nlu, session, state).await
    }
}

/// Seed the playback state. With an upload endpoint and a video file
/// configured, the storage collaborator supplies the playable URL and the
/// duration bound; otherwise the bound comes from the environment.
async fn initial_state() -> PlaybackState {
    let video = std::env::var("VOXPLAY_VIDEO").ok();
    let endpoint = std::env::var("VOXPLAY_UPLOAD_URL").ok();

    if let (Some(path), Some(endpoint)) = (video, endpoint) {
        match tokio::fs::read(&path).await {
            Ok(bytes) => match UploadService::new(endpoint).upload_video(bytes).await {
                Ok(video) => {
                    tracing::info!(
                        "Video available at {} ({:.0}s)",
                        video.secure_url,
                        video.duration
                    );
                    return PlaybackState::new(video.duration);
                }
                Err(e) => tracing::warn!("Upload failed, using default duration: {}", e),
            },
            Err(e) => tracing::warn!("Could not read {}: {}", path, e),
        }
    }

    let duration = std::env::var("VOXPLAY_DURATION")
        .ok()
        .and_then(|d| d.parse().ok())
        .unwrap_or(DEFAULT_DURATION_SECS);

    PlaybackState::new(duration)
}

/// Text-driven loop: each stdin line goes to the oracle's text endpoint.
/// A new utterance supersedes the in-flight recognition; the superseded
/// result is discarded before it ever reaches interpretation.
async fn run_console(
    nlu: Arc<NluService>,
    session: SessionId,
    mut state: PlaybackState,
) -> Result<()> {
    println!("Type a command ('play', 'pause', 'skip forward 10 seconds'). Ctrl+D to quit.");

    let (result_tx, mut result_rx) = mpsc::channel::<Result<Option<IntentResult>>>(16);
    let mut inflight: Option<CancellationToken> = None;

    let stdin = tokio::io::stdin();
    let mut lines = BufReader::new(stdin).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                let line = line.trim().to_string();
                if line.is_empty() {
                    continue;
                }

                if let Some(token) = inflight.take() {
                    token.cancel();
                }
                let token = CancellationToken::new();
                inflight = Some(token.clone());

                let nlu = nlu.clone();
                let session = session.clone();
                let tx = result_tx.clone();

                tokio::spawn(async move {
                    let outcome = tokio::select! {
                        _ = token.cancelled() => return,
                        outcome = nlu.detect_text_intent(&session, &line) => outcome,
                    };

                    if !token.is_cancelled() {
                        let _ = tx.send(outcome).await;
                    }
                });
            }
            Some(outcome) = result_rx.recv() => {
                apply_turn(&mut state, outcome);
            }
        }
    }

    Ok(())
}

/// Microphone loop: Enter starts a recording session, Enter again stops
/// it and sends the encoded utterance through the audio path.
async fn run_listen(
    nlu: Arc<NluService>,
    session: SessionId,
    mut state: PlaybackState,
) -> Result<()> {
    use ringbuf::HeapRb;
    use ringbuf::traits::Split;

    // Room for half a minute of capture at the highest preferred rate
    let rb = HeapRb::<f32>::new(48_000 * 30);
    let (producer, consumer) = rb.split();

    let capture = AudioCapture::new(producer)?;
    let mut recorder = Recorder::new(consumer, capture.sample_rate);

    println!("Press Enter to start recording, Enter again to send. Ctrl+D to quit.");

    let stdin = tokio::io::stdin();
    let mut lines = BufReader::new(stdin).lines();

    let mut cadence = tokio::time::interval(Duration::from_millis(50));
    cadence.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = cadence.tick() => {
                recorder.poll();
            }
            line = lines.next_line() => {
                if line?.is_none() {
                    break;
                }

                if !recorder.is_recording() {
                    recorder.start();
                    println!("Recording... press Enter to send.");
                    continue;
                }

                let utterance = recorder.stop()?;
                tracing::info!(
                    "Captured {} bytes at {}Hz",
                    utterance.wav.len(),
                    utterance.sample_rate
                );

                let outcome = nlu
                    .detect_audio_intent(&session, &utterance.wav, Some(utterance.sample_rate))
                    .await;
                apply_turn(&mut state, outcome);
            }
        }
    }

    Ok(())
}

fn apply_turn(state: &mut PlaybackState, outcome: Result<Option<IntentResult>>) {
    match outcome {
        Ok(Some(result)) => match dispatch(state, &result) {
            Some(command) => tracing::info!(
                "Applied {:?} -> position={:.1}s playing={}",
                command,
                state.position_seconds,
                state.is_playing
            ),
            None => tracing::info!("Intent '{}' produced no command", result.intent),
        },
        Ok(None) => tracing::info!("No intent matched this turn"),
        Err(e) => tracing::warn!("Recognition failed: {}", e),
    }
}
