use anyhow::Result;
use ringbuf::traits::Consumer;

/// One completed recording session: the encoded blob plus its sample
/// rate, as the intent-detection collaborator expects it.
#[derive(Debug, Clone)]
pub struct RecordedUtterance {
    pub wav: Vec<u8>,
    pub sample_rate: u32,
}

/// Push-to-talk accumulator over the capture ring. Between `start` and
/// `stop` every drained sample belongs to the utterance; outside a session
/// the ring is drained and discarded so stale audio never leaks into the
/// next recording.
pub struct Recorder<C>
where
    C: Consumer<Item = f32>,
{
    consumer: C,
    sample_rate: u32,
    samples: Vec<f32>,
    recording: bool,
}

impl<C> Recorder<C>
where
    C: Consumer<Item = f32>,
{
    pub fn new(consumer: C, sample_rate: u32) -> Self {
        Self {
            consumer,
            sample_rate,
            samples: Vec::new(),
            recording: false,
        }
    }

    pub fn is_recording(&self) -> bool {
        self.recording
    }

    pub fn start(&mut self) {
        // Flush whatever accumulated while idle
        while self.consumer.try_pop().is_some() {}
        self.samples.clear();
        self.recording = true;
    }

    /// Drain pending capture. Call on a cadence while recording.
    pub fn poll(&mut self) {
        if self.recording {
            while let Some(sample) = self.consumer.try_pop() {
                self.samples.push(sample);
            }
        } else {
            while self.consumer.try_pop().is_some() {}
        }
    }

    /// End the session and encode the utterance.
    pub fn stop(&mut self) -> Result<RecordedUtterance> {
        self.poll();
        self.recording = false;

        Ok(RecordedUtterance {
            wav: encode_wav(&self.samples, self.sample_rate)?,
            sample_rate: self.sample_rate,
        })
    }
}

/// Mono 16-bit PCM WAV. The oracle sniffs the container, it only needs
/// the rate in the header to match the capture rate.
pub fn encode_wav(samples: &[f32], sample_rate: u32) -> Result<Vec<u8>> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut cursor = std::io::Cursor::new(Vec::new());
    let mut writer = hound::WavWriter::new(&mut cursor, spec)?;

    for &sample in samples {
        let clamped = sample.clamp(-1.0, 1.0);
        writer.write_sample((clamped * i16::MAX as f32) as i16)?;
    }

    writer.finalize()?;

    Ok(cursor.into_inner())
}
