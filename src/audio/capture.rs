use anyhow::{Result, anyhow};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use ringbuf::traits::Producer;
use tracing::{info, error};

/// Live microphone input feeding a ring buffer of f32 samples.
/// The stream runs until this is dropped.
pub struct AudioCapture {
    _stream: cpal::Stream,
    pub sample_rate: u32,
}

impl AudioCapture {
    pub fn new<P>(mut producer: P) -> Result<Self>
    where
        P: Producer<Item = f32> + Send + 'static,
    {
        let host = cpal::default_host();
        let device = host
            .default_input_device()
            .ok_or_else(|| anyhow!("no input device available"))?;

        info!("Audio input device: {}", device.name().unwrap_or_default());

        // The oracle accepts encoded utterances at 8k, 12k, 16k, 24k and
        // 48k. Prefer 48k, which most input hardware runs natively.
        let target_rates = [48_000, 16_000, 32_000, 8_000];
        let mut selected_config = None;
        let mut selected_rate = 0;

        for &rate in &target_rates {
            let configs = device.supported_input_configs()?;
            for config_range in configs {
                if config_range.min_sample_rate().0 <= rate
                    && config_range.max_sample_rate().0 >= rate
                {
                    selected_config = Some(config_range.with_sample_rate(cpal::SampleRate(rate)));
                    selected_rate = rate;
                    break;
                }
            }
            if selected_config.is_some() {
                break;
            }
        }

        let config = match selected_config {
            Some(c) => c,
            None => {
                let def = device.default_input_config()?;
                selected_rate = def.sample_rate().0;
                def
            }
        };

        info!(
            "Audio config selected: rate={}Hz, channels={}",
            selected_rate,
            config.channels()
        );

        let err_fn = |err| error!("an error occurred on stream: {}", err);

        let stream = match config.sample_format() {
            cpal::SampleFormat::F32 => device.build_input_stream(
                &config.into(),
                move |data: &[f32], _: &_| write_input_data(data, &mut producer),
                err_fn,
                None,
            )?,
            cpal::SampleFormat::I16 => device.build_input_stream(
                &config.into(),
                move |data: &[i16], _: &_| write_input_data_i16(data, &mut producer),
                err_fn,
                None,
            )?,
            _ => return Err(anyhow!("unsupported sample format")),
        };

        stream.play()?;

        Ok(Self {
            _stream: stream,
            sample_rate: selected_rate,
        })
    }
}

fn write_input_data<P>(input: &[f32], producer: &mut P)
where
    P: Producer<Item = f32>,
{
    // If the ring is full we drop samples (lossy)
    producer.push_slice(input);
}

fn write_input_data_i16<P>(input: &[i16], producer: &mut P)
where
    P: Producer<Item = f32>,
{
    for &sample in input {
        let sample_f32 = sample as f32 / i16::MAX as f32;
        let _ = producer.try_push(sample_f32);
    }
}
