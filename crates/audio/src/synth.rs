//! Playback of synthesized cues on the default output device.

use std::time::Duration;

use rodio::{OutputStream, OutputStreamHandle, Sink, Source};

use crate::types::{Mix, SoundEvent};
use crate::voice::{voice_for, Tone};
use crate::{SoundError, SoundSink};

impl Source for Tone {
    fn current_frame_len(&self) -> Option<usize> {
        None
    }

    fn channels(&self) -> u16 {
        1
    }

    fn sample_rate(&self) -> u32 {
        Tone::sample_rate(self)
    }

    fn total_duration(&self) -> Option<Duration> {
        let ms = self.total_frames() * 1000 / u64::from(Tone::sample_rate(self).max(1));
        Some(Duration::from_millis(ms))
    }
}

/// Plays every cue on its own detached sink so cues overlap freely.
pub struct SynthSound {
    // Dropping the stream stops all output.
    _stream: OutputStream,
    handle: OutputStreamHandle,
}

impl SynthSound {
    pub fn new() -> Result<Self, SoundError> {
        let (stream, handle) = OutputStream::try_default().map_err(|e| SoundError::Device {
            message: e.to_string(),
        })?;
        Ok(Self {
            _stream: stream,
            handle,
        })
    }
}

impl SoundSink for SynthSound {
    fn trigger(&mut self, event: SoundEvent, mix: Mix) -> Result<(), SoundError> {
        let Some(voice) = voice_for(event, mix) else {
            return Ok(());
        };
        let sink = Sink::try_new(&self.handle).map_err(|e| SoundError::Playback {
            event: event.as_str(),
            message: e.to_string(),
        })?;
        sink.append(Tone::new(voice));
        sink.detach();
        Ok(())
    }
}
