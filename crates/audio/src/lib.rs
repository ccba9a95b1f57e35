//! Sound output for game cues.
//!
//! Cues are fire-and-forget: the game never waits on audio and a failing
//! device only costs the sound. Synthesized playback needs the `synth`
//! feature; without it every sink is silent.

#[cfg(feature = "synth")]
pub mod synth;
pub mod voice;

pub use blockfall_types as types;

use types::{Mix, SoundEvent};

#[cfg(feature = "synth")]
pub use synth::SynthSound;
pub use voice::{voice_for, Tone, Voice, Waveform};

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum SoundError {
    #[display("audio device unavailable: {message}")]
    Device { message: String },
    #[display("failed to play {event}: {message}")]
    Playback {
        event: &'static str,
        message: String,
    },
    #[display("built without audio support")]
    Unsupported,
}

/// Destination for sound cues.
pub trait SoundSink {
    fn trigger(&mut self, event: SoundEvent, mix: Mix) -> Result<(), SoundError>;
}

/// Discards every cue.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSound;

impl SoundSink for NullSound {
    fn trigger(&mut self, _event: SoundEvent, _mix: Mix) -> Result<(), SoundError> {
        Ok(())
    }
}

/// Keeps every cue in order. Used by tests and headless runs.
#[derive(Debug, Clone, Default)]
pub struct RecordingSound {
    pub played: Vec<(SoundEvent, Mix)>,
}

impl SoundSink for RecordingSound {
    fn trigger(&mut self, event: SoundEvent, mix: Mix) -> Result<(), SoundError> {
        self.played.push((event, mix));
        Ok(())
    }
}

impl<S: SoundSink + ?Sized> SoundSink for Box<S> {
    fn trigger(&mut self, event: SoundEvent, mix: Mix) -> Result<(), SoundError> {
        (**self).trigger(event, mix)
    }
}

/// Open the output for `enabled`; a disabled output is silent.
pub fn open(enabled: bool) -> Result<Box<dyn SoundSink>, SoundError> {
    if !enabled {
        return Ok(Box::new(NullSound));
    }
    open_device()
}

#[cfg(feature = "synth")]
fn open_device() -> Result<Box<dyn SoundSink>, SoundError> {
    Ok(Box::new(SynthSound::new()?))
}

#[cfg(not(feature = "synth"))]
fn open_device() -> Result<Box<dyn SoundSink>, SoundError> {
    Err(SoundError::Unsupported)
}
