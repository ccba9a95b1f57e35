//! Voice table and a sample generator for synthesized cues.
//!
//! Pure code: nothing here touches an audio device.

use crate::types::{Mix, SoundEvent};

/// Note frequencies in Hz (A4 = 440).
pub mod note {
    pub const C1: f32 = 32.70;
    pub const C2: f32 = 65.41;
    pub const C3: f32 = 130.81;
    pub const C4: f32 = 261.63;
    pub const C5: f32 = 523.25;
    pub const G4: f32 = 392.00;
    pub const G5: f32 = 783.99;
}

/// Key-down time of every cue (an eighth note at 120 bpm).
pub const GATE_MS: u32 = 250;

/// Menu cues play 12 dB below gameplay.
const MENU_GAIN: f32 = 0.25;
/// UI cues play 5 dB above their mix.
const UI_GAIN: f32 = 1.78;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Triangle,
    Sawtooth,
}

impl Waveform {
    /// Sample at `phase` in cycles, `[0, 1)`.
    fn sample(self, phase: f32) -> f32 {
        match self {
            Waveform::Sine => (phase * std::f32::consts::TAU).sin(),
            Waveform::Square => {
                if phase < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
            Waveform::Triangle => 1.0 - 4.0 * (phase - 0.5).abs(),
            Waveform::Sawtooth => 2.0 * phase - 1.0,
        }
    }
}

/// One synthesized note with an ADSR envelope and an optional downward pitch sweep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Voice {
    pub waveform: Waveform,
    pub freq_hz: f32,
    pub attack_ms: f32,
    pub decay_ms: f32,
    pub sustain: f32,
    pub release_ms: f32,
    /// Start this many octaves above `freq_hz` and fall to it over `sweep_ms`.
    pub sweep_octaves: f32,
    pub sweep_ms: f32,
    pub gain: f32,
    /// Silence before the note starts.
    pub delay_ms: u32,
}

impl Voice {
    fn new(waveform: Waveform, freq_hz: f32) -> Self {
        Self {
            waveform,
            freq_hz,
            attack_ms: 5.0,
            decay_ms: 100.0,
            sustain: 0.0,
            release_ms: 100.0,
            sweep_octaves: 0.0,
            sweep_ms: 0.0,
            gain: 1.0,
            delay_ms: 0,
        }
    }

    fn envelope(mut self, attack_ms: f32, decay_ms: f32, sustain: f32, release_ms: f32) -> Self {
        self.attack_ms = attack_ms;
        self.decay_ms = decay_ms;
        self.sustain = sustain;
        self.release_ms = release_ms;
        self
    }

    fn sweep(mut self, octaves: f32, ms: f32) -> Self {
        self.sweep_octaves = octaves;
        self.sweep_ms = ms;
        self
    }

    /// Whole length including the delay and the release tail.
    pub fn duration_ms(&self) -> u32 {
        self.delay_ms + GATE_MS + self.release_ms.ceil() as u32
    }

    /// Envelope level `t_ms` after the note started (delay excluded).
    fn level(&self, t_ms: f32) -> f32 {
        let gate = GATE_MS as f32;
        let held = |t: f32| {
            if t < self.attack_ms {
                t / self.attack_ms.max(0.001)
            } else if t < self.attack_ms + self.decay_ms {
                let k = (t - self.attack_ms) / self.decay_ms.max(0.001);
                1.0 + (self.sustain - 1.0) * k
            } else {
                self.sustain
            }
        };
        if t_ms < gate {
            held(t_ms)
        } else {
            let k = ((t_ms - gate) / self.release_ms.max(0.001)).min(1.0);
            held(gate) * (1.0 - k)
        }
    }

    fn freq_at(&self, t_ms: f32) -> f32 {
        if self.sweep_octaves <= 0.0 || self.sweep_ms <= 0.0 {
            return self.freq_hz;
        }
        let remaining = (-t_ms / self.sweep_ms).exp();
        self.freq_hz * (self.sweep_octaves * remaining).exp2()
    }
}

/// Voice to play for a cue, or none when the mix has no instrument for it.
///
/// The menu mix only carries the lock, clear and UI cues.
pub fn voice_for(event: SoundEvent, mix: Mix) -> Option<Voice> {
    use Waveform::*;

    let voice = match (event, mix) {
        (SoundEvent::Lock, Mix::Game) => Voice::new(Square, note::C2).envelope(1.0, 100.0, 0.0, 50.0),
        (SoundEvent::Lock, Mix::Menu) => Voice::new(Square, note::C1).envelope(1.0, 100.0, 0.0, 50.0),
        (SoundEvent::LineClear, Mix::Game) => {
            Voice::new(Sine, note::C5).envelope(10.0, 300.0, 0.1, 200.0)
        }
        (SoundEvent::LineClear, Mix::Menu) => {
            Voice::new(Sine, note::C4).envelope(10.0, 300.0, 0.1, 200.0)
        }
        (SoundEvent::LineClearQuad, Mix::Game) => Voice {
            delay_ms: 100,
            ..Voice::new(Sine, note::G5).envelope(10.0, 300.0, 0.1, 200.0)
        },
        (SoundEvent::UiHover, _) => Voice {
            gain: UI_GAIN,
            ..Voice::new(Sine, note::C5).envelope(1.0, 100.0, 0.0, 100.0)
        },
        (SoundEvent::UiClick, _) => Voice {
            gain: UI_GAIN,
            ..Voice::new(Triangle, note::C4).envelope(10.0, 200.0, 0.1, 100.0)
        },
        (_, Mix::Menu) => return None,
        (SoundEvent::Move, Mix::Game) => {
            Voice::new(Square, note::C2).envelope(5.0, 100.0, 0.05, 100.0)
        }
        (SoundEvent::Rotate, Mix::Game) => {
            Voice::new(Triangle, note::G4).envelope(10.0, 50.0, 0.0, 100.0)
        }
        (SoundEvent::SoftDrop, Mix::Game) => Voice::new(Sine, note::C1)
            .envelope(1.0, 100.0, 0.0, 100.0)
            .sweep(2.0, 10.0),
        (SoundEvent::HardDrop, Mix::Game) => Voice::new(Sine, note::C3)
            .envelope(1.0, 500.0, 0.0, 400.0)
            .sweep(10.0, 50.0),
        (SoundEvent::BlockFall, Mix::Game) => Voice::new(Sine, note::C1)
            .envelope(1.0, 50.0, 0.0, 50.0)
            .sweep(1.0, 8.0),
        (SoundEvent::GameOver, Mix::Game) => {
            Voice::new(Sawtooth, note::C3).envelope(100.0, 1000.0, 0.2, 1000.0)
        }
    };

    let gain = match mix {
        Mix::Game => voice.gain,
        Mix::Menu => voice.gain * MENU_GAIN,
    };
    Some(Voice { gain, ..voice })
}

/// Mono sample stream for one voice.
#[derive(Debug, Clone)]
pub struct Tone {
    voice: Voice,
    sample_rate: u32,
    frame: u64,
    total_frames: u64,
    delay_frames: u64,
    phase: f32,
}

impl Tone {
    pub const SAMPLE_RATE: u32 = 44_100;
    /// Headroom so layered cues do not clip.
    const MASTER: f32 = 0.2;

    pub fn new(voice: Voice) -> Self {
        Self::with_sample_rate(voice, Self::SAMPLE_RATE)
    }

    pub fn with_sample_rate(voice: Voice, sample_rate: u32) -> Self {
        let per_ms = u64::from(sample_rate) / 1000;
        Self {
            voice,
            sample_rate,
            frame: 0,
            total_frames: u64::from(voice.duration_ms()) * per_ms,
            delay_frames: u64::from(voice.delay_ms) * per_ms,
            phase: 0.0,
        }
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn total_frames(&self) -> u64 {
        self.total_frames
    }
}

impl Iterator for Tone {
    type Item = f32;

    fn next(&mut self) -> Option<f32> {
        if self.frame >= self.total_frames {
            return None;
        }
        let frame = self.frame;
        self.frame += 1;
        if frame < self.delay_frames {
            return Some(0.0);
        }

        let t_ms = (frame - self.delay_frames) as f32 * 1000.0 / self.sample_rate as f32;
        let sample = self.voice.waveform.sample(self.phase) * self.voice.level(t_ms);
        self.phase = (self.phase + self.voice.freq_at(t_ms) / self.sample_rate as f32).fract();
        Some(sample * self.voice.gain * Self::MASTER)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.total_frames.saturating_sub(self.frame) as usize;
        (left, Some(left))
    }
}
