use std::time::Duration;

use common::log;
use rodio::{OutputStream, OutputStreamHandle, Sink, Source};

const MUSIC_VOLUME: f32 = 0.35;

/// All sound output. Audio is best-effort: when no output device exists
/// the game keeps running silently.
pub struct Sfx {
    _stream: Option<OutputStream>,
    handle: Option<OutputStreamHandle>,
    music_sink: Option<Sink>,
    volume: f32,
}

impl Sfx {
    pub fn new(volume: f32, music_enabled: bool) -> Self {
        let (stream, handle) = match OutputStream::try_default() {
            Ok((stream, handle)) => (Some(stream), Some(handle)),
            Err(e) => {
                log!("Audio unavailable: {}", e);
                (None, None)
            }
        };

        let music_sink = match (&handle, music_enabled) {
            (Some(handle), true) => Sink::try_new(handle).ok().map(|sink| {
                sink.set_volume(MUSIC_VOLUME * volume);
                sink.append(MusicLoop::new());
                sink
            }),
            _ => None,
        };

        Self {
            _stream: stream,
            handle,
            music_sink,
            volume,
        }
    }

    pub fn play_eat(&self) {
        self.play_tone(880.0, Duration::from_millis(90), 0.5);
    }

    pub fn play_game_over(&self) {
        self.play_tone(110.0, Duration::from_millis(400), 0.7);
    }

    /// Background music stops with the game and picks up where it left
    /// off on resume.
    pub fn pause_music(&self) {
        if let Some(sink) = &self.music_sink {
            sink.pause();
        }
    }

    pub fn resume_music(&self) {
        if let Some(sink) = &self.music_sink {
            sink.play();
        }
    }

    fn play_tone(&self, freq_hz: f32, length: Duration, gain: f32) {
        let Some(handle) = &self.handle else {
            return;
        };
        let Ok(sink) = Sink::try_new(handle) else {
            return;
        };
        sink.set_volume(gain * self.volume);
        sink.append(Tone::new(freq_hz, length));
        sink.detach();
    }
}

/// A single enveloped sine blip. Generated on the fly so the binary
/// ships no audio assets.
struct Tone {
    freq_hz: f32,
    sample_rate: u32,
    total_frames: u64,
    frame: u64,
}

impl Tone {
    fn new(freq_hz: f32, length: Duration) -> Self {
        let sample_rate = 44_100;
        Self {
            freq_hz,
            sample_rate,
            total_frames: (length.as_secs_f32() * sample_rate as f32) as u64,
            frame: 0,
        }
    }
}

impl Iterator for Tone {
    type Item = f32;

    fn next(&mut self) -> Option<Self::Item> {
        if self.frame >= self.total_frames {
            return None;
        }

        let t = self.frame as f32 / self.sample_rate as f32;
        let phase = 2.0 * std::f32::consts::PI * self.freq_hz * t;

        // Short attack/release ramps keep the blip from clicking.
        let ramp_frames = (self.sample_rate / 200) as u64;
        let from_end = self.total_frames - self.frame;
        let env = (self.frame.min(from_end).min(ramp_frames)) as f32 / ramp_frames.max(1) as f32;

        self.frame += 1;
        Some(phase.sin() * 0.6 * env)
    }
}

impl Source for Tone {
    fn current_frame_len(&self) -> Option<usize> {
        None
    }

    fn channels(&self) -> u16 {
        1
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn total_duration(&self) -> Option<Duration> {
        Some(Duration::from_secs_f32(
            self.total_frames as f32 / self.sample_rate as f32,
        ))
    }
}

/// Endless procedural background loop: a slow minor arpeggio with a soft
/// envelope per note.
struct MusicLoop {
    sample_rate: u32,
    frame: u64,
}

impl MusicLoop {
    fn new() -> Self {
        Self {
            sample_rate: 44_100,
            frame: 0,
        }
    }
}

impl Iterator for MusicLoop {
    type Item = f32;

    fn next(&mut self) -> Option<Self::Item> {
        const NOTES_HZ: [f32; 8] = [196.0, 233.08, 293.66, 233.08, 174.61, 220.0, 261.63, 220.0];

        let note_len_frames = (self.sample_rate as u64) / 2;
        let note_idx = ((self.frame / note_len_frames) % NOTES_HZ.len() as u64) as usize;
        let freq_hz = NOTES_HZ[note_idx];

        let pos_in_note = self.frame % note_len_frames;
        let t = pos_in_note as f32 / self.sample_rate as f32;
        let phase = 2.0 * std::f32::consts::PI * freq_hz * t;

        let fade_frames = (self.sample_rate / 50) as u64;
        let from_note_end = note_len_frames - pos_in_note;
        let env =
            (pos_in_note.min(from_note_end).min(fade_frames)) as f32 / fade_frames.max(1) as f32;

        self.frame = self.frame.wrapping_add(1);
        Some((phase.sin() + (phase * 2.0).sin() * 0.25) * 0.2 * env)
    }
}

impl Source for MusicLoop {
    fn current_frame_len(&self) -> Option<usize> {
        None
    }

    fn channels(&self) -> u16 {
        1
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn total_duration(&self) -> Option<Duration> {
        None
    }
}
