//! Loop engine
//!
//! Repeats a buffer by fixed count or until a target duration, blending a
//! crossfade at each repeat boundary, then trims to exact length.

use crate::audio::buffer::{frames_for_ms, AudioBuffer};
use crate::error::{EntrainError, Result};

/// How a buffer should be repeated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopMode {
    /// Repeat the buffer this many times (>= 1)
    Count(i64),
    /// Repeat until the result covers this many milliseconds, then trim
    Duration(i64),
}

/// Looping parameters: an optional mode plus a crossfade length
///
/// With no mode set, rendering is the identity and returns the input
/// unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopSpec {
    mode: Option<LoopMode>,
    crossfade_ms: i64,
}

impl LoopSpec {
    /// Identity spec: no looping
    pub fn identity() -> Self {
        Self {
            mode: None,
            crossfade_ms: 0,
        }
    }

    /// Repeat `count` times with `crossfade_ms` blended at each boundary
    pub fn by_count(count: i64, crossfade_ms: i64) -> Self {
        Self {
            mode: Some(LoopMode::Count(count)),
            crossfade_ms,
        }
    }

    /// Repeat until `target_ms`, then hard-trim to exactly that length
    pub fn to_duration(target_ms: i64, crossfade_ms: i64) -> Self {
        Self {
            mode: Some(LoopMode::Duration(target_ms)),
            crossfade_ms,
        }
    }

    pub fn mode(&self) -> Option<LoopMode> {
        self.mode
    }

    pub fn crossfade_ms(&self) -> i64 {
        self.crossfade_ms
    }
}

/// Renders looped buffers according to a [`LoopSpec`]
pub struct LoopEngine;

impl LoopEngine {
    /// Loop `buffer` according to `spec`, producing a new buffer
    ///
    /// Count mode yields a length of `count*len - (count-1)*crossfade` when
    /// the crossfade is shorter than the buffer; the crossfade is clamped
    /// to the buffer length otherwise. Duration mode always yields exactly
    /// the target length and rejects an empty input rather than looping
    /// forever.
    pub fn render(buffer: &AudioBuffer, spec: &LoopSpec) -> Result<AudioBuffer> {
        if spec.crossfade_ms < 0 {
            return Err(EntrainError::invalid_parameter(format!(
                "crossfade must be >= 0 ms, got {}",
                spec.crossfade_ms
            )));
        }
        let fade_frames = frames_for_ms(spec.crossfade_ms);

        match spec.mode {
            None => Ok(buffer.clone()),
            Some(LoopMode::Count(count)) => {
                if count < 1 {
                    return Err(EntrainError::invalid_parameter(format!(
                        "loop count must be >= 1, got {}",
                        count
                    )));
                }
                let mut out = buffer.clone();
                for _ in 1..count {
                    out = out.append_crossfade(buffer, fade_frames);
                }
                Ok(out)
            }
            Some(LoopMode::Duration(target_ms)) => {
                if target_ms < 0 {
                    return Err(EntrainError::invalid_parameter(format!(
                        "loop target duration must be >= 0 ms, got {}",
                        target_ms
                    )));
                }
                if buffer.is_empty() {
                    return Err(EntrainError::invalid_parameter(
                        "cannot loop an empty buffer to a target duration",
                    ));
                }

                let target_frames = frames_for_ms(target_ms);
                let mut out = buffer.clone();
                while out.len() < target_frames {
                    let grown = out.append_crossfade(buffer, fade_frames);
                    if grown.len() <= out.len() {
                        // Crossfade swallows the whole repeat
                        return Err(EntrainError::invalid_parameter(format!(
                            "crossfade of {} ms consumes the entire {} ms buffer",
                            spec.crossfade_ms,
                            buffer.duration_ms()
                        )));
                    }
                    out = grown;
                }
                Ok(out.truncated_frames(target_frames))
            }
        }
    }
}
