//! Audio Buffer Management
//!
//! Provides the core audio buffer type for Entrain. All internal processing
//! uses 44.1kHz 32-bit float, mono or stereo.
//!
//! Buffers are treated as immutable values: every operation (gain, overlay,
//! truncation, crossfaded append) returns a new buffer. This keeps the
//! composition pipeline free of shared mutable state and means a failed
//! stage never leaves a half-modified buffer behind.

use crate::error::{EntrainError, Result};

/// Internal sample rate for all processing (44.1kHz)
pub const INTERNAL_SAMPLE_RATE: u32 = 44_100;

/// Convert decibels to linear amplitude
#[inline]
pub fn db_to_linear(db: f32) -> f32 {
    10.0_f32.powf(db / 20.0)
}

/// Convert linear amplitude to decibels
///
/// Returns `-f32::INFINITY` for zero or negative input.
#[inline]
pub fn linear_to_db(linear: f32) -> f32 {
    if linear <= 0.0 {
        f32::NEG_INFINITY
    } else {
        20.0 * linear.log10()
    }
}

/// Audio channel configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ChannelLayout {
    /// Single channel (mono)
    Mono,
    /// Two channels (stereo: left, right)
    #[default]
    Stereo,
}

impl ChannelLayout {
    /// Returns the number of channels for this layout
    pub fn num_channels(&self) -> usize {
        match self {
            ChannelLayout::Mono => 1,
            ChannelLayout::Stereo => 2,
        }
    }

    /// Create a ChannelLayout from a channel count
    pub fn from_count(count: usize) -> Option<Self> {
        match count {
            1 => Some(ChannelLayout::Mono),
            2 => Some(ChannelLayout::Stereo),
            _ => None,
        }
    }
}

/// Core audio buffer type for all processing in Entrain
///
/// Stores audio as non-interleaved 32-bit floating point samples, one
/// `Vec<f32>` per channel, at [`INTERNAL_SAMPLE_RATE`].
#[derive(Debug, Clone, PartialEq)]
pub struct AudioBuffer {
    /// Sample data: outer Vec is channels, inner Vec is samples
    samples: Vec<Vec<f32>>,
    /// Sample rate in Hz
    sample_rate: u32,
}

/// Number of sample frames covering `ms` milliseconds at the internal rate
pub(crate) fn frames_for_ms(ms: i64) -> usize {
    debug_assert!(ms >= 0);
    (ms * INTERNAL_SAMPLE_RATE as i64 / 1000) as usize
}

impl AudioBuffer {
    /// Create a silent buffer with the given frame count and layout
    pub fn silent(num_frames: usize, layout: ChannelLayout) -> Self {
        Self {
            samples: vec![vec![0.0_f32; num_frames]; layout.num_channels()],
            sample_rate: INTERNAL_SAMPLE_RATE,
        }
    }

    /// Create a silent buffer of the given duration in milliseconds
    pub fn silent_ms(duration_ms: i64, layout: ChannelLayout) -> Result<Self> {
        if duration_ms < 0 {
            return Err(EntrainError::invalid_parameter(format!(
                "duration must be >= 0 ms, got {}",
                duration_ms
            )));
        }
        Ok(Self::silent(frames_for_ms(duration_ms), layout))
    }

    /// Create a buffer from per-channel sample data
    ///
    /// Fails if the channel count is not 1 or 2, or channel lengths differ.
    pub fn from_channels(samples: Vec<Vec<f32>>, sample_rate: u32) -> Result<Self> {
        if ChannelLayout::from_count(samples.len()).is_none() {
            return Err(EntrainError::UnsupportedFormat {
                format: format!("{}-channel audio (only mono/stereo supported)", samples.len()),
            });
        }
        if samples.windows(2).any(|w| w[0].len() != w[1].len()) {
            return Err(EntrainError::Format {
                reason: "channels have differing lengths".to_string(),
                source: None,
            });
        }
        Ok(Self {
            samples,
            sample_rate,
        })
    }

    /// Create an audio buffer from interleaved sample data
    pub fn from_interleaved(
        interleaved: &[f32],
        layout: ChannelLayout,
        sample_rate: u32,
    ) -> Result<Self> {
        let num_channels = layout.num_channels();

        if interleaved.len() % num_channels != 0 {
            return Err(EntrainError::Format {
                reason: format!(
                    "interleaved data length {} is not divisible by channel count {}",
                    interleaved.len(),
                    num_channels
                ),
                source: None,
            });
        }

        let num_frames = interleaved.len() / num_channels;
        let mut samples = vec![Vec::with_capacity(num_frames); num_channels];
        for frame in interleaved.chunks_exact(num_channels) {
            for (ch, &sample) in frame.iter().enumerate() {
                samples[ch].push(sample);
            }
        }

        Ok(Self {
            samples,
            sample_rate,
        })
    }

    /// Pair two equal-length mono buffers into one stereo buffer
    pub fn stereo_from_mono(left: &AudioBuffer, right: &AudioBuffer) -> Result<Self> {
        if left.num_channels() != 1 || right.num_channels() != 1 {
            return Err(EntrainError::invalid_parameter(
                "stereo pairing requires two mono buffers",
            ));
        }
        if left.len() != right.len() {
            return Err(EntrainError::invalid_parameter(format!(
                "stereo pairing requires equal lengths, got {} and {}",
                left.len(),
                right.len()
            )));
        }
        if left.sample_rate != right.sample_rate {
            return Err(EntrainError::invalid_parameter(
                "stereo pairing requires matching sample rates",
            ));
        }
        Ok(Self {
            samples: vec![left.samples[0].clone(), right.samples[0].clone()],
            sample_rate: left.sample_rate,
        })
    }

    /// Convert the buffer to interleaved format
    pub fn to_interleaved(&self) -> Vec<f32> {
        let num_channels = self.num_channels();
        let num_frames = self.len();
        let mut interleaved = Vec::with_capacity(num_channels * num_frames);

        for frame in 0..num_frames {
            for channel in &self.samples {
                interleaved.push(channel[frame]);
            }
        }

        interleaved
    }

    /// Get the number of channels
    #[inline]
    pub fn num_channels(&self) -> usize {
        self.samples.len()
    }

    /// Get the number of sample frames per channel
    #[inline]
    pub fn len(&self) -> usize {
        self.samples.first().map(|ch| ch.len()).unwrap_or(0)
    }

    /// Check if the buffer is empty (no frames)
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sample rate in Hz
    #[inline]
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Duration in milliseconds, rounded to the nearest millisecond
    pub fn duration_ms(&self) -> i64 {
        let rate = self.sample_rate as i64;
        (self.len() as i64 * 1000 + rate / 2) / rate
    }

    /// Duration in seconds
    pub fn duration_secs(&self) -> f64 {
        self.len() as f64 / self.sample_rate as f64
    }

    /// Get immutable access to a channel's samples
    ///
    /// # Panics
    /// Panics if the channel index is out of bounds
    #[inline]
    pub fn channel(&self, index: usize) -> &[f32] {
        &self.samples[index]
    }

    /// Get a sample at the specified channel and frame
    #[inline]
    pub fn get_sample(&self, channel: usize, frame: usize) -> Option<f32> {
        self.samples
            .get(channel)
            .and_then(|ch| ch.get(frame).copied())
    }

    /// Channel data for `index`, falling back to channel 0 for mono sources
    #[inline]
    fn channel_or_first(&self, index: usize) -> &[f32] {
        self.samples.get(index).unwrap_or(&self.samples[0])
    }

    /// Return a copy of this buffer with a uniform gain applied
    ///
    /// `gain_db` is a logarithmic amplitude offset; 0 dB is unity.
    pub fn with_gain(&self, gain_db: f32) -> AudioBuffer {
        let gain = db_to_linear(gain_db);
        let samples = self
            .samples
            .iter()
            .map(|ch| ch.iter().map(|&s| s * gain).collect())
            .collect();
        AudioBuffer {
            samples,
            sample_rate: self.sample_rate,
        }
    }

    /// Additively overlay `other` onto this buffer starting at frame 0
    ///
    /// The result keeps this buffer's length; anything in `other` past that
    /// length is dropped, and a shorter `other` covers only the overlap.
    /// The result has the wider channel count of the two; a mono source is
    /// upmixed by reusing its single channel. Both buffers are expected to
    /// share the internal sample rate.
    pub fn overlay(&self, other: &AudioBuffer) -> AudioBuffer {
        let num_channels = self.num_channels().max(other.num_channels());
        let num_frames = self.len();
        let span = num_frames.min(other.len());

        let mut samples = Vec::with_capacity(num_channels);
        for ch in 0..num_channels {
            let base = self.channel_or_first(ch);
            let over = other.channel_or_first(ch);
            let mut out = Vec::with_capacity(num_frames);
            for i in 0..span {
                out.push(base[i] + over[i]);
            }
            out.extend_from_slice(&base[span..]);
            samples.push(out);
        }

        AudioBuffer {
            samples,
            sample_rate: self.sample_rate,
        }
    }

    /// Return the first `num_frames` frames of this buffer
    pub fn truncated_frames(&self, num_frames: usize) -> AudioBuffer {
        let keep = num_frames.min(self.len());
        let samples = self.samples.iter().map(|ch| ch[..keep].to_vec()).collect();
        AudioBuffer {
            samples,
            sample_rate: self.sample_rate,
        }
    }

    /// Return a copy truncated to `duration_ms` milliseconds (hard cut)
    pub fn truncated(&self, duration_ms: i64) -> AudioBuffer {
        self.truncated_frames(frames_for_ms(duration_ms.max(0)))
    }

    /// Append `next` after this buffer, blending a linear crossfade over
    /// `crossfade_frames` at the seam
    ///
    /// The crossfade is clamped to the shorter of the two segments, so the
    /// result length is `self.len() + next.len() - clamped_fade`.
    pub fn append_crossfade(&self, next: &AudioBuffer, crossfade_frames: usize) -> AudioBuffer {
        let fade = crossfade_frames.min(self.len()).min(next.len());
        let num_channels = self.num_channels().max(next.num_channels());
        let out_frames = self.len() + next.len() - fade;
        let tail_start = self.len() - fade;

        let mut samples = Vec::with_capacity(num_channels);
        for ch in 0..num_channels {
            let a = self.channel_or_first(ch);
            let b = next.channel_or_first(ch);
            let mut out = Vec::with_capacity(out_frames);
            out.extend_from_slice(&a[..tail_start]);
            for i in 0..fade {
                let t = i as f32 / fade as f32;
                out.push(a[tail_start + i] * (1.0 - t) + b[i] * t);
            }
            out.extend_from_slice(&b[fade..]);
            samples.push(out);
        }

        AudioBuffer {
            samples,
            sample_rate: self.sample_rate,
        }
    }

    /// Overall RMS level in dB across all channels
    ///
    /// Returns `-f32::INFINITY` for empty or silent buffers.
    pub fn rms_db(&self) -> f32 {
        let total = self.num_channels() * self.len();
        if total == 0 {
            return f32::NEG_INFINITY;
        }

        let sum_squares: f64 = self
            .samples
            .iter()
            .flat_map(|ch| ch.iter())
            .map(|&s| (s as f64) * (s as f64))
            .sum();

        linear_to_db((sum_squares / total as f64).sqrt() as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn buffer_from(channels: Vec<Vec<f32>>) -> AudioBuffer {
        AudioBuffer::from_channels(channels, INTERNAL_SAMPLE_RATE).unwrap()
    }

    #[test]
    fn test_db_to_linear() {
        assert_abs_diff_eq!(db_to_linear(0.0), 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(db_to_linear(-6.0206), 0.5, epsilon = 1e-4);
        assert_abs_diff_eq!(db_to_linear(-20.0), 0.1, epsilon = 1e-6);
    }

    #[test]
    fn test_linear_to_db() {
        assert_abs_diff_eq!(linear_to_db(1.0), 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(linear_to_db(0.1), -20.0, epsilon = 1e-4);
        assert!(linear_to_db(0.0).is_infinite() && linear_to_db(0.0) < 0.0);
    }

    #[test]
    fn test_silent_ms_frame_count() {
        let buf = AudioBuffer::silent_ms(1000, ChannelLayout::Mono).unwrap();
        assert_eq!(buf.len(), INTERNAL_SAMPLE_RATE as usize);
        assert_eq!(buf.duration_ms(), 1000);
    }

    #[test]
    fn test_silent_ms_negative() {
        let result = AudioBuffer::silent_ms(-1, ChannelLayout::Mono);
        assert!(matches!(
            result,
            Err(EntrainError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_from_channels_rejects_mismatched_lengths() {
        let result =
            AudioBuffer::from_channels(vec![vec![0.0; 10], vec![0.0; 9]], INTERNAL_SAMPLE_RATE);
        assert!(matches!(result, Err(EntrainError::Format { .. })));
    }

    #[test]
    fn test_from_channels_rejects_channel_count() {
        let result =
            AudioBuffer::from_channels(vec![vec![0.0; 4]; 6], INTERNAL_SAMPLE_RATE);
        assert!(matches!(
            result,
            Err(EntrainError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn test_interleaved_roundtrip() {
        let original = vec![0.1, 0.2, 0.3, 0.4, 0.5, 0.6];
        let buf = AudioBuffer::from_interleaved(
            &original,
            ChannelLayout::Stereo,
            INTERNAL_SAMPLE_RATE,
        )
        .unwrap();
        assert_eq!(buf.channel(0), &[0.1, 0.3, 0.5]);
        assert_eq!(buf.channel(1), &[0.2, 0.4, 0.6]);
        assert_eq!(buf.to_interleaved(), original);
    }

    #[test]
    fn test_stereo_from_mono() {
        let left = buffer_from(vec![vec![0.1, 0.2]]);
        let right = buffer_from(vec![vec![0.3, 0.4]]);
        let stereo = AudioBuffer::stereo_from_mono(&left, &right).unwrap();

        assert_eq!(stereo.num_channels(), 2);
        assert_eq!(stereo.channel(0), &[0.1, 0.2]);
        assert_eq!(stereo.channel(1), &[0.3, 0.4]);
    }

    #[test]
    fn test_stereo_from_mono_rejects_length_mismatch() {
        let left = buffer_from(vec![vec![0.1, 0.2]]);
        let right = buffer_from(vec![vec![0.3]]);
        assert!(AudioBuffer::stereo_from_mono(&left, &right).is_err());
    }

    #[test]
    fn test_with_gain_is_nondestructive() {
        let buf = buffer_from(vec![vec![0.5; 100]]);
        let quieter = buf.with_gain(-6.0206);

        assert_abs_diff_eq!(quieter.channel(0)[0], 0.25, epsilon = 1e-3);
        // Source untouched
        assert_abs_diff_eq!(buf.channel(0)[0], 0.5, epsilon = 1e-6);
    }

    #[test]
    fn test_overlay_additive() {
        let base = buffer_from(vec![vec![0.1, 0.1, 0.1, 0.1]]);
        let over = buffer_from(vec![vec![0.2, 0.2]]);
        let out = base.overlay(&over);

        assert_eq!(out.len(), 4);
        assert_abs_diff_eq!(out.channel(0)[0], 0.3, epsilon = 1e-6);
        assert_abs_diff_eq!(out.channel(0)[1], 0.3, epsilon = 1e-6);
        // Past the overlap, base is unchanged
        assert_abs_diff_eq!(out.channel(0)[2], 0.1, epsilon = 1e-6);
    }

    #[test]
    fn test_overlay_mono_onto_stereo_widens() {
        let base = buffer_from(vec![vec![0.1, 0.1]]);
        let over = buffer_from(vec![vec![0.2, 0.2], vec![0.4, 0.4]]);
        let out = base.overlay(&over);

        assert_eq!(out.num_channels(), 2);
        assert_eq!(out.len(), 2);
        assert_abs_diff_eq!(out.channel(0)[0], 0.3, epsilon = 1e-6);
        assert_abs_diff_eq!(out.channel(1)[0], 0.5, epsilon = 1e-6);
    }

    #[test]
    fn test_overlay_longer_track_is_cut_at_base_length() {
        let base = buffer_from(vec![vec![0.1, 0.1]]);
        let over = buffer_from(vec![vec![0.2; 10]]);
        assert_eq!(base.overlay(&over).len(), 2);
    }

    #[test]
    fn test_truncated_frames() {
        let buf = buffer_from(vec![vec![0.1, 0.2, 0.3], vec![0.4, 0.5, 0.6]]);
        let cut = buf.truncated_frames(2);

        assert_eq!(cut.len(), 2);
        assert_eq!(cut.channel(1), &[0.4, 0.5]);
        // Truncating past the end is a no-op
        assert_eq!(buf.truncated_frames(100).len(), 3);
    }

    #[test]
    fn test_append_crossfade_length() {
        let a = buffer_from(vec![vec![1.0; 100]]);
        let b = buffer_from(vec![vec![0.0; 100]]);

        let joined = a.append_crossfade(&b, 40);
        assert_eq!(joined.len(), 160);

        // Crossfade clamps to the shorter segment
        let joined = a.append_crossfade(&b, 500);
        assert_eq!(joined.len(), 100);
    }

    #[test]
    fn test_append_crossfade_blends() {
        let a = buffer_from(vec![vec![1.0; 10]]);
        let b = buffer_from(vec![vec![0.0; 10]]);
        let joined = a.append_crossfade(&b, 4);

        // Mid-fade samples sit between the two levels
        let mid = joined.channel(0)[8];
        assert!(mid > 0.0 && mid < 1.0, "expected blended sample, got {}", mid);
        // Before the seam the first segment is intact
        assert_abs_diff_eq!(joined.channel(0)[5], 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_rms_db_sine() {
        let num_frames = INTERNAL_SAMPLE_RATE as usize;
        let samples: Vec<f32> = (0..num_frames)
            .map(|i| {
                let t = i as f32 / INTERNAL_SAMPLE_RATE as f32;
                (2.0 * std::f32::consts::PI * 440.0 * t).sin()
            })
            .collect();
        let buf = buffer_from(vec![samples]);

        // Full-scale sine has RMS of 1/sqrt(2) ~= -3.01 dB
        assert_abs_diff_eq!(buf.rms_db(), -3.01, epsilon = 0.05);
    }

    #[test]
    fn test_rms_db_empty() {
        let buf = AudioBuffer::silent(0, ChannelLayout::Mono);
        assert!(buf.rms_db().is_infinite());
    }
}
