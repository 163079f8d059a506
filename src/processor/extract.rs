use crate::core::{AudioSource, FadeSpec, ProcessedSamples, TimeRange};
use crate::error::{AudioError, AudioResult};
use crate::filter::{FadeEnvelope, Filter};
use log::debug;

/// Cut `range` out of `source` and apply the fade envelope to every channel
///
/// Frame count is `floor(end * rate) - floor(start * rate)`. Output samples
/// are clamped to [-1.0, 1.0]. The range is validated against the source
/// duration first; nothing is allocated for an invalid range.
pub fn extract(
    source: &AudioSource,
    range: &TimeRange,
    fade: &FadeSpec,
) -> AudioResult<ProcessedSamples> {
    let (start_idx, end_idx) = sample_bounds(source, range)?;
    let frame_count = end_idx - start_idx;

    let mut envelope = FadeEnvelope::from_spec(fade, source.sample_rate());

    debug!(
        "Extracting frames {}..{} ({} frames, {} channels), fade in/out {}/{} samples",
        start_idx,
        end_idx,
        frame_count,
        source.channel_count(),
        envelope.fade_in_samples(),
        envelope.fade_out_samples()
    );

    let channels = source
        .channels()
        .map(|channel| envelope.process(&channel[start_idx..end_idx]))
        .collect::<AudioResult<Vec<_>>>()?;

    Ok(ProcessedSamples::new(channels, source.sample_rate()))
}

/// Resolve a time range to `[start, end)` frame indices within `source`
fn sample_bounds(source: &AudioSource, range: &TimeRange) -> AudioResult<(usize, usize)> {
    let rate = source.sample_rate() as f64;
    let duration = source.duration_secs();

    if !range.start.is_finite() || !range.end.is_finite() {
        return Err(AudioError::InvalidRange(format!(
            "Range bounds must be finite, got {} to {}",
            range.start, range.end
        )));
    }

    if range.start < 0.0 || range.end <= range.start {
        return Err(AudioError::InvalidRange(format!(
            "Range {}s to {}s is empty or negative",
            range.start, range.end
        )));
    }

    // Half a sample of slack absorbs float error in caller-computed durations
    if range.end > duration + 0.5 / rate {
        return Err(AudioError::InvalidRange(format!(
            "Range {}s to {}s exceeds source duration {}s",
            range.start, range.end, duration
        )));
    }

    let frames = source.frame_count();
    let end_idx = ((range.end * rate).floor() as usize).min(frames);
    let start_idx = ((range.start * rate).floor() as usize).min(end_idx);

    Ok((start_idx, end_idx))
}
