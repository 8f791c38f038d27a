use tracing::debug;

/// Fallback rate when the source declares no usable durations.
pub const DEFAULT_FPS: u32 = 30;

/// Estimate an integer frames-per-second value from per-frame display
/// durations in milliseconds.
///
/// Entries without a declared duration are excluded from the average; an
/// empty list, an all-undeclared list, or an average of zero falls back to
/// [`DEFAULT_FPS`]. The result is `floor(1000 / average)`, which yields 0
/// when the average duration exceeds 1000 ms.
pub fn estimate_fps(durations: &[Option<u32>]) -> u32 {
    let declared: Vec<u32> = durations.iter().flatten().copied().collect();
    if declared.is_empty() {
        debug!(
            total_entries = durations.len(),
            "no declared durations, using default rate"
        );
        return DEFAULT_FPS;
    }

    let sum: u64 = declared.iter().map(|&d| u64::from(d)).sum();
    let average_ms = sum as f64 / declared.len() as f64;
    if average_ms == 0.0 {
        debug!("all declared durations are zero, using default rate");
        return DEFAULT_FPS;
    }

    let fps = (1000.0 / average_ms) as u32;
    debug!(average_ms, fps, declared = declared.len(), "estimated playback rate");
    fps
}
