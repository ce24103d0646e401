use chrono::{DateTime, TimeDelta, Utc};

/// How many recent animation frames to keep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameWindow {
    /// Frames at or after `now - window` are kept.
    pub window: TimeDelta,
    /// When fewer than this many are recent...
    pub min_frames: usize,
    /// ...the last `fallback` frames are used instead.
    pub fallback: usize,
}

/// Filters `all` (oldest first) down to the frames of the last [`FrameWindow::window`].
///
/// Times `parse` cannot read never count as recent, but may still appear in the
/// fallback tail.
pub fn select_recent_frames<F>(
    all: &[String],
    parse: F,
    now: DateTime<Utc>,
    window: FrameWindow,
) -> Vec<String>
where
    F: Fn(&str) -> Option<DateTime<Utc>>,
{
    let cutoff = now - window.window;
    let recent: Vec<String> = all
        .iter()
        .filter(|t| parse(t.as_str()).is_some_and(|t| t >= cutoff))
        .cloned()
        .collect();
    if recent.len() < window.min_frames && !all.is_empty() {
        let skip = all.len().saturating_sub(window.fallback);
        return all[skip..].to_vec();
    }
    recent
}
