//! Rolling frame-time statistics.

use std::time::{Duration, Instant};

const WINDOW: usize = 120;

/// Frame timing collaborator bracketing each frame with `begin`/`end`.
///
/// Keeps a rolling window of recent frame times for smoothed FPS and
/// average frame-time readouts.
#[derive(Debug, Default)]
pub struct FrameStats {
    frame_start: Option<Instant>,
    frame_times: Vec<Duration>,
    next_slot: usize,
    total_frames: u64,
}

impl FrameStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the start of a frame.
    pub fn begin(&mut self) {
        self.frame_start = Some(Instant::now());
    }

    /// Mark the end of a frame started with `begin`. Without a matching
    /// `begin` the call is ignored.
    pub fn end(&mut self) {
        if let Some(start) = self.frame_start.take() {
            self.record(start.elapsed());
        }
    }

    fn record(&mut self, frame_time: Duration) {
        if self.frame_times.len() < WINDOW {
            self.frame_times.push(frame_time);
        } else {
            self.frame_times[self.next_slot] = frame_time;
            self.next_slot = (self.next_slot + 1) % WINDOW;
        }
        self.total_frames += 1;
    }

    /// Frames completed since creation.
    pub fn total_frames(&self) -> u64 {
        self.total_frames
    }

    /// Average frame time over the rolling window.
    pub fn average_frame_time(&self) -> Duration {
        if self.frame_times.is_empty() {
            return Duration::ZERO;
        }
        let total: Duration = self.frame_times.iter().sum();
        total / self.frame_times.len() as u32
    }

    /// Smoothed frames per second over the rolling window.
    pub fn fps(&self) -> f64 {
        let avg = self.average_frame_time();
        if avg.is_zero() {
            return 0.0;
        }
        1.0 / avg.as_secs_f64()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_stats_report_zero() {
        let stats = FrameStats::new();
        assert_eq!(stats.total_frames(), 0);
        assert_eq!(stats.average_frame_time(), Duration::ZERO);
        assert_eq!(stats.fps(), 0.0);
    }

    #[test]
    fn test_fps_from_fixed_frame_times() {
        let mut stats = FrameStats::new();
        for _ in 0..10 {
            stats.record(Duration::from_millis(16));
        }
        assert_eq!(stats.total_frames(), 10);
        assert_eq!(stats.average_frame_time(), Duration::from_millis(16));
        assert!((stats.fps() - 62.5).abs() < 0.1);
    }

    #[test]
    fn test_window_evicts_oldest_samples() {
        let mut stats = FrameStats::new();
        for _ in 0..WINDOW {
            stats.record(Duration::from_millis(100));
        }
        for _ in 0..WINDOW {
            stats.record(Duration::from_millis(10));
        }
        // Only the fast frames remain in the window.
        assert_eq!(stats.average_frame_time(), Duration::from_millis(10));
        assert_eq!(stats.total_frames(), 2 * WINDOW as u64);
    }

    #[test]
    fn test_end_without_begin_is_ignored() {
        let mut stats = FrameStats::new();
        stats.end();
        assert_eq!(stats.total_frames(), 0);
    }

    #[test]
    fn test_begin_end_records_a_frame() {
        let mut stats = FrameStats::new();
        stats.begin();
        stats.end();
        assert_eq!(stats.total_frames(), 1);
    }
}
