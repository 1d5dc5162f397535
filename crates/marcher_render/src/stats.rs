//! Frame-time statistics
//!
//! Accumulates frame count and elapsed time, emitting a report once the
//! accumulator crosses one second.

/// Reporting interval in seconds
const REPORT_INTERVAL: f32 = 1.0;

/// One emitted frame-time report
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameReport {
    /// Average milliseconds per frame over the interval
    pub ms_per_frame: f32,
    /// Average frames per second over the interval
    pub fps: f32,
}

impl std::fmt::Display for FrameReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.3} ms/frame ({:.1} fps)", self.ms_per_frame, self.fps)
    }
}

/// Frame counter and elapsed-time accumulator
#[derive(Debug, Default)]
pub struct FrameStats {
    frames: u32,
    elapsed: f32,
}

impl FrameStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one frame of `dt` seconds
    ///
    /// Returns a report when accumulated time reaches one second; both the
    /// counter and the accumulator reset to zero at that point.
    pub fn tick(&mut self, dt: f32) -> Option<FrameReport> {
        self.frames += 1;
        self.elapsed += dt;

        if self.elapsed >= REPORT_INTERVAL {
            let report = FrameReport {
                ms_per_frame: self.elapsed * 1000.0 / self.frames as f32,
                fps: self.frames as f32 / self.elapsed,
            };
            self.frames = 0;
            self.elapsed = 0.0;
            Some(report)
        } else {
            None
        }
    }

    /// Frames counted since the last report
    pub fn frames(&self) -> u32 {
        self.frames
    }

    /// Seconds accumulated since the last report
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_report_before_one_second() {
        let mut stats = FrameStats::new();
        for _ in 0..59 {
            assert!(stats.tick(1.0 / 60.0).is_none());
        }
        assert_eq!(stats.frames(), 59);
    }

    #[test]
    fn test_report_at_one_second() {
        let mut stats = FrameStats::new();
        let mut report = None;
        for _ in 0..200 {
            if let Some(r) = stats.tick(0.01) {
                report = Some(r);
                break;
            }
        }
        let report = report.expect("expected a report within one second");
        assert!((report.fps - 100.0).abs() < 1.0);
        assert!((report.ms_per_frame - 10.0).abs() < 0.2);
    }

    #[test]
    fn test_counters_reset_exactly_on_report() {
        let mut stats = FrameStats::new();
        assert!(stats.tick(0.5).is_none());
        assert!(stats.tick(0.6).is_some());
        assert_eq!(stats.frames(), 0);
        assert_eq!(stats.elapsed(), 0.0);
    }

    #[test]
    fn test_single_long_frame_reports() {
        let mut stats = FrameStats::new();
        let report = stats.tick(2.0).expect("a 2s frame crosses the interval");
        assert_eq!(report.ms_per_frame, 2000.0);
        assert_eq!(report.fps, 0.5);
    }

    #[test]
    fn test_report_format() {
        let report = FrameReport { ms_per_frame: 16.667, fps: 60.0 };
        assert_eq!(report.to_string(), "16.667 ms/frame (60.0 fps)");
    }
}
