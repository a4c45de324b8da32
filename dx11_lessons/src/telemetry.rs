/// Frame-rate telemetry for the lesson overlays

/// Length of one measurement window in seconds
pub const FRAME_RATE_WINDOW_SECONDS: f64 = 1.0;

/// Averages over one completed window
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameRate {
    pub frames_per_second: f64,
    pub milliseconds_per_frame: f64,
}

/// Counts frames over windows of at least one second
#[derive(Debug, Clone, Default)]
pub struct FrameCounter {
    frames: u64,
    elapsed: f64,
    last: Option<FrameRate>,
}

impl FrameCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one frame that took `delta_seconds`
    ///
    /// Returns the window's averages once the window is full, then starts a
    /// new window.
    pub fn record(&mut self, delta_seconds: f64) -> Option<FrameRate> {
        self.frames += 1;
        self.elapsed += delta_seconds.max(0.0);

        if self.elapsed < FRAME_RATE_WINDOW_SECONDS {
            return None;
        }

        let frames_per_second = self.frames as f64 / self.elapsed;
        let rate = FrameRate {
            frames_per_second,
            milliseconds_per_frame: 1_000.0 / frames_per_second,
        };

        self.frames = 0;
        self.elapsed = 0.0;
        self.last = Some(rate);
        Some(rate)
    }

    /// Most recent completed window
    pub fn last(&self) -> Option<FrameRate> {
        self.last
    }

    /// Overlay text, e.g. "FPS: 59.94"
    pub fn overlay_text(&self) -> String {
        match self.last {
            Some(rate) => format!("FPS: {:.2}", rate.frames_per_second),
            None => "FPS: --".to_string(),
        }
    }
}
