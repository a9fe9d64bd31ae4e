/// Coalesces bursts of scroll, resize and pointer events into at most one
/// evaluation per animation frame.
///
/// The host calls [`FrameThrottle::request`] from every event and only asks
/// the browser for a frame when it returns `true`. Inside the frame callback
/// it calls [`FrameThrottle::begin_frame`] before doing the work.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameThrottle {
    scheduled: bool,
}

impl FrameThrottle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` when no frame is outstanding yet.
    pub fn request(&mut self) -> bool {
        !std::mem::replace(&mut self.scheduled, true)
    }

    /// Returns whether a frame had been requested.
    pub fn begin_frame(&mut self) -> bool {
        std::mem::replace(&mut self.scheduled, false)
    }

    pub fn cancel(&mut self) {
        self.scheduled = false;
    }

    pub fn is_scheduled(&self) -> bool {
        self.scheduled
    }
}

/// Frame delta in seconds between two `requestAnimationFrame` timestamps
/// (milliseconds), capped so a backgrounded tab does not produce one huge
/// step when it resumes.
pub fn frame_delta_seconds(previous_ms: Option<f64>, now_ms: f64) -> f64 {
    const FALLBACK_SECS: f64 = 1.0 / 60.0;
    const MAX_SECS: f64 = 0.064;

    match previous_ms {
        Some(previous) if now_ms > previous => ((now_ms - previous) / 1000.0).min(MAX_SECS),
        Some(_) => 0.0,
        None => FALLBACK_SECS,
    }
}
