//! Rolling frame-rate sampler with periodic reporting

use orbfield_core::DEFAULT_REPORT_INTERVAL_MS;

/// Collects per-frame FPS samples and averages them once per interval
#[derive(Debug)]
pub struct FpsSampler {
    samples: Vec<f64>,
    interval_ms: f64,
    last_report: Option<f64>,
}

impl FpsSampler {
    pub fn new(interval_ms: f64) -> Self {
        Self {
            samples: Vec::new(),
            interval_ms,
            last_report: None,
        }
    }

    /// Record one frame. Returns the mean FPS when a report is due.
    ///
    /// A zero delta contributes no sample. The first call only seeds the
    /// report timer.
    pub fn record(&mut self, timestamp_ms: f64, delta_ms: f64) -> Option<f64> {
        let last_report = *self.last_report.get_or_insert(timestamp_ms);

        if delta_ms > 0.0 && delta_ms.is_finite() {
            self.samples.push(1000.0 / delta_ms);
        }

        if timestamp_ms - last_report < self.interval_ms || self.samples.is_empty() {
            return None;
        }

        let fps = self.samples.iter().sum::<f64>() / self.samples.len() as f64;
        self.samples.clear();
        self.last_report = Some(timestamp_ms);
        Some(fps)
    }

    /// Samples waiting for the next report
    pub fn pending_samples(&self) -> usize {
        self.samples.len()
    }

    pub fn interval_ms(&self) -> f64 {
        self.interval_ms
    }
}

impl Default for FpsSampler {
    fn default() -> Self {
        Self::new(DEFAULT_REPORT_INTERVAL_MS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_frames_report_sixty() {
        let mut sampler = FpsSampler::new(500.0);
        let frame = 1000.0 / 60.0;
        let mut reports = Vec::new();

        let mut t = 0.0;
        // First frame carries a zero delta from the clock
        assert!(sampler.record(t, 0.0).is_none());
        for _ in 0..40 {
            t += frame;
            if let Some(fps) = sampler.record(t, frame) {
                reports.push(fps);
            }
        }

        assert_eq!(reports.len(), 1);
        assert!((reports[0] - 60.0).abs() < 0.01);
    }

    #[test]
    fn test_rounded_frame_times() {
        let mut sampler = FpsSampler::new(200.0);
        let mut t = 1000.0;
        sampler.record(t, 0.0);
        let mut last = None;
        for _ in 0..30 {
            t += 16.67;
            last = sampler.record(t, 16.67).or(last);
        }
        let fps = last.unwrap();
        assert!((fps - 60.0).abs() < 0.1, "got {fps}");
    }

    #[test]
    fn test_report_clears_buffer() {
        let mut sampler = FpsSampler::new(100.0);
        sampler.record(0.0, 0.0);
        sampler.record(50.0, 50.0);
        assert_eq!(sampler.pending_samples(), 1);
        let fps = sampler.record(100.0, 50.0).unwrap();
        assert!((fps - 20.0).abs() < 1e-9);
        assert_eq!(sampler.pending_samples(), 0);
    }

    #[test]
    fn test_mean_of_mixed_rates() {
        let mut sampler = FpsSampler::new(60.0);
        sampler.record(0.0, 0.0);
        sampler.record(10.0, 10.0); // 100 fps
        let fps = sampler.record(60.0, 50.0).unwrap(); // 20 fps
        assert!((fps - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_delta_skipped() {
        let mut sampler = FpsSampler::new(100.0);
        sampler.record(0.0, 0.0);
        assert!(sampler.record(200.0, 0.0).is_none());
        assert_eq!(sampler.pending_samples(), 0);
    }
}
