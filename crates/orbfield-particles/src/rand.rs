//! Xorshift32 PRNG for spawning orbs

use orbfield_core::{Hsl, HslRange, NumberRange};

pub struct OrbRng {
    state: u32,
}

impl OrbRng {
    pub fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    /// Seed from the wall clock, for runs that don't need reproducibility
    pub fn from_time() -> Self {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.subsec_nanos() ^ (d.as_secs() as u32))
            .unwrap_or(0xDEAD_BEEF);
        Self::new(nanos)
    }

    fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    /// Returns a float in [0, 1)
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u32() as f64) / (u32::MAX as f64 + 1.0)
    }

    /// Returns a float in [min, max)
    pub fn range(&mut self, min: f64, max: f64) -> f64 {
        min + self.next_f64() * (max - min)
    }

    /// Returns a float in `[-span/2, span/2)` biased toward 0.
    ///
    /// Averages two uniform draws, giving a triangular distribution.
    pub fn balanced(&mut self, span: f64) -> f64 {
        let avg = (self.next_f64() + self.next_f64()) / 2.0;
        (avg - 0.5) * span
    }

    /// Fair coin
    pub fn coin(&mut self) -> bool {
        self.next_u32() & 1 == 1
    }

    /// A color drawn uniformly within each channel's range
    pub fn hsl(&mut self, range: &HslRange) -> Hsl {
        Hsl::new(
            self.within(range.h),
            self.within(range.s),
            self.within(range.l),
        )
    }

    fn within(&mut self, range: NumberRange) -> f64 {
        self.range(range.min, range.max)
    }
}
