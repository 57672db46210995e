//! Platform-agnostic time utilities
//!
//! Provides a unified way to get elapsed time in seconds since app start.

#[cfg(all(target_arch = "wasm32", feature = "wasm"))]
pub fn now_seconds() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now() / 1000.0)
        .unwrap_or(0.0)
}

#[cfg(not(all(target_arch = "wasm32", feature = "wasm")))]
pub fn now_seconds() -> f64 {
    use std::sync::OnceLock;
    use std::time::Instant;

    static START: OnceLock<Instant> = OnceLock::new();
    START.get_or_init(Instant::now).elapsed().as_secs_f64()
}

/// Per-second rate of a monotonically increasing counter, refreshed about once a second
#[derive(Debug, Clone, Default)]
pub struct RateMeter {
    last_tick: f64,
    last_total: u64,
    rate: f64,
}

impl RateMeter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the current total; returns the latest rate
    pub fn update(&mut self, now: f64, total: u64) -> f64 {
        let elapsed = now - self.last_tick;
        if elapsed >= 1.0 {
            self.rate = total.saturating_sub(self.last_total) as f64 / elapsed;
            self.last_total = total;
            self.last_tick = now;
        }
        self.rate
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }
}
