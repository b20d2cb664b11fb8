//! Render timing and throughput.

use std::time::Duration;

/// Summary of a finished render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderStats {
    pub elapsed: Duration,
    pub total_pixels: u64,
    pub samples_per_pixel: u32,
}

impl RenderStats {
    pub fn new(elapsed: Duration, width: u32, height: u32, samples_per_pixel: u32) -> Self {
        Self {
            elapsed,
            total_pixels: width as u64 * height as u64,
            samples_per_pixel,
        }
    }

    /// Camera rays traced; scattered rays are not counted.
    pub fn total_rays(&self) -> u64 {
        self.total_pixels * self.samples_per_pixel as u64
    }

    /// Zero when no time has elapsed.
    pub fn rays_per_second(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.total_rays() as f64 / secs
        } else {
            0.0
        }
    }

    pub fn log(&self) {
        log::info!("Render completed in {:.3} seconds", self.elapsed.as_secs_f64());
        log::info!("Total rays: {}", self.total_rays());
        log::info!("Rays per second: {:.0}", self.rays_per_second());
    }
}
