//! Viewer configuration
//!
//! Defaults suit both demo scenarios. A couple of knobs can be overridden
//! from the environment without recompiling.

use log::warn;

pub const VSYNC_ENV: &str = "PRIMVIEW_VSYNC";
pub const MSAA_ENV: &str = "PRIMVIEW_MSAA";

/// Window and presentation settings shared by every scenario
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Fifo presentation when true, Immediate otherwise
    pub vsync: bool,
    /// 1 disables antialiasing; 4 is the only other count wgpu guarantees
    pub msaa_samples: u32,
    /// Linear RGB clear color
    pub clear_color: [f64; 3],
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            title: "primview".to_string(),
            width: 1200,
            height: 800,
            vsync: true,
            msaa_samples: 4,
            clear_color: [0.0, 0.0, 0.0],
        }
    }
}

impl ViewerConfig {
    /// Default configuration with environment overrides applied
    pub fn from_env() -> Self {
        Self::default().apply_overrides(|key| std::env::var(key).ok())
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.to_owned();
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_vsync(mut self, vsync: bool) -> Self {
        self.vsync = vsync;
        self
    }

    pub fn with_msaa_samples(mut self, samples: u32) -> Self {
        self.msaa_samples = if samples >= 4 { 4 } else { 1 };
        self
    }

    pub fn with_clear_color(mut self, color: [f64; 3]) -> Self {
        self.clear_color = color;
        self
    }

    /// Applies overrides from `lookup`, typically the process environment.
    ///
    /// Malformed values are logged and ignored.
    pub fn apply_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(VSYNC_ENV) {
            match parse_flag(&raw) {
                Some(vsync) => self.vsync = vsync,
                None => warn!("ignoring {}={:?}: expected 0, 1, true or false", VSYNC_ENV, raw),
            }
        }

        if let Some(raw) = lookup(MSAA_ENV) {
            match raw.trim().parse::<u32>() {
                Ok(samples @ (1 | 4)) => self.msaa_samples = samples,
                _ => warn!("ignoring {}={:?}: expected 1 or 4", MSAA_ENV, raw),
            }
        }

        self
    }

    pub fn present_mode(&self) -> wgpu::PresentMode {
        if self.vsync {
            wgpu::PresentMode::Fifo
        } else {
            wgpu::PresentMode::Immediate
        }
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" => Some(true),
        "0" | "false" | "off" => Some(false),
        _ => None,
    }
}
