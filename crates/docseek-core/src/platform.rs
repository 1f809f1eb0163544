//! Platform detection
//!
//! Picks which reveal-in-file-browser command applies.

/// Supported platforms
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Linux,
    MacOS,
    Windows,
    /// Unknown/unsupported platform
    Unknown,
}

impl Platform {
    /// Get the platform identifier string used as config key
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Linux => "linux",
            Platform::MacOS => "macos",
            Platform::Windows => "windows",
            Platform::Unknown => "unknown",
        }
    }
}

/// Detect the current platform
#[must_use]
pub fn detect() -> Platform {
    #[cfg(target_os = "macos")]
    return Platform::MacOS;

    #[cfg(target_os = "windows")]
    return Platform::Windows;

    #[cfg(target_os = "linux")]
    return Platform::Linux;

    #[cfg(not(any(target_os = "macos", target_os = "windows", target_os = "linux")))]
    Platform::Unknown
}
