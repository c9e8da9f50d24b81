//! Build information
//!
//! `build.rs` stamps every compilation with a build number and a UTC
//! timestamp. They surface in the status tool, the MCP handshake and the
//! startup banner.

use std::fmt;

use serde::Serialize;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

const BUILD_NUMBER_STAMP: &str = env!("FITTRACK_BUILD_NUMBER");
const BUILD_TIMESTAMP_STAMP: &str = env!("FITTRACK_BUILD_TIMESTAMP");

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuildInfo {
    pub version: &'static str,
    pub build_number: u64,
    pub build_timestamp: &'static str,
}

impl BuildInfo {
    pub fn current() -> Self {
        Self::from_stamp(BUILD_NUMBER_STAMP, BUILD_TIMESTAMP_STAMP)
    }

    /// An unreadable stamp reports build 0 compiled at "unknown"
    fn from_stamp(build_number: &str, build_timestamp: &'static str) -> Self {
        Self {
            version: VERSION,
            build_number: build_number.trim().parse().unwrap_or(0),
            build_timestamp: if build_timestamp.trim().is_empty() {
                "unknown"
            } else {
                build_timestamp
            },
        }
    }

    /// Version with build metadata, e.g. `1.0.0+build.42`
    pub fn full_version(&self) -> String {
        format!("{}+build.{}", self.version, self.build_number)
    }
}

impl fmt::Display for BuildInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "===============================================")?;
        writeln!(f, "  FitTrack {}", self.full_version())?;
        writeln!(f, "  Compiled: {}", self.build_timestamp)?;
        write!(f, "===============================================")
    }
}

/// Print the banner to stderr; stdout belongs to the MCP transport
pub fn print_startup_banner() {
    eprintln!("{}", BuildInfo::current());
}
