use std::io;
use thiserror::Error;

/// Rejections raised while building an orbit.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum OrbitError {
    #[error("semi-major axis must be positive, got {0}")]
    InvalidSemiMajorAxis(f64),
    #[error("eccentricity must lie in [0, 1), got {0}")]
    InvalidEccentricity(f64),
    #[error("{name} must be finite, got {value}")]
    NonFiniteParameter { name: &'static str, value: f64 },
    #[error("orbit path needs at least one segment")]
    InvalidPathResolution,
}

/// Rejections raised while reading a two-line element set.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TleError {
    #[error("TLE line {line} is not ASCII")]
    NonAscii { line: u8 },
    #[error("TLE line {line} has invalid length {len} (expected 69)")]
    InvalidLength { line: u8, len: usize },
    #[error("TLE line {line} does not start with its line number")]
    InvalidLineNumber { line: u8 },
    #[error("TLE line {line} checksum mismatch: expected {expected}, computed {computed}")]
    ChecksumMismatch { line: u8, expected: u32, computed: u32 },
    #[error("failed to parse TLE field: {0}")]
    ParseField(&'static str),
    #[error("catalog numbers differ between lines ({line1} vs {line2})")]
    CatalogMismatch { line1: u32, line2: u32 },
    #[error("element set is missing its second line")]
    Truncated,
}

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),
    #[error("scenario defines no satellites")]
    Empty,
    #[error("invalid orbit on row {row}: {source}")]
    InvalidOrbit {
        row: usize,
        #[source]
        source: OrbitError,
    },
    #[error("stepping must be finite, got {0}")]
    NonFiniteStepping(f64),
    #[error("invalid element set #{record}: {source}")]
    Tle {
        record: usize,
        #[source]
        source: TleError,
    },
    #[error("no satellite matches {0}")]
    SatelliteNotFound(String),
}

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("CSV writing error: {0}")]
    Csv(#[from] csv::Error),
}
