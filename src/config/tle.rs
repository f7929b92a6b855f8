use super::scenario::OrbitParameters;
use crate::constants::{
    EARTH_EQUATORIAL_RADIUS_KM, GLOBE_RADIUS, MU_EARTH_KM, SECONDS_PER_DAY, TAU,
};
use crate::errors::{ScenarioError, TleError};
use std::fmt;
use std::io::BufRead;

const LINE_LENGTH: usize = 69;

/// Picks one satellite out of an element-set catalogue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TleSelector {
    Name(String),
    NoradId(u32),
}

impl TleSelector {
    /// Numbers select by catalogue id, anything else by name.
    pub fn parse(query: &str) -> Self {
        let query = query.trim();
        match query.parse::<u32>() {
            Ok(id) => TleSelector::NoradId(id),
            Err(_) => TleSelector::Name(query.to_string()),
        }
    }

    pub fn matches(&self, tle: &TwoLineElement) -> bool {
        match self {
            TleSelector::Name(name) => tle.name.eq_ignore_ascii_case(name.trim()),
            TleSelector::NoradId(id) => tle.norad_id == *id,
        }
    }
}

impl fmt::Display for TleSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TleSelector::Name(name) => write!(f, "name \"{}\"", name),
            TleSelector::NoradId(id) => write!(f, "NORAD id {}", id),
        }
    }
}

/// The orbit-shape fields of a two-line element set.
#[derive(Debug, Clone, PartialEq)]
pub struct TwoLineElement {
    pub name: String,
    pub norad_id: u32,
    pub inclination_deg: f64,
    pub raan_deg: f64,
    pub eccentricity: f64,
    /// Mean motion [rev/day]
    pub mean_motion: f64,
}

impl TwoLineElement {
    pub fn parse(name: &str, line1: &str, line2: &str) -> Result<Self, TleError> {
        check_line(line1, 1)?;
        check_line(line2, 2)?;

        let id1: u32 = line1[2..7]
            .trim()
            .parse()
            .map_err(|_| TleError::ParseField("norad_id"))?;
        let norad_id: u32 = line2[2..7]
            .trim()
            .parse()
            .map_err(|_| TleError::ParseField("norad_id"))?;
        if id1 != norad_id {
            return Err(TleError::CatalogMismatch {
                line1: id1,
                line2: norad_id,
            });
        }

        let inclination_deg = parse_field(&line2[8..16], "inclination")?;
        let raan_deg = parse_field(&line2[17..25], "raan")?;
        // Implied leading "0."
        let eccentricity = parse_field(&format!("0.{}", line2[26..33].trim()), "eccentricity")?;
        let mean_motion = parse_field(&line2[52..63], "mean_motion")?;
        if mean_motion <= 0.0 {
            return Err(TleError::ParseField("mean_motion"));
        }

        // Celestrak 3LE files prefix names with "0 "
        let name = name.trim();
        let name = name.strip_prefix("0 ").unwrap_or(name).trim();
        let name = if name.is_empty() {
            norad_id.to_string()
        } else {
            name.to_string()
        };

        Ok(TwoLineElement {
            name,
            norad_id,
            inclination_deg,
            raan_deg,
            eccentricity,
            mean_motion,
        })
    }

    /// Semi-major axis [km] from mean motion, `a = (μ / n²)^(1/3)`.
    pub fn semi_major_axis_km(&self) -> f64 {
        let n = self.mean_motion * TAU / SECONDS_PER_DAY; // rad/s
        (MU_EARTH_KM / (n * n)).cbrt()
    }

    /// Orbit in globe units, where the Earth's equatorial radius maps to the
    /// globe radius.
    pub fn to_orbit_parameters(&self) -> OrbitParameters {
        OrbitParameters::new(
            self.semi_major_axis_km() / EARTH_EQUATORIAL_RADIUS_KM * GLOBE_RADIUS,
            self.eccentricity,
            self.inclination_deg,
            self.raan_deg,
        )
    }
}

fn check_line(line: &str, number: u8) -> Result<(), TleError> {
    if !line.is_ascii() {
        return Err(TleError::NonAscii { line: number });
    }
    if line.len() != LINE_LENGTH {
        return Err(TleError::InvalidLength {
            line: number,
            len: line.len(),
        });
    }
    if line.as_bytes()[0] != b'0' + number || line.as_bytes()[1] != b' ' {
        return Err(TleError::InvalidLineNumber { line: number });
    }
    verify_checksum(line, number)
}

/// Modulo-10 sum of digits, minus signs count as 1.
fn verify_checksum(line: &str, number: u8) -> Result<(), TleError> {
    let bytes = line.as_bytes();
    let expected = match bytes[68] {
        b @ b'0'..=b'9' => (b - b'0') as u32,
        _ => return Err(TleError::ParseField("checksum")),
    };
    let computed = bytes[..68]
        .iter()
        .map(|&b| match b {
            b'0'..=b'9' => (b - b'0') as u32,
            b'-' => 1,
            _ => 0,
        })
        .sum::<u32>()
        % 10;

    if computed != expected {
        return Err(TleError::ChecksumMismatch {
            line: number,
            expected,
            computed,
        });
    }
    Ok(())
}

fn parse_field(field: &str, name: &'static str) -> Result<f64, TleError> {
    field
        .trim()
        .parse::<f64>()
        .map_err(|_| TleError::ParseField(name))
}

/// Reads a catalogue of name + two-line blocks. A block without a name line
/// is named after its catalogue number.
pub fn read_catalogue<R: BufRead>(reader: R) -> Result<Vec<TwoLineElement>, ScenarioError> {
    let mut lines = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let line = line.trim_end();
        if !line.is_empty() {
            lines.push(line.to_string());
        }
    }

    let mut catalogue = Vec::new();
    let mut i = 0;
    while i < lines.len() {
        let record = catalogue.len() + 1;
        let name = if lines[i].starts_with("1 ") {
            ""
        } else {
            i += 1;
            lines[i - 1].as_str()
        };

        let (line1, line2) = match (lines.get(i), lines.get(i + 1)) {
            (Some(line1), Some(line2)) => (line1, line2),
            _ => {
                return Err(ScenarioError::Tle {
                    record,
                    source: TleError::Truncated,
                })
            }
        };
        let tle = TwoLineElement::parse(name, line1, line2)
            .map_err(|source| ScenarioError::Tle { record, source })?;
        catalogue.push(tle);
        i += 2;
    }

    Ok(catalogue)
}
