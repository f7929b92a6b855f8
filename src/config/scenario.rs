use super::tle::{read_catalogue, TleSelector};
use crate::constants::{GLOBE_SPIN_STEP, SATELLITE_ANGLE_STEP};
use crate::errors::ScenarioError;
use crate::integrators::stepping::Stepping;
use crate::models::globe::Globe;
use crate::models::{create_orbit, Constellation};
use csv::ReaderBuilder;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

const SCENARIO_DIR: &str = "orbit-globe";
const SCENARIO_FILE: &str = "satellites.csv";

/// One row of a scenario file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrbitParameters {
    pub semi_major_axis: f64,
    pub eccentricity: f64,
    pub inclination_deg: f64,
    pub ascending_node_deg: f64,
}

impl OrbitParameters {
    pub const fn new(
        semi_major_axis: f64,
        eccentricity: f64,
        inclination_deg: f64,
        ascending_node_deg: f64,
    ) -> Self {
        OrbitParameters {
            semi_major_axis,
            eccentricity,
            inclination_deg,
            ascending_node_deg,
        }
    }
}

/// Orbits shown by the demo when nothing else is configured.
pub const DEFAULT_ORBITS: [OrbitParameters; 2] = [
    OrbitParameters::new(1.5, 0.2, 45.0, 30.0),
    OrbitParameters::new(2.0, 0.1, 30.0, 60.0),
];

#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    pub orbits: Vec<OrbitParameters>,
    pub satellite_stepping: Stepping,
    pub globe_stepping: Stepping,
}

impl Default for Scenario {
    fn default() -> Self {
        Scenario {
            orbits: DEFAULT_ORBITS.to_vec(),
            satellite_stepping: Stepping::PerTick(SATELLITE_ANGLE_STEP),
            globe_stepping: Stepping::PerTick(GLOBE_SPIN_STEP),
        }
    }
}

impl Scenario {
    /// Reads orbits from CSV with the header
    /// `semi_major_axis,eccentricity,inclination_deg,ascending_node_deg`.
    /// Stepping keeps its default.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, ScenarioError> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut orbits = Vec::new();
        for result in rdr.deserialize() {
            let params: OrbitParameters = result?;
            orbits.push(params);
        }

        if orbits.is_empty() {
            return Err(ScenarioError::Empty);
        }

        Ok(Scenario {
            orbits,
            ..Scenario::default()
        })
    }

    pub fn from_csv_path(path: &Path) -> Result<Self, ScenarioError> {
        let file = File::open(path)?;
        Self::from_csv_reader(file)
    }

    /// Reads a catalogue of name + two-line element blocks (the Celestrak
    /// `FORMAT=tle` layout). With a selector only the matching satellite is
    /// kept, otherwise every entry becomes an orbit.
    pub fn from_tle_reader<R: BufRead>(
        reader: R,
        selector: Option<&TleSelector>,
    ) -> Result<Self, ScenarioError> {
        let catalogue = read_catalogue(reader)?;

        let orbits: Vec<OrbitParameters> = match selector {
            Some(selector) => {
                let tle = catalogue
                    .iter()
                    .find(|tle| selector.matches(tle))
                    .ok_or_else(|| ScenarioError::SatelliteNotFound(selector.to_string()))?;
                info!("Selected {} (NORAD {})", tle.name, tle.norad_id);
                vec![tle.to_orbit_parameters()]
            }
            None => catalogue.iter().map(|tle| tle.to_orbit_parameters()).collect(),
        };

        if orbits.is_empty() {
            return Err(ScenarioError::Empty);
        }

        Ok(Scenario {
            orbits,
            ..Scenario::default()
        })
    }

    pub fn from_tle_path(
        path: &Path,
        selector: Option<&TleSelector>,
    ) -> Result<Self, ScenarioError> {
        let file = File::open(path)?;
        Self::from_tle_reader(BufReader::new(file), selector)
    }

    /// Explicit file, else the per-user file if it exists, else the
    /// built-in orbits.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, ScenarioError> {
        Self::resolve_with_fallback(explicit, Self::default_path().as_deref())
    }

    fn resolve_with_fallback(
        explicit: Option<&Path>,
        fallback: Option<&Path>,
    ) -> Result<Self, ScenarioError> {
        if let Some(path) = explicit {
            return Self::from_csv_path(path);
        }

        match fallback {
            Some(path) if path.exists() => {
                info!("Loading scenario from {}", path.display());
                Self::from_csv_path(path)
            }
            Some(path) => {
                warn!("No scenario at {}, using built-in orbits", path.display());
                Ok(Scenario::default())
            }
            None => Ok(Scenario::default()),
        }
    }

    /// Per-user scenario location, e.g. `~/.config/orbit-globe/satellites.csv`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(SCENARIO_DIR).join(SCENARIO_FILE))
    }

    /// Validates every orbit and registers the satellites in file order.
    /// Fails on the first invalid orbit; nothing partial is returned.
    pub fn build(&self) -> Result<Constellation, ScenarioError> {
        if self.orbits.is_empty() {
            return Err(ScenarioError::Empty);
        }

        let mut constellation = Constellation::new(
            Globe::new(),
            self.satellite_stepping.stepper()?,
            self.globe_stepping.stepper()?,
        );

        for (i, p) in self.orbits.iter().enumerate() {
            let satellite = create_orbit(
                p.semi_major_axis,
                p.eccentricity,
                p.inclination_deg,
                p.ascending_node_deg,
            )
            .map_err(|source| ScenarioError::InvalidOrbit { row: i + 1, source })?;
            constellation.register(satellite);
        }

        Ok(constellation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::OrbitError;
    use std::io::Write;

    #[test]
    fn default_matches_demo() {
        let scenario = Scenario::default();
        assert_eq!(scenario.orbits, DEFAULT_ORBITS.to_vec());
        assert_eq!(scenario.satellite_stepping, Stepping::PerTick(0.01));
        assert_eq!(scenario.globe_stepping, Stepping::PerTick(0.001));

        let constellation = scenario.build().unwrap();
        assert_eq!(constellation.len(), 2);
    }

    #[test]
    fn parses_csv() {
        let data = "semi_major_axis,eccentricity,inclination_deg,ascending_node_deg\n\
                    3.0, 0.0, 10.0, 20.0\n\
                    4.0, 0.5, 0.0, 0.0\n";
        let scenario = Scenario::from_csv_reader(data.as_bytes()).unwrap();
        assert_eq!(
            scenario.orbits,
            vec![
                OrbitParameters::new(3.0, 0.0, 10.0, 20.0),
                OrbitParameters::new(4.0, 0.5, 0.0, 0.0),
            ]
        );
    }

    #[test]
    fn empty_csv_rejected() {
        let data = "semi_major_axis,eccentricity,inclination_deg,ascending_node_deg\n";
        assert!(matches!(
            Scenario::from_csv_reader(data.as_bytes()),
            Err(ScenarioError::Empty)
        ));
    }

    #[test]
    fn malformed_csv_rejected() {
        let data = "semi_major_axis,eccentricity,inclination_deg,ascending_node_deg\n\
                    3.0, abc, 10.0, 20.0\n";
        assert!(matches!(
            Scenario::from_csv_reader(data.as_bytes()),
            Err(ScenarioError::Csv(_))
        ));
    }

    #[test]
    fn build_reports_invalid_row() {
        let scenario = Scenario {
            orbits: vec![
                OrbitParameters::new(1.5, 0.2, 45.0, 30.0),
                OrbitParameters::new(2.0, 1.0, 30.0, 60.0),
            ],
            ..Scenario::default()
        };
        match scenario.build() {
            Err(ScenarioError::InvalidOrbit { row, source }) => {
                assert_eq!(row, 2);
                assert_eq!(source, OrbitError::InvalidEccentricity(1.0));
            }
            Err(e) => panic!("unexpected error: {e}"),
            Ok(_) => panic!("invalid orbit accepted"),
        }
    }

    #[test]
    fn build_rejects_empty() {
        let scenario = Scenario {
            orbits: Vec::new(),
            ..Scenario::default()
        };
        assert!(matches!(scenario.build(), Err(ScenarioError::Empty)));
    }

    #[test]
    fn reads_from_file() {
        let path = std::env::temp_dir().join(format!("orbit-globe-{}.csv", std::process::id()));
        {
            let mut file = File::create(&path).unwrap();
            writeln!(file, "semi_major_axis,eccentricity,inclination_deg,ascending_node_deg").unwrap();
            writeln!(file, "1.2,0.05,5.0,15.0").unwrap();
        }
        let scenario = Scenario::from_csv_path(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(scenario.orbits, vec![OrbitParameters::new(1.2, 0.05, 5.0, 15.0)]);
    }

    #[test]
    fn missing_file_is_io_error() {
        let path = Path::new("/nonexistent/orbit-globe/satellites.csv");
        assert!(matches!(
            Scenario::from_csv_path(path),
            Err(ScenarioError::Io(_))
        ));
    }

    #[test]
    fn build_rejects_non_finite_stepping() {
        let scenario = Scenario {
            satellite_stepping: Stepping::Rate(f64::NAN),
            ..Scenario::default()
        };
        assert!(matches!(
            scenario.build(),
            Err(ScenarioError::NonFiniteStepping(v)) if v.is_nan()
        ));

        let scenario = Scenario {
            globe_stepping: Stepping::PerTick(f64::INFINITY),
            ..Scenario::default()
        };
        assert!(matches!(
            scenario.build(),
            Err(ScenarioError::NonFiniteStepping(_))
        ));
    }

    const ISS_TLE: &str = "ISS (ZARYA)
1 25544U 98067A   08264.51782528 -.00002182  00000-0 -11606-4 0  2927
2 25544  51.6416 247.4627 0006703 130.5360 325.0288 15.72125391563537
";

    #[test]
    fn tle_catalogue_becomes_orbits() {
        let scenario = Scenario::from_tle_reader(ISS_TLE.as_bytes(), None).unwrap();
        assert_eq!(scenario.orbits.len(), 1);
        assert!((scenario.orbits[0].semi_major_axis - 1.0553).abs() < 1e-3);
        assert_eq!(scenario.orbits[0].inclination_deg, 51.6416);
        assert_eq!(scenario.satellite_stepping, Stepping::PerTick(SATELLITE_ANGLE_STEP));

        let constellation = scenario.build().unwrap();
        assert_eq!(constellation.len(), 1);
    }

    #[test]
    fn tle_selection_by_name_and_id() {
        for query in ["ISS (ZARYA)", "iss (zarya)", "25544"] {
            let selector = TleSelector::parse(query);
            let scenario = Scenario::from_tle_reader(ISS_TLE.as_bytes(), Some(&selector)).unwrap();
            assert_eq!(scenario.orbits.len(), 1);
        }

        let selector = TleSelector::parse("HST");
        match Scenario::from_tle_reader(ISS_TLE.as_bytes(), Some(&selector)) {
            Err(ScenarioError::SatelliteNotFound(query)) => assert!(query.contains("HST")),
            Err(e) => panic!("unexpected error: {e}"),
            Ok(_) => panic!("unknown satellite selected"),
        }
    }

    #[test]
    fn empty_tle_catalogue_rejected() {
        assert!(matches!(
            Scenario::from_tle_reader("\n\n".as_bytes(), None),
            Err(ScenarioError::Empty)
        ));
    }

    #[test]
    fn tle_checksum_failure_reported() {
        let bad = ISS_TLE.replace("563537", "563538");
        assert!(matches!(
            Scenario::from_tle_reader(bad.as_bytes(), None),
            Err(ScenarioError::Tle { record: 1, .. })
        ));
    }

    fn scratch_file(tag: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "orbit-globe-{}-{}.csv",
            tag,
            std::process::id()
        ));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn resolve_prefers_explicit_path() {
        let explicit = scratch_file(
            "explicit",
            "semi_major_axis,eccentricity,inclination_deg,ascending_node_deg\n3.0,0.0,0.0,0.0\n",
        );
        let fallback = scratch_file(
            "fallback-unused",
            "semi_major_axis,eccentricity,inclination_deg,ascending_node_deg\n4.0,0.0,0.0,0.0\n",
        );
        let scenario =
            Scenario::resolve_with_fallback(Some(&explicit), Some(&fallback)).unwrap();
        std::fs::remove_file(&explicit).unwrap();
        std::fs::remove_file(&fallback).unwrap();

        assert_eq!(scenario.orbits, vec![OrbitParameters::new(3.0, 0.0, 0.0, 0.0)]);
    }

    #[test]
    fn resolve_uses_existing_fallback() {
        let fallback = scratch_file(
            "fallback",
            "semi_major_axis,eccentricity,inclination_deg,ascending_node_deg\n4.0,0.0,0.0,0.0\n",
        );
        let scenario = Scenario::resolve_with_fallback(None, Some(&fallback)).unwrap();
        std::fs::remove_file(&fallback).unwrap();

        assert_eq!(scenario.orbits, vec![OrbitParameters::new(4.0, 0.0, 0.0, 0.0)]);
    }

    #[test]
    fn resolve_falls_back_to_builtin() {
        let missing = Path::new("/nonexistent/orbit-globe/satellites.csv");
        assert_eq!(
            Scenario::resolve_with_fallback(None, Some(missing)).unwrap(),
            Scenario::default()
        );
        assert_eq!(
            Scenario::resolve_with_fallback(None, None).unwrap(),
            Scenario::default()
        );
    }

    #[test]
    fn resolve_does_not_mask_explicit_errors() {
        let missing = Path::new("/nonexistent/orbit-globe/explicit.csv");
        assert!(matches!(
            Scenario::resolve_with_fallback(Some(missing), None),
            Err(ScenarioError::Io(_))
        ));
    }

    #[test]
    fn default_path_ends_with_scenario_file() {
        if let Some(path) = Scenario::default_path() {
            assert!(path.ends_with("orbit-globe/satellites.csv"));
        }
    }
}
