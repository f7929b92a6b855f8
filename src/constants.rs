// Globe geometry (render units, globe radius = 1)
pub const GLOBE_RADIUS: f64 = 1.0;
pub const ATMOSPHERE_RADIUS: f64 = 1.02; // Atmosphere shell drawn just above the surface

// Frame-coupled steps observed in the original render loop
pub const SATELLITE_ANGLE_STEP: f64 = 0.01; // rad per tick
pub const GLOBE_SPIN_STEP: f64 = 0.001; // rad per tick

// Nominal host frame period, used when converting a per-tick step to a rate
pub const NOMINAL_FRAME_SECONDS: f64 = 1.0 / 60.0;

// Number of line segments used to draw an orbit path
pub const ORBIT_PATH_SEGMENTS: usize = 100;

// Math
pub const PI: f64 = std::f64::consts::PI;
pub const TAU: f64 = std::f64::consts::TAU;

// Earth, for scaling TLE orbits into globe units
pub const MU_EARTH_KM: f64 = 398600.4418; // Gravitational parameter (km³/s²)
pub const EARTH_EQUATORIAL_RADIUS_KM: f64 = 6378.137; // WGS84
pub const SECONDS_PER_DAY: f64 = 86400.0;
