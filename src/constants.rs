pub const G: f64 = 6.67430e-11; // Gravitational constant (m³/kg/s²)
pub const M_EARTH: f64 = 5.972e24; // Mass of Earth (kg)
pub const EARTH_ANGULAR_VELOCITY: f64 = 7.2921150e-5; // Earth's rotation rate (rad/s)

// Attitude tolerances
pub const QUATERNION_MIN_MAGNITUDE: f64 = 1.0e-10;
pub const EULER_ANGLE_TOLERANCE: f64 = 1.0e-10; // Singularity tolerance on EulerAngle2
pub const DCM_ORTHONORMALITY_TOLERANCE: f64 = 1.0e-14;
pub const EULER_AXIS_TOLERANCE: f64 = 1.0e-14; // sin(angle) below this -> default axis
pub const DEGENERATE_VECTOR_TOLERANCE: f64 = 1.0e-5;
pub const MRP_SINGULARITY_TOLERANCE: f64 = 1.0e-10; // |1 + q4| near 180 deg rotation
pub const ATTITUDE_TIME_TOLERANCE: f64 = 1.0e-9 * SECONDS_PER_DAY; // 1e-9 day (s)

// Time
pub const SECONDS_PER_DAY: f64 = 86_400.0;

// Math
pub const PI: f64 = std::f64::consts::PI;
