pub mod euler;
pub mod quaternion;
pub mod rotation;
