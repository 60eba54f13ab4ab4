pub mod benchmark;
pub mod catalog;
pub mod cirs_errors;
pub mod config;
pub mod constants;
pub mod corrections;
pub mod earth_orientation;
pub mod ephemeris;
pub mod frame;
pub mod observers;
pub mod ref_system;
pub mod time;
pub mod transform;
