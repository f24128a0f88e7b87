pub mod evidence;
pub mod inspections;
pub mod questions;
