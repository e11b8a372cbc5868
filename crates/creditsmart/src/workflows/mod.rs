pub mod application;
pub mod simulator;
