pub mod definitions;
pub mod logger;
pub mod runner;
