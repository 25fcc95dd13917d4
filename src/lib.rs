pub mod display;
pub mod driver;
pub mod logger;
pub mod report;
