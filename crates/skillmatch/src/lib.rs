//! Skill-based staffing for a software agency: match people to project requirements,
//! schedule assignments, search and summarise the roster.

pub mod config;
pub mod error;
pub mod staffing;
pub mod telemetry;
