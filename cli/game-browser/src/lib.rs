//! Browsing and search core for a game catalog.
//!
//! - [projector] flattens catalog records into [projector::DisplayGame]s
//! - [search] owns the displayed result set, filtering locally or
//!   querying the catalog
//! - [detail] loads a single game for the detail page
//! - [display] renders all of the above as plain text
//!
//! [init] builds the catalog client and orchestrator from [config::Config]
//! and sets up logging.

pub mod config;
pub mod detail;
pub mod display;
pub mod init;
pub mod projector;
pub mod sample;
pub mod search;
