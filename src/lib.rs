//! parcel-area - Land parcel boundaries, areas and record submission

pub mod api;
pub mod config;
pub mod domain;
pub mod geometry;
pub mod input;
pub mod logging;
pub mod report;
