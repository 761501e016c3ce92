//! Library exports for the wedding photo-sharing application
//!
//! This module exposes internal components for testing and potential library usage.

pub mod error;
pub mod handler;
pub mod model;
pub mod route;
pub mod store;
pub mod upload;
