//! Data models for product rows and configuration.

pub mod config;
pub mod product;
