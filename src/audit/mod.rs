//! Core of the license audit: domain model, policies and services.
//!
//! Nothing in here touches the filesystem or the console; all I/O goes
//! through the ports.
pub mod domain;
pub mod policies;
pub mod services;
