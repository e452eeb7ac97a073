//! Core library for Task Tracker
//!
//! This crate contains the core business logic, including:
//! - The task record and its status lifecycle
//! - Owner-scoped task queries and storage
//! - The task service the transport layer talks to

pub mod error;
pub mod task;

pub use error::Error;
pub type Result<T> = std::result::Result<T, Error>;
