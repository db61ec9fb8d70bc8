//! Password generation and strength evaluation.
//!
//! [`pass::generate`] draws passwords from the OS random source through an unbiased
//! [`rand::Sampler`]. [`strength::evaluate`] scores any password and classifies it
//! into a tier with crack-time projections. [`session::Session`] ties both to a
//! time-boxed history and a self-clearing clipboard for interactive front-ends.

pub mod error;
pub mod pass;
pub mod rand;
pub mod session;
pub mod settings;
pub mod strength;

pub use error::{Error, Result};
