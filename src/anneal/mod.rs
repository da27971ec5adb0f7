//! Simulated annealing over farmer-to-crop assignments.
//!
//! Single-solution trajectory search: a worsening move is accepted with
//! a probability that decays with the temperature, letting the search
//! escape local optima early and settle into exploitation as the
//! schedule cools.
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Cerny (1985), "Thermodynamical Approach to the Travelling Salesman Problem"

mod config;
mod runner;

pub use config::AnnealConfig;
pub use runner::{AnnealOutcome, AnnealRunner};
