//! Touch controller drivers

pub mod cst816s;

pub use cst816s::{Cst816s, Cst816sConfig, TouchError};
