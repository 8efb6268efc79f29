//! CLI command implementations.

pub mod bias;
pub mod common;
pub mod noise;
pub mod run;
pub mod tomography;
