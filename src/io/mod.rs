//! Export surfaces for engine outputs.

pub mod export;
