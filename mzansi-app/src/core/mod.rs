//! Application core: configuration and the context that wires the
//! components together

pub mod config;
pub mod context;
