//! Eats memory in fixed-size chunks until allocation fails, to expose the real allocation
//! ceiling of a system: cgroup limits, overcommit behaviour, swap configuration and the OOM
//! killer can all be observed from the point where `memleak` stops growing.
//!
//! Memory eaten by the engine is never freed. It is returned to the operating system when the
//! process exits.

pub mod alloc;
pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod logs;
pub mod native;
pub mod utils;

pub(crate) static NAME: &str = "memleak";
