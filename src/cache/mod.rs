//! Single-slot verdict cache.

pub mod memory;
