//! # Cache topology
//!
//! Discovers the data-cache hierarchy (L1/L2/L3) of the machine by reading
//! the cache sizes the kernel exports through sysfs for cpu0.
//!
//! The primary interface is [`read`], which returns the three cache levels
//! in ascending order so callers can annotate size-sensitive measurements
//! with the boundaries where working sets stop fitting in each level.

pub mod topology;

pub use topology::*;
