//! # kinema-parallel
//!
//! Parallel dispatch layer for the Kinema simulation engine.
//!
//! Provides a [`Backend`] trait that launches a kernel over an index
//! domain `0..dim`, with two implementations:
//! - [`Sequential`]: Runs indices in order on the calling thread
//! - [`Threaded`]: Splits the domain across a rayon thread pool
//!
//! Kernels write their results through the lock-free accumulators in
//! [`buffers`], so many launches can scatter into the same element.

pub mod backend;
pub mod buffers;

pub use backend::{for_each_mut, for_each_zip_mut, Backend, BackendKind, Sequential, Threaded};
pub use buffers::{AtomicArray, AtomicF32, Vec3Accumulator, WrenchAccumulator};
