//! Dispatch backends.
//!
//! The [`Backend`] trait defines the interface for launching a kernel
//! over an index domain. The [`Sequential`] implementation runs on the
//! calling thread and serves as the reference for correctness.

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use kinema_types::{KinemaError, KinemaResult};

/// Below this domain size the threaded backend runs inline.
pub const DEFAULT_MIN_PARALLEL_LEN: usize = 500;

/// Trait for kernel dispatch backends.
///
/// A kernel is called exactly once for every index in `0..dim`. Calls
/// may run concurrently and in any order, so kernels must only write
/// through atomic accumulators.
///
/// # Implementations
/// - [`Sequential`]: In-order reference (always available)
/// - [`Threaded`]: rayon work stealing above a minimum domain size
pub trait Backend: Send + Sync {
    /// Returns the backend name (e.g., "sequential", "threaded").
    fn name(&self) -> &str;

    /// Launch `kernel` over `0..dim`. A zero domain is a no-op.
    fn launch(&self, dim: usize, kernel: &(dyn Fn(usize) + Sync));

    /// Run `op` inside the backend's execution context.
    ///
    /// Used by [`for_each_mut`] so that nested rayon iterators land on
    /// the backend's own pool.
    fn install(&self, op: &mut (dyn FnMut() + Send));

    /// Smallest domain worth splitting across threads.
    fn min_parallel_len(&self) -> usize;

    /// Returns true if launches may run concurrently.
    fn is_parallel(&self) -> bool;
}

/// Sequential backend: in-order reference implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sequential;

impl Sequential {
    pub fn new() -> Self {
        Self
    }
}

impl Backend for Sequential {
    fn name(&self) -> &str {
        "sequential"
    }

    fn launch(&self, dim: usize, kernel: &(dyn Fn(usize) + Sync)) {
        for i in 0..dim {
            kernel(i);
        }
    }

    fn install(&self, op: &mut (dyn FnMut() + Send)) {
        op();
    }

    fn min_parallel_len(&self) -> usize {
        usize::MAX
    }

    fn is_parallel(&self) -> bool {
        false
    }
}

/// Threaded backend built on rayon.
///
/// Uses the global rayon pool unless constructed with an explicit
/// thread count.
#[derive(Clone)]
pub struct Threaded {
    pool: Option<Arc<ThreadPool>>,
    min_parallel_len: usize,
}

impl Threaded {
    /// Creates a backend on the global rayon pool.
    pub fn new() -> Self {
        Self {
            pool: None,
            min_parallel_len: DEFAULT_MIN_PARALLEL_LEN,
        }
    }

    /// Creates a backend with a dedicated pool of `threads` workers.
    pub fn with_threads(threads: usize) -> KinemaResult<Self> {
        if threads == 0 {
            return Err(KinemaError::Dispatch(
                "thread pool needs at least one worker".into(),
            ));
        }
        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("kinema-worker-{i}"))
            .build()
            .map_err(|e| KinemaError::Dispatch(format!("failed to build thread pool: {e}")))?;
        tracing::debug!(threads, "Created dedicated solver thread pool");
        Ok(Self {
            pool: Some(Arc::new(pool)),
            min_parallel_len: DEFAULT_MIN_PARALLEL_LEN,
        })
    }

    /// Overrides the inline threshold.
    pub fn with_min_parallel_len(mut self, len: usize) -> Self {
        self.min_parallel_len = len;
        self
    }

    /// Number of worker threads available to launches.
    pub fn num_threads(&self) -> usize {
        match &self.pool {
            Some(pool) => pool.current_num_threads(),
            None => rayon::current_num_threads(),
        }
    }
}

impl Default for Threaded {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Threaded {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Threaded")
            .field("threads", &self.num_threads())
            .field("min_parallel_len", &self.min_parallel_len)
            .finish()
    }
}

impl Backend for Threaded {
    fn name(&self) -> &str {
        "threaded"
    }

    fn launch(&self, dim: usize, kernel: &(dyn Fn(usize) + Sync)) {
        if dim < self.min_parallel_len {
            for i in 0..dim {
                kernel(i);
            }
            return;
        }
        let run = || (0..dim).into_par_iter().for_each(|i| kernel(i));
        match &self.pool {
            Some(pool) => pool.install(run),
            None => run(),
        }
    }

    fn install(&self, op: &mut (dyn FnMut() + Send)) {
        match &self.pool {
            Some(pool) => pool.install(|| op()),
            None => op(),
        }
    }

    fn min_parallel_len(&self) -> usize {
        self.min_parallel_len
    }

    fn is_parallel(&self) -> bool {
        true
    }
}

/// Backend selection for configuration files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    #[default]
    Sequential,
    Threaded,
}

impl BackendKind {
    /// Instantiate the selected backend.
    pub fn create(self) -> Box<dyn Backend> {
        match self {
            BackendKind::Sequential => Box::new(Sequential::new()),
            BackendKind::Threaded => Box::new(Threaded::new()),
        }
    }
}

/// Apply `f(i, &mut out[i])` to every element of `out`.
///
/// Each element is owned by exactly one call, so no atomics are needed.
/// Runs in parallel when the backend allows it and the slice is large
/// enough.
pub fn for_each_mut<T, F>(backend: &dyn Backend, out: &mut [T], f: F)
where
    T: Send,
    F: Fn(usize, &mut T) + Sync + Send,
{
    if backend.is_parallel() && out.len() >= backend.min_parallel_len() {
        backend.install(&mut || {
            out.par_iter_mut().enumerate().for_each(|(i, x)| f(i, x));
        });
    } else {
        for (i, x) in out.iter_mut().enumerate() {
            f(i, x);
        }
    }
}

/// Apply `f(i, &mut a[i], &mut b[i])` across two parallel output slices.
///
/// Returns a dispatch error if the slices differ in length.
pub fn for_each_zip_mut<A, B, F>(backend: &dyn Backend, a: &mut [A], b: &mut [B], f: F) -> KinemaResult<()>
where
    A: Send,
    B: Send,
    F: Fn(usize, &mut A, &mut B) + Sync + Send,
{
    if a.len() != b.len() {
        return Err(KinemaError::Dispatch(format!(
            "zipped outputs differ in length: {} vs {}",
            a.len(),
            b.len()
        )));
    }
    if backend.is_parallel() && a.len() >= backend.min_parallel_len() {
        backend.install(&mut || {
            a.par_iter_mut()
                .zip(b.par_iter_mut())
                .enumerate()
                .for_each(|(i, (x, y))| f(i, x, y));
        });
    } else {
        for (i, (x, y)) in a.iter_mut().zip(b.iter_mut()).enumerate() {
            f(i, x, y);
        }
    }
    Ok(())
}
