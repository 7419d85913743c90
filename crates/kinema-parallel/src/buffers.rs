//! Lock-free accumulation buffers.
//!
//! Force evaluators scatter contributions from many elements into the
//! same particle or body. Each scalar is stored as the bit pattern of an
//! `f32` inside an `AtomicU32` and updated with a compare-and-swap loop.

use std::sync::atomic::{AtomicU32, Ordering};

use kinema_math::{Vec3, Wrench};

/// An `f32` with atomic add.
#[derive(Debug, Default)]
pub struct AtomicF32(AtomicU32);

impl AtomicF32 {
    pub fn new(value: f32) -> Self {
        Self(AtomicU32::new(value.to_bits()))
    }

    #[inline]
    pub fn load(&self) -> f32 {
        f32::from_bits(self.0.load(Ordering::Relaxed))
    }

    /// Overwrite through a unique borrow, skipping the atomic store.
    #[inline]
    pub fn set_mut(&mut self, value: f32) {
        *self.0.get_mut() = value.to_bits();
    }

    /// Atomically adds `value`, returning the previous value.
    #[inline]
    pub fn fetch_add(&self, value: f32) -> f32 {
        let mut current = self.0.load(Ordering::Relaxed);
        loop {
            let next = (f32::from_bits(current) + value).to_bits();
            match self
                .0
                .compare_exchange_weak(current, next, Ordering::Relaxed, Ordering::Relaxed)
            {
                Ok(previous) => return f32::from_bits(previous),
                Err(actual) => current = actual,
            }
        }
    }
}

impl Clone for AtomicF32 {
    fn clone(&self) -> Self {
        Self::new(self.load())
    }
}

/// A fixed-size arena of atomic `f32` values.
#[derive(Debug, Clone, Default)]
pub struct AtomicArray {
    data: Vec<AtomicF32>,
}

impl AtomicArray {
    /// Creates an arena filled with zeros.
    pub fn zeros(len: usize) -> Self {
        Self {
            data: (0..len).map(|_| AtomicF32::new(0.0)).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn add(&self, i: usize, value: f32) {
        self.data[i].fetch_add(value);
    }

    #[inline]
    pub fn load(&self, i: usize) -> f32 {
        self.data[i].load()
    }

    /// Fill with `value`.
    pub fn fill(&mut self, value: f32) {
        for x in &mut self.data {
            x.set_mut(value);
        }
    }

    /// Copies the current values into a plain vector.
    pub fn to_vec(&self) -> Vec<f32> {
        self.data.iter().map(AtomicF32::load).collect()
    }
}

/// Per-element `Vec3` accumulator stored as three scalar channels.
#[derive(Debug, Clone, Default)]
pub struct Vec3Accumulator {
    x: AtomicArray,
    y: AtomicArray,
    z: AtomicArray,
}

impl Vec3Accumulator {
    /// Creates an accumulator of `len` zero vectors.
    pub fn zeros(len: usize) -> Self {
        Self {
            x: AtomicArray::zeros(len),
            y: AtomicArray::zeros(len),
            z: AtomicArray::zeros(len),
        }
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Atomically add `v` to element `i`.
    #[inline]
    pub fn add(&self, i: usize, v: Vec3) {
        self.x.add(i, v.x);
        self.y.add(i, v.y);
        self.z.add(i, v.z);
    }

    /// Atomically subtract `v` from element `i`.
    #[inline]
    pub fn sub(&self, i: usize, v: Vec3) {
        self.add(i, -v);
    }

    #[inline]
    pub fn get(&self, i: usize) -> Vec3 {
        Vec3::new(self.x.load(i), self.y.load(i), self.z.load(i))
    }

    /// Reset every element to zero.
    pub fn clear(&mut self) {
        self.x.fill(0.0);
        self.y.fill(0.0);
        self.z.fill(0.0);
    }

    /// Copies the current values into a plain vector.
    pub fn to_vec(&self) -> Vec<Vec3> {
        (0..self.len()).map(|i| self.get(i)).collect()
    }

    /// Sum over all elements.
    pub fn sum(&self) -> Vec3 {
        (0..self.len()).map(|i| self.get(i)).sum()
    }
}

/// Per-body torque/force accumulator.
#[derive(Debug, Clone, Default)]
pub struct WrenchAccumulator {
    torque: Vec3Accumulator,
    force: Vec3Accumulator,
}

impl WrenchAccumulator {
    pub fn zeros(len: usize) -> Self {
        Self {
            torque: Vec3Accumulator::zeros(len),
            force: Vec3Accumulator::zeros(len),
        }
    }

    pub fn len(&self) -> usize {
        self.force.len()
    }

    pub fn is_empty(&self) -> bool {
        self.force.is_empty()
    }

    /// Atomically add `w` to body `i`.
    #[inline]
    pub fn add(&self, i: usize, w: Wrench) {
        self.torque.add(i, w.torque);
        self.force.add(i, w.force);
    }

    #[inline]
    pub fn sub(&self, i: usize, w: Wrench) {
        self.add(i, -w);
    }

    #[inline]
    pub fn get(&self, i: usize) -> Wrench {
        Wrench::new(self.torque.get(i), self.force.get(i))
    }

    pub fn clear(&mut self) {
        self.torque.clear();
        self.force.clear();
    }

    pub fn to_vec(&self) -> Vec<Wrench> {
        (0..self.len()).map(|i| self.get(i)).collect()
    }
}
