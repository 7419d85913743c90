//! Integration tests for kinema-parallel.

use std::sync::Mutex;

use kinema_math::{Vec3, Wrench};
use kinema_parallel::{
    for_each_mut, AtomicArray, AtomicF32, Backend, BackendKind, Sequential, Threaded,
    Vec3Accumulator, WrenchAccumulator,
};

// ─── Backend Tests ────────────────────────────────────────────

#[test]
fn sequential_visits_in_order() {
    let seen = Mutex::new(Vec::new());
    Sequential::new().launch(5, &|i| seen.lock().unwrap().push(i));
    assert_eq!(*seen.lock().unwrap(), vec![0, 1, 2, 3, 4]);
}

#[test]
fn zero_dim_launch_is_noop() {
    let hits = AtomicArray::zeros(1);
    Sequential::new().launch(0, &|_| hits.add(0, 1.0));
    Threaded::new().launch(0, &|_| hits.add(0, 1.0));
    assert_eq!(hits.load(0), 0.0);
}

#[test]
fn threaded_visits_every_index_once() {
    let n = 10_000;
    let counts = AtomicArray::zeros(n);
    let backend = Threaded::new().with_min_parallel_len(16);
    backend.launch(n, &|i| counts.add(i, 1.0));
    assert!(counts.to_vec().iter().all(|&c| c == 1.0));
}

#[test]
fn threaded_contended_add_is_exact() {
    let total = AtomicArray::zeros(1);
    let backend = Threaded::with_threads(4).unwrap().with_min_parallel_len(1);
    backend.launch(4096, &|_| total.add(0, 1.0));
    assert_eq!(total.load(0), 4096.0);
}

#[test]
fn threaded_zero_workers_rejected() {
    assert!(Threaded::with_threads(0).is_err());
}

#[test]
fn backend_kind_creates_named_backend() {
    assert_eq!(BackendKind::Sequential.create().name(), "sequential");
    assert_eq!(BackendKind::Threaded.create().name(), "threaded");
    assert!(!BackendKind::Sequential.create().is_parallel());
    assert_eq!(BackendKind::default(), BackendKind::Sequential);
}

#[test]
fn backend_kind_serde() {
    let json = serde_json::to_string(&BackendKind::Threaded).unwrap();
    assert_eq!(json, "\"threaded\"");
}

#[test]
fn for_each_mut_writes_every_slot() {
    let mut out = vec![0usize; 2000];
    let backend = Threaded::new().with_min_parallel_len(64);
    for_each_mut(&backend, &mut out, |i, x| *x = i * 2);
    assert!(out.iter().enumerate().all(|(i, &x)| x == i * 2));

    let mut seq = vec![0usize; 3];
    for_each_mut(&Sequential::new(), &mut seq, |i, x| *x = i + 1);
    assert_eq!(seq, vec![1, 2, 3]);
}

// ─── Accumulator Tests ────────────────────────────────────────

#[test]
fn atomic_f32_fetch_add_returns_previous() {
    let a = AtomicF32::new(1.5);
    assert_eq!(a.fetch_add(2.0), 1.5);
    assert_eq!(a.load(), 3.5);
}

#[test]
fn vec3_accumulator_add_and_clear() {
    let mut acc = Vec3Accumulator::zeros(3);
    acc.add(1, Vec3::new(1.0, 2.0, 3.0));
    acc.add(1, Vec3::new(1.0, 0.0, -3.0));
    acc.sub(2, Vec3::X);
    assert_eq!(acc.get(1), Vec3::new(2.0, 2.0, 0.0));
    assert_eq!(acc.get(2), -Vec3::X);
    assert_eq!(acc.sum(), Vec3::new(1.0, 2.0, 0.0));

    acc.clear();
    assert!(acc.to_vec().iter().all(|v| *v == Vec3::ZERO));
}

#[test]
fn vec3_accumulator_clone_is_deep() {
    let acc = Vec3Accumulator::zeros(1);
    acc.add(0, Vec3::Y);
    let copy = acc.clone();
    acc.add(0, Vec3::Y);
    assert_eq!(copy.get(0), Vec3::Y);
    assert_eq!(acc.get(0), Vec3::Y * 2.0);
}

#[test]
fn wrench_accumulator_roundtrip() {
    let mut acc = WrenchAccumulator::zeros(2);
    acc.add(0, Wrench::new(Vec3::Z, Vec3::X));
    acc.sub(0, Wrench::new(Vec3::ZERO, Vec3::X));
    let w = acc.get(0);
    assert_eq!(w.torque, Vec3::Z);
    assert_eq!(w.force, Vec3::ZERO);
    assert_eq!(acc.len(), 2);
    acc.clear();
    assert_eq!(acc.get(0), Wrench::ZERO);
}

#[test]
fn threaded_scatter_into_vec3_accumulator() {
    let acc = Vec3Accumulator::zeros(4);
    let backend = Threaded::new().with_min_parallel_len(8);
    backend.launch(1000, &|i| acc.add(i % 4, Vec3::ONE));
    for i in 0..4 {
        assert_eq!(acc.get(i), Vec3::splat(250.0));
    }
}
