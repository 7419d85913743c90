//! Integration tests for kinema-types.

use kinema_types::{BodyId, KinemaError, ModelUpdateFlags, ParticleFlags, ParticleId, ShapeId};

// ─── ID Tests ──────────────────────────────────────────────────

#[test]
fn particle_id_index() {
    let id = ParticleId(42);
    assert_eq!(id.index(), 42);
}

#[test]
fn body_and_shape_ids_index() {
    assert_eq!(BodyId(7).index(), 7);
    assert_eq!(ShapeId::from(3).index(), 3);
}

#[test]
fn ids_are_serializable() {
    let id = ParticleId(100);
    let json = serde_json::to_string(&id).unwrap();
    let deserialized: ParticleId = serde_json::from_str(&json).unwrap();
    assert_eq!(id, deserialized);
}

// ─── Flag Tests ───────────────────────────────────────────────

#[test]
fn particles_default_to_active() {
    assert!(ParticleFlags::default().is_active());
}

#[test]
fn clearing_active_bit_makes_particle_kinematic() {
    let mut flags = ParticleFlags::default();
    flags.remove(ParticleFlags::ACTIVE);
    assert!(!flags.is_active());
    assert_eq!(flags.bits(), 0);
}

#[test]
fn update_flags_are_disjoint_bits() {
    let all = [
        ModelUpdateFlags::JOINT_PROPERTIES,
        ModelUpdateFlags::JOINT_AXIS_PROPERTIES,
        ModelUpdateFlags::DOF_PROPERTIES,
        ModelUpdateFlags::BODY_PROPERTIES,
        ModelUpdateFlags::BODY_INERTIAL_PROPERTIES,
        ModelUpdateFlags::SHAPE_PROPERTIES,
    ];
    for (i, a) in all.iter().enumerate() {
        assert_eq!(a.bits().count_ones(), 1);
        for b in &all[i + 1..] {
            assert!(!a.intersects(*b));
        }
    }
    assert_eq!(ModelUpdateFlags::all().bits(), 0b11_1111);
}

// ─── Error Tests ──────────────────────────────────────────────

#[test]
fn error_display() {
    let err = KinemaError::InvalidTopology("spring 3 references particle 12".into());
    assert!(err.to_string().contains("particle 12"));
}

#[test]
fn io_error_converts() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.toml");
    let err: KinemaError = io.into();
    assert!(err.to_string().contains("missing.toml"));
}
