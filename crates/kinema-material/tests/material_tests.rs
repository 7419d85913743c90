//! Integration tests for kinema-material.

use kinema_material::{ClothPreset, MaterialLibrary, SolidPreset};

fn isotropic_cloth() -> ClothPreset {
    ClothPreset {
        name: "test".into(),
        areal_density: 0.2,
        stretch_warp: 100.0,
        stretch_weft: 100.0,
        shear: 10.0,
        area: 50.0,
        damping: 1.0,
        bend_ke: 0.01,
        bend_kd: 0.0,
        drag: 0.0,
        lift: 0.0,
        friction: 0.5,
    }
}

// ─── ClothPreset Tests ────────────────────────────────────────

#[test]
fn particle_mass_distribution() {
    let cloth = isotropic_cloth();
    assert!((cloth.particle_mass(100, 1.0) - 0.002).abs() < 1e-7);
    assert_eq!(cloth.particle_mass(0, 1.0), 0.0);
}

#[test]
fn isotropic_triangle_material() {
    let m = isotropic_cloth().triangle_material();
    assert!(m.anisotropy.is_none());
    assert!((m.ke - 100.0).abs() < 1e-6);
    assert!((m.ka - 50.0).abs() < 1e-6);
}

#[test]
fn anisotropic_triangle_material() {
    let mut cloth = isotropic_cloth();
    cloth.stretch_warp = 200.0;
    assert!(cloth.is_anisotropic());
    let a = cloth.triangle_material().anisotropy.unwrap();
    assert_eq!((a.warp, a.weft, a.shear), (200.0, 100.0, 10.0));
}

#[test]
fn negative_coefficient_rejected() {
    let mut cloth = isotropic_cloth();
    cloth.bend_ke = -1.0;
    assert!(cloth.validate().is_err());
}

// ─── SolidPreset Tests ────────────────────────────────────────

#[test]
fn lame_parameters() {
    let solid = SolidPreset {
        name: "s".into(),
        density: 1000.0,
        youngs_modulus: 1.0e4,
        poisson_ratio: 0.25,
        damping: 0.0,
    };
    let (mu, lambda) = solid.lame();
    assert!((mu - 4000.0).abs() < 1e-2);
    assert!((lambda - 4000.0).abs() < 1e-2);
    assert_eq!(solid.tet_material().k_mu, mu);
}

#[test]
fn incompressible_poisson_rejected() {
    let solid = SolidPreset {
        name: "s".into(),
        density: 1000.0,
        youngs_modulus: 1.0e4,
        poisson_ratio: 0.5,
        damping: 0.0,
    };
    assert!(solid.validate().is_err());
}

// ─── MaterialLibrary Tests ────────────────────────────────────

#[test]
fn default_library_contents() {
    let lib = MaterialLibrary::with_defaults();
    assert_eq!(lib.cloth_names(), vec!["chiffon", "cotton", "denim", "jersey", "silk"]);
    assert_eq!(lib.solid_names(), vec!["foam", "gel", "rubber"]);
    assert_eq!(lib.len(), 8);
}

#[test]
fn all_presets_valid() {
    let lib = MaterialLibrary::with_defaults();
    for name in lib.cloth_names() {
        lib.cloth(name).unwrap().validate().unwrap();
    }
    for name in lib.solid_names() {
        lib.solid(name).unwrap().validate().unwrap();
    }
}

#[test]
fn unknown_material_returns_none() {
    assert!(MaterialLibrary::with_defaults().cloth("nonexistent").is_none());
}

#[test]
fn library_from_toml_and_merge() {
    let text = r#"
        [[cloth]]
        name = "canvas"
        areal_density = 0.5
        stretch_warp = 5000.0
        stretch_weft = 5000.0
        shear = 800.0
        area = 4000.0
        damping = 3.0
        bend_ke = 0.05
        bend_kd = 0.001
        friction = 0.7

        [[solid]]
        name = "clay"
        density = 1800.0
        youngs_modulus = 2.0e4
        poisson_ratio = 0.3
        damping = 5.0
    "#;
    let custom = MaterialLibrary::from_toml(text).unwrap();
    assert_eq!(custom.len(), 2);
    assert_eq!(custom.cloth("canvas").unwrap().drag, 0.0);

    let mut lib = MaterialLibrary::with_defaults();
    lib.merge(custom);
    assert_eq!(lib.len(), 10);
    assert!(lib.solid("clay").is_some());
}

#[test]
fn invalid_toml_rejected() {
    assert!(MaterialLibrary::from_toml("[[cloth]]\nname = 3").is_err());
    let bad = r#"
        [[solid]]
        name = "bad"
        density = 1.0
        youngs_modulus = -1.0
        poisson_ratio = 0.3
        damping = 0.0
    "#;
    assert!(MaterialLibrary::from_toml(bad).is_err());
}
