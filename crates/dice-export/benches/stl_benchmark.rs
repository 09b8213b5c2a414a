//! Mesh build and STL export benchmarks.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use dice_core::{DiceType, EngravingRequest, ExportOptions};
use dice_engrave::{engrave, radial_gradient};
use dice_export::{export_die, mesh_to_stl, mesh_to_stl_ascii};
use dice_geometry::{build_mesh, build_mesh_with_options, GeometryOptions};

fn build_cube(c: &mut Criterion) {
    let options = GeometryOptions::default().with_grid(64);
    c.bench_function("build_cube_grid_64", |b| {
        b.iter(|| build_mesh_with_options(black_box(DiceType::D6), &options))
    });
}

fn engrave_face(c: &mut Criterion) {
    let map = radial_gradient(256, 256).unwrap();
    let die = build_mesh(DiceType::D6);
    let request = EngravingRequest::default();
    c.bench_function("engrave_face_grid_16", |b| {
        b.iter(|| {
            let mut die = die.clone();
            engrave(&mut die, black_box(&request), &map).unwrap()
        })
    });
}

fn serialize(c: &mut Criterion) {
    let mesh = build_mesh(DiceType::D6).mesh;
    c.bench_function("stl_binary", |b| b.iter(|| mesh_to_stl(black_box(&mesh))));
    c.bench_function("stl_ascii", |b| b.iter(|| mesh_to_stl_ascii(black_box(&mesh))));
}

fn export_pipeline(c: &mut Criterion) {
    let die = build_mesh(DiceType::D6);
    let options = ExportOptions::default();
    c.bench_function("export_die_flat_binary", |b| {
        b.iter(|| export_die(black_box(&die), &options))
    });
}

criterion_group!(benches, build_cube, engrave_face, serialize, export_pipeline);
criterion_main!(benches);
