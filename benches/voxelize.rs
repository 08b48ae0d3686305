use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use voxfield::{
    AreaId, MarkedTriangle, MarkedTriangleSet, RasterConfig, SpanMergePolicy, TriangleRasterizer,
    Vec3, VoxelField,
};

const FIELD_EXTENT: f32 = 64.0;
const CELL_SIZE: f32 = 0.25;

fn create_field(policy: SpanMergePolicy) -> VoxelField {
    VoxelField::from_bounds(
        Vec3::ZERO,
        Vec3::new(FIELD_EXTENT, 16.0, FIELD_EXTENT),
        CELL_SIZE,
        CELL_SIZE,
        0.1,
    )
    .expect("valid field")
    .with_merge_policy(policy)
}

fn small_triangle() -> [Vec3; 3] {
    [
        Vec3::new(10.0, 1.0, 10.0),
        Vec3::new(11.0, 1.2, 10.0),
        Vec3::new(10.5, 1.5, 11.0),
    ]
}

fn medium_triangle() -> [Vec3; 3] {
    [
        Vec3::new(10.0, 1.0, 10.0),
        Vec3::new(20.0, 2.0, 10.0),
        Vec3::new(15.0, 4.0, 20.0),
    ]
}

fn large_triangle() -> [Vec3; 3] {
    [
        Vec3::new(2.0, 1.0, 2.0),
        Vec3::new(62.0, 6.0, 8.0),
        Vec3::new(30.0, 12.0, 60.0),
    ]
}

/// A gently rolling terrain grid of `n * n` quads.
fn terrain(n: u32) -> MarkedTriangleSet {
    let step = FIELD_EXTENT / n as f32;
    let mut set = MarkedTriangleSet::default();
    for z in 0..=n {
        for x in 0..=n {
            let (fx, fz) = (x as f32 * step, z as f32 * step);
            let y = 4.0 + (fx * 0.2).sin() * 2.0 + (fz * 0.15).cos() * 2.0;
            set.push_vertex(Vec3::new(fx, y, fz));
        }
    }
    let row = n + 1;
    for z in 0..n {
        for x in 0..n {
            let i = z * row + x;
            for tri in [
                MarkedTriangle::new(i, i + row, i + 1, AreaId::WALKABLE),
                MarkedTriangle::new(i + 1, i + row, i + row + 1, AreaId::WALKABLE),
            ] {
                set.push_triangle(tri).expect("indices in range");
            }
        }
    }
    set
}

fn benchmark_single_triangle(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_triangle");

    for (name, triangle) in [
        ("small", small_triangle()),
        ("medium", medium_triangle()),
        ("large", large_triangle()),
    ] {
        group.bench_with_input(BenchmarkId::new("append", name), &triangle, |b, tri| {
            let mut field = create_field(SpanMergePolicy::Append);
            let mut rasterizer = TriangleRasterizer::new();
            b.iter(|| {
                field.clear();
                let [a, bb, cc] = *black_box(tri);
                rasterizer.rasterize(&mut field, a, bb, cc, AreaId::WALKABLE, 1)
            });
        });

        group.bench_with_input(BenchmarkId::new("merge", name), &triangle, |b, tri| {
            let mut field = create_field(SpanMergePolicy::Merge);
            let mut rasterizer = TriangleRasterizer::new();
            b.iter(|| {
                field.clear();
                let [a, bb, cc] = *black_box(tri);
                rasterizer.rasterize(&mut field, a, bb, cc, AreaId::WALKABLE, 1)
            });
        });
    }

    group.finish();
}

fn benchmark_many_triangles(c: &mut Criterion) {
    let mut group = c.benchmark_group("many_triangles");

    let set = terrain(32);
    let config = RasterConfig::default();

    group.bench_function("append_2048_triangles", |b| {
        let mut field = create_field(SpanMergePolicy::Append);
        b.iter(|| {
            field.clear();
            field.rasterize_with(black_box(&set), &config)
        });
    });

    group.bench_function("merge_2048_triangles", |b| {
        let mut field = create_field(SpanMergePolicy::Merge);
        b.iter(|| {
            field.clear();
            field.rasterize_with(black_box(&set), &config)
        });
    });

    group.finish();
}

criterion_group!(benches, benchmark_single_triangle, benchmark_many_triangles);
criterion_main!(benches);
