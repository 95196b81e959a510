use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tile_core::colorizer::{PaletteColorizer, UniformRedColorizer};
use tile_core::display::SoftwareCanvas;
use tile_core::frame::{FrameConfig, FrameController};
use tile_core::grid::TiledGrid;
use tile_core::simulation::{Fade, Stripes};

fn bench_cell_access(c: &mut Criterion) {
    let mut group = c.benchmark_group("tiled_grid_cells");

    group.bench_function("set_256x256", |b| {
        let mut grid = TiledGrid::new(16).unwrap();
        b.iter(|| {
            for y in -128..128 {
                for x in -128..128 {
                    grid.set(x, y, x ^ y);
                }
            }
            black_box(grid.tile_count());
        });
    });

    group.bench_function("get_256x256", |b| {
        let mut grid = TiledGrid::new(16).unwrap();
        for y in -128..128 {
            for x in -128..128 {
                grid.set(x, y, x ^ y);
            }
        }
        b.iter(|| {
            let mut sum = 0i64;
            for y in -128..128 {
                for x in -128..128 {
                    sum += grid.get(x, y) as i64;
                }
            }
            black_box(sum);
        });
    });

    group.finish();
}

fn bench_stripes_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("stripes_frame");

    for tile_size in [8, 16, 64].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(tile_size), tile_size, |b, &ts| {
            let config = FrameConfig {
                tile_size: ts,
                ..FrameConfig::default()
            };
            let mut fc =
                FrameController::new(config, PaletteColorizer::default(), SoftwareCanvas::new(640, 480)).unwrap();
            let mut stripes = Stripes::new(128).scrolling();
            b.iter(|| {
                let stats = fc.step(&mut stripes).unwrap();
                black_box(stats.drawn);
            });
        });
    }

    group.finish();
}

fn bench_fade_frame(c: &mut Criterion) {
    c.bench_function("fade_frame_256", |b| {
        let mut fc =
            FrameController::new(FrameConfig::default(), UniformRedColorizer, SoftwareCanvas::new(256, 256)).unwrap();
        let mut fade = Fade::new(256, 256, 0.001);
        b.iter(|| {
            let stats = fc.step(&mut fade).unwrap();
            black_box(stats.updated);
        });
    });
}

criterion_group!(benches, bench_cell_access, bench_stripes_frame, bench_fade_frame);
criterion_main!(benches);
