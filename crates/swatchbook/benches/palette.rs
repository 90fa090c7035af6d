use criterion::{black_box, criterion_group, criterion_main, Criterion};
use swatchbook::{
    Color, DesignSystem, LuminancePaletteGenerator, Palette, PaletteConfig, PaletteGenerator, StandardLuminance,
};

pub fn run_benchmarks(c: &mut Criterion) {
    let accent = Color::from_24bit(0xda, 0x1a, 0x5f);

    let mut group = c.benchmark_group("palette");
    group.bench_function("generator", |b| {
        let config = PaletteConfig::default().with_base_color(accent);
        b.iter(|| PaletteGenerator::new(black_box(config.clone())))
    });
    group.bench_function("luminance-generator", |b| {
        b.iter(|| LuminancePaletteGenerator::new(black_box(accent)).palette())
    });
    group.bench_function("from-color", |b| b.iter(|| Palette::from_color(black_box(accent))));
    group.finish();

    let system = DesignSystem::new().expect("standard tokens register");
    let root = system.root();
    let tokens = system.tokens();
    let mut light = false;

    let mut group = c.benchmark_group("tokens");
    group.bench_function("cached", |b| {
        b.iter(|| system.get(tokens.neutral_fill.rest, root))
    });
    group.bench_function("invalidated", |b| {
        b.iter(|| {
            light = !light;
            let luminance = if light {
                StandardLuminance::LightMode
            } else {
                StandardLuminance::DarkMode
            };
            system.set_base_layer_luminance(root, luminance);
            system.get(tokens.neutral_fill.rest, root)
        })
    });
    group.finish();
}

criterion_group!(benches, run_benchmarks);
criterion_main!(benches);
