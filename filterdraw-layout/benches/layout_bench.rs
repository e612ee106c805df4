use criterion::{black_box, criterion_group, criterion_main, Criterion};
use filterdraw_layout::*;

/// Alternating series/shunt chain of `n` components.
fn ladder(n: usize) -> Vec<Component> {
    (0..n)
        .map(|i| {
            if i % 2 == 0 {
                Component::new(format!("L{}", i / 2 + 1), ComponentKind::Inductor, 0.00796, Role::Series)
            } else {
                Component::new(format!("C{}", i / 2 + 1), ComponentKind::Capacitor, 3.18e-7, Role::Shunt)
            }
        })
        .collect()
}

fn cascade(stages: usize) -> Vec<Component> {
    (1..=stages)
        .flat_map(|n| {
            [
                Component::new(format!("S{n}_R1"), ComponentKind::Resistor, 10e3, Role::Series),
                Component::new(format!("S{n}_R2"), ComponentKind::Resistor, 10e3, Role::Series),
                Component::new(format!("S{n}_C1"), ComponentKind::Capacitor, 22e-9, Role::Feedback),
                Component::new(format!("S{n}_C2"), ComponentKind::Capacitor, 10e-9, Role::Shunt),
                Component::new(format!("S{n}_U"), ComponentKind::Opamp, 0.0, Role::Active),
            ]
        })
        .collect()
}

fn bench_ladder(c: &mut Criterion) {
    let cfg = LayoutConfig::default();
    let comps = ladder(9);

    c.bench_function("ladder_9_components", |b| {
        b.iter(|| {
            black_box(render(
                black_box(&comps),
                Topology::LadderT,
                Impedances::new(50.0, 50.0),
                &cfg,
                &SiFormatter,
            ))
        })
    });
}

fn bench_lattice(c: &mut Criterion) {
    let cfg = LayoutConfig::default();
    let comps = ladder(8);

    c.bench_function("lattice_4_sections", |b| {
        b.iter(|| {
            black_box(render(
                black_box(&comps),
                Topology::Lattice,
                Impedances::new(600.0, 600.0),
                &cfg,
                &SiFormatter,
            ))
        })
    });
}

fn bench_sallen_key(c: &mut Criterion) {
    let cfg = LayoutConfig::default();
    let comps = cascade(4);

    c.bench_function("sallen_key_4_stages", |b| {
        b.iter(|| {
            black_box(render(
                black_box(&comps),
                Topology::SallenKey,
                Impedances::default(),
                &cfg,
                &SiFormatter,
            ))
        })
    });
}

fn bench_svg(c: &mut Criterion) {
    let scene = render(
        &cascade(4),
        Topology::SallenKey,
        Impedances::default(),
        &LayoutConfig::default(),
        &SiFormatter,
    );

    c.bench_function("svg_sallen_key_4_stages", |b| {
        b.iter(|| black_box(svg::to_svg(black_box(&scene))))
    });
}

criterion_group!(benches, bench_ladder, bench_lattice, bench_sallen_key, bench_svg);
criterion_main!(benches);
