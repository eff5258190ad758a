//! Benchmarks for template rendering.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use serde_json::json;
use siminput::prelude::*;

fn scf_template() -> Template {
    let cutoffs = json!({"ecutwfc": 40, "ecutrho": 160});
    let kgrid = json!({"nk1": 4, "nk2": 4, "nk3": 4, "s1": 0, "s2": 0, "s3": 0});

    Template::new(
        "pw_scf.in",
        "&CONTROL\n  calculation = 'scf'\n/\n&SYSTEM\n  ecutwfc = {{ cutoffs.ecutwfc }}\n  ecutrho = {{ cutoffs.ecutrho }}\n/\nK_POINTS automatic\n{{ kgrid.nk1 }} {{ kgrid.nk2 }} {{ kgrid.nk3 }} {{ kgrid.s1 }} {{ kgrid.s2 }} {{ kgrid.s3 }}\n",
    )
    .with_context_provider(
        ContextProvider::new("cutoffs").with_data(cutoffs.as_object().cloned().unwrap_or_default()),
    )
    .with_context_provider(
        ContextProvider::new("kgrid").with_data(kgrid.as_object().cloned().unwrap_or_default()),
    )
}

fn render_benchmark(c: &mut Criterion) {
    let template = scf_template();

    c.bench_function("render_scf_template", |b| {
        b.iter(|| {
            let mut template = black_box(template.clone());
            template.render(None).expect("template renders");
            template.rendered
        })
    });

    c.bench_function("rendering_context", |b| {
        b.iter(|| black_box(template.rendering_context(None)))
    });
}

criterion_group!(benches, render_benchmark);
criterion_main!(benches);
