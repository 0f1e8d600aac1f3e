use criterion::criterion_main;


criterion_main!(
    boundary::boundary_benches,
    classification::classification_benches,
);
