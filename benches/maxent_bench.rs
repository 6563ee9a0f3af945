use criterion::{black_box, criterion_group, criterion_main, Criterion};

use maxent::{Feature, Instance, MaxEnt};

fn instances() -> Vec<Instance> {
    maxent::reader::read_file("tests/data/weather.train").unwrap()
}

fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("maxent");
    group.bench_function("train", |b| {
        let data = instances();
        b.iter(|| {
            let mut model = MaxEnt::new(black_box(data.clone())).unwrap();
            model.params_mut().set_max_iterations(20).unwrap();
            model.train().unwrap();
        })
    });
    group.bench_function("classify", |b| {
        let mut model = MaxEnt::new(instances()).unwrap();
        model.train().unwrap();
        let classifier = model.classifier();
        let xs = vec![
            Feature::new(vec![1, 2, 0]),
            Feature::new(vec![0, 1, 1]),
            Feature::new(vec![2, 2, 2]),
            Feature::new(vec![1, 1, 0]),
        ];
        b.iter(|| {
            for x in &xs {
                let _label = classifier.classify(black_box(x));
            }
        })
    });
    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
