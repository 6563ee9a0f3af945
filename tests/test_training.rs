use maxent::train::Trainer;
use maxent::{Error, Feature, Instance, MaxEnt};

fn weather() -> Vec<Instance> {
    maxent::reader::read_file("tests/data/weather.train").unwrap()
}

#[test]
fn test_basic_training() {
    let mut trainer = Trainer::new();
    trainer.extend(weather()).unwrap();
    trainer.set("max_iterations", "20").unwrap();

    let model = match trainer.train() {
        Ok(model) => model,
        Err(e) => panic!("Training failed: {}", e),
    };

    // (3 + 3 + 3) values x 3 labels
    assert_eq!(model.num_functions(), 27);
    assert_eq!(model.num_distinct_features(), 9);
    assert_eq!(model.classifier().accuracy(&weather()), 1.0);
}

#[test]
fn test_single_class() {
    let instances = vec![
        Instance::new(3, vec![0, 1]),
        Instance::new(3, vec![1, 0]),
        Instance::new(3, vec![2, 2]),
    ];
    let mut model = MaxEnt::new(instances).unwrap();
    model.train().unwrap();

    let classifier = model.classifier();
    for values in [[0, 0], [1, 1], [2, 2], [5, 5]] {
        assert_eq!(classifier.classify(&Feature::new(values.to_vec())), 3);
    }
}

#[test]
fn test_training_is_deterministic() {
    let mut a = MaxEnt::new(weather()).unwrap();
    let mut b = MaxEnt::new(weather()).unwrap();
    a.params_mut().set_max_iterations(30).unwrap();
    b.params_mut().set_max_iterations(30).unwrap();
    a.train().unwrap();
    b.train().unwrap();
    assert_eq!(a.weights(), b.weights());
}

#[test]
fn test_non_contiguous_labels() {
    let instances = vec![
        Instance::new(5, vec![0, 1]),
        Instance::new(7, vec![1, 0]),
        Instance::new(6, vec![1, 1]),
    ];
    let mut model = MaxEnt::new(instances.clone()).unwrap();
    // 2 dims x 2 values x labels 5..=7
    assert_eq!(model.num_functions(), 12);
    model.train().unwrap();
    for inst in &instances {
        assert_eq!(model.classify(inst), inst.label);
    }
}

#[test]
fn test_conflicting_labels_tie_to_smallest() {
    let instances = vec![
        Instance::new(0, vec![0]),
        Instance::new(1, vec![0]),
        Instance::new(0, vec![1]),
        Instance::new(0, vec![1]),
    ];
    let mut model = MaxEnt::new(instances).unwrap();
    model.train().unwrap();

    let rows = model.conditional_probabilities();
    assert!((rows[0][0] - 0.5).abs() < 1e-6);
    assert!((rows[0][1] - 0.5).abs() < 1e-6);
    assert_eq!(model.classify(&Instance::new(-1, vec![0])), 0);
    assert_eq!(model.classify(&Instance::new(-1, vec![1])), 0);
}

#[test]
fn test_training_matches_empirical_expectations() {
    let mut model = MaxEnt::new(weather()).unwrap();
    model.train().unwrap();

    // At the IIS fixed point the model expectation of every function equals
    // its empirical expectation
    let instances = weather();
    let rows = model.conditional_probabilities();
    let mut seen: Vec<Feature> = Vec::new();
    let mut model_expects = vec![0.0; model.num_functions()];
    for inst in &instances {
        let x = match seen.iter().position(|f| f == &inst.feature) {
            Some(x) => x,
            None => {
                seen.push(inst.feature.clone());
                seen.len() - 1
            }
        };
        for (l, label) in (model.min_label()..=model.max_label()).enumerate() {
            for (fid, function) in model.functions().iter().enumerate() {
                model_expects[fid] += rows[x][l] * f64::from(function.apply(&inst.feature, label));
            }
        }
    }
    let n = instances.len() as f64;
    for (m, e) in model_expects.iter().zip(model.empirical_expectations()) {
        assert!((m / n - e).abs() < 1e-3, "model {} vs empirical {}", m / n, e);
    }
}

#[test]
fn test_early_stopping() {
    let mut trainer = Trainer::new();
    trainer.extend(weather()).unwrap();
    trainer.set("epsilon", "0.01").unwrap();
    let model = trainer.train().unwrap();
    assert_eq!(model.classifier().accuracy(&weather()), 1.0);
}

#[test]
fn test_trainer_validation() {
    let trainer = Trainer::new();
    assert!(matches!(trainer.train(), Err(Error::EmptyTrainingSet)));

    assert!(matches!(
        MaxEnt::new(Vec::new()),
        Err(Error::EmptyTrainingSet)
    ));

    let ragged = vec![Instance::new(0, vec![0, 0]), Instance::new(1, vec![1])];
    assert!(matches!(
        MaxEnt::new(ragged),
        Err(Error::DimensionMismatch { index: 1, .. })
    ));
}

fn golden_instances() -> Vec<Instance> {
    vec![
        Instance::new(1, vec![0, 0]),
        Instance::new(0, vec![1, 1]),
        Instance::new(2, vec![0, 2]),
        Instance::new(1, vec![2, 1]),
    ]
}

fn train_passes(passes: usize) -> MaxEnt {
    let mut model = MaxEnt::new(golden_instances()).unwrap();
    model.params_mut().set_max_iterations(passes).unwrap();
    model.train().unwrap();
    model
}

fn assert_weights(actual: &[f64], expected: &[f64]) {
    assert_eq!(actual.len(), expected.len());
    for (fid, (a, e)) in actual.iter().zip(expected).enumerate() {
        assert!((a - e).abs() < 1e-12, "weight {}: {} vs {}", fid, a, e);
    }
}

#[test]
fn test_golden_weights() {
    let one = train_passes(1);
    assert_eq!(one.num_functions(), 18);
    assert_weights(
        one.weights(),
        &[
            -7.5,
            0.00013827109253695705,
            0.00017284125564317177,
            0.5493063472658603,
            -7.0,
            -7.0,
            -7.0,
            0.34680171132631926,
            -7.0,
            -3.5,
            0.3465866080301128,
            -7.0,
            0.00020409431372640346,
            0.00038126979677305,
            -4.0,
            -3.5,
            -7.5,
            0.0002848820322790654,
        ],
    );

    let two = train_passes(2);
    assert_weights(
        two.weights(),
        &[
            -10.0,
            0.0001846568468215139,
            0.00012766073961086467,
            0.5495744518857946,
            -11.0,
            -9.0,
            -11.0,
            0.3468135152221154,
            -9.0,
            -4.0,
            0.34690927835094026,
            -11.0,
            0.00020366497187729448,
            0.0003831499671942806,
            -5.0,
            -4.5,
            -11.5,
            0.00029019799477728703,
        ],
    );
}

#[test]
fn test_deltas_are_committed_in_order() {
    let model = train_passes(1);

    // Solved after (0,0,0) was committed. Solving every function against
    // the starting weights would give 0.2027.
    assert!((model.weights()[1] - 0.00013827109253695705).abs() < 1e-12);

    // The final Newton step is applied even when it is below the step
    // threshold. Stopping one step early would leave 0.549757.
    assert!((model.weights()[3] - 0.5493063472658603).abs() < 1e-12);
    assert!(model.weights()[12] != 0.0);
}
