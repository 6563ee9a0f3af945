use maxent::train::Trainer;
use maxent::{Feature, Instance, MaxEnt, Model};

#[test]
fn test_two_point_example() {
    let instances = vec![Instance::new(1, vec![0, 0]), Instance::new(0, vec![1, 1])];

    let mut model = MaxEnt::new(instances).unwrap();
    assert_eq!(model.min_label(), 0);
    assert_eq!(model.max_label(), 1);
    // 2 dims x 2 values x 2 labels
    assert_eq!(model.num_functions(), 8);

    model.train().unwrap();

    // The label of the query instance is ignored
    assert_eq!(model.classify(&Instance::new(0, vec![0, 0])), 1);
    assert_eq!(model.classify(&Instance::new(1, vec![1, 1])), 0);
}

#[test]
fn test_train_save_load_classify() {
    let mut trainer = Trainer::new();
    trainer.verbose(true);
    trainer
        .extend(maxent::reader::read_file("tests/data/weather.train").unwrap())
        .unwrap();
    trainer.set("max_iterations", "50").unwrap();
    let model = trainer.train().unwrap();

    // Use NamedTempFile for automatic cleanup on panic
    let temp_file = tempfile::NamedTempFile::new().unwrap();
    model.save(temp_file.path()).unwrap();

    let model_data = std::fs::read(temp_file.path()).unwrap();
    let loaded = Model::new(&model_data).unwrap();

    // Verify model metadata
    assert_eq!(loaded.num_functions(), model.num_functions());
    assert_eq!(loaded.num_dims(), 3);
    assert_eq!(loaded.min_label(), 1);
    assert_eq!(loaded.max_label(), 3);
    assert_eq!(loaded.functions(), model.functions());
    assert_eq!(loaded.weights(), model.weights());

    // Loaded and in-memory models agree everywhere
    let test = maxent::reader::read_file("tests/data/weather.test").unwrap();
    let classifier = loaded.classifier();
    for inst in &test {
        assert_eq!(classifier.classify(&inst.feature), model.classify(inst));
    }
    assert_eq!(classifier.accuracy(&test), 1.0);
}

#[test]
fn test_resume_from_saved_weights() {
    let train = maxent::reader::read_file("tests/data/weather.train").unwrap();

    let mut trainer = Trainer::new();
    trainer.extend(train.clone()).unwrap();
    trainer.set("max_iterations", "10").unwrap();
    let first = trainer.train().unwrap();

    let mut buf = Vec::new();
    first.write(&mut buf).unwrap();
    let loaded = Model::new(&buf).unwrap();

    let mut resumed = MaxEnt::new(train.clone()).unwrap();
    resumed.params_mut().set_max_iterations(10).unwrap();
    resumed.set_weights(loaded.weights()).unwrap();
    resumed.train().unwrap();

    let mut straight = MaxEnt::new(train).unwrap();
    straight.params_mut().set_max_iterations(20).unwrap();
    straight.train().unwrap();

    assert_eq!(resumed.weights(), straight.weights());
}

#[test]
fn test_unseen_values_degrade_silently() {
    let instances = vec![Instance::new(1, vec![0, 0]), Instance::new(0, vec![1, 1])];
    let mut model = MaxEnt::new(instances).unwrap();
    model.train().unwrap();

    let classifier = model.classifier();
    // Dimension 0 carries the decision when dimension 1 is out of range
    assert_eq!(classifier.classify(&Feature::new(vec![0, 9])), 1);
    assert_eq!(classifier.classify(&Feature::new(vec![1, 9])), 0);
    // Nothing fires at all: every label ties, the smallest wins
    assert_eq!(classifier.classify(&Feature::new(vec![9, 9])), 0);
}
