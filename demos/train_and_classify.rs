use std::env;

use maxent::train::Trainer;
use maxent::Model;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let mut args = env::args().skip(1);
    let train_path = args
        .next()
        .unwrap_or_else(|| "tests/data/weather.train".to_string());
    let test_path = args
        .next()
        .unwrap_or_else(|| "tests/data/weather.test".to_string());

    println!("MaxEnt Training and Classification Example");
    println!("==========================================\n");

    let train = maxent::reader::read_file(&train_path)?;
    println!("Training data: {} ({} instances)", train_path, train.len());

    let mut trainer = Trainer::new();
    trainer.verbose(true);
    trainer.extend(train)?;
    println!("  Max iterations: {}", trainer.get("max_iterations")?);
    println!("  Newton tolerance: {}\n", trainer.get("newton.tolerance")?);

    let model = trainer.train()?;

    let model_path = env::temp_dir().join("example_model.maxent");
    model.save(&model_path)?;
    println!("Saved model to {}", model_path.display());

    // Reload and evaluate
    let model_data = std::fs::read(&model_path)?;
    let loaded = Model::new(&model_data)?;
    let test = maxent::reader::read_file(&test_path)?;
    let accuracy = loaded.classifier().accuracy(&test);
    println!("accuracy: {}", accuracy);

    Ok(())
}
