use crate::error::{Error, Result};

/// IIS training parameters.
#[derive(Debug, Clone)]
pub struct IisParams {
    max_iterations: usize,
    epsilon: f64,
    newton_max_iterations: usize,
    newton_tolerance: f64,
    newton_epsilon: f64,
}

impl Default for IisParams {
    fn default() -> Self {
        Self {
            max_iterations: 200,
            epsilon: 0.0,
            newton_max_iterations: 50,
            newton_tolerance: 1e-7,
            newton_epsilon: 0.001,
        }
    }
}

impl IisParams {
    /// Number of passes over all feature functions
    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    pub fn set_max_iterations(&mut self, max_iterations: usize) -> Result<()> {
        if max_iterations < 1 {
            return Err(Error::invalid_input("max_iterations must be at least 1"));
        }
        self.max_iterations = max_iterations;
        Ok(())
    }

    /// Early stopping threshold on the largest weight change of a pass
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Set the early stopping threshold.
    ///
    /// Training stops after a pass whose largest |delta| is below `epsilon`.
    /// Setting epsilon to 0 disables early stopping, so every one of
    /// `max_iterations` passes runs.
    pub fn set_epsilon(&mut self, epsilon: f64) -> Result<()> {
        if epsilon.is_nan() || epsilon < 0.0 {
            return Err(Error::invalid_input("epsilon must be non-negative"));
        }
        self.epsilon = epsilon;
        Ok(())
    }

    pub fn newton_max_iterations(&self) -> usize {
        self.newton_max_iterations
    }

    pub fn set_newton_max_iterations(&mut self, newton_max_iterations: usize) -> Result<()> {
        if newton_max_iterations < 1 {
            return Err(Error::invalid_input(
                "newton.max_iterations must be at least 1",
            ));
        }
        self.newton_max_iterations = newton_max_iterations;
        Ok(())
    }

    pub fn newton_tolerance(&self) -> f64 {
        self.newton_tolerance
    }

    pub fn set_newton_tolerance(&mut self, newton_tolerance: f64) -> Result<()> {
        if newton_tolerance.is_nan() || newton_tolerance <= 0.0 {
            return Err(Error::invalid_input("newton.tolerance must be positive"));
        }
        self.newton_tolerance = newton_tolerance;
        Ok(())
    }

    pub fn newton_epsilon(&self) -> f64 {
        self.newton_epsilon
    }

    pub fn set_newton_epsilon(&mut self, newton_epsilon: f64) -> Result<()> {
        if newton_epsilon.is_nan() || newton_epsilon <= 0.0 {
            return Err(Error::invalid_input("newton.epsilon must be positive"));
        }
        self.newton_epsilon = newton_epsilon;
        Ok(())
    }

    /// Set a parameter by name from its string form
    pub fn set(&mut self, name: &str, value: &str) -> Result<()> {
        match name {
            "max_iterations" => self.set_max_iterations(parse(name, value)?),
            "epsilon" => self.set_epsilon(parse(name, value)?),
            "newton.max_iterations" => self.set_newton_max_iterations(parse(name, value)?),
            "newton.tolerance" => self.set_newton_tolerance(parse(name, value)?),
            "newton.epsilon" => self.set_newton_epsilon(parse(name, value)?),
            _ => Err(unknown(name)),
        }
    }

    /// Get a parameter by name in its string form
    pub fn get(&self, name: &str) -> Result<String> {
        let value = match name {
            "max_iterations" => self.max_iterations.to_string(),
            "epsilon" => self.epsilon.to_string(),
            "newton.max_iterations" => self.newton_max_iterations.to_string(),
            "newton.tolerance" => self.newton_tolerance.to_string(),
            "newton.epsilon" => self.newton_epsilon.to_string(),
            _ => return Err(unknown(name)),
        };
        Ok(value)
    }
}

fn parse<T: std::str::FromStr>(name: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| Error::invalid_input(format!("invalid value for {}: {}", name, value)))
}

fn unknown(name: &str) -> Error {
    Error::invalid_input(format!("unknown parameter: {}", name))
}
