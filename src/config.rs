//! Hyperparameters of an optimization run.
use crate::error::{ConfigError, Result};
use crate::line_search::Armijo;
use yaml_rust::{Yaml, YamlLoader};

/// Which way to follow the gradient.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Step against the gradient, seeking a minimum.
    Descent,
    /// Step along the gradient, seeking a maximum.
    Ascent,
}

impl std::str::FromStr for Direction {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "descend" | "descent" | "minimize" => Ok(Direction::Descent),
            "ascend" | "ascent" | "maximize" => Ok(Direction::Ascent),
            other => Err(ConfigError::Direction(other.to_string())),
        }
    }
}

/// Configuration of a gradient descent or ascent run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    rate: f64,
    precision: f64,
    max_iter: usize,
    direction: Direction,
    line_search: Option<Armijo>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            rate: 0.1,
            precision: 1e-6,
            max_iter: 1_000_000,
            direction: Direction::Descent,
            line_search: None,
        }
    }
}

impl Config {
    /// Creates a fixed step descent configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if `rate` or `precision` is not finite and positive.
    pub fn new(rate: f64, precision: f64, max_iter: usize) -> std::result::Result<Self, ConfigError> {
        if !rate.is_finite() || rate <= 0.0 {
            return Err(ConfigError::Rate);
        }
        if !precision.is_finite() || precision <= 0.0 {
            return Err(ConfigError::Precision);
        }
        Ok(Config {
            rate,
            precision,
            max_iter,
            ..Config::default()
        })
    }

    #[must_use]
    pub fn with_direction(self, direction: Direction) -> Self {
        Config { direction, ..self }
    }

    /// Derive each step from a backtracking search, using `rate` as its
    /// initial guess.
    #[must_use]
    pub fn with_line_search(self, line_search: Armijo) -> Self {
        Config {
            line_search: Some(line_search),
            ..self
        }
    }

    /// The step size, or the line search's initial guess.
    #[must_use]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Threshold on the displacement of each coordinate.
    #[must_use]
    pub fn precision(&self) -> f64 {
        self.precision
    }

    #[must_use]
    pub fn max_iter(&self) -> usize {
        self.max_iter
    }

    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[must_use]
    pub fn line_search(&self) -> Option<Armijo> {
        self.line_search
    }

    /// Reads a configuration from a YAML document. Missing keys keep their
    /// defaults:
    ///
    /// ```yaml
    /// rate: 0.1
    /// precision: 1.0e-6
    /// max_iter: 1000000
    /// direction: descend
    /// line_search:
    ///   alpha: 0.3
    ///   beta: 0.8
    ///   max_iter: 50
    ///   min_step: 1.0e-12
    /// ```
    pub fn from_yaml_str(source: &str) -> Result<Self> {
        let docs = YamlLoader::load_from_str(source)?;
        let doc = docs.into_iter().next().unwrap_or(Yaml::Null);
        let defaults = Config::default();

        let rate = number(&doc["rate"], "rate")?.unwrap_or(defaults.rate);
        let precision = number(&doc["precision"], "precision")?.unwrap_or(defaults.precision);
        let max_iter = count(&doc["max_iter"], "max_iter")?.unwrap_or(defaults.max_iter);
        let mut config = Config::new(rate, precision, max_iter)?;

        match &doc["direction"] {
            Yaml::BadValue | Yaml::Null => {}
            Yaml::String(s) => config = config.with_direction(s.parse()?),
            _ => return Err(ConfigError::Malformed("direction").into()),
        }

        let search = &doc["line_search"];
        match search {
            Yaml::BadValue | Yaml::Null => {}
            Yaml::Hash(_) => {
                let d = Armijo::default();
                let line_search = Armijo::new(
                    number(&search["alpha"], "alpha")?.unwrap_or(d.alpha()),
                    number(&search["beta"], "beta")?.unwrap_or(d.beta()),
                    count(&search["max_iter"], "line_search.max_iter")?.unwrap_or(d.max_iter()),
                    number(&search["min_step"], "min_step")?.unwrap_or(d.min_step()),
                )?;
                config = config.with_line_search(line_search);
            }
            _ => return Err(ConfigError::Malformed("line_search").into()),
        }
        Ok(config)
    }
}

fn number(value: &Yaml, key: &'static str) -> std::result::Result<Option<f64>, ConfigError> {
    match value {
        Yaml::BadValue | Yaml::Null => Ok(None),
        Yaml::Integer(i) => Ok(Some(*i as f64)),
        Yaml::Real(_) => value.as_f64().map(Some).ok_or(ConfigError::Malformed(key)),
        _ => Err(ConfigError::Malformed(key)),
    }
}

fn count(value: &Yaml, key: &'static str) -> std::result::Result<Option<usize>, ConfigError> {
    match value {
        Yaml::BadValue | Yaml::Null => Ok(None),
        Yaml::Integer(i) if *i >= 0 => Ok(Some(*i as usize)),
        _ => Err(ConfigError::Malformed(key)),
    }
}
