//! Backtracking line search under the Armijo sufficient decrease condition.
//!
//! Starting from an initial guess `s`, the search accepts `s` once
//!
//!   f(p - s·g) <= f(p) - alpha·s·|g|²
//!
//! and otherwise shrinks `s` by `beta` and tries again. It gives up after
//! `max_iter` shrinks, or when the step reaches `min_step`, and then returns
//! the last step anyway: a short step that fails the condition is still a
//! usable step.
use crate::error::{ConfigError, DomainError};
use crate::objective::{Gradient, Objective, Point};
use log::trace;

/// Parameters of the Armijo backtracking search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Armijo {
    alpha: f64,
    beta: f64,
    max_iter: usize,
    min_step: f64,
}

impl Default for Armijo {
    fn default() -> Self {
        Armijo {
            alpha: 0.3,
            beta: 0.8,
            max_iter: 50,
            min_step: 1e-12,
        }
    }
}

impl Armijo {
    /// Creates a line search with validated parameters.
    ///
    /// # Errors
    ///
    /// Returns an error unless `alpha` and `beta` lie strictly inside
    /// `(0, 1)` and `min_step` is finite and positive.
    pub fn new(alpha: f64, beta: f64, max_iter: usize, min_step: f64) -> Result<Self, ConfigError> {
        if !(alpha > 0.0 && alpha < 1.0) {
            return Err(ConfigError::Alpha);
        }
        if !(beta > 0.0 && beta < 1.0) {
            return Err(ConfigError::Beta);
        }
        if !min_step.is_finite() || min_step <= 0.0 {
            return Err(ConfigError::MinStep);
        }
        Ok(Armijo {
            alpha,
            beta,
            max_iter,
            min_step,
        })
    }

    #[must_use]
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    #[must_use]
    pub fn beta(&self) -> f64 {
        self.beta
    }

    /// Maximum number of shrinks before the search gives up.
    #[must_use]
    pub fn max_iter(&self) -> usize {
        self.max_iter
    }

    #[must_use]
    pub fn min_step(&self) -> f64 {
        self.min_step
    }

    /// Whether `step` along `-gradient` decreases the objective enough.
    pub fn is_sufficient<O>(
        &self,
        objective: &O,
        point: &Point,
        gradient: &Gradient,
        step: f64,
    ) -> Result<bool, DomainError>
    where
        O: Objective + ?Sized,
    {
        let here = objective.value(point)?;
        self.accepts(objective, point, gradient, here, step)
    }

    fn accepts<O>(
        &self,
        objective: &O,
        point: &Point,
        gradient: &Gradient,
        here: f64,
        step: f64,
    ) -> Result<bool, DomainError>
    where
        O: Objective + ?Sized,
    {
        let there = objective.value(&(point - gradient * step))?;
        Ok(there <= here - self.alpha * step * gradient.norm_squared())
    }

    /// Finds a step along `-gradient` from `point`, starting at
    /// `initial_step`.
    ///
    /// The result never exceeds `initial_step`, and is never below
    /// `min_step` unless `initial_step` already was.
    ///
    /// # Errors
    ///
    /// Fails only if evaluating the objective fails.
    pub fn search<O>(
        &self,
        objective: &O,
        point: &Point,
        gradient: &Gradient,
        initial_step: f64,
    ) -> Result<f64, DomainError>
    where
        O: Objective + ?Sized,
    {
        let here = objective.value(point)?;
        let mut step = initial_step;
        for shrinks in 0..self.max_iter {
            if self.accepts(objective, point, gradient, here, step)? {
                trace!("armijo accepted step {} after {} shrinks", step, shrinks);
                return Ok(step);
            }
            step *= self.beta;
            if step <= self.min_step {
                trace!("armijo step reached the floor {}", self.min_step);
                return Ok(self.min_step.min(initial_step));
            }
        }
        trace!(
            "armijo gave up after {} shrinks at step {}",
            self.max_iter,
            step
        );
        Ok(step)
    }
}
