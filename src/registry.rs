//! Named table of the shipped objectives.
use crate::config::Direction;
use crate::error::{DomainError, Error, Result};
use crate::functions;
use crate::objective::{Differentiable, Gradient, Objective, Point};
use std::fmt;

/// A named objective together with the direction it is meant to be
/// optimized in.
#[derive(Clone, Copy)]
pub struct Entry {
    pub name: &'static str,
    pub formula: &'static str,
    pub direction: Direction,
    value: fn(&Point) -> std::result::Result<f64, DomainError>,
    gradient: fn(&Point) -> std::result::Result<Gradient, DomainError>,
}

impl fmt::Debug for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry")
            .field("name", &self.name)
            .field("formula", &self.formula)
            .field("direction", &self.direction)
            .finish()
    }
}

impl Differentiable for Entry {
    fn gradient(&self, point: &Point) -> std::result::Result<Gradient, DomainError> {
        (self.gradient)(point)
    }
}

impl Objective for Entry {
    fn value(&self, point: &Point) -> std::result::Result<f64, DomainError> {
        (self.value)(point)
    }
}

pub static FUNCTIONS: [Entry; 3] = [
    Entry {
        name: "f",
        formula: "x^2 + 4y^2 + xy + 3x + y",
        direction: Direction::Descent,
        value: functions::quadratic,
        gradient: functions::quadratic_gradient,
    },
    Entry {
        name: "g",
        formula: "sqrt(x^2 + y^2 + 2) + 2x^2 exp(-y^2) + (x - 2)^2",
        direction: Direction::Descent,
        value: functions::radical,
        gradient: functions::radical_gradient,
    },
    Entry {
        name: "h",
        formula: "4 exp(-x^2 - y^2) + 3 exp(-x^2 - y^2 + 4x + 6y - 13) - x^2/4 - y^2/6 + 2",
        direction: Direction::Ascent,
        value: functions::bumps,
        gradient: functions::bumps_gradient,
    },
];

/// Finds the objective registered under `name`.
pub fn lookup(name: &str) -> Result<Entry> {
    FUNCTIONS
        .iter()
        .find(|entry| entry.name == name)
        .copied()
        .ok_or_else(|| Error::UnknownFunction(name.to_string()))
}
