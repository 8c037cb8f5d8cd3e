//! # gradient-methods
//! Gradient descent and ascent on functions of two variables, with fixed
//! steps or steps found by Armijo backtracking, implemented as
//! StreamingIterators so that observation composes with the algorithm.
//!
//! ```
//! use gradient_methods::functions::quadratic_gradient;
//! use gradient_methods::{Config, GradientDescent, Point};
//!
//! let config = Config::new(0.1, 1e-6, 1_000_000).unwrap();
//! let result = GradientDescent::new(quadratic_gradient, Point::zeros(), config)
//!     .run()
//!     .unwrap();
//! assert!(result.converged());
//! assert!((result.x() + 23.0 / 15.0).abs() < 1e-4);
//! ```
use streaming_iterator::*;

pub mod config;
pub mod error;
pub mod functions;
pub mod gradient_descent;
pub mod line_search;
pub mod objective;
pub mod registry;
pub mod report;

pub use config::{Config, Direction};
pub use error::{ConfigError, DomainError, Error, Result};
pub use gradient_descent::{optimize, GradientDescent, Iterate, RunResult, Status};
pub use line_search::Armijo;
pub use objective::{Differentiable, FnObjective, Gradient, Objective, Point};

/// Annotate the underlying items with a cost as given by a function.
pub struct CostIterable<I, F, T>
where
    I: StreamingIterator<Item = T>,
{
    pub it: I,
    f: F,
    last: Option<CostResult<T>>,
}

/// Store the cost of a state. Lower costs are better.
#[derive(Debug, Clone)]
pub struct CostResult<T> {
    pub result: T,
    pub cost: f64,
}

pub fn assess<I, F, T>(it: I, f: F) -> CostIterable<I, F, T>
where
    I: StreamingIterator<Item = T>,
    F: FnMut(&I::Item) -> f64,
{
    CostIterable { it, f, last: None }
}

impl<I, F, T> StreamingIterator for CostIterable<I, F, T>
where
    I: StreamingIterator<Item = T>,
    T: Sized + Clone,
    F: FnMut(&T) -> f64,
{
    type Item = CostResult<T>;

    fn advance(&mut self) {
        self.it.advance();
        self.last = match self.it.get() {
            Some(n) => {
                let cost = (self.f)(n);
                Some(CostResult {
                    cost,
                    result: n.clone(),
                })
            }
            None => None,
        }
    }

    fn get(&self) -> Option<&Self::Item> {
        self.last.as_ref()
    }
}

/// Pass the values from the streaming iterator through, running a
/// function on each for side effects.
pub struct Tee<I, F> {
    pub it: I,
    pub f: F,
}

pub fn tee<I, F, T>(it: I, f: F) -> Tee<I, F>
where
    I: Sized + StreamingIterator<Item = T>,
    F: FnMut(&T),
{
    Tee { it, f }
}

impl<I, F> StreamingIterator for Tee<I, F>
where
    I: StreamingIterator,
    F: FnMut(&I::Item),
{
    type Item = I::Item;

    #[inline]
    fn advance(&mut self) {
        // The side effect happens exactly once for each new value
        // generated.
        self.it.advance();
        if let Some(x) = self.it.get() {
            (self.f)(x);
        }
    }

    #[inline]
    fn get(&self) -> Option<&I::Item> {
        self.it.get()
    }
}

/// The last item of a streaming iterator, if it yields any.
pub fn last<I, T>(it: I) -> Option<T>
where
    I: StreamingIterator<Item = T>,
    T: Sized + Clone,
{
    it.fold(None, |_acc, i| Some((*i).clone()))
}
