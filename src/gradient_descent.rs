//! Gradient descent and ascent as a StreamingIterator.
//!
//! Every call to `advance` evaluates the gradient at the current point,
//! picks a step size and moves. The run stops once a move would displace
//! both coordinates by less than the configured precision, or after
//! `max_iter` iterations. Stopping on the iteration cap is a normal outcome,
//! see [`Status`]; only a failing objective aborts a run.
use crate::config::{Config, Direction};
use crate::error::DomainError;
use crate::line_search::Armijo;
use crate::objective::{Differentiable, Gradient, Negate, Objective, Point};
use crate::tee;
use log::{debug, warn};
use streaming_iterator::*;

/// Chooses the step size of each iteration.
pub trait StepRule<O: ?Sized> {
    fn step(
        &self,
        objective: &O,
        point: &Point,
        gradient: &Gradient,
        rate: f64,
        direction: Direction,
    ) -> Result<f64, DomainError>;
}

/// Use the configured rate as the step size of every iteration.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedStep;

impl<O: Differentiable + ?Sized> StepRule<O> for FixedStep {
    fn step(
        &self,
        _objective: &O,
        _point: &Point,
        _gradient: &Gradient,
        rate: f64,
        _direction: Direction,
    ) -> Result<f64, DomainError> {
        Ok(rate)
    }
}

/// Backtrack from the configured rate. Ascent searches along the negated
/// objective, whose descent direction is the ascent direction of `objective`.
impl<O: Objective + ?Sized> StepRule<O> for Armijo {
    fn step(
        &self,
        objective: &O,
        point: &Point,
        gradient: &Gradient,
        rate: f64,
        direction: Direction,
    ) -> Result<f64, DomainError> {
        match direction {
            Direction::Descent => self.search(objective, point, gradient, rate),
            Direction::Ascent => self.search(&Negate(objective), point, &-gradient, rate),
        }
    }
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Both coordinates moved less than the precision.
    Converged,

    /// Reached the iteration limit without converging.
    MaxIters,
}

/// The outcome of a run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunResult {
    pub point: Point,
    pub iterations: usize,
    pub status: Status,
}

impl RunResult {
    pub fn x(&self) -> f64 {
        self.point.x
    }

    pub fn y(&self) -> f64 {
        self.point.y
    }

    pub fn converged(&self) -> bool {
        self.status == Status::Converged
    }
}

/// One iteration: the gradient at `point` and the step taken from it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Iterate {
    /// Counts from 1.
    pub iteration: usize,
    pub point: Point,
    pub gradient: Gradient,
    pub step: f64,
}

#[derive(Debug)]
enum State {
    Running,
    Done(Status),
    Failed(DomainError),
}

/// The state of a gradient descent or ascent run.
pub struct GradientDescent<O, S = FixedStep> {
    objective: O,
    rule: S,
    config: Config,
    point: Point,
    iterations: usize,
    current: Option<Iterate>,
    state: State,
}

impl<O: Differentiable> GradientDescent<O, FixedStep> {
    /// Fixed step run from `start`. Only the gradient of `objective` is
    /// used.
    pub fn new(objective: O, start: Point, config: Config) -> Self {
        GradientDescent::with_rule(objective, FixedStep, start, config)
    }
}

impl<O: Objective> GradientDescent<O, Armijo> {
    /// Variable step run from `start`, each step found by `line_search`
    /// starting at the configured rate.
    pub fn with_line_search(
        objective: O,
        line_search: Armijo,
        start: Point,
        config: Config,
    ) -> Self {
        GradientDescent::with_rule(objective, line_search, start, config)
    }
}

impl<O, S> GradientDescent<O, S>
where
    S: StepRule<O>,
{
    pub fn with_rule(objective: O, rule: S, start: Point, config: Config) -> Self {
        GradientDescent {
            objective,
            rule,
            config,
            point: start,
            iterations: 0,
            current: None,
            state: State::Running,
        }
    }

    /// The latest point; the result so far.
    pub fn point(&self) -> &Point {
        &self.point
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn objective(&self) -> &O {
        &self.objective
    }

    /// `None` while still running.
    pub fn status(&self) -> Option<Status> {
        match self.state {
            State::Done(status) => Some(status),
            _ => None,
        }
    }

    fn iterate(&mut self) -> Result<(), DomainError>
    where
        O: Differentiable,
    {
        let iteration = self.iterations + 1;
        if iteration > self.config.max_iter() {
            warn!(
                "maximum iterations ({}) reached without converging",
                self.config.max_iter()
            );
            self.state = State::Done(Status::MaxIters);
            return Ok(());
        }
        let gradient = self.objective.gradient(&self.point)?;
        debug!(
            "iteration {}: x = {}, y = {}, df/dx = {}, df/dy = {}",
            iteration, self.point.x, self.point.y, gradient.x, gradient.y
        );
        let step = self.rule.step(
            &self.objective,
            &self.point,
            &gradient,
            self.config.rate(),
            self.config.direction(),
        )?;
        let next = match self.config.direction() {
            Direction::Descent => self.point - gradient * step,
            Direction::Ascent => self.point + gradient * step,
        };

        self.iterations = iteration;
        self.current = Some(Iterate {
            iteration,
            point: self.point,
            gradient,
            step,
        });

        let moved = next - self.point;
        let precision = self.config.precision();
        if moved.x.abs() < precision && moved.y.abs() < precision {
            self.state = State::Done(Status::Converged);
        } else {
            self.point = next;
        }
        Ok(())
    }

    /// Runs to completion, passing every iterate to `hook`.
    pub fn run_with<F>(self, hook: F) -> Result<RunResult, DomainError>
    where
        O: Differentiable,
        F: FnMut(&Iterate),
    {
        let mut observed = tee(self, hook);
        while observed.next().is_some() {}
        observed.it.run()
    }

    /// Advances until the run stops and reports how it ended.
    ///
    /// # Errors
    ///
    /// Returns the first failure of the objective.
    pub fn run(mut self) -> Result<RunResult, DomainError>
    where
        O: Differentiable,
    {
        loop {
            match self.state {
                State::Running => self.advance(),
                State::Done(status) => {
                    return Ok(RunResult {
                        point: self.point,
                        iterations: self.iterations,
                        status,
                    })
                }
                State::Failed(err) => return Err(err),
            }
        }
    }
}

impl<O, S> StreamingIterator for GradientDescent<O, S>
where
    O: Differentiable,
    S: StepRule<O>,
{
    type Item = Iterate;

    fn advance(&mut self) {
        self.current = None;
        if let State::Running = self.state {
            if let Err(err) = self.iterate() {
                self.state = State::Failed(err);
            }
        }
    }

    fn get(&self) -> Option<&Self::Item> {
        self.current.as_ref()
    }
}

/// Optimizes `objective` from `start` as `config` says: with line search if
/// it has one, with a fixed step otherwise.
pub fn optimize<O: Objective>(
    objective: O,
    start: Point,
    config: Config,
) -> Result<RunResult, DomainError> {
    match config.line_search() {
        Some(line_search) => {
            GradientDescent::with_line_search(objective, line_search, start, config).run()
        }
        None => GradientDescent::new(objective, start, config).run(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::functions::{bumps, bumps_gradient, quadratic, quadratic_gradient};
    use crate::objective::FnObjective;
    use approx::assert_abs_diff_eq;
    use quickcheck::{quickcheck, TestResult};
    use std::cell::Cell;

    fn minimum() -> Point {
        Point::new(-23.0 / 15.0, 1.0 / 15.0)
    }

    fn config(rate: f64, precision: f64, max_iter: usize) -> Config {
        Config::new(rate, precision, max_iter).unwrap()
    }

    #[test]
    fn descent_finds_the_quadratic_minimum() {
        let config = config(0.1, 1e-6, 1_000_000);
        let result = GradientDescent::new(quadratic_gradient, Point::zeros(), config)
            .run()
            .unwrap();
        assert!(result.converged());
        assert!(result.iterations < 1000);
        assert_abs_diff_eq!(result.x(), -23.0 / 15.0, epsilon = 1e-4);
        assert_abs_diff_eq!(result.y(), 1.0 / 15.0, epsilon = 1e-4);
    }

    #[test]
    fn restarting_from_a_converged_point_stops_at_once() {
        let config = config(0.1, 1e-6, 1_000_000);
        let first = GradientDescent::new(quadratic_gradient, Point::new(4.0, -2.0), config)
            .run()
            .unwrap();
        let again = GradientDescent::new(quadratic_gradient, first.point, config)
            .run()
            .unwrap();
        assert_eq!(again.iterations, 1);
        assert!(again.converged());
        assert_eq!(again.point, first.point);
    }

    #[test]
    fn zero_iterations_returns_the_start() {
        let start = Point::new(1.0, 2.0);
        let result = GradientDescent::new(quadratic_gradient, start, config(0.1, 1e-6, 0))
            .run()
            .unwrap();
        assert_eq!(result.point, start);
        assert_eq!(result.iterations, 0);
        assert_eq!(result.status, Status::MaxIters);
    }

    #[test]
    fn one_iteration_takes_exactly_one_step() {
        let result = GradientDescent::new(quadratic_gradient, Point::zeros(), config(0.1, 1e-6, 1))
            .run()
            .unwrap();
        assert_abs_diff_eq!(result.x(), -0.3, epsilon = 1e-15);
        assert_abs_diff_eq!(result.y(), -0.1, epsilon = 1e-15);
        assert_eq!(result.iterations, 1);
        assert!(!result.converged());
    }

    #[test]
    fn convergence_needs_both_coordinates_to_settle() {
        // y is stationary from the start; x keeps moving by a constant 1.
        let gradient =
            |_: &Point| -> Result<Gradient, DomainError> { Ok(Gradient::new(10.0, 0.0)) };
        let result = GradientDescent::new(gradient, Point::zeros(), config(0.1, 1e-6, 25))
            .run()
            .unwrap();
        assert_eq!(result.status, Status::MaxIters);
        assert_eq!(result.iterations, 25);
        assert_abs_diff_eq!(result.x(), -25.0, epsilon = 1e-9);
        assert_eq!(result.y(), 0.0);
    }

    #[test]
    fn ascent_climbs_to_the_central_bump() {
        let start = Point::new(0.5, 0.5);
        let config = config(0.1, 1e-9, 10_000).with_direction(Direction::Ascent);
        let result = GradientDescent::new(bumps_gradient, start, config).run().unwrap();
        assert!(result.converged());
        assert_abs_diff_eq!(result.x(), 0.0, epsilon = 1e-4);
        assert_abs_diff_eq!(result.y(), 0.0, epsilon = 1e-4);
        assert!(bumps(&result.point).unwrap() > bumps(&start).unwrap());
    }

    #[test]
    fn line_search_descent_finds_the_quadratic_minimum() {
        let objective = FnObjective::new(quadratic, quadratic_gradient);
        let result = GradientDescent::with_line_search(
            objective,
            Armijo::default(),
            Point::new(3.0, 3.0),
            config(1.0, 1e-7, 100_000),
        )
        .run()
        .unwrap();
        assert!(result.converged());
        assert_abs_diff_eq!(result.x(), -23.0 / 15.0, epsilon = 1e-5);
        assert_abs_diff_eq!(result.y(), 1.0 / 15.0, epsilon = 1e-5);
    }

    #[test]
    fn line_search_ascent_climbs_to_the_central_bump() {
        let objective = FnObjective::new(bumps, bumps_gradient);
        let config = config(1.0, 1e-6, 100_000).with_direction(Direction::Ascent);
        let start = Point::new(0.5, 0.5);
        let result = GradientDescent::with_line_search(objective, Armijo::default(), start, config)
            .run()
            .unwrap();
        assert!(result.converged());
        assert_abs_diff_eq!(result.x(), 0.0, epsilon = 1e-4);
        assert_abs_diff_eq!(result.y(), 0.0, epsilon = 1e-4);
    }

    #[test]
    fn line_search_steps_never_increase_the_objective() {
        let objective = FnObjective::new(quadratic, quadratic_gradient);
        let mut values = Vec::new();
        let start = Point::new(-5.0, 7.0);
        GradientDescent::with_line_search(objective, Armijo::default(), start, config(1.0, 1e-7, 10_000))
            .run_with(|it| values.push(quadratic(&it.point).unwrap()))
            .unwrap();
        assert!(values.len() > 1);
        assert!(values.windows(2).all(|w| w[1] <= w[0]));
    }

    #[test]
    fn hook_sees_every_iteration_in_order() {
        let mut seen = Vec::new();
        let config = config(0.1, 1e-6, 1_000_000);
        let result = GradientDescent::new(quadratic_gradient, Point::zeros(), config)
            .run_with(|it| seen.push(*it))
            .unwrap();
        assert_eq!(seen.len(), result.iterations);
        assert!(seen.iter().enumerate().all(|(i, it)| it.iteration == i + 1));
        assert_eq!(seen[0].point, Point::zeros());
        assert_eq!(seen[0].gradient, Gradient::new(3.0, 1.0));
        assert_eq!(seen.last().map(|it| it.point), Some(result.point));
    }

    #[test]
    fn gradient_failures_abort_the_run() {
        let calls = Cell::new(0);
        let gradient = |p: &Point| {
            calls.set(calls.get() + 1);
            if calls.get() > 3 {
                Err(DomainError::ZeroDenominator { term: "x", x: p.x, y: p.y })
            } else {
                quadratic_gradient(p)
            }
        };
        let config = config(0.1, 1e-6, 1_000_000);
        let result = GradientDescent::new(gradient, Point::zeros(), config).run();
        assert!(matches!(result, Err(DomainError::ZeroDenominator { term: "x", .. })));
        assert_eq!(calls.get(), 4);
    }

    #[test]
    fn value_failures_abort_a_line_search_run() {
        let objective = FnObjective::new(
            |p: &Point| {
                Err(DomainError::Undefined {
                    x: p.x,
                    y: p.y,
                    reason: "no values here".to_string(),
                })
            },
            quadratic_gradient,
        );
        let config = Config::default().with_line_search(Armijo::default());
        let result = optimize(objective, Point::zeros(), config);
        assert!(matches!(result, Err(DomainError::Undefined { .. })));
    }

    #[test]
    fn iterator_stops_yielding_after_the_run() {
        let mut run = GradientDescent::new(quadratic_gradient, Point::zeros(), config(0.1, 1e-6, 3));
        assert_eq!(run.status(), None);
        assert_eq!(run.next().map(|it| it.iteration), Some(1));
        assert_eq!(run.next().map(|it| it.iteration), Some(2));
        assert_eq!(run.next().map(|it| it.iteration), Some(3));
        assert!(run.next().is_none());
        assert_eq!(run.status(), Some(Status::MaxIters));
        assert!(run.next().is_none());
    }

    quickcheck! {
        fn descent_converges_from_anywhere(x: i16, y: i16) -> TestResult {
            let start = Point::new(f64::from(x) / 10.0, f64::from(y) / 10.0);
            let config = config(0.1, 1e-9, 1_000_000);
            let result = GradientDescent::new(quadratic_gradient, start, config)
                .run()
                .unwrap();
            let error = (result.point - minimum()).amax();
            TestResult::from_bool(result.converged() && error < 1e-6)
        }
    }
}
