//! Objectives of two variables and their gradients.
use crate::error::DomainError;
use nalgebra::Vector2;

/// A point `(x, y)` of the plane.
pub type Point = Vector2<f64>;

/// The partial derivatives `(∂/∂x, ∂/∂y)` at some point.
pub type Gradient = Vector2<f64>;

/// Anything that can produce a gradient at a point. This is all fixed step
/// descent needs.
pub trait Differentiable {
    fn gradient(&self, point: &Point) -> Result<Gradient, DomainError>;
}

/// A differentiable function that can also be evaluated, as required by
/// line search.
pub trait Objective: Differentiable {
    fn value(&self, point: &Point) -> Result<f64, DomainError>;
}

impl<F> Differentiable for F
where
    F: Fn(&Point) -> Result<Gradient, DomainError>,
{
    fn gradient(&self, point: &Point) -> Result<Gradient, DomainError> {
        self(point)
    }
}

/// Pairs a value closure with a gradient closure.
#[derive(Debug, Clone)]
pub struct FnObjective<V, D>
where
    V: Fn(&Point) -> Result<f64, DomainError>,
    D: Fn(&Point) -> Result<Gradient, DomainError>,
{
    pub value: V,
    pub gradient: D,
}

impl<V, D> FnObjective<V, D>
where
    V: Fn(&Point) -> Result<f64, DomainError>,
    D: Fn(&Point) -> Result<Gradient, DomainError>,
{
    pub fn new(value: V, gradient: D) -> FnObjective<V, D> {
        FnObjective { value, gradient }
    }
}

impl<V, D> Differentiable for FnObjective<V, D>
where
    V: Fn(&Point) -> Result<f64, DomainError>,
    D: Fn(&Point) -> Result<Gradient, DomainError>,
{
    fn gradient(&self, point: &Point) -> Result<Gradient, DomainError> {
        (self.gradient)(point)
    }
}

impl<V, D> Objective for FnObjective<V, D>
where
    V: Fn(&Point) -> Result<f64, DomainError>,
    D: Fn(&Point) -> Result<Gradient, DomainError>,
{
    fn value(&self, point: &Point) -> Result<f64, DomainError> {
        (self.value)(point)
    }
}

/// Adapter that negates an objective and its gradient.
///
/// Maximizing an objective is minimizing its negation, which lets the
/// descent-only line search serve ascent too.
pub struct Negate<'a, O: ?Sized>(pub &'a O);

impl<'a, O> Differentiable for Negate<'a, O>
where
    O: Differentiable + ?Sized,
{
    fn gradient(&self, point: &Point) -> Result<Gradient, DomainError> {
        self.0.gradient(point).map(|g| -g)
    }
}

impl<'a, O> Objective for Negate<'a, O>
where
    O: Objective + ?Sized,
{
    fn value(&self, point: &Point) -> Result<f64, DomainError> {
        self.0.value(point).map(|v| -v)
    }
}
