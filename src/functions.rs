//! The shipped objectives, each a value function and its hand-derived
//! gradient.
use crate::error::DomainError;
use crate::objective::{Gradient, Point};

/// `x² + 4y² + xy + 3x + y`, a strictly convex quadratic with its minimum at
/// `(-23/15, 1/15)`.
pub fn quadratic(p: &Point) -> Result<f64, DomainError> {
    let (x, y) = (p.x, p.y);
    Ok(x * x + 4.0 * y * y + x * y + 3.0 * x + y)
}

pub fn quadratic_gradient(p: &Point) -> Result<Gradient, DomainError> {
    let (x, y) = (p.x, p.y);
    Ok(Gradient::new(2.0 * x + y + 3.0, x + 8.0 * y + 1.0))
}

/// `sqrt(x² + y² + 2) + 2x²·exp(-y²) + (x - 2)²`.
pub fn radical(p: &Point) -> Result<f64, DomainError> {
    let (x, y) = (p.x, p.y);
    Ok(radius(p) + 2.0 * x * x * (-y * y).exp() + (x - 2.0).powi(2))
}

pub fn radical_gradient(p: &Point) -> Result<Gradient, DomainError> {
    let (x, y) = (p.x, p.y);
    let r = radius(p);
    if r == 0.0 {
        return Err(DomainError::ZeroDenominator {
            term: "sqrt(x^2 + y^2 + 2)",
            x,
            y,
        });
    }
    let damping = (-y * y).exp();
    Ok(Gradient::new(
        x / r + 4.0 * x * damping + 2.0 * (x - 2.0),
        y / r - 4.0 * x * x * y * damping,
    ))
}

fn radius(p: &Point) -> f64 {
    (p.x * p.x + p.y * p.y + 2.0).sqrt()
}

/// `4·exp(-x² - y²) + 3·exp(-x² - y² + 4x + 6y - 13) - x²/4 - y²/6 + 2`.
///
/// Two bumps on a downward paraboloid: a tall one at the origin and a lower
/// one near `(2, 3)`. This is the function to maximize.
pub fn bumps(p: &Point) -> Result<f64, DomainError> {
    let (x, y) = (p.x, p.y);
    let (near, far) = bump_terms(x, y);
    Ok(4.0 * near + 3.0 * far - x * x / 4.0 - y * y / 6.0 + 2.0)
}

pub fn bumps_gradient(p: &Point) -> Result<Gradient, DomainError> {
    let (x, y) = (p.x, p.y);
    let (near, far) = bump_terms(x, y);
    Ok(Gradient::new(
        4.0 * near * (-2.0 * x) + 3.0 * far * (-2.0 * x + 4.0) - x / 2.0,
        4.0 * near * (-2.0 * y) + 3.0 * far * (-2.0 * y + 6.0) - y / 3.0,
    ))
}

fn bump_terms(x: f64, y: f64) -> (f64, f64) {
    let near = (-x * x - y * y).exp();
    let far = (-x * x - y * y + 4.0 * x + 6.0 * y - 13.0).exp();
    (near, far)
}
