//! Descent on x² + 4y² + xy + 3x + y, by hand and with composed adaptors.
use gradient_methods::functions::{quadratic, quadratic_gradient};
use gradient_methods::*;
use streaming_iterator::*;

fn main() -> Result<()> {
    let rate = 0.1;
    let start = Point::new(2.0, -1.0);

    // Au naturale:
    let mut p = start;
    for i in 0..10 {
        let gradient = quadratic_gradient(&p)?;
        p -= gradient * rate;
        println!("p_{} = ({:.4}, {:.4}); f(p_{}) = {:.6}", i, p.x, p.y, i, quadratic(&p)?);
    }

    // Using replaceable components: the same iteration, annotated with the
    // objective value and printed through a tee.
    let config = Config::from_yaml_str("rate: 0.1\nprecision: 1.0e-8\nmax_iter: 10000\n")?;
    let run = GradientDescent::new(quadratic_gradient, start, config);
    let run = assess(run, |it: &Iterate| quadratic(&it.point).unwrap_or(f64::NAN));
    let mut printed = tee(run, |CostResult { result, cost }: &CostResult<Iterate>| {
        if result.iteration % 10 == 1 {
            println!(
                "iteration {:>3}: p = ({:.6}, {:.6}), f(p) = {:.8}, |grad| = {:.2e}",
                result.iteration,
                result.point.x,
                result.point.y,
                cost,
                result.gradient.norm()
            );
        }
    });
    while let Some(_) = printed.next() {}
    let result = printed.it.it.run()?;
    println!(
        "fixed step: ({:.6}, {:.6}) after {} iterations, {:?}",
        result.x(),
        result.y(),
        result.iterations,
        result.status
    );

    // The same problem with Armijo backtracking from a unit step.
    let config = Config::new(1.0, config.precision(), config.max_iter())?;
    let mut steps = Vec::new();
    let result = GradientDescent::with_line_search(
        FnObjective::new(quadratic, quadratic_gradient),
        Armijo::default(),
        start,
        config,
    )
    .run_with(|it| steps.push(it.step))?;
    println!(
        "line search: ({:.6}, {:.6}) after {} iterations, steps between {:.4} and {:.4}",
        result.x(),
        result.y(),
        result.iterations,
        steps.iter().cloned().fold(f64::INFINITY, f64::min),
        steps.iter().cloned().fold(0.0, f64::max)
    );
    Ok(())
}
