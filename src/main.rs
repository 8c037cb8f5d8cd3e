use gradient_methods::registry::{self, Entry};
use gradient_methods::report::write_report;
use gradient_methods::{optimize, Armijo, Config, Error, Point};
use log::info;
use std::env;
use std::io;
use std::process;

const USAGE: &str = "usage: gradient_methods <function> <x0> <y0> <rate> <precision> [debug] [linesearch]";

/// Command line arguments.
struct Args {
    entry: Entry,
    start: Point,
    rate: f64,
    precision: f64,
    debug: bool,
    line_search: bool,
}

fn number(arg: &str, name: &str) -> Result<f64, Error> {
    arg.parse()
        .map_err(|_| Error::InvalidArgument(format!("{} must be a number, got `{}`", name, arg)))
}

fn parse_args(args: &[String]) -> Result<Args, Error> {
    if args.len() < 5 || args.len() > 7 {
        return Err(Error::InvalidArgument(USAGE.to_string()));
    }
    let entry = registry::lookup(&args[0])?;
    let start = Point::new(number(&args[1], "x0")?, number(&args[2], "y0")?);
    let rate = number(&args[3], "rate")?;
    let precision = number(&args[4], "precision")?;
    let mut debug = false;
    let mut line_search = false;
    for flag in &args[5..] {
        match flag.to_lowercase().as_str() {
            "true" | "debug" => debug = true,
            "false" => {}
            "linesearch" => line_search = true,
            other => return Err(Error::InvalidArgument(format!("unknown flag `{}`", other))),
        }
    }
    Ok(Args {
        entry,
        start,
        rate,
        precision,
        debug,
        line_search,
    })
}

fn run(args: Args) -> Result<(), Error> {
    let mut config = Config::new(args.rate, args.precision, Config::default().max_iter())?
        .with_direction(args.entry.direction);
    if args.line_search {
        config = config.with_line_search(Armijo::default());
    }
    info!(
        "optimizing {} = {} ({:?})",
        args.entry.name, args.entry.formula, args.entry.direction
    );
    let result = optimize(args.entry, args.start, config)?;
    let stdout = io::stdout();
    write_report(&mut stdout.lock(), args.entry.name, &args.start, &result)?;
    Ok(())
}

fn main() {
    let raw: Vec<String> = env::args().skip(1).collect();
    let args = match parse_args(&raw) {
        Ok(args) => args,
        Err(error) => {
            eprintln!("{}", error);
            process::exit(2);
        }
    };
    let level = if args.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    if let Err(error) = run(args) {
        eprintln!("{}", error);
        process::exit(1);
    }
}
