use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
use itertools::Itertools;
use mathcore::{
    derivative, domain_of, evaluate, parse_expression, simplify, simplify_with_trace, solve,
    ErrorKind, LaTeX, MathError, NumericMode, DEFAULT_VARIABLE,
};
use rayon::prelude::*;
use std::fmt::Display;
use std::fs::File;
use std::io::{BufRead, BufReader};
use tracing_subscriber::filter::EnvFilter;

#[macro_use]
extern crate serde_derive;

mod configuration;

use configuration::Configuration;

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn render<T: Display + LaTeX>(value: &T, latex: bool) -> String {
    if latex {
        value.to_latex()
    } else {
        value.to_string()
    }
}

fn variable_of(matches: &ArgMatches) -> Result<Option<char>, MathError> {
    match matches.value_of("variable") {
        None => Ok(None),
        Some(text) => {
            let mut chars = text.chars();
            match (chars.next(), chars.next()) {
                (Some(variable), None) if variable.is_ascii_lowercase() => Ok(Some(variable)),
                _ => Err(MathError::Parse(format!(
                    "{} is not a single letter variable",
                    text
                ))),
            }
        }
    }
}

/// `domain` and `derive` work on `x` unless told otherwise
fn variable_or_default(matches: &ArgMatches) -> Result<char, MathError> {
    Ok(variable_of(matches)?.unwrap_or(DEFAULT_VARIABLE))
}

/// Global options may be given before or after the sub command
fn global_value<'a>(matches: &'a ArgMatches, sub: &'a ArgMatches, name: &str) -> Option<&'a str> {
    sub.value_of(name).or_else(|| matches.value_of(name))
}

fn load_configuration(matches: &ArgMatches, sub: &ArgMatches) -> Result<Configuration, String> {
    let mut configuration = match global_value(matches, sub, "config") {
        Some(filename) => Configuration::load(filename)?,
        None => Configuration::default(),
    };
    match global_value(matches, sub, "mode") {
        Some("decimal") => configuration.context.mode = NumericMode::Decimal,
        Some("fractional") => configuration.context.mode = NumericMode::Fractional,
        _ => {}
    }
    if sub.is_present("latex") || matches.is_present("latex") {
        configuration.latex = true;
    }
    Ok(configuration)
}

fn run_simplify(sub: &ArgMatches, configuration: &Configuration) -> Result<String, MathError> {
    let context = &configuration.context;
    let component = parse_expression(sub.value_of("EXPR").unwrap_or_default(), context)?;
    let result = match sub.value_of("trace") {
        None => simplify(&component, context),
        Some(filename) => {
            let (result, trace) = simplify_with_trace(&component, context);
            let file = File::create(filename)
                .map_err(|msg| MathError::Config(format!("{}: {}", filename, msg)))?;
            let written = if filename.ends_with(".yaml") || filename.ends_with(".yml") {
                trace.write_yaml(file)
            } else {
                trace.write_bincode(file)
            };
            written.map_err(MathError::Config)?;
            result
        }
    };
    Ok(render(&result, configuration.latex))
}

fn run_solve(sub: &ArgMatches, configuration: &Configuration) -> Result<String, MathError> {
    let set = solve(
        sub.value_of("EQUATION").unwrap_or_default(),
        variable_of(sub)?,
        &configuration.context,
    )?;
    Ok(render(&set, configuration.latex))
}

fn run_domain(sub: &ArgMatches, configuration: &Configuration) -> Result<String, MathError> {
    let context = &configuration.context;
    let component = parse_expression(sub.value_of("EXPR").unwrap_or_default(), context)?;
    let variable = variable_or_default(sub)?;
    let domain = domain_of(&component, variable, context)?;
    Ok(render(&domain, configuration.latex))
}

fn run_derive(sub: &ArgMatches, configuration: &Configuration) -> Result<String, MathError> {
    let context = &configuration.context;
    let component = parse_expression(sub.value_of("EXPR").unwrap_or_default(), context)?;
    let variable = variable_or_default(sub)?;
    let result = derivative(&component, variable, context)?;
    Ok(render(&result, configuration.latex))
}

fn run_evaluate(sub: &ArgMatches, configuration: &Configuration) -> Result<String, MathError> {
    let constant = evaluate(
        sub.value_of("EXPR").unwrap_or_default(),
        &configuration.context,
    )?;
    Ok(if configuration.latex {
        constant.to_latex()
    } else {
        constant.to_plain()
    })
}

/// Solves every line that is neither blank nor a `#` comment, the output
/// keeps the order of the input.
fn solve_lines(lines: &[String], configuration: &Configuration) -> String {
    let equations = lines
        .iter()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .collect::<Vec<_>>();
    tracing::info!(target: "batch", equations = equations.len(), "solving");
    equations
        .par_iter()
        .map(|equation| match solve(equation, None, &configuration.context) {
            Ok(set) => format!("{}  =>  {}", equation, render(&set, configuration.latex)),
            Err(error) => format!("{}  =>  error: {}", equation, error),
        })
        .collect::<Vec<_>>()
        .iter()
        .join("\n")
}

fn run_batch(sub: &ArgMatches, configuration: &Configuration) -> Result<String, MathError> {
    let filename = sub.value_of("FILE").unwrap_or_default();
    let file =
        File::open(filename).map_err(|msg| MathError::Config(format!("{}: {}", filename, msg)))?;
    let lines = BufReader::new(file)
        .lines()
        .collect::<Result<Vec<_>, _>>()
        .map_err(|msg| MathError::Config(format!("{}: {}", filename, msg)))?;
    Ok(solve_lines(&lines, configuration))
}

fn exit_code(error: &MathError) -> i32 {
    match error.kind() {
        ErrorKind::UserInput => 2,
        ErrorKind::Unsupported => 3,
        ErrorKind::Internal => 4,
    }
}

fn variable_arg<'a, 'b>() -> Arg<'a, 'b> {
    Arg::with_name("variable")
        .short("v")
        .long("variable")
        .takes_value(true)
        .help("Variable to solve for")
}

fn main() {
    let global = |arg: Arg<'static, 'static>| arg.global(true);
    let matches = App::new("mathsolve")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Simplifies expressions and solves equations in one variable")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .arg(global(
            Arg::with_name("config")
                .long("config")
                .takes_value(true)
                .help("YAML configuration file"),
        ))
        .arg(global(
            Arg::with_name("mode")
                .long("mode")
                .takes_value(true)
                .possible_values(&["fractional", "decimal"])
                .help("Numeric mode"),
        ))
        .arg(global(
            Arg::with_name("latex")
                .long("latex")
                .help("Print typeset results"),
        ))
        .arg(global(
            Arg::with_name("verbose")
                .long("verbose")
                .help("Log the applied rewrite rules"),
        ))
        .subcommand(
            SubCommand::with_name("simplify")
                .about("Simplifies an expression")
                .arg(Arg::with_name("EXPR").required(true).index(1))
                .arg(
                    Arg::with_name("trace")
                        .long("trace")
                        .takes_value(true)
                        .help("Writes the applied rules to a .yaml or binary file"),
                ),
        )
        .subcommand(
            SubCommand::with_name("solve")
                .about("Solves an equation or inequality")
                .arg(Arg::with_name("EQUATION").required(true).index(1))
                .arg(variable_arg()),
        )
        .subcommand(
            SubCommand::with_name("domain")
                .about("Values for which an expression is defined")
                .arg(Arg::with_name("EXPR").required(true).index(1))
                .arg(variable_arg()),
        )
        .subcommand(
            SubCommand::with_name("derive")
                .about("Derivative of an expression")
                .arg(Arg::with_name("EXPR").required(true).index(1))
                .arg(variable_arg()),
        )
        .subcommand(
            SubCommand::with_name("evaluate")
                .about("Value of a scalar expression")
                .arg(Arg::with_name("EXPR").required(true).index(1)),
        )
        .subcommand(
            SubCommand::with_name("batch")
                .about("Solves one equation per line of a file")
                .arg(Arg::with_name("FILE").required(true).index(1)),
        )
        .get_matches();

    let (name, sub) = matches.subcommand();
    let sub = match sub {
        Some(sub) => sub,
        None => return,
    };
    init_logging(sub.is_present("verbose") || matches.is_present("verbose"));

    let configuration = match load_configuration(&matches, sub) {
        Ok(configuration) => configuration,
        Err(msg) => {
            eprintln!("error: {}", msg);
            std::process::exit(1);
        }
    };
    tracing::debug!(target: "mathsolve", context = ?configuration.context, "configured");

    let result = match name {
        "simplify" => run_simplify(sub, &configuration),
        "solve" => run_solve(sub, &configuration),
        "domain" => run_domain(sub, &configuration),
        "derive" => run_derive(sub, &configuration),
        "evaluate" => run_evaluate(sub, &configuration),
        "batch" => run_batch(sub, &configuration),
        other => Err(MathError::Internal(format!("unknown sub command {}", other))),
    };
    match result {
        Ok(output) => println!("{}", output),
        Err(error) => {
            eprintln!("error: {}", error);
            std::process::exit(exit_code(&error));
        }
    }
}

#[cfg(test)]
mod specs {
    use super::*;
    use mathcore::Context;

    #[test]
    fn exit_codes_follow_error_kind() {
        assert_eq!(exit_code(&MathError::DecimalInFractionalMode), 2);
        assert_eq!(exit_code(&MathError::NotPolynomial('x')), 3);
        assert_eq!(exit_code(&MathError::Internal(String::new())), 4);
    }

    #[test]
    fn batch_keeps_input_order() {
        let lines = ["# linear", "3x-2=0", "", "x^2 = 4", "x^3 = 1", "  2x+1=x-3  "]
            .iter()
            .map(|line| line.to_string())
            .collect::<Vec<_>>();
        let actual = solve_lines(&lines, &Configuration::default());
        let actual = actual.lines().collect::<Vec<_>>();
        assert_eq!(actual.len(), 4);
        assert_eq!(actual[0], "3x-2=0  =>  x = 2/3");
        assert_eq!(actual[1], "x^2 = 4  =>  x = -2 , x = 2");
        assert!(actual[2].starts_with("x^3 = 1  =>  error: "));
        assert_eq!(actual[3], "2x+1=x-3  =>  x = -4");
    }

    #[test]
    fn batch_in_latex() {
        let configuration = Configuration {
            latex: true,
            ..Configuration::default()
        };
        let actual = solve_lines(&["x/2 = 1".to_owned()], &configuration);
        assert_eq!(actual, "x/2 = 1  =>  x = 2");
    }

    #[test]
    fn variable_defaults_to_x() {
        let app = || App::new("test").arg(variable_arg());
        let none = app().get_matches_from(vec!["test"]);
        assert_eq!(variable_or_default(&none), Ok('x'));
        let given = app().get_matches_from(vec!["test", "--variable", "t"]);
        assert_eq!(variable_or_default(&given), Ok('t'));
        let word = app().get_matches_from(vec!["test", "-v", "xy"]);
        assert!(matches!(variable_or_default(&word), Err(MathError::Parse(_))));
    }

    #[test]
    fn render_both_styles() {
        let context = Context::default();
        let component = parse_expression("a/b", &context).unwrap();
        assert_eq!(render(&component, false), "a/b");
        assert_eq!(render(&component, true), "\\frac{a}{b}");
    }
}
