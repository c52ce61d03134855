use clap::{value_parser, Arg, ArgMatches, Command};
use indiff::{
    benchmark::BenchmarkSuite,
    check::run_checks,
    grid::SyntheticGrid,
    logging::init_logging,
};

fn main() {
    let matches = build_cli().get_matches();
    init_logging(matches.get_one::<String>("log-level").map(String::as_str));

    match matches.subcommand() {
        Some(("check", sub_matches)) => {
            if let Err(e) = run_check(sub_matches) {
                eprintln!("Check error: {}", e);
                std::process::exit(1);
            }
        }
        Some(("benchmark", sub_matches)) => {
            if let Err(e) = run_benchmark(sub_matches) {
                eprintln!("Benchmark error: {}", e);
                std::process::exit(1);
            }
        }
        _ => {
            eprintln!("Please specify a subcommand. Use --help for more information.");
            std::process::exit(1);
        }
    }
}

fn grid_from(matches: &ArgMatches) -> Result<SyntheticGrid, String> {
    let get = |name: &str| -> Result<usize, String> {
        matches
            .get_one::<usize>(name)
            .copied()
            .ok_or_else(|| format!("missing --{}", name))
    };
    Ok(SyntheticGrid::new(get("nlon")?, get("nlat")?, get("nlev")?))
}

fn run_check(matches: &ArgMatches) -> Result<(), String> {
    let grid = grid_from(matches)?;
    let tolerance = *matches
        .get_one::<f64>("tolerance")
        .ok_or("missing --tolerance")?;

    println!(
        "Running self-checks on a {}x{}x{} grid (tolerance {:e})",
        grid.nlon, grid.nlat, grid.nlev, tolerance
    );
    let outcomes = run_checks(&grid, tolerance);
    let mut failed = 0;
    for outcome in &outcomes {
        let status = if outcome.passed { "PASS" } else { "FAIL" };
        if outcome.detail.is_empty() {
            println!("  [{}] {}", status, outcome.name);
        } else {
            println!("  [{}] {} ({})", status, outcome.name, outcome.detail);
        }
        if !outcome.passed {
            failed += 1;
        }
    }

    if failed > 0 {
        return Err(format!("{} of {} checks failed", failed, outcomes.len()));
    }
    println!("All {} checks passed", outcomes.len());
    Ok(())
}

fn run_benchmark(matches: &ArgMatches) -> Result<(), String> {
    let grid = grid_from(matches)?;
    let repeats = *matches.get_one::<usize>("repeats").ok_or("missing --repeats")?;
    let thread_counts: Vec<usize> = matches
        .get_one::<String>("thread-counts")
        .ok_or("missing --thread-counts")?
        .split(',')
        .filter_map(|s| s.trim().parse().ok())
        .filter(|&n| n > 0)
        .collect();
    if thread_counts.is_empty() {
        return Err("no valid thread counts given".to_string());
    }

    println!("Starting benchmark suite...");
    let suite = BenchmarkSuite::run_suite(&grid, &thread_counts, repeats)?;
    println!("\n{}", suite.report());
    Ok(())
}

fn grid_args(command: Command) -> Command {
    command
        .arg(
            Arg::new("nlon")
                .long("nlon")
                .value_name("N")
                .help("Number of longitudes")
                .value_parser(value_parser!(usize))
                .default_value("64"),
        )
        .arg(
            Arg::new("nlat")
                .long("nlat")
                .value_name("N")
                .help("Number of latitudes")
                .value_parser(value_parser!(usize))
                .default_value("32"),
        )
        .arg(
            Arg::new("nlev")
                .long("nlev")
                .value_name("N")
                .help("Number of hybrid levels")
                .value_parser(value_parser!(usize))
                .default_value("20"),
        )
}

fn build_cli() -> Command {
    Command::new("indiff")
        .version("0.1.0")
        .about("Finite-difference derivatives and upwind advection on lon/lat/hybrid grids")
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .value_name("LEVEL")
                .help("Log level (error, warn, info, debug, trace); overrides RUST_LOG")
                .global(true),
        )
        .subcommand(grid_args(
            Command::new("check")
                .about("Verify numerical properties on a synthetic grid")
                .arg(
                    Arg::new("tolerance")
                        .short('t')
                        .long("tolerance")
                        .value_name("TOL")
                        .help("Absolute tolerance for inexact comparisons")
                        .value_parser(value_parser!(f64))
                        .default_value("1e-9"),
                ),
        ))
        .subcommand(grid_args(
            Command::new("benchmark")
                .about("Time constant-pressure derivatives and 3-D advection")
                .arg(
                    Arg::new("thread-counts")
                        .long("thread-counts")
                        .value_name("LIST")
                        .help("Comma-separated list of thread counts to test")
                        .default_value("1,2,4,8"),
                )
                .arg(
                    Arg::new("repeats")
                        .short('r')
                        .long("repeats")
                        .value_name("N")
                        .help("Timed repetitions per thread count")
                        .value_parser(value_parser!(usize))
                        .default_value("3"),
                ),
        ))
}
