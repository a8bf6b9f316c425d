use anyhow::{Context, bail};
use clap::{Parser, ValueEnum};
use log::{info, warn};
use ramsey_k4::exhaustive::minimum_monochromatic_with_cancel;
use ramsey_k4::graph::{CliqueIndex, DEFAULT_MAX_CLIQUES, vertex_count};
use ramsey_k4::greedy::{GreedyScheduler, SchedulerConfig, UpdateStrategy};
use ramsey_k4::report::ColoringReport;
use ramsey_k4::sequential::SequentialColorer;
use ramsey_k4::{io, render};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum StrategyArg {
    Indexed,
    FullRescan,
}

impl From<StrategyArg> for UpdateStrategy {
    fn from(s: StrategyArg) -> Self {
        match s {
            StrategyArg::Indexed => UpdateStrategy::Indexed,
            StrategyArg::FullRescan => UpdateStrategy::FullRescan,
        }
    }
}

/// Greedy two-coloring of K_n that keeps monochromatic K4 counts low.
#[derive(Parser, Debug)]
#[command(version)]
struct Cli {
    /// Number of vertices.
    #[arg(long, short, default_value_t = 20, allow_negative_numbers = true)]
    n: i64,
    /// Probe strategy for the greedy scheduler.
    #[arg(long, value_enum, default_value_t = StrategyArg::Indexed)]
    strategy: StrategyArg,
    /// Use the single-pass in-order colorer instead of the greedy scheduler.
    #[arg(long)]
    sequential: bool,
    /// Seed for the opening color of the sequential colorer.
    #[arg(long, requires = "sequential")]
    seed: Option<u64>,
    /// Probe candidate edges on the rayon pool.
    #[arg(long)]
    parallel: bool,
    /// Refuse instances with more 4-cliques than this.
    #[arg(long, default_value_t = DEFAULT_MAX_CLIQUES)]
    max_cliques: usize,
    /// Also compute the exact optimum by enumeration (K_7 and below).
    #[arg(long)]
    exhaustive: bool,
    /// Write the coloring as a 0/1 matrix (1 = color B).
    #[arg(long)]
    out: Option<String>,
    /// Print the coloring matrix to stdout.
    #[arg(long)]
    print: bool,
    /// Write an SVG drawing of the coloring.
    #[arg(long)]
    svg: Option<String>,
    /// Evaluate a saved coloring matrix instead of computing one.
    #[arg(long, conflicts_with_all = ["sequential", "exhaustive"])]
    check: Option<String>,
    /// Debug-level logging.
    #[arg(long, short)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    env_logger::builder()
        .format_module_path(false)
        .format_target(false)
        .filter_level(if cli.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .init();

    if let Err(e) = run(&cli) {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    if let Some(path) = &cli.check {
        let assignment =
            io::load_from_file(path).with_context(|| format!("loading coloring from {path}"))?;
        let index = CliqueIndex::with_budget(assignment.n(), cli.max_cliques)?;
        println!("{}", ColoringReport::new(&assignment, &index)?);
        return Ok(());
    }

    let n = vertex_count(cli.n)?;
    let index = CliqueIndex::with_budget(n, cli.max_cliques)?;

    let cancel = Arc::new(AtomicBool::new(false));
    {
        let cancel = Arc::clone(&cancel);
        if let Err(e) = ctrlc::set_handler(move || cancel.store(true, Ordering::Relaxed)) {
            warn!("could not install Ctrl-C handler: {e}");
        }
    }

    let start = Instant::now();
    let assignment = if cli.sequential {
        SequentialColorer::new(&index, cli.seed)
            .with_cancel_flag(Arc::clone(&cancel))
            .run()?
    } else {
        let config = SchedulerConfig {
            strategy: cli.strategy.into(),
            parallel: cli.parallel,
            ..SchedulerConfig::default()
        };
        GreedyScheduler::new(&index, config)
            .with_cancel_flag(Arc::clone(&cancel))
            .run()?
    };
    let report = ColoringReport::new(&assignment, &index)?.with_elapsed(start.elapsed());
    println!("{report}");

    if cli.exhaustive {
        let exact = minimum_monochromatic_with_cancel(&index, &cancel)?;
        println!(
            "exhaustive optimum: {} ({} colorings)",
            exact.minimum, exact.search_space
        );
    }

    if cancel.load(Ordering::Relaxed) {
        bail!("interrupted, no output written");
    }
    if cli.print {
        io::print_matrix(&assignment)?;
    }
    if let Some(path) = &cli.out {
        io::save_to_file(&assignment, path).with_context(|| format!("writing {path}"))?;
        info!("coloring written to {path}");
    }
    if let Some(path) = &cli.svg {
        render::save_svg(&assignment, path).with_context(|| format!("writing {path}"))?;
        info!("drawing written to {path}");
    }
    Ok(())
}
