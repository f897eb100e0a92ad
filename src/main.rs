use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use cpu_schedule::collector::InputCollector;
use cpu_schedule::config::SchedulerConfig;
use cpu_schedule::parse::{format_processes, parse_processes};
use cpu_schedule::protocol::{Reply, WireReply};
use cpu_schedule::render::{gantt, render};
use cpu_schedule::scheduler::{simulate, Algorithm};
use cpu_schedule::service::{serve_lines, SchedulerClient};
use cpu_schedule::validation::validate_processes;
use cpu_schedule::workload::WorkloadSpec;

#[derive(Parser)]
#[command(name = "cpu-schedule", version, about = "CPU scheduling simulator")]
struct Cli {
    /// TOML config file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Round-robin time slice (overrides the config file).
    #[arg(long, global = true)]
    quantum: Option<i64>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Schedule one workload and print the result panel.
    Run {
        /// FCFS, SJF, LJF, SRTF, HRRN, Priority or RR.
        #[arg(short, long)]
        algorithm: String,
        /// Processes as `id,arrival,burst,priority;...`.
        #[arg(short, long)]
        input: String,
        /// Print the raw `schedulerResult` payload instead.
        #[arg(long)]
        json: bool,
        /// Also print a Gantt chart.
        #[arg(long)]
        gantt: bool,
    },
    /// Serve line-delimited JSON requests on stdin/stdout.
    Serve,
    /// Print a random workload in input format.
    Generate {
        #[arg(short, long, default_value_t = 5)]
        count: u32,
        #[arg(long, default_value_t = 10)]
        max_arrival: i64,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Run every algorithm on one workload and compare KPIs.
    Compare {
        #[arg(short, long)]
        input: String,
    },
}

fn load_config(cli: &Cli) -> Result<SchedulerConfig> {
    let mut config = match &cli.config {
        Some(path) => SchedulerConfig::load(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => SchedulerConfig::default(),
    };
    if let Some(quantum) = cli.quantum {
        config.round_robin_quantum = quantum;
    }
    config.validate()?;
    Ok(config)
}

async fn run_once(
    config: SchedulerConfig,
    algorithm: String,
    input: String,
    json: bool,
    show_gantt: bool,
) -> Result<ExitCode> {
    let client = SchedulerClient::connect(config);
    let collector = InputCollector::new(algorithm, input);
    let reply = collector.submit(&client).await?.wait().await?;
    let failed = reply.is_error();

    if json {
        println!("{}", serde_json::to_string_pretty(&WireReply::from(reply))?);
    } else {
        let state = render(&reply);
        if let Reply::Success(result) = &reply {
            print!("{}", state.process_table);
            if show_gantt {
                println!("\n{}\n", gantt(&result.timeline));
            }
        } else {
            println!("{}", state.result_text);
        }
        if state.summary_visible {
            println!("{}", state.average_tat_text);
            println!("{}", state.average_wt_text);
            println!("{}", state.overhead_text);
        }
    }

    Ok(if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

fn compare(config: &SchedulerConfig, input: &str) -> Result<()> {
    let processes = parse_processes(input)?;
    if let Err(errors) = validate_processes(&processes) {
        for e in &errors {
            eprintln!("{e}");
        }
        anyhow::bail!("{} invalid process(es)", errors.len());
    }

    println!(
        "{:<10} {:>9} {:>9} {:>9} {:>8} {:>6} {:>9}",
        "Algorithm", "Avg TAT", "Avg WT", "Avg RT", "CPU %", "CS", "Makespan"
    );
    for algorithm in [
        Algorithm::Fcfs,
        Algorithm::Sjf,
        Algorithm::Ljf,
        Algorithm::Srtf,
        Algorithm::Hrrn,
        Algorithm::Priority,
        Algorithm::RoundRobin {
            quantum: config.round_robin_quantum,
        },
    ] {
        let kpi = simulate(algorithm, &processes, config)?.kpi();
        println!(
            "{:<10} {:>9.2} {:>9.2} {:>9.2} {:>8.1} {:>6} {:>9}",
            algorithm.to_string(),
            kpi.avg_turnaround,
            kpi.avg_waiting,
            kpi.avg_response,
            kpi.cpu_utilization * 100.0,
            kpi.context_switches,
            kpi.makespan
        );
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Logs go to stderr; stdout is the transport in `serve` mode.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;

    match cli.command {
        Command::Run {
            algorithm,
            input,
            json,
            gantt,
        } => run_once(config, algorithm, input, json, gantt).await,
        Command::Serve => {
            tracing::info!(quantum = config.round_robin_quantum, "serving on stdio");
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            serve_lines(stdin, tokio::io::stdout(), config).await?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Generate {
            count,
            max_arrival,
            seed,
        } => {
            let mut spec = WorkloadSpec::default()
                .with_count(count)
                .with_max_arrival(max_arrival);
            if let Some(seed) = seed {
                spec = spec.with_seed(seed);
            }
            println!("{}", format_processes(&spec.generate()));
            Ok(ExitCode::SUCCESS)
        }
        Command::Compare { input } => {
            compare(&config, &input)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
