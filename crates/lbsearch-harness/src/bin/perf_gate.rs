use std::env;
use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;

use lbsearch_harness::PerfGateConfig;
use lbsearch_harness::log::init_tracing;
use lbsearch_harness::perf_gate::{GateVerdict, run_perf_gate, write_report};

#[derive(Debug, Default)]
struct CliConfig {
    config_path: Option<PathBuf>,
    output_path: Option<PathBuf>,
    json_logs: bool,
    overrides: Overrides,
}

#[derive(Debug, Default)]
struct Overrides {
    dataset_len: Option<usize>,
    query_index: Option<usize>,
    rounds: Option<usize>,
    iterations_per_round: Option<u64>,
    epsilon_ns: Option<f64>,
    max_ratio: Option<f64>,
}

impl Overrides {
    fn apply(&self, config: &mut PerfGateConfig) {
        if let Some(value) = self.dataset_len {
            config.dataset_len = value;
        }
        if let Some(value) = self.query_index {
            config.query_index = value;
        }
        if let Some(value) = self.rounds {
            config.rounds = value;
        }
        if let Some(value) = self.iterations_per_round {
            config.iterations_per_round = value;
        }
        if let Some(value) = self.epsilon_ns {
            config.epsilon_ns = value;
        }
        if let Some(value) = self.max_ratio {
            config.max_ratio = value;
        }
    }
}

fn print_help() {
    let help = "\
perf-gate — compare lbsearch::lower_bound with slice::binary_search

USAGE:
    cargo run --release -p lbsearch-harness --bin perf-gate -- [OPTIONS]

OPTIONS:
    --config <PATH>          TOML config file (defaults apply to missing keys)
    --dataset-len <usize>    Identity dataset length (default 1000000)
    --query-index <usize>    Queried index (default 432000)
    --rounds <usize>         Timed rounds per implementation (default 9)
    --iterations <u64>       Calls per round (default 200000)
    --epsilon-ns <f64>       Additive timer-noise allowance (default 1e-8)
    --max-ratio <f64>        Pass limit for candidate/reference (default 1.0)
    --output <PATH>          Write report JSON to file (stdout when omitted)
    --json-logs              Emit logs as JSON lines on stderr
    -h, --help               Show this help
";
    println!("{help}");
}

fn parse_value<T: FromStr>(args: &[String], index: usize, flag: &str) -> Result<T, String> {
    let raw = args
        .get(index)
        .ok_or_else(|| format!("{flag} requires a value"))?;
    raw.parse::<T>()
        .map_err(|_| format!("invalid {flag} value: {raw}"))
}

fn parse_args(args: &[String]) -> Result<CliConfig, String> {
    let mut cli = CliConfig::default();

    let mut index = 0;
    while index < args.len() {
        match args[index].as_str() {
            "--config" => {
                index += 1;
                cli.config_path = Some(parse_value(args, index, "--config")?);
            }
            "--output" => {
                index += 1;
                cli.output_path = Some(parse_value(args, index, "--output")?);
            }
            "--dataset-len" => {
                index += 1;
                cli.overrides.dataset_len = Some(parse_value(args, index, "--dataset-len")?);
            }
            "--query-index" => {
                index += 1;
                cli.overrides.query_index = Some(parse_value(args, index, "--query-index")?);
            }
            "--rounds" => {
                index += 1;
                cli.overrides.rounds = Some(parse_value(args, index, "--rounds")?);
            }
            "--iterations" => {
                index += 1;
                cli.overrides.iterations_per_round =
                    Some(parse_value(args, index, "--iterations")?);
            }
            "--epsilon-ns" => {
                index += 1;
                cli.overrides.epsilon_ns = Some(parse_value(args, index, "--epsilon-ns")?);
            }
            "--max-ratio" => {
                index += 1;
                cli.overrides.max_ratio = Some(parse_value(args, index, "--max-ratio")?);
            }
            "--json-logs" => cli.json_logs = true,
            "-h" | "--help" => {
                print_help();
                return Err(String::new());
            }
            unknown => return Err(format!("unknown option: {unknown}")),
        }
        index += 1;
    }

    Ok(cli)
}

fn run(args: &[String]) -> Result<GateVerdict, String> {
    let cli = parse_args(args)?;
    init_tracing(cli.json_logs);

    let mut config = match &cli.config_path {
        Some(path) => PerfGateConfig::load(path).map_err(|error| error.to_string())?,
        None => PerfGateConfig::default(),
    };
    cli.overrides.apply(&mut config);

    let report = run_perf_gate(&config).map_err(|error| error.to_string())?;
    if let Some(path) = &cli.output_path {
        write_report(path, &report).map_err(|error| error.to_string())?;
    } else {
        let payload = serde_json::to_string_pretty(&report)
            .map_err(|error| format!("report_serialize_failed: {error}"))?;
        println!("{payload}");
    }
    Ok(report.verdict)
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().skip(1).collect();
    match run(&args) {
        Ok(GateVerdict::Pass) => ExitCode::SUCCESS,
        Ok(GateVerdict::Fail) => {
            eprintln!("ERROR perf-gate verdict=fail lower_bound slower than reference");
            ExitCode::from(1)
        }
        Err(error) if error.is_empty() => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("ERROR perf-gate failed: {error}");
            ExitCode::from(2)
        }
    }
}
