// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use seer_cli::{LogFormat, SeerConfig, build_service, init_tracing, serve_lines};
use seer_service::{
    CreateStreamRequest, GetForecastRequest, ListStreamsRequest, Request, Response,
    UpdateStreamRequest,
};
use seer_stream::Domain;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

/// Online forecasting for regularly sampled streams.
#[derive(Parser)]
#[command(name = "seer")]
#[command(version, long_about = None)]
struct Cli {
    /// Configuration file (JSON)
    #[arg(short, long, env = "SEER_CONFIG")]
    config: Option<PathBuf>,

    /// Override the configured log level
    #[arg(long, env = "SEER_LOG_LEVEL")]
    log_level: Option<String>,

    /// Emit logs as JSON
    #[arg(long, env = "SEER_LOG_JSON")]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Answer JSON-lines requests from stdin on stdout
    Serve,
    /// Create a stream
    Create(CreateArgs),
    /// Show a stream
    Get { name: String },
    /// Append events to a stream
    Update(UpdateArgs),
    /// Delete a stream
    Delete { name: String },
    /// List streams in name order
    List {
        #[arg(long, default_value_t = 1)]
        page: usize,
        #[arg(long, default_value_t = 50)]
        size: usize,
    },
    /// Forecast the next `n` periods of a stream
    Forecast {
        name: String,
        #[arg(short, default_value_t = 24)]
        n: usize,
    },
}

#[derive(Args)]
struct CreateArgs {
    name: String,
    /// Sampling period in seconds
    #[arg(long)]
    period: f64,
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    min: f64,
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    max: f64,
    #[arg(long, value_enum, default_value_t = DomainArg::Continuous)]
    domain: DomainArg,
}

#[derive(Args)]
struct UpdateArgs {
    name: String,
    /// Comma-separated values
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true, required = true)]
    values: Vec<f64>,
    /// Comma-separated event times in nanoseconds since the UNIX epoch
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true, required = true)]
    times_ns: Vec<i64>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DomainArg {
    Continuous,
    ContinuousRight,
    ContinuousInterval,
    DiscreteRight,
    DiscreteInterval,
}

impl From<DomainArg> for Domain {
    fn from(arg: DomainArg) -> Self {
        match arg {
            DomainArg::Continuous => Self::Continuous,
            DomainArg::ContinuousRight => Self::ContinuousRight,
            DomainArg::ContinuousInterval => Self::ContinuousInterval,
            DomainArg::DiscreteRight => Self::DiscreteRight,
            DomainArg::DiscreteInterval => Self::DiscreteInterval,
        }
    }
}

impl Command {
    fn into_request(self) -> Option<Request> {
        let request = match self {
            Self::Serve => return None,
            Self::Create(args) => Request::CreateStream(CreateStreamRequest {
                name: args.name,
                period: args.period,
                min: args.min,
                max: args.max,
                domain: args.domain.into(),
            }),
            Self::Get { name } => Request::GetStream { name },
            Self::Update(args) => Request::UpdateStream(UpdateStreamRequest {
                name: args.name,
                values: args.values,
                times_ns: args.times_ns,
            }),
            Self::Delete { name } => Request::DeleteStream { name },
            Self::List { page, size } => Request::ListStreams(ListStreamsRequest {
                page_number: page,
                page_size: size,
            }),
            Self::Forecast { name, n } => Request::GetForecast(GetForecastRequest { name, n }),
        };
        Some(request)
    }
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let mut config = SeerConfig::load(cli.config.as_deref())?;
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    if cli.log_json {
        config.logging.format = LogFormat::Json;
    }
    init_tracing(&config.logging)?;

    let service = build_service(&config)?;
    let Some(request) = cli.command.into_request() else {
        let stdin = io::stdin().lock();
        let stdout = io::stdout().lock();
        serve_lines(&service, stdin, stdout)?;
        return Ok(ExitCode::SUCCESS);
    };

    let response = service.handle(request);
    let encoded = serde_json::to_string_pretty(&response).context("failed to encode response")?;
    println!("{encoded}");
    Ok(match response {
        Response::Error { .. } => ExitCode::FAILURE,
        _ => ExitCode::SUCCESS,
    })
}
