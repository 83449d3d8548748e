use anyhow::{Context as AnyhowContext, Result};
use clap::{Args, Parser, Subcommand};
use config::{resolve_settings, SettingsInput, SourceSpec, ENV_CONFIG, ENV_INDEX_URL};
use serde::Serialize;
use std::env;
use std::io::{self, BufRead};
use std::path::PathBuf;
use wheelcov_index::{DirSource, PypiClient, WheelSource};
use wheelcov_protocol::{report_schema, serialize_json, serialize_json_pretty};
use wheelcov_tags::{platform_to_os, pretty_interpreter_tag, CoverageTable, WheelTag};

mod config;
mod report;

fn print_stdout(text: &str) -> Result<()> {
    use std::io::Write;

    let mut stdout = io::stdout().lock();
    if let Err(err) = stdout
        .write_all(text.as_bytes())
        .and_then(|_| stdout.write_all(b"\n"))
        .and_then(|_| stdout.flush())
    {
        if err.kind() == io::ErrorKind::BrokenPipe {
            return Ok(());
        }
        return Err(err.into());
    }
    Ok(())
}

#[derive(Parser)]
#[command(name = "wheelcov")]
#[command(about = "Wheel platform coverage of the latest PyPI releases", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch latest releases and print the coverage matrix
    Report(ReportArgs),

    /// Parse wheel filenames (arguments or stdin lines) and print their tags
    Tags(TagsArgs),

    /// Print the built-in package list
    Defaults,

    /// Print the JSON Schema of `report --json`
    Schema,
}

#[derive(Args)]
struct ReportArgs {
    /// Packages to report on (defaults to the config file, then the built-in list)
    packages: Vec<String>,

    /// JSON or TOML file with `packages` and `index_url` (overrides WHEELCOV_CONFIG)
    #[arg(long)]
    config: Option<PathBuf>,

    /// PyPI JSON API base URL (overrides WHEELCOV_INDEX_URL)
    #[arg(long, conflicts_with = "index_dir")]
    index_url: Option<String>,

    /// Read saved `<package>.json` responses from this directory instead of the network
    #[arg(long)]
    index_dir: Option<PathBuf>,

    /// Output the report as JSON
    #[arg(long)]
    json: bool,

    /// Pretty-print JSON output
    #[arg(long, requires = "json")]
    pretty: bool,
}

#[derive(Args)]
struct TagsArgs {
    /// Wheel filenames; read from stdin when omitted
    filenames: Vec<String>,

    /// Output JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct TagLine {
    filename: String,
    interpreter: String,
    label: String,
    abi: String,
    platform: String,
    os: String,
}

pub async fn main_entry() -> Result<()> {
    let mut cli = Cli::parse();

    let json_output = match &cli.command {
        Commands::Report(args) => args.json,
        Commands::Tags(args) => args.json,
        Commands::Defaults | Commands::Schema => false,
    };
    if json_output {
        cli.quiet = true;
    }

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    // reqwest/hyper internals are only useful with --verbose
    if !cli.verbose {
        builder.filter_module("reqwest", log::LevelFilter::Warn);
        builder.filter_module("hyper", log::LevelFilter::Warn);
    }
    builder.target(env_logger::Target::Stderr).init();

    match cli.command {
        Commands::Report(args) => run_report(args).await?,
        Commands::Tags(args) => run_tags(args)?,
        Commands::Defaults => run_defaults()?,
        Commands::Schema => print_stdout(&report_schema()?)?,
    }

    Ok(())
}

async fn run_report(args: ReportArgs) -> Result<()> {
    let settings = resolve_settings(SettingsInput {
        packages: args.packages,
        config_path: args.config,
        index_url: args.index_url,
        index_dir: args.index_dir,
        env_index_url: env::var(ENV_INDEX_URL).ok().filter(|v| !v.trim().is_empty()),
        env_config: env::var_os(ENV_CONFIG).map(PathBuf::from),
    })?;

    let source: Box<dyn WheelSource> = match &settings.source {
        SourceSpec::Index(url) => Box::new(PypiClient::new(url.as_str())?),
        SourceSpec::Dir(dir) => Box::new(DirSource::new(dir)),
    };
    log::info!(
        "Checking {} packages against {}",
        settings.packages.len(),
        source.describe()
    );

    let collected = report::collect(source.as_ref(), &settings.packages).await?;

    if args.json {
        let out = report::build_report(&collected);
        let text = if args.pretty {
            serialize_json_pretty(&out)?
        } else {
            serialize_json(&out)?
        };
        print_stdout(&text)
    } else {
        print_stdout(&CoverageTable::from_matrix(&collected.matrix).render())
    }
}

fn run_tags(args: TagsArgs) -> Result<()> {
    let filenames = if args.filenames.is_empty() {
        read_stdin_lines()?
    } else {
        args.filenames
    };

    let mut lines = Vec::with_capacity(filenames.len());
    for filename in filenames {
        let tag = WheelTag::from_filename(&filename)
            .with_context(|| format!("Failed to parse {filename}"))?;
        lines.push(TagLine {
            label: pretty_interpreter_tag(&tag.interpreter),
            os: platform_to_os(&tag.platform).to_string(),
            filename,
            interpreter: tag.interpreter,
            abi: tag.abi,
            platform: tag.platform,
        });
    }

    if args.json {
        return print_stdout(&serialize_json(&lines)?);
    }
    let text = lines
        .iter()
        .map(|line| {
            format!(
                "{}\t{}\t{}\t{}\t{}\t{}",
                line.filename, line.interpreter, line.label, line.abi, line.platform, line.os
            )
        })
        .collect::<Vec<_>>()
        .join("\n");
    if text.is_empty() {
        return Ok(());
    }
    print_stdout(&text)
}

fn run_defaults() -> Result<()> {
    print_stdout(&config::default_packages()?.join("\n"))
}

fn read_stdin_lines() -> Result<Vec<String>> {
    let stdin = io::stdin();
    let mut out = Vec::new();
    for line in stdin.lock().lines() {
        let line = line.context("Failed to read stdin")?;
        let line = line.trim();
        if !line.is_empty() {
            out.push(line.to_string());
        }
    }
    Ok(out)
}
