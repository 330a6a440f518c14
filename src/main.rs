mod logging;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use pivotgrid::data::{KeyValue, RowSet};
use pivotgrid::tooltip::{Point, Size, TooltipPlacer};
use pivotgrid::{csv_reader, runtime, InputFormat, PivotConfig};
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "pivotgrid")]
#[command(about = "Aggregate flat rows into an ordered, colored pivot grid", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Read rows from stdin and write the pivot view as JSON
    Aggregate(AggregateArgs),
    /// Compute a tooltip position inside a viewport
    Tooltip(TooltipArgs),
}

#[derive(Args, Debug)]
struct AggregateArgs {
    /// JSON pivot configuration; flags below override its fields
    #[arg(long)]
    config: Option<PathBuf>,

    /// Row-key fields (comma separated for a composite key)
    #[arg(long, value_delimiter = ',')]
    rows: Vec<String>,

    /// Column-key fields (comma separated for a composite key)
    #[arg(long, value_delimiter = ',')]
    cols: Vec<String>,

    #[arg(long)]
    measure: Option<String>,

    #[arg(long)]
    display: Option<String>,

    /// Secondary key splitting each row into sub-rows
    #[arg(long)]
    clip: Option<String>,

    /// Row or column key to drop (repeatable)
    #[arg(long)]
    exclude: Vec<String>,

    /// e.g. weekday, month, hour_group(b), iso_week, generic
    #[arg(long)]
    row_order: Option<String>,

    #[arg(long)]
    col_order: Option<String>,

    /// linear, classify(3) or classify(5)
    #[arg(long)]
    bands: Option<String>,

    /// Pad the linear domain so extremes stay off the endpoint colors
    #[arg(long)]
    normalized: bool,

    #[arg(long, value_enum, default_value_t = InputFormat::Csv)]
    format: InputFormat,

    #[arg(long)]
    pretty: bool,
}

#[derive(Args, Debug)]
struct TooltipArgs {
    /// JSON pivot configuration supplying `tooltip_margin`
    #[arg(long)]
    config: Option<PathBuf>,

    /// Pointer position as X,Y
    #[arg(long, value_parser = parse_pair)]
    pointer: (f64, f64),

    /// Tooltip size as W,H
    #[arg(long, value_parser = parse_pair)]
    size: (f64, f64),

    /// Viewport size as W,H
    #[arg(long, value_parser = parse_pair)]
    viewport: (f64, f64),

    /// Overrides the configured margin
    #[arg(long)]
    margin: Option<f64>,
}

fn parse_pair(s: &str) -> Result<(f64, f64), String> {
    let (a, b) = s
        .split_once(',')
        .ok_or_else(|| format!("expected two comma separated numbers, got '{}'", s))?;
    let a = a.trim().parse::<f64>().map_err(|e| format!("'{}': {}", a, e))?;
    let b = b.trim().parse::<f64>().map_err(|e| format!("'{}': {}", b, e))?;
    if !(a.is_finite() && b.is_finite()) {
        return Err(format!("expected finite numbers, got '{}'", s));
    }
    Ok((a, b))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match cli.command {
        Command::Aggregate(args) => run_aggregate(args),
        Command::Tooltip(args) => run_tooltip(args),
    }
}

fn run_aggregate(args: AggregateArgs) -> Result<()> {
    let config = apply_overrides(read_config(args.config.as_ref())?, &args);

    let data: RowSet = match args.format {
        InputFormat::Csv => csv_reader::read_csv_from_stdin().context("Failed to read CSV from stdin")?,
        InputFormat::Json => csv_reader::read_json(io::stdin().lock()).context("Failed to read JSON from stdin")?,
    };
    log::info!("read {} rows ({} columns)", data.len(), data.headers.len());

    let view = runtime::render_pivot(&config, &data).context("Failed to build pivot")?;

    let json = if args.pretty {
        serde_json::to_string_pretty(&view)?
    } else {
        serde_json::to_string(&view)?
    };
    write_stdout(&json)
}

fn read_config(path: Option<&PathBuf>) -> Result<PivotConfig> {
    match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            serde_json::from_str(&text).with_context(|| format!("Invalid pivot config in {}", path.display()))
        }
        None => Ok(PivotConfig::default()),
    }
}

fn apply_overrides(mut config: PivotConfig, args: &AggregateArgs) -> PivotConfig {
    if !args.rows.is_empty() {
        config.rows = args.rows.clone();
    }
    if !args.cols.is_empty() {
        config.cols = args.cols.clone();
    }
    if args.measure.is_some() {
        config.measure = args.measure.clone();
    }
    if args.display.is_some() {
        config.display = args.display.clone();
    }
    if args.clip.is_some() {
        config.clip = args.clip.clone();
    }
    // CSV keys are text but JSON keys may be numbers; numeric values match both
    for value in &args.exclude {
        config.exclude.push(KeyValue::text(value.as_str()));
        if let Some(n) = value.trim().parse::<f64>().ok().filter(|n| n.is_finite()) {
            config.exclude.push(KeyValue::number(n));
        }
    }
    if args.row_order.is_some() {
        config.row_order = args.row_order.clone();
    }
    if args.col_order.is_some() {
        config.col_order = args.col_order.clone();
    }
    if let Some(bands) = &args.bands {
        config.bands = bands.clone();
    }
    config.normalized |= args.normalized;
    config
}

fn run_tooltip(args: TooltipArgs) -> Result<()> {
    let config = read_config(args.config.as_ref())?;
    let placer = TooltipPlacer::new(args.margin.unwrap_or(config.tooltip_margin));
    let pos = placer.place(
        Point::new(args.pointer.0, args.pointer.1),
        Size::new(args.size.0, args.size.1),
        Size::new(args.viewport.0, args.viewport.1),
    );
    write_stdout(&serde_json::to_string(&pos)?)
}

fn write_stdout(text: &str) -> Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    writeln!(handle, "{}", text).context("Failed to write to stdout")?;
    handle.flush().context("Failed to flush stdout")?;
    Ok(())
}
