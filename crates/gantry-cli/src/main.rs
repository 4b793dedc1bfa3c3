use chrono::NaiveDate;
use gantry::layout::{
    HeadlessError, HeadlessExporter, OutputKind, clamp_zoom, format_zoom_percent,
};
use gantry::{ColumnKey, ColumnWidths, DateRange, ExportConfig, Task};
use serde::Serialize;
use std::io::Read;
use std::path::Path;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Gantry(gantry::Error),
    Layout(HeadlessError),
    Json(serde_json::Error),
    Yaml(serde_yaml::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Gantry(err) => write!(f, "{err}"),
            CliError::Layout(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
            CliError::Yaml(err) => write!(f, "YAML error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<gantry::Error> for CliError {
    fn from(value: gantry::Error) -> Self {
        Self::Gantry(value)
    }
}

impl From<HeadlessError> for CliError {
    fn from(value: HeadlessError) -> Self {
        Self::Layout(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<serde_yaml::Error> for CliError {
    fn from(value: serde_yaml::Error) -> Self {
        Self::Yaml(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    #[default]
    Layout,
    Columns,
}

#[derive(Debug)]
struct Args {
    command: Command,
    input: Option<String>,
    pretty: bool,
    format: OutputKind,
    options: Option<String>,
    page: Option<String>,
    zoom: f64,
    visible: Option<DateRange>,
    today: Option<NaiveDate>,
    fit_columns: bool,
    out: Option<String>,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            command: Command::Layout,
            input: None,
            pretty: false,
            format: OutputKind::Raster,
            options: None,
            page: None,
            zoom: 1.0,
            visible: None,
            today: None,
            fit_columns: false,
            out: None,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ColumnOut {
    key: ColumnKey,
    header: &'static str,
    width: f64,
}

fn usage() -> &'static str {
    "gantry-cli\n\
\n\
USAGE:\n\
  gantry-cli [layout] [--format png|svg|pdf] [--options <file>] [--page <file>] [--zoom <ratio>] [--visible <start>..<end>] [--today <date>] [--fit-columns] [--out <path>] [--pretty] [<tasks>|-]\n\
  gantry-cli columns [--options <file>] [--out <path>] [--pretty] [<tasks>|-]\n\
\n\
NOTES:\n\
  - If <tasks> is omitted or '-', a JSON task array is read from stdin.\n\
  - Task, options and page files are JSON, or YAML when the extension is .yaml/.yml.\n\
  - The options file holds `export`, `page` and `today` sections; a --page file holds the page section alone.\n\
  - --zoom and --visible describe the live view used by `currentView` zoom and `visible` date ranges.\n\
  - --zoom is clamped to 0.05..3 (5%..300%).\n\
  - layout prints the resolved export layout as JSON; columns prints content-fitted column widths.\n\
  - Set RUST_LOG=gantry_layout=debug to trace each resolution step on stderr.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "layout" => args.command = Command::Layout,
            "columns" => args.command = Command::Columns,
            "--pretty" => args.pretty = true,
            "--fit-columns" => args.fit_columns = true,
            "--format" => {
                let Some(fmt) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.format = fmt
                    .parse::<OutputKind>()
                    .map_err(|_| CliError::Usage(usage()))?;
            }
            "--options" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.options = Some(path.clone());
            }
            "--page" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.page = Some(path.clone());
            }
            "--zoom" => {
                let Some(zoom) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                let raw = zoom.parse::<f64>().map_err(|_| CliError::Usage(usage()))?;
                if !(raw.is_finite() && raw > 0.0) {
                    return Err(CliError::Usage(usage()));
                }
                args.zoom = clamp_zoom(raw);
                if args.zoom != raw {
                    tracing::warn!(
                        requested = raw,
                        "--zoom clamped to {}",
                        format_zoom_percent(args.zoom)
                    );
                }
            }
            "--visible" => {
                let Some(range) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.visible = Some(DateRange::parse(range)?);
            }
            "--today" => {
                let Some(date) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.today = Some(gantry::time::parse_date(date)?);
            }
            "--out" => {
                let Some(out) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.out = Some(out.clone());
            }
            "--" => {
                if let Some(rest) = it.next() {
                    if args.input.is_some() {
                        return Err(CliError::Usage(usage()));
                    }
                    args.input = Some(rest.clone());
                }
                if it.next().is_some() {
                    return Err(CliError::Usage(usage()));
                }
            }
            other if other.starts_with('-') && other != "-" => {
                return Err(CliError::Usage(usage()));
            }
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }

    Ok(args)
}

fn is_yaml(path: &str) -> bool {
    Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"))
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn read_tasks(input: Option<&str>) -> Result<Vec<Task>, CliError> {
    let text = read_input(input)?;
    let tasks: Vec<Task> = match input {
        Some(path) if is_yaml(path) => serde_yaml::from_str(&text)?,
        _ => serde_json::from_str(&text)?,
    };
    gantry::validate_tasks(&tasks)?;
    Ok(tasks)
}

fn read_config(path: &str) -> Result<ExportConfig, CliError> {
    let text = std::fs::read_to_string(path)?;
    let config = if is_yaml(path) {
        ExportConfig::from_yaml_str(&text)?
    } else {
        ExportConfig::from_json_str(&text)?
    };
    Ok(config)
}

fn load_config(args: &Args) -> Result<ExportConfig, CliError> {
    let mut config = match args.options.as_deref() {
        Some(path) => read_config(path)?,
        None => ExportConfig::empty_object(),
    };
    if let Some(path) = args.page.as_deref() {
        let page = read_config(path)?;
        config.set_value("page", page.as_value().clone());
    }
    Ok(config)
}

fn write_json(value: &impl Serialize, pretty: bool, out: Option<&str>) -> Result<(), CliError> {
    let mut text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    text.push('\n');
    match out {
        None => print!("{text}"),
        Some(path) => std::fs::write(path, text)?,
    }
    Ok(())
}

fn run(args: Args) -> Result<(), CliError> {
    let tasks = read_tasks(args.input.as_deref())?;
    let config = load_config(&args)?;

    let mut exporter = HeadlessExporter::new();
    if let Some(today) = args.today {
        exporter = exporter.with_today(today);
    }

    match args.command {
        Command::Columns => {
            let options = config.export_options()?;
            let widths = exporter.fit_columns(&tasks, &options);
            let out: Vec<ColumnOut> = widths
                .iter()
                .map(|(&key, &width)| ColumnOut {
                    key,
                    header: key.header_label(),
                    width,
                })
                .collect();
            write_json(&out, args.pretty, args.out.as_deref())
        }
        Command::Layout => {
            let view = exporter.view_state(&config, args.zoom, args.visible)?;
            let widths = if args.fit_columns {
                let options = config.export_options()?;
                exporter.fit_columns(&tasks, &options)
            } else {
                ColumnWidths::new()
            };
            tracing::debug!(
                tasks = tasks.len(),
                format = ?args.format,
                today = %view.today,
                "resolving layout"
            );
            let layout = exporter.export_with_config(
                &tasks,
                &config,
                args.format,
                &widths,
                &view,
            )?;
            write_json(&layout, args.pretty, args.out.as_deref())
        }
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    init_tracing();

    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    if let Err(err) = run(args) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
