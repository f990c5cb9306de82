use casemap::layout::{OffsetAxis, resolve_placements};
use casemap::{
    CasePipeline, CasemapConfig, attribute_statistics, filter_by_category,
    group_by_initiative_and_ownership, historical_summary, parse_point_records,
    parse_survey_rows,
};
use serde::Serialize;
use serde_json::json;
use std::io::Read;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Casemap(casemap::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Casemap(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<casemap::Error> for CliError {
    fn from(value: casemap::Error) -> Self {
        Self::Casemap(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
enum Command {
    #[default]
    Place,
    Cases,
    Groups,
    Timeline,
    Stats,
    Map,
}

impl Command {
    /// `timeline` and `stats` only read survey rows; they ignore `--config`.
    fn uses_config(self) -> bool {
        !matches!(self, Command::Timeline | Command::Stats)
    }
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    pretty: bool,
    config: Option<String>,
    precision: Option<u32>,
    offset_step: Option<f64>,
    offset_axis: Option<OffsetAxis>,
    category: Option<String>,
}

fn usage() -> &'static str {
    "casemap-cli\n\
\n\
USAGE:\n\
  casemap-cli [place] [--pretty] [--config <path>] [--precision <digits>] [--offset-step <deg>] [--axis longitude|latitude] [<path>|-]\n\
  casemap-cli cases [--pretty] [--config <path>] [--category <code>|all] [<path>|-]\n\
  casemap-cli groups [--pretty] [--config <path>] [<path>|-]\n\
  casemap-cli timeline [--pretty] [<path>|-]\n\
  casemap-cli stats [--pretty] [<path>|-]\n\
  casemap-cli map [--pretty] [--config <path>] [--precision <digits>] [--offset-step <deg>] [--axis longitude|latitude] [<path>|-]\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', input is read from stdin.\n\
  - place reads a JSON array of point records ({id, name, latitude, longitude, isAreaWide}).\n\
  - cases, groups, timeline, stats and map read a JSON array of survey rows.\n\
  - map summarizes survey rows into cases and lays out their markers.\n\
  - --config takes a JSON file; layout flags override its `layout.*` keys.\n\
  - timeline and stats ignore --config and the layout flags.\n\
  - Set CASEMAP_LOG (e.g. `debug`) to control diagnostics on stderr.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1).peekable();
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "place" => args.command = Command::Place,
            "cases" => args.command = Command::Cases,
            "groups" => args.command = Command::Groups,
            "timeline" => args.command = Command::Timeline,
            "stats" => args.command = Command::Stats,
            "map" => args.command = Command::Map,
            "--pretty" => args.pretty = true,
            "--config" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.config = Some(path.clone());
            }
            "--precision" => {
                let Some(digits) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.precision =
                    Some(digits.parse::<u32>().map_err(|_| CliError::Usage(usage()))?);
            }
            "--offset-step" => {
                let Some(step) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                let step = step.parse::<f64>().map_err(|_| CliError::Usage(usage()))?;
                if !(step.is_finite() && step >= 0.0) {
                    return Err(CliError::Usage(usage()));
                }
                args.offset_step = Some(step);
            }
            "--axis" => {
                let Some(axis) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.offset_axis = Some(
                    axis.parse::<OffsetAxis>()
                        .map_err(|_| CliError::Usage(usage()))?,
                );
            }
            "--category" => {
                let Some(code) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                if !code.trim().is_empty() {
                    args.category = Some(code.trim().to_string());
                }
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
            "-" => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some("-".to_string());
            }
            other if other.starts_with('-') => return Err(CliError::Usage(usage())),
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

fn write_json(value: &impl Serialize, pretty: bool) -> Result<(), CliError> {
    if pretty {
        serde_json::to_writer_pretty(std::io::stdout().lock(), value)?;
    } else {
        serde_json::to_writer(std::io::stdout().lock(), value)?;
    }
    println!();
    Ok(())
}

/// Layout overrides taken from the command line, as a config fragment.
fn flag_overrides(args: &Args) -> CasemapConfig {
    let mut overrides = CasemapConfig::empty_object();
    if let Some(digits) = args.precision {
        overrides.set_value("layout.coordinatePrecision", json!(digits));
    }
    if let Some(step) = args.offset_step {
        overrides.set_value("layout.offsetStep", json!(step));
    }
    if let Some(axis) = args.offset_axis {
        overrides.set_value("layout.offsetAxis", json!(axis.as_str()));
    }
    overrides
}

/// Loads `--config` (if any) and merges the layout flags on top.
fn load_config(args: &Args) -> Result<CasemapConfig, CliError> {
    let mut config = match args.config.as_deref() {
        Some(path) => CasemapConfig::from_json_str(&std::fs::read_to_string(path)?)?,
        None => CasemapConfig::empty_object(),
    };
    config.deep_merge(flag_overrides(args).as_value());
    Ok(config)
}

fn init_logging() {
    let filter =
        EnvFilter::try_from_env("CASEMAP_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn run(args: Args) -> Result<(), CliError> {
    let text = read_input(args.input.as_deref())?;
    let pipeline = if args.command.uses_config() {
        CasePipeline::from_config(&load_config(&args)?)?
    } else {
        CasePipeline::new()
    };

    match args.command {
        Command::Place => {
            let records = parse_point_records(&text)?;
            let placements = resolve_placements(&records, &pipeline.layout);
            write_json(&placements, args.pretty)
        }
        Command::Cases => {
            let cases = pipeline.summarize(&parse_survey_rows(&text)?);
            let filtered = filter_by_category(&cases, args.category.as_deref());
            write_json(&filtered, args.pretty)
        }
        Command::Groups => {
            let cases = pipeline.summarize(&parse_survey_rows(&text)?);
            write_json(&group_by_initiative_and_ownership(&cases), args.pretty)
        }
        Command::Timeline => {
            let rows = parse_survey_rows(&text)?;
            write_json(&historical_summary(&rows), args.pretty)
        }
        Command::Stats => {
            let rows = parse_survey_rows(&text)?;
            write_json(&attribute_statistics(&rows), args.pretty)
        }
        Command::Map => {
            let cases = pipeline.summarize(&parse_survey_rows(&text)?);
            write_json(&pipeline.place(&cases), args.pretty)
        }
    }
}

fn main() {
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

    init_logging();
    tracing::debug!(command = ?args.command, input = ?args.input, "starting");

    if let Err(err) = run(args) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(items: &[&str]) -> Vec<String> {
        std::iter::once("casemap-cli")
            .chain(items.iter().copied())
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn defaults_to_place_from_stdin() {
        let args = parse_args(&argv(&[])).unwrap();
        assert_eq!(args.command, Command::Place);
        assert_eq!(args.input, None);
        assert!(!args.pretty);
    }

    #[test]
    fn parses_layout_flags_and_path() {
        let args = parse_args(&argv(&[
            "map",
            "--precision",
            "8",
            "--offset-step",
            "0.001",
            "--axis",
            "latitude",
            "--pretty",
            "rows.json",
        ]))
        .unwrap();
        assert_eq!(args.command, Command::Map);
        assert_eq!(args.precision, Some(8));
        assert_eq!(args.offset_step, Some(0.001));
        assert_eq!(args.offset_axis, Some(OffsetAxis::Latitude));
        assert!(args.pretty);
        assert_eq!(args.input.as_deref(), Some("rows.json"));

        let config = load_config(&args).unwrap();
        assert_eq!(config.get_f64("layout.offsetStep"), Some(0.001));
        assert_eq!(config.get_str("layout.offsetAxis"), Some("latitude"));
    }

    #[test]
    fn rejects_bad_flags() {
        let cases: [&[&str]; 6] = [
            &["--precision"],
            &["--precision", "six"],
            &["--offset-step", "-1"],
            &["--axis", "diagonal"],
            &["--unknown"],
            &["a.json", "b.json"],
        ];
        for bad in cases {
            assert!(
                matches!(parse_args(&argv(bad)), Err(CliError::Usage(_))),
                "{bad:?}"
            );
        }
    }

    #[test]
    fn flags_override_only_their_own_config_keys() {
        let args = parse_args(&argv(&["--axis", "lat"])).unwrap();
        let mut config = CasemapConfig::from_value(json!({
            "layout": { "offsetStep": 0.01, "offsetAxis": "longitude" }
        }));
        config.deep_merge(flag_overrides(&args).as_value());
        assert_eq!(config.get_f64("layout.offsetStep"), Some(0.01));
        assert_eq!(config.get_str("layout.offsetAxis"), Some("latitude"));
        assert_eq!(config.get("layout.coordinatePrecision"), None);
    }

    #[test]
    fn only_layout_commands_read_the_config() {
        assert!(Command::Place.uses_config());
        assert!(Command::Map.uses_config());
        assert!(!Command::Timeline.uses_config());
        assert!(!Command::Stats.uses_config());
    }

    #[test]
    fn blank_category_means_all() {
        let args = parse_args(&argv(&["cases", "--category", " "])).unwrap();
        assert_eq!(args.category, None);
    }
}
