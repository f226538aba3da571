use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use quill_core::avatar::random_gradient_index;
use quill_core::config::resolve_config_path;
use quill_core::demographics::{gender_from_fhir, PatientBanner};
use quill_core::{
    BreakpointSet, BreakpointWatcher, BreakpointWidths, DisplayConfig, IdentifierClassifier,
    IdentifierRenderer, LabelledRenderer, PlainRenderer,
};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "quill")]
#[command(about = "Quill display helpers CLI")]
struct Cli {
    /// Display config file (defaults to ./quill.yaml when present)
    #[arg(long, global = true, env = "QUILL_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify and format a national identifier
    Identifier {
        /// Identifier value
        value: String,
        /// Identifier system URI
        #[arg(long)]
        system: Option<String>,
        /// Show the formatted value without a scheme label
        #[arg(long)]
        plain: bool,
        /// Print the classification as JSON
        #[arg(long)]
        json: bool,
    },
    /// Resolve the active breakpoint
    Breakpoint {
        /// Viewport width in pixels, evaluated against the configured widths
        #[arg(long, conflicts_with_all = ["xs", "sm", "md", "lg", "xl"])]
        width: Option<f64>,
        /// Viewport is at least xs wide
        #[arg(long)]
        xs: bool,
        /// Viewport is at least sm wide
        #[arg(long)]
        sm: bool,
        /// Viewport is at least md wide
        #[arg(long)]
        md: bool,
        /// Viewport is at least lg wide
        #[arg(long)]
        lg: bool,
        /// Viewport is at least xl wide
        #[arg(long)]
        xl: bool,
    },
    /// Read viewport widths from stdin, one per line, and print each breakpoint change
    Watch,
    /// Render a one-line patient banner
    Banner {
        /// Given names (comma-separated)
        #[arg(long, value_delimiter = ',')]
        given: Vec<String>,
        /// Family name
        #[arg(long)]
        family: Option<String>,
        /// Date of birth (YYYY-MM-DD)
        #[arg(long)]
        birth_date: Option<String>,
        /// FHIR gender code
        #[arg(long)]
        gender: Option<String>,
        /// National identifier value
        #[arg(long)]
        identifier: Option<String>,
        /// National identifier system URI
        #[arg(long, requires = "identifier")]
        system: Option<String>,
        /// Date used to compute the age (defaults to today)
        #[arg(long)]
        today: Option<NaiveDate>,
    },
    /// Pick a random avatar gradient index
    Gradient,
}

/// Entry point for the Quill CLI.
///
/// # Environment Variables
/// - `QUILL_CONFIG`: display config file, overridden by `--config`
/// - `RUST_LOG`: log filter (logs go to stderr)
fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("quill=warn".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config_path = resolve_config_path(cli.config)?;
    let config = DisplayConfig::load_or_default(config_path.as_deref())
        .context("failed to load display config")?;

    match cli.command {
        Some(Commands::Identifier {
            value,
            system,
            plain,
            json,
        }) => {
            println!("{}", identifier_output(&value, system.as_deref(), plain, json)?);
        }
        Some(Commands::Breakpoint {
            width,
            xs,
            sm,
            md,
            lg,
            xl,
        }) => {
            let set = match width {
                Some(width) => BreakpointSet::from_viewport_width(width, config.breakpoints()),
                None => BreakpointSet {
                    up_xs: xs,
                    up_sm: sm,
                    up_md: md,
                    up_lg: lg,
                    up_xl: xl,
                },
            };
            println!("{}", set.resolve());
        }
        Some(Commands::Watch) => {
            let stdin = std::io::stdin();
            let mut stdout = std::io::stdout();
            watch(stdin.lock(), &mut stdout, config.breakpoints())?;
        }
        Some(Commands::Banner {
            given,
            family,
            birth_date,
            gender,
            identifier,
            system,
            today,
        }) => {
            let banner = PatientBanner {
                given,
                family,
                birth_date,
                gender: gender.as_deref().map(gender_from_fhir),
                identifier: identifier
                    .map(|value| IdentifierClassifier::classify(&value, system.as_deref())),
            };
            let today = today.unwrap_or_else(|| chrono::Local::now().date_naive());
            println!("{}", banner.render_on(today));
        }
        Some(Commands::Gradient) => {
            println!("{}", random_gradient_index(config.gradient_count())?);
        }
        None => {
            println!("Use 'quill --help' for commands");
        }
    }

    Ok(())
}

/// Text printed by the `identifier` command.
fn identifier_output(
    value: &str,
    system: Option<&str>,
    plain: bool,
    json: bool,
) -> anyhow::Result<String> {
    let classified = IdentifierClassifier::classify(value, system);
    let renderer: &dyn IdentifierRenderer = if plain {
        &PlainRenderer
    } else {
        &LabelledRenderer
    };
    let display = renderer.render(&classified);

    if !json {
        return Ok(display);
    }

    let mut out = serde_json::to_value(&classified)?;
    out["display"] = serde_json::Value::String(display);
    Ok(serde_json::to_string(&out)?)
}

/// Feed viewport widths from `input` to a [`BreakpointWatcher`], writing each change to `out`.
///
/// Blank lines are skipped. Lines that are not numbers are logged and skipped.
fn watch<R: BufRead, W: Write>(
    input: R,
    out: &mut W,
    widths: &BreakpointWidths,
) -> anyhow::Result<()> {
    let mut watcher = BreakpointWatcher::new();

    for line in input.lines() {
        let line = line.context("failed to read viewport width")?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let width: f64 = match line.parse() {
            Ok(width) => width,
            Err(e) => {
                tracing::warn!("ignoring viewport width {:?}: {}", line, e);
                continue;
            }
        };

        if let Some(breakpoint) = watcher.observe(BreakpointSet::from_viewport_width(width, widths))
        {
            writeln!(out, "{breakpoint}")?;
            out.flush()?;
        }
    }

    Ok(())
}
