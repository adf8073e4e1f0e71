//! modelsmith CLI.

use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::{Duration, Instant};

use clap::{Args, Parser, Subcommand};
use notify_debouncer_mini::{new_debouncer, notify::RecursiveMode, DebounceEventResult};
use tracing_subscriber::EnvFilter;

use modelsmith_compiler::config::CONFIG_FILE_NAME;
use modelsmith_compiler::{GenerationReport, Generator, GeneratorConfig};

mod ui;

#[derive(Parser)]
#[command(name = "modelsmith")]
#[command(version, about = "modelsmith - generates validated Kotlin models from annotated templates")]
struct Cli {
    /// More logging (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate Kotlin sources
    Generate {
        #[command(flatten)]
        source: SourceArgs,

        /// Output directory for generated sources
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Also write the Kotlin runtime library
        #[arg(long)]
        emit_runtime: bool,
    },

    /// Analyze and validate without writing anything
    Check {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Print the classified properties of each declaration
    Inspect {
        #[command(flatten)]
        source: SourceArgs,

        /// Only this declaration (qualified name of the annotated type)
        #[arg(short, long)]
        declaration: Option<String>,

        /// Print the analyzed models as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write only the Kotlin runtime library
    Runtime {
        /// Output directory
        #[arg(short, long, default_value = "build/generated/modelsmith")]
        output: PathBuf,
    },

    /// Regenerate whenever the input directory changes
    Watch {
        #[command(flatten)]
        source: SourceArgs,

        /// Output directory for generated sources
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Where the source model comes from.
#[derive(Args)]
struct SourceArgs {
    /// Source model directory
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Configuration file (default: ./modelsmith.json if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Source language
    #[arg(short, long)]
    language: Option<String>,

    /// Do not merge the bundled value-object library
    #[arg(long)]
    no_prelude: bool,
}

impl SourceArgs {
    /// Configuration file, then flags.
    fn resolve(&self) -> miette::Result<GeneratorConfig> {
        let mut config = match &self.config {
            Some(path) => GeneratorConfig::load(path)?.ok_or_else(|| {
                miette::miette!("Configuration file {} does not exist", path.display())
            })?,
            None => GeneratorConfig::load(Path::new(CONFIG_FILE_NAME))?.unwrap_or_default(),
        };

        if let Some(input) = &self.input {
            config.input_dir = input.clone();
        }
        if let Some(language) = &self.language {
            config.language = language.clone();
        }
        if self.no_prelude {
            config.include_prelude = false;
        }
        Ok(config)
    }
}

fn main() -> miette::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Generate {
            source,
            output,
            emit_runtime,
        } => {
            let mut config = source.resolve()?;
            if let Some(output) = output {
                config.out_dir = output;
            }
            config.emit_runtime |= emit_runtime;
            generate(config)?;
        }

        Commands::Check { source } => {
            let config = source.resolve()?;
            let spinner = ui::spinner("Checking source model...");
            let report = Generator::new(config).check();
            spinner.finish_and_clear();
            let report = report?;

            if report.is_success() {
                ui::success("Looking good.");
                ui::summary(report.declarations, report.files.len(), 0);
            } else {
                return Err(report_failures(report));
            }
        }

        Commands::Inspect {
            source,
            declaration,
            json,
        } => {
            let config = source.resolve()?;
            let mut report = Generator::new(config).analyze()?;
            if let Some(declaration) = &declaration {
                report.models.retain(|m| &m.declaration == declaration);
                report.diagnostics.retain(|d| &d.declaration == declaration);
                if report.models.is_empty() && report.diagnostics.is_empty() {
                    return Err(miette::miette!("No annotated declaration named {}", declaration));
                }
            }

            if json {
                let text = serde_json::to_string_pretty(&report.models)
                    .map_err(|e| miette::miette!("Failed to serialize models: {}", e))?;
                println!("{}", text);
            } else {
                for model in &report.models {
                    ui::model(model);
                }
            }
            for diagnostic in report.diagnostics {
                print_diagnostic(diagnostic);
            }
        }

        Commands::Runtime { output } => {
            let files = Generator::new(GeneratorConfig::default()).write_runtime(&output)?;
            ui::success(&format!("Wrote {} runtime files to {}", files.len(), output.display()));
        }

        Commands::Watch { source, output } => {
            let mut config = source.resolve()?;
            if let Some(output) = output {
                config.out_dir = output;
            }
            run_watch_mode(config)?;
        }
    }

    Ok(())
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// One generation run with summary output.
fn generate(config: GeneratorConfig) -> miette::Result<()> {
    let start = Instant::now();
    let out_dir = config.out_dir.clone();

    ui::header(env!("CARGO_PKG_VERSION"));
    let spinner = ui::spinner("Generating models...");
    let report = Generator::new(config).generate();
    spinner.finish_and_clear();
    let report = report?;

    if !report.is_success() {
        return Err(report_failures(report));
    }

    ui::success(&format!("Generated into {}", out_dir.display()));
    ui::summary(report.declarations, report.files.len(), 0);
    ui::timing("Done", start.elapsed().as_millis());
    Ok(())
}

/// Print every failed declaration and turn the run into an error.
fn report_failures(report: GenerationReport) -> miette::Report {
    let failed = report.diagnostics.len();
    ui::summary(report.declarations, report.files.len(), failed);
    for diagnostic in report.diagnostics {
        print_diagnostic(diagnostic);
    }
    miette::miette!("{} of {} declarations failed", failed, report.declarations)
}

fn print_diagnostic(diagnostic: modelsmith_compiler::DeclarationDiagnostic) {
    let context = match &diagnostic.location {
        Some(location) => format!("in {} ({})", diagnostic.declaration, location),
        None => format!("in {}", diagnostic.declaration),
    };
    eprintln!("{:?}", miette::Report::new(diagnostic.error).wrap_err(context));
}

/// Regenerate on every debounced change under the input directory.
fn run_watch_mode(config: GeneratorConfig) -> miette::Result<()> {
    let input = config.input_dir.clone();
    ui::info(&format!("Watching for changes in {}", input.display()));
    println!();

    if let Err(e) = generate(config.clone()) {
        ui::error(&format!("{:?}", e));
    }

    let (tx, rx) = mpsc::channel();
    let mut debouncer = new_debouncer(Duration::from_millis(500), move |result: DebounceEventResult| {
        if let Ok(events) = result {
            if !events.is_empty() {
                let _ = tx.send(());
            }
        }
    })
    .map_err(|e| miette::miette!("Failed to create file watcher: {}", e))?;

    debouncer
        .watcher()
        .watch(&input, RecursiveMode::Recursive)
        .map_err(|e| miette::miette!("Failed to watch {}: {}", input.display(), e))?;

    ui::info("Ready! Waiting for changes...");
    while rx.recv().is_ok() {
        println!();
        ui::dim("Change detected, regenerating...");
        if let Err(e) = generate(config.clone()) {
            ui::error(&format!("{:?}", e));
        }
        println!();
        ui::info("Ready! Waiting for changes...");
    }

    Ok(())
}
