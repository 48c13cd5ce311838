use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use camino::{Utf8Path, Utf8PathBuf};
use clap::{Args, Parser, Subcommand};
use miette::IntoDiagnostic;
use tracing_subscriber::EnvFilter;

use diffexpr_loader::error::LoaderError;
use diffexpr_loader::run::{self, DEFAULT_TAXON_ID, RunSummary};
use diffexpr_loader::sink::JsonLinesSink;

#[derive(Parser)]
#[command(name = "diffexpr-loader")]
#[command(about = "Convert differential-expression result files and miRBase exports into normalized records")]
#[command(version, author)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Load gene differential-expression files from a directory")]
    Gene(GeneArgs),
    #[command(about = "Load miRNA differential-expression files from a directory")]
    Mirna(MirnaArgs),
    #[command(about = "Load a miRBase transcript export file")]
    Mirbase(MirbaseArgs),
}

#[derive(Args)]
struct GeneArgs {
    data_dir: Utf8PathBuf,

    #[arg(long, help = "Condition mapping file (file name = condition label)")]
    mapping: Utf8PathBuf,

    #[arg(long, help = "Write records to a file instead of stdout")]
    out: Option<Utf8PathBuf>,
}

#[derive(Args)]
struct MirnaArgs {
    data_dir: Utf8PathBuf,

    #[arg(long, help = "Condition mapping file (file name = condition label)")]
    mapping: Utf8PathBuf,

    #[arg(long, help = "Write records to a file instead of stdout")]
    out: Option<Utf8PathBuf>,

    #[arg(long, default_value = DEFAULT_TAXON_ID)]
    taxon: String,
}

#[derive(Args)]
struct MirbaseArgs {
    file: Utf8PathBuf,

    #[arg(long, help = "Write records to a file instead of stdout")]
    out: Option<Utf8PathBuf>,

    #[arg(long, default_value = DEFAULT_TAXON_ID)]
    taxon: String,
}

fn main() -> ExitCode {
    if let Err(report) = run() {
        eprintln!("{report:?}");
        if let Some(loader) = report.downcast_ref::<LoaderError>() {
            return ExitCode::from(map_exit_code(loader));
        }
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn map_exit_code(error: &LoaderError) -> u8 {
    match error {
        LoaderError::Io { .. } | LoaderError::NotADirectory(_) => 2,
        LoaderError::Parse { .. } | LoaderError::NumberFormat { .. } => 3,
        LoaderError::Storage(_) => 4,
    }
}

fn run() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Gene(args) => {
            let mut sink = make_sink(args.out.as_deref()).into_diagnostic()?;
            let summary = run::run_gene_expression(&args.data_dir, &args.mapping, &mut sink)
                .into_diagnostic()?;
            finish(summary, sink)
        }
        Commands::Mirna(args) => {
            let mut sink = make_sink(args.out.as_deref()).into_diagnostic()?;
            let summary =
                run::run_mirna_expression(&args.data_dir, &args.mapping, &args.taxon, &mut sink)
                    .into_diagnostic()?;
            finish(summary, sink)
        }
        Commands::Mirbase(args) => {
            let mut sink = make_sink(args.out.as_deref()).into_diagnostic()?;
            let summary =
                run::run_mirbase(&args.file, &args.taxon, &mut sink).into_diagnostic()?;
            finish(summary, sink)
        }
    }
}

fn make_sink(out: Option<&Utf8Path>) -> Result<JsonLinesSink<Box<dyn Write>>, LoaderError> {
    let writer: Box<dyn Write> = match out {
        Some(path) => {
            let file = File::create(path.as_std_path())
                .map_err(|err| LoaderError::io(path.as_std_path(), err))?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(io::stdout().lock()),
    };
    Ok(JsonLinesSink::new(writer))
}

fn finish(summary: RunSummary, sink: JsonLinesSink<Box<dyn Write>>) -> miette::Result<()> {
    let mut writer = sink.into_inner();
    writer.flush().into_diagnostic()?;
    tracing::info!(
        files = summary.files,
        records = summary.records,
        "run complete"
    );
    Ok(())
}
