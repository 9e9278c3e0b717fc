mod db;
mod document;
mod error;
mod import;
mod normalize;
mod sql;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use document::Document;
use error::ImportError;
use import::ImportSummary;

#[derive(Parser)]
#[command(name = "xmlload", about = "Load an XML record dump into SQLite, one atomic upsert pass")]
struct Cli {
    /// Source XML document (top-level elements = tables, children = columns)
    file: PathBuf,

    /// Target SQLite database
    #[arg(long, default_value = "data/import.sqlite")]
    db: PathBuf,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(summary) => {
            println!(
                "Imported {} groups ({} rows affected, {} skipped) from {}",
                summary.groups,
                summary.rows,
                summary.skipped,
                cli.file.display()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<ImportSummary, ImportError> {
    let doc = Document::load(&cli.file)?;
    let conn = db::connect(&cli.db)?;
    import::import_all(&conn, &doc)
}
