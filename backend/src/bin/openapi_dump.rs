//! Print the OpenAPI document as JSON, or YAML with `--yaml`.

use std::io::{self, Write};

use clap::Parser;
use trip_backend::ApiDoc;
use utoipa::OpenApi;

/// Command-line options for the OpenAPI dump.
#[derive(Debug, Parser)]
#[command(name = "openapi-dump", about = "Print the trip search OpenAPI document")]
struct Cli {
    /// Emit YAML instead of pretty-printed JSON.
    #[arg(long)]
    yaml: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let doc = ApiDoc::openapi();
    let rendered = if cli.yaml {
        doc.to_yaml()?
    } else {
        doc.to_pretty_json()?
    };
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{rendered}")?;
    Ok(())
}
