//! Courier CLI - send one templated e-mail from the command line.
//!
//! ```text
//! courier --config demos/smtp.json --templates demos/templates --parameters demos/send.json
//! ```
//!
//! The parameter file is the same camelCase JSON object the library accepts;
//! unknown keys become template variables. Attachments are added with
//! repeated `--attach` flags.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use courier_mail::{
    Attachment, EmailMessageHandler, FilesystemLoader, MessageHandler, MessageParameters,
    TemplateLoader,
};

/// Send a templated e-mail through a named SMTP configuration.
#[derive(Parser)]
#[command(name = "courier", version, about)]
struct Cli {
    /// Path to the SMTP configuration JSON file.
    #[arg(short, long, env = "COURIER_CONFIG")]
    config: PathBuf,

    /// Directory containing the message templates.
    #[arg(short, long, env = "COURIER_TEMPLATES")]
    templates: PathBuf,

    /// Path to the JSON parameter file describing this send.
    #[arg(short, long)]
    parameters: PathBuf,

    /// File to attach; repeat for multiple attachments.
    #[arg(short, long = "attach")]
    attachments: Vec<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "send failed");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let raw = std::fs::read_to_string(&cli.parameters)?;
    let mut parameters: MessageParameters = serde_json::from_str(&raw)?;
    for path in &cli.attachments {
        parameters = parameters.attach(Attachment::from_file(path)?);
    }

    let loader: Arc<dyn TemplateLoader> = Arc::new(FilesystemLoader::new(&cli.templates));
    let handler = EmailMessageHandler::from_config_path(&cli.config, loader)?;
    handler.handle_message(parameters).await?;

    println!("message sent");
    Ok(())
}
