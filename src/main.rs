//! sjqr command-line entrypoint

use anyhow::Context;
use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use sjqr::theme::{self, Appearance};
use sjqr::{
    CredentialForm, DirectoryTarget, Generator, QrRenderer, SjqrConfig, SystemClipboard,
    ThemeMode, logging,
};
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "sjqr",
    version,
    about = "Generate QR codes carrying Shioaji API credentials"
)]
struct Cli {
    /// Optional configuration file (toml/yaml). Defaults to sjqr.{toml,yaml} in cwd/XDG config.
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build the credential JSON and export it as a QR code
    Generate(GenerateArgs),
    /// Show or change the stored theme preference
    Theme {
        /// New preference: light, dark or system
        mode: Option<ThemeMode>,
    },
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Display name of the user or application
    #[arg(long)]
    name: String,

    /// SJ_API_KEY; read from stdin when omitted
    #[arg(long, value_name = "KEY")]
    api_key: Option<String>,

    /// SJ_SEC_KEY; read from stdin when omitted
    #[arg(long, value_name = "KEY")]
    secret_key: Option<String>,

    /// Output directory (overrides configuration)
    #[arg(long, short, value_name = "DIR")]
    out: Option<PathBuf>,

    /// Export the bare QR code instead of the labeled card
    #[arg(long)]
    plain: bool,

    /// Also write the JSON document next to the image
    #[arg(long)]
    save_json: bool,

    /// Copy the JSON document to the system clipboard
    #[arg(long)]
    copy: bool,

    /// Print the QR code to the terminal
    #[arg(long)]
    preview: bool,

    /// Print the JSON document to stdout
    #[arg(long)]
    print_json: bool,

    /// Print the preview image as a data URI
    #[arg(long)]
    data_uri: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = SjqrConfig::load(cli.config.as_deref())?;
    logging::init(&config.logging)?;
    theme::init(config.theme.store());

    match cli.command {
        Command::Generate(args) => generate(args, config).await,
        Command::Theme { mode } => handle_theme(mode),
    }
}

async fn generate(args: GenerateArgs, mut config: SjqrConfig) -> anyhow::Result<()> {
    if let Some(out) = args.out {
        config.export.output_dir = out;
    }
    if args.plain {
        config.export.labeled = false;
    }
    if args.save_json {
        config.export.save_json = true;
    }

    let form = read_form(args.name, args.api_key, args.secret_key)?;
    let mut session = Generator::new(DirectoryTarget::new(&config.export.output_dir));
    let generated = session.submit(&form)?;

    if args.print_json {
        println!("{}", generated.json);
    }
    if args.data_uri {
        println!("{}", generated.preview.to_data_uri());
    }
    if args.preview {
        let dark = theme::resolved() == Appearance::Dark;
        println!("{}", QrRenderer::new().render_terminal(generated.json.as_str(), dark)?);
    }

    if args.copy {
        let mut clipboard = SystemClipboard::open()?;
        session.copy_json(&mut clipboard)?;
        eprintln!("JSON copied to clipboard");
    }

    let now = Utc::now();
    let image = if config.export.labeled {
        session.export_qr(now).await?
    } else {
        session.export_plain_qr(now).await?
    };
    eprintln!("QR code saved to {}", image.display());

    if config.export.save_json {
        let json = session.export_json(now).await?;
        eprintln!("JSON saved to {}", json.display());
    }

    info!(output_dir = %config.export.output_dir.display(), "Generation finished");
    Ok(())
}

/// Fill in missing keys from stdin, one per line
fn read_form(
    name: String,
    api_key: Option<String>,
    secret_key: Option<String>,
) -> anyhow::Result<CredentialForm> {
    let mut stdin = io::stdin().lock();
    let api_key = match api_key {
        Some(key) => key,
        None => prompt(&mut stdin, "SJ_API_KEY")?,
    };
    let secret_key = match secret_key {
        Some(key) => key,
        None => prompt(&mut stdin, "SJ_SEC_KEY")?,
    };
    Ok(CredentialForm::new(name, api_key, secret_key))
}

fn prompt(stdin: &mut impl BufRead, label: &str) -> anyhow::Result<String> {
    if io::stdin().is_terminal() {
        eprint!("{label}: ");
        io::stderr().flush()?;
    }

    let mut line = String::new();
    let read = stdin
        .read_line(&mut line)
        .with_context(|| format!("Failed to read {label} from stdin"))?;
    if read == 0 {
        anyhow::bail!("{label} was not provided (stdin closed)");
    }

    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn handle_theme(mode: Option<ThemeMode>) -> anyhow::Result<()> {
    if let Some(mode) = mode {
        theme::set(mode)?;
    }

    let current = theme::current();
    let resolved = match theme::resolved() {
        Appearance::Light => "light",
        Appearance::Dark => "dark",
    };
    println!("theme: {current} (resolved: {resolved})");
    Ok(())
}
