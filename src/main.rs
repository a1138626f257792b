//! exportcrypt - compressed, encrypted, signed export archives
//!
//! Usage:
//!   exportcrypt export <input.json> --out <archive>     - Encrypt and sign a JSON file
//!   exportcrypt verify <archive> --signature <file>     - Check a detached signature
//!   exportcrypt import <archive>                        - Decrypt an archive back to JSON

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use exportcrypt::{export_data, import_data, sign, verify};
use std::path::{Path, PathBuf};
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "exportcrypt")]
#[command(author = "exportcrypt Contributors")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Compressed, encrypted, signed export archives")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt and sign a JSON file into an archive
    Export {
        /// Input JSON file
        input: PathBuf,

        /// Archive output path
        #[arg(short, long)]
        out: PathBuf,

        /// Signature output path (defaults to <out>.sig)
        #[arg(long)]
        sig_out: Option<PathBuf>,

        /// Read the encryption secret from a file instead of prompting
        #[arg(long)]
        secret_file: Option<PathBuf>,

        /// Read the signing secret from a file instead of prompting
        #[arg(long)]
        sign_secret_file: Option<PathBuf>,
    },

    /// Verify the detached signature of an archive
    Verify {
        /// Archive path
        archive: PathBuf,

        /// File holding the hex signature
        #[arg(short, long)]
        signature: PathBuf,

        /// Read the signing secret from a file instead of prompting
        #[arg(long)]
        sign_secret_file: Option<PathBuf>,
    },

    /// Decrypt an archive back to JSON
    Import {
        /// Archive path
        archive: PathBuf,

        /// Output path (defaults to stdout)
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Read the encryption secret from a file instead of prompting
        #[arg(long)]
        secret_file: Option<PathBuf>,
    },

    /// Re-sign an existing archive with a new signing secret
    Sign {
        /// Archive path
        archive: PathBuf,

        /// Signature output path (defaults to <archive>.sig)
        #[arg(long)]
        sig_out: Option<PathBuf>,

        /// Read the signing secret from a file instead of prompting
        #[arg(long)]
        sign_secret_file: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set subscriber");

    if let Err(e) = run_command(cli.command) {
        error!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run_command(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Export {
            input,
            out,
            sig_out,
            secret_file,
            sign_secret_file,
        } => cmd_export(&input, &out, sig_out, secret_file, sign_secret_file),

        Commands::Verify {
            archive,
            signature,
            sign_secret_file,
        } => cmd_verify(&archive, &signature, sign_secret_file),

        Commands::Import {
            archive,
            out,
            secret_file,
        } => cmd_import(&archive, out, secret_file),

        Commands::Sign {
            archive,
            sig_out,
            sign_secret_file,
        } => cmd_sign(&archive, sig_out, sign_secret_file),
    }
}

/// Read a secret from a file, or prompt for it interactively.
fn read_secret(file: Option<PathBuf>, prompt: &str) -> anyhow::Result<String> {
    if let Some(path) = file {
        let secret = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read secret file {:?}", path))?;
        Ok(secret.trim().to_string())
    } else {
        Ok(rpassword::prompt_password(prompt)?)
    }
}

fn cmd_export(
    input: &Path,
    out: &Path,
    sig_out: Option<PathBuf>,
    secret_file: Option<PathBuf>,
    sign_secret_file: Option<PathBuf>,
) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(input)
        .with_context(|| format!("Failed to read input file {:?}", input))?;
    let data: serde_json::Value =
        serde_json::from_str(&text).with_context(|| format!("{:?} is not valid JSON", input))?;

    let encryption_secret = read_secret(secret_file, "Enter encryption secret: ")?;
    let signature_secret = read_secret(sign_secret_file, "Enter signing secret: ")?;

    let pkg = export_data(&data, &encryption_secret, &signature_secret)?;

    std::fs::write(out, &pkg.archive)
        .with_context(|| format!("Failed to write archive {:?}", out))?;
    let sig_path = sig_out.unwrap_or_else(|| out.with_extension("sig"));
    std::fs::write(&sig_path, &pkg.signature)
        .with_context(|| format!("Failed to write signature {:?}", sig_path))?;

    info!("Wrote {} byte archive to {:?}", pkg.archive.len(), out);
    info!("Wrote signature to {:?}", sig_path);
    info!("iv: {}  authTag: {}", pkg.iv, pkg.auth_tag);
    Ok(())
}

fn cmd_verify(
    archive_path: &Path,
    signature_path: &Path,
    sign_secret_file: Option<PathBuf>,
) -> anyhow::Result<()> {
    let archive = std::fs::read(archive_path)
        .with_context(|| format!("Failed to read archive {:?}", archive_path))?;
    let signature = std::fs::read_to_string(signature_path)
        .with_context(|| format!("Failed to read signature file {:?}", signature_path))?;
    let signature_secret = read_secret(sign_secret_file, "Enter signing secret: ")?;

    if verify(&archive, signature.trim(), &signature_secret) {
        info!("Signature OK");
        Ok(())
    } else {
        bail!("Signature verification failed for {:?}", archive_path);
    }
}

fn cmd_import(
    archive_path: &Path,
    out: Option<PathBuf>,
    secret_file: Option<PathBuf>,
) -> anyhow::Result<()> {
    let archive = std::fs::read(archive_path)
        .with_context(|| format!("Failed to read archive {:?}", archive_path))?;
    let encryption_secret = read_secret(secret_file, "Enter encryption secret: ")?;

    let data: serde_json::Value = import_data(&archive, &encryption_secret)?;
    let pretty = serde_json::to_string_pretty(&data)?;

    match out {
        Some(path) => {
            std::fs::write(&path, pretty)
                .with_context(|| format!("Failed to write output {:?}", path))?;
            info!("Wrote decrypted JSON to {:?}", path);
        }
        None => println!("{}", pretty),
    }
    Ok(())
}

fn cmd_sign(
    archive_path: &Path,
    sig_out: Option<PathBuf>,
    sign_secret_file: Option<PathBuf>,
) -> anyhow::Result<()> {
    let archive = std::fs::read(archive_path)
        .with_context(|| format!("Failed to read archive {:?}", archive_path))?;
    let signature_secret = read_secret(sign_secret_file, "Enter signing secret: ")?;

    let signature = sign(&archive, &signature_secret);
    let sig_path = sig_out.unwrap_or_else(|| archive_path.with_extension("sig"));
    std::fs::write(&sig_path, &signature)
        .with_context(|| format!("Failed to write signature {:?}", sig_path))?;

    info!("Wrote signature to {:?}", sig_path);
    Ok(())
}
