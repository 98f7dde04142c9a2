//! rsalab: RSA lab command-line interface
//!
//! Commands:
//!   keygen [--size N] [--out-dir DIR]         - generate an RSA key pair
//!   encrypt --public-key FILE [--text T]       - chunked RSA-OAEP encryption
//!   decrypt --private-key FILE [--ciphertext C] - reverse of encrypt
//!   avalanche --public-key FILE --text T       - one-character avalanche report
//!   config show                                - display current configuration
//!
//! encrypt/decrypt read stdin when the text argument is omitted.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rsalab_core::config::RsaLabConfig;
use std::io::Read;
use std::path::{Path, PathBuf};

// ── CLI structure ──────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(
    name = "rsalab",
    version,
    about = "RSA lab client",
    long_about = "rsalab: generate RSA keys, encrypt and decrypt chunked RSA-OAEP text, \
                  and measure the avalanche effect"
)]
struct Cli {
    /// Path to rsalab.toml configuration file
    #[arg(long, short = 'c', env = "RSALAB_CONFIG", default_value = "/etc/rsalab/config.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate an RSA key pair (PKCS#8 private key, SPKI public key)
    Keygen {
        /// Modulus size in bits: 1024 or 2048 (default: crypto.default_key_size)
        #[arg(long, short = 's')]
        size: Option<u32>,
        /// Write private_key.pem and public_key.pem here instead of printing JSON
        #[arg(long, short = 'o')]
        out_dir: Option<PathBuf>,
    },

    /// Encrypt text with a public key; prints the `|`-joined wire form
    Encrypt {
        /// PEM public key file
        #[arg(long, short = 'k')]
        public_key: PathBuf,
        /// Plaintext (default: stdin, one trailing newline removed)
        #[arg(long, short = 't')]
        text: Option<String>,
    },

    /// Decrypt a wire-form ciphertext with a private key
    Decrypt {
        /// PEM private key file
        #[arg(long, short = 'k')]
        private_key: PathBuf,
        /// Ciphertext (default: stdin)
        #[arg(long)]
        ciphertext: Option<String>,
    },

    /// Encrypt TEXT and "s" + TEXT and report the bit difference as JSON
    Avalanche {
        /// PEM public key file
        #[arg(long, short = 'k')]
        public_key: PathBuf,
        #[arg(long, short = 't')]
        text: String,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Print the active configuration (merged defaults + config file)
    Show,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();
    let config = RsaLabConfig::load(&cli.config)?;

    match cli.command {
        Commands::Keygen { size, out_dir } => {
            cmd_keygen(size.unwrap_or(config.crypto.default_key_size), out_dir.as_deref())
        }
        Commands::Encrypt { public_key, text } => cmd_encrypt(&public_key, text),
        Commands::Decrypt { private_key, ciphertext } => cmd_decrypt(&private_key, ciphertext),
        Commands::Avalanche { public_key, text } => cmd_avalanche(&public_key, &text),
        Commands::Config { action: ConfigAction::Show } => cmd_config_show(&config, &cli.config),
    }
}

/// Diagnostics go to stderr so stdout stays pipeable.
fn init_logging() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_env("RSALAB_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

// ── helpers ───────────────────────────────────────────────────────────────────

fn read_pem(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("reading key: {}", path.display()))
}

fn read_stdin() -> Result<String> {
    let mut buf = String::new();
    std::io::stdin()
        .read_to_string(&mut buf)
        .context("reading stdin")?;
    Ok(buf)
}

/// Drop the single newline that shells and editors append.
fn strip_trailing_newline(mut text: String) -> String {
    if text.ends_with('\n') {
        text.pop();
        if text.ends_with('\r') {
            text.pop();
        }
    }
    text
}

fn write_key_pair(pair: &rsalab_crypto::KeyPair, dir: &Path) -> Result<(PathBuf, PathBuf)> {
    std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;

    let private_path = dir.join("private_key.pem");
    let public_path = dir.join("public_key.pem");

    std::fs::write(&private_path, &pair.private_key)
        .with_context(|| format!("writing {}", private_path.display()))?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&private_path, std::fs::Permissions::from_mode(0o600))
            .with_context(|| format!("restricting {}", private_path.display()))?;
    }
    std::fs::write(&public_path, &pair.public_key)
        .with_context(|| format!("writing {}", public_path.display()))?;

    Ok((private_path, public_path))
}

// ── `rsalab keygen` ───────────────────────────────────────────────────────────

fn cmd_keygen(bits: u32, out_dir: Option<&Path>) -> Result<()> {
    let pair = rsalab_crypto::generate(bits)?;

    match out_dir {
        Some(dir) => {
            let (private_path, public_path) = write_key_pair(&pair, dir)?;
            println!("Generated {} key pair", pair.key_size);
            println!("  private: {}", private_path.display());
            println!("  public:  {}", public_path.display());
        }
        None => {
            let json = serde_json::to_string_pretty(&pair).context("serializing key pair")?;
            println!("{json}");
        }
    }
    Ok(())
}

// ── `rsalab encrypt` / `rsalab decrypt` ──────────────────────────────────────

fn cmd_encrypt(public_key: &Path, text: Option<String>) -> Result<()> {
    let pem = read_pem(public_key)?;
    let plaintext = match text {
        Some(t) => t,
        None => strip_trailing_newline(read_stdin()?),
    };
    let ciphertext = rsalab_crypto::encrypt(&plaintext, &pem)?;
    tracing::debug!(blocks = rsalab_crypto::block_count(&ciphertext), "encrypted");
    println!("{ciphertext}");
    Ok(())
}

fn cmd_decrypt(private_key: &Path, ciphertext: Option<String>) -> Result<()> {
    let pem = read_pem(private_key)?;
    let ciphertext = match ciphertext {
        Some(c) => c,
        None => read_stdin()?,
    };
    let plaintext = rsalab_crypto::decrypt(&ciphertext, &pem)?;
    println!("{plaintext}");
    Ok(())
}

// ── `rsalab avalanche` ────────────────────────────────────────────────────────

fn cmd_avalanche(public_key: &Path, text: &str) -> Result<()> {
    let pem = read_pem(public_key)?;
    let report = rsalab_crypto::avalanche(&pem, text)?;
    let json = serde_json::to_string_pretty(&report).context("serializing report")?;
    println!("{json}");
    Ok(())
}

// ── `rsalab config show` ──────────────────────────────────────────────────────

fn cmd_config_show(config: &RsaLabConfig, config_path: &Path) -> Result<()> {
    if config_path.exists() {
        println!("# Configuration from: {}", config_path.display());
    } else {
        println!("# Configuration: defaults (no file at {})", config_path.display());
    }
    println!();
    let rendered = toml::to_string_pretty(config).context("serializing config to TOML")?;
    print!("{rendered}");
    Ok(())
}
