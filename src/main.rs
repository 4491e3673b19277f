//! Command-line front end for the pympress settings file and bundled assets.
//!
//! Run `pympress path` to see which settings file is in use, `pympress show`
//! to dump it with defaults filled in, and `pympress icons --load` to check
//! that every bundled icon decodes.

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use pympress::config::{self, Config, ConfigEnv};
use pympress::resources::{AssetRoot, Platform, ResourceLocator};

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "pympress settings and bundled assets")]
struct Cli {
    /// Settings file to use instead of the resolved one.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory containing `share/` (skips asset root detection).
    #[arg(long = "share-dir", global = true)]
    share_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the settings file path.
    Path,
    /// Print every setting, defaults included.
    Show,
    /// Parse the recognized settings and print them.
    Check,
    /// Print one setting.
    Get {
        section: String,
        key: String,
        /// Do not expand `%(name)s` references.
        #[arg(long)]
        raw: bool,
    },
    /// Change one setting and save.
    Set {
        section: String,
        key: String,
        value: String,
    },
    /// Remove one setting and save.
    Unset { section: String, key: String },
    /// List bundled icons.
    Icons {
        /// Decode each icon and print its size.
        #[arg(long)]
        load: bool,
    },
    /// Print the stylesheet selected for this platform.
    Stylesheet {
        /// Print the stylesheet contents too.
        #[arg(long)]
        dump: bool,
    },
}

// ───────────────────────────────────────── helpers ───────────

fn config_path(explicit: Option<&PathBuf>) -> Result<PathBuf> {
    match explicit {
        Some(path) => Ok(path.clone()),
        None => Ok(config::path_to_config(&ConfigEnv::from_process())?),
    }
}

fn load(explicit: Option<&PathBuf>) -> Result<Config> {
    let config = match explicit {
        Some(path) => Config::load_from(path)?,
        None => config::load_config(&ConfigEnv::from_process())?,
    };
    Ok(config)
}

fn locator(share_dir: Option<PathBuf>) -> ResourceLocator {
    match share_dir {
        Some(dir) => ResourceLocator::new(AssetRoot::Installed(dir), Platform::current()),
        None => ResourceLocator::detect(),
    }
}

// ───────────────────────────────────────── main ─────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr) // stdout carries command output
        .init();

    let cli = Cli::parse();
    let explicit = cli.config.as_ref();

    match cli.command {
        Command::Path => {
            println!("{}", config_path(explicit)?.display());
        }
        Command::Show => {
            print!("{}", load(explicit)?.store());
        }
        Command::Check => {
            let config = load(explicit)?;
            let path = config.path().display().to_string();
            println!("{:#?}", config.content().with_context(|| format!("in {path}"))?);
            println!("{:#?}", config.presenter().with_context(|| format!("in {path}"))?);
            println!("{:#?}", config.cache().with_context(|| format!("in {path}"))?);
        }
        Command::Get { section, key, raw } => {
            let config = load(explicit)?;
            if raw {
                println!("{}", config.get_raw(&section, &key)?);
            } else {
                println!("{}", config.get(&section, &key)?);
            }
        }
        Command::Set {
            section,
            key,
            value,
        } => {
            let mut config = load(explicit)?;
            config.set(&section, &key, &value)?;
            config::save_config(&config)
                .with_context(|| format!("saving {}", config.path().display()))?;
        }
        Command::Unset { section, key } => {
            let mut config = load(explicit)?;
            if !config.unset(&section, &key)? {
                tracing::warn!("[{section}] {key} was not set");
            }
            config::save_config(&config)
                .with_context(|| format!("saving {}", config.path().display()))?;
        }
        Command::Icons { load: decode } => {
            let locator = locator(cli.share_dir);
            if decode {
                for icon in locator.load_icons()? {
                    println!("{}\t{}x{}", icon.name, icon.image.width(), icon.image.height());
                }
            } else {
                for name in locator.list_icons()? {
                    println!("{name}");
                }
            }
        }
        Command::Stylesheet { dump } => {
            let sheet = locator(cli.share_dir).stylesheet()?;
            println!("{}", sheet.path.display());
            if dump {
                print!("{}", sheet.css);
            }
        }
    }

    Ok(())
}
