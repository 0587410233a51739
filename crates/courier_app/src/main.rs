use std::path::PathBuf;

use clap::{Parser, Subcommand};
use courier_app::runtime::logging::{self, LogDestination};
use courier_app::runtime::settings::apply_server_url;
use courier_app::runtime::StatusStore;
use courier_core::DEFAULT_ENDPOINT_URL;

/// Settings and status surface for the page courier agent.
#[derive(Parser)]
#[command(name = "courier", version, about = "Page Courier settings")]
struct Cli {
    /// Directory holding the persisted configuration.
    #[arg(long, env = "COURIER_DATA_DIR", default_value = ".")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the effective configuration.
    Show,
    /// Switch the capture feature on.
    Enable,
    /// Switch the capture feature off.
    Disable,
    /// Set or clear the upload endpoint override.
    SetUrl {
        /// New endpoint; an empty value or the built-in default clears
        /// the override.
        value: String,
    },
}

fn main() {
    logging::initialize(LogDestination::Terminal);

    let cli = Cli::parse();
    let store = StatusStore::new(&cli.data_dir);

    match cli.command {
        Command::Show => {
            println!("status: {}", if store.status() { "on" } else { "off" });
            match store.server_url() {
                Some(url) => println!("endpoint: {url} (override)"),
                None => println!("endpoint: {DEFAULT_ENDPOINT_URL} (default)"),
            }
        }
        Command::Enable => {
            store.set_status(true);
            println!("Page Courier is on");
        }
        Command::Disable => {
            store.set_status(false);
            println!("Page Courier is off");
        }
        Command::SetUrl { value } => apply_server_url(&store, &value),
    }
}
