use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use courier_logging::{courier_error, courier_info};
use courier_receiver::{build_router, ReceiverState};
use log::LevelFilter;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};
use tokio::io::{AsyncBufReadExt, BufReader};

/// Backend receiver for page courier uploads.
#[derive(Parser)]
#[command(name = "courier-receiver", version, about = "Page Courier receiver")]
struct Cli {
    /// Port to listen on.
    #[arg(long, env = "PORT", default_value_t = 3000)]
    port: u16,

    /// Directory where snapshots are written.
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = TermLogger::init(
        LevelFilter::Info,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    );

    let cli = Cli::parse();
    let (state, mut saved_rx) = ReceiverState::new(&cli.output_dir);
    let router = build_router(state.clone());

    let addr = format!("0.0.0.0:{}", cli.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    courier_info!("Receiver listening on {addr}");

    tokio::spawn(async move {
        if let Err(err) = axum::serve(listener, router).await {
            courier_error!("Server stopped: {err}");
        }
    });

    // Console loop: stage a name, then block until that upload lands.
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("Enter file name: ");
        io::stdout().flush()?;

        let line = match lines.next_line().await? {
            Some(line) => line,
            None => break,
        };
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let staged = state.stage(input);
        println!("Waiting for upload of {staged}");
        match saved_rx.recv().await {
            Some(path) => println!("Saved {}", path.display()),
            None => break,
        }
    }

    Ok(())
}
