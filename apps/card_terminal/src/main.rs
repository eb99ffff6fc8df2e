use std::{path::PathBuf, sync::Arc};

use anyhow::Result;
use card_core::{
    load_settings_from, AnimationCoordinator, CardEvent, DataAssembler, HttpServiceClient,
    RandomSelector, RandomizeOutcome,
};
use clap::Parser;
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::broadcast::error::RecvError,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod command;
mod render;

use command::{help_text, Command};
use render::{render_card, LOADING_TEXT};

#[derive(Parser, Debug)]
struct Args {
    /// Base address serving `/personalinfo` and `/image`.
    #[arg(long)]
    service_url: Option<String>,
    /// Fixed seed for reproducible selection order.
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long, default_value = card_core::config::DEFAULT_CONFIG_FILE)]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut settings = load_settings_from(&args.config);
    if let Some(url) = args.service_url {
        settings.service_base_url = url;
    }
    info!(service = %settings.service_base_url, "starting card session");

    let client = HttpServiceClient::with_timeout(
        &settings.service_base_url,
        settings.request_timeout(),
    )?;
    let selector = match args.seed {
        Some(seed) => RandomSelector::from_seed(seed),
        None => RandomSelector::from_entropy(),
    };
    let coordinator = AnimationCoordinator::new_with_dependencies(
        DataAssembler::from_http(Arc::new(client)),
        selector,
        Arc::new(card_core::SystemClock),
        settings.timings(),
    );

    println!("{LOADING_TEXT}");
    if let Err(error) = coordinator.start().await {
        println!("{}", render_card(&coordinator.view().await));
        return Err(error.into());
    }
    println!("{}", render_card(&coordinator.view().await));
    println!("{}", help_text());

    spawn_phase_printer(&coordinator);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let Some(command) = Command::parse(&line) else {
            println!("unknown command '{}'; {}", line.trim(), help_text());
            continue;
        };
        match command {
            Command::Randomize => spawn_randomize(&coordinator),
            Command::Next => {
                coordinator.next().await;
                println!("{}", render_card(&coordinator.view().await));
            }
            Command::Previous => {
                coordinator.previous().await;
                println!("{}", render_card(&coordinator.view().await));
            }
            Command::React(kind) => match coordinator.react(kind).await {
                Some(count) => println!("{} -> reactions: {count}", kind.label()),
                None => println!("nothing to react to"),
            },
            Command::Show => println!("{}", render_card(&coordinator.view().await)),
            Command::Help => println!("{}", help_text()),
            Command::Quit => break,
        }
    }

    Ok(())
}

// Runs detached so navigation and reactions stay responsive mid-transition.
fn spawn_randomize(coordinator: &Arc<AnimationCoordinator>) {
    let coordinator = Arc::clone(coordinator);
    tokio::spawn(async move {
        match coordinator.randomize().await {
            Ok(RandomizeOutcome::Completed { .. }) => {
                println!("{}", render_card(&coordinator.view().await));
            }
            Ok(RandomizeOutcome::Rejected { phase }) => {
                println!("busy ({})", phase.css_class());
            }
            Ok(RandomizeOutcome::Ignored) => println!("no profiles to pick from"),
            Err(error) => warn!(%error, "randomize failed"),
        }
    });
}

fn spawn_phase_printer(coordinator: &Arc<AnimationCoordinator>) {
    let mut events = coordinator.subscribe_events();
    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(CardEvent::PhaseChanged(phase)) if !phase.css_class().is_empty() => {
                    println!("[{}]", phase.css_class());
                }
                Ok(CardEvent::Error(message)) => println!("Error: {message}"),
                Ok(_) | Err(RecvError::Lagged(_)) => {}
                Err(RecvError::Closed) => break,
            }
        }
    });
}
