use anyhow::{bail, Result};
use chrono::Local;
use clap::Parser;
use cli::{Cli, Commands::*, Prompt};
use dotenv::{dotenv, var};
use log::{debug, info, trace};
use tickerboard::{
    config::Settings,
    dashboard::{state::normalize, starting_symbol, Dashboard},
    ui::{self, Terminal},
    view,
};
use tickerboard_client::prelude::*;
use tokio::io::{AsyncBufReadExt, BufReader};

mod cli;

fn preprocess(level: log::LevelFilter) {
    // grant access to .env
    dotenv().ok();

    // initialise logger
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    preprocess(cli.log.into());
    trace!("Command line input recorded: {:?}", cli.command);

    let settings = Settings::resolve_with(&cli.overrides(), |key| var(key).ok())?;
    debug!("Settings resolved: {settings:?}");

    let finnhub = Finnhub::new(
        build_client(&settings.user_agent)?,
        settings.base_url,
        settings.relay_url,
        settings.api_key,
    );

    // cli framework:
    // "> tickerboard <COMMAND>"
    match cli.command {
        // "> tickerboard watch [SYMBOL]"
        Watch { symbol } => watch(finnhub, &starting_symbol(symbol.as_deref())).await,

        // "> tickerboard show <SYMBOL>"
        Show { symbol } => show(finnhub, &symbol).await,
    }
}

async fn show(finnhub: Finnhub, symbol: &str) -> Result<()> {
    if normalize(symbol).is_empty() {
        bail!("symbol must not be empty");
    }

    let mut dashboard = Dashboard::new(finnhub, symbol);
    let spinner = ui::spinner("Loading stock data...");
    dashboard.refresh();
    dashboard.settle().await;
    spinner.finish_and_clear();

    println!("{}", ui::render(&view::blocks(dashboard.state(), &Local)));

    if dashboard.state().error().is_some() {
        std::process::exit(1);
    }
    Ok(())
}

async fn watch(finnhub: Finnhub, symbol: &str) -> Result<()> {
    let mut dashboard = Dashboard::new(finnhub, symbol);
    let mut terminal = Terminal::new();

    dashboard.refresh();
    terminal.draw(&view::blocks(dashboard.state(), &Local));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match Prompt::parse(&line) {
                    Prompt::Quit => break,
                    Prompt::Refresh => {
                        info!("Refreshing {}", dashboard.state().symbol());
                        dashboard.refresh();
                        terminal.draw(&view::blocks(dashboard.state(), &Local));
                    }
                    Prompt::Submit(raw) => {
                        if dashboard.submit(raw) {
                            info!("Switching to {}", dashboard.state().symbol());
                            terminal.draw(&view::blocks(dashboard.state(), &Local));
                        } else {
                            debug!("{:?} is not a new symbol; nothing to load", raw.trim());
                        }
                    }
                }
            }

            applied = dashboard.next_outcome() => {
                if applied {
                    terminal.draw(&view::blocks(dashboard.state(), &Local));
                }
            }

            _ = tokio::signal::ctrl_c() => break,
        }
    }

    terminal.finish();
    Ok(())
}
