use clap::{Parser, Subcommand, ValueEnum};
use tickerboard::config::Overrides;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Sets the level of logging (RUST_LOG refines it further)
    #[arg(long, value_enum, default_value_t = LogLevel::Warn, ignore_case = true, global = true)]
    pub log: LogLevel,

    /// Finnhub API key [env: FINNHUB_API_KEY]
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// Finnhub REST root [env: FINNHUB_BASE_URL]
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// CORS relay endpoint [env: CORS_RELAY_URL]
    #[arg(long, global = true)]
    pub relay: Option<String>,

    /// HTTP user agent [env: USER_AGENT]
    #[arg(long, global = true)]
    pub user_agent: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Interactive dashboard; type a ticker and press Enter to switch.
    Watch {
        /// Symbol shown first.
        symbol: Option<String>,
    },

    /// Load a single symbol, print the dashboard, and exit.
    Show { symbol: String },
}

#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Error => log::LevelFilter::Error,
        }
    }
}

/// A line typed at the `watch` prompt.
#[derive(Debug, PartialEq, Eq)]
pub enum Prompt<'a> {
    Quit,
    /// Reload the current symbol.
    Refresh,
    Submit(&'a str),
}

impl<'a> Prompt<'a> {
    pub fn parse(line: &'a str) -> Self {
        match line.trim() {
            ":q" | "quit" | "exit" => Prompt::Quit,
            ":r" | "refresh" => Prompt::Refresh,
            _ => Prompt::Submit(line),
        }
    }
}

impl Cli {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            api_key: self.api_key.clone(),
            base_url: self.base_url.clone(),
            relay_url: self.relay.clone(),
            user_agent: self.user_agent.clone(),
        }
    }
}
