pub mod loader;
pub mod state;

pub use loader::{load, LoadOutcome, NEWS_LIMIT};
pub use state::{starting_symbol, DashboardState, Fetched, Ticket, DEFAULT_SYMBOL};

use chrono::{NaiveDate, Utc};
use futures::FutureExt;
use log::debug;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tickerboard_client::prelude::MarketData;
use tokio::sync::mpsc;

type Landed = (u64, LoadOutcome);

/// Owns the view state and runs loads against `S` in the background.
///
/// Each load is a spawned task reporting back over a channel; outcomes are
/// applied one at a time through [`Dashboard::next_outcome`], so state is
/// only ever touched from the task driving the dashboard.
pub struct Dashboard<S> {
    source: Arc<S>,
    state: DashboardState,
    tx: mpsc::UnboundedSender<Landed>,
    rx: mpsc::UnboundedReceiver<Landed>,
    today: fn() -> NaiveDate,
}

impl<S> Dashboard<S>
where
    S: MarketData + Send + Sync + 'static,
{
    pub fn new(source: S, symbol: &str) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            source: Arc::new(source),
            state: DashboardState::new(symbol),
            tx,
            rx,
            today: || Utc::now().date_naive(),
        }
    }

    /// Override the date the news window ends on.
    pub fn with_today(mut self, today: fn() -> NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    /// Load the current symbol.
    pub fn refresh(&mut self) -> Ticket {
        let ticket = self.state.begin_load();
        debug!("[{}] load #{} started", ticket.symbol, ticket.generation);

        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();
        let today = (self.today)();
        let Ticket { generation, symbol } = ticket.clone();

        tokio::spawn(async move {
            let outcome = AssertUnwindSafe(load(&*source, &symbol, today))
                .catch_unwind()
                .await
                .unwrap_or_else(|_| LoadOutcome::quote_failed(&symbol, "load task panicked"));

            // the receiver lives as long as the dashboard
            let _ = tx.send((generation, outcome));
        });

        ticket
    }

    /// Replace the input with `raw` and submit it; starts a load and
    /// returns `true` only if the symbol changed.
    pub fn submit(&mut self, raw: &str) -> bool {
        self.state.set_input(raw);
        match self.state.submit() {
            Some(_) => {
                self.refresh();
                true
            }
            None => false,
        }
    }

    /// Wait for the next load to land and apply it. Returns whether it was
    /// current (and so changed the state).
    pub async fn next_outcome(&mut self) -> bool {
        match self.rx.recv().await {
            Some((generation, outcome)) => {
                let applied = self.state.finish(generation, outcome);
                if applied {
                    debug!("[{}] load #{generation} finished", self.state.symbol());
                }
                applied
            }
            None => false,
        }
    }

    /// Apply outcomes until no load is in flight.
    pub async fn settle(&mut self) {
        while self.state.is_loading() {
            self.next_outcome().await;
        }
    }
}
