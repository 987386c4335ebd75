use crate::client_ext::relay::{redact, RelayExt};
use crate::error::FetchError;
use crate::schema::{Article, Profile, Quote};
use chrono::{Days, NaiveDate};
use log::trace;
use reqwest::Client;
use std::future::Future;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://finnhub.io/api/v1";
pub const DEFAULT_RELAY_URL: &str = "https://api.allorigins.win/get";

/// Company news is always requested for the trailing 30 days.
pub const NEWS_WINDOW_DAYS: u64 = 30;

/// The three reads a dashboard load needs, per ticker symbol.
pub trait MarketData {
    fn quote(&self, symbol: &str) -> impl Future<Output = Result<Quote, FetchError>> + Send;

    fn profile(&self, symbol: &str) -> impl Future<Output = Result<Profile, FetchError>> + Send;

    fn news(
        &self,
        symbol: &str,
        today: NaiveDate,
    ) -> impl Future<Output = Result<Vec<Article>, FetchError>> + Send;
}

/// Finnhub REST endpoints, read through the CORS relay.
#[derive(Clone, Debug)]
pub struct Finnhub {
    http: Client,
    base: Url,
    relay: Url,
    token: String,
}

impl Finnhub {
    pub fn new(http: Client, base: Url, relay: Url, token: impl Into<String>) -> Self {
        Self {
            http,
            base,
            relay,
            token: token.into(),
        }
    }

    pub fn quote_url(&self, symbol: &str) -> Result<Url, FetchError> {
        self.endpoint("quote", &[("symbol", symbol)])
    }

    pub fn profile_url(&self, symbol: &str) -> Result<Url, FetchError> {
        self.endpoint("stock/profile2", &[("symbol", symbol)])
    }

    pub fn news_url(&self, symbol: &str, today: NaiveDate) -> Result<Url, FetchError> {
        let (from, to) = news_window(today);
        self.endpoint(
            "company-news",
            &[
                ("symbol", symbol),
                ("from", &from.format("%Y-%m-%d").to_string()),
                ("to", &to.format("%Y-%m-%d").to_string()),
            ],
        )
    }

    // `Url::join` would drop the last segment of a base like `.../api/v1`
    fn endpoint(&self, path: &str, params: &[(&str, &str)]) -> Result<Url, FetchError> {
        let root = self.base.as_str().trim_end_matches('/');
        let mut url = Url::parse(&format!("{root}/{path}"))?;
        url.query_pairs_mut()
            .extend_pairs(params)
            .append_pair("token", &self.token);
        Ok(url)
    }
}

impl MarketData for Finnhub {
    async fn quote(&self, symbol: &str) -> Result<Quote, FetchError> {
        let url = self.quote_url(symbol)?;
        trace!("[{symbol}] fetching quote: {}", redact(&url));
        self.http.fetch_relayed(&self.relay, &url).await
    }

    async fn profile(&self, symbol: &str) -> Result<Profile, FetchError> {
        let url = self.profile_url(symbol)?;
        trace!("[{symbol}] fetching profile: {}", redact(&url));
        self.http.fetch_relayed(&self.relay, &url).await
    }

    async fn news(&self, symbol: &str, today: NaiveDate) -> Result<Vec<Article>, FetchError> {
        let url = self.news_url(symbol, today)?;
        trace!("[{symbol}] fetching news: {}", redact(&url));
        self.http.fetch_relayed(&self.relay, &url).await
    }
}

/// `today - 30 days ..= today`
pub fn news_window(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let from = today
        .checked_sub_days(Days::new(NEWS_WINDOW_DAYS))
        .unwrap_or(NaiveDate::MIN);
    (from, today)
}
