use crate::dashboard::{DashboardState, Fetched};
use chrono::TimeZone;
use tickerboard_client::prelude::*;
use tickerboard_common::{abbreviate, money, money_or_na, published, signed_change, Trend};

pub const PLACEHOLDER: &str = "Enter stock symbol (e.g., AAPL, TSLA)";
pub const NOTICE: &str = "Using the AllOrigins relay to bypass CORS. For production, \
     run a backend proxy or use Finnhub's WebSocket API.";
pub const ERROR_HINT: &str = "Try refreshing or check if the stock symbol is valid.";
pub const NO_DATA: &str =
    "Try searching for a different stock symbol or check your internet connection.";
pub const FOOTER: &str = "Data provided by Finnhub • Using CORS proxy for browser compatibility";

/// One renderable piece of the dashboard, in display order.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Search {
        input: String,
        symbol: String,
        loading: bool,
    },
    Notice,
    Error(String),
    Loading,
    Quote(QuoteCard),
    Profile(ProfileCard),
    News(NewsCard),
    NoData,
    Footer,
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuoteCard {
    pub symbol: String,
    pub stale: bool,
    pub price: String,
    pub change: String,
    pub trend: Trend,
    pub high: String,
    pub low: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProfileCard {
    /// Symbol the profile belongs to, when that is no longer the current one.
    pub stale_from: Option<String>,
    pub rows: Vec<(&'static str, String)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewsCard {
    pub stale_from: Option<String>,
    pub items: Vec<NewsItem>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewsItem {
    pub headline: String,
    pub summary: Option<String>,
    pub source: String,
    pub published: String,
    pub url: String,
    pub image: Option<String>,
}

/// Render `state` into blocks; publish times are shown in `tz`.
pub fn blocks<Tz>(state: &DashboardState, tz: &Tz) -> Vec<Block>
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let mut out = vec![
        Block::Search {
            input: state.input().to_string(),
            symbol: state.symbol().to_string(),
            loading: state.is_loading(),
        },
        Block::Notice,
    ];
    let body_start = out.len();

    if let Some(message) = state.error() {
        out.push(Block::Error(message.to_string()));
    }
    if state.is_loading() {
        out.push(Block::Loading);
    }
    if let Some(quote) = state.quote().filter(|q| q.data.has_price()) {
        out.push(Block::Quote(quote_card(quote, state.symbol())));
    }
    if let Some(profile) = state.profile().filter(|p| !p.data.name.is_empty()) {
        out.push(Block::Profile(profile_card(profile, state.symbol())));
    }
    if let Some(news) = state.news().filter(|n| !n.data.is_empty()) {
        out.push(Block::News(news_card(news, state.symbol(), tz)));
    }

    if out.len() == body_start {
        out.push(Block::NoData);
    }
    out.push(Block::Footer);
    out
}

fn stale_from<T>(fetched: &Fetched<T>, current: &str) -> Option<String> {
    (fetched.symbol != current).then(|| fetched.symbol.clone())
}

pub fn quote_card(quote: &Fetched<Quote>, current: &str) -> QuoteCard {
    let data = &quote.data;
    let (change, trend) = signed_change(data.change, data.percent_change);
    QuoteCard {
        symbol: quote.symbol.clone(),
        stale: quote.symbol != current,
        price: money(data.current),
        change,
        trend,
        high: money_or_na(data.high),
        low: money_or_na(data.low),
    }
}

// Finnhub reports these in millions
fn millions(value: Option<f64>) -> Option<f64> {
    value.map(|v| v * 1e6)
}

fn or_na(value: &str) -> String {
    if value.is_empty() {
        "N/A".to_string()
    } else {
        value.to_string()
    }
}

pub fn profile_card(profile: &Fetched<Profile>, current: &str) -> ProfileCard {
    let data = &profile.data;
    let market_cap = match abbreviate(millions(data.market_capitalization)) {
        na if na == "N/A" => na,
        figure => format!("${figure}"),
    };

    ProfileCard {
        stale_from: stale_from(profile, current),
        rows: vec![
            ("Company Name", or_na(&data.name)),
            ("Market Cap", market_cap),
            (
                "Shares Outstanding",
                abbreviate(millions(data.share_outstanding)),
            ),
            ("Free Float", abbreviate(millions(data.free_float))),
            ("Industry", or_na(&data.finnhub_industry)),
            ("Country", or_na(&data.country)),
            ("Exchange", or_na(&data.exchange)),
            ("IPO", or_na(&data.ipo)),
            ("Website", or_na(&data.weburl)),
        ],
    }
}

pub fn news_card<Tz>(news: &Fetched<Vec<Article>>, current: &str, tz: &Tz) -> NewsCard
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let non_empty = |s: &str| (!s.is_empty()).then(|| s.to_string());
    NewsCard {
        stale_from: stale_from(news, current),
        items: news
            .data
            .iter()
            .map(|article| NewsItem {
                headline: article.headline.clone(),
                summary: non_empty(&article.summary),
                source: article.source.clone(),
                published: published(article.datetime, tz),
                url: article.url.clone(),
                image: non_empty(&article.image),
            })
            .collect(),
    }
}
