use crate::view::{self, Block, NewsCard, ProfileCard, QuoteCard};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use tickerboard_common::Trend;

pub fn spinner(msg: &'static str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(msg);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Draws blocks to stdout; while loading, the indicator is a live spinner
/// instead of a static line.
#[derive(Default)]
pub struct Terminal {
    spinner: Option<ProgressBar>,
}

impl Terminal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draw(&mut self, blocks: &[Block]) {
        self.clear_spinner();

        let still: Vec<Block> = blocks
            .iter()
            .filter(|b| !matches!(b, Block::Loading))
            .cloned()
            .collect();
        println!("{}", render(&still));

        if still.len() != blocks.len() {
            self.spinner = Some(spinner("Loading stock data..."));
        }
    }

    pub fn finish(&mut self) {
        self.clear_spinner();
    }

    fn clear_spinner(&mut self) {
        if let Some(pb) = self.spinner.take() {
            pb.finish_and_clear();
        }
    }
}

/// Blocks as terminal text, one after another, separated by blank lines.
pub fn render(blocks: &[Block]) -> String {
    blocks
        .iter()
        .map(render_block)
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn render_block(block: &Block) -> String {
    match block {
        Block::Search {
            input,
            symbol,
            loading,
        } => {
            let action = if *loading { "Loading..." } else { "Search" };
            format!(
                "{}\n{} [{}] > {} ({action}; :r to refresh, :q to quit)",
                "Real-Time Stock Data Dashboard".bold(),
                view::PLACEHOLDER.dimmed(),
                symbol.bold(),
                input,
            )
        }
        Block::Notice => format!("{}\n{}", "CORS Proxy Notice".yellow().bold(), view::NOTICE.yellow()),
        Block::Error(message) => format!(
            "{}\n{}\n{}",
            "Error".red().bold(),
            message.red(),
            view::ERROR_HINT.dimmed()
        ),
        Block::Loading => "Loading stock data...".to_string(),
        Block::Quote(card) => quote(card),
        Block::Profile(card) => profile(card),
        Block::News(card) => news(card),
        Block::NoData => format!("{}\n{}", "No Data Available".bold(), view::NO_DATA),
        Block::Footer => view::FOOTER.dimmed().to_string(),
    }
}

fn heading(title: &str, stale_from: Option<&str>) -> String {
    match stale_from {
        Some(symbol) => format!("{} {}", title.bold(), format!("(showing {symbol})").dimmed()),
        None => title.bold().to_string(),
    }
}

fn quote(card: &QuoteCard) -> String {
    let change = match card.trend {
        Trend::Up => format!("▲ {}", card.change).green(),
        Trend::Down => format!("▼ {}", card.change).red(),
    };
    let title = if card.stale {
        format!("{} {}", card.symbol.bold(), "(previous search)".dimmed())
    } else {
        heading(&card.symbol, None)
    };

    format!(
        "{title}  Live Price\n  {:<14}{}\n  {:<14}{}\n  {:<14}{}\n  {:<14}{}",
        "Current Price",
        card.price.bold(),
        "Change",
        change,
        "High",
        card.high,
        "Low",
        card.low,
    )
}

fn profile(card: &ProfileCard) -> String {
    let mut lines = vec![heading("Company Information", card.stale_from.as_deref())];
    lines.extend(
        card.rows
            .iter()
            .map(|(label, value)| format!("  {label:<20}{value}")),
    );
    lines.join("\n")
}

fn news(card: &NewsCard) -> String {
    let mut sections = vec![heading("Recent News", card.stale_from.as_deref())];
    for item in &card.items {
        let mut lines = vec![format!("  {}", item.headline.bold())];
        if let Some(summary) = &item.summary {
            lines.push(format!("  {summary}"));
        }
        lines.push(format!(
            "  {}",
            format!("Source: {}  Published: {}", item.source, item.published).dimmed()
        ));
        lines.push(format!("  {}", item.url.underline()));
        if let Some(image) = &item.image {
            lines.push(format!("  {}", format!("Image: {image}").dimmed()));
        }
        sections.push(lines.join("\n"));
    }
    sections.join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::NewsItem;

    fn plain() {
        colored::control::set_override(false);
    }

    fn aapl_card(trend: Trend, change: &str) -> QuoteCard {
        QuoteCard {
            symbol: "AAPL".to_string(),
            stale: false,
            price: "$150.00".to_string(),
            change: change.to_string(),
            trend,
            high: "$151.00".to_string(),
            low: "$148.00".to_string(),
        }
    }

    #[test]
    fn quote_card_text() {
        plain();
        let text = render(&[Block::Quote(aapl_card(Trend::Up, "+$2.50 (1.69%)"))]);
        assert!(text.starts_with("AAPL  Live Price"));
        assert!(text.contains("Current Price $150.00"));
        assert!(text.contains("▲ +$2.50 (1.69%)"));
        assert!(text.contains("Low           $148.00"));
    }

    #[test]
    fn falling_quote_uses_down_arrow() {
        plain();
        let text = render(&[Block::Quote(aapl_card(Trend::Down, "-$3.10 (-2.04%)"))]);
        assert!(text.contains("▼ -$3.10 (-2.04%)"));
    }

    #[test]
    fn stale_quote_is_flagged() {
        plain();
        let mut card = aapl_card(Trend::Up, "+$2.50 (1.69%)");
        card.stale = true;
        let text = render(&[Block::Quote(card)]);
        assert!(text.starts_with("AAPL (previous search)  Live Price"));
    }

    #[test]
    fn stale_profile_heading_names_its_symbol() {
        plain();
        let card = ProfileCard {
            stale_from: Some("AAPL".to_string()),
            rows: vec![("Company Name", "Apple Inc".to_string())],
        };
        let text = render(&[Block::Profile(card)]);
        assert!(text.starts_with("Company Information (showing AAPL)"));
        assert!(text.contains("Company Name"));
        assert!(text.contains("Apple Inc"));
    }

    #[test]
    fn news_items_skip_missing_summary_and_image() {
        plain();
        let card = NewsCard {
            stale_from: None,
            items: vec![NewsItem {
                headline: "Apple ships".to_string(),
                summary: None,
                source: "Reuters".to_string(),
                published: "Mar 15, 02:30 PM".to_string(),
                url: "https://example.com/a".to_string(),
                image: None,
            }],
        };
        let text = render(&[Block::News(card)]);
        assert!(text.contains("Apple ships"));
        assert!(text.contains("Source: Reuters  Published: Mar 15, 02:30 PM"));
        assert!(!text.contains("Image:"));
    }

    #[test]
    fn cards_lay_out_one_field_per_line() {
        plain();
        let profile = ProfileCard {
            stale_from: None,
            rows: vec![
                ("Company Name", "Apple Inc".to_string()),
                ("Country", "US".to_string()),
            ],
        };
        assert_eq!(
            render(&[Block::Profile(profile)]),
            format!(
                "Company Information\n  {:<20}Apple Inc\n  {:<20}US",
                "Company Name", "Country"
            )
        );

        let item = |headline: &str| NewsItem {
            headline: headline.to_string(),
            summary: Some("summary".to_string()),
            source: "Reuters".to_string(),
            published: "Mar 15, 02:30 PM".to_string(),
            url: "https://example.com/a".to_string(),
            image: Some("https://example.com/a.png".to_string()),
        };
        let text = render(&[Block::News(NewsCard {
            stale_from: None,
            items: vec![item("first"), item("second")],
        })]);
        assert_eq!(
            text,
            "Recent News\n\n  first\n  summary\n  Source: Reuters  Published: Mar 15, 02:30 PM\n  https://example.com/a\n  Image: https://example.com/a.png\n\n  second\n  summary\n  Source: Reuters  Published: Mar 15, 02:30 PM\n  https://example.com/a\n  Image: https://example.com/a.png"
        );
    }

    #[test]
    fn error_banner_carries_hint() {
        plain();
        let text = render(&[Block::Error("Failed to load data: boom".to_string())]);
        assert_eq!(
            text,
            format!("Error\nFailed to load data: boom\n{}", view::ERROR_HINT)
        );
    }
}
