use chrono::{DateTime, TimeZone};

const NA: &str = "N/A";

/// Direction of a price move; zero counts as up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Up,
    Down,
}

/// Shorten a figure to one decimal with a magnitude suffix. Missing and
/// zero figures render as `N/A`.
///
/// ```
/// use tickerboard_common::abbreviate;
///
/// assert_eq!(abbreviate(Some(2.8e12)), "2.8T");
/// assert_eq!(abbreviate(Some(15_441_880_000.0)), "15.4B");
/// assert_eq!(abbreviate(Some(950.0)), "950");
/// assert_eq!(abbreviate(None), "N/A");
/// ```
pub fn abbreviate(num: Option<f64>) -> String {
    let num = match num {
        Some(n) if n != 0.0 && n.is_finite() => n,
        _ => return NA.to_string(),
    };

    match num {
        n if n >= 1e12 => format!("{:.1}T", n / 1e12),
        n if n >= 1e9 => format!("{:.1}B", n / 1e9),
        n if n >= 1e6 => format!("{:.1}M", n / 1e6),
        n if n >= 1e3 => format!("{:.1}K", n / 1e3),
        n => n.to_string(),
    }
}

pub fn money(value: f64) -> String {
    format!("${value:.2}")
}

pub fn money_or_na(value: Option<f64>) -> String {
    value.map(money).unwrap_or_else(|| NA.to_string())
}

/// `+$2.50 (1.69%)` or `-$2.50 (-1.69%)`; a missing figure counts as zero.
pub fn signed_change(change: Option<f64>, percent: Option<f64>) -> (String, Trend) {
    let change = change.unwrap_or(0.0);
    let percent = percent.unwrap_or(0.0);
    let (sign, trend) = if change >= 0.0 {
        ("+", Trend::Up)
    } else {
        ("-", Trend::Down)
    };
    (
        format!("{sign}${:.2} ({percent:.2}%)", change.abs()),
        trend,
    )
}

/// Epoch seconds as `Mar 15, 02:30 PM` in the given zone.
pub fn published<Tz>(timestamp: i64, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    match DateTime::from_timestamp(timestamp, 0) {
        Some(utc) => utc.with_timezone(tz).format("%b %-d, %I:%M %p").to_string(),
        None => NA.to_string(),
    }
}
