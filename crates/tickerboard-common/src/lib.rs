pub mod fmt;

pub use crate::fmt::{abbreviate, money, money_or_na, published, signed_change, Trend};
