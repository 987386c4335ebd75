pub mod client_ext;
pub mod endp;
pub mod error;
pub mod schema;

pub mod prelude {
    pub use crate::client_ext::relay::RelayExt as Relay;
    #[allow(unused_imports)]
    pub use crate::client_ext::Client;

    pub use crate::endp::finnhub::{Finnhub, MarketData};
    pub use crate::error::FetchError;
    pub use crate::schema::{Article, Profile, Quote};

    pub fn build_client(user_agent: &str) -> anyhow::Result<Client> {
        let client = reqwest::ClientBuilder::new()
            .user_agent(user_agent)
            .build()?;
        Ok(client)
    }
}
