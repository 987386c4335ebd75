use crate::error::FetchError;
use log::{trace, warn};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::future::Future;
use url::Url;

/// The relay answers with the upstream body stringified inside `contents`.
///
/// ```json
/// { "contents": "{\"c\":150.0,\"d\":2.5}", "status": { "http_code": 200 } }
/// ```
#[derive(Deserialize, Debug)]
struct Envelope {
    contents: Option<String>,
}

pub trait RelayExt {
    /// GET `target` through the CORS relay at `relay`, falling back to a
    /// direct GET of `target` if anything on the relay path fails.
    fn fetch_relayed<T>(
        &self,
        relay: &Url,
        target: &Url,
    ) -> impl Future<Output = Result<T, FetchError>> + Send
    where
        T: DeserializeOwned + Send;

    /// GET `target` and decode its JSON body; non-2xx is an error.
    fn fetch_direct<T>(&self, target: &Url) -> impl Future<Output = Result<T, FetchError>> + Send
    where
        T: DeserializeOwned + Send;
}

/// Add-on methods for [`reqwest::Client`].
///
/// [`reqwest::Client`]: https://docs.rs/reqwest/latest/reqwest/struct.Client.html
impl RelayExt for Client {
    async fn fetch_relayed<T>(&self, relay: &Url, target: &Url) -> Result<T, FetchError>
    where
        T: DeserializeOwned + Send,
    {
        match through_relay(self, relay, target).await {
            Ok(data) => Ok(data),
            Err(e) => {
                warn!(
                    "Proxy failed ({e}), trying direct request to {}",
                    redact(target)
                );
                self.fetch_direct(target).await
            }
        }
    }

    async fn fetch_direct<T>(&self, target: &Url) -> Result<T, FetchError>
    where
        T: DeserializeOwned + Send,
    {
        trace!("GET {}", redact(target));
        let response = self.get(target.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status,
                url: redact(target),
            });
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

async fn through_relay<T>(client: &Client, relay: &Url, target: &Url) -> Result<T, FetchError>
where
    T: DeserializeOwned + Send,
{
    let envelope: Envelope = client.fetch_direct(&relay_url(relay, target)).await?;
    let contents = envelope.contents.ok_or(FetchError::Envelope)?;
    Ok(serde_json::from_str(&contents)?)
}

/// `{relay}?url={target}`, with the target percent-encoded.
pub fn relay_url(relay: &Url, target: &Url) -> Url {
    let mut url = relay.clone();
    url.query_pairs_mut().append_pair("url", target.as_str());
    url
}

/// Renders `url` with any `token` query value masked, including tokens
/// nested inside a relayed `url` parameter.
pub fn redact(url: &Url) -> String {
    if url.query().is_none() {
        return url.to_string();
    }

    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(key, value)| {
            let value = match (&*key, Url::parse(&value)) {
                ("token", _) => "***".to_string(),
                (_, Ok(inner)) if inner.query().is_some() => redact(&inner),
                _ => value.into_owned(),
            };
            (key.into_owned(), value)
        })
        .collect();

    let mut masked = url.clone();
    masked.query_pairs_mut().clear().extend_pairs(pairs);
    masked.to_string()
}
