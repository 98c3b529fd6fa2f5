use std::time::Duration;
use async_trait::async_trait;
use reqwest::Client;
use crate::Error;
use crate::models::geolocation::GeoLookup;

#[async_trait]
pub trait Geolocator: Send + Sync {
    async fn locate(&self, ip: &str) -> Result<GeoLookup, Error>;
}

/// ip-api.com, answered in the configured language.
pub struct IpApiClient {
    client: Client,
    base_url: String,
    lang: String
}

impl IpApiClient {
    pub fn new(base_url: impl Into<String>, lang: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        Ok(IpApiClient {
            client: Client::builder().timeout(timeout).build()?,
            base_url: base_url.into(),
            lang: lang.into()
        })
    }

    pub fn url_for(&self, ip: &str) -> String {
        format!("{}/{}?lang={}", self.base_url.trim_end_matches('/'), ip, self.lang)
    }
}

#[async_trait]
impl Geolocator for IpApiClient {
    async fn locate(&self, ip: &str) -> Result<GeoLookup, Error> {
        let response = self.client
            .get(self.url_for(ip))
            .header("User-Agent", concat!("FiveFinder/", env!("CARGO_PKG_VERSION")))
            .send()
            .await?;

        Ok(response.json::<GeoLookup>().await?)
    }
}
