use crate::{Config, NiwaResponse, UvError, UvReading, provider::niwa::NiwaClient, transform};
use async_trait::async_trait;
use std::{convert::TryFrom, fmt::Debug};

pub mod niwa;

/// Series published by the NIWA UV endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProductId {
    /// UV index assuming no cloud; shown as `sunny`.
    ClearSky,
    /// UV index with forecast cloud cover; shown as `cloudy`.
    CloudySky,
}

impl ProductId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductId::ClearSky => "clear_sky_uv_index",
            ProductId::CloudySky => "cloudy_sky_uv_index",
        }
    }

    /// Position of the product in responses that carry no names.
    pub fn legacy_index(&self) -> usize {
        match self {
            ProductId::ClearSky => 0,
            ProductId::CloudySky => 1,
        }
    }

    pub const fn all() -> &'static [ProductId] {
        &[ProductId::ClearSky, ProductId::CloudySky]
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ProductId {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "clear_sky_uv_index" => Ok(ProductId::ClearSky),
            "cloudy_sky_uv_index" => Ok(ProductId::CloudySky),
            _ => Err(anyhow::anyhow!(
                "Unknown product '{value}'. Supported products: clear_sky_uv_index, cloudy_sky_uv_index."
            )),
        }
    }
}

#[async_trait]
pub trait UvSource: Send + Sync + Debug {
    /// Issue the upstream request and return the parsed, untransformed body.
    async fn fetch(&self) -> Result<NiwaResponse, UvError>;
}

/// Construct the NIWA source, failing before any network call when config is incomplete.
pub fn source_from_config(
    config: &Config,
    http: reqwest::Client,
) -> Result<Box<dyn UvSource>, UvError> {
    let credentials = config.credentials()?;
    Ok(Box::new(NiwaClient::with_client(http, credentials)))
}

/// Fetch from `source` and reshape into the frontend series.
pub async fn uv_forecast(source: &dyn UvSource) -> Result<Vec<UvReading>, UvError> {
    let response = source.fetch().await?;
    transform::transform(&response)
}
