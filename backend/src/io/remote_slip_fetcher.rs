//! Client for a remote service that aggregates LWP months itself.
//!
//! Posts the draft's selection keys to `{base_url}/api/payroll-correction/lwp-months`
//! and republishes the `{months, slip_details}` answer. Transport errors, non-2xx
//! answers and undecodable bodies are all reported as a failed fetch.

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use log::{error, info};
use shared::LwpMonthsResponse;

use super::rest::mappers::bucket_mapper::BucketMapper;
use super::rest::mappers::pay_record_mapper::PayRecordMapper;
use crate::domain::models::correction_draft::SelectionKeys;
use crate::domain::slip_fetcher::{FetchOutcome, SlipFetcher};

pub const LWP_MONTHS_PATH: &str = "/api/payroll-correction/lwp-months";

#[derive(Debug, Clone)]
pub struct HttpSlipFetcher {
    client: reqwest::Client,
    base_url: String,
}

impl HttpSlipFetcher {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn request_months(&self, keys: &SelectionKeys) -> Result<LwpMonthsResponse> {
        let url = format!("{}{}", self.base_url, LWP_MONTHS_PATH);
        let response = self
            .client
            .post(&url)
            .json(&PayRecordMapper::to_months_request(keys))
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json::<LwpMonthsResponse>().await?)
    }
}

#[async_trait]
impl SlipFetcher for HttpSlipFetcher {
    async fn fetch(&self, keys: &SelectionKeys) -> FetchOutcome {
        if !keys.is_complete() {
            return FetchOutcome::MissingKeys;
        }

        match self.request_months(keys).await {
            Ok(response) => {
                info!(
                    "Remote aggregation returned {} months and {} slips",
                    response.months.len(),
                    response.slip_details.len()
                );
                FetchOutcome::Aggregated(BucketMapper::from_response(response))
            }
            Err(e) => {
                error!("Remote LWP month request to {} failed: {}", self.base_url, e);
                FetchOutcome::Failed(e.to_string())
            }
        }
    }
}
