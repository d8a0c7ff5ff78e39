use std::time::Duration;

use log::debug;
use pipeview_proto::{SubsetRequest, SubsetResponse};
use reqwest::blocking::Client;

use crate::client::SubsetClient;
use crate::error::TransportError;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Blocking HTTP implementation of [`SubsetClient`] against a worker's
/// `/pipeline/subset` route.
pub struct HttpSubsetClient {
    base_url: String,
    http: Client,
}

impl HttpSubsetClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, TransportError> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// The timeout bounds the whole request; hitting it surfaces as the
    /// distinct [`TransportError::Timeout`], never as a worker failure.
    pub fn with_timeout(
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, TransportError> {
        let base_url = base_url.into();
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::Connect {
                location_ref: base_url.clone(),
                message: e.to_string(),
            })?;
        Ok(Self { base_url, http })
    }

    fn subset_url(&self) -> String {
        format!("{}/pipeline/subset", self.base_url.trim_end_matches('/'))
    }
}

impl SubsetClient for HttpSubsetClient {
    fn execute_subset_request(
        &self,
        request: &SubsetRequest,
    ) -> Result<SubsetResponse, TransportError> {
        let url = self.subset_url();
        debug!("POST {url}");

        let response = self
            .http
            .post(&url)
            .json(request)
            .send()
            .map_err(|e| {
                if e.is_timeout() {
                    TransportError::Timeout {
                        location_ref: self.base_url.clone(),
                    }
                } else {
                    TransportError::Connect {
                        location_ref: self.base_url.clone(),
                        message: e.to_string(),
                    }
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status {
                location_ref: self.base_url.clone(),
                status: status.as_u16(),
            });
        }

        response
            .json::<SubsetResponse>()
            .map_err(|e| TransportError::MalformedResponse {
                location_ref: self.base_url.clone(),
                message: e.to_string(),
            })
    }
}
