use std::path::Path;

use chrono::NaiveDate;
use log::{debug, info, warn};
use reqwest::{header::CONTENT_TYPE, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use shared::data::{
    EntryRequest, ExitRecord, ExitRequest, ParkedVehicle, Reply, RevenueSummary, StatusSummary,
};

use crate::{config::Settings, error::Error};

const STATUS: &str = "/api/status";
const ENTRY: &str = "/api/entry";
const EXIT: &str = "/api/exit";
const REVENUE: &str = "/api/revenue";
const REPORT: &str = "/report/pdf";

/// Talks to the parking server. Every call is a single request without retries.
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    settings: Settings,
}

impl Client {
    /// Creates a new [`Client`] for the server named in `settings`.
    ///
    /// # Errors
    ///
    /// This function will return an error if the underlying HTTP client could not be set up.
    pub fn new(settings: Settings) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .timeout(settings.timeout)
            .build()?;
        Ok(Self { http, settings })
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Fetches the current occupancy.
    ///
    /// # Errors
    ///
    /// This function will return an error if the request failed, the answer could not be decoded or
    /// the server refused to answer.
    pub async fn status(&self) -> Result<StatusSummary, Error> {
        let url = self.settings.endpoint(STATUS)?;
        debug!("GET {url}");
        let response = self.http.get(url).send().await?;
        match read_reply(response, None).await? {
            Reply::Accepted(status) => Ok(status),
            Reply::Rejected(error) => Err(Error::Rejected(error)),
        }
    }

    /// Parks a vehicle. On success the server tells us which slot it was given.
    ///
    /// # Errors
    ///
    /// This function will return an error if the request failed or the answer could not be decoded.
    pub async fn enter(&self, request: &EntryRequest) -> Result<Reply<ParkedVehicle>, Error> {
        let url = self.settings.endpoint(ENTRY)?;
        debug!("POST {url} for {}", request.number);
        let response = self.http.post(url).json(request).send().await?;
        read_reply(response, Some("vehicle")).await
    }

    /// Lets a vehicle leave. On success the server returns the billed record.
    ///
    /// # Errors
    ///
    /// This function will return an error if the request failed or the answer could not be decoded.
    pub async fn exit(&self, request: &ExitRequest) -> Result<Reply<ExitRecord>, Error> {
        let url = self.settings.endpoint(EXIT)?;
        debug!("POST {url} for {}", request.number);
        let response = self.http.post(url).json(request).send().await?;
        read_reply(response, Some("record")).await
    }

    /// Fetches the revenue summary for `date`, or for the server's today when no date is given.
    ///
    /// # Errors
    ///
    /// This function will return an error if the request failed or the answer could not be decoded.
    pub async fn revenue(&self, date: Option<NaiveDate>) -> Result<Reply<RevenueSummary>, Error> {
        let mut url = self.settings.endpoint(REVENUE)?;
        if let Some(date) = date {
            url.query_pairs_mut()
                .append_pair("date", &date.format("%Y-%m-%d").to_string());
        }
        debug!("GET {url}");
        let response = self.http.get(url).send().await?;
        read_reply(response, None).await
    }

    /// Downloads today's PDF report.
    ///
    /// When the server fails to build the report it redirects to its admin page instead, so
    /// anything that is not a PDF counts as unavailable.
    ///
    /// # Errors
    ///
    /// This function will return an error if the request failed or no PDF came back.
    pub async fn daily_report(&self) -> Result<Vec<u8>, Error> {
        let url = self.settings.endpoint(REPORT)?;
        debug!("GET {url}");
        let response = self.http.get(url).send().await?;

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_string();
        if !content_type.starts_with("application/pdf") {
            warn!("Report request answered with '{content_type}'");
            return Err(Error::ReportUnavailable(content_type));
        }

        Ok(response.bytes().await?.to_vec())
    }

    /// Downloads today's PDF report and stores it at `path`. Returns the number of bytes written.
    ///
    /// # Errors
    ///
    /// This function will return an error if the report could not be downloaded or written.
    pub async fn save_daily_report(&self, path: &Path) -> Result<usize, Error> {
        let pdf = self.daily_report().await?;
        tokio::fs::write(path, &pdf).await?;
        info!("Saved report to {}", path.display());
        Ok(pdf.len())
    }
}

/// Reads a JSON answer regardless of its status code. The server uses 400 for refusals and still
/// sends a JSON body with them.
async fn read_reply<T: DeserializeOwned>(
    response: Response,
    field: Option<&'static str>,
) -> Result<Reply<T>, Error> {
    let status = response.status();
    let bytes = response.bytes().await?;
    let body: Value = serde_json::from_slice(&bytes)?;
    let reply = Reply::from_body(body, field)?;

    if let Reply::Rejected(error) = &reply {
        warn!("Server refused the request ({status}): {error}");
    }

    Ok(reply)
}
