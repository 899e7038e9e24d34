//! HBase REST gateway client
//!
//! Scans go through the gateway's stateful scanner resource:
//!
//! 1. `PUT /{table}/scanner` with a [`ScannerModel`] creates a scanner and
//!    answers `201 Created` with its URL in `Location`
//! 2. `GET {location}` returns the next cell batch, or `204 No Content`
//!    once the scan is exhausted
//! 3. `DELETE {location}` releases the scanner
//!
//! A cell batch may end in the middle of a row, so [`HBaseScanner`] holds
//! the last row of each batch back until it has seen the next row key.

use super::models::{CellSetModel, ScannerModel};
use crate::adapters::storage::{RowCursor, StorageClient};
use crate::config::ConnectionSettings;
use crate::domain::{RawRow, Result, StorageError, TimeRange};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, LOCATION};
use reqwest::{Client, ClientBuilder, Response, StatusCode};
use std::collections::VecDeque;
use std::time::Duration;

const JSON: &str = "application/json";

/// Client for an HBase REST gateway
#[derive(Debug, Clone)]
pub struct HBaseRestClient {
    http: Client,
    base_url: String,
    scanner_batch: usize,
}

impl HBaseRestClient {
    /// Create a client from connection settings
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(settings: &ConnectionSettings, scanner_batch: usize) -> Result<Self> {
        Self::with_base_url(
            settings.base_url(),
            Duration::from_secs(settings.timeout_seconds),
            scanner_batch,
        )
    }

    /// Create a client for an explicit gateway URL
    pub fn with_base_url(
        base_url: impl Into<String>,
        timeout: Duration,
        scanner_batch: usize,
    ) -> Result<Self> {
        let http = ClientBuilder::new()
            .timeout(timeout)
            .connect_timeout(timeout)
            .build()
            .map_err(|e| StorageError::ConnectionFailed(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            scanner_batch: scanner_batch.max(1),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn absolute(&self, location: &str) -> String {
        if location.starts_with('/') {
            format!("{}{}", self.base_url, location)
        } else {
            location.to_string()
        }
    }
}

#[async_trait]
impl StorageClient for HBaseRestClient {
    async fn test_connection(&self) -> Result<()> {
        let url = format!("{}/version/cluster", self.base_url);
        tracing::debug!(url = %url, "Testing gateway connection");

        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| StorageError::ConnectionFailed(e.to_string()))?;

        if resp.status().is_success() {
            Ok(())
        } else {
            Err(status_error(resp).await.into())
        }
    }

    async fn open_cursor(
        &self,
        table: &str,
        family: &str,
        range: TimeRange,
    ) -> Result<Box<dyn RowCursor>> {
        let url = format!("{}/{}/scanner", self.base_url, table);
        let model = ScannerModel::new(family, range, self.scanner_batch);

        tracing::debug!(
            url = %url,
            family = %family,
            range = %range,
            "Creating scanner"
        );

        let resp = self
            .http
            .put(&url)
            .header(ACCEPT, JSON)
            .json(&model)
            .send()
            .await
            .map_err(|e| StorageError::ConnectionFailed(e.to_string()))?;

        match resp.status() {
            StatusCode::CREATED | StatusCode::OK => {}
            StatusCode::NOT_FOUND => {
                return Err(StorageError::TableNotFound(table.to_string()).into());
            }
            _ => return Err(status_error(resp).await.into()),
        }

        let location = resp
            .headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| {
                StorageError::ScannerFailed("Gateway did not return a scanner location".to_string())
            })?;
        let location = self.absolute(location);

        tracing::debug!(scanner = %location, "Scanner created");

        Ok(Box::new(HBaseScanner::new(self.http.clone(), location)))
    }
}

/// Cursor over one gateway scanner
#[derive(Debug)]
pub struct HBaseScanner {
    http: Client,
    location: String,
    pending: VecDeque<RawRow>,
    held: Option<RawRow>,
    exhausted: bool,
    closed: bool,
}

impl HBaseScanner {
    fn new(http: Client, location: String) -> Self {
        Self {
            http,
            location,
            pending: VecDeque::new(),
            held: None,
            exhausted: false,
            closed: false,
        }
    }

    async fn fetch_batch(&mut self) -> Result<()> {
        let resp = self
            .http
            .get(&self.location)
            .header(ACCEPT, JSON)
            .send()
            .await
            .map_err(|e| StorageError::ConnectionFailed(e.to_string()))?;

        match resp.status() {
            StatusCode::NO_CONTENT => {
                self.exhausted = true;
                Ok(())
            }
            StatusCode::OK => {
                let body = resp
                    .bytes()
                    .await
                    .map_err(|e| StorageError::ConnectionFailed(e.to_string()))?;
                let cell_set: CellSetModel = serde_json::from_slice(&body)
                    .map_err(|e| StorageError::InvalidResponse(e.to_string()))?;

                if cell_set.rows.is_empty() {
                    self.exhausted = true;
                }
                for row in cell_set.rows {
                    self.pending.push_back(row.into_raw_row()?);
                }
                Ok(())
            }
            StatusCode::NOT_FOUND => Err(StorageError::ScannerFailed(format!(
                "Scanner {} no longer exists",
                self.location
            ))
            .into()),
            _ => Err(status_error(resp).await.into()),
        }
    }
}

#[async_trait]
impl RowCursor for HBaseScanner {
    async fn next_row(&mut self) -> Result<Option<RawRow>> {
        loop {
            if self.pending.is_empty() && !self.exhausted {
                self.fetch_batch().await?;
            }

            let Some(row) = self.pending.pop_front() else {
                return Ok(self.held.take());
            };

            match self.held.take() {
                Some(mut held) if held.key() == row.key() => {
                    held.merge(row);
                    self.held = Some(held);
                }
                Some(held) => {
                    self.held = Some(row);
                    return Ok(Some(held));
                }
                None => self.held = Some(row),
            }
        }
    }

    async fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;

        let resp = self
            .http
            .delete(&self.location)
            .send()
            .await
            .map_err(|e| StorageError::ConnectionFailed(e.to_string()))?;

        if resp.status().is_success() || resp.status() == StatusCode::NOT_FOUND {
            tracing::debug!(scanner = %self.location, "Scanner released");
            Ok(())
        } else {
            Err(status_error(resp).await.into())
        }
    }
}

async fn status_error(resp: Response) -> StorageError {
    let status = resp.status();
    let message = resp.text().await.unwrap_or_default();
    if status.is_server_error() {
        StorageError::ServerError {
            status: status.as_u16(),
            message,
        }
    } else {
        StorageError::ClientError {
            status: status.as_u16(),
            message,
        }
    }
}
