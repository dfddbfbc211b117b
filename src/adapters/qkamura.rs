use crate::adapters::http::RetryingClient;
use crate::config::catalog;
use crate::domain::model::{provider_date, Reservation};
use crate::utils::error::{QkamuraError, Result};
use chrono::NaiveDate;
use reqwest::StatusCode;

/// Client for the qkamura vacancy-search endpoint.
pub struct QkamuraClient {
    http: RetryingClient,
    scheme: String,
    host: String,
}

impl QkamuraClient {
    pub fn new(http: RetryingClient, scheme: impl Into<String>, host: impl Into<String>) -> Self {
        Self {
            http,
            scheme: scheme.into(),
            host: host.into(),
        }
    }

    /// Fetches the vacancy grid for `location` over [start, end].
    ///
    /// The response carries, per room at the site, the vacancy count for every
    /// date in the range.
    pub async fn get(
        &self,
        location: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Reservation> {
        let site_id =
            catalog::site_id(location).ok_or_else(|| QkamuraError::InvalidConfigValueError {
                field: "location".to_string(),
                value: location.to_string(),
                reason: "unknown location".to_string(),
            })?;
        let url = self.build_url(site_id, start_date, end_date);
        tracing::debug!(%url, "requesting vacancy grid");

        let response = self.http.execute(self.http.get(&url)).await?;
        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(QkamuraError::UpstreamError {
                service: "qkamura".to_string(),
                status: status.as_u16(),
                body,
            });
        }

        let raw = response.text().await?;
        let reservation: Reservation = serde_json::from_str(&sanitize_jsonp(&raw))?;
        Ok(reservation)
    }

    // roomId=all fetches every room; all_none would return only the first one
    fn build_url(&self, site_id: u32, start_date: NaiveDate, end_date: NaiveDate) -> String {
        format!(
            "{}://{}/qkamura/api/ypro/v2/ypro_stocksearch_api.asp?id={}&roomId=all&startDate={}&endDate={}",
            self.scheme,
            self.host,
            site_id,
            provider_date(start_date),
            provider_date(end_date),
        )
    }
}

/// Strips the JSONP wrapper from a vacancy-search response.
///
/// The endpoint returns `getStockData({...})` with single-quoted keys and
/// values. Assumes the wrapper occurs exactly once at the start of the body and
/// that the final trailing `)` closes it; a body without the wrapper passes
/// through unchanged and anything else is left for the JSON parser to reject.
fn sanitize_jsonp(body: &str) -> String {
    let trimmed = body.trim();
    let inner = trimmed
        .strip_prefix("getStockData(")
        .and_then(|rest| rest.strip_suffix(')'))
        .unwrap_or(trimmed);
    inner.replace('\'', "\"")
}
