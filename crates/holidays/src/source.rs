// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::HolidayError;
use crate::feed::parse_feed;
use leavelink_domain::BankHoliday;
use std::future::Future;
use std::time::Duration;
use tracing::debug;

/// The published gov.uk bank holiday feed.
pub const DEFAULT_FEED_URL: &str = "https://www.gov.uk/bank-holidays.json";

/// The division used when none is configured.
pub const DEFAULT_DIVISION: &str = "england-and-wales";

/// How long a single feed request may take, connection included.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Somewhere bank holidays can be loaded from.
pub trait HolidaySource: Send + Sync {
    /// Loads the full list of holidays.
    fn fetch(&self) -> impl Future<Output = Result<Vec<BankHoliday>, HolidayError>> + Send;
}

/// Fetches holidays from a gov.uk style JSON feed over HTTP.
#[derive(Debug, Clone)]
pub struct GovUkSource {
    client: reqwest::Client,
    url: String,
    division: String,
}

impl GovUkSource {
    /// Creates a source for `division` of the feed at `url`.
    ///
    /// Every request is abandoned after `timeout`, so a feed that never
    /// answers surfaces as an error instead of stalling callers.
    ///
    /// # Errors
    ///
    /// Returns `HolidayError::Http` if the HTTP client cannot be built.
    pub fn new(url: &str, division: &str, timeout: Duration) -> Result<Self, HolidayError> {
        let client: reqwest::Client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.to_string(),
            division: division.to_string(),
        })
    }

    /// Returns the feed URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the division read from the feed.
    #[must_use]
    pub fn division(&self) -> &str {
        &self.division
    }
}

impl HolidaySource for GovUkSource {
    async fn fetch(&self) -> Result<Vec<BankHoliday>, HolidayError> {
        debug!(url = %self.url, division = %self.division, "Fetching bank holidays");

        let response: reqwest::Response = self.client.get(&self.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(HolidayError::Status {
                status: status.as_u16(),
            });
        }

        let body: String = response.text().await?;
        parse_feed(&body, &self.division)
    }
}
