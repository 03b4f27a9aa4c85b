// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::clock::{Clock, SystemClock};
use crate::error::HolidayError;
use crate::source::HolidaySource;
use leavelink_domain::BankHoliday;
use time::{Duration, OffsetDateTime};
use tokio::sync::Mutex;
use tracing::{info, warn};

#[derive(Debug, Clone)]
struct CachedHolidays {
    holidays: Vec<BankHoliday>,
    fetched_at: OffsetDateTime,
}

/// Time-limited cache in front of a [`HolidaySource`].
///
/// Holidays are refetched once the cached copy is older than the TTL. When
/// a refetch fails and an older copy exists, the older copy is served.
/// Concurrent callers share one refresh.
#[derive(Debug)]
pub struct BankHolidayCache<S, C = SystemClock> {
    source: S,
    clock: C,
    ttl: Duration,
    entry: Mutex<Option<CachedHolidays>>,
}

impl<S: HolidaySource> BankHolidayCache<S> {
    /// Creates a cache using the system clock.
    #[must_use]
    pub const fn new(source: S, ttl: Duration) -> Self {
        Self::with_clock(source, SystemClock, ttl)
    }
}

impl<S: HolidaySource, C: Clock> BankHolidayCache<S, C> {
    /// Creates a cache reading the time from `clock`.
    #[must_use]
    pub const fn with_clock(source: S, clock: C, ttl: Duration) -> Self {
        Self {
            source,
            clock,
            ttl,
            entry: Mutex::const_new(None),
        }
    }

    /// Returns the cached time-to-live.
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the holidays, fetching them when missing or expired.
    ///
    /// # Errors
    ///
    /// Returns the source's error when the fetch fails and nothing was
    /// cached before.
    pub async fn get(&self) -> Result<Vec<BankHoliday>, HolidayError> {
        let mut entry = self.entry.lock().await;
        let now: OffsetDateTime = self.clock.now();

        if let Some(cached) = entry.as_ref().filter(|c| now - c.fetched_at < self.ttl) {
            return Ok(cached.holidays.clone());
        }

        match self.source.fetch().await {
            Ok(holidays) => {
                info!(count = holidays.len(), "Refreshed bank holidays");
                *entry = Some(CachedHolidays {
                    holidays: holidays.clone(),
                    fetched_at: now,
                });
                Ok(holidays)
            }
            Err(err) => match entry.as_ref() {
                Some(stale) => {
                    warn!(
                        error = %err,
                        fetched_at = %stale.fetched_at,
                        "Bank holiday refresh failed, serving stale copy"
                    );
                    Ok(stale.holidays.clone())
                }
                None => Err(err),
            },
        }
    }

    /// Drops the cached copy so the next [`get`](Self::get) refetches.
    pub async fn invalidate(&self) {
        *self.entry.lock().await = None;
    }
}
