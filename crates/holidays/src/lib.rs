// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

//! Public bank holidays for LeaveLink.
//!
//! Holidays come from a [`HolidaySource`] (the gov.uk feed in production)
//! and are served through a [`BankHolidayCache`] that refetches once its
//! time-to-live has passed.

mod cache;
mod clock;
mod error;
mod feed;
mod source;

pub use cache::BankHolidayCache;
pub use clock::{Clock, SystemClock};
pub use error::HolidayError;
pub use feed::parse_feed;
pub use source::{
    DEFAULT_DIVISION, DEFAULT_FEED_URL, DEFAULT_FETCH_TIMEOUT, GovUkSource, HolidaySource,
};
