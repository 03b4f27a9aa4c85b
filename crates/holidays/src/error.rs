// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use thiserror::Error;

/// Errors raised while fetching or parsing bank holidays.
#[derive(Debug, Error)]
pub enum HolidayError {
    /// The request could not be sent or its body could not be read.
    #[error("Failed to fetch bank holidays: {0}")]
    Http(#[from] reqwest::Error),
    /// The feed answered with a non-success status.
    #[error("Bank holiday feed returned HTTP {status}")]
    Status {
        /// The HTTP status code.
        status: u16,
    },
    /// The feed body is not the expected JSON.
    #[error("Malformed bank holiday feed: {0}")]
    Parse(#[from] serde_json::Error),
    /// The feed has no entry for the requested division.
    #[error("Bank holidays data not found for division '{0}'")]
    DivisionNotFound(String),
    /// A holiday in the feed has an unreadable date.
    #[error("Invalid bank holiday date '{date}': {error}")]
    InvalidDate {
        /// The raw date string.
        date: String,
        /// The parser's message.
        error: String,
    },
}
