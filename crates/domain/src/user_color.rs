// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Stable legend colours for people in the calendar.

use crate::types::UserId;

/// Palette readable on light and dark backgrounds.
pub const USER_COLORS: [&str; 8] = [
    "#059669", // emerald-600
    "#2563eb", // blue-600
    "#7c3aed", // violet-600
    "#c026d3", // fuchsia-600
    "#dc2626", // red-600
    "#ea580c", // orange-600
    "#ca8a04", // yellow-600
    "#0891b2", // cyan-600
];

/// Returns the palette index for a user id.
///
/// The hash is `h = h * 31 + unit` over the UTF-16 code units of the id,
/// wrapping at 32 bits.
#[must_use]
pub fn user_color_index(user_id: &UserId) -> usize {
    let hash: i32 = user_id
        .as_str()
        .encode_utf16()
        .fold(0_i32, |h, unit| {
            h.wrapping_shl(5)
                .wrapping_sub(h)
                .wrapping_add(i32::from(unit))
        });
    usize::try_from(hash.unsigned_abs()).unwrap_or_default() % USER_COLORS.len()
}

/// Returns the legend colour for a user id.
#[must_use]
pub fn user_color(user_id: &UserId) -> &'static str {
    USER_COLORS[user_color_index(user_id)]
}
