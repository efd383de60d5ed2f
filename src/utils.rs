/*
 *  SteamLadder bot - Discord bot for looking up SteamLadder profiles within Discord.
 *  Copyright (C) 2025  Manuel de Castro
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  You should have received a copy of the GNU General Public License
 *  along with this program.  If not, see <https://www.gnu.org/licenses/>.
 */

/**
 * Macro for logging the usage of a command.
 *
 * Inserted at the top of every command by `#[steamladder::log_cmd]`.
 */
macro_rules! log_cmd {
    ($ctx:ident) => {
        tracing::info!(
            command = %$ctx.invocation_string(),
            author_id = %$ctx.author().id,
            author = %$ctx.author().tag(),
            "Executing command"
        );
    };
}
pub(crate) use log_cmd;

/**
 * Formats an amount of dollars with thousands separators and two decimals (e.g. `$1,234.50`).
 *
 * Negative amounts keep their sign in front of the currency symbol.
 */
pub fn format_currency(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };

    format!(
        "{}${}.{:02}",
        sign,
        group_thousands(cents / 100),
        cents % 100
    )
}

/**
 * Inserts a comma every three digits, counting from the right.
 */
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut res = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            res.push(',');
        }
        res.push(c);
    }

    res
}

/**
 * Whole hours in an amount of minutes (rounded down).
 */
#[inline]
pub fn minutes_to_hours(minutes: u64) -> u64 {
    minutes / 60
}
