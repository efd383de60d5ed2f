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
use regex::Regex;
use serenity::all::UserId;
use std::collections::HashSet;
use std::fmt;
use std::sync::LazyLock;

/// Length of a SteamID64 written in decimal.
pub const STEAM_ID64_LEN: usize = 17;

/// Keyword that, given as the `update` argument of a lookup, asks SteamLadder to refresh the
/// profile.
pub const UPDATE_KEYWORD: &str = "update";

static MENTION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^<@!?(\d+)>$").expect("Failed to compile regex for user mentions.")
});

/// Who a lookup command is about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identity {
    /// A Discord user, looked up through the Discord account linked on SteamLadder.
    DiscordMention(UserId),
    /// A numeric Steam account identifier.
    SteamId64(String),
    /// A custom Steam profile name.
    SteamVanity(String),
}

impl Identity {
    /// Resolves the free-text argument of a lookup command.
    ///
    /// No validation happens here: anything that is neither a mention nor a SteamID64 is sent to
    /// SteamLadder as a vanity name, and SteamLadder decides whether it exists.
    pub fn resolve(argument: Option<&str>, invoker: UserId) -> Identity {
        let Some(argument) = argument.map(str::trim).filter(|arg| !arg.is_empty()) else {
            return Identity::DiscordMention(invoker);
        };

        if let Some(user_id) = parse_mention(argument) {
            return Identity::DiscordMention(user_id);
        }

        if argument.len() == STEAM_ID64_LEN && argument.bytes().all(|b| b.is_ascii_digit()) {
            return Identity::SteamId64(argument.to_string());
        }

        Identity::SteamVanity(argument.to_string())
    }

    /// The string SteamLadder is queried with.
    pub fn lookup(&self) -> String {
        match self {
            Identity::DiscordMention(user_id) => user_id.get().to_string(),
            Identity::SteamId64(id) => id.clone(),
            Identity::SteamVanity(name) => name.clone(),
        }
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identity::DiscordMention(user_id) => write!(f, "<@{}>", user_id),
            Identity::SteamId64(id) => write!(f, "SteamID64 {}", id),
            Identity::SteamVanity(name) => write!(f, "vanity name {}", name),
        }
    }
}

/// Extracts the user ID from a `<@ID>` or `<@!ID>` mention.
fn parse_mention(argument: &str) -> Option<UserId> {
    let captures = MENTION_REGEX.captures(argument)?;
    let id = captures.get(1)?.as_str().parse::<u64>().ok()?;

    // Discord never hands out the zero snowflake, and `UserId::new` rejects it.
    (id != 0).then(|| UserId::new(id))
}

/// Whether a lookup should refresh the profile on SteamLadder first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateRequest {
    /// Send the lookup as a POST, so SteamLadder refreshes the profile.
    pub update: bool,
    /// Ask SteamLadder to skip its refresh cooldown. Only honoured for administrators.
    pub force: bool,
}

impl UpdateRequest {
    /// Interprets the `update` argument of a lookup command for the given invoker.
    ///
    /// A force update is only granted to the users in `admins`; for everyone else, it degrades
    /// to a plain update.
    pub fn resolve(flag: Option<&str>, invoker: UserId, admins: &HashSet<UserId>) -> Self {
        let update = flag
            .map(|flag| flag.trim().eq_ignore_ascii_case(UPDATE_KEYWORD))
            .unwrap_or(false);

        UpdateRequest {
            update,
            force: update && admins.contains(&invoker),
        }
    }
}
