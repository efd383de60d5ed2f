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
//! Profile payload returned by SteamLadder's `v2` profile endpoints.
//!
//! Every leaf is optional: SteamLadder sends `null` for anything it does not know (private
//! profiles, users that have never been updated, ...). Missing keys and `null` objects are
//! accepted too, and read as "unknown".
use getset::{CopyGetters, Getters};
use serde::de::{Deserializer, Error as _, Unexpected};
use serde::Deserialize;
use serde_json::Value;

/* Predicates over optional fields: */

/// A count or rank that is known and not zero.
///
/// SteamLadder uses zero for "not ranked", so it is not shown either.
#[inline]
pub fn nonzero(value: Option<u64>) -> Option<u64> {
    value.filter(|v| *v != 0)
}

/// A string that is known and not empty.
#[inline]
pub fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// A flag that is known to be set.
#[inline]
pub fn is_set(flag: Option<bool>) -> bool {
    flag == Some(true)
}

/* Deserialization helpers: */

/// Reads a `null` object or list as its default (empty) value.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Reads an identifier sent either as a JSON string or as a JSON number.
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::String(val) => Ok(Some(val)),
        Value::Number(val) => Ok(Some(val.to_string())),
        Value::Bool(val) => Err(D::Error::invalid_type(
            Unexpected::Bool(val),
            &"string or number",
        )),
        Value::Array(_) => Err(D::Error::invalid_type(
            Unexpected::Seq,
            &"string or number",
        )),
        Value::Object(_) => Err(D::Error::invalid_type(
            Unexpected::Map,
            &"string or number",
        )),
    }
}

/// Reads a count or rank sent as an integer, a whole float (`12.0`) or a numeric string.
///
/// Any other shape is unknown rather than an error, so one odd field does not hide the profile.
fn lenient_count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let whole = |v: f64| (v.is_finite() && v >= 0.0 && v.fract() == 0.0).then_some(v as u64);

    Ok(match Value::deserialize(deserializer)? {
        Value::Number(val) => val.as_u64().or_else(|| val.as_f64().and_then(whole)),
        Value::String(val) => {
            let val = val.trim();
            val.parse::<u64>()
                .ok()
                .or_else(|| val.parse::<f64>().ok().and_then(whole))
        }
        _ => None,
    })
}

/// Reads an amount sent as a JSON number or as a decimal string (`"12.50"`).
///
/// Any other shape is unknown.
fn lenient_amount<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(val) => val.as_f64(),
        Value::String(val) => val.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|v| v.is_finite()))
}

/* Payload: */

/// Full answer of SteamLadder for one profile.
#[derive(Debug, Clone, Default, Deserialize, Getters)]
#[serde(default)]
#[getset(get = "pub")]
pub struct ProfileResponse {
    #[serde(deserialize_with = "null_as_default")]
    steam: Steam,
    #[serde(deserialize_with = "null_as_default")]
    steamladder: SteamLadder,
}

/// Data SteamLadder mirrors from Steam.
#[derive(Debug, Clone, Default, Deserialize, Getters, CopyGetters)]
#[serde(default)]
pub struct Steam {
    /// SteamID64 of the account.
    #[serde(deserialize_with = "string_or_number")]
    #[getset(get = "pub")]
    id: Option<String>,
    /// Steam display name.
    #[getset(get = "pub")]
    name: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    #[getset(get = "pub")]
    avatar: Avatar,
    #[getset(get_copy = "pub")]
    is_private_profile: Option<bool>,
    #[getset(get_copy = "pub")]
    is_private_games: Option<bool>,
    #[getset(get_copy = "pub")]
    is_private_playtime: Option<bool>,
    #[serde(deserialize_with = "null_as_default")]
    #[getset(get = "pub")]
    extra: Extra,
}

#[derive(Debug, Clone, Default, Deserialize, Getters)]
#[serde(default)]
#[getset(get = "pub")]
pub struct Avatar {
    /// Small avatar, used as the embed's author icon.
    #[serde(rename = "default")]
    icon: Option<String>,
    /// Full size avatar, used as the embed's thumbnail.
    full: Option<String>,
}

/// Location, statistics and bans of a Steam account.
#[derive(Debug, Clone, Default, Deserialize, Getters, CopyGetters)]
#[serde(default)]
pub struct Extra {
    #[getset(get = "pub")]
    country_code: Option<String>,
    #[getset(get = "pub")]
    country_name: Option<String>,
    #[getset(get = "pub")]
    region_name: Option<String>,
    /// Slug of the region in SteamLadder's ladder URLs.
    #[getset(get = "pub")]
    region_url_name: Option<String>,
    /// Steam level.
    #[serde(deserialize_with = "lenient_count")]
    #[getset(get_copy = "pub")]
    level: Option<u64>,
    /// Total playtime, in minutes.
    #[serde(deserialize_with = "lenient_count")]
    #[getset(get_copy = "pub")]
    playtime_min: Option<u64>,
    /// Number of owned games.
    #[serde(deserialize_with = "lenient_count")]
    #[getset(get_copy = "pub")]
    games: Option<u64>,
    /// Most played games, most played first.
    #[serde(deserialize_with = "null_as_default")]
    #[getset(get = "pub")]
    most_played: Vec<PlayedGame>,
    #[getset(get_copy = "pub")]
    community_banned: Option<bool>,
    #[getset(get_copy = "pub")]
    vac_banned: Option<bool>,
    /// Number of game bans.
    #[serde(deserialize_with = "lenient_count")]
    #[getset(get_copy = "pub")]
    game_bans: Option<u64>,
    /// Trade restriction, `"none"` when the account can trade.
    #[getset(get = "pub")]
    economy_ban: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Getters, CopyGetters)]
#[serde(default)]
pub struct PlayedGame {
    /// Steam app ID.
    #[serde(deserialize_with = "string_or_number")]
    #[getset(get = "pub")]
    id: Option<String>,
    #[getset(get = "pub")]
    name: Option<String>,
    #[serde(deserialize_with = "lenient_count")]
    #[getset(get_copy = "pub")]
    playtime_min: Option<u64>,
}

/// Data computed by SteamLadder itself.
#[derive(Debug, Clone, Default, Deserialize, Getters)]
#[serde(default)]
#[getset(get = "pub")]
pub struct SteamLadder {
    #[serde(deserialize_with = "null_as_default")]
    settings: Settings,
    #[serde(deserialize_with = "null_as_default")]
    patreon: Patreon,
    #[serde(deserialize_with = "null_as_default")]
    ranking: Ranking,
    #[serde(deserialize_with = "null_as_default")]
    value: AccountValue,
}

#[derive(Debug, Clone, Default, Deserialize, Getters)]
#[serde(default)]
#[getset(get = "pub")]
pub struct Settings {
    /// Hex colour (e.g. `ff8800`) chosen by the user for their name on SteamLadder.
    custom_name_color: Option<String>,
}

/// Sponsorship of SteamLadder through Patreon.
#[derive(Debug, Clone, Default, Deserialize, Getters, CopyGetters)]
#[serde(default)]
pub struct Patreon {
    #[getset(get_copy = "pub")]
    active: Option<bool>,
    #[getset(get = "pub")]
    tier: Option<String>,
}

/// The ladders a profile is ranked in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Worldwide,
    Regional,
    National,
}

/// The statistics each ladder ranks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stat {
    Xp,
    Playtime,
    Games,
}

impl Stat {
    pub const ALL: [Stat; 3] = [Stat::Xp, Stat::Playtime, Stat::Games];
}

#[derive(Debug, Clone, Default, Deserialize, Getters)]
#[serde(default)]
#[getset(get = "pub")]
pub struct Ranking {
    #[serde(deserialize_with = "null_as_default")]
    worldwide: Ranks,
    #[serde(deserialize_with = "null_as_default")]
    regional: Ranks,
    #[serde(deserialize_with = "null_as_default")]
    national: Ranks,
}

impl Ranking {
    /// Position of the profile in one ladder, if known.
    pub fn rank(&self, scope: Scope, stat: Stat) -> Option<u64> {
        let ranks = match scope {
            Scope::Worldwide => &self.worldwide,
            Scope::Regional => &self.regional,
            Scope::National => &self.national,
        };

        match stat {
            Stat::Xp => ranks.xp,
            Stat::Playtime => ranks.playtime,
            Stat::Games => ranks.games,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize, CopyGetters)]
#[serde(default)]
#[getset(get_copy = "pub")]
pub struct Ranks {
    #[serde(deserialize_with = "lenient_count")]
    xp: Option<u64>,
    #[serde(deserialize_with = "lenient_count")]
    playtime: Option<u64>,
    #[serde(deserialize_with = "lenient_count")]
    games: Option<u64>,
}

/// Estimated value of an account, in US dollars.
#[derive(Debug, Clone, Copy, Default, Deserialize, CopyGetters)]
#[serde(default)]
#[getset(get_copy = "pub")]
pub struct AccountValue {
    /// Value of the Steam level (badges, trading cards).
    #[serde(deserialize_with = "lenient_amount")]
    level: Option<f64>,
    /// Current store value of the owned games.
    #[serde(deserialize_with = "lenient_amount")]
    games_current: Option<f64>,
    /// Value donated to SteamLadder.
    #[serde(deserialize_with = "lenient_amount")]
    donator_value: Option<f64>,
}

impl AccountValue {
    /// Sum of every known value; unknown values count as zero.
    pub fn total(&self) -> f64 {
        self.level.unwrap_or(0.0)
            + self.games_current.unwrap_or(0.0)
            + self.donator_value.unwrap_or(0.0)
    }
}
