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
//! Rendering of SteamLadder profiles as Discord embeds.
//!
//! Every view starts from the same base card (name, avatar, location, colour), and then one of the
//! extension functions appends its own fields. Rendering is pure: the resulting [`View`] is only
//! turned into a serenity embed when replying.
use crate::profile::{is_set, non_empty, nonzero, ProfileResponse, Scope, Stat};
use crate::utils::{format_currency, group_thousands, minutes_to_hours};
use getset::{CopyGetters, Getters};
use poise::serenity_prelude::{Colour, CreateEmbed, CreateEmbedAuthor, CreateEmbedFooter};

/// Accent colour for profiles without a custom name colour.
pub const DEFAULT_COLOUR: u32 = 0x5E70E4;
pub const STEAMLADDER_URL: &str = "https://steamladder.com";

const PRIVATE: &str = ":lock: Private";
const PUBLIC: &str = ":green_circle: Public";
const UNKNOWN: &str = "Unknown";

pub const VALUE_FOOTER: &str =
    "Values are estimates based on current Steam store prices, not on what was actually paid.";

/// One named field of an embed.
#[derive(Debug, Clone, PartialEq, Eq, Getters, CopyGetters)]
pub struct EmbedField {
    #[getset(get = "pub")]
    name: String,
    #[getset(get = "pub")]
    value: String,
    #[getset(get_copy = "pub")]
    inline: bool,
}

/// A rendered profile, ready to be sent as an embed.
#[derive(Debug, Clone, PartialEq, Getters, CopyGetters)]
pub struct View {
    #[getset(get = "pub")]
    author_name: String,
    #[getset(get = "pub")]
    author_url: Option<String>,
    #[getset(get = "pub")]
    author_icon: Option<String>,
    #[getset(get = "pub")]
    thumbnail: Option<String>,
    #[getset(get = "pub")]
    description: Option<String>,
    #[getset(get_copy = "pub")]
    colour: u32,
    #[getset(get = "pub")]
    fields: Vec<EmbedField>,
    #[getset(get = "pub")]
    footer: Option<String>,
}

impl View {
    fn add_field(&mut self, name: impl Into<String>, value: impl Into<String>, inline: bool) {
        self.fields.push(EmbedField {
            name: name.into(),
            value: value.into(),
            inline,
        });
    }

    /// Value of the first field with the given name.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.value.as_str())
    }
}

impl From<View> for CreateEmbed {
    fn from(view: View) -> CreateEmbed {
        let mut author = CreateEmbedAuthor::new(view.author_name);
        if let Some(url) = view.author_url {
            author = author.url(url);
        }
        if let Some(icon) = view.author_icon {
            author = author.icon_url(icon);
        }

        let mut embed = CreateEmbed::new()
            .author(author)
            .colour(Colour::new(view.colour))
            .fields(
                view.fields
                    .into_iter()
                    .map(|f| (f.name, f.value, f.inline)),
            );
        if let Some(thumbnail) = view.thumbnail {
            embed = embed.thumbnail(thumbnail);
        }
        if let Some(description) = view.description {
            embed = embed.description(description);
        }
        if let Some(footer) = view.footer {
            embed = embed.footer(CreateEmbedFooter::new(footer));
        }

        embed
    }
}

/// The lookups the bot offers, one per command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Rank,
    Profile,
    Value,
    Status,
}

impl ViewKind {
    /// Renders the base card extended with this kind's fields.
    pub fn render(self, profile: &ProfileResponse) -> View {
        let base = base_view(profile);
        match self {
            ViewKind::Rank => rank_view(base, profile),
            ViewKind::Profile => profile_view(base, profile),
            ViewKind::Value => value_view(base, profile),
            ViewKind::Status => status_view(base, profile),
        }
    }
}

/* Base card: */

/// Card shared by every lookup: who the profile belongs to, where they are, and their colour.
pub fn base_view(profile: &ProfileResponse) -> View {
    let steam = profile.steam();
    let extra = steam.extra();

    let description = non_empty(extra.country_code()).map(|country_code| {
        let country_code = country_code.to_lowercase();
        format!(
            ":flag_{cc}: [{country}]({url}/ladder/xp/{cc}), [{region}]({url}/ladder/xp/{region_slug})",
            cc = country_code,
            country = extra.country_name().as_deref().unwrap_or(UNKNOWN),
            region = extra.region_name().as_deref().unwrap_or(UNKNOWN),
            region_slug = extra.region_url_name().as_deref().unwrap_or_default(),
            url = STEAMLADDER_URL,
        )
    });

    let author_name = non_empty(steam.name())
        .or(non_empty(steam.id()))
        .unwrap_or(UNKNOWN)
        .to_string();

    let mut view = View {
        author_name,
        author_url: non_empty(steam.id()).map(|id| format!("{}/profile/{}", STEAMLADDER_URL, id)),
        author_icon: steam.avatar().icon().clone(),
        thumbnail: steam.avatar().full().clone(),
        description,
        colour: name_colour(profile.steamladder().settings().custom_name_color()),
        fields: Vec::new(),
        footer: None,
    };

    let patreon = profile.steamladder().patreon();
    if is_set(patreon.active()) {
        view.add_field("Patron", patron_badge(patreon.tier().as_deref()), true);
    }

    if is_set(steam.is_private_profile()) {
        view.add_field("Profile status", PRIVATE, false);
    }

    view
}

/// Parses a custom name colour (`ff8800` or `#ff8800`), falling back to the default colour.
fn name_colour(custom: &Option<String>) -> u32 {
    let Some(custom) = non_empty(custom) else {
        return DEFAULT_COLOUR;
    };

    match u32::from_str_radix(custom.trim_start_matches('#'), 16) {
        Ok(colour) if colour <= 0xFFFFFF => colour,
        _ => {
            tracing::warn!(colour = custom, "Ignoring invalid custom name colour");
            DEFAULT_COLOUR
        }
    }
}

/// Decoration for SteamLadder's Patreon supporters, by tier.
fn patron_badge(tier: Option<&str>) -> String {
    let Some(tier) = tier.filter(|t| !t.is_empty()) else {
        return ":heart: Patron".to_string();
    };

    let emoji = match tier.to_lowercase().as_str() {
        "bronze" => ":third_place:",
        "silver" => ":second_place:",
        "gold" => ":first_place:",
        "platinum" | "diamond" => ":gem:",
        _ => ":heart:",
    };

    format!("{} {} patron", emoji, tier)
}

/* Extensions: */

fn stat_label(stat: Stat) -> &'static str {
    match stat {
        Stat::Xp => "Level",
        Stat::Playtime => "Playtime",
        Stat::Games => "Games",
    }
}

/// Worldwide, regional and national positions for every ranked statistic.
///
/// Regional and national positions are only listed under a worldwide position.
pub fn rank_view(mut view: View, profile: &ProfileResponse) -> View {
    let ranking = profile.steamladder().ranking();

    view.add_field(
        "W / R / N",
        "**W**orldwide, **R**egional, **N**ational",
        false,
    );

    for stat in Stat::ALL {
        let label = stat_label(stat);

        let Some(worldwide) = nonzero(ranking.rank(Scope::Worldwide, stat)) else {
            continue;
        };
        view.add_field(format!("{} (W)", label), group_thousands(worldwide), true);

        if let Some(regional) = nonzero(ranking.rank(Scope::Regional, stat)) {
            view.add_field(format!("{} (R)", label), group_thousands(regional), true);
        }
        if let Some(national) = nonzero(ranking.rank(Scope::National, stat)) {
            view.add_field(format!("{} (N)", label), group_thousands(national), true);
        }
    }

    view
}

/// Summary of the account: level, playtime, games, worldwide ranks and most played game.
pub fn profile_view(mut view: View, profile: &ProfileResponse) -> View {
    let extra = profile.steam().extra();
    let ranking = profile.steamladder().ranking();

    if let Some(level) = nonzero(extra.level()) {
        view.add_field("Level", level.to_string(), true);
    }

    match nonzero(extra.playtime_min()) {
        Some(minutes) => view.add_field(
            "Playtime",
            format!("{}h", group_thousands(minutes_to_hours(minutes))),
            true,
        ),
        None => view.add_field("Playtime", PRIVATE, true),
    }

    match nonzero(extra.games()) {
        Some(games) => view.add_field("Games", group_thousands(games), true),
        None => view.add_field("Games", PRIVATE, true),
    }

    // The three worldwide ranks are listed together, whenever the level rank is known.
    if nonzero(ranking.rank(Scope::Worldwide, Stat::Xp)).is_some() {
        for stat in Stat::ALL {
            let rank = ranking
                .rank(Scope::Worldwide, stat)
                .map(group_thousands)
                .unwrap_or_else(|| "-".to_string());
            view.add_field(format!("{} rank", stat_label(stat)), rank, true);
        }
    }

    if let Some(game) = extra.most_played().first() {
        let name = game.name().as_deref().unwrap_or(UNKNOWN);
        let hours = group_thousands(minutes_to_hours(game.playtime_min().unwrap_or(0)));
        let value = match non_empty(game.id()) {
            Some(id) => format!(
                "[{}]({}/ladder/playtime/{}) ({}h)",
                name, STEAMLADDER_URL, id, hours
            ),
            None => format!("{} ({}h)", name, hours),
        };
        view.add_field("Most played game", value, false);
    }

    view
}

/// Amount rounded to whole cents, as it is displayed.
fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Estimated account value, split in level, games and donations.
pub fn value_view(mut view: View, profile: &ProfileResponse) -> View {
    let value = profile.steamladder().value();
    let total = round_cents(value.total());

    if total > 0.0 {
        view.add_field("Total value", format_currency(total), false);

        if let Some(level) = value.level().filter(|v| round_cents(*v) != 0.0) {
            view.add_field("Level value", format_currency(level), true);
        }
        if let Some(games) = value.games_current().filter(|v| round_cents(*v) != 0.0) {
            view.add_field("Games value", format_currency(games), true);
        }
        view.add_field(
            "Donator value",
            format_currency(value.donator_value().unwrap_or(0.0)),
            true,
        );
    } else {
        view.add_field(
            "Value",
            "No value has been calculated for this profile yet. \
            Try again with `update` to request an update of the profile.",
            false,
        );
    }

    view.footer = Some(VALUE_FOOTER.to_string());

    view
}

fn visibility(private: Option<bool>) -> &'static str {
    match private {
        Some(true) => PRIVATE,
        Some(false) => PUBLIC,
        None => UNKNOWN,
    }
}

fn ban_flag(banned: Option<bool>) -> &'static str {
    match banned {
        Some(true) => ":no_entry: Banned",
        Some(false) => ":white_check_mark: Not banned",
        None => UNKNOWN,
    }
}

/// Visibility of the profile and its bans.
pub fn status_view(mut view: View, profile: &ProfileResponse) -> View {
    let steam = profile.steam();
    let extra = steam.extra();

    view.add_field("Profile", visibility(steam.is_private_profile()), true);
    view.add_field("Games", visibility(steam.is_private_games()), true);
    view.add_field("Playtime", visibility(steam.is_private_playtime()), true);

    view.add_field("Community ban", ban_flag(extra.community_banned()), true);
    view.add_field("VAC ban", ban_flag(extra.vac_banned()), true);

    let game_bans = match extra.game_bans() {
        Some(0) => ":white_check_mark: Not banned".to_string(),
        Some(count) => format!(":no_entry: {}", count),
        None => UNKNOWN.to_string(),
    };
    view.add_field("Game bans", game_bans, true);

    let trade_status = match extra.economy_ban().as_deref() {
        Some("none") => ":white_check_mark: Tradable".to_string(),
        Some(restriction) => format!(":no_entry: {}", restriction),
        None => UNKNOWN.to_string(),
    };
    view.add_field("Trade status", trade_status, true);

    view
}
