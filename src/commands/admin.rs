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
use crate::{Context, Error};

/// Number of guilds listed by `admin guilds`.
const LISTED_GUILDS: usize = 10;

/**
 * Builds the reply of `admin guilds`: how many guilds the bot is in, and the largest ones.
 */
pub fn guilds_summary(mut guilds: Vec<(String, u64)>) -> String {
    guilds.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    let header = format!("I am in {} servers!", guilds.len());
    if guilds.is_empty() {
        return header;
    }

    let list = guilds
        .iter()
        .take(LISTED_GUILDS)
        .map(|(name, members)| format!("{} | Members: {}", name, members))
        .collect::<Vec<_>>()
        .join("\n");

    format!("{}\n```\n{}\n```", header, list)
}

#[poise::command(
    slash_command,
    ephemeral,
    description_localized("en-US", "Administrator commands."),
    description_localized("es-ES", "Comandos de administración.")
)]
#[steamladder::log_cmd]
pub async fn admin(
    ctx: Context<'_>,
    #[description = "Administrator command to run (e.g. `guilds`)."] command: String,
) -> Result<(), Error> {
    if !ctx.data().is_admin(ctx.author().id) {
        tracing::warn!(
            author_id = %ctx.author().id,
            command = %command,
            "Ignoring admin command from a non-admin user"
        );
        return Ok(());
    }

    match command.trim() {
        "guilds" => {
            // Cache references must be released before awaiting:
            let guilds = {
                let cache = ctx.cache();
                cache
                    .guilds()
                    .into_iter()
                    .filter_map(|gid| {
                        cache
                            .guild(gid)
                            .map(|g| (g.name.clone(), g.member_count))
                    })
                    .collect::<Vec<_>>()
            };

            ctx.say(guilds_summary(guilds)).await?;
        }
        other => {
            ctx.say(format!("Unknown admin command `{}`.", other))
                .await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guilds_summary_sorted_by_members() {
        let reply = guilds_summary(vec![
            ("Small".to_string(), 10),
            ("Big".to_string(), 5000),
            ("Medium".to_string(), 300),
        ]);

        assert_eq!(
            reply,
            "I am in 3 servers!\n```\nBig | Members: 5000\nMedium | Members: 300\nSmall | Members: 10\n```"
        );
    }

    #[test]
    fn test_guilds_summary_lists_largest_only() {
        let guilds = (0..25u64).map(|i| (format!("g{}", i), i)).collect();
        let reply = guilds_summary(guilds);

        assert!(reply.starts_with("I am in 25 servers!"));
        assert_eq!(reply.matches("| Members:").count(), LISTED_GUILDS);
        assert!(reply.contains("g24 | Members: 24"));
        assert!(!reply.contains("g14 | Members: 14"));
    }

    #[test]
    fn test_guilds_summary_empty() {
        assert_eq!(guilds_summary(Vec::new()), "I am in 0 servers!");
    }
}
