/*
 *  SteamLadder bot - Discord bot for looking up SteamLadder profiles within Discord.
 *  Copyright (C) 2025  Manuel de Castro <manuel@infor.uva.es>
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
pub mod admin;
pub mod info;
pub mod lookup;

use crate::{Context, Data, Error};
use admin::admin;
use info::{github, invite, join, privacy};
use lookup::{profile, rank, status, value};

/**
 * Every command of the bot, registered once at startup.
 */
pub fn all() -> Vec<poise::Command<Data, Error>> {
    vec![sl()]
}

#[poise::command(
    slash_command,
    subcommands(
        "rank", "profile", "value", "status", "admin", "invite", "github", "join", "privacy"
    ),
    description_localized("en-US", "SteamLadder commands."),
    description_localized("es-ES", "Comandos de SteamLadder.")
)]
#[steamladder::log_cmd]
pub async fn sl(ctx: Context<'_>) -> Result<(), Error> {
    // This function will not be executed, as the command has subcommands.
    Ok(())
}
