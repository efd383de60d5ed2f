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

pub const INVITE_URL: &str = "https://steamladder.com/bot/";
pub const GITHUB_URL: &str = "https://github.com/bommels/SteamLadderBot";
pub const DISCORD_URL: &str = "https://discord.gg/C4pdK7Z";
pub const PRIVACY_URL: &str = "https://steamladder.com/support/privacy";

#[poise::command(
    slash_command,
    description_localized("en-US", "Add this bot to your server."),
    description_localized("es-ES", "Añadir este bot a tu servidor.")
)]
#[steamladder::log_cmd]
pub async fn invite(ctx: Context<'_>) -> Result<(), Error> {
    ctx.say(format!("Add me to your server: <{}>", INVITE_URL))
        .await?;

    Ok(())
}

#[poise::command(
    slash_command,
    description_localized("en-US", "Get the bot's source code repository."),
    description_localized("es-ES", "Obtener el repositorio del código fuente del bot.")
)]
#[steamladder::log_cmd]
pub async fn github(ctx: Context<'_>) -> Result<(), Error> {
    ctx.say(format!("View code on GitHub: <{}>", GITHUB_URL))
        .await?;

    Ok(())
}

#[poise::command(
    slash_command,
    description_localized("en-US", "Join the SteamLadder Discord server."),
    description_localized("es-ES", "Unirse al servidor de Discord de SteamLadder.")
)]
#[steamladder::log_cmd]
pub async fn join(ctx: Context<'_>) -> Result<(), Error> {
    // No angle brackets, so Discord shows the server invite card.
    ctx.say(format!("Join the Steam Ladder server: {}", DISCORD_URL))
        .await?;

    Ok(())
}

#[poise::command(
    slash_command,
    description_localized("en-US", "Get the URL of SteamLadder's privacy policy."),
    description_localized("es-ES", "Obtener la URL de la política de privacidad de SteamLadder.")
)]
#[steamladder::log_cmd]
pub async fn privacy(ctx: Context<'_>) -> Result<(), Error> {
    ctx.say(format!("View our Privacy Policy: <{}>", PRIVACY_URL))
        .await?;

    Ok(())
}
