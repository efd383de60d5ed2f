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
mod api;
mod commands;
mod config;
mod profile;
mod query;
mod render;
mod utils;

use crate::api::SteamLadderClient;
use crate::config::BotConfig;
use getset::Getters;
use poise::serenity_prelude as serenity;
use serenity::UserId;
use std::collections::HashSet;

/* Poise-required data types: */

type Error = Box<dyn std::error::Error + Send + Sync>;
type Context<'a> = poise::Context<'a, Data, Error>;

/**
 * Application context, built once at startup and shared (read-only) by every command.
 */
#[derive(Getters)]
pub struct Data {
    /// Client for SteamLadder's API.
    #[getset(get = "pub")]
    api: SteamLadderClient,
    /// Users allowed to force profile updates and run admin commands.
    #[getset(get = "pub")]
    admins: HashSet<UserId>,
}

impl Data {
    pub fn new(api: SteamLadderClient, admins: HashSet<UserId>) -> Self {
        Self { api, admins }
    }

    pub fn is_admin(&self, user: UserId) -> bool {
        self.admins.contains(&user)
    }
}

async fn event_handler(
    ctx: &serenity::Context,
    event: &serenity::FullEvent,
    _framework: poise::FrameworkContext<'_, Data, Error>,
    _data: &Data,
) -> Result<(), Error> {
    match event {
        // Ready (bot is started):
        serenity::FullEvent::Ready { data_about_bot, .. } => {
            tracing::info!(
                user = %data_about_bot.user.tag(),
                guilds = data_about_bot.guilds.len(),
                "Bot is connected"
            );

            ctx.set_presence(
                Some(serenity::ActivityData::watching("/sl profile")),
                serenity::OnlineStatus::Online,
            );
        }
        // Guild create (the bot joins a new server):
        serenity::FullEvent::GuildCreate { guild, is_new } => {
            if *is_new == Some(true) {
                tracing::info!(guild = %guild.name, guild_id = %guild.id, "Joined a new guild");
            }
        }
        _ => {}
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = BotConfig::load().inspect_err(|e| {
        tracing::error!(error = %e, "Invalid configuration");
    })?;

    // Both tokens are checked to be present while loading the configuration.
    let token = config.discord_token.clone().unwrap_or_default();
    let api = SteamLadderClient::new(
        &config.api_url,
        config.steamladder_token.as_deref().unwrap_or_default(),
        config.timeout(),
    )?;
    let admins = config.admin_ids.clone();

    tracing::info!(
        api_url = %config.api_url,
        admins = admins.len(),
        timeout_s = config.timeout_s,
        "Configuration loaded"
    );

    let intents = serenity::GatewayIntents::non_privileged();

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: commands::all(),
            event_handler: |ctx, event, framework, data| {
                Box::pin(event_handler(ctx, event, framework, data))
            },
            ..Default::default()
        })
        .setup(|ctx, _ready, framework| {
            Box::pin(async move {
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                tracing::info!("Commands registered");
                Ok(Data::new(api, admins))
            })
        })
        .build();

    let mut client = serenity::Client::builder(token, intents)
        .framework(framework) // For command handling, using poise.
        .await?;

    client.start().await?;

    Ok(())
}
