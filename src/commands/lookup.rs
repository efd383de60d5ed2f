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
use crate::api::ApiError;
use crate::query::{Identity, UpdateRequest};
use crate::render::{View, ViewKind};
use crate::{Context, Data, Error};
use poise::serenity_prelude::UserId;
use poise::CreateReply;

/**
 * Resolves the arguments of a lookup command, fetches the profile from SteamLadder, and renders
 * the requested view of it.
 */
pub async fn run_lookup(
    data: &Data,
    invoker: UserId,
    query: Option<&str>,
    update: Option<&str>,
    kind: ViewKind,
) -> Result<View, ApiError> {
    let identity = Identity::resolve(query, invoker);
    let update = UpdateRequest::resolve(update, invoker, data.admins());
    tracing::debug!(%identity, ?update, ?kind, "Resolved lookup");

    let profile = data.api().fetch_profile(&identity, update).await?;

    Ok(kind.render(&profile))
}

/**
 * Runs a lookup on behalf of the command's author, and replies with the embed, or with the error
 * message if the lookup failed.
 */
async fn reply_lookup(
    ctx: Context<'_>,
    query: Option<String>,
    update: Option<String>,
    kind: ViewKind,
) -> Result<(), Error> {
    // SteamLadder may take a while to answer, specially for updates:
    ctx.defer_ephemeral().await?;

    let res = run_lookup(
        ctx.data(),
        ctx.author().id,
        query.as_deref(),
        update.as_deref(),
        kind,
    )
    .await;

    match res {
        Ok(view) => {
            ctx.send(CreateReply::default().embed(view.into())).await?;
        }
        Err(e) => {
            tracing::info!(error = %e, ?kind, "Lookup failed");
            ctx.say(e.to_string()).await?;
        }
    }

    Ok(())
}

#[poise::command(
    slash_command,
    ephemeral,
    description_localized("en-US", "Get the worldwide, regional and national ranks of a user."),
    description_localized("es-ES", "Obtener los rankings mundial, regional y nacional de un usuario.")
)]
#[steamladder::log_cmd]
pub async fn rank(
    ctx: Context<'_>,
    #[description = "Discord mention, SteamID64 or Steam custom URL name. Yourself by default."]
    query: Option<String>,
    #[description = "Type `update` to refresh the profile on SteamLadder first."]
    update: Option<String>,
) -> Result<(), Error> {
    reply_lookup(ctx, query, update, ViewKind::Rank).await
}

#[poise::command(
    slash_command,
    ephemeral,
    description_localized("en-US", "View a profile summary of a user."),
    description_localized("es-ES", "Ver un resumen del perfil de un usuario.")
)]
#[steamladder::log_cmd]
pub async fn profile(
    ctx: Context<'_>,
    #[description = "Discord mention, SteamID64 or Steam custom URL name. Yourself by default."]
    query: Option<String>,
    #[description = "Type `update` to refresh the profile on SteamLadder first."]
    update: Option<String>,
) -> Result<(), Error> {
    reply_lookup(ctx, query, update, ViewKind::Profile).await
}

#[poise::command(
    slash_command,
    ephemeral,
    description_localized("en-US", "View the value of a user's Steam account."),
    description_localized("es-ES", "Ver el valor de la cuenta de Steam de un usuario.")
)]
#[steamladder::log_cmd]
pub async fn value(
    ctx: Context<'_>,
    #[description = "Discord mention, SteamID64 or Steam custom URL name. Yourself by default."]
    query: Option<String>,
    #[description = "Type `update` to refresh the profile on SteamLadder first."]
    update: Option<String>,
) -> Result<(), Error> {
    reply_lookup(ctx, query, update, ViewKind::Value).await
}

#[poise::command(
    slash_command,
    ephemeral,
    description_localized("en-US", "View the privacy settings and bans of a user."),
    description_localized("es-ES", "Ver la privacidad y los baneos de un usuario.")
)]
#[steamladder::log_cmd]
pub async fn status(
    ctx: Context<'_>,
    #[description = "Discord mention, SteamID64 or Steam custom URL name. Yourself by default."]
    query: Option<String>,
    #[description = "Type `update` to refresh the profile on SteamLadder first."]
    update: Option<String>,
) -> Result<(), Error> {
    reply_lookup(ctx, query, update, ViewKind::Status).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::SteamLadderClient;
    use httpmock::prelude::*;
    use std::collections::HashSet;
    use std::time::Duration;

    const INVOKER: u64 = 4242;
    const ADMIN: u64 = 1;

    fn data(server: &MockServer) -> Data {
        let api = SteamLadderClient::new(&server.base_url(), "token", Duration::from_secs(5))
            .unwrap();
        Data::new(api, HashSet::from([UserId::new(ADMIN)]))
    }

    #[tokio::test]
    async fn test_defaults_to_invoker() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/v2/discord/4242/");
                then.status(200)
                    .body(r#"{"steam": {"name": "Me", "extra": {"level": 5}}}"#);
            })
            .await;

        let view = run_lookup(
            &data(&server),
            UserId::new(INVOKER),
            None,
            None,
            ViewKind::Profile,
        )
        .await
        .unwrap();

        assert_eq!(view.author_name(), "Me");
        assert_eq!(view.field("Level"), Some("5"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_not_found_reply() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.path("/v2/steam/nobody/");
                then.status(404).body("{}");
            })
            .await;

        let err = run_lookup(
            &data(&server),
            UserId::new(INVOKER),
            Some("nobody"),
            None,
            ViewKind::Rank,
        )
        .await
        .unwrap_err();

        assert_eq!(err.to_string(), "Profile not found.");
    }

    #[tokio::test]
    async fn test_non_admin_update_is_not_forced() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/v2/profile/76561198025095947/")
                    .query_param("force", "false");
                then.status(200).body("{}");
            })
            .await;

        run_lookup(
            &data(&server),
            UserId::new(INVOKER),
            Some("76561198025095947"),
            Some("update"),
            ViewKind::Value,
        )
        .await
        .unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_admin_update_is_forced() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/v2/discord/777/")
                    .query_param("force", "true");
                then.status(200).body("{}");
            })
            .await;

        run_lookup(
            &data(&server),
            UserId::new(ADMIN),
            Some("<@!777>"),
            Some("update"),
            ViewKind::Status,
        )
        .await
        .unwrap();

        mock.assert_async().await;
    }
}
