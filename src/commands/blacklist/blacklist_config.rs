use tracing::{error, info};
use crate::{FinderContext, Error};
use crate::commands::authorization::require_privileged;
use crate::commands::dispatch::Services;
use crate::commands::run;
use crate::models::invocation::{BlacklistAction, Invocation, Invoker};
use crate::models::reply::Reply;
use crate::services::record_store::BlacklistChange;

/// Añade un usuario a la blacklist
#[poise::command(
    slash_command,
    guild_only,
    description_localized("en-US", "Add a user to the blacklist.")
)]
pub async fn add(
    ctx: FinderContext<'_>,
    #[description = "ID de Discord a añadir"] id: String)
-> Result<(), Error> {
    run(ctx, Invocation::Blacklist(BlacklistAction::Add { id })).await
}

/// Quita un usuario de la blacklist
#[poise::command(
    slash_command,
    guild_only,
    description_localized("en-US", "Remove a user from the blacklist.")
)]
pub async fn remove(
    ctx: FinderContext<'_>,
    #[description = "ID de Discord a eliminar"] id: String)
-> Result<(), Error> {
    run(ctx, Invocation::Blacklist(BlacklistAction::Remove { id })).await
}

/// Muestra la lista de usuarios blacklisteados
#[poise::command(
    slash_command,
    guild_only,
    description_localized("en-US", "List blacklisted users.")
)]
pub async fn list(ctx: FinderContext<'_>) -> Result<(), Error> {
    run(ctx, Invocation::Blacklist(BlacklistAction::List)).await
}

pub(crate) async fn manage(services: &Services<'_>, invoker: &Invoker, action: BlacklistAction) -> Reply {
    if let Some(denied) = require_privileged(services, invoker, "❌ No tienes permisos.").await {
        return denied;
    }

    match action {
        BlacklistAction::Add { id } => add_code(services, invoker, &id).await,
        BlacklistAction::Remove { id } => remove_code(services, invoker, &id).await,
        BlacklistAction::List => list_code(services).await
    }
}

async fn add_code(services: &Services<'_>, invoker: &Invoker, id: &str) -> Reply {
    match services.store.add_blacklisted(id).await {
        Ok(BlacklistChange::Unchanged) => Reply::private("Ya está en la blacklist."),
        Ok(BlacklistChange::Applied) => {
            info!("{} blacklisted {}", invoker.id, id);
            if let Err(ex) = services.guild.set_blacklist_role(id, true).await {
                error!("Failed to assign blacklist role to {}: {}", id, ex);
            }
            Reply::public(format!("✅ Usuario {id} añadido a la blacklist y rol asignado (si está en el servidor)."))
        }
        Err(ex) => {
            error!("Failed to save blacklist: {}", ex);
            Reply::private("❌ No se pudo guardar la blacklist.")
        }
    }
}

async fn remove_code(services: &Services<'_>, invoker: &Invoker, id: &str) -> Reply {
    match services.store.remove_blacklisted(id).await {
        Ok(BlacklistChange::Unchanged) => Reply::private("No está en la blacklist."),
        Ok(BlacklistChange::Applied) => {
            info!("{} removed {} from the blacklist", invoker.id, id);
            if let Err(ex) = services.guild.set_blacklist_role(id, false).await {
                error!("Failed to remove blacklist role from {}: {}", id, ex);
            }
            Reply::public(format!("✅ Usuario {id} eliminado de la blacklist y rol quitado (si está en el servidor)."))
        }
        Err(ex) => {
            error!("Failed to save blacklist: {}", ex);
            Reply::private("❌ No se pudo guardar la blacklist.")
        }
    }
}

async fn list_code(services: &Services<'_>) -> Reply {
    let entries = services.store.blacklisted().await;

    if entries.is_empty() {
        Reply::public("📭 La blacklist está vacía.")
    } else {
        Reply::public(format!("📛 Lista de usuarios en blacklist:\n```\n{}\n```", entries.join("\n")))
    }
}
