pub mod blacklist_config;

use blacklist_config::*;
use crate::{FinderContext, Error};

/// Gestiona la blacklist
#[poise::command(slash_command,
    subcommands("add", "remove", "list"),
    guild_only,
    description_localized("en-US", "Manage the blacklist."),
    identifying_name = "Blacklist"
)]
pub async fn blacklist(_ctx: FinderContext<'_>) -> Result<(), Error> {
    Ok(())
}
