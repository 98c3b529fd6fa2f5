use std::time::Duration;
use serenity::{
    client::Context,
    model::{
        gateway::Activity,
        id::{GuildId, UserId},
        user::OnlineStatus
    }
};
use tokio::time;
use tracing::{debug, error};
use crate::Error;

const PAGE_SIZE: u64 = 1000;
const CACHE_ATTEMPTS: u32 = 15;
const CACHE_RETRY: Duration = Duration::from_secs(2);

/// One member, reduced to what the counter cares about.
#[derive(Debug, Clone, Copy)]
pub struct PresenceSample {
    pub bot: bool,
    /// `None` when the gateway never sent a presence, which Discord does for offline members.
    pub status: Option<OnlineStatus>
}

pub fn count_connected(samples: impl IntoIterator<Item = PresenceSample>) -> usize {
    samples.into_iter()
        .filter(|o| !o.bot)
        .filter(|o| matches!(o.status, Some(status) if status != OnlineStatus::Offline && status != OnlineStatus::Invisible))
        .count()
}

pub fn status_text(count: usize) -> String {
    format!("{count} usuarios conectados")
}

async fn connected_members(ctx: &Context, guild_id: GuildId) -> Result<usize, Error> {
    let presences = ctx.cache.guild_field(guild_id, |g| g.presences.clone())
        .ok_or("guild is not in the cache yet")?;

    let mut samples = vec![];
    let mut after: Option<UserId> = None;
    loop {
        let page = guild_id.members(&ctx.http, Some(PAGE_SIZE), after).await?;
        let full_page = page.len() as u64 == PAGE_SIZE;
        after = page.last().map(|o| o.user.id);

        samples.extend(page.iter().map(|member| PresenceSample {
            bot: member.user.bot,
            status: presences.get(&member.user.id).map(|o| o.status)
        }));

        if !full_page {
            break;
        }
    }

    Ok(count_connected(samples))
}

/// Polls `is_ready` until it holds or the attempts run out.
pub async fn wait_until(mut is_ready: impl FnMut() -> bool, attempts: u32, delay: Duration) -> bool {
    for attempt in 0..attempts {
        if is_ready() {
            return true;
        }
        if attempt + 1 < attempts {
            time::sleep(delay).await;
        }
    }

    false
}

/// Runs once the guild is cached, then every `period`. A failed tick keeps the old status.
pub async fn report_presence(ctx: Context, guild_id: GuildId, period: Duration) {
    // READY can arrive before GUILD_CREATE fills the cache.
    if !wait_until(|| ctx.cache.guild_field(guild_id, |_| ()).is_some(), CACHE_ATTEMPTS, CACHE_RETRY).await {
        error!("Guild {} is still not cached, presence starts on the next tick", guild_id);
    }

    let mut interval = time::interval(period);
    loop {
        interval.tick().await;
        match connected_members(&ctx, guild_id).await {
            Ok(count) => {
                debug!("{} members connected", count);
                ctx.set_presence(Some(Activity::watching(status_text(count))), OnlineStatus::Online).await;
            }
            Err(ex) => {
                error!("Failed to update presence: {}", ex);
            }
        }
    }
}
