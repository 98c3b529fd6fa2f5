use std::path::Path;
use std::sync::Arc;
use async_trait::async_trait;
use serenity::{
    cache::Cache,
    http::Http,
    model::{
        id::{ChannelId, GuildId, RoleId, UserId},
        permissions::Permissions
    }
};
use tracing::debug;
use crate::Error;
use crate::models::reply::EmbedCard;
use super::interaction_handler::render_embed;

/// What the invoker is allowed to do, as far as the guild knows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberAccess {
    pub can_ban: bool,
    pub role_names: Vec<String>
}

/// Everything a command needs from the guild.
#[async_trait]
pub trait GuildGateway: Send + Sync {
    async fn member_access(&self, user_id: &str) -> Result<MemberAccess, Error>;
    async fn direct_message(&self, user_id: &str, card: &EmbedCard) -> Result<(), Error>;
    /// Applies or strips the blacklist role. Users who aren't members are skipped.
    async fn set_blacklist_role(&self, user_id: &str, blacklisted: bool) -> Result<(), Error>;
    /// Bans and returns the banned user's tag.
    async fn ban(&self, user_id: &str, reason: &str) -> Result<String, Error>;
    async fn unban(&self, user_id: &str) -> Result<(), Error>;
    async fn audit_log(&self, content: &str) -> Result<(), Error>;
}

pub fn parse_user_id(user_id: &str) -> Result<UserId, Error> {
    user_id.trim()
        .parse::<u64>()
        .map(UserId)
        .map_err(|_| format!("{user_id} is not a valid user ID").into())
}

pub struct SerenityGuild {
    pub http: Arc<Http>,
    pub cache: Arc<Cache>,
    pub guild_id: GuildId,
    pub blacklist_role: RoleId,
    pub log_channel: ChannelId
}

#[async_trait]
impl GuildGateway for SerenityGuild {
    async fn member_access(&self, user_id: &str) -> Result<MemberAccess, Error> {
        let user_id = parse_user_id(user_id)?;
        let member = self.guild_id.member(&*self.http, user_id).await?;
        let roles = self.guild_id.roles(&*self.http).await?;

        let everyone = roles.get(&RoleId(self.guild_id.0))
            .map(|o| o.permissions)
            .unwrap_or_else(Permissions::empty);
        let permissions = member.roles.iter()
            .filter_map(|o| roles.get(o))
            .fold(everyone, |acc, role| acc | role.permissions);
        let is_owner = self.cache.guild_field(self.guild_id, |g| g.owner_id) == Some(user_id);

        Ok(MemberAccess {
            can_ban: is_owner || permissions.ban_members() || permissions.administrator(),
            role_names: member.roles.iter()
                .filter_map(|o| roles.get(o))
                .map(|o| o.name.clone())
                .collect()
        })
    }

    async fn direct_message(&self, user_id: &str, card: &EmbedCard) -> Result<(), Error> {
        let user_id = parse_user_id(user_id)?;
        let channel = user_id.create_dm_channel(&*self.http).await?;

        let file_name = card.attachment.as_deref()
            .and_then(|o| Path::new(o).file_name())
            .map(|o| o.to_string_lossy().to_string());

        channel.send_message(&*self.http, |m| {
            m.embed(|e| {
                render_embed(e, card);
                if let Some(name) = &file_name {
                    e.image(format!("attachment://{name}"));
                }
                e
            });
            if let Some(path) = card.attachment.as_deref() {
                m.add_file(path);
            }
            m
        }).await?;

        Ok(())
    }

    async fn set_blacklist_role(&self, user_id: &str, blacklisted: bool) -> Result<(), Error> {
        let user_id = parse_user_id(user_id)?;
        let mut member = match self.guild_id.member(&*self.http, user_id).await {
            Ok(member) => member,
            Err(ex) => {
                debug!("{} isn't resolvable as a member, skipping role: {}", user_id, ex);
                return Ok(());
            }
        };

        if blacklisted {
            member.add_role(&*self.http, self.blacklist_role).await?;
        } else {
            member.remove_role(&*self.http, self.blacklist_role).await?;
        }

        Ok(())
    }

    async fn ban(&self, user_id: &str, reason: &str) -> Result<String, Error> {
        let user_id = parse_user_id(user_id)?;
        let user = self.http.get_user(user_id.0).await?;
        self.guild_id.ban_with_reason(&*self.http, user.id, 0, reason).await?;

        Ok(user.tag())
    }

    async fn unban(&self, user_id: &str) -> Result<(), Error> {
        let user_id = parse_user_id(user_id)?;
        self.guild_id.unban(&*self.http, user_id).await?;

        Ok(())
    }

    async fn audit_log(&self, content: &str) -> Result<(), Error> {
        self.log_channel.say(&*self.http, content).await?;

        Ok(())
    }
}
