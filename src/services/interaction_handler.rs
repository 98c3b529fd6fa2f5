use async_trait::async_trait;
use serenity::builder::CreateEmbed;
use crate::{FinderContext, Error};
use crate::models::reply::{EmbedCard, Reply, ReplyBody};

pub fn render_embed<'a>(e: &'a mut CreateEmbed, card: &EmbedCard) -> &'a mut CreateEmbed {
    e.title(&card.title).colour(card.colour);
    for field in &card.fields {
        e.field(&field.name, &field.value, field.inline);
    }
    e
}

// Sends a dispatcher reply back through whatever invoked the command.
#[async_trait]
pub trait AutoResponse {
    async fn respond(self, ctx: FinderContext<'_>) -> Result<(), Error>;
}

#[async_trait]
impl AutoResponse for Reply {
    async fn respond(self, ctx: FinderContext<'_>) -> Result<(), Error> {
        ctx.send(|m| {
            match &self.body {
                ReplyBody::Text(content) => { m.content(content); }
                ReplyBody::Embed(card) => { m.embed(|e| render_embed(e, card)); }
            }
            m.ephemeral(self.ephemeral)
        }).await?;

        Ok(())
    }
}
