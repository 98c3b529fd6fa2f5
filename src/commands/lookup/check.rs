use tracing::{debug, error};
use crate::{FinderContext, Error};
use crate::commands::dispatch::Services;
use crate::commands::run;
use crate::models::invocation::{CheckOptions, Invocation, Invoker};
use crate::models::records::UserRecord;
use crate::models::reply::{or_sentinel, EmbedCard, Reply};

/// Busca información por discord_id
#[poise::command(
    slash_command,
    guild_only,
    description_localized("en-US", "Look up a player record by Discord ID.")
)]
pub async fn check(
    ctx: FinderContext<'_>,
    #[description = "ID de Discord a buscar"] id: String)
-> Result<(), Error> {
    run(ctx, Invocation::Check(CheckOptions { id })).await
}

pub fn result_card(id: &str, record: &UserRecord, image: Option<&str>) -> EmbedCard {
    EmbedCard::new("Resultado", 0x000000)
        .field("'user'", format!("<@{id}> "), false)
        .field("'ip_adress'", or_sentinel(record.ip.as_deref(), "N/A"), false)
        .field("'license'", or_sentinel(record.license.as_deref(), "No disponible"), false)
        .field("'steam'", or_sentinel(record.steam.as_deref(), "No disponible"), false)
        .field("'live'", "No disponible", false)
        .attachment(image.map(str::to_string))
}

/// The guild only ever sees an acknowledgement; the record goes out by DM.
pub(crate) async fn check_record(services: &Services<'_>, invoker: &Invoker, options: &CheckOptions) -> Reply {
    let record = services.store.find_by_identity(&options.id);
    debug!("Lookup for '{}': {}", options.id, if record.is_some() { "found" } else { "not found" });

    services.audit.check_executed(&invoker.tag, &options.id);

    let Some(record) = record else {
        return Reply::private(format!("❌ No se encontró información para la ID {}", options.id));
    };

    let card = result_card(&options.id, record, services.check_image);
    match services.guild.direct_message(&invoker.id, &card).await {
        Ok(_) => Reply::private("📬 Revisa tus mensajes directos para ver el resultado."),
        Err(ex) => {
            error!("Failed to DM check result to {}: {}", invoker.id, ex);
            Reply::private("❌ No pude enviarte mensaje directo. Asegúrate de tenerlos habilitados.")
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::commands::dispatch::tests::*;
    use crate::models::invocation::{CheckOptions, Invocation};
    use crate::models::reply::Reply;

    fn check(id: &str) -> Invocation {
        Invocation::Check(CheckOptions { id: id.to_string() })
    }

    #[tokio::test]
    async fn hit_is_delivered_by_dm() {
        let harness = Harness::new(vec![player("100", Some("1.2.3.4"), Some("L1"))], &[]);

        let reply = harness.run(&invoker("5"), check("100")).await;

        assert_eq!(reply, Reply::private("📬 Revisa tus mensajes directos para ver el resultado."));
        assert_eq!(harness.guild.calls(), vec!["dm:5".to_string()]);
        assert_eq!(*harness.audit.calls.lock().unwrap(), vec![("user#5".to_string(), "100".to_string())]);

        let cards = harness.guild.cards.lock().unwrap();
        let card = &cards[0];
        assert_eq!(card.value_of("'user'"), Some("<@100> "));
        assert_eq!(card.value_of("'ip_adress'"), Some("1.2.3.4"));
        assert_eq!(card.value_of("'license'"), Some("L1"));
        assert_eq!(card.value_of("'steam'"), Some("No disponible"));
        assert_eq!(card.attachment.as_deref(), Some("Hola.png"));
    }

    #[tokio::test]
    async fn blocked_dm_gets_its_own_message() {
        let mut harness = Harness::new(vec![player("100", Some("1.2.3.4"), Some("L1"))], &[]);
        harness.guild.dm_blocked = true;

        let reply = harness.run(&invoker("5"), check("100")).await;

        assert_eq!(reply, Reply::private("❌ No pude enviarte mensaje directo. Asegúrate de tenerlos habilitados."));
        assert_eq!(*harness.audit.calls.lock().unwrap(), vec![("user#5".to_string(), "100".to_string())]);
    }

    #[tokio::test]
    async fn miss_replies_not_found_and_still_audits() {
        let harness = Harness::new(vec![], &[]);

        let reply = harness.run(&invoker("5"), check("404")).await;

        assert_eq!(reply, Reply::private("❌ No se encontró información para la ID 404"));
        assert!(harness.guild.calls().is_empty());
        assert_eq!(*harness.audit.calls.lock().unwrap(), vec![("user#5".to_string(), "404".to_string())]);
    }

    #[tokio::test]
    async fn query_is_trimmed_before_lookup() {
        let harness = Harness::new(vec![player("100", None, None)], &[]);

        let reply = harness.run(&invoker("5"), check(" 100 ")).await;

        assert!(reply.ephemeral);
        assert_eq!(harness.guild.calls(), vec!["dm:5".to_string()]);
        let cards = harness.guild.cards.lock().unwrap();
        assert_eq!(cards[0].value_of("'ip_adress'"), Some("N/A"));
    }
}
