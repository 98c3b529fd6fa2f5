use tracing::{debug, error};
use crate::{FinderContext, Error};
use crate::commands::dispatch::Services;
use crate::commands::run;
use crate::models::geolocation::GeoLookup;
use crate::models::invocation::{Invocation, IpOptions};
use crate::models::records::UserRecord;
use crate::models::reply::{or_sentinel, EmbedCard, Reply};

/// Muestra información sobre una dirección IP
#[poise::command(
    slash_command,
    guild_only,
    description_localized("en-US", "Show what is known about an IP address.")
)]
pub async fn ip(
    ctx: FinderContext<'_>,
    #[description = "Dirección IP a consultar"] direccion: String)
-> Result<(), Error> {
    ctx.defer_ephemeral().await?;
    run(ctx, Invocation::Ip(IpOptions { address: direccion })).await
}

pub fn ip_card(address: &str, record: &UserRecord, geo: &GeoLookup) -> EmbedCard {
    EmbedCard::new(format!("Información para IP: {address}"), 0x000000)
        .field("Discord ID", or_sentinel(record.identity.as_deref(), "N/A"), true)
        .field("License", or_sentinel(record.license.as_deref(), "No disponible"), true)
        .field("Steam", or_sentinel(record.steam.as_deref(), "No disponible"), true)
        .field("País", or_sentinel(geo.country.as_deref(), "N/A"), true)
        .field("Región", or_sentinel(geo.region_name.as_deref(), "N/A"), true)
        .field("Ciudad", or_sentinel(geo.city.as_deref(), "N/A"), true)
        .field("ISP", or_sentinel(geo.isp.as_deref(), "N/A"), false)
        .field("Zona horaria", or_sentinel(geo.timezone.as_deref(), "N/A"), true)
        .field("Código postal", or_sentinel(geo.zip.as_deref(), "N/A"), true)
}

/// Only addresses we already have on file are sent to the geolocation service.
pub(crate) async fn lookup_ip(services: &Services<'_>, options: &IpOptions) -> Reply {
    let address = &options.address;
    debug!("Looking up IP '{}'", address);

    let Some(record) = services.store.find_by_ip(address) else {
        return Reply::private(format!("❌ No se encontró información para la IP {address}"));
    };

    match services.geo.locate(address).await {
        Ok(geo) if geo.is_success() => Reply::private_embed(ip_card(address, record, &geo)),
        Ok(geo) => {
            debug!("Geolocation refused {}: {}", address, geo.message.as_deref().unwrap_or("<no message>"));
            Reply::private(format!("❌ No se pudo obtener la ubicación para la IP {address}"))
        }
        Err(ex) => {
            error!("Failed to query geolocation for {}: {}", address, ex);
            Reply::private(format!("❌ Error al obtener la ubicación para la IP {address}"))
        }
    }
}
