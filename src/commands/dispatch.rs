use tracing::{info, instrument};
use crate::models::invocation::{Invocation, Invoker};
use crate::models::reply::Reply;
use crate::services::{
    gateway::GuildGateway,
    geolocation::Geolocator,
    notifier::AuditSink,
    record_store::RecordStore
};
use super::{blacklist, general, lookup};

/// Borrowed view of everything a handler may touch for one invocation.
pub struct Services<'a> {
    pub store: &'a RecordStore,
    pub guild: &'a dyn GuildGateway,
    pub geo: &'a dyn Geolocator,
    pub audit: &'a dyn AuditSink,
    pub privileged_role: &'a str,
    pub check_image: Option<&'a str>
}

/// Blacklisted invokers are turned away before any handler runs.
#[instrument(skip_all, fields(command = invocation.name(), invoker = %invoker.id))]
pub async fn dispatch(services: &Services<'_>, invoker: &Invoker, invocation: Invocation) -> Reply {
    if services.store.is_blacklisted(&invoker.id).await {
        info!("Rejected /{} from blacklisted user {}", invocation.name(), invoker.id);
        return Reply::private("❌ Estás en la blacklist.");
    }

    match invocation {
        Invocation::Check(options) => lookup::check::check_record(services, invoker, &options).await,
        Invocation::Ip(options) => lookup::ip::lookup_ip(services, &options).await,
        Invocation::Blacklist(action) => blacklist::blacklist_config::manage(services, invoker, action).await,
        Invocation::Ban(options) => general::ban::ban_member(services, invoker, &options).await,
        Invocation::Unban(options) => general::ban::unban_member(services, invoker, &options).await
    }
}
