use tracing::error;
use crate::models::invocation::Invoker;
use crate::models::reply::Reply;
use crate::services::gateway::MemberAccess;
use super::dispatch::Services;

/// Ban/unban: native ban permission or the privileged role.
pub fn can_moderate(access: &MemberAccess, privileged_role: &str) -> bool {
    access.can_ban || is_privileged(access, privileged_role)
}

/// Blacklist management: the privileged role only, regardless of permissions.
pub fn is_privileged(access: &MemberAccess, privileged_role: &str) -> bool {
    access.role_names.iter().any(|o| o == privileged_role)
}

async fn invoker_access(services: &Services<'_>, invoker: &Invoker) -> Option<MemberAccess> {
    match services.guild.member_access(&invoker.id).await {
        Ok(access) => Some(access),
        Err(ex) => {
            error!("Failed to resolve {} as a guild member: {}", invoker.id, ex);
            None
        }
    }
}

/// `Some(denial)` when the invoker may not moderate.
pub(crate) async fn require_moderator(services: &Services<'_>, invoker: &Invoker, denial: &str) -> Option<Reply> {
    match invoker_access(services, invoker).await {
        Some(access) if can_moderate(&access, services.privileged_role) => None,
        _ => Some(Reply::private(denial))
    }
}

pub(crate) async fn require_privileged(services: &Services<'_>, invoker: &Invoker, denial: &str) -> Option<Reply> {
    match invoker_access(services, invoker).await {
        Some(access) if is_privileged(&access, services.privileged_role) => None,
        _ => Some(Reply::private(denial))
    }
}
