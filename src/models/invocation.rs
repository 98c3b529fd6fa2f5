// Typed command options, built once at the poise boundary.

#[derive(Debug, Clone)]
pub struct CheckOptions {
    pub id: String
}

#[derive(Debug, Clone)]
pub struct IpOptions {
    pub address: String
}

#[derive(Debug, Clone)]
pub enum BlacklistAction {
    Add { id: String },
    Remove { id: String },
    List
}

#[derive(Debug, Clone)]
pub struct BanOptions {
    pub user_id: String,
    pub reason: String
}

#[derive(Debug, Clone)]
pub struct UnbanOptions {
    pub user_id: String
}

#[derive(Debug, Clone)]
pub enum Invocation {
    Check(CheckOptions),
    Ip(IpOptions),
    Blacklist(BlacklistAction),
    Ban(BanOptions),
    Unban(UnbanOptions)
}

impl Invocation {
    pub fn name(&self) -> &'static str {
        match self {
            Invocation::Check(_) => "check",
            Invocation::Ip(_) => "ip",
            Invocation::Blacklist(_) => "blacklist",
            Invocation::Ban(_) => "ban",
            Invocation::Unban(_) => "unban"
        }
    }
}

/// Whoever ran the command.
#[derive(Debug, Clone)]
pub struct Invoker {
    pub id: String,
    pub tag: String
}

impl Invoker {
    pub fn mention(&self) -> String {
        format!("<@{}>", self.id)
    }
}
