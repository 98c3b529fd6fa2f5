use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Which snapshot a record came from. Each one names its identity field differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dataset {
    Players,
    Calipso
}

impl Dataset {
    pub fn key_field(&self) -> &'static str {
        match self {
            Dataset::Players => "discord_id",
            Dataset::Calipso => "discord"
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub identity: Option<String>,
    pub ip: Option<String>,
    pub license: Option<String>,
    pub steam: Option<String>
}

impl UserRecord {
    /// Trimmed identity, the form lookups compare against.
    pub fn key(&self) -> Option<&str> {
        self.identity.as_deref().map(str::trim)
    }
}

// Snapshots are hand-exported, so ids show up as strings or bare numbers.
#[derive(Debug, Deserialize)]
pub(crate) struct RawRecord {
    #[serde(default, deserialize_with = "lenient_string")]
    discord_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    discord: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    ip: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    license: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    steam: Option<String>
}

impl RawRecord {
    pub(crate) fn into_record(self, dataset: Dataset) -> UserRecord {
        let identity = match dataset {
            Dataset::Players => self.discord_id,
            Dataset::Calipso => self.discord
        };

        UserRecord {
            identity,
            ip: self.ip,
            license: self.license,
            steam: self.steam
        }
    }
}

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string())
    })
}

/// On-disk envelope of the blacklist snapshot.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct BlacklistFile {
    #[serde(default)]
    pub blacklisted_users: Vec<String>
}
