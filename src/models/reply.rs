/// Platform-neutral embed. Rendered into serenity builders by the poise layer.
#[derive(Debug, Clone, PartialEq)]
pub struct EmbedCard {
    pub title: String,
    pub colour: u32,
    pub fields: Vec<EmbedField>,
    /// Local file attached alongside the embed and shown as its image.
    pub attachment: Option<String>
}

#[derive(Debug, Clone, PartialEq)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool
}

impl EmbedCard {
    pub fn new(title: impl Into<String>, colour: u32) -> Self {
        EmbedCard {
            title: title.into(),
            colour,
            fields: vec![],
            attachment: None
        }
    }

    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>, inline: bool) -> Self {
        self.fields.push(EmbedField { name: name.into(), value: value.into(), inline });
        self
    }

    pub fn attachment(mut self, path: Option<String>) -> Self {
        self.attachment = path;
        self
    }

    #[cfg(test)]
    pub fn value_of(&self, name: &str) -> Option<&str> {
        self.fields.iter().find(|f| f.name == name).map(|f| f.value.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReplyBody {
    Text(String),
    Embed(EmbedCard)
}

#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub body: ReplyBody,
    pub ephemeral: bool
}

impl Reply {
    pub fn private(content: impl Into<String>) -> Self {
        Reply { body: ReplyBody::Text(content.into()), ephemeral: true }
    }

    pub fn public(content: impl Into<String>) -> Self {
        Reply { body: ReplyBody::Text(content.into()), ephemeral: false }
    }

    pub fn private_embed(card: EmbedCard) -> Self {
        Reply { body: ReplyBody::Embed(card), ephemeral: true }
    }

    #[cfg(test)]
    pub fn embed(&self) -> Option<&EmbedCard> {
        match &self.body {
            ReplyBody::Embed(e) => Some(e),
            ReplyBody::Text(_) => None
        }
    }
}

/// Empty strings count as missing, same as the exported sheets treat them.
pub fn or_sentinel(value: Option<&str>, sentinel: &str) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => sentinel.to_string()
    }
}
