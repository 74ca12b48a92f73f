#[derive(Debug, Clone, PartialEq)]
pub enum CommandScope {
    Public,
    Private,
    Both,
}

impl CommandScope {
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "public" => CommandScope::Public,
            "private" | "dm" => CommandScope::Private,
            _ => CommandScope::Both,
        }
    }

    pub fn allows(&self, scope: &Scope) -> bool {
        match self {
            CommandScope::Public => !scope.is_private(),
            CommandScope::Private => scope.is_private(),
            CommandScope::Both => true,
        }
    }
}

/// Where a message was said: a named channel or a private conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    Channel(String),
    Private,
}

impl Scope {
    pub fn is_private(&self) -> bool {
        matches!(self, Scope::Private)
    }

    pub fn channel(&self) -> Option<&str> {
        match self {
            Scope::Channel(name) => Some(name),
            Scope::Private => None,
        }
    }
}

/// Events that can be answered with a message.
pub trait MessageCapable {
    fn source(&self) -> &str;
    fn scope(&self) -> Scope;

    /// Private messages are answered to the sender, channel messages in the channel.
    fn reply_destination(&self) -> Destination {
        match self.scope() {
            Scope::Private => Destination::User(self.source().to_string()),
            Scope::Channel(name) => Destination::Channel(name),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextMessage {
    pub source: String,
    /// `None` for private messages
    pub channel: Option<String>,
    pub text: String,
}

impl TextMessage {
    pub fn private(source: &str, text: &str) -> Self {
        Self {
            source: source.to_string(),
            channel: None,
            text: text.to_string(),
        }
    }

    pub fn in_channel(source: &str, channel: &str, text: &str) -> Self {
        Self {
            source: source.to_string(),
            channel: Some(channel.to_string()),
            text: text.to_string(),
        }
    }
}

impl MessageCapable for TextMessage {
    fn source(&self) -> &str {
        &self.source
    }

    fn scope(&self) -> Scope {
        match &self.channel {
            Some(name) => Scope::Channel(name.clone()),
            None => Scope::Private,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub text: String,
    pub destination: Destination,
}

impl Response {
    pub fn reply_to(event: &impl MessageCapable, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            destination: event.reply_destination(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Destination {
    User(String),
    Channel(String),
}

impl std::fmt::Display for Destination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Destination::User(name) | Destination::Channel(name) => write!(f, "{}", name),
        }
    }
}
