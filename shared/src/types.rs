/// A single chat message as delivered by the platform gateway.
/// `received_at` is a unix timestamp in milliseconds and serves as the
/// clock for every time-based check downstream.
#[derive(Debug, Clone)]
pub struct InboundMessage {
    pub author_id: String,
    pub content: String,
    pub received_at: i64,
}

impl InboundMessage {
    pub fn new(author_id: String, content: String, received_at: i64) -> Self {
        Self {
            author_id,
            content,
            received_at,
        }
    }
}

/// The outcome of classifying one message. Produced fresh per message and
/// never stored by the pipeline itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Clean,
    Spam { reason: String },
}

impl Verdict {
    pub fn spam(reason: impl Into<String>) -> Self {
        Verdict::Spam {
            reason: reason.into(),
        }
    }

    pub fn is_spam(&self) -> bool {
        matches!(self, Verdict::Spam { .. })
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            Verdict::Clean => None,
            Verdict::Spam { reason } => Some(reason),
        }
    }
}

/// An operator-supplied regex rule. The pattern is kept as source text and
/// compiled per evaluation pass, so a malformed pattern can never poison
/// the rule set as a whole.
#[derive(Debug, Clone)]
pub struct CustomRule {
    pub id: u64,
    pub pattern: String,
    pub description: String,
}

impl CustomRule {
    pub fn new(id: u64, pattern: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id,
            pattern: pattern.into(),
            description: description.into(),
        }
    }
}
