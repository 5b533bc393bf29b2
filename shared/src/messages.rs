pub mod classifier {
    use crate::types::{InboundMessage, Verdict};

    #[derive(Debug, Clone)]
    pub enum IncMessage {
        Close,
        Message(InboundMessage),
    }

    #[derive(Debug)]
    pub struct OutMessage {
        pub message: InboundMessage,
        pub verdict: Verdict,
        pub decided_at: i64,
    }

    impl OutMessage {
        pub fn new(message: InboundMessage, verdict: Verdict) -> Self {
            Self {
                message,
                verdict,
                decided_at: chrono::Utc::now().timestamp_millis(),
            }
        }
    }
}
