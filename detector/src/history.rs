use dashmap::DashMap;

struct HistoryEntry {
    content: String,
    timestamp: i64,
}

/// Rolling per-author log of recent message contents. Partitioned by
/// author: two different authors never contend, while the map's entry
/// guard serializes concurrent calls for the same author.
pub struct MessageHistory {
    authors: DashMap<String, Vec<HistoryEntry>>,
}

impl MessageHistory {
    pub fn new() -> Self {
        Self {
            authors: DashMap::new(),
        }
    }

    /// Appends the new entry, drops entries that fell out of the window,
    /// and returns how many retained entries match the new content
    /// byte-for-byte, the new entry included. The append sticks even if
    /// the surrounding classification is abandoned.
    pub fn record_and_count(
        &self,
        author_id: &str,
        content: &str,
        now: i64,
        window_millis: i64,
    ) -> usize {
        let mut entries = self.authors.entry(author_id.to_string()).or_default();
        entries.push(HistoryEntry {
            content: content.to_string(),
            timestamp: now,
        });
        entries.retain(|entry| now - entry.timestamp < window_millis);
        entries
            .iter()
            .filter(|entry| entry.content == content)
            .count()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const WINDOW: i64 = 5000;

    #[test]
    fn counts_verbatim_repeats_inside_the_window() {
        let history = MessageHistory::new();
        assert_eq!(history.record_and_count("author", "hello", 0, WINDOW), 1);
        assert_eq!(history.record_and_count("author", "hello", 100, WINDOW), 2);
    }

    #[test]
    fn entries_outside_the_window_are_pruned() {
        let history = MessageHistory::new();
        assert_eq!(history.record_and_count("author", "hello", 0, WINDOW), 1);
        assert_eq!(history.record_and_count("author", "hello", 100, WINDOW), 2);
        // 6000 - 100 >= 5000, so both earlier entries are gone
        assert_eq!(history.record_and_count("author", "hello", 6000, WINDOW), 1);
    }

    #[test]
    fn window_boundary_is_exclusive() {
        let history = MessageHistory::new();
        history.record_and_count("author", "hello", 0, WINDOW);
        // now - timestamp == window counts as expired
        assert_eq!(history.record_and_count("author", "hello", WINDOW, WINDOW), 1);
    }

    #[test]
    fn different_authors_do_not_share_history() {
        let history = MessageHistory::new();
        assert_eq!(history.record_and_count("first", "hello", 0, WINDOW), 1);
        assert_eq!(history.record_and_count("second", "hello", 10, WINDOW), 1);
    }

    #[test]
    fn matching_is_case_sensitive() {
        let history = MessageHistory::new();
        assert_eq!(history.record_and_count("author", "Hello", 0, WINDOW), 1);
        assert_eq!(history.record_and_count("author", "hello", 10, WINDOW), 1);
    }

    #[test]
    fn different_content_does_not_count_as_repeat() {
        let history = MessageHistory::new();
        assert_eq!(history.record_and_count("author", "first", 0, WINDOW), 1);
        assert_eq!(history.record_and_count("author", "second", 10, WINDOW), 1);
        assert_eq!(history.record_and_count("author", "first", 20, WINDOW), 2);
    }
}
