pub struct ClassifierParams {
    repeat_threshold: usize,
    repeat_window_millis: i64,
    caps_percentage_threshold: f32,
    caps_min_length: usize,
    emoji_count_threshold: usize,
    char_run_length: usize,
    line_count_threshold: usize,
    word_cache_ttl_millis: i64,
    rule_cache_ttl_millis: i64,
}

impl ClassifierParams {
    pub fn new(
        repeat_threshold: usize,
        repeat_window_millis: i64,
        caps_percentage_threshold: f32,
        caps_min_length: usize,
        emoji_count_threshold: usize,
        char_run_length: usize,
        line_count_threshold: usize,
        word_cache_ttl_millis: i64,
        rule_cache_ttl_millis: i64,
    ) -> Self {
        Self {
            repeat_threshold,
            repeat_window_millis,
            caps_percentage_threshold,
            caps_min_length,
            emoji_count_threshold,
            char_run_length,
            line_count_threshold,
            word_cache_ttl_millis,
            rule_cache_ttl_millis,
        }
    }

    pub fn is_repeated(&self, repeat_count: usize) -> bool {
        repeat_count >= self.repeat_threshold
    }

    pub fn repeat_window_millis(&self) -> i64 {
        self.repeat_window_millis
    }

    pub fn is_excessive_caps(&self, content_length: usize, uppercase_percentage: f32) -> bool {
        content_length >= self.caps_min_length
            && uppercase_percentage > self.caps_percentage_threshold
    }

    pub fn is_excessive_emoji(&self, emoji_count: usize) -> bool {
        emoji_count > self.emoji_count_threshold
    }

    pub fn char_run_length(&self) -> usize {
        self.char_run_length
    }

    pub fn is_line_spam(&self, line_count: usize) -> bool {
        line_count > self.line_count_threshold
    }

    pub fn word_cache_ttl_millis(&self) -> i64 {
        self.word_cache_ttl_millis
    }

    pub fn rule_cache_ttl_millis(&self) -> i64 {
        self.rule_cache_ttl_millis
    }
}

impl Default for ClassifierParams {
    fn default() -> Self {
        Self {
            repeat_threshold: 2,
            repeat_window_millis: 5000,
            caps_percentage_threshold: 60.0,
            caps_min_length: 6,
            emoji_count_threshold: 4,
            char_run_length: 4,
            line_count_threshold: 4,
            word_cache_ttl_millis: 30_000,
            rule_cache_ttl_millis: 30_000,
        }
    }
}
