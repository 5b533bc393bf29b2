use shared::classifier_params::ClassifierParams;
use shared::patterns::{self, UrlPatterns, KEYBOARD_ROWS};

pub const REPEATED_MESSAGE_REASON: &str = "Repeated messages detected";
pub const GIBBERISH_REASON: &str = "Gibberish content detected";
pub const EXCESSIVE_CAPS_REASON: &str = "Excessive caps detected";
pub const REPEATED_CHAR_REASON: &str = "Repeated character spam detected";
pub const KEYBOARD_ROW_REASON: &str = "Keyboard pattern spam detected";
pub const RANDOM_CHAR_REASON: &str = "Random character spam detected";
pub const LINE_SPAM_REASON: &str = "Excessive line breaks detected";
pub const EXCESSIVE_EMOJI_REASON: &str = "Excessive emojis detected";

// Gibberish thresholds. These are tuning constants of the heuristic
// itself, not part of the external configuration surface.
const GIBBERISH_MIN_LENGTH: usize = 5;
const GIBBERISH_VOWEL_RATIO: f32 = 0.15;
const CONSONANT_RUN_LENGTH: usize = 5;
const REPEATED_BLOCK_LENGTH: usize = 2;
const REPEATED_BLOCK_COUNT: usize = 3;

fn is_vowel(c: char) -> bool {
    matches!(c.to_ascii_lowercase(), 'a' | 'e' | 'i' | 'o' | 'u')
}

pub fn is_gibberish(content: &str) -> bool {
    let chars: Vec<char> = content.chars().collect();
    has_low_vowel_ratio(&chars) || has_consonant_run(&chars) || has_repeated_block(&chars)
}

fn has_low_vowel_ratio(chars: &[char]) -> bool {
    if chars.len() <= GIBBERISH_MIN_LENGTH {
        return false;
    }
    let vowels = chars.iter().filter(|&&c| is_vowel(c)).count();
    (vowels as f32 / chars.len() as f32) < GIBBERISH_VOWEL_RATIO
}

fn has_consonant_run(chars: &[char]) -> bool {
    let mut run = 0;
    for &c in chars {
        if c.is_ascii_alphabetic() && !is_vowel(c) {
            run += 1;
            if run >= CONSONANT_RUN_LENGTH {
                return true;
            }
        } else {
            run = 0;
        }
    }
    false
}

/// A substring of at least `REPEATED_BLOCK_LENGTH` characters repeated
/// `REPEATED_BLOCK_COUNT` or more times back to back, e.g. "hahahaha".
fn has_repeated_block(chars: &[char]) -> bool {
    let total = chars.len();
    for length in REPEATED_BLOCK_LENGTH..=total / REPEATED_BLOCK_COUNT {
        for start in 0..=total - length * REPEATED_BLOCK_COUNT {
            let block = &chars[start..start + length];
            let repeats = (1..REPEATED_BLOCK_COUNT)
                .all(|i| &chars[start + i * length..start + (i + 1) * length] == block);
            if repeats {
                return true;
            }
        }
    }
    false
}

pub fn is_excessive_caps(content: &str, params: &ClassifierParams) -> bool {
    let total = content.chars().count();
    if total == 0 {
        return false;
    }
    let uppercase = content.chars().filter(|c| c.is_uppercase()).count();
    let percentage = uppercase as f32 * 100.0 / total as f32;
    params.is_excessive_caps(total, percentage)
}

pub fn character_spam(content: &str, params: &ClassifierParams) -> Option<&'static str> {
    let run_length = params.char_run_length();
    if has_identical_char_run(content, run_length) {
        return Some(REPEATED_CHAR_REASON);
    }
    if has_keyboard_row_run(content, run_length) {
        return Some(KEYBOARD_ROW_REASON);
    }
    if is_bare_alphanumeric(content) {
        return Some(RANDOM_CHAR_REASON);
    }
    None
}

fn has_identical_char_run(content: &str, run_length: usize) -> bool {
    let mut previous = None;
    let mut run = 0;
    for c in content.chars() {
        if previous == Some(c) {
            run += 1;
        } else {
            previous = Some(c);
            run = 1;
        }
        if run >= run_length {
            return true;
        }
    }
    false
}

fn has_keyboard_row_run(content: &str, run_length: usize) -> bool {
    KEYBOARD_ROWS.iter().any(|row| {
        let mut run = 0;
        for c in content.chars() {
            if c.is_ascii_alphabetic() && row.contains(c.to_ascii_lowercase()) {
                run += 1;
                if run >= run_length {
                    return true;
                }
            } else {
                run = 0;
            }
        }
        false
    })
}

fn is_bare_alphanumeric(content: &str) -> bool {
    let stripped: Vec<char> = content.chars().filter(|c| !c.is_whitespace()).collect();
    !stripped.is_empty() && stripped.iter().all(|c| c.is_alphanumeric())
}

pub fn is_line_spam(content: &str, params: &ClassifierParams) -> bool {
    let mut line_count = 0;
    for line in content.split('\n') {
        line_count += 1;
        if line.trim().is_empty() {
            return true;
        }
    }
    params.is_line_spam(line_count)
}

pub fn emoji_count(content: &str) -> usize {
    content.chars().filter(|&c| patterns::is_emoji(c)).count()
}

/// Allow-listed domains win over the deny list; a url covered by neither
/// list falls through to the default and is allowed like plain text.
pub fn url_policy(content: &str) -> Option<String> {
    if UrlPatterns::is_allow_listed(content) {
        return None;
    }
    UrlPatterns::find_suspicious(content)
        .map(|source| format!("Suspicious URL detected: {}", source))
}

pub fn banned_word(content: &str, words: &[String]) -> Option<String> {
    if words.is_empty() {
        return None;
    }
    let content_lower = content.to_lowercase();
    let tokens: Vec<&str> = content_lower.split_whitespace().collect();
    for word in words {
        if tokens.iter().any(|&token| token == word.as_str())
            || content_lower.contains(word.as_str())
        {
            return Some(format!("Message contains banned word: \"{}\"", word));
        }
    }
    None
}
