use lazy_regex::{lazy_regex, Lazy, Regex};
use regex::RegexBuilder;
use tracing::warn;

/// Unicode code-point ranges counted as emoji, kept as a data table so the
/// ranges can be unit-tested and extended without touching detector logic.
pub const EMOJI_RANGES: &[(u32, u32)] = &[
    (0x1F300, 0x1F9FF),
    (0x2600, 0x26FF),
    (0x2700, 0x27BF),
    (0x1F100, 0x1F1FF),
    (0x1F200, 0x1F2FF),
    (0x1F600, 0x1F64F),
    (0x1F680, 0x1F6FF),
    (0x1F900, 0x1F9FF),
    (0x1F1E0, 0x1F1FF),
];

pub fn is_emoji(c: char) -> bool {
    let code_point = c as u32;
    EMOJI_RANGES
        .iter()
        .any(|&(low, high)| code_point >= low && code_point <= high)
}

/// Letter rows of a QWERTY keyboard, used by the character-spam detector
/// to catch keyboard mashing like "asdfasdf".
pub const KEYBOARD_ROWS: [&str; 3] = ["qwertyuiop", "asdfghjkl", "zxcvbnm"];

/// Domains that never count as suspicious, checked before the deny list.
const ALLOWED_URL_SOURCES: &[&str] = &[
    r"youtube\.com",
    r"youtu\.be",
    r"drive\.google\.com",
    r"docs\.google\.com",
    r"sheets\.google\.com",
    r"slides\.google\.com",
    r"forms\.google\.com",
    r"maps\.google\.com",
    r"mail\.google\.com",
    r"gmail\.com",
    r"google\.com",
    r"google\.co",
    r"google\.(com|co)/[a-zA-Z0-9-]+/[a-zA-Z0-9-]+",
];

/// Link patterns that mark a message as spam outright.
const SUSPICIOUS_URL_SOURCES: &[&str] = &[
    r"discord\.gift",
    r"free.*nitro",
    r"steam.*community",
    r"steam.*gift",
    r"giveaway",
    r"hack.*tool",
    r"crack.*key",
    r"free.*robux",
    r"free.*vbucks",
    r"free.*money",
    r"bit\.ly",
    r"tinyurl\.com",
    r"goo\.gl",
    r"t\.co",
    r"discord.*nitro",
    r"discord.*gift",
    r"discord.*free",
    r"discord.*giveaway",
    r"discord.*hack",
    r"discord.*crack",
    r"discord.*key",
    r"discord.*robux",
    r"discord.*vbucks",
    r"discord.*money",
    r"discord.*bit\.ly",
    r"discord.*tinyurl\.com",
    r"discord.*goo\.gl",
    r"discord.*t\.co",
];

static ALLOWED_URLS: Lazy<Vec<(&'static str, Regex)>> =
    Lazy::new(|| compile_case_insensitive(ALLOWED_URL_SOURCES));
static SUSPICIOUS_URLS: Lazy<Vec<(&'static str, Regex)>> =
    Lazy::new(|| compile_case_insensitive(SUSPICIOUS_URL_SOURCES));
static BARE_URL: Lazy<Regex> = lazy_regex!(r#"https?://\S+"#);

fn compile_case_insensitive(sources: &[&'static str]) -> Vec<(&'static str, Regex)> {
    sources
        .iter()
        .filter_map(|&source| {
            match RegexBuilder::new(source).case_insensitive(true).build() {
                Ok(regex) => Some((source, regex)),
                Err(e) => {
                    warn!("Skipping url pattern <{}> that doesn't compile: {}", source, &e);
                    None
                }
            }
        })
        .collect()
}

pub struct UrlPatterns;

impl UrlPatterns {
    pub fn is_allow_listed(content: &str) -> bool {
        ALLOWED_URLS
            .iter()
            .any(|(_, pattern)| pattern.is_match(content))
    }

    /// Returns the source text of the first deny-list pattern that matches.
    pub fn find_suspicious(content: &str) -> Option<&'static str> {
        SUSPICIOUS_URLS
            .iter()
            .find(|(_, pattern)| pattern.is_match(content))
            .map(|&(source, _)| source)
    }

    pub fn contains_bare_url(content: &str) -> bool {
        BARE_URL.is_match(content)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn emoji_ranges_cover_common_emoji() {
        assert!(is_emoji('🔥'));
        assert!(is_emoji('☀'));
        assert!(is_emoji('😀'));
        assert!(is_emoji('🚀'));
        assert!(!is_emoji('a'));
        assert!(!is_emoji('!'));
    }

    #[test]
    fn allow_list_matches_are_case_insensitive() {
        assert!(UrlPatterns::is_allow_listed("see YouTube.com/watch?v=abc"));
        assert!(UrlPatterns::is_allow_listed("docs.google.com/document/d/1"));
        assert!(!UrlPatterns::is_allow_listed("definitely-not-a-listed-site.example"));
    }

    #[test]
    fn deny_list_reports_the_matching_source() {
        assert_eq!(
            UrlPatterns::find_suspicious("grab your FREE nitro today"),
            Some(r"free.*nitro")
        );
        assert_eq!(UrlPatterns::find_suspicious("nothing shady here"), None);
    }

    #[test]
    fn bare_url_detection() {
        assert!(UrlPatterns::contains_bare_url("go to https://example.org/x now"));
        assert!(UrlPatterns::contains_bare_url("http://example.org"));
        assert!(!UrlPatterns::contains_bare_url("no links at all"));
    }
}
