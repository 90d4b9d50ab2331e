use std::sync::LazyLock;

use regex::Regex;

pub const GREETING_REPLY: &str =
    "Good day, and welcome to Titan Steelworks’ AI Assistant—how may I help you today?";
pub const THANKS_REPLY: &str = "You’re very welcome—happy to help anytime.";

// Anchored at the start of the trimmed text.
static GREETING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^\s*(?:hello|hi|hey|good (?:morning|afternoon|evening)|greetings|welcome|salutations)\b",
    )
    .expect("valid greeting regex")
});

static THANKS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:thank(?:s| you)|thx|ty)\b").expect("valid thanks regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Greeting,
    Thanks,
}

impl Intent {
    pub fn reply(self) -> &'static str {
        match self {
            Intent::Greeting => GREETING_REPLY,
            Intent::Thanks => THANKS_REPLY,
        }
    }
}

/// Small-talk detection. Greetings win over thanks when both match.
pub fn classify(text: &str) -> Option<Intent> {
    let t = text.trim();
    if GREETING_RE.is_match(t) {
        return Some(Intent::Greeting);
    }
    if THANKS_RE.is_match(t) {
        return Some(Intent::Thanks);
    }
    None
}
