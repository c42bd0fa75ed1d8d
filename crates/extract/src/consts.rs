use regex::Regex;
use scraper::Selector;
use std::sync::LazyLock;

/// Case-insensitive marker that flags a listing as a foil print.
pub const FOIL_MARKER: &str = "foil";
/// Removed from titles (before [`FOIL_MARKER`]) when building the clean title.
pub(crate) const FOIL_SUFFIX: &str = "(foil)";

/// Keywords (matched case-insensitively against title and set name) that
/// mark a listing as a limited, alternate or promotional print.
pub const SPECIAL_PRINT_KEYWORDS: &[&str] = &[
    "serialized",
    "prestige",
    "hyperspace",
    "showcase",
    "alternate art",
    "extended art",
    "organized play",
    "promo",
    "(prestige)",
    "(showcase)",
    "(hyperspace)",
    "(serialized)",
];

macro_rules! selector {
    ($name:ident, $css:expr) => {
        pub(crate) static $name: LazyLock<Selector> = LazyLock::new(|| Selector::parse($css).unwrap());
    };
}

macro_rules! regex {
    ($name:ident, $regex:expr) => {
        pub(crate) static $name: LazyLock<Regex> = LazyLock::new(|| Regex::new($regex).unwrap());
    };
}

regex!(
    SPECIAL_PRINT_REGEX,
    format!(
        "(?i)({})",
        SPECIAL_PRINT_KEYWORDS.iter().map(|keyword| regex::escape(keyword)).collect::<Vec<_>>().join("|")
    )
    .as_str()
);

// Anti-bot interstitials served instead of search results.
selector!(PAGE_TITLE_SELECTOR, "head title");
regex!(BLOCKED_TITLE_REGEX, r"(?i)(just a moment|access denied|attention required)");
selector!(CAPTCHA_SELECTOR, "#challenge-form, .g-recaptcha, .h-captcha, iframe[src*='captcha']");
