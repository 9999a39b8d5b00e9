pub mod url_normalizer;

pub use url_normalizer::{
    NormalizedShortcut, SafetyVerdict, check_safety, extract_domain, is_valid_alias,
    normalize_url, suggest_alias, validate_and_normalize,
};
