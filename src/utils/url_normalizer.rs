//! URL 规范化模块
//!
//! Pure helpers for alias syntax, target URL normalization, alias
//! suggestion and the denylist safety heuristic. No state, no I/O.

use url::Url;

use crate::errors::{JumptoError, Result};

/// Hosts flagged by [`check_safety`] (substring match on the hostname)
const SUSPICIOUS_HOSTS: &[&str] = &["example.com", "localhost", "127.0.0.1", "::1"];

/// Labels skipped when deriving an alias from a domain
const IGNORED_LABELS: &[&str] = &["com", "org", "net", "edu", "gov", "www"];

/// A validated `(alias, url)` pair ready to be stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedShortcut {
    pub alias: String,
    pub url: String,
}

/// Outcome of the safety heuristic
///
/// Best-effort only: a `safe` verdict means "not on the denylist", never
/// that the destination is trustworthy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SafetyVerdict {
    pub safe: bool,
    pub reason: Option<String>,
}

impl SafetyVerdict {
    fn safe() -> Self {
        Self {
            safe: true,
            reason: None,
        }
    }

    fn unsafe_because(reason: &str) -> Self {
        Self {
            safe: false,
            reason: Some(reason.to_string()),
        }
    }
}

/// 规范化目标 URL
///
/// Trims the input, prepends `https://` when no `http://`/`https://`
/// prefix is present, and returns the canonical serialization of the
/// parsed absolute URL.
pub fn normalize_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim();

    let candidate = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    };

    let parsed = Url::parse(&candidate)
        .map_err(|e| JumptoError::invalid_url(format!("Invalid URL '{}': {}", raw.trim(), e)))?;

    Ok(parsed.to_string())
}

/// Alias must be non-empty and contain only ASCII letters, digits and `-`
pub fn is_valid_alias(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

/// Validate the alias (first) and normalize the URL (second)
pub fn validate_and_normalize(alias: &str, raw_url: &str) -> Result<NormalizedShortcut> {
    if !is_valid_alias(alias) {
        return Err(JumptoError::invalid_alias(format!(
            "Invalid shortcut '{}'. Use only letters, numbers, and hyphens.",
            alias
        )));
    }

    let url = normalize_url(raw_url)?;

    Ok(NormalizedShortcut {
        alias: alias.to_lowercase(),
        url,
    })
}

/// Hostname of `url`, or the raw input unchanged if it cannot be parsed
pub fn extract_domain(url: &str) -> String {
    normalize_url(url)
        .ok()
        .and_then(|normalized| Url::parse(&normalized).ok())
        .and_then(|parsed| parsed.host_str().map(str::to_string))
        .unwrap_or_else(|| url.to_string())
}

/// 从 URL 推导建议的别名
///
/// `https://www.github.com/foo` -> `github`. Returns an empty string when
/// the URL does not parse.
pub fn suggest_alias(url: &str) -> String {
    let host = match normalize_url(url)
        .ok()
        .and_then(|normalized| Url::parse(&normalized).ok())
        .and_then(|parsed| parsed.host_str().map(str::to_string))
    {
        Some(host) => host,
        None => return String::new(),
    };

    host.split('.')
        .find(|label| !IGNORED_LABELS.contains(label))
        .or_else(|| host.split('.').next())
        .map(str::to_lowercase)
        .unwrap_or_default()
}

/// 安全启发式检查
///
/// Flags hosts containing any denylisted substring. Parse failures are
/// reported unsafe with reason `"Invalid URL format"`.
pub fn check_safety(url: &str) -> SafetyVerdict {
    let host = match normalize_url(url)
        .ok()
        .and_then(|normalized| Url::parse(&normalized).ok())
    {
        Some(parsed) => parsed.host_str().unwrap_or_default().to_lowercase(),
        None => return SafetyVerdict::unsafe_because("Invalid URL format"),
    };

    if SUSPICIOUS_HOSTS.iter().any(|needle| host.contains(needle)) {
        return SafetyVerdict::unsafe_because("Suspicious domain detected");
    }

    SafetyVerdict::safe()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_adds_https() {
        assert_eq!(normalize_url("notion.so/docs").unwrap(), "https://notion.so/docs");
        assert_eq!(normalize_url("  github.com ").unwrap(), "https://github.com/");
    }

    #[test]
    fn test_normalize_keeps_http() {
        assert_eq!(
            normalize_url("http://intranet.corp/wiki?page=1").unwrap(),
            "http://intranet.corp/wiki?page=1"
        );
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for raw in ["mail.google.com", "https://GitHub.com/rust-lang", "docs.rs/tokio/latest"] {
            let once = normalize_url(raw).unwrap();
            assert_eq!(normalize_url(&once).unwrap(), once);
        }
    }

    #[test]
    fn test_normalize_rejects_garbage() {
        assert!(matches!(normalize_url(""), Err(JumptoError::InvalidUrl(_))));
        assert!(matches!(normalize_url("   "), Err(JumptoError::InvalidUrl(_))));
        assert!(matches!(
            normalize_url("javascript:alert(1)"),
            Err(JumptoError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_alias_syntax() {
        assert!(is_valid_alias("gh"));
        assert!(is_valid_alias("Team-Wiki-2"));
        assert!(!is_valid_alias(""));
        assert!(!is_valid_alias("my_alias"));
        assert!(!is_valid_alias("a/b"));
        assert!(!is_valid_alias("café"));
    }

    #[test]
    fn test_validate_checks_alias_first() {
        let err = validate_and_normalize("bad alias", "").unwrap_err();
        assert!(matches!(err, JumptoError::InvalidAlias(_)));

        let ok = validate_and_normalize("Docs", "notion.so/docs").unwrap();
        assert_eq!(ok.alias, "docs");
        assert_eq!(ok.url, "https://notion.so/docs");
    }

    #[test]
    fn test_extract_domain_is_tolerant() {
        assert_eq!(extract_domain("https://www.rust-lang.org/learn"), "www.rust-lang.org");
        assert_eq!(extract_domain("http://[::1"), "http://[::1");
    }

    #[test]
    fn test_suggest_alias() {
        assert_eq!(suggest_alias("https://www.github.com/foo"), "github");
        assert_eq!(suggest_alias("mail.google.com"), "mail");
        assert_eq!(suggest_alias("www.com"), "www");
        assert_eq!(suggest_alias("https://"), "");
    }

    #[test]
    fn test_check_safety() {
        assert!(!check_safety("http://localhost:8080").safe);
        assert!(!check_safety("https://www.example.com").safe);
        assert!(!check_safety("http://127.0.0.1/admin").safe);
        assert!(!check_safety("http://[::1]:3000").safe);

        let verdict = check_safety("https://");
        assert!(!verdict.safe);
        assert_eq!(verdict.reason.as_deref(), Some("Invalid URL format"));

        assert_eq!(check_safety("github.com"), SafetyVerdict::safe());
    }
}
