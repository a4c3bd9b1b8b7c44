use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::profile::ContactInfo;
use crate::text::normalizer::NormalizedText;

static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[a-z0-9._%+-]+@[a-z0-9.-]+\.[a-z]{2,}\b").expect("email pattern is valid")
});

static PHONE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:\+?1[-.\s]?)?(?:\(\d{3}\)|\b\d{3})[-.\s]?\d{3}[-.\s]?\d{4}\b")
        .expect("phone pattern is valid")
});

static LINKEDIN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"linkedin\.com/(?:in|pub)/([a-z0-9_-]+)").expect("linkedin pattern is valid")
});

static GITHUB: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"github\.com/([a-z0-9_-]+)").expect("github pattern is valid"));

/// Pulls the first email, phone number, LinkedIn and GitHub handle out of the
/// cleaned (lowercased, punctuation-preserving) text.
pub fn extract_contact_info(text: &NormalizedText) -> ContactInfo {
    let cleaned = text.cleaned.as_str();
    ContactInfo {
        email: EMAIL.find(cleaned).map(|m| m.as_str().to_string()),
        phone: PHONE.find(cleaned).map(|m| m.as_str().trim().to_string()),
        linkedin: LINKEDIN
            .captures(cleaned)
            .and_then(|c| c.get(1))
            .map(|m| format!("linkedin.com/in/{}", m.as_str())),
        github: GITHUB
            .captures(cleaned)
            .and_then(|c| c.get(1))
            .map(|m| format!("github.com/{}", m.as_str())),
    }
}
