// src/extract.rs
//! Shared text heuristics used by adapters when structured fields are absent.
//! Implemented once; every adapter reuses the same instance.

use regex::Regex;
use scraper::{ElementRef, Selector};

const BENEFIT_VOCABULARY: &[&str] = &[
    "health insurance",
    "dental",
    "vision",
    "401k",
    "equity",
    "stock options",
    "flexible schedule",
    "work from home",
    "unlimited pto",
    "vacation",
    "parental leave",
    "learning budget",
    "conference",
    "gym membership",
];

const ROLE_KEYWORDS: &[&str] = &["engineer", "developer", "analyst"];

pub struct TextExtractors {
    salary_patterns: Vec<Regex>,
    title_patterns: Vec<Regex>,
    company_indicator: Regex,
    apply_anchor_text: Regex,
    anchor_selector: Selector,
}

impl TextExtractors {
    pub fn new() -> Self {
        // Ordered by priority; the first matching pattern wins.
        let salary_patterns = [
            r"(?i)\$[\d,]+\s*-\s*\$[\d,]+",
            r"(?i)\$[\d,]+k?\s*-\s*[\d,]+k?",
            r"(?i)[\d,]+\s*-\s*[\d,]+\s*USD",
            r"(?i)salary:\s*(\$?[\d,]+)",
        ]
        .iter()
        .map(|p| Regex::new(p).expect("invalid salary pattern"))
        .collect();

        let title_patterns = [
            r"(?i)(senior|junior|lead)?\s*(software|web|frontend|backend|full.?stack|data)\s*(engineer|developer|analyst)",
            r"(?i)(python|javascript|react|node\.?js|django)\s*(developer|engineer)",
            r"(?i)(devops|cloud|platform)\s*(engineer|specialist)",
        ]
        .iter()
        .map(|p| Regex::new(p).expect("invalid title pattern"))
        .collect();

        Self {
            salary_patterns,
            title_patterns,
            company_indicator: Regex::new(r"(?i)(company:|startup:|at\s)")
                .expect("invalid company indicator pattern"),
            apply_anchor_text: Regex::new(r"(?i)apply|join|contact")
                .expect("invalid apply anchor pattern"),
            anchor_selector: Selector::parse("a").expect("invalid anchor selector"),
        }
    }

    /// First salary-like substring, or empty string. A pattern with a capture
    /// group yields the captured amount rather than the surrounding label.
    pub fn salary(&self, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }

        for pattern in &self.salary_patterns {
            if let Some(caps) = pattern.captures(text) {
                let matched = caps.get(1).or_else(|| caps.get(0));
                if let Some(m) = matched {
                    return m.as_str().to_string();
                }
            }
        }

        String::new()
    }

    /// Benefit phrases found in the text, title-cased and comma-joined.
    /// Vocabulary iteration order is preserved, not input order.
    pub fn benefits(&self, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }

        let text_lower = text.to_lowercase();
        let found: Vec<String> = BENEFIT_VOCABULARY
            .iter()
            .filter(|phrase| text_lower.contains(*phrase))
            .map(|phrase| title_case(phrase))
            .collect();

        found.join(", ")
    }

    /// Best-effort job title from free text.
    pub fn title(&self, text: &str) -> String {
        for pattern in &self.title_patterns {
            if let Some(m) = pattern.find(text) {
                return m.as_str().trim().to_string();
            }
        }

        for line in text.lines().take(5) {
            let line_lower = line.to_lowercase();
            if ROLE_KEYWORDS.iter().any(|kw| line_lower.contains(kw)) {
                return truncate_chars(line.trim(), 100);
            }
        }

        "Tech Position".to_string()
    }

    /// Best-effort company name from free text.
    pub fn company(&self, text: &str) -> String {
        for line in text.lines().take(10) {
            let line_lower = line.to_lowercase();
            if ["company:", "startup:", "at "]
                .iter()
                .any(|ind| line_lower.contains(ind))
            {
                let stripped = self.company_indicator.replace_all(line, "");
                return truncate_chars(stripped.trim(), 50);
            }
        }

        for line in text.lines().take(5) {
            let trimmed = line.trim();
            if trimmed.len() > 3 && trimmed.len() < 100 {
                return trimmed.to_string();
            }
        }

        "Startup Company".to_string()
    }

    /// Application link from a candidate element: an anchor whose text looks
    /// like a call to action, else any absolute link mentioning "apply".
    pub fn apply_link(&self, element: &ElementRef) -> String {
        for anchor in element.select(&self.anchor_selector) {
            let text = anchor.text().collect::<Vec<_>>().join(" ");
            if self.apply_anchor_text.is_match(&text) {
                if let Some(href) = anchor.value().attr("href") {
                    return href.to_string();
                }
            }
        }

        for anchor in element.select(&self.anchor_selector) {
            if let Some(href) = anchor.value().attr("href") {
                if href.starts_with("http") && href.to_lowercase().contains("apply") {
                    return href.to_string();
                }
            }
        }

        String::new()
    }
}

impl Default for TextExtractors {
    fn default() -> Self {
        Self::new()
    }
}

fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

/// Uppercase the first letter of each word, lowercase the rest.
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_alpha = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    #[test]
    fn test_salary_currency_range() {
        let ex = TextExtractors::new();
        assert_eq!(
            ex.salary("Compensation: $50,000 - $70,000 plus equity"),
            "$50,000 - $70,000"
        );
    }

    #[test]
    fn test_salary_labelled_amount() {
        let ex = TextExtractors::new();
        assert_eq!(ex.salary("Salary: $85000 with bonus"), "$85000");
    }

    #[test]
    fn test_salary_no_match_is_empty() {
        let ex = TextExtractors::new();
        assert_eq!(ex.salary("Competitive compensation"), "");
        assert_eq!(ex.salary(""), "");
    }

    #[test]
    fn test_salary_range_beats_labelled_amount() {
        let ex = TextExtractors::new();
        assert_eq!(
            ex.salary("salary: $90000, range $80,000 - $95,000"),
            "$80,000 - $95,000"
        );
    }

    #[test]
    fn test_benefits_vocabulary_order() {
        let ex = TextExtractors::new();
        // Input mentions equity before dental; output follows vocabulary order.
        assert_eq!(
            ex.benefits("We offer equity and dental coverage"),
            "Dental, Equity"
        );
    }

    #[test]
    fn test_benefits_title_casing() {
        let ex = TextExtractors::new();
        assert_eq!(
            ex.benefits("401k match and unlimited pto"),
            "401K, Unlimited Pto"
        );
    }

    #[test]
    fn test_title_pattern_match() {
        let ex = TextExtractors::new();
        assert_eq!(
            ex.title("We are hiring a Senior Backend Engineer to join us"),
            "Senior Backend Engineer"
        );
    }

    #[test]
    fn test_title_line_fallback() {
        let ex = TextExtractors::new();
        let text = "Acme Inc\nRust wrangler and platform tamer\nGreat perks";
        // No role regex hits; no role keyword in the first five lines either.
        assert_eq!(ex.title(text), "Tech Position");

        let text = "Acme Inc\nLooking for an analyst of things\nGreat perks";
        assert_eq!(ex.title(text), "Looking for an analyst of things");
    }

    #[test]
    fn test_company_indicator_line() {
        let ex = TextExtractors::new();
        assert_eq!(ex.company("Remote role\nCompany: Acme Labs\nApply now"), "Acme Labs");
    }

    #[test]
    fn test_company_first_substantial_line_fallback() {
        let ex = TextExtractors::new();
        assert_eq!(ex.company("Acme Labs\nx"), "Acme Labs");
    }

    #[test]
    fn test_company_placeholder() {
        let ex = TextExtractors::new();
        assert_eq!(ex.company("x\ny"), "Startup Company");
    }

    #[test]
    fn test_apply_link_prefers_call_to_action_anchor() {
        let ex = TextExtractors::new();
        let html = Html::parse_fragment(
            r#"<div><a href="/about">About</a><a href="/jobs/1">Apply now</a></div>"#,
        );
        let root = html.root_element();
        assert_eq!(ex.apply_link(&root), "/jobs/1");
    }

    #[test]
    fn test_apply_link_absolute_fallback() {
        let ex = TextExtractors::new();
        let html = Html::parse_fragment(
            r#"<div><a href="https://acme.io/apply/123">Details</a></div>"#,
        );
        let root = html.root_element();
        assert_eq!(ex.apply_link(&root), "https://acme.io/apply/123");
    }

    #[test]
    fn test_apply_link_empty_when_absent() {
        let ex = TextExtractors::new();
        let html = Html::parse_fragment(r#"<div><p>No links here</p></div>"#);
        let root = html.root_element();
        assert_eq!(ex.apply_link(&root), "");
    }
}
