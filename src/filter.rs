// src/filter.rs
use crate::config::ScrapeConfig;
use crate::types::JobRecord;
use regex::Regex;

const REMOTE_INDICATORS: &[&str] = &[
    "remote",
    "work from home",
    "wfh",
    "distributed team",
    "anywhere",
    "location independent",
    "telecommute",
    "virtual",
    "home office",
];

const DEGREE_PATTERNS: &[&str] = &[
    r"bachelor'?s?\s+degree",
    r"bs\s+degree",
    r"college\s+degree",
    r"university\s+degree",
    r"4-year\s+degree",
    r"degree\s+required",
    r"degree\s+in\s+computer\s+science",
    r"cs\s+degree",
    r"computer\s+science\s+degree",
    r"engineering\s+degree",
    r"master'?s?\s+degree",
    r"phd",
    r"doctorate",
];

const EXPERIENCE_PATTERNS: &[&str] = &[
    r"\d+\+?\s+years?\s+of?\s+experience",
    r"\d+\+?\s+years?\s+experience",
    r"minimum\s+\d+\s+years?",
    r"at\s+least\s+\d+\s+years?",
    r"\d+\s+to\s+\d+\s+years?\s+experience",
    r"senior\s+level",
    r"experienced\s+developer",
    r"minimum\s+experience",
    r"years?\s+of\s+professional\s+experience",
    r"proven\s+experience",
    r"extensive\s+experience",
];

const INTERNSHIP_PATTERNS: &[&str] = &[
    r"intern\b",
    r"internship",
    r"unpaid",
    r"no salary",
    r"volunteer",
    r"part.time",
    r"part time",
    r"contract.*unpaid",
    r"equity.only",
    r"equity only",
];

const STARTUP_INDICATORS: &[&str] = &[
    "startup",
    "early stage",
    "seed stage",
    "series a",
    "series b",
    "fast-growing",
    "scaling",
    "venture backed",
    "y combinator",
    "techstars",
    "accelerator",
    "disruptive",
    "innovative",
];

const LARGE_COMPANIES: &[&str] = &[
    "google",
    "microsoft",
    "amazon",
    "apple",
    "facebook",
    "meta",
    "netflix",
    "tesla",
    "ibm",
    "oracle",
    "salesforce",
    "adobe",
    "intel",
    "nvidia",
    "cisco",
    "vmware",
    "dell",
    "hp",
    "sony",
    "samsung",
    "lg",
    "toyota",
    "ford",
    "general motors",
    "walmart",
    "target",
    "starbucks",
    "mcdonalds",
    "coca cola",
    "pepsi",
];

const TECH_TAG_TABLE: &[(&str, &str)] = &[
    ("python", "Python"),
    ("javascript", "JavaScript"),
    ("react", "React"),
    ("node", "Node.js"),
    ("django", "Django"),
    ("flask", "Flask"),
    ("aws", "AWS"),
    ("docker", "Docker"),
    ("kubernetes", "Kubernetes"),
    ("machine learning", "ML"),
    ("data science", "Data Science"),
    ("frontend", "Frontend"),
    ("backend", "Backend"),
    ("fullstack", "Full Stack"),
    ("devops", "DevOps"),
];

const SENIOR_INDICATORS: &[&str] = &["senior", "sr."];
const JUNIOR_INDICATORS: &[&str] = &["junior", "jr.", "entry"];
const LEAD_INDICATORS: &[&str] = &["lead", "principal", "staff"];

/// Ordered list of compiled patterns. First match wins; ordering is part of
/// the cascade's observable behavior.
struct PatternSet {
    patterns: Vec<Regex>,
}

impl PatternSet {
    fn new(sources: &[&str]) -> Self {
        Self {
            patterns: sources
                .iter()
                .map(|p| Regex::new(&format!("(?i){}", p)).expect("invalid filter pattern"))
                .collect(),
        }
    }

    fn matches(&self, text: &str) -> bool {
        self.patterns.iter().any(|p| p.is_match(text))
    }
}

/// Rule cascade deciding acceptance and deriving tags.
///
/// `evaluate` short-circuits on the first failing predicate, in documented
/// order: remote, tech role, degree requirement, experience requirement,
/// startup affiliation, internship/unpaid. On acceptance the record's tags
/// are *replaced* (not merged) with the derived set; adapter-seeded tags are
/// discarded. That overwrite is the documented contract.
pub struct JobFilter {
    degree: PatternSet,
    experience: PatternSet,
    internship: PatternSet,
    tech_keywords: Vec<String>,
    exclude_internships: bool,
}

impl JobFilter {
    pub fn new(config: &ScrapeConfig) -> Self {
        Self {
            degree: PatternSet::new(DEGREE_PATTERNS),
            experience: PatternSet::new(EXPERIENCE_PATTERNS),
            internship: PatternSet::new(INTERNSHIP_PATTERNS),
            tech_keywords: config
                .tech_keywords
                .iter()
                .map(|k| k.to_lowercase())
                .collect(),
            exclude_internships: config.exclude_internships,
        }
    }

    pub fn evaluate(&self, record: &mut JobRecord) -> bool {
        if !self.is_remote(record) {
            return false;
        }
        if !self.is_tech_role(record) {
            return false;
        }
        if self.requires_degree(record) {
            return false;
        }
        if self.requires_experience(record) {
            return false;
        }
        if !self.is_startup_related(record) {
            return false;
        }
        if self.exclude_internships && self.is_internship_or_unpaid(record) {
            return false;
        }

        record.tags = self.generate_tags(record);
        true
    }

    fn is_remote(&self, record: &JobRecord) -> bool {
        let text = join_lower(&[
            &record.title,
            &record.description,
            &record.job_type,
            &record.benefits,
        ]);
        REMOTE_INDICATORS.iter().any(|ind| text.contains(ind))
    }

    fn is_tech_role(&self, record: &JobRecord) -> bool {
        let text = join_lower(&[&record.title, &record.description, &record.tags_joined()]);
        self.tech_keywords.iter().any(|kw| text.contains(kw))
    }

    fn requires_degree(&self, record: &JobRecord) -> bool {
        let text = join_lower(&[&record.title, &record.description]);
        self.degree.matches(&text)
    }

    fn requires_experience(&self, record: &JobRecord) -> bool {
        let text = join_lower(&[&record.title, &record.description]);
        self.experience.matches(&text)
    }

    fn is_startup_related(&self, record: &JobRecord) -> bool {
        let text = join_lower(&[
            &record.company,
            &record.description,
            &record.source_site,
            &record.tags_joined(),
        ]);

        // The startup-centric board gets the benefit of the doubt outright.
        if text.contains("wellfound") || text.contains("angellist") {
            return true;
        }

        if STARTUP_INDICATORS.iter().any(|ind| text.contains(ind)) {
            return true;
        }

        let company = record.company.to_lowercase();
        if LARGE_COMPANIES.iter().any(|big| company.contains(big)) {
            return false;
        }

        // Undeterminable: assume it could be a startup.
        true
    }

    fn is_internship_or_unpaid(&self, record: &JobRecord) -> bool {
        let text = join_lower(&[&record.title, &record.description, &record.salary]);
        self.internship.matches(&text)
    }

    fn generate_tags(&self, record: &JobRecord) -> Vec<String> {
        let text = join_lower(&[&record.title, &record.description, &record.company]);

        let mut tags: Vec<String> = ["Remote", "Tech", "No Degree", "No Experience"]
            .iter()
            .map(|t| t.to_string())
            .collect();

        if self.is_startup_related(record) {
            tags.push("Startup".to_string());
        }

        for (keyword, tag) in TECH_TAG_TABLE {
            if text.contains(keyword) {
                tags.push(tag.to_string());
            }
        }

        if SENIOR_INDICATORS.iter().any(|l| text.contains(l)) {
            tags.push("Senior".to_string());
        } else if JUNIOR_INDICATORS.iter().any(|l| text.contains(l)) {
            tags.push("Junior".to_string());
        } else if LEAD_INDICATORS.iter().any(|l| text.contains(l)) {
            tags.push("Lead".to_string());
        }

        let mut seen = std::collections::HashSet::new();
        tags.retain(|t| seen.insert(t.clone()));
        tags
    }
}

fn join_lower(fields: &[&str]) -> String {
    fields.join(" ").to_lowercase()
}
