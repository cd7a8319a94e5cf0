//! Synthetic Content Feed
//!
//! Template-filled fake headlines for exercising the detection pipeline
//! without a live ingest source. The RNG is injected as a seed so a feed
//! replays identically in tests; ids are monotonic per feed instance.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use chrono::Utc;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use veritas_common::models::{ContentItem, ContentType};

use crate::types::{CollaboratorError, ContentSource};

const CONTENT_TYPES: &[ContentType] = &[ContentType::Text, ContentType::Audio, ContentType::Video];

const LANGUAGES: &[&str] = &["en", "es", "fr", "hi"];

const USERNAME_PREFIXES: &[&str] = &[
    "news", "truth", "real", "breaking", "insider", "leaked", "patriot", "awake",
];

const USERNAME_SUFFIXES: &[&str] = &[
    "reporter", "facts", "updates", "alerts", "seeker", "watch", "eye",
];

/// Headline templates; `{a}` and `{b}` are filled from the slot tables
const TEMPLATES: &[(&str, &[&str], &[&str])] = &[
    (
        "BREAKING: New study reveals {a} cures {b} in 48 hours - Big Pharma doesn't want you to know!",
        &["vitamin D", "turmeric", "apple cider vinegar", "coconut oil", "garlic"],
        &["cancer", "diabetes", "arthritis", "heart disease", "anxiety"],
    ),
    (
        "LEAKED: Secret {a} meeting reveals plan to {b} - mainstream media won't report this!",
        &["Senate", "Pentagon", "World Bank", "White House"],
        &["control the population", "crash the economy", "manipulate elections"],
    ),
    (
        "ALERT: {a} AI system gains consciousness, starts {b} - Scientists terrified!",
        &["Google", "Facebook", "Tesla", "OpenAI"],
        &["reading private messages", "controlling smart devices", "manipulating search results"],
    ),
    (
        "Local mayor announces new {a} project for {b} area.",
        &["infrastructure", "transit", "housing", "park renovation"],
        &["downtown", "riverside", "northern", "harbor"],
    ),
    (
        "According to researchers, a peer-reviewed study shows {a} improves {b}.",
        &["regular exercise", "a balanced diet", "adequate sleep"],
        &["mental health", "heart health", "concentration"],
    ),
];

const URGENCY_SUFFIXES: &[&str] = &[
    "SHARE BEFORE IT'S DELETED!",
    "They're trying to silence this!",
    "Don't let them hide the truth!",
];

/// Seedable synthetic feed implementing [`ContentSource`]
pub struct SampleFeed {
    rng: Mutex<StdRng>,
    next_id: AtomicU64,
}

impl SampleFeed {
    /// Feed with a fixed seed; identical seeds replay identical streams
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
            next_id: AtomicU64::new(1),
        }
    }

    /// Feed seeded from the system entropy source
    pub fn from_entropy() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
            next_id: AtomicU64::new(1),
        }
    }

    fn generate(&self) -> ContentItem {
        let mut rng = self.rng.lock().expect("feed rng lock poisoned");

        let (template, slot_a, slot_b) = TEMPLATES
            .choose(&mut *rng)
            .expect("template table is non-empty");
        let mut content = template
            .replace("{a}", slot_a.choose(&mut *rng).expect("slot table is non-empty"))
            .replace("{b}", slot_b.choose(&mut *rng).expect("slot table is non-empty"));
        if rng.gen_bool(0.2) {
            let suffix = URGENCY_SUFFIXES.choose(&mut *rng).expect("suffix table is non-empty");
            content.push(' ');
            content.push_str(suffix);
        }

        let author = format!(
            "{}_{}{}",
            USERNAME_PREFIXES.choose(&mut *rng).expect("prefix table is non-empty"),
            USERNAME_SUFFIXES.choose(&mut *rng).expect("suffix table is non-empty"),
            rng.gen_range(1..10000)
        );

        ContentItem {
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            content,
            content_type: *CONTENT_TYPES.choose(&mut *rng).expect("type table is non-empty"),
            language: LANGUAGES.choose(&mut *rng).expect("language table is non-empty").to_string(),
            author: Some(author),
            image_ref: None,
            audio_ref: None,
            created_at: Utc::now(),
        }
    }
}

#[async_trait::async_trait]
impl ContentSource for SampleFeed {
    async fn next_item(&self) -> Result<ContentItem, CollaboratorError> {
        Ok(self.generate())
    }
}
