//! Word-list oracle. Deterministic, offline, never fails.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use anyhow::Result;
use async_trait::async_trait;
use castgraph_common::Sentiment;
use regex::Regex;

use crate::EnrichmentOracle;

/// URLs and mentions are matched so they are consumed, but only plain words
/// land in group 1.
static TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"https?://\S+|@[A-Za-z0-9_.]+|([A-Za-z][A-Za-z']*)").expect("valid regex")
});

const POLARITY: &[(&str, f64)] = &[
    ("amazing", 0.6),
    ("awesome", 1.0),
    ("beautiful", 0.85),
    ("best", 1.0),
    ("brilliant", 0.9),
    ("cool", 0.35),
    ("excellent", 1.0),
    ("excited", 0.4),
    ("fantastic", 0.4),
    ("fun", 0.3),
    ("glad", 0.5),
    ("good", 0.7),
    ("great", 0.8),
    ("happy", 0.8),
    ("incredible", 0.9),
    ("love", 0.5),
    ("lovely", 0.5),
    ("nice", 0.6),
    ("perfect", 1.0),
    ("thanks", 0.2),
    ("wonderful", 1.0),
    ("angry", -0.5),
    ("annoying", -0.8),
    ("awful", -1.0),
    ("bad", -0.7),
    ("boring", -1.0),
    ("broken", -0.4),
    ("disappointed", -0.75),
    ("hate", -0.8),
    ("horrible", -1.0),
    ("poor", -0.4),
    ("sad", -0.5),
    ("scam", -0.6),
    ("stupid", -0.8),
    ("terrible", -1.0),
    ("ugly", -0.7),
    ("worse", -0.4),
    ("worst", -1.0),
    ("wrong", -0.5),
];

const NEGATIONS: &[&str] = &["not", "no", "never", "don't", "isn't", "wasn't", "can't"];

/// Labels follow the go-emotions vocabulary. Order breaks ties.
const EMOTIONS: &[(&str, &[&str])] = &[
    ("gratitude", &["thanks", "thank", "grateful", "appreciate", "thx"]),
    ("love", &["love", "adore", "loving", "heart"]),
    ("joy", &["happy", "glad", "joy", "yay", "fun", "celebrate", "excited"]),
    ("admiration", &["amazing", "impressive", "brilliant", "beautiful", "respect", "incredible"]),
    ("anger", &["angry", "hate", "furious", "annoyed", "mad", "rage"]),
    ("sadness", &["sad", "miss", "cry", "lonely", "depressed", "heartbroken"]),
    ("fear", &["afraid", "scared", "worried", "fear", "nervous", "anxious"]),
    ("surprise", &["wow", "whoa", "surprised", "unexpected", "omg"]),
    ("disappointment", &["disappointed", "meh", "unfortunately", "letdown"]),
    ("curiosity", &["wonder", "curious", "wondering", "anyone", "why"]),
];

const NEUTRAL_EMOTION: &str = "neutral";

const STOPWORDS: &[&str] = &[
    "about", "after", "again", "all", "also", "and", "any", "are", "because", "been", "before",
    "being", "but", "can", "could", "did", "does", "doing", "down", "each", "even", "every",
    "for", "from", "get", "got", "had", "has", "have", "her", "here", "him", "his", "how",
    "into", "its", "just", "like", "more", "most", "much", "must", "now", "off", "once", "one",
    "only", "other", "our", "out", "over", "own", "really", "same", "she", "should", "some",
    "still", "such", "than", "that", "the", "their", "them", "then", "there", "these", "they",
    "thing", "things", "this", "those", "through", "too", "under", "until", "very", "was",
    "way", "were", "what", "when", "where", "which", "while", "who", "whom", "why", "will",
    "with", "would", "yes", "you", "your", "yours", "today", "tonight", "gonna", "lol", "gm",
    "saying", "say", "said", "make", "made", "going", "want", "know", "think", "see",
];

fn words(text: &str) -> Vec<String> {
    TOKEN_RE
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_lowercase())
        .collect()
}

fn polarity_of(word: &str) -> Option<f64> {
    POLARITY
        .iter()
        .find(|(w, _)| *w == word)
        .map(|(_, score)| *score)
}

/// Mean polarity of lexicon hits, with a hit directly after a negation
/// scaled by -0.5. Returns 0.0 when nothing matches.
pub fn polarity(text: &str) -> f64 {
    let words = words(text);
    let mut sum = 0.0;
    let mut hits = 0usize;
    for (i, word) in words.iter().enumerate() {
        let Some(mut score) = polarity_of(word) else {
            continue;
        };
        if i > 0 && NEGATIONS.contains(&words[i - 1].as_str()) {
            score *= -0.5;
        }
        sum += score;
        hits += 1;
    }
    if hits == 0 {
        0.0
    } else {
        sum / hits as f64
    }
}

/// Label with the most keyword hits; `"neutral"` when none match.
pub fn emotion_label(text: &str) -> &'static str {
    let words = words(text);
    let mut best: Option<(&'static str, usize)> = None;
    for (label, keywords) in EMOTIONS {
        let hits = words.iter().filter(|w| keywords.contains(&w.as_str())).count();
        if hits > 0 && best.map_or(true, |(_, top)| hits > top) {
            best = Some((*label, hits));
        }
    }
    best.map_or(NEUTRAL_EMOTION, |(label, _)| label)
}

/// Distinct content words with naive plural folding.
pub fn topic_keywords(text: &str) -> BTreeSet<String> {
    words(text)
        .into_iter()
        .filter(|w| w.len() >= 3 && !w.contains('\''))
        .filter(|w| !STOPWORDS.contains(&w.as_str()))
        .filter(|w| polarity_of(w).is_none() && !NEGATIONS.contains(&w.as_str()))
        .map(|w| singular(&w))
        .collect()
}

fn singular(word: &str) -> String {
    if word.len() > 4 && word.ends_with("ies") {
        return format!("{}y", &word[..word.len() - 3]);
    }
    if word.len() > 3
        && word.ends_with('s')
        && !word.ends_with("ss")
        && !word.ends_with("us")
        && !word.ends_with("is")
    {
        return word[..word.len() - 1].to_string();
    }
    word.to_string()
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LexiconOracle;

impl LexiconOracle {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl EnrichmentOracle for LexiconOracle {
    async fn sentiment(&self, text: &str) -> Result<Sentiment> {
        Ok(Sentiment::from_polarity(polarity(text)))
    }

    async fn emotion(&self, text: &str) -> Result<String> {
        Ok(emotion_label(text).to_string())
    }

    async fn topics(&self, text: &str) -> Result<BTreeSet<String>> {
        Ok(topic_keywords(text))
    }
}
