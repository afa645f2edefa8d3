use lazy_static::lazy_static;
use std::collections::HashMap;

/// Scores free text on a scale from -1.0 (unfavorable) to 1.0 (favorable).
pub trait PolarityScorer: Send + Sync {
    fn score(&self, text: &str) -> f64;
}

lazy_static! {
    static ref LEXICON: HashMap<&'static str, f64> = HashMap::from([
        ("amazing", 0.6),
        ("awesome", 1.0),
        ("beautiful", 0.85),
        ("best", 1.0),
        ("brilliant", 0.9),
        ("clear", 0.1),
        ("cool", 0.35),
        ("enjoyed", 0.4),
        ("excellent", 1.0),
        ("fantastic", 0.4),
        ("fun", 0.3),
        ("funny", 0.25),
        ("glad", 0.5),
        ("good", 0.7),
        ("great", 0.8),
        ("happy", 0.8),
        ("helpful", 0.5),
        ("interesting", 0.5),
        ("love", 0.5),
        ("loved", 0.7),
        ("nice", 0.6),
        ("perfect", 1.0),
        ("thanks", 0.2),
        ("useful", 0.3),
        ("well", 0.2),
        ("wonderful", 1.0),
        ("angry", -0.5),
        ("annoying", -0.8),
        ("awful", -1.0),
        ("bad", -0.7),
        ("boring", -1.0),
        ("broken", -0.4),
        ("clickbait", -0.6),
        ("confusing", -0.4),
        ("disappointed", -0.75),
        ("disappointing", -0.6),
        ("dislike", -0.5),
        ("dumb", -0.4),
        ("fake", -0.5),
        ("hate", -0.8),
        ("horrible", -1.0),
        ("misleading", -0.5),
        ("poor", -0.4),
        ("sad", -0.5),
        ("stupid", -0.8),
        ("terrible", -1.0),
        ("ugly", -0.7),
        ("useless", -0.5),
        ("waste", -0.2),
        ("worse", -0.4),
        ("worst", -1.0),
        ("wrong", -0.5),
    ]);
}

const NEGATORS: &[&str] = &["not", "no", "never", "nothing", "hardly"];
const INTENSIFIERS: &[&str] = &["very", "really", "extremely", "so", "super", "incredibly"];
const INTENSIFIER_WEIGHT: f64 = 1.3;
const NEGATION_WEIGHT: f64 = -0.5;

/// Lexicon-based scorer: averages the polarity of known words, taking a
/// negator or intensifier among the two preceding words into account.
#[derive(Debug, Default, Clone, Copy)]
pub struct LexiconScorer;

impl LexiconScorer {
    pub fn new() -> Self {
        LexiconScorer
    }
}

fn is_negator(word: &str) -> bool {
    NEGATORS.contains(&word) || word.ends_with("n't")
}

impl PolarityScorer for LexiconScorer {
    fn score(&self, text: &str) -> f64 {
        let lowered = text.to_lowercase();
        let words: Vec<&str> = lowered
            .split(|c: char| !(c.is_alphanumeric() || c == '\''))
            .filter(|w| !w.is_empty())
            .collect();

        let mut scores = Vec::new();
        for (i, word) in words.iter().enumerate() {
            let Some(&polarity) = LEXICON.get(*word) else {
                continue;
            };

            let mut value = polarity;
            // "not very good" negates and intensifies
            let window = &words[i.saturating_sub(2)..i];
            if window.iter().any(|w| INTENSIFIERS.contains(w)) {
                value *= INTENSIFIER_WEIGHT;
            }
            if window.iter().any(|w| is_negator(w)) {
                value *= NEGATION_WEIGHT;
            }
            scores.push(value.clamp(-1.0, 1.0));
        }

        if scores.is_empty() {
            return 0.0;
        }
        (scores.iter().sum::<f64>() / scores.len() as f64).clamp(-1.0, 1.0)
    }
}
