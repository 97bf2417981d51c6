//! Weighted word lexicon used by [`LexiconAnalyzer`](crate::LexiconAnalyzer).

/// General-purpose opinion words.
///
/// Keys are lowercase single words. Positive weights pull toward
/// `enthusiastic`, negative toward `critical`.
pub(crate) const LEXICON: &[(&str, f32)] = &[
    ("love", 0.5),
    ("loved", 0.5),
    ("loving", 0.4),
    ("great", 0.4),
    ("good", 0.3),
    ("excellent", 0.5),
    ("amazing", 0.5),
    ("awesome", 0.5),
    ("happy", 0.4),
    ("enjoy", 0.3),
    ("enjoyed", 0.3),
    ("best", 0.5),
    ("recommend", 0.4),
    ("helpful", 0.3),
    ("beautiful", 0.4),
    ("wonderful", 0.5),
    ("bad", -0.4),
    ("worse", -0.5),
    ("worst", -0.6),
    ("terrible", -0.6),
    ("awful", -0.6),
    ("hate", -0.6),
    ("hated", -0.6),
    ("poor", -0.4),
    ("broken", -0.4),
    ("wrong", -0.3),
    ("failed", -0.4),
    ("failure", -0.4),
    ("problem", -0.3),
    ("useless", -0.5),
    ("disappointing", -0.5),
    ("sad", -0.3),
];

/// Score a text string using the lexicon.
///
/// Splits text into lowercase words, strips surrounding punctuation, sums
/// matching weights, and clamps the result to `[-1.0, 1.0]`. Returns `0.0`
/// for empty or unknown text.
#[must_use]
pub fn lexicon_score(text: &str) -> f32 {
    let mut score = 0.0_f32;
    for word in text.split_whitespace() {
        let w = word
            .trim_matches(|c: char| !c.is_alphabetic())
            .to_lowercase();
        if let Some(&(_, weight)) = LEXICON.iter().find(|(lex_word, _)| *lex_word == w) {
            score += weight;
        }
    }
    score.clamp(-1.0, 1.0)
}
