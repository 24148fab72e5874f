//! Keyword interpreter: turns a spoken transcript into a [`GameInterpretation`].
//!
//! There is no language understanding here. Tokens are matched against fixed
//! keyword pools with a loose two-way substring test, so "frogger" votes for
//! the same things "frog" does. Type, character and theme detection are
//! deterministic; title, objective, palette and encouragement are drawn from
//! the matched type's pools with the supplied random source.

use std::collections::BTreeMap;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::catalog::{
    self, CHARACTER_KEYWORDS, DEFAULT_CHARACTER, DEFAULT_THEME, ENCOURAGEMENTS, Palette,
    THEME_KEYWORDS,
};
use crate::game_type::{Difficulty, GameType};

/// Tokens shorter than this only match when they contain a keyword, never
/// when a keyword contains them. Keeps "the", "for" and "our" from voting
/// for gather, platform and journey.
pub const MIN_REVERSE_MATCH_LEN: usize = 4;

/// Everyday words long enough to pass [`MIN_REVERSE_MATCH_LEN`] that are
/// still only fragments of a keyword ("over" in discover, "sure" in treasure).
const FRAGMENT_WORDS: &[&str] = &[
    "over", "cover", "sure", "form", "sign", "rain", "each", "play", "ground", "king", "rock",
    "plan",
];

/// Structured reading of a child's idea. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameInterpretation {
    pub game_type: GameType,
    pub title: String,
    pub description: String,
    pub character: String,
    pub objective: String,
    pub controls: BTreeMap<String, String>,
    pub difficulty: Difficulty,
    pub theme: String,
    pub colors: Palette,
    pub elements: Vec<String>,
    pub encouragement: String,
}

/// Per-type keyword score for a transcript, in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeScore {
    pub game_type: GameType,
    pub score: u32,
}

fn tokenize(transcript: &str) -> Vec<String> {
    transcript
        .split_whitespace()
        .map(str::to_lowercase)
        .collect()
}

fn token_matches(token: &str, keyword: &str) -> bool {
    token.contains(keyword)
        || (token.chars().count() >= MIN_REVERSE_MATCH_LEN
            && !FRAGMENT_WORDS.contains(&token)
            && keyword.contains(token))
}

/// Score every game type: one point per token matching any of the type's keywords.
pub fn score_types(transcript: &str) -> [TypeScore; 6] {
    let tokens = tokenize(transcript);
    GameType::ALL.map(|game_type| {
        let keywords = catalog::template(game_type).keywords;
        let score = tokens
            .iter()
            .filter(|tok| keywords.iter().any(|kw| token_matches(tok, kw)))
            .count() as u32;
        TypeScore { game_type, score }
    })
}

/// Pick the highest scoring type. Ties go to the type declared first;
/// a transcript with no matches at all is an adventure.
pub fn detect_game_type(transcript: &str) -> GameType {
    let scores = score_types(transcript);
    let mut best = scores[0];
    for s in &scores[1..] {
        if s.score > best.score {
            best = *s;
        }
    }
    tracing::debug!(?scores, winner = %best.game_type, "scored transcript");
    if best.score == 0 {
        GameType::Adventure
    } else {
        best.game_type
    }
}

/// First keyword (in transcript token order) found in any pool, or `None`.
fn first_keyword_hit(
    transcript: &str,
    pools: &'static [(&'static str, &'static [&'static str])],
) -> Option<&'static str> {
    tokenize(transcript).iter().find_map(|tok| {
        pools
            .iter()
            .flat_map(|(_, words)| words.iter())
            .find(|kw| token_matches(tok, kw))
            .copied()
    })
}

pub fn detect_character(transcript: &str) -> String {
    first_keyword_hit(transcript, CHARACTER_KEYWORDS)
        .unwrap_or(DEFAULT_CHARACTER)
        .to_string()
}

pub fn detect_theme(transcript: &str) -> String {
    first_keyword_hit(transcript, THEME_KEYWORDS)
        .unwrap_or(DEFAULT_THEME)
        .to_string()
}

/// Uniform pick from a catalog pool. Catalog pools are never empty.
fn pick<'a, T, R: Rng + ?Sized>(rng: &mut R, pool: &'a [T]) -> &'a T {
    &pool[rng.random_range(0..pool.len())]
}

fn controls_for(game_type: GameType) -> BTreeMap<String, String> {
    let mut controls = BTreeMap::new();
    if game_type.is_pointer_driven() {
        controls.insert("click".to_string(), "interact".to_string());
        controls.insert("drag".to_string(), "move".to_string());
    } else {
        controls.insert("arrows".to_string(), "move around".to_string());
        if game_type == GameType::Jumping {
            controls.insert("space".to_string(), "jump".to_string());
        }
    }
    controls
}

/// Interpret a transcript using the thread-local random source.
pub fn interpret(transcript: &str) -> GameInterpretation {
    interpret_with(transcript, &mut rand::rng())
}

/// Interpret a transcript, drawing flavor text from `rng`.
pub fn interpret_with<R: Rng + ?Sized>(transcript: &str, rng: &mut R) -> GameInterpretation {
    let game_type = detect_game_type(transcript);
    interpret_as(game_type, transcript, rng)
}

/// Build an interpretation for a fixed game type, still detecting character
/// and theme from the transcript.
pub fn interpret_as<R: Rng + ?Sized>(
    game_type: GameType,
    transcript: &str,
    rng: &mut R,
) -> GameInterpretation {
    let tpl = catalog::template(game_type);
    let character = detect_character(transcript);
    let theme = detect_theme(transcript);

    GameInterpretation {
        game_type,
        title: pick(rng, tpl.titles).to_string(),
        description: format!("A fun {game_type} game featuring {character} in {theme}"),
        objective: pick(rng, tpl.objectives).to_string(),
        controls: controls_for(game_type),
        difficulty: Difficulty::Easy,
        colors: (*pick(rng, tpl.colors)).into(),
        elements: vec![
            character.clone(),
            theme.clone(),
            "fun".to_string(),
            "colorful".to_string(),
        ],
        encouragement: random_encouragement(rng).to_string(),
        character,
        theme,
    }
}

pub fn random_encouragement<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    *pick(rng, ENCOURAGEMENTS)
}
