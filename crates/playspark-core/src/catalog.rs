//! Static per-game-type data: flavor-text pools, color sets, and the keyword
//! pools the interpreter matches transcripts against.

use serde::{Deserialize, Serialize};

use crate::game_type::GameType;

/// Three-color scheme shared by every generated game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    pub primary: String,
    pub secondary: String,
    pub background: String,
}

/// Compile-time form of [`Palette`] used by the catalog tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorSet {
    pub primary: &'static str,
    pub secondary: &'static str,
    pub background: &'static str,
}

impl ColorSet {
    const fn new(primary: &'static str, secondary: &'static str, background: &'static str) -> Self {
        Self {
            primary,
            secondary,
            background,
        }
    }
}

impl From<ColorSet> for Palette {
    fn from(c: ColorSet) -> Self {
        Self {
            primary: c.primary.to_string(),
            secondary: c.secondary.to_string(),
            background: c.background.to_string(),
        }
    }
}

/// Flavor pools for one game type.
#[derive(Debug)]
pub struct TypeTemplate {
    pub titles: &'static [&'static str],
    pub characters: &'static [&'static str],
    pub objectives: &'static [&'static str],
    pub themes: &'static [&'static str],
    pub colors: &'static [ColorSet],
    /// Words in a transcript that vote for this type.
    pub keywords: &'static [&'static str],
}

const JUMPING: TypeTemplate = TypeTemplate {
    titles: &["Super Jumper", "Bouncy Adventure", "Sky Hopper", "Jump Quest"],
    characters: &["frog", "bunny", "kangaroo", "superhero"],
    objectives: &[
        "Jump to collect stars",
        "Hop across platforms",
        "Reach the top",
        "Avoid obstacles",
    ],
    themes: &["forest", "space", "clouds", "playground"],
    colors: &[
        ColorSet::new("#32CD32", "#90EE90", "#E6FFE6"),
        ColorSet::new("#FF69B4", "#FFB6C1", "#FFF0F5"),
        ColorSet::new("#4169E1", "#87CEEB", "#F0F8FF"),
        ColorSet::new("#FF6347", "#FFA07A", "#FFF5EE"),
    ],
    keywords: &[
        "jump", "hop", "bounce", "leap", "platform", "frog", "bunny", "kangaroo",
    ],
};

const COLLECTION: TypeTemplate = TypeTemplate {
    titles: &["Treasure Hunt", "Star Collector", "Magic Gems", "Rainbow Picker"],
    characters: &["explorer", "fairy", "robot", "puppy"],
    objectives: &[
        "Collect all the treasures",
        "Gather shiny stars",
        "Find hidden gems",
        "Pick up colorful items",
    ],
    themes: &["treasure island", "magical garden", "space station", "candy land"],
    colors: &[
        ColorSet::new("#FFD700", "#FFA500", "#FFFAF0"),
        ColorSet::new("#9370DB", "#DDA0DD", "#F8F0FF"),
        ColorSet::new("#20B2AA", "#AFEEEE", "#F0FFFF"),
        ColorSet::new("#DC143C", "#F08080", "#FFF8F8"),
    ],
    keywords: &[
        "collect", "gather", "pick", "find", "treasure", "star", "gem", "coin",
    ],
};

const RACING: TypeTemplate = TypeTemplate {
    titles: &["Speed Race", "Fast Car Fun", "Racing Adventure", "Zoom Zoom"],
    characters: &["race car", "motorcycle", "spaceship", "bicycle"],
    objectives: &[
        "Race to the finish line",
        "Be the fastest",
        "Win the race",
        "Dodge obstacles",
    ],
    themes: &["race track", "city streets", "space highway", "countryside"],
    colors: &[
        ColorSet::new("#FF0000", "#FF6347", "#FFF0F0"),
        ColorSet::new("#0000FF", "#4169E1", "#F0F0FF"),
        ColorSet::new("#FF8C00", "#FFA500", "#FFF8DC"),
        ColorSet::new("#00FF00", "#32CD32", "#F0FFF0"),
    ],
    keywords: &[
        "race", "car", "fast", "speed", "drive", "motor", "bike", "zoom",
    ],
};

const PUZZLE: TypeTemplate = TypeTemplate {
    titles: &["Match Magic", "Color Puzzle", "Memory Game", "Picture Match"],
    characters: &["wizard", "detective", "smart owl", "puzzle master"],
    objectives: &[
        "Match all the pairs",
        "Solve the puzzle",
        "Find matching colors",
        "Complete the picture",
    ],
    themes: &[
        "magical castle",
        "detective office",
        "school classroom",
        "art studio",
    ],
    colors: &[
        ColorSet::new("#8A2BE2", "#DA70D6", "#F5F0FF"),
        ColorSet::new("#FF1493", "#FF69B4", "#FFF0F8"),
        ColorSet::new("#00CED1", "#48D1CC", "#F0FFFF"),
        ColorSet::new("#32CD32", "#90EE90", "#F0FFF0"),
    ],
    keywords: &[
        "puzzle", "match", "memory", "solve", "brain", "think", "pair",
    ],
};

const CREATIVE: TypeTemplate = TypeTemplate {
    titles: &["Art Master", "Draw & Create", "Color Fun", "Paint Palace"],
    characters: &["artist", "painter", "creative fairy", "art robot"],
    objectives: &[
        "Create beautiful art",
        "Draw anything you want",
        "Make colorful pictures",
        "Express yourself",
    ],
    themes: &["art studio", "rainbow world", "paint factory", "creativity land"],
    colors: &[
        ColorSet::new("#FF69B4", "#FFB6C1", "#FFF0F5"),
        ColorSet::new("#9370DB", "#DDA0DD", "#F8F0FF"),
        ColorSet::new("#FF6347", "#FFA07A", "#FFF5EE"),
        ColorSet::new("#20B2AA", "#AFEEEE", "#F0FFFF"),
    ],
    keywords: &[
        "draw", "paint", "art", "color", "create", "make", "design",
    ],
};

const ADVENTURE: TypeTemplate = TypeTemplate {
    titles: &["Big Adventure", "Explore Quest", "Hero Journey", "Discovery Time"],
    characters: &["brave hero", "explorer", "adventurer", "treasure hunter"],
    objectives: &[
        "Explore the world",
        "Find hidden treasures",
        "Help friends",
        "Solve mysteries",
    ],
    themes: &["jungle", "mysterious cave", "enchanted forest", "pirate island"],
    colors: &[
        ColorSet::new("#228B22", "#90EE90", "#F0FFF0"),
        ColorSet::new("#8B4513", "#D2691E", "#FFF8DC"),
        ColorSet::new("#4682B4", "#87CEEB", "#F0F8FF"),
        ColorSet::new("#DAA520", "#F0E68C", "#FFFACD"),
    ],
    keywords: &[
        "adventure", "explore", "quest", "hero", "journey", "discover",
    ],
};

/// Look up the template pools for a game type. Every type has one.
pub fn template(game_type: GameType) -> &'static TypeTemplate {
    match game_type {
        GameType::Jumping => &JUMPING,
        GameType::Collection => &COLLECTION,
        GameType::Racing => &RACING,
        GameType::Puzzle => &PUZZLE,
        GameType::Creative => &CREATIVE,
        GameType::Adventure => &ADVENTURE,
    }
}

/// Cheerful messages shown after an idea is heard.
pub const ENCOURAGEMENTS: &[&str] = &[
    "What an amazing idea! You're so creative!",
    "Wow! That sounds like a super fun game!",
    "You have such a great imagination!",
    "That's a fantastic idea! Let's build it!",
    "You're going to love playing this game!",
    "What a clever game idea! You're brilliant!",
    "This is going to be so much fun to play!",
    "You think of the coolest games ever!",
];

/// Character keyword pools, searched category by category.
pub const CHARACTER_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "animals",
        &[
            "dog", "cat", "bird", "fish", "frog", "bunny", "lion", "tiger", "bear", "monkey",
        ],
    ),
    (
        "vehicles",
        &["car", "truck", "plane", "boat", "rocket", "bike", "train"],
    ),
    (
        "people",
        &["hero", "princess", "knight", "pirate", "wizard", "fairy", "robot"],
    ),
    (
        "fantasy",
        &["dragon", "unicorn", "monster", "alien", "ghost", "fairy"],
    ),
];

/// Theme keyword pools, searched category by category.
pub const THEME_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "nature",
        &["forest", "jungle", "ocean", "mountain", "garden", "beach", "river"],
    ),
    (
        "space",
        &["space", "planet", "star", "moon", "rocket", "alien", "galaxy"],
    ),
    (
        "fantasy",
        &["castle", "magic", "fairy", "dragon", "kingdom", "enchanted"],
    ),
    (
        "everyday",
        &["school", "home", "park", "city", "playground", "library"],
    ),
];

pub const DEFAULT_CHARACTER: &str = "hero";
pub const DEFAULT_THEME: &str = "magical world";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_type_has_non_empty_pools() {
        for t in GameType::ALL {
            let tpl = template(t);
            assert!(!tpl.titles.is_empty(), "{t} titles");
            assert!(!tpl.characters.is_empty(), "{t} characters");
            assert!(!tpl.objectives.is_empty(), "{t} objectives");
            assert!(!tpl.themes.is_empty(), "{t} themes");
            assert!(!tpl.colors.is_empty(), "{t} colors");
            assert!(!tpl.keywords.is_empty(), "{t} keywords");
        }
    }

    #[test]
    fn colors_are_hex() {
        for t in GameType::ALL {
            for c in template(t).colors {
                for hex in [c.primary, c.secondary, c.background] {
                    assert!(hex.starts_with('#') && hex.len() == 7, "{hex}");
                }
            }
        }
    }

    #[test]
    fn color_set_converts_to_palette() {
        let p: Palette = JUMPING.colors[0].into();
        assert_eq!(p.primary, "#32CD32");
        assert_eq!(p.background, "#E6FFE6");
    }
}
