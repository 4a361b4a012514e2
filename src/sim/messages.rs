//! HUD flavor text

/// Shown at random intervals while running
pub const FLAVOR_MESSAGES: &[&str] = &[
    "You're doing... something.",
    "At this rate, you might finish by next century!",
    "Wow! Such progress. Much effort. Mostly effort.",
    "Keep going - it's not like anyone's watching.",
    "Almost there! Just kidding.",
    "Every step forward moves the finish line two steps back.",
];

pub const FINAL_LEVEL_MESSAGE: &str = "\u{1F525} Final Level! Watch out! \u{1F525}";
