use std::sync::Arc;

pub const FALLBACK_TIPS: [&str; 10] = [
    "Take a 10-minute walk and notice five things you see.",
    "Call or message someone you trust.",
    "Drink a glass of water and take three deep breaths.",
    "Try journaling one thing you’re grateful for.",
    "Listen to your favorite upbeat song.",
    "Step outside and feel the sun or fresh air.",
    "Stretch your body slowly for two minutes.",
    "Watch a funny video or meme.",
    "Remind yourself this feeling is temporary.",
    "You're not alone—many people feel this way sometimes.",
];

pub fn fallback_tips() -> Arc<Vec<String>> {
    Arc::new(FALLBACK_TIPS.iter().map(|tip| tip.to_string()).collect())
}
