//! Condition label to emoji lookup

/// Shown for labels missing from [`CONDITION_EMOJI`]
pub const FALLBACK_EMOJI: &str = "🌤️";

/// Known OpenWeatherMap condition groups
pub const CONDITION_EMOJI: &[(&str, &str)] = &[
    ("Clear", "☀️"),
    ("Clouds", "☁️"),
    ("Rain", "🌧️"),
    ("Drizzle", "🌦️"),
    ("Thunderstorm", "⛈️"),
    ("Snow", "❄️"),
    ("Mist", "🌫️"),
    ("Fog", "🌫️"),
    ("Haze", "🌫️"),
    ("Smoke", "💨"),
];

/// Emoji for a condition label; labels are matched exactly
pub fn condition_emoji(condition: &str) -> &'static str {
    CONDITION_EMOJI
        .iter()
        .find(|(label, _)| *label == condition)
        .map(|(_, emoji)| *emoji)
        .unwrap_or(FALLBACK_EMOJI)
}
