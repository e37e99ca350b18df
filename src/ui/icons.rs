pub struct Icons;

impl Icons {
    pub const ROCKET: &str = "🚀";
    pub const CHECK: &str = "✅";
    pub const CROSS: &str = "❌";
    pub const WARN: &str = "⚠️";
    pub const STATS: &str = "📊";
    pub const DATABASE: &str = "🗄️";
    pub const SPARKLE: &str = "✨";
    pub const GEAR: &str = "⚙️";
    pub const GLOBE: &str = "🌍";
    pub const TRIANGLE: &str = "🔺";
    pub const SQUARE: &str = "🔲";
    pub const CIRCLE: &str = "🔵";
}

/// Icon for a vector shape, blank for shapes outside the generator's set
pub fn shape_icon(shape: &str) -> &'static str {
    match shape {
        "circle" => Icons::CIRCLE,
        "square" => Icons::SQUARE,
        "triangle" => Icons::TRIANGLE,
        _ => " ",
    }
}
