pub struct Icons;

impl Icons {
    pub const CAR: &str = "🏎️";
    pub const TROPHY: &str = "🏆";
    pub const FLAG: &str = "🏁";
    pub const CHECK: &str = "✅";
    pub const WARN: &str = "⚠️";
    pub const INFO: &str = "ℹ️";
    pub const NEW: &str = "🆕";
    pub const FOLDER: &str = "📂";
    pub const STATS: &str = "📊";
    pub const GOLD: &str = "🥇";
    pub const SILVER: &str = "🥈";
    pub const BRONZE: &str = "🥉";
}

/// Medal for podium places, empty otherwise
pub fn medal(rank: usize) -> &'static str {
    match rank {
        1 => Icons::GOLD,
        2 => Icons::SILVER,
        3 => Icons::BRONZE,
        _ => "",
    }
}
