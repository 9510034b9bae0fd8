use crate::metric::Metric;

pub struct Icons;

impl Icons {
    pub const CHECK: &str = "✅";
    pub const CROSS: &str = "❌";
    pub const WARN: &str = "⚠️";
    pub const INFO: &str = "ℹ️";
    pub const STATS: &str = "📊";
    pub const CHART: &str = "📈";
    pub const DEL: &str = "🗑️";
    pub const PERSON: &str = "👤";
    pub const PACKAGE: &str = "📦";
    pub const SCALE: &str = "⚖️";
    pub const DROPLET: &str = "💧";
    pub const RUNNER: &str = "🏃";

    pub fn for_metric(metric: Metric) -> &'static str {
        match metric {
            Metric::Weight => Self::SCALE,
            Metric::Water => Self::DROPLET,
            Metric::Distance => Self::RUNNER,
        }
    }
}
