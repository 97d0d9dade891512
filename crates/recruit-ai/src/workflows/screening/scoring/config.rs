/// Rubric constants for the delivery-driver screening. Fixed for the single
/// supported role, but kept as data so tests and the demo can name them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoringConfig {
    pub base_score: u8,
    pub preferred_cap: u8,
    pub max_score: u8,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            base_score: 50,
            preferred_cap: 50,
            max_score: 100,
        }
    }
}
