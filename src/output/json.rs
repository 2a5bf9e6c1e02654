//! JSON serialization of measurement outcomes.

use crate::result::Outcome;

/// Serialize an outcome to a compact JSON string.
pub fn to_json(outcome: &Outcome) -> serde_json::Result<String> {
    serde_json::to_string(outcome)
}

/// Serialize an outcome to a pretty-printed JSON string.
pub fn to_json_pretty(outcome: &Outcome) -> serde_json::Result<String> {
    serde_json::to_string_pretty(outcome)
}

#[cfg(test)]
mod tests {
    use crate::result::{ConfidenceResult, Outcome};
    use crate::statistics::Stat;

    use super::*;

    #[test]
    fn test_round_trips_through_json() {
        let outcome = Outcome::Exhausted(ConfidenceResult {
            interval_low: 1.0,
            interval_high: 3.0,
            mean: 2.0,
            stddev: Stat::Defined(0.5),
            width_pct: Stat::Defined(100.0),
            samples: 30,
        });

        let json = to_json(&outcome).unwrap();
        let back: Outcome = serde_json::from_str(&json).unwrap();
        assert_eq!(back, outcome);

        let pretty = to_json_pretty(&outcome).unwrap();
        assert!(pretty.contains("Exhausted"));
    }
}
