//! Terminal output formatting with colors.

use colored::Colorize;

use crate::result::Outcome;
use crate::statistics::Stat;

/// Format an [`Outcome`] for human-readable terminal output.
pub fn format_outcome(outcome: &Outcome) -> String {
    let result = match outcome {
        Outcome::Failed { reason } => {
            return format!(
                "{} {}\n  {}\n",
                "\u{2717}".red().bold(),
                "MEASUREMENT FAILED".red().bold(),
                reason
            );
        }
        Outcome::Converged(result) | Outcome::Exhausted(result) => result,
    };

    let header = if outcome.is_converged() {
        format!("{} {}", "\u{2713}".green().bold(), "CONVERGED".green().bold())
    } else {
        format!(
            "{} {}",
            "\u{26A0}".yellow().bold(),
            "BUDGET EXHAUSTED".yellow().bold()
        )
    };

    let stddev = match result.stddev {
        Stat::Defined(sd) => format!("{sd:.4}"),
        Stat::Undefined => "undefined".to_string(),
    };
    let width = match result.width_pct {
        Stat::Defined(w) => format!("{w:.2}%"),
        Stat::Undefined => "undefined".to_string(),
    };

    format!(
        "{header}\n  mean:     {mean:.4}\n  interval: [{low:.4}, {high:.4}]\n  stddev:   {stddev}\n  width:    {width}\n  samples:  {samples}\n",
        mean = result.mean,
        low = result.interval_low,
        high = result.interval_high,
        samples = result.samples,
    )
}

#[cfg(test)]
mod tests {
    use crate::result::ConfidenceResult;

    use super::*;

    fn strip_ansi(s: &str) -> String {
        // Good enough for tests: drop ESC [ ... m sequences.
        let mut out = String::new();
        let mut chars = s.chars();
        while let Some(c) = chars.next() {
            if c == '\u{1b}' {
                for c in chars.by_ref() {
                    if c == 'm' {
                        break;
                    }
                }
            } else {
                out.push(c);
            }
        }
        out
    }

    #[test]
    fn test_formats_converged() {
        let outcome = Outcome::Converged(ConfidenceResult {
            interval_low: 9.5,
            interval_high: 10.5,
            mean: 10.0,
            stddev: Stat::Defined(0.25),
            width_pct: Stat::Defined(10.0),
            samples: 7,
        });
        let text = strip_ansi(&format_outcome(&outcome));
        assert!(text.contains("CONVERGED"));
        assert!(text.contains("[9.5000, 10.5000]"));
        assert!(text.contains("samples:  7"));
    }

    #[test]
    fn test_formats_undefined_statistics() {
        let outcome = Outcome::Exhausted(ConfidenceResult {
            interval_low: 1.0,
            interval_high: 1.0,
            mean: 1.0,
            stddev: Stat::Undefined,
            width_pct: Stat::Undefined,
            samples: 1,
        });
        let text = strip_ansi(&format_outcome(&outcome));
        assert!(text.contains("BUDGET EXHAUSTED"));
        assert!(text.contains("stddev:   undefined"));
        assert!(text.contains("width:    undefined"));
    }

    #[test]
    fn test_formats_failure() {
        let outcome = Outcome::Failed {
            reason: "probe panicked".into(),
        };
        let text = strip_ansi(&format_outcome(&outcome));
        assert!(text.contains("MEASUREMENT FAILED"));
        assert!(text.contains("probe panicked"));
    }
}
