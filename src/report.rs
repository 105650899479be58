// Rendering of test results for external reporting collaborators
//
// Two renderings:
// - to_json: machine-readable, every field of the result
// - to_report_string: APA-style summary, e.g. "t(19) = 2.25, p = .036",
//   followed by any advisories
//
// Nothing here writes files; callers decide where the text goes.

use crate::error::{Result, TestError};
use crate::result::{ConfidenceInterval, EffectSize, EffectSizeKind, TestKind, TestResult};

/// Pretty-printed JSON; infinite bounds and odds ratios are written as
/// the strings `"inf"` and `"-inf"` so the result reads back unchanged
pub fn to_json(result: &TestResult) -> Result<String> {
    serde_json::to_string_pretty(result)
        .map_err(|e| TestError::InvalidInput(format!("cannot serialize result: {}", e)))
}

/// Statistic line in APA style, without the test name
///
/// # Example
/// ```
/// use contraste::categorical::goodness_of_fit_uniform;
/// use contraste::report::apa_summary;
///
/// let result = goodness_of_fit_uniform(&[35, 51, 64, 50]).unwrap();
/// assert_eq!(apa_summary(&result), "χ²(3) = 8.44, p = .038");
/// ```
pub fn apa_summary(result: &TestResult) -> String {
    let mut parts = Vec::new();
    if let Some(statistic) = result.statistic() {
        let symbol = statistic_symbol(result.kind());
        match result.df() {
            Some(df) => parts.push(format!("{}({}) = {:.2}", symbol, df, statistic)),
            None => parts.push(format!("{} = {:.2}", symbol, statistic)),
        }
    }
    parts.push(format_p(result.p_value()));
    if let Some(ci) = result.confidence_interval() {
        parts.push(format_interval(&ci));
    }
    if let Some(effect) = result.effect_size() {
        parts.push(format_effect(&effect));
    }
    parts.join(", ")
}

/// Multi-line report: test name, APA summary, then one line per advisory
pub fn to_report_string(result: &TestResult) -> String {
    let mut report = String::new();
    report.push_str(result.kind().name());
    report.push('\n');
    report.push_str(&apa_summary(result));
    report.push('\n');
    for advisory in result.advisories() {
        report.push_str(&format!("  note: {}\n", advisory));
    }
    report
}

fn statistic_symbol(kind: TestKind) -> &'static str {
    match kind {
        TestKind::GoodnessOfFit | TestKind::Independence | TestKind::McNemar | TestKind::Bowker => {
            "χ²"
        }
        TestKind::OneSampleZ => "z",
        TestKind::OneSampleT | TestKind::StudentT | TestKind::WelchT | TestKind::PairedT => "t",
        TestKind::ShapiroWilk | TestKind::MannWhitney => "W",
        TestKind::SignedRank => "V",
        TestKind::FisherExact => "",
    }
}

/// APA p-value: three decimals without the leading zero, floor at .001
fn format_p(p: f64) -> String {
    if p < 0.001 {
        return "p < .001".to_string();
    }
    let text = format!("{:.3}", p);
    format!("p = {}", text.strip_prefix('0').unwrap_or(&text))
}

fn format_interval(ci: &ConfidenceInterval) -> String {
    format!(
        "{}% CI [{}, {}]",
        (ci.level * 100.0).round(),
        format_bound(ci.lower),
        format_bound(ci.upper)
    )
}

fn format_bound(v: f64) -> String {
    if v == f64::INFINITY {
        "∞".to_string()
    } else if v == f64::NEG_INFINITY {
        "-∞".to_string()
    } else {
        format!("{:.2}", v)
    }
}

fn format_effect(effect: &EffectSize) -> String {
    let label = match effect.kind {
        EffectSizeKind::CramersV => "V",
        EffectSizeKind::OddsRatio => "OR",
        EffectSizeKind::GlassDeltaX | EffectSizeKind::GlassDeltaY => "Δ",
        _ => "d",
    };
    format!("{} = {}", label, format_bound(effect.value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::categorical::{fisher_exact, ContingencyTable};
    use crate::config::{FisherOptions, TTestOptions};
    use crate::descriptive::SummaryStats;
    use crate::result::{Advisory, Alternative};
    use crate::ttest::one_sample_t_test_from_summary;

    fn grades() -> TestResult {
        let s = SummaryStats::new(72.3, 9.52, 20).unwrap();
        one_sample_t_test_from_summary(&s, 67.5, &TTestOptions::default()).unwrap()
    }

    #[test]
    fn test_apa_t_test() {
        let line = apa_summary(&grades());
        assert!(line.starts_with("t(19) = 2.25, p = .036, 95% CI ["));
    }

    #[test]
    fn test_one_sided_interval_shows_infinity() {
        let s = SummaryStats::new(72.3, 9.52, 20).unwrap();
        let opts = TTestOptions::default().with_alternative(Alternative::Greater);
        let r = one_sample_t_test_from_summary(&s, 67.5, &opts).unwrap();
        assert!(apa_summary(&r).ends_with(", ∞]"));
    }

    #[test]
    fn test_fisher_has_no_statistic() {
        let table = ContingencyTable::new(vec![vec![3, 1], vec![1, 3]]).unwrap();
        let r = fisher_exact(&table, &FisherOptions::default()).unwrap();
        assert_eq!(apa_summary(&r), "p = .486, OR = 9.00");
    }

    #[test]
    fn test_p_value_formatting() {
        assert_eq!(format_p(0.0004), "p < .001");
        assert_eq!(format_p(0.0375), "p = .038");
        assert_eq!(format_p(1.0), "p = 1.000");
    }

    #[test]
    fn test_report_lists_advisories() {
        let r = TestResult::new(TestKind::MannWhitney, 0.2, Alternative::TwoSided)
            .with_statistic(7.0)
            .with_advisory(Advisory::NormalApproximation { n: 60 });
        let report = to_report_string(&r);
        assert!(report.starts_with("Wilcoxon rank sum test\nW = 7.00, p = .200\n"));
        assert!(report.contains("note: normal approximation used (n = 60)"));
    }

    #[test]
    fn test_json_contains_fields() {
        let json = to_json(&grades()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["kind"], "OneSampleT");
        assert_eq!(value["df"]["Integer"], 19);
        assert!(value["p_value"].as_f64().unwrap() < 0.05);
    }

    #[test]
    fn test_json_keeps_infinite_values() {
        let s = SummaryStats::new(72.3, 9.52, 20).unwrap();
        let opts = TTestOptions::default().with_alternative(Alternative::Greater);
        let r = one_sample_t_test_from_summary(&s, 67.5, &opts).unwrap();
        let back: TestResult = serde_json::from_str(&to_json(&r).unwrap()).unwrap();
        let ci = back.confidence_interval().unwrap();
        assert_eq!(ci.upper, f64::INFINITY);
        assert!((ci.lower - r.confidence_interval().unwrap().lower).abs() < 1e-12);

        let table = ContingencyTable::new(vec![vec![3, 0], vec![1, 3]]).unwrap();
        let r = fisher_exact(&table, &FisherOptions::default()).unwrap();
        assert_eq!(r.effect_size().unwrap().value, f64::INFINITY);
        let json = to_json(&r).unwrap();
        assert!(json.contains("\"inf\""));
        let back: TestResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back.effect_size().unwrap().value, f64::INFINITY);
    }
}
