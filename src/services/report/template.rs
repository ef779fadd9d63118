// src/services/report/template.rs

use crate::{models::test_result::TestResults, services::grading::PerformanceBand};

/// Renders the offline markdown report. Deterministic for a given result.
pub fn render(results: &TestResults) -> String {
    let band = PerformanceBand::from_percentage(results.percentage);
    let minutes = results.time_taken.max(0) / 60;
    let seconds = results.time_taken.max(0) % 60;

    format!(
        "# Test Performance Analysis

## Overall Performance
- **Score**: {score:.1}/100
- **Correct Answers**: {correct}/{total}
- **Percentage**: {percentage:.1}%
- **Performance Level**: {level}
- **Time Taken**: {minutes}m {seconds}s

## Analysis
{feedback}

## Recommendations
- Review questions you answered incorrectly
- Practice similar problems to strengthen understanding
- Focus on time management if needed
- Consider additional study materials for weak areas

## Next Steps
- Identify specific topics for improvement
- Create a study plan focusing on weak areas
- Take more practice tests to build confidence
",
        score = results.score,
        correct = results.correct_answers,
        total = results.total_questions,
        percentage = results.percentage,
        level = band.label(),
        feedback = band.feedback(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn results(correct: i32, total: i32, time_taken: i64) -> TestResults {
        let percentage = 100.0 * correct as f64 / total as f64;
        TestResults {
            test_id: "t-1".to_string(),
            score: percentage,
            correct_answers: correct,
            total_questions: total,
            time_taken,
            percentage,
            performance_level: PerformanceBand::from_percentage(percentage)
                .label()
                .to_string(),
            submitted_at: Utc::now(),
        }
    }

    #[test]
    fn renders_score_band_and_recommendations() {
        let text = render(&results(9, 10, 754));

        assert!(text.starts_with("# Test Performance Analysis"));
        assert!(text.contains("- **Score**: 90.0/100"));
        assert!(text.contains("- **Correct Answers**: 9/10"));
        assert!(text.contains("- **Percentage**: 90.0%"));
        assert!(text.contains("- **Performance Level**: Excellent"));
        assert!(text.contains("- **Time Taken**: 12m 34s"));
        assert!(text.contains("Outstanding performance!"));
        assert!(text.contains("## Recommendations"));
    }

    #[test]
    fn low_score_needs_improvement() {
        let text = render(&results(0, 3, 0));

        assert!(text.contains("- **Percentage**: 0.0%"));
        assert!(text.contains("- **Performance Level**: Needs Improvement"));
        assert!(text.contains("Review the material and practice more questions."));
    }

    #[test]
    fn output_is_deterministic() {
        let r = results(3, 4, 300);
        assert_eq!(render(&r), render(&r));
    }
}
