//! Console output formatter for meal reports

use crate::output::formatter::OutputFormatter;
use crate::output::report::{MealReport, StepOutcome, StepReport};
use colored::Colorize;
use tablevote_domain::{CastOutcome, PlaceScore, RoundStatus, RoundTransition};

/// Formats meal reports for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the complete report
    pub fn format(report: &MealReport) -> String {
        let mut output = String::new();

        output.push_str(&Self::header(&format!("Meal: {}", report.meal.name)));
        output.push('\n');

        if let Some(location) = &report.meal.location {
            output.push_str(&format!(
                "{} {} ({} m)\n",
                "Where:".cyan().bold(),
                location,
                report.meal.radius_meters
            ));
        }
        if let Some(budget) = &report.meal.budget {
            output.push_str(&format!(
                "{} {}-{}\n",
                "Budget:".cyan().bold(),
                budget.min,
                budget.max
            ));
        }

        output.push_str(&Self::section_header("Steps"));
        for step in &report.steps {
            output.push_str(&Self::format_step(step));
            output.push('\n');
        }

        if !report.scores.is_empty() {
            output.push_str(&Self::section_header("Scores"));
            for score in &report.scores {
                output.push_str(&Self::format_score(score));
                output.push('\n');
            }
        }

        output.push_str(&Self::section_header("Result"));
        output.push_str(&Self::format_summary(report));
        output.push_str(&Self::footer());

        output
    }

    /// Format as JSON
    pub fn format_json(report: &MealReport) -> String {
        serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string())
    }

    /// Final status plus the chosen restaurant
    pub fn format_summary(report: &MealReport) -> String {
        let mut output = Self::format_status(&report.status);
        output.push('\n');
        if let Some(entry) = &report.chosen {
            output.push_str(&format!(
                "  {} {} ★{:.1}",
                "→".green().bold(),
                entry.display_name().bold(),
                entry.rating
            ));
            if let Some(level) = entry.price_level {
                output.push_str(&format!(" {}", level.symbol()));
            }
            if !entry.tags.is_empty() {
                let tags: Vec<&str> = entry.tags.iter().map(String::as_str).collect();
                output.push_str(&format!(" [{}]", tags.join(", ")).dimmed().to_string());
            }
            output.push('\n');
        }
        output
    }

    pub fn format_status(status: &RoundStatus) -> String {
        match (&status.chosen_restaurant, status.is_exhausted) {
            (Some(place), _) => format!(
                "{} {} (round {})",
                "Resolved:".green().bold(),
                place,
                status.round
            ),
            (None, true) => format!(
                "{} no restaurant can be agreed on (round {})",
                "Exhausted:".red().bold(),
                status.round
            ),
            (None, false) => format!(
                "{} round {}",
                "Voting open:".yellow().bold(),
                status.round
            ),
        }
    }

    pub fn format_step(step: &StepReport) -> String {
        let marker = if step.outcome.is_rejected() {
            "✗".red().to_string()
        } else {
            "✓".green().to_string()
        };
        let mut line = format!("{:>3}. {} {}", step.index, marker, step.action);

        match &step.outcome {
            StepOutcome::Vote { outcome } => match outcome {
                CastOutcome::Accepted { .. } => {}
                CastOutcome::AlreadyResolved { place } => {
                    line.push_str(&format!(" (already resolved to {})", place).dimmed().to_string());
                }
                CastOutcome::Exhausted { .. } => {
                    line.push_str(&" (meal exhausted, ignored)".dimmed().to_string());
                }
            },
            StepOutcome::Eligible { places } => {
                let ids: Vec<&str> = places.iter().map(|p| p.as_str()).collect();
                line.push_str(&format!(" → [{}]", ids.join(", ")));
            }
            StepOutcome::Rejected { reason } => {
                line.push_str(&format!(" → {}", reason.red()));
            }
            StepOutcome::Evaluated { .. } | StepOutcome::Applied => {}
        }

        if let Some(transition) = step.outcome.transition() {
            line.push_str(&format!("\n     {}", Self::format_transition(transition)));
        }
        line
    }

    pub fn format_transition(transition: &RoundTransition) -> String {
        match transition {
            RoundTransition::Resolved { round, place } => format!(
                "{} everyone approved {} in round {}",
                "★".green().bold(),
                place,
                round
            ),
            RoundTransition::Advanced { from, to } => format!(
                "{} round {} complete without agreement, opening round {}",
                "↻".yellow().bold(),
                from,
                to
            ),
            RoundTransition::Exhausted { round } => format!(
                "{} round {} left no restaurant everyone could still accept",
                "∅".red().bold(),
                round
            ),
        }
    }

    pub fn format_score(score: &PlaceScore) -> String {
        format!(
            "  {:<20} {} {} approve / {} disapprove",
            score.place.as_str(),
            score.vote_summary(),
            score.approvals,
            score.disapprovals
        )
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format(&self, report: &MealReport) -> String {
        Self::format(report)
    }

    fn format_json(&self, report: &MealReport) -> String {
        Self::format_json(report)
    }

    fn format_summary(&self, report: &MealReport) -> String {
        Self::format_summary(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tablevote_domain::{CandidateEntry, Meal, PlaceId, PriceLevel};

    fn resolved_report() -> MealReport {
        MealReport {
            meal: Meal::new("friday", "Friday dinner").at_location("Main St", 800),
            status: RoundStatus {
                round: 0,
                is_resolved: true,
                is_exhausted: false,
                chosen_restaurant: Some(PlaceId::from("R1")),
            },
            steps: vec![
                StepReport {
                    index: 1,
                    action: "alice approves R1 (round 0)".to_string(),
                    outcome: StepOutcome::Vote {
                        outcome: CastOutcome::Accepted {
                            round: 0,
                            transition: None,
                        },
                    },
                },
                StepReport {
                    index: 2,
                    action: "bob approves R1 (round 0)".to_string(),
                    outcome: StepOutcome::Vote {
                        outcome: CastOutcome::Accepted {
                            round: 0,
                            transition: Some(RoundTransition::Resolved {
                                round: 0,
                                place: PlaceId::from("R1"),
                            }),
                        },
                    },
                },
                StepReport {
                    index: 3,
                    action: "carol approves R9 (round 0)".to_string(),
                    outcome: StepOutcome::Rejected {
                        reason: "not a member".to_string(),
                    },
                },
            ],
            scores: vec![PlaceScore {
                place: PlaceId::from("R1"),
                approvals: 2,
                disapprovals: 0,
            }],
            chosen: Some(
                CandidateEntry::new("R1", 4.0)
                    .with_name("Luigi's")
                    .with_price_level(PriceLevel::Moderate),
            ),
        }
    }

    #[test]
    fn test_format_contains_steps_and_result() {
        let text = ConsoleFormatter::format(&resolved_report());
        assert!(text.contains("Friday dinner"));
        assert!(text.contains("Main St"));
        assert!(text.contains("alice approves R1 (round 0)"));
        assert!(text.contains("everyone approved R1 in round 0"));
        assert!(text.contains("not a member"));
        assert!(text.contains("Luigi's"));
        assert!(text.contains("$$"));
    }

    #[test]
    fn test_format_status_variants() {
        let open = RoundStatus {
            round: 2,
            is_resolved: false,
            is_exhausted: false,
            chosen_restaurant: None,
        };
        assert!(ConsoleFormatter::format_status(&open).contains("round 2"));

        let exhausted = RoundStatus {
            is_exhausted: true,
            ..open
        };
        assert!(ConsoleFormatter::format_status(&exhausted).contains("no restaurant can be agreed on"));
    }

    #[test]
    fn test_format_json_is_parseable() {
        let json = ConsoleFormatter::format_json(&resolved_report());
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["status"]["chosen_restaurant"], "R1");
        assert_eq!(value["steps"][1]["outcome"]["result"], "vote");
        assert_eq!(
            value["steps"][1]["outcome"]["outcome"]["transition"]["kind"],
            "resolved"
        );
        assert_eq!(value["steps"][2]["outcome"]["result"], "rejected");
    }
}
