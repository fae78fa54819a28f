//! Plan rendering
//!
//! Turns a matched row into titled sections for the front ends, plus a
//! markdown formatter for terminal output.

use serde::Serialize;

use crate::tables::{BpPlan, Condition, DiabetesPlan};

/// How a section should be emphasized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Info,
    Warning,
}

/// One titled payload field of a recommendation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanSection {
    pub title: &'static str,
    pub value: String,
    pub tone: Tone,
}

impl PlanSection {
    fn info(title: &'static str, value: &str) -> Self {
        Self { title, value: value.to_string(), tone: Tone::Info }
    }

    fn warning(title: &'static str, value: &str) -> Self {
        Self { title, value: value.to_string(), tone: Tone::Warning }
    }
}

pub fn bp_sections(plan: &BpPlan) -> Vec<PlanSection> {
    vec![
        PlanSection::info("Foods To Eat", &plan.foods_to_eat),
        PlanSection::warning("Foods To Avoid", &plan.foods_to_avoid),
        PlanSection::info("Recommended Drinks", &plan.recommended_drinks),
        PlanSection::info("Daily Salt Intake (g)", &plan.daily_salt_intake_g),
        PlanSection::info("Sleep Hours", &plan.sleep_hours),
        PlanSection::info("Exercise Type", &plan.exercise_type),
        PlanSection::info("Exercise Duration (min)", &plan.exercise_duration_min),
    ]
}

pub fn diabetes_sections(plan: &DiabetesPlan) -> Vec<PlanSection> {
    vec![
        PlanSection::info("Foods To Eat", &plan.foods_to_eat),
        PlanSection::warning("Foods To Avoid", &plan.foods_to_avoid),
        PlanSection::info("Recommended Drinks", &plan.recommended_drinks),
        PlanSection::info("Daily Carb Target (g)", &plan.daily_carbohydrates_target_g),
        PlanSection::info("Sleep Hours", &plan.sleep_hours),
        PlanSection::info("Exercise Type", &plan.exercise_type),
        PlanSection::info("Exercise Duration (min)", &plan.exercise_duration_min),
    ]
}

/// Message shown when a lookup finds no row
pub fn not_found_message(condition: Condition) -> String {
    format!("No matching record found in the {} dataset.", condition.dataset_name())
}

/// Markdown formatter for recommendation plans
pub struct MarkdownFormatter;

impl MarkdownFormatter {
    pub fn format(condition: Condition, sections: &[PlanSection]) -> String {
        let mut md = String::with_capacity(512);

        md.push_str(&format!(
            "# Your Health Recommendation Plan for {}\n\n",
            condition.dataset_name()
        ));

        for section in sections {
            md.push_str(&format!("## {}\n\n", section.title));
            match section.tone {
                Tone::Info => md.push_str(&format!("{}\n\n", section.value)),
                Tone::Warning => md.push_str(&format!("**{}**\n\n", section.value)),
            }
        }

        md
    }
}
