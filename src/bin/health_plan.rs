//! Command-line front end for the health plan lookups.
//!
//! Usage:
//!   health_plan options bp
//!   health_plan bp --age 45 --gender female --level high
//!   health_plan diabetes --age 30 --gender male --diabetes-type "type 1" --a1c 7.2

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;

use health_plan_rust::a1c::a1c_options;
use health_plan_rust::report::{bp_sections, diabetes_sections, not_found_message, MarkdownFormatter, PlanSection};
use health_plan_rust::{
    find_bp_plan, find_diabetes_plan, Age, BpQuery, Condition, DataConfig, DiabetesQuery, ReferenceData,
};

#[derive(Parser, Debug)]
#[command(name = "health_plan", about = "Diet, drink, sleep and exercise plans for BP and diabetes")]
struct Cli {
    /// Directory holding the reference tables (overrides DATA_DIR)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// BP table file name or path (overrides BP_DATA_FILE)
    #[arg(long)]
    bp_file: Option<String>,

    /// Diabetes table file name or path (overrides DIABETES_DATA_FILE)
    #[arg(long)]
    diabetes_file: Option<String>,

    /// Print JSON instead of markdown
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the selectable values for a condition
    Options {
        #[arg(value_enum)]
        condition: ConditionArg,
    },
    /// Blood pressure plan
    Bp {
        #[arg(long)]
        age: Age,
        #[arg(long)]
        gender: String,
        #[arg(long)]
        level: String,
    },
    /// Diabetes plan
    Diabetes {
        #[arg(long)]
        age: Age,
        #[arg(long)]
        gender: String,
        #[arg(long)]
        diabetes_type: String,
        /// A1C level (%), one decimal place, 6.0 to 9.9
        #[arg(long)]
        a1c: Decimal,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ConditionArg {
    Bp,
    Diabetes,
}

impl From<ConditionArg> for Condition {
    fn from(arg: ConditionArg) -> Self {
        match arg {
            ConditionArg::Bp => Condition::BloodPressure,
            ConditionArg::Diabetes => Condition::Diabetes,
        }
    }
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "health_plan_rust=warn,warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = DataConfig::from_env();
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    if let Some(file) = cli.bp_file {
        config.bp_file = file;
    }
    if let Some(file) = cli.diabetes_file {
        config.diabetes_file = file;
    }

    let data = ReferenceData::load(&config).context("Failed to load reference tables")?;

    match cli.command {
        Command::Options { condition } => {
            print_options(&data, condition, cli.json)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Bp { age, gender, level } => {
            let query = BpQuery::new(age, gender, level);
            let plan = find_bp_plan(&data.bp, &query);
            render(
                Condition::BloodPressure,
                plan.map(|p| (serde_json::to_value(p), bp_sections(p))),
                cli.json,
            )
        }
        Command::Diabetes { age, gender, diabetes_type, a1c } => {
            let query = DiabetesQuery::new(age, gender, diabetes_type, a1c);
            let plan = find_diabetes_plan(&data.diabetes, &query);
            render(
                Condition::Diabetes,
                plan.map(|p| (serde_json::to_value(p), diabetes_sections(p))),
                cli.json,
            )
        }
    }
}

fn render(
    condition: Condition,
    found: Option<(serde_json::Result<serde_json::Value>, Vec<PlanSection>)>,
    json: bool,
) -> Result<ExitCode> {
    let Some((plan, sections)) = found else {
        eprintln!("{}", not_found_message(condition));
        return Ok(ExitCode::FAILURE);
    };

    if json {
        let out = serde_json::json!({
            "condition": condition,
            "plan": plan.context("Failed to serialize plan")?,
            "sections": sections,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        print!("{}", MarkdownFormatter::format(condition, &sections));
    }

    Ok(ExitCode::SUCCESS)
}

fn print_options(data: &ReferenceData, condition: ConditionArg, json: bool) -> Result<()> {
    let options = match condition {
        ConditionArg::Bp => serde_json::json!({
            "ages": data.bp.ages(),
            "genders": data.bp.genders(),
            "levels": data.bp.levels(),
        }),
        ConditionArg::Diabetes => serde_json::json!({
            "ages": data.diabetes.ages(),
            "genders": data.diabetes.genders(),
            "diabetes_types": data.diabetes.diabetes_types(),
            "a1c_levels": a1c_options().collect::<Vec<_>>(),
        }),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&options)?);
        return Ok(());
    }

    println!("{}", Condition::from(condition).label());
    if let Some(fields) = options.as_object() {
        for (name, values) in fields {
            let rendered: Vec<String> = values
                .as_array()
                .map(|items| {
                    items
                        .iter()
                        .map(|v| match v {
                            serde_json::Value::String(s) => s.clone(),
                            other => other.to_string(),
                        })
                        .collect()
                })
                .unwrap_or_default();
            println!("{}: {}", name, rendered.join(", "));
        }
    }

    Ok(())
}
