use std::fmt::Write as _;

use clap::Args;
use consultancy::auth::passwords::hash_password;
use consultancy::validation::{self, ValidationErrors};
use consultancy::workflows::leads::{
    Budget, LeadScore, LeadScorer, LeadSource, ProjectType, ScoringInput, Timeline,
};
use consultancy::AppError;

#[derive(Debug, Clone, Args)]
pub(crate) struct ScoreArgs {
    /// Budget band label, e.g. "₹20L+".
    #[arg(long)]
    pub budget: String,
    /// Timeline label, e.g. "1-3 months".
    #[arg(long)]
    pub timeline: String,
    #[arg(long, default_value = "Other")]
    pub source: String,
    #[arg(long = "project-type", default_value = "Other")]
    pub project_type: String,
}

#[derive(Debug, Clone, Args)]
pub(crate) struct HashPasswordArgs {
    pub password: String,
    #[arg(long, default_value_t = 12)]
    pub rounds: u32,
}

pub(crate) fn parse_scoring_input(args: &ScoreArgs) -> Result<ScoringInput, ValidationErrors> {
    let mut errors = ValidationErrors::default();
    let budget = validation::one_of(
        &mut errors,
        "budget",
        Some(args.budget.as_str()),
        &Budget::ALL,
        Budget::label,
    );
    let timeline = validation::one_of(
        &mut errors,
        "timeline",
        Some(args.timeline.as_str()),
        &Timeline::ALL,
        Timeline::label,
    );
    let source = validation::one_of(
        &mut errors,
        "source",
        Some(args.source.as_str()),
        &LeadSource::ALL,
        LeadSource::label,
    );
    let project_type = validation::one_of(
        &mut errors,
        "projectType",
        Some(args.project_type.as_str()),
        &ProjectType::ALL,
        ProjectType::label,
    );

    match (budget, timeline, source, project_type) {
        (Some(budget), Some(timeline), Some(source), Some(project_type)) if errors.is_empty() => {
            Ok(ScoringInput {
                budget,
                timeline,
                source,
                project_type,
            })
        }
        _ => Err(errors),
    }
}

pub(crate) fn render_score(score: &LeadScore) -> String {
    let mut out = String::new();
    for component in &score.components {
        let _ = writeln!(
            out,
            "{:<12} {:<28} {:>3}",
            component.axis.label(),
            component.value,
            component.points
        );
    }
    let _ = writeln!(out, "{:<12} {:<28} {:>3}", "total", "", score.score);
    let _ = writeln!(out, "category: {}", score.category.label());
    out
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let input = parse_scoring_input(&args)?;
    print!("{}", render_score(&LeadScorer.score(&input)));
    Ok(())
}

pub(crate) fn run_hash_password(args: HashPasswordArgs) -> Result<(), AppError> {
    let hash = hash_password(&args.password, args.rounds)?;
    println!("{hash}");
    Ok(())
}
