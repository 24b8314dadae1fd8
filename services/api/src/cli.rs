use crate::infra::{parse_requirement, RequirementArg};
use crate::server;
use clap::{Args, Parser, Subcommand};
use skillmatch::error::AppError;
use skillmatch::staffing::{
    InMemoryStaffingStore, MatchResult, NewProject, ProjectStatus, Roster, RosterImporter,
    SkillRequirement, StaffingService,
};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(
    name = "skillmatch",
    about = "Match agency personnel to project skill requirements",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Rank the people in a roster CSV against a set of skill requirements
    Match(MatchArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

#[derive(Args, Debug)]
pub(crate) struct MatchArgs {
    /// Roster CSV (name,email,role,experience_level,skill,category,level)
    #[arg(long)]
    pub(crate) roster: PathBuf,
    /// Required skill and minimum level, e.g. `React=Advanced`; repeatable
    #[arg(long = "requirement", value_parser = parse_requirement, required = true)]
    pub(crate) requirements: Vec<RequirementArg>,
    /// Print at most this many candidates
    #[arg(long)]
    pub(crate) limit: Option<usize>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Match(args) => run_match(args),
    }
}

fn run_match(args: MatchArgs) -> Result<(), AppError> {
    let roster = RosterImporter::from_path(&args.roster)?;
    let mut matches = rank_roster(&roster, &args.requirements)?;
    if let Some(limit) = args.limit {
        matches.truncate(limit);
    }
    render_matches(&args.requirements, &matches);
    Ok(())
}

/// Load the roster into a scratch directory and rank everyone against the requirements.
pub(crate) fn rank_roster(
    roster: &Roster,
    requirements: &[RequirementArg],
) -> Result<Vec<MatchResult>, AppError> {
    let store = Arc::new(InMemoryStaffingStore::new());
    let service = StaffingService::new(store.clone(), store);
    roster.load_into(&service)?;

    let catalog = service.skills()?;
    let mut resolved = Vec::with_capacity(requirements.len());
    for requirement in requirements {
        let skill = catalog
            .iter()
            .find(|skill| skill.name.eq_ignore_ascii_case(&requirement.skill))
            .ok_or_else(|| {
                AppError::Usage(format!("no one in the roster lists skill '{}'", requirement.skill))
            })?;
        resolved.push(SkillRequirement {
            skill_id: skill.id,
            min_level: requirement.level,
        });
    }

    let project = service.create_project(NewProject {
        name: Some("command-line match".to_string()),
        status: Some(ProjectStatus::Active),
        requirements: resolved,
        ..NewProject::default()
    })?;
    Ok(service.match_project(project.id)?)
}

fn render_matches(requirements: &[RequirementArg], matches: &[MatchResult]) {
    println!("Skill match");
    println!("Requirements");
    for requirement in requirements {
        println!("- {} at {} or above", requirement.skill, requirement.level);
    }

    if matches.is_empty() {
        println!("\nCandidates: none meet every requirement");
        return;
    }

    println!("\nCandidates (best surplus first)");
    for (position, entry) in matches.iter().enumerate() {
        let role = entry.candidate.role.as_deref().unwrap_or("no role");
        println!(
            "{}. {} <{}>, {}, score {}",
            position + 1,
            entry.candidate.name,
            entry.candidate.email,
            role,
            entry.match_score
        );
    }
}
