use metrics_exporter_prometheus::PrometheusHandle;
use skillmatch::config::DirectoryConfig;
use skillmatch::error::AppError;
use skillmatch::staffing::{
    InMemoryStaffingStore, ProficiencyLevel, RosterImporter, StaffingService,
};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

pub(crate) type MemoryStaffingService =
    StaffingService<InMemoryStaffingStore, InMemoryStaffingStore>;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// One in-memory store backing both the directory and the assignment ledger, optionally
/// pre-populated from a roster CSV.
pub(crate) fn build_staffing_service(
    config: &DirectoryConfig,
) -> Result<Arc<MemoryStaffingService>, AppError> {
    let store = Arc::new(InMemoryStaffingStore::new());
    let service = StaffingService::new(store.clone(), store);

    if let Some(path) = &config.seed_roster {
        let roster = RosterImporter::from_path(path)?;
        let summary = roster.load_into(&service)?;
        info!(
            path = %path.display(),
            people = summary.people,
            skills = summary.skills,
            "directory seeded from roster"
        );
    }

    Ok(Arc::new(service))
}

/// `Skill=Level` pair given on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RequirementArg {
    pub(crate) skill: String,
    pub(crate) level: ProficiencyLevel,
}

pub(crate) fn parse_requirement(raw: &str) -> Result<RequirementArg, String> {
    let (skill, level) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected Skill=Level, got '{raw}'"))?;
    let skill = skill.trim();
    if skill.is_empty() {
        return Err(format!("missing skill name in '{raw}'"));
    }
    let level = level
        .parse::<ProficiencyLevel>()
        .map_err(|err| err.to_string())?;
    Ok(RequirementArg {
        skill: skill.to_string(),
        level,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_skill_level_pairs() {
        let parsed = parse_requirement("Rust = advanced").expect("valid pair");
        assert_eq!(parsed.skill, "Rust");
        assert_eq!(parsed.level, ProficiencyLevel::Advanced);
    }

    #[test]
    fn rejects_pairs_without_a_level() {
        assert!(parse_requirement("Rust").is_err());
        assert!(parse_requirement("=Expert").is_err());
        assert!(parse_requirement("Rust=Wizard").is_err());
    }

    #[test]
    fn empty_config_builds_empty_directory() {
        let service = build_staffing_service(&DirectoryConfig::default()).expect("service");
        assert!(service.personnel().expect("personnel").is_empty());
    }
}
