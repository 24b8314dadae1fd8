mod profile;

pub use profile::{CandidateProfile, RequirementSet};

use serde::Serialize;

use super::domain::SkillId;
use super::proficiency::ProficiencyLevel;

/// Stateless ranker that checks every candidate against every requirement.
#[derive(Debug, Clone, Copy, Default)]
pub struct MatchEngine;

/// A candidate who satisfied the full requirement set, with their surplus score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchResult {
    #[serde(flatten)]
    pub candidate: CandidateProfile,
    #[serde(rename = "matchScore")]
    pub match_score: u32,
}

/// Why a candidate dropped out on the first unmet requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortfall {
    MissingSkill(SkillId),
    BelowMinimum {
        skill_id: SkillId,
        attained: ProficiencyLevel,
        required: ProficiencyLevel,
    },
}

impl MatchEngine {
    pub fn new() -> Self {
        Self
    }

    /// Surplus score for a candidate, or the first requirement they fail.
    pub fn evaluate(
        &self,
        requirements: &RequirementSet,
        candidate: &CandidateProfile,
    ) -> Result<u32, Shortfall> {
        let mut score: u32 = 0;

        for requirement in requirements.iter() {
            let attained = candidate
                .level(requirement.skill_id)
                .ok_or(Shortfall::MissingSkill(requirement.skill_id))?;

            if !attained.meets_or_exceeds(requirement.min_level) {
                return Err(Shortfall::BelowMinimum {
                    skill_id: requirement.skill_id,
                    attained,
                    required: requirement.min_level,
                });
            }

            score += attained.surplus_over(requirement.min_level).unsigned_abs();
        }

        Ok(score)
    }

    /// Full matches only, best surplus first. An empty requirement set matches nobody.
    pub fn rank<I>(&self, requirements: &RequirementSet, population: I) -> Vec<MatchResult>
    where
        I: IntoIterator<Item = CandidateProfile>,
    {
        if requirements.is_empty() {
            return Vec::new();
        }

        let mut matches: Vec<MatchResult> = population
            .into_iter()
            .filter_map(|candidate| {
                self.evaluate(requirements, &candidate)
                    .ok()
                    .map(|match_score| MatchResult {
                        candidate,
                        match_score,
                    })
            })
            .collect();

        // sort_by is stable: equal scores keep population order.
        matches.sort_by(|a, b| b.match_score.cmp(&a.match_score));
        matches
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::staffing::domain::{PersonId, SkillRequirement};

    const SKILL_A: SkillId = SkillId(1);
    const SKILL_B: SkillId = SkillId(2);

    fn candidate(id: u64, skills: &[(SkillId, ProficiencyLevel)]) -> CandidateProfile {
        CandidateProfile {
            id: PersonId(id),
            name: format!("candidate-{id}"),
            role: None,
            email: format!("candidate-{id}@example.com"),
            skills: skills.iter().copied().collect::<BTreeMap<_, _>>(),
        }
    }

    fn requires(entries: &[(SkillId, ProficiencyLevel)]) -> RequirementSet {
        entries
            .iter()
            .map(|(skill_id, min_level)| SkillRequirement {
                skill_id: *skill_id,
                min_level: *min_level,
            })
            .collect()
    }

    fn ids(results: &[MatchResult]) -> Vec<u64> {
        results.iter().map(|result| result.candidate.id.0).collect()
    }

    #[test]
    fn empty_requirement_set_matches_nobody() {
        let population = vec![
            candidate(1, &[(SKILL_A, ProficiencyLevel::Expert)]),
            candidate(2, &[]),
        ];
        let results = MatchEngine::new().rank(&RequirementSet::default(), population);
        assert!(results.is_empty());
    }

    #[test]
    fn single_requirement_filters_and_scores() {
        let requirements = requires(&[(SKILL_A, ProficiencyLevel::Intermediate)]);
        let population = vec![
            candidate(10, &[(SKILL_A, ProficiencyLevel::Advanced)]),
            candidate(11, &[(SKILL_A, ProficiencyLevel::Beginner)]),
            candidate(12, &[(SKILL_B, ProficiencyLevel::Expert)]),
        ];

        let results = MatchEngine::new().rank(&requirements, population);
        assert_eq!(ids(&results), vec![10]);
        assert_eq!(results[0].match_score, 1);
    }

    #[test]
    fn every_requirement_must_hold() {
        let requirements = requires(&[
            (SKILL_A, ProficiencyLevel::Expert),
            (SKILL_B, ProficiencyLevel::Beginner),
        ]);
        let population = vec![
            candidate(
                20,
                &[
                    (SKILL_A, ProficiencyLevel::Expert),
                    (SKILL_B, ProficiencyLevel::Advanced),
                ],
            ),
            candidate(21, &[(SKILL_A, ProficiencyLevel::Expert)]),
        ];

        let results = MatchEngine::new().rank(&requirements, population);
        assert_eq!(ids(&results), vec![20]);
        assert_eq!(results[0].match_score, 2);
    }

    #[test]
    fn evaluate_reports_first_unmet_requirement() {
        let requirements = requires(&[
            (SKILL_A, ProficiencyLevel::Advanced),
            (SKILL_B, ProficiencyLevel::Beginner),
        ]);
        let engine = MatchEngine::new();

        let missing = candidate(30, &[(SKILL_A, ProficiencyLevel::Expert)]);
        assert_eq!(
            engine.evaluate(&requirements, &missing),
            Err(Shortfall::MissingSkill(SKILL_B))
        );

        let weak = candidate(31, &[(SKILL_A, ProficiencyLevel::Intermediate)]);
        assert_eq!(
            engine.evaluate(&requirements, &weak),
            Err(Shortfall::BelowMinimum {
                skill_id: SKILL_A,
                attained: ProficiencyLevel::Intermediate,
                required: ProficiencyLevel::Advanced,
            })
        );
    }

    #[test]
    fn ranks_by_score_and_keeps_population_order_on_ties() {
        let requirements = requires(&[(SKILL_A, ProficiencyLevel::Beginner)]);
        let population = vec![
            candidate(1, &[(SKILL_A, ProficiencyLevel::Intermediate)]),
            candidate(2, &[(SKILL_A, ProficiencyLevel::Expert)]),
            candidate(3, &[(SKILL_A, ProficiencyLevel::Intermediate)]),
            candidate(4, &[(SKILL_A, ProficiencyLevel::Beginner)]),
            candidate(5, &[(SKILL_A, ProficiencyLevel::Expert)]),
        ];

        let results = MatchEngine::new().rank(&requirements, population);
        assert_eq!(ids(&results), vec![2, 5, 1, 3, 4]);
        let scores: Vec<u32> = results.iter().map(|r| r.match_score).collect();
        assert_eq!(scores, vec![3, 3, 1, 1, 0]);
    }

    #[test]
    fn match_result_serializes_score_alongside_identity() {
        let result = MatchResult {
            candidate: candidate(9, &[(SKILL_A, ProficiencyLevel::Expert)]),
            match_score: 2,
        };
        let value = serde_json::to_value(&result).expect("serializes");
        assert_eq!(value["id"], 9);
        assert_eq!(value["email"], "candidate-9@example.com");
        assert_eq!(value["matchScore"], 2);
        assert!(value.get("skills").is_none());
    }
}
