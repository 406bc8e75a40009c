//! Deterministic rule scorer and score combiner.
//!
//! Both functions are pure and total: any lead gets a rule score in [0, 50]
//! and any (rule, points) pair combines to a final score in [0, 100].

use leadqual_core::Lead;

/// Upper bound of the rule score.
pub const RULE_SCORE_MAX: i32 = 50;

/// Upper bound of the combined final score.
pub const FINAL_SCORE_MAX: i32 = 100;

/// Roles that carry purchasing authority. Matched as substrings of the
/// lowercased role text.
const DECISION_MAKER_KEYWORDS: &[&str] = &["ceo", "cto", "founder", "director", "vp", "head"];

/// Roles that influence a purchase without owning it.
const INFLUENCER_KEYWORDS: &[&str] = &["manager", "lead"];

/// Industries squarely inside the ideal customer profile.
const CORE_INDUSTRY_KEYWORDS: &[&str] = &["tech", "software", "saas"];

/// Industries adjacent to the ideal customer profile.
const ADJACENT_INDUSTRY_KEYWORDS: &[&str] = &["finance", "healthcare"];

/// Score a lead on role relevance (max 20), industry match (max 20), and
/// data completeness (10). Tiers are mutually exclusive with the higher tier
/// checked first. The sum is capped at [`RULE_SCORE_MAX`].
#[must_use]
pub fn rule_score(lead: &Lead) -> i32 {
    let mut score = 0;

    let role = lead.role.to_lowercase();
    if contains_any(&role, DECISION_MAKER_KEYWORDS) {
        score += 20;
    } else if contains_any(&role, INFLUENCER_KEYWORDS) {
        score += 10;
    }

    let industry = lead.industry.to_lowercase();
    if contains_any(&industry, CORE_INDUSTRY_KEYWORDS) {
        score += 20;
    } else if contains_any(&industry, ADJACENT_INDUSTRY_KEYWORDS) {
        score += 10;
    }

    if all_fields_present(lead) {
        score += 10;
    }

    // Currently unreachable (20 + 20 + 10 = 50) but kept as an explicit
    // invariant in case a component's maximum changes.
    score.min(RULE_SCORE_MAX)
}

/// Combine the rule score with the classifier's points: `min(rule + ai, 100)`.
#[must_use]
pub fn combine_score(rule: i32, ai_points: i32) -> i32 {
    (rule + ai_points).min(FINAL_SCORE_MAX)
}

fn contains_any(haystack: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| haystack.contains(k))
}

fn all_fields_present(lead: &Lead) -> bool {
    [
        &lead.name,
        &lead.role,
        &lead.company,
        &lead.industry,
        &lead.location,
        &lead.linkedin_bio,
    ]
    .iter()
    .all(|f| !f.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lead(role: &str, industry: &str) -> Lead {
        Lead {
            id: 1,
            name: "Jane Doe".into(),
            role: role.into(),
            company: "Acme".into(),
            industry: industry.into(),
            location: "NY".into(),
            linkedin_bio: "bio".into(),
        }
    }

    #[test]
    fn decision_maker_in_core_industry_with_full_data_scores_fifty() {
        let lead = lead("CEO", "Enterprise Software");
        assert_eq!(rule_score(&lead), 50);
    }

    #[test]
    fn blank_lead_scores_zero() {
        let mut lead = lead("", "");
        lead.linkedin_bio = String::new();
        assert_eq!(rule_score(&lead), 0);
    }

    #[test]
    fn decision_maker_tier_wins_over_influencer() {
        // "Head of Engineering Lead" matches both tiers; only the 20 applies.
        // Industry is neutral, completeness bonus applies: 20 + 0 + 10.
        let lead = lead("Head of Engineering Lead", "retail");
        assert_eq!(rule_score(&lead), 30);
    }

    #[test]
    fn influencer_role_scores_ten() {
        // 10 role + 0 industry + 10 completeness.
        assert_eq!(rule_score(&lead("Product Manager", "retail")), 20);
    }

    #[test]
    fn role_match_is_case_insensitive() {
        assert_eq!(rule_score(&lead("FOUNDER", "retail")), 30);
    }

    #[test]
    fn adjacent_industry_scores_ten() {
        // 0 role + 10 industry + 10 completeness.
        assert_eq!(rule_score(&lead("Student", "Healthcare")), 20);
    }

    #[test]
    fn whitespace_only_field_forfeits_completeness_bonus() {
        let mut lead = lead("VP Sales", "SaaS");
        lead.location = "   ".into();
        assert_eq!(rule_score(&lead), 40);
    }

    #[test]
    fn rule_score_stays_within_bounds() {
        let samples = [
            lead("CEO and CTO and Founder", "tech software saas"),
            lead("intern", "agriculture"),
            lead("", ""),
            lead("vp", "finance"),
        ];
        for s in &samples {
            let score = rule_score(s);
            assert!((0..=RULE_SCORE_MAX).contains(&score), "out of range: {score}");
        }
    }

    #[test]
    fn combine_caps_at_one_hundred() {
        assert_eq!(combine_score(50, 50), 100);
        assert_eq!(combine_score(40, 30), 70);
        assert_eq!(combine_score(0, 10), 10);
        // Guard against future range changes in either input.
        assert_eq!(combine_score(90, 50), 100);
    }
}
