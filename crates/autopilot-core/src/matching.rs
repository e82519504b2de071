//! Keyword-overlap match scoring between a profile and a listing.
//!
//! Purely local; no model is consulted.

use crate::{job::MatchScore, resume::ParsedProfile};

/// Percentage of `requirements` covered by the candidate's skills.
///
/// A requirement is covered when, ignoring case, it contains one of the skills
/// or one of the skills contains it. This is plain substring containment, so an
/// empty skill or an empty requirement counts as a match. The ratio is rounded
/// half-up; an empty requirement list scores `0`.
pub fn match_score<S: AsRef<str>>(
  profile: &ParsedProfile,
  requirements: &[S],
) -> MatchScore {
  if requirements.is_empty() {
    return MatchScore::MIN;
  }

  let skills: Vec<String> = profile.skills.iter().map(|s| s.to_lowercase()).collect();

  let matched = requirements
    .iter()
    .map(|r| r.as_ref().to_lowercase())
    .filter(|req| {
      skills
        .iter()
        .any(|skill| skill.contains(req.as_str()) || req.contains(skill.as_str()))
    })
    .count();

  let ratio = matched as f64 / requirements.len() as f64;
  MatchScore::clamped((ratio * 100.0).round() as i64)
}

#[cfg(test)]
mod tests {
  use super::*;

  fn with_skills(skills: &[&str]) -> ParsedProfile {
    ParsedProfile {
      skills: skills.iter().map(|s| s.to_string()).collect(),
      ..Default::default()
    }
  }

  #[test]
  fn empty_requirements_score_zero() {
    let profile = with_skills(&["Rust"]);
    let none: [&str; 0] = [];
    assert_eq!(match_score(&profile, &none).value(), 0);
  }

  #[test]
  fn half_of_requirements_matched() {
    let profile = with_skills(&["React", "TypeScript"]);
    assert_eq!(match_score(&profile, &["react", "Node.js"]).value(), 50);
  }

  #[test]
  fn containment_works_in_both_directions() {
    let profile = with_skills(&["PostgreSQL", "Rust"]);
    // "sql" is inside "postgresql"; "rust" is inside "async rust".
    assert_eq!(match_score(&profile, &["SQL", "async Rust"]).value(), 100);
  }

  #[test]
  fn rounds_to_nearest_percent() {
    let profile = with_skills(&["Go"]);
    assert_eq!(match_score(&profile, &["go", "java", "kotlin"]).value(), 33);

    let profile = with_skills(&["Go", "Java"]);
    assert_eq!(match_score(&profile, &["go", "java", "kotlin"]).value(), 67);
  }

  #[test]
  fn empty_strings_match_by_containment() {
    // Every string contains the empty string.
    let profile = with_skills(&[""]);
    assert_eq!(match_score(&profile, &["Rust", "SQL"]).value(), 100);

    let profile = with_skills(&["Rust"]);
    assert_eq!(match_score(&profile, &["", "Kafka"]).value(), 50);
  }

  #[test]
  fn whitespace_is_not_trimmed() {
    let profile = with_skills(&["  "]);
    assert_eq!(match_score(&profile, &["Rust", "SQL"]).value(), 0);
    assert_eq!(match_score(&profile, &["Apache  Kafka"]).value(), 100);
  }

  #[test]
  fn no_skills_scores_zero() {
    let profile = ParsedProfile::default();
    assert_eq!(match_score(&profile, &["Rust"]).value(), 0);
  }
}
