//! Wire types for the SkillSwap directory service.
//!
//! These mirror the JSON bodies returned by the remote API. The discovery
//! controller treats them as opaque beyond identity and display; it never
//! mutates a [`UserPreview`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A skill someone offers, with the proficiency they claim for it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OfferedSkill {
    pub skill_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proficiency_level: Option<String>,
}

/// A skill someone wants to learn, with how urgently they want it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WantedSkill {
    pub skill_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub urgency_level: Option<String>,
}

/// Public preview of a user profile, as returned by browse and search.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserPreview {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_photo_url: Option<String>,
    #[serde(default)]
    pub top_offered_skills: Vec<OfferedSkill>,
    #[serde(default)]
    pub top_wanted_skills: Vec<WantedSkill>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability: Option<Vec<String>>,
    #[serde(default = "default_true")]
    pub is_public: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member_since: Option<DateTime<Utc>>,
}

const fn default_true() -> bool {
    true
}

/// One page of browse results with full pagination metadata.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BrowsePage {
    pub users: Vec<UserPreview>,
    pub total_count: u64,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u32,
    pub has_next: bool,
    pub has_previous: bool,
}

/// Top-N free-text search results. Unpaginated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResults {
    pub users: Vec<UserPreview>,
    pub total_count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_query: Option<String>,
}

/// Usage statistics for one skill across the directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SkillStat {
    pub skill_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default)]
    pub offered_count: u64,
    #[serde(default)]
    pub wanted_count: u64,
    #[serde(default)]
    pub total_usage: u64,
}

/// Popular and trending skills, used to seed quick-filter chips.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PopularSkills {
    pub popular_skills: Vec<SkillStat>,
    pub trending_skills: Vec<SkillStat>,
    pub total_skills: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_preview_minimal_json() {
        // Optional fields may be absent entirely; is_public defaults to true.
        let preview: UserPreview =
            serde_json::from_str(r#"{"id": "u-1", "name": "Ada"}"#).unwrap();
        assert_eq!(preview.id, "u-1");
        assert_eq!(preview.name, "Ada");
        assert!(preview.is_public);
        assert!(preview.top_offered_skills.is_empty());
        assert!(preview.member_since.is_none());
    }

    #[test]
    fn test_browse_page_round_trip() {
        let raw = r#"{
            "users": [{
                "id": "u-2",
                "name": "Grace",
                "location": "Porto",
                "top_offered_skills": [
                    {"skill_name": "Rust", "category": "Programming", "proficiency_level": "expert"}
                ],
                "top_wanted_skills": [
                    {"skill_name": "Ceramics", "urgency_level": "low"}
                ],
                "availability": ["weekends"],
                "is_public": true
            }],
            "total_count": 37,
            "page": 2,
            "page_size": 12,
            "total_pages": 4,
            "has_next": true,
            "has_previous": true
        }"#;

        let page: BrowsePage = serde_json::from_str(raw).unwrap();
        assert_eq!(page.total_count, 37);
        assert_eq!(page.users.len(), 1);
        assert_eq!(page.users[0].top_offered_skills[0].skill_name, "Rust");
        assert_eq!(
            page.users[0].top_wanted_skills[0].urgency_level.as_deref(),
            Some("low")
        );
    }

    #[test]
    fn test_popular_skills_defaults() {
        let skills: PopularSkills = serde_json::from_str(
            r#"{"popular_skills": [{"skill_name": "Design"}], "trending_skills": [], "total_skills": 1}"#,
        )
        .unwrap();
        assert_eq!(skills.popular_skills[0].skill_name, "Design");
        assert_eq!(skills.popular_skills[0].total_usage, 0);
    }
}
