use chrono::{NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

/// The social networks posts can be published to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Twitter,
    Facebook,
    Instagram,
    Linkedin,
    Tiktok,
    Youtube,
    Pinterest,
}

impl Platform {
    pub const ALL: [Platform; 7] = [
        Platform::Twitter,
        Platform::Facebook,
        Platform::Instagram,
        Platform::Linkedin,
        Platform::Tiktok,
        Platform::Youtube,
        Platform::Pinterest,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            Platform::Twitter => "X (Twitter)",
            Platform::Facebook => "Facebook",
            Platform::Instagram => "Instagram",
            Platform::Linkedin => "LinkedIn",
            Platform::Tiktok => "TikTok",
            Platform::Youtube => "YouTube",
            Platform::Pinterest => "Pinterest",
        }
    }
}

/// A post as the user authored it, before per-platform formatting.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostContent {
    pub title: String,
    pub body: String,
    #[serde(default)]
    pub media_urls: Vec<String>,
}

/// Input and output of the AI generation service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AiContent {
    pub subject: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generated_text: Option<String>,
}

/// Per-platform formatting options applied at publish time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformConfig {
    pub platform: Platform,
    #[serde(default)]
    pub hashtags: Vec<String>,
    #[serde(default)]
    pub include_link: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption_override: Option<String>,
}

impl PlatformConfig {
    pub fn new(platform: Platform) -> Self {
        Self {
            platform,
            hashtags: Vec::new(),
            include_link: false,
            caption_override: None,
        }
    }
}

/// A daily posting time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyRule {
    pub time: NaiveTime,
}

/// A specific weekday and time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyRule {
    pub weekday: Weekday,
    pub time: NaiveTime,
}

/// A day of the month (1-31) and time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyRule {
    pub day_of_month: u8,
    pub time: NaiveTime,
}

/// A one-off calendar date and time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarRule {
    pub date: NaiveDate,
    pub time: NaiveTime,
}

/// Recurrence configuration stored as structured data for the backend
/// scheduler to execute. Serialized as the `scheduleConfig` JSON blob.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleConfig {
    #[serde(default)]
    pub daily: Vec<DailyRule>,
    #[serde(default)]
    pub weekly: Vec<WeeklyRule>,
    #[serde(default)]
    pub monthly: Vec<MonthlyRule>,
    #[serde(default)]
    pub calendar: Vec<CalendarRule>,
    #[serde(default)]
    pub post_immediately: bool,
}

impl ScheduleConfig {
    /// Whether any recurrence rule has been configured.
    pub fn has_rules(&self) -> bool {
        !self.daily.is_empty()
            || !self.weekly.is_empty()
            || !self.monthly.is_empty()
            || !self.calendar.is_empty()
    }

    pub fn rule_count(&self) -> usize {
        self.daily.len() + self.weekly.len() + self.monthly.len() + self.calendar.len()
    }

    /// A schedule is usable when it has at least one rule, or the user asked
    /// to post immediately instead.
    pub fn is_valid(&self) -> bool {
        self.has_rules() || self.post_immediately
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn at(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn empty_schedule_has_no_rules() {
        let config = ScheduleConfig::default();
        assert!(!config.has_rules());
        assert!(!config.is_valid());
    }

    #[test]
    fn post_immediately_makes_empty_schedule_valid() {
        let config = ScheduleConfig {
            post_immediately: true,
            ..Default::default()
        };
        assert!(!config.has_rules());
        assert!(config.is_valid());
    }

    #[test]
    fn any_rule_kind_counts() {
        let config = ScheduleConfig {
            weekly: vec![WeeklyRule {
                weekday: Weekday::Mon,
                time: at(9, 30),
            }],
            ..Default::default()
        };
        assert!(config.has_rules());
        assert_eq!(config.rule_count(), 1);
    }

    #[test]
    fn schedule_config_uses_camel_case_keys() {
        let config = ScheduleConfig {
            daily: vec![DailyRule { time: at(8, 0) }],
            post_immediately: false,
            ..Default::default()
        };
        let json = serde_json::to_value(&config).unwrap();
        assert!(json.get("postImmediately").is_some());
        assert!(json.get("daily").unwrap().is_array());
        assert!(json.get("weekly").unwrap().is_array());
        assert!(json.get("monthly").unwrap().is_array());
        assert!(json.get("calendar").unwrap().is_array());
    }

    #[test]
    fn platform_serializes_lowercase() {
        let json = serde_json::to_string(&Platform::Linkedin).unwrap();
        assert_eq!(json, "\"linkedin\"");
    }
}
