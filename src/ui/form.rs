use chrono::{NaiveDate, NaiveTime, Weekday};

use crate::model::{
    CalendarRule, DailyRule, MonthlyRule, Platform, PlatformConfig, ScheduleConfig, WeeklyRule,
};
use crate::ui::input::InputBuffer;

pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Editable state for the step currently on screen. The wizard's data is only
/// touched when the user presses Next; until then everything lives here, and
/// re-entering a step reloads it from the wizard data.
pub struct FormState {
    pub focus: usize,

    // Compose / Subject / Draft
    pub title: InputBuffer,
    pub body: InputBuffer,
    pub subject: InputBuffer,
    pub tone: InputBuffer,
    pub draft: InputBuffer,

    // Media
    pub media_url: InputBuffer,
    pub media: Vec<String>,

    // Platform selection; indices follow Platform::ALL
    pub platform_cursor: usize,
    pub platform_checked: [bool; 7],

    // Formatting, one row per selected platform
    pub format_cursor: usize,
    pub format_hashtags: Vec<InputBuffer>,
    pub format_link: Vec<bool>,

    // Recurrence editor
    pub schedule: ScheduleConfig,
    pub time: InputBuffer,
    pub date: InputBuffer,
    pub day: InputBuffer,
    pub weekday_cursor: usize,
}

impl FormState {
    pub fn new() -> Self {
        Self {
            focus: 0,
            title: InputBuffer::new(),
            body: InputBuffer::new(),
            subject: InputBuffer::new(),
            tone: InputBuffer::new(),
            draft: InputBuffer::new(),
            media_url: InputBuffer::new(),
            media: Vec::new(),
            platform_cursor: 0,
            platform_checked: [false; 7],
            format_cursor: 0,
            format_hashtags: Vec::new(),
            format_link: Vec::new(),
            schedule: ScheduleConfig::default(),
            time: InputBuffer::new(),
            date: InputBuffer::new(),
            day: InputBuffer::new(),
            weekday_cursor: 0,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn selected_platforms(&self) -> Vec<Platform> {
        Platform::ALL
            .iter()
            .zip(self.platform_checked.iter())
            .filter(|&(_, &checked)| checked)
            .map(|(&platform, _)| platform)
            .collect()
    }

    pub fn set_platforms(&mut self, platforms: &[Platform]) {
        self.platform_checked = [false; 7];
        for platform in platforms {
            if let Some(idx) = Platform::ALL.iter().position(|p| p == platform) {
                self.platform_checked[idx] = true;
            }
        }
    }

    /// Resize the formatting rows to match the given selection, carrying over
    /// any existing edits for positions that survive.
    pub fn sync_format_rows(&mut self, platforms: &[Platform]) {
        self.format_hashtags.resize_with(platforms.len(), InputBuffer::new);
        self.format_link.resize(platforms.len(), false);
        if self.format_cursor >= platforms.len() {
            self.format_cursor = platforms.len().saturating_sub(1);
        }
    }

    pub fn platform_configs(&self, platforms: &[Platform]) -> Vec<PlatformConfig> {
        platforms
            .iter()
            .enumerate()
            .map(|(idx, &platform)| {
                let mut config = PlatformConfig::new(platform);
                if let Some(tags) = self.format_hashtags.get(idx) {
                    config.hashtags = tags
                        .content()
                        .split_whitespace()
                        .map(|t| t.trim_start_matches('#').to_string())
                        .filter(|t| !t.is_empty())
                        .collect();
                }
                config.include_link = self.format_link.get(idx).copied().unwrap_or(false);
                config
            })
            .collect()
    }

    pub fn load_platform_configs(&mut self, configs: &[PlatformConfig]) {
        self.format_hashtags = configs
            .iter()
            .map(|c| {
                let mut buf = InputBuffer::new();
                buf.set(&c.hashtags.join(" "));
                buf
            })
            .collect();
        self.format_link = configs.iter().map(|c| c.include_link).collect();
    }

    fn parse_time(&self) -> Result<NaiveTime, String> {
        NaiveTime::parse_from_str(self.time.content().trim(), "%H:%M")
            .map_err(|_| "Time must be HH:MM".to_string())
    }

    pub fn add_daily_rule(&mut self) -> Result<(), String> {
        let time = self.parse_time()?;
        self.schedule.daily.push(DailyRule { time });
        Ok(())
    }

    pub fn add_weekly_rule(&mut self) -> Result<(), String> {
        let time = self.parse_time()?;
        let weekday = WEEKDAYS[self.weekday_cursor % WEEKDAYS.len()];
        self.schedule.weekly.push(WeeklyRule { weekday, time });
        Ok(())
    }

    pub fn add_monthly_rule(&mut self) -> Result<(), String> {
        let time = self.parse_time()?;
        let day: u8 = self
            .day
            .content()
            .trim()
            .parse()
            .map_err(|_| "Day of month must be a number".to_string())?;
        if !(1..=31).contains(&day) {
            return Err("Day of month must be between 1 and 31".to_string());
        }
        self.schedule.monthly.push(MonthlyRule {
            day_of_month: day,
            time,
        });
        Ok(())
    }

    pub fn add_calendar_rule(&mut self) -> Result<(), String> {
        let time = self.parse_time()?;
        let date = NaiveDate::parse_from_str(self.date.content().trim(), "%Y-%m-%d")
            .map_err(|_| "Date must be YYYY-MM-DD".to_string())?;
        self.schedule.calendar.push(CalendarRule { date, time });
        Ok(())
    }

    /// Drop the most recently added rule, newest kind last.
    pub fn remove_last_rule(&mut self) {
        if self.schedule.calendar.pop().is_some()
            || self.schedule.monthly.pop().is_some()
            || self.schedule.weekly.pop().is_some()
        {
            return;
        }
        self.schedule.daily.pop();
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_selection_round_trips() {
        let mut form = FormState::new();
        form.set_platforms(&[Platform::Twitter, Platform::Pinterest]);
        assert_eq!(
            form.selected_platforms(),
            vec![Platform::Twitter, Platform::Pinterest]
        );
    }

    #[test]
    fn rule_parsing_rejects_bad_input() {
        let mut form = FormState::new();
        form.time.set("9am");
        assert!(form.add_daily_rule().is_err());

        form.time.set("09:30");
        form.add_daily_rule().unwrap();
        assert_eq!(form.schedule.daily.len(), 1);

        form.day.set("40");
        assert!(form.add_monthly_rule().is_err());
        form.day.set("15");
        form.add_monthly_rule().unwrap();
    }

    #[test]
    fn hashtags_are_split_and_stripped() {
        let mut form = FormState::new();
        let platforms = [Platform::Twitter];
        form.sync_format_rows(&platforms);
        form.format_hashtags[0].set("#launch news");

        let configs = form.platform_configs(&platforms);
        assert_eq!(configs[0].hashtags, vec!["launch", "news"]);
    }
}
