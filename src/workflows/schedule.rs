use std::sync::Arc;

use crate::api::{ApiClient, CreateScheduleRequest};
use crate::model::{AiContent, Platform, PlatformConfig, ScheduleConfig};
use crate::ui::form::FormState;
use crate::wizard::{Merge, StepDef, StepOutcome, StepView, WorkflowDef};

/// Everything accumulated across the seven schedule-creation steps. Fields
/// stay `None` until the step that owns them commits.
#[derive(Debug, Clone, Default)]
pub struct ScheduleWizardData {
    pub ai_content: Option<AiContent>,
    pub platforms: Option<Vec<Platform>>,
    pub platform_configs: Option<Vec<PlatformConfig>>,
    pub media_urls: Option<Vec<String>>,
    pub schedule_config: Option<ScheduleConfig>,
    pub schedule_id: Option<String>,
}

#[derive(Debug, Default)]
pub struct ScheduleWizardPatch {
    pub ai_content: Option<AiContent>,
    pub platforms: Option<Vec<Platform>>,
    pub platform_configs: Option<Vec<PlatformConfig>>,
    pub media_urls: Option<Vec<String>>,
    pub schedule_config: Option<ScheduleConfig>,
    pub schedule_id: Option<String>,
}

impl Merge for ScheduleWizardData {
    type Patch = ScheduleWizardPatch;

    fn merge(&mut self, patch: ScheduleWizardPatch) {
        if let Some(v) = patch.ai_content {
            self.ai_content = Some(v);
        }
        if let Some(v) = patch.platforms {
            self.platforms = Some(v);
        }
        if let Some(v) = patch.platform_configs {
            self.platform_configs = Some(v);
        }
        if let Some(v) = patch.media_urls {
            self.media_urls = Some(v);
        }
        if let Some(v) = patch.schedule_config {
            self.schedule_config = Some(v);
        }
        if let Some(v) = patch.schedule_id {
            self.schedule_id = Some(v);
        }
    }
}

fn check_subject(data: &ScheduleWizardData) -> Result<(), String> {
    let subject = data
        .ai_content
        .as_ref()
        .map(|a| a.subject.trim())
        .unwrap_or("");
    if subject.chars().count() < 10 {
        return Err("Subject must be at least 10 characters".to_string());
    }
    Ok(())
}

fn check_platforms(data: &ScheduleWizardData) -> Result<(), String> {
    match data.platforms {
        Some(ref platforms) if !platforms.is_empty() => Ok(()),
        _ => Err("Select at least one platform".to_string()),
    }
}

fn check_schedule(data: &ScheduleWizardData) -> Result<(), String> {
    match data.schedule_config {
        Some(ref config) if config.is_valid() => Ok(()),
        _ => Err("Schedule Required".to_string()),
    }
}

fn save_request(data: &ScheduleWizardData) -> CreateScheduleRequest {
    CreateScheduleRequest {
        subject: data
            .ai_content
            .as_ref()
            .map(|a| a.subject.clone())
            .unwrap_or_default(),
        platforms: data.platforms.clone().unwrap_or_default(),
        platform_configs: data.platform_configs.clone().unwrap_or_default(),
        media_urls: data.media_urls.clone().unwrap_or_default(),
        schedule_config: data.schedule_config.clone().unwrap_or_default(),
    }
}

pub fn workflow(api: Arc<ApiClient>) -> WorkflowDef<ScheduleWizardData> {
    WorkflowDef::new(
        "Schedule",
        vec![
            StepDef::new("Subject", StepView::Subject).validate(check_subject),
            StepDef::new("Platforms", StepView::Platforms).validate(check_platforms),
            StepDef::new("Formatting", StepView::Formatting),
            StepDef::new("Media", StepView::Media),
            StepDef::new("Schedule", StepView::Recurrence).validate(check_schedule),
            StepDef::new("Review", StepView::Review)
                .next_label("Save Schedule")
                .action(move |data: &ScheduleWizardData| {
                    let api = api.clone();
                    let request = save_request(data);
                    Box::pin(async move {
                        let receipt = api
                            .create_schedule(&request)
                            .await
                            .map_err(|e| e.to_string())?;
                        api.audit("schedule.created", format!("schedule {}", receipt.id));
                        Ok(StepOutcome::AdvanceWith(ScheduleWizardPatch {
                            schedule_id: Some(receipt.id),
                            ..Default::default()
                        }))
                    })
                }),
            StepDef::new("Done", StepView::Done).terminal(),
        ],
    )
}

pub fn patch_from_form(
    data: &ScheduleWizardData,
    view: StepView,
    form: &FormState,
) -> Option<ScheduleWizardPatch> {
    match view {
        StepView::Subject => Some(ScheduleWizardPatch {
            ai_content: Some(AiContent {
                subject: form.subject.content().to_string(),
                tone: (!form.tone.is_empty()).then(|| form.tone.content().to_string()),
                generated_text: data.ai_content.as_ref().and_then(|a| a.generated_text.clone()),
            }),
            ..Default::default()
        }),
        StepView::Platforms => Some(ScheduleWizardPatch {
            platforms: Some(form.selected_platforms()),
            ..Default::default()
        }),
        StepView::Formatting => {
            let platforms = data.platforms.clone().unwrap_or_default();
            Some(ScheduleWizardPatch {
                platform_configs: Some(form.platform_configs(&platforms)),
                ..Default::default()
            })
        }
        StepView::Media => Some(ScheduleWizardPatch {
            media_urls: Some(form.media.clone()),
            ..Default::default()
        }),
        StepView::Recurrence => Some(ScheduleWizardPatch {
            schedule_config: Some(form.schedule.clone()),
            ..Default::default()
        }),
        _ => None,
    }
}

pub fn seed_form(data: &ScheduleWizardData, view: StepView, form: &mut FormState) {
    match view {
        StepView::Subject => {
            if let Some(ref ai) = data.ai_content {
                form.subject.set(&ai.subject);
                form.tone.set(ai.tone.as_deref().unwrap_or(""));
            }
        }
        StepView::Platforms => {
            if let Some(ref platforms) = data.platforms {
                form.set_platforms(platforms);
            }
        }
        StepView::Formatting => {
            let platforms = data.platforms.clone().unwrap_or_default();
            form.sync_format_rows(&platforms);
            if let Some(ref configs) = data.platform_configs {
                form.load_platform_configs(configs);
            }
        }
        StepView::Media => {
            form.media = data.media_urls.clone().unwrap_or_default();
        }
        StepView::Recurrence => {
            form.schedule = data.schedule_config.clone().unwrap_or_default();
        }
        _ => {}
    }
}

pub fn review_lines(data: &ScheduleWizardData) -> Vec<(String, String)> {
    let mut lines = Vec::new();
    lines.push((
        "Subject".to_string(),
        data.ai_content
            .as_ref()
            .map(|a| a.subject.clone())
            .unwrap_or_default(),
    ));
    lines.push((
        "Platforms".to_string(),
        data.platforms
            .as_ref()
            .map(|p| {
                p.iter()
                    .map(|p| p.display_name())
                    .collect::<Vec<_>>()
                    .join(", ")
            })
            .unwrap_or_else(|| "none".to_string()),
    ));
    lines.push((
        "Media".to_string(),
        match data.media_urls {
            Some(ref urls) if !urls.is_empty() => format!("{} attachment(s)", urls.len()),
            _ => "none".to_string(),
        },
    ));
    lines.push((
        "Schedule".to_string(),
        match data.schedule_config {
            Some(ref config) if config.post_immediately => "post immediately".to_string(),
            Some(ref config) => format!("{} rule(s)", config.rule_count()),
            None => "not configured".to_string(),
        },
    ));
    lines
}
