use std::sync::Arc;

use crate::api::{ApiClient, CreateScheduleRequest, PublishRequest};
use crate::model::{Platform, PlatformConfig, PostContent, ScheduleConfig};
use crate::ui::form::FormState;
use crate::wizard::{Merge, StepDef, StepOutcome, StepView, WorkflowDef};

#[derive(Debug, Clone, Default)]
pub struct ManualPostData {
    pub content: Option<PostContent>,
    pub platforms: Option<Vec<Platform>>,
    pub platform_configs: Option<Vec<PlatformConfig>>,
    pub schedule_config: Option<ScheduleConfig>,
    pub post_id: Option<String>,
}

#[derive(Debug, Default)]
pub struct ManualPostPatch {
    pub content: Option<PostContent>,
    pub platforms: Option<Vec<Platform>>,
    pub platform_configs: Option<Vec<PlatformConfig>>,
    pub schedule_config: Option<ScheduleConfig>,
    pub post_id: Option<String>,
}

impl Merge for ManualPostData {
    type Patch = ManualPostPatch;

    fn merge(&mut self, patch: ManualPostPatch) {
        if let Some(v) = patch.content {
            self.content = Some(v);
        }
        if let Some(v) = patch.platforms {
            self.platforms = Some(v);
        }
        if let Some(v) = patch.platform_configs {
            self.platform_configs = Some(v);
        }
        if let Some(v) = patch.schedule_config {
            self.schedule_config = Some(v);
        }
        if let Some(v) = patch.post_id {
            self.post_id = Some(v);
        }
    }
}

fn check_content(data: &ManualPostData) -> Result<(), String> {
    let content = data.content.as_ref();
    if content.map(|c| c.title.trim().is_empty()).unwrap_or(true) {
        return Err("Title is required".to_string());
    }
    if content.map(|c| c.body.trim().is_empty()).unwrap_or(true) {
        return Err("Content is required".to_string());
    }
    Ok(())
}

fn check_platforms(data: &ManualPostData) -> Result<(), String> {
    match data.platforms {
        Some(ref platforms) if !platforms.is_empty() => Ok(()),
        _ => Err("Select at least one platform".to_string()),
    }
}

/// A configured recurrence turns the publish into a schedule save; otherwise
/// the post goes out right away.
fn wants_schedule(data: &ManualPostData) -> bool {
    data.schedule_config
        .as_ref()
        .map(|c| c.has_rules() && !c.post_immediately)
        .unwrap_or(false)
}

pub fn workflow(api: Arc<ApiClient>) -> WorkflowDef<ManualPostData> {
    WorkflowDef::new(
        "Manual post",
        vec![
            StepDef::new("Compose", StepView::Compose).validate(check_content),
            StepDef::new("Platforms", StepView::Platforms).validate(check_platforms),
            StepDef::new("Formatting", StepView::Formatting),
            StepDef::new("Schedule", StepView::Recurrence),
            StepDef::new("Review", StepView::Review)
                .next_label("Publish Post")
                .action(move |data: &ManualPostData| {
                    let api = api.clone();
                    let data = data.clone();
                    Box::pin(async move {
                        let id = if wants_schedule(&data) {
                            let request = CreateScheduleRequest {
                                subject: data
                                    .content
                                    .as_ref()
                                    .map(|c| c.title.clone())
                                    .unwrap_or_default(),
                                platforms: data.platforms.clone().unwrap_or_default(),
                                platform_configs: data.platform_configs.clone().unwrap_or_default(),
                                media_urls: data
                                    .content
                                    .as_ref()
                                    .map(|c| c.media_urls.clone())
                                    .unwrap_or_default(),
                                schedule_config: data.schedule_config.clone().unwrap_or_default(),
                            };
                            let receipt = api
                                .create_schedule(&request)
                                .await
                                .map_err(|e| e.to_string())?;
                            api.audit("post.scheduled", format!("schedule {}", receipt.id));
                            receipt.id
                        } else {
                            let request = PublishRequest {
                                content: data.content.clone().unwrap_or_default(),
                                platforms: data.platforms.clone().unwrap_or_default(),
                                platform_configs: data.platform_configs.clone().unwrap_or_default(),
                            };
                            let receipt = api
                                .publish_post(&request)
                                .await
                                .map_err(|e| e.to_string())?;
                            api.audit("post.published", format!("post {}", receipt.id));
                            receipt.id
                        };
                        Ok(StepOutcome::AdvanceWith(ManualPostPatch {
                            post_id: Some(id),
                            ..Default::default()
                        }))
                    })
                }),
            StepDef::new("Done", StepView::Done).terminal(),
        ],
    )
}

pub fn patch_from_form(
    data: &ManualPostData,
    view: StepView,
    form: &FormState,
) -> Option<ManualPostPatch> {
    match view {
        StepView::Compose => Some(ManualPostPatch {
            content: Some(PostContent {
                title: form.title.content().to_string(),
                body: form.body.content().to_string(),
                media_urls: form.media.clone(),
            }),
            ..Default::default()
        }),
        StepView::Platforms => Some(ManualPostPatch {
            platforms: Some(form.selected_platforms()),
            ..Default::default()
        }),
        StepView::Formatting => {
            let platforms = data.platforms.clone().unwrap_or_default();
            Some(ManualPostPatch {
                platform_configs: Some(form.platform_configs(&platforms)),
                ..Default::default()
            })
        }
        StepView::Recurrence => Some(ManualPostPatch {
            schedule_config: Some(form.schedule.clone()),
            ..Default::default()
        }),
        _ => None,
    }
}

pub fn seed_form(data: &ManualPostData, view: StepView, form: &mut FormState) {
    match view {
        StepView::Compose => {
            if let Some(ref content) = data.content {
                form.title.set(&content.title);
                form.body.set(&content.body);
                form.media = content.media_urls.clone();
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
        StepView::Recurrence => {
            form.schedule = data.schedule_config.clone().unwrap_or_default();
        }
        _ => {}
    }
}

pub fn review_lines(data: &ManualPostData) -> Vec<(String, String)> {
    let mut lines = Vec::new();
    lines.push((
        "Title".to_string(),
        data.content
            .as_ref()
            .map(|c| c.title.clone())
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
        "Publish".to_string(),
        if wants_schedule(data) {
            format!(
                "scheduled ({} rule(s))",
                data.schedule_config
                    .as_ref()
                    .map(|c| c.rule_count())
                    .unwrap_or(0)
            )
        } else {
            "immediately".to_string()
        },
    ));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::Wizard;

    fn mock_wizard() -> Wizard<ManualPostData> {
        Wizard::new(workflow(Arc::new(ApiClient::mock())))
    }

    fn content_patch(title: &str, body: &str) -> ManualPostPatch {
        ManualPostPatch {
            content: Some(PostContent {
                title: title.to_string(),
                body: body.to_string(),
                media_urls: Vec::new(),
            }),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn missing_title_is_rejected() {
        let mut wizard = mock_wizard();
        wizard.update_data(content_patch("", "some body text"));

        wizard.handle_next().await;

        assert_eq!(wizard.current_step(), 1);
        assert_eq!(wizard.message().unwrap().text, "Title is required");
    }

    #[tokio::test]
    async fn missing_body_is_rejected() {
        let mut wizard = mock_wizard();
        wizard.update_data(content_patch("My Post", "  "));

        wizard.handle_next().await;

        assert_eq!(wizard.current_step(), 1);
        assert_eq!(wizard.message().unwrap().text, "Content is required");
    }

    #[tokio::test]
    async fn complete_step_one_advances() {
        let mut wizard = mock_wizard();
        wizard.update_data(content_patch("My Post", "some body text"));

        wizard.handle_next().await;

        assert_eq!(wizard.current_step(), 2);
    }

    #[tokio::test]
    async fn publish_from_review_reaches_done() {
        let mut wizard = mock_wizard();
        wizard.update_data(content_patch("My Post", "some body text"));
        wizard.update_data(ManualPostPatch {
            platforms: Some(vec![Platform::Facebook]),
            ..Default::default()
        });
        wizard.set_current_step(5);

        wizard.handle_next().await;

        assert_eq!(wizard.current_step(), 6);
        assert_eq!(wizard.data().post_id.as_deref(), Some("post-mock-1"));
    }

    #[test]
    fn recurrence_routes_publish_to_schedule() {
        let mut data = ManualPostData::default();
        assert!(!wants_schedule(&data));

        data.schedule_config = Some(ScheduleConfig {
            daily: vec![crate::model::DailyRule {
                time: chrono::NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            }],
            ..Default::default()
        });
        assert!(wants_schedule(&data));

        data.schedule_config.as_mut().unwrap().post_immediately = true;
        assert!(!wants_schedule(&data));
    }
}
