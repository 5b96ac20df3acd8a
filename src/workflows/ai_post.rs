use std::sync::Arc;

use crate::api::{ApiClient, PublishRequest};
use crate::model::{AiContent, Platform, PostContent};
use crate::ui::form::FormState;
use crate::wizard::{Merge, StepDef, StepOutcome, StepView, WorkflowDef};

#[derive(Debug, Clone, Default)]
pub struct AiPostData {
    pub ai_content: Option<AiContent>,
    pub content: Option<PostContent>,
    pub platforms: Option<Vec<Platform>>,
    pub post_id: Option<String>,
}

#[derive(Debug, Default)]
pub struct AiPostPatch {
    pub ai_content: Option<AiContent>,
    pub content: Option<PostContent>,
    pub platforms: Option<Vec<Platform>>,
    pub post_id: Option<String>,
}

impl Merge for AiPostData {
    type Patch = AiPostPatch;

    fn merge(&mut self, patch: AiPostPatch) {
        if let Some(v) = patch.ai_content {
            self.ai_content = Some(v);
        }
        if let Some(v) = patch.content {
            self.content = Some(v);
        }
        if let Some(v) = patch.platforms {
            self.platforms = Some(v);
        }
        if let Some(v) = patch.post_id {
            self.post_id = Some(v);
        }
    }
}

fn check_draft(data: &AiPostData) -> Result<(), String> {
    match data.content {
        Some(ref content) if !content.body.trim().is_empty() => Ok(()),
        _ => Err("Content is required".to_string()),
    }
}

pub fn workflow(api: Arc<ApiClient>) -> WorkflowDef<AiPostData> {
    let generate_api = api.clone();
    WorkflowDef::new(
        "AI post",
        vec![
            StepDef::new("Subject", StepView::Subject)
                .next_label("Generate")
                .action(move |data: &AiPostData| {
                    let api = generate_api.clone();
                    let ai = data.ai_content.clone().unwrap_or_default();
                    Box::pin(async move {
                        if ai.subject.trim().is_empty() {
                            return Err("Subject is required".to_string());
                        }
                        let generated = api
                            .generate_content(&ai.subject, ai.tone.as_deref())
                            .await
                            .map_err(|e| e.to_string())?;
                        api.audit("content.generated", ai.subject.clone());
                        Ok(StepOutcome::AdvanceWith(AiPostPatch {
                            ai_content: Some(AiContent {
                                generated_text: Some(generated.body.clone()),
                                ..ai
                            }),
                            content: Some(PostContent {
                                title: generated.title,
                                body: generated.body,
                                media_urls: Vec::new(),
                            }),
                            ..Default::default()
                        }))
                    })
                }),
            StepDef::new("Draft", StepView::Draft).validate(check_draft),
            StepDef::new("Review", StepView::Review)
                .next_label("Publish")
                .action(move |data: &AiPostData| {
                    let api = api.clone();
                    let data = data.clone();
                    Box::pin(async move {
                        // No platform step in this flow: post to every
                        // connected platform.
                        let platforms = match data.platforms.clone() {
                            Some(platforms) if !platforms.is_empty() => platforms,
                            _ => api
                                .connected_platforms()
                                .await
                                .map_err(|e| e.to_string())?
                                .into_iter()
                                .filter(|s| s.connected)
                                .map(|s| s.platform)
                                .collect(),
                        };
                        let request = PublishRequest {
                            content: data.content.clone().unwrap_or_default(),
                            platforms,
                            platform_configs: Vec::new(),
                        };
                        let receipt = api
                            .publish_post(&request)
                            .await
                            .map_err(|e| e.to_string())?;
                        api.audit("post.published", format!("post {}", receipt.id));
                        Ok(StepOutcome::AdvanceWith(AiPostPatch {
                            post_id: Some(receipt.id),
                            ..Default::default()
                        }))
                    })
                }),
            StepDef::new("Done", StepView::Done).terminal(),
        ],
    )
}

pub fn patch_from_form(
    data: &AiPostData,
    view: StepView,
    form: &FormState,
) -> Option<AiPostPatch> {
    match view {
        StepView::Subject => Some(AiPostPatch {
            ai_content: Some(AiContent {
                subject: form.subject.content().to_string(),
                tone: (!form.tone.is_empty()).then(|| form.tone.content().to_string()),
                generated_text: data.ai_content.as_ref().and_then(|a| a.generated_text.clone()),
            }),
            ..Default::default()
        }),
        StepView::Draft => Some(AiPostPatch {
            content: Some(PostContent {
                title: form.title.content().to_string(),
                body: form.draft.content().to_string(),
                media_urls: Vec::new(),
            }),
            ..Default::default()
        }),
        _ => None,
    }
}

pub fn seed_form(data: &AiPostData, view: StepView, form: &mut FormState) {
    match view {
        StepView::Subject => {
            if let Some(ref ai) = data.ai_content {
                form.subject.set(&ai.subject);
                form.tone.set(ai.tone.as_deref().unwrap_or(""));
            }
        }
        StepView::Draft => {
            if let Some(ref content) = data.content {
                form.title.set(&content.title);
                form.draft.set(&content.body);
            }
        }
        _ => {}
    }
}

pub fn review_lines(data: &AiPostData) -> Vec<(String, String)> {
    vec![
        (
            "Subject".to_string(),
            data.ai_content
                .as_ref()
                .map(|a| a.subject.clone())
                .unwrap_or_default(),
        ),
        (
            "Title".to_string(),
            data.content
                .as_ref()
                .map(|c| c.title.clone())
                .unwrap_or_default(),
        ),
        (
            "Platforms".to_string(),
            "all connected platforms".to_string(),
        ),
    ]
}
