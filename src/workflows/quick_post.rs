use std::sync::Arc;

use crate::api::{ApiClient, PublishRequest};
use crate::model::{Platform, PostContent};
use crate::ui::form::FormState;
use crate::wizard::{Merge, StepDef, StepOutcome, StepView, WorkflowDef};

/// The shortest flow: compose, confirm, done. Publishes to every connected
/// platform without per-platform formatting.
#[derive(Debug, Clone, Default)]
pub struct QuickPostData {
    pub content: Option<PostContent>,
    pub post_id: Option<String>,
}

#[derive(Debug, Default)]
pub struct QuickPostPatch {
    pub content: Option<PostContent>,
    pub post_id: Option<String>,
}

impl Merge for QuickPostData {
    type Patch = QuickPostPatch;

    fn merge(&mut self, patch: QuickPostPatch) {
        if let Some(v) = patch.content {
            self.content = Some(v);
        }
        if let Some(v) = patch.post_id {
            self.post_id = Some(v);
        }
    }
}

fn check_content(data: &QuickPostData) -> Result<(), String> {
    match data.content {
        Some(ref content) if !content.body.trim().is_empty() => Ok(()),
        _ => Err("Content is required".to_string()),
    }
}

pub fn workflow(api: Arc<ApiClient>) -> WorkflowDef<QuickPostData> {
    WorkflowDef::new(
        "Quick post",
        vec![
            StepDef::new("Compose", StepView::Compose).validate(check_content),
            StepDef::new("Review", StepView::Review)
                .next_label("Publish to All Platforms NOW")
                .action(move |data: &QuickPostData| {
                    let api = api.clone();
                    let content = data.content.clone().unwrap_or_default();
                    Box::pin(async move {
                        let platforms: Vec<Platform> = api
                            .connected_platforms()
                            .await
                            .map_err(|e| e.to_string())?
                            .into_iter()
                            .filter(|s| s.connected)
                            .map(|s| s.platform)
                            .collect();
                        if platforms.is_empty() {
                            return Err("No connected platforms to publish to".to_string());
                        }
                        let request = PublishRequest {
                            content,
                            platforms,
                            platform_configs: Vec::new(),
                        };
                        let receipt = api
                            .publish_post(&request)
                            .await
                            .map_err(|e| e.to_string())?;
                        api.audit("post.published", format!("post {}", receipt.id));
                        Ok(StepOutcome::AdvanceWith(QuickPostPatch {
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
    _data: &QuickPostData,
    view: StepView,
    form: &FormState,
) -> Option<QuickPostPatch> {
    match view {
        StepView::Compose => Some(QuickPostPatch {
            content: Some(PostContent {
                title: form.title.content().to_string(),
                body: form.body.content().to_string(),
                media_urls: Vec::new(),
            }),
            ..Default::default()
        }),
        _ => None,
    }
}

pub fn seed_form(data: &QuickPostData, view: StepView, form: &mut FormState) {
    if view == StepView::Compose {
        if let Some(ref content) = data.content {
            form.title.set(&content.title);
            form.body.set(&content.body);
        }
    }
}

pub fn review_lines(data: &QuickPostData) -> Vec<(String, String)> {
    vec![
        (
            "Title".to_string(),
            data.content
                .as_ref()
                .map(|c| c.title.clone())
                .unwrap_or_default(),
        ),
        (
            "Content".to_string(),
            data.content
                .as_ref()
                .map(|c| c.body.clone())
                .unwrap_or_default(),
        ),
        (
            "Platforms".to_string(),
            "all connected platforms".to_string(),
        ),
    ]
}
