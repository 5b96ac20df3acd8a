use serde::{Deserialize, Serialize};

use crate::model::{Platform, PlatformConfig, PostContent, ScheduleConfig};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub subject: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tone: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedContent {
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishRequest {
    pub content: PostContent,
    pub platforms: Vec<Platform>,
    #[serde(default)]
    pub platform_configs: Vec<PlatformConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostReceipt {
    pub id: String,
    #[serde(default)]
    pub post_urls: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateScheduleRequest {
    pub subject: String,
    pub platforms: Vec<Platform>,
    #[serde(default)]
    pub platform_configs: Vec<PlatformConfig>,
    #[serde(default)]
    pub media_urls: Vec<String>,
    pub schedule_config: ScheduleConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleReceipt {
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformStatus {
    pub platform: Platform,
    pub connected: bool,
}

/// Backend error payload; `message` is shown to the user verbatim.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}
