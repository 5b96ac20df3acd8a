pub mod ai_post;
pub mod manual_post;
pub mod quick_post;
pub mod schedule;

/// The workflows offered on the home screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowKind {
    QuickPost,
    AiPost,
    ManualPost,
    Schedule,
}

impl WorkflowKind {
    pub const ALL: [WorkflowKind; 4] = [
        WorkflowKind::QuickPost,
        WorkflowKind::AiPost,
        WorkflowKind::ManualPost,
        WorkflowKind::Schedule,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            WorkflowKind::QuickPost => "Quick post",
            WorkflowKind::AiPost => "AI post",
            WorkflowKind::ManualPost => "Manual post",
            WorkflowKind::Schedule => "Create schedule",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            WorkflowKind::QuickPost => "Write once, publish everywhere right now",
            WorkflowKind::AiPost => "Generate a draft from a subject, then publish",
            WorkflowKind::ManualPost => "Full control: platforms, formatting, timing",
            WorkflowKind::Schedule => "Recurring AI posts on a daily/weekly/monthly cadence",
        }
    }
}
