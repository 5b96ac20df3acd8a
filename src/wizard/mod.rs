mod step;

pub use step::{ActionFn, StepDef, StepHandler, StepOutcome, StepView, ValidateFn, WorkflowDef};

/// Accumulated wizard data. Patches are shallow and additive: fields absent
/// from a patch are left untouched, so values entered on earlier steps
/// survive later merges.
pub trait Merge: Default {
    type Patch;

    fn merge(&mut self, patch: Self::Patch);
}

/// Message displayed to the user
#[derive(Debug, Clone)]
pub struct Message {
    pub text: String,
    pub is_error: bool,
}

/// A running wizard: the session state plus the only API allowed to mutate
/// it. Step transitions are clamped to `[1, total_steps]`; no operation
/// fails or panics.
pub struct Wizard<D: Merge> {
    workflow: WorkflowDef<D>,
    current_step: u16,
    data: D,
    is_loading: bool,
    hide_navigation: bool,
    message: Option<Message>,
    on_complete: Option<Box<dyn FnMut() + Send>>,
}

impl<D: Merge> Wizard<D> {
    pub fn new(workflow: WorkflowDef<D>) -> Self {
        Self {
            workflow,
            current_step: 1,
            data: D::default(),
            is_loading: false,
            hide_navigation: false,
            message: None,
            on_complete: None,
        }
    }

    /// Callback invoked when Next is pressed on the final step.
    pub fn on_complete(mut self, cb: impl FnMut() + Send + 'static) -> Self {
        self.on_complete = Some(Box::new(cb));
        self
    }

    pub fn workflow_name(&self) -> &'static str {
        self.workflow.name
    }

    pub fn current_step(&self) -> u16 {
        self.current_step
    }

    pub fn total_steps(&self) -> u16 {
        self.workflow.total_steps()
    }

    /// Definition of the active step.
    pub fn step(&self) -> &StepDef<D> {
        self.workflow.step(self.current_step)
    }

    pub fn step_titles(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.workflow.steps.iter().map(|s| s.title)
    }

    pub fn data(&self) -> &D {
        &self.data
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.is_loading = loading;
    }

    /// Whether the generic Prev/Next bar is suppressed, either explicitly or
    /// because the active step is terminal.
    pub fn hide_navigation(&self) -> bool {
        self.hide_navigation || self.step().terminal
    }

    pub fn set_hide_navigation(&mut self, hide: bool) {
        self.hide_navigation = hide;
    }

    pub fn message(&self) -> Option<&Message> {
        self.message.as_ref()
    }

    pub fn set_error(&mut self, text: String) {
        self.message = Some(Message {
            text,
            is_error: true,
        });
    }

    pub fn set_info(&mut self, text: String) {
        self.message = Some(Message {
            text,
            is_error: false,
        });
    }

    pub fn clear_message(&mut self) {
        self.message = None;
    }

    /// Label for the Next control on the active step.
    pub fn next_label(&self) -> &'static str {
        self.step().next_label.unwrap_or("Next")
    }

    /// Structural advance only; business gating happens in [`handle_next`].
    pub fn next_step(&mut self) {
        if self.current_step < self.total_steps() {
            self.current_step += 1;
        }
    }

    /// Previously entered values stay in `data` on back-navigation.
    pub fn prev_step(&mut self) {
        if self.current_step > 1 {
            self.current_step -= 1;
        }
    }

    /// Direct jump, used by review-screen "edit this section" links. Always
    /// clamped to the valid range.
    pub fn set_current_step(&mut self, step: u16) {
        self.current_step = step.clamp(1, self.total_steps());
    }

    pub fn update_data(&mut self, patch: D::Patch) {
        self.data.merge(patch);
    }

    /// Restore the wizard to a fresh session of the same workflow.
    pub fn reset(&mut self) {
        self.current_step = 1;
        self.data = D::default();
        self.is_loading = false;
        self.hide_navigation = false;
        self.message = None;
    }

    /// The Next gate. Ignores the press entirely while loading; on the final
    /// step fires `on_complete` instead of advancing; otherwise dispatches
    /// the active step's handler and advances only when it allows.
    pub async fn handle_next(&mut self) {
        if self.is_loading {
            return;
        }

        if self.current_step == self.total_steps() {
            if let Some(cb) = self.on_complete.as_mut() {
                cb();
            }
            return;
        }

        self.is_loading = true;

        let outcome = match self.step().handler.as_ref() {
            None => Ok(StepOutcome::Advance),
            Some(StepHandler::Validate(check)) => check(&self.data).map(|()| StepOutcome::Advance),
            Some(StepHandler::Action(run)) => run(&self.data).await,
        };

        match outcome {
            Ok(StepOutcome::Advance) => {
                self.message = None;
                self.next_step();
            }
            Ok(StepOutcome::AdvanceWith(patch)) => {
                self.message = None;
                self.data.merge(patch);
                self.next_step();
            }
            Ok(StepOutcome::Stay) => {}
            Err(text) => {
                self.set_error(text);
            }
        }

        self.is_loading = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, Clone, Default, PartialEq)]
    struct TestData {
        name: Option<String>,
        count: Option<u32>,
    }

    #[derive(Default)]
    struct TestPatch {
        name: Option<String>,
        count: Option<u32>,
    }

    impl Merge for TestData {
        type Patch = TestPatch;

        fn merge(&mut self, patch: TestPatch) {
            if let Some(name) = patch.name {
                self.name = Some(name);
            }
            if let Some(count) = patch.count {
                self.count = Some(count);
            }
        }
    }

    fn plain_workflow(steps: u16) -> WorkflowDef<TestData> {
        WorkflowDef::new(
            "test",
            (0..steps)
                .map(|_| StepDef::new("Step", StepView::Compose))
                .collect(),
        )
    }

    #[test]
    fn navigation_stays_in_bounds() {
        let mut wizard = Wizard::new(plain_workflow(4));

        wizard.prev_step();
        assert_eq!(wizard.current_step(), 1);

        for _ in 0..10 {
            wizard.next_step();
        }
        assert_eq!(wizard.current_step(), 4);

        for _ in 0..10 {
            wizard.prev_step();
        }
        assert_eq!(wizard.current_step(), 1);
    }

    #[test]
    fn set_current_step_clamps() {
        let mut wizard = Wizard::new(plain_workflow(6));

        wizard.set_current_step(0);
        assert_eq!(wizard.current_step(), 1);

        wizard.set_current_step(99);
        assert_eq!(wizard.current_step(), 6);

        wizard.set_current_step(3);
        assert_eq!(wizard.current_step(), 3);
    }

    #[test]
    fn merges_are_additive() {
        let mut wizard = Wizard::new(plain_workflow(3));

        wizard.update_data(TestPatch {
            name: Some("hello".into()),
            ..Default::default()
        });
        wizard.update_data(TestPatch {
            count: Some(7),
            ..Default::default()
        });

        assert_eq!(wizard.data().name.as_deref(), Some("hello"));
        assert_eq!(wizard.data().count, Some(7));
    }

    #[test]
    fn back_navigation_preserves_data() {
        let mut wizard = Wizard::new(plain_workflow(4));

        wizard.update_data(TestPatch {
            name: Some("kept".into()),
            ..Default::default()
        });
        wizard.next_step();
        wizard.update_data(TestPatch {
            count: Some(2),
            ..Default::default()
        });
        wizard.next_step();

        let snapshot = wizard.data().clone();
        wizard.prev_step();
        wizard.prev_step();

        assert_eq!(wizard.current_step(), 1);
        assert_eq!(*wizard.data(), snapshot);
    }

    #[test]
    fn reset_restores_initial_state() {
        let mut wizard = Wizard::new(plain_workflow(5));
        wizard.update_data(TestPatch {
            name: Some("gone".into()),
            count: Some(1),
        });
        wizard.next_step();
        wizard.next_step();
        wizard.set_error("boom".into());

        wizard.reset();

        assert_eq!(wizard.current_step(), 1);
        assert_eq!(*wizard.data(), TestData::default());
        assert!(wizard.message().is_none());
        assert!(!wizard.is_loading());
    }

    #[tokio::test]
    async fn validation_failure_blocks_advance() {
        let workflow = WorkflowDef::new(
            "test",
            vec![
                StepDef::new("Gate", StepView::Compose).validate(|data: &TestData| {
                    if data.name.is_some() {
                        Ok(())
                    } else {
                        Err("Name is required".to_string())
                    }
                }),
                StepDef::new("After", StepView::Review),
            ],
        );
        let mut wizard = Wizard::new(workflow);

        wizard.handle_next().await;
        assert_eq!(wizard.current_step(), 1);
        let message = wizard.message().expect("error message expected");
        assert!(message.is_error);
        assert_eq!(message.text, "Name is required");
        assert!(!wizard.is_loading());

        wizard.update_data(TestPatch {
            name: Some("ok".into()),
            ..Default::default()
        });
        wizard.handle_next().await;
        assert_eq!(wizard.current_step(), 2);
        assert!(wizard.message().is_none());
    }

    #[tokio::test]
    async fn loading_guard_ignores_repeated_next() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = calls.clone();
        let workflow = WorkflowDef::new(
            "test",
            vec![
                StepDef::new("Gate", StepView::Compose).validate(move |_: &TestData| {
                    seen.fetch_add(1, Ordering::SeqCst);
                    Ok(())
                }),
                StepDef::new("After", StepView::Review),
            ],
        );
        let mut wizard = Wizard::new(workflow);

        wizard.set_loading(true);
        wizard.handle_next().await;
        assert_eq!(wizard.current_step(), 1);
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        wizard.set_loading(false);
        wizard.handle_next().await;
        assert_eq!(wizard.current_step(), 2);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn steps_without_handlers_advance_immediately() {
        let mut wizard = Wizard::new(plain_workflow(3));
        wizard.handle_next().await;
        wizard.handle_next().await;
        assert_eq!(wizard.current_step(), 3);
    }

    #[tokio::test]
    async fn next_on_final_step_fires_on_complete_without_advancing() {
        let fired = Arc::new(AtomicUsize::new(0));
        let seen = fired.clone();
        let mut wizard = Wizard::new(plain_workflow(3))
            .on_complete(move || {
                seen.fetch_add(1, Ordering::SeqCst);
            });

        wizard.set_current_step(3);
        wizard.handle_next().await;

        assert_eq!(wizard.current_step(), 3);
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn action_error_surfaces_message_and_stays() {
        let workflow = WorkflowDef::new(
            "test",
            vec![
                StepDef::new("Publish", StepView::Review).action(|_: &TestData| {
                    Box::pin(async { Err("backend says no".to_string()) })
                }),
                StepDef::new("Done", StepView::Done).terminal(),
            ],
        );
        let mut wizard = Wizard::new(workflow);

        wizard.handle_next().await;

        assert_eq!(wizard.current_step(), 1);
        assert_eq!(wizard.message().unwrap().text, "backend says no");
        assert!(!wizard.is_loading());
    }

    #[tokio::test]
    async fn action_can_commit_a_patch_before_advancing() {
        let workflow = WorkflowDef::new(
            "test",
            vec![
                StepDef::new("Publish", StepView::Review).action(|_: &TestData| {
                    Box::pin(async {
                        Ok(StepOutcome::AdvanceWith(TestPatch {
                            count: Some(42),
                            ..Default::default()
                        }))
                    })
                }),
                StepDef::new("Done", StepView::Done).terminal(),
            ],
        );
        let mut wizard = Wizard::new(workflow);

        wizard.handle_next().await;

        assert_eq!(wizard.current_step(), 2);
        assert_eq!(wizard.data().count, Some(42));
    }

    #[tokio::test]
    async fn action_stay_leaves_step_unchanged() {
        let workflow = WorkflowDef::new(
            "test",
            vec![
                StepDef::new("Hold", StepView::Review)
                    .action(|_: &TestData| Box::pin(async { Ok(StepOutcome::Stay) })),
                StepDef::new("Done", StepView::Done).terminal(),
            ],
        );
        let mut wizard = Wizard::new(workflow);

        wizard.handle_next().await;

        assert_eq!(wizard.current_step(), 1);
        assert!(wizard.message().is_none());
    }

    #[test]
    fn terminal_step_hides_navigation() {
        let workflow = WorkflowDef::new(
            "test",
            vec![
                StepDef::<TestData>::new("Edit", StepView::Compose),
                StepDef::new("Done", StepView::Done).terminal(),
            ],
        );
        let mut wizard = Wizard::new(workflow);

        assert!(!wizard.hide_navigation());
        wizard.next_step();
        assert!(wizard.hide_navigation());

        wizard.prev_step();
        wizard.set_hide_navigation(true);
        assert!(wizard.hide_navigation());
    }
}
