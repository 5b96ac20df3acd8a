use futures::future::BoxFuture;

use super::Merge;

/// Which generic body view renders a step. Workflows share views; the view
/// says nothing about validation or side effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepView {
    /// Title + body text entry.
    Compose,
    /// AI subject + tone entry.
    Subject,
    /// Review/edit of AI-generated text.
    Draft,
    /// Platform selection checklist.
    Platforms,
    /// Per-platform formatting options.
    Formatting,
    /// Media URL list entry.
    Media,
    /// Recurrence rule editor.
    Recurrence,
    /// Summary of everything entered so far.
    Review,
    /// Terminal success screen with its own call-to-action.
    Done,
}

/// What an async step action decided after its external call resolved.
#[derive(Debug)]
pub enum StepOutcome<P> {
    /// Move to the next step.
    Advance,
    /// Merge the patch (e.g. a receipt id), then move to the next step.
    AdvanceWith(P),
    /// Remain on the current step without error.
    Stay,
}

pub type ValidateFn<D> = Box<dyn Fn(&D) -> Result<(), String> + Send + Sync>;
pub type ActionFn<D> = Box<
    dyn Fn(&D) -> BoxFuture<'static, Result<StepOutcome<<D as Merge>::Patch>, String>>
        + Send
        + Sync,
>;

/// Validation and/or side-effect logic bound to a specific step. Steps with
/// no handler advance unconditionally.
pub enum StepHandler<D: Merge> {
    /// Pure check over the accumulated data; `Err` blocks the advance and the
    /// message is shown to the user.
    Validate(ValidateFn<D>),
    /// External call (publish, save, generate). Only its outcome decides
    /// whether the step pointer moves.
    Action(ActionFn<D>),
}

/// One step of a workflow: presentation metadata plus the handler that gates
/// the Next transition.
pub struct StepDef<D: Merge> {
    pub title: &'static str,
    pub view: StepView,
    /// Label for the Next control; `None` renders "Next". Side-effect steps
    /// carry an explicit label naming the transition they trigger.
    pub next_label: Option<&'static str>,
    /// Terminal steps render their own call-to-action and suppress the
    /// generic Prev/Next bar.
    pub terminal: bool,
    pub handler: Option<StepHandler<D>>,
}

impl<D: Merge> StepDef<D> {
    pub fn new(title: &'static str, view: StepView) -> Self {
        Self {
            title,
            view,
            next_label: None,
            terminal: false,
            handler: None,
        }
    }

    pub fn next_label(mut self, label: &'static str) -> Self {
        self.next_label = Some(label);
        self
    }

    pub fn terminal(mut self) -> Self {
        self.terminal = true;
        self
    }

    pub fn validate(
        mut self,
        f: impl Fn(&D) -> Result<(), String> + Send + Sync + 'static,
    ) -> Self {
        self.handler = Some(StepHandler::Validate(Box::new(f)));
        self
    }

    pub fn action(
        mut self,
        f: impl Fn(&D) -> BoxFuture<'static, Result<StepOutcome<D::Patch>, String>>
            + Send
            + Sync
            + 'static,
    ) -> Self {
        self.handler = Some(StepHandler::Action(Box::new(f)));
        self
    }
}

/// An ordered list of step definitions; the step count is fixed for the
/// lifetime of any wizard built from it.
pub struct WorkflowDef<D: Merge> {
    pub name: &'static str,
    pub steps: Vec<StepDef<D>>,
}

impl<D: Merge> WorkflowDef<D> {
    pub fn new(name: &'static str, steps: Vec<StepDef<D>>) -> Self {
        assert!(!steps.is_empty(), "workflow must have at least one step");
        Self { name, steps }
    }

    pub fn total_steps(&self) -> u16 {
        self.steps.len() as u16
    }

    /// Look up a step by its 1-indexed position. Out-of-range indices fall
    /// back to the first step; the session invariant keeps this unreachable
    /// in practice.
    pub fn step(&self, step: u16) -> &StepDef<D> {
        self.steps
            .get(step.saturating_sub(1) as usize)
            .unwrap_or(&self.steps[0])
    }
}
