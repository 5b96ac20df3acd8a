use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::api::ApiClient;
use crate::config::AppConfig;
use crate::ui::form::FormState;
use crate::ui::input::InputBuffer;
use crate::ui::theme::Theme;
use crate::wizard::{Message, StepView, Wizard};
use crate::workflows::{
    WorkflowKind, ai_post, ai_post::AiPostData, manual_post, manual_post::ManualPostData,
    quick_post, quick_post::QuickPostData, schedule, schedule::ScheduleWizardData,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Workflow picker.
    Home,
    /// An active wizard.
    Wizard,
}

macro_rules! with_wizard {
    ($active:expr, $w:ident => $body:expr) => {
        match $active {
            ActiveWizard::QuickPost($w) => $body,
            ActiveWizard::AiPost($w) => $body,
            ActiveWizard::ManualPost($w) => $body,
            ActiveWizard::Schedule($w) => $body,
        }
    };
}

/// The wizard currently hosted by the app. Each variant owns its typed data;
/// the macro delegates the operations that don't depend on the data type.
pub enum ActiveWizard {
    QuickPost(Wizard<QuickPostData>),
    AiPost(Wizard<AiPostData>),
    ManualPost(Wizard<ManualPostData>),
    Schedule(Wizard<ScheduleWizardData>),
}

impl ActiveWizard {
    pub fn kind(&self) -> WorkflowKind {
        match self {
            ActiveWizard::QuickPost(_) => WorkflowKind::QuickPost,
            ActiveWizard::AiPost(_) => WorkflowKind::AiPost,
            ActiveWizard::ManualPost(_) => WorkflowKind::ManualPost,
            ActiveWizard::Schedule(_) => WorkflowKind::Schedule,
        }
    }

    pub fn current_step(&self) -> u16 {
        with_wizard!(self, w => w.current_step())
    }

    pub fn total_steps(&self) -> u16 {
        with_wizard!(self, w => w.total_steps())
    }

    pub fn view(&self) -> StepView {
        with_wizard!(self, w => w.step().view)
    }

    pub fn step_title(&self) -> &'static str {
        with_wizard!(self, w => w.step().title)
    }

    pub fn step_titles(&self) -> Vec<&'static str> {
        with_wizard!(self, w => w.step_titles().collect())
    }

    pub fn next_label(&self) -> &'static str {
        with_wizard!(self, w => w.next_label())
    }

    pub fn is_loading(&self) -> bool {
        with_wizard!(self, w => w.is_loading())
    }

    pub fn hide_navigation(&self) -> bool {
        with_wizard!(self, w => w.hide_navigation())
    }

    pub fn message(&self) -> Option<&Message> {
        with_wizard!(self, w => w.message())
    }

    pub fn clear_message(&mut self) {
        with_wizard!(self, w => w.clear_message());
    }

    pub fn set_error(&mut self, text: String) {
        with_wizard!(self, w => w.set_error(text));
    }

    pub fn prev_step(&mut self) {
        with_wizard!(self, w => w.prev_step());
    }

    pub fn set_current_step(&mut self, step: u16) {
        with_wizard!(self, w => w.set_current_step(step));
    }

    pub fn reset(&mut self) {
        with_wizard!(self, w => w.reset());
    }

    pub async fn handle_next(&mut self) {
        with_wizard!(self, w => w.handle_next().await);
    }

    /// Flush the on-screen form into the wizard data before navigating.
    pub fn apply_form(&mut self, form: &FormState) {
        match self {
            ActiveWizard::QuickPost(w) => {
                if let Some(patch) = quick_post::patch_from_form(w.data(), w.step().view, form) {
                    w.update_data(patch);
                }
            }
            ActiveWizard::AiPost(w) => {
                if let Some(patch) = ai_post::patch_from_form(w.data(), w.step().view, form) {
                    w.update_data(patch);
                }
            }
            ActiveWizard::ManualPost(w) => {
                if let Some(patch) = manual_post::patch_from_form(w.data(), w.step().view, form) {
                    w.update_data(patch);
                }
            }
            ActiveWizard::Schedule(w) => {
                if let Some(patch) = schedule::patch_from_form(w.data(), w.step().view, form) {
                    w.update_data(patch);
                }
            }
        }
    }

    /// Load the active step's committed values back into the form so
    /// back-navigation shows what was entered.
    pub fn seed_form(&self, form: &mut FormState) {
        match self {
            ActiveWizard::QuickPost(w) => quick_post::seed_form(w.data(), w.step().view, form),
            ActiveWizard::AiPost(w) => ai_post::seed_form(w.data(), w.step().view, form),
            ActiveWizard::ManualPost(w) => manual_post::seed_form(w.data(), w.step().view, form),
            ActiveWizard::Schedule(w) => schedule::seed_form(w.data(), w.step().view, form),
        }
    }

    pub fn review_lines(&self) -> Vec<(String, String)> {
        match self {
            ActiveWizard::QuickPost(w) => quick_post::review_lines(w.data()),
            ActiveWizard::AiPost(w) => ai_post::review_lines(w.data()),
            ActiveWizard::ManualPost(w) => manual_post::review_lines(w.data()),
            ActiveWizard::Schedule(w) => schedule::review_lines(w.data()),
        }
    }

    /// Receipt id shown on the terminal step.
    pub fn receipt(&self) -> Option<String> {
        match self {
            ActiveWizard::QuickPost(w) => w.data().post_id.clone(),
            ActiveWizard::AiPost(w) => w.data().post_id.clone(),
            ActiveWizard::ManualPost(w) => w.data().post_id.clone(),
            ActiveWizard::Schedule(w) => w.data().schedule_id.clone(),
        }
    }

    pub fn done_cta(&self) -> &'static str {
        match self.kind() {
            WorkflowKind::Schedule => "Create Another Schedule",
            _ => "Create Another Post",
        }
    }

    pub fn selected_platforms(&self) -> Vec<crate::model::Platform> {
        match self {
            ActiveWizard::ManualPost(w) => w.data().platforms.clone().unwrap_or_default(),
            ActiveWizard::Schedule(w) => w.data().platforms.clone().unwrap_or_default(),
            _ => Vec::new(),
        }
    }
}

/// Main application state
pub struct App {
    pub config: AppConfig,
    pub theme: Theme,
    api: Arc<ApiClient>,
    pub screen: Screen,
    pub home_selected: usize,
    pub active: Option<ActiveWizard>,
    pub form: FormState,
    pub should_exit: bool,
    spinner_frame: usize,
}

impl App {
    pub fn new(config: AppConfig, mock: bool) -> Self {
        let api = if mock || config.general.mock {
            Arc::new(ApiClient::mock())
        } else {
            Arc::new(ApiClient::new(
                config.api.base_url.clone(),
                config.api_token(),
            ))
        };

        Self {
            config,
            theme: Theme::default(),
            api,
            screen: Screen::Home,
            home_selected: 0,
            active: None,
            form: FormState::new(),
            should_exit: false,
            spinner_frame: 0,
        }
    }

    pub fn is_mock(&self) -> bool {
        self.api.is_mock()
    }

    pub fn tick(&mut self) {
        self.spinner_frame = (self.spinner_frame + 1) % 4;
    }

    pub fn spinner_char(&self) -> char {
        const SPINNER: [char; 4] = ['|', '/', '-', '\\'];
        SPINNER[self.spinner_frame]
    }

    pub async fn handle_key(&mut self, key: KeyEvent) {
        match self.screen {
            Screen::Home => self.handle_home_key(key),
            Screen::Wizard => self.handle_wizard_key(key).await,
        }
    }

    fn handle_home_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                if self.home_selected < WorkflowKind::ALL.len() - 1 {
                    self.home_selected += 1;
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.home_selected = self.home_selected.saturating_sub(1);
            }
            KeyCode::Enter => {
                self.start_workflow(WorkflowKind::ALL[self.home_selected]);
            }
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_exit = true;
            }
            _ => {}
        }
    }

    pub fn start_workflow(&mut self, kind: WorkflowKind) {
        let api = self.api.clone();
        let active = match kind {
            WorkflowKind::QuickPost => ActiveWizard::QuickPost(Wizard::new(quick_post::workflow(api))),
            WorkflowKind::AiPost => ActiveWizard::AiPost(Wizard::new(ai_post::workflow(api))),
            WorkflowKind::ManualPost => {
                ActiveWizard::ManualPost(Wizard::new(manual_post::workflow(api)))
            }
            WorkflowKind::Schedule => ActiveWizard::Schedule(Wizard::new(schedule::workflow(api))),
        };

        self.form.reset();
        if let Some(ref tone) = self.config.defaults.tone {
            self.form.tone.set(tone);
        }
        self.form.set_platforms(&self.config.defaults.platforms);

        self.active = Some(active);
        self.screen = Screen::Wizard;
        self.load_step();
    }

    /// Re-seed the form whenever the active step changes.
    fn load_step(&mut self) {
        self.form.focus = 0;
        if let Some(ref active) = self.active {
            active.seed_form(&mut self.form);
        }
    }

    async fn handle_wizard_key(&mut self, key: KeyEvent) {
        let Some(active) = self.active.as_mut() else {
            self.screen = Screen::Home;
            return;
        };

        // Input is ignored while a step action is in flight.
        if active.is_loading() {
            return;
        }

        // Any keypress dismisses a stale message.
        if active.message().is_some() {
            active.clear_message();
        }

        if active.view() == StepView::Done {
            self.handle_done_key(key);
            return;
        }

        match key.code {
            KeyCode::Esc => {
                self.active = None;
                self.screen = Screen::Home;
                return;
            }
            KeyCode::Enter if active.view() == StepView::Media && !self.form.media_url.is_empty() => {
                let url = self.form.media_url.content().trim().to_string();
                if !url.is_empty() {
                    self.form.media.push(url);
                }
                self.form.media_url.clear();
                return;
            }
            KeyCode::Enter => {
                let before = active.current_step();
                active.apply_form(&self.form);
                active.handle_next().await;
                if active.current_step() != before {
                    self.load_step();
                }
                return;
            }
            KeyCode::Char('b') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                active.apply_form(&self.form);
                active.prev_step();
                self.load_step();
                return;
            }
            KeyCode::Tab => {
                let fields = field_count(active.view());
                if fields > 0 {
                    self.form.focus = (self.form.focus + 1) % fields;
                }
                return;
            }
            KeyCode::BackTab => {
                let fields = field_count(active.view());
                if fields > 0 {
                    self.form.focus = (self.form.focus + fields - 1) % fields;
                }
                return;
            }
            _ => {}
        }

        match active.view() {
            StepView::Compose | StepView::Subject | StepView::Draft | StepView::Media => {
                self.handle_text_key(key);
            }
            StepView::Platforms => self.handle_platforms_key(key),
            StepView::Formatting => self.handle_formatting_key(key),
            StepView::Recurrence => self.handle_recurrence_key(key),
            StepView::Review => self.handle_review_key(key),
            StepView::Done => {}
        }
    }

    fn handle_done_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('n') => {
                if let Some(ref mut active) = self.active {
                    active.reset();
                }
                self.form.reset();
                self.load_step();
            }
            KeyCode::Char('q') | KeyCode::Esc => {
                self.active = None;
                self.screen = Screen::Home;
            }
            _ => {}
        }
    }

    fn handle_text_key(&mut self, key: KeyEvent) {
        let Some(buffer) = self.focused_buffer() else {
            return;
        };
        match key.code {
            KeyCode::Char(c) => buffer.insert(c),
            KeyCode::Backspace => {
                buffer.delete_back();
            }
            KeyCode::Delete => {
                buffer.delete_forward();
            }
            KeyCode::Left => buffer.move_left(),
            KeyCode::Right => buffer.move_right(),
            KeyCode::Home => buffer.move_start(),
            KeyCode::End => buffer.move_end(),
            _ => {}
        }
    }

    fn handle_platforms_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                if self.form.platform_cursor < self.form.platform_checked.len() - 1 {
                    self.form.platform_cursor += 1;
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.form.platform_cursor = self.form.platform_cursor.saturating_sub(1);
            }
            KeyCode::Char(' ') => {
                let idx = self.form.platform_cursor;
                self.form.platform_checked[idx] = !self.form.platform_checked[idx];
            }
            _ => {}
        }
    }

    fn handle_formatting_key(&mut self, key: KeyEvent) {
        let rows = self.form.format_hashtags.len();
        match key.code {
            KeyCode::Down => {
                if rows > 0 && self.form.format_cursor < rows - 1 {
                    self.form.format_cursor += 1;
                }
            }
            KeyCode::Up => {
                self.form.format_cursor = self.form.format_cursor.saturating_sub(1);
            }
            KeyCode::Char(' ') => {
                let idx = self.form.format_cursor;
                if let Some(link) = self.form.format_link.get_mut(idx) {
                    *link = !*link;
                }
            }
            KeyCode::Char(c) => {
                let idx = self.form.format_cursor;
                if let Some(buffer) = self.form.format_hashtags.get_mut(idx) {
                    buffer.insert(c);
                }
            }
            KeyCode::Backspace => {
                let idx = self.form.format_cursor;
                if let Some(buffer) = self.form.format_hashtags.get_mut(idx) {
                    buffer.delete_back();
                }
            }
            _ => {}
        }
    }

    fn handle_recurrence_key(&mut self, key: KeyEvent) {
        // Letters are commands here; the time/date/day inputs only ever hold
        // digits and separators.
        let result = match key.code {
            KeyCode::Char('d') => self.form.add_daily_rule(),
            KeyCode::Char('w') => self.form.add_weekly_rule(),
            KeyCode::Char('m') => self.form.add_monthly_rule(),
            KeyCode::Char('c') => self.form.add_calendar_rule(),
            KeyCode::Char('i') => {
                self.form.schedule.post_immediately = !self.form.schedule.post_immediately;
                Ok(())
            }
            KeyCode::Char('x') => {
                self.form.remove_last_rule();
                Ok(())
            }
            KeyCode::Left => {
                self.form.weekday_cursor = (self.form.weekday_cursor + 6) % 7;
                Ok(())
            }
            KeyCode::Right => {
                self.form.weekday_cursor = (self.form.weekday_cursor + 1) % 7;
                Ok(())
            }
            KeyCode::Char(c) if c.is_ascii_digit() || c == ':' || c == '-' => {
                if let Some(buffer) = self.focused_buffer() {
                    buffer.insert(c);
                }
                Ok(())
            }
            KeyCode::Backspace => {
                if let Some(buffer) = self.focused_buffer() {
                    buffer.delete_back();
                }
                Ok(())
            }
            _ => Ok(()),
        };

        if let Err(text) = result {
            if let Some(ref mut active) = self.active {
                active.set_error(text);
            }
        }
    }

    fn handle_review_key(&mut self, key: KeyEvent) {
        // Digits jump back to the numbered step for edits.
        if let KeyCode::Char(c) = key.code {
            if let Some(num) = c.to_digit(10) {
                if num >= 1 {
                    if let Some(ref mut active) = self.active {
                        if (num as u16) < active.current_step() {
                            active.set_current_step(num as u16);
                        }
                    }
                    self.load_step();
                }
            }
        }
    }

    fn focused_buffer(&mut self) -> Option<&mut InputBuffer> {
        let view = self.active.as_ref()?.view();
        let focus = self.form.focus;
        match view {
            StepView::Compose => match focus {
                0 => Some(&mut self.form.title),
                1 => Some(&mut self.form.body),
                _ => None,
            },
            StepView::Subject => match focus {
                0 => Some(&mut self.form.subject),
                1 => Some(&mut self.form.tone),
                _ => None,
            },
            StepView::Draft => match focus {
                0 => Some(&mut self.form.title),
                1 => Some(&mut self.form.draft),
                _ => None,
            },
            StepView::Media => Some(&mut self.form.media_url),
            StepView::Recurrence => match focus {
                0 => Some(&mut self.form.time),
                1 => Some(&mut self.form.date),
                2 => Some(&mut self.form.day),
                _ => None,
            },
            _ => None,
        }
    }
}

/// Number of focusable text fields per view.
fn field_count(view: StepView) -> usize {
    match view {
        StepView::Compose | StepView::Subject | StepView::Draft => 2,
        StepView::Media => 1,
        StepView::Recurrence => 3,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, KeyModifiers};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn mock_app() -> App {
        App::new(AppConfig::default(), true)
    }

    #[tokio::test]
    async fn home_enter_starts_selected_workflow() {
        let mut app = mock_app();
        app.handle_key(key(KeyCode::Down)).await;
        app.handle_key(key(KeyCode::Enter)).await;

        assert_eq!(app.screen, Screen::Wizard);
        let active = app.active.as_ref().unwrap();
        assert_eq!(active.kind(), WorkflowKind::AiPost);
        assert_eq!(active.current_step(), 1);
    }

    #[tokio::test]
    async fn typing_flows_into_the_focused_field() {
        let mut app = mock_app();
        app.start_workflow(WorkflowKind::ManualPost);

        for c in "My Post".chars() {
            app.handle_key(key(KeyCode::Char(c))).await;
        }
        app.handle_key(key(KeyCode::Tab)).await;
        for c in "body".chars() {
            app.handle_key(key(KeyCode::Char(c))).await;
        }

        assert_eq!(app.form.title.content(), "My Post");
        assert_eq!(app.form.body.content(), "body");
    }

    #[tokio::test]
    async fn enter_applies_the_form_and_advances() {
        let mut app = mock_app();
        app.start_workflow(WorkflowKind::ManualPost);

        // Empty form: validation keeps us on step 1.
        app.handle_key(key(KeyCode::Enter)).await;
        let active = app.active.as_ref().unwrap();
        assert_eq!(active.current_step(), 1);
        assert!(active.message().unwrap().is_error);

        app.form.title.set("My Post");
        app.form.body.set("body text");
        app.handle_key(key(KeyCode::Enter)).await;
        assert_eq!(app.active.as_ref().unwrap().current_step(), 2);
    }

    #[tokio::test]
    async fn back_navigation_keeps_entered_values() {
        let mut app = mock_app();
        app.start_workflow(WorkflowKind::ManualPost);
        app.form.title.set("My Post");
        app.form.body.set("body text");
        app.handle_key(key(KeyCode::Enter)).await;
        assert_eq!(app.active.as_ref().unwrap().current_step(), 2);

        app.handle_key(KeyEvent::new(KeyCode::Char('b'), KeyModifiers::CONTROL))
            .await;

        assert_eq!(app.active.as_ref().unwrap().current_step(), 1);
        assert_eq!(app.form.title.content(), "My Post");
    }

    #[tokio::test]
    async fn platforms_toggle_with_space() {
        let mut app = mock_app();
        app.start_workflow(WorkflowKind::Schedule);
        app.form.subject.set("Launch day announcement");
        app.handle_key(key(KeyCode::Enter)).await;
        assert_eq!(app.active.as_ref().unwrap().current_step(), 2);

        app.handle_key(key(KeyCode::Char(' '))).await;
        app.handle_key(key(KeyCode::Down)).await;
        app.handle_key(key(KeyCode::Char(' '))).await;

        assert_eq!(app.form.selected_platforms().len(), 2);
    }

    #[tokio::test]
    async fn done_screen_offers_a_fresh_session() {
        let mut app = mock_app();
        app.start_workflow(WorkflowKind::QuickPost);
        app.form.body.set("shipping today");
        app.handle_key(key(KeyCode::Enter)).await;
        app.handle_key(key(KeyCode::Enter)).await;
        assert_eq!(app.active.as_ref().unwrap().current_step(), 3);
        assert!(app.active.as_ref().unwrap().hide_navigation());

        app.handle_key(key(KeyCode::Char('n'))).await;

        let active = app.active.as_ref().unwrap();
        assert_eq!(active.current_step(), 1);
        assert!(active.receipt().is_none());
        assert!(app.form.body.is_empty());
    }
}
