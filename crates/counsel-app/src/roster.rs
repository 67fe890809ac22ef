//! Teacher drill-down over students and their conversations.

use counsel_core::api::TeacherApi;
use counsel_core::chat::Session;
use counsel_core::teacher::StudentRecord;
use std::sync::Arc;

/// Where the teacher currently is in the two-level drill-down.
///
/// Transitions through [`TeacherRosterController`] are the only way to move
/// between levels; there is no deeper level than the session detail.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RosterView {
    /// Top level: the list of all students.
    #[default]
    Roster,
    /// A student is selected; their embedded session list is showing.
    StudentSelected(StudentRecord),
    /// A session transcript of the selected student is showing.
    SessionDetail(StudentRecord, Session),
}

impl RosterView {
    /// The selected student, at either drill-down level.
    pub fn student(&self) -> Option<&StudentRecord> {
        match self {
            Self::Roster => None,
            Self::StudentSelected(student) | Self::SessionDetail(student, _) => Some(student),
        }
    }

    /// The open session transcript, if any.
    pub fn session(&self) -> Option<&Session> {
        match self {
            Self::SessionDetail(_, session) => Some(session),
            _ => None,
        }
    }
}

/// Owns the roster of students and the drill-down position.
///
/// The roster embeds each student's sessions, so only the transcript view
/// needs a further fetch.
pub struct TeacherRosterController {
    api: Arc<dyn TeacherApi>,
    students: Vec<StudentRecord>,
    view: RosterView,
    loading: bool,
}

impl TeacherRosterController {
    pub fn new(api: Arc<dyn TeacherApi>) -> Self {
        Self {
            api,
            students: Vec::new(),
            view: RosterView::Roster,
            loading: false,
        }
    }

    pub fn students(&self) -> &[StudentRecord] {
        &self.students
    }

    pub fn view(&self) -> &RosterView {
        &self.view
    }

    /// True while the roster fetch is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Fetches every student with embedded session summaries and replaces the
    /// roster. Failures are logged and keep the stale roster. The loading
    /// flag covers exactly the duration of the fetch.
    pub async fn load_roster(&mut self) {
        self.loading = true;
        match self.api.list_students().await {
            Ok(students) => self.students = students,
            Err(e) => tracing::warn!("failed to load student roster: {}", e),
        }
        self.loading = false;
    }

    /// Selects a student, dropping any open session detail.
    pub fn select_student(&mut self, student: StudentRecord) {
        self.view = RosterView::StudentSelected(student);
    }

    /// Fetches the full transcript of one of the selected student's sessions.
    ///
    /// No-op at the roster level (there is no student to drill into). On
    /// fetch failure the view stays where it was.
    pub async fn view_session_detail(&mut self, session_id: i64) {
        let Some(student) = self.view.student().cloned() else {
            return;
        };
        match self.api.get_session_detail(session_id).await {
            Ok(session) => self.view = RosterView::SessionDetail(student, session),
            Err(e) => tracing::warn!(session_id, "failed to load session detail: {}", e),
        }
    }

    /// Collapses exactly one drill-down level.
    pub fn back(&mut self) {
        self.view = match std::mem::take(&mut self.view) {
            RosterView::SessionDetail(student, _) => RosterView::StudentSelected(student),
            RosterView::StudentSelected(_) | RosterView::Roster => RosterView::Roster,
        };
    }
}
