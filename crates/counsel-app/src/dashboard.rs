//! Teacher dashboard composition: students tab + documents tab.

use crate::documents::DocumentRepositoryController;
use crate::roster::TeacherRosterController;
use counsel_core::api::{DocumentApi, TeacherApi};
use std::sync::Arc;

/// Which dashboard tab is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DashboardTab {
    #[default]
    Students,
    Documents,
}

/// The teacher view: a tab selector over two independent controllers.
///
/// The tab is orthogonal to the roster drill-down — switching away and back
/// must land the teacher exactly where they were.
pub struct TeacherDashboard {
    tab: DashboardTab,
    roster: TeacherRosterController,
    documents: DocumentRepositoryController,
}

impl TeacherDashboard {
    pub fn new(teacher_api: Arc<dyn TeacherApi>, document_api: Arc<dyn DocumentApi>) -> Self {
        Self {
            tab: DashboardTab::Students,
            roster: TeacherRosterController::new(teacher_api),
            documents: DocumentRepositoryController::new(document_api),
        }
    }

    pub fn tab(&self) -> DashboardTab {
        self.tab
    }

    /// Switches tabs. Deliberately touches nothing else: drill-down state and
    /// document state both survive.
    pub fn select_tab(&mut self, tab: DashboardTab) {
        self.tab = tab;
    }

    pub fn roster(&self) -> &TeacherRosterController {
        &self.roster
    }

    pub fn roster_mut(&mut self) -> &mut TeacherRosterController {
        &mut self.roster
    }

    pub fn documents(&self) -> &DocumentRepositoryController {
        &self.documents
    }

    pub fn documents_mut(&mut self) -> &mut DocumentRepositoryController {
        &mut self.documents
    }

    /// Initial load: roster and document list, as the original dashboard does
    /// on mount.
    pub async fn load(&mut self) {
        self.roster.load_roster().await;
        self.documents.load_documents().await;
    }
}
