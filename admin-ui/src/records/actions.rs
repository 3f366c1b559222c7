use super::state::StagedFile;

/// One user interaction on a record screen. The UI dispatches these
/// synchronously; the manager processes one per frame.
#[derive(Debug, Clone)]
pub enum RecordAction<R> {
    /// Fetch the working set (plus the Country reference list when the
    /// record type needs it).
    Load,
    /// `None` opens the editor on a blank template.
    OpenEditor { record: Option<R> },
    CloseEditor,
    StageAttachment { file: StagedFile },
    Save,
    Delete { id: i64 },
    SetPage { page: usize },
    SetPageSize { size: usize },
}

impl<R> RecordAction<R> {
    pub fn description(&self) -> &'static str {
        match self {
            RecordAction::Load => "Loading records from server",
            RecordAction::OpenEditor { .. } => "Opening record editor",
            RecordAction::CloseEditor => "Closing record editor",
            RecordAction::StageAttachment { .. } => "Staging attachment",
            RecordAction::Save => "Saving record",
            RecordAction::Delete { .. } => "Deleting record",
            RecordAction::SetPage { .. } => "Changing page",
            RecordAction::SetPageSize { .. } => "Changing page size",
        }
    }
}
