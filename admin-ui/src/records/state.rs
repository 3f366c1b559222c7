use admin_core::{Country, Record};

pub const PAGE_SIZES: [usize; 3] = [5, 10, 25];
pub const DEFAULT_PAGE_SIZE: usize = 5;

/// Screen-level fetch phase. A failed load is logged and the list renders
/// empty; there is no retry affordance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadPhase {
    #[default]
    Idle,
    Loading,
    Loaded,
    LoadError,
}

/// Modal editor phase. Creating starts from a blank template, editing from
/// a shallow copy of the selected record.
#[derive(Debug, Clone, Default)]
pub enum EditorState<R> {
    #[default]
    Closed,
    Creating {
        draft: R,
    },
    Editing {
        original_id: i64,
        draft: R,
    },
}

/// An image file read from disk, held until the next successful save.
#[derive(Debug, Clone)]
pub struct StagedFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Single source of truth for one record screen: the client-side working
/// set plus the search/pagination/editor view state derived over it.
#[derive(Debug)]
pub struct TableState<R> {
    pub phase: LoadPhase,
    pub records: Vec<R>,
    /// Country reference list for the editor picker; empty unless the
    /// record type needs it.
    pub countries: Vec<Country>,
    pub search_text: String,
    pub page: usize,
    pub page_size: usize,
    pub editor: EditorState<R>,
    pub staged_file: Option<StagedFile>,
    /// Text buffer for the attachment path field.
    pub attachment_path: String,
    pub form_errors: Vec<String>,
    pub saving: bool,
    pub last_error: Option<String>,
}

impl<R: Record> Default for TableState<R> {
    fn default() -> Self {
        Self {
            phase: LoadPhase::default(),
            records: Vec::new(),
            countries: Vec::new(),
            search_text: String::new(),
            page: 0,
            page_size: DEFAULT_PAGE_SIZE,
            editor: EditorState::default(),
            staged_file: None,
            attachment_path: String::new(),
            form_errors: Vec::new(),
            saving: false,
            last_error: None,
        }
    }
}

impl<R: Record> TableState<R> {
    pub fn new() -> Self {
        Self::default()
    }

    // --- derived views ---

    /// Case-insensitive substring match against every string-typed field.
    /// Recomputed on each call; the working set itself is never mutated by
    /// search.
    pub fn filtered(&self) -> Vec<&R> {
        if self.search_text.is_empty() {
            return self.records.iter().collect();
        }
        let needle = self.search_text.to_lowercase();
        self.records
            .iter()
            .filter(|record| {
                record
                    .search_fields()
                    .iter()
                    .any(|field| field.to_lowercase().contains(&needle))
            })
            .collect()
    }

    pub fn page_count(&self) -> usize {
        self.filtered().len().div_ceil(self.page_size)
    }

    /// The contiguous slice of the filtered sequence for the current page.
    pub fn visible_page(&self) -> Vec<&R> {
        self.filtered()
            .into_iter()
            .skip(self.page * self.page_size)
            .take(self.page_size)
            .collect()
    }

    pub fn set_page(&mut self, page: usize) {
        let pages = self.page_count();
        self.page = if pages == 0 { 0 } else { page.min(pages - 1) };
    }

    /// Changing the page size resets the page index.
    pub fn set_page_size(&mut self, size: usize) {
        if PAGE_SIZES.contains(&size) {
            self.page_size = size;
            self.page = 0;
        }
    }

    // --- editor ---

    pub fn open_creator(&mut self) {
        self.editor = EditorState::Creating { draft: R::default() };
        self.form_errors.clear();
    }

    pub fn open_editor(&mut self, record: R) {
        self.editor = match record.id() {
            Some(original_id) => EditorState::Editing {
                original_id,
                draft: record,
            },
            None => EditorState::Creating { draft: record },
        };
        self.form_errors.clear();
    }

    /// Discards all draft edits and any staged attachment.
    pub fn close_editor(&mut self) {
        self.editor = EditorState::Closed;
        self.staged_file = None;
        self.attachment_path.clear();
        self.form_errors.clear();
    }

    pub fn editor_open(&self) -> bool {
        !matches!(self.editor, EditorState::Closed)
    }

    pub fn draft_mut(&mut self) -> Option<&mut R> {
        match &mut self.editor {
            EditorState::Closed => None,
            EditorState::Creating { draft } | EditorState::Editing { draft, .. } => Some(draft),
        }
    }

    // --- reconciler ---

    /// Append the server's returned entity to the end of the working set;
    /// no resort.
    pub fn apply_created(&mut self, record: R) {
        self.records.push(record);
    }

    /// In-place merge of the server echo over the previous local copy.
    /// Last write wins; there is no version check.
    pub fn apply_updated(&mut self, server: R) {
        let Some(id) = server.id() else { return };
        if let Some(existing) = self.records.iter_mut().find(|r| r.id() == Some(id)) {
            existing.absorb(server);
        }
    }

    /// Remove the matching entity; no-op when absent.
    pub fn apply_deleted(&mut self, id: i64) {
        self.records.retain(|r| r.id() != Some(id));
        self.clamp_page();
    }

    /// Patch only the image reference of the just-persisted record.
    pub fn apply_attachment(&mut self, owner_id: i64, image_ref: String) {
        if let Some(record) = self.records.iter_mut().find(|r| r.id() == Some(owner_id)) {
            record.set_image_ref(image_ref);
        }
    }

    /// Pull the page cursor back inside the filtered view. Deletes and
    /// search edits can both shrink it beneath the cursor.
    pub fn clamp_page(&mut self) {
        let pages = self.page_count();
        if pages == 0 {
            self.page = 0;
        } else if self.page >= pages {
            self.page = pages - 1;
        }
    }
}
