use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use admin_core::{Country, Record, StoreError};

use super::actions::RecordAction;
use super::state::{EditorState, LoadPhase, StagedFile, TableState};
use crate::rest::RestStore;

/// Completion of a spawned store call, delivered back to the UI thread
/// through the shared inbox.
#[derive(Debug)]
pub enum StoreEvent<R> {
    Loaded { records: Vec<R>, countries: Vec<Country> },
    LoadFailed { message: String },
    Saved { record: R, was_update: bool },
    /// Carries back any attachment taken for this save so it can be
    /// restaged instead of lost.
    SaveFailed { message: String, staged: Option<StagedFile> },
    Deleted { id: i64 },
    DeleteFailed { id: i64, message: String },
    AttachmentUploaded { owner_id: i64, image_ref: String },
}

/// Drives one record screen: queues UI actions, spawns store calls on the
/// runtime, and reconciles their completions into the working set.
pub struct RecordManager<R: Record> {
    state: TableState<R>,
    store: RestStore<R>,
    country_store: Option<RestStore<Country>>,
    pending: VecDeque<RecordAction<R>>,
    inbox: Arc<Mutex<Vec<StoreEvent<R>>>>,
}

impl<R: Record> RecordManager<R> {
    pub fn new(store: RestStore<R>, country_store: Option<RestStore<Country>>) -> Self {
        Self {
            state: TableState::new(),
            store,
            country_store,
            pending: VecDeque::new(),
            inbox: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// UI calls this - synchronous, just queues the action.
    pub fn dispatch(&mut self, action: RecordAction<R>) {
        log::debug!("{}: dispatching: {}", R::KIND, action.description());
        self.pending.push_back(action);
    }

    /// Call this each frame: applies finished store calls, then processes
    /// one action from the queue.
    pub fn update(&mut self) {
        self.drain_inbox();
        // The search box mutates `search_text` through its text binding,
        // so the narrowed view is only seen here.
        self.state.clamp_page();
        if let Some(action) = self.pending.pop_front() {
            log::debug!("{}: processing: {}", R::KIND, action.description());
            self.handle_action(action);
        }
    }

    /// UI reads this - immutable reference.
    pub fn state(&self) -> &TableState<R> {
        &self.state
    }

    /// Mutable access for the render layer's text bindings (search box,
    /// draft form fields). Everything else goes through `dispatch`.
    pub fn state_mut(&mut self) -> &mut TableState<R> {
        &mut self.state
    }

    pub fn has_pending_actions(&self) -> bool {
        !self.pending.is_empty()
            || self
                .inbox
                .lock()
                .map(|inbox| !inbox.is_empty())
                .unwrap_or(false)
    }

    fn handle_action(&mut self, action: RecordAction<R>) {
        match action {
            RecordAction::Load => self.handle_load(),
            RecordAction::OpenEditor { record } => match record {
                Some(record) => self.state.open_editor(record),
                None => self.state.open_creator(),
            },
            RecordAction::CloseEditor => self.state.close_editor(),
            RecordAction::StageAttachment { file } => {
                if R::HAS_ATTACHMENT {
                    log::info!("{}: staged attachment {}", R::KIND, file.file_name);
                    self.state.staged_file = Some(file);
                } else {
                    log::warn!("{}: record type takes no attachments", R::KIND);
                }
            }
            RecordAction::Save => self.handle_save(),
            RecordAction::Delete { id } => self.handle_delete(id),
            RecordAction::SetPage { page } => self.state.set_page(page),
            RecordAction::SetPageSize { size } => self.state.set_page_size(size),
        }
    }

    fn handle_load(&mut self) {
        if self.state.phase == LoadPhase::Loading {
            log::warn!("{}: load requested while already loading - ignoring", R::KIND);
            return;
        }
        self.state.phase = LoadPhase::Loading;
        self.state.last_error = None;

        let store = self.store.clone();
        let country_store = self.country_store.clone();
        let inbox = self.inbox.clone();
        tokio::spawn(async move {
            let event = match country_store {
                // Both legs are joined; either failing fails the whole load.
                Some(countries) => match tokio::join!(store.list_all(), countries.list_all()) {
                    (Ok(records), Ok(countries)) => StoreEvent::Loaded { records, countries },
                    (Err(e), _) => StoreEvent::LoadFailed {
                        message: e.to_string(),
                    },
                    (_, Err(e)) => StoreEvent::LoadFailed {
                        message: StoreError::ReferenceLoad(e.to_string()).to_string(),
                    },
                },
                None => match store.list_all().await {
                    Ok(records) => StoreEvent::Loaded {
                        records,
                        countries: Vec::new(),
                    },
                    Err(e) => StoreEvent::LoadFailed {
                        message: e.to_string(),
                    },
                },
            };
            push(&inbox, event);
        });
    }

    fn handle_save(&mut self) {
        let (draft, existing_id) = match &self.state.editor {
            EditorState::Closed => return,
            EditorState::Creating { draft } => (draft.clone(), None),
            EditorState::Editing { original_id, draft } => (draft.clone(), Some(*original_id)),
        };

        // Presence checks run before any network call.
        let errors = draft.validate();
        if !errors.is_empty() {
            log::info!("{}: save blocked by validation: {:?}", R::KIND, errors);
            self.state.form_errors = errors;
            return;
        }

        self.state.form_errors.clear();
        self.state.saving = true;

        // Taken now: closing the editor mid-save no longer discards it,
        // and the entity is persisted before the upload starts.
        let staged = if R::HAS_ATTACHMENT {
            self.state.staged_file.take()
        } else {
            None
        };

        let store = self.store.clone();
        let inbox = self.inbox.clone();
        tokio::spawn(async move {
            let result = match existing_id {
                Some(id) => store.update(id, &draft).await.map(|server| {
                    let mut merged = draft.clone();
                    merged.absorb(server);
                    (merged, true)
                }),
                None => store.create(&draft).await.map(|server| (server, false)),
            };

            match result {
                Ok((record, was_update)) => {
                    let owner_id = record.id();
                    push(&inbox, StoreEvent::Saved { record, was_update });

                    // Dependent upload: failure is logged and never rolls
                    // the already-persisted entity back.
                    if let (Some(file), Some(owner_id)) = (staged, owner_id) {
                        match store
                            .upload_attachment(owner_id, file.file_name, file.bytes)
                            .await
                        {
                            Ok(image_ref) => {
                                push(&inbox, StoreEvent::AttachmentUploaded { owner_id, image_ref })
                            }
                            Err(e) => {
                                log::error!("{}: attachment upload failed: {}", R::KIND, e)
                            }
                        }
                    }
                }
                Err(e) => push(
                    &inbox,
                    StoreEvent::SaveFailed {
                        message: e.to_string(),
                        staged,
                    },
                ),
            }
        });
    }

    fn handle_delete(&mut self, id: i64) {
        let store = self.store.clone();
        let inbox = self.inbox.clone();
        tokio::spawn(async move {
            match store.delete(id).await {
                Ok(()) => push(&inbox, StoreEvent::Deleted { id }),
                Err(e) => push(
                    &inbox,
                    StoreEvent::DeleteFailed {
                        id,
                        message: e.to_string(),
                    },
                ),
            }
        });
    }

    fn drain_inbox(&mut self) {
        let events: Vec<StoreEvent<R>> = match self.inbox.lock() {
            Ok(mut inbox) => inbox.drain(..).collect(),
            Err(_) => return,
        };
        for event in events {
            self.apply_event(event);
        }
    }

    pub(crate) fn apply_event(&mut self, event: StoreEvent<R>) {
        match event {
            StoreEvent::Loaded { records, countries } => {
                log::info!("{}: loaded {} records", R::KIND, records.len());
                self.state.records = records;
                self.state.countries = countries;
                self.state.phase = LoadPhase::Loaded;
                self.state.set_page(self.state.page);
            }
            StoreEvent::LoadFailed { message } => {
                // Logged and swallowed: the user sees an empty list.
                log::error!("{}: load failed: {}", R::KIND, message);
                self.state.phase = LoadPhase::LoadError;
                self.state.last_error = Some(message);
            }
            StoreEvent::Saved { record, was_update } => {
                if was_update {
                    self.state.apply_updated(record);
                } else {
                    self.state.apply_created(record);
                }
                self.state.saving = false;
                self.state.close_editor();
            }
            StoreEvent::SaveFailed { message, staged } => {
                // The editor stays open in its prior state; no retry. The
                // taken attachment is restaged unless a newer one replaced it.
                log::error!("{}: save failed: {}", R::KIND, message);
                self.state.saving = false;
                if self.state.staged_file.is_none() {
                    self.state.staged_file = staged;
                }
            }
            StoreEvent::Deleted { id } => {
                self.state.apply_deleted(id);
            }
            StoreEvent::DeleteFailed { id, message } => {
                // The record list simply does not change.
                log::error!("{}: delete of {} failed: {}", R::KIND, id, message);
            }
            StoreEvent::AttachmentUploaded { owner_id, image_ref } => {
                self.state.apply_attachment(owner_id, image_ref);
            }
        }
    }
}

fn push<R>(inbox: &Arc<Mutex<Vec<StoreEvent<R>>>>, event: StoreEvent<R>) {
    if let Ok(mut events) = inbox.lock() {
        events.push(event);
    }
}
