use admin_core::{Country, EndpointSet, Organization, Record, Session, Situation};

use super::manager::{RecordManager, StoreEvent};
use super::state::{EditorState, StagedFile, TableState, PAGE_SIZES};
use super::RecordAction;
use crate::rest::RestStore;

fn endpoints() -> EndpointSet {
    EndpointSet {
        list: "http://localhost:9/list".to_string(),
        create: "http://localhost:9/create".to_string(),
        update: "http://localhost:9/update".to_string(),
        delete: "http://localhost:9/delete".to_string(),
        upload: None,
    }
}

fn manager<R: Record>() -> RecordManager<R> {
    RecordManager::new(RestStore::new(endpoints(), Session::new("test-token")), None)
}

fn country(id: i64, name: &str) -> Country {
    Country {
        id: Some(id),
        name: name.to_string(),
        country_code: "XX".to_string(),
        description: None,
    }
}

fn populated_state(names: &[&str]) -> TableState<Country> {
    let mut state = TableState::new();
    for (index, name) in names.iter().enumerate() {
        state.apply_created(country(index as i64 + 1, name));
    }
    state
}

#[test]
fn search_is_a_case_insensitive_substring_match() {
    let state = {
        let mut state = populated_state(&["Chad"]);
        state.search_text = "cha".to_string();
        state
    };
    assert_eq!(state.filtered().len(), 1);

    let mut state = populated_state(&["Chad"]);
    state.search_text = "xyz".to_string();
    assert!(state.filtered().is_empty());
}

#[test]
fn filtering_is_invariant_under_page_size_changes() {
    let mut state = populated_state(&[
        "Chad", "Chile", "China", "Cuba", "Canada", "Peru", "Kenya", "Chadras",
    ]);
    state.search_text = "ch".to_string();

    let mut sizes = Vec::new();
    for page_size in PAGE_SIZES {
        state.set_page_size(page_size);
        sizes.push(state.filtered().len());
        assert_eq!(state.page, 0);
    }
    assert!(sizes.iter().all(|&n| n == sizes[0]));
}

#[test]
fn create_appends_exactly_one_record_with_an_id() {
    let mut state = populated_state(&["Chad"]);
    state.apply_created(country(2, "Chile"));

    assert_eq!(state.records.len(), 2);
    assert_eq!(state.records[1].id, Some(2));
}

#[test]
fn delete_removes_one_record_and_preserves_order() {
    let mut state = populated_state(&["Chad", "Chile", "China", "Cuba"]);
    state.apply_deleted(2);

    let names: Vec<&str> = state.records.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["Chad", "China", "Cuba"]);

    // Unknown id: no-op.
    state.apply_deleted(99);
    assert_eq!(state.records.len(), 3);
}

#[test]
fn update_preserves_id_and_working_set_length() {
    let mut state = populated_state(&["Chad", "Chile"]);
    state.records[0].description = Some("landlocked".to_string());

    state.apply_updated(Country {
        id: Some(1),
        name: "Republic of Chad".to_string(),
        country_code: String::new(),
        description: None,
    });

    assert_eq!(state.records.len(), 2);
    assert_eq!(state.records[0].id, Some(1));
    assert_eq!(state.records[0].name, "Republic of Chad");
    // Fields the server did not echo keep their local value.
    assert_eq!(state.records[0].country_code, "XX");
    assert_eq!(state.records[0].description.as_deref(), Some("landlocked"));
}

#[test]
fn two_sequential_updates_are_last_write_wins() {
    let mut state = populated_state(&["Chad"]);

    state.apply_updated(country(1, "First"));
    state.apply_updated(country(1, "Second"));

    assert_eq!(state.records.len(), 1);
    assert_eq!(state.records[0].name, "Second");
}

#[test]
fn page_count_is_ceiling_and_last_page_is_partial() {
    let names: Vec<String> = (0..12).map(|i| format!("Country {}", i)).collect();
    let refs: Vec<&str> = names.iter().map(|n| n.as_str()).collect();
    let mut state = populated_state(&refs);

    state.set_page_size(5);
    assert_eq!(state.page_count(), 3);

    state.set_page(2);
    let last_page = state.visible_page().len();
    assert!(last_page >= 1 && last_page <= 5);
    assert_eq!(last_page, 2);
}

#[test]
fn search_that_shrinks_the_filtered_set_pulls_the_page_back() {
    let mut manager = manager::<Country>();
    for i in 0..30 {
        manager
            .state_mut()
            .apply_created(country(i + 1, &format!("Country {}", i)));
    }
    manager.state_mut().set_page(4);
    assert_eq!(manager.state().page, 4);

    // Typed straight into the search box binding, no action dispatched.
    manager.state_mut().search_text = "Country 12".to_string();
    manager.update();

    let state = manager.state();
    assert_eq!(state.filtered().len(), 1);
    assert_eq!(state.page, 0);
    assert_eq!(state.visible_page().len(), 1);
}

#[test]
fn store_futures_move_to_the_runtime_thread_pool() {
    fn assert_send<T: Send>(_: T) {}

    let store: RestStore<Organization> = RestStore::new(endpoints(), Session::new("t"));
    assert_send(async move {
        let _ = store.list_all().await;
    });
}

#[test]
fn page_size_change_resets_the_page_index() {
    let names: Vec<String> = (0..30).map(|i| format!("Country {}", i)).collect();
    let refs: Vec<&str> = names.iter().map(|n| n.as_str()).collect();
    let mut state = populated_state(&refs);

    state.set_page(3);
    assert_eq!(state.page, 3);
    state.set_page_size(10);
    assert_eq!(state.page, 0);
    assert_eq!(state.page_size, 10);
}

#[test]
fn attachment_patch_touches_only_the_image_field() {
    let mut state: TableState<Organization> = TableState::new();
    state.apply_created(Organization {
        id: Some(7),
        name: "Relief Works".to_string(),
        country: Some(country(1, "Chad")),
        ..Organization::default()
    });

    state.apply_attachment(7, "logo.png".to_string());

    assert_eq!(state.records[0].image_url.as_deref(), Some("logo.png"));
    assert_eq!(state.records[0].name, "Relief Works");
}

#[tokio::test]
async fn blank_name_is_rejected_before_any_network_call() {
    let mut manager = manager::<Situation>();

    manager.dispatch(RecordAction::OpenEditor { record: None });
    manager.update();
    manager.dispatch(RecordAction::Save);
    manager.update();

    let state = manager.state();
    assert!(!state.form_errors.is_empty());
    assert!(!state.saving);
    assert!(state.records.is_empty());
    assert!(state.editor_open());
    assert!(!manager.has_pending_actions());
}

#[tokio::test]
async fn closing_the_editor_discards_draft_and_staged_file() {
    let mut manager = manager::<Situation>();

    manager.dispatch(RecordAction::OpenEditor { record: None });
    manager.update();
    if let Some(draft) = manager.state_mut().draft_mut() {
        draft.name = "in progress".to_string();
    }
    manager.state_mut().staged_file = Some(StagedFile {
        file_name: "photo.jpg".to_string(),
        bytes: vec![1, 2, 3],
    });

    manager.dispatch(RecordAction::CloseEditor);
    manager.update();

    let state = manager.state();
    assert!(matches!(state.editor, EditorState::Closed));
    assert!(state.staged_file.is_none());

    // Reopening starts from a blank template again.
    manager.dispatch(RecordAction::OpenEditor { record: None });
    manager.update();
    match &manager.state().editor {
        EditorState::Creating { draft } => assert!(draft.name.is_empty()),
        other => panic!("expected Creating editor, got {:?}", other),
    }
}

#[tokio::test]
async fn saved_event_reconciles_and_closes_the_editor() {
    let mut manager = manager::<Situation>();

    manager.dispatch(RecordAction::OpenEditor { record: None });
    manager.update();

    manager.apply_event(StoreEvent::Saved {
        record: Situation {
            id: Some(11),
            name: "Flooding".to_string(),
            ..Situation::default()
        },
        was_update: false,
    });

    let state = manager.state();
    assert_eq!(state.records.len(), 1);
    assert_eq!(state.records[0].id, Some(11));
    assert!(!state.editor_open());
    assert!(!state.saving);
}

#[tokio::test]
async fn failed_save_leaves_the_working_set_and_editor_untouched() {
    let mut manager = manager::<Situation>();

    manager.dispatch(RecordAction::OpenEditor { record: None });
    manager.update();
    if let Some(draft) = manager.state_mut().draft_mut() {
        draft.name = "Drought".to_string();
    }
    manager.state_mut().saving = true;

    manager.apply_event(StoreEvent::SaveFailed {
        message: "transport: connection refused".to_string(),
        staged: None,
    });

    let state = manager.state();
    assert!(state.records.is_empty());
    assert!(state.editor_open());
    assert!(!state.saving);
}

#[tokio::test]
async fn failed_save_restages_the_taken_attachment() {
    let mut manager = manager::<Organization>();

    manager.dispatch(RecordAction::OpenEditor { record: None });
    manager.update();
    manager.state_mut().saving = true;

    manager.apply_event(StoreEvent::SaveFailed {
        message: "transport: connection refused".to_string(),
        staged: Some(StagedFile {
            file_name: "logo.png".to_string(),
            bytes: vec![9, 9, 9],
        }),
    });

    let state = manager.state();
    assert_eq!(
        state.staged_file.as_ref().map(|f| f.file_name.as_str()),
        Some("logo.png")
    );

    // A file staged in the meantime is not clobbered by the returned one.
    manager.state_mut().staged_file = Some(StagedFile {
        file_name: "newer.png".to_string(),
        bytes: vec![1],
    });
    manager.apply_event(StoreEvent::SaveFailed {
        message: "transport: connection refused".to_string(),
        staged: Some(StagedFile {
            file_name: "logo.png".to_string(),
            bytes: vec![9, 9, 9],
        }),
    });
    assert_eq!(
        manager.state().staged_file.as_ref().map(|f| f.file_name.as_str()),
        Some("newer.png")
    );
}

#[tokio::test]
async fn load_failure_leaves_an_empty_list() {
    let mut manager = manager::<Country>();

    manager.apply_event(StoreEvent::LoadFailed {
        message: "transport: dns failure".to_string(),
    });

    let state = manager.state();
    assert_eq!(state.phase, super::LoadPhase::LoadError);
    assert!(state.records.is_empty());
    assert!(state.last_error.is_some());
}
