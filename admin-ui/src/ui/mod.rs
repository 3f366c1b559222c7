//! Pure render functions for a record screen. Each reads `TableState`
//! immutably (mutating only text buffers), renders, and dispatches
//! actions to the `RecordManager`; no backend calls from here.

pub mod forms;

use admin_core::Record;
use eframe::egui;

pub use forms::FormRecord;

use crate::records::{
    EditorState, LoadPhase, RecordAction, RecordManager, StagedFile, PAGE_SIZES,
};

/// One full record screen: header strip, table, pagination, editor modal.
pub fn record_screen<R: Record + FormRecord>(
    ctx: &egui::Context,
    ui: &mut egui::Ui,
    manager: &mut RecordManager<R>,
    image_base: &str,
) {
    header(ui, manager);
    ui.separator();
    table(ui, manager);
    ui.separator();
    pagination(ui, manager);
    editor_window(ctx, manager, image_base);
}

fn header<R: Record>(ui: &mut egui::Ui, manager: &mut RecordManager<R>) {
    let mut add_clicked = false;
    ui.horizontal(|ui| {
        ui.heading(R::TITLE);
        ui.separator();
        ui.add(
            egui::TextEdit::singleline(&mut manager.state_mut().search_text)
                .hint_text(format!("Search {}", R::TITLE))
                .desired_width(250.0),
        );
        if ui.button(format!("Add {}", R::KIND)).clicked() {
            add_clicked = true;
        }
    });
    if add_clicked {
        manager.dispatch(RecordAction::OpenEditor { record: None });
    }
}

fn table<R: Record>(ui: &mut egui::Ui, manager: &mut RecordManager<R>) {
    if manager.state().phase == LoadPhase::Loading {
        ui.horizontal(|ui| {
            ui.spinner();
            ui.label("Loading...");
        });
        return;
    }

    let mut open_edit: Option<R> = None;
    let mut delete_id: Option<i64> = None;
    {
        let state = manager.state();
        egui::ScrollArea::both()
            .max_height(ui.available_height() - 40.0)
            .show(ui, |ui| {
                egui::Grid::new("records_table")
                    .striped(true)
                    .min_col_width(90.0)
                    .spacing([14.0, 6.0])
                    .show(ui, |ui| {
                        for title in R::column_titles() {
                            ui.strong(*title);
                        }
                        ui.strong("Actions");
                        ui.end_row();

                        for record in state.visible_page() {
                            for cell in record.cells() {
                                ui.label(cell);
                            }
                            ui.horizontal(|ui| {
                                if ui.button("Edit").clicked() {
                                    open_edit = Some(record.clone());
                                }
                                if let Some(id) = record.id() {
                                    if ui.button("Delete").clicked() {
                                        delete_id = Some(id);
                                    }
                                }
                            });
                            ui.end_row();
                        }
                    });
            });
    }

    if let Some(record) = open_edit {
        manager.dispatch(RecordAction::OpenEditor {
            record: Some(record),
        });
    }
    if let Some(id) = delete_id {
        manager.dispatch(RecordAction::Delete { id });
    }
}

fn pagination<R: Record>(ui: &mut egui::Ui, manager: &mut RecordManager<R>) {
    let (page, page_size, pages, total) = {
        let state = manager.state();
        (
            state.page,
            state.page_size,
            state.page_count(),
            state.filtered().len(),
        )
    };

    let mut action: Option<RecordAction<R>> = None;
    ui.horizontal(|ui| {
        ui.label(format!("{} records", total));
        ui.separator();
        egui::ComboBox::new("page_size", "Rows per page")
            .selected_text(page_size.to_string())
            .show_ui(ui, |ui| {
                for size in PAGE_SIZES {
                    if ui
                        .selectable_label(page_size == size, size.to_string())
                        .clicked()
                    {
                        action = Some(RecordAction::SetPageSize { size });
                    }
                }
            });
        ui.separator();
        if ui
            .add_enabled(page > 0, egui::Button::new("Prev"))
            .clicked()
        {
            action = Some(RecordAction::SetPage { page: page - 1 });
        }
        ui.label(format!("Page {} of {}", page + 1, pages.max(1)));
        if ui
            .add_enabled(page + 1 < pages, egui::Button::new("Next"))
            .clicked()
        {
            action = Some(RecordAction::SetPage { page: page + 1 });
        }
    });
    if let Some(action) = action {
        manager.dispatch(action);
    }
}

fn editor_window<R: Record + FormRecord>(
    ctx: &egui::Context,
    manager: &mut RecordManager<R>,
    image_base: &str,
) {
    let title = match &manager.state().editor {
        EditorState::Closed => return,
        EditorState::Creating { .. } => format!("Add {}", R::KIND),
        EditorState::Editing { .. } => format!("Edit {}", R::KIND),
    };

    let saving = manager.state().saving;
    let countries = manager.state().countries.clone();

    let mut action: Option<RecordAction<R>> = None;
    let mut stage: Option<StagedFile> = None;
    let mut keep_open = true;

    egui::Window::new(title)
        .open(&mut keep_open)
        .collapsible(false)
        .default_width(440.0)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().max_height(480.0).show(ui, |ui| {
                {
                    let state = manager.state_mut();
                    if let Some(draft) = state.draft_mut() {
                        draft.form(ui, &countries);
                        if let Some(image) = draft.image_ref() {
                            ui.label(format!("Image: {}/{}", image_base, image));
                        }
                    }
                }

                if R::HAS_ATTACHMENT {
                    ui.separator();
                    {
                        let state = manager.state_mut();
                        ui.horizontal(|ui| {
                            ui.label("Image file:");
                            ui.text_edit_singleline(&mut state.attachment_path);
                            if ui.button("Attach").clicked() {
                                match std::fs::read(&state.attachment_path) {
                                    Ok(bytes) => {
                                        let file_name =
                                            std::path::Path::new(&state.attachment_path)
                                                .file_name()
                                                .map(|n| n.to_string_lossy().into_owned())
                                                .unwrap_or_else(|| "image".to_string());
                                        stage = Some(StagedFile { file_name, bytes });
                                    }
                                    Err(e) => {
                                        state.form_errors =
                                            vec![format!("could not read file: {}", e)];
                                    }
                                }
                            }
                        });
                    }
                    if let Some(file) = &manager.state().staged_file {
                        ui.label(format!(
                            "Staged: {} ({} bytes)",
                            file.file_name,
                            file.bytes.len()
                        ));
                    }
                }

                if !manager.state().form_errors.is_empty() {
                    ui.separator();
                    for error in &manager.state().form_errors {
                        ui.colored_label(egui::Color32::RED, error);
                    }
                }
            });

            ui.separator();
            ui.horizontal(|ui| {
                if ui.add_enabled(!saving, egui::Button::new("Save")).clicked() {
                    action = Some(RecordAction::Save);
                }
                if ui.button("Cancel").clicked() {
                    action = Some(RecordAction::CloseEditor);
                }
                if saving {
                    ui.spinner();
                    ui.label("Saving...");
                }
            });
        });

    if !keep_open {
        action = Some(RecordAction::CloseEditor);
    }
    if let Some(file) = stage {
        manager.dispatch(RecordAction::StageAttachment { file });
    }
    if let Some(action) = action {
        manager.dispatch(action);
    }
}
