use admin_core::{Country, Organization, Situation};
use eframe::egui;

/// Editor form bindings for one record type: label + widget rows only.
/// Validation and dispatch stay in the manager.
pub trait FormRecord {
    fn form(&mut self, ui: &mut egui::Ui, countries: &[Country]);
}

impl FormRecord for Country {
    fn form(&mut self, ui: &mut egui::Ui, _countries: &[Country]) {
        egui::Grid::new("country_form")
            .num_columns(2)
            .spacing([10.0, 8.0])
            .show(ui, |ui| {
                ui.label("Name:");
                ui.text_edit_singleline(&mut self.name);
                ui.end_row();

                ui.label("Code:");
                ui.text_edit_singleline(&mut self.country_code);
                ui.end_row();

                ui.label("Description:");
                ui.text_edit_multiline(self.description.get_or_insert_with(String::new));
                ui.end_row();
            });
    }
}

impl FormRecord for Organization {
    fn form(&mut self, ui: &mut egui::Ui, countries: &[Country]) {
        egui::Grid::new("organization_form")
            .num_columns(2)
            .spacing([10.0, 8.0])
            .show(ui, |ui| {
                ui.label("Name:");
                ui.text_edit_singleline(&mut self.name);
                ui.end_row();

                ui.label("Contact person:");
                ui.text_edit_singleline(&mut self.contact_person);
                ui.end_row();

                ui.label("Contact information:");
                ui.text_edit_singleline(&mut self.phone_number);
                ui.end_row();

                ui.label("Email:");
                ui.text_edit_singleline(&mut self.email);
                ui.end_row();

                ui.label("Brief about the organization:");
                ui.text_edit_multiline(&mut self.notes);
                ui.end_row();

                ui.label("Ongoing projects / support / services:");
                ui.text_edit_multiline(&mut self.description);
                ui.end_row();

                ui.label("Website:");
                ui.text_edit_singleline(&mut self.website);
                ui.end_row();

                ui.label("Social media:");
                ui.text_edit_singleline(&mut self.social_media);
                ui.end_row();

                ui.label("Projects:");
                ui.text_edit_singleline(&mut self.projects);
                ui.end_row();

                ui.label("Country:");
                let selected = self
                    .country
                    .as_ref()
                    .map(|c| c.name.clone())
                    .unwrap_or_else(|| "Select a country".to_string());
                egui::ComboBox::new("organization_country", "")
                    .selected_text(selected)
                    .show_ui(ui, |ui| {
                        for option in countries {
                            ui.selectable_value(
                                &mut self.country,
                                Some(option.clone()),
                                &option.name,
                            );
                        }
                    });
                ui.end_row();
            });
    }
}

impl FormRecord for Situation {
    fn form(&mut self, ui: &mut egui::Ui, _countries: &[Country]) {
        egui::Grid::new("situation_form")
            .num_columns(2)
            .spacing([10.0, 8.0])
            .show(ui, |ui| {
                ui.label("Name:");
                ui.text_edit_singleline(&mut self.name);
                ui.end_row();

                ui.label("Description:");
                ui.text_edit_multiline(self.description.get_or_insert_with(String::new));
                ui.end_row();
            });
    }
}
