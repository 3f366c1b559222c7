use eframe::egui;

use admin_core::{AppConfig, Country, Organization, Situation};

use crate::records::{LoadPhase, RecordAction, RecordManager};
use crate::rest::RestStore;
use crate::ui;

/// Main admin console application: one manager per record type, with the
/// menu bar switching which screen the central panel shows.
pub struct AdminApp {
    countries: RecordManager<Country>,
    organizations: RecordManager<Organization>,
    situations: RecordManager<Situation>,
    image_base: String,
    current_view: AdminView,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum AdminView {
    Countries,
    Organizations,
    Situations,
}

impl AdminApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        let session = config.session();

        let countries = RecordManager::new(
            RestStore::new(config.countries(), session.clone()),
            None,
        );
        // Organizations reference countries, so their screen loads both
        // lists together.
        let organizations = RecordManager::new(
            RestStore::new(config.organizations(), session.clone()),
            Some(RestStore::new(config.countries(), session.clone())),
        );
        let situations = RecordManager::new(
            RestStore::new(config.situations(), session),
            None,
        );

        Self {
            countries,
            organizations,
            situations,
            image_base: config.image_base(),
            current_view: AdminView::Countries,
        }
    }

    fn load_current_view(&mut self) {
        match self.current_view {
            AdminView::Countries => lazy_load(&mut self.countries),
            AdminView::Organizations => lazy_load(&mut self.organizations),
            AdminView::Situations => lazy_load(&mut self.situations),
        }
    }
}

fn lazy_load<R: admin_core::Record>(manager: &mut RecordManager<R>) {
    if manager.state().phase == LoadPhase::Idle {
        manager.dispatch(RecordAction::Load);
    }
}

impl eframe::App for AdminApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.request_repaint();

        // All three managers tick each frame so in-flight saves on a
        // hidden screen still land.
        self.countries.update();
        self.organizations.update();
        self.situations.update();

        self.load_current_view();

        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
                ui.menu_button("View", |ui| {
                    if ui
                        .selectable_label(self.current_view == AdminView::Countries, "Countries")
                        .clicked()
                    {
                        self.current_view = AdminView::Countries;
                    }
                    if ui
                        .selectable_label(
                            self.current_view == AdminView::Organizations,
                            "Organizations",
                        )
                        .clicked()
                    {
                        self.current_view = AdminView::Organizations;
                    }
                    if ui
                        .selectable_label(self.current_view == AdminView::Situations, "Situations")
                        .clicked()
                    {
                        self.current_view = AdminView::Situations;
                    }
                });
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| match self.current_view {
            AdminView::Countries => {
                ui::record_screen(ctx, ui, &mut self.countries, &self.image_base)
            }
            AdminView::Organizations => {
                ui::record_screen(ctx, ui, &mut self.organizations, &self.image_base)
            }
            AdminView::Situations => {
                ui::record_screen(ctx, ui, &mut self.situations, &self.image_base)
            }
        });
    }
}
