//! Card and table presentations of the employee list, plus the form body.

use client_core::{DeleteFlow, DeletePhase, FetchState};
use shared::{
    domain::{Employee, EmployeeId},
    error::{FieldErrors, FormField},
    validation::EmployeeForm,
};

use super::theme::{ACCENT, DANGER};

const CARD_WIDTH: f32 = 260.0;
const AVATAR_SIZE: f32 = 40.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewAction {
    None,
    Add,
    Edit(EmployeeId),
    Delete(EmployeeId),
    Reload,
}

pub fn search_bar(ui: &mut egui::Ui, query: &mut String) {
    ui.horizontal(|ui| {
        ui.label("🔍");
        ui.add(
            egui::TextEdit::singleline(query)
                .id_salt("employee_search")
                .hint_text("Search by name...")
                .desired_width(280.0),
        );
        if !query.is_empty() && ui.small_button("Clear").clicked() {
            query.clear();
        }
    });
}

/// Full-view loading and error displays. Returns `None` once data is ready.
pub fn fetch_placeholder(ui: &mut egui::Ui, fetch: &FetchState) -> Option<ViewAction> {
    match fetch {
        FetchState::Ready(_) => None,
        FetchState::Loading => {
            ui.vertical_centered(|ui| {
                ui.add_space(48.0);
                ui.spinner();
                ui.label("Loading employees...");
            });
            Some(ViewAction::None)
        }
        FetchState::Failed(message) => {
            let mut action = ViewAction::None;
            ui.vertical_centered(|ui| {
                ui.add_space(48.0);
                ui.label(egui::RichText::new("Error").strong().size(18.0).color(DANGER));
                ui.label(message);
                ui.add_space(8.0);
                if ui.button("Reload").clicked() {
                    action = ViewAction::Reload;
                }
            });
            Some(action)
        }
    }
}

pub fn avatar_badge(ui: &mut egui::Ui, employee: &Employee, fallback_url: &str) {
    let (rect, response) =
        ui.allocate_exact_size(egui::vec2(AVATAR_SIZE, AVATAR_SIZE), egui::Sense::hover());
    ui.painter()
        .circle_filled(rect.center(), AVATAR_SIZE * 0.5, ACCENT.gamma_multiply(0.8));
    ui.painter().text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        employee.initials(),
        egui::FontId::proportional(15.0),
        egui::Color32::WHITE,
    );
    response.on_hover_text(employee.avatar_url(fallback_url));
}

pub fn card_grid(ui: &mut egui::Ui, employees: &[&Employee], fallback_url: &str) {
    if employees.is_empty() {
        ui.weak("No employees match the search.");
        return;
    }

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            ui.horizontal_wrapped(|ui| {
                ui.spacing_mut().item_spacing = egui::vec2(12.0, 12.0);
                for employee in employees {
                    employee_card(ui, employee, fallback_url);
                }
            });
        });
}

fn employee_card(ui: &mut egui::Ui, employee: &Employee, fallback_url: &str) {
    egui::Frame::group(ui.style())
        .fill(ui.visuals().extreme_bg_color)
        .corner_radius(egui::CornerRadius::same(8))
        .inner_margin(egui::Margin::same(12))
        .show(ui, |ui| {
            ui.set_width(CARD_WIDTH);
            ui.horizontal(|ui| {
                avatar_badge(ui, employee, fallback_url);
                ui.vertical(|ui| {
                    ui.label(egui::RichText::new(&employee.name).strong().size(15.0));
                    ui.weak(format!("#{}", employee.id));
                });
            });
            ui.add_space(6.0);
            ui.label(format!("✉ {}", employee.email));
            ui.label(format!("☎ {}", employee.phone));
            ui.label(format!("🏠 {}", employee.address.display_line()));
        });
}

pub fn employee_table(
    ui: &mut egui::Ui,
    employees: &[&Employee],
    deletes: &DeleteFlow,
    fallback_url: &str,
) -> ViewAction {
    let mut action = ViewAction::None;

    ui.horizontal(|ui| {
        let add = egui::Button::new(egui::RichText::new("➕ Add Employee").color(egui::Color32::WHITE))
            .fill(ACCENT);
        if ui.add(add).clicked() {
            action = ViewAction::Add;
        }
    });
    ui.add_space(8.0);

    if employees.is_empty() {
        ui.weak("No employees match the search.");
        return action;
    }

    egui::ScrollArea::both()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            egui::Grid::new("employee_table")
                .striped(true)
                .num_columns(6)
                .spacing(egui::vec2(16.0, 8.0))
                .show(ui, |ui| {
                    for header in ["", "Name", "Email", "Phone", "Address", "Actions"] {
                        ui.label(egui::RichText::new(header).strong());
                    }
                    ui.end_row();

                    for employee in employees {
                        avatar_badge(ui, employee, fallback_url);
                        ui.label(&employee.name);
                        ui.label(&employee.email);
                        ui.label(&employee.phone);
                        ui.label(employee.address.display_line());
                        ui.horizontal(|ui| {
                            let deleting = deletes.phase_of(employee.id) == DeletePhase::Submitting;
                            if ui
                                .add_enabled(!deleting, egui::Button::new("✏ Edit"))
                                .clicked()
                            {
                                action = ViewAction::Edit(employee.id);
                            }
                            if deleting {
                                ui.spinner();
                            } else if ui
                                .button(egui::RichText::new("🗑 Delete").color(DANGER))
                                .clicked()
                            {
                                action = ViewAction::Delete(employee.id);
                            }
                        });
                        ui.end_row();
                    }
                });
        });

    action
}

/// Labeled inputs for every editable field, each followed by its error.
pub fn employee_form(
    ui: &mut egui::Ui,
    form: &mut EmployeeForm,
    errors: &FieldErrors,
    focus_first: bool,
    enabled: bool,
) {
    ui.add_enabled_ui(enabled, |ui| {
        for field in FormField::ALL {
            ui.label(egui::RichText::new(field.label()).strong());
            let edit = egui::TextEdit::singleline(form.field_mut(field))
                .id_salt(("employee_form", field.label()))
                .hint_text(field_hint(field))
                .desired_width(f32::INFINITY);
            let response = ui.add(edit);
            if focus_first && field == FormField::Name {
                response.request_focus();
            }
            if let Some(message) = errors.message_for(field) {
                ui.label(egui::RichText::new(message).small().color(DANGER));
            }
            ui.add_space(4.0);
        }
    });
}

fn field_hint(field: FormField) -> &'static str {
    match field {
        FormField::Name => "Full name",
        FormField::Phone => "Phone number",
        FormField::Email => "name@example.com",
        FormField::Street => "Street address",
    }
}
