//! Collapsible navigation sidebar.

use crate::controller::reducer::ViewKind;

use super::theme::{sidebar_fill, Appearance, ACCENT};

const EXPANDED_WIDTH: f32 = 200.0;
const COLLAPSED_WIDTH: f32 = 56.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarAction {
    None,
    Navigate(ViewKind),
    ToggleExpanded,
    ToggleAppearance,
}

fn nav_icon(kind: ViewKind) -> &'static str {
    match kind {
        ViewKind::Card => "▦",
        ViewKind::Table => "☰",
    }
}

pub fn show(
    ctx: &egui::Context,
    expanded: bool,
    active: ViewKind,
    appearance: Appearance,
) -> SidebarAction {
    let mut action = SidebarAction::None;
    let text = egui::Color32::from_rgb(226, 232, 240);

    egui::SidePanel::left("navigation_sidebar")
        .resizable(false)
        .exact_width(if expanded { EXPANDED_WIDTH } else { COLLAPSED_WIDTH })
        .frame(
            egui::Frame::new()
                .fill(sidebar_fill(appearance))
                .inner_margin(egui::Margin::symmetric(8, 12)),
        )
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                if expanded {
                    ui.label(egui::RichText::new("EMS").strong().size(20.0).color(text));
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let toggle = if expanded { "«" } else { "»" };
                    if ui
                        .add(egui::Button::new(egui::RichText::new(toggle).color(text)).frame(false))
                        .on_hover_text(if expanded { "Collapse" } else { "Expand" })
                        .clicked()
                    {
                        action = SidebarAction::ToggleExpanded;
                    }
                });
            });
            ui.add_space(16.0);

            for kind in [ViewKind::Card, ViewKind::Table] {
                let label = if expanded {
                    format!("{}  {}", nav_icon(kind), kind.label())
                } else {
                    nav_icon(kind).to_string()
                };
                let selected = kind == active;
                let button = egui::Button::new(egui::RichText::new(label).color(text))
                    .fill(if selected {
                        ACCENT
                    } else {
                        egui::Color32::TRANSPARENT
                    })
                    .min_size(egui::vec2(ui.available_width(), 32.0));
                let response = ui.add(button).on_hover_text(kind.label());
                if response.clicked() && !selected {
                    action = SidebarAction::Navigate(kind);
                }
                ui.add_space(4.0);
            }

            ui.with_layout(egui::Layout::bottom_up(egui::Align::Min), |ui| {
                let label = if expanded {
                    format!("{}  {}", appearance.toggle_icon(), appearance.toggle_label())
                } else {
                    appearance.toggle_icon().to_string()
                };
                if ui
                    .add(egui::Button::new(egui::RichText::new(label).color(text)).frame(false))
                    .clicked()
                {
                    action = SidebarAction::ToggleAppearance;
                }
            });
        });

    action
}
