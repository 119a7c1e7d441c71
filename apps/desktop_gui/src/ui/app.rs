//! Application shell: drains backend events, routes user actions, and lays
//! out the sidebar, the mounted view, notices, and dialogs.

use std::time::{Duration, Instant};

use client_core::{EditorTarget, NoticeKind};
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::controller::orchestration::dispatch_backend_command;
use crate::controller::reducer::{AppState, ViewKind};

use super::modal::{ModalAction, ModalDialog, ModalLifecycle};
use super::sidebar::{self, SidebarAction};
use super::theme::{self, Appearance, UiPreferences, DANGER, SUCCESS};
use super::views::{self, ViewAction};

/// Non-persisted startup inputs resolved from config and flags.
#[derive(Debug, Clone)]
pub struct StartupConfig {
    pub initial_view: Option<ViewKind>,
    pub default_avatar_url: String,
}

pub struct EmployeeDeskApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    state: AppState,
    prefs: UiPreferences,
    applied_appearance: Option<Appearance>,
    default_avatar_url: String,
    editor_modal: ModalLifecycle,
    confirm_modal: ModalLifecycle,
}

impl EmployeeDeskApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        startup: StartupConfig,
        persisted: Option<UiPreferences>,
    ) -> Self {
        let mut prefs = persisted.unwrap_or_default();
        if let Some(view) = startup.initial_view {
            prefs.last_view = view;
        }

        let (state, initial_load) = AppState::new(prefs.last_view);
        let mut app = Self {
            cmd_tx,
            ui_rx,
            state,
            prefs,
            applied_appearance: None,
            default_avatar_url: startup.default_avatar_url,
            editor_modal: ModalLifecycle::default(),
            confirm_modal: ModalLifecycle::default(),
        };
        app.dispatch(initial_load);
        app
    }

    fn dispatch(&mut self, cmd: BackendCommand) {
        dispatch_backend_command(&self.cmd_tx, cmd, &mut self.state);
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            self.state.apply(event);
        }
        self.state.notices.expire(Instant::now());
    }

    fn apply_theme_if_needed(&mut self, ctx: &egui::Context) {
        if self.applied_appearance != Some(self.prefs.appearance) {
            ctx.set_visuals(theme::visuals_for(self.prefs.appearance));
            self.applied_appearance = Some(self.prefs.appearance);
        }
    }

    fn show_sidebar(&mut self, ctx: &egui::Context) {
        match sidebar::show(
            ctx,
            self.prefs.sidebar_expanded,
            self.state.view.kind,
            self.prefs.appearance,
        ) {
            SidebarAction::None => {}
            SidebarAction::Navigate(kind) => {
                self.prefs.last_view = kind;
                if let Some(cmd) = self.state.switch_view(kind) {
                    self.dispatch(cmd);
                }
            }
            SidebarAction::ToggleExpanded => {
                self.prefs.sidebar_expanded = !self.prefs.sidebar_expanded;
            }
            SidebarAction::ToggleAppearance => {
                self.prefs.appearance = self.prefs.appearance.toggled();
            }
        }
    }

    fn show_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(24.0)
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    ui.small(egui::RichText::new(&self.state.status).weak());
                });
            });
    }

    fn show_main_view(&mut self, ctx: &egui::Context) {
        let mut action = ViewAction::None;

        let dialog_open = self.editor_modal.holds_focus() || self.confirm_modal.holds_focus();
        if !dialog_open && ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.state.view.search.clear();
        }

        egui::CentralPanel::default()
            .frame(
                egui::Frame::central_panel(&ctx.style()).inner_margin(egui::Margin::same(16)),
            )
            .show(ctx, |ui| {
                let view = &mut self.state.view;
                ui.heading(match view.kind {
                    ViewKind::Card => "Employees",
                    ViewKind::Table => "Employee Management",
                });
                ui.add_space(8.0);

                if let Some(placeholder) = views::fetch_placeholder(ui, &view.fetch) {
                    action = placeholder;
                    return;
                }

                views::search_bar(ui, &mut view.search);
                ui.add_space(8.0);

                let visible = view.visible_employees();
                action = match view.kind {
                    ViewKind::Card => {
                        views::card_grid(ui, &visible, &self.default_avatar_url);
                        ViewAction::None
                    }
                    ViewKind::Table => views::employee_table(
                        ui,
                        &visible,
                        &view.deletes,
                        &self.default_avatar_url,
                    ),
                };
            });

        match action {
            ViewAction::None => {}
            ViewAction::Add => {
                self.state.open_add();
            }
            ViewAction::Edit(id) => {
                self.state.open_edit(id);
            }
            ViewAction::Delete(id) => {
                self.state.request_delete(id);
            }
            ViewAction::Reload => {
                let cmd = self.state.reload();
                self.dispatch(cmd);
            }
        }
    }

    fn show_editor_dialog(&mut self, ctx: &egui::Context) {
        let editor = &mut self.state.view.editor;
        if !editor.is_open() {
            self.editor_modal.settle_closed(ctx);
            return;
        }

        let (title, submit_label) = match editor.target() {
            EditorTarget::New => ("Add Employee", "Add"),
            EditorTarget::Existing(_) => ("Edit Employee", "Update"),
        };
        let submitting = editor.is_submitting();
        let errors = editor.errors().clone();

        let action = ModalDialog::new("employee_form_dialog", title)
            .submit_label(if submitting { "Saving..." } else { submit_label })
            .submit_enabled(!submitting)
            .show(ctx, &mut self.editor_modal, |ui, just_opened| {
                views::employee_form(ui, editor.form_mut(), &errors, just_opened, !submitting);
            });

        match action {
            ModalAction::None => {}
            ModalAction::Submit => {
                if let Some(cmd) = self.state.submit_editor() {
                    self.dispatch(cmd);
                }
            }
            ModalAction::Dismiss(_) => {
                tracing::debug!(
                    reason = ?self.editor_modal.last_dismissal(),
                    "employee dialog dismissed"
                );
                self.state.close_editor();
            }
        }
    }

    fn show_delete_confirmation(&mut self, ctx: &egui::Context) {
        let Some(employee) = self.state.view.deletes.pending_confirmation() else {
            self.confirm_modal.settle_closed(ctx);
            return;
        };
        let prompt = format!("Are you sure you want to delete {}?", employee.name);

        let action = ModalDialog::new("confirm_delete_dialog", "Delete Employee")
            .submit_label("Delete")
            .cancel_label("Keep")
            .show(ctx, &mut self.confirm_modal, |ui, _| {
                ui.label(prompt);
            });

        let confirmed = match action {
            ModalAction::None => return,
            ModalAction::Submit => {
                self.confirm_modal.settle_closed(ctx);
                true
            }
            ModalAction::Dismiss(_) => false,
        };
        if let Some(cmd) = self.state.resolve_delete(confirmed) {
            self.dispatch(cmd);
        }
    }

    fn show_notices(&mut self, ctx: &egui::Context) {
        if self.state.notices.is_empty() {
            return;
        }
        let mut dismissed = None;
        egui::Area::new(egui::Id::new("notice_toasts"))
            .anchor(egui::Align2::RIGHT_TOP, egui::vec2(-16.0, 16.0))
            .order(egui::Order::Tooltip)
            .show(ctx, |ui| {
                for posted in self.state.notices.iter() {
                    let fill = match posted.notice.kind {
                        NoticeKind::Success => SUCCESS,
                        NoticeKind::Error => DANGER,
                    };
                    egui::Frame::NONE
                        .fill(fill)
                        .corner_radius(8.0)
                        .inner_margin(egui::Margin::symmetric(12, 8))
                        .show(ui, |ui| {
                            ui.horizontal(|ui| {
                                ui.label(
                                    egui::RichText::new(&posted.notice.message)
                                        .color(egui::Color32::WHITE),
                                );
                                if ui
                                    .add(
                                        egui::Button::new(
                                            egui::RichText::new("✕").color(egui::Color32::WHITE),
                                        )
                                        .frame(false),
                                    )
                                    .clicked()
                                {
                                    dismissed = Some(posted.id);
                                }
                            });
                        });
                    ui.add_space(6.0);
                }
            });
        if let Some(id) = dismissed {
            self.state.notices.dismiss(id);
        }
    }
}

impl eframe::App for EmployeeDeskApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        self.apply_theme_if_needed(ctx);

        self.show_sidebar(ctx);
        self.show_status_bar(ctx);
        self.show_main_view(ctx);
        self.show_editor_dialog(ctx);
        self.show_delete_confirmation(ctx);
        self.show_notices(ctx);

        ctx.request_repaint_after(Duration::from_millis(100));
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        if let Some(serialized) = self.prefs.to_storage_text() {
            storage.set_string(theme::PREFERENCES_STORAGE_KEY, serialized);
        }
    }
}
