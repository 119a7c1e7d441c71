//! Scoped modal overlay used for the employee form and delete confirmation.
//!
//! The overlay blocks the rest of the UI while open. Callers react to the
//! returned [`ModalAction`] instead of passing callbacks.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissReason {
    CloseButton,
    Escape,
    ClickOutside,
    Submitted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalAction {
    None,
    Submit,
    Dismiss(DismissReason),
}

/// Tracks whether a dialog currently holds the keyboard focus trap.
#[derive(Debug, Default)]
pub struct ModalLifecycle {
    trap: Option<egui::Id>,
    last_dismissal: Option<DismissReason>,
}

impl ModalLifecycle {
    /// Takes the trap for `id`. Returns true on the frame the dialog opens.
    pub fn engage(&mut self, id: egui::Id) -> bool {
        if self.trap == Some(id) {
            return false;
        }
        self.trap = Some(id);
        self.last_dismissal = None;
        true
    }

    /// Releases the trap. Returns false when nothing was held.
    pub fn release(&mut self, reason: DismissReason) -> bool {
        if self.trap.take().is_none() {
            return false;
        }
        self.last_dismissal = Some(reason);
        true
    }

    pub fn holds_focus(&self) -> bool {
        self.trap.is_some()
    }

    pub fn last_dismissal(&self) -> Option<DismissReason> {
        self.last_dismissal
    }

    /// Called on frames where the owner reports the dialog closed, e.g. after
    /// a successful submit finished.
    pub fn settle_closed(&mut self, ctx: &egui::Context) {
        if self.release(DismissReason::Submitted) {
            surrender_focus(ctx);
        }
    }
}

pub struct ModalDialog<'a> {
    id: egui::Id,
    title: &'a str,
    submit_label: &'a str,
    cancel_label: &'a str,
    submit_enabled: bool,
    width: f32,
}

impl<'a> ModalDialog<'a> {
    pub fn new(id_salt: impl std::hash::Hash, title: &'a str) -> Self {
        Self {
            id: egui::Id::new(id_salt),
            title,
            submit_label: "Submit",
            cancel_label: "Cancel",
            submit_enabled: true,
            width: 420.0,
        }
    }

    pub fn submit_label(mut self, label: &'a str) -> Self {
        self.submit_label = label;
        self
    }

    pub fn cancel_label(mut self, label: &'a str) -> Self {
        self.cancel_label = label;
        self
    }

    pub fn submit_enabled(mut self, enabled: bool) -> Self {
        self.submit_enabled = enabled;
        self
    }

    /// Draws the dialog for this frame. `content` receives `true` on the
    /// frame the dialog opens so it can place initial focus.
    pub fn show(
        self,
        ctx: &egui::Context,
        lifecycle: &mut ModalLifecycle,
        content: impl FnOnce(&mut egui::Ui, bool),
    ) -> ModalAction {
        let just_opened = lifecycle.engage(self.id);

        let response = egui::Modal::new(self.id).show(ctx, |ui| {
            ui.set_width(self.width);
            let mut action = ModalAction::None;

            ui.horizontal(|ui| {
                ui.heading(self.title);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.small_button("✕").on_hover_text("Close").clicked() {
                        action = ModalAction::Dismiss(DismissReason::CloseButton);
                    }
                });
            });
            ui.separator();

            content(ui, just_opened);

            ui.add_space(10.0);
            ui.horizontal(|ui| {
                let submit = egui::Button::new(
                    egui::RichText::new(self.submit_label).color(egui::Color32::WHITE),
                )
                .fill(super::theme::ACCENT);
                if ui.add_enabled(self.submit_enabled, submit).clicked() {
                    action = ModalAction::Submit;
                }
                if ui.button(self.cancel_label).clicked() {
                    action = ModalAction::Dismiss(DismissReason::CloseButton);
                }
            });
            action
        });

        let mut action = response.inner;
        if action == ModalAction::None && response.should_close() {
            let escape = ctx.input(|i| i.key_pressed(egui::Key::Escape));
            action = ModalAction::Dismiss(if escape {
                DismissReason::Escape
            } else {
                DismissReason::ClickOutside
            });
        }

        if let ModalAction::Dismiss(reason) = action {
            if lifecycle.release(reason) {
                surrender_focus(ctx);
            }
        }
        action
    }
}

fn surrender_focus(ctx: &egui::Context) {
    ctx.memory_mut(|mem| {
        if let Some(focused) = mem.focused() {
            mem.surrender_focus(focused);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engage_reports_only_the_opening_frame() {
        let mut lifecycle = ModalLifecycle::default();
        let id = egui::Id::new("employee_form");
        assert!(lifecycle.engage(id));
        assert!(!lifecycle.engage(id));
        assert!(lifecycle.holds_focus());
    }

    #[test]
    fn every_dismissal_path_releases_the_trap() {
        for reason in [
            DismissReason::CloseButton,
            DismissReason::Escape,
            DismissReason::ClickOutside,
            DismissReason::Submitted,
        ] {
            let mut lifecycle = ModalLifecycle::default();
            lifecycle.engage(egui::Id::new("dialog"));
            assert!(lifecycle.release(reason));
            assert!(!lifecycle.holds_focus());
            assert_eq!(lifecycle.last_dismissal(), Some(reason));
        }
    }

    #[test]
    fn releasing_twice_is_harmless() {
        let mut lifecycle = ModalLifecycle::default();
        lifecycle.engage(egui::Id::new("dialog"));
        assert!(lifecycle.release(DismissReason::Escape));
        assert!(!lifecycle.release(DismissReason::Submitted));
        assert_eq!(lifecycle.last_dismissal(), Some(DismissReason::Escape));
    }

    #[test]
    fn switching_dialogs_counts_as_a_fresh_open() {
        let mut lifecycle = ModalLifecycle::default();
        lifecycle.engage(egui::Id::new("employee_form"));
        assert!(lifecycle.engage(egui::Id::new("confirm_delete")));
    }

    #[test]
    fn settle_closed_releases_after_successful_submit() {
        let ctx = egui::Context::default();
        let mut lifecycle = ModalLifecycle::default();
        lifecycle.engage(egui::Id::new("employee_form"));
        lifecycle.settle_closed(&ctx);
        assert!(!lifecycle.holds_focus());
        assert_eq!(lifecycle.last_dismissal(), Some(DismissReason::Submitted));
    }
}
