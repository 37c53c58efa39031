//! Short-lived toast notices

use std::time::{Duration, Instant};

use eframe::egui;

const NOTICE_LIFETIME: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Info,
    Error,
}

#[derive(Debug, Clone)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
    created: Instant,
}

/// Queue of notices shown in the bottom-right corner
#[derive(Debug, Default)]
pub struct Notices {
    items: Vec<Notice>,
}

impl Notices {
    pub fn push(&mut self, level: NoticeLevel, text: impl Into<String>) {
        let text = text.into();
        if level == NoticeLevel::Error {
            tracing::warn!("{}", text);
        }
        self.items.push(Notice {
            level,
            text,
            created: Instant::now(),
        });
    }

    pub fn success(&mut self, text: impl Into<String>) {
        self.push(NoticeLevel::Success, text);
    }

    pub fn info(&mut self, text: impl Into<String>) {
        self.push(NoticeLevel::Info, text);
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.push(NoticeLevel::Error, text);
    }

    #[cfg(test)]
    pub fn items(&self) -> &[Notice] {
        &self.items
    }

    fn prune(&mut self, now: Instant) {
        self.items
            .retain(|notice| now.duration_since(notice.created) < NOTICE_LIFETIME);
    }

    /// Draw live notices and drop expired ones
    pub fn show(&mut self, ctx: &egui::Context) {
        self.prune(Instant::now());
        if self.items.is_empty() {
            return;
        }

        egui::Area::new(egui::Id::new("notices"))
            .anchor(egui::Align2::RIGHT_BOTTOM, egui::vec2(-12.0, -36.0))
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                for notice in &self.items {
                    let color = match notice.level {
                        NoticeLevel::Success => egui::Color32::from_rgb(152, 195, 121),
                        NoticeLevel::Info => egui::Color32::from_rgb(129, 162, 190),
                        NoticeLevel::Error => egui::Color32::from_rgb(224, 108, 117),
                    };
                    egui::Frame::popup(ui.style()).show(ui, |ui| {
                        ui.colored_label(color, &notice.text);
                    });
                }
            });

        ctx.request_repaint_after(Duration::from_millis(250));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prune_expired() {
        let mut notices = Notices::default();
        notices.success("Folder created");
        notices.error("Folder name cannot be empty");
        assert_eq!(notices.items().len(), 2);
        assert_eq!(notices.items()[1].level, NoticeLevel::Error);

        notices.prune(Instant::now());
        assert_eq!(notices.items().len(), 2);

        notices.prune(Instant::now() + NOTICE_LIFETIME);
        assert!(notices.items().is_empty());
    }
}
