use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::{render_frame, DialogView};
use crate::app::{Command, EditorServices};
use crate::i18n::Translator;
use crate::providers::{DialogKind, ExportImageParams};
use crate::tui::{components::Component, styles::Theme, Frame};

const SCALES: [u32; 3] = [1, 2, 4];

/// Choose the scale of a raster export
pub struct ExportImageDialog {
    translator: Translator,
    params: ExportImageParams,
    scale_index: usize,
}

impl ExportImageDialog {
    pub fn new(services: &EditorServices, params: ExportImageParams) -> Self {
        Self {
            translator: services.translator.clone(),
            params,
            scale_index: 0,
        }
    }
}

impl Component for ExportImageDialog {
    fn handle_key_event(&mut self, event: KeyEvent) -> Option<Command> {
        match event.code {
            KeyCode::Left | KeyCode::Char('h') => {
                self.scale_index = self.scale_index.saturating_sub(1)
            }
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Tab => {
                self.scale_index = (self.scale_index + 1).min(SCALES.len() - 1)
            }
            KeyCode::Char(c @ ('1' | '2' | '4')) => {
                if let Some(i) = SCALES.iter().position(|s| c.to_digit(10) == Some(*s)) {
                    self.scale_index = i;
                }
            }
            KeyCode::Enter => {
                return Some(Command::ExportImageScaled {
                    format: self.params.format,
                    scale: SCALES[self.scale_index],
                })
            }
            _ => {}
        }
        None
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let t = &self.translator;
        let title = format!("{} ({})", t.t("export_image_dialog.title"), self.params.format.label());
        let inner = render_frame(frame, area, &title, theme);
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Min(0)])
            .split(inner);

        frame.render_widget(
            Paragraph::new(t.t("export_image_dialog.scale")).style(theme.dim_style()),
            chunks[0],
        );

        let mut spans = Vec::new();
        for (i, scale) in SCALES.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" "));
            }
            spans.push(Span::styled(
                format!(" {}x ", scale),
                theme.button_style(i == self.scale_index),
            ));
        }
        spans.push(Span::raw("   "));
        spans.push(Span::styled(
            format!(" {} ", t.t("common.export")),
            theme.title_style(),
        ));
        frame.render_widget(
            Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
            chunks[1],
        );
    }
}

impl DialogView for ExportImageDialog {
    fn kind(&self) -> DialogKind {
        DialogKind::ExportImage
    }

    fn size(&self) -> (u16, u16) {
        (44, 5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::EventSink;
    use crate::domain::ImageFormat;
    use crate::providers::LocalConfigProvider;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_scale_keys_select_scale() {
        let local_config = LocalConfigProvider::in_memory(EventSink::detached());
        let mut dialog = ExportImageDialog {
            translator: Translator::new(&local_config),
            params: ExportImageParams {
                format: ImageFormat::Jpeg,
            },
            scale_index: 0,
        };

        dialog.handle_key_event(key(KeyCode::Char('4')));
        assert_eq!(
            dialog.handle_key_event(key(KeyCode::Enter)),
            Some(Command::ExportImageScaled {
                format: ImageFormat::Jpeg,
                scale: 4,
            })
        );

        dialog.handle_key_event(key(KeyCode::Right));
        assert_eq!(dialog.scale_index, 2);
        dialog.handle_key_event(key(KeyCode::Left));
        assert_eq!(dialog.scale_index, 1);
    }
}
