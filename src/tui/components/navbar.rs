//! Top navigation bar
//!
//! One line holding the menu titles, the diagram name and the last saved
//! label. F10 opens the first menu; the dropdown is drawn over the page by
//! `render_dropdown`. Menus are rebuilt from the services on every frame so
//! labels and enabled states always follow the current state.

use chrono::Utc;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, List, ListItem, Paragraph},
};
use std::time::Duration;
use tui_textarea::TextArea;
use unicode_width::UnicodeWidthStr;

use super::Component;
use crate::app::{Command, EditorServices};
use crate::domain::{DatabaseType, ImageFormat};
use crate::i18n::LANGUAGES;
use crate::providers::{ScrollAction, ThemePreference};
use crate::tui::{styles::Theme, utils::truncate, Frame};

#[derive(Debug, Clone, PartialEq)]
pub enum MenuItem {
    Action {
        label: String,
        shortcut: Option<String>,
        command: Command,
        enabled: bool,
        checked: bool,
    },
    /// Title of a group of actions, such as a submenu
    Header(String),
    Separator,
}

impl MenuItem {
    fn action(label: impl Into<String>, command: Command) -> Self {
        MenuItem::Action {
            label: label.into(),
            shortcut: None,
            command,
            enabled: true,
            checked: false,
        }
    }

    fn shortcut(mut self, key: String) -> Self {
        if let MenuItem::Action { shortcut, .. } = &mut self {
            *shortcut = Some(key);
        }
        self
    }

    fn enabled(mut self, value: bool) -> Self {
        if let MenuItem::Action { enabled, .. } = &mut self {
            *enabled = value;
        }
        self
    }

    fn checked(mut self, value: bool) -> Self {
        if let MenuItem::Action { checked, .. } = &mut self {
            *checked = value;
        }
        self
    }

    fn is_selectable(&self) -> bool {
        matches!(self, MenuItem::Action { enabled: true, .. })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Menu {
    pub title: String,
    pub items: Vec<MenuItem>,
}

/// Menus of the editor for the current service state
pub fn build_menus(services: &EditorServices) -> Vec<Menu> {
    let t = &services.translator;
    let keys = services.shortcuts.key_map();
    let local = services.local_config.get();
    let sub = |label: &str| format!("  {}", label);

    let mut file = vec![
        MenuItem::action(t.t("menu.file.new"), Command::NewDiagram)
            .shortcut(keys.new_diagram.label()),
        MenuItem::action(t.t("menu.file.open"), Command::OpenDiagram)
            .shortcut(keys.open_diagram.label()),
        MenuItem::action(t.t("menu.file.save"), Command::SaveDiagram).shortcut(keys.save.label()),
        MenuItem::Separator,
        MenuItem::Header(t.t("menu.file.import_database")),
    ];
    file.extend(
        DatabaseType::IMPORTABLE
            .iter()
            .map(|db| MenuItem::action(sub(db.label()), Command::ImportDatabase(*db))),
    );
    file.push(MenuItem::Header(t.t("menu.file.export_sql")));
    file.extend(DatabaseType::ALL.iter().map(|db| {
        let label = if db.is_ai_export() {
            format!("{} ✦", db.label())
        } else {
            db.label().to_string()
        };
        MenuItem::action(sub(&label), Command::ExportSql(*db))
    }));
    file.push(MenuItem::Header(t.t("menu.file.export_as")));
    file.extend(
        [ImageFormat::Png, ImageFormat::Jpeg, ImageFormat::Svg]
            .iter()
            .map(|f| MenuItem::action(sub(f.label()), Command::ExportImage(*f))),
    );
    file.extend([
        MenuItem::Separator,
        MenuItem::action(t.t("menu.file.delete_diagram"), Command::DeleteDiagram),
        MenuItem::Separator,
        MenuItem::action(t.t("menu.file.exit"), Command::Exit).shortcut(keys.quit.label()),
    ]);

    let edit = vec![
        MenuItem::action(t.t("menu.edit.undo"), Command::Undo)
            .shortcut(keys.undo.label())
            .enabled(services.history.has_undo()),
        MenuItem::action(t.t("menu.edit.redo"), Command::Redo)
            .shortcut(keys.redo.label())
            .enabled(services.history.has_redo()),
        MenuItem::Separator,
        MenuItem::action(
            t.t("create_relationship_dialog.title"),
            Command::CreateRelationship,
        ),
        MenuItem::action(t.t("menu.edit.clear"), Command::ClearDiagram),
    ];

    let sidebar_label = if services.layout.is_side_panel_shown() {
        "menu.view.hide_sidebar"
    } else {
        "menu.view.show_sidebar"
    };
    let cardinality_label = if local.show_cardinality {
        "menu.view.hide_cardinality"
    } else {
        "menu.view.show_cardinality"
    };
    let dependencies_label = if local.show_dependencies_on_canvas {
        "menu.view.hide_dependencies"
    } else {
        "menu.view.show_dependencies"
    };
    let mut view = vec![
        MenuItem::action(t.t(sidebar_label), Command::ToggleSidePanel)
            .shortcut(keys.toggle_side_panel.label()),
        MenuItem::action(t.t(cardinality_label), Command::ToggleCardinality),
        MenuItem::action(t.t(dependencies_label), Command::ToggleDependencies),
        MenuItem::Header(t.t("menu.view.zoom_on_scroll")),
        MenuItem::action(sub(&t.t("zoom.on")), Command::SetScrollAction(ScrollAction::Zoom))
            .checked(local.scroll_action == ScrollAction::Zoom),
        MenuItem::action(sub(&t.t("zoom.off")), Command::SetScrollAction(ScrollAction::Pan))
            .checked(local.scroll_action == ScrollAction::Pan),
        MenuItem::Header(t.t("menu.view.theme")),
    ];
    for (key, theme) in [
        ("theme.system", ThemePreference::System),
        ("theme.light", ThemePreference::Light),
        ("theme.dark", ThemePreference::Dark),
    ] {
        view.push(
            MenuItem::action(sub(&t.t(key)), Command::SetTheme(theme))
                .checked(local.theme == theme),
        );
    }
    view.push(MenuItem::Header(t.t("menu.view.change_language")));
    for language in LANGUAGES.iter() {
        view.push(
            MenuItem::action(
                sub(language.name),
                Command::ChangeLanguage(language.code.to_string()),
            )
            .checked(local.language == language.code),
        );
    }

    let help = vec![
        MenuItem::action(t.t("menu.help.visit_website"), Command::VisitWebsite),
        MenuItem::action(t.t("menu.help.examples"), Command::ShowExamples),
    ];

    vec![
        Menu {
            title: t.t("menu.file.file"),
            items: file,
        },
        Menu {
            title: t.t("menu.edit.edit"),
            items: edit,
        },
        Menu {
            title: t.t("menu.view.view"),
            items: view,
        },
        Menu {
            title: t.t("menu.help.help"),
            items: help,
        },
    ]
}

/// "Last saved ..." label for a diagram saved `age` ago
pub fn last_saved_label(services: &EditorServices, age: Duration) -> String {
    let t = &services.translator;
    if age.as_secs() < 60 {
        return t.t("last_saved_now");
    }
    // Minute precision reads better than "3m 12s"
    let rounded = Duration::from_secs(age.as_secs() / 60 * 60);
    t.t_with(
        "last_saved",
        &[("time", humantime::format_duration(rounded).to_string())],
    )
}

pub struct TopNavbar {
    services: EditorServices,
    open_menu: Option<usize>,
    selected: usize,
    rename: Option<TextArea<'static>>,
}

impl TopNavbar {
    pub fn new(services: &EditorServices) -> Self {
        Self {
            services: services.clone(),
            open_menu: None,
            selected: 0,
            rename: None,
        }
    }

    /// Whether the navbar currently takes keyboard input
    pub fn is_active(&self) -> bool {
        self.open_menu.is_some() || self.rename.is_some()
    }

    pub fn open_menu(&mut self) {
        self.open_menu = Some(0);
        self.selected = self.first_selectable(0);
    }

    pub fn close_menu(&mut self) {
        self.open_menu = None;
    }

    /// Edit the diagram name in place
    pub fn start_rename(&mut self) {
        let diagram = self.services.schema.current_diagram();
        if diagram.id.is_empty() {
            return;
        }
        let mut input = TextArea::new(vec![diagram.name]);
        input.move_cursor(tui_textarea::CursorMove::End);
        self.rename = Some(input);
    }

    fn first_selectable(&self, menu: usize) -> usize {
        build_menus(&self.services)
            .get(menu)
            .and_then(|m| m.items.iter().position(MenuItem::is_selectable))
            .unwrap_or(0)
    }

    fn step(&mut self, items: &[MenuItem], forward: bool) {
        let len = items.len();
        if len == 0 {
            return;
        }
        let mut index = self.selected;
        for _ in 0..len {
            index = if forward {
                (index + 1) % len
            } else {
                (index + len - 1) % len
            };
            if items[index].is_selectable() {
                self.selected = index;
                return;
            }
        }
    }

    fn handle_rename_key(&mut self, event: KeyEvent) -> Option<Command> {
        let input = self.rename.as_mut()?;
        match event.code {
            KeyCode::Esc => {
                self.rename = None;
                None
            }
            KeyCode::Enter => {
                let name = input.lines().join(" ").trim().to_string();
                self.rename = None;
                (!name.is_empty()).then_some(Command::RenameDiagram(name))
            }
            _ => {
                input.input(event);
                None
            }
        }
    }

    /// Draw the open dropdown over `area`
    pub fn render_dropdown(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let Some(open) = self.open_menu else {
            return;
        };
        let menus = build_menus(&self.services);
        let Some(menu) = menus.get(open) else {
            return;
        };

        let x = 1 + menus[..open]
            .iter()
            .map(|m| m.title.width() as u16 + 3)
            .sum::<u16>();
        let width = menu
            .items
            .iter()
            .map(|item| match item {
                MenuItem::Action { label, shortcut, .. } => {
                    label.width() + shortcut.as_ref().map_or(0, |s| s.width() + 2) + 4
                }
                MenuItem::Header(label) => label.width() + 2,
                MenuItem::Separator => 0,
            })
            .max()
            .unwrap_or(10) as u16
            + 2;
        let height = menu.items.len() as u16 + 2;
        let rect = Rect::new(
            x.min(area.width.saturating_sub(width)),
            area.y + 1,
            width.min(area.width),
            height.min(area.height.saturating_sub(1)),
        );

        let inner_width = rect.width.saturating_sub(2) as usize;
        let items: Vec<ListItem> = menu
            .items
            .iter()
            .enumerate()
            .map(|(i, item)| match item {
                MenuItem::Action {
                    label,
                    shortcut,
                    enabled,
                    checked,
                    ..
                } => {
                    let mark = if *checked { "● " } else { "  " };
                    let key = shortcut.clone().unwrap_or_default();
                    let gap = inner_width
                        .saturating_sub(mark.width() + label.width() + key.width())
                        .max(1);
                    let text = format!("{}{}{}{}", mark, label, " ".repeat(gap), key);
                    let style = if !enabled {
                        theme.disabled_style()
                    } else if i == self.selected {
                        theme.selection_style()
                    } else {
                        theme.text_style()
                    };
                    ListItem::new(text).style(style)
                }
                MenuItem::Header(label) => ListItem::new(format!(" {}", label))
                    .style(theme.dim_style().add_modifier(Modifier::BOLD)),
                MenuItem::Separator => {
                    ListItem::new("─".repeat(inner_width)).style(theme.border_style())
                }
            })
            .collect();

        frame.render_widget(Clear, rect);
        frame.render_widget(
            List::new(items).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(theme.focused_border_style())
                    .style(theme.base_style()),
            ),
            rect,
        );
    }
}

impl Component for TopNavbar {
    fn handle_key_event(&mut self, event: KeyEvent) -> Option<Command> {
        if self.rename.is_some() {
            return self.handle_rename_key(event);
        }
        let open = self.open_menu?;
        let menus = build_menus(&self.services);
        let count = menus.len();
        match event.code {
            KeyCode::Esc | KeyCode::F(10) => self.close_menu(),
            KeyCode::Left => {
                let menu = (open + count - 1) % count;
                self.open_menu = Some(menu);
                self.selected = self.first_selectable(menu);
            }
            KeyCode::Right => {
                let menu = (open + 1) % count;
                self.open_menu = Some(menu);
                self.selected = self.first_selectable(menu);
            }
            KeyCode::Up => self.step(&menus[open].items, false),
            KeyCode::Down => self.step(&menus[open].items, true),
            KeyCode::Enter => {
                if let Some(MenuItem::Action {
                    command,
                    enabled: true,
                    ..
                }) = menus[open].items.get(self.selected)
                {
                    let command = command.clone();
                    self.close_menu();
                    return Some(command);
                }
            }
            _ => {}
        }
        None
    }

    fn handle_paste(&mut self, text: &str) {
        if let Some(input) = self.rename.as_mut() {
            input.insert_str(text.replace('\n', " "));
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let menus = build_menus(&self.services);
        let mut spans = vec![Span::raw(" ")];
        for (i, menu) in menus.iter().enumerate() {
            let style = if self.open_menu == Some(i) {
                theme.selection_style()
            } else {
                theme.status_bar_style()
            };
            spans.push(Span::styled(format!(" {} ", menu.title), style));
            spans.push(Span::raw(" "));
        }
        frame.render_widget(
            Paragraph::new(Line::from(spans)).style(theme.status_bar_style()),
            area,
        );

        let diagram = self.services.schema.current_diagram();
        if diagram.id.is_empty() {
            return;
        }

        let age = (Utc::now() - diagram.updated_at).to_std().unwrap_or_default();
        let saved = last_saved_label(&self.services, age);
        let saved_width = saved.width() as u16 + 1;
        let saved_rect = Rect::new(
            area.x + area.width.saturating_sub(saved_width),
            area.y,
            saved_width.min(area.width),
            1,
        );
        frame.render_widget(
            Paragraph::new(saved).style(theme.dim_style().bg(theme.background_alt)),
            saved_rect,
        );

        let menus_width = 1 + menus.iter().map(|m| m.title.width() as u16 + 3).sum::<u16>();
        let free = area.width.saturating_sub(menus_width + saved_width + 2);
        let name_rect = Rect::new(area.x + menus_width + 1, area.y, free, 1);
        match self.rename.as_mut() {
            Some(input) => {
                input.set_style(theme.selection_style());
                frame.render_widget(input.widget(), name_rect);
            }
            None => frame.render_widget(
                Paragraph::new(Span::styled(
                    truncate(&diagram.name, free as usize),
                    theme.title_style().bg(theme.background_alt),
                )),
                name_rect,
            ),
        }
    }
}
