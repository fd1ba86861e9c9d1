use crate::app::{AppEvent, EditorServices, EventSink, GalleryServices};
use crate::config::Settings;
use crate::domain::Route;
use crate::tui::{
    events::Event,
    keys::KeyMap,
    pages::{editor::EditorPage, examples::ExamplesPage, Page},
    utils::layout::centered_rect_percent,
    Frame,
};
use anyhow::Result;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph};
use std::sync::Arc;
use tracing::{error, info};

/// Main application state and controller
pub struct App {
    /// Whether the application should quit
    pub should_quit: bool,

    /// Current application dimensions
    pub size: Rect,

    /// Key mappings for the application
    pub key_map: KeyMap,

    /// Show the help overlay
    pub show_help: bool,

    settings: Arc<Settings>,
    events: EventSink,
    page: Box<dyn Page>,

    /// Title last written to the terminal
    title: Option<String>,
}

impl App {
    /// Create the application showing `route`
    pub async fn new(settings: Arc<Settings>, events: EventSink, route: Route) -> Result<Self> {
        let mut page = build_page(&settings, &events, route).await?;
        page.on_enter().await?;

        Ok(Self {
            should_quit: false,
            size: Rect::default(),
            key_map: KeyMap::default(),
            show_help: false,
            settings,
            events,
            page,
            title: None,
        })
    }

    /// Handle incoming events; returns true once the app should exit
    pub async fn handle_event(&mut self, event: Event) -> Result<bool> {
        if let Err(e) = self.dispatch(event).await {
            error!("Event handling failed: {:#}", e);
        }
        Ok(self.should_quit)
    }

    async fn dispatch(&mut self, event: Event) -> Result<()> {
        match event {
            Event::Key(key_event) => {
                if self.key_map.should_quit(&key_event) {
                    self.should_quit = true;
                    return Ok(());
                }

                if self.key_map.should_show_help(&key_event) {
                    self.show_help = !self.show_help;
                    return Ok(());
                }

                if self.show_help {
                    self.show_help = false;
                    return Ok(());
                }

                self.page.handle_key_event(key_event).await?;
            }

            Event::Mouse(mouse_event) => {
                self.page.handle_mouse_event(mouse_event).await?;
            }

            Event::Paste(text) => self.page.handle_paste(&text),

            Event::Resize(width, height) => {
                self.size = Rect::new(0, 0, width, height);
                self.page.on_resize(self.size);
            }

            Event::Tick => self.page.tick().await?,

            Event::App(AppEvent::Shutdown) => {
                info!("Shutdown requested");
                self.should_quit = true;
            }

            Event::App(event) => {
                if let AppEvent::Navigate { route } = &event {
                    if !self.page.handles_route(route) {
                        self.switch_page(route.clone()).await?;
                        return Ok(());
                    }
                }
                self.page.handle_app_event(&event).await?;
            }
        }
        Ok(())
    }

    async fn switch_page(&mut self, route: Route) -> Result<()> {
        info!("Switching page for {}", route);
        let mut page = build_page(&self.settings, &self.events, route).await?;
        page.on_resize(self.size);
        page.on_enter().await?;
        self.page = page;
        Ok(())
    }

    /// New terminal title, if it changed since the last call
    pub fn take_title_change(&mut self) -> Option<String> {
        let title = self.page.title();
        if self.title.as_deref() == Some(title.as_str()) {
            return None;
        }
        self.title = Some(title.clone());
        Some(title)
    }

    /// Render the application UI
    pub fn render(&mut self, frame: &mut Frame) {
        self.size = frame.size();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(frame.size());

        self.page.render(frame, chunks[0]);
        self.render_status_bar(frame, chunks[1]);

        if self.show_help {
            self.render_help_overlay(frame);
        }
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let theme = self.page.theme();
        let status_text = format!(
            " {} | {} help | {} quit",
            self.page.title(),
            self.key_map.help.label(),
            self.key_map.quit.label()
        );
        frame.render_widget(
            Paragraph::new(status_text).style(theme.status_bar_style()),
            area,
        );
    }

    fn render_help_overlay(&self, frame: &mut Frame) {
        let theme = self.page.theme();
        let help_area = centered_rect_percent(60, 60, frame.size());

        let mut lines: Vec<Line> = self
            .key_map
            .help_text()
            .lines()
            .map(|line| Line::from(line.to_string()))
            .collect();
        let page_help = self.page.help_text();
        if !page_help.is_empty() {
            lines.push(Line::from(""));
            lines.extend(
                page_help
                    .into_iter()
                    .map(|(key, description)| Line::from(format!("{:<8} {}", key, description))),
            );
        }

        let help_block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme.focused_border_style())
            .title(" Help ")
            .style(theme.base_style());

        frame.render_widget(Clear, help_area);
        frame.render_widget(
            Paragraph::new(lines)
                .block(help_block)
                .style(theme.text_style()),
            help_area,
        );
    }
}

/// Compose the services a route needs and build its page
async fn build_page(
    settings: &Arc<Settings>,
    events: &EventSink,
    route: Route,
) -> Result<Box<dyn Page>> {
    Ok(match route {
        Route::Examples => {
            let services = GalleryServices::compose(settings.clone(), events.clone()).await?;
            Box::new(ExamplesPage::new(services))
        }
        route => {
            let services = EditorServices::compose(settings.clone(), events.clone()).await?;
            Box::new(EditorPage::new(services, route))
        }
    })
}
