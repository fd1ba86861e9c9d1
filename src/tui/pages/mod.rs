pub mod editor;
pub mod examples;

use crate::app::AppEvent;
use crate::domain::Route;
use crate::tui::{styles::Theme, Frame};
use anyhow::Result;
use async_trait::async_trait;
use crossterm::event::{KeyEvent, MouseEvent};
use ratatui::layout::Rect;

/// Base trait for all pages
#[async_trait]
pub trait Page: Send {
    /// Terminal title while the page is shown
    fn title(&self) -> String;

    /// Whether this page renders `route`; otherwise the app builds a new page
    fn handles_route(&self, route: &Route) -> bool;

    /// Current theme of the page
    fn theme(&self) -> Theme;

    /// Handle keyboard input
    async fn handle_key_event(&mut self, event: KeyEvent) -> Result<()>;

    /// Handle mouse input
    async fn handle_mouse_event(&mut self, event: MouseEvent) -> Result<()> {
        let _ = event;
        Ok(())
    }

    /// Handle pasted text
    fn handle_paste(&mut self, text: &str) {
        let _ = text;
    }

    /// React to a service event
    async fn handle_app_event(&mut self, event: &AppEvent) -> Result<()> {
        let _ = event;
        Ok(())
    }

    /// Handle periodic updates
    async fn tick(&mut self) -> Result<()> {
        Ok(())
    }

    /// Render the page
    fn render(&mut self, frame: &mut Frame, area: Rect);

    /// Called when the page becomes active
    async fn on_enter(&mut self) -> Result<()> {
        Ok(())
    }

    /// Called when the page is resized
    fn on_resize(&mut self, _area: Rect) {}

    /// Get page-specific help text
    fn help_text(&self) -> Vec<(&str, &str)> {
        vec![]
    }
}
