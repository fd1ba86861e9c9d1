//! Editor page
//!
//! Hosts the navbar, side panel, canvas, dialog layer and toasts on top of
//! a full `EditorServices` stack. Route changes are resolved by
//! `RouteLoader` in a background task; the page only reacts to the events
//! the services emit.

use anyhow::Result;
use async_trait::async_trait;
use crossterm::event::{KeyCode, KeyEvent, MouseEvent};
use parking_lot::{Mutex, RwLock};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::widgets::Block;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, error, warn};

use super::Page;
use crate::app::{AppEvent, Command, CommandDispatcher, EditorServices};
use crate::domain::{Diagram, Route};
use crate::providers::{ConfigUpdate, Toast, ToastAction};
use crate::tui::{
    components::{
        canvas::CanvasView, dialogs::DialogLayer, loader::LoaderOverlay, navbar::TopNavbar,
        side_panel::SidePanel, toasts::ToastStack, Component,
    },
    styles::Theme,
    utils::Breakpoint,
    Frame,
};

/// How long the multiple schemas toast stays up
pub const MULTI_SCHEMA_TOAST_DURATION: Duration = Duration::from_millis(5500);

const SIDE_PANEL_WIDTH: u16 = 32;

#[derive(Debug, Default)]
struct LoadState {
    in_flight: bool,
    /// Latest route requested while a load was running
    pending: Option<Route>,
}

/// Releases the in-flight flag if a load is dropped before it finishes
struct InFlight<'a> {
    state: &'a Mutex<LoadState>,
    armed: bool,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.armed {
            let mut state = self.state.lock();
            state.in_flight = false;
            state.pending = None;
        }
    }
}

/// Resolves a route into the current diagram
#[derive(Clone)]
pub struct RouteLoader {
    services: EditorServices,
    state: Arc<Mutex<LoadState>>,
    initial_diagram: Arc<RwLock<Option<Diagram>>>,
}

impl RouteLoader {
    pub fn new(services: &EditorServices) -> Self {
        Self {
            services: services.clone(),
            state: Arc::new(Mutex::new(LoadState::default())),
            initial_diagram: Arc::new(RwLock::new(None)),
        }
    }

    /// Diagram loaded for the current route, `None` while loading
    pub fn initial_diagram(&self) -> Option<Diagram> {
        self.initial_diagram.read().clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.lock().in_flight
    }

    /// Run `load` in the background
    pub fn trigger(&self, route: Route) {
        let loader = self.clone();
        tokio::spawn(async move {
            if let Err(e) = loader.load(&route).await {
                error!("Failed to load route {}: {}", route, e);
            }
        });
    }

    /// Make the diagram of `route` current
    ///
    /// A request made while another load runs is queued; only the latest
    /// queued route is loaded once the running load finishes.
    pub async fn load(&self, route: &Route) -> Result<()> {
        if !self.begin(route) {
            return Ok(());
        }
        self.run_from(route.clone()).await
    }

    /// Take the in-flight flag, or queue `route` behind the running load
    fn begin(&self, route: &Route) -> bool {
        let mut state = self.state.lock();
        if state.in_flight {
            debug!("Route load in flight, queueing {}", route);
            state.pending = Some(route.clone());
            return false;
        }
        state.in_flight = true;
        true
    }

    /// Load `route`, then every route queued meanwhile; expects `begin`
    async fn run_from(&self, route: Route) -> Result<()> {
        let mut guard = InFlight {
            state: &self.state,
            armed: true,
        };
        let mut route = route;
        loop {
            let result = self.load_route(&route).await;
            let next = {
                let mut state = self.state.lock();
                let next = state.pending.take();
                if next.is_none() {
                    state.in_flight = false;
                }
                next
            };
            match next {
                Some(next) => {
                    if let Err(e) = result {
                        warn!("Load of {} failed before {}: {:#}", route, next, e);
                    }
                    route = next;
                }
                None => {
                    guard.armed = false;
                    return result;
                }
            }
        }
    }

    /// Does nothing until the config is loaded or when the route diagram
    /// is already current
    async fn load_route(&self, route: &Route) -> Result<()> {
        let s = &self.services;
        let Some(config) = s.config.config() else {
            return Ok(());
        };
        if route.diagram_id() == Some(s.schema.current_diagram_id().as_str()) {
            return Ok(());
        }

        match route.diagram_id() {
            Some(id) => {
                *self.initial_diagram.write() = None;
                s.loader.show_loader();
                s.redo_undo.reset_redo_stack();
                s.redo_undo.reset_undo_stack();

                let loaded = s.schema.load_diagram(id).await;
                s.loader.hide_loader();
                let diagram = loaded?;
                if diagram.is_none() {
                    warn!("Diagram {} not found, going home", id);
                    s.events.navigate(Route::Home);
                }
                *self.initial_diagram.write() = diagram;
            }
            None => match config.default_diagram_id {
                Some(default_id) => {
                    if s.storage.get_diagram(&default_id).await?.is_some() {
                        s.events.navigate(Route::Diagram(default_id));
                    } else {
                        warn!("Default diagram {} is gone, clearing it", default_id);
                        s.config
                            .update_config(ConfigUpdate::new().clear_default_diagram_id())
                            .await?;
                        s.events.navigate(Route::Home);
                    }
                }
                None => s.dialogs.open_create_diagram(),
            },
        }
        Ok(())
    }
}

/// Shows the multiple schemas toast once per diagram
#[derive(Debug, Default)]
pub struct MultiSchemaNotifier {
    last_diagram_id: String,
}

impl MultiSchemaNotifier {
    /// Toast when the current diagram changed since the last call and has
    /// several schemas; returns the toast id
    pub fn check(&mut self, services: &EditorServices, desktop: bool) -> Option<u64> {
        let diagram_id = services.schema.current_diagram_id();
        if diagram_id == self.last_diagram_id {
            return None;
        }
        self.last_diagram_id = diagram_id;

        let schemas = services.schema.schemas();
        if schemas.len() <= 1 || services.local_config.hide_multi_schema_notification() {
            return None;
        }

        let t = &services.translator;
        let formatted = match services.schema.filtered_schemas() {
            Some(filtered) => filtered
                .iter()
                .map(|name| format!("'{}'", name))
                .collect::<Vec<_>>()
                .join(", "),
            None => t.t("multiple_schemas_alert.none"),
        };
        let toast = Toast::new(t.t("multiple_schemas_alert.title"))
            .description(t.t_with(
                "multiple_schemas_alert.description",
                &[
                    ("schemasCount", schemas.len().to_string()),
                    ("formattedSchemas", formatted),
                ],
            ))
            .duration(MULTI_SCHEMA_TOAST_DURATION)
            .action(ToastAction::new(
                t.t("multiple_schemas_alert.dont_show_again"),
                Command::HideMultiSchemaNotification,
            ))
            .action(ToastAction::new(
                t.t("multiple_schemas_alert.change_schema"),
                Command::ChangeSchema { desktop },
            ));
        Some(services.toaster.toast(toast))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Canvas,
    SidePanel,
}

pub struct EditorPage {
    services: EditorServices,
    dispatcher: CommandDispatcher,
    route: Route,
    route_loader: RouteLoader,
    notifier: MultiSchemaNotifier,
    navbar: TopNavbar,
    side_panel: SidePanel,
    canvas: CanvasView,
    dialogs: DialogLayer,
    toasts: ToastStack,
    spinner: LoaderOverlay,
    focus: Focus,
    width: u16,
}

impl EditorPage {
    pub fn new(services: EditorServices, route: Route) -> Self {
        Self {
            dispatcher: CommandDispatcher::new(&services),
            route_loader: RouteLoader::new(&services),
            notifier: MultiSchemaNotifier::default(),
            navbar: TopNavbar::new(&services),
            side_panel: SidePanel::new(&services),
            canvas: CanvasView::new(&services),
            dialogs: DialogLayer::new(&services),
            toasts: ToastStack::new(&services.toaster),
            spinner: LoaderOverlay::new(),
            focus: Focus::Canvas,
            width: 0,
            route,
            services,
        }
    }

    fn is_desktop(&self) -> bool {
        Breakpoint::is_md(self.width)
    }

    fn set_focus(&mut self, focus: Focus) {
        self.focus = focus;
        self.canvas.set_focus(focus == Focus::Canvas);
    }

    /// Dispatch a command; failures become error toasts
    async fn run(&mut self, command: Command) {
        if let Err(e) = self.dispatcher.dispatch(command).await {
            error!("Command failed: {:#}", e);
            self.services.toaster.toast(
                Toast::error(self.services.translator.t("editor.command_failed"))
                    .description(e.to_string()),
            );
        }
    }

    async fn run_opt(&mut self, command: Option<Command>) {
        if let Some(command) = command {
            self.run(command).await;
        }
    }
}

#[async_trait]
impl Page for EditorPage {
    fn title(&self) -> String {
        let diagram = self.services.schema.current_diagram();
        if diagram.id.is_empty() {
            "SchemaX".to_string()
        } else {
            format!("SchemaX - {}", diagram.name)
        }
    }

    fn handles_route(&self, route: &Route) -> bool {
        matches!(route, Route::Home | Route::Diagram(_))
    }

    fn theme(&self) -> Theme {
        Theme::for_effective(self.services.theme.effective_theme())
    }

    async fn on_enter(&mut self) -> Result<()> {
        self.route_loader.trigger(self.route.clone());
        Ok(())
    }

    async fn handle_key_event(&mut self, event: KeyEvent) -> Result<()> {
        if self.navbar.is_active() {
            let command = self.navbar.handle_key_event(event);
            self.run_opt(command).await;
            return Ok(());
        }
        if self.dialogs.is_active() {
            let command = self.dialogs.handle_key_event(event);
            self.run_opt(command).await;
            return Ok(());
        }
        if let Some(command) = self.toasts.handle_key_event(event) {
            self.run_opt(command).await;
            return Ok(());
        }

        let keys = self.services.shortcuts.key_map();
        if keys.should_open_menu(&event) {
            self.navbar.open_menu();
            return Ok(());
        }
        if let Some(command) = self.services.shortcuts.resolve(&event) {
            self.run(command).await;
            return Ok(());
        }

        match event.code {
            KeyCode::F(2) => self.navbar.start_rename(),
            KeyCode::F(6) if self.services.layout.is_side_panel_shown() => {
                let next = match self.focus {
                    Focus::Canvas => Focus::SidePanel,
                    Focus::SidePanel => Focus::Canvas,
                };
                self.set_focus(next);
            }
            _ => {
                let command = match self.focus {
                    Focus::Canvas => self.canvas.handle_key_event(event),
                    Focus::SidePanel => self.side_panel.handle_key_event(event),
                };
                self.run_opt(command).await;
            }
        }
        Ok(())
    }

    async fn handle_mouse_event(&mut self, event: MouseEvent) -> Result<()> {
        if !self.dialogs.is_active() {
            self.canvas.handle_mouse_event(event);
        }
        Ok(())
    }

    fn handle_paste(&mut self, text: &str) {
        if self.navbar.is_active() {
            self.navbar.handle_paste(text);
        } else {
            self.dialogs.handle_paste(text);
        }
    }

    async fn handle_app_event(&mut self, event: &AppEvent) -> Result<()> {
        match event {
            AppEvent::Navigate { route } if self.handles_route(route) => {
                self.route = route.clone();
                self.route_loader.trigger(self.route.clone());
            }
            AppEvent::ConfigUpdated | AppEvent::DiagramDeleted { .. } => {
                self.route_loader.trigger(self.route.clone());
            }
            AppEvent::DialogChanged { kind, open } => {
                self.dialogs.on_dialog_changed(*kind, *open).await?;
            }
            AppEvent::LayoutChanged => {
                if self.services.layout.is_select_schema_open() {
                    self.set_focus(Focus::SidePanel);
                    self.side_panel.focus_schemas();
                } else if !self.services.layout.is_side_panel_shown() {
                    self.set_focus(Focus::Canvas);
                }
            }
            _ => {}
        }
        let desktop = self.is_desktop();
        self.notifier.check(&self.services, desktop);
        Ok(())
    }

    async fn tick(&mut self) -> Result<()> {
        self.services.toaster.prune_expired(Instant::now());
        if self.services.loader.is_visible() {
            self.spinner.tick();
        }
        Ok(())
    }

    fn on_resize(&mut self, area: Rect) {
        self.width = area.width;
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.width = area.width;
        let theme = self.theme();
        frame.render_widget(Block::default().style(theme.base_style()), area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(1)])
            .split(area);
        self.navbar.render(frame, rows[0], &theme);

        let show_side_panel = self.services.layout.is_side_panel_shown();
        if show_side_panel && self.is_desktop() {
            let columns = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Length(SIDE_PANEL_WIDTH), Constraint::Min(1)])
                .split(rows[1]);
            self.side_panel.render(frame, columns[0], &theme);
            self.canvas.render(frame, columns[1], &theme);
        } else if show_side_panel {
            // Narrow screens show one of the two
            self.side_panel.render(frame, rows[1], &theme);
        } else {
            self.canvas.render(frame, rows[1], &theme);
        }

        self.dialogs.render(frame, area, &theme);
        self.navbar.render_dropdown(frame, area, &theme);
        self.toasts.render(frame, rows[1], &theme);

        if self.services.loader.is_visible() {
            let label = self.services.translator.t("editor.loading");
            self.spinner.render(frame, area, &label, &theme);
        }
    }

    fn help_text(&self) -> Vec<(&str, &str)> {
        vec![
            ("F2", "Rename diagram"),
            ("F6", "Switch canvas / side panel"),
            ("Arrows", "Pan canvas"),
            ("+ / -", "Zoom"),
            ("r", "Create relationship"),
            ("F1, F2", "Toast actions"),
            ("Esc", "Close dialog"),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::EventSink;
    use crate::config::Settings;
    use crate::domain::{DatabaseType, DbTable};
    use crate::providers::DialogKind;
    use tokio::sync::mpsc::UnboundedReceiver;

    async fn services(dir: &tempfile::TempDir) -> (EditorServices, UnboundedReceiver<AppEvent>) {
        let settings = Settings {
            data_dir: dir.path().to_path_buf(),
            ..Settings::default()
        };
        let (sink, rx) = EventSink::channel();
        let services = EditorServices::compose(Arc::new(settings), sink).await.unwrap();
        (services, rx)
    }

    fn navigations(rx: &mut UnboundedReceiver<AppEvent>) -> Vec<Route> {
        let mut routes = Vec::new();
        while let Ok(event) = rx.try_recv() {
            if let AppEvent::Navigate { route } = event {
                routes.push(route);
            }
        }
        routes
    }

    async fn store(services: &EditorServices, diagram: &Diagram) {
        services.storage.add_diagram(diagram).await.unwrap();
    }

    #[tokio::test]
    async fn test_home_without_default_opens_create_dialog() {
        let dir = tempfile::tempdir().unwrap();
        let (services, mut rx) = services(&dir).await;
        let loader = RouteLoader::new(&services);

        loader.load(&Route::Home).await.unwrap();

        assert!(services.dialogs.is_open(DialogKind::CreateDiagram));
        assert!(navigations(&mut rx).is_empty());
    }

    #[tokio::test]
    async fn test_missing_route_diagram_goes_home() {
        let dir = tempfile::tempdir().unwrap();
        let (services, mut rx) = services(&dir).await;
        let loader = RouteLoader::new(&services);

        loader.load(&Route::Diagram("abc".into())).await.unwrap();

        assert_eq!(navigations(&mut rx), vec![Route::Home]);
        assert!(!services.dialogs.is_open(DialogKind::CreateDiagram));
        assert!(!services.loader.is_visible());
        assert!(loader.initial_diagram().is_none());
    }

    #[tokio::test]
    async fn test_missing_default_is_cleared() {
        let dir = tempfile::tempdir().unwrap();
        let (services, mut rx) = services(&dir).await;
        services
            .config
            .update_config(ConfigUpdate::new().default_diagram_id("xyz"))
            .await
            .unwrap();
        let loader = RouteLoader::new(&services);

        loader.load(&Route::Home).await.unwrap();

        assert_eq!(services.config.config().unwrap().default_diagram_id, None);
        assert_eq!(navigations(&mut rx), vec![Route::Home]);
    }

    #[tokio::test]
    async fn test_existing_default_is_opened() {
        let dir = tempfile::tempdir().unwrap();
        let (services, mut rx) = services(&dir).await;
        let diagram = Diagram::new("shop", DatabaseType::Mysql);
        store(&services, &diagram).await;
        services
            .config
            .update_config(ConfigUpdate::new().default_diagram_id(diagram.id.clone()))
            .await
            .unwrap();
        let loader = RouteLoader::new(&services);

        loader.load(&Route::Home).await.unwrap();
        assert_eq!(navigations(&mut rx), vec![Route::Diagram(diagram.id.clone())]);

        loader.load(&Route::Diagram(diagram.id.clone())).await.unwrap();
        assert_eq!(services.schema.current_diagram_id(), diagram.id);
        assert_eq!(loader.initial_diagram().unwrap().id, diagram.id);
        assert!(!loader.is_loading());
    }

    #[tokio::test]
    async fn test_concurrent_loads_run_once() {
        let dir = tempfile::tempdir().unwrap();
        let (services, mut rx) = services(&dir).await;
        let diagram = Diagram::new("shop", DatabaseType::Sqlite);
        store(&services, &diagram).await;
        let loader = RouteLoader::new(&services);
        let route = Route::Diagram(diagram.id.clone());

        let (a, b) = tokio::join!(loader.load(&route), loader.load(&route));
        a.unwrap();
        b.unwrap();

        let mut loaded = 0;
        while let Ok(event) = rx.try_recv() {
            if matches!(event, AppEvent::DiagramLoaded { .. }) {
                loaded += 1;
            }
        }
        assert_eq!(loaded, 1);
    }

    #[tokio::test]
    async fn test_route_requested_during_load_runs_after_it() {
        let dir = tempfile::tempdir().unwrap();
        let (services, _rx) = services(&dir).await;
        let first = Diagram::new("first", DatabaseType::Mysql);
        let second = Diagram::new("second", DatabaseType::Mysql);
        store(&services, &first).await;
        store(&services, &second).await;
        let loader = RouteLoader::new(&services);

        // A load of `first` is running when `second` is requested
        assert!(loader.begin(&Route::Diagram(first.id.clone())));
        loader.load(&Route::Diagram(second.id.clone())).await.unwrap();
        assert_eq!(services.schema.current_diagram_id(), "");
        assert!(loader.is_loading());

        loader.run_from(Route::Diagram(first.id.clone())).await.unwrap();

        assert_eq!(services.schema.current_diagram_id(), second.id);
        assert_eq!(loader.initial_diagram().unwrap().id, second.id);
        assert!(!loader.is_loading());
    }

    #[tokio::test]
    async fn test_only_latest_queued_route_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let (services, mut rx) = services(&dir).await;
        let first = Diagram::new("first", DatabaseType::Sqlite);
        let second = Diagram::new("second", DatabaseType::Sqlite);
        let third = Diagram::new("third", DatabaseType::Sqlite);
        for diagram in [&first, &second, &third] {
            store(&services, diagram).await;
        }
        let loader = RouteLoader::new(&services);

        assert!(loader.begin(&Route::Diagram(first.id.clone())));
        loader.load(&Route::Diagram(second.id.clone())).await.unwrap();
        loader.load(&Route::Diagram(third.id.clone())).await.unwrap();
        loader.run_from(Route::Diagram(first.id.clone())).await.unwrap();

        let mut loaded = Vec::new();
        while let Ok(event) = rx.try_recv() {
            if let AppEvent::DiagramLoaded { diagram_id } = event {
                loaded.push(diagram_id);
            }
        }
        assert_eq!(loaded, vec![first.id, third.id]);
    }

    #[test]
    fn test_editor_page_is_send() {
        fn assert_send<T: Send>() {}
        assert_send::<EditorPage>();
    }

    #[tokio::test]
    async fn test_multi_schema_toast_once_per_diagram() {
        let dir = tempfile::tempdir().unwrap();
        let (services, _rx) = services(&dir).await;
        let mut diagram = Diagram::new("warehouse", DatabaseType::Postgresql);
        for schema in ["public", "sales", "hr"] {
            diagram.tables.push(DbTable::new(format!("{}_t", schema), Some(schema.into())));
        }
        store(&services, &diagram).await;
        services.schema.load_diagram(&diagram.id).await.unwrap();

        let mut notifier = MultiSchemaNotifier::default();
        assert!(notifier.check(&services, true).is_some());
        assert!(notifier.check(&services, true).is_none());

        let toasts = services.toaster.toasts();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].duration, MULTI_SCHEMA_TOAST_DURATION);
        assert_eq!(
            toasts[0].description.as_deref(),
            Some("There are 3 schemas in this diagram. Currently displaying: 'public'.")
        );
        assert_eq!(toasts[0].actions[1].command, Command::ChangeSchema { desktop: true });
    }

    #[tokio::test]
    async fn test_multi_schema_toast_respects_preference() {
        let dir = tempfile::tempdir().unwrap();
        let (services, _rx) = services(&dir).await;
        let mut diagram = Diagram::new("warehouse", DatabaseType::Mysql);
        diagram.tables.push(DbTable::new("a", Some("one".into())));
        diagram.tables.push(DbTable::new("b", Some("two".into())));
        store(&services, &diagram).await;
        services.schema.load_diagram(&diagram.id).await.unwrap();
        services.local_config.set_hide_multi_schema_notification(true);

        let mut notifier = MultiSchemaNotifier::default();
        assert!(notifier.check(&services, false).is_none());
        assert!(services.toaster.toasts().is_empty());
    }

    #[tokio::test]
    async fn test_no_filter_reads_none() {
        let dir = tempfile::tempdir().unwrap();
        let (services, _rx) = services(&dir).await;
        let mut diagram = Diagram::new("warehouse", DatabaseType::Mysql);
        diagram.tables.push(DbTable::new("a", Some("one".into())));
        diagram.tables.push(DbTable::new("b", Some("two".into())));
        store(&services, &diagram).await;
        services.schema.load_diagram(&diagram.id).await.unwrap();

        let mut notifier = MultiSchemaNotifier::default();
        notifier.check(&services, false);
        let toast = services.toaster.latest().unwrap();
        assert!(toast.description.unwrap().ends_with("Currently displaying: none."));
    }
}
