pub const TRANSLATIONS: &[(&str, &str)] = &[
    ("app.name", "SchemaX"),
    ("common.cancel", "Cancel"),
    ("common.close", "Close"),
    ("common.create", "Create"),
    ("common.import", "Import"),
    ("common.export", "Export"),
    // Menu bar
    ("menu.file.file", "File"),
    ("menu.file.new", "New"),
    ("menu.file.open", "Open"),
    ("menu.file.save", "Save"),
    ("menu.file.import_database", "Import Database"),
    ("menu.file.export_sql", "Export SQL"),
    ("menu.file.export_as", "Export as"),
    ("menu.file.delete_diagram", "Delete Diagram"),
    ("menu.file.exit", "Exit"),
    ("menu.edit.edit", "Edit"),
    ("menu.edit.undo", "Undo"),
    ("menu.edit.redo", "Redo"),
    ("menu.edit.clear", "Clear"),
    ("menu.view.view", "View"),
    ("menu.view.show_sidebar", "Show Sidebar"),
    ("menu.view.hide_sidebar", "Hide Sidebar"),
    ("menu.view.show_cardinality", "Show Cardinality"),
    ("menu.view.hide_cardinality", "Hide Cardinality"),
    ("menu.view.show_dependencies", "Show Dependencies"),
    ("menu.view.hide_dependencies", "Hide Dependencies"),
    ("menu.view.zoom_on_scroll", "Zoom on Scroll"),
    ("menu.view.theme", "Theme"),
    ("menu.view.change_language", "Language"),
    ("menu.help.help", "Help"),
    ("menu.help.visit_website", "Visit SchemaX"),
    ("menu.help.examples", "Examples"),
    ("zoom.on", "On"),
    ("zoom.off", "Off"),
    ("theme.system", "System"),
    ("theme.light", "Light"),
    ("theme.dark", "Dark"),
    ("last_saved", "Last saved {{time}} ago"),
    ("last_saved_now", "Saved just now"),
    ("visit_website_toast", "Visit {{url}}"),
    // Alerts
    ("delete_diagram_alert.title", "Delete Diagram"),
    (
        "delete_diagram_alert.description",
        "This action cannot be undone. This will permanently delete the diagram.",
    ),
    ("delete_diagram_alert.delete", "Delete"),
    ("delete_diagram_alert.cancel", "Cancel"),
    ("clear_diagram_alert.title", "Clear Diagram"),
    (
        "clear_diagram_alert.description",
        "This action cannot be undone. This will permanently delete all the data in the diagram.",
    ),
    ("clear_diagram_alert.clear", "Clear"),
    ("clear_diagram_alert.cancel", "Cancel"),
    ("export_sql_limit.title", "Export SQL Limit Reached"),
    (
        "export_sql_limit.description",
        "We set a budget to allow the community to check the feature. You have reached the limit of 5 AI exports every 30min. Feel free to use your own OPENAI_TOKEN, see the manual at {{url}}.",
    ),
    ("multiple_schemas_alert.title", "Multiple Schemas"),
    (
        "multiple_schemas_alert.description",
        "There are {{schemasCount}} schemas in this diagram. Currently displaying: {{formattedSchemas}}.",
    ),
    ("multiple_schemas_alert.none", "none"),
    ("multiple_schemas_alert.dont_show_again", "Don't show again"),
    ("multiple_schemas_alert.change_schema", "Change schema"),
    // Dialogs
    ("create_diagram_dialog.title", "Create Diagram"),
    ("create_diagram_dialog.database", "Database"),
    ("create_diagram_dialog.name", "Name"),
    ("create_diagram_dialog.default_name", "Diagram"),
    ("open_diagram_dialog.title", "Open Diagram"),
    ("open_diagram_dialog.filter", "Filter"),
    ("open_diagram_dialog.empty", "No diagrams yet"),
    ("open_diagram_dialog.tables", "{{count}} tables"),
    ("export_sql_dialog.title", "Export SQL"),
    ("export_sql_dialog.subtitle", "Script for {{database}}"),
    ("export_sql_dialog.copy", "c copy to clipboard"),
    ("export_sql_dialog.copied", "Copied to clipboard"),
    ("create_relationship_dialog.title", "Create Relationship"),
    ("create_relationship_dialog.source", "Source table"),
    ("create_relationship_dialog.target", "Target table"),
    ("create_relationship_dialog.need_tables", "A relationship needs at least two tables"),
    ("import_database_dialog.title", "Import {{database}}"),
    (
        "import_database_dialog.instructions",
        "Paste the JSON metadata of your database, then press Ctrl+S",
    ),
    ("import_database_dialog.error", "Invalid metadata: {{error}}"),
    ("import_database_dialog.imported", "Imported {{count}} tables"),
    ("table_schema_dialog.title", "Table Schema"),
    ("table_schema_dialog.description", "Choose the schema of {{table}}"),
    ("table_schema_dialog.none", "No schema"),
    ("export_image_dialog.title", "Export Image"),
    ("export_image_dialog.scale", "Scale"),
    ("export_image_dialog.exported", "Image exported to {{path}}"),
    // Editor
    ("side_panel.schemas", "Schemas"),
    ("side_panel.tables", "Tables"),
    ("side_panel.all_schemas", "All schemas"),
    ("editor.no_diagram", "No diagram loaded"),
    ("editor.loading", "Loading..."),
    ("editor.command_failed", "Something went wrong"),
    // Examples
    ("examples_page.title", "Examples"),
    (
        "examples_page.subtitle",
        "A collection of examples to help you get started with SchemaX.",
    ),
    ("examples_page.hint", "Enter opens a copy of the example, q quits"),
];
