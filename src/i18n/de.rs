pub const TRANSLATIONS: &[(&str, &str)] = &[
    ("common.cancel", "Abbrechen"),
    ("common.close", "Schließen"),
    ("common.create", "Erstellen"),
    ("common.import", "Importieren"),
    ("common.export", "Exportieren"),
    ("menu.file.file", "Datei"),
    ("menu.file.new", "Neu"),
    ("menu.file.open", "Öffnen"),
    ("menu.file.save", "Speichern"),
    ("menu.file.import_database", "Datenbank importieren"),
    ("menu.file.export_sql", "SQL exportieren"),
    ("menu.file.export_as", "Exportieren als"),
    ("menu.file.delete_diagram", "Diagramm löschen"),
    ("menu.file.exit", "Beenden"),
    ("menu.edit.edit", "Bearbeiten"),
    ("menu.edit.undo", "Rückgängig"),
    ("menu.edit.redo", "Wiederholen"),
    ("menu.edit.clear", "Leeren"),
    ("menu.view.view", "Ansicht"),
    ("menu.view.show_sidebar", "Seitenleiste anzeigen"),
    ("menu.view.hide_sidebar", "Seitenleiste ausblenden"),
    ("menu.view.show_cardinality", "Kardinalität anzeigen"),
    ("menu.view.hide_cardinality", "Kardinalität ausblenden"),
    ("menu.view.show_dependencies", "Abhängigkeiten anzeigen"),
    ("menu.view.hide_dependencies", "Abhängigkeiten ausblenden"),
    ("menu.view.zoom_on_scroll", "Zoom beim Scrollen"),
    ("menu.view.theme", "Design"),
    ("menu.view.change_language", "Sprache"),
    ("menu.help.help", "Hilfe"),
    ("menu.help.visit_website", "SchemaX besuchen"),
    ("menu.help.examples", "Beispiele"),
    ("zoom.on", "Ein"),
    ("zoom.off", "Aus"),
    ("theme.system", "System"),
    ("theme.light", "Hell"),
    ("theme.dark", "Dunkel"),
    ("last_saved", "Zuletzt gespeichert vor {{time}}"),
    ("last_saved_now", "Gerade gespeichert"),
    ("visit_website_toast", "Besuche {{url}}"),
    ("delete_diagram_alert.title", "Diagramm löschen"),
    (
        "delete_diagram_alert.description",
        "Diese Aktion kann nicht rückgängig gemacht werden. Das Diagramm wird dauerhaft gelöscht.",
    ),
    ("delete_diagram_alert.delete", "Löschen"),
    ("delete_diagram_alert.cancel", "Abbrechen"),
    ("clear_diagram_alert.title", "Diagramm leeren"),
    (
        "clear_diagram_alert.description",
        "Diese Aktion kann nicht rückgängig gemacht werden. Alle Daten im Diagramm werden dauerhaft gelöscht.",
    ),
    ("clear_diagram_alert.clear", "Leeren"),
    ("clear_diagram_alert.cancel", "Abbrechen"),
    ("multiple_schemas_alert.title", "Mehrere Schemas"),
    (
        "multiple_schemas_alert.description",
        "Dieses Diagramm enthält {{schemasCount}} Schemas. Aktuell angezeigt: {{formattedSchemas}}.",
    ),
    ("multiple_schemas_alert.none", "keine"),
    ("multiple_schemas_alert.dont_show_again", "Nicht mehr anzeigen"),
    ("multiple_schemas_alert.change_schema", "Schema ändern"),
    ("create_diagram_dialog.title", "Diagramm erstellen"),
    ("create_diagram_dialog.database", "Datenbank"),
    ("create_diagram_dialog.name", "Name"),
    ("create_diagram_dialog.default_name", "Diagramm"),
    ("open_diagram_dialog.title", "Diagramm öffnen"),
    ("open_diagram_dialog.filter", "Filter"),
    ("open_diagram_dialog.empty", "Noch keine Diagramme"),
    ("open_diagram_dialog.tables", "{{count}} Tabellen"),
    ("export_sql_dialog.title", "SQL exportieren"),
    ("export_sql_dialog.subtitle", "Skript für {{database}}"),
    ("export_sql_dialog.copy", "c in die Zwischenablage kopieren"),
    ("export_sql_dialog.copied", "In die Zwischenablage kopiert"),
    ("create_relationship_dialog.title", "Beziehung erstellen"),
    ("create_relationship_dialog.source", "Quelltabelle"),
    ("create_relationship_dialog.target", "Zieltabelle"),
    (
        "create_relationship_dialog.need_tables",
        "Eine Beziehung benötigt mindestens zwei Tabellen",
    ),
    ("import_database_dialog.title", "{{database}} importieren"),
    (
        "import_database_dialog.instructions",
        "Füge die JSON-Metadaten deiner Datenbank ein und drücke Strg+S",
    ),
    ("import_database_dialog.error", "Ungültige Metadaten: {{error}}"),
    ("import_database_dialog.imported", "{{count}} Tabellen importiert"),
    ("table_schema_dialog.title", "Tabellenschema"),
    ("table_schema_dialog.description", "Wähle das Schema von {{table}}"),
    ("table_schema_dialog.none", "Kein Schema"),
    ("export_image_dialog.title", "Bild exportieren"),
    ("export_image_dialog.scale", "Skalierung"),
    ("export_image_dialog.exported", "Bild exportiert nach {{path}}"),
    ("side_panel.schemas", "Schemas"),
    ("side_panel.tables", "Tabellen"),
    ("side_panel.all_schemas", "Alle Schemas"),
    ("editor.no_diagram", "Kein Diagramm geladen"),
    ("editor.loading", "Wird geladen..."),
    ("editor.command_failed", "Etwas ist schiefgelaufen"),
    ("examples_page.title", "Beispiele"),
    (
        "examples_page.subtitle",
        "Eine Sammlung von Beispielen für den Einstieg in SchemaX.",
    ),
    ("examples_page.hint", "Enter öffnet eine Kopie des Beispiels, q beendet"),
];
