//! Built-in example diagrams shown on the examples page

use crate::domain::{DatabaseType, DbField, DbRelationship, DbTable, Diagram};

/// An example card of the gallery
#[derive(Debug, Clone)]
pub struct Example {
    pub name: &'static str,
    pub description: &'static str,
    pub diagram: Diagram,
}

/// Every bundled example, in display order
pub fn examples() -> Vec<Example> {
    vec![
        Example {
            name: "Employees",
            description: "Departments, employees and their salary history",
            diagram: employees(),
        },
        Example {
            name: "Online Store",
            description: "Catalog and sales split into two PostgreSQL schemas",
            diagram: online_store(),
        },
        Example {
            name: "Notes",
            description: "A small SQLite schema for a note taking app",
            diagram: notes(),
        },
        Example {
            name: "Help Desk",
            description: "Tickets and agents across SQL Server schemas",
            diagram: help_desk(),
        },
    ]
}

fn id(name: &str) -> DbField {
    DbField::new(name, "int").primary_key()
}

fn table(name: &str, schema: Option<&str>, fields: Vec<DbField>, x: i32, y: i32) -> DbTable {
    let mut table = DbTable::new(name, schema.map(str::to_string));
    table.fields = fields;
    table.x = x;
    table.y = y;
    table
}

/// Link `source` to `target` by name; both tables must already exist
fn link(diagram: &mut Diagram, name: &str, source: &str, target: &str) {
    let find = |table: &str| {
        diagram
            .tables
            .iter()
            .find(|t| t.name == table)
            .map(|t| t.id.clone())
    };
    if let (Some(source_id), Some(target_id)) = (find(source), find(target)) {
        diagram
            .relationships
            .push(DbRelationship::new(name, &source_id, &target_id));
    }
}

fn employees() -> Diagram {
    let mut diagram = Diagram::new("Employees", DatabaseType::Mysql);
    diagram.tables = vec![
        table(
            "departments",
            None,
            vec![id("id"), DbField::new("name", "varchar(40)")],
            0,
            0,
        ),
        table(
            "employees",
            None,
            vec![
                id("id"),
                DbField::new("first_name", "varchar(14)"),
                DbField::new("last_name", "varchar(16)"),
                DbField::new("hire_date", "date"),
                DbField::new("department_id", "int"),
            ],
            32,
            0,
        ),
        table(
            "salaries",
            None,
            vec![
                id("id"),
                DbField::new("employee_id", "int"),
                DbField::new("amount", "int"),
                DbField::new("from_date", "date"),
            ],
            64,
            0,
        ),
    ];
    link(&mut diagram, "employees_department_fk", "employees", "departments");
    link(&mut diagram, "salaries_employee_fk", "salaries", "employees");
    diagram
}

fn online_store() -> Diagram {
    let mut diagram = Diagram::new("Online Store", DatabaseType::Postgresql);
    diagram.tables = vec![
        table(
            "products",
            Some("public"),
            vec![
                id("id"),
                DbField::new("title", "text"),
                DbField::new("price", "numeric(10,2)"),
                DbField::new("category_id", "integer"),
            ],
            0,
            0,
        ),
        table(
            "categories",
            Some("public"),
            vec![id("id"), DbField::new("name", "text")],
            32,
            0,
        ),
        table(
            "orders",
            Some("sales"),
            vec![
                id("id"),
                DbField::new("customer_id", "integer"),
                DbField::new("created_at", "timestamptz"),
            ],
            0,
            10,
        ),
        table(
            "order_items",
            Some("sales"),
            vec![
                id("id"),
                DbField::new("order_id", "integer"),
                DbField::new("product_id", "integer"),
                DbField::new("quantity", "integer"),
            ],
            32,
            10,
        ),
        table(
            "customers",
            Some("sales"),
            vec![id("id"), DbField::new("email", "text")],
            64,
            10,
        ),
    ];
    link(&mut diagram, "products_category_fk", "products", "categories");
    link(&mut diagram, "orders_customer_fk", "orders", "customers");
    link(&mut diagram, "order_items_order_fk", "order_items", "orders");
    link(&mut diagram, "order_items_product_fk", "order_items", "products");
    diagram
}

fn notes() -> Diagram {
    let mut diagram = Diagram::new("Notes", DatabaseType::Sqlite);
    diagram.tables = vec![
        table(
            "notebooks",
            None,
            vec![id("id"), DbField::new("title", "text")],
            0,
            0,
        ),
        table(
            "notes",
            None,
            vec![
                id("id"),
                DbField::new("notebook_id", "integer"),
                DbField::new("body", "text"),
                DbField::new("updated_at", "text"),
            ],
            32,
            0,
        ),
        table(
            "tags",
            None,
            vec![id("id"), DbField::new("label", "text")],
            64,
            0,
        ),
    ];
    link(&mut diagram, "notes_notebook_fk", "notes", "notebooks");
    diagram
}

fn help_desk() -> Diagram {
    let mut diagram = Diagram::new("Help Desk", DatabaseType::SqlServer);
    diagram.tables = vec![
        table(
            "agents",
            Some("dbo"),
            vec![id("id"), DbField::new("name", "nvarchar(100)")],
            0,
            0,
        ),
        table(
            "tickets",
            Some("support"),
            vec![
                id("id"),
                DbField::new("subject", "nvarchar(200)"),
                DbField::new("agent_id", "int"),
                DbField::new("opened_at", "datetime2"),
            ],
            32,
            0,
        ),
        table(
            "comments",
            Some("support"),
            vec![
                id("id"),
                DbField::new("ticket_id", "int"),
                DbField::new("body", "nvarchar(max)"),
            ],
            64,
            0,
        ),
    ];
    link(&mut diagram, "tickets_agent_fk", "tickets", "agents");
    link(&mut diagram, "comments_ticket_fk", "comments", "tickets");
    diagram
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relationships_point_at_tables() {
        for example in examples() {
            let diagram = &example.diagram;
            assert!(!diagram.relationships.is_empty(), "{}", example.name);
            for relationship in &diagram.relationships {
                assert!(diagram.table(&relationship.source_table_id).is_some());
                assert!(diagram.table(&relationship.target_table_id).is_some());
            }
        }
    }

    #[test]
    fn test_multi_schema_examples() {
        let examples = examples();
        let store = examples.iter().find(|e| e.name == "Online Store").unwrap();
        let names: Vec<String> = store.diagram.schemas().into_iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["public", "sales"]);
    }
}
