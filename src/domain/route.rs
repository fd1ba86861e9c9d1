use std::fmt;

/// Logical navigation targets of the application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// "/" - editor without a diagram
    Home,
    /// "/diagrams/{id}"
    Diagram(String),
    /// "/examples"
    Examples,
}

impl Route {
    /// Parse a path, falling back to `Home` for anything unknown
    pub fn parse(path: &str) -> Self {
        let trimmed = path.trim().trim_end_matches('/');
        if trimmed == "/examples" {
            return Route::Examples;
        }
        match trimmed.strip_prefix("/diagrams/") {
            Some(id) if !id.is_empty() && !id.contains('/') => Route::Diagram(id.to_string()),
            _ => Route::Home,
        }
    }

    /// Diagram id carried by the route
    pub fn diagram_id(&self) -> Option<&str> {
        match self {
            Route::Diagram(id) => Some(id),
            _ => None,
        }
    }
}

impl Default for Route {
    fn default() -> Self {
        Route::Home
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Home => write!(f, "/"),
            Route::Diagram(id) => write!(f, "/diagrams/{}", id),
            Route::Examples => write!(f, "/examples"),
        }
    }
}
