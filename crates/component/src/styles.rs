use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::sync::Mutex;

/// A constructed stylesheet: an ordered list of rule strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stylesheet {
    rules: Vec<String>,
}

impl Stylesheet {
    pub fn new(rules: Vec<String>) -> Self {
        Self { rules }
    }

    /// A sheet holding one undivided block of CSS text.
    pub fn from_css(css: impl Into<String>) -> Self {
        Self {
            rules: vec![css.into()],
        }
    }

    pub fn rules(&self) -> &[String] {
        &self.rules
    }

    /// Join the rules into a single CSS string, the normalization a host
    /// needs to construct an adoptable sheet.
    pub fn text(&self) -> String {
        self.rules.join("")
    }
}

/// Process-wide list of stylesheets adopted by every component instance.
/// Append-only: registrations extend the list, nothing retracts from it.
static SHARED: Lazy<Mutex<Vec<Stylesheet>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Append sheets to the shared list.
pub fn register_shared_stylesheets(sheets: Vec<Stylesheet>) {
    if let Ok(mut shared) = SHARED.lock() {
        shared.extend(sheets);
    }
}

/// Snapshot of the shared list as of this call.
pub fn shared_stylesheets() -> Vec<Stylesheet> {
    SHARED.lock().map(|shared| shared.clone()).unwrap_or_default()
}
