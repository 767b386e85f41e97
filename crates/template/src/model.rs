use serde_json::Value;

#[derive(Debug, Clone)]
enum Segment {
    Literal(String),
    Value(Value),
}

/// Literal markup segments interleaved with value slots.
///
/// Templates are trusted markup: values are stringified without escaping,
/// which is a deliberate trust boundary rather than a gap. `Null` renders as
/// the empty string; strings render unquoted; numbers and booleans render
/// through their JSON form.
#[derive(Debug, Clone, Default)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a literal markup segment.
    pub fn literal(mut self, text: impl Into<String>) -> Self {
        self.segments.push(Segment::Literal(text.into()));
        self
    }

    /// Append a value slot.
    pub fn value(mut self, value: impl Into<Value>) -> Self {
        self.segments.push(Segment::Value(value.into()));
        self
    }

    /// Render the template to a markup string by plain concatenation.
    pub fn markup(&self) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Value(value) => out.push_str(&stringify(value)),
            }
        }
        out
    }
}

fn stringify(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
