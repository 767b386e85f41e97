use anyhow::Error;
use log::trace;
use serde_json::Value;
use std::collections::HashMap;

/// Explicit read/write facade over a component's state record.
///
/// Interception is the `write` method itself, not an ambient proxy, and
/// exclusivity comes from the `&mut` receiver: a second write cannot begin
/// while a digest is still pending.
#[derive(Debug, Clone, Default)]
pub struct ReactiveState {
    record: HashMap<String, Value>,
}

impl ReactiveState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads pass through unchanged.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.record.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.record.contains_key(name)
    }

    /// The hashing and commit steps of a property write.
    ///
    /// If the incoming value carries a list (either the value is itself a
    /// list of records, or it is a record with a list-valued field), every
    /// list item is digested and tagged before the commit; a digest failure
    /// aborts the write with the record untouched. The write itself rejects
    /// nothing; validation is the caller's concern.
    pub async fn write(&mut self, name: &str, mut value: Value) -> Result<(), Error> {
        if let Some(items) = list_items_mut(&mut value) {
            identity::tag_records(items).await?;
            trace!("tagged {} list items under {name}", items.len());
        }
        self.record.insert(name.to_string(), value);
        Ok(())
    }
}

/// The list carried by an incoming value, if any: the value itself, or its
/// first list-valued field.
fn list_items_mut(value: &mut Value) -> Option<&mut Vec<Value>> {
    if value.is_array() {
        return value.as_array_mut();
    }
    let field = find_list_field(value)?;
    value.get_mut(&field)?.as_array_mut()
}

/// First list-valued field of a record, if any.
fn find_list_field(value: &Value) -> Option<String> {
    value
        .as_object()?
        .iter()
        .find(|(_, field)| field.is_array())
        .map(|(name, _)| name.clone())
}
