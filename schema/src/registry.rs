//! Field-name registry for diagnostics.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::MessageSchema;

/// Thread-safe map from message name to schema, used to turn field numbers
/// back into names when inspecting encoded bytes.
///
/// Registration is insert-or-ignore: the first schema registered under a
/// name wins. Share the registry through `Arc` when several threads need it.
#[derive(Debug, Default)]
pub struct FieldRegistry {
    messages: RwLock<HashMap<String, Arc<MessageSchema>>>,
}

impl FieldRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a schema and every schema nested inside it.
    ///
    /// Returns `true` if the top-level schema was newly inserted. A schema
    /// whose name is already taken by a different layout is ignored and
    /// logged.
    pub fn register(&self, schema: &Arc<MessageSchema>) -> bool {
        let inserted = self.insert(schema);
        for field in schema.fields() {
            if let Some(nested) = field.kind.nested_schema() {
                self.register(nested);
            }
        }
        inserted
    }

    fn insert(&self, schema: &Arc<MessageSchema>) -> bool {
        if self.messages.read().contains_key(schema.name()) {
            self.check_conflict(schema);
            return false;
        }

        match self.messages.write().entry(schema.name().to_string()) {
            Entry::Occupied(existing) => {
                warn_on_conflict(existing.get(), schema);
                false
            }
            Entry::Vacant(slot) => {
                log::trace!(
                    "registered message {} ({} fields)",
                    schema.name(),
                    schema.len()
                );
                slot.insert(Arc::clone(schema));
                true
            }
        }
    }

    fn check_conflict(&self, schema: &MessageSchema) {
        if let Some(existing) = self.messages.read().get(schema.name()) {
            warn_on_conflict(existing, schema);
        }
    }

    /// Returns the registered schema for a message name.
    #[must_use]
    pub fn schema(&self, message: &str) -> Option<Arc<MessageSchema>> {
        self.messages.read().get(message).cloned()
    }

    /// Returns the name of field `number` in `message`, if both are known.
    #[must_use]
    pub fn field_name(&self, message: &str, number: u32) -> Option<String> {
        let messages = self.messages.read();
        let schema = messages.get(message)?;
        schema.field_by_number(number).map(|f| f.name.clone())
    }

    #[must_use]
    pub fn contains(&self, message: &str) -> bool {
        self.messages.read().contains_key(message)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.read().is_empty()
    }
}

fn warn_on_conflict(existing: &MessageSchema, incoming: &MessageSchema) {
    if existing.hash() != incoming.hash() {
        log::warn!(
            "ignoring conflicting registration of message {}: hash {:#018x} already registered, got {:#018x}",
            incoming.name(),
            existing.hash(),
            incoming.hash()
        );
    }
}
