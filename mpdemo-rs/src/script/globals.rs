//! Module-level global namespace.
//!
//! Names keep their first-definition order, so listings come out in the
//! order the script created them.  Rebinding a name replaces its value in
//! place.

use super::value::Value;

/// Name → value table for a script's globals.
#[derive(Debug, Default, Clone)]
pub struct Globals {
    entries: Vec<(String, Value)>,
}

impl Globals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name`, returning the previous value if there was one.
    pub fn set(&mut self, name: impl Into<String>, value: Value) -> Option<Value> {
        let name = name.into();
        match self.entries.iter_mut().find(|(k, _)| *k == name) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((name, value));
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == name).map(|(_, v)| v)
    }

    /// Remove a binding.  Returns the value if it existed.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        let pos = self.entries.iter().position(|(k, _)| k == name)?;
        Some(self.entries.remove(pos).1)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Iterate in definition order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Heap bytes reachable from this table: one string object per key plus
    /// each bound value.
    pub fn footprint(&self) -> usize {
        self.iter()
            .map(|(k, v)| Value::from(k).footprint() + v.footprint())
            .sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
