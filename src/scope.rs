use std::collections::{BTreeMap, HashMap};

/// The single variable store of one program run.
///
/// A fresh scope is created for every run; nothing is shared between
/// independently constructed evaluators.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlobalScope {
    values: HashMap<String, i64>,
}

impl GlobalScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<i64> {
        self.values.get(name).copied()
    }

    /// Bind `name` to `value`, replacing any earlier binding.
    pub fn assign(&mut self, name: &str, value: i64) {
        self.values.insert(name.to_string(), value);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.values.iter().map(|(name, value)| (name.as_str(), *value))
    }

    /// Bindings ordered by name, for stable display.
    pub fn to_sorted(&self) -> BTreeMap<String, i64> {
        self.values
            .iter()
            .map(|(name, value)| (name.clone(), *value))
            .collect()
    }

    pub fn into_inner(self) -> HashMap<String, i64> {
        self.values
    }
}

impl<S: Into<String>> FromIterator<(S, i64)> for GlobalScope {
    fn from_iter<I: IntoIterator<Item = (S, i64)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value))
                .collect(),
        }
    }
}
