use carechain_types::MedicationName;
use serde::Serialize;

/// Insertion-ordered set of medication names.
///
/// Two names are the same member when their title-cased forms are equal, so
/// `WARFARIN` and `warfarin` collapse while `Co-Trimoxazole` and
/// `Co Trimoxazole` stay distinct.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MedicationSet {
    names: Vec<MedicationName>,
}

impl MedicationSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `name` unless already present. Returns `true` if it was added.
    pub fn insert(&mut self, name: MedicationName) -> bool {
        if self.names.contains(&name) {
            return false;
        }
        self.names.push(name);
        true
    }

    /// Adds a name from free text; blank text is ignored.
    pub fn insert_text(&mut self, text: &str) -> bool {
        match MedicationName::new(text) {
            Ok(name) => self.insert(name),
            Err(_) => false,
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MedicationName> {
        self.names.iter()
    }

    pub fn as_slice(&self) -> &[MedicationName] {
        &self.names
    }

    /// Display names in insertion order.
    pub fn to_strings(&self) -> Vec<String> {
        self.names.iter().map(|n| n.as_str().to_string()).collect()
    }
}

impl Extend<MedicationName> for MedicationSet {
    fn extend<I: IntoIterator<Item = MedicationName>>(&mut self, iter: I) {
        for name in iter {
            self.insert(name);
        }
    }
}

impl FromIterator<MedicationName> for MedicationSet {
    fn from_iter<I: IntoIterator<Item = MedicationName>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<'a> IntoIterator for &'a MedicationSet {
    type Item = &'a MedicationName;
    type IntoIter = std::slice::Iter<'a, MedicationName>;

    fn into_iter(self) -> Self::IntoIter {
        self.names.iter()
    }
}
