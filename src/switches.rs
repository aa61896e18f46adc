use std::collections::BTreeSet;

/// Switch-case registry collaborator.
///
/// The traversal opens an entry per `switch` statement and records the
/// normalized value of every case label it finds. The engine only consults
/// the most recently opened switch, which is the one enclosing the literal
/// currently being visited.
#[derive(Debug, Default)]
pub struct SwitchCaseRegistry {
    entries: Vec<(u64, BTreeSet<String>)>,
}

impl SwitchCaseRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a new switch entry with no labels yet.
    pub fn open_switch(&mut self, id: u64) {
        self.entries.push((id, BTreeSet::new()));
    }

    /// Record a case label for the most recently opened switch.
    ///
    /// A label seen before any switch was opened is dropped; the traversal
    /// never produces that ordering.
    pub fn add_case_label(&mut self, label: impl Into<String>) {
        if let Some((_, labels)) = self.entries.last_mut() {
            labels.insert(label.into());
        }
    }

    /// Case labels of the most recently opened switch.
    pub fn current_labels(&self) -> Option<&BTreeSet<String>> {
        self.entries.last().map(|(_, labels)| labels)
    }

    /// True if `label` is already used by the most recently opened switch.
    pub fn is_duplicate_label(&self, label: &str) -> bool {
        self.current_labels()
            .is_some_and(|labels| labels.contains(label))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_check_reads_the_latest_switch_only() {
        let mut reg = SwitchCaseRegistry::new();

        reg.open_switch(1);
        reg.add_case_label("0");
        reg.add_case_label("1");

        reg.open_switch(2);
        reg.add_case_label("5");

        assert!(reg.is_duplicate_label("5"));
        assert!(!reg.is_duplicate_label("0"), "labels of switch 1 no longer apply");
    }

    #[test]
    fn empty_registry_has_no_duplicates() {
        let reg = SwitchCaseRegistry::new();

        assert!(reg.current_labels().is_none());
        assert!(!reg.is_duplicate_label("0"));
    }
}
