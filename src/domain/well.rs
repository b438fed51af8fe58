// Well domain model

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Well {
    pub id: String,
    pub name: String,
}

impl Well {
    pub fn new(id: String, name: String) -> Self {
        Self { id, name }
    }

    /// Selector text shown to the user, e.g. "3-Tarim 101".
    pub fn label(&self) -> String {
        format!("{}-{}", self.id, self.name)
    }

    /// Recover the well id from a selector label (text before the first '-').
    pub fn id_from_label(label: &str) -> Option<&str> {
        let id = label.split('-').next()?.trim();
        if id.is_empty() { None } else { Some(id) }
    }
}
