use chiedza_core::config::OrgSettings;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveStatus {
    Saved,
    Failed(String),
}

/// Organisation settings being edited, plus the last persisted copy.
#[derive(Debug, Clone, PartialEq)]
pub struct SettingsState {
    pub values: OrgSettings,
    pub saved: OrgSettings,
    pub saving: bool,
    pub status: Option<SaveStatus>,
}

impl SettingsState {
    pub fn new(values: OrgSettings) -> Self {
        Self {
            saved: values.clone(),
            values,
            saving: false,
            status: None,
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.values != self.saved
    }
}
