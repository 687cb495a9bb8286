//! Navigation state: active section plus the drawer and profile menu.

use chiedza_core::datasets::DatasetKind;

/// Portal sections, in menu order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Section {
    #[default]
    Dashboard,
    Groups,
    Loans,
    Members,
    Map,
    Reports,
    Settings,
}

impl Section {
    pub const ALL: [Section; 7] = [
        Section::Dashboard,
        Section::Groups,
        Section::Loans,
        Section::Members,
        Section::Map,
        Section::Reports,
        Section::Settings,
    ];

    /// Stable identifier.
    pub fn id(self) -> &'static str {
        match self {
            Section::Dashboard => "dashboard",
            Section::Groups => "groups",
            Section::Loans => "loans",
            Section::Members => "members",
            Section::Map => "map",
            Section::Reports => "reports",
            Section::Settings => "settings",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Section::Dashboard => "Overview",
            Section::Groups => "Savings Groups",
            Section::Loans => "Loan Portfolio",
            Section::Members => "Beneficiaries",
            Section::Map => "GIS Cluster Map",
            Section::Reports => "Reports",
            Section::Settings => "Settings",
        }
    }

    pub fn from_id(id: &str) -> Option<Section> {
        Self::ALL.into_iter().find(|s| s.id() == id)
    }

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|s| *s == self).unwrap_or(0)
    }

    /// Section at `index`, wrapping in both directions.
    pub fn at_wrapping(index: isize) -> Section {
        let len = Self::ALL.len() as isize;
        Self::ALL[index.rem_euclid(len) as usize]
    }

    /// Datasets the section's renderer reads.
    pub fn datasets(self) -> &'static [DatasetKind] {
        const ALL_DATA: &[DatasetKind] = &[
            DatasetKind::Groups,
            DatasetKind::Members,
            DatasetKind::Loans,
        ];
        match self {
            Section::Dashboard | Section::Reports => ALL_DATA,
            Section::Groups | Section::Map => &[DatasetKind::Groups],
            Section::Loans => &[DatasetKind::Loans],
            Section::Members => &[DatasetKind::Members],
            Section::Settings => &[],
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationState {
    pub active_section: Section,
    pub mobile_menu_open: bool,
    pub profile_menu_open: bool,
    /// Highlighted entry while the drawer is open.
    pub drawer_cursor: usize,
}

impl NavigationState {
    /// Selects the section with `id`. Unknown ids are ignored.
    ///
    /// Returns the selected section.
    pub fn select_section(&mut self, id: &str) -> Option<Section> {
        let section = Section::from_id(id)?;
        self.select(section);
        Some(section)
    }

    /// Activates `section` and closes the drawer.
    pub fn select(&mut self, section: Section) {
        self.active_section = section;
        self.mobile_menu_open = false;
        self.drawer_cursor = section.index();
    }

    /// Moves `step` sections forward (negative for backward), wrapping.
    pub fn cycle(&mut self, step: isize) -> Section {
        let next = Section::at_wrapping(self.active_section.index() as isize + step);
        self.select(next);
        next
    }

    pub fn toggle_mobile_menu(&mut self) {
        self.mobile_menu_open = !self.mobile_menu_open;
        if self.mobile_menu_open {
            self.drawer_cursor = self.active_section.index();
        }
    }

    pub fn toggle_profile_menu(&mut self) {
        self.profile_menu_open = !self.profile_menu_open;
    }

    pub fn move_drawer_cursor(&mut self, step: isize) {
        let len = Section::ALL.len() as isize;
        self.drawer_cursor = (self.drawer_cursor as isize + step).rem_euclid(len) as usize;
    }

    /// Selects the highlighted drawer entry.
    pub fn select_drawer_entry(&mut self) -> Section {
        let section = Section::at_wrapping(self.drawer_cursor as isize);
        self.select(section);
        section
    }

    pub fn reset_on_logout(&mut self) {
        *self = Self::default();
    }
}
