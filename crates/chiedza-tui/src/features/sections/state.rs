//! Section data: the datasets renderers read, owned separately from the
//! session and navigation state.

use chiedza_core::datasets::{Dataset, DatasetKind};
use chiedza_core::records::{CLUSTER_ZONES, Loan, Member, NewGroup, SavingsGroup};

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Loadable<T> {
    #[default]
    NotLoaded,
    Loading,
    Loaded(Dataset<T>),
}

impl<T> Loadable<T> {
    pub fn dataset(&self) -> Option<&Dataset<T>> {
        match self {
            Loadable::Loaded(dataset) => Some(dataset),
            _ => None,
        }
    }

    pub fn rows(&self) -> &[T] {
        self.dataset().map_or(&[], |d| d.rows.as_slice())
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Loadable::Loading)
    }

    pub fn is_sample(&self) -> bool {
        self.dataset().is_some_and(Dataset::is_sample)
    }
}

/// A finished fetch, tagged by table.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadedDataset {
    Groups(Dataset<SavingsGroup>),
    Members(Dataset<Member>),
    Loans(Dataset<Loan>),
}

impl LoadedDataset {
    pub fn kind(&self) -> DatasetKind {
        match self {
            LoadedDataset::Groups(_) => DatasetKind::Groups,
            LoadedDataset::Members(_) => DatasetKind::Members,
            LoadedDataset::Loans(_) => DatasetKind::Loans,
        }
    }
}

/// Beneficiary search box.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberSearch {
    pub query: String,
    pub editing: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GroupField {
    #[default]
    Name,
    Cluster,
    Latitude,
    Longitude,
}

impl GroupField {
    const ORDER: [GroupField; 4] = [
        GroupField::Name,
        GroupField::Cluster,
        GroupField::Latitude,
        GroupField::Longitude,
    ];

    pub fn step(self, step: isize) -> Self {
        let len = Self::ORDER.len() as isize;
        let index = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0) as isize;
        Self::ORDER[(index + step).rem_euclid(len) as usize]
    }
}

/// "Register new group" form in the groups section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupForm {
    pub name: String,
    /// Index into `CLUSTER_ZONES`.
    pub cluster: usize,
    pub lat: String,
    pub lng: String,
    pub focus: GroupField,
    pub error: Option<String>,
    pub submitting: bool,
}

impl GroupForm {
    pub fn cluster_zone(&self) -> &'static str {
        CLUSTER_ZONES[self.cluster % CLUSTER_ZONES.len()]
    }

    pub fn cycle_cluster(&mut self, step: isize) {
        let len = CLUSTER_ZONES.len() as isize;
        self.cluster = (self.cluster as isize + step).rem_euclid(len) as usize;
    }

    /// Text field under the cursor; `None` on the cluster picker.
    pub fn focused_text(&mut self) -> Option<&mut String> {
        match self.focus {
            GroupField::Name => Some(&mut self.name),
            GroupField::Cluster => None,
            GroupField::Latitude => Some(&mut self.lat),
            GroupField::Longitude => Some(&mut self.lng),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SectionsState {
    pub groups: Loadable<SavingsGroup>,
    pub members: Loadable<Member>,
    pub loans: Loadable<Loan>,
    pub member_search: MemberSearch,
    /// Open while registering a group.
    pub group_form: Option<GroupForm>,
}

impl SectionsState {
    pub fn is_requested(&self, kind: DatasetKind) -> bool {
        match kind {
            DatasetKind::Groups => !matches!(self.groups, Loadable::NotLoaded),
            DatasetKind::Members => !matches!(self.members, Loadable::NotLoaded),
            DatasetKind::Loans => !matches!(self.loans, Loadable::NotLoaded),
        }
    }

    pub fn mark_loading(&mut self, kind: DatasetKind) {
        match kind {
            DatasetKind::Groups => self.groups = Loadable::Loading,
            DatasetKind::Members => self.members = Loadable::Loading,
            DatasetKind::Loans => self.loans = Loadable::Loading,
        }
    }

    pub fn store(&mut self, loaded: LoadedDataset) {
        match loaded {
            LoadedDataset::Groups(d) => self.groups = Loadable::Loaded(d),
            LoadedDataset::Members(d) => self.members = Loadable::Loaded(d),
            LoadedDataset::Loans(d) => self.loans = Loadable::Loaded(d),
        }
    }

    /// Shows a group registered without a round trip (demo sessions).
    pub fn append_local_group(&mut self, group: &NewGroup) {
        if let Loadable::Loaded(dataset) = &mut self.groups {
            let id = format!("local-{}", dataset.rows.len() + 1);
            dataset.rows.push(SavingsGroup::new(
                &id,
                &group.name,
                &group.cluster_zone,
                group.location_lat,
                group.location_lng,
                0,
            ));
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
