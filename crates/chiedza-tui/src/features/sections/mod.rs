mod render;
mod state;
mod update;

pub use render::{SectionView, render_section};
pub use state::{GroupField, GroupForm, Loadable, LoadedDataset, MemberSearch, SectionsState};
pub use update::{
    GroupsKey, claim_missing, claim_reload, handle_dataset_loaded, handle_group_added,
    handle_groups_key, handle_members_key,
};
