/// What a single row is doing right now.
///
/// Editing and loading are mutually exclusive: committing an edit turns the
/// row into `Loading`, and a row that is loading cannot be edited.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RowState {
    #[default]
    Idle,
    Editing { draft: String },
    Loading,
}

impl RowState {
    pub fn is_idle(&self) -> bool {
        matches!(self, RowState::Idle)
    }

    pub fn is_editing(&self) -> bool {
        matches!(self, RowState::Editing { .. })
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, RowState::Loading)
    }

    pub fn draft(&self) -> Option<&str> {
        match self {
            RowState::Editing { draft } => Some(draft),
            _ => None,
        }
    }
}
