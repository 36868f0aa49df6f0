use visualfabric_core::catalog::OutfitOption;

/// Catalog status for one dialog opening.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogState {
    Loading,
    Ready(Vec<OutfitOption>),
    /// The fetch failed. The selector stays empty until the dialog is reopened.
    Failed,
}

impl CatalogState {
    pub fn options(&self) -> &[OutfitOption] {
        match self {
            Self::Ready(options) => options,
            Self::Loading | Self::Failed => &[],
        }
    }

    pub fn find(&self, outfit_id: &str) -> Option<&OutfitOption> {
        self.options().iter().find(|option| option.id == outfit_id)
    }
}

/// What the dialog should render in place of the outfit selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutfitSelector<'a> {
    /// Non-interactive placeholder while the catalog is in flight.
    Placeholder,
    /// The selectable options. Empty after a failed fetch.
    Options(&'a [OutfitOption]),
}

impl<'a> OutfitSelector<'a> {
    pub fn is_interactive(&self) -> bool {
        matches!(self, Self::Options(options) if !options.is_empty())
    }

    pub fn options(&self) -> &'a [OutfitOption] {
        match *self {
            Self::Placeholder => &[],
            Self::Options(options) => options,
        }
    }
}

impl<'a> From<&'a CatalogState> for OutfitSelector<'a> {
    fn from(state: &'a CatalogState) -> Self {
        match state {
            CatalogState::Loading => Self::Placeholder,
            other => Self::Options(other.options()),
        }
    }
}
