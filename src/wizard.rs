//! Navigation for the converter wizard.
//!
//! The wizard walks the user from picking a source directory to configuring
//! the output. Manual bundling adds a step; the automatic bundle methods skip
//! it.

use crate::bridge::BundleFlag;
use crate::builder::{BuildErrors, FsmBuilder};
use crate::core::{DiagnosticSender, Fsm};
use crate::store::FsmStore;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConverterTab {
    SourceSelector,
    SourceAnalyze,
    BundleMethodSelector,
    BundleSelector,
    ConfigureConverter,
    FilterImages,
}

impl ConverterTab {
    pub const ALL: [ConverterTab; 6] = [
        Self::SourceSelector,
        Self::SourceAnalyze,
        Self::BundleMethodSelector,
        Self::BundleSelector,
        Self::ConfigureConverter,
        Self::FilterImages,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Self::SourceSelector => "Select Source",
            Self::SourceAnalyze => "Analyze Source",
            Self::BundleMethodSelector => "Bundle Method",
            Self::BundleSelector => "Bundle Volumes",
            Self::ConfigureConverter => "Configure",
            Self::FilterImages => "Filter Images",
        }
    }

    /// Forward event for this tab given the chosen bundle method.
    ///
    /// Only manual bundling visits [`ConverterTab::BundleSelector`].
    pub fn next_for(&self, flag: BundleFlag) -> Nav {
        match (self, flag) {
            (Self::BundleMethodSelector, BundleFlag::Name | BundleFlag::Image) => Nav::Skip,
            _ => Nav::Next,
        }
    }
}

/// Navigation events
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Nav {
    Next,
    Back,
    Skip,
    Restart,
}

/// What a screen needs to render the current tab
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TabView {
    pub tab: ConverterTab,
    pub title: &'static str,
    pub back_enabled: bool,
    pub next_enabled: bool,
}

pub type ConverterFsm = Fsm<ConverterTab, Nav, TabView>;
pub type ConverterStore = FsmStore<ConverterTab, Nav, TabView>;

fn builder() -> FsmBuilder<ConverterTab, Nav, TabView> {
    use ConverterTab::*;

    let mut builder = FsmBuilder::new()
        .transition(SourceSelector, Nav::Next, SourceAnalyze)
        .transition(SourceAnalyze, Nav::Next, BundleMethodSelector)
        .transition(SourceAnalyze, Nav::Back, SourceSelector)
        .transition(BundleMethodSelector, Nav::Next, BundleSelector)
        .transition(BundleMethodSelector, Nav::Skip, ConfigureConverter)
        .transition(BundleMethodSelector, Nav::Back, SourceAnalyze)
        .transition(BundleSelector, Nav::Next, ConfigureConverter)
        .transition(BundleSelector, Nav::Back, BundleMethodSelector)
        .transition(ConfigureConverter, Nav::Next, FilterImages)
        .transition(ConfigureConverter, Nav::Back, BundleMethodSelector)
        .transition(FilterImages, Nav::Back, ConfigureConverter);

    for tab in ConverterTab::ALL {
        builder = builder.transition(tab, Nav::Restart, SourceSelector);
    }

    builder.values(
        ConverterTab::ALL
            .into_iter()
            .map(|tab| {
                let view = TabView {
                    tab,
                    title: tab.title(),
                    back_enabled: tab != SourceSelector,
                    next_enabled: tab != FilterImages,
                };
                (tab, view)
            })
            .collect::<Vec<_>>(),
    )
}

/// Machine for one converter session.
pub fn converter_fsm(
    diagnostics: Option<DiagnosticSender<ConverterTab, Nav>>,
) -> Result<ConverterFsm, BuildErrors> {
    match diagnostics {
        Some(sender) => builder().diagnostics(sender).build(),
        None => builder().build(),
    }
}

/// Store for one converter session, starting at the source selector.
pub fn converter_store() -> Result<ConverterStore, BuildErrors> {
    converter_fsm(None).map(FsmStore::new)
}
