//! Walkthrough view state.
//!
//! The diagram shows one phase at a time, or every phase at once in overview
//! mode. Connector visibility is derived from the view on demand and never
//! stored on the connector.

use crate::topology::ConnectorSpec;

/// The current phase and overview flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewState {
    phase: usize,
    phase_count: usize,
    overview: bool,
}

impl ViewState {
    /// Creates a view of `phase`, clamped into `1..=phase_count`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use relaymap::view::ViewState;
    /// assert_eq!(ViewState::new(0, 4).phase(), 1);
    /// assert_eq!(ViewState::new(9, 4).phase(), 4);
    /// ```
    pub fn new(phase: usize, phase_count: usize) -> Self {
        let phase_count = phase_count.max(1);
        Self {
            phase: phase.clamp(1, phase_count),
            phase_count,
            overview: false,
        }
    }

    /// Sets overview mode.
    pub fn with_overview(mut self, overview: bool) -> Self {
        self.overview = overview;
        self
    }

    pub fn phase(&self) -> usize {
        self.phase
    }

    pub fn phase_count(&self) -> usize {
        self.phase_count
    }

    pub fn overview(&self) -> bool {
        self.overview
    }

    /// Advances one phase, stopping at the last.
    pub fn next(self) -> Self {
        Self::new(self.phase + 1, self.phase_count)
            .with_overview(self.overview)
    }

    /// Steps back one phase, stopping at the first.
    pub fn previous(self) -> Self {
        Self::new(self.phase.saturating_sub(1), self.phase_count)
            .with_overview(self.overview)
    }

    pub fn toggle_overview(self) -> Self {
        self.with_overview(!self.overview)
    }

    /// Returns true if the connector is drawn in this view.
    ///
    /// Phases are cumulative: a connector stays visible once its phase has
    /// been reached.
    pub fn is_visible(&self, connector: &ConnectorSpec) -> bool {
        self.overview || connector.phase() <= self.phase
    }

    /// Returns true if the connector belongs to the current phase.
    ///
    /// Nothing is active in overview mode.
    pub fn is_active(&self, connector: &ConnectorSpec) -> bool {
        !self.overview && connector.phase() == self.phase
    }

    /// Returns true if the connector carries flow markers.
    pub fn is_animated(&self, connector: &ConnectorSpec) -> bool {
        self.overview || self.is_active(connector)
    }
}
