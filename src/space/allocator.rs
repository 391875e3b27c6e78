//! Cell tracking for DP arenas

/// Tracks DP cells held during alignment
#[derive(Debug, Clone)]
pub struct SpaceTracker {
    /// Cells currently live
    current: usize,

    /// Maximum seen
    max: usize,

    /// Profile data (if enabled)
    profile: Option<super::SpaceProfile>,
}

impl SpaceTracker {
    /// Create new tracker
    pub fn new(profile_enabled: bool) -> Self {
        Self {
            current: 0,
            max: 0,
            profile: if profile_enabled {
                Some(super::SpaceProfile::default())
            } else {
                None
            },
        }
    }

    /// Record the start of a DP fill
    pub fn begin_fill(&mut self) {
        if let Some(ref mut p) = self.profile {
            p.fills += 1;
        }
    }

    /// Allocate a score arena
    pub fn allocate_scores(&mut self, cells: usize) {
        self.allocate(cells);
        if let Some(ref mut p) = self.profile {
            p.score_cells_max = p.score_cells_max.max(cells);
        }
    }

    /// Allocate a traceback arena
    pub fn allocate_traceback(&mut self, cells: usize) {
        self.allocate(cells);
        if let Some(ref mut p) = self.profile {
            p.traceback_cells_max = p.traceback_cells_max.max(cells);
        }
    }

    /// Allocate rolling rows
    pub fn allocate_rows(&mut self, cells: usize) {
        self.allocate(cells);
        if let Some(ref mut p) = self.profile {
            p.row_cells_max = p.row_cells_max.max(cells);
        }
    }

    /// Free cells
    pub fn free(&mut self, cells: usize) {
        self.current = self.current.saturating_sub(cells);
    }

    fn allocate(&mut self, cells: usize) {
        self.current += cells;
        self.max = self.max.max(self.current);

        if let Some(ref mut p) = self.profile {
            p.max_cells = self.max;
        }
    }

    /// Cells currently live
    pub fn current_cells(&self) -> usize {
        self.current
    }

    /// Get maximum cells held at once
    pub fn max_cells_used(&self) -> usize {
        self.max
    }

    /// Peek at the profile without consuming it
    pub fn profile(&self) -> Option<&super::SpaceProfile> {
        self.profile.as_ref()
    }

    /// Take profile (profiling stops afterwards)
    pub fn take_profile(&mut self) -> Option<super::SpaceProfile> {
        self.profile.take()
    }
}
