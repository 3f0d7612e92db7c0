//! Capability-scoped buffer views.
//!
//! A kernel never receives a buffer directly. Inputs arrive as [`ReadView`],
//! which can only be read, and the output arrives as [`WriteView`], which can
//! only be written.

/// Read-only view of a linear `f32` buffer.
#[derive(Debug, Clone, Copy)]
pub struct ReadView<'a> {
    data: &'a [f32],
}

impl<'a> ReadView<'a> {
    pub fn new(data: &'a [f32]) -> Self {
        ReadView { data }
    }

    /// Returns the element at linear position `idx`.
    ///
    /// # Panics
    /// Panics if `idx >= len()`.
    pub fn get(&self, idx: usize) -> f32 {
        self.data[idx]
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Write-only view of a linear `f32` buffer.
#[derive(Debug)]
pub struct WriteView<'a> {
    data: &'a mut [f32],
}

impl<'a> WriteView<'a> {
    pub fn new(data: &'a mut [f32]) -> Self {
        WriteView { data }
    }

    /// Stores `value` at linear position `idx`.
    ///
    /// # Panics
    /// Panics if `idx >= len()`.
    pub fn set(&mut self, idx: usize, value: f32) {
        self.data[idx] = value;
    }

    /// Overwrites every element with `value`.
    pub fn fill(&mut self, value: f32) {
        self.data.fill(value);
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
