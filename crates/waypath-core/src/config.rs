//! Board dimensions.

use crate::geom::Bounds;

/// Number of rows and columns of a board. Defaults to 30×30.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GridConfig {
    pub rows: i32,
    pub cols: i32,
}

impl GridConfig {
    pub const DEFAULT_SIZE: i32 = 30;

    /// A square configuration of `size × size`.
    pub const fn square(size: i32) -> Self {
        Self {
            rows: size,
            cols: size,
        }
    }

    /// Set the row count (builder).
    pub const fn with_rows(mut self, rows: i32) -> Self {
        self.rows = rows;
        self
    }

    /// Set the column count (builder).
    pub const fn with_cols(mut self, cols: i32) -> Self {
        self.cols = cols;
        self
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.rows, self.cols)
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self::square(Self::DEFAULT_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_thirty_square() {
        let c = GridConfig::default();
        assert_eq!((c.rows, c.cols), (30, 30));
        assert_eq!(c.bounds().len(), 900);
    }

    #[test]
    fn builders() {
        let c = GridConfig::default().with_rows(5).with_cols(8);
        assert_eq!(c.bounds(), Bounds::new(5, 8));
    }
}
