//! Page-size choices and page-count arithmetic.

use std::fmt;
use std::str::FromStr;

/// The page sizes a user can pick from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PageSize {
    TwentyFive,
    #[default]
    Fifty,
    Hundred,
}

impl PageSize {
    pub const ALL: [PageSize; 3] = [PageSize::TwentyFive, PageSize::Fifty, PageSize::Hundred];

    pub fn get(self) -> usize {
        match self {
            Self::TwentyFive => 25,
            Self::Fifty => 50,
            Self::Hundred => 100,
        }
    }

    /// Next size in the cycle 25 → 50 → 100 → 25.
    pub fn next(self) -> Self {
        match self {
            Self::TwentyFive => Self::Fifty,
            Self::Fifty => Self::Hundred,
            Self::Hundred => Self::TwentyFive,
        }
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

impl FromStr for PageSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let n: usize = s
            .trim()
            .parse()
            .map_err(|_| format!("'{s}' is not a number"))?;
        Self::ALL
            .into_iter()
            .find(|size| size.get() == n)
            .ok_or_else(|| format!("page size must be one of 25, 50, 100 (got {n})"))
    }
}

/// Number of pages needed for `total_items`; never less than one.
pub fn total_pages(total_items: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 1;
    }
    total_items.div_ceil(page_size).max(1)
}
