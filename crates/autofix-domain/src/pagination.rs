//! Pagination parameters for list endpoints.

use serde::{Deserialize, Serialize};

/// Pagination shared across all list endpoints.
///
/// - `per_page`: 1–100, default 20
/// - `page`: ≥ 1, default 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    #[serde(default = "default_per_page")]
    pub per_page: u32,
    #[serde(default = "default_page")]
    pub page: u32,
}

fn default_per_page() -> u32 {
    20
}

fn default_page() -> u32 {
    1
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            per_page: default_per_page(),
            page: default_page(),
        }
    }
}

impl PageRequest {
    /// Clamp `per_page` to 1–100 and `page` to ≥ 1. Call after
    /// deserializing query params.
    pub fn clamped(self) -> Self {
        Self {
            per_page: self.per_page.clamp(1, 100),
            page: self.page.max(1),
        }
    }

    pub fn offset(self) -> u64 {
        // Widen before multiplying; page is caller-supplied and unbounded.
        u64::from(self.page).saturating_sub(1) * u64::from(self.per_page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_default_to_per_page_20_page_1() {
        let p = PageRequest::default();
        assert_eq!(p.per_page, 20);
        assert_eq!(p.page, 1);
    }

    #[test]
    fn should_clamp_out_of_range_values() {
        let p = PageRequest {
            per_page: 0,
            page: 0,
        }
        .clamped();
        assert_eq!(p.per_page, 1);
        assert_eq!(p.page, 1);

        let p = PageRequest {
            per_page: 500,
            page: 3,
        }
        .clamped();
        assert_eq!(p.per_page, 100);
        assert_eq!(p.page, 3);
    }

    #[test]
    fn should_compute_offset_from_page() {
        let p = PageRequest {
            per_page: 20,
            page: 3,
        };
        assert_eq!(p.offset(), 40);
    }

    #[test]
    fn should_not_overflow_on_huge_page_numbers() {
        let p = PageRequest {
            per_page: 20,
            page: u32::MAX,
        }
        .clamped();
        assert_eq!(p.offset(), (u64::from(u32::MAX) - 1) * 20);
    }
}
