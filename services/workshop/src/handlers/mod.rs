pub mod client;
pub mod employee;
pub mod repair_order;
pub mod service;
pub mod service_history;
pub mod vehicle;
pub mod warehouse;

use autofix_domain::pagination::PageRequest;

/// Query flags arrive as strings; anything but `1`/`true` means off, so a
/// malformed value falls back to the default instead of failing the request.
pub(crate) fn flag(value: Option<&str>) -> bool {
    matches!(value, Some("1") | Some("true"))
}

pub(crate) fn page_request(per_page: Option<u32>, page: Option<u32>) -> PageRequest {
    PageRequest {
        per_page: per_page.unwrap_or(20),
        page: page.unwrap_or(1),
    }
    .clamped()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_treat_unknown_flag_values_as_off() {
        assert!(flag(Some("1")));
        assert!(flag(Some("true")));
        assert!(!flag(Some("yes")));
        assert!(!flag(Some("")));
        assert!(!flag(None));
    }

    #[test]
    fn should_clamp_page_parameters() {
        let page = page_request(Some(500), Some(0));
        assert_eq!(page.per_page, 100);
        assert_eq!(page.page, 1);
    }
}
