//! Static tag list

/// Prefix shared by every AgentUI tag
pub const TAG_PREFIX: &str = "au-";

/// Number of components the library ships
pub const DECLARED_TOTAL: usize = 45;

/// Every AgentUI tag, sorted
pub static TAG_LIST: &[&str] = &[
    "au-alert",
    "au-avatar",
    "au-badge",
    "au-breadcrumb",
    "au-button",
    "au-callout",
    "au-card",
    "au-checkbox",
    "au-chip",
    "au-code",
    "au-container",
    "au-datatable",
    "au-dialog",
    "au-divider",
    "au-doc-page",
    "au-dropdown",
    "au-example",
    "au-form",
    "au-grid",
    "au-icon",
    "au-input",
    "au-layout",
    "au-link",
    "au-list",
    "au-menu",
    "au-modal",
    "au-navbar",
    "au-pagination",
    "au-progress",
    "au-radio",
    "au-select",
    "au-sidebar",
    "au-skeleton",
    "au-slider",
    "au-spinner",
    "au-splash",
    "au-stack",
    "au-switch",
    "au-tab",
    "au-table",
    "au-tabs",
    "au-textarea",
    "au-theme-toggle",
    "au-toast",
    "au-tooltip",
];

/// Whether `tag` is one of the shipped components
pub fn is_agentui_tag(tag: &str) -> bool {
    TAG_LIST.binary_search(&tag).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_no_duplicates() {
        let unique: HashSet<&str> = TAG_LIST.iter().copied().collect();
        assert_eq!(unique.len(), TAG_LIST.len());
    }

    #[test]
    fn test_prefix() {
        assert!(TAG_LIST.iter().all(|t| t.starts_with(TAG_PREFIX)));
    }

    #[test]
    fn test_declared_total() {
        assert_eq!(TAG_LIST.len(), DECLARED_TOTAL);
    }

    #[test]
    fn test_sorted_lookup() {
        assert!(TAG_LIST.windows(2).all(|w| w[0] < w[1]));
        assert!(is_agentui_tag("au-doc-page"));
        assert!(!is_agentui_tag("au-unknown"));
    }
}
