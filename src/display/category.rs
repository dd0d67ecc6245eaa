//! Category display formatting

use crate::models::category::is_default_category;
use crate::models::CategoryRegistry;

/// Format the category list, marking user-added categories
pub fn format_category_list(registry: &CategoryRegistry) -> String {
    if registry.is_empty() {
        return "No categories found.\n\nRun 'pennywise category add <name>' to create one.\n"
            .to_string();
    }

    let mut output = String::new();
    output.push_str(&format!("Categories ({}):\n", registry.len()));

    for (i, name) in registry.iter().enumerate() {
        let custom = if is_default_category(name) { "" } else { " (custom)" };
        output.push_str(&format!("  {:>2}. {}{}\n", i + 1, name, custom));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_category_list() {
        let registry = CategoryRegistry::from_names(["Food", "Pets"]);
        let output = format_category_list(&registry);

        assert!(output.starts_with("Categories (2):"));
        assert!(output.contains(" 1. Food\n"));
        assert!(output.contains(" 2. Pets (custom)\n"));
    }

    #[test]
    fn test_format_empty_list() {
        let output = format_category_list(&CategoryRegistry::empty());
        assert!(output.starts_with("No categories found."));
    }
}
