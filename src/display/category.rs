//! Category display formatting

use crate::models::Category;

/// Format categories as an id/name table
pub fn format_category_list(categories: &[Category]) -> String {
    if categories.is_empty() {
        return "No categories found.\n\nRun 'pettyflow init' to create default categories.\n"
            .to_string();
    }

    let mut output = String::new();
    output.push_str(&format!("{:<8} {}\n", "ID", "Name"));
    output.push_str(&"-".repeat(32));
    output.push('\n');
    for category in categories {
        output.push_str(&format!("{:<8} {}\n", category.id.as_str(), category.name));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_list() {
        let output = format_category_list(&Category::defaults());
        assert!(output.contains("c2       Food & Beverage"));
        assert!(format_category_list(&[]).contains("pettyflow init"));
    }
}
