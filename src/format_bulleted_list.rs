use std::fmt::Display;

use itertools::Itertools;

/// Format items as a bulleted list, one per line.
///
/// Items spanning several lines have their continuation lines indented to line up with the text
/// after the bullet.
pub fn format_bulleted_list(items: impl IntoIterator<Item = impl Display>) -> String {
    items
        .into_iter()
        .map(|item| format!("• {}", item.to_string().lines().join("\n  ")))
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    #[test]
    fn test_format_bulleted_list() {
        assert_eq!(format_bulleted_list(Vec::<String>::new()), "");
        assert_eq!(format_bulleted_list(["City"]), "• City");
        assert_eq!(
            format_bulleted_list(["City", "Country\nHungary"]),
            "• City\n• Country\n  Hungary"
        );
    }
}
