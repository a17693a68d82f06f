//! Opaque ID generation for tasks and subtasks
//!
//! All IDs use the format: `{6-char-hex}-{kind}-{slug}`
//! Example: `019430-task-write-report`

/// Generate an ID from kind and title
pub fn generate_id(kind: &str, title: &str) -> String {
    let uuid = uuid::Uuid::now_v7();
    let hex_prefix = &uuid.to_string()[..6];
    let slug = slugify(title);
    format!("{}-{}-{}", hex_prefix, kind, slug)
}

/// Slugify a title for use in IDs
fn slugify(title: &str) -> String {
    title
        .to_lowercase()
        .chars()
        // Strip apostrophes entirely, replace other non-alphanumeric with hyphens
        .filter_map(|c| {
            if c.is_alphanumeric() {
                Some(c)
            } else if c == '\'' || c == '\u{2019}' || c == '\u{2018}' {
                None
            } else {
                Some('-')
            }
        })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_id() {
        let id = generate_id("task", "Write Quarterly Report");
        assert!(id.len() > 10);
        assert!(id.contains("-task-"));
        assert!(id.contains("write-quarterly-report"));
    }

    #[test]
    fn test_generate_id_unique() {
        let a = generate_id("task", "Same Title");
        let b = generate_id("task", "Same Title");
        assert_ne!(a, b);
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("Ship v2!"), "ship-v2");
        assert_eq!(slugify("Multiple   Spaces"), "multiple-spaces");
        // Apostrophes should be stripped, not converted to hyphens
        assert_eq!(slugify("don't stop"), "dont-stop");
    }
}
