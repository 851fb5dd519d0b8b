//! Input sanitization and validation.
//!
//! Rejected input never reaches the answering pipeline. Sanitization strips
//! HTML tags and bounds length; validation then enforces the minimums.

/// Strips HTML tags and bounds the text to `max_len` characters.
pub fn sanitize_input(text: &str, max_len: usize) -> String {
    let mut cleaned = String::with_capacity(text.len());
    let mut pending = String::new();
    let mut in_tag = false;

    for c in text.chars() {
        match c {
            '<' if !in_tag => {
                in_tag = true;
                pending.push(c);
            }
            '>' if in_tag => {
                in_tag = false;
                pending.clear();
            }
            c if in_tag => pending.push(c),
            c => cleaned.push(c),
        }
    }

    // A "tag" that never closed was ordinary text all along.
    cleaned.push_str(&pending);

    cleaned.trim().chars().take(max_len).collect()
}

/// Validates and sanitizes a question. Returns the cleaned question or a
/// caller-facing message.
pub fn validate_question(raw: &str, max_len: usize) -> Result<String, &'static str> {
    if raw.trim().is_empty() {
        return Err("Question is required");
    }

    let sanitized = sanitize_input(raw, max_len);

    if sanitized.is_empty() {
        return Err("Question cannot be empty after sanitization");
    }

    if sanitized.chars().count() < 3 {
        return Err("Question is too short (minimum 3 characters)");
    }

    Ok(sanitized)
}

/// Validates and sanitizes a chat title.
pub fn validate_title(raw: &str, max_len: usize) -> Result<String, &'static str> {
    if raw.trim().is_empty() {
        return Err("Title is required");
    }

    let sanitized = sanitize_input(raw, max_len);

    if sanitized.is_empty() {
        return Err("Title cannot be empty");
    }

    Ok(sanitized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_strips_tags() {
        assert_eq!(
            sanitize_input("What is <b>RAG</b>?", 500),
            "What is RAG?"
        );
        assert_eq!(
            sanitize_input("<script>alert('x')</script>hello", 500),
            "alert('x')hello"
        );
    }

    #[test]
    fn test_sanitize_bounds_length() {
        let long = "a".repeat(600);
        assert_eq!(sanitize_input(&long, 500).chars().count(), 500);
    }

    #[test]
    fn test_sanitize_trims_whitespace() {
        assert_eq!(sanitize_input("  hello  ", 500), "hello");
    }

    #[test]
    fn test_sanitize_keeps_unmatched_angle_bracket() {
        assert_eq!(sanitize_input("is x<y?", 500), "is x<y?");
        assert_eq!(sanitize_input("5 < 10", 500), "5 < 10");
        // Still stripped once a closing bracket makes it a tag.
        assert_eq!(sanitize_input("is <b>x</b><y?", 500), "is x<y?");
    }

    #[test]
    fn test_validate_question_rejects_empty() {
        assert!(validate_question("", 500).is_err());
        assert!(validate_question("   ", 500).is_err());
        assert!(validate_question("<b></b>", 500).is_err());
    }

    #[test]
    fn test_validate_question_rejects_too_short() {
        assert!(validate_question("hi", 500).is_err());
        assert!(validate_question("hey", 500).is_ok());
    }

    #[test]
    fn test_validate_title() {
        assert_eq!(validate_title("My Chat", 100).unwrap(), "My Chat");
        assert!(validate_title("", 100).is_err());
        assert!(validate_title("<i></i>", 100).is_err());
    }
}
