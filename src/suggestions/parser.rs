// src/suggestions/parser.rs
//! Extracts topic ideas from a free-text completion.

use super::SuggestedTopic;

pub const MAX_SUGGESTIONS: usize = 6;
const TRENDING_COUNT: u32 = 3;
const DEFAULT_ICON: &str = "✨";
const FALLBACK_DESCRIPTION: &str = "AI suggested LinkedIn topic";

/// `title: description` lines first; if none match, every non-blank line
/// becomes a bare label.
pub fn parse_suggestions(content: &str) -> Vec<SuggestedTopic> {
    let structured: Vec<SuggestedTopic> = content
        .lines()
        .filter_map(split_title_line)
        .take(MAX_SUGGESTIONS)
        .zip(1u32..)
        .map(|((title, description), id)| {
            let (icon, label) = split_icon(&title);
            suggestion(id, label, icon, description)
        })
        .collect();

    if !structured.is_empty() {
        return structured;
    }

    content
        .lines()
        .map(|line| clean_text(strip_list_marker(line)))
        .filter(|line| !line.is_empty())
        .take(MAX_SUGGESTIONS)
        .zip(1u32..)
        .map(|(line, id)| suggestion(id, line, DEFAULT_ICON.to_string(), FALLBACK_DESCRIPTION.to_string()))
        .collect()
}

fn suggestion(id: u32, label: String, icon: String, description: String) -> SuggestedTopic {
    SuggestedTopic {
        id,
        label,
        icon,
        trending: id <= TRENDING_COUNT,
        description,
    }
}

fn split_title_line(line: &str) -> Option<(String, String)> {
    let (title, description) = strip_list_marker(line).split_once(':')?;
    let title = clean_text(title);
    if title.is_empty() {
        return None;
    }
    Some((title, clean_text(description)))
}

/// Drop one leading list marker (`1.`, `1)`, `-`, `*`, `•`) when it is
/// followed by whitespace. The rest of the line is left alone.
fn strip_list_marker(line: &str) -> &str {
    let trimmed = line.trim_start();
    let digits = trimmed.len()
        - trimmed
            .trim_start_matches(|c: char| c.is_ascii_digit())
            .len();

    let rest = if digits > 0 {
        trimmed[digits..].strip_prefix(['.', ')'])
    } else {
        trimmed.strip_prefix(['-', '*', '•'])
    };

    match rest {
        Some(rest) if rest.starts_with(char::is_whitespace) => rest.trim_start(),
        _ => trimmed,
    }
}

fn clean_text(fragment: &str) -> String {
    fragment.replace("**", "").trim().to_string()
}

/// Leading emoji token (no ASCII, no letters or digits) becomes the icon.
fn split_icon(title: &str) -> (String, String) {
    if let Some((first, rest)) = title.split_once(char::is_whitespace) {
        let is_emoji = first
            .chars()
            .all(|c| !c.is_ascii() && !c.is_alphanumeric());
        let rest = rest.trim();
        if is_emoji && !rest.is_empty() {
            return (first.to_string(), rest.to_string());
        }
    }
    (DEFAULT_ICON.to_string(), title.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_titled_lines_with_icons() {
        let content = "1. 🚀 **Remote Leadership**: Leading distributed teams well\n\
                       2. AI Ethics: Responsible adoption at work\n\
                       \n\
                       - 📈 Growth Mindset: Learning from setbacks";

        let topics = parse_suggestions(content);

        assert_eq!(topics.len(), 3);
        assert_eq!(topics[0].icon, "🚀");
        assert_eq!(topics[0].label, "Remote Leadership");
        assert_eq!(topics[0].description, "Leading distributed teams well");
        assert_eq!(topics[1].icon, "✨");
        assert_eq!(topics[1].label, "AI Ethics");
        assert_eq!(topics[2].icon, "📈");
        assert!(topics[2].trending);
    }

    #[test]
    fn test_limits_to_six_and_marks_first_three_trending() {
        let content = (1..=9)
            .map(|i| format!("Topic {}: Description {}", i, i))
            .collect::<Vec<_>>()
            .join("\n");

        let topics = parse_suggestions(&content);

        assert_eq!(topics.len(), MAX_SUGGESTIONS);
        assert_eq!(topics[5].id, 6);
        let trending: Vec<bool> = topics.iter().map(|t| t.trending).collect();
        assert_eq!(trending, vec![true, true, true, false, false, false]);
    }

    #[test]
    fn test_falls_back_to_plain_lines() {
        let content = "Hiring in a downturn\n\n* Mentorship programs\nBuilding in public";

        let topics = parse_suggestions(content);

        assert_eq!(topics.len(), 3);
        assert_eq!(topics[1].label, "Mentorship programs");
        assert_eq!(topics[1].description, FALLBACK_DESCRIPTION);
        assert_eq!(topics[2].icon, DEFAULT_ICON);
    }

    #[test]
    fn test_empty_completion_yields_nothing() {
        assert!(parse_suggestions("  \n\n").is_empty());
    }

    #[test]
    fn test_descriptions_keep_leading_numbers_and_signs() {
        let content = "🚀 Remote Work: 3.5 million jobs went remote\n\
                       📉 Churn: -10% churn after layoffs\n\
                       3. 2.0 Era: 1) rethink the stack";

        let topics = parse_suggestions(content);

        assert_eq!(topics.len(), 3);
        assert_eq!(topics[0].description, "3.5 million jobs went remote");
        assert_eq!(topics[1].description, "-10% churn after layoffs");
        assert_eq!(topics[2].label, "2.0 Era");
        assert_eq!(topics[2].description, "1) rethink the stack");
    }

    #[test]
    fn test_strip_list_marker() {
        assert_eq!(strip_list_marker("12) **Bold**"), "**Bold**");
        assert_eq!(strip_list_marker("  - Dash"), "Dash");
        assert_eq!(strip_list_marker("• Bullet"), "Bullet");
        assert_eq!(strip_list_marker("2024 plans"), "2024 plans");
        assert_eq!(strip_list_marker("2.0 Era"), "2.0 Era");
        assert_eq!(strip_list_marker("-10% churn"), "-10% churn");
    }
}
