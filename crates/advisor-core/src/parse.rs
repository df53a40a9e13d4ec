//! Best-effort normalizers for free-form model output. These functions
//! never fail: malformed or empty text degrades to an empty or truncated
//! result instead of aborting the analysis.

use once_cell::sync::Lazy;
use regex::Regex;

const MAX_OVERVIEW_PARAGRAPHS: usize = 2;
const FENCE_OPEN: &str = "```mermaid";
const FENCE_CLOSE: &str = "```";

/// Emphasis runs and bracket-enclosed annotations; brackets may span lines.
static NOISE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)[*#]+|\[.*?\]").expect("noise pattern compiles"));

static LIST_NOISE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)[*#]+|Requirement:|\[.*?\]").expect("list noise pattern compiles"));

static PARAGRAPH_BREAK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n\s*\n").expect("paragraph break pattern compiles"));

static NUMBERED_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\d+\.\s*(.+)").expect("numbered line pattern compiles"));

/// Split cleaned text on blank-line boundaries and keep at most the first
/// two non-empty paragraphs, in order.
pub fn parse_paragraphs(text: &str) -> Vec<String> {
    let clean = NOISE.replace_all(text, "");
    PARAGRAPH_BREAK
        .split(&clean)
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .take(MAX_OVERVIEW_PARAGRAPHS)
        .map(str::to_string)
        .collect()
}

/// Extract the payload of every `N. item` line. When no line matches, fall
/// back to any line whose first character is an ASCII digit. Zero
/// qualifying lines yield an empty list, never an error.
pub fn parse_list(text: &str) -> Vec<String> {
    let clean = LIST_NOISE.replace_all(text, "");
    let items: Vec<String> = NUMBERED_LINE
        .captures_iter(&clean)
        .map(|captures| captures[1].trim().to_string())
        .filter(|item| !item.is_empty())
        .collect();
    if !items.is_empty() {
        return items;
    }
    clean
        .lines()
        .filter(|line| line.chars().next().is_some_and(|c| c.is_ascii_digit()))
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Collect mermaid-fenced blocks and the standalone heading lines between
/// them, joined by blank lines in encounter order. A fence that is opened
/// but never closed is dropped, not flushed at end of input.
pub fn parse_diagram_blocks(text: &str) -> String {
    let mut blocks: Vec<String> = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut in_fence = false;
    for raw in text.lines() {
        let line = raw.trim();
        if line.starts_with(FENCE_OPEN) {
            in_fence = true;
            current = vec![line];
        } else if line == FENCE_CLOSE && in_fence {
            in_fence = false;
            current.push(line);
            blocks.push(current.join("\n"));
            current = Vec::new();
        } else if in_fence {
            current.push(line);
        } else if !line.is_empty() {
            blocks.push(line.to_string());
        }
    }
    blocks.join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paragraphs_truncate_to_two() {
        let parsed = parse_paragraphs("Para one.\n\nPara two.\n\nPara three.");
        assert_eq!(parsed, vec!["Para one.", "Para two."]);
    }

    #[test]
    fn paragraphs_strip_emphasis_and_annotations() {
        let parsed = parse_paragraphs("## **Bold** overview [internal note]\n\nSecond block.");
        assert_eq!(parsed, vec!["Bold overview", "Second block."]);
    }

    #[test]
    fn paragraphs_of_empty_text_are_empty() {
        assert!(parse_paragraphs("").is_empty());
        assert!(parse_paragraphs("   \n\n  \n").is_empty());
    }

    #[test]
    fn list_extracts_numbered_lines() {
        let parsed = parse_list("1. Alpha\n2. Beta\n3. Gamma");
        assert_eq!(parsed, vec!["Alpha", "Beta", "Gamma"]);
    }

    #[test]
    fn list_without_numbered_lines_is_empty() {
        assert!(parse_list("no numbered lines here").is_empty());
    }

    #[test]
    fn list_strips_label_and_markup() {
        let parsed = parse_list("1. Requirement: The system **must** start. [High]");
        assert_eq!(parsed, vec!["The system must start."]);
    }

    #[test]
    fn list_matches_items_anywhere_in_the_text() {
        let parsed = parse_list("Here is the list:\n1. First\nsome chatter\n2. Second");
        assert_eq!(parsed, vec!["First", "Second"]);
    }

    #[test]
    fn list_falls_back_to_digit_prefixed_lines() {
        let parsed = parse_list("1) Alpha\n2) Beta\nprose line");
        assert_eq!(parsed, vec!["1) Alpha", "2) Beta"]);
    }

    #[test]
    fn diagram_blocks_keep_headings_and_fences() {
        let text = "Class Diagram\n```mermaid\nclassDiagram\n    class A\n```\n";
        let blocks = parse_diagram_blocks(text);
        assert_eq!(
            blocks,
            "Class Diagram\n\n```mermaid\nclassDiagram\nclass A\n```"
        );
    }

    #[test]
    fn diagram_blocks_preserve_encounter_order() {
        let text = "Class Diagram\n```mermaid\nclassDiagram\n```\nSequence Diagram\n```mermaid\nsequenceDiagram\n```";
        let blocks = parse_diagram_blocks(text);
        let positions: Vec<_> = ["Class Diagram", "Sequence Diagram"]
            .iter()
            .map(|heading| blocks.find(heading).unwrap())
            .collect();
        assert!(positions[0] < positions[1]);
        assert_eq!(blocks.matches("```mermaid").count(), 2);
    }

    #[test]
    fn unterminated_fence_is_dropped() {
        let text = "Heading\n```mermaid\nclassDiagram\n    class Lost";
        assert_eq!(parse_diagram_blocks(text), "Heading");
    }

    #[test]
    fn blank_lines_inside_fence_are_kept() {
        let text = "```mermaid\ngraph TD\n\nA --> B\n```";
        assert_eq!(parse_diagram_blocks(text), "```mermaid\ngraph TD\n\nA --> B\n```");
    }

    #[test]
    fn reopened_fence_discards_earlier_accumulation() {
        let text = "```mermaid\nfirst\n```mermaid\nsecond\n```";
        assert_eq!(parse_diagram_blocks(text), "```mermaid\nsecond\n```");
    }
}
