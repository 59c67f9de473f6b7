//! Plain-text extraction from Jira's rich-text descriptions.
//!
//! Jira Cloud stores descriptions either as plain strings or as ADF
//! (Atlassian Document Format), a tree of block nodes holding inline text
//! runs. The walk below handles paragraph, heading, and list blocks;
//! unknown node kinds are silently skipped.

use serde_json::Value;

/// Extract plain text from a Jira description field.
///
/// - null/absent → empty string
/// - plain string → returned unchanged
/// - ADF document → block walk with a newline after each block, trimmed
pub fn extract_description(description: &Value) -> String {
    match description {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        Value::Object(obj) => match obj.get("content").and_then(Value::as_array) {
            Some(content) => extract_blocks(content),
            None => String::new(),
        },
        _ => String::new(),
    }
}

/// Walk top-level ADF block nodes, concatenating their text runs.
fn extract_blocks(content: &[Value]) -> String {
    let mut text = String::new();

    for node in content {
        match node.get("type").and_then(Value::as_str) {
            Some("paragraph") | Some("heading") => {
                append_inline_text(&mut text, node);
                text.push('\n');
            }
            Some("bulletList") | Some("orderedList") => {
                let Some(items) = node.get("content").and_then(Value::as_array) else {
                    continue;
                };
                for item in items {
                    if item.get("type").and_then(Value::as_str) == Some("listItem")
                        && let Some(children) = item.get("content").and_then(Value::as_array)
                    {
                        for child in children {
                            if child.get("type").and_then(Value::as_str) == Some("paragraph") {
                                append_inline_text(&mut text, child);
                            }
                        }
                    }
                    text.push('\n');
                }
            }
            // Unknown block kinds (tables, media, panels, ...) are skipped
            _ => {}
        }
    }

    text.trim().to_string()
}

/// Append every inline text run of a block node.
fn append_inline_text(out: &mut String, node: &Value) {
    let Some(children) = node.get("content").and_then(Value::as_array) else {
        return;
    };
    for child in children {
        if child.get("type").and_then(Value::as_str) == Some("text")
            && let Some(run) = child.get("text").and_then(Value::as_str)
        {
            out.push_str(run);
        }
    }
}
