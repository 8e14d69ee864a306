use serde::Serialize;

use crate::block::{Block, Document, Run};
use crate::config::JsonConfig;
use crate::error::Error;
use crate::inline::format_inline;

/// A block as written to JSON: its own fields, then any inline runs.
#[derive(Serialize)]
struct BlockEntry<'a> {
    #[serde(flatten)]
    block: &'a Block,
    #[serde(skip_serializing_if = "Option::is_none")]
    runs: Option<Runs>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Runs {
    Text(Vec<Run>),
    Items(Vec<Vec<Run>>),
}

/// Serialize a document as a JSON array of blocks.
///
/// With `runs`, prose blocks gain a `runs` field: a run list for headings and
/// paragraphs, one run list per item for lists.
pub fn document_to_json(doc: &Document, runs: bool, config: &JsonConfig) -> Result<String, Error> {
    let entries: Vec<BlockEntry<'_>> = doc
        .iter()
        .map(|block| BlockEntry {
            block,
            runs: if runs { block_runs(block) } else { None },
        })
        .collect();

    let out = if config.pretty {
        serde_json::to_string_pretty(&entries)?
    } else {
        serde_json::to_string(&entries)?
    };
    Ok(out)
}

fn block_runs(block: &Block) -> Option<Runs> {
    match block {
        Block::Heading { text } | Block::Paragraph { text } => {
            Some(Runs::Text(format_inline(text)))
        }
        Block::BulletList { items } | Block::NumberedList { items } => {
            let per_item = items.iter().map(|item| format_inline(item)).collect();
            Some(Runs::Items(per_item))
        }
        Block::CodeBlock { .. } | Block::HorizontalRule => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment;
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};

    fn compact() -> JsonConfig {
        JsonConfig { pretty: false }
    }

    #[test]
    fn blocks_without_runs() {
        let doc = segment("**Hi**\n---");
        assert_eq!(
            document_to_json(&doc, false, &compact()).unwrap(),
            r#"[{"type":"heading","text":"Hi"},{"type":"horizontal_rule"}]"#
        );
    }

    #[test]
    fn runs_attach_to_prose_blocks() {
        let doc = segment("Say **hi**\n\n- `a`\n- b\n\n```\n**raw**\n```");
        let value: Value =
            serde_json::from_str(&document_to_json(&doc, true, &compact()).unwrap()).unwrap();
        assert_eq!(
            value,
            json!([
                {
                    "type": "paragraph",
                    "text": "Say **hi**",
                    "runs": [
                        {"type": "plain", "text": "Say "},
                        {"type": "bold", "text": "hi"}
                    ]
                },
                {
                    "type": "bullet_list",
                    "items": ["`a`", "b"],
                    "runs": [
                        [{"type": "code", "text": "a"}],
                        [{"type": "plain", "text": "b"}]
                    ]
                },
                {"type": "code_block", "content": "**raw**"}
            ])
        );
    }

    #[test]
    fn type_tag_comes_first_and_runs_last() {
        let doc = segment("**Hi**\n\n- a\n\n```\nx\n```");
        assert_eq!(
            document_to_json(&doc, true, &compact()).unwrap(),
            concat!(
                r#"[{"type":"heading","text":"Hi","runs":[{"type":"plain","text":"Hi"}]},"#,
                r#"{"type":"bullet_list","items":["a"],"runs":[[{"type":"plain","text":"a"}]]},"#,
                r#"{"type":"code_block","content":"x"}]"#
            )
        );
    }

    #[test]
    fn empty_document_is_empty_array() {
        assert_eq!(
            document_to_json(&segment(""), true, &JsonConfig::default()).unwrap(),
            "[]"
        );
    }
}
