use serde::Serialize;

/// Inline formatting run within a block's prose text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "text", rename_all = "snake_case")]
pub enum Run {
    Plain(String),
    Bold(String),
    Code(String),
}

impl Run {
    /// The text of the run with its markers already stripped.
    pub fn text(&self) -> &str {
        match self {
            Run::Plain(text) | Run::Bold(text) | Run::Code(text) => text,
        }
    }
}

/// Block-level elements segmented from lesson text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Heading { text: String },
    Paragraph { text: String },
    CodeBlock { content: String },
    BulletList { items: Vec<String> },
    NumberedList { items: Vec<String> },
    HorizontalRule,
}

impl Block {
    /// Stable snake_case name of the variant, matching the JSON `type` tag.
    pub fn kind(&self) -> &'static str {
        match self {
            Block::Heading { .. } => "heading",
            Block::Paragraph { .. } => "paragraph",
            Block::CodeBlock { .. } => "code_block",
            Block::BulletList { .. } => "bullet_list",
            Block::NumberedList { .. } => "numbered_list",
            Block::HorizontalRule => "horizontal_rule",
        }
    }

    /// Text meant for inline formatting: heading and paragraph text, or each
    /// list item. Code blocks and rules carry no prose.
    pub fn prose(&self) -> Vec<&str> {
        match self {
            Block::Heading { text } | Block::Paragraph { text } => vec![text.as_str()],
            Block::BulletList { items } | Block::NumberedList { items } => {
                items.iter().map(String::as_str).collect()
            }
            Block::CodeBlock { .. } | Block::HorizontalRule => Vec::new(),
        }
    }
}

/// Ordered sequence of blocks, in source line order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Document(Vec<Block>);

impl Document {
    pub fn new(blocks: Vec<Block>) -> Self {
        Self(blocks)
    }

    pub fn blocks(&self) -> &[Block] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Block> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl IntoIterator for Document {
    type Item = Block;
    type IntoIter = std::vec::IntoIter<Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = &'a Block;
    type IntoIter = std::slice::Iter<'a, Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn prose_of_each_kind() {
        let heading = Block::Heading {
            text: "Intro".to_string(),
        };
        assert_eq!(heading.prose(), vec!["Intro"]);

        let list = Block::NumberedList {
            items: vec!["one".to_string(), "two".to_string()],
        };
        assert_eq!(list.prose(), vec!["one", "two"]);

        let code = Block::CodeBlock {
            content: "**not bold**".to_string(),
        };
        assert!(code.prose().is_empty());
        assert!(Block::HorizontalRule.prose().is_empty());
    }

    #[test]
    fn json_shape() {
        let doc = Document::new(vec![
            Block::Heading {
                text: "Title".to_string(),
            },
            Block::BulletList {
                items: vec!["a".to_string()],
            },
            Block::HorizontalRule,
        ]);
        assert_eq!(
            serde_json::to_string(&doc).unwrap(),
            r#"[{"type":"heading","text":"Title"},{"type":"bullet_list","items":["a"]},{"type":"horizontal_rule"}]"#
        );
        assert_eq!(
            serde_json::to_string(&Run::Code("x".to_string())).unwrap(),
            r#"{"type":"code","text":"x"}"#
        );
    }

    #[test]
    fn kind_matches_json_tag() {
        let block = Block::CodeBlock {
            content: "x".to_string(),
        };
        let value = serde_json::to_value(&block).unwrap();
        assert_eq!(value["type"], block.kind());
    }
}
