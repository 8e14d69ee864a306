mod block;
mod cache;
mod config;
mod error;
mod inline;
mod json;
mod outline;
mod parser;

pub use block::{Block, Document, Run};
pub use cache::DocumentCache;
pub use config::{Config, Format, JsonConfig, OutlineConfig, OutputConfig};
pub use error::Error;
pub use inline::format_inline;
pub use json::document_to_json;
pub use outline::document_to_outline;

/// Segment lesson text into a document of blocks.
pub fn segment(text: &str) -> Document {
    parser::segment(text)
}

/// Convert lesson text to an outline using default config.
pub fn lesson_to_outline(text: &str) -> String {
    lesson_to_outline_with_config(text, &Config::default())
}

/// Convert lesson text to an outline with custom config.
pub fn lesson_to_outline_with_config(text: &str, config: &Config) -> String {
    let doc = segment(text);
    document_to_outline(&doc, &config.outline())
}

/// Convert lesson text to JSON using default config.
pub fn lesson_to_json(text: &str) -> Result<String, Error> {
    lesson_to_json_with_config(text, &Config::default())
}

/// Convert lesson text to JSON with custom config.
pub fn lesson_to_json_with_config(text: &str, config: &Config) -> Result<String, Error> {
    let doc = segment(text);
    document_to_json(&doc, config.output.runs, &config.json)
}

/// Render an already segmented document in the configured output format.
pub fn render(doc: &Document, config: &Config) -> Result<String, Error> {
    match config.output.format {
        Format::Outline => Ok(document_to_outline(doc, &config.outline())),
        Format::Json => document_to_json(doc, config.output.runs, &config.json),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn outline_with_default_config() {
        assert_eq!(
            lesson_to_outline("**Goal**\n---"),
            "heading: Goal\n  plain \"Goal\"\nhorizontal_rule\n"
        );
    }

    #[test]
    fn json_with_default_config_is_pretty() {
        let json = lesson_to_json("Hi").unwrap();
        assert!(json.contains('\n'));
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["runs"][0]["text"], "Hi");
    }

    #[test]
    fn render_follows_configured_format() {
        let doc = segment("- a");
        let mut config = Config::default();
        config.output.runs = false;
        assert_eq!(render(&doc, &config).unwrap(), "bullet_list (1 items)\n  - a\n");

        config.output.format = Format::Json;
        config.json.pretty = false;
        assert_eq!(
            render(&doc, &config).unwrap(),
            r#"[{"type":"bullet_list","items":["a"]}]"#
        );
        assert_eq!(
            lesson_to_json_with_config("- a", &config).unwrap(),
            render(&doc, &config).unwrap()
        );
    }
}
