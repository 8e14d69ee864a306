use crate::block::{Block, Document, Run};
use crate::config::OutlineConfig;
use crate::inline::format_inline;

/// Write a document as an indented plain-text outline, one block per entry.
pub fn document_to_outline(doc: &Document, config: &OutlineConfig) -> String {
    let mut out = String::new();
    for block in doc {
        emit_block(block, config, &mut out);
    }
    out
}

fn emit_block(block: &Block, config: &OutlineConfig, out: &mut String) {
    let pad = " ".repeat(config.indent);

    match block {
        Block::Heading { text } | Block::Paragraph { text } => {
            out.push_str(block.kind());
            out.push_str(": ");
            out.push_str(text);
            out.push('\n');
            if config.runs {
                emit_runs(text, &pad, out);
            }
        }
        Block::CodeBlock { content } => {
            let lines: Vec<&str> = content.split('\n').collect();
            out.push_str(&format!("code_block ({} lines)\n", lines.len()));
            for line in lines {
                out.push_str(&pad);
                out.push_str(&config.code_gutter);
                out.push_str(line);
                out.push('\n');
            }
        }
        Block::BulletList { items } | Block::NumberedList { items } => {
            let ordered = matches!(block, Block::NumberedList { .. });
            out.push_str(&format!("{} ({} items)\n", block.kind(), items.len()));
            let nested = pad.repeat(2);
            for (i, item) in items.iter().enumerate() {
                out.push_str(&pad);
                if ordered {
                    out.push_str(&format!("{}. ", i + 1));
                } else {
                    out.push_str("- ");
                }
                out.push_str(item);
                out.push('\n');
                if config.runs {
                    emit_runs(item, &nested, out);
                }
            }
        }
        Block::HorizontalRule => {
            out.push_str("horizontal_rule\n");
        }
    }
}

fn emit_runs(text: &str, pad: &str, out: &mut String) {
    for run in format_inline(text) {
        let label = match run {
            Run::Plain(_) => "plain",
            Run::Bold(_) => "bold",
            Run::Code(_) => "code",
        };
        out.push_str(&format!("{pad}{label} {:?}\n", run.text()));
    }
}
