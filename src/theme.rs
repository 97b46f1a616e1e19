//! ANSI styling for rendered help blocks.
//!
//! The rendering pipeline only classifies blocks by emphasis; this module is
//! the presentation layer that maps each class to a concrete style and writes
//! the final lines.

use std::io;
use std::io::Write;

use anstyle::{AnsiColor, Style};

use crate::docs::render::{Emphasis, NAME_WIDTH, RenderBlock};

/// Root line, name and help alike.
pub const APP: Style = AnsiColor::Yellow.on_default().bold();
/// Nested group name.
pub const GROUP_NAME: Style = AnsiColor::Cyan.on_default().bold();
/// Nested group help.
pub const GROUP_HELP: Style = AnsiColor::Cyan.on_default();
/// Command name; command help stays unstyled.
pub const COMMAND_NAME: Style = Style::new().bold();

/// Styles for a block's name and help columns.
#[must_use]
pub fn emphasis_styles(emphasis: Emphasis) -> (Style, Style) {
    match emphasis {
        Emphasis::App => (APP, APP),
        Emphasis::Group => (GROUP_NAME, GROUP_HELP),
        Emphasis::Command => (COMMAND_NAME, Style::new()),
    }
}

/// Write rendered blocks as lines, one per block, realizing indentation as
/// spaces. With `styled` off the output is plain text.
///
/// # Errors
///
/// Returns any error from the underlying writer.
pub fn write_blocks(out: &mut impl Write, blocks: &[RenderBlock], styled: bool) -> io::Result<()> {
    for block in blocks {
        let pad = " ".repeat(block.indent);
        if styled {
            let (name_style, help_style) = emphasis_styles(block.emphasis);
            let name = format!("{:<width$}", block.name, width = NAME_WIDTH);
            writeln!(
                out,
                "{pad}{}{name}{}{}{}{}",
                name_style.render(),
                name_style.render_reset(),
                help_style.render(),
                block.help,
                help_style.render_reset()
            )?;
        } else {
            writeln!(out, "{pad}{}", block.text())?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(name: &str, help: &str, indent: usize, emphasis: Emphasis) -> RenderBlock {
        RenderBlock {
            name: name.to_string(),
            help: help.to_string(),
            indent,
            emphasis,
        }
    }

    #[test]
    fn test_plain_output() {
        let blocks = vec![
            block("root", "Root help", 0, Emphasis::App),
            block("greet", "Say hi", 2, Emphasis::Command),
        ];
        let mut out = Vec::new();
        write_blocks(&mut out, &blocks, false).unwrap();

        let text = String::from_utf8(out).unwrap();
        let expected = format!("{:<20}Root help\n  {:<20}Say hi\n", "root", "greet");
        assert_eq!(text, expected);
    }

    #[test]
    fn test_styled_output_emits_escapes() {
        let blocks = vec![block("root", "Root help", 0, Emphasis::App)];
        let mut out = Vec::new();
        write_blocks(&mut out, &blocks, true).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("\x1b["));
        assert!(text.contains("root"));
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn test_command_help_is_unstyled() {
        let (name_style, help_style) = emphasis_styles(Emphasis::Command);
        assert_ne!(name_style, Style::new());
        assert_eq!(help_style, Style::new());
    }
}
