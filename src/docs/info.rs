//! Display metadata extraction.
//!
//! A registration can declare descriptive text in several places; these
//! functions pick the winner with a fixed fallback order so every part of the
//! help document derives its text the same way.

use crate::plugins::group::{Decl, Subgroup};

/// Display metadata extracted for one command or group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Info {
    pub name: String,
    pub help: String,
}

/// First non-blank line of a help block, trimmed.
fn first_line(text: &str) -> String {
    text.trim()
        .lines()
        .next()
        .map(str::trim)
        .unwrap_or_default()
        .to_string()
}

/// Derive display name and one-line help for a declaration.
///
/// Help sources in order, first non-empty wins: the declared short help, the
/// first line of the declared long help, the first line of the callback's
/// documentation. The name falls back from the declared name to the callback
/// identifier with underscores replaced by hyphens.
#[must_use]
pub fn extract_info(decl: &Decl) -> Info {
    let help = if let Some(short) = decl.short_help.as_deref().filter(|s| !s.is_empty()) {
        short.trim().to_string()
    } else if let Some(long) = decl.help.as_deref().filter(|s| !s.is_empty()) {
        first_line(long)
    } else if let Some(doc) = decl
        .callback
        .as_ref()
        .and_then(|cb| cb.doc.as_deref())
        .filter(|s| !s.is_empty())
    {
        first_line(doc)
    } else {
        String::new()
    };

    let name = decl
        .name
        .clone()
        .filter(|n| !n.is_empty())
        .or_else(|| {
            decl.callback
                .as_ref()
                .map(|cb| cb.ident.replace('_', "-"))
        })
        .unwrap_or_default();

    Info { name, help }
}

/// Derive display info for a subgroup registration.
///
/// The registration site and the group's own declaration are two independent
/// places descriptive text can live; when the registration carries no help,
/// the group's own help is borrowed. The name is never borrowed.
#[must_use]
pub fn extract_subgroup_info(sub: &Subgroup) -> Info {
    let mut info = extract_info(&sub.decl);
    if info.help.is_empty() {
        info.help = extract_info(&sub.group.decl).help;
    }
    info
}
