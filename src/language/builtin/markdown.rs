//! Markdown grammar

use crate::highlight::{Tag, TagKind};
use crate::language::grammar::Grammar;
use crate::language::rules::{MultilineRule, PatternRule};

const HEADINGS: [TagKind; 6] = [
    TagKind::Heading1,
    TagKind::Heading2,
    TagKind::Heading3,
    TagKind::Heading4,
    TagKind::Heading5,
    TagKind::Heading6,
];

/// Create the Markdown grammar
pub fn markdown_grammar() -> Grammar {
    let mut g = Grammar::new("Markdown");
    g.add_extension("md");
    g.add_extension("markdown");
    g.add_extension("mkd");

    // Multiline rules
    // Fenced code blocks
    g.add_multiline(MultilineRule::new("code_fence", r"^\s{0,3}```", r"^\s{0,3}```", TagKind::Monospace, 1));
    g.add_multiline(MultilineRule::new("tilde_fence", r"^\s{0,3}~~~", r"^\s{0,3}~~~", TagKind::Monospace, 2));
    // HTML comments
    g.add_multiline(MultilineRule::new("html_comment", r"<!--", r"-->", TagKind::BlockComment, 3));

    // Single-line patterns

    // ATX headings, one rule per level
    for (level, kind) in HEADINGS.iter().enumerate() {
        let pattern = format!(r"^\s{{0,3}}#{{{}}}(?:\s.*)?$", level + 1);
        g.add_pattern(PatternRule::new(&format!("heading{}", level + 1), &pattern, *kind, 100));
    }

    // Inline code
    g.add_pattern(PatternRule::new("inline_code", r"`[^`]+`", TagKind::Monospace, 92));

    // Images and links: the label is link text, the target is a URL
    g.add_pattern(PatternRule::with_groups(
        "image",
        r"(!\[[^\]]*\])\(([^)\s]+)(?:\s+[^)]*)?\)",
        &[Tag::new(TagKind::Link), Tag::new(TagKind::Url)],
        91,
    ));
    g.add_pattern(PatternRule::with_groups(
        "link",
        r"(\[[^\]]+\])\(([^)\s]+)(?:\s+[^)]*)?\)",
        &[Tag::new(TagKind::Link), Tag::new(TagKind::Url)],
        90,
    ));
    g.add_pattern(PatternRule::new("ref_link", r"\[[^\]]+\]\[[^\]]*\]", TagKind::Link, 89));
    g.add_pattern(PatternRule::new("autolink", r"<(?:https?|mailto|ftp):[^>\s]+>", TagKind::Url, 89));

    // Strong, emphasis, strikethrough
    g.add_pattern(PatternRule::new("strong", r"\*\*[^*]+\*\*", TagKind::Strong, 85));
    g.add_pattern(PatternRule::new("strong2", r"\b__[^_]+__\b", TagKind::Strong, 85));
    g.add_pattern(PatternRule::new("emphasis", r"\*[^*\s][^*]*\*", TagKind::Emphasis, 84));
    g.add_pattern(PatternRule::new("emphasis2", r"\b_[^_\s][^_]*_\b", TagKind::Emphasis, 84));
    g.add_pattern(PatternRule::new("strikethrough", r"~~[^~]+~~", TagKind::Strikethrough, 84));

    // Blockquotes
    g.add_pattern(PatternRule::new("blockquote", r"^\s{0,3}>.*$", TagKind::Quote, 80));

    // Horizontal rules (before list items so "* * *" is a rule)
    g.add_pattern(PatternRule::new(
        "hr",
        r"^\s{0,3}(?:(?:-\s*){3,}|(?:\*\s*){3,}|(?:_\s*){3,})$",
        TagKind::ContentSeparator,
        79,
    ));

    // List markers
    g.add_pattern(PatternRule::new("list", r"^\s*[-*+]\s", TagKind::List, 75));
    g.add_pattern(PatternRule::new("numbered_list", r"^\s*\d+[.)]\s", TagKind::List, 75));

    // Escapes
    g.add_pattern(PatternRule::new("escape", r"\\[\\`*_{}\[\]()#+\-.!~>]", TagKind::Escape, 70));

    g
}
