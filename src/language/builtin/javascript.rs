//! JavaScript grammar

use crate::highlight::{Tag, TagKind};
use crate::language::grammar::Grammar;
use crate::language::rules::{MultilineRule, PatternRule};

/// Create the JavaScript grammar (also used for JSX-free TypeScript-less .mjs/.cjs)
pub fn javascript_grammar() -> Grammar {
    let mut g = Grammar::new("JavaScript");
    g.add_extension("js");
    g.add_extension("mjs");
    g.add_extension("cjs");

    // Multiline rules
    g.add_multiline(MultilineRule::new(
        "doc_comment",
        r"/\*\*",
        r"\*/",
        TagKind::DocComment,
        1,
    ));
    g.add_multiline(MultilineRule::new(
        "block_comment",
        r"/\*",
        r"\*/",
        TagKind::BlockComment,
        2,
    ));
    g.add_multiline(MultilineRule::with_escape(
        "template",
        "`",
        "`",
        Tag::special(TagKind::String),
        3,
        '\\',
    ));

    // Single-line patterns

    // Line comments
    g.add_pattern(PatternRule::new("line_comment", r"//.*$", TagKind::LineComment, 100));

    // Strings; an unclosed quote is invalid
    g.add_pattern(PatternRule::new(
        "string_double",
        r#""(?:[^"\\]|\\.)*""#,
        TagKind::String,
        98,
    ));
    g.add_pattern(PatternRule::new(
        "string_single",
        r"'(?:[^'\\]|\\.)*'",
        TagKind::String,
        98,
    ));
    g.add_pattern(PatternRule::new("unclosed_string", r#"["'].*$"#, TagKind::Invalid, 97));

    // Regex literals, only where an expression can start
    g.add_pattern(PatternRule::with_groups(
        "regexp",
        r"(?:^|[=(,:!&|?{};\[])\s*(/(?:[^/\\\[\s]|\\.|\[(?:[^\]\\]|\\.)*\])(?:[^/\\\[]|\\.|\[(?:[^\]\\]|\\.)*\])*/[dgimsuvy]*)",
        &[Tag::new(TagKind::Regexp)],
        96,
    ));

    // function / class names
    g.add_pattern(PatternRule::with_groups(
        "function_def",
        r"\b(function)\s*\*?\s*([A-Za-z_$][\w$]*)",
        &[
            Tag::new(TagKind::DefinitionKeyword),
            Tag::function(TagKind::VariableName),
        ],
        90,
    ));
    g.add_pattern(PatternRule::with_groups(
        "class_def",
        r"\b(class)\s+([A-Za-z_$][\w$]*)",
        &[
            Tag::new(TagKind::DefinitionKeyword),
            Tag::definition(TagKind::ClassName),
        ],
        90,
    ));
    g.add_pattern(PatternRule::with_groups(
        "new_class",
        r"\b(new)\s+([A-Z][\w$]*)",
        &[Tag::new(TagKind::OperatorKeyword), Tag::new(TagKind::ClassName)],
        90,
    ));
    g.add_pattern(PatternRule::with_groups(
        "declaration",
        r"\b(const|let|var)\s+([A-Za-z_$][\w$]*)",
        &[
            Tag::new(TagKind::DefinitionKeyword),
            Tag::definition(TagKind::VariableName),
        ],
        88,
    ));

    // Keywords
    g.add_pattern(PatternRule::new(
        "control_keyword",
        r"\b(if|else|for|while|do|switch|case|default|break|continue|return|throw|try|catch|finally|await|yield)\b",
        TagKind::ControlKeyword,
        80,
    ));
    g.add_pattern(PatternRule::new(
        "definition_keyword",
        r"\b(var|let|const|function|class|extends|get|set|static|async)\b",
        TagKind::DefinitionKeyword,
        80,
    ));
    g.add_pattern(PatternRule::new(
        "module_keyword",
        r"\b(import|export|from|as)\b",
        TagKind::ModuleKeyword,
        80,
    ));
    g.add_pattern(PatternRule::new(
        "operator_keyword",
        r"\b(typeof|instanceof|in|of|new|delete|void)\b",
        TagKind::OperatorKeyword,
        80,
    ));
    g.add_pattern(PatternRule::new("self", r"\b(this|super)\b", TagKind::SelfKeyword, 80));
    g.add_pattern(PatternRule::new("bool", r"\b(true|false)\b", TagKind::Bool, 80));
    g.add_pattern(PatternRule::new("null", r"\b(null|undefined)\b", TagKind::Null, 80));

    // Well-known globals
    g.add_pattern(PatternRule::new(
        "global",
        r"\b(console|window|document|globalThis|Math|JSON|Object|Array|Promise|Number|String|Boolean|Symbol|Error|Map|Set|RegExp|Date)\b",
        Tag::standard(TagKind::VariableName),
        75,
    ));

    // Calls and property access
    g.add_pattern(PatternRule::with_groups(
        "call",
        r"([A-Za-z_$][\w$]*)\s*\(",
        &[Tag::function(TagKind::VariableName)],
        70,
    ));
    g.add_pattern(PatternRule::with_groups(
        "property",
        r"\??\.([A-Za-z_$][\w$]*)",
        &[Tag::new(TagKind::PropertyName)],
        70,
    ));

    // Numbers
    g.add_pattern(PatternRule::new("hex", r"\b0[xX][0-9a-fA-F_]+n?\b", TagKind::Integer, 65));
    g.add_pattern(PatternRule::new("binary", r"\b0[bB][01_]+n?\b", TagKind::Integer, 65));
    g.add_pattern(PatternRule::new("octal", r"\b0[oO][0-7_]+n?\b", TagKind::Integer, 65));
    g.add_pattern(PatternRule::new(
        "float",
        r"\b\d[\d_]*\.\d[\d_]*(?:[eE][+-]?\d+)?\b",
        TagKind::Float,
        64,
    ));
    g.add_pattern(PatternRule::new("integer", r"\b\d[\d_]*n?\b", TagKind::Integer, 63));

    // Identifiers
    g.add_pattern(PatternRule::new(
        "identifier",
        r"[A-Za-z_$][\w$]*",
        TagKind::VariableName,
        50,
    ));

    // Operators and punctuation
    g.add_pattern(PatternRule::new("arrow", r"=>", TagKind::Punctuation, 45));
    g.add_pattern(PatternRule::new("operator", r"[+\-*/%&|^!<>=~?:]+", TagKind::Operator, 40));
    g.add_pattern(PatternRule::new("paren", r"[()]", TagKind::Paren, 30));
    g.add_pattern(PatternRule::new("square", r"[\[\]]", TagKind::SquareBracket, 30));
    g.add_pattern(PatternRule::new("brace", r"[{}]", TagKind::Brace, 30));
    g.add_pattern(PatternRule::new("separator", r"[,;.]", TagKind::Separator, 30));

    g
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highlight::TokenSpan;
    use crate::language::rules::LineState;

    fn tag_of(line: &str, text: &str) -> Option<Tag> {
        let g = javascript_grammar();
        g.highlight_line(line, LineState::default())
            .tokens
            .into_iter()
            .find(|t: &TokenSpan| &line[t.start..t.end] == text)
            .map(|t| t.tag)
    }

    #[test]
    fn test_declarations() {
        let line = "const total = add(1, 2.5);";
        assert_eq!(tag_of(line, "const"), Some(Tag::new(TagKind::DefinitionKeyword)));
        assert_eq!(tag_of(line, "total"), Some(Tag::definition(TagKind::VariableName)));
        assert_eq!(tag_of(line, "add"), Some(Tag::function(TagKind::VariableName)));
        assert_eq!(tag_of(line, "1"), Some(Tag::new(TagKind::Integer)));
        assert_eq!(tag_of(line, "2.5"), Some(Tag::new(TagKind::Float)));
    }

    #[test]
    fn test_function_and_class() {
        assert_eq!(
            tag_of("function render(el) {", "render"),
            Some(Tag::function(TagKind::VariableName))
        );
        assert_eq!(
            tag_of("class View extends Base {", "View"),
            Some(Tag::definition(TagKind::ClassName))
        );
        assert_eq!(tag_of("const v = new View();", "View"), Some(Tag::new(TagKind::ClassName)));
    }

    #[test]
    fn test_regex_literal() {
        assert_eq!(tag_of("const re = /a\\/b/gi;", "/a\\/b/gi"), Some(Tag::new(TagKind::Regexp)));
        // Division is not a regex
        assert_eq!(tag_of("x = a / b / c", "/ b /"), None);
    }

    #[test]
    fn test_template_literal_spans_lines() {
        let g = javascript_grammar();
        let tokens = g.highlight_lines(["let s = `one", "two` + 1"]);
        assert_eq!(tokens[1][0], TokenSpan::new(0, 4, Tag::special(TagKind::String)));
    }

    #[test]
    fn test_comments() {
        assert_eq!(tag_of("x(); // hi", "// hi"), Some(Tag::new(TagKind::LineComment)));
        assert_eq!(tag_of("/** doc */", "/** doc */"), Some(Tag::new(TagKind::DocComment)));
        assert_eq!(tag_of("/* c */", "/* c */"), Some(Tag::new(TagKind::BlockComment)));
    }

    #[test]
    fn test_literals() {
        let line = "if (this.ok === true) return null;";
        assert_eq!(tag_of(line, "this"), Some(Tag::new(TagKind::SelfKeyword)));
        assert_eq!(tag_of(line, "ok"), Some(Tag::new(TagKind::PropertyName)));
        assert_eq!(tag_of(line, "true"), Some(Tag::new(TagKind::Bool)));
        assert_eq!(tag_of(line, "null"), Some(Tag::new(TagKind::Null)));
        assert_eq!(tag_of("s = \"open", "\"open"), Some(Tag::new(TagKind::Invalid)));
    }
}
