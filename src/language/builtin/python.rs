//! Python grammar

use crate::highlight::{Tag, TagKind};
use crate::language::grammar::Grammar;
use crate::language::rules::{MultilineRule, PatternRule};

/// Create the Python grammar
pub fn python_grammar() -> Grammar {
    let mut g = Grammar::new("Python");
    g.add_extension("py");
    g.add_extension("pyw");
    g.add_extension("pyi");

    // Multiline rules
    // Triple-quoted strings (docstrings), with an optional prefix
    g.add_multiline(MultilineRule::new(
        "triple_double",
        r#"(?i)\b[rbuf]{0,2}""""#,
        r#"""""#,
        TagKind::String,
        1,
    ));
    g.add_multiline(MultilineRule::new(
        "triple_single",
        r"(?i)\b[rbuf]{0,2}'''",
        r"'''",
        TagKind::String,
        2,
    ));
    // Bare triple quotes (no word boundary before them at line start)
    g.add_multiline(MultilineRule::new("triple_double_bare", r#"""""#, r#"""""#, TagKind::String, 1));
    g.add_multiline(MultilineRule::new("triple_single_bare", r"'''", r"'''", TagKind::String, 2));

    // Single-line patterns

    // Comments
    g.add_pattern(PatternRule::new("comment", r"#.*$", TagKind::LineComment, 100));

    // Strings; an unclosed quote is invalid
    g.add_pattern(PatternRule::new(
        "string_double",
        r#"(?i)(?:\b[rbuf]{1,2})?"(?:[^"\\]|\\.)*""#,
        TagKind::String,
        98,
    ));
    g.add_pattern(PatternRule::new(
        "string_single",
        r"(?i)(?:\b[rbuf]{1,2})?'(?:[^'\\]|\\.)*'",
        TagKind::String,
        98,
    ));
    g.add_pattern(PatternRule::new("unclosed_string", r#"["'].*$"#, TagKind::Invalid, 97));

    // Decorators
    g.add_pattern(PatternRule::new("decorator", r"@[A-Za-z_][\w.]*", TagKind::Meta, 95));

    // def / class names
    g.add_pattern(PatternRule::with_groups(
        "def",
        r"\b(def)\s+([A-Za-z_]\w*)",
        &[
            Tag::new(TagKind::DefinitionKeyword),
            Tag::function(TagKind::VariableName),
        ],
        90,
    ));
    g.add_pattern(PatternRule::with_groups(
        "class",
        r"\b(class)\s+([A-Za-z_]\w*)",
        &[
            Tag::new(TagKind::DefinitionKeyword),
            Tag::definition(TagKind::ClassName),
        ],
        90,
    ));

    // Keywords
    g.add_pattern(PatternRule::new(
        "control_keyword",
        r"\b(if|elif|else|for|while|try|except|finally|return|raise|break|continue|with|pass|yield|await|match|case)\b",
        TagKind::ControlKeyword,
        80,
    ));
    g.add_pattern(PatternRule::new(
        "definition_keyword",
        r"\b(def|class|lambda|global|nonlocal)\b",
        TagKind::DefinitionKeyword,
        80,
    ));
    g.add_pattern(PatternRule::new(
        "module_keyword",
        r"\b(import|from|as)\b",
        TagKind::ModuleKeyword,
        80,
    ));
    g.add_pattern(PatternRule::new(
        "operator_keyword",
        r"\b(and|or|not|in|is)\b",
        TagKind::OperatorKeyword,
        80,
    ));
    g.add_pattern(PatternRule::new("keyword", r"\b(async|del|assert)\b", TagKind::Keyword, 80));
    g.add_pattern(PatternRule::new("bool", r"\b(True|False)\b", TagKind::Bool, 80));
    g.add_pattern(PatternRule::new("none", r"\bNone\b", TagKind::Null, 80));

    // self/cls
    g.add_pattern(PatternRule::new("self", r"\b(self|cls)\b", TagKind::SelfKeyword, 77));

    // Built-in functions and types
    let builtins = r"\b(abs|all|any|ascii|bin|bool|bytearray|bytes|callable|chr|classmethod|compile|complex|delattr|dict|dir|divmod|enumerate|eval|exec|filter|float|format|frozenset|getattr|globals|hasattr|hash|help|hex|id|input|int|isinstance|issubclass|iter|len|list|locals|map|max|memoryview|min|next|object|oct|open|ord|pow|print|property|range|repr|reversed|round|set|setattr|slice|sorted|staticmethod|str|sum|super|tuple|type|vars|zip)\b";
    g.add_pattern(PatternRule::new(
        "builtin",
        builtins,
        Tag::standard(TagKind::VariableName),
        75,
    ));

    // Calls and attribute access
    g.add_pattern(PatternRule::with_groups(
        "call",
        r"\b([A-Za-z_]\w*)\s*\(",
        &[Tag::function(TagKind::VariableName)],
        70,
    ));
    g.add_pattern(PatternRule::with_groups(
        "property",
        r"\.([A-Za-z_]\w*)",
        &[Tag::new(TagKind::PropertyName)],
        70,
    ));

    // Numbers
    g.add_pattern(PatternRule::new("hex", r"\b0[xX][0-9a-fA-F_]+\b", TagKind::Integer, 65));
    g.add_pattern(PatternRule::new("binary", r"\b0[bB][01_]+\b", TagKind::Integer, 65));
    g.add_pattern(PatternRule::new("octal", r"\b0[oO][0-7_]+\b", TagKind::Integer, 65));
    g.add_pattern(PatternRule::new(
        "float",
        r"\b\d[\d_]*\.\d[\d_]*(?:[eE][+-]?\d+)?j?\b",
        TagKind::Float,
        64,
    ));
    g.add_pattern(PatternRule::new("integer", r"\b\d[\d_]*j?\b", TagKind::Integer, 63));

    // Identifiers
    g.add_pattern(PatternRule::new("identifier", r"\b[A-Za-z_]\w*\b", TagKind::VariableName, 50));

    // Operators and punctuation
    g.add_pattern(PatternRule::new("operator", r"[+\-*/%&|^!<>=@~]+", TagKind::Operator, 40));
    g.add_pattern(PatternRule::new("paren", r"[()]", TagKind::Paren, 30));
    g.add_pattern(PatternRule::new("square", r"[\[\]]", TagKind::SquareBracket, 30));
    g.add_pattern(PatternRule::new("brace", r"[{}]", TagKind::Brace, 30));
    g.add_pattern(PatternRule::new("separator", r"[,;:]", TagKind::Separator, 30));

    g
}
