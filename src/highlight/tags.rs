//! Token tags for syntax highlighting
//!
//! Grammars label each token with a [`Tag`]: a [`TagKind`] from a fixed
//! taxonomy plus an optional [`Modifier`]. Kinds form a tree (a
//! `lineComment` is a `comment`, a `variableName` is a `name`), which lets a
//! highlighter style a whole family with one rule and refine single members.

/// Base token kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagKind {
    Comment,
    LineComment,
    BlockComment,
    DocComment,

    Name,
    VariableName,
    TypeName,
    TagName,
    PropertyName,
    AttributeName,
    ClassName,
    LabelName,
    Namespace,
    MacroName,

    Literal,
    String,
    DocString,
    Character,
    AttributeValue,
    Number,
    Integer,
    Float,
    Bool,
    Regexp,
    Escape,
    Color,
    Url,

    Keyword,
    SelfKeyword,
    Null,
    Atom,
    Unit,
    Modifier,
    OperatorKeyword,
    ControlKeyword,
    DefinitionKeyword,
    ModuleKeyword,

    Operator,
    DerefOperator,
    ArithmeticOperator,
    LogicOperator,
    BitwiseOperator,
    CompareOperator,
    UpdateOperator,
    DefinitionOperator,
    TypeOperator,
    ControlOperator,

    Punctuation,
    Separator,
    Bracket,
    AngleBracket,
    SquareBracket,
    Paren,
    Brace,

    Content,
    Heading,
    Heading1,
    Heading2,
    Heading3,
    Heading4,
    Heading5,
    Heading6,
    ContentSeparator,
    List,
    Quote,
    Emphasis,
    Strong,
    Link,
    Monospace,
    Strikethrough,

    Inserted,
    Deleted,
    Changed,
    Invalid,

    Meta,
    DocumentMeta,
    Annotation,
    ProcessingInstruction,
}

impl TagKind {
    /// Parent in the taxonomy, `None` for roots
    pub fn parent(self) -> Option<TagKind> {
        use TagKind::*;
        let parent = match self {
            LineComment | BlockComment | DocComment => Comment,

            VariableName | TypeName | PropertyName | ClassName | LabelName | Namespace
            | MacroName => Name,
            TagName => TypeName,
            AttributeName => PropertyName,

            String | Number | Bool | Regexp | Escape | Color | Url | Null => Literal,
            DocString | Character | AttributeValue => String,
            Integer | Float => Number,

            SelfKeyword | Atom | Unit | Modifier | OperatorKeyword | ControlKeyword
            | DefinitionKeyword | ModuleKeyword => Keyword,

            DerefOperator | ArithmeticOperator | LogicOperator | BitwiseOperator
            | CompareOperator | UpdateOperator | DefinitionOperator | TypeOperator
            | ControlOperator => Operator,

            Separator | Bracket => Punctuation,
            AngleBracket | SquareBracket | Paren | Brace => Bracket,

            Heading | ContentSeparator | List | Quote | Emphasis | Strong | Link | Monospace
            | Strikethrough => Content,
            Heading1 | Heading2 | Heading3 | Heading4 | Heading5 | Heading6 => Heading,

            DocumentMeta | Annotation | ProcessingInstruction => Meta,

            Comment | Name | Literal | Keyword | Operator | Punctuation | Content | Inserted
            | Deleted | Changed | Invalid | Meta => return None,
        };
        Some(parent)
    }

    /// This kind followed by its ancestors
    pub fn ancestry(self) -> impl Iterator<Item = TagKind> {
        std::iter::successors(Some(self), |kind| kind.parent())
    }

    pub fn is_a(self, other: TagKind) -> bool {
        self.ancestry().any(|kind| kind == other)
    }
}

/// Refinements applied on top of a kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modifier {
    Definition,
    Constant,
    Function,
    Standard,
    Local,
    Special,
}

/// A token tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tag {
    pub kind: TagKind,
    pub modifier: Option<Modifier>,
}

impl Tag {
    pub const fn new(kind: TagKind) -> Self {
        Self {
            kind,
            modifier: None,
        }
    }

    pub const fn modified(kind: TagKind, modifier: Modifier) -> Self {
        Self {
            kind,
            modifier: Some(modifier),
        }
    }

    pub const fn definition(kind: TagKind) -> Self {
        Self::modified(kind, Modifier::Definition)
    }

    pub const fn constant(kind: TagKind) -> Self {
        Self::modified(kind, Modifier::Constant)
    }

    pub const fn function(kind: TagKind) -> Self {
        Self::modified(kind, Modifier::Function)
    }

    pub const fn standard(kind: TagKind) -> Self {
        Self::modified(kind, Modifier::Standard)
    }

    pub const fn local(kind: TagKind) -> Self {
        Self::modified(kind, Modifier::Local)
    }

    pub const fn special(kind: TagKind) -> Self {
        Self::modified(kind, Modifier::Special)
    }

    /// Tags to try when looking up a style for this one, most specific first.
    ///
    /// For `function(variableName)` this is `function(variableName)`,
    /// `variableName`, `function(name)`, `name`.
    pub fn fallbacks(&self) -> Vec<Tag> {
        let mut chain = Vec::new();
        for kind in self.kind.ancestry() {
            if let Some(modifier) = self.modifier {
                chain.push(Tag::modified(kind, modifier));
            }
            chain.push(Tag::new(kind));
        }
        chain
    }
}

impl From<TagKind> for Tag {
    fn from(kind: TagKind) -> Self {
        Tag::new(kind)
    }
}
