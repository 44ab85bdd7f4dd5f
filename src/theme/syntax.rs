//! Token style table built from a palette

use super::palette::{ColorRole, Palette};
use crate::error::Result;
use crate::highlight::{HighlightStyle, Tag, TagKind, TokenStyle};

/// Map the token taxonomy onto palette colors
pub fn build_token_style(palette: &Palette) -> Result<HighlightStyle> {
    use TagKind::*;

    let fg = |role: ColorRole| palette.color(role).map(TokenStyle::fg);
    let t = Tag::new;

    let keyword = fg(ColorRole::Keyword)?;
    let variable = fg(ColorRole::Variable)?;
    let function = fg(ColorRole::Function)?;
    let string = fg(ColorRole::String)?;
    let constant = fg(ColorRole::Constant)?;
    let class = fg(ColorRole::Class)?;
    let number = fg(ColorRole::Number)?;
    let type_ = fg(ColorRole::Type)?;
    let regexp = fg(ColorRole::Regexp)?;
    let comment = fg(ColorRole::Comment)?;
    let heading = fg(ColorRole::Heading)?.with_bold();
    let invalid = fg(ColorRole::Invalid)?;

    Ok(HighlightStyle::new()
        .rule([t(Keyword)], keyword)
        .rule([t(Name), t(Deleted), t(Character), t(MacroName)], variable)
        .rule([t(PropertyName)], function)
        .rule(
            [t(ProcessingInstruction), t(String), t(Inserted), Tag::special(String)],
            string,
        )
        .rule([Tag::function(VariableName), t(LabelName)], function)
        .rule(
            [t(Color), Tag::constant(Name), Tag::standard(Name)],
            constant,
        )
        .rule([Tag::definition(Name), t(Separator)], variable)
        .rule([t(ClassName)], class)
        .rule(
            [t(Number), t(Changed), t(Annotation), t(Modifier), t(SelfKeyword), t(Namespace)],
            number,
        )
        .rule([t(TypeName)], type_)
        .rule([t(Operator), t(OperatorKeyword)], keyword)
        .rule([t(Url), t(Escape), t(Regexp), t(Link)], regexp)
        .rule([t(Meta), t(Comment)], comment)
        .rule([t(Strong)], TokenStyle::default().with_bold())
        .rule([t(Emphasis)], TokenStyle::default().with_italic())
        .rule([t(Link)], TokenStyle::default().with_underline())
        .rule([t(Heading)], heading)
        .rule([t(Atom), t(Bool), Tag::special(VariableName)], variable)
        .rule([t(Invalid)], invalid)
        .rule([t(Strikethrough)], TokenStyle::default().with_strikethrough()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::Color;

    fn dracula() -> HighlightStyle {
        build_token_style(&Palette::dracula()).unwrap()
    }

    fn color_of(style: &HighlightStyle, tag: Tag) -> Option<Color> {
        style.style_for(tag).and_then(|s| s.color)
    }

    #[test]
    fn keyword_and_string_are_separate_roles() {
        let style = dracula();
        let keyword = color_of(&style, Tag::new(TagKind::Keyword)).unwrap();
        let string = color_of(&style, Tag::new(TagKind::String)).unwrap();
        assert_eq!(keyword, Color::from_hex("#FF79C6").unwrap());
        assert_eq!(string, Color::from_hex("#F1FA8C").unwrap());
        assert_ne!(keyword, string);
    }

    #[test]
    fn keyword_family_inherits() {
        let style = dracula();
        let control = color_of(&style, Tag::new(TagKind::ControlKeyword));
        assert_eq!(control, Color::from_hex("#FF79C6"));
        // Explicit entry beats the keyword parent
        let self_kw = color_of(&style, Tag::new(TagKind::SelfKeyword));
        assert_eq!(self_kw, Color::from_hex("#BD93F9"));
    }

    #[test]
    fn function_names_refine_variables() {
        let style = dracula();
        assert_eq!(
            color_of(&style, Tag::function(TagKind::VariableName)),
            Color::from_hex("#50FA7B")
        );
        assert_eq!(
            color_of(&style, Tag::new(TagKind::VariableName)),
            Color::from_hex("#F8F8F2")
        );
        assert_eq!(
            color_of(&style, Tag::definition(TagKind::VariableName)),
            Color::from_hex("#F8F8F2")
        );
    }

    #[test]
    fn markup_styles() {
        let style = dracula();
        let heading = style.style_for(Tag::new(TagKind::Heading1)).unwrap();
        assert!(heading.bold);
        assert_eq!(heading.color, Color::from_hex("#BD93F9"));

        assert!(style.style_for(Tag::new(TagKind::Emphasis)).unwrap().italic);
        assert!(style.style_for(Tag::new(TagKind::Strikethrough)).unwrap().strikethrough);

        let link = style.style_for(Tag::new(TagKind::Link)).unwrap();
        assert!(link.underline);
        assert_eq!(link.color, Color::from_hex("#F1FA8C"));
    }

    #[test]
    fn invalid_uses_alarm_color() {
        let style = dracula();
        assert_eq!(
            color_of(&style, Tag::new(TagKind::Invalid)),
            Color::from_hex("#FF5555")
        );
    }

    #[test]
    fn comments_and_numbers() {
        let style = dracula();
        assert_eq!(
            color_of(&style, Tag::new(TagKind::LineComment)),
            Color::from_hex("#909cc3")
        );
        assert_eq!(
            color_of(&style, Tag::new(TagKind::Float)),
            Color::from_hex("#BD93F9")
        );
        assert_eq!(
            color_of(&style, Tag::new(TagKind::ClassName)),
            Color::from_hex("#8BE9FD")
        );
    }

    #[test]
    fn missing_role_fails() {
        let mut palette = Palette::dracula();
        palette.remove(ColorRole::Regexp);
        assert!(build_token_style(&palette).is_err());
    }
}
