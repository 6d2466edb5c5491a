//! Tokenizes one physical line of IDD or IDF text.
//!
//! Both formats share the same line grammar: zero or more values, each
//! closed by `,` or `;`, followed by at most one trailer. The trailer is a
//! comment (`!` general, `!-` special) or, in an IDD only, a backslash tag
//! that runs to the end of the line. IDF values may contain backslashes
//! (Windows paths in `Schedule:File`), so tags are never recognized there.

use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{tag, take_till, take_till1},
    character::complete::{char, one_of, space0},
    combinator::{map, rest},
    sequence::preceded,
};

type Result<'a, O> = IResult<&'a str, O>;

/// Which of the two text formats a line belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Syntax {
    /// Input Data Dictionary: values, tags and comments
    Idd,
    /// Input Data File: values and comments
    Idf,
}

impl Syntax {
    const fn stops_at(self, c: char) -> bool {
        match self {
            Self::Idd => matches!(c, ',' | ';' | '!' | '\\'),
            Self::Idf => matches!(c, ',' | ';' | '!'),
        }
    }
}

/// One value and whether it closed the object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Value<'a> {
    pub text: &'a str,
    pub last: bool,
}

/// A backslash tag. `value` is `None` for a flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tag<'a> {
    pub keyword: &'a str,
    pub value: Option<&'a str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comment<'a> {
    /// Text after `!`
    General(&'a str),
    /// Text after `!-`
    Special(&'a str),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Line<'a> {
    pub values: Vec<Value<'a>>,
    pub tag: Option<Tag<'a>>,
    pub comment: Option<Comment<'a>>,
}

impl Line<'_> {
    /// Returns whether the line holds only a comment.
    pub fn is_comment_only(&self) -> bool {
        self.values.is_empty() && self.tag.is_none() && self.comment.is_some()
    }
}

/// Splits a line into values, tag and comment.
///
/// Text left over before the trailer without a separator counts as a value
/// that leaves its object open.
pub fn tokenize(line: &str, syntax: Syntax) -> Line<'_> {
    let line = line.trim_end_matches(['\r', '\n']);
    let mut values = Vec::new();
    let mut input = line;

    while let Ok((rest, parsed)) = value(input, syntax) {
        values.push(parsed);
        input = rest;
    }

    let (input, trailing) = unterminated_value(input, syntax);
    if let Some(text) = trailing {
        values.push(Value { text, last: false });
    }

    let mut tokens = Line {
        values,
        ..Line::default()
    };
    if let Ok((_, comment)) = comment(input) {
        tokens.comment = Some(comment);
    } else if syntax == Syntax::Idd {
        tokens.tag = tag_token(input).ok().map(|(_, parsed)| parsed);
    }
    tokens
}

fn value(input: &str, syntax: Syntax) -> Result<'_, Value<'_>> {
    let (rest, (text, separator)) = (
        take_till(move |c: char| syntax.stops_at(c)),
        one_of(",;"),
    )
        .parse(input)?;

    Ok((
        rest,
        Value {
            text: text.trim(),
            last: separator == ';',
        },
    ))
}

fn unterminated_value(input: &str, syntax: Syntax) -> (&str, Option<&str>) {
    let parsed: Result<'_, &str> = preceded(space0, take_till1(move |c: char| syntax.stops_at(c))).parse(input);
    match parsed {
        Ok((rest, text)) if !text.trim().is_empty() => (rest, Some(text.trim())),
        Ok(_) | Err(_) => (input.trim_start(), None),
    }
}

fn comment(input: &str) -> Result<'_, Comment<'_>> {
    preceded(
        space0,
        alt((
            map(preceded(tag("!-"), rest), Comment::Special),
            map(preceded(char('!'), rest), Comment::General),
        )),
    )
    .parse(input)
}

fn tag_token(input: &str) -> Result<'_, Tag<'_>> {
    let (rest, keyword) = preceded(
        (space0, char('\\')),
        take_till1(|c: char| c.is_whitespace()),
    )
    .parse(input)?;

    // `\extensible:3 - repeat the last three fields` carries its value in
    // the keyword.
    if let Some((name, size)) = keyword.split_once(':') {
        let digits = size.trim_end_matches(|c: char| !c.is_ascii_digit());
        let value = (!digits.is_empty()).then_some(digits);
        return Ok(("", Tag { keyword: name, value }));
    }

    let value = rest.trim();
    Ok((
        "",
        Tag {
            keyword,
            value: (!value.is_empty()).then_some(value),
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts<'a>(line: &Line<'a>) -> Vec<&'a str> {
        line.values.iter().map(|value| value.text).collect()
    }

    #[test]
    fn values_with_inline_comment() {
        let line = tokenize("  Yes,  !- Do Zone Sizing", Syntax::Idf);
        assert_eq!(texts(&line), ["Yes"]);
        assert!(!line.values[0].last);
        assert_eq!(line.comment, Some(Comment::Special(" Do Zone Sizing")));
    }

    #[test]
    fn several_objects_on_one_line() {
        let line = tokenize("Version,8.1;Timestep,4;\r\n", Syntax::Idf);
        assert_eq!(texts(&line), ["Version", "8.1", "Timestep", "4"]);
        let closes: Vec<bool> = line.values.iter().map(|value| value.last).collect();
        assert_eq!(closes, [false, true, false, true]);
        assert!(line.comment.is_none());
    }

    #[test]
    fn blank_values_are_kept() {
        let line = tokenize("  ,  ,;", Syntax::Idf);
        assert_eq!(texts(&line), ["", "", ""]);
    }

    #[test]
    fn idf_values_keep_backslashes() {
        let line = tokenize(r"  C:\weather\file.csv;  !- File Name", Syntax::Idf);
        assert_eq!(texts(&line), [r"C:\weather\file.csv"]);
        assert!(line.tag.is_none());
    }

    #[test]
    fn idd_field_with_tag() {
        let line = tokenize(r"  A1 , \field Name", Syntax::Idd);
        assert_eq!(texts(&line), ["A1"]);
        assert_eq!(
            line.tag,
            Some(Tag {
                keyword: "field",
                value: Some("Name")
            })
        );
    }

    #[test]
    fn idd_flags_and_bounds() {
        let line = tokenize(r"      \required-field", Syntax::Idd);
        assert_eq!(
            line.tag,
            Some(Tag {
                keyword: "required-field",
                value: None
            })
        );

        let line = tokenize(r"      \minimum> 0.0", Syntax::Idd);
        assert_eq!(
            line.tag,
            Some(Tag {
                keyword: "minimum>",
                value: Some("0.0")
            })
        );
    }

    #[test]
    fn idd_extensible_size_comes_from_keyword() {
        let line = tokenize(r"      \extensible:3 - repeat last three fields", Syntax::Idd);
        assert_eq!(
            line.tag,
            Some(Tag {
                keyword: "extensible",
                value: Some("3")
            })
        );
    }

    #[test]
    fn comment_lines() {
        let line = tokenize("!IDD_Version 8.1.0.009", Syntax::Idd);
        assert!(line.is_comment_only());
        assert_eq!(line.comment, Some(Comment::General("IDD_Version 8.1.0.009")));

        let line = tokenize("!-Option SortedOrder", Syntax::Idf);
        assert_eq!(line.comment, Some(Comment::Special("Option SortedOrder")));
    }

    #[test]
    fn unterminated_text_leaves_object_open() {
        let line = tokenize("  Lead Input", Syntax::Idd);
        assert_eq!(texts(&line), ["Lead Input"]);
        assert!(!line.values[0].last);
    }

    #[test]
    fn blank_line_is_empty() {
        assert_eq!(tokenize("   \r", Syntax::Idf), Line::default());
    }
}
