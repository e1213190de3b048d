//! Recursive-descent grammar over the tokens of one line:
//!
//! ```text
//! Rule       := "if" Expression "then" Predicate
//! Expression := Term ("or" Term)*
//! Term       := Factor ("and" Factor)*
//! Factor     := "(" Expression ")" | Predicate
//! Predicate  := identifier "(" identifier* ")"
//! ```

use crate::error::ParseError;
use crate::lex::{tokenize, Keyword, Token};
use crate::{Condition, Predicate, Rule};
use nom::{
    branch::alt,
    combinator::{cut, map as nommap},
    error::{ErrorKind, ParseError as NomParseError},
    multi::{many0, many_till},
    sequence::{delimited, pair, preceded, terminated, tuple},
};

type In<'t, 'a> = &'t [Token<'a>];
pub type IResult<'t, 'a, O> = nom::IResult<In<'t, 'a>, O, ParseError>;

const END_OF_LINE: &str = "end-of-line";

fn mismatch(expected: String, s: In) -> ParseError {
    match s.first() {
        Some(found) => ParseError::TokenMismatch { expected, found: found.to_string() },
        None => ParseError::PrematureEndOfLine { expected },
    }
}

impl<'t, 'a> NomParseError<In<'t, 'a>> for ParseError {
    fn from_error_kind(input: In<'t, 'a>, _kind: ErrorKind) -> Self {
        mismatch("token".into(), input)
    }
    fn append(_input: In<'t, 'a>, _kind: ErrorKind, other: Self) -> Self {
        other
    }
}

//////////////////////////////////////

pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some(c) if c.is_alphabetic() || c == '_')
        && chars.all(|c| c.is_alphanumeric() || c == '_')
}

fn token<'t, 'a: 't>(expected: Token<'static>) -> impl Fn(In<'t, 'a>) -> IResult<'t, 'a, ()> {
    move |s: In<'t, 'a>| match s.split_first() {
        Some((found, rest)) if *found == expected => Ok((rest, ())),
        _ => Err(nom::Err::Error(mismatch(format!("'{}'", expected), s))),
    }
}

fn keyword<'t, 'a: 't>(kw: Keyword) -> impl Fn(In<'t, 'a>) -> IResult<'t, 'a, ()> {
    token(Token::Keyword(kw))
}

fn end_of_line<'t, 'a>(s: In<'t, 'a>) -> IResult<'t, 'a, ()> {
    if s.is_empty() {
        Ok((s, ()))
    } else {
        Err(nom::Err::Error(mismatch(format!("'{}'", END_OF_LINE), s)))
    }
}

pub fn identifier<'t, 'a>(s: In<'t, 'a>) -> IResult<'t, 'a, &'a str> {
    match s.split_first() {
        Some((Token::Word(word), rest)) if is_identifier(word) => Ok((rest, *word)),
        Some((found, _)) => {
            Err(nom::Err::Error(ParseError::InvalidIdentifier { found: found.to_string() }))
        }
        None => Err(nom::Err::Error(ParseError::PrematureEndOfLine {
            expected: "identifier".into(),
        })),
    }
}

pub fn predicate<'t, 'a>(s: In<'t, 'a>) -> IResult<'t, 'a, Predicate> {
    let args = preceded(
        cut(token(Token::Open)),
        cut(many_till(identifier, token(Token::Close))),
    );
    nommap(pair(identifier, args), |(relation, (args, ()))| Predicate::new(relation, args))(s)
}

fn join(first: Condition, rest: Vec<Condition>, node: fn(Vec<Condition>) -> Condition) -> Condition {
    if rest.is_empty() {
        first
    } else {
        node(std::iter::once(first).chain(rest).collect())
    }
}

pub fn factor<'t, 'a>(s: In<'t, 'a>) -> IResult<'t, 'a, Condition> {
    let group = delimited(token(Token::Open), cut(expression), cut(token(Token::Close)));
    let group = nommap(group, |c| Condition::Group(Box::new(c)));
    let leaf = nommap(predicate, Condition::Predicate);
    alt((group, leaf))(s)
}

pub fn term<'t, 'a>(s: In<'t, 'a>) -> IResult<'t, 'a, Condition> {
    let rest = many0(preceded(keyword(Keyword::And), cut(factor)));
    nommap(pair(factor, rest), |(first, rest)| join(first, rest, Condition::And))(s)
}

pub fn expression<'t, 'a>(s: In<'t, 'a>) -> IResult<'t, 'a, Condition> {
    let rest = many0(preceded(keyword(Keyword::Or), cut(term)));
    nommap(pair(term, rest), |(first, rest)| join(first, rest, Condition::Or))(s)
}

pub fn rule<'t, 'a>(s: In<'t, 'a>) -> IResult<'t, 'a, (Condition, Predicate)> {
    let body = tuple((
        cut(expression),
        cut(keyword(Keyword::Then)),
        cut(predicate),
        cut(end_of_line),
    ));
    nommap(preceded(keyword(Keyword::If), body), |(condition, (), conclusion, ())| {
        (condition, conclusion)
    })(s)
}

fn complete<O>(result: IResult<'_, '_, O>) -> Result<O, ParseError> {
    match result {
        Ok((_rest, o)) => Ok(o),
        Err(nom::Err::Error(e) | nom::Err::Failure(e)) => Err(e),
        Err(nom::Err::Incomplete(_)) => {
            Err(ParseError::PrematureEndOfLine { expected: "token".into() })
        }
    }
}

/// Parses one predicate line, e.g. `Likes(amy, bob)`.
/// Blank and comment lines give `Ok(None)`.
pub fn predicate_line(line: &str) -> Result<Option<Predicate>, ParseError> {
    let tokens = tokenize(line);
    if tokens.is_empty() {
        return Ok(None);
    }
    let fact = complete(terminated(predicate, end_of_line)(tokens.as_slice()))?;
    Ok(Some(fact))
}

/// Parses one rule line, e.g. `if P(_x) and Q(_x) then R(_x)`.
/// Blank and comment lines give `Ok(None)`.
pub fn rule_line(line: &str) -> Result<Option<Rule>, ParseError> {
    let tokens = tokenize(line);
    if tokens.is_empty() {
        return Ok(None);
    }
    let (condition, conclusion) = complete(rule(tokens.as_slice()))?;
    Rule::new(condition, conclusion).map(Some)
}
