use core::fmt::{Display, Formatter, Result as FmtResult};
use nom::{
    branch::alt,
    bytes::complete::{take_while, take_while1},
    character::complete::char as nomchar,
    combinator::{iterator, map as nommap, value},
    sequence::preceded,
    IResult,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    If,
    Then,
    And,
    Or,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    Open,
    Close,
    Keyword(Keyword),
    Word(&'a str),
}

impl Keyword {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::If => "if",
            Self::Then => "then",
            Self::And => "and",
            Self::Or => "or",
        }
    }
    fn recognize(s: &str) -> Option<Self> {
        [Self::If, Self::Then, Self::And, Self::Or]
            .into_iter()
            .find(|kw| s.eq_ignore_ascii_case(kw.as_str()))
    }
}

impl<'a> Token<'a> {
    fn from_word(s: &'a str) -> Self {
        Keyword::recognize(s).map(Token::Keyword).unwrap_or(Token::Word(s))
    }
}

impl Display for Token<'_> {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            Self::Open => write!(f, "("),
            Self::Close => write!(f, ")"),
            Self::Keyword(kw) => write!(f, "{}", kw.as_str()),
            Self::Word(s) => write!(f, "{}", s),
        }
    }
}

//////////////////////////////////////

fn is_separator(c: char) -> bool {
    c.is_whitespace() || c == ',' || c == '\''
}

fn is_word_char(c: char) -> bool {
    !is_separator(c) && !"()#".contains(c)
}

fn separators(s: &str) -> IResult<&str, &str> {
    take_while(is_separator)(s)
}

fn structural(s: &str) -> IResult<&str, Token<'_>> {
    alt((value(Token::Open, nomchar('(')), value(Token::Close, nomchar(')'))))(s)
}

fn word(s: &str) -> IResult<&str, Token<'_>> {
    nommap(take_while1(is_word_char), Token::from_word)(s)
}

/// Splits one line into tokens. Separators (whitespace, `,`, `'`) are dropped
/// and everything from `#` onwards is a comment.
pub fn tokenize(line: &str) -> Vec<Token<'_>> {
    let mut it = iterator(line, preceded(separators, alt((structural, word))));
    let tokens = (&mut it).collect();
    // stops at `#` or at the end of the line; either way the rest is ignored
    let _ = it.finish();
    tokens
}
