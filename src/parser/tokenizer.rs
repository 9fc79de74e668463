use super::error::LexicalError;
use super::locations::Span;
use const_format::concatcp;
use derivative::Derivative;
use once_cell::sync::Lazy;
use regex::Regex;

#[derive(Clone, Derivative)]
#[derivative(Debug, PartialEq)]
pub struct Token {
    pub(crate) typ: TokenType,
    pub(crate) lexeme: String,
    pub(crate) number: Option<Number>,
    #[derivative(Debug = "ignore", PartialEq = "ignore")]
    pub(crate) span: Span,
}

impl Token {
    pub fn typ(&self) -> TokenType {
        self.typ
    }

    pub fn lexeme(&self) -> &str {
        &self.lexeme
    }

    /// Decoded literal, present only on `NUMBER` tokens.
    pub fn number(&self) -> Option<Number> {
        self.number
    }

    pub fn span(&self) -> Span {
        self.span
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.number {
            Some(number) => write!(f, "{:?}({})", self.typ, number),
            None => write!(f, "{:?}('{}')", self.typ, self.lexeme),
        }
    }
}

/// A numeric literal as written: integers stay exact until evaluation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Number {
    Integer(i64),
    Float(f64),
}

impl Number {
    #[allow(clippy::cast_precision_loss)]
    pub fn value(self) -> f64 {
        match self {
            Self::Integer(i) => i as f64,
            Self::Float(f) => f,
        }
    }

    fn decode(lexeme: &str) -> Self {
        if !lexeme.contains('.') {
            if let Ok(i) = lexeme.parse() {
                return Self::Integer(i);
            }
        }
        // digits with at most one point always parse; wider than i64 lands here too
        Self::Float(lexeme.parse().unwrap_or(f64::INFINITY))
    }
}

impl std::fmt::Display for Number {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x:?}"),
        }
    }
}

#[allow(non_camel_case_types)]
#[allow(clippy::upper_case_acronyms)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum TokenType {
    ID,
    NUMBER,
    POWER,
    EQUALS,
    PLUS,
    MINUS,
    TIMES,
    DIVIDE,
    LPAREN,
    RPAREN,
    VERT,
    SINE,
    COSINE,
    TANGENT,
    ARCSINE,
    ARCCOSINE,
    ARCTANGENT,
    EXPONENTIAL,
    NATURAL_LOG,
    LOG_BASE_2,
    LOG_BASE_10,
    SQUARE_ROOT,
}

impl TokenType {
    pub fn is_function(self) -> bool {
        RESERVED.iter().any(|&(_, typ)| typ == self)
    }
}

const POWER: (&str, TokenType) = ("**", TokenType::POWER);
const EQUALS: (&str, TokenType) = ("=", TokenType::EQUALS);
const PLUS: (&str, TokenType) = ("+", TokenType::PLUS);
const MINUS: (&str, TokenType) = ("-", TokenType::MINUS);
const TIMES: (&str, TokenType) = ("*", TokenType::TIMES);
const DIVIDE: (&str, TokenType) = ("/", TokenType::DIVIDE);
const LPAREN: (&str, TokenType) = ("(", TokenType::LPAREN);
const RPAREN: (&str, TokenType) = (")", TokenType::RPAREN);
const VERT: (&str, TokenType) = ("|", TokenType::VERT);

// `**` must be tried before `*`.
const SIMPLE_TOKENS: [(&str, TokenType); 9] =
    [POWER, EQUALS, PLUS, MINUS, TIMES, DIVIDE, LPAREN, RPAREN, VERT];

pub(crate) const RESERVED: [(&str, TokenType); 11] = [
    ("sin", TokenType::SINE),
    ("cos", TokenType::COSINE),
    ("tan", TokenType::TANGENT),
    ("asin", TokenType::ARCSINE),
    ("acos", TokenType::ARCCOSINE),
    ("atan", TokenType::ARCTANGENT),
    ("exp", TokenType::EXPONENTIAL),
    ("ln", TokenType::NATURAL_LOG),
    ("log2", TokenType::LOG_BASE_2),
    ("log10", TokenType::LOG_BASE_10),
    ("sqrt", TokenType::SQUARE_ROOT),
];

macro_rules! alternative {
    ($t:expr) => {{
        $t
    }};
    ($t:expr, $($ts:expr),+) => {{
        concatcp!($t, "|", alternative!($($ts),+))
    }}
}

macro_rules! group {
    ($($ts:expr),+) => {{
        concatcp!(r"(?:", alternative!($($ts),+), ")")
    }}
}

macro_rules! maybe {
    ($($ts:expr),+) => {
        concatcp!(group!($($ts),+), r"?")
    }
}

const S_WHITESPACE: &str = r"^[ \t]+";
const S_NAME: &str = r"^[a-zA-Z_][a-zA-Z0-9_]*";
const S_DIGITS: &str = r"[0-9]+";
const S_FRACTION: &str = concatcp!(r"\.", S_DIGITS);
const S_NUMBER: &str = concatcp!("^", S_DIGITS, maybe!(S_FRACTION));

static WHITESPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(S_WHITESPACE).expect("Error compiling regex."));
static NAME: Lazy<Regex> = Lazy::new(|| Regex::new(S_NAME).expect("Error compiling regex."));
static NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(S_NUMBER).expect("Error compiling regex."));

/// Splits source text into tokens.
///
/// A tokenizer is single use: feed it lines with [`Tokenizer::tokenize_line`]
/// and collect the result with [`Tokenizer::finalize`]. Illegal characters
/// never stop it; each one is skipped and recorded as a [`LexicalError`].
#[derive(Default)]
pub struct Tokenizer {
    tokens: Vec<Token>,
    diagnostics: Vec<LexicalError>,
    start: usize,
}

impl Tokenizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tokenize<'s>(mut self, input: impl Iterator<Item = &'s str>) -> Self {
        for (lineno, line) in input.enumerate() {
            self.tokenize_line(line, lineno + 1);
        }
        self
    }

    pub fn diagnostics(&self) -> &[LexicalError] {
        &self.diagnostics
    }

    pub fn finalize(self) -> (Vec<Token>, Vec<LexicalError>) {
        (self.tokens, self.diagnostics)
    }

    pub fn tokenize_line(&mut self, line: &str, lineno: usize) {
        self.start = 0;

        while self.start < line.len() {
            let rest = &line[self.start..];

            if let Some(m) = WHITESPACE.find(rest) {
                self.advance(m.end());
                continue;
            }
            if let Some(m) = NUMBER.find(rest) {
                let lexeme = m.as_str();
                self.push(TokenType::NUMBER, lexeme, Some(Number::decode(lexeme)), lineno);
                continue;
            }
            if let Some(m) = NAME.find(rest) {
                let lexeme = m.as_str();
                let typ = RESERVED
                    .iter()
                    .find(|&&(word, _)| word == lexeme)
                    .map_or(TokenType::ID, |&(_, typ)| typ);
                self.push(typ, lexeme, None, lineno);
                continue;
            }
            if let Some(&(lexeme, typ)) = SIMPLE_TOKENS
                .iter()
                .find(|(lexeme, _)| rest.starts_with(lexeme))
            {
                self.push(typ, lexeme, None, lineno);
                continue;
            }

            // `rest` is non-empty here
            let chr = rest.chars().next().unwrap_or_default();
            self.report(chr, lineno);
            self.advance(chr.len_utf8());
        }
    }

    fn advance(&mut self, len: usize) {
        self.start += len;
    }

    fn push(&mut self, typ: TokenType, lexeme: &str, number: Option<Number>, lineno: usize) {
        let end = self.start + lexeme.len();
        self.tokens.push(Token {
            typ,
            lexeme: lexeme.to_string(),
            number,
            span: Span::new(lineno, self.start, end),
        });
        self.start = end;
    }

    fn report(&mut self, character: char, lineno: usize) {
        let span = Span::new(lineno, self.start, self.start + character.len_utf8());
        tracing::warn!(%character, %span, "Illegal character '{character}'");
        self.diagnostics.push(LexicalError { character, span });
    }
}

/// Tokenizes `text`, dropping the diagnostics (they are still logged).
///
/// Line breaks (`\n` or `\r\n`) separate lines and are never reported as
/// illegal; they produce no token and only advance the line number of the
/// following spans.
pub fn tokenize(text: &str) -> Vec<Token> {
    tokenize_with_diagnostics(text).0
}

/// Like [`tokenize`], also returning every skipped illegal character.
pub fn tokenize_with_diagnostics(text: &str) -> (Vec<Token>, Vec<LexicalError>) {
    Tokenizer::new().tokenize(text.lines()).finalize()
}
