//! Cooked tokens handed to the parser.

use std::fmt;

use faber_ir::Span;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Literals
    Int(i64),
    /// `f64::to_bits` of the literal.
    Float(u64),
    Str(String),
    Template(String),
    Ident(String),

    // Declarations
    Fixum,
    Varia,
    Functio,
    Futura,
    Cursor,
    Fit,
    Fiunt,
    Fiet,
    Fient,
    Genus,
    Sub,
    Implet,
    Pactum,
    Ordo,
    Discretio,
    Typus,
    Importa,
    Ut,

    // Control flow
    Ex,
    De,
    Pro,
    Si,
    Sin,
    Secus,
    Dum,
    Discerne,
    Ceterum,
    Elige,
    Casu,
    Redde,
    Rumpe,
    Perge,
    Iace,
    Mori,
    Tempta,
    Cape,
    Demum,
    Scribe,
    Vide,
    Mone,
    Adfirma,

    // Expression keywords
    Sic,
    Vel,
    Aut,
    Et,
    Non,
    Est,
    Qua,
    Usque,
    Per,
    Cede,
    Novum,
    Finge,
    Praefixum,
    Verum,
    Falsum,
    Nihil,
    Ego,

    // Punctuation
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
    Comma,
    Colon,
    Semicolon,
    Dot,
    DotDot,
    Ellipsis,
    QuestionDot,
    QuestionBracket,
    QuestionParen,
    BangDot,
    BangBracket,
    Question,
    Arrow,

    // Operators
    Eq,
    PlusEq,
    MinusEq,
    StarEq,
    SlashEq,
    EqEq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,

    Eof,
}

impl TokenKind {
    /// Source spelling of keyword tokens. Keywords are accepted as property
    /// names after `.` and as field keys, so the parser needs the text back.
    pub const fn keyword_text(&self) -> Option<&'static str> {
        Some(match self {
            TokenKind::Fixum => "fixum",
            TokenKind::Varia => "varia",
            TokenKind::Functio => "functio",
            TokenKind::Futura => "futura",
            TokenKind::Cursor => "cursor",
            TokenKind::Fit => "fit",
            TokenKind::Fiunt => "fiunt",
            TokenKind::Fiet => "fiet",
            TokenKind::Fient => "fient",
            TokenKind::Genus => "genus",
            TokenKind::Sub => "sub",
            TokenKind::Implet => "implet",
            TokenKind::Pactum => "pactum",
            TokenKind::Ordo => "ordo",
            TokenKind::Discretio => "discretio",
            TokenKind::Typus => "typus",
            TokenKind::Importa => "importa",
            TokenKind::Ut => "ut",
            TokenKind::Ex => "ex",
            TokenKind::De => "de",
            TokenKind::Pro => "pro",
            TokenKind::Si => "si",
            TokenKind::Sin => "sin",
            TokenKind::Secus => "secus",
            TokenKind::Dum => "dum",
            TokenKind::Discerne => "discerne",
            TokenKind::Ceterum => "ceterum",
            TokenKind::Elige => "elige",
            TokenKind::Casu => "casu",
            TokenKind::Redde => "redde",
            TokenKind::Rumpe => "rumpe",
            TokenKind::Perge => "perge",
            TokenKind::Iace => "iace",
            TokenKind::Mori => "mori",
            TokenKind::Tempta => "tempta",
            TokenKind::Cape => "cape",
            TokenKind::Demum => "demum",
            TokenKind::Scribe => "scribe",
            TokenKind::Vide => "vide",
            TokenKind::Mone => "mone",
            TokenKind::Adfirma => "adfirma",
            TokenKind::Sic => "sic",
            TokenKind::Vel => "vel",
            TokenKind::Aut => "aut",
            TokenKind::Et => "et",
            TokenKind::Non => "non",
            TokenKind::Est => "est",
            TokenKind::Qua => "qua",
            TokenKind::Usque => "usque",
            TokenKind::Per => "per",
            TokenKind::Cede => "cede",
            TokenKind::Novum => "novum",
            TokenKind::Finge => "finge",
            TokenKind::Praefixum => "praefixum",
            TokenKind::Verum => "verum",
            TokenKind::Falsum => "falsum",
            TokenKind::Nihil => "nihil",
            TokenKind::Ego => "ego",
            _ => return None,
        })
    }

    /// Human-readable description for diagnostics.
    pub fn display_name(&self) -> String {
        if let Some(kw) = self.keyword_text() {
            return format!("`{kw}`");
        }
        let text = match self {
            TokenKind::Int(v) => return format!("integer `{v}`"),
            TokenKind::Float(bits) => return format!("float `{}`", f64::from_bits(*bits)),
            TokenKind::Str(_) => "string literal",
            TokenKind::Template(_) => "template literal",
            TokenKind::Ident(name) => return format!("identifier `{name}`"),
            TokenKind::LParen => "`(`",
            TokenKind::RParen => "`)`",
            TokenKind::LBracket => "`[`",
            TokenKind::RBracket => "`]`",
            TokenKind::LBrace => "`{`",
            TokenKind::RBrace => "`}`",
            TokenKind::Comma => "`,`",
            TokenKind::Colon => "`:`",
            TokenKind::Semicolon => "`;`",
            TokenKind::Dot => "`.`",
            TokenKind::DotDot => "`..`",
            TokenKind::Ellipsis => "`...`",
            TokenKind::QuestionDot => "`?.`",
            TokenKind::QuestionBracket => "`?[`",
            TokenKind::QuestionParen => "`?(`",
            TokenKind::BangDot => "`!.`",
            TokenKind::BangBracket => "`![`",
            TokenKind::Question => "`?`",
            TokenKind::Arrow => "`->`",
            TokenKind::Eq => "`=`",
            TokenKind::PlusEq => "`+=`",
            TokenKind::MinusEq => "`-=`",
            TokenKind::StarEq => "`*=`",
            TokenKind::SlashEq => "`/=`",
            TokenKind::EqEq => "`==`",
            TokenKind::NotEq => "`!=`",
            TokenKind::Lt => "`<`",
            TokenKind::LtEq => "`<=`",
            TokenKind::Gt => "`>`",
            TokenKind::GtEq => "`>=`",
            TokenKind::Plus => "`+`",
            TokenKind::Minus => "`-`",
            TokenKind::Star => "`*`",
            TokenKind::Slash => "`/`",
            TokenKind::Percent => "`%`",
            TokenKind::Eof => "end of file",
            _ => "token",
        };
        text.to_string()
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_name())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    /// At least one newline separates this token from the previous one.
    pub newline_before: bool,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span, newline_before: bool) -> Self {
        Token {
            kind,
            span,
            newline_before,
        }
    }
}
