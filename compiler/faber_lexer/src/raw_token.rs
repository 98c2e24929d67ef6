//! Raw Token Definition
//!
//! The `RawToken` enum is the logos-derived tokenizer output. Literal payloads
//! are not computed here; `lex` cooks them from the matched slice so that
//! overflow and bad escapes become proper `LexError`s.

use logos::Logos;

/// Raw token from logos (before cooking).
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r]+")] // Skip horizontal whitespace
#[logos(skip r"#[^\n]*")] // Comments are recovered separately by `scan_comments`
pub(crate) enum RawToken {
    #[token("\n")]
    Newline,

    // Declarations
    #[token("fixum")]
    Fixum,
    #[token("varia")]
    Varia,
    #[token("functio")]
    Functio,
    #[token("futura")]
    Futura,
    #[token("cursor")]
    Cursor,
    #[token("fit")]
    Fit,
    #[token("fiunt")]
    Fiunt,
    #[token("fiet")]
    Fiet,
    #[token("fient")]
    Fient,
    #[token("genus")]
    Genus,
    #[token("sub")]
    Sub,
    #[token("implet")]
    Implet,
    #[token("pactum")]
    Pactum,
    #[token("ordo")]
    Ordo,
    #[token("discretio")]
    Discretio,
    #[token("typus")]
    Typus,
    #[token("importa")]
    Importa,
    #[token("ut")]
    Ut,

    // Control flow
    #[token("ex")]
    Ex,
    #[token("de")]
    De,
    #[token("pro")]
    Pro,
    #[token("si")]
    Si,
    #[token("sin")]
    Sin,
    #[token("secus")]
    Secus,
    #[token("dum")]
    Dum,
    #[token("discerne")]
    Discerne,
    #[token("ceterum")]
    Ceterum,
    #[token("elige")]
    Elige,
    #[token("casu")]
    Casu,
    #[token("redde")]
    Redde,
    #[token("rumpe")]
    Rumpe,
    #[token("perge")]
    Perge,
    #[token("iace")]
    Iace,
    #[token("mori")]
    Mori,
    #[token("tempta")]
    Tempta,
    #[token("cape")]
    Cape,
    #[token("demum")]
    Demum,
    #[token("scribe")]
    Scribe,
    #[token("vide")]
    Vide,
    #[token("mone")]
    Mone,
    #[token("adfirma")]
    Adfirma,

    // Expression keywords
    #[token("sic")]
    Sic,
    #[token("vel")]
    Vel,
    #[token("aut")]
    Aut,
    #[token("et")]
    Et,
    #[token("non")]
    Non,
    #[token("est")]
    Est,
    #[token("qua")]
    Qua,
    #[token("usque")]
    Usque,
    #[token("per")]
    Per,
    #[token("cede")]
    Cede,
    #[token("novum")]
    Novum,
    #[token("finge")]
    Finge,
    #[token("praefixum")]
    Praefixum,
    #[token("verum")]
    Verum,
    #[token("falsum")]
    Falsum,
    #[token("nihil")]
    Nihil,
    #[token("ego")]
    Ego,

    // Punctuation
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token(",")]
    Comma,
    #[token(":")]
    Colon,
    #[token(";")]
    Semicolon,
    #[token(".")]
    Dot,
    #[token("..")]
    DotDot,
    #[token("...")]
    Ellipsis,
    #[token("?.")]
    QuestionDot,
    #[token("?[")]
    QuestionBracket,
    #[token("?(")]
    QuestionParen,
    #[token("!.")]
    BangDot,
    #[token("![")]
    BangBracket,
    #[token("?")]
    Question,
    #[token("->")]
    Arrow,

    // Operators
    #[token("=")]
    Eq,
    #[token("+=")]
    PlusEq,
    #[token("-=")]
    MinusEq,
    #[token("*=")]
    StarEq,
    #[token("/=")]
    SlashEq,
    #[token("==")]
    EqEq,
    #[token("!=")]
    NotEq,
    #[token("<")]
    Lt,
    #[token("<=")]
    LtEq,
    #[token(">")]
    Gt,
    #[token(">=")]
    GtEq,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,

    // Literals
    #[regex(r"0x[0-9a-fA-F][0-9a-fA-F_]*")]
    HexInt,
    #[regex(r"[0-9][0-9_]*")]
    Int,
    #[regex(r"[0-9][0-9_]*\.[0-9][0-9_]*([eE][+-]?[0-9]+)?")]
    #[regex(r"[0-9][0-9_]*[eE][+-]?[0-9]+")]
    Float,
    #[regex(r#""([^"\\\n\r]|\\.)*""#)]
    String,
    #[regex(r"`([^`\\]|\\.)*`")]
    Template,

    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Ident,
}
