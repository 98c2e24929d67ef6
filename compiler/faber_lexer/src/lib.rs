//! Lexer for Faber using logos.
//!
//! `lex` produces a `Vec<Token>` ending in `Eof`. Newlines are not tokens:
//! each token records whether a newline preceded it, which is all the parser
//! needs for statement separation and for keeping `(`/`[` on a new line from
//! being read as a call or index.

mod comments;
mod escape;
mod lex_error;
mod raw_token;
mod token;

use logos::Logos;
use tracing::instrument;

use faber_ir::Span;
use raw_token::RawToken;

pub use comments::scan_comments;
pub use escape::escape;
pub use lex_error::{LexError, LexErrorKind};
pub use token::{Token, TokenKind};

/// Tokenize `source`.
#[instrument(level = "debug", skip_all, fields(len = source.len()))]
pub fn lex(source: &str) -> Result<Vec<Token>, LexError> {
    let eof_pos = u32::try_from(source.len())
        .map_err(|_| LexError::new(LexErrorKind::SourceTooLarge, Span::DUMMY))?;

    let mut tokens = Vec::new();
    let mut logos = RawToken::lexer(source);
    let mut newline_before = false;

    while let Some(result) = logos.next() {
        let range = logos.span();
        let span = Span::try_from_range(range.clone())
            .map_err(|_| LexError::new(LexErrorKind::SourceTooLarge, Span::DUMMY))?;
        let slice = logos.slice();

        let raw = match result {
            Ok(raw) => raw,
            Err(()) => return Err(classify_error(source, range.start, span)),
        };
        if raw == RawToken::Newline {
            newline_before = true;
            continue;
        }
        let kind = cook(raw, slice, span)?;
        tokens.push(Token::new(kind, span, newline_before));
        newline_before = false;
    }

    tokens.push(Token::new(
        TokenKind::Eof,
        Span::point(eof_pos),
        newline_before,
    ));
    tracing::trace!(count = tokens.len(), "lexed");
    Ok(tokens)
}

fn classify_error(source: &str, start: usize, span: Span) -> LexError {
    let c = source[start..].chars().next().unwrap_or('\0');
    let kind = match c {
        '"' => LexErrorKind::UnterminatedString,
        '`' => LexErrorKind::UnterminatedTemplate,
        c => LexErrorKind::UnexpectedCharacter(c),
    };
    LexError::new(kind, span)
}

fn parse_int(digits: &str, radix: u32) -> Option<i64> {
    let cleaned: String = digits.chars().filter(|&c| c != '_').collect();
    i64::from_str_radix(&cleaned, radix).ok()
}

/// Convert a raw token and its slice into a `TokenKind`.
fn cook(raw: RawToken, slice: &str, span: Span) -> Result<TokenKind, LexError> {
    let kind = match raw {
        RawToken::Int => TokenKind::Int(
            parse_int(slice, 10).ok_or_else(|| LexError::new(LexErrorKind::IntOverflow, span))?,
        ),
        RawToken::HexInt => TokenKind::Int(
            parse_int(&slice[2..], 16).ok_or_else(|| LexError::new(LexErrorKind::IntOverflow, span))?,
        ),
        RawToken::Float => {
            let cleaned: String = slice.chars().filter(|&c| c != '_').collect();
            let value: f64 = cleaned
                .parse()
                .map_err(|_| LexError::new(LexErrorKind::InvalidFloat, span))?;
            TokenKind::Float(value.to_bits())
        }
        RawToken::String => TokenKind::Str(
            escape::unescape(&slice[1..slice.len() - 1])
                .map_err(|c| LexError::new(LexErrorKind::InvalidEscape(c), span))?,
        ),
        RawToken::Template => TokenKind::Template(slice[1..slice.len() - 1].to_string()),
        RawToken::Ident => TokenKind::Ident(slice.to_string()),

        // Filtered out by `lex` before cooking.
        RawToken::Newline => TokenKind::Eof,

        RawToken::Fixum => TokenKind::Fixum,
        RawToken::Varia => TokenKind::Varia,
        RawToken::Functio => TokenKind::Functio,
        RawToken::Futura => TokenKind::Futura,
        RawToken::Cursor => TokenKind::Cursor,
        RawToken::Fit => TokenKind::Fit,
        RawToken::Fiunt => TokenKind::Fiunt,
        RawToken::Fiet => TokenKind::Fiet,
        RawToken::Fient => TokenKind::Fient,
        RawToken::Genus => TokenKind::Genus,
        RawToken::Sub => TokenKind::Sub,
        RawToken::Implet => TokenKind::Implet,
        RawToken::Pactum => TokenKind::Pactum,
        RawToken::Ordo => TokenKind::Ordo,
        RawToken::Discretio => TokenKind::Discretio,
        RawToken::Typus => TokenKind::Typus,
        RawToken::Importa => TokenKind::Importa,
        RawToken::Ut => TokenKind::Ut,
        RawToken::Ex => TokenKind::Ex,
        RawToken::De => TokenKind::De,
        RawToken::Pro => TokenKind::Pro,
        RawToken::Si => TokenKind::Si,
        RawToken::Sin => TokenKind::Sin,
        RawToken::Secus => TokenKind::Secus,
        RawToken::Dum => TokenKind::Dum,
        RawToken::Discerne => TokenKind::Discerne,
        RawToken::Ceterum => TokenKind::Ceterum,
        RawToken::Elige => TokenKind::Elige,
        RawToken::Casu => TokenKind::Casu,
        RawToken::Redde => TokenKind::Redde,
        RawToken::Rumpe => TokenKind::Rumpe,
        RawToken::Perge => TokenKind::Perge,
        RawToken::Iace => TokenKind::Iace,
        RawToken::Mori => TokenKind::Mori,
        RawToken::Tempta => TokenKind::Tempta,
        RawToken::Cape => TokenKind::Cape,
        RawToken::Demum => TokenKind::Demum,
        RawToken::Scribe => TokenKind::Scribe,
        RawToken::Vide => TokenKind::Vide,
        RawToken::Mone => TokenKind::Mone,
        RawToken::Adfirma => TokenKind::Adfirma,
        RawToken::Sic => TokenKind::Sic,
        RawToken::Vel => TokenKind::Vel,
        RawToken::Aut => TokenKind::Aut,
        RawToken::Et => TokenKind::Et,
        RawToken::Non => TokenKind::Non,
        RawToken::Est => TokenKind::Est,
        RawToken::Qua => TokenKind::Qua,
        RawToken::Usque => TokenKind::Usque,
        RawToken::Per => TokenKind::Per,
        RawToken::Cede => TokenKind::Cede,
        RawToken::Novum => TokenKind::Novum,
        RawToken::Finge => TokenKind::Finge,
        RawToken::Praefixum => TokenKind::Praefixum,
        RawToken::Verum => TokenKind::Verum,
        RawToken::Falsum => TokenKind::Falsum,
        RawToken::Nihil => TokenKind::Nihil,
        RawToken::Ego => TokenKind::Ego,

        RawToken::LParen => TokenKind::LParen,
        RawToken::RParen => TokenKind::RParen,
        RawToken::LBracket => TokenKind::LBracket,
        RawToken::RBracket => TokenKind::RBracket,
        RawToken::LBrace => TokenKind::LBrace,
        RawToken::RBrace => TokenKind::RBrace,
        RawToken::Comma => TokenKind::Comma,
        RawToken::Colon => TokenKind::Colon,
        RawToken::Semicolon => TokenKind::Semicolon,
        RawToken::Dot => TokenKind::Dot,
        RawToken::DotDot => TokenKind::DotDot,
        RawToken::Ellipsis => TokenKind::Ellipsis,
        RawToken::QuestionDot => TokenKind::QuestionDot,
        RawToken::QuestionBracket => TokenKind::QuestionBracket,
        RawToken::QuestionParen => TokenKind::QuestionParen,
        RawToken::BangDot => TokenKind::BangDot,
        RawToken::BangBracket => TokenKind::BangBracket,
        RawToken::Question => TokenKind::Question,
        RawToken::Arrow => TokenKind::Arrow,

        RawToken::Eq => TokenKind::Eq,
        RawToken::PlusEq => TokenKind::PlusEq,
        RawToken::MinusEq => TokenKind::MinusEq,
        RawToken::StarEq => TokenKind::StarEq,
        RawToken::SlashEq => TokenKind::SlashEq,
        RawToken::EqEq => TokenKind::EqEq,
        RawToken::NotEq => TokenKind::NotEq,
        RawToken::Lt => TokenKind::Lt,
        RawToken::LtEq => TokenKind::LtEq,
        RawToken::Gt => TokenKind::Gt,
        RawToken::GtEq => TokenKind::GtEq,
        RawToken::Plus => TokenKind::Plus,
        RawToken::Minus => TokenKind::Minus,
        RawToken::Star => TokenKind::Star,
        RawToken::Slash => TokenKind::Slash,
        RawToken::Percent => TokenKind::Percent,
    };
    Ok(kind)
}

#[cfg(test)]
mod tests;
