//! Eager, char-by-char tokenizer. Produces the full token stream up front; the parser then walks
//! it with one token of lookahead.

use crate::ast::Callable;
use crate::builtin::{self, BuiltinKind};
use crate::symbol::{ArrayView, Symbol, SymbolTable};
use crate::token::{InfixOp, Token, TokenKind};

pub(crate) fn lex<'a>(input: &str, symbols: &SymbolTable<'a>) -> Vec<Token<'a>> {
    let mut tokens = Vec::new();
    let mut chars = input.char_indices().peekable();

    while let Some(&(pos, ch)) = chars.peek() {
        match ch {
            ' ' | '\t' | '\n' | '\r' => {
                chars.next();
            }
            '(' => {
                chars.next();
                tokens.push(Token::new(TokenKind::LParen, pos));
            }
            ')' => {
                chars.next();
                tokens.push(Token::new(TokenKind::RParen, pos));
            }
            '[' => {
                chars.next();
                tokens.push(Token::new(TokenKind::LBracket, pos));
            }
            ']' => {
                chars.next();
                tokens.push(Token::new(TokenKind::RBracket, pos));
            }
            ',' => {
                chars.next();
                tokens.push(Token::new(TokenKind::Comma, pos));
            }
            '+' => {
                chars.next();
                tokens.push(Token::new(TokenKind::Infix(InfixOp::Add), pos));
            }
            '-' => {
                chars.next();
                tokens.push(Token::new(TokenKind::Infix(InfixOp::Sub), pos));
            }
            '*' => {
                chars.next();
                tokens.push(Token::new(TokenKind::Infix(InfixOp::Mul), pos));
            }
            '/' => {
                chars.next();
                tokens.push(Token::new(TokenKind::Infix(InfixOp::Div), pos));
            }
            '%' => {
                chars.next();
                tokens.push(Token::new(TokenKind::Infix(InfixOp::Mod), pos));
            }
            '^' => {
                chars.next();
                tokens.push(Token::new(TokenKind::Infix(InfixOp::Pow), pos));
            }
            '&' => {
                chars.next();
                tokens.push(Token::new(TokenKind::Infix(InfixOp::BitAnd), pos));
            }
            '|' => {
                chars.next();
                tokens.push(Token::new(TokenKind::Infix(InfixOp::BitOr), pos));
            }
            '0'..='9' | '.' => {
                let (value, end) = lex_number(input, pos);
                tokens.push(Token::new(TokenKind::Number(value), pos));
                advance_to(&mut chars, end);
            }
            c if c.is_alphabetic() || c == '_' => {
                let end = lex_ident_end(input, pos);
                let name = &input[pos..end];
                tokens.push(resolve_ident(name, pos, symbols));
                advance_to(&mut chars, end);
            }
            other => {
                chars.next();
                tokens.push(Token::new(
                    TokenKind::Error(format!("unexpected character '{other}'")),
                    pos,
                ));
            }
        }
    }
    tokens.push(Token::new(TokenKind::End, input.len()));
    tokens
}

fn advance_to(chars: &mut std::iter::Peekable<std::str::CharIndices>, end: usize) {
    while let Some(&(pos, _)) = chars.peek() {
        if pos >= end {
            break;
        }
        chars.next();
    }
}

fn lex_ident_end(input: &str, start: usize) -> usize {
    let mut end = start;
    for (offset, ch) in input[start..].char_indices() {
        if ch.is_alphanumeric() || ch == '_' {
            end = start + offset + ch.len_utf8();
        } else {
            break;
        }
    }
    end
}

fn lex_number(input: &str, start: usize) -> (f64, usize) {
    let bytes = input.as_bytes();
    let mut end = start;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end < bytes.len() && bytes[end] == b'.' {
        end += 1;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
    }
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut look = end + 1;
        if look < bytes.len() && (bytes[look] == b'+' || bytes[look] == b'-') {
            look += 1;
        }
        if look < bytes.len() && bytes[look].is_ascii_digit() {
            look += 1;
            while look < bytes.len() && bytes[look].is_ascii_digit() {
                look += 1;
            }
            end = look;
        }
    }
    let text = &input[start..end];
    let value = text.parse::<f64>().unwrap_or(f64::NAN);
    (value, end)
}

fn resolve_ident<'a>(name: &str, pos: usize, symbols: &SymbolTable<'a>) -> Token<'a> {
    if let Some(sym) = symbols.resolve(name) {
        return Token::new(symbol_to_kind(sym), pos);
    }
    if let Some(desc) = builtin::lookup(name) {
        let kind = match desc.kind {
            BuiltinKind::Plain(f) => TokenKind::Call {
                arity: desc.arity,
                pure: desc.pure,
                callable: Callable::Static(f),
            },
            BuiltinKind::Aggregate(agg) => TokenKind::Aggregate {
                kind: agg,
                arity: desc.arity,
                array_params: desc.array_params,
            },
        };
        return Token::new(kind, pos);
    }
    Token::new(
        TokenKind::Error(format!("unknown identifier '{name}'")),
        pos,
    )
}

fn symbol_to_kind<'a>(sym: &Symbol<'a>) -> TokenKind<'a> {
    match *sym {
        Symbol::Scalar(_, cell) => TokenKind::Scalar(cell),
        Symbol::Array(_, storage) => TokenKind::Array(ArrayView::new(storage)),
        Symbol::Function {
            arity, pure, call, ..
        } => TokenKind::Call {
            arity,
            pure,
            callable: Callable::Static(call),
        },
        Symbol::Closure {
            arity, pure, call, ..
        } => TokenKind::Call {
            arity,
            pure,
            callable: Callable::Dynamic(call),
        },
    }
}
