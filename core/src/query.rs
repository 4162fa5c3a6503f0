//! Boolean query pipeline: lexer, shunting-yard conversion to postfix, and a
//! stack evaluator over posting lists.
//!
//! Precedence is `NOT` > `AND` > `OR`. Adjacent terms with no operator between
//! them are not joined implicitly; they leave two results on the stack and the
//! query is rejected. The words `and`, `or` and `not` are always operators, so
//! they can never be searched for as terms.

use crate::error::{QueryError, QueryResult};
use crate::index::{DocId, InvertedIndex};
use crate::postings::{complement, intersect, union};
use crate::tokenizer::analyze;
use std::borrow::Cow;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    And,
    Or,
    Not,
}

impl Operator {
    pub fn precedence(self) -> u8 {
        match self {
            Operator::Not => 3,
            Operator::And => 2,
            Operator::Or => 1,
        }
    }

    /// `NOT` is unary and binds to the operand on its right.
    pub fn is_right_assoc(self) -> bool { matches!(self, Operator::Not) }

    fn from_word(word: &str) -> Option<Self> {
        match word.to_uppercase().as_str() {
            "AND" => Some(Operator::And),
            "OR" => Some(Operator::Or),
            "NOT" => Some(Operator::Not),
            _ => None,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Operator::And => "AND",
            Operator::Or => "OR",
            Operator::Not => "NOT",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Op(Operator),
    LParen,
    RParen,
    /// Normalized search term.
    Term(String),
}

impl Token {
    pub fn term(t: impl Into<String>) -> Self { Token::Term(t.into()) }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Op(op) => op.fmt(f),
            Token::LParen => f.write_str("("),
            Token::RParen => f.write_str(")"),
            Token::Term(t) => f.write_str(t),
        }
    }
}

/// Split a raw query into operators, parentheses and normalized terms.
/// A single word may expand to several terms (`perro-gato`) or to none (`¿?`).
pub fn lex_query(raw_query: &str) -> Vec<Token> {
    let spaced = raw_query.replace('(', " ( ").replace(')', " ) ");
    let mut out = Vec::new();
    for word in spaced.split_whitespace() {
        if let Some(op) = Operator::from_word(word) {
            out.push(Token::Op(op));
        } else if word == "(" {
            out.push(Token::LParen);
        } else if word == ")" {
            out.push(Token::RParen);
        } else {
            out.extend(analyze(word).into_iter().map(Token::Term));
        }
    }
    out
}

/// Reorder infix tokens into postfix, dropping parentheses.
pub fn to_postfix(tokens: Vec<Token>) -> QueryResult<Vec<Token>> {
    let mut out = Vec::with_capacity(tokens.len());
    let mut stack: Vec<Token> = Vec::new();
    for tok in tokens {
        match tok {
            Token::LParen => stack.push(tok),
            Token::RParen => loop {
                match stack.pop() {
                    Some(Token::LParen) => break,
                    Some(top) => out.push(top),
                    None => return Err(QueryError::parse("unbalanced parentheses")),
                }
            },
            Token::Op(op) => {
                while let Some(Token::Op(top)) = stack.last() {
                    let pops = if top.is_right_assoc() {
                        top.precedence() > op.precedence()
                    } else {
                        top.precedence() >= op.precedence()
                    };
                    if !pops {
                        break;
                    }
                    out.extend(stack.pop());
                }
                stack.push(Token::Op(op));
            }
            Token::Term(_) => out.push(tok),
        }
    }
    while let Some(top) = stack.pop() {
        if matches!(top, Token::LParen | Token::RParen) {
            return Err(QueryError::parse("unbalanced parentheses"));
        }
        out.push(top);
    }
    Ok(out)
}

/// Run a postfix sequence against `index`; `NOT` complements within `0..n_docs`.
pub fn evaluate(postfix: &[Token], index: &InvertedIndex, n_docs: u32) -> QueryResult<Vec<DocId>> {
    let mut stack: Vec<Cow<'_, [DocId]>> = Vec::new();
    for tok in postfix {
        match tok {
            Token::Term(term) => stack.push(Cow::Borrowed(index.postings(term))),
            Token::Op(Operator::Not) => {
                let a = stack.pop().ok_or_else(|| QueryError::eval("NOT missing operand"))?;
                stack.push(Cow::Owned(complement(&a, n_docs)));
            }
            Token::Op(op) => {
                let (b, a) = match (stack.pop(), stack.pop()) {
                    (Some(b), Some(a)) => (b, a),
                    _ => return Err(QueryError::eval(format!("{op} missing operands"))),
                };
                let merged = if *op == Operator::And { intersect(&a, &b) } else { union(&a, &b) };
                stack.push(Cow::Owned(merged));
            }
            Token::LParen | Token::RParen => return Err(QueryError::eval("invalid query")),
        }
    }
    match (stack.pop(), stack.is_empty()) {
        (Some(result), true) => Ok(result.into_owned()),
        _ => Err(QueryError::eval("invalid query")),
    }
}

/// Lex, convert and evaluate in one go.
pub fn search(raw_query: &str, index: &InvertedIndex, n_docs: u32) -> QueryResult<Vec<DocId>> {
    let postfix = to_postfix(lex_query(raw_query))?;
    evaluate(&postfix, index, n_docs)
}
