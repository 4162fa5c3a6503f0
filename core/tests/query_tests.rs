use chistes_core::query::{evaluate, lex_query, search, to_postfix};
use chistes_core::{Document, InvertedIndex, QueryError, SearchEngine};
use std::collections::HashMap;

fn animals() -> InvertedIndex {
    let mut postings = HashMap::new();
    postings.insert("perro".to_string(), vec![1, 3, 5]);
    postings.insert("gato".to_string(), vec![3, 5, 7]);
    postings.insert("raton".to_string(), vec![5, 6]);
    InvertedIndex { postings }
}

#[test]
fn and_intersects() {
    assert_eq!(search("perro AND gato", &animals(), 8).unwrap(), vec![3, 5]);
}

#[test]
fn or_unions() {
    assert_eq!(search("perro OR gato", &animals(), 8).unwrap(), vec![1, 3, 5, 7]);
}

#[test]
fn not_complements_against_universe() {
    assert_eq!(search("NOT perro", &animals(), 8).unwrap(), vec![0, 2, 4, 6, 7]);
}

#[test]
fn parentheses_override_precedence() {
    let idx = animals();
    assert_eq!(search("(perro OR gato) AND NOT raton", &idx, 8).unwrap(), vec![1, 3, 7]);
    // without parentheses AND binds first: perro OR (gato AND NOT raton)
    assert_eq!(search("perro OR gato AND NOT raton", &idx, 8).unwrap(), vec![1, 3, 5, 7]);
    // NOT binds tighter than AND
    assert_eq!(search("NOT perro AND gato", &idx, 8).unwrap(), vec![7]);
    assert_eq!(search("NOT (perro AND gato)", &idx, 8).unwrap(), vec![0, 1, 2, 4, 6, 7]);
}

#[test]
fn unknown_terms_are_empty() {
    let idx = animals();
    assert!(search("unicornio", &idx, 8).unwrap().is_empty());
    assert_eq!(search("perro OR unicornio", &idx, 8).unwrap(), vec![1, 3, 5]);
    assert_eq!(search("NOT unicornio", &idx, 8).unwrap(), (0..8u32).collect::<Vec<_>>());
}

#[test]
fn operator_without_left_operand_fails() {
    let err = search("AND perro", &animals(), 8).unwrap_err();
    assert!(matches!(err, QueryError::Eval(_)));
    assert_eq!(err.to_string(), "evaluation error: AND missing operands");
}

#[test]
fn dangling_not_fails() {
    let err = search("NOT", &animals(), 8).unwrap_err();
    assert_eq!(err, QueryError::Eval("NOT missing operand".into()));
    let err = search("perro AND NOT", &animals(), 8).unwrap_err();
    assert_eq!(err, QueryError::Eval("AND missing operands".into()));
}

#[test]
fn unbalanced_parenthesis_fails() {
    let err = search("perro AND (", &animals(), 8).unwrap_err();
    assert_eq!(err, QueryError::Parse("unbalanced parentheses".into()));
}

#[test]
fn adjacent_terms_are_not_joined() {
    let err = search("perro gato", &animals(), 8).unwrap_err();
    assert_eq!(err, QueryError::Eval("invalid query".into()));
    // a hyphenated word also expands to two bare terms
    assert!(search("perro-gato", &animals(), 8).is_err());
}

#[test]
fn empty_query_is_invalid() {
    assert_eq!(search("", &animals(), 8).unwrap_err(), QueryError::Eval("invalid query".into()));
    assert!(search("()", &animals(), 8).is_err());
}

#[test]
fn reserved_words_cannot_be_terms() {
    let toks = lex_query("and Or nOt");
    assert!(toks.iter().all(|t| !matches!(t, chistes_core::query::Token::Term(_))));
}

#[test]
fn evaluate_accepts_prebuilt_postfix() {
    let postfix = to_postfix(lex_query("gato AND NOT perro")).unwrap();
    assert_eq!(evaluate(&postfix, &animals(), 8).unwrap(), vec![7]);
}

#[test]
fn engine_answers_queries_over_documents() {
    let docs = vec![
        Document { id: 0, category: "Animales".into(), text: "El perro y el <i>gato</i>".into() },
        Document { id: 1, category: "Animales".into(), text: "Un pez &amp; un gato".into() },
        Document { id: 2, category: "Pepito".into(), text: "Pepito va al colegio".into() },
    ];
    let engine = SearchEngine::from_documents(docs);
    assert_eq!(engine.num_docs(), 3);
    assert_eq!(engine.search("gato").unwrap(), vec![0, 1]);
    assert_eq!(engine.search("GATO and not PERRO").unwrap(), vec![1]);
    assert_eq!(engine.search("pepito OR pez").unwrap(), vec![1, 2]);
    assert_eq!(engine.document(2).map(|d| d.category.as_str()), Some("Pepito"));
    assert!(engine.document(9).is_none());
}
