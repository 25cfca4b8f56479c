// Integration tests for the compile pipeline

use minicalc::compile;
use minicalc::compiler::CompileError;
use minicalc::parser::lexer::{LexError, TokenKind};
use minicalc::parser::parser::{ParseError, Parser, MAX_NESTING_DEPTH};
use minicalc::semantic::SemanticError;
use std::fs;
use std::path::Path;

fn listing(source: &str) -> Vec<String> {
    compile(source).expect("Compilation failed").listing()
}

#[test]
fn test_precedence() {
    let compiled = compile("var x = 3 + 4 * 2;").expect("Compilation failed");

    assert_eq!(compiled.listing(), vec!["t1 = 4 * 2", "t2 = 3 + t1", "x = t2"]);
    assert!(compiled.symbols.contains("x"));
    assert_eq!(compiled.symbols.len(), 1);
}

#[test]
fn test_parentheses() {
    assert_eq!(
        listing("var x = (3 + 4) * 2;"),
        vec!["t1 = 3 + 4", "t2 = t1 * 2", "x = t2"]
    );
}

#[test]
fn test_left_associativity() {
    assert_eq!(
        listing("var x = 10 - 3 - 2;"),
        vec!["t1 = 10 - 3", "t2 = t1 - 2", "x = t2"]
    );
}

#[test]
fn test_reassignment() {
    let compiled = compile("var x = 1; x = x + 1;").expect("Compilation failed");

    assert_eq!(compiled.listing(), vec!["x = 1", "t1 = x + 1", "x = t1"]);
    assert_eq!(compiled.symbols.names(), vec!["x"]);
}

#[test]
fn test_symbols_keep_declaration_order() {
    let compiled = compile("var zeta = 1; var alpha = zeta; var mid = alpha * zeta;")
        .expect("Compilation failed");

    assert_eq!(compiled.symbols.names(), vec!["zeta", "alpha", "mid"]);
    for symbol in compiled.symbols.iter() {
        assert_eq!(symbol.to_string(), "{type: int, value: None}");
    }
}

#[test]
fn test_missing_identifier() {
    let err = compile("var = 5;").unwrap_err();

    match &err {
        CompileError::Parse(ParseError::UnexpectedToken {
            expected, found, ..
        }) => {
            assert_eq!(*expected, "IDENTIFIER");
            assert_eq!(*found, TokenKind::Assign);
        }
        other => panic!("Expected parse error, got {:?}", other),
    }
    assert!(err.to_string().contains("IDENTIFIER"));
}

#[test]
fn test_unrecognized_character() {
    let err = compile("var x = 3 # 2;").unwrap_err();

    assert!(matches!(
        err,
        CompileError::Lex(LexError::UnexpectedCharacter { ch: '#', .. })
    ));
    assert!(err.to_string().contains('#'));
}

#[test]
fn test_integer_literal_range() {
    assert_eq!(
        listing("var x = 9223372036854775807;"),
        vec!["x = 9223372036854775807"]
    );

    let err = compile("var x = 99999999999999999999;").unwrap_err();
    assert!(matches!(
        err,
        CompileError::Lex(LexError::IntegerOutOfRange { ref literal, .. })
            if literal == "99999999999999999999"
    ));
    assert_eq!(err.kind(), "LexError");
}

#[test]
fn test_non_ascii_identifier_rejected() {
    let err = compile("var a\u{663} = 1;").unwrap_err();
    assert!(matches!(
        err,
        CompileError::Lex(LexError::UnexpectedCharacter { ch: '\u{663}', .. })
    ));
}

#[test]
fn test_long_expression_chain() {
    let terms = vec!["1"; 20_001].join(" + ");
    let lines = listing(&format!("var x = {};", terms));

    assert_eq!(lines.len(), 20_001);
    assert_eq!(lines[0], "t1 = 1 + 1");
    assert_eq!(lines[20_000], "x = t20000");
}

#[test]
fn test_deep_parentheses_rejected() {
    let depth = 50_000;
    let source = format!("var x = {}1{};", "(".repeat(depth), ")".repeat(depth));

    let err = compile(&source).unwrap_err();
    assert!(matches!(
        err,
        CompileError::Parse(ParseError::NestingTooDeep { limit, .. }) if limit == MAX_NESTING_DEPTH
    ));
}

#[test]
fn test_redeclaration_anywhere() {
    let sources = [
        "var a = 1; var a = 2;",
        "var a = 1; var b = a; b = 3; var a = b;",
        "var a = 1; var b = 2; var c = 3; var b = a + c;",
    ];

    for source in sources {
        let err = compile(source).unwrap_err();
        assert!(
            matches!(err, CompileError::Semantic(SemanticError::AlreadyDeclared { .. })),
            "{} should fail with a redeclaration, got {:?}",
            source,
            err
        );
    }
}

#[test]
fn test_undeclared_reference() {
    let cases = [
        ("x = 1;", "x"),
        ("var a = b;", "b"),
        ("var a = 1; a = (a + 2) * c;", "c"),
        ("var a = 1; q = a;", "q"),
    ];

    for (source, name) in cases {
        match compile(source) {
            Err(CompileError::Semantic(SemanticError::NotDeclared { name: found, .. })) => {
                assert_eq!(found, name, "wrong name reported for {}", source);
            }
            other => panic!("{} should fail as undeclared, got {:?}", source, other),
        }
    }
}

#[test]
fn test_temporaries_follow_post_order() {
    let source = "var a = (1 + 2) * (3 - 4) / 5; var b = a - a - a; b = (b);";
    let program = Parser::new(source)
        .expect("Lexing failed")
        .parse_program()
        .expect("Parsing failed");
    let lines = listing(source);

    let temps: Vec<String> = lines
        .iter()
        .filter(|line| line.starts_with('t'))
        .map(|line| line.split(" = ").next().unwrap_or_default().to_string())
        .collect();
    let expected: Vec<String> = (1..=program.operator_count())
        .map(|n| format!("t{}", n))
        .collect();

    assert_eq!(temps, expected);
    assert_eq!(
        lines,
        vec![
            "t1 = 1 + 2",
            "t2 = 3 - 4",
            "t3 = t1 * t2",
            "t4 = t3 / 5",
            "a = t4",
            "t5 = a - a",
            "t6 = t5 - a",
            "b = t6",
            "b = b",
        ]
    );
}

#[test]
fn test_late_error_fails_whole_compilation() {
    let err = compile("var a = 1 + 2; var b = a * 3; c = b;").unwrap_err();
    assert_eq!(err.kind(), "SemanticError");
}

#[test]
fn test_demo_program() {
    let path = Path::new("demos/precedence.mc");
    let source = fs::read_to_string(path).expect("Failed to read demo file");

    let compiled = compile(&source).expect("Compilation failed");

    assert_eq!(
        compiled.listing(),
        vec![
            "t1 = 4 * 2",
            "t2 = 3 + t1",
            "x = t2",
            "t3 = x - 1",
            "t4 = t3 / 2",
            "y = t4",
            "t5 = x * y",
            "t6 = t5 + 10",
            "t7 = t6 - 3",
            "t8 = t7 - 2",
            "x = t8",
        ]
    );
    assert_eq!(compiled.symbols.names(), vec!["x", "y"]);
}

#[test]
fn test_demo_undeclared() {
    let path = Path::new("demos/undeclared.mc");
    let source = fs::read_to_string(path).expect("Failed to read demo file");

    let err = compile(&source).unwrap_err();
    assert_eq!(err.to_string(), "Variable count not declared at line 2, column 1");
}
