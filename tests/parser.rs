use glox::error::LoxError;
use glox::parser::Parser;
use glox::scanner::Scanner;
use glox::stmt::Stmt;

fn parse(source: &str) -> Vec<Stmt> {
    let mut parser = Parser::new(
        Scanner::new(source.as_bytes().to_vec())
            .scan_tokens()
            .expect("source should scan cleanly"),
    );

    parser.parse().expect("source should parse cleanly")
}

fn parse_err(source: &str) -> String {
    let mut parser = Parser::new(
        Scanner::new(source.as_bytes().to_vec())
            .scan_tokens()
            .expect("source should scan cleanly"),
    );

    parser
        .parse()
        .expect_err("source should fail to parse")
        .to_string()
}

#[test]
fn test_statement_kinds() {
    let statements: Vec<Stmt> = parse("var a = 1; print a; a; { a; } if (a) a; while (a) a;");

    assert_eq!(statements.len(), 6);
    assert!(matches!(statements[0], Stmt::Var { .. }));
    assert!(matches!(statements[1], Stmt::Print(_)));
    assert!(matches!(statements[2], Stmt::Expression(_)));
    assert!(matches!(statements[3], Stmt::Block(_)));
    assert!(matches!(statements[4], Stmt::If { .. }));
    assert!(matches!(statements[5], Stmt::While { .. }));
}

#[test]
fn test_for_desugars_to_while_in_a_block() {
    // for (init; cond; incr) body  ⇒  { init; while (cond) { body; incr; } }
    let statements: Vec<Stmt> = parse("for (var i = 0; i < 3; i = i + 1) print i;");

    assert_eq!(statements.len(), 1);

    let Stmt::Block(outer) = &statements[0] else {
        panic!("expected outer block, got {:?}", statements[0]);
    };

    assert_eq!(outer.len(), 2);
    assert!(matches!(outer[0], Stmt::Var { .. }));

    let Stmt::While { body, .. } = &outer[1] else {
        panic!("expected while loop, got {:?}", outer[1]);
    };

    let Stmt::Block(inner) = body.as_ref() else {
        panic!("expected inner block, got {:?}", body);
    };

    assert_eq!(inner.len(), 2);
    assert!(matches!(inner[0], Stmt::Print(_)));
    assert!(matches!(inner[1], Stmt::Expression(_)));
}

#[test]
fn test_for_without_initializer_has_no_outer_block() {
    let statements: Vec<Stmt> = parse("for (; false;) print 1;");

    assert!(matches!(statements[0], Stmt::While { .. }));
}

#[test]
fn test_for_without_increment_keeps_bare_body() {
    let statements: Vec<Stmt> = parse("for (; false;) print 1;");

    let Stmt::While { body, .. } = &statements[0] else {
        panic!("expected while loop");
    };

    assert!(matches!(body.as_ref(), Stmt::Print(_)));
}

#[test]
fn test_class_declaration() {
    let statements: Vec<Stmt> = parse("class A < B { one() {} two(x, y) {} }");

    let Stmt::Class {
        name,
        superclass,
        methods,
    } = &statements[0]
    else {
        panic!("expected class, got {:?}", statements[0]);
    };

    assert_eq!(name.lexeme, "A");
    assert!(superclass.is_some());
    assert_eq!(methods.len(), 2);
    assert_eq!(methods[0].name.lexeme, "one");
    assert_eq!(methods[1].params.len(), 2);
}

#[test]
fn test_invalid_assignment_target() {
    assert_eq!(
        parse_err("1 = 2;"),
        "[Parse Error line at 1] Error at '=': Invalid assignment target"
    );
}

#[test]
fn test_property_assignment_target_is_accepted() {
    let statements: Vec<Stmt> = parse("a.b = 1;");

    assert!(matches!(statements[0], Stmt::Expression(_)));
}

#[test]
fn test_missing_semicolon() {
    assert_eq!(
        parse_err("print 1"),
        "[Parse Error line at 1] Error at end: Expect ';' after expression."
    );
}

#[test]
fn test_missing_variable_name() {
    assert_eq!(
        parse_err("var 1 = 2;"),
        "[Parse Error line at 1] Error at '1': Expect variable name."
    );
}

#[test]
fn test_unclosed_grouping() {
    assert_eq!(
        parse_err("(1 + 2;"),
        "[Parse Error line at 1] Error at ';': Expect ')' after expression."
    );
}

#[test]
fn test_super_requires_method_access() {
    assert_eq!(
        parse_err("super;"),
        "[Parse Error line at 1] Error at ';': Expect '.' after 'super'."
    );
}

#[test]
fn test_argument_limit_reports_without_unwinding() {
    let arguments: String = vec!["1"; 256].join(", ");
    let source: String = format!("f({});", arguments);

    let mut parser = Parser::new(
        Scanner::new(source.into_bytes())
            .scan_tokens()
            .expect("source should scan cleanly"),
    );

    let parsed: Result<Vec<Stmt>, LoxError> = parser.parse();

    // The statement still parses; the limit only latches the error flag.
    assert!(parsed.is_ok());
    assert!(parser.had_error());
}
