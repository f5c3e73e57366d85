use glox::interpreter::Interpreter;
use glox::parser::Parser;
use glox::resolver::Resolver;
use glox::scanner::Scanner;

/// Scan, parse, and resolve; the resolution diagnostic (or lack of one) is
/// the observable under test.
fn resolve(source: &str) -> Result<(), String> {
    let tokens = Scanner::new(source.as_bytes().to_vec())
        .scan_tokens()
        .expect("source should scan cleanly");

    let mut parser = Parser::new(tokens);
    let statements = parser.parse().expect("source should parse cleanly");

    let mut interpreter = Interpreter::with_output(Vec::<u8>::new());

    Resolver::new(&mut interpreter)
        .resolve(&statements)
        .map_err(|e| e.to_string())
}

#[test]
fn test_read_in_own_initializer() {
    assert_eq!(
        resolve("{ var a = a; }"),
        Err(
            "[Resolution Error at line 1] Cannot read local variable in its own initializer."
                .to_string()
        )
    );
}

#[test]
fn test_global_self_reference_is_allowed() {
    // The global scope is not on the scope stack, so the static check does
    // not apply there.
    assert_eq!(resolve("var a = 1; var b = b;"), Ok(()));
}

#[test]
fn test_duplicate_declaration_in_local_scope() {
    assert_eq!(
        resolve("{ var a = 1; var a = 2; }"),
        Err(
            "[Resolution Error at line 1] Variable with this name already declared in this scope."
                .to_string()
        )
    );
}

#[test]
fn test_duplicate_declaration_in_globals_is_allowed() {
    assert_eq!(resolve("var a = 1; var a = 2;"), Ok(()));
}

#[test]
fn test_duplicate_parameter_names() {
    assert!(resolve("fun f(a, a) {}").is_err());
}

#[test]
fn test_return_at_top_level() {
    assert_eq!(
        resolve("return 1;"),
        Err("[Resolution Error at line 1] Cannot return from top-level code.".to_string())
    );
}

#[test]
fn test_return_value_from_initializer() {
    assert_eq!(
        resolve("class C { init() { return 5; } }"),
        Err("[Resolution Error at line 1] Cannot return from an initializer.".to_string())
    );
}

#[test]
fn test_bare_return_from_initializer_is_allowed() {
    assert_eq!(resolve("class C { init() { return; } }"), Ok(()));
}

#[test]
fn test_return_value_from_ordinary_method_is_allowed() {
    assert_eq!(resolve("class C { m() { return 5; } }"), Ok(()));
}

#[test]
fn test_this_outside_class() {
    assert_eq!(
        resolve("print this;"),
        Err("[Resolution Error at line 1] Cannot use 'this' outside of a class.".to_string())
    );
}

#[test]
fn test_this_in_standalone_function() {
    assert!(resolve("fun f() { print this; }").is_err());
}

#[test]
fn test_super_outside_class() {
    assert_eq!(
        resolve("super.m();"),
        Err("[Resolution Error at line 1] Cannot use 'super' outside of a class.".to_string())
    );
}

#[test]
fn test_super_without_superclass() {
    assert_eq!(
        resolve("class C { m() { super.m(); } }"),
        Err(
            "[Resolution Error at line 1] Cannot use 'super' in a class with no superclass."
                .to_string()
        )
    );
}

#[test]
fn test_super_in_subclass_is_allowed() {
    assert_eq!(
        resolve("class A { m() {} } class B < A { m() { super.m(); } }"),
        Ok(())
    );
}

#[test]
fn test_self_inheritance() {
    assert_eq!(
        resolve("class A < A {}"),
        Err("[Resolution Error at line 1] A class cannot inherit from itself.".to_string())
    );
}

#[test]
fn test_function_may_recurse() {
    assert_eq!(resolve("fun f(n) { if (n > 0) f(n - 1); }"), Ok(()));
}

#[test]
fn test_shadowing_across_scopes_is_allowed() {
    assert_eq!(resolve("var a = 1; { var a = 2; { var a = 3; } }"), Ok(()));
}
