use glox::error::LoxError;
use glox::interpreter::Interpreter;
use glox::parser::Parser;
use glox::resolver::Resolver;
use glox::scanner::Scanner;

/// Run a program end to end and capture everything it printed.
fn run(source: &str) -> Result<String, LoxError> {
    let tokens = Scanner::new(source.as_bytes().to_vec()).scan_tokens()?;

    let mut parser = Parser::new(tokens);
    let statements = parser.parse()?;

    let mut interpreter = Interpreter::with_output(Vec::<u8>::new());

    Resolver::new(&mut interpreter).resolve(&statements)?;

    interpreter.interpret(&statements)?;

    Ok(String::from_utf8(interpreter.into_output()).expect("output is UTF-8"))
}

fn run_ok(source: &str) -> String {
    run(source).expect("program should run cleanly")
}

fn run_err(source: &str) -> String {
    run(source)
        .expect_err("program should fail at runtime")
        .to_string()
}

// ── Expressions ─────────────────────────────────────────────────────────────

#[test]
fn test_arithmetic_precedence() {
    assert_eq!(run_ok("print 1 + 2 * 3;"), "7\n");
}

#[test]
fn test_grouping_overrides_precedence() {
    assert_eq!(run_ok("print (1 + 2) * 3;"), "9\n");
}

#[test]
fn test_string_concatenation() {
    assert_eq!(
        run_ok("var a = \"foo\"; var b = \"bar\"; print a + b;"),
        "foobar\n"
    );
}

#[test]
fn test_number_formatting() {
    assert_eq!(run_ok("print 2.5; print 7.0; print -3;"), "2.5\n7\n-3\n");
}

#[test]
fn test_nil_and_booleans_print() {
    assert_eq!(run_ok("print nil; print true; print false;"), "nil\ntrue\nfalse\n");
}

#[test]
fn test_unary_operators() {
    assert_eq!(run_ok("print -(3); print !nil; print !0;"), "-3\ntrue\nfalse\n");
}

#[test]
fn test_comparison_operators() {
    assert_eq!(run_ok("print 1 < 2; print 2 <= 2; print 1 > 2; print 2 >= 3;"), "true\ntrue\nfalse\nfalse\n");
}

#[test]
fn test_equality() {
    assert_eq!(
        run_ok("print 1 == 1; print \"a\" == \"a\"; print nil == nil; print 1 == \"1\"; print 1 != 2;"),
        "true\ntrue\ntrue\nfalse\ntrue\n"
    );
}

#[test]
fn test_assignment_yields_the_assigned_value() {
    assert_eq!(run_ok("var a = 1; print a = 2; print a;"), "2\n2\n");
}

#[test]
fn test_truthiness_of_zero_and_empty_string() {
    assert_eq!(
        run_ok("if (0) print \"zero\"; if (\"\") print \"empty\"; if (nil) print \"nil\";"),
        "zero\nempty\n"
    );
}

#[test]
fn test_logical_operators_return_operands() {
    assert_eq!(
        run_ok("print \"a\" or \"b\"; print nil or \"b\"; print nil and \"b\"; print 1 and 2;"),
        "a\nb\nnil\n2\n"
    );
}

#[test]
fn test_short_circuit_skips_right_operand() {
    let source = r#"
        fun side() { print "evaluated"; return true; }
        var a = true or side();
        var b = false and side();
        print a; print b;
    "#;

    assert_eq!(run_ok(source), "true\nfalse\n");
}

// ── Statements and scoping ──────────────────────────────────────────────────

#[test]
fn test_block_scoping_and_shadowing() {
    assert_eq!(
        run_ok("var x = 1; { var x = 2; print x; } print x;"),
        "2\n1\n"
    );
}

#[test]
fn test_uninitialized_variable_is_nil() {
    assert_eq!(run_ok("var a; print a;"), "nil\n");
}

#[test]
fn test_if_else() {
    assert_eq!(
        run_ok("if (1 > 2) print \"then\"; else print \"else\";"),
        "else\n"
    );
}

#[test]
fn test_while_loop() {
    assert_eq!(
        run_ok("var i = 0; while (i < 3) { print i; i = i + 1; }"),
        "0\n1\n2\n"
    );
}

#[test]
fn test_for_loop() {
    assert_eq!(
        run_ok("for (var i = 0; i < 3; i = i + 1) print i;"),
        "0\n1\n2\n"
    );
}

#[test]
fn test_for_loop_matches_desugared_while() {
    let for_output: String = run_ok("for (var i = 0; i < 5; i = i + 1) print i * i;");
    let while_output: String =
        run_ok("{ var i = 0; while (i < 5) { print i * i; i = i + 1; } }");

    assert_eq!(for_output, while_output);
}

// ── Functions and closures ──────────────────────────────────────────────────

#[test]
fn test_closure_captures_enclosing_scope() {
    let source = r#"
        fun mk(n) {
            fun add(x) { return x + n; }
            return add;
        }
        var a = mk(3);
        print a(4);
        print a(10);
    "#;

    assert_eq!(run_ok(source), "7\n13\n");
}

#[test]
fn test_closure_captures_at_definition_time() {
    let source = r#"
        var x = "global";
        {
            fun show() { print x; }
            show();
            var x = "local";
            show();
        }
    "#;

    assert_eq!(run_ok(source), "global\nglobal\n");
}

#[test]
fn test_closures_share_mutable_state() {
    let source = r#"
        fun makeCounter() {
            var i = 0;
            fun count() { i = i + 1; print i; }
            return count;
        }
        var counter = makeCounter();
        counter();
        counter();
    "#;

    assert_eq!(run_ok(source), "1\n2\n");
}

#[test]
fn test_recursion() {
    let source = r#"
        fun fib(n) {
            if (n < 2) return n;
            return fib(n - 1) + fib(n - 2);
        }
        print fib(10);
    "#;

    assert_eq!(run_ok(source), "55\n");
}

#[test]
fn test_return_unwinds_nested_blocks_and_loops() {
    let source = r#"
        fun firstOver(n) {
            for (var i = 0;; i = i + 1) {
                if (i > n) return i;
            }
        }
        print firstOver(2);
    "#;

    assert_eq!(run_ok(source), "3\n");
}

#[test]
fn test_function_without_return_yields_nil() {
    assert_eq!(run_ok("fun f() {} print f();"), "nil\n");
}

#[test]
fn test_bare_return_yields_nil() {
    assert_eq!(run_ok("fun f() { return; } print f();"), "nil\n");
}

#[test]
fn test_function_prints_by_name() {
    assert_eq!(run_ok("fun f() {} print f;"), "<fn f>\n");
}

#[test]
fn test_clock_is_a_native_number_source() {
    assert_eq!(
        run_ok("print clock; print clock() >= 0;"),
        "<native fn clock>\ntrue\n"
    );
}

// ── Classes, instances, inheritance ─────────────────────────────────────────

#[test]
fn test_initializer_sets_fields() {
    assert_eq!(
        run_ok("class C { init(v) { this.v = v; } } var c = C(9); print c.v;"),
        "9\n"
    );
}

#[test]
fn test_super_dispatch() {
    let source = r#"
        class A { greet() { print "hi"; } }
        class B < A { greet() { super.greet(); print "there"; } }
        B().greet();
    "#;

    assert_eq!(run_ok(source), "hi\nthere\n");
}

#[test]
fn test_method_lookup_walks_the_superclass_chain() {
    let source = r#"
        class A { m() { print "from A"; } }
        class B < A {}
        class C < B {}
        C().m();
    "#;

    assert_eq!(run_ok(source), "from A\n");
}

#[test]
fn test_subclass_overrides_method() {
    let source = r#"
        class A { m() { print "A"; } }
        class B < A { m() { print "B"; } }
        B().m();
    "#;

    assert_eq!(run_ok(source), "B\n");
}

#[test]
fn test_bound_method_retains_receiver() {
    let source = r#"
        class Person {
            init(name) { this.name = name; }
            greet() { print this.name; }
        }
        var p = Person("ada");
        var m = p.greet;
        m();
    "#;

    assert_eq!(run_ok(source), "ada\n");
}

#[test]
fn test_fields_shadow_methods() {
    let source = r#"
        class C { m() { print "method"; } }
        var c = C();
        c.m = "field";
        print c.m;
    "#;

    assert_eq!(run_ok(source), "field\n");
}

#[test]
fn test_fields_are_per_instance() {
    let source = r#"
        class C {}
        var a = C();
        var b = C();
        a.x = 1;
        b.x = 2;
        print a.x; print b.x;
    "#;

    assert_eq!(run_ok(source), "1\n2\n");
}

#[test]
fn test_initializer_called_directly_returns_this() {
    let source = r#"
        class C { init() { this.v = 1; } }
        var c = C();
        print c.init().v;
    "#;

    assert_eq!(run_ok(source), "1\n");
}

#[test]
fn test_methods_can_reference_class_by_name() {
    let source = r#"
        class C {
            make() { return C(); }
        }
        print C().make();
    "#;

    assert_eq!(run_ok(source), "C instance: fields: {}\n");
}

#[test]
fn test_class_prints_by_name() {
    assert_eq!(run_ok("class C {} print C;"), "C\n");
}

#[test]
fn test_instance_prints_field_dump() {
    assert_eq!(
        run_ok("class P { init() { this.x = 1; } } print P();"),
        "P instance: fields: {x: 1}\n"
    );
}

#[test]
fn test_distinct_instances_are_not_equal() {
    assert_eq!(run_ok("class C {} print C() == C();"), "false\n");
}

// ── Runtime errors ──────────────────────────────────────────────────────────

#[test]
fn test_division_by_zero() {
    assert_eq!(run_err("print 1 / 0;"), "[Runtime Error at line 1] Division by zero");
}

#[test]
fn test_operand_must_be_a_number() {
    assert_eq!(
        run_err("print -\"a\";"),
        "[Runtime Error at line 1] Operand must be a number."
    );
}

#[test]
fn test_operands_must_be_numbers() {
    assert_eq!(
        run_err("print 1 < \"a\";"),
        "[Runtime Error at line 1] Operands must be numbers."
    );
}

#[test]
fn test_mixed_addition_is_an_error() {
    assert_eq!(
        run_err("print 1 + \"a\";"),
        "[Runtime Error at line 1] Operands must be two numbers or two strings."
    );
}

#[test]
fn test_calling_a_non_callable() {
    assert_eq!(
        run_err("\"not a function\"();"),
        "[Runtime Error at line 1] Can only call functions and classes."
    );
}

#[test]
fn test_arity_mismatch() {
    assert_eq!(
        run_err("fun f(a, b) {} f(1);"),
        "[Runtime Error at line 1] Expected 2 arguments but got 1."
    );
}

#[test]
fn test_class_arity_follows_initializer() {
    assert_eq!(
        run_err("class C { init(a) {} } C();"),
        "[Runtime Error at line 1] Expected 1 arguments but got 0."
    );
}

#[test]
fn test_undefined_variable() {
    assert_eq!(
        run_err("print missing;"),
        "[Runtime Error at line 1] Undefined variable: 'missing'"
    );
}

#[test]
fn test_undefined_property() {
    assert_eq!(
        run_err("class C {} C().missing;"),
        "[Runtime Error at line 1] Undefined property 'missing'."
    );
}

#[test]
fn test_property_read_on_non_instance() {
    assert_eq!(
        run_err("var x = 1; x.y;"),
        "[Runtime Error at line 1] only instances have properties."
    );
}

#[test]
fn test_field_write_on_non_instance() {
    assert_eq!(
        run_err("var x = 1; x.y = 2;"),
        "[Runtime Error at line 1] Only instances have fields."
    );
}

#[test]
fn test_superclass_must_be_a_class() {
    assert_eq!(
        run_err("var NotAClass = 1; class C < NotAClass {}"),
        "[Runtime Error at line 1] Superclass must be a class."
    );
}

#[test]
fn test_undefined_super_method() {
    let source = r#"class A {}
class B < A { m() { super.missing(); } }
B().m();"#;

    assert_eq!(
        run_err(source),
        "[Runtime Error at line 2] Undefined property 'missing'."
    );
}

#[test]
fn test_global_state_persists_across_interpret_calls() {
    // Mirrors the interactive prompt: one interpreter, several programs.
    let mut interpreter = Interpreter::with_output(Vec::<u8>::new());

    for source in ["var a = 1;", "a = a + 1;", "print a;"] {
        let tokens = Scanner::new(source.as_bytes().to_vec())
            .scan_tokens()
            .expect("scan");

        let statements = Parser::new(tokens).parse().expect("parse");

        Resolver::new(&mut interpreter)
            .resolve(&statements)
            .expect("resolve");

        interpreter.interpret(&statements).expect("interpret");
    }

    assert_eq!(
        String::from_utf8(interpreter.into_output()).expect("utf8"),
        "2\n"
    );
}
