use std::io::Write;

use flowlang::run_program;
use pretty_assertions::assert_eq;
use tempfile::NamedTempFile;

/// Runs a script, capturing its output. Returns the output on success and
/// the rendered diagnostic on failure.
fn run(source: &str) -> Result<String, String> {
    let mut out = Vec::new();
    let result = run_program(source, Box::new(&mut out));
    let output = String::from_utf8(out).expect("output was not UTF-8");
    match result {
        Ok(()) => Ok(output),
        Err(e) => Err(e.to_string()),
    }
}

fn assert_output(source: &str, expected: &str) {
    match run(source) {
        Ok(output) => assert_eq!(output, expected),
        Err(e) => panic!("Script failed: {e}\nSource:\n{source}"),
    }
}

fn assert_failure(source: &str, fragment: &str) {
    match run(source) {
        Ok(output) => {
            panic!("Script succeeded but was expected to fail.\nOutput:\n{output}")
        },
        Err(e) => {
            assert!(e.contains(fragment), "error '{e}' does not mention '{fragment}'");
        },
    }
}

fn csv_fixture(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("failed to create a temp file");
    file.write_all(contents.as_bytes()).expect("failed to write the fixture");
    file.flush().expect("failed to flush the fixture");
    file
}

#[test]
fn prints_declared_scalars() {
    assert_output(r#"void main(){ int x=10; float y=20.5; print("x: "+x); print("y: "+y);}"#,
                  "x: 10\ny: 20.5\n");
}

#[test]
fn for_loop_counts_up() {
    assert_output(r#"
        void main() {
            int i = 0;
            for (i = 0; i < 3; i = i + 1) {
                print("For: " + i);
            }
        }
    "#,
                  "For: 0\nFor: 1\nFor: 2\n");
}

#[test]
fn user_functions_return_values() {
    assert_output(r#"int add(int a,int b){return a+b;} void main(){print("Sum: "+add(5,7));}"#,
                  "Sum: 12\n");
}

#[test]
fn division_by_zero_is_fatal() {
    let err = run("void main(){int x=10;int y=0;print(x/y);}").unwrap_err();
    assert!(err.contains("Division by zero"), "unexpected error: {err}");

    let mut out = Vec::new();
    let _ = run_program("void main(){int x=10;int y=0;print(x/y);}", Box::new(&mut out));
    assert!(out.is_empty(), "expected no output before the error");
}

#[test]
fn break_outside_a_loop_is_fatal() {
    assert_failure("void main(){break;}", "'break' outside of a loop");
    assert_failure("void main(){continue;}", "'continue' outside of a loop");
}

#[test]
fn return_at_the_top_level_is_fatal() {
    assert_failure("return 1;", "'return' outside of a function");
}

#[test]
fn numeric_coercion_and_display() {
    assert_output("void main(){ print(10 + 3.0); }", "13.0\n");
    assert_output("void main(){ print(10 / 3); }", "3\n");
    assert_output("void main(){ print(7 % 3); }", "1\n");
    assert_output("void main(){ print(2.0); }", "2.0\n");
    assert_output("void main(){ print(-2.5 * 2.0); }", "-5.0\n");
}

#[test]
fn assignment_chains_to_the_right() {
    assert_output(r#"
        void main() {
            int a = 1;
            int b = 2;
            a = b = 20;
            print(a);
            print(b);
        }
    "#,
                  "20\n20\n");
}

#[test]
fn else_if_selects_the_first_truthy_branch() {
    assert_output(r#"
        void main() {
            int x = 2;
            if (x == 1) { print("one"); }
            else_if (x == 2) { print("two"); }
            else_if (x > 0) { print("positive"); }
            else { print("other"); }
        }
    "#,
                  "two\n");
}

#[test]
fn comments_and_string_escapes() {
    assert_output("# a leading comment\nvoid main() {\n    print(\"a\\tb\"); # trailing\n}\n",
                  "a\tb\n");
}

#[test]
fn block_scopes_end_with_the_block() {
    assert_failure(r#"
        void main() {
            if (true) {
                int hidden = 1;
            }
            print(hidden);
        }
    "#,
                   "Unknown variable 'hidden'");
}

#[test]
fn assignment_mutates_the_enclosing_scope() {
    assert_output(r#"
        void main() {
            int x = 1;
            if (true) {
                x = 5;
            }
            print(x);
        }
    "#,
                  "5\n");
}

#[test]
fn shadowing_leaves_the_outer_binding_alone() {
    assert_output(r#"
        void main() {
            int x = 1;
            if (true) {
                int x = 2;
                print(x);
            }
            print(x);
        }
    "#,
                  "2\n1\n");
}

#[test]
fn redeclaration_in_one_scope_is_fatal() {
    assert_failure("void main(){ int x = 1; int x = 2; }", "already declared");
}

#[test]
fn functions_capture_their_defining_scope() {
    assert_output(r#"
        int counter = 0;
        void bump() { counter = counter + 1; }
        void main() {
            bump();
            bump();
            print(counter);
        }
    "#,
                  "2\n");

    assert_output(r#"
        void main() {
            int base = 10;
            int add_base(int n) { return base + n; }
            print(add_base(5));
        }
    "#,
                  "15\n");
}

#[test]
fn recursion_works() {
    assert_output(r#"
        int fact(int n) {
            if (n <= 1) { return 1; }
            return n * fact(n - 1);
        }
        void main() { print(fact(5)); }
    "#,
                  "120\n");
}

#[test]
fn break_terminates_only_the_innermost_loop() {
    assert_output(r#"
        void main() {
            int total = 0;
            int i = 0;
            while (i < 2) {
                int j = 0;
                while (true) {
                    j = j + 1;
                    if (j == 1) {
                        break;
                    }
                }
                total = total + j;
                i = i + 1;
            }
            print(total);
        }
    "#,
                  "2\n");
}

#[test]
fn continue_still_runs_the_for_post_expression() {
    // If continue skipped the post expression this would never terminate.
    assert_output(r#"
        void main() {
            int i = 0;
            int sum = 0;
            for (i = 0; i < 5; i = i + 1) {
                if (i % 2 == 0) {
                    continue;
                }
                sum = sum + i;
            }
            print(sum);
        }
    "#,
                  "4\n");
}

#[test]
fn return_unwinds_through_nested_control_flow() {
    assert_output(r#"
        int find() {
            int i = 0;
            while (true) {
                if (i == 3) {
                    return i;
                }
                i = i + 1;
            }
            return -1;
        }
        void main() { print(find()); }
    "#,
                  "3\n");
}

#[test]
fn return_contracts_are_checked() {
    assert_failure("void f() { return 1; } void main() { f(); }",
                   "must not return a value");
    assert_failure("int g() { } void main() { print(g()); }", "must return a value");
}

#[test]
fn main_must_exist_with_the_right_signature() {
    assert_failure("int x = 1;", "does not define a 'main' function");
    assert_failure("void main(int a) { }", "Invalid 'main' signature");
    assert_failure("int main() { return 1; }", "Invalid 'main' signature");
}

#[test]
fn string_equality_never_errors() {
    assert_output(r#"void main(){ print("1" == 1); print("1" != 1); }"#,
                  "false\ntrue\n");
    assert_failure("void main(){ print(1 == true); }", "Type error");
}

#[test]
fn logic_operators_demand_booleans() {
    assert_output("void main(){ print(true && false); print(false || true); }",
                  "false\ntrue\n");
    assert_failure("void main(){ print(1 && true); }", "expected a bool");
}

#[test]
fn logic_evaluates_both_operands() {
    assert_failure("void main(){ bool b = false && 1 / 0 == 0; print(b); }",
                   "Division by zero");
    assert_output(r#"
        bool noisy() { print("evaluated"); return true; }
        void main() { print(true || noisy()); }
    "#,
                  "evaluated\ntrue\n");
}

#[test]
fn arity_mismatches_are_fatal() {
    assert_failure("int add(int a,int b){return a+b;} void main(){print(add(5));}",
                   "expects 2 argument(s), found 1");
    assert_failure("void main(){ print(); }", "expects 1 argument(s), found 0");
}

#[test]
fn native_argument_contracts_are_checked() {
    assert_failure("void main(){ csv_to_array(1); }", "expected a string argument");
    assert_failure(r#"void main(){ import_csv("no/such/file.csv"); }"#, "I/O error");
}

#[test]
fn csv_round_trip_through_the_array_natives() {
    let file = csv_fixture("id,name\n1,ada\n2,grace\n");
    let path = file.path().display();

    assert_output(&format!(r#"
        void main() {{
            string[][] t = csv_to_array("{path}");
            print(row_length(t));
            print(col_length(t));
            print(t[0][1]);
            print(t[1][0]);
            print(t[2][1]);
        }}
    "#),
                  "3\n2\nname\n1\ngrace\n");
}

#[test]
fn missing_csv_cells_become_the_null_sentinel() {
    let file = csv_fixture("id,name\n1,\n");
    let path = file.path().display();

    assert_output(&format!(r#"
        void main() {{
            string[][] t = csv_to_array("{path}");
            print(t[1][1]);
        }}
    "#),
                  "NULL\n");
}

#[test]
fn cell_writes_are_visible_through_aliases() {
    let file = csv_fixture("id,name\n1,ada\n");
    let path = file.path().display();

    assert_output(&format!(r#"
        void main() {{
            string[][] t = csv_to_array("{path}");
            string[][] u = csv_to_array("{path}");
            u = t;
            u[0][0] = "ID";
            print(t[0][0]);
        }}
    "#),
                  "ID\n");
}

#[test]
fn cell_indices_are_bounds_checked() {
    let file = csv_fixture("id,name\n1,ada\n");
    let path = file.path().display();

    let source = format!(r#"
        void main() {{
            string[][] t = csv_to_array("{path}");
            print(t[5][0]);
        }}
    "#);
    assert_failure(&source, "out of bounds");
}

#[test]
fn import_csv_echoes_the_table() {
    let file = csv_fixture("id,name\n1,ada\n2,\n");
    let path = file.path().display();

    assert_output(&format!(r#"void main() {{ import_csv("{path}"); }}"#),
                  &format!("--- CSV Data from: {path} ---\n\
                            id\t|\tname\n\
                            ------------------------------------\n\
                            1\t|\tada\n\
                            2\t|\tNULL\n\
                            ------------------------------------\n"));
}

#[test]
fn generate_table_emits_ddl_and_inserts() {
    let file = csv_fixture("id,name,born\n1,o'clock,1815-12-10\n2,,1906-12-09\n");
    let path = file.path().display();

    assert_output(&format!(r#"
        void main() {{
            string[][] t = csv_to_array("{path}");
            generate_table(t, 0);
        }}
    "#),
                  "--- Generated SQL ---\n\
                   CREATE TABLE GENERATED_TABLE (\n\
                   \x20 ID NUMBER NOT NULL,\n\
                   \x20 NAME VARCHAR2(255),\n\
                   \x20 BORN DATE NOT NULL,\n\
                   \x20 CONSTRAINT PK_GENERATED_TABLE PRIMARY KEY (ID)\n\
                   );\n\
                   \n\
                   INSERT INTO GENERATED_TABLE (ID, NAME, BORN) VALUES ('1', 'o''clock', '1815-12-10');\n\
                   INSERT INTO GENERATED_TABLE (ID, NAME, BORN) VALUES ('2', NULL, '1906-12-09');\n\
                   ---------------------\n");
}

#[test]
fn generate_table_checks_the_primary_key_index() {
    let file = csv_fixture("id,name\n1,ada\n");
    let path = file.path().display();

    let source = format!(r#"
        void main() {{
            string[][] t = csv_to_array("{path}");
            generate_table(t, 9);
        }}
    "#);
    assert_failure(&source, "out of range");
}

#[test]
fn array_declarations_only_accept_csv_to_array() {
    assert_failure("void main(){ string[][] t = 1; }", "csv_to_array");
    assert_failure("void main(){ string[][] t; }", "must be initialized");
}

#[test]
fn arrays_support_no_operators() {
    let file = csv_fixture("id\n1\n");
    let path = file.path().display();

    let source = format!(r#"
        void main() {{
            string[][] t = csv_to_array("{path}");
            print(t + 1);
        }}
    "#);
    assert_failure(&source, "not supported for array");
}
