//! Loops the recognizer must accept, and the descriptors it must build.

use super::{parse, recognize, recognizes};
use crate::ast::display::render_expr;
use crate::ast::navigate::unwrap_parens;
use crate::ast::Expr;
use crate::types::PrimTy;

#[test]
fn test_ascending_exclusive() {
    let file = parse("int main() { for (int i = 0; i < 10; i++) { } return 0; }");
    let found = recognize(&file).expect("loop must be recognized");
    assert_eq!(found.counter_name(), "i");
    assert_eq!(found.counter_ty(), PrimTy::Int);
    assert_eq!(render_expr(&found.initializer().node), "0");
    assert_eq!(render_expr(&found.bound().node), "10");
    assert!(!found.is_including());
    assert!(!found.is_descending());
    assert!(!found.may_overflow());
}

#[test]
fn test_inclusive_bound() {
    let file = parse("int main() { for (int i = 0; i <= 10; i++) { } return 0; }");
    let found = recognize(&file).expect("loop must be recognized");
    assert!(found.is_including());
    assert!(!found.is_descending());
    assert!(!found.may_overflow());
}

#[test]
fn test_descending_inclusive() {
    let file = parse("int main() { for (int i = 10; i >= 0; i--) { } return 0; }");
    let found = recognize(&file).expect("loop must be recognized");
    assert!(found.is_descending());
    assert!(found.is_including());
    assert_eq!(render_expr(&found.initializer().node), "10");
    assert_eq!(render_expr(&found.bound().node), "0");
}

#[test]
fn test_descending_exclusive() {
    let file = parse("int main() { for (int i = 10; i > 0; i--) { } return 0; }");
    let found = recognize(&file).expect("loop must be recognized");
    assert!(found.is_descending());
    assert!(!found.is_including());
}

#[test]
fn test_flipped_operand_order() {
    // `10 > i` must recognize identically to `i < 10`
    let file = parse("int main() { for (int i = 0; 10 > i; i++) { } return 0; }");
    let found = recognize(&file).expect("loop must be recognized");
    assert!(!found.is_including());
    assert!(!found.is_descending());
    assert!(!found.may_overflow());
    assert_eq!(render_expr(&found.bound().node), "10");
}

#[test]
fn test_flipped_descending() {
    // `0 <= i` with `i--` is the descending inclusive loop to 0
    let file = parse("int main() { for (int i = 10; 0 <= i; i--) { } return 0; }");
    let found = recognize(&file).expect("loop must be recognized");
    assert!(found.is_descending());
    assert!(found.is_including());
    assert_eq!(render_expr(&found.bound().node), "0");
}

#[test]
fn test_not_equal_bound_may_overflow() {
    let file = parse("int main() { for (int i = 0; i != -10; i++) { } return 0; }");
    let found = recognize(&file).expect("loop must be recognized");
    assert!(found.may_overflow());
    assert!(!found.is_including());
    assert_eq!(render_expr(&found.bound().node), "-10");
}

#[test]
fn test_not_equal_flipped_operands() {
    let file = parse("int main() { for (int i = 0; 100 != i; i++) { } return 0; }");
    let found = recognize(&file).expect("loop must be recognized");
    assert!(found.may_overflow());
}

#[test]
fn test_parenthesized_clauses() {
    let file = parse("int main() { for (int i = (0); ((i) < (10)); i++) { } return 0; }");
    let found = recognize(&file).expect("loop must be recognized");
    // the initializer is handed out with parentheses stripped
    assert!(matches!(
        found.initializer().node,
        Expr::IntLit { value: 0, .. }
    ));
    // the bound keeps its surface form; unwrapping reaches the literal
    assert!(matches!(
        unwrap_parens(found.bound()).node,
        Expr::IntLit { value: 10, .. }
    ));
    assert!(!found.is_including());
}

#[test]
fn test_long_counter() {
    let file = parse("int main() { for (long i = 0; i < 10L; i++) { } return 0; }");
    let found = recognize(&file).expect("loop must be recognized");
    assert_eq!(found.counter_ty(), PrimTy::Long);
}

#[test]
fn test_int_bound_widens_to_long_counter() {
    let file = parse("int main() { for (long i = 0; i < 10; i++) { } return 0; }");
    assert!(recognize(&file).is_some());
}

#[test]
fn test_declared_variable_bound() {
    let file = parse("int main() { int n = 100; for (int i = 0; i < n; i++) { } return 0; }");
    let found = recognize(&file).expect("loop must be recognized");
    assert_eq!(render_expr(&found.bound().node), "n");
}

#[test]
fn test_narrow_integral_bound_widens() {
    assert!(recognizes(
        "void f(short n) { for (int i = 0; i < n; i++) { } }"
    ));
    assert!(recognizes(
        "void f(char c) { for (int i = 0; i < c; i++) { } }"
    ));
}

#[test]
fn test_call_bound_with_known_signature() {
    assert!(recognizes(
        "void f() { for (int i = 0; i < size(); i++) { } }\nint size() { return 4; }"
    ));
}

#[test]
fn test_compound_expression_bound() {
    let file = parse("void f(int n) { for (int i = 0; i < n * 2 + 1; i++) { } }");
    let found = recognize(&file).expect("loop must be recognized");
    assert_eq!(render_expr(&found.bound().node), "n * 2 + 1");
}

#[test]
fn test_alternative_step_forms() {
    assert!(recognizes("void f() { for (int i = 0; i < 9; i += 1) { } }"));
    assert!(recognizes("void f() { for (int i = 0; i < 9; i = i + 1) { } }"));
    assert!(recognizes("void f() { for (int i = 0; i < 9; i = 1 + i) { } }"));
    assert!(recognizes("void f() { for (int i = 9; i > 0; i -= 1) { } }"));
    assert!(recognizes("void f() { for (int i = 9; i > 0; i = i - 1) { } }"));
    assert!(recognizes("void f() { for (int i = 9; i > 0; --i) { } }"));
}

#[test]
fn test_reads_of_counter_in_body_are_fine() {
    assert!(recognizes(
        "void f() { int s; for (int i = 0; i < 9; i++) { s = s + i; } }"
    ));
}

#[test]
fn test_shadowed_redeclaration_is_not_interference() {
    assert!(recognizes(
        "void f() { for (int i = 0; i < 10; i++) { { int i = 5; i = 6; } } }"
    ));
}

#[test]
fn test_recognition_is_idempotent() {
    let file = parse("int main() { for (int i = 3; i <= 7; i++) { } return 0; }");
    let first = recognize(&file).expect("loop must be recognized");
    let second = recognize(&file).expect("loop must be recognized");
    assert_eq!(first.counter_name(), second.counter_name());
    assert_eq!(first.counter_ty(), second.counter_ty());
    assert_eq!(
        render_expr(&first.initializer().node),
        render_expr(&second.initializer().node)
    );
    assert_eq!(
        render_expr(&first.bound().node),
        render_expr(&second.bound().node)
    );
    assert_eq!(first.is_including(), second.is_including());
    assert_eq!(first.is_descending(), second.is_descending());
    assert_eq!(first.may_overflow(), second.may_overflow());
}
