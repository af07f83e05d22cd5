//! Recognition of the canonical counting-loop shape:
//! `for (int i = initializer; i < bound; i++)` and its variants
//! (decrement, inclusive bound, flipped operand order, `!=` bound).

use crate::ast::navigate::{other_operand, unwrap_parens, OperandSide};
use crate::ast::{Expr, ForInit, ForStmt};
use crate::span::{Span, Spanned};
use crate::types::{self, PrimTy};

use super::access::{self, StepDirection};
use super::context::TypeContext;
use super::relation::Relation;

/// A recognized counting loop.
///
/// Immutable once constructed; borrows the loop's subtree and never
/// outlives it. Downstream passes read the accessors, nothing more.
#[derive(Debug)]
pub struct CountingLoop<'a> {
    loop_stmt: &'a ForStmt,
    counter_name: &'a str,
    counter_span: Span,
    counter_ty: PrimTy,
    initializer: &'a Spanned<Expr>,
    bound: &'a Spanned<Expr>,
    including: bool,
    descending: bool,
    may_overflow: bool,
}

impl<'a> CountingLoop<'a> {
    /// Try to recognize `for_stmt` as a counting loop.
    ///
    /// `cx` must hold the bindings in scope at the loop header,
    /// including the loop's own declaration. A `None` is the expected
    /// outcome for any loop that is not a single-counter, unit-step,
    /// inequality-bounded shape — it is not an error.
    pub fn from_for(for_stmt: &'a ForStmt, cx: &TypeContext) -> Option<CountingLoop<'a>> {
        // Initialization: exactly one declared variable of type int or
        // long, with an initializer.
        let Some(ForInit::Decl(decl)) = &for_stmt.init else {
            return None;
        };
        let [declarator] = decl.declarators.as_slice() else {
            return None;
        };
        let counter_ty = decl.ty.node;
        if counter_ty != PrimTy::Int && counter_ty != PrimTy::Long {
            return None;
        }
        let initializer = unwrap_parens(declarator.init.as_ref()?);
        let counter_name = declarator.name.node.as_str();

        // Update: the counter stepped by exactly one, nothing else.
        let direction = access::counting_step(counter_name, &for_stmt.update)?;
        let descending = direction == StepDirection::Down;

        // Condition: a binary comparison using an inequality operator.
        // The inclusivity of the bound is read off before any flipping.
        let condition = unwrap_parens(for_stmt.cond.as_ref()?);
        let Expr::Binary { op, lhs, rhs } = &condition.node else {
            return None;
        };
        let mut relation = Relation::from_bin_op(*op)?;
        if !relation.is_inequality() {
            return None;
        }
        let including = Relation::Eq.is_sub_relation_of(relation);

        // Restate a descending loop in ascending terms.
        if descending {
            relation = relation.flipped();
        }

        // Exactly one operand is the counter; the other is the bound.
        // A counter on the right means the relation reads `bound rel
        // counter`, so flip once more to get `counter rel bound`.
        let (bound, counter_side) = other_operand(lhs, rhs, counter_name)?;
        if counter_side == OperandSide::Right {
            relation = relation.flipped();
        }

        // After normalization only `<`, `<=`, and `!=` describe a loop
        // that terminates by counting up; a `!=` bound can wrap past the
        // numeric range before it terminates.
        if !Relation::Lt.is_sub_relation_of(relation) {
            return None;
        }
        let may_overflow = relation == Relation::Ne;

        // The bound must be assignable to the counter's type.
        let bound_ty = cx.infer(bound)?;
        if !types::is_assignment_compatible(counter_ty, bound_ty) {
            return None;
        }

        // The body must not write to the counter.
        if access::is_assigned(counter_name, &for_stmt.body) {
            return None;
        }

        Some(CountingLoop {
            loop_stmt: for_stmt,
            counter_name,
            counter_span: declarator.name.span,
            counter_ty,
            initializer,
            bound,
            including,
            descending,
            may_overflow,
        })
    }

    /// The loop this descriptor was recognized from.
    pub fn loop_stmt(&self) -> &'a ForStmt {
        self.loop_stmt
    }

    /// The counter variable's name.
    pub fn counter_name(&self) -> &'a str {
        self.counter_name
    }

    /// The counter's declaration site.
    pub fn counter_span(&self) -> Span {
        self.counter_span
    }

    /// The counter's declared type — always `int` or `long`.
    pub fn counter_ty(&self) -> PrimTy {
        self.counter_ty
    }

    /// The counter's initial value, parentheses stripped. Not evaluated.
    pub fn initializer(&self) -> &'a Spanned<Expr> {
        self.initializer
    }

    /// The expression the counter is compared against. Not evaluated.
    pub fn bound(&self) -> &'a Spanned<Expr> {
        self.bound
    }

    /// True if the bound itself is reached (`<=`/`>=`), false for a
    /// strict bound (`<`/`>`).
    pub fn is_including(&self) -> bool {
        self.including
    }

    /// True if the counter decreases each iteration.
    pub fn is_descending(&self) -> bool {
        self.descending
    }

    /// True if the counter can wrap past the numeric range before the
    /// loop terminates, as in `for (int i = 10; i != -10; i++)`.
    pub fn may_overflow(&self) -> bool {
        self.may_overflow
    }
}
