//! Pre-order traversal of syntax trees with namespace tracking.
//!
//! `namespace Foo;` switches the namespace for the statements that follow it
//! in the same list. `namespace Foo { ... }` applies only to its body.

use critic_repr::{Expr, Expr_, Name, Stmt, Stmt_, VarName};

/// Callbacks for [`walk_unit`]. Each hook receives the namespace the node
/// appears in.
pub trait Visitor {
    fn visit_stmt(&mut self, _stmt: &Stmt, _namespace: &str) {}

    fn visit_expr(&mut self, _expr: &Expr, _namespace: &str) {}
}

/// Walk a unit's top-level statements, starting in the global namespace.
pub fn walk_unit<V: Visitor + ?Sized>(stmts: &[Stmt], visitor: &mut V) {
    let mut namespace = String::new();
    walk_stmts(stmts, &mut namespace, visitor);
}

fn walk_stmts<V: Visitor + ?Sized>(stmts: &[Stmt], namespace: &mut String, visitor: &mut V) {
    for stmt in stmts {
        walk_stmt(stmt, namespace, visitor);
    }
}

fn walk_stmt<V: Visitor + ?Sized>(stmt: &Stmt, namespace: &mut String, visitor: &mut V) {
    visitor.visit_stmt(stmt, namespace);

    match &stmt.value {
        Stmt_::Namespace { name, body } => {
            let declared = name.as_ref().map(Name::joined).unwrap_or_default();
            match body {
                Some(body) => {
                    let mut inner = declared;
                    walk_stmts(body, &mut inner, visitor);
                }
                None => *namespace = declared,
            }
        }
        Stmt_::Expr(e) => walk_expr(e, namespace, visitor),
        Stmt_::Block(stmts) => walk_stmts(stmts, namespace, visitor),
        Stmt_::If {
            cond,
            body,
            elseifs,
            else_,
        } => {
            walk_expr(cond, namespace, visitor);
            walk_stmt(body, namespace, visitor);
            for elseif in elseifs {
                walk_expr(&elseif.cond, namespace, visitor);
                walk_stmt(&elseif.body, namespace, visitor);
            }
            if let Some(else_) = else_ {
                walk_stmt(else_, namespace, visitor);
            }
        }
        Stmt_::While { cond, body } => {
            walk_expr(cond, namespace, visitor);
            walk_stmt(body, namespace, visitor);
        }
        Stmt_::DoWhile { body, cond } => {
            walk_stmt(body, namespace, visitor);
            walk_expr(cond, namespace, visitor);
        }
        Stmt_::Switch { subject, cases } => {
            walk_expr(subject, namespace, visitor);
            for case in cases {
                if let Some(cond) = &case.cond {
                    walk_expr(cond, namespace, visitor);
                }
                walk_stmts(&case.body, namespace, visitor);
            }
        }
        Stmt_::Const(decls) => {
            for decl in decls {
                walk_expr(&decl.value, namespace, visitor);
            }
        }
        Stmt_::Function { body, .. } => walk_stmts(body, namespace, visitor),
        Stmt_::Return(value) => {
            if let Some(value) = value {
                walk_expr(value, namespace, visitor);
            }
        }
        Stmt_::Echo(values) => {
            for value in values {
                walk_expr(value, namespace, visitor);
            }
        }
        Stmt_::Nop => {}
    }
}

fn walk_expr<V: Visitor + ?Sized>(expr: &Expr, namespace: &str, visitor: &mut V) {
    visitor.visit_expr(expr, namespace);

    match &expr.value {
        Expr_::Lnumber(_)
        | Expr_::Dnumber(_)
        | Expr_::String(_)
        | Expr_::Identifier(_)
        | Expr_::Name(_)
        | Expr_::ConstFetch(_) => {}
        Expr_::Variable(VarName::Ident(_)) => {}
        Expr_::Variable(VarName::Dynamic(inner)) => walk_expr(inner, namespace, visitor),
        Expr_::ClassConstFetch { class, .. } => walk_expr(class, namespace, visitor),
        Expr_::Unary(_, operand) => walk_expr(operand, namespace, visitor),
        Expr_::Binary(_, lhs, rhs) | Expr_::Assign(lhs, rhs) => {
            walk_expr(lhs, namespace, visitor);
            walk_expr(rhs, namespace, visitor);
        }
        Expr_::Ternary { cond, then, else_ } => {
            walk_expr(cond, namespace, visitor);
            if let Some(then) = then {
                walk_expr(then, namespace, visitor);
            }
            walk_expr(else_, namespace, visitor);
        }
        Expr_::Index { base, dim } => {
            walk_expr(base, namespace, visitor);
            if let Some(dim) = dim {
                walk_expr(dim, namespace, visitor);
            }
        }
        Expr_::PropertyFetch { object, property } => {
            walk_expr(object, namespace, visitor);
            walk_expr(property, namespace, visitor);
        }
        Expr_::Array(items) => {
            for item in items {
                walk_expr(item, namespace, visitor);
            }
        }
        Expr_::Call { func, args } => {
            walk_expr(func, namespace, visitor);
            for arg in args {
                walk_expr(arg, namespace, visitor);
            }
        }
        Expr_::Argument { value, .. } => walk_expr(value, namespace, visitor),
    }
}
