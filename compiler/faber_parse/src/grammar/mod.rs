//! Grammar productions, split by syntactic category.

mod decl;
mod expr;
mod stmt;
mod ty;
