//! Expression AST nodes.
//!
//! `Expr` is a plain tagged enum — no trait objects, no visitor
//! double-dispatch. Every pass over the AST (resolver, interpreter) is a
//! single `match` on the variant. Reference-bearing nodes (`Variable`,
//! `Assign`, `This`, `Super`) carry a [`NodeId`] assigned at parse time so
//! the resolver's side table can key on node identity rather than
//! structural or name equality.

use std::sync::atomic::{AtomicU32, Ordering};

use crate::literal::Literal;
use crate::token::Token;

/// Stable identity for one reference-bearing expression node, handed out by
/// [`NodeId::fresh`] as the parser constructs the node. Two distinct
/// `var x` reads at the same lexical position are still distinct ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

static NEXT_NODE_ID: AtomicU32 = AtomicU32::new(0);

impl NodeId {
    pub fn fresh() -> Self {
        NodeId(NEXT_NODE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

#[derive(Debug, Clone)]
pub struct VariableData {
    pub id: NodeId,
    pub name: Token,
}

#[derive(Debug, Clone)]
pub struct AssignData {
    pub id: NodeId,
    pub name: Token,
    pub value: Box<Expr>,
}

#[derive(Debug, Clone)]
pub struct UnaryData {
    pub operator: Token,
    pub right: Box<Expr>,
}

#[derive(Debug, Clone)]
pub struct BinaryData {
    pub left: Box<Expr>,
    pub operator: Token,
    pub right: Box<Expr>,
}

#[derive(Debug, Clone)]
pub struct LogicalData {
    pub left: Box<Expr>,
    pub operator: Token,
    pub right: Box<Expr>,
}

#[derive(Debug, Clone)]
pub struct GroupingData {
    pub expression: Box<Expr>,
}

#[derive(Debug, Clone)]
pub struct TernaryData {
    pub condition: Box<Expr>,
    pub then_branch: Box<Expr>,
    pub else_branch: Box<Expr>,
}

#[derive(Debug, Clone)]
pub struct CallData {
    pub callee: Box<Expr>,
    pub paren: Token,
    pub arguments: Vec<Expr>,
}

#[derive(Debug, Clone)]
pub struct GetData {
    pub object: Box<Expr>,
    pub name: Token,
}

#[derive(Debug, Clone)]
pub struct SetData {
    pub object: Box<Expr>,
    pub name: Token,
    pub value: Box<Expr>,
}

#[derive(Debug, Clone)]
pub struct ThisData {
    pub id: NodeId,
    pub keyword: Token,
}

#[derive(Debug, Clone)]
pub struct SuperData {
    pub id: NodeId,
    pub keyword: Token,
    pub method: Token,
}

#[derive(Debug, Clone)]
pub struct LambdaData {
    pub params: Vec<Token>,
    pub body: std::rc::Rc<Vec<crate::stmt::Stmt>>,
}

#[derive(Debug, Clone)]
pub enum Expr {
    Literal(Literal),
    Variable(VariableData),
    Assign(AssignData),
    Unary(UnaryData),
    Binary(BinaryData),
    Logical(LogicalData),
    Grouping(GroupingData),
    Ternary(TernaryData),
    Call(CallData),
    Get(GetData),
    Set(SetData),
    This(ThisData),
    Super(SuperData),
    Lambda(LambdaData),
}
