//! The closed set of statements a [`SourceTree`](crate::SourceTree) node can hold.

use thisisplural::Plural;

/// One statement of generated Fortran source.
///
/// Block statements (program units, loops, conditionals, selects) own their
/// bodies as child nodes; their last child is always the matching [`Statement::End`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    Module { name: String },
    Subroutine { name: String, args: Vec<String> },
    Contains,
    End(EndKind),
    ImplicitNone,
    Use(UseStmt),
    Declaration(Declaration),
    Comment(String),
    Directive(Directive),
    Call { name: String, args: Vec<String> },
    Assign { lhs: String, rhs: String, pointer: bool },
    Allocate(Vec<String>),
    Deallocate(Vec<String>),
    Do(DoLoop),
    IfThen { condition: String },
    Select(Select),
    Case(Case),
}

/// Which block a terminal `END ...` line closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EndKind {
    Module,
    Subroutine,
    Do,
    IfThen,
    Select,
}

/// A `USE` statement. `only` selects the `USE m, ONLY: ...` form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UseStmt {
    pub module: String,
    pub only: bool,
    pub names: EntityNames,
}

/// A type declaration statement for one or more variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub family: TypeFamily,
    pub names: EntityNames,
    /// Attributes in emission order, e.g. `intent(in)`, `pointer`, `dimension(:)`.
    pub attributes: Vec<String>,
    pub kind: Option<String>,
}

impl Declaration {
    pub fn has_intent(&self) -> bool {
        self.attributes.iter().any(|attr| attr.starts_with("intent"))
    }
}

/// The type a declaration declares its variables with.
///
/// Two declarations are merged only when they share a family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeFamily {
    Intrinsic(IntrinsicType),
    Derived(String),
}

impl TypeFamily {
    pub fn same_family(&self, other: &TypeFamily) -> bool {
        match (self, other) {
            (TypeFamily::Intrinsic(a), TypeFamily::Intrinsic(b)) => a == b,
            (TypeFamily::Derived(a), TypeFamily::Derived(b)) => a.eq_ignore_ascii_case(b),
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntrinsicType {
    Integer,
    Real,
}

impl IntrinsicType {
    /// Resolve a case-insensitive type name; `None` for anything unsupported.
    pub fn from_name(name: &str) -> Option<Self> {
        if name.eq_ignore_ascii_case("integer") {
            Some(IntrinsicType::Integer)
        } else if name.eq_ignore_ascii_case("real") {
            Some(IntrinsicType::Real)
        } else {
            None
        }
    }

    pub fn keyword(self) -> &'static str {
        match self {
            IntrinsicType::Integer => "INTEGER",
            IntrinsicType::Real => "REAL",
        }
    }
}

/// Variable or symbol names carried by a declaration or a selective import.
///
/// Name comparisons are case-insensitive, as in Fortran.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, Plural)]
#[plural(len, is_empty, iter, into_iter, new)]
pub struct EntityNames(Vec<String>);

impl EntityNames {
    pub fn from_vec(names: Vec<String>) -> Self {
        Self(names)
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.0.clone()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|existing| existing.eq_ignore_ascii_case(name))
    }

    /// Drop every name already present in `covered`.
    pub fn remove_covered(&mut self, covered: &EntityNames) {
        self.0.retain(|name| !covered.contains(name));
    }

    pub fn extend_from(&mut self, other: &EntityNames) {
        self.0.extend(other.0.iter().cloned());
    }
}

/// A pragma-style comment (`!$omp ...`) bracketing a region of code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    pub language: DirectiveLanguage,
    pub kind: DirectiveKind,
    pub position: DirectivePosition,
    pub content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DirectiveLanguage {
    Omp,
}

impl DirectiveLanguage {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "omp" => Some(DirectiveLanguage::Omp),
            _ => None,
        }
    }

    pub fn sentinel(self) -> &'static str {
        match self {
            DirectiveLanguage::Omp => "$omp",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DirectiveKind {
    ParallelDo,
    Parallel,
    Do,
    Master,
}

impl DirectiveKind {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "parallel do" => Some(DirectiveKind::ParallelDo),
            "parallel" => Some(DirectiveKind::Parallel),
            "do" => Some(DirectiveKind::Do),
            "master" => Some(DirectiveKind::Master),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DirectiveKind::ParallelDo => "parallel do",
            DirectiveKind::Parallel => "parallel",
            DirectiveKind::Do => "do",
            DirectiveKind::Master => "master",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DirectivePosition {
    Begin,
    End,
}

impl DirectivePosition {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "begin" => Some(DirectivePosition::Begin),
            "end" => Some(DirectivePosition::End),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoLoop {
    pub variable: String,
    pub start: String,
    pub end: String,
    pub step: Option<String>,
}

/// `SELECT CASE (expr)`, or `SELECT TYPE (expr)` when `type_select` is set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Select {
    pub expr: String,
    pub type_select: bool,
}

/// A case label inside a select block. `selector: None` is the default case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Case {
    pub selector: Option<String>,
    pub type_guard: bool,
}

impl Statement {
    /// Modules and subroutines: the units that own declarations and imports.
    pub fn is_scope(&self) -> bool {
        matches!(self, Statement::Module { .. } | Statement::Subroutine { .. })
    }

    /// Loop and conditional bodies.
    pub fn is_block(&self) -> bool {
        matches!(self, Statement::Do(_) | Statement::IfThen { .. })
    }

    /// Statements that own a statement list of their own.
    pub fn has_body(&self) -> bool {
        self.is_scope() || self.is_block() || matches!(self, Statement::Select(_))
    }

    pub fn is_loop(&self) -> bool {
        matches!(self, Statement::Do(_))
    }

    /// Statements that may not appear inside a loop or conditional body.
    pub fn is_hoistable(&self) -> bool {
        matches!(self, Statement::Use(_) | Statement::Declaration(_))
    }

    /// Comments and directives, which placement skips over as comments.
    pub fn is_comment_like(&self) -> bool {
        matches!(self, Statement::Comment(_) | Statement::Directive(_))
    }

    pub fn is_use(&self) -> bool {
        matches!(self, Statement::Use(_))
    }

    pub fn is_implicit_none(&self) -> bool {
        matches!(self, Statement::ImplicitNone)
    }

    pub fn is_intent_declaration(&self) -> bool {
        self.as_declaration().is_some_and(Declaration::has_intent)
    }

    pub fn is_begin_directive(&self) -> bool {
        self.as_directive()
            .is_some_and(|directive| directive.position == DirectivePosition::Begin)
    }

    /// Lines rendered at the indentation of their enclosing block header.
    pub fn is_header_aligned(&self) -> bool {
        matches!(
            self,
            Statement::End(_) | Statement::Contains | Statement::Case(_)
        )
    }

    pub fn as_use(&self) -> Option<&UseStmt> {
        match self {
            Statement::Use(use_stmt) => Some(use_stmt),
            _ => None,
        }
    }

    pub fn as_use_mut(&mut self) -> Option<&mut UseStmt> {
        match self {
            Statement::Use(use_stmt) => Some(use_stmt),
            _ => None,
        }
    }

    pub fn as_declaration(&self) -> Option<&Declaration> {
        match self {
            Statement::Declaration(declaration) => Some(declaration),
            _ => None,
        }
    }

    pub fn as_declaration_mut(&mut self) -> Option<&mut Declaration> {
        match self {
            Statement::Declaration(declaration) => Some(declaration),
            _ => None,
        }
    }

    pub fn as_directive(&self) -> Option<&Directive> {
        match self {
            Statement::Directive(directive) => Some(directive),
            _ => None,
        }
    }
}
