//! Construction of detached statements.
//!
//! Every factory builds its node against a context node and leaves it
//! detached; nothing is placed until it is passed to
//! [`ProgramBuilder::add`]. Invalid requests fail before the tree is touched.

use fgen_tree::{
    Case, Declaration, Directive, DirectiveKind, DirectiveLanguage, DirectivePosition, DoLoop,
    EndKind, EntityNames, IntrinsicType, NodeId, Select, Statement, TypeFamily, UseStmt,
};

use crate::builder::ProgramBuilder;
use crate::error::GenError;
use crate::position::Position;

/// Options for [`ProgramBuilder::module`].
#[derive(Debug, Clone, bon::Builder)]
pub struct ModuleOptions {
    #[builder(into)]
    pub name: String,

    /// Emit a `CONTAINS` line ahead of `END MODULE`.
    #[builder(default = true)]
    pub contains: bool,

    #[builder(default = true)]
    pub implicit_none: bool,
}

/// Options for [`ProgramBuilder::subroutine`].
#[derive(Debug, Clone, bon::Builder)]
pub struct SubroutineOptions {
    #[builder(into)]
    pub name: String,

    #[builder(default)]
    pub args: Vec<String>,

    #[builder(default)]
    pub implicit_none: bool,
}

/// Options for [`ProgramBuilder::use_module`] and [`crate::modify::add_use`].
///
/// A selective import without any names is emitted as a plain `USE`.
#[derive(Debug, Clone, bon::Builder)]
pub struct UseOptions {
    #[builder(into)]
    pub module: String,

    /// Emit `USE module, ONLY: names`.
    #[builder(default)]
    pub only: bool,

    #[builder(default)]
    pub names: Vec<String>,
}

impl UseOptions {
    pub(crate) fn into_statement(self) -> Statement {
        let only = self.only && !self.names.is_empty();
        Statement::Use(UseStmt {
            module: self.module,
            only,
            names: if only {
                EntityNames::from_vec(self.names)
            } else {
                EntityNames::new()
            },
        })
    }
}

/// A declaration of variables of intrinsic type.
///
/// Attributes are emitted in the order intent, pointer, allocatable, dimension.
#[derive(Debug, Clone, bon::Builder)]
pub struct DeclSpec {
    /// `integer` or `real`, in any case.
    #[builder(into)]
    pub datatype: String,

    #[builder(default)]
    pub names: Vec<String>,

    #[builder(into)]
    pub intent: Option<String>,

    #[builder(default)]
    pub pointer: bool,

    #[builder(default)]
    pub allocatable: bool,

    /// Array bounds, e.g. `:,:`.
    #[builder(into)]
    pub dimension: Option<String>,

    #[builder(into)]
    pub kind: Option<String>,
}

/// A declaration of variables of a derived type.
///
/// Free-form `attributes` come first, followed by intent and pointer.
#[derive(Debug, Clone, bon::Builder)]
pub struct TypeDeclSpec {
    #[builder(into)]
    pub datatype: String,

    #[builder(default)]
    pub names: Vec<String>,

    #[builder(into)]
    pub intent: Option<String>,

    #[builder(default)]
    pub pointer: bool,

    #[builder(default)]
    pub attributes: Vec<String>,
}

/// Parse the textual flavour of a directive, e.g. `("omp", "begin", "parallel do", "")`.
pub fn parse_directive(
    language: &str,
    position: &str,
    kind: &str,
    content: &str,
) -> Result<Directive, GenError> {
    let language = DirectiveLanguage::from_name(language)
        .ok_or_else(|| GenError::UnsupportedDirectiveLanguage(language.to_string()))?;
    let position = DirectivePosition::from_name(position)
        .ok_or_else(|| GenError::UnsupportedDirectivePosition(position.to_string()))?;
    let kind = DirectiveKind::from_name(kind)
        .ok_or_else(|| GenError::UnsupportedDirectiveType(kind.to_string()))?;
    Ok(Directive {
        language,
        kind,
        position,
        content: content.to_string(),
    })
}

fn strings<S: Into<String>>(items: impl IntoIterator<Item = S>) -> Vec<String> {
    items.into_iter().map(Into::into).collect()
}

impl ProgramBuilder {
    /// Create a new module as a root of its own.
    pub fn module(&mut self, options: ModuleOptions) -> Result<NodeId, GenError> {
        let module = self.tree.add_node(Statement::Module { name: options.name });
        if options.contains {
            self.tree.push_child(module, Statement::Contains)?;
        }
        self.tree.push_child(module, Statement::End(EndKind::Module))?;
        if options.implicit_none {
            let marker = self.implicit_none(module)?;
            self.add(module, marker, Position::Auto)?;
        }
        Ok(module)
    }

    pub fn subroutine(
        &mut self,
        parent: NodeId,
        options: SubroutineOptions,
    ) -> Result<NodeId, GenError> {
        let subroutine = self.tree.add_node_with_context(
            Statement::Subroutine {
                name: options.name,
                args: options.args,
            },
            parent,
        )?;
        self.tree
            .push_child(subroutine, Statement::End(EndKind::Subroutine))?;
        if options.implicit_none {
            let marker = self.implicit_none(subroutine)?;
            self.add(subroutine, marker, Position::Auto)?;
        }
        Ok(subroutine)
    }

    pub fn subroutine_args(&self, subroutine: NodeId) -> Result<&[String], GenError> {
        match self.tree.get(subroutine)? {
            Statement::Subroutine { args, .. } => Ok(args.as_slice()),
            _ => Err(GenError::NotASubroutine(subroutine)),
        }
    }

    pub fn set_subroutine_args<S: Into<String>>(
        &mut self,
        subroutine: NodeId,
        names: impl IntoIterator<Item = S>,
    ) -> Result<(), GenError> {
        match self.tree.get_mut(subroutine)? {
            Statement::Subroutine { args, .. } => {
                *args = strings(names);
                Ok(())
            }
            _ => Err(GenError::NotASubroutine(subroutine)),
        }
    }

    pub fn implicit_none(&mut self, parent: NodeId) -> Result<NodeId, GenError> {
        if !self.tree.get(parent)?.is_scope() {
            return Err(GenError::ImplicitNoneOutsideScope(parent));
        }
        Ok(self
            .tree
            .add_node_with_context(Statement::ImplicitNone, parent)?)
    }

    pub fn comment(
        &mut self,
        parent: NodeId,
        text: impl Into<String>,
    ) -> Result<NodeId, GenError> {
        Ok(self
            .tree
            .add_node_with_context(Statement::Comment(text.into()), parent)?)
    }

    /// Create a directive from its textual flavour; see [`parse_directive`].
    pub fn directive(
        &mut self,
        parent: NodeId,
        language: &str,
        position: &str,
        kind: &str,
        content: &str,
    ) -> Result<NodeId, GenError> {
        let directive = parse_directive(language, position, kind, content)?;
        Ok(self
            .tree
            .add_node_with_context(Statement::Directive(directive), parent)?)
    }

    pub fn call<S: Into<String>>(
        &mut self,
        parent: NodeId,
        name: impl Into<String>,
        args: impl IntoIterator<Item = S>,
    ) -> Result<NodeId, GenError> {
        let statement = Statement::Call {
            name: name.into(),
            args: strings(args),
        };
        Ok(self.tree.add_node_with_context(statement, parent)?)
    }

    pub fn use_module(&mut self, parent: NodeId, options: UseOptions) -> Result<NodeId, GenError> {
        Ok(self
            .tree
            .add_node_with_context(options.into_statement(), parent)?)
    }

    pub fn allocate<S: Into<String>>(
        &mut self,
        parent: NodeId,
        items: impl IntoIterator<Item = S>,
    ) -> Result<NodeId, GenError> {
        let items = strings(items);
        if items.is_empty() {
            return Err(GenError::EmptyItemList {
                statement: "ALLOCATE",
            });
        }
        Ok(self
            .tree
            .add_node_with_context(Statement::Allocate(items), parent)?)
    }

    pub fn deallocate<S: Into<String>>(
        &mut self,
        parent: NodeId,
        items: impl IntoIterator<Item = S>,
    ) -> Result<NodeId, GenError> {
        let items = strings(items);
        if items.is_empty() {
            return Err(GenError::EmptyItemList {
                statement: "DEALLOCATE",
            });
        }
        Ok(self
            .tree
            .add_node_with_context(Statement::Deallocate(items), parent)?)
    }

    pub fn declaration(&mut self, parent: NodeId, spec: DeclSpec) -> Result<NodeId, GenError> {
        let intrinsic = IntrinsicType::from_name(&spec.datatype)
            .ok_or(GenError::UnsupportedDeclarationKind(spec.datatype))?;
        if spec.names.is_empty() {
            return Err(GenError::MissingEntityNames);
        }

        let mut attributes = Vec::new();
        if let Some(intent) = spec.intent {
            attributes.push(format!("intent({intent})"));
        }
        if spec.pointer {
            attributes.push("pointer".to_string());
        }
        if spec.allocatable {
            attributes.push("allocatable".to_string());
        }
        if let Some(dimension) = spec.dimension {
            attributes.push(format!("dimension({dimension})"));
        }

        let declaration = Declaration {
            family: TypeFamily::Intrinsic(intrinsic),
            names: EntityNames::from_vec(spec.names),
            attributes,
            kind: spec.kind,
        };
        Ok(self
            .tree
            .add_node_with_context(Statement::Declaration(declaration), parent)?)
    }

    pub fn type_declaration(
        &mut self,
        parent: NodeId,
        spec: TypeDeclSpec,
    ) -> Result<NodeId, GenError> {
        if spec.names.is_empty() {
            return Err(GenError::MissingEntityNames);
        }
        let mut attributes = spec.attributes;
        if let Some(intent) = spec.intent {
            attributes.push(format!("intent({intent})"));
        }
        if spec.pointer {
            attributes.push("pointer".to_string());
        }

        let declaration = Declaration {
            family: TypeFamily::Derived(spec.datatype),
            names: EntityNames::from_vec(spec.names),
            attributes,
            kind: None,
        };
        Ok(self
            .tree
            .add_node_with_context(Statement::Declaration(declaration), parent)?)
    }

    pub fn do_loop(
        &mut self,
        parent: NodeId,
        variable: impl Into<String>,
        start: impl Into<String>,
        end: impl Into<String>,
        step: Option<&str>,
    ) -> Result<NodeId, GenError> {
        let do_loop = DoLoop {
            variable: variable.into(),
            start: start.into(),
            end: end.into(),
            step: step.map(str::to_string),
        };
        self.block(parent, Statement::Do(do_loop), EndKind::Do)
    }

    pub fn if_then(
        &mut self,
        parent: NodeId,
        condition: impl Into<String>,
    ) -> Result<NodeId, GenError> {
        let statement = Statement::IfThen {
            condition: condition.into(),
        };
        self.block(parent, statement, EndKind::IfThen)
    }

    pub fn assign(
        &mut self,
        parent: NodeId,
        lhs: impl Into<String>,
        rhs: impl Into<String>,
    ) -> Result<NodeId, GenError> {
        self.assignment(parent, lhs.into(), rhs.into(), false)
    }

    /// Create a pointer assignment `lhs => rhs`.
    pub fn pointer_assign(
        &mut self,
        parent: NodeId,
        lhs: impl Into<String>,
        rhs: impl Into<String>,
    ) -> Result<NodeId, GenError> {
        self.assignment(parent, lhs.into(), rhs.into(), true)
    }

    /// Create a `SELECT CASE` block, or `SELECT TYPE` when `type_select` is set.
    ///
    /// Cases are added with [`add_case`](Self::add_case) and
    /// [`add_default_case`](Self::add_default_case).
    pub fn select(
        &mut self,
        parent: NodeId,
        expr: impl Into<String>,
        type_select: bool,
    ) -> Result<NodeId, GenError> {
        let select = Select {
            expr: expr.into(),
            type_select,
        };
        self.block(parent, Statement::Select(select), EndKind::Select)
    }

    pub(crate) fn case(
        &mut self,
        select: NodeId,
        selector: Option<String>,
    ) -> Result<NodeId, GenError> {
        let type_guard = match self.tree.get(select)? {
            Statement::Select(header) => header.type_select,
            _ => return Err(GenError::NotASelect(select)),
        };
        let case = Case {
            selector,
            type_guard,
        };
        Ok(self
            .tree
            .add_node_with_context(Statement::Case(case), select)?)
    }

    fn assignment(
        &mut self,
        parent: NodeId,
        lhs: String,
        rhs: String,
        pointer: bool,
    ) -> Result<NodeId, GenError> {
        Ok(self
            .tree
            .add_node_with_context(Statement::Assign { lhs, rhs, pointer }, parent)?)
    }

    fn block(
        &mut self,
        parent: NodeId,
        header: Statement,
        end: EndKind,
    ) -> Result<NodeId, GenError> {
        let block = self.tree.add_node_with_context(header, parent)?;
        self.tree.push_child(block, Statement::End(end))?;
        Ok(block)
    }
}
