//! Rendering of a [`SourceTree`] back to free-form Fortran source.

use crate::statement::{Case, Declaration, EndKind, Statement, TypeFamily};
use crate::tree::{NodeId, SourceTree};

/// Configuration options for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderConfig {
    /// Number of spaces per indentation level.
    /// Default: 2
    pub indent_width: usize,

    /// Indentation levels applied to the rendered root itself.
    /// Default: 1
    pub base_indent: usize,

    /// Case used for Fortran keywords. Names are emitted verbatim.
    /// Default: KeywordCase::Upper
    pub keyword_case: KeywordCase,

    /// Newline style.
    /// Default: NewlineStyle::Lf
    pub newline: NewlineStyle,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            indent_width: 2,
            base_indent: 1,
            keyword_case: KeywordCase::Upper,
            newline: NewlineStyle::Lf,
        }
    }
}

impl RenderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_indent_width(mut self, width: usize) -> Self {
        self.indent_width = width;
        self
    }

    pub fn with_base_indent(mut self, levels: usize) -> Self {
        self.base_indent = levels;
        self
    }

    pub fn with_keyword_case(mut self, case: KeywordCase) -> Self {
        self.keyword_case = case;
        self
    }

    pub fn with_newline(mut self, style: NewlineStyle) -> Self {
        self.newline = style;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeywordCase {
    #[default]
    Upper,
    Lower,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NewlineStyle {
    /// Unix-style line endings (LF).
    #[default]
    Lf,
    /// Windows-style line endings (CRLF).
    Crlf,
}

impl NewlineStyle {
    pub fn as_str(self) -> &'static str {
        match self {
            NewlineStyle::Lf => "\n",
            NewlineStyle::Crlf => "\r\n",
        }
    }
}

/// Render `root` and every attached descendant with the default configuration.
pub fn render(tree: &SourceTree, root: NodeId) -> String {
    Printer::new(RenderConfig::default()).print(tree, root)
}

impl SourceTree {
    pub fn to_source(&self, root: NodeId) -> String {
        render(self, root)
    }
}

/// Number of enclosing blocks of an attached node.
fn depth(tree: &SourceTree, id: NodeId) -> usize {
    let mut depth = 0;
    let mut current = id;
    while tree.is_attached(current)
        && let Some(parent) = tree.parent(current)
    {
        depth += 1;
        current = parent;
    }
    depth
}

/// Line printer walking the statement lists depth-first.
pub struct Printer {
    config: RenderConfig,
}

impl Printer {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    pub fn print(&self, tree: &SourceTree, root: NodeId) -> String {
        let mut output = String::new();
        let mut stack = vec![(root, self.config.base_indent + depth(tree, root))];

        while let Some((id, level)) = stack.pop() {
            let Some(statement) = tree.statement(id) else {
                continue;
            };
            output.push_str(&" ".repeat(level * self.config.indent_width));
            output.push_str(&self.line(tree, id, statement));
            output.push_str(self.config.newline.as_str());

            for &child in tree.children(id).iter().rev() {
                let child_level = match tree.statement(child) {
                    Some(child) if child.is_header_aligned() => level,
                    _ => level + 1,
                };
                stack.push((child, child_level));
            }
        }

        output
    }

    fn kw(&self, keyword: &str) -> String {
        match self.config.keyword_case {
            KeywordCase::Upper => keyword.to_string(),
            KeywordCase::Lower => keyword.to_ascii_lowercase(),
        }
    }

    fn line(&self, tree: &SourceTree, id: NodeId, statement: &Statement) -> String {
        match statement {
            Statement::Module { name } => format!("{} {name}", self.kw("MODULE")),
            Statement::Subroutine { name, args } => {
                format!("{} {name}({})", self.kw("SUBROUTINE"), args.join(", "))
            }
            Statement::Contains => self.kw("CONTAINS"),
            Statement::End(kind) => self.end_line(tree, id, *kind),
            Statement::ImplicitNone => self.kw("IMPLICIT NONE"),
            Statement::Use(use_stmt) => {
                let mut line = format!("{} {}", self.kw("USE"), use_stmt.module);
                if use_stmt.only {
                    line.push_str(&format!(
                        ", {}: {}",
                        self.kw("ONLY"),
                        use_stmt.names.as_slice().join(", ")
                    ));
                }
                line
            }
            Statement::Declaration(declaration) => self.declaration_line(declaration),
            Statement::Comment(text) => format!("!{text}"),
            Statement::Directive(directive) => {
                let mut line = format!("!{}", directive.language.sentinel());
                if directive.position == crate::statement::DirectivePosition::End {
                    line.push_str(" end");
                }
                line.push(' ');
                line.push_str(directive.kind.as_str());
                if !directive.content.is_empty() {
                    line.push(' ');
                    line.push_str(&directive.content);
                }
                line
            }
            Statement::Call { name, args } => {
                if args.is_empty() {
                    format!("{} {name}", self.kw("CALL"))
                } else {
                    format!("{} {name}({})", self.kw("CALL"), args.join(", "))
                }
            }
            Statement::Assign { lhs, rhs, pointer } => {
                let operator = if *pointer { "=>" } else { "=" };
                format!("{lhs} {operator} {rhs}")
            }
            Statement::Allocate(items) => format!("{} ({})", self.kw("ALLOCATE"), items.join(", ")),
            Statement::Deallocate(items) => {
                format!("{} ({})", self.kw("DEALLOCATE"), items.join(", "))
            }
            Statement::Do(do_loop) => {
                let mut line = format!(
                    "{} {}={},{}",
                    self.kw("DO"),
                    do_loop.variable,
                    do_loop.start,
                    do_loop.end
                );
                if let Some(step) = &do_loop.step {
                    line.push(',');
                    line.push_str(step);
                }
                line
            }
            Statement::IfThen { condition } => {
                format!("{} ({condition}) {}", self.kw("IF"), self.kw("THEN"))
            }
            Statement::Select(select) => {
                let keyword = if select.type_select { "SELECT TYPE" } else { "SELECT CASE" };
                format!("{} ( {} )", self.kw(keyword), select.expr)
            }
            Statement::Case(case) => self.case_line(case),
        }
    }

    fn end_line(&self, tree: &SourceTree, id: NodeId, kind: EndKind) -> String {
        let owner = tree.parent(id).and_then(|parent| tree.statement(parent));
        match (kind, owner) {
            (EndKind::Module, Some(Statement::Module { name })) => {
                format!("{} {name}", self.kw("END MODULE"))
            }
            (EndKind::Subroutine, Some(Statement::Subroutine { name, .. })) => {
                format!("{} {name}", self.kw("END SUBROUTINE"))
            }
            (EndKind::Module, _) => self.kw("END MODULE"),
            (EndKind::Subroutine, _) => self.kw("END SUBROUTINE"),
            (EndKind::Do, _) => self.kw("END DO"),
            (EndKind::IfThen, _) => self.kw("END IF"),
            (EndKind::Select, _) => self.kw("END SELECT"),
        }
    }

    fn declaration_line(&self, declaration: &Declaration) -> String {
        let mut line = match &declaration.family {
            TypeFamily::Intrinsic(intrinsic) => self.kw(intrinsic.keyword()),
            TypeFamily::Derived(type_name) => format!("{}({type_name})", self.kw("TYPE")),
        };
        if let Some(kind) = &declaration.kind {
            line.push_str(&format!("({}={kind})", self.kw("KIND")));
        }
        let names = declaration.names.as_slice().join(", ");
        if declaration.attributes.is_empty() {
            line.push(' ');
        } else {
            line.push_str(", ");
            line.push_str(&declaration.attributes.join(", "));
            line.push_str(" :: ");
        }
        line.push_str(&names);
        line
    }

    fn case_line(&self, case: &Case) -> String {
        match (&case.selector, case.type_guard) {
            (Some(selector), false) => format!("{} ( {selector} )", self.kw("CASE")),
            (Some(selector), true) => format!("{} ( {selector} )", self.kw("TYPE IS")),
            (None, false) => self.kw("CASE DEFAULT"),
            (None, true) => self.kw("CLASS DEFAULT"),
        }
    }
}
