use std::collections::HashMap;
use std::mem;

use crate::error::{Error, Reporter, ResolveError};
use crate::expr::*;
use crate::interpreter::Interpreter;
use crate::literal::Literal;
use crate::stmt::*;
use crate::token::Token;

#[derive(Clone, Copy)]
enum FunctionType {
    None,
    Function,
    Initializer,
    Method,
    ClassMethod,
}

#[derive(Clone, Copy)]
enum ClassType {
    None,
    Class,
}

/// Walks the statements once before execution and tells the interpreter at
/// which depth each variable reference lives. Scopes are a stack of maps;
/// a name maps to `false` between declaration and definition so a variable
/// cannot read itself in its own initializer.
pub struct Resolver<'a, 'o> {
    interpreter: &'a mut Interpreter<'o>,
    reporter: &'a mut Reporter,
    scopes: Vec<HashMap<String, bool>>,
    current_function: FunctionType,
    current_class: ClassType,
    in_a_loop: bool,
}

impl<'a, 'o> Resolver<'a, 'o> {
    pub fn new(interpreter: &'a mut Interpreter<'o>, reporter: &'a mut Reporter) -> Self {
        Resolver {
            interpreter,
            reporter,
            scopes: vec![],
            current_function: FunctionType::None,
            current_class: ClassType::None,
            in_a_loop: false,
        }
    }

    fn resolve_expr(&mut self, expr: &Expr) {
        expr.accept(self);
    }

    fn resolve_stmt(&mut self, stmt: &Stmt) {
        stmt.accept(self);
    }

    pub fn resolve(&mut self, statements: &[Stmt]) {
        for statement in statements {
            self.resolve_stmt(statement);
        }
    }

    fn resolve_function(&mut self, function: &FunctionData, r#type: FunctionType) {
        let enclosing_function = mem::replace(&mut self.current_function, r#type);
        let enclosing_loop = mem::replace(&mut self.in_a_loop, false);

        self.begin_scope();
        for param in &function.params {
            self.declare(param);
            self.define(param);
        }
        self.resolve(&function.body);
        self.end_scope();

        self.in_a_loop = enclosing_loop;
        self.current_function = enclosing_function;
    }

    fn begin_scope(&mut self) {
        self.scopes.push(HashMap::new());
    }

    fn end_scope(&mut self) {
        self.scopes.pop();
    }

    fn declare(&mut self, name: &Token) {
        if self.scopes.is_empty() {
            return;
        }

        let scope = self.scopes.last_mut().expect("scope stack to be not empty");
        if scope.contains_key(&name.lexeme) {
            ResolveError {
                token: name.clone(),
                message: format!("A variable is already defined with name '{}' in this scope.", name.lexeme),
            }.throw(self.reporter);
        }
        scope.insert(name.lexeme.to_owned(), false);
    }

    fn define(&mut self, name: &Token) {
        if self.scopes.is_empty() {
            return;
        }

        self.scopes
            .last_mut()
            .expect("scope stack to be not empty")
            .insert(name.lexeme.to_owned(), true);
    }

    /// Records how many environments sit between the use site and the scope
    /// that declares `name`. Names found in no local scope are globals and
    /// get no entry.
    fn resolve_local(&mut self, id: usize, name: &Token) {
        for (i, scope) in self.scopes.iter().rev().enumerate() {
            if scope.contains_key(&name.lexeme) {
                self.interpreter.resolve(id, i);
                return;
            }
        }
    }
}

impl<'a, 'o> ExprVisitor<()> for Resolver<'a, 'o> {
    fn visit_assign_expr(&mut self, assign: &AssignData) {
        self.resolve_expr(&assign.value);
        self.resolve_local(assign.id, &assign.name);
    }

    fn visit_binary_expr(&mut self, binary: &BinaryData) {
        self.resolve_expr(&binary.left);
        self.resolve_expr(&binary.right);
    }

    fn visit_call_expr(&mut self, call: &CallData) {
        self.resolve_expr(&call.callee);

        for argument in &call.arguments {
            self.resolve_expr(argument);
        }
    }

    fn visit_get_expr(&mut self, get: &GetData) {
        self.resolve_expr(&get.object);
    }

    fn visit_grouping_expr(&mut self, grouping: &GroupingData) {
        self.resolve_expr(&grouping.expr);
    }

    fn visit_lambda_expr(&mut self, lambda: &LambdaData) {
        let enclosing_function = mem::replace(&mut self.current_function, FunctionType::Function);
        let enclosing_loop = mem::replace(&mut self.in_a_loop, false);

        self.begin_scope();
        for param in &lambda.params {
            self.declare(param);
            self.define(param);
        }
        self.resolve(&lambda.body);
        self.end_scope();

        self.in_a_loop = enclosing_loop;
        self.current_function = enclosing_function;
    }

    fn visit_literal_expr(&mut self, _literal: &Literal) {}

    fn visit_logical_expr(&mut self, logical: &LogicalData) {
        self.resolve_expr(&logical.left);
        self.resolve_expr(&logical.right);
    }

    fn visit_set_expr(&mut self, set: &SetData) {
        self.resolve_expr(&set.value);
        self.resolve_expr(&set.object);
    }

    fn visit_ternary_expr(&mut self, ternary: &TernaryData) {
        self.resolve_expr(&ternary.condition);
        self.resolve_expr(&ternary.then_branch);
        self.resolve_expr(&ternary.else_branch);
    }

    fn visit_this_expr(&mut self, this: &ThisData) {
        if let ClassType::None = self.current_class {
            ResolveError {
                token: this.keyword.clone(),
                message: "Cannot use 'this' outside a class.".to_string(),
            }.throw(self.reporter);

            return;
        }

        self.resolve_local(this.id, &this.keyword);
    }

    fn visit_unary_expr(&mut self, unary: &UnaryData) {
        self.resolve_expr(&unary.expr);
    }

    fn visit_variable_expr(&mut self, variable: &VariableData) {
        if let Some(scope) = self.scopes.last() {
            if let Some(defined) = scope.get(&variable.name.lexeme) {
                if !defined {
                    ResolveError {
                        token: variable.name.to_owned(),
                        message: "Cannot read local variable in its own initializer.".to_string(),
                    }.throw(self.reporter);
                }
            }
        }

        self.resolve_local(variable.id, &variable.name);
    }
}

impl<'a, 'o> StmtVisitor<()> for Resolver<'a, 'o> {
    fn visit_block_stmt(&mut self, block: &BlockData) {
        self.begin_scope();
        self.resolve(&block.statements);
        self.end_scope();
    }

    fn visit_break_stmt(&mut self, break_stmt: &BreakData) {
        if !self.in_a_loop {
            ResolveError {
                token: break_stmt.keyword.clone(),
                message: "Cannot use break when not in a loop.".to_string(),
            }.throw(self.reporter);
        }
    }

    fn visit_class_stmt(&mut self, class: &ClassData) {
        let enclosing_class = mem::replace(&mut self.current_class, ClassType::Class);

        self.declare(&class.name);
        self.define(&class.name);

        if let Some(superclass) = &class.superclass {
            let Expr::Variable(variable) = superclass else { unreachable!() };

            if class.name.lexeme == variable.name.lexeme {
                ResolveError {
                    token: variable.name.clone(),
                    message: "A class cannot inherit from itself.".to_string(),
                }.throw(self.reporter);
            }

            self.resolve_expr(superclass);
        }

        // Methods of both kinds resolve inside a scope that binds `this`.
        // For a class method, `this` is the class value at runtime.
        self.begin_scope();
        self.scopes
            .last_mut()
            .expect("scope stack to be not empty")
            .insert("this".to_string(), true);

        for method in &class.methods {
            let declaration = if method.name.lexeme == "init" {
                FunctionType::Initializer
            } else {
                FunctionType::Method
            };
            self.resolve_function(method, declaration);
        }

        for method in &class.class_methods {
            self.resolve_function(method, FunctionType::ClassMethod);
        }

        self.end_scope();

        self.current_class = enclosing_class;
    }

    fn visit_expression_stmt(&mut self, expression: &ExpressionData) {
        self.resolve_expr(&expression.expr);
    }

    fn visit_function_stmt(&mut self, function: &FunctionData) {
        self.declare(&function.name);
        self.define(&function.name);

        self.resolve_function(function, FunctionType::Function);
    }

    fn visit_if_stmt(&mut self, if_stmt: &IfData) {
        self.resolve_expr(&if_stmt.condition);
        self.resolve_stmt(&if_stmt.then_branch);
        if let Some(else_branch) = &if_stmt.else_branch {
            self.resolve_stmt(else_branch);
        }
    }

    fn visit_print_stmt(&mut self, print: &PrintData) {
        self.resolve_expr(&print.expr);
    }

    fn visit_return_stmt(&mut self, return_stmt: &ReturnData) {
        if let FunctionType::None = self.current_function {
            ResolveError {
                token: return_stmt.keyword.clone(),
                message: "Cannot return from top-level code.".to_string(),
            }.throw(self.reporter);
        }

        if let Some(value) = &return_stmt.value {
            if let FunctionType::Initializer = self.current_function {
                ResolveError {
                    token: return_stmt.keyword.clone(),
                    message: "Cannot return a value from an instance initializer.".to_string(),
                }.throw(self.reporter);
                return;
            }

            self.resolve_expr(value);
        }
    }

    fn visit_var_stmt(&mut self, var: &VarData) {
        self.declare(&var.name);
        if let Some(initializer) = &var.initializer {
            self.resolve_expr(initializer);
        }
        self.define(&var.name);
    }

    fn visit_while_stmt(&mut self, while_stmt: &WhileData) {
        self.resolve_expr(&while_stmt.condition);

        let enclosing_loop = mem::replace(&mut self.in_a_loop, true);
        self.resolve_stmt(&while_stmt.body);
        self.in_a_loop = enclosing_loop;
    }
}
