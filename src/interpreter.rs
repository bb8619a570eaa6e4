use std::cell::RefCell;
use std::collections::HashMap;
use std::io::Write;
use std::mem;
use std::rc::Rc;

use crate::class::Class;
use crate::environment::Environment;
use crate::error::{ExecResult, Interrupt, RuntimeError};
use crate::expr::*;
use crate::function::{Function, Lambda, NativeFunction};
use crate::literal::Literal;
use crate::object::{Callable, Object};
use crate::stmt::*;
use crate::token::{Token, Type};

/// Walks the resolved statements and evaluates them. `print` output goes
/// through the injected writer so the driver decides where it lands.
pub struct Interpreter<'a> {
    pub globals: Rc<RefCell<Environment>>,
    environment: Rc<RefCell<Environment>>,
    locals: HashMap<usize, usize>,
    output: &'a mut dyn Write,
}

impl<'a> Interpreter<'a> {
    pub fn new(output: &'a mut dyn Write) -> Self {
        let globals = Rc::new(RefCell::new(Environment::default()));

        for native in NativeFunction::get_globals() {
            let name = native.name.lexeme.clone();
            globals.borrow_mut().define(&name, Object::from(native));
        }

        Interpreter {
            globals: Rc::clone(&globals),
            environment: globals,
            locals: HashMap::new(),
            output,
        }
    }

    /// Executes the statements in order. Stops at the first runtime error.
    pub fn interpret(&mut self, statements: &[Stmt]) -> Result<(), RuntimeError> {
        for statement in statements {
            match self.execute(statement) {
                Ok(()) => (),
                Err(Interrupt::Error(error)) => return Err(error),
                // The resolver rejects top-level `return` and `break`.
                Err(_) => unreachable!("control-flow signal escaped to the top level"),
            }
        }

        Ok(())
    }

    /// Records the scope depth of a variable reference. Called by the
    /// resolver; references without an entry are globals.
    pub fn resolve(&mut self, id: usize, depth: usize) {
        self.locals.insert(id, depth);
    }

    fn execute(&mut self, stmt: &Stmt) -> ExecResult<()> {
        stmt.accept(self)
    }

    fn evaluate(&mut self, expr: &Expr) -> ExecResult<Object> {
        expr.accept(self)
    }

    /// Executes statements inside the given environment, restoring the
    /// previous one on every exit path.
    pub fn execute_block(&mut self, statements: &[Stmt], environment: Rc<RefCell<Environment>>) -> ExecResult<()> {
        let previous = mem::replace(&mut self.environment, environment);

        let mut result = Ok(());
        for statement in statements {
            result = self.execute(statement);
            if result.is_err() {
                break;
            }
        }

        self.environment = previous;
        result
    }

    fn look_up_variable(&self, id: usize, name: &Token) -> Result<Object, RuntimeError> {
        match self.locals.get(&id) {
            Some(distance) => self.environment.borrow().get_at(*distance, name),
            None => self.globals.borrow().get(name),
        }
    }

    fn numbers_error(operator: &Token) -> Interrupt {
        RuntimeError {
            token: operator.clone(),
            message: "Operands must be numbers.".to_string(),
        }.into()
    }
}

impl<'a> ExprVisitor<ExecResult<Object>> for Interpreter<'a> {
    fn visit_assign_expr(&mut self, assign: &AssignData) -> ExecResult<Object> {
        let value = self.evaluate(&assign.value)?;

        match self.locals.get(&assign.id) {
            Some(distance) => {
                self.environment.borrow_mut().assign_at(*distance, &assign.name, value.clone());
            },
            None => {
                self.globals.borrow_mut().assign(&assign.name, value.clone())?;
            },
        }

        Ok(value)
    }

    fn visit_binary_expr(&mut self, binary: &BinaryData) -> ExecResult<Object> {
        let left = self.evaluate(&binary.left)?;
        let right = self.evaluate(&binary.right)?;

        match binary.operator.r#type {
            // The comma operator discards its left operand.
            Type::Comma => Ok(right),

            Type::Greater => left.partial_cmp(&right)
                .map(|ordering| Object::from(ordering.is_gt()))
                .ok_or_else(|| Self::numbers_error(&binary.operator)),
            Type::GreaterEqual => left.partial_cmp(&right)
                .map(|ordering| Object::from(ordering.is_ge()))
                .ok_or_else(|| Self::numbers_error(&binary.operator)),
            Type::Less => left.partial_cmp(&right)
                .map(|ordering| Object::from(ordering.is_lt()))
                .ok_or_else(|| Self::numbers_error(&binary.operator)),
            Type::LessEqual => left.partial_cmp(&right)
                .map(|ordering| Object::from(ordering.is_le()))
                .ok_or_else(|| Self::numbers_error(&binary.operator)),

            Type::EqualEqual => Ok(Object::from(left == right)),
            Type::BangEqual => Ok(Object::from(left != right)),

            Type::Minus => (left - right).ok_or_else(|| Self::numbers_error(&binary.operator)),
            Type::Star => (left * right).ok_or_else(|| Self::numbers_error(&binary.operator)),
            Type::Slash => {
                if let Object::Literal(Literal::Number(divisor)) = &right {
                    if *divisor == 0.0 {
                        return Err(RuntimeError {
                            token: binary.operator.clone(),
                            message: "Cannot divide by zero.".to_string(),
                        }.into());
                    }
                }

                (left / right).ok_or_else(|| Self::numbers_error(&binary.operator))
            },
            Type::Plus => (left + right).ok_or_else(|| RuntimeError {
                token: binary.operator.clone(),
                message: "Operands must both be numbers or one of them a string.".to_string(),
            }.into()),

            _ => unreachable!(),
        }
    }

    fn visit_call_expr(&mut self, call: &CallData) -> ExecResult<Object> {
        let callee = self.evaluate(&call.callee)?;

        let mut arguments = Vec::with_capacity(call.arguments.len());
        for argument in &call.arguments {
            arguments.push(self.evaluate(argument)?);
        }

        let callable: &dyn Callable = match &callee {
            Object::Function(function) => function.as_ref(),
            Object::Lambda(lambda) => lambda.as_ref(),
            Object::NativeFunction(native) => native.as_ref(),
            Object::Class(class) => class,
            _ => {
                return Err(RuntimeError {
                    token: call.paren.clone(),
                    message: "Can only call functions and classes.".to_string(),
                }.into());
            },
        };

        if arguments.len() != callable.arity() {
            return Err(RuntimeError {
                token: call.paren.clone(),
                message: format!("Expected {} arguments but got {}.", callable.arity(), arguments.len()),
            }.into());
        }

        callable.call(self, arguments).map_err(Interrupt::from)
    }

    fn visit_get_expr(&mut self, get: &GetData) -> ExecResult<Object> {
        let object = self.evaluate(&get.object)?;

        match &object {
            Object::Instance(instance) => {
                instance.borrow().get(&get.name, &object).map_err(Interrupt::from)
            },
            // A class value exposes its class methods as bound callables.
            Object::Class(class) => {
                let method = class.borrow().find_class_method(&get.name.lexeme);
                match method {
                    Some(method) => Ok(Object::from(method.bind(object.clone()))),
                    None => Err(RuntimeError {
                        token: get.name.clone(),
                        message: format!("No such static method found: {}.", get.name.lexeme),
                    }.into()),
                }
            },
            _ => Err(RuntimeError {
                token: get.name.clone(),
                message: "Only instances have properties.".to_string(),
            }.into()),
        }
    }

    fn visit_grouping_expr(&mut self, grouping: &GroupingData) -> ExecResult<Object> {
        self.evaluate(&grouping.expr)
    }

    fn visit_lambda_expr(&mut self, lambda: &LambdaData) -> ExecResult<Object> {
        // Lambdas close over the globals, not the surrounding scope.
        Ok(Object::from(Lambda {
            params: lambda.params.clone(),
            body: lambda.body.clone(),
            closure: Rc::clone(&self.globals),
        }))
    }

    fn visit_literal_expr(&mut self, literal: &Literal) -> ExecResult<Object> {
        Ok(Object::Literal(literal.clone()))
    }

    fn visit_logical_expr(&mut self, logical: &LogicalData) -> ExecResult<Object> {
        let left = self.evaluate(&logical.left)?;

        // Short-circuits return the deciding operand itself, unconverted.
        match logical.operator.r#type {
            Type::Or if left.as_bool() => Ok(left),
            Type::And if !left.as_bool() => Ok(left),
            _ => self.evaluate(&logical.right),
        }
    }

    fn visit_set_expr(&mut self, set: &SetData) -> ExecResult<Object> {
        let object = self.evaluate(&set.object)?;

        let Object::Instance(instance) = object else {
            return Err(RuntimeError {
                token: set.name.clone(),
                message: "Only instances have fields.".to_string(),
            }.into());
        };

        let value = self.evaluate(&set.value)?;
        instance.borrow_mut().set(&set.name, value.clone());

        Ok(value)
    }

    fn visit_ternary_expr(&mut self, ternary: &TernaryData) -> ExecResult<Object> {
        if self.evaluate(&ternary.condition)?.as_bool() {
            self.evaluate(&ternary.then_branch)
        } else {
            self.evaluate(&ternary.else_branch)
        }
    }

    fn visit_this_expr(&mut self, this: &ThisData) -> ExecResult<Object> {
        self.look_up_variable(this.id, &this.keyword).map_err(Interrupt::from)
    }

    fn visit_unary_expr(&mut self, unary: &UnaryData) -> ExecResult<Object> {
        let right = self.evaluate(&unary.expr)?;

        match unary.operator.r#type {
            Type::Minus => (-right).ok_or_else(|| RuntimeError {
                token: unary.operator.clone(),
                message: "Operand must be a number.".to_string(),
            }.into()),
            Type::Bang => Ok(Object::from(!right.as_bool())),
            _ => unreachable!(),
        }
    }

    fn visit_variable_expr(&mut self, variable: &VariableData) -> ExecResult<Object> {
        self.look_up_variable(variable.id, &variable.name).map_err(Interrupt::from)
    }
}

impl<'a> StmtVisitor<ExecResult<()>> for Interpreter<'a> {
    fn visit_block_stmt(&mut self, block: &BlockData) -> ExecResult<()> {
        let environment = Environment::new(Some(Rc::clone(&self.environment)));
        self.execute_block(&block.statements, Rc::new(RefCell::new(environment)))
    }

    fn visit_break_stmt(&mut self, _break_stmt: &BreakData) -> ExecResult<()> {
        Err(Interrupt::Break)
    }

    fn visit_class_stmt(&mut self, class: &ClassData) -> ExecResult<()> {
        let superclass = match &class.superclass {
            Some(expr) => {
                match self.evaluate(expr)? {
                    Object::Class(superclass) => Some(superclass),
                    _ => {
                        let Expr::Variable(variable) = expr else { unreachable!() };
                        return Err(RuntimeError {
                            token: variable.name.clone(),
                            message: "Superclass must be a class.".to_string(),
                        }.into());
                    },
                }
            },
            None => None,
        };

        let mut methods = HashMap::new();
        for method in &class.methods {
            let is_initializer = method.name.lexeme == "init";
            let function = Function::new(method, Rc::clone(&self.environment), is_initializer);
            methods.insert(method.name.lexeme.clone(), function);
        }

        let mut class_methods = HashMap::new();
        for method in &class.class_methods {
            let function = Function::new(method, Rc::clone(&self.environment), false);
            class_methods.insert(method.name.lexeme.clone(), function);
        }

        let class_object = Rc::new(RefCell::new(Class::new(
            class.name.lexeme.clone(),
            superclass,
            methods,
            class_methods,
        )));

        self.environment.borrow_mut().define(&class.name.lexeme, Object::Class(class_object));

        Ok(())
    }

    fn visit_expression_stmt(&mut self, expression: &ExpressionData) -> ExecResult<()> {
        self.evaluate(&expression.expr)?;
        Ok(())
    }

    fn visit_function_stmt(&mut self, function: &FunctionData) -> ExecResult<()> {
        let function_object = Function::new(function, Rc::clone(&self.environment), false);
        self.environment.borrow_mut().define(&function.name.lexeme, Object::from(function_object));

        Ok(())
    }

    fn visit_if_stmt(&mut self, if_stmt: &IfData) -> ExecResult<()> {
        if self.evaluate(&if_stmt.condition)?.as_bool() {
            self.execute(&if_stmt.then_branch)
        } else if let Some(else_branch) = &if_stmt.else_branch {
            self.execute(else_branch)
        } else {
            Ok(())
        }
    }

    fn visit_print_stmt(&mut self, print: &PrintData) -> ExecResult<()> {
        let value = self.evaluate(&print.expr)?;
        writeln!(self.output, "{value}").expect("output stream to be writable");

        Ok(())
    }

    fn visit_return_stmt(&mut self, return_stmt: &ReturnData) -> ExecResult<()> {
        let value = match &return_stmt.value {
            Some(value) => self.evaluate(value)?,
            None => Object::Literal(Literal::Nil),
        };

        Err(Interrupt::Return(value))
    }

    fn visit_var_stmt(&mut self, var: &VarData) -> ExecResult<()> {
        let value = match &var.initializer {
            Some(initializer) => self.evaluate(initializer)?,
            None => Object::Literal(Literal::Nil),
        };

        self.environment.borrow_mut().define(&var.name.lexeme, value);

        Ok(())
    }

    fn visit_while_stmt(&mut self, while_stmt: &WhileData) -> ExecResult<()> {
        // The condition is re-evaluated before every iteration.
        while self.evaluate(&while_stmt.condition)?.as_bool() {
            match self.execute(&while_stmt.body) {
                Ok(()) => (),
                Err(Interrupt::Break) => break,
                Err(interrupt) => return Err(interrupt),
            }
        }

        Ok(())
    }
}
