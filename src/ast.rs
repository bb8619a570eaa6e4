use crate::expr::*;
use crate::literal::Literal;
use crate::stmt::*;

/// Returns a string representation of the expression in parentheses.
macro_rules! parenthesize {
    ( $self:ident, $name:expr, $( $x:expr ),+ ) => {
        {
            let mut string = String::new();
            string += "(";
            string += $name;
            $(
                string += " ";
                string += &$x.accept($self);
            )*
            string += ")";

            string
        }
    };
}

/// Renders the tree the parser produced in a parenthesized prefix form.
/// Handy for debugging precedence without stepping through the evaluator.
pub struct ASTPrinter;

impl ASTPrinter {
    /// Prints the expression using visitor pattern.
    pub fn print(&mut self, expr: &Expr) -> String {
        expr.accept(self)
    }

    /// Prints the statement using visitor pattern.
    pub fn print_stmt(&mut self, stmt: &Stmt) -> String {
        stmt.accept(self)
    }

    fn print_function(&mut self, prefix: &str, function: &FunctionData) -> String {
        let mut string = String::new();
        string += "(";
        string += prefix;
        string += " ";
        string += &function.name.lexeme;
        string += "(";
        string += &function.params.iter()
            .map(|param| param.lexeme.clone())
            .collect::<Vec<String>>()
            .join(" ");
        string += ") { ";
        string += &function.body.iter()
            .map(|stmt| stmt.accept(self))
            .collect::<Vec<String>>()
            .join(" ");
        string += " })";

        string
    }
}

impl ExprVisitor<String> for ASTPrinter {
    fn visit_assign_expr(&mut self, assign: &AssignData) -> String {
        parenthesize!(self, format!("= {}", &assign.name.lexeme).as_str(), assign.value)
    }

    fn visit_binary_expr(&mut self, binary: &BinaryData) -> String {
        parenthesize!(self, &binary.operator.lexeme, &binary.left, &binary.right)
    }

    fn visit_call_expr(&mut self, call: &CallData) -> String {
        let mut string = String::new();
        string += &call.callee.accept(self);
        string += "(";
        string += &call.arguments.iter()
            .map(|argument| argument.accept(self))
            .collect::<Vec<String>>()
            .join(" ");
        string += ")";
        string
    }

    fn visit_get_expr(&mut self, get: &GetData) -> String {
        format!("(. {} {})", get.object.accept(self), get.name.lexeme)
    }

    fn visit_grouping_expr(&mut self, grouping: &GroupingData) -> String {
        parenthesize!(self, "group", grouping.expr)
    }

    fn visit_lambda_expr(&mut self, lambda: &LambdaData) -> String {
        let mut string = String::new();
        string += "(lambda (";
        string += &lambda.params.iter()
            .map(|param| param.lexeme.clone())
            .collect::<Vec<String>>()
            .join(" ");
        string += ") { ";
        string += &lambda.body.iter()
            .map(|stmt| stmt.accept(self))
            .collect::<Vec<String>>()
            .join(" ");
        string += " })";

        string
    }

    fn visit_literal_expr(&mut self, literal: &Literal) -> String {
        literal.to_string() // Uses fmt::Display impl for Literal
    }

    fn visit_logical_expr(&mut self, logical: &LogicalData) -> String {
        parenthesize!(self, &logical.operator.lexeme, &logical.left, &logical.right)
    }

    fn visit_set_expr(&mut self, set: &SetData) -> String {
        let target = format!("(. {} {})", set.object.accept(self), set.name.lexeme);
        parenthesize!(self, format!("= {target}").as_str(), set.value)
    }

    fn visit_ternary_expr(&mut self, ternary: &TernaryData) -> String {
        parenthesize!(self, "?:", ternary.condition, ternary.then_branch, ternary.else_branch)
    }

    fn visit_this_expr(&mut self, _this: &ThisData) -> String {
        "this".to_string()
    }

    fn visit_unary_expr(&mut self, unary: &UnaryData) -> String {
        parenthesize!(self, &unary.operator.lexeme, &unary.expr)
    }

    fn visit_variable_expr(&mut self, variable: &VariableData) -> String {
        variable.name.lexeme.clone()
    }
}

impl StmtVisitor<String> for ASTPrinter {
    fn visit_block_stmt(&mut self, block: &BlockData) -> String {
        let mut string = String::new();
        string += "{";
        for stmt in &block.statements {
            string += " ";
            string += &stmt.accept(self);
        }
        string += " }";

        string
    }

    fn visit_break_stmt(&mut self, _break_stmt: &BreakData) -> String {
        "(break)".to_string()
    }

    fn visit_class_stmt(&mut self, class: &ClassData) -> String {
        let mut string = String::new();
        string += "(class ";
        string += &class.name.lexeme;

        if let Some(Expr::Variable(superclass)) = &class.superclass {
            string += " < ";
            string += &superclass.name.lexeme;
        }

        string += " {";
        for method in &class.class_methods {
            string += " ";
            string += &self.print_function("class method", method);
        }
        for method in &class.methods {
            string += " ";
            string += &self.print_function("method", method);
        }
        string += " })";

        string
    }

    fn visit_expression_stmt(&mut self, expression: &ExpressionData) -> String {
        parenthesize!(self, "expr", expression.expr)
    }

    fn visit_function_stmt(&mut self, function: &FunctionData) -> String {
        self.print_function("fun", function)
    }

    fn visit_if_stmt(&mut self, if_stmt: &IfData) -> String {
        let mut string = String::new();
        string += "(if ";
        string += &if_stmt.condition.accept(self);
        string += " ";
        string += &if_stmt.then_branch.accept(self);
        if let Some(else_branch) = &if_stmt.else_branch {
            string += " else ";
            string += &else_branch.accept(self);
        }
        string += ")";

        string
    }

    fn visit_print_stmt(&mut self, print: &PrintData) -> String {
        parenthesize!(self, "print", print.expr)
    }

    fn visit_return_stmt(&mut self, return_stmt: &ReturnData) -> String {
        match &return_stmt.value {
            Some(value) => parenthesize!(self, "return", value),
            None => "(return)".to_string(),
        }
    }

    fn visit_var_stmt(&mut self, var: &VarData) -> String {
        let mut string = String::new();
        string += "(var ";
        string += &var.name.lexeme;
        if let Some(initializer) = &var.initializer {
            string += " = ";
            string += &initializer.accept(self);
        }
        string += ")";

        string
    }

    fn visit_while_stmt(&mut self, while_stmt: &WhileData) -> String {
        parenthesize!(self, "while", while_stmt.condition, while_stmt.body)
    }
}
