use crate::expr::Expr;
use crate::stmt::Stmt;

/// Returns a string representation of the expression in parentheses.
macro_rules! parenthesize {
    ( $self:ident, $name:expr, $( $x:expr ),+ ) => {
        {
            let mut string = String::new();
            string += "(";
            string += $name;
            $(
                string += " ";
                string += &$self.print($x);
            )*
            string += ")";

            string
        }
    };
}

/// Renders the AST in a parenthesized prefix notation. Debugging aid only;
/// nothing in the interpreter depends on it.
pub struct AstPrinter;

impl AstPrinter {
    pub fn print(&self, expr: &Expr) -> String {
        match expr {
            Expr::Literal(literal) => literal.to_string(),
            Expr::Unary(unary) => parenthesize!(self, &unary.operator.lexeme, &unary.expr),
            Expr::Binary(binary) => parenthesize!(self, &binary.operator.lexeme, &binary.left, &binary.right),
            Expr::Logical(logical) => parenthesize!(self, &logical.operator.lexeme, &logical.left, &logical.right),
            Expr::Grouping(grouping) => parenthesize!(self, "group", &grouping.expr),
            Expr::Variable(variable) => variable.name.lexeme.clone(),
            Expr::Assign(assign) => {
                parenthesize!(self, format!("= {}", assign.name.lexeme).as_str(), &assign.value)
            },
            Expr::Call(call) => {
                let mut string = String::new();
                string += &self.print(&call.callee);
                string += "(";
                string += &call.arguments.iter()
                    .map(|argument| self.print(argument))
                    .collect::<Vec<String>>()
                    .join(" ");
                string += ")";
                string
            },
            Expr::Get(get) => format!("(. {} {})", self.print(&get.object), get.name.lexeme),
            Expr::Set(set) => {
                format!("(= (. {} {}) {})", self.print(&set.object), set.name.lexeme, self.print(&set.value))
            },
            Expr::This(_) => "this".to_string(),
            Expr::Super(data) => format!("(. super {})", data.method.lexeme),
        }
    }

    pub fn print_stmt(&self, stmt: &Stmt) -> String {
        match stmt {
            Stmt::Expression(data) => parenthesize!(self, "expr", &data.expr),
            Stmt::Print(data) => parenthesize!(self, "print", &data.expr),
            Stmt::Var(data) => {
                let mut string = String::new();
                string += "(var ";
                string += &data.name.lexeme;
                if let Some(initializer) = &data.initializer {
                    string += " = ";
                    string += &self.print(initializer);
                }
                string += ")";
                string
            },
            Stmt::Block(data) => {
                let mut string = String::new();
                string += "{";
                for stmt in &data.statements {
                    string += " ";
                    string += &self.print_stmt(stmt);
                }
                string += " }";
                string
            },
            Stmt::If(data) => {
                let mut string = String::new();
                string += "(if ";
                string += &self.print(&data.condition);
                string += " ";
                string += &self.print_stmt(&data.then_branch);
                if let Some(else_branch) = &data.else_branch {
                    string += " else ";
                    string += &self.print_stmt(else_branch);
                }
                string += ")";
                string
            },
            Stmt::While(data) => {
                format!("(while {} {})", self.print(&data.condition), self.print_stmt(&data.body))
            },
            Stmt::Function(data) => {
                let mut string = String::new();
                string += "(fun ";
                string += &data.name.lexeme;
                string += "(";
                string += &data.params.iter()
                    .map(|param| param.lexeme.clone())
                    .collect::<Vec<String>>()
                    .join(" ");
                string += ") { ";
                string += &data.body.iter()
                    .map(|stmt| self.print_stmt(stmt))
                    .collect::<Vec<String>>()
                    .join(" ");
                string += " })";
                string
            },
            Stmt::Return(data) => match &data.value {
                Some(value) => parenthesize!(self, "return", value),
                None => "(return)".to_string(),
            },
            Stmt::Class(data) => {
                let mut string = String::new();
                string += "(class ";
                string += &data.name.lexeme;
                if let Some(superclass) = &data.superclass {
                    string += " < ";
                    string += &self.print(superclass);
                }
                for method in &data.methods {
                    string += " ";
                    string += &self.print_stmt(method);
                }
                string += ")";
                string
            },
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::expr::{BinaryData, GroupingData, UnaryData};
    use crate::literal::Literal;
    use crate::token::{Location, Token, Type};

    #[test]
    fn print_expression() {
        // -123 * (45.67)
        let expr = Expr::Binary(BinaryData {
            left: Box::new(Expr::Unary(UnaryData {
                operator: Token::new(Type::Minus, "-".to_string(), None, Location::new(1, 0)),
                expr: Box::new(Expr::Literal(Literal::Number(123.0))),
            })),
            operator: Token::new(Type::Star, "*".to_string(), None, Location::new(1, 5)),
            right: Box::new(Expr::Grouping(GroupingData {
                expr: Box::new(Expr::Literal(Literal::Number(45.67))),
            })),
        });

        assert_eq!(AstPrinter.print(&expr), "(* (- 123) (group 45.67))");
    }

    #[test]
    fn print_statement() {
        let stmt = Stmt::Print(crate::stmt::PrintData {
            expr: Expr::Literal(Literal::String("hi".to_string())),
        });

        assert_eq!(AstPrinter.print_stmt(&stmt), "(print hi)");
    }
}
