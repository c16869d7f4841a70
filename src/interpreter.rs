use std::cell::RefCell;
use std::collections::HashMap;
use std::io::Write;
use std::mem;
use std::rc::Rc;

use crate::class::Class;
use crate::environment::Environment;
use crate::error::{Error, ErrorSink, RuntimeError};
use crate::expr::*;
use crate::function::{Function, NativeFunction};
use crate::literal::Literal;
use crate::object::{Callable, Object};
use crate::stmt::*;
use crate::token::{Token, Type};

/// How a statement finished. A `return` is ordinary control flow, not an
/// error; it travels up the execution stack as a value until the enclosing
/// function call consumes it.
#[derive(Debug)]
pub enum Flow {
    Normal,
    Return(Object),
}

fn number_operands_error(operator: &Token) -> RuntimeError {
    RuntimeError {
        token: operator.clone(),
        message: "Operands must be numbers.".to_string(),
    }
}

fn check_number_operands(operator: &Token, left: &Object, right: &Object) -> Result<(f64, f64), RuntimeError> {
    match (left.as_number(), right.as_number()) {
        (Some(left), Some(right)) => Ok((left, right)),
        _ => Err(number_operands_error(operator)),
    }
}

/// Evaluates resolved statements against a chain of lexical environments.
/// Program output goes to the injected writer; runtime errors unwind to
/// `interpret`, which reports them and aborts the run.
pub struct Interpreter<'a> {
    pub globals: Rc<RefCell<Environment>>,
    environment: Rc<RefCell<Environment>>,
    locals: HashMap<NodeId, usize>,
    out: &'a mut dyn Write,
}

impl<'a> Interpreter<'a> {
    pub fn new(out: &'a mut dyn Write) -> Self {
        let globals = Rc::new(RefCell::new(Environment::default()));

        for native in NativeFunction::get_globals() {
            let name = native.name.lexeme.clone();
            globals.borrow_mut().define(&name, Object::from(native));
        }

        Interpreter {
            environment: Rc::clone(&globals),
            globals,
            locals: HashMap::new(),
            out,
        }
    }

    /// Executes the statements in order. A runtime error aborts the run
    /// and is reported through the sink; the interpreter itself stays
    /// usable (the REPL keeps feeding it lines).
    pub fn interpret(&mut self, statements: &[Stmt], sink: &mut ErrorSink) {
        for statement in statements {
            if let Err(error) = self.execute(statement) {
                error.throw(sink);
                return;
            }
        }
    }

    /// Records the lexical depth of a resolvable expression node. Called
    /// by the resolver; read back when the variable is accessed.
    pub fn resolve(&mut self, id: NodeId, depth: usize) {
        self.locals.insert(id, depth);
    }

    fn execute(&mut self, stmt: &Stmt) -> Result<Flow, RuntimeError> {
        match stmt {
            Stmt::Expression(data) => {
                self.evaluate(&data.expr)?;
                Ok(Flow::Normal)
            },
            Stmt::Print(data) => {
                let value = self.evaluate(&data.expr)?;
                let _ = writeln!(self.out, "{value}");
                Ok(Flow::Normal)
            },
            Stmt::Var(data) => {
                let value = match &data.initializer {
                    Some(initializer) => self.evaluate(initializer)?,
                    None => Object::from(Literal::Nil),
                };

                self.environment.borrow_mut().define(&data.name.lexeme, value);
                Ok(Flow::Normal)
            },
            Stmt::Block(data) => {
                let environment = Environment::new(Some(Rc::clone(&self.environment)));
                self.execute_block(&data.statements, Rc::new(RefCell::new(environment)))
            },
            Stmt::If(data) => {
                if self.evaluate(&data.condition)?.is_truthy() {
                    self.execute(&data.then_branch)
                } else if let Some(else_branch) = &data.else_branch {
                    self.execute(else_branch)
                } else {
                    Ok(Flow::Normal)
                }
            },
            Stmt::While(data) => {
                while self.evaluate(&data.condition)?.is_truthy() {
                    match self.execute(&data.body)? {
                        Flow::Normal => (),
                        flow @ Flow::Return(_) => return Ok(flow),
                    }
                }

                Ok(Flow::Normal)
            },
            Stmt::Function(data) => {
                let function = Function::new(data, Rc::clone(&self.environment), false);
                self.environment.borrow_mut().define(&data.name.lexeme, Object::from(function));
                Ok(Flow::Normal)
            },
            Stmt::Return(data) => {
                let value = match &data.value {
                    Some(value) => self.evaluate(value)?,
                    None => Object::from(Literal::Nil),
                };

                Ok(Flow::Return(value))
            },
            Stmt::Class(data) => {
                self.class_stmt(data)?;
                Ok(Flow::Normal)
            },
        }
    }

    /// Executes statements inside the given environment, restoring the
    /// previous one on every exit path: normal completion, a `return`
    /// travelling up, or a runtime error.
    pub fn execute_block(&mut self, statements: &[Stmt], environment: Rc<RefCell<Environment>>) -> Result<Flow, RuntimeError> {
        let previous = mem::replace(&mut self.environment, environment);

        let mut result = Ok(Flow::Normal);
        for statement in statements {
            result = self.execute(statement);
            if !matches!(result, Ok(Flow::Normal)) {
                break;
            }
        }

        self.environment = previous;
        result
    }

    fn class_stmt(&mut self, data: &ClassData) -> Result<(), RuntimeError> {
        let superclass = match &data.superclass {
            Some(expr) => match self.evaluate(expr)? {
                Object::Class(class) => Some(class),
                _ => {
                    let Expr::Variable(variable) = expr else { unreachable!() };
                    return Err(RuntimeError {
                        token: variable.name.clone(),
                        message: "Superclass must be a class.".to_string(),
                    });
                },
            },
            None => None,
        };

        self.environment.borrow_mut().define(&data.name.lexeme, Object::from(Literal::Nil));

        // Methods of a subclass close over an environment holding `super`.
        let enclosing = superclass.as_ref().map(|superclass| {
            let mut environment = Environment::new(Some(Rc::clone(&self.environment)));
            environment.define("super", Object::from(Rc::clone(superclass)));
            mem::replace(&mut self.environment, Rc::new(RefCell::new(environment)))
        });

        let mut methods = HashMap::new();
        for method in &data.methods {
            let Stmt::Function(function) = method else { unreachable!() };

            let is_initializer = function.name.lexeme == "init";
            methods.insert(
                function.name.lexeme.clone(),
                Function::new(function, Rc::clone(&self.environment), is_initializer),
            );
        }

        let class = Class::new(data.name.lexeme.clone(), superclass, methods);

        if let Some(enclosing) = enclosing {
            self.environment = enclosing;
        }

        self.environment.borrow_mut().assign(&data.name, Object::from(class))
    }

    fn evaluate(&mut self, expr: &Expr) -> Result<Object, RuntimeError> {
        match expr {
            Expr::Literal(literal) => Ok(Object::from(literal.clone())),
            Expr::Grouping(data) => self.evaluate(&data.expr),
            Expr::Unary(data) => self.unary_expr(data),
            Expr::Binary(data) => self.binary_expr(data),
            Expr::Logical(data) => self.logical_expr(data),
            Expr::Variable(data) => self.look_up_variable(&data.name, data.id),
            Expr::Assign(data) => self.assign_expr(data),
            Expr::Call(data) => self.call_expr(data),
            Expr::Get(data) => self.get_expr(data),
            Expr::Set(data) => self.set_expr(data),
            Expr::This(data) => self.look_up_variable(&data.keyword, data.id),
            Expr::Super(data) => self.super_expr(data),
        }
    }

    /// Looks the reference up at its resolved depth, or in the global
    /// environment if the resolver left it unresolved.
    fn look_up_variable(&self, name: &Token, id: NodeId) -> Result<Object, RuntimeError> {
        match self.locals.get(&id) {
            Some(distance) => self.environment.borrow().get_at(*distance, name),
            None => self.globals.borrow().get(name),
        }
    }

    fn unary_expr(&mut self, unary: &UnaryData) -> Result<Object, RuntimeError> {
        let right = self.evaluate(&unary.expr)?;

        match unary.operator.r#type {
            Type::Minus => (-right).ok_or_else(|| RuntimeError {
                token: unary.operator.clone(),
                message: "Operand must be a number.".to_string(),
            }),
            Type::Bang => Ok(Object::from(!right.is_truthy())),
            _ => unreachable!(),
        }
    }

    fn binary_expr(&mut self, binary: &BinaryData) -> Result<Object, RuntimeError> {
        let left = self.evaluate(&binary.left)?;
        let right = self.evaluate(&binary.right)?;
        let operator = &binary.operator;

        match operator.r#type {
            Type::Plus => (left + right).ok_or_else(|| RuntimeError {
                token: operator.clone(),
                message: "Operands must be two numbers or two strings.".to_string(),
            }),
            Type::Minus => (left - right).ok_or_else(|| number_operands_error(operator)),
            Type::Slash => (left / right).ok_or_else(|| number_operands_error(operator)),
            Type::Star => (left * right).ok_or_else(|| number_operands_error(operator)),
            // Comparisons go through the raw doubles so NaN compares the
            // IEEE way instead of raising a type error.
            Type::Greater => {
                let (left, right) = check_number_operands(operator, &left, &right)?;
                Ok(Object::from(left > right))
            },
            Type::GreaterEqual => {
                let (left, right) = check_number_operands(operator, &left, &right)?;
                Ok(Object::from(left >= right))
            },
            Type::Less => {
                let (left, right) = check_number_operands(operator, &left, &right)?;
                Ok(Object::from(left < right))
            },
            Type::LessEqual => {
                let (left, right) = check_number_operands(operator, &left, &right)?;
                Ok(Object::from(left <= right))
            },
            Type::EqualEqual => Ok(Object::from(left == right)),
            Type::BangEqual => Ok(Object::from(left != right)),
            _ => unreachable!(),
        }
    }

    /// Short-circuit: the left operand decides whether the right one runs,
    /// and whichever operand is returned keeps its own value.
    fn logical_expr(&mut self, logical: &LogicalData) -> Result<Object, RuntimeError> {
        let left = self.evaluate(&logical.left)?;

        match logical.operator.r#type {
            Type::Or if left.is_truthy() => Ok(left),
            Type::And if !left.is_truthy() => Ok(left),
            _ => self.evaluate(&logical.right),
        }
    }

    fn assign_expr(&mut self, assign: &AssignData) -> Result<Object, RuntimeError> {
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

    fn call_expr(&mut self, call: &CallData) -> Result<Object, RuntimeError> {
        let callee = self.evaluate(&call.callee)?;

        let mut arguments = Vec::with_capacity(call.arguments.len());
        for argument in &call.arguments {
            arguments.push(self.evaluate(argument)?);
        }

        let callable: &dyn Callable = match &callee {
            Object::Function(function) => function,
            Object::NativeFunction(native) => native,
            Object::Class(class) => class,
            _ => return Err(RuntimeError {
                token: call.paren.clone(),
                message: "Can only call functions and classes.".to_string(),
            }),
        };

        if arguments.len() != callable.arity() {
            return Err(RuntimeError {
                token: call.paren.clone(),
                message: format!("Expected {} arguments but got {}.", callable.arity(), arguments.len()),
            });
        }

        callable.call(self, arguments)
    }

    fn get_expr(&mut self, get: &GetData) -> Result<Object, RuntimeError> {
        let object = self.evaluate(&get.object)?;

        match &object {
            Object::Instance(instance) => instance.borrow().get(&get.name, &object),
            _ => Err(RuntimeError {
                token: get.name.clone(),
                message: "Only instances have properties.".to_string(),
            }),
        }
    }

    fn set_expr(&mut self, set: &SetData) -> Result<Object, RuntimeError> {
        let object = self.evaluate(&set.object)?;

        let Object::Instance(instance) = object else {
            return Err(RuntimeError {
                token: set.name.clone(),
                message: "Only instances have fields.".to_string(),
            });
        };

        let value = self.evaluate(&set.value)?;
        instance.borrow_mut().set(&set.name, value.clone());

        Ok(value)
    }

    fn super_expr(&mut self, data: &SuperData) -> Result<Object, RuntimeError> {
        // The resolver guarantees `super` resolves inside a subclass
        // method, always at depth >= 1.
        let distance = *self.locals.get(&data.id).expect("'super' to have been resolved");

        let superclass = self.environment.borrow().get_at(distance, &Token::from("super"))?;
        let Object::Class(superclass) = superclass else { unreachable!() };

        // The environment binding `this` sits right inside the one
        // holding `super`.
        let object = self.environment.borrow().get_at(distance - 1, &Token::from("this"))?;

        let method = superclass.borrow().find_method(&data.method.lexeme)
            .ok_or_else(|| RuntimeError {
                token: data.method.clone(),
                message: format!("Undefined property '{}'.", data.method.lexeme),
            })?;

        Ok(Object::from(method.bind(object)))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::token::Location;

    fn token(r#type: Type, lexeme: &str) -> Token {
        Token::new(r#type, lexeme.to_string(), None, Location::new(1, 0))
    }

    fn number(value: f64) -> Box<Expr> {
        Box::new(Expr::Literal(Literal::Number(value)))
    }

    fn string(value: &str) -> Box<Expr> {
        Box::new(Expr::Literal(Literal::String(value.to_string())))
    }

    #[test]
    fn evaluate_literal() {
        let mut out = Vec::new();
        let mut interpreter = Interpreter::new(&mut out);
        let expr = Expr::Literal(Literal::Number(12.0));
        assert_eq!(interpreter.evaluate(&expr).unwrap(), Object::from(12.0));
    }

    #[test]
    fn evaluate_unary() {
        let mut out = Vec::new();
        let mut interpreter = Interpreter::new(&mut out);
        let expr = Expr::Unary(UnaryData {
            operator: token(Type::Minus, "-"),
            expr: number(12.0),
        });
        assert_eq!(interpreter.evaluate(&expr).unwrap(), Object::from(-12.0));
    }

    #[test]
    fn evaluate_unary_not_a_number() {
        let mut out = Vec::new();
        let mut interpreter = Interpreter::new(&mut out);
        let expr = Expr::Unary(UnaryData {
            operator: token(Type::Minus, "-"),
            expr: string("muffin"),
        });

        let error = interpreter.evaluate(&expr).unwrap_err();
        assert_eq!(error.message, "Operand must be a number.");
    }

    #[test]
    fn evaluate_bang_truthiness() {
        let mut out = Vec::new();
        let mut interpreter = Interpreter::new(&mut out);

        for (value, expected) in [
            (Expr::Literal(Literal::Nil), true),
            (Expr::Literal(Literal::Bool(false)), true),
            (Expr::Literal(Literal::Number(0.0)), false),
            (Expr::Literal(Literal::String(String::new())), false),
        ] {
            let expr = Expr::Unary(UnaryData {
                operator: token(Type::Bang, "!"),
                expr: Box::new(value),
            });
            assert_eq!(interpreter.evaluate(&expr).unwrap(), Object::from(expected));
        }
    }

    #[test]
    fn evaluate_binary() {
        let mut out = Vec::new();
        let mut interpreter = Interpreter::new(&mut out);
        let expr = Expr::Binary(BinaryData {
            left: number(12.0),
            operator: token(Type::Minus, "-"),
            right: number(12.0),
        });
        assert_eq!(interpreter.evaluate(&expr).unwrap(), Object::from(0.0));
    }

    #[test]
    fn evaluate_grouping() {
        let mut out = Vec::new();
        let mut interpreter = Interpreter::new(&mut out);
        let expr = Expr::Grouping(GroupingData {
            expr: number(12.0),
        });
        assert_eq!(interpreter.evaluate(&expr).unwrap(), Object::from(12.0));
    }

    #[test]
    fn evaluate_string_concat() {
        let mut out = Vec::new();
        let mut interpreter = Interpreter::new(&mut out);
        let expr = Expr::Binary(BinaryData {
            left: string("Hello"),
            operator: token(Type::Plus, "+"),
            right: string("World"),
        });
        assert_eq!(interpreter.evaluate(&expr).unwrap(), Object::from("HelloWorld"));
    }

    #[test]
    fn evaluate_string_plus_number() {
        let mut out = Vec::new();
        let mut interpreter = Interpreter::new(&mut out);
        let expr = Expr::Binary(BinaryData {
            left: string("Hello"),
            operator: token(Type::Plus, "+"),
            right: number(12.0),
        });

        let error = interpreter.evaluate(&expr).unwrap_err();
        assert_eq!(error.message, "Operands must be two numbers or two strings.");
    }

    #[test]
    fn evaluate_comparisons() {
        let mut out = Vec::new();
        let mut interpreter = Interpreter::new(&mut out);

        for (r#type, lexeme, expected) in [
            (Type::Greater, ">", false),
            (Type::GreaterEqual, ">=", true),
            (Type::Less, "<", false),
            (Type::LessEqual, "<=", true),
            (Type::EqualEqual, "==", true),
            (Type::BangEqual, "!=", false),
        ] {
            let expr = Expr::Binary(BinaryData {
                left: number(12.0),
                operator: token(r#type, lexeme),
                right: number(12.0),
            });
            assert_eq!(interpreter.evaluate(&expr).unwrap(), Object::from(expected));
        }
    }

    #[test]
    fn evaluate_comparison_types() {
        let mut out = Vec::new();
        let mut interpreter = Interpreter::new(&mut out);
        let expr = Expr::Binary(BinaryData {
            left: number(12.0),
            operator: token(Type::Greater, ">"),
            right: string("12"),
        });

        let error = interpreter.evaluate(&expr).unwrap_err();
        assert_eq!(error.message, "Operands must be numbers.");
    }

    #[test]
    fn evaluate_equality_across_types() {
        let mut out = Vec::new();
        let mut interpreter = Interpreter::new(&mut out);
        let expr = Expr::Binary(BinaryData {
            left: number(0.0),
            operator: token(Type::EqualEqual, "=="),
            right: string("0"),
        });
        assert_eq!(interpreter.evaluate(&expr).unwrap(), Object::from(false));
    }

    #[test]
    fn undefined_variable() {
        let mut out = Vec::new();
        let mut interpreter = Interpreter::new(&mut out);
        let expr = Expr::Variable(VariableData {
            id: 0,
            name: token(Type::Identifier, "missing"),
        });

        let error = interpreter.evaluate(&expr).unwrap_err();
        assert_eq!(error.message, "Undefined variable 'missing'.");
    }

    #[test]
    fn clock_is_defined() {
        let mut out = Vec::new();
        let mut interpreter = Interpreter::new(&mut out);
        let expr = Expr::Variable(VariableData {
            id: 0,
            name: token(Type::Identifier, "clock"),
        });

        let value = interpreter.evaluate(&expr).unwrap();
        assert_eq!(value.to_string(), "<native fn>");
    }

    #[test]
    fn environment_restored_after_block() {
        let mut out = Vec::new();
        let mut interpreter = Interpreter::new(&mut out);
        let before = Rc::clone(&interpreter.environment);

        let block = [Stmt::Var(VarData {
            name: token(Type::Identifier, "a"),
            initializer: None,
        })];
        let environment = Environment::new(Some(Rc::clone(&interpreter.environment)));
        interpreter.execute_block(&block, Rc::new(RefCell::new(environment))).unwrap();

        assert!(Rc::ptr_eq(&before, &interpreter.environment));
    }
}
