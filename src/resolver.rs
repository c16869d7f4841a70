use std::collections::HashMap;
use std::mem;

use crate::error::{Error, ErrorSink, ResolveError};
use crate::expr::Expr;
use crate::interpreter::Interpreter;
use crate::stmt::{ClassData, FunctionData, Stmt};
use crate::token::Token;

/// The kind of function body the resolver is currently inside of.
enum FunctionType {
    None,
    Function,
    Initializer,
    Method,
}

/// The kind of class body the resolver is currently inside of.
enum ClassType {
    None,
    Class,
    Subclass,
}

/// Walks the AST before evaluation and tells the interpreter at which
/// lexical depth every variable reference lives. Also diagnoses the static
/// errors the parser cannot see: illegal `return`/`this`/`super`, duplicate
/// locals and self-inheritance. The resolver never aborts; every error is
/// reported to the sink and the walk continues.
pub struct Resolver<'i, 'a> {
    interpreter: &'i mut Interpreter<'a>,
    sink: &'i mut ErrorSink,
    scopes: Vec<HashMap<String, bool>>,
    current_function: FunctionType,
    current_class: ClassType,
}

impl<'i, 'a> Resolver<'i, 'a> {
    pub fn new(interpreter: &'i mut Interpreter<'a>, sink: &'i mut ErrorSink) -> Self {
        Resolver {
            interpreter,
            sink,
            scopes: vec![],
            current_function: FunctionType::None,
            current_class: ClassType::None,
        }
    }

    /// Resolves a list of statements.
    pub fn resolve(&mut self, statements: &[Stmt]) {
        for statement in statements {
            self.resolve_stmt(statement);
        }
    }

    fn resolve_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Expression(data) => self.resolve_expr(&data.expr),
            Stmt::Print(data) => self.resolve_expr(&data.expr),
            Stmt::Var(data) => {
                self.declare(&data.name);
                if let Some(initializer) = &data.initializer {
                    self.resolve_expr(initializer);
                }
                self.define(&data.name);
            },
            Stmt::Block(data) => {
                self.begin_scope();
                self.resolve(&data.statements);
                self.end_scope();
            },
            Stmt::If(data) => {
                self.resolve_expr(&data.condition);
                self.resolve_stmt(&data.then_branch);
                if let Some(else_branch) = &data.else_branch {
                    self.resolve_stmt(else_branch);
                }
            },
            Stmt::While(data) => {
                self.resolve_expr(&data.condition);
                self.resolve_stmt(&data.body);
            },
            Stmt::Function(data) => {
                self.declare(&data.name);
                self.define(&data.name);

                self.resolve_function(data, FunctionType::Function);
            },
            Stmt::Return(data) => {
                if let FunctionType::None = self.current_function {
                    ResolveError {
                        token: data.keyword.clone(),
                        message: "Can't return from top-level code.".to_string(),
                    }.throw(self.sink);
                }

                if let Some(value) = &data.value {
                    if let FunctionType::Initializer = self.current_function {
                        ResolveError {
                            token: data.keyword.clone(),
                            message: "Can't return a value from an initializer.".to_string(),
                        }.throw(self.sink);
                    }

                    self.resolve_expr(value);
                }
            },
            Stmt::Class(data) => self.resolve_class(data),
        }
    }

    fn resolve_expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Literal(_) => (),
            Expr::Unary(data) => self.resolve_expr(&data.expr),
            Expr::Binary(data) => {
                self.resolve_expr(&data.left);
                self.resolve_expr(&data.right);
            },
            Expr::Logical(data) => {
                self.resolve_expr(&data.left);
                self.resolve_expr(&data.right);
            },
            Expr::Grouping(data) => self.resolve_expr(&data.expr),
            Expr::Variable(data) => {
                if let Some(scope) = self.scopes.last() {
                    if let Some(defined) = scope.get(&data.name.lexeme) {
                        if !defined {
                            ResolveError {
                                token: data.name.clone(),
                                message: "Can't read local variable in its own initializer.".to_string(),
                            }.throw(self.sink);
                        }
                    }
                }

                self.resolve_local(data.id, &data.name);
            },
            Expr::Assign(data) => {
                self.resolve_expr(&data.value);
                self.resolve_local(data.id, &data.name);
            },
            Expr::Call(data) => {
                self.resolve_expr(&data.callee);

                for argument in &data.arguments {
                    self.resolve_expr(argument);
                }
            },
            // Properties are looked up dynamically; only the object
            // expression resolves.
            Expr::Get(data) => self.resolve_expr(&data.object),
            Expr::Set(data) => {
                self.resolve_expr(&data.value);
                self.resolve_expr(&data.object);
            },
            Expr::This(data) => {
                if let ClassType::None = self.current_class {
                    ResolveError {
                        token: data.keyword.clone(),
                        message: "Can't use 'this' outside of a class.".to_string(),
                    }.throw(self.sink);

                    return;
                }

                self.resolve_local(data.id, &data.keyword);
            },
            Expr::Super(data) => {
                match self.current_class {
                    ClassType::Subclass => self.resolve_local(data.id, &data.keyword),
                    ClassType::None => ResolveError {
                        token: data.keyword.clone(),
                        message: "Can't use 'super' outside of a class.".to_string(),
                    }.throw(self.sink),
                    ClassType::Class => ResolveError {
                        token: data.keyword.clone(),
                        message: "Can't use 'super' in a class with no superclass.".to_string(),
                    }.throw(self.sink),
                }
            },
        }
    }

    fn resolve_class(&mut self, class: &ClassData) {
        let enclosing_class = mem::replace(&mut self.current_class, ClassType::Class);

        self.declare(&class.name);
        self.define(&class.name);

        if let Some(superclass) = &class.superclass {
            let Expr::Variable(variable) = superclass else { unreachable!() };

            if class.name.lexeme == variable.name.lexeme {
                ResolveError {
                    token: variable.name.clone(),
                    message: "A class can't inherit from itself.".to_string(),
                }.throw(self.sink);
            }

            self.current_class = ClassType::Subclass;

            self.resolve_expr(superclass);

            // Methods of a subclass close over a scope holding `super`.
            self.begin_scope();
            self.scopes
                .last_mut()
                .expect("scope stack to not be empty")
                .insert("super".to_string(), true);
        }

        // Method bodies close over a scope holding `this`.
        self.begin_scope();
        self.scopes
            .last_mut()
            .expect("scope stack to not be empty")
            .insert("this".to_string(), true);

        for method in &class.methods {
            let Stmt::Function(function) = method else { unreachable!() };

            let declaration = if function.name.lexeme == "init" {
                FunctionType::Initializer
            } else {
                FunctionType::Method
            };
            self.resolve_function(function, declaration);
        }

        self.end_scope();

        if class.superclass.is_some() {
            self.end_scope();
        }

        self.current_class = enclosing_class;
    }

    fn resolve_function(&mut self, function: &FunctionData, r#type: FunctionType) {
        let enclosing_function = mem::replace(&mut self.current_function, r#type);

        self.begin_scope();
        for param in &function.params {
            self.declare(param);
            self.define(param);
        }
        self.resolve(&function.body);
        self.end_scope();

        self.current_function = enclosing_function;
    }

    fn begin_scope(&mut self) {
        self.scopes.push(HashMap::new());
    }

    fn end_scope(&mut self) {
        self.scopes.pop();
    }

    /// Marks the name as existing but not yet usable in the innermost
    /// scope. Redeclaring a local is an error; the global scope is not
    /// tracked here and allows it.
    fn declare(&mut self, name: &Token) {
        if self.scopes.is_empty() {
            return;
        }

        let scope = self.scopes.last_mut().expect("scope stack to not be empty");
        if scope.contains_key(&name.lexeme) {
            ResolveError {
                token: name.clone(),
                message: "Already a variable with this name in this scope.".to_string(),
            }.throw(self.sink);
        }
        scope.insert(name.lexeme.to_owned(), false);
    }

    /// Marks the name as fully initialized in the innermost scope.
    fn define(&mut self, name: &Token) {
        if self.scopes.is_empty() {
            return;
        }

        self.scopes
            .last_mut()
            .expect("scope stack to not be empty")
            .insert(name.lexeme.to_owned(), true);
    }

    /// Walks the scope stack from innermost outward and records the depth
    /// of the first scope that contains the name. Names found in no scope
    /// are left for the global environment at runtime.
    fn resolve_local(&mut self, id: usize, name: &Token) {
        for (depth, scope) in self.scopes.iter().rev().enumerate() {
            if scope.contains_key(&name.lexeme) {
                self.interpreter.resolve(id, depth);
                return;
            }
        }
    }
}
