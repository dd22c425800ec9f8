use std::{fmt::Display, str::FromStr};

use log::debug;

use crate::{
    ast::{
        ast::{Term, TermType},
        expressions::FuncExpr,
        types::Type,
    },
    errors::errors::{Error, ErrorImpl},
    Position,
};

use super::{environment::Environment, equality::type_eq, subtype::is_subtype};

/// One language of the checker family.
///
/// Each variant accepts a subset of terms and type annotations and decides
/// whether compatibility means equality or subtyping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    /// Booleans, numbers, addition and conditionals
    Arith,
    /// Arith plus variables, functions, calls, sequencing and constants
    Basic,
    /// Basic plus object literals and property access
    Object,
    /// Basic plus recursive function declarations
    RecFunc,
    /// Every construct, with equirecursive types
    Recursive,
    /// Every construct, compared with structural subtyping
    Subtyping,
}

impl Variant {
    pub const ALL: [Variant; 6] = [
        Variant::Arith,
        Variant::Basic,
        Variant::Object,
        Variant::RecFunc,
        Variant::Recursive,
        Variant::Subtyping,
    ];

    /// The short name used on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            Variant::Arith => "arith",
            Variant::Basic => "basic",
            Variant::Object => "obj",
            Variant::RecFunc => "recfunc",
            Variant::Recursive => "rec",
            Variant::Subtyping => "sub",
        }
    }

    pub fn supports_term(&self, term_type: TermType) -> bool {
        match term_type {
            TermType::Boolean | TermType::Number | TermType::Add | TermType::If => true,
            TermType::Var | TermType::Func | TermType::Call | TermType::Seq | TermType::Const => {
                *self != Variant::Arith
            }
            TermType::ObjectNew | TermType::ObjectGet => {
                matches!(self, Variant::Object | Variant::Recursive | Variant::Subtyping)
            }
            TermType::RecFunc => matches!(self, Variant::RecFunc | Variant::Recursive | Variant::Subtyping),
        }
    }

    pub fn supports_objects(&self) -> bool {
        self.supports_term(TermType::ObjectNew)
    }

    pub fn supports_recursive_types(&self) -> bool {
        matches!(self, Variant::Recursive | Variant::Subtyping)
    }

    pub fn uses_subtyping(&self) -> bool {
        *self == Variant::Subtyping
    }
}

impl Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Variant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Variant::ALL
            .iter()
            .find(|variant| variant.name() == s)
            .copied()
            .ok_or_else(|| {
                let names: Vec<&str> = Variant::ALL.iter().map(|variant| variant.name()).collect();
                format!("unknown variant `{}`, expected one of: {}", s, names.join(", "))
            })
    }
}

/// Switches that reproduce known-broken checker behaviour. Both are on by
/// default, which gives the sound checker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckerOptions {
    /// Require the condition of `?:` to be a boolean
    pub check_conditions: bool,
    /// Give each function literal its own copy of the environment.
    /// When off, parameters are written into the enclosing scope and stay
    /// visible after the function.
    pub copy_environments: bool,
}

impl Default for CheckerOptions {
    fn default() -> Self {
        CheckerOptions {
            check_conditions: true,
            copy_environments: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TypeChecker {
    variant: Variant,
    options: CheckerOptions,
}

impl TypeChecker {
    pub fn new(variant: Variant) -> Self {
        TypeChecker {
            variant,
            options: CheckerOptions::default(),
        }
    }

    pub fn with_options(mut self, options: CheckerOptions) -> Self {
        self.options = options;
        self
    }

    /// Type of a whole program under `env`.
    ///
    /// `env` itself is never modified, whatever the options.
    pub fn check(&self, term: &Term, env: &Environment) -> Result<Type, Error> {
        debug!("checking program with the {} checker ({:?})", self.variant, self.options);

        let mut env = env.clone();
        let result = type_check_term(self, term, &mut env);

        match &result {
            Ok(ty) => debug!("program has type {}", ty),
            Err(error) => debug!("type checking failed: {}", error),
        }

        result
    }

    /// The compatibility relation of the variant: subtyping or equality.
    fn compatible(&self, actual: &Type, expected: &Type) -> bool {
        if self.variant.uses_subtyping() {
            is_subtype(actual, expected)
        } else {
            type_eq(actual, expected)
        }
    }

    fn unsupported(&self, construct: &str, position: &Position) -> Error {
        debug!("{} rejected by the {} checker", construct, self.variant);
        Error::new(
            ErrorImpl::UnsupportedConstruct {
                construct: construct.to_string(),
                variant: self.variant,
            },
            position.clone(),
        )
    }

    /// Rejects annotations that mention types outside the variant.
    fn check_annotation(&self, ty: &Type, position: &Position) -> Result<(), Error> {
        if ty.is_recursive() && !self.variant.supports_recursive_types() {
            return Err(self.unsupported("recursive type", position));
        }
        if ty.contains_object() && !self.variant.supports_objects() {
            return Err(self.unsupported("object type", position));
        }
        Ok(())
    }
}

/// Type checks a closed program with the default options.
pub fn type_check(term: &Term, variant: Variant) -> Result<Type, Error> {
    TypeChecker::new(variant).check(term, &Environment::new())
}

pub fn type_check_term(checker: &TypeChecker, term: &Term, env: &mut Environment) -> Result<Type, Error> {
    let position = &term.get_span().start;
    let term_type = term.get_term_type();
    if !checker.variant.supports_term(term_type) {
        return Err(checker.unsupported(term_type.describe(), position));
    }

    match term {
        Term::Boolean(_) => Ok(Type::Boolean),
        Term::Number(_) => Ok(Type::Number),
        Term::Add(add) => {
            for operand in [&add.left, &add.right] {
                let operand_type = type_check_term(checker, operand, env)?;
                if operand_type.simplify() != Type::Number {
                    return Err(Error::new(
                        ErrorImpl::NumberExpected { received: operand_type },
                        operand.get_span().start.clone(),
                    ));
                }
            }

            Ok(Type::Number)
        }
        Term::If(conditional) => {
            let condition_type = type_check_term(checker, &conditional.condition, env)?;
            if checker.options.check_conditions && condition_type.simplify() != Type::Boolean {
                return Err(Error::new(
                    ErrorImpl::BooleanExpected {
                        received: condition_type,
                    },
                    conditional.condition.get_span().start.clone(),
                ));
            }

            let then_type = type_check_term(checker, &conditional.then_branch, env)?;
            let else_type = type_check_term(checker, &conditional.else_branch, env)?;

            let joined = if checker.variant.uses_subtyping() {
                if is_subtype(&else_type, &then_type) {
                    Some(then_type.clone())
                } else if is_subtype(&then_type, &else_type) {
                    Some(else_type.clone())
                } else {
                    None
                }
            } else if type_eq(&then_type, &else_type) {
                Some(then_type.clone())
            } else {
                None
            };

            joined.ok_or_else(|| {
                Error::new(
                    ErrorImpl::BranchTypeMismatch { then_type, else_type },
                    position.clone(),
                )
            })
        }
        Term::Var(symbol) => env.get_variable(&symbol.value, position),
        Term::Func(func) => {
            for (_, parameter_type) in &func.parameters {
                checker.check_annotation(parameter_type, position)?;
            }
            if let Some(return_type) = &func.return_type {
                checker.check_annotation(return_type, position)?;
            }

            let body_type = if checker.options.copy_environments {
                let mut function_env = env.clone();
                for (name, parameter_type) in &func.parameters {
                    function_env.declare_variable(name, parameter_type.clone());
                }
                type_check_term(checker, &func.body, &mut function_env)?
            } else {
                for (name, parameter_type) in &func.parameters {
                    env.declare_variable(name, parameter_type.clone());
                }
                type_check_term(checker, &func.body, env)?
            };

            let return_type = match &func.return_type {
                Some(declared) => {
                    if !type_eq(&body_type, declared) {
                        return Err(Error::new(
                            ErrorImpl::ReturnTypeMismatch {
                                expected: declared.clone(),
                                received: body_type,
                            },
                            func.body.get_span().start.clone(),
                        ));
                    }
                    declared.clone()
                }
                None => body_type,
            };

            Ok(Type::function(func.parameters.clone(), return_type))
        }
        Term::Call(call) => {
            let callee_type = type_check_term(checker, &call.callee, env)?;
            let function = match callee_type.simplify() {
                Type::Function(function) => function,
                other => {
                    return Err(Error::new(
                        ErrorImpl::FunctionExpected { received: other },
                        call.callee.get_span().start.clone(),
                    ))
                }
            };

            if function.parameters.len() != call.arguments.len() {
                return Err(Error::new(
                    ErrorImpl::ArgumentLengthMismatch {
                        expected: function.parameters.len(),
                        received: call.arguments.len(),
                    },
                    position.clone(),
                ));
            }

            for (argument, (_, parameter_type)) in call.arguments.iter().zip(&function.parameters) {
                let argument_type = type_check_term(checker, argument, env)?;
                if !checker.compatible(&argument_type, parameter_type) {
                    return Err(Error::new(
                        ErrorImpl::ArgumentTypeMismatch {
                            expected: parameter_type.clone(),
                            received: argument_type,
                        },
                        argument.get_span().start.clone(),
                    ));
                }
            }

            Ok(*function.return_type)
        }
        Term::Seq(seq) => {
            type_check_term(checker, &seq.body, env)?;
            type_check_term(checker, &seq.rest, env)
        }
        Term::Const(decl) => {
            let init_type = match decl.init.as_ref() {
                // An arrow function with a declared return type may refer to itself
                Term::Func(FuncExpr {
                    parameters,
                    return_type: Some(return_type),
                    ..
                }) if checker.variant.supports_term(TermType::RecFunc) => {
                    let declared = Type::function(parameters.clone(), return_type.clone());
                    let mut init_env = env.extend(&decl.identifier, declared);
                    type_check_term(checker, &decl.init, &mut init_env)?
                }
                _ => type_check_term(checker, &decl.init, env)?,
            };
            let mut rest_env = env.extend(&decl.identifier, init_type);
            type_check_term(checker, &decl.rest, &mut rest_env)
        }
        Term::ObjectNew(object) => {
            let mut properties = Vec::with_capacity(object.properties.len());
            for (name, value) in &object.properties {
                properties.push((name.clone(), type_check_term(checker, value, env)?));
            }

            Ok(Type::object(properties))
        }
        Term::ObjectGet(member) => {
            let object_type = type_check_term(checker, &member.object, env)?;
            match object_type.simplify() {
                Type::Object(object) => object.get_property_type(&member.property).cloned().ok_or_else(|| {
                    Error::new(
                        ErrorImpl::UnknownProperty {
                            property: member.property.clone(),
                        },
                        position.clone(),
                    )
                }),
                other => Err(Error::new(
                    ErrorImpl::ObjectExpected { received: other },
                    member.object.get_span().start.clone(),
                )),
            }
        }
        Term::RecFunc(decl) => {
            for (_, parameter_type) in &decl.parameters {
                checker.check_annotation(parameter_type, position)?;
            }
            checker.check_annotation(&decl.return_type, position)?;

            let function_type = Type::function(decl.parameters.clone(), decl.return_type.clone());

            let mut function_env = env.extend(&decl.identifier, function_type.clone());
            for (name, parameter_type) in &decl.parameters {
                function_env.declare_variable(name, parameter_type.clone());
            }

            // Declared return types are matched exactly, even under subtyping
            let body_type = type_check_term(checker, &decl.body, &mut function_env)?;
            if !type_eq(&body_type, &decl.return_type) {
                return Err(Error::new(
                    ErrorImpl::ReturnTypeMismatch {
                        expected: decl.return_type.clone(),
                        received: body_type,
                    },
                    decl.body.get_span().start.clone(),
                ));
            }

            let mut rest_env = env.extend(&decl.identifier, function_type);
            type_check_term(checker, &decl.rest, &mut rest_env)
        }
    }
}
