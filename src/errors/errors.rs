use std::fmt::Display;

use thiserror::Error;

use crate::{ast::types::Type, type_checker::type_checker::Variant, Position};

#[derive(Error, Debug, Clone)]
#[error("{internal_error}")]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn kind(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnexpectedTokenDetailed { .. } => "UnexpectedTokenDetailed",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::UnknownType { .. } => "UnknownType",
            ErrorImpl::NonContractiveType { .. } => "NonContractiveType",
            ErrorImpl::UndefinedVariable { .. } => "UndefinedVariable",
            ErrorImpl::NumberExpected { .. } => "NumberExpected",
            ErrorImpl::BooleanExpected { .. } => "BooleanExpected",
            ErrorImpl::BranchTypeMismatch { .. } => "BranchTypeMismatch",
            ErrorImpl::FunctionExpected { .. } => "FunctionExpected",
            ErrorImpl::ArgumentLengthMismatch { .. } => "ArgumentLengthMismatch",
            ErrorImpl::ArgumentTypeMismatch { .. } => "ArgumentTypeMismatch",
            ErrorImpl::ObjectExpected { .. } => "ObjectExpected",
            ErrorImpl::UnknownProperty { .. } => "UnknownProperty",
            ErrorImpl::ReturnTypeMismatch { .. } => "ReturnTypeMismatch",
            ErrorImpl::UnsupportedConstruct { .. } => "UnsupportedConstruct",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
            ErrorImpl::UnexpectedToken { token } => {
                ErrorTip::Suggestion(format!("Unexpected token: `{}`, did you miss a semicolon?", token))
            }
            ErrorImpl::UnexpectedTokenDetailed { token, message } => {
                ErrorTip::Suggestion(format!("Unexpected token: `{}`, {}", token, message))
            }
            ErrorImpl::NumberParseError { token } => {
                ErrorTip::Suggestion(format!("Invalid number: `{}`", token))
            }
            ErrorImpl::UnknownType { type_ } => ErrorTip::Suggestion(format!(
                "Unknown type `{}`, declare it with `type {} = ...;` before use",
                type_, type_
            )),
            ErrorImpl::NonContractiveType { name } => ErrorTip::Suggestion(format!(
                "Type `{}` only refers to itself; wrap the reference in an object or function type",
                name
            )),
            ErrorImpl::UndefinedVariable { variable } => {
                ErrorTip::Suggestion(format!("Variable `{}` is not defined", variable))
            }
            ErrorImpl::NumberExpected { received } => {
                ErrorTip::Suggestion(format!("Expected `number`, received `{}`", received))
            }
            ErrorImpl::BooleanExpected { received } => {
                ErrorTip::Suggestion(format!("Expected `boolean` condition, received `{}`", received))
            }
            ErrorImpl::BranchTypeMismatch { then_type, else_type } => ErrorTip::Suggestion(format!(
                "Branches have different types: `{}` and `{}`",
                then_type, else_type
            )),
            ErrorImpl::FunctionExpected { received } => {
                ErrorTip::Suggestion(format!("Only functions can be called, received `{}`", received))
            }
            ErrorImpl::ArgumentLengthMismatch { expected, received } => {
                ErrorTip::Suggestion(format!("Expected {} arguments, received {}", expected, received))
            }
            ErrorImpl::ArgumentTypeMismatch { expected, received } => ErrorTip::Suggestion(format!(
                "Expected argument of type `{}`, received `{}`",
                expected, received
            )),
            ErrorImpl::ObjectExpected { received } => {
                ErrorTip::Suggestion(format!("Only objects have properties, received `{}`", received))
            }
            ErrorImpl::UnknownProperty { property } => {
                ErrorTip::Suggestion(format!("Property `{}` does not exist on this object", property))
            }
            ErrorImpl::ReturnTypeMismatch { expected, received } => ErrorTip::Suggestion(format!(
                "Declared return type `{}`, body has type `{}`",
                expected, received
            )),
            ErrorImpl::UnsupportedConstruct { construct, variant } => ErrorTip::Suggestion(format!(
                "{} is not part of the `{}` language",
                construct, variant
            )),
        }
    }
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone)]
pub enum ErrorImpl {
    // Lexing and parsing
    #[error("unrecognised token: {token:?}")]
    UnrecognisedToken { token: String },
    #[error("unexpected token: {token:?}")]
    UnexpectedToken { token: String },
    #[error("unexpected token ({message}): {token:?}")]
    UnexpectedTokenDetailed { token: String, message: String },
    #[error("error parsing number: {token:?}")]
    NumberParseError { token: String },
    #[error("unknown type {type_}")]
    UnknownType { type_: String },
    #[error("type {name} is not contractive")]
    NonContractiveType { name: String },

    // Type checking
    #[error("undefined variable: {variable}")]
    UndefinedVariable { variable: String },
    #[error("number expected, received {received}")]
    NumberExpected { received: Type },
    #[error("boolean expected, received {received}")]
    BooleanExpected { received: Type },
    #[error("then and else have different types: {then_type} and {else_type}")]
    BranchTypeMismatch { then_type: Type, else_type: Type },
    #[error("function expected, received {received}")]
    FunctionExpected { received: Type },
    #[error("argument length mismatch: expected {expected}, received {received}")]
    ArgumentLengthMismatch { expected: usize, received: usize },
    #[error("argument type mismatch: expected {expected}, received {received}")]
    ArgumentTypeMismatch { expected: Type, received: Type },
    #[error("object type expected, received {received}")]
    ObjectExpected { received: Type },
    #[error("unknown property name: {property}")]
    UnknownProperty { property: String },
    #[error("return type mismatch: expected {expected}, received {received}")]
    ReturnTypeMismatch { expected: Type, received: Type },
    #[error("{construct} is not supported by the {variant} checker")]
    UnsupportedConstruct { construct: String, variant: Variant },
}
