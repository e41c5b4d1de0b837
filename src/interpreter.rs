use std::fmt::Display;

use anyhow::{Result, bail};
use log::debug;

use crate::ast::{BlockStatement, Expression, Program, Statement};

/// A runtime value.
///
/// Booleans and null only ever exist as the [`TRUE`], [`FALSE`] and [`NULL`]
/// constants, so comparing two of them is an identity check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Object {
    Integer(i64),
    Boolean(bool),
    Null,
}

pub const TRUE: Object = Object::Boolean(true);
pub const FALSE: Object = Object::Boolean(false);
pub const NULL: Object = Object::Null;

impl From<bool> for Object {
    fn from(value: bool) -> Self {
        if value { TRUE } else { FALSE }
    }
}

impl Object {
    /// The name of this object's type.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Integer(_) => "INTEGER",
            Self::Boolean(_) => "BOOLEAN",
            Self::Null => "NULL",
        }
    }

    /// Whether both sides are the same singleton.
    ///
    /// Integers are never singletons, so they are never the same as anything.
    pub fn is_same(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Boolean(left), Self::Boolean(right)) => left == right,
            (Self::Null, Self::Null) => true,
            _ => false,
        }
    }

    /// `NULL` and `FALSE` are falsy; everything else, including `0`, is truthy.
    pub fn is_truthy(&self) -> bool {
        !(self.is_same(&NULL) || self.is_same(&FALSE))
    }
}

impl Display for Object {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer(value) => write!(f, "{value}"),
            Self::Boolean(value) => write!(f, "{value}"),
            Self::Null => write!(f, "null"),
        }
    }
}

/// Evaluate a program to the value of its last statement.
///
/// Type mismatches quietly produce `NULL`. The only error is division or
/// modulo by zero, which aborts the whole evaluation.
///
/// Evaluation recurses once per level of nesting in the tree, so a program
/// nested deeply enough to overflow the stack while parsing would overflow
/// it here too.
pub fn evaluate(program: &Program) -> Result<Object> {
    eval_statements(&program.statements)
}

fn eval_statements(statements: &[Statement]) -> Result<Object> {
    let mut result = NULL;
    for statement in statements {
        result = eval_statement(statement)?;
    }
    Ok(result)
}

fn eval_statement(statement: &Statement) -> Result<Object> {
    match statement {
        Statement::Expression { expression, .. } => eval_expression(expression),
        Statement::Block(block) => eval_block(block),
        // There is no environment to bind into or function to return from.
        Statement::Let { .. } | Statement::Return { .. } => Ok(NULL),
    }
}

fn eval_block(block: &BlockStatement) -> Result<Object> {
    eval_statements(&block.statements)
}

fn eval_expression(expression: &Expression) -> Result<Object> {
    match expression {
        Expression::Integer { value, .. } => Ok(Object::Integer(*value)),
        Expression::Boolean { value, .. } => Ok(Object::from(*value)),
        Expression::Prefix {
            operator, right, ..
        } => {
            let right = eval_expression(right)?;
            Ok(eval_prefix(operator, right))
        }
        Expression::Infix {
            left,
            operator,
            right,
            ..
        } => {
            let left = eval_expression(left)?;
            let right = eval_expression(right)?;
            eval_infix(operator, left, right)
        }
        Expression::If {
            condition,
            consequence,
            alternative,
            ..
        } => {
            if eval_expression(condition)?.is_truthy() {
                eval_block(consequence)
            } else if let Some(alternative) = alternative {
                eval_block(alternative)
            } else {
                Ok(NULL)
            }
        }
        // Identifiers have nothing to resolve against.
        Expression::Identifier(_) => Ok(NULL),
    }
}

fn eval_prefix(operator: &str, right: Object) -> Object {
    match operator {
        "!" => eval_bang(right),
        "-" => match right {
            Object::Integer(value) => Object::Integer(value.wrapping_neg()),
            _ => NULL,
        },
        _ => NULL,
    }
}

fn eval_bang(right: Object) -> Object {
    if right.is_same(&TRUE) {
        FALSE
    } else if right.is_same(&FALSE) || right.is_same(&NULL) {
        TRUE
    } else {
        FALSE
    }
}

fn eval_infix(operator: &str, left: Object, right: Object) -> Result<Object> {
    match (left, right) {
        (Object::Integer(left), Object::Integer(right)) => {
            eval_integer_infix(operator, left, right)
        }
        _ => Ok(match operator {
            "==" => Object::from(left.is_same(&right)),
            "!=" => Object::from(!left.is_same(&right)),
            _ => NULL,
        }),
    }
}

fn eval_integer_infix(operator: &str, left: i64, right: i64) -> Result<Object> {
    Ok(match operator {
        "+" => Object::Integer(left.wrapping_add(right)),
        "-" => Object::Integer(left.wrapping_sub(right)),
        "*" => Object::Integer(left.wrapping_mul(right)),
        "/" | "%" if right == 0 => {
            debug!("Evaluation aborted: {left} {operator} 0");
            bail!("division by zero: {left} {operator} {right}")
        }
        "/" => Object::Integer(left.wrapping_div(right)),
        "%" => Object::Integer(left.wrapping_rem(right)),
        "<" => Object::from(left < right),
        ">" => Object::from(left > right),
        "==" => Object::from(left == right),
        "!=" => Object::from(left != right),
        _ => NULL,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::parser::parse;

    fn interpret_str(prog: &str) -> Object {
        let (program, errors) = parse(prog);
        assert!(errors.is_empty(), "unexpected parse errors: {errors:?}");
        evaluate(&program).unwrap()
    }

    #[test]
    fn interpret_integers() {
        assert_eq!(interpret_str("5"), Object::Integer(5));
        assert_eq!(interpret_str("-10"), Object::Integer(-10));
        assert_eq!(interpret_str("--10"), Object::Integer(10));
    }

    #[test]
    fn interpret_arithmetic() {
        let cases = [
            ("5 + 5 + 5 + 5 - 10", 10),
            ("2 * 2 * 2 * 2 * 2", 32),
            ("-50 + 100 + -50", 0),
            ("5 * 2 + 10", 20),
            ("5 + 2 * 10", 25),
            ("20 + 2 * -10", 0),
            ("50 / 2 * 2 + 10", 60),
            ("2 * (5 + 10)", 30),
            ("3 * 3 * 3 + 10", 37),
            ("(5 + 10 * 2 + 15 / 3) * 2 + -10", 50),
            ("17 % 5", 2),
            ("1 + 2 * 3", 7),
            ("(1 + 2) * 3", 9),
            ("10 - 2 - 3", 5),
        ];
        for (input, expected) in cases {
            assert_eq!(interpret_str(input), Object::Integer(expected), "input: {input}");
        }
    }

    #[test]
    fn division_truncates_toward_zero() {
        assert_eq!(interpret_str("7 / 2"), Object::Integer(3));
        assert_eq!(interpret_str("-7 / 2"), Object::Integer(-3));
        assert_eq!(interpret_str("7 / -2"), Object::Integer(-3));
        assert_eq!(interpret_str("-7 % 2"), Object::Integer(-1));
        assert_eq!(interpret_str("7 % -2"), Object::Integer(1));
    }

    #[test]
    fn arithmetic_wraps() {
        assert_eq!(
            interpret_str("9223372036854775807 + 1"),
            Object::Integer(i64::MIN)
        );
        assert_eq!(
            interpret_str("-9223372036854775807 - 1 - 1"),
            Object::Integer(i64::MAX)
        );
    }

    #[test]
    fn division_by_zero_is_fatal() {
        let (program, _) = parse("1; 5 / 0; 2");
        let err = evaluate(&program).unwrap_err();
        assert!(err.to_string().contains("division by zero"));

        let (program, _) = parse("5 % 0");
        assert!(evaluate(&program).is_err());
    }

    #[test]
    fn interpret_booleans() {
        let cases = [
            ("true", true),
            ("false", false),
            ("1 < 2", true),
            ("1 > 2", false),
            ("1 < 1", false),
            ("1 == 1", true),
            ("1 != 1", false),
            ("1 == 2", false),
            ("1 != 2", true),
            ("true == true", true),
            ("false == false", true),
            ("true == false", false),
            ("true != false", true),
            ("(1 < 2) == true", true),
            ("(1 > 2) == true", false),
        ];
        for (input, expected) in cases {
            assert_eq!(interpret_str(input), Object::from(expected), "input: {input}");
        }
    }

    #[test]
    fn equality_takes_both_paths() {
        // Integer operands compare numerically.
        assert_eq!(eval_infix("==", Object::Integer(1), Object::Integer(1)).unwrap(), TRUE);
        // Everything else compares by identity.
        assert_eq!(eval_infix("==", TRUE, TRUE).unwrap(), TRUE);
        assert_eq!(eval_infix("==", NULL, NULL).unwrap(), TRUE);
        assert_eq!(eval_infix("==", Object::Integer(1), TRUE).unwrap(), FALSE);
        assert_eq!(eval_infix("!=", Object::Integer(0), FALSE).unwrap(), TRUE);
    }

    #[test]
    fn interpret_bang() {
        let cases = [
            ("!true", false),
            ("!false", true),
            ("!5", false),
            ("!0", false),
            ("!!true", true),
            ("!!false", false),
            ("!!5", true),
        ];
        for (input, expected) in cases {
            assert_eq!(interpret_str(input), Object::from(expected), "input: {input}");
        }
        assert_eq!(eval_bang(NULL), TRUE);
    }

    #[test]
    fn type_mismatches_are_null() {
        assert_eq!(interpret_str("-true"), NULL);
        assert_eq!(interpret_str("true + false"), NULL);
        assert_eq!(interpret_str("5 + true"), NULL);
        assert_eq!(interpret_str("true < false"), NULL);
    }

    #[test]
    fn interpret_if_else() {
        let cases = [
            ("if (true) { 10 }", Object::Integer(10)),
            ("if (false) { 10 }", NULL),
            ("if (1) { 10 }", Object::Integer(10)),
            ("if (0) { 1 } else { 2 }", Object::Integer(1)),
            ("if (1 < 2) { 10 }", Object::Integer(10)),
            ("if (1 > 2) { 10 }", NULL),
            ("if (1 > 2) { 10 } else { 20 }", Object::Integer(20)),
            ("if (1 < 2) { 10 } else { 20 }", Object::Integer(10)),
            ("if (1 < 2) { }", NULL),
            ("if (if (false) { 1 }) { 1 } else { 2 }", Object::Integer(2)),
        ];
        for (input, expected) in cases {
            assert_eq!(interpret_str(input), expected, "input: {input}");
        }
    }

    #[test]
    fn block_value_is_last_statement() {
        assert_eq!(interpret_str("if (true) { 1; 2; 3 }"), Object::Integer(3));
        assert_eq!(interpret_str("1; 2; 3"), Object::Integer(3));
    }

    #[test]
    fn statements_without_values() {
        assert_eq!(interpret_str(""), NULL);
        assert_eq!(interpret_str("let x = 5;"), NULL);
        assert_eq!(interpret_str("return 10;"), NULL);
        assert_eq!(interpret_str("5; let x = 5;"), NULL);
        assert_eq!(interpret_str("let x = 5; x"), NULL);
    }

    #[test]
    fn standalone_block_statement() {
        let (program, errors) = parse("if (true) { 1; 2 }");
        assert!(errors.is_empty());
        let Some(Statement::Expression {
            expression: Expression::If { consequence, .. },
            ..
        }) = program.statements.into_iter().next()
        else {
            panic!("expected an if expression");
        };

        let program = Program {
            statements: vec![Statement::Block(consequence)],
        };
        assert_eq!(evaluate(&program).unwrap(), Object::Integer(2));
    }

    #[test]
    fn division_edge_cases_wrap() {
        assert_eq!(
            eval_integer_infix("/", i64::MIN, -1).unwrap(),
            Object::Integer(i64::MIN)
        );
        assert_eq!(eval_integer_infix("%", i64::MIN, -1).unwrap(), Object::Integer(0));
    }

    #[test]
    fn let_initializer_is_not_evaluated() {
        // The division by zero would abort if the initializer were evaluated.
        assert_eq!(interpret_str("let x = 1 / 0; 7"), Object::Integer(7));
    }

    #[test]
    fn object_display() {
        assert_eq!(Object::Integer(-3).to_string(), "-3");
        assert_eq!(TRUE.to_string(), "true");
        assert_eq!(NULL.to_string(), "null");
        assert_eq!(NULL.kind(), "NULL");
    }

    #[test]
    fn truthiness() {
        assert!(Object::Integer(0).is_truthy());
        assert!(TRUE.is_truthy());
        assert!(!FALSE.is_truthy());
        assert!(!NULL.is_truthy());
    }
}
