use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::parser::{param_names, Closure, Expression};
use crate::runtime::Environment;

/// Head symbols whose argument forms are passed to a handler unevaluated
///
/// A special-form keyword is recognised before any environment lookup, so
/// binding `if`, `def` or `fn` as a variable does not change their meaning in
/// head position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialForm {
    /// `(if cond then else?)`
    If,
    /// `(def name expr)`
    Def,
    /// `(fn params body)`
    Fn,
}

impl SpecialForm {
    /// Recognises a special-form keyword
    pub fn from_keyword(name: &str) -> Option<Self> {
        match name {
            "if" => Some(SpecialForm::If),
            "def" => Some(SpecialForm::Def),
            "fn" => Some(SpecialForm::Fn),
            _ => None,
        }
    }

    /// The keyword as written in source
    pub fn keyword(self) -> &'static str {
        match self {
            SpecialForm::If => "if",
            SpecialForm::Def => "def",
            SpecialForm::Fn => "fn",
        }
    }

    fn eval(self, args: &[Expression], env: &Environment) -> Result<Expression> {
        trace!(form = self.keyword(), args = args.len(), "special form");
        match self {
            SpecialForm::If => eval_if(args, env),
            SpecialForm::Def => eval_def(args, env),
            SpecialForm::Fn => eval_fn(args, env),
        }
    }
}

/// Evaluates `expr` against `env`
///
/// Evaluation is plain recursion over the tree and over closure calls. There
/// is no depth guard: unbounded recursion in the evaluated program exhausts
/// the host stack and aborts the process.
pub fn evaluate(expr: &Expression, env: &Environment) -> Result<Expression> {
    match expr {
        Expression::Bool(_) | Expression::Number(_) => Ok(expr.clone()),

        Expression::Symbol(name) => env.lookup(name),

        Expression::List(items) => {
            let (head, rest) = items
                .split_first()
                .ok_or_else(|| Error::type_error("empty list is not callable"))?;

            if let Some(form) = head.as_symbol().and_then(SpecialForm::from_keyword) {
                return form.eval(rest, env);
            }

            let operator = evaluate(head, env)?;
            let args = rest
                .iter()
                .map(|arg| evaluate(arg, env))
                .collect::<Result<Vec<_>>>()?;

            apply(&operator, &args)
        }

        Expression::BuiltIn(_) | Expression::Closure(_) => Ok(expr.clone()),
    }
}

/// Applies an evaluated operator to evaluated arguments
pub fn apply(operator: &Expression, args: &[Expression]) -> Result<Expression> {
    match operator {
        Expression::BuiltIn(builtin) => builtin.call(args),
        Expression::Closure(closure) => apply_closure(closure, args),
        other => Err(Error::type_error(format!("not callable: {}", other))),
    }
}

fn apply_closure(closure: &Closure, args: &[Expression]) -> Result<Expression> {
    let params = closure.param_names()?;
    if params.len() != args.len() {
        return Err(Error::arity("closure", params.len().to_string(), args.len()));
    }

    trace!(args = args.len(), "applying closure");

    // The new frame hangs off the captured environment, not the caller's
    let frame = closure.env().child();
    for (name, value) in params.into_iter().zip(args) {
        frame.define(name, value.clone());
    }

    evaluate(closure.body(), &frame)
}

/// (if cond then else?) - Only `false` selects the else branch
fn eval_if(args: &[Expression], env: &Environment) -> Result<Expression> {
    let (condition, then_branch, else_branch) = match args {
        [condition, then_branch] => (condition, then_branch, None),
        [condition, then_branch, else_branch] => (condition, then_branch, Some(else_branch)),
        _ => return Err(Error::arity("if", "2 or 3", args.len())),
    };

    if evaluate(condition, env)?.is_truthy() {
        evaluate(then_branch, env)
    } else {
        match else_branch {
            Some(branch) => evaluate(branch, env),
            None => Ok(Expression::Bool(false)),
        }
    }
}

/// (def name expr) - Bind in the current frame and return the name
fn eval_def(args: &[Expression], env: &Environment) -> Result<Expression> {
    let [target, value_form] = args else {
        return Err(Error::arity("def", "2", args.len()));
    };

    let name = target.as_symbol().ok_or_else(|| {
        Error::type_error(format!("def requires a symbol name, got {}", target))
    })?;

    let value = evaluate(value_form, env)?;
    debug!(name, global = env.is_global(), "def");
    env.define(name, value);

    Ok(target.clone())
}

/// (fn params body) - Capture the current environment
fn eval_fn(args: &[Expression], env: &Environment) -> Result<Expression> {
    let [params, body] = args else {
        return Err(Error::arity("fn", "2", args.len()));
    };

    param_names(params)?;

    Ok(Expression::Closure(Closure::new(
        params.clone(),
        body.clone(),
        env.clone(),
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    fn eval_in(source: &str, env: &Environment) -> Result<Expression> {
        evaluate(&parse(source)?, env)
    }

    fn arith_env() -> Environment {
        let env = Environment::new();
        env.define_builtin("+", |args| {
            let mut total = 0;
            for arg in args {
                total += arg.as_number().ok_or_else(|| Error::primitive("+", "expected number"))?;
            }
            Ok(Expression::Number(total))
        });
        env
    }

    #[test]
    fn test_self_evaluating() {
        let env = Environment::new();
        assert_eq!(eval_in("5", &env).unwrap(), Expression::Number(5));
        assert_eq!(eval_in("false", &env).unwrap(), Expression::Bool(false));

        let builtin = Expression::builtin("id", |args| Ok(args[0].clone()));
        assert_eq!(evaluate(&builtin, &env).unwrap(), builtin);
    }

    #[test]
    fn test_symbol_lookup() {
        let env = Environment::new();
        env.define("x", Expression::Number(3));
        assert_eq!(eval_in("x", &env).unwrap(), Expression::Number(3));
        assert_eq!(eval_in("y", &env).unwrap_err(), Error::unbound("y"));
    }

    #[test]
    fn test_empty_list() {
        let env = Environment::new();
        assert_eq!(
            eval_in("()", &env).unwrap_err(),
            Error::type_error("empty list is not callable")
        );
    }

    #[test]
    fn test_not_callable() {
        let env = Environment::new();
        let err = eval_in("(1 2)", &env).unwrap_err();
        assert_eq!(err, Error::type_error("not callable: 1"));
    }

    #[test]
    fn test_builtin_application() {
        let env = arith_env();
        assert_eq!(eval_in("(+ 1 2 3)", &env).unwrap(), Expression::Number(6));
        assert_eq!(eval_in("(+ (+ 1 1) 2)", &env).unwrap(), Expression::Number(4));
    }

    #[test]
    fn test_argument_errors_short_circuit() {
        let env = arith_env();
        assert_eq!(eval_in("(+ 1 nope)", &env).unwrap_err(), Error::unbound("nope"));
        assert_eq!(eval_in("(nope 1)", &env).unwrap_err(), Error::unbound("nope"));
    }

    #[test]
    fn test_if() {
        let env = Environment::new();
        assert_eq!(eval_in("(if false 1 2)", &env).unwrap(), Expression::Number(2));
        assert_eq!(eval_in("(if true 1)", &env).unwrap(), Expression::Number(1));
        assert_eq!(eval_in("(if 0 1 2)", &env).unwrap(), Expression::Number(1));
        assert_eq!(eval_in("(if false 1)", &env).unwrap(), Expression::Bool(false));
    }

    #[test]
    fn test_if_only_evaluates_chosen_branch() {
        let env = Environment::new();
        assert_eq!(eval_in("(if true 1 missing)", &env).unwrap(), Expression::Number(1));
        assert_eq!(eval_in("(if false missing 2)", &env).unwrap(), Expression::Number(2));
    }

    #[test]
    fn test_if_arity() {
        let env = Environment::new();
        assert_eq!(eval_in("(if true)", &env).unwrap_err(), Error::arity("if", "2 or 3", 1));
        assert_eq!(
            eval_in("(if true 1 2 3)", &env).unwrap_err(),
            Error::arity("if", "2 or 3", 4)
        );
    }

    #[test]
    fn test_def_returns_symbol() {
        let env = Environment::new();
        assert_eq!(eval_in("(def x 5)", &env).unwrap(), Expression::symbol("x"));
        assert_eq!(eval_in("x", &env).unwrap(), Expression::Number(5));
    }

    #[test]
    fn test_def_errors() {
        let env = Environment::new();
        assert_eq!(eval_in("(def x)", &env).unwrap_err(), Error::arity("def", "2", 1));
        assert_eq!(eval_in("(def 1 2)", &env).unwrap_err().kind(), "type");
        // A failing value leaves the frame untouched
        assert_eq!(eval_in("(def x nope)", &env).unwrap_err(), Error::unbound("nope"));
        assert!(!env.is_bound("x"));
    }

    #[test]
    fn test_fn_errors() {
        let env = Environment::new();
        assert_eq!(eval_in("(fn (a) a b)", &env).unwrap_err(), Error::arity("fn", "2", 3));
        assert_eq!(eval_in("(fn (a))", &env).unwrap_err(), Error::arity("fn", "2", 1));
        assert_eq!(eval_in("(fn (a 1) a)", &env).unwrap_err().kind(), "type");
        assert_eq!(eval_in("(fn a a)", &env).unwrap_err().kind(), "type");
    }

    #[test]
    fn test_closure_application() {
        let env = arith_env();
        let closure = eval_in("(fn (a) (+ a 1))", &env).unwrap();
        assert_eq!(apply(&closure, &[Expression::Number(4)]).unwrap(), Expression::Number(5));
        assert_eq!(eval_in("((fn (a b) (+ a b)) 2 3)", &env).unwrap(), Expression::Number(5));
        assert_eq!(eval_in("((fn () 7))", &env).unwrap(), Expression::Number(7));
    }

    #[test]
    fn test_closure_arity() {
        let env = Environment::new();
        let err = eval_in("((fn (a) a) 1 2)", &env).unwrap_err();
        assert_eq!(err, Error::arity("closure", "1", 2));
    }

    #[test]
    fn test_lexical_capture() {
        let env = arith_env();
        eval_in("(def n 10)", &env).unwrap();
        eval_in("(def make (fn (n) (fn (x) (+ x n))))", &env).unwrap();
        eval_in("(def add1 (make 1))", &env).unwrap();

        // The caller's `n` is 10, the captured one is 1
        assert_eq!(eval_in("(add1 5)", &env).unwrap(), Expression::Number(6));
        assert_eq!(eval_in("((fn (n) (add1 5)) 100)", &env).unwrap(), Expression::Number(6));
    }

    #[test]
    fn test_def_inside_closure_stays_local() {
        let env = arith_env();
        eval_in("(def f (fn (a) (def inner a)))", &env).unwrap();
        assert_eq!(eval_in("(f 1)", &env).unwrap(), Expression::symbol("inner"));
        assert!(!env.is_bound("inner"));
    }

    #[test]
    fn test_special_form_wins_over_binding() {
        let env = Environment::new();
        env.define("if", Expression::Number(0));
        assert_eq!(eval_in("(if true 1 2)", &env).unwrap(), Expression::Number(1));
    }

    #[test]
    fn test_host_built_closure_with_bad_params() {
        let env = Environment::new();
        let closure = Expression::Closure(Closure::new(
            Expression::list(vec![Expression::Number(1)]),
            Expression::Number(1),
            env,
        ));
        assert_eq!(apply(&closure, &[Expression::Number(1)]).unwrap_err().kind(), "type");
    }

    #[test]
    fn test_special_form_keywords() {
        for form in [SpecialForm::If, SpecialForm::Def, SpecialForm::Fn] {
            assert_eq!(SpecialForm::from_keyword(form.keyword()), Some(form));
        }
        assert_eq!(SpecialForm::from_keyword("lambda"), None);
    }
}
