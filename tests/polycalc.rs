use pretty_assertions::assert_eq;

use polycalc::{parse, parse_with, Bindings, Environment, ErrorKind, PolynomialInterpreter};

#[test]
fn polynomial_with_arguments() {
    let p = PolynomialInterpreter::new("3.58*x**5 + 6.28*x**2*y*z + x*y*z**3 + 3");
    let result = p.evaluate([("x", 2.0), ("y", 1.0), ("z", 0.5)]).unwrap();
    assert!((result - 130.37).abs() < 1e-9);
    assert_eq!(p.environment().len(), 3);
}

#[test]
fn polynomial_keeps_arguments_between_calls() {
    let p = PolynomialInterpreter::new("x * y");
    assert_eq!(p.evaluate([("x", 2.0), ("y", 3.0)]), Ok(6.0));
    assert_eq!(p.evaluate([("y", 5.0)]), Ok(10.0));
}

#[test]
fn polynomial_missing_argument() {
    let p = PolynomialInterpreter::new("x + y");
    let err = p.evaluate([("x", 1.0)]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unbound);
}

#[test]
fn polynomial_asks_for_missing_argument() {
    let p = PolynomialInterpreter::new("x + y");
    let mut resolver = Bindings::new().with("y", "x * 10");
    assert_eq!(p.evaluate_with([("x", 1.0)], &mut resolver), Ok(11.0));
    assert_eq!(p.environment().lookup("y"), Some(10.0));
}

#[test]
fn session_accumulates_bindings() {
    let env = Environment::new();
    let lines = ["a = 3", "b = a ** 2", "c = |a - b|", "sqrt(c + 10)"];
    let results: Vec<f64> = lines.iter().map(|l| parse(l, &env).unwrap()).collect();
    assert_eq!(results, vec![3.0, 9.0, 6.0, 4.0]);

    let mut names: Vec<String> = polycalc::bindings(&env).into_keys().collect();
    names.sort();
    assert_eq!(names, vec!["a", "b", "c"]);
}

#[test]
fn errors_leave_session_usable() {
    let env = Environment::new();
    assert_eq!(parse("x = 4", &env), Ok(4.0));
    assert_eq!(parse("x / 0", &env).unwrap_err().kind(), ErrorKind::DivisionByZero);
    assert_eq!(parse("x +", &env).unwrap_err().kind(), ErrorKind::Syntax);
    assert_eq!(parse("x $ + 1", &env), Ok(5.0));
    assert_eq!(env.lookup("x"), Some(4.0));
}

#[test]
fn resolved_names_are_not_requested_twice() {
    let env = Environment::new();
    let mut resolver = Bindings::new().with("r", "2");
    assert_eq!(parse_with("r * r", &env, &mut resolver), Ok(4.0));
    assert_eq!(parse_with("r + 1", &env, &mut resolver), Ok(3.0));
    assert_eq!(resolver.requests(), ["r"]);
}
