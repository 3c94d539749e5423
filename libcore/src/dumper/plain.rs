use super::base::*;
use crate::component::Component;
use std::fmt;

pub fn plain_context() -> FormatContext {
    FormatContext {
        style: Style::Plain,
        symbols: hashmap! {
            "|<" => "|",
            ">|" => "|",
            "void" => "for no value of",
        },
    }
}

pub fn dump_plain(component: &Component) -> String {
    let mut string = String::new();
    dump_base(&plain_context(), component, &mut string);
    string
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", dump_plain(self))
    }
}

#[cfg(test)]
mod e2e {
    use super::*;
    use crate::parser::parse_expression;
    use crate::Context;

    fn dump(text: &str) -> String {
        dump_plain(&parse_expression(text, &Context::default()).unwrap())
    }

    #[test]
    fn infix_simple() {
        assert_eq!(dump("a+b"), "a+b");
        assert_eq!(dump("a-b-c"), "a-b-c");
    }

    #[test]
    fn implicit_multiplication() {
        assert_eq!(dump("a+b*c"), "a+bc");
        assert_eq!(dump("3*x*y"), "3xy");
        assert_eq!(dump("2*3"), "2*3");
        assert_eq!(dump("x*2"), "x*2");
    }

    #[test]
    fn infix_parenthesis() {
        assert_eq!(dump("(a+b)*c"), "(a+b)c");
        assert_eq!(dump("x-(-2)"), "x-(-2)");
        assert_eq!(dump("a/(b/c)"), "a/(b/c)");
    }

    #[test]
    fn unary_minus() {
        assert_eq!(dump("-x+1"), "-x+1");
        assert_eq!(dump("-2*x^2"), "-2x^2");
    }

    #[test]
    fn powers() {
        assert_eq!(dump("x^2"), "x^2");
        assert_eq!(dump("x^(y+1)"), "x^(y+1)");
        assert_eq!(dump("2^x"), "2^x");
    }

    #[test]
    fn functions() {
        assert_eq!(dump("√21"), "√21");
        assert_eq!(dump("∛(x+1)"), "∛(x+1)");
        assert_eq!(dump("root(5, x)"), "root(5, x)");
        assert_eq!(dump("|x-1|"), "|x-1|");
        assert_eq!(dump("log(x)+ln(y)"), "log(x)+ln(y)");
        assert_eq!(dump("3log(x)"), "3log(x)");
    }

    #[test]
    fn constants_and_factorials() {
        assert_eq!(dump("2π"), "2π");
        assert_eq!(dump("pi*x"), "πx");
        assert_eq!(dump("5!"), "5!");
        assert_eq!(dump("(x+1)!"), "(x+1)!");
        assert_eq!(dump("x!^2"), "(x!)^2");
    }

    #[test]
    fn fractions() {
        assert_eq!(dump("1/x"), "1/x");
        assert_eq!(dump("-2/(3y)"), "-2/(3y)");
    }
}
