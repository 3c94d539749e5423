use super::base::*;
use crate::component::Component;

pub trait LaTeX {
    fn to_latex(&self) -> String;

    fn write_latex<W>(&self, writer: &mut W) -> Result<(), std::io::Error>
    where
        W: std::io::Write,
    {
        write!(writer, "{}", self.to_latex())
    }

    fn writeln_latex<W>(&self, writer: &mut W) -> Result<(), std::io::Error>
    where
        W: std::io::Write,
    {
        writeln!(writer, "{}", self.to_latex())
    }
}

pub fn latex_context() -> FormatContext {
    FormatContext {
        style: Style::LaTeX,
        symbols: hashmap! {
            "(" => "\\left(",
            ")" => "\\right)",
            "*" => "\\cdot ",
            "|<" => "\\left|",
            ">|" => "\\right|",
            "log" => "\\log",
            "ln" => "\\ln",
            "π" => "{\\pi}",
            "≤" => "\\leq",
            "≥" => "\\geq",
            "≠" => "\\neq",
            "∈" => "\\in",
            "ℕ" => "\\mathbb{N}",
            "ℤ" => "\\mathbb{Z}",
            "ℝ" => "\\mathbb{R}",
            "∀" => "\\forall",
            "void" => "\\nexists",
        },
    }
}

pub fn dump_latex(component: &Component) -> String {
    let mut string = String::new();
    dump_base(&latex_context(), component, &mut string);
    string
}

impl LaTeX for Component {
    fn to_latex(&self) -> String {
        dump_latex(self)
    }
}
