use crate::error::MathError;
use std::fs::File;
use std::io::BufReader;
extern crate serde_yaml;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumericMode {
    /// Exact rationals, decimal literals are rejected.
    Fractional,
    /// Decimal literals allowed, irrational scalars get approximated.
    Decimal,
}

impl Default for NumericMode {
    fn default() -> Self {
        NumericMode::Fractional
    }
}

/// Request scoped configuration of one resolution pipeline.
///
/// The context is read once at the start of a pipeline and handed down
/// explicitly, it must not change while a pipeline runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct Context {
    pub mode: NumericMode,
    /// Number of decimal digits for approximations and decimal rendering
    pub precision: u32,
    /// Upper bound of full rewrite passes before the simplifier gives up
    pub max_iterations: usize,
}

impl Default for Context {
    fn default() -> Self {
        Context {
            mode: NumericMode::Fractional,
            precision: 10,
            max_iterations: 100,
        }
    }
}

impl Context {
    pub fn decimal() -> Context {
        Context {
            mode: NumericMode::Decimal,
            ..Default::default()
        }
    }

    pub fn is_fractional(&self) -> bool {
        self.mode == NumericMode::Fractional
    }

    pub fn load(filename: &str) -> Result<Context, MathError> {
        let file = File::open(filename)
            .map_err(|msg| MathError::Config(format!("{}: {}", filename, msg)))?;
        Context::load_from_yaml_reader(BufReader::new(file))
    }

    pub fn load_from_yaml_reader<R>(reader: R) -> Result<Context, MathError>
    where
        R: std::io::Read,
    {
        let context: Context =
            serde_yaml::from_reader(reader).map_err(|msg| MathError::Config(msg.to_string()))?;
        if context.max_iterations == 0 {
            return Err(MathError::Config(
                "max-iterations must be at least 1".to_owned(),
            ));
        }
        Ok(context)
    }
}
