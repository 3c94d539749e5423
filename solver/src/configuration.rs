use mathcore::Context;
use std::fs::File;
extern crate serde_yaml;

/// Settings of the command line front end
///
/// ```yaml
/// context:
///   mode: decimal
///   precision: 6
/// latex: true
/// ```
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Configuration {
    pub context: Context,
    /// Print typeset results instead of plain text
    pub latex: bool,
}

impl Configuration {
    pub fn load(filename: &str) -> Result<Configuration, String> {
        let file = match File::open(filename) {
            Ok(f) => f,
            Err(msg) => return Err(format!("{}: {}", filename, msg)),
        };
        Configuration::load_from_reader(file)
    }

    pub fn load_from_reader<R>(reader: R) -> Result<Configuration, String>
    where
        R: std::io::Read,
    {
        let configuration: Configuration = match serde_yaml::from_reader(reader) {
            Ok(r) => r,
            Err(msg) => return Err(msg.to_string()),
        };
        if configuration.context.max_iterations == 0 {
            return Err("max-iterations must be at least 1".to_owned());
        }
        Ok(configuration)
    }
}
