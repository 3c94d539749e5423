use crate::rules::Rule;
extern crate serde_yaml;

/// One successful rule application on a sub tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceStep {
    pub rule: Rule,
    /// Index of the pass the rule was applied in
    pub pass: usize,
    pub before: String,
    pub after: String,
}

impl TraceStep {
    #[allow(dead_code)]
    pub fn print_header() {
        println!("  {0: <4} | {1: <22} | {2: <18} | {3: <18}", "pass", "rule", "before", "after");
        println!("  ------------------------------------------------------------------");
    }

    #[allow(dead_code)]
    pub fn print(&self) {
        println!(
            "  {0: <4} | {1: <22} | {2: <18} | {3: <18}",
            self.pass,
            self.rule.name(),
            self.before,
            self.after
        );
    }
}

/// Every rewrite applied while simplifying a single expression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimplifyTrace {
    pub initial: String,
    pub steps: Vec<TraceStep>,
    pub passes: usize,
    pub result: String,
}

impl SimplifyTrace {
    pub fn write_bincode<W>(&self, writer: W) -> Result<(), String>
    where
        W: std::io::Write,
    {
        match bincode::serialize_into(writer, self) {
            Ok(_) => Ok(()),
            Err(msg) => Err(msg.to_string()),
        }
    }

    pub fn write_yaml<W>(&self, writer: W) -> Result<(), String>
    where
        W: std::io::Write,
    {
        match serde_yaml::to_writer(writer, self) {
            Ok(_) => Ok(()),
            Err(msg) => Err(msg.to_string()),
        }
    }

    pub fn read_bincode<R>(reader: R) -> Result<SimplifyTrace, String>
    where
        R: std::io::Read,
    {
        bincode::deserialize_from::<R, SimplifyTrace>(reader).map_err(|msg| msg.to_string())
    }

    pub fn read_yaml<R>(reader: R) -> Result<SimplifyTrace, String>
    where
        R: std::io::Read,
    {
        serde_yaml::from_reader(reader).map_err(|msg| msg.to_string())
    }

    /// Rules in the order of their first application
    pub fn applied_rules(&self) -> Vec<Rule> {
        let mut rules = vec![];
        for step in self.steps.iter() {
            if !rules.contains(&step.rule) {
                rules.push(step.rule);
            }
        }
        rules
    }
}
