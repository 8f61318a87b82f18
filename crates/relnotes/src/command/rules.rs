use relnotes_config::Config;
use relnotes_document::lint::{Level, Rule};

/// Print every lint rule with the level it runs at.
pub(crate) fn run(config: &Config) {
    print!("{}", table(config));
}

fn table(config: &Config) -> String {
    let lint_config = config.lint_config();
    let width = Rule::ALL
        .iter()
        .map(|rule| rule.as_str().len())
        .max()
        .unwrap_or_default();
    let mut table = String::new();
    for rule in Rule::ALL {
        let level = match lint_config.level(rule) {
            Level::Error => "error",
            Level::Warning => "warning",
            Level::Off => "off",
        };
        table.push_str(&format!(
            "{rule:width$}  {level:7}  {description}\n",
            rule = rule.as_str(),
            description = rule.description()
        ));
    }
    table
}
