//! Command registry: name/alias lookup plus argument validation.
//!
//! Every command is described by a [`CommandSpec`]; the registry maps the
//! primary name and each alias to the same shared spec. Registration is
//! last-write-wins per key, and `unregister` removes exactly one key, so an
//! alias can be retired without touching the primary name.

use std::collections::HashMap;
use std::sync::Arc;

use crate::game::commands::CommandAction;

/// Custom argument predicate, run after the count bounds pass.
pub type ArgCheck = fn(&[String]) -> Result<(), String>;

/// Optional argument constraints attached to a command.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidationRule {
    pub min_args: Option<usize>,
    pub max_args: Option<usize>,
    pub check: Option<ArgCheck>,
}

/// One command: identity, help text, optional constraints, and the action
/// the engine dispatches on.
#[derive(Debug, Clone)]
pub struct CommandSpec {
    pub name: String,
    pub description: String,
    pub usage: String,
    pub aliases: Vec<String>,
    pub validation: Option<ValidationRule>,
    pub action: CommandAction,
}

impl CommandSpec {
    pub fn new(name: &str, description: &str, usage: &str, action: CommandAction) -> Self {
        CommandSpec {
            name: name.to_string(),
            description: description.to_string(),
            usage: usage.to_string(),
            aliases: Vec::new(),
            validation: None,
            action,
        }
    }

    pub fn with_aliases(mut self, aliases: &[&str]) -> Self {
        self.aliases = aliases.iter().map(|a| a.to_string()).collect();
        self
    }

    pub fn with_validation(mut self, rule: ValidationRule) -> Self {
        self.validation = Some(rule);
        self
    }
}

/// Case-sensitive lookup table from command name (and each alias) to spec.
#[derive(Debug, Clone, Default)]
pub struct CommandRegistry {
    commands: HashMap<String, Arc<CommandSpec>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        CommandRegistry::default()
    }

    /// Insert under the primary name and every alias. Last write wins per
    /// key; overwriting an existing mapping is allowed.
    pub fn register(&mut self, spec: CommandSpec) {
        let spec = Arc::new(spec);
        for alias in &spec.aliases {
            self.commands.insert(alias.clone(), Arc::clone(&spec));
        }
        self.commands.insert(spec.name.clone(), spec);
    }

    /// Exact lookup. Callers normalize case before calling if they want
    /// case-insensitive matching.
    pub fn get(&self, name: &str) -> Option<Arc<CommandSpec>> {
        self.commands.get(name).cloned()
    }

    pub fn has(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    /// Every registered key (names and aliases), sorted for stable output.
    pub fn all_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.commands.keys().cloned().collect();
        names.sort();
        names
    }

    /// Distinct specs, deduplicated by primary name and sorted by it.
    pub fn all_commands(&self) -> Vec<Arc<CommandSpec>> {
        let mut by_name: HashMap<&str, Arc<CommandSpec>> = HashMap::new();
        for spec in self.commands.values() {
            by_name.entry(spec.name.as_str()).or_insert_with(|| Arc::clone(spec));
        }
        let mut specs: Vec<Arc<CommandSpec>> = by_name.into_values().collect();
        specs.sort_by(|a, b| a.name.cmp(&b.name));
        specs
    }

    /// Remove exactly the given key. Other keys pointing at the same spec
    /// (its aliases or primary name) stay registered.
    pub fn unregister(&mut self, name: &str) -> bool {
        self.commands.remove(name).is_some()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Check args against the spec's rule: count bounds first (and they
    /// short-circuit), then the custom predicate. No rule means valid.
    pub fn validate_command(spec: &CommandSpec, args: &[String]) -> Result<(), String> {
        let Some(rule) = &spec.validation else {
            return Ok(());
        };
        if let Some(min) = rule.min_args {
            if args.len() < min {
                return Err(format!(
                    "Error: {} requires at least {} argument(s). Usage: {}",
                    spec.name, min, spec.usage
                ));
            }
        }
        if let Some(max) = rule.max_args {
            if args.len() > max {
                return Err(format!(
                    "Error: {} accepts at most {} argument(s). Usage: {}",
                    spec.name, max, spec.usage
                ));
            }
        }
        if let Some(check) = rule.check {
            return check(args);
        }
        Ok(())
    }
}
