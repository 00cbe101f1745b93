//! Detection rule catalog.
//!
//! The catalog is a flat, ordered list of declarative rules (see
//! [`rules::RULES`]) compiled once per process into a [`Catalog`]. Rules are
//! immutable at runtime; scanning iterates the compiled list in catalog
//! order.
//!
//! A rule whose regex fails to compile is skipped with a warning. One bad
//! rule must never prevent detection by all the others.

mod rules;

use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

pub use rules::RULES;

/// Detection rule category.
///
/// A rule's category is fixed at catalog-definition time and is
/// authoritative: the exfiltration dampening override and the per-category
/// result grouping both key off it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Attempts to discard or replace the assistant's standing instructions.
    InstructionOverride,
    /// Attempts to redefine the assistant's persona or role.
    RoleHijacking,
    /// Attempts to extract the system prompt or other hidden context.
    SystemPrompt,
    /// Attempts to leak data or hidden instructions to an external party.
    Exfiltration,
    /// Instructions to conceal the manipulation from the user.
    Secrecy,
    /// Known jailbreak framings (DAN mode, unrestricted mode, etc.).
    Jailbreak,
    /// Encoding tricks and invisible characters that smuggle instructions.
    Obfuscation,
    /// Output constraints and multi-step coercion chains.
    InstructionChaining,
    /// Text that names injection techniques as a topic (low weight).
    Meta,
}

impl Category {
    /// All categories, in catalog section order.
    pub const ALL: [Category; 9] = [
        Category::InstructionOverride,
        Category::RoleHijacking,
        Category::SystemPrompt,
        Category::Exfiltration,
        Category::Secrecy,
        Category::Jailbreak,
        Category::Obfuscation,
        Category::InstructionChaining,
        Category::Meta,
    ];

    /// Stable snake_case name used in serialized output.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::InstructionOverride => "instruction_override",
            Category::RoleHijacking => "role_hijacking",
            Category::SystemPrompt => "system_prompt",
            Category::Exfiltration => "exfiltration",
            Category::Secrecy => "secrecy",
            Category::Jailbreak => "jailbreak",
            Category::Obfuscation => "obfuscation",
            Category::InstructionChaining => "instruction_chaining",
            Category::Meta => "meta",
        }
    }

    /// Rule-id namespace prefix for this category (`override.` etc).
    pub fn id_prefix(self) -> &'static str {
        match self {
            Category::InstructionOverride => "override",
            Category::RoleHijacking => "role",
            Category::SystemPrompt => "sysprompt",
            Category::Exfiltration => "exfiltrate",
            Category::Secrecy => "secrecy",
            Category::Jailbreak => "jailbreak",
            Category::Obfuscation => "obfuscate",
            Category::InstructionChaining => "chain",
            Category::Meta => "meta",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single detection rule.
#[derive(Debug)]
pub struct Rule {
    /// Stable dotted identifier, namespaced `<category-prefix>.<name>`.
    pub id: &'static str,
    /// Rule category.
    pub category: Category,
    /// Contribution to the raw score when the rule fires.
    pub weight: u32,
    /// Regex source. Case-insensitive by construction (`(?i)` prefix), so
    /// the scanned text keeps its original casing for snippet display.
    pub pattern: &'static str,
    /// Human-readable explanation shown to end users.
    pub explanation: &'static str,
}

/// A rule paired with its compiled regex.
pub struct CompiledRule {
    /// The catalog entry.
    pub rule: &'static Rule,
    /// Compiled matcher.
    pub regex: Regex,
}

/// The compiled, immutable rule set.
///
/// Constructed once at process start (see [`Catalog::builtin`]) and shared
/// read-only across scans; concurrent scans need no coordination.
pub struct Catalog {
    entries: Vec<CompiledRule>,
    skipped: usize,
}

impl Catalog {
    /// Compile a rule table, skipping entries whose regex is malformed.
    pub fn from_rules(rules: &'static [Rule]) -> Self {
        let mut entries = Vec::with_capacity(rules.len());
        let mut skipped = 0;

        for rule in rules {
            match Regex::new(rule.pattern) {
                Ok(regex) => entries.push(CompiledRule { rule, regex }),
                Err(err) => {
                    skipped += 1;
                    tracing::warn!(rule = rule.id, %err, "skipping malformed catalog rule");
                },
            }
        }

        Self { entries, skipped }
    }

    /// The built-in catalog, compiled on first use.
    pub fn builtin() -> &'static Catalog {
        &BUILTIN
    }

    /// Number of usable (compiled) rules.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no rule compiled.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of rules dropped at compile time.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Iterate compiled rules in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &CompiledRule> {
        self.entries.iter()
    }

    /// Per-category rule counts, in catalog section order.
    pub fn category_counts(&self) -> Vec<(Category, usize)> {
        Category::ALL
            .iter()
            .map(|&cat| {
                let count = self.entries.iter().filter(|e| e.rule.category == cat).count();
                (cat, count)
            })
            .collect()
    }
}

lazy_static! {
    static ref BUILTIN: Catalog = Catalog::from_rules(rules::RULES);
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_builtin_compiles_fully() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.skipped(), 0, "built-in rules must all compile");
        assert_eq!(catalog.len(), RULES.len());
        assert!(!catalog.is_empty());
    }

    #[test]
    fn test_rule_ids_unique() {
        let mut seen = HashSet::new();
        for rule in RULES {
            assert!(seen.insert(rule.id), "duplicate rule id: {}", rule.id);
        }
    }

    #[test]
    fn test_rule_ids_namespaced_by_category() {
        for rule in RULES {
            let prefix = rule.category.id_prefix();
            assert!(
                rule.id.starts_with(prefix) && rule.id.as_bytes()[prefix.len()] == b'.',
                "rule {} not in namespace {}.",
                rule.id,
                prefix
            );
        }
    }

    #[test]
    fn test_rule_weights_positive() {
        for rule in RULES {
            assert!(rule.weight >= 1, "rule {} has zero weight", rule.id);
        }
    }

    #[test]
    fn test_rules_case_insensitive_by_construction() {
        for rule in RULES {
            assert!(
                rule.pattern.starts_with("(?i)"),
                "rule {} pattern is not case-insensitive",
                rule.id
            );
        }
    }

    #[test]
    fn test_required_rules_present() {
        let ids: HashSet<&str> = RULES.iter().map(|r| r.id).collect();
        assert!(ids.contains("override.ignore_previous"));
        assert!(ids.contains("exfiltrate.markdown_image"));
        assert!(ids.contains("chain.respond_only"));
    }

    #[test]
    fn test_malformed_rule_skipped() {
        static BAD: &[Rule] = &[
            Rule {
                id: "meta.good",
                category: Category::Meta,
                weight: 5,
                pattern: r"(?i)hello",
                explanation: "test rule",
            },
            Rule {
                id: "meta.bad",
                category: Category::Meta,
                weight: 5,
                pattern: r"(?i)[unclosed",
                explanation: "broken rule",
            },
        ];

        let catalog = Catalog::from_rules(BAD);
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.skipped(), 1);
        assert_eq!(catalog.iter().next().unwrap().rule.id, "meta.good");
    }

    #[test]
    fn test_category_counts_cover_all_rules() {
        let catalog = Catalog::builtin();
        let total: usize = catalog.category_counts().iter().map(|(_, n)| n).sum();
        assert_eq!(total, catalog.len());
    }

    #[test]
    fn test_category_serialization() {
        let json = serde_json::to_string(&Category::InstructionOverride).unwrap();
        assert_eq!(json, "\"instruction_override\"");
        let json = serde_json::to_string(&Category::Exfiltration).unwrap();
        assert_eq!(json, "\"exfiltration\"");
    }
}
