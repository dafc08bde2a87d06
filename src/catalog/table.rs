use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{
    error::Result,
    solver::{
        constraint::{Comparison, Condition, Constraint},
        engine::{Engine, VariableId},
    },
};

/// A declarative configuration table: variables with domains, and forward
/// implication rules over them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigTable {
    pub variables: Vec<VariableDef>,
    pub rules: Vec<RuleDef>,
}

/// One variable: a name, its initial domain, and optional value labels.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariableDef {
    pub name: String,
    pub values: Vec<i64>,
    #[serde(default)]
    pub labels: Vec<(i64, String)>,
}

/// A forward rule: `when` entailed-true enforces `then`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleDef {
    pub when: ConditionDef,
    pub then: ConditionDef,
}

/// A rule side: one comparison, or a conjunction of comparisons.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConditionDef {
    One(ComparisonDef),
    All(Vec<ComparisonDef>),
}

/// A named comparison against a literal value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonDef {
    pub var: String,
    pub op: Op,
    pub value: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Op {
    Eq,
    Ne,
}

impl ComparisonDef {
    pub fn eq(var: &str, value: i64) -> Self {
        Self {
            var: var.to_string(),
            op: Op::Eq,
            value,
        }
    }

    pub fn ne(var: &str, value: i64) -> Self {
        Self {
            var: var.to_string(),
            op: Op::Ne,
            value,
        }
    }

    fn compile(&self, engine: &Engine) -> Result<Comparison> {
        let var = engine.variable(&self.var)?;
        Ok(match self.op {
            Op::Eq => Comparison::Eq(var, self.value),
            Op::Ne => Comparison::Ne(var, self.value),
        })
    }
}

impl From<ComparisonDef> for ConditionDef {
    fn from(c: ComparisonDef) -> Self {
        ConditionDef::One(c)
    }
}

impl ConditionDef {
    pub fn all(comparisons: impl IntoIterator<Item = ComparisonDef>) -> Self {
        ConditionDef::All(comparisons.into_iter().collect())
    }

    fn compile(&self, engine: &Engine) -> Result<Condition> {
        Ok(match self {
            ConditionDef::One(c) => Condition::Is(c.compile(engine)?),
            ConditionDef::All(cs) => Condition::All(
                cs.iter()
                    .map(|c| c.compile(engine))
                    .collect::<Result<Vec<_>>>()?,
            ),
        })
    }
}

impl RuleDef {
    pub fn new(when: impl Into<ConditionDef>, then: impl Into<ConditionDef>) -> Self {
        Self {
            when: when.into(),
            then: then.into(),
        }
    }
}

impl ConfigTable {
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Compiles the table into a ready engine plus its label mapping.
    ///
    /// Variables are defined first, in table order, then every rule is
    /// compiled against them; a rule naming an undefined variable fails the
    /// build without a partially constructed engine escaping.
    pub fn build(&self) -> Result<(Engine, Labels)> {
        let mut engine = Engine::new();
        let mut labels = Labels::default();
        for def in &self.variables {
            let var = engine.define_variable(&def.name, &def.values)?;
            for (value, label) in &def.labels {
                labels.insert(var, *value, label.clone());
            }
        }
        for rule in &self.rules {
            let when = rule.when.compile(&engine)?;
            let then = rule.then.compile(&engine)?;
            engine.define_constraint(Constraint::implies(when, then))?;
        }
        Ok((engine, labels))
    }
}

/// Value→label rendering map, entirely outside the engine's concern.
#[derive(Debug, Clone, Default)]
pub struct Labels {
    by_variable: HashMap<VariableId, HashMap<i64, String>>,
}

impl Labels {
    fn insert(&mut self, var: VariableId, value: i64, label: String) {
        self.by_variable.entry(var).or_default().insert(value, label);
    }

    /// The label for a value, falling back to the raw integer.
    pub fn label(&self, var: VariableId, value: i64) -> String {
        self.by_variable
            .get(&var)
            .and_then(|m| m.get(&value))
            .cloned()
            .unwrap_or_else(|| value.to_string())
    }
}
