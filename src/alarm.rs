//! Composite alarm rule expressions.
//!
//! An [`AlarmRule`] is a boolean expression tree over named alarms' states,
//! built bottom-up from the constructors and rendered into the composite-alarm
//! rule grammar: `ALARM("name") AND (OK("other") OR TRUE)`. Whether the
//! referenced alarms exist is not checked here — that is the service's job at
//! deploy time.

use crate::error::BuildError;
use std::fmt;

/// A named alarm state that a rule can test for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlarmState {
    Alarm,
    Ok,
    InsufficientData,
}

impl AlarmState {
    /// The grammar keyword for this state.
    pub fn as_str(&self) -> &'static str {
        match self {
            AlarmState::Alarm => "ALARM",
            AlarmState::Ok => "OK",
            AlarmState::InsufficientData => "INSUFFICIENT_DATA",
        }
    }
}

impl fmt::Display for AlarmState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A boolean expression over alarm states. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlarmRule {
    /// Tests one alarm for one state: `ALARM("name")`.
    State { alarm: String, state: AlarmState },
    /// The constants `TRUE` / `FALSE`.
    Bool(bool),
    /// All operands must hold: `AND`.
    AllOf(Vec<AlarmRule>),
    /// At least one operand must hold: `OR`.
    AnyOf(Vec<AlarmRule>),
    /// Negation: `NOT`.
    Not(Box<AlarmRule>),
    /// A pre-rendered rule string carried through uninterpreted.
    Raw(String),
}

impl AlarmRule {
    /// A rule that holds when every operand holds.
    pub fn all_of(operands: Vec<AlarmRule>) -> Result<AlarmRule, BuildError> {
        if operands.is_empty() {
            return Err(BuildError::EmptyOperands { operator: "AND" });
        }
        Ok(AlarmRule::AllOf(operands))
    }

    /// A rule that holds when at least one operand holds.
    pub fn any_of(operands: Vec<AlarmRule>) -> Result<AlarmRule, BuildError> {
        if operands.is_empty() {
            return Err(BuildError::EmptyOperands { operator: "OR" });
        }
        Ok(AlarmRule::AnyOf(operands))
    }

    /// The negation of `operand`.
    pub fn not(operand: AlarmRule) -> AlarmRule {
        AlarmRule::Not(Box::new(operand))
    }

    /// A rule testing the named alarm for `state`.
    pub fn from_alarm(alarm: impl Into<String>, state: AlarmState) -> AlarmRule {
        AlarmRule::State {
            alarm: alarm.into(),
            state,
        }
    }

    /// The constant `TRUE` or `FALSE`.
    pub fn from_boolean(value: bool) -> AlarmRule {
        AlarmRule::Bool(value)
    }

    /// Wraps an already-rendered rule string. The string is not parsed; it
    /// renders back out verbatim, parenthesized when nested so its own
    /// operators cannot rebind.
    pub fn from_string(rule: impl Into<String>) -> AlarmRule {
        AlarmRule::Raw(rule.into())
    }

    /// Renders this rule into the composite-alarm grammar.
    pub fn render(&self) -> String {
        match self {
            AlarmRule::State { alarm, state } => format!("{}(\"{}\")", state, alarm),
            AlarmRule::Bool(true) => "TRUE".to_string(),
            AlarmRule::Bool(false) => "FALSE".to_string(),
            AlarmRule::AllOf(operands) => Self::render_join(operands, " AND "),
            AlarmRule::AnyOf(operands) => Self::render_join(operands, " OR "),
            AlarmRule::Not(operand) => format!("NOT {}", operand.render_operand()),
            AlarmRule::Raw(raw) => raw.clone(),
        }
    }

    fn render_join(operands: &[AlarmRule], separator: &str) -> String {
        operands
            .iter()
            .map(AlarmRule::render_operand)
            .collect::<Vec<_>>()
            .join(separator)
    }

    /// Renders as an operand of an enclosing operator: compound rules are
    /// parenthesized, leaves are not.
    fn render_operand(&self) -> String {
        if self.is_compound() {
            format!("({})", self.render())
        } else {
            self.render()
        }
    }

    fn is_compound(&self) -> bool {
        matches!(
            self,
            AlarmRule::AllOf(_) | AlarmRule::AnyOf(_) | AlarmRule::Not(_) | AlarmRule::Raw(_)
        )
    }
}

impl fmt::Display for AlarmRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn leaves_render_bare_at_top_level() {
        let rule = AlarmRule::all_of(vec![
            AlarmRule::from_alarm("a", AlarmState::Alarm),
            AlarmRule::from_alarm("b", AlarmState::Ok),
        ])
        .unwrap();
        assert_eq!(rule.render(), "ALARM(\"a\") AND OK(\"b\")");
    }

    #[test]
    fn nested_compounds_are_parenthesized() {
        let rule = AlarmRule::all_of(vec![
            AlarmRule::from_alarm("name", AlarmState::Alarm),
            AlarmRule::any_of(vec![
                AlarmRule::from_alarm("other", AlarmState::Ok),
                AlarmRule::from_boolean(true),
            ])
            .unwrap(),
        ])
        .unwrap();
        assert_eq!(rule.render(), "ALARM(\"name\") AND (OK(\"other\") OR TRUE)");
    }

    #[test]
    fn not_parenthesizes_compound_operands_only() {
        let leaf = AlarmRule::not(AlarmRule::from_alarm("x", AlarmState::InsufficientData));
        assert_eq!(leaf.render(), "NOT INSUFFICIENT_DATA(\"x\")");

        let compound = AlarmRule::not(
            AlarmRule::any_of(vec![
                AlarmRule::from_alarm("a", AlarmState::Alarm),
                AlarmRule::from_alarm("b", AlarmState::Alarm),
            ])
            .unwrap(),
        );
        assert_eq!(compound.render(), "NOT (ALARM(\"a\") OR ALARM(\"b\"))");
    }

    #[test]
    fn raw_round_trips_verbatim() {
        let rendered = AlarmRule::all_of(vec![
            AlarmRule::from_alarm("a", AlarmState::Alarm),
            AlarmRule::from_alarm("b", AlarmState::Ok),
        ])
        .unwrap()
        .render();
        assert_eq!(AlarmRule::from_string(rendered.clone()).render(), rendered);
    }

    #[test]
    fn raw_is_parenthesized_when_nested() {
        let rule = AlarmRule::all_of(vec![
            AlarmRule::from_string("ALARM(\"a\") OR ALARM(\"b\")"),
            AlarmRule::from_alarm("c", AlarmState::Ok),
        ])
        .unwrap();
        assert_eq!(
            rule.render(),
            "(ALARM(\"a\") OR ALARM(\"b\")) AND OK(\"c\")"
        );
    }

    #[test]
    fn empty_operand_lists_are_rejected() {
        assert_eq!(
            AlarmRule::all_of(vec![]).unwrap_err(),
            BuildError::EmptyOperands { operator: "AND" }
        );
        assert_eq!(
            AlarmRule::any_of(vec![]).unwrap_err(),
            BuildError::EmptyOperands { operator: "OR" }
        );
    }

    #[test]
    fn booleans_render_as_keywords() {
        assert_eq!(AlarmRule::from_boolean(true).render(), "TRUE");
        assert_eq!(AlarmRule::from_boolean(false).render(), "FALSE");
    }
}
