//! Dashboard template variables.
//!
//! A variable is a named, user-editable value the dashboard substitutes into
//! widget definitions at view time: either into one named property of every
//! widget ([`VariableType::Property`]) or into every occurrence of a pattern
//! string ([`VariableType::Pattern`]). Its selectable values come from a
//! fixed list or from a server-evaluated metric search — the two sources are
//! one sum type, so a variable cannot carry both.

use crate::error::BuildError;
use serde::Serialize;
use serde_json::{json, Map, Value};

/// What the variable substitutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VariableType {
    /// Replaces a named widget property (e.g. `region`).
    Property,
    /// Replaces every occurrence of a pattern string.
    Pattern,
}

/// How the user edits the variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VariableInputType {
    /// A free-text field. Takes no values source.
    Input,
    /// One radio button per value. Requires a values source.
    Radio,
    /// A dropdown. Requires a values source.
    Select,
}

/// One selectable value, with an optional display label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariableValue {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub value: String,
}

impl VariableValue {
    pub fn new(value: impl Into<String>) -> Self {
        VariableValue {
            label: None,
            value: value.into(),
        }
    }

    pub fn with_label(label: impl Into<String>, value: impl Into<String>) -> Self {
        VariableValue {
            label: Some(label.into()),
            value: value.into(),
        }
    }
}

/// Where a variable's selectable values come from: exactly one of a fixed
/// list or a deferred, server-evaluated search.
#[derive(Debug, Clone, PartialEq)]
pub enum VariableValues {
    /// A fixed, ordered list of values.
    Static(Vec<VariableValue>),
    /// A metric search evaluated by the service when the dashboard is
    /// viewed; `populate_from` names the dimension whose values fill the
    /// selector.
    Search {
        expression: String,
        populate_from: String,
    },
}

impl VariableValues {
    /// A fixed list of values.
    pub fn from_values(values: Vec<VariableValue>) -> Self {
        VariableValues::Static(values)
    }

    /// A search over an explicit expression.
    pub fn from_search(expression: impl Into<String>, populate_from: impl Into<String>) -> Self {
        VariableValues::Search {
            expression: expression.into(),
            populate_from: populate_from.into(),
        }
    }

    /// A search assembled from its components: namespace, the dimension
    /// names that scope it, and an optional metric name.
    pub fn from_search_components(
        namespace: &str,
        dimensions: &[&str],
        metric_name: Option<&str>,
        populate_from: impl Into<String>,
    ) -> Self {
        let mut schema = String::from("{");
        schema.push_str(namespace);
        for dimension in dimensions {
            schema.push(',');
            schema.push_str(dimension);
        }
        schema.push('}');
        let expression = match metric_name {
            Some(name) => format!("{} {}", schema, name),
            None => schema,
        };
        VariableValues::Search {
            expression,
            populate_from: populate_from.into(),
        }
    }
}

/// Construction options for [`DashboardVariable`].
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardVariableProps {
    /// Unique id of the variable within the dashboard. Required.
    pub id: String,
    pub variable_type: VariableType,
    pub input_type: VariableInputType,
    /// The substituted property name or pattern string. Required.
    pub value: String,
    pub label: Option<String>,
    pub default_value: Option<String>,
    /// Whether the selector is shown. The service default is visible.
    pub visible: Option<bool>,
    pub values: Option<VariableValues>,
}

/// A named, user-editable dashboard value.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardVariable {
    props: DashboardVariableProps,
}

impl DashboardVariable {
    /// Builds a variable, failing fast on a missing id or substitution
    /// target, and on input-type/values combinations the selector cannot
    /// express: a free-text input has no value list, and a radio or select
    /// control has nothing to offer without one.
    pub fn new(props: DashboardVariableProps) -> Result<Self, BuildError> {
        if props.id.is_empty() {
            return Err(BuildError::MissingField {
                entity: "DashboardVariable",
                field: "id",
            });
        }
        if props.value.is_empty() {
            return Err(BuildError::MissingField {
                entity: "DashboardVariable",
                field: "value",
            });
        }
        match (props.input_type, &props.values) {
            (VariableInputType::Input, Some(_)) => {
                return Err(BuildError::Incompatible {
                    entity: "DashboardVariable",
                    message: "an 'input' variable cannot carry a values source".to_string(),
                });
            }
            (VariableInputType::Radio | VariableInputType::Select, None) => {
                return Err(BuildError::Incompatible {
                    entity: "DashboardVariable",
                    message: format!(
                        "a '{}' variable requires a values source",
                        match props.input_type {
                            VariableInputType::Radio => "radio",
                            _ => "select",
                        }
                    ),
                });
            }
            _ => {}
        }
        Ok(DashboardVariable { props })
    }

    pub fn id(&self) -> &str {
        &self.props.id
    }

    /// The serialized form for the dashboard document.
    pub(crate) fn render(&self) -> Value {
        let mut variable = Map::new();
        variable.insert("type".to_string(), json!(self.props.variable_type));
        let target_key = match self.props.variable_type {
            VariableType::Property => "property",
            VariableType::Pattern => "pattern",
        };
        variable.insert(target_key.to_string(), json!(self.props.value));
        variable.insert("inputType".to_string(), json!(self.props.input_type));
        variable.insert("id".to_string(), json!(self.props.id));
        if let Some(label) = &self.props.label {
            variable.insert("label".to_string(), json!(label));
        }
        if let Some(default_value) = &self.props.default_value {
            variable.insert("defaultValue".to_string(), json!(default_value));
        }
        if let Some(visible) = self.props.visible {
            variable.insert("visible".to_string(), json!(visible));
        }
        match &self.props.values {
            Some(VariableValues::Static(values)) => {
                variable.insert("values".to_string(), json!(values));
            }
            Some(VariableValues::Search {
                expression,
                populate_from,
            }) => {
                variable.insert("search".to_string(), json!(expression));
                variable.insert("populateFrom".to_string(), json!(populate_from));
            }
            None => {}
        }
        Value::Object(variable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn region_props() -> DashboardVariableProps {
        DashboardVariableProps {
            id: "region".to_string(),
            variable_type: VariableType::Property,
            input_type: VariableInputType::Select,
            value: "region".to_string(),
            label: Some("Region".to_string()),
            default_value: Some("us-east-1".to_string()),
            visible: None,
            values: Some(VariableValues::from_values(vec![
                VariableValue::with_label("N. Virginia", "us-east-1"),
                VariableValue::new("eu-west-1"),
            ])),
        }
    }

    #[test]
    fn property_variable_serializes_value_under_property() {
        let variable = DashboardVariable::new(region_props()).unwrap();
        assert_eq!(
            variable.render(),
            json!({
                "type": "property",
                "property": "region",
                "inputType": "select",
                "id": "region",
                "label": "Region",
                "defaultValue": "us-east-1",
                "values": [
                    { "label": "N. Virginia", "value": "us-east-1" },
                    { "value": "eu-west-1" }
                ]
            })
        );
    }

    #[test]
    fn pattern_variable_serializes_value_under_pattern() {
        let variable = DashboardVariable::new(DashboardVariableProps {
            variable_type: VariableType::Pattern,
            value: "us-east-1".to_string(),
            ..region_props()
        })
        .unwrap();
        assert_eq!(variable.render()["pattern"], json!("us-east-1"));
        assert_eq!(variable.render().get("property"), None);
    }

    #[test]
    fn search_source_serializes_expression_and_populate_from() {
        let variable = DashboardVariable::new(DashboardVariableProps {
            values: Some(VariableValues::from_search_components(
                "AWS/Lambda",
                &["FunctionName"],
                Some("Errors"),
                "FunctionName",
            )),
            ..region_props()
        })
        .unwrap();
        let rendered = variable.render();
        assert_eq!(
            rendered["search"],
            json!("{AWS/Lambda,FunctionName} Errors")
        );
        assert_eq!(rendered["populateFrom"], json!("FunctionName"));
        assert_eq!(rendered.get("values"), None);
    }

    #[test]
    fn id_and_value_are_required() {
        let err = DashboardVariable::new(DashboardVariableProps {
            id: String::new(),
            ..region_props()
        })
        .unwrap_err();
        assert!(matches!(err, BuildError::MissingField { field: "id", .. }));

        let err = DashboardVariable::new(DashboardVariableProps {
            value: String::new(),
            ..region_props()
        })
        .unwrap_err();
        assert!(matches!(err, BuildError::MissingField { field: "value", .. }));
    }

    #[test]
    fn input_variables_cannot_carry_values() {
        let err = DashboardVariable::new(DashboardVariableProps {
            input_type: VariableInputType::Input,
            ..region_props()
        })
        .unwrap_err();
        assert!(matches!(err, BuildError::Incompatible { .. }));
    }

    #[test]
    fn selector_variables_require_values() {
        let err = DashboardVariable::new(DashboardVariableProps {
            values: None,
            ..region_props()
        })
        .unwrap_err();
        assert!(matches!(err, BuildError::Incompatible { .. }));
    }

    #[test]
    fn input_variable_without_values_is_accepted() {
        let variable = DashboardVariable::new(DashboardVariableProps {
            input_type: VariableInputType::Input,
            values: None,
            ..region_props()
        })
        .unwrap();
        assert_eq!(variable.render()["inputType"], json!("input"));
    }
}
