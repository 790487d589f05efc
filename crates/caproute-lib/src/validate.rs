use std::fmt;

use serde::Serialize;

use crate::cost::TraversalParameters;
use crate::error::{format_suggestions, Error};
use crate::graph::Graph;

/// Query input a [`ValidationError`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InputField {
    Start,
    End,
    FuelPrice,
    FuelEfficiency,
}

impl fmt::Display for InputField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            InputField::Start => "start",
            InputField::End => "end",
            InputField::FuelPrice => "fuel_price",
            InputField::FuelEfficiency => "fuel_efficiency",
        };
        f.write_str(value)
    }
}

/// A problem with user-supplied query input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    pub field: InputField,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: InputField, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }

    /// Convert an [`Error::UnknownNode`] into a validation error on `field`.
    ///
    /// Any other error is reported verbatim.
    pub fn from_lookup(field: InputField, error: &Error) -> Self {
        match error {
            Error::UnknownNode { name, suggestions } => Self::new(
                field,
                format!("Unknown city '{}'{}", name, format_suggestions(suggestions)),
            ),
            other => Self::new(field, other.to_string()),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Check the query inputs, reporting every violation at once.
///
/// Blank names count as missing. Prices and efficiencies must be finite and
/// strictly positive.
pub fn validate_inputs(
    start: Option<&str>,
    end: Option<&str>,
    params: &TraversalParameters,
) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if is_missing(start) {
        errors.push(ValidationError::new(
            InputField::Start,
            "Select the origin capital",
        ));
    }

    if is_missing(end) {
        errors.push(ValidationError::new(
            InputField::End,
            "Select the destination capital",
        ));
    }

    if !is_positive(params.fuel_price) {
        errors.push(ValidationError::new(
            InputField::FuelPrice,
            "Fuel price must be greater than zero",
        ));
    }

    if !is_positive(params.fuel_efficiency) {
        errors.push(ValidationError::new(
            InputField::FuelEfficiency,
            "Vehicle fuel efficiency must be greater than zero",
        ));
    }

    if is_positive(params.fuel_price)
        && is_positive(params.fuel_efficiency)
        && !(params.fuel_price / params.fuel_efficiency).is_finite()
    {
        errors.push(ValidationError::new(
            InputField::FuelEfficiency,
            "Fuel price per kilometre is too large; raise the efficiency or lower the price",
        ));
    }

    errors
}

/// Check that both endpoints name cities of `graph`.
pub fn validate_endpoints(graph: &Graph, start: &str, end: &str) -> Vec<ValidationError> {
    [(InputField::Start, start), (InputField::End, end)]
        .into_iter()
        .filter_map(|(field, name)| {
            graph
                .resolve(name)
                .err()
                .map(|err| ValidationError::from_lookup(field, &err))
        })
        .collect()
}

fn is_missing(value: Option<&str>) -> bool {
    value.map(|v| v.trim().is_empty()).unwrap_or(true)
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}
