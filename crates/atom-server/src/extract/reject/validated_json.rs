//! JSON extractor that runs `validator` rules after deserialization.

use std::borrow::Cow;
use std::collections::HashMap;

use axum::extract::{FromRequest, Request};
use derive_more::{Deref, DerefMut, From};
use serde::de::DeserializeOwned;
use serde_json::Value;
use validator::{Validate, ValidationError, ValidationErrors};

use super::Json;
use crate::handler::{Error, ErrorKind};

/// Tracing target for request validation.
const TRACING_TARGET: &str = "atom_server::extract::validate";

/// [`Json`] followed by [`Validate::validate`].
///
/// Validation failures become a single `400` whose message lists every
/// failing field.
#[must_use]
#[derive(Debug, Clone, Copy, Default, Deref, DerefMut, From)]
pub struct ValidateJson<T>(pub T);

impl<T> ValidateJson<T> {
    /// Wraps an already validated value.
    #[inline]
    pub fn new(inner: T) -> Self {
        Self(inner)
    }

    /// Returns the inner validated value.
    #[inline]
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T, S> FromRequest<S> for ValidateJson<T>
where
    T: DeserializeOwned + Validate + 'static,
    S: Send + Sync,
{
    type Rejection = Error<'static>;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = <Json<T> as FromRequest<S>>::from_request(req, state).await?;
        data.validate()?;
        Ok(Self::new(data))
    }
}

fn number(value: Option<&Value>) -> Option<f64> {
    value.and_then(Value::as_f64)
}

fn format_range_error(field: &str, params: &HashMap<Cow<'static, str>, Value>) -> String {
    match (number(params.get("min")), number(params.get("max"))) {
        (Some(min), Some(max)) => format!("Field '{}' must be between {} and {}", field, min, max),
        (Some(min), None) => format!("Field '{}' must be at least {}", field, min),
        (None, Some(max)) => format!("Field '{}' must be at most {}", field, max),
        (None, None) => format!("Field '{}' is out of valid range", field),
    }
}

fn format_length_error(field: &str, params: &HashMap<Cow<'static, str>, Value>) -> String {
    match (number(params.get("min")), number(params.get("max"))) {
        (Some(min), Some(max)) => format!(
            "Field '{}' must be between {} and {} characters long",
            field, min as u64, max as u64
        ),
        (Some(min), None) => {
            format!("Field '{}' must be at least {} characters long", field, min as u64)
        }
        (None, Some(max)) => {
            format!("Field '{}' must be at most {} characters long", field, max as u64)
        }
        (None, None) => format!("Field '{}' has invalid length", field),
    }
}

fn format_validation_error(field: &str, error: &ValidationError) -> String {
    if let Some(message) = &error.message {
        return format!("Field '{}': {}", field, message);
    }

    match error.code.as_ref() {
        "range" => format_range_error(field, &error.params),
        "length" => format_length_error(field, &error.params),
        "required" => format!("Field '{}' is required", field),
        code => format!("Field '{}' failed validation: {}", field, code),
    }
}

impl From<ValidationErrors> for Error<'static> {
    fn from(errors: ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, field_errors)| {
                field_errors
                    .iter()
                    .map(move |error| format_validation_error(field, error))
            })
            .collect();
        messages.sort();

        let message = match messages.as_slice() {
            [] => "Validation failed".to_owned(),
            _ => messages.join(". "),
        };

        tracing::warn!(
            target: TRACING_TARGET,
            errors = ?errors.field_errors(),
            "request validation failed"
        );

        ErrorKind::BadRequest
            .with_message(message)
            .with_resource("request")
    }
}

impl<T> aide::OperationInput for ValidateJson<T>
where
    T: schemars::JsonSchema,
{
    fn operation_input(
        ctx: &mut aide::generate::GenContext,
        operation: &mut aide::openapi::Operation,
    ) {
        Json::<T>::operation_input(ctx, operation);
    }

    fn inferred_early_responses(
        ctx: &mut aide::generate::GenContext,
        operation: &mut aide::openapi::Operation,
    ) -> Vec<(Option<u16>, aide::openapi::Response)> {
        Json::<T>::inferred_early_responses(ctx, operation)
    }
}

#[cfg(test)]
mod tests {
    use validator::Validate;

    use super::*;

    #[derive(Debug, Validate)]
    struct Sample {
        #[validate(range(min = -90.0, max = 90.0))]
        latitude: f64,
        #[validate(length(min = 1, max = 8))]
        label: String,
    }

    #[test]
    fn range_errors_name_the_bounds() {
        let sample = Sample {
            latitude: 120.0,
            label: "ok".to_owned(),
        };
        let errors = sample.validate().unwrap_err();
        let error = Error::from(errors);

        assert_eq!(error.kind(), ErrorKind::BadRequest);
        assert_eq!(
            error.message(),
            Some("Field 'latitude' must be between -90 and 90")
        );
    }

    #[test]
    fn multiple_errors_are_joined() {
        let sample = Sample {
            latitude: -91.0,
            label: String::new(),
        };
        let error = Error::from(sample.validate().unwrap_err());
        let message = error.message().unwrap_or_default();

        assert!(message.contains("latitude"));
        assert!(message.contains("label"));
    }
}
