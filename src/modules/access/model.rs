use linguadesk_access::{FunctionDescriptor, PageAction, PageDescriptor};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// One access question. Exactly one of `page`, `function`, `data`, `special`
/// must be set; `action` applies to `page` only.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_single_check"))]
pub struct AccessCheckRequest {
    /// Role to evaluate; defaults to the session role. Other roles need
    /// manage_roles.
    #[validate(length(min = 1, max = 64, message = "role must be 1-64 characters"))]
    pub role: Option<String>,
    pub page: Option<String>,
    pub action: Option<PageAction>,
    pub function: Option<String>,
    pub data: Option<String>,
    pub special: Option<String>,
}

fn validate_single_check(request: &AccessCheckRequest) -> Result<(), ValidationError> {
    let given = [
        request.page.is_some(),
        request.function.is_some(),
        request.data.is_some(),
        request.special.is_some(),
    ]
    .into_iter()
    .filter(|set| *set)
    .count();

    if given != 1 {
        return Err(ValidationError::new("single_check")
            .with_message("exactly one of page, function, data, special is required".into()));
    }
    if request.action.is_some() && request.page.is_none() {
        return Err(ValidationError::new("action_without_page")
            .with_message("action only applies to page checks".into()));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum CheckKind {
    Page,
    Function,
    Data,
    Special,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AccessCheckResponse {
    pub role: String,
    pub kind: CheckKind,
    pub subject: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<PageAction>,
    pub allowed: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AccessiblePagesResponse {
    pub role: String,
    pub pages: Vec<PageDescriptor>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AccessibleFunctionsResponse {
    pub role: String,
    pub functions: Vec<FunctionDescriptor>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exactly_one_check() {
        let none = AccessCheckRequest::default();
        assert!(none.validate().is_err());

        let two = AccessCheckRequest {
            page: Some("/staff".to_string()),
            function: Some("messaging".to_string()),
            ..AccessCheckRequest::default()
        };
        assert!(two.validate().is_err());

        let one = AccessCheckRequest {
            page: Some("/staff".to_string()),
            action: Some(PageAction::Write),
            ..AccessCheckRequest::default()
        };
        assert!(one.validate().is_ok());
    }

    #[test]
    fn test_action_needs_page() {
        let request = AccessCheckRequest {
            function: Some("messaging".to_string()),
            action: Some(PageAction::Delete),
            ..AccessCheckRequest::default()
        };
        assert!(request.validate().is_err());
    }
}
