//! # Request Validation
//!
//! Both package endpoints accept the same body. Every field is optional at the
//! serde level so a missing one is reported by name as a `400` instead of a
//! generic deserialisation error.

use crate::error::ServiceError;
use crate::protect::guard::normalize_allowed_domain;
use common::model::package::PackageProfile;
use common::requests::SecurePackageRequest;

/// A package request with every required field present and checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedRequest {
    pub slug: String,
    pub user_email: String,
    pub affiliate_code: String,
    /// Normalised host; always `None` for standard packages.
    pub allowed_domain: Option<String>,
}

/// Checks a package request body for the given profile.
///
/// # Arguments
/// * `request` - The deserialised body.
/// * `profile` - Decides whether `allowedDomain` is normalised or dropped.
///
/// # Returns
/// - The validated request with trimmed fields.
/// - `ServiceError::MissingField` naming the first absent required field.
/// - `ServiceError::Validation` for a malformed email, affiliate code or domain.
pub fn validate(request: SecurePackageRequest, profile: PackageProfile) -> Result<ValidatedRequest, ServiceError> {
    let slug = required(request.slug, "slug")?;
    let user_email = required(request.user_email, "userEmail")?;
    let affiliate_code = required(request.affiliate_code, "affiliateCode")?;

    if !plausible_email(&user_email) {
        return Err(ServiceError::Validation(format!(
            "userEmail '{}' is not a valid email address",
            user_email
        )));
    }
    if affiliate_code.chars().any(char::is_control) {
        return Err(ServiceError::Validation(
            "affiliateCode must not contain control characters".to_string(),
        ));
    }

    let allowed_domain = match profile {
        PackageProfile::Secure => request
            .allowed_domain
            .filter(|domain| !domain.trim().is_empty())
            .map(|domain| normalize_allowed_domain(&domain))
            .transpose()
            .map_err(ServiceError::Validation)?,
        PackageProfile::Standard => None,
    };

    Ok(ValidatedRequest {
        slug,
        user_email,
        affiliate_code,
        allowed_domain,
    })
}

fn required(value: Option<String>, field: &'static str) -> Result<String, ServiceError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or(ServiceError::MissingField(field))
}

fn plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !email.chars().any(char::is_whitespace),
        None => false,
    }
}
