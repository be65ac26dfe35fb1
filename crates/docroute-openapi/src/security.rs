//! Security declarations and their compilation into document security schemes

use crate::error::{OpenApiError, OpenApiResult};
use crate::specification::{OAuth2Flows, SecurityRequirement, SecurityScheme};
use serde::{Deserialize, Serialize};

/// Scheme name used when a declaration does not carry one
pub const DEFAULT_SECURITY_SCHEME_NAME: &str = "defaultAuth";

/// Header an `apiKey` declaration is read from unless it names another
pub const DEFAULT_API_KEY_HEADER: &str = "X-API-Key";

/// Simplified security declaration attached to a route.
///
/// `scheme_type` is kept as text so that declarations loaded from configuration
/// can carry any value; unknown types are rejected when the document is compiled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityDeclaration {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub scheme_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bearer_format: Option<String>,
    /// Header carrying the key for `apiKey`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameter_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flows: Option<OAuth2Flows>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open_id_connect_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl SecurityDeclaration {
    /// Declaration of an arbitrary type, checked only at compile time
    pub fn custom(scheme_type: impl Into<String>) -> Self {
        Self {
            name: None,
            scheme_type: scheme_type.into(),
            bearer_format: None,
            parameter_name: None,
            flows: None,
            open_id_connect_url: None,
            description: None,
        }
    }

    pub fn basic() -> Self {
        Self::custom("basic")
    }

    pub fn bearer() -> Self {
        Self::custom("bearer")
    }

    pub fn bearer_with_format(format: impl Into<String>) -> Self {
        Self {
            bearer_format: Some(format.into()),
            ..Self::bearer()
        }
    }

    pub fn api_key(header: impl Into<String>) -> Self {
        Self {
            parameter_name: Some(header.into()),
            ..Self::custom("apiKey")
        }
    }

    pub fn oauth2(flows: OAuth2Flows) -> Self {
        Self {
            flows: Some(flows),
            ..Self::custom("oauth2")
        }
    }

    pub fn open_id_connect(url: impl Into<String>) -> Self {
        Self {
            open_id_connect_url: Some(url.into()),
            ..Self::custom("openIdConnect")
        }
    }

    /// Register the compiled scheme under `name` instead of the default name
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A declaration translated into a named document scheme
#[derive(Debug, Clone)]
pub struct CompiledSecurity {
    pub name: String,
    pub scheme: SecurityScheme,
}

impl CompiledSecurity {
    /// The single requirement an operation carries: the scheme with no scopes
    pub fn requirement(&self) -> SecurityRequirement {
        let mut requirement = SecurityRequirement::new();
        requirement.insert(self.name.clone(), Vec::new());
        requirement
    }
}

/// Translate a declaration into a full security scheme.
///
/// Unknown types, and `oauth2`/`openIdConnect` declarations missing the data their
/// scheme requires, are configuration errors.
pub fn compile_security(
    declaration: &SecurityDeclaration,
    default_name: &str,
) -> OpenApiResult<CompiledSecurity> {
    let description = declaration.description.clone();
    let scheme = match declaration.scheme_type.as_str() {
        "basic" => SecurityScheme::Http {
            scheme: "basic".to_string(),
            bearer_format: None,
            description,
        },
        "bearer" => SecurityScheme::Http {
            scheme: "bearer".to_string(),
            bearer_format: declaration.bearer_format.clone(),
            description,
        },
        "apiKey" => SecurityScheme::ApiKey {
            name: declaration
                .parameter_name
                .clone()
                .unwrap_or_else(|| DEFAULT_API_KEY_HEADER.to_string()),
            location: "header".to_string(),
            description,
        },
        "oauth2" => {
            let flows = declaration.flows.clone().ok_or_else(|| {
                OpenApiError::invalid_security("oauth2 declaration requires flows")
            })?;
            SecurityScheme::OAuth2 { flows, description }
        }
        "openIdConnect" => {
            let url = declaration.open_id_connect_url.clone().ok_or_else(|| {
                OpenApiError::invalid_security("openIdConnect declaration requires openIdConnectUrl")
            })?;
            SecurityScheme::OpenIdConnect {
                open_id_connect_url: url,
                description,
            }
        }
        other => return Err(OpenApiError::unsupported_security(other)),
    };

    Ok(CompiledSecurity {
        name: declaration
            .name
            .clone()
            .unwrap_or_else(|| default_name.to_string()),
        scheme,
    })
}
