//! Documentation metadata handed to `swagger-autogen`.
//!
//! [`SwaggerDoc`] serializes to the `doc` object of the generated script:
//! API info, the server, an OAuth2 password-flow security scheme applied
//! globally, and the component schemas.

use std::collections::BTreeMap;

use prisma_swagger_define::SchemaSet;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::config::Settings;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SwaggerDoc {
    pub info: Info,
    pub servers: Vec<Server>,
    pub components: Components,
    /// Security requirements, scheme name to required scopes.
    pub security: Vec<BTreeMap<String, Vec<String>>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Info {
    pub title: String,
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Server {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Components {
    pub security_schemes: BTreeMap<String, SecurityScheme>,
    pub schemas: SchemaSet,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SecurityScheme {
    #[serde(rename = "type")]
    pub scheme_type: String,
    pub flows: OAuthFlows,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OAuthFlows {
    pub password: PasswordFlow,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordFlow {
    pub token_url: String,
    pub refresh_url: String,
    pub scopes: Map<String, Value>,
}

impl SwaggerDoc {
    /// Builds the metadata document from settings and the final schema set.
    ///
    /// The security requirement lists every configured scope.
    pub fn new(settings: &Settings, schemas: SchemaSet) -> Self {
        let scheme = SecurityScheme {
            scheme_type: "oauth2".to_string(),
            flows: OAuthFlows {
                password: PasswordFlow {
                    token_url: settings.oauth_token_url.clone(),
                    refresh_url: settings.oauth_refresh_url.clone(),
                    scopes: settings.oauth_scopes.clone(),
                },
            },
        };

        Self {
            info: Info {
                title: settings.service_title.clone(),
                version: settings.service_version.clone(),
            },
            servers: vec![Server {
                url: settings.server_url.clone(),
            }],
            components: Components {
                security_schemes: BTreeMap::from([(settings.security_scheme_name.clone(), scheme)]),
                schemas,
            },
            security: vec![BTreeMap::from([(
                settings.security_scheme_name.clone(),
                settings.oauth_scopes.keys().cloned().collect(),
            )])],
        }
    }
}
