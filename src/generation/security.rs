//! Security-scheme patch for downloaded specification documents.
//!
//! Some backends publish a Swagger document declaring only HTTP Basic auth,
//! while the API really accepts `Authorization: Token <key>`. This rewrites the
//! exact fragment the backend emits so the generated client can send the
//! token header. It is a substring replacement; documents without the fragment
//! pass through untouched.

/// Fragment emitted by the backend for a lone Basic scheme
pub const BASIC_ONLY_FRAGMENT: &str =
    r#""securityDefinitions": {"Basic": {"type": "basic"}},"security": [{"Basic": []}]"#;

/// Basic plus a header-based token scheme, required together
pub const BASIC_AND_TOKEN_FRAGMENT: &str = r#""securityDefinitions": {
        "Basic": {"type": "basic"},
        "TokenAuth": {
            "type": "apiKey",
            "in": "header",
            "name": "Authorization",
            "description": "Token-based authentication with required prefix \"Token\""
        }
    },
    "security": [{"Basic": []}, {"TokenAuth": []}]"#;

/// Outcome of [`inject_token_auth`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecurityPatch {
    pub document: String,
    /// False when the fragment was not found and the document is unchanged
    pub applied: bool,
}

/// Replace every Basic-only security declaration with Basic + TokenAuth
pub fn inject_token_auth(document: String) -> SecurityPatch {
    if !document.contains(BASIC_ONLY_FRAGMENT) {
        return SecurityPatch {
            document,
            applied: false,
        };
    }

    SecurityPatch {
        document: document.replace(BASIC_ONLY_FRAGMENT, BASIC_AND_TOKEN_FRAGMENT),
        applied: true,
    }
}
