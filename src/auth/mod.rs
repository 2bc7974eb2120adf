//
//  bitbucket-scaffolder
//  auth/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Authentication Module
//!
//! Credentials used against Bitbucket Cloud, both for REST calls and for
//! pushing initial repository content over HTTPS.
//!
//! ## Supported Authentication Methods
//!
//! - **App Password**: username + app password from the integration config,
//!   sent as HTTP Basic authentication.
//! - **Token**: a user login token supplied by the caller, sent as a Bearer
//!   token. A token always wins over stored app password credentials.
//!
//! ## Example
//!
//! ```rust
//! use bitbucket_scaffolder::auth::AuthCredential;
//!
//! let credential = AuthCredential::app_password("u", "p");
//! assert_eq!(credential.header_value(), "Basic dTpw");
//!
//! let credential = AuthCredential::bearer("user-token");
//! assert_eq!(credential.header_value(), "Bearer user-token");
//! ```

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::header::AUTHORIZATION;
use reqwest::RequestBuilder;

/// Username Bitbucket expects when a token is used for git over HTTPS.
pub const TOKEN_AUTH_USERNAME: &str = "x-token-auth";

/// Credentials attached to every request as an `Authorization` header.
///
/// The header value is computed fresh for each request and never persisted.
///
/// # Variants
///
/// - `AppPassword`: Basic authentication with a username and app password.
/// - `Bearer`: Bearer authentication with a user login token.
#[derive(Clone, PartialEq, Eq)]
pub enum AuthCredential {
    /// App password authentication for Bitbucket Cloud.
    AppPassword {
        /// The Bitbucket username.
        username: String,
        /// The app password generated from Bitbucket settings.
        app_password: String,
    },
    /// Token supplied by the caller.
    Bearer {
        /// The token string.
        token: String,
    },
}

impl AuthCredential {
    /// Creates an app password credential.
    pub fn app_password(username: impl Into<String>, app_password: impl Into<String>) -> Self {
        Self::AppPassword {
            username: username.into(),
            app_password: app_password.into(),
        }
    }

    /// Creates a bearer token credential.
    pub fn bearer(token: impl Into<String>) -> Self {
        Self::Bearer {
            token: token.into(),
        }
    }

    /// Renders the value of the `Authorization` header.
    ///
    /// - `AppPassword` → `Basic base64(username:app_password)`
    /// - `Bearer` → `Bearer <token>`
    pub fn header_value(&self) -> String {
        match self {
            Self::AppPassword {
                username,
                app_password,
            } => format!(
                "Basic {}",
                STANDARD.encode(format!("{}:{}", username, app_password))
            ),
            Self::Bearer { token } => format!("Bearer {}", token),
        }
    }

    /// Applies the authentication credential to an HTTP request.
    ///
    /// The header is attached exactly as rendered by
    /// [`header_value`](Self::header_value).
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use bitbucket_scaffolder::auth::AuthCredential;
    /// use reqwest::Client;
    ///
    /// async fn make_authenticated_request(credential: &AuthCredential) {
    ///     let client = Client::new();
    ///     let request = client.get("https://api.bitbucket.org/2.0/user");
    ///     let response = credential.apply_to_request(request).send().await;
    /// }
    /// ```
    pub fn apply_to_request(&self, request: RequestBuilder) -> RequestBuilder {
        request.header(AUTHORIZATION, self.header_value())
    }

    /// Credentials for pushing over HTTPS with the same identity.
    pub fn git_auth(&self) -> GitAuth {
        match self {
            Self::AppPassword {
                username,
                app_password,
            } => GitAuth {
                username: username.clone(),
                password: app_password.clone(),
            },
            Self::Bearer { token } => GitAuth::token(token),
        }
    }
}

impl std::fmt::Debug for AuthCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AppPassword { username, .. } => f
                .debug_struct("AppPassword")
                .field("username", username)
                .field("app_password", &"<redacted>")
                .finish(),
            Self::Bearer { .. } => f.debug_struct("Bearer").field("token", &"<redacted>").finish(),
        }
    }
}

/// Username/password pair used by the git transport.
#[derive(Clone, PartialEq, Eq)]
pub struct GitAuth {
    pub username: String,
    pub password: String,
}

impl GitAuth {
    /// Token based git credentials (`x-token-auth:<token>`).
    pub fn token(token: &str) -> Self {
        Self {
            username: TOKEN_AUTH_USERNAME.to_string(),
            password: token.to_string(),
        }
    }
}

impl std::fmt::Debug for GitAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitAuth")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_header_matches_base64_of_user_and_password() {
        let credential = AuthCredential::app_password("u", "p");
        assert_eq!(credential.header_value(), "Basic dTpw");
    }

    #[test]
    fn test_bearer_header() {
        assert_eq!(
            AuthCredential::bearer("abc123").header_value(),
            "Bearer abc123"
        );
    }

    #[test]
    fn test_git_auth_for_token_uses_token_username() {
        let auth = AuthCredential::bearer("abc123").git_auth();
        assert_eq!(auth.username, "x-token-auth");
        assert_eq!(auth.password, "abc123");
    }

    #[test]
    fn test_git_auth_for_app_password_reuses_credentials() {
        let auth = AuthCredential::app_password("u", "p").git_auth();
        assert_eq!(auth, GitAuth { username: "u".to_string(), password: "p".to_string() });
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let rendered = format!("{:?}", AuthCredential::app_password("u", "hunter2"));
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("<redacted>"));
    }
}
