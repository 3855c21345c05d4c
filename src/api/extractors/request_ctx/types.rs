/*
 * Responsibility
 * - The per-request context handlers see (identity + response helper settings)
 * - Built by the context middleware; identity fields are fixed at construction
 *
 * Notes
 * - is_signed_in() is derived from the identity Option, so "signed in without
 *   an identity" cannot be constructed
 * - Response helpers live in respond.rs
 */
use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::config::AppEnv;
use crate::services::{identity::SignedInUser, render::PageRenderer, session::Session};

/// Which credential produced the identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthSource {
    Session,
    ApiKey,
}

#[derive(Clone)]
struct Identity {
    user: SignedInUser,
    source: AuthSource,
}

/// Request-bound parts known before authentication runs.
#[derive(Clone)]
pub struct ContextShell {
    pub path: String,
    pub session: Session,
    pub app_env: AppEnv,
    pub pages: Arc<dyn PageRenderer>,
    pub body_limit: usize,
}

impl ContextShell {
    pub fn anonymous(self) -> RequestContext {
        RequestContext {
            shell: self,
            identity: None,
        }
    }

    pub fn signed_in(self, user: SignedInUser, source: AuthSource) -> RequestContext {
        RequestContext {
            shell: self,
            identity: Some(Identity { user, source }),
        }
    }
}

#[derive(Clone)]
pub struct RequestContext {
    shell: ContextShell,
    identity: Option<Identity>,
}

impl RequestContext {
    pub fn is_signed_in(&self) -> bool {
        self.identity.is_some()
    }

    pub fn signed_in_user(&self) -> Option<&SignedInUser> {
        self.identity.as_ref().map(|i| &i.user)
    }

    pub fn auth_source(&self) -> Option<AuthSource> {
        self.identity.as_ref().map(|i| i.source)
    }

    pub fn session(&self) -> &Session {
        &self.shell.session
    }

    /// Path of the original request URI (before any router nesting).
    pub fn path(&self) -> &str {
        &self.shell.path
    }

    pub fn app_env(&self) -> AppEnv {
        self.shell.app_env
    }

    pub(super) fn pages(&self) -> &dyn PageRenderer {
        self.shell.pages.as_ref()
    }

    pub(super) fn body_limit(&self) -> usize {
        self.shell.body_limit
    }
}

impl fmt::Debug for RequestContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestContext")
            .field("path", &self.shell.path)
            .field("is_signed_in", &self.is_signed_in())
            .field("auth_source", &self.auth_source())
            .field("app_env", &self.shell.app_env)
            .finish()
    }
}
