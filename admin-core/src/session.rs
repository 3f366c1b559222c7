/// Bearer credentials for the admin API. The sign-in flow that produces the
/// token is external; the token is passed into every store constructor
/// explicitly rather than read from ambient global state.
#[derive(Debug, Clone)]
pub struct Session {
    token: String,
}

impl Session {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn is_authenticated(&self) -> bool {
        !self.token.is_empty()
    }
}
