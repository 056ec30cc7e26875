use erpadmin_auth::Session;

/// Session context for a request.
///
/// Always present on inspected routes; requests without credentials carry an
/// anonymous session, which every policy query denies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    session: Session,
}

impl SessionContext {
    pub fn new(session: Session) -> Self {
        Self { session }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }
}
