#[cfg(test)]
use crate::features::auth::model::AuthenticatedUser;

#[cfg(test)]
use axum::{extract::Request, middleware::Next, response::Response, Router};

#[cfg(test)]
pub fn create_admin_user() -> AuthenticatedUser {
    AuthenticatedUser {
        sub: "test-admin".to_string(),
        roles: vec!["admin".to_string()],
    }
}

#[cfg(test)]
pub fn create_customer_user() -> AuthenticatedUser {
    AuthenticatedUser {
        sub: "test-customer".to_string(),
        roles: vec!["customer".to_string()],
    }
}

/// Layer `router` so every request carries `user`, as `auth_middleware` would
#[cfg(test)]
pub fn with_user(router: Router, user: AuthenticatedUser) -> Router {
    router.layer(axum::middleware::from_fn(
        move |mut request: Request, next: Next| {
            let user = user.clone();
            async move {
                request.extensions_mut().insert(user);
                let response: Response = next.run(request).await;
                response
            }
        },
    ))
}
