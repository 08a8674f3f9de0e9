use crate::error::AppError;
use crate::utils::JwtService;
use actix_web::http::Method;
use actix_web::{
    Error, HttpMessage,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
};
use futures_util::future::LocalBoxFuture;
use std::future::{Ready, ready};

// Routes reachable without a bearer token. The catalog is public for reads
// only; writes to /api/products fall through to the token check.
struct PublicPaths {
    exact_paths: Vec<&'static str>,
    prefix_paths: Vec<&'static str>,
    read_only_prefixes: Vec<&'static str>,
}

impl PublicPaths {
    fn new() -> Self {
        Self {
            exact_paths: vec![
                "/swagger-ui",
                "/swagger-ui/",
                "/api-docs/openapi.json",
                "/api/health",
                "/api/auth/register",
                "/api/auth/login",
            ],
            prefix_paths: vec!["/swagger-ui/", "/api-docs/", "/uploads/"],
            // public for GET/HEAD only
            read_only_prefixes: vec!["/api/products"],
        }
    }

    fn is_public(&self, method: &Method, path: &str) -> bool {
        if self.exact_paths.contains(&path) {
            return true;
        }

        if self
            .prefix_paths
            .iter()
            .any(|&prefix| path.starts_with(prefix))
        {
            return true;
        }

        if *method == Method::GET || *method == Method::HEAD {
            return self
                .read_only_prefixes
                .iter()
                .any(|&prefix| path == prefix || path.starts_with(&format!("{prefix}/")));
        }

        false
    }
}

pub struct AuthMiddleware {
    jwt_service: JwtService,
}

impl AuthMiddleware {
    pub fn new(jwt_service: JwtService) -> Self {
        Self { jwt_service }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service,
            jwt_service: self.jwt_service.clone(),
            public_paths: PublicPaths::new(),
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: S,
    jwt_service: JwtService,
    public_paths: PublicPaths,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        // CORS preflight never carries credentials
        if req.method() == Method::OPTIONS {
            let fut = self.service.call(req);
            return Box::pin(fut);
        }

        if self.public_paths.is_public(req.method(), req.path()) {
            let fut = self.service.call(req);
            return Box::pin(fut);
        }

        let auth_header = req.headers().get("Authorization");

        let token = if let Some(auth_value) = auth_header {
            if let Ok(auth_str) = auth_value.to_str() {
                auth_str.strip_prefix("Bearer ")
            } else {
                None
            }
        } else {
            None
        };

        if let Some(token) = token {
            match self.jwt_service.verify_token(token) {
                Ok(claims) => match claims.user_id() {
                    Ok(user_id) => {
                        req.extensions_mut().insert(user_id);
                        let fut = self.service.call(req);
                        Box::pin(fut)
                    }
                    Err(error) => Box::pin(async move { Err(error.into()) }),
                },
                Err(error) => Box::pin(async move { Err(error.into()) }),
            }
        } else {
            let error = AppError::AuthError("Missing access token".to_string());
            Box::pin(async move { Err(error.into()) })
        }
    }
}

/// Current user id as injected by the middleware.
pub fn get_current_user_id(req: &actix_web::HttpRequest) -> Option<i64> {
    req.extensions().get::<i64>().copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_routes_are_public() {
        let paths = PublicPaths::new();
        assert!(paths.is_public(&Method::POST, "/api/auth/register"));
        assert!(paths.is_public(&Method::POST, "/api/auth/login"));
        assert!(!paths.is_public(&Method::GET, "/api/auth/profile"));
    }

    #[test]
    fn test_catalog_is_public_for_reads_only() {
        let paths = PublicPaths::new();
        assert!(paths.is_public(&Method::GET, "/api/products"));
        assert!(paths.is_public(&Method::GET, "/api/products/3"));
        assert!(paths.is_public(&Method::GET, "/api/products/categories"));
        assert!(!paths.is_public(&Method::POST, "/api/products"));
        assert!(!paths.is_public(&Method::PUT, "/api/products/3"));
        assert!(!paths.is_public(&Method::DELETE, "/api/products/3"));
        // prefix must match a whole segment
        assert!(!paths.is_public(&Method::GET, "/api/productsecret"));
    }

    #[test]
    fn test_protected_routes_need_a_token() {
        let paths = PublicPaths::new();
        assert!(!paths.is_public(&Method::GET, "/api/cart"));
        assert!(!paths.is_public(&Method::POST, "/api/orders"));
        assert!(!paths.is_public(&Method::PUT, "/api/users/password"));
    }

    #[test]
    fn test_infra_routes_are_public() {
        let paths = PublicPaths::new();
        assert!(paths.is_public(&Method::GET, "/api/health"));
        assert!(paths.is_public(&Method::GET, "/uploads/whey.png"));
        assert!(paths.is_public(&Method::GET, "/swagger-ui/index.html"));
        assert!(paths.is_public(&Method::GET, "/api-docs/openapi.json"));
    }
}
